use super::coupling::Coupling;
use super::density::Density;
use crate::geometry::marginal::Marginal;
use crate::solver::config::SolverConfig;
use crate::Distance;
use crate::Entropy;
use crate::Probability;
use ndarray::Array1;
use ndarray::Array2;

/// entropy-regularized optimal transport between two marginals, solved by
/// alternating scaling of dual potentials in the log domain.
///
/// the kernel is precomputed as -cost / epsilon; both it and the
/// potentials are clamped into a safe numeric range, so a pathologically
/// small epsilon degrades the answer instead of poisoning it with
/// NaN/Inf. any clamp is reported once as a warning after the solve.
pub struct Sinkhorn<'a> {
    cost: &'a Array2<Distance>,
    p: &'a Marginal,
    q: &'a Marginal,
    kernel: Array2<Entropy>,
    lhs: Array1<Entropy>,
    rhs: Array1<Entropy>,
    epsilon: Entropy,
    tolerance: Distance,
    clamped: bool,
}

impl Sinkhorn<'_> {
    /// hyperparameter that determines maximum number of scaling sweeps
    const fn sweeps() -> usize {
        100
    }
    /// hard bound on log-domain scaling factors and kernel entries
    const fn limit() -> Entropy {
        1e15
    }

    /// calculate ε-minimizing potentials by alternating scaling sweeps
    fn evolve(mut self) -> Self {
        for _ in 0..Self::sweeps() {
            let lhs = self.bounded(self.lhs());
            let delta_lhs = Self::shift(&self.lhs, &lhs);
            self.lhs = lhs;
            let rhs = self.bounded(self.rhs());
            let delta_rhs = Self::shift(&self.rhs, &rhs);
            self.rhs = rhs;
            if delta_lhs.max(delta_rhs) < self.tolerance {
                break;
            }
        }
        if self.clamped {
            log::warn!(
                "entropic scaling clamped: epsilon {} is near-degenerate for this cost range",
                self.epsilon
            );
        }
        self
    }
    /// next LHS potential, pinning the plan's row marginals to p
    fn lhs(&self) -> Array1<Entropy> {
        use rayon::prelude::*;
        self.p
            .support()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|i| {
                self.p.density(i).ln()
                    - logsumexp(self.q.support().map(|j| self.rhs[j] + self.kernel[[i, j]]))
            })
            .collect::<Vec<_>>()
            .into()
    }
    /// next RHS potential, pinning the plan's column marginals to q
    fn rhs(&self) -> Array1<Entropy> {
        use rayon::prelude::*;
        self.q
            .support()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|j| {
                self.q.density(j).ln()
                    - logsumexp(self.p.support().map(|i| self.lhs[i] + self.kernel[[i, j]]))
            })
            .collect::<Vec<_>>()
            .into()
    }
    /// clamp a fresh potential into the safe range, recording the event
    fn bounded(&mut self, potential: Array1<Entropy>) -> Array1<Entropy> {
        let mut clamped = false;
        let potential = potential.mapv(|x| {
            if x.is_nan() || x.abs() > Self::limit() {
                clamped = true;
                if x.is_nan() { 0. } else { Self::limit().copysign(x) }
            } else {
                x
            }
        });
        self.clamped |= clamped;
        potential
    }
    /// sup-norm change between consecutive potentials
    fn shift(prev: &Array1<Entropy>, next: &Array1<Entropy>) -> Entropy {
        prev.iter()
            .zip(next.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0., Entropy::max)
    }
    /// materialize the full transport plan under the current potentials
    pub fn plan(&self) -> Array2<Probability> {
        Array2::from_shape_fn((self.p.n(), self.q.n()), |(i, j)| self.flow(i, j))
    }
}

impl Coupling for Sinkhorn<'_> {
    fn minimize(self) -> Self {
        self.evolve()
    }
    fn flow(&self, x: usize, y: usize) -> Probability {
        (self.lhs[x] + self.rhs[y] + self.kernel[[x, y]]).min(700.).exp()
    }
    fn cost(&self) -> Distance {
        self.p
            .support()
            .flat_map(|x| self.q.support().map(move |y| (x, y)))
            .map(|(x, y)| self.flow(x, y) * self.cost[[x, y]])
            .inspect(|x| assert!(x.is_finite()))
            .sum::<Distance>()
    }
}

impl<'a> From<(&'a Marginal, &'a Marginal, &'a Array2<Distance>, SolverConfig)> for Sinkhorn<'a> {
    fn from(
        (p, q, cost, config): (&'a Marginal, &'a Marginal, &'a Array2<Distance>, SolverConfig),
    ) -> Self {
        let mut clamped = false;
        let kernel = cost.mapv(|c| {
            let k = -c / config.epsilon;
            if k.is_nan() {
                clamped = true;
                0.
            } else if k.abs() > Self::limit() {
                // costs of either sign can overflow at tiny epsilon
                clamped = true;
                Self::limit().copysign(k)
            } else {
                k
            }
        });
        Self {
            cost,
            p,
            q,
            kernel,
            lhs: Array1::zeros(p.n()),
            rhs: Array1::zeros(q.n()),
            epsilon: config.epsilon,
            tolerance: config.tolerance,
            clamped,
        }
    }
}

/// numerically stable log of a sum of exponentials
fn logsumexp(terms: impl Iterator<Item = Entropy>) -> Entropy {
    let terms = terms.collect::<Vec<_>>();
    let max = terms.iter().copied().fold(Entropy::NEG_INFINITY, Entropy::max);
    if !max.is_finite() {
        return max;
    }
    max + terms.iter().map(|x| (x - max).exp()).sum::<Entropy>().ln()
}
