use super::config::SolverConfig;
use crate::geometry::marginal::Marginal;
use crate::geometry::metric::Metric;
use crate::transport::coupling::Coupling;
use crate::transport::density::Density;
use crate::transport::sinkhorn::Sinkhorn;
use crate::Distance;
use crate::Entropy;
use crate::Probability;
use ndarray::Array2;
use ndarray::Axis;

/// entropic Gromov-Wasserstein solver over two intra-modality metrics.
///
/// projected mirror descent: each outer iteration linearizes the quartic
/// objective at the current plan into an n×m gradient matrix, then solves
/// the entropic transport sub-problem with that gradient as its cost.
///
/// the objective is non-convex and a single greedy descent stalls on
/// stationary blends of couplings, so the search is layered: the
/// regularization anneals from the gradient's own spread down to the
/// configured epsilon, the descent runs once from the canonical
/// independence plan and once from a deterministically tilted copy that
/// breaks exchange symmetries, and each run finishes by extracting
/// near-sharp vertex plans from its final linearization for as long as
/// the divergence improves. the lowest-divergence plan found wins.
pub struct Gromov<'a> {
    x: &'a Metric,
    y: &'a Metric,
    p: &'a Marginal,
    q: &'a Marginal,
    config: SolverConfig,
    plan: Array2<Probability>,
}

impl Gromov<'_> {
    /// relative mass tilt of the symmetry-breaking seed
    const fn tilt() -> Probability {
        1e-3
    }
    /// annealing factor applied to the regularization each outer iteration
    const fn decay() -> Entropy {
        0.5
    }
    /// entropic width of a vertex extraction, relative to gradient spread
    const fn resolution() -> Entropy {
        1e-9
    }
    /// cap on vertex-refinement steps after a descent
    const fn polishes() -> usize {
        16
    }
    /// tolerated marginal drift before a vertex candidate is discarded
    const fn slack() -> Probability {
        1e-6
    }

    /// run one descent per seed and keep the lowest-divergence plan
    fn evolve(mut self) -> Self {
        if self.degenerate() {
            return self;
        }
        let seeds = [Self::independence(self.p, self.q), self.tilted()];
        let mut best: Option<(Distance, Array2<Probability>)> = None;
        for seed in seeds {
            let (divergence, plan) = self.polish(self.descend(seed));
            if best.as_ref().is_none_or(|(d, _)| divergence < *d) {
                best = Some((divergence, plan));
            }
        }
        if let Some((_, plan)) = best {
            self.plan = plan;
        }
        self
    }
    /// iterate sub-problems from a seed plan until the plan moves less
    /// than tolerance in total variation, or the budget runs out. the
    /// sub-problem regularization starts at the seed gradient's spread
    /// and halves each iteration until it reaches the configured epsilon,
    /// so early iterations stay too blurred to commit to a bad matching.
    fn descend(&self, mut plan: Array2<Probability>) -> Array2<Probability> {
        let mut epsilon = Self::spread(&self.gradient(&plan)).max(self.config.epsilon);
        for _ in 0..self.config.max_iterations {
            let ref gradient = self.gradient(&plan);
            let config = SolverConfig { epsilon, ..self.config };
            let next = Sinkhorn::from((self.p, self.q, gradient, config))
                .minimize()
                .plan();
            let delta = (&next - &plan).mapv(Distance::abs).sum();
            plan = next;
            if epsilon <= self.config.epsilon && delta < self.config.tolerance {
                return plan;
            }
            epsilon = (epsilon * Self::decay()).max(self.config.epsilon);
        }
        log::debug!(
            "iteration budget {} exhausted, continuing with the current plan",
            self.config.max_iterations
        );
        plan
    }
    /// re-linearize at the current best plan and jump to the near-sharp
    /// optimum of that linearization, keeping each jump only while the
    /// divergence strictly improves. this peels a converged-but-blurred
    /// plan down to the coupling it was tracking, so identical geometries
    /// reach zero instead of the residual entropic blur.
    fn polish(&self, plan: Array2<Probability>) -> (Distance, Array2<Probability>) {
        let mut best = (self.divergence(&plan), plan);
        for _ in 0..Self::polishes() {
            let ref gradient = self.gradient(&best.1);
            let Some(vertex) = self.vertex(gradient) else {
                break;
            };
            let divergence = self.divergence(&vertex);
            if divergence + self.config.tolerance < best.0 {
                best = (divergence, vertex);
            } else {
                break;
            }
        }
        best
    }
    /// near-sharp solution of the transport sub-problem for a gradient,
    /// or None when the gradient carries no signal or the sharp solve
    /// drifted off its marginals. the cost is centered before scaling so
    /// a large common offset cannot swamp the kernel.
    fn vertex(&self, gradient: &Array2<Distance>) -> Option<Array2<Probability>> {
        let spread = Self::spread(gradient);
        if !spread.is_finite() || spread <= 0. {
            return None;
        }
        let floor = gradient.iter().copied().fold(Distance::INFINITY, Distance::min);
        let ref centered = gradient.mapv(|g| g - floor);
        let config = SolverConfig {
            epsilon: spread * Self::resolution(),
            ..self.config
        };
        let plan = Sinkhorn::from((self.p, self.q, centered, config))
            .minimize()
            .plan();
        self.feasible(&plan).then_some(plan)
    }
    /// row and column sums of a candidate plan must match the marginals
    fn feasible(&self, plan: &Array2<Probability>) -> bool {
        let rows = plan.sum_axis(Axis(1));
        let cols = plan.sum_axis(Axis(0));
        let drift = self
            .p
            .support()
            .map(|i| (rows[i] - self.p.density(i)).abs())
            .chain(self.q.support().map(|j| (cols[j] - self.q.density(j)).abs()))
            .sum::<Probability>();
        drift < Self::slack()
    }
    /// difference between the largest and smallest gradient entries
    fn spread(gradient: &Array2<Distance>) -> Distance {
        let min = gradient.iter().copied().fold(Distance::INFINITY, Distance::min);
        let max = gradient.iter().copied().fold(Distance::NEG_INFINITY, Distance::max);
        max - min
    }
    /// a single point on either side admits exactly one feasible plan,
    /// and log-domain scaling has nothing to do with a point mass.
    fn degenerate(&self) -> bool {
        self.p.n() == 1 || self.q.n() == 1
    }
    /// squared-loss gradient at a plan, via the matrix-algebra identity
    /// grad = f1 ⊗ 1 + 1 ⊗ f2 - 2 Cx P Cy with f1 = (Cx ∘ Cx) a,
    /// f2 = (Cy ∘ Cy) b, where a and b are the plan's own marginals.
    fn gradient(&self, plan: &Array2<Probability>) -> Array2<Distance> {
        let a = plan.sum_axis(Axis(1));
        let b = plan.sum_axis(Axis(0));
        let f1 = self.x.moment(&a);
        let f2 = self.y.moment(&b);
        let cross = self.x.matrix().dot(plan).dot(self.y.matrix());
        Array2::from_shape_fn(plan.dim(), |(i, j)| f1[i] + f2[j] - 2. * cross[[i, j]])
    }
    /// independence coupling of the two marginals
    fn independence(p: &Marginal, q: &Marginal) -> Array2<Probability> {
        Array2::from_shape_fn((p.n(), q.n()), |(i, j)| p.density(i) * q.density(j))
    }
    /// independence coupling with a generic separable mass tilt. exactly
    /// symmetric inputs make the first gradient constant along their
    /// symmetry orbits, where descent from plain independence cannot pick
    /// a matching; the ramp distinguishes every index pair while staying
    /// far below any real geometric signal.
    fn tilted(&self) -> Array2<Probability> {
        let (n, m) = (self.p.n(), self.q.n());
        Array2::from_shape_fn((n, m), |(i, j)| {
            let ramp = (1. + i as Probability) / n as Probability
                * ((1. + j as Probability) / m as Probability);
            self.p.density(i) * self.q.density(j) * (1. + Self::tilt() * ramp)
        })
    }
    /// expected squared-loss discrepancy of a plan, clamped at zero
    /// against least-significant-bit noise from the entropic blur
    fn divergence(&self, plan: &Array2<Probability>) -> Distance {
        (&self.gradient(plan) * plan).sum().max(0.)
    }
}

impl Coupling for Gromov<'_> {
    fn minimize(self) -> Self {
        self.evolve()
    }
    fn flow(&self, x: usize, y: usize) -> Probability {
        self.plan[[x, y]]
    }
    fn cost(&self) -> Distance {
        self.divergence(&self.plan)
    }
}

impl<'a> From<(&'a Metric, &'a Metric, &'a Marginal, &'a Marginal, SolverConfig)> for Gromov<'a> {
    fn from(
        (x, y, p, q, config): (&'a Metric, &'a Metric, &'a Marginal, &'a Marginal, SolverConfig),
    ) -> Self {
        let plan = Self::independence(p, q);
        Self {
            x,
            y,
            p,
            q,
            config,
            plan,
        }
    }
}
