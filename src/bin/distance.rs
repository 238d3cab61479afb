//! Alignment Distance Binary
//!
//! Reads a JSON object from stdin with required keys `X`, `Y` (arrays of
//! point coordinate arrays) and optional `epsilon`, `maxIter`, `tol`.
//! Writes the Gromov-Wasserstein distance to stdout with no trailing
//! newline. Any failure collapses to the literal token `nan` on stdout
//! and a non-zero exit status; diagnostics go to stderr only.

use gromov::geometry::Cloud;
use gromov::solver::measure;
use gromov::solver::SolverConfig;
use gromov::Distance;

#[derive(serde::Deserialize)]
struct Payload {
    #[serde(rename = "X")]
    x: Vec<Vec<Distance>>,
    #[serde(rename = "Y")]
    y: Vec<Vec<Distance>>,
    epsilon: Option<Distance>,
    #[serde(rename = "maxIter")]
    max_iter: Option<usize>,
    tol: Option<Distance>,
}

impl Payload {
    fn config(&self) -> SolverConfig {
        let mut config = SolverConfig::default();
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if let Some(max_iter) = self.max_iter {
            config.max_iterations = max_iter;
        }
        if let Some(tol) = self.tol {
            config.tolerance = tol;
        }
        config
    }
}

fn run(input: impl std::io::Read) -> anyhow::Result<Distance> {
    let payload: Payload = serde_json::from_reader(input)?;
    let config = payload.config();
    let ref x = Cloud::try_from(payload.x)?;
    let ref y = Cloud::try_from(payload.y)?;
    Ok(measure(x, y, Some(config))?)
}

fn main() {
    gromov::log();
    match run(std::io::stdin().lock()) {
        Ok(distance) => print!("{}", distance),
        Err(error) => {
            log::error!("{}", error);
            print!("nan");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_distance_for_well_formed_payload() {
        let input = br#"{"X": [[0, 0], [1, 0]], "Y": [[0, 0], [1, 0]]}"#;
        let distance = run(&input[..]).unwrap();
        assert!(distance < 1e-3, "{}", distance);
    }

    #[test]
    fn honors_optional_config_fields() {
        let input = br#"{"X": [[0], [1]], "Y": [[0], [2]], "epsilon": 0.1, "maxIter": 50, "tol": 1e-6}"#;
        let distance = run(&input[..]).unwrap();
        assert!(distance > 0.);
    }

    #[test]
    fn fails_on_malformed_json() {
        let input = br#"{"X": [[0, 0],"#;
        assert!(run(&input[..]).is_err());
    }

    #[test]
    fn fails_on_missing_required_keys() {
        let input = br#"{"X": [[0, 0], [1, 0]]}"#;
        assert!(run(&input[..]).is_err());
    }

    #[test]
    fn fails_on_ragged_cloud() {
        let input = br#"{"X": [[0, 0], [1]], "Y": [[0], [1]]}"#;
        assert!(run(&input[..]).is_err());
    }

    #[test]
    fn fails_on_non_positive_epsilon() {
        let input = br#"{"X": [[0], [1]], "Y": [[0], [1]], "epsilon": 0}"#;
        assert!(run(&input[..]).is_err());
    }
}
