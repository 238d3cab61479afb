//! Entropic Gromov-Wasserstein alignment between point-cloud modalities.
//!
//! Two finite point sets, each living in its own ambient space, are compared
//! through their *internal* geometry alone: each cloud is collapsed into a
//! pairwise distance matrix and a weight distribution, and an entropic
//! iterative solver finds the coupling that best aligns the two distance
//! structures. The resulting scalar is invariant under isometries applied
//! independently to either cloud.
//!
//! Every computation here is a pure function of its inputs. Nothing is
//! cached or shared across calls, so alignment calls may run concurrently
//! without coordination.

pub mod error;
pub mod geometry;
pub mod solver;
pub mod transport;

pub use error::Error;
pub use error::Result;

/// Distance values, costs, and divergences.
pub type Distance = f64;
/// Log-domain scaling potentials and regularization strengths.
pub type Entropy = f64;
/// Marginal weights and coupling mass.
pub type Probability = f64;

/// Default entropic regularization strength.
pub const DEFAULT_EPSILON: Entropy = 0.05;
/// Default cap on outer solver iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 200;
/// Default convergence threshold on coupling change.
pub const DEFAULT_TOLERANCE: Distance = 1e-9;

/// Random instance generation for testing and benchmarks.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

/// Initialize terminal logging on stderr.
///
/// Stderr rather than the usual mixed mode: the `distance` binary's stdout
/// carries nothing but a bare float, and warnings must not corrupt it.
pub fn log() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(log::LevelFilter::Warn);
    let _ = simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );
}
