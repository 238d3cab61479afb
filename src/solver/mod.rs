pub mod alignment;
pub mod config;
pub mod gromov;

pub use alignment::measure;
pub use config::SolverConfig;
pub use gromov::Gromov;
