pub mod cloud;
pub mod marginal;
pub mod metric;

pub use cloud::Cloud;
pub use marginal::Marginal;
pub use metric::Metric;
