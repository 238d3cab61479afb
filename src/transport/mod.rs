pub mod coupling;
pub mod density;
pub mod sinkhorn;

pub use coupling::Coupling;
pub use density::Density;
pub use sinkhorn::Sinkhorn;
