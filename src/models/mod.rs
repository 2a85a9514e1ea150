pub mod transform;
pub mod wire;

pub use transform::*;
pub use wire::*;
