pub mod primitives;

pub use primitives::*;
