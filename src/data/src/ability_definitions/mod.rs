pub mod capability;
pub mod definition;
pub mod instance;

pub use capability::*;
pub use definition::*;
pub use instance::*;
