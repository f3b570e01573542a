pub mod kind;
pub mod phase;
pub mod scheduled;
pub mod timing;

pub use kind::*;
pub use phase::Phase;
pub use scheduled::ScheduledEvent;
pub use timing::{EventTriggerMode, TimingMode};
