pub mod racer_state;

pub use racer_state::RacerState;
