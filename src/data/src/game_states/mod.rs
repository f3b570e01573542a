pub mod game_state;
pub mod roll_state;

pub use game_state::GameState;
pub use roll_state::RollState;
