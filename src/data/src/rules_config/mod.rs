pub mod game_config;
pub mod rules;

pub use game_config::GameConfig;
pub use rules::Rules;
