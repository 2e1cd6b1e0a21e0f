pub mod event;
pub mod game_state;
pub mod narration;
pub mod player;
