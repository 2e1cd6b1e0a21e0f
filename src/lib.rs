//! Turn-based interactive narrative: the player builds a persona, then picks
//! from generated options each turn while the engine keeps the narration
//! history consistent.

pub mod config;
pub mod engine;
pub mod model;
pub mod ui;

pub use engine::engine::TurnEngine;
pub use engine::error::{GatewayError, GenerationError, SessionError, TransportError};
pub use engine::protocol::{OpeningScene, SessionReport, TurnConfig, TurnState};
pub use engine::strategy::OptionStrategy;
