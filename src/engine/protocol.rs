use serde::{Deserialize, Serialize};

use crate::engine::error::SessionError;
use crate::model::narration::Generated;

/// Where the turn engine is in its loop.
#[derive(Debug)]
pub enum TurnState {
    Initializing,
    AwaitingGeneration,
    Presenting { generated: Generated },
    Committing { narration: String, selection: String },
    Terminated(SessionError),
}

impl TurnState {
    pub fn name(&self) -> &'static str {
        match self {
            TurnState::Initializing => "initializing",
            TurnState::AwaitingGeneration => "awaiting_generation",
            TurnState::Presenting { .. } => "presenting",
            TurnState::Committing { .. } => "committing",
            TurnState::Terminated(_) => "terminated",
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, TurnState::Terminated(_))
    }
}

/// How the first scene is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum OpeningScene {
    /// Shown as-is on turn one; no generator call.
    Fixed {
        narration: String,
        options: Vec<String>,
    },
    /// Turn one comes from the configured strategy like any other turn.
    Generated,
}

impl Default for OpeningScene {
    fn default() -> Self {
        OpeningScene::Fixed {
            narration: "You wake in a forest. Cold dew clings to your clothes and the trees \
                        crowd close in every direction."
                .into(),
            options: vec![
                "Explore north".into(),
                "Search the clearing".into(),
                "Call out for help".into(),
                "Wait for nightfall".into(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnConfig {
    pub requested_options: usize,
    pub opening: OpeningScene,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            requested_options: 4,
            opening: OpeningScene::default(),
        }
    }
}

/// What a finished session leaves behind.
#[derive(Debug)]
pub struct SessionReport {
    pub turns_committed: u32,
    pub state: Option<crate::model::game_state::GameState>,
    pub error: SessionError,
}
