use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::event::Event;
use crate::model::player::PlayerDetails;

/// Narration and choice history for one session.
///
/// `history` only grows. Outside of a commit it is either empty (before
/// the first turn) or ends with a Narrator event followed by a User event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventState {
    history: Vec<Event>,
    current_narration: Event,
    pending_user_step: Event,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            history: Vec::with_capacity(100),
            current_narration: Event::narrator(""),
            pending_user_step: Event::user(""),
        }
    }
}

impl EventState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[Event] {
        &self.history
    }

    pub fn current_narration(&self) -> &Event {
        &self.current_narration
    }

    pub fn pending_user_step(&self) -> &Event {
        &self.pending_user_step
    }

    pub fn append_to_history(&mut self, event: Event) {
        self.history.push(event);
    }

    /// Replaces the narration shown for the upcoming turn.
    pub fn set_current_narration(&mut self, narration: impl Into<String>) {
        self.current_narration = Event::narrator(narration);
    }

    /// Appends the narration that was shown and the player's pick as one
    /// pair; both become the current values.
    pub fn commit_turn(&mut self, narration: impl Into<String>, user_step: impl Into<String>) {
        let narration = Event::narrator(narration);
        let user_step = Event::user(user_step);

        self.history.reserve(2);
        self.history.push(narration.clone());
        self.history.push(user_step.clone());

        self.current_narration = narration;
        self.pending_user_step = user_step;
    }
}

/// Everything the turn engine owns for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub player: PlayerDetails,
    pub events: EventState,
}

impl GameState {
    pub fn new(player: PlayerDetails) -> Self {
        Self {
            player,
            events: EventState::new(),
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Game State ---")?;
        writeln!(f, "{}", self.player)?;
        writeln!(f, "History ({} entries):", self.events.history.len())?;
        for event in &self.events.history {
            writeln!(f, "  {event}")?;
        }
        writeln!(f, "Current narration: {}", self.events.current_narration.description)?;
        write!(f, "Last step: {}", self.events.pending_user_step.description)
    }
}
