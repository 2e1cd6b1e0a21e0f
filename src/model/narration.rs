use serde::{Deserialize, Serialize};

/// Reply shape the narration service is asked to produce.
/// This does NOT touch game state directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrationReply {
    pub narration: String,
    pub options: Vec<String>,
}

/// Narration plus the option set for one turn, already validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generated {
    pub narration: String,
    pub options: Vec<String>,
}

impl From<NarrationReply> for Generated {
    fn from(reply: NarrationReply) -> Self {
        Self {
            narration: reply.narration,
            options: reply.options,
        }
    }
}

/// Inclusive bounds on the number of options in one set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionBounds {
    pub min: usize,
    pub max: usize,
}

impl OptionBounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

impl Default for OptionBounds {
    fn default() -> Self {
        Self::new(2, 4)
    }
}
