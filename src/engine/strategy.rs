use crate::engine::error::GenerationError;
use crate::model::game_state::EventState;
use crate::model::narration::{Generated, OptionBounds};

/// Produces the narration and option set for the next turn.
///
/// Implementations read the state they need and hand back new values;
/// the turn engine decides what gets written.
pub trait OptionStrategy {
    fn name(&self) -> &'static str;

    /// Option counts this strategy can honor.
    fn bounds(&self) -> OptionBounds;

    fn generate(&self, state: &EventState, requested: usize)
        -> Result<Generated, GenerationError>;
}

pub(crate) fn check_requested(
    bounds: OptionBounds,
    requested: usize,
) -> Result<(), GenerationError> {
    if bounds.contains(requested) {
        Ok(())
    } else {
        Err(GenerationError::RequestedCountOutOfRange {
            requested,
            min: bounds.min,
            max: bounds.max,
        })
    }
}
