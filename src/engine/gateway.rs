use tracing::debug;

use crate::engine::error::GatewayError;
use crate::engine::llm_client::NarrationService;
use crate::engine::narrative_parser::parse_reply;
use crate::engine::prompt_builder::PromptBuilder;
use crate::model::event::Event;
use crate::model::narration::{Generated, OptionBounds};

/// Turns the current history into one service call and a validated result.
///
/// Exactly one attempt per call. Retrying belongs to the caller.
pub struct NarrationGateway<S> {
    service: S,
    bounds: OptionBounds,
}

impl<S: NarrationService> NarrationGateway<S> {
    pub fn new(service: S, bounds: OptionBounds) -> Self {
        Self { service, bounds }
    }

    pub fn bounds(&self) -> OptionBounds {
        self.bounds
    }

    pub fn request(
        &self,
        history: &[Event],
        last_user_action: &str,
        current_narration: &str,
        requested: usize,
    ) -> Result<Generated, GatewayError> {
        let prompt = PromptBuilder::build(
            history,
            last_user_action,
            current_narration,
            requested,
            self.bounds,
        );
        debug!(%prompt, "full prompt");

        let raw = self.service.complete(&prompt)?;
        debug!(%raw, "raw reply");

        parse_reply(&raw, self.bounds)
    }
}
