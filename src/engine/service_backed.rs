use std::thread;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::engine::error::{GatewayError, GenerationError};
use crate::engine::gateway::NarrationGateway;
use crate::engine::llm_client::NarrationService;
use crate::engine::strategy::{check_requested, OptionStrategy};
use crate::model::game_state::EventState;
use crate::model::narration::{Generated, OptionBounds};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Configuration for the retry loop around the gateway.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Pause between attempts. Zero means retry immediately.
    pub backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: Duration::ZERO,
        }
    }
}

/// Asks the narration service for the next turn, retrying failed attempts
/// up to a fixed budget.
pub struct ServiceBackedGenerator<S> {
    gateway: NarrationGateway<S>,
    retry: RetryConfig,
}

impl<S: NarrationService> ServiceBackedGenerator<S> {
    pub fn new(gateway: NarrationGateway<S>, retry: RetryConfig) -> Self {
        Self { gateway, retry }
    }

    fn attempt(&self, state: &EventState, requested: usize) -> Result<Generated, GatewayError> {
        self.gateway.request(
            state.history(),
            &state.pending_user_step().description,
            &state.current_narration().description,
            requested,
        )
    }
}

impl<S: NarrationService> OptionStrategy for ServiceBackedGenerator<S> {
    fn name(&self) -> &'static str {
        "service"
    }

    fn bounds(&self) -> OptionBounds {
        self.gateway.bounds()
    }

    fn generate(
        &self,
        state: &EventState,
        requested: usize,
    ) -> Result<Generated, GenerationError> {
        check_requested(self.bounds(), requested)?;

        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.attempt(state, requested) {
                Ok(generated) => {
                    if attempt > 1 {
                        info!(attempt, "narration request succeeded after retry");
                    }
                    return Ok(generated);
                }
                Err(e) if attempt < max_attempts => {
                    warn!(attempt, max_attempts, error = %e, "narration attempt failed, retrying");
                    if !self.retry.backoff.is_zero() {
                        thread::sleep(self.retry.backoff);
                    }
                    attempt += 1;
                }
                Err(e) => {
                    error!(attempts = attempt, error = %e, "narration retries exhausted");
                    return Err(GenerationError::Exhausted {
                        attempts: attempt,
                        last: e,
                    });
                }
            }
        }
    }
}
