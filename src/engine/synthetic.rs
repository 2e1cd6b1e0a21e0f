//! Option generation without a narration service.
//!
//! Spawns one worker per requested option. Every worker pushes its label
//! into a shared list behind a mutex and reports back over a channel; the
//! caller waits for all of them (or for the deadline, or the first failure).

use std::ops::Range;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;
use thiserror::Error;
use tracing::{debug, warn};

use crate::engine::error::GenerationError;
use crate::engine::strategy::{check_requested, OptionStrategy};
use crate::model::game_state::EventState;
use crate::model::narration::{Generated, OptionBounds};

/// Upper bound on workers spawned for a single step. Requests above it fail
/// with [`GenerationError::TooManyWorkers`] instead of spawning threads.
pub const MAX_SYNTHETIC_OPTIONS: usize = 64;

const IDLE_NARRATION: &str = "The story holds its breath.";

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct WorkerError(pub String);

/// Computes one candidate option for the worker at `index`.
pub type WorkerAction = Arc<dyn Fn(usize) -> Result<String, WorkerError> + Send + Sync>;

/// Receives progress while the caller is blocked on the workers.
pub trait WaitingIndicator: Send + Sync {
    fn tick(&self, completed: usize, total: usize);
    fn finish(&self);
}

pub struct SyntheticGenerator {
    action: WorkerAction,
    deadline: Option<Duration>,
    indicator: Option<Arc<dyn WaitingIndicator>>,
}

impl SyntheticGenerator {
    /// Workers sleep a random duration from `delay` and label their option
    /// with the time they took.
    pub fn new(delay: Range<Duration>) -> Self {
        Self::with_action(sleeping_action(delay))
    }

    pub fn with_action(action: WorkerAction) -> Self {
        Self {
            action,
            deadline: None,
            indicator: None,
        }
    }

    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn indicator(mut self, indicator: Arc<dyn WaitingIndicator>) -> Self {
        self.indicator = Some(indicator);
        self
    }

    fn run_workers(&self, requested: usize) -> Result<Vec<String>, GenerationError> {
        let collected = Arc::new(Mutex::new(Vec::with_capacity(requested)));
        let (tx, rx) = mpsc::channel::<(usize, Result<(), WorkerError>)>();

        for index in 0..requested {
            let tx = tx.clone();
            let collected = Arc::clone(&collected);
            let action = Arc::clone(&self.action);

            thread::Builder::new()
                .name(format!("option-worker-{index}"))
                .spawn(move || {
                    let outcome = action(index).and_then(|label| {
                        collected
                            .lock()
                            .map(|mut options| options.push(label))
                            .map_err(|_| WorkerError("option list poisoned".into()))
                    });
                    let _ = tx.send((index, outcome));
                })
                .map_err(|e| GenerationError::WorkerFailed {
                    index,
                    reason: e.to_string(),
                })?;
        }
        drop(tx);

        let started = Instant::now();
        let mut completed = 0;

        while completed < requested {
            let message = match self.deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_sub(started.elapsed());
                    match rx.recv_timeout(remaining) {
                        Ok(message) => message,
                        Err(RecvTimeoutError::Timeout) => {
                            warn!(completed, requested, "option workers timed out");
                            return Err(GenerationError::TimedOut(deadline));
                        }
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match rx.recv() {
                    Ok(message) => message,
                    Err(_) => break,
                },
            };

            match message {
                (_, Ok(())) => {
                    completed += 1;
                    if let Some(indicator) = &self.indicator {
                        indicator.tick(completed, requested);
                    }
                }
                (index, Err(e)) => {
                    warn!(index, error = %e, "option worker failed");
                    return Err(GenerationError::WorkerFailed {
                        index,
                        reason: e.0,
                    });
                }
            }
        }

        if completed < requested {
            return Err(GenerationError::WorkerFailed {
                index: completed,
                reason: "worker exited without reporting".into(),
            });
        }

        let options = collected
            .lock()
            .map(|mut options| std::mem::take(&mut *options))
            .map_err(|_| GenerationError::WorkerFailed {
                index: 0,
                reason: "option list poisoned".into(),
            })?;

        debug!(
            count = options.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "option workers done"
        );
        Ok(options)
    }
}

impl OptionStrategy for SyntheticGenerator {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn bounds(&self) -> OptionBounds {
        OptionBounds::new(1, MAX_SYNTHETIC_OPTIONS)
    }

    fn generate(
        &self,
        state: &EventState,
        requested: usize,
    ) -> Result<Generated, GenerationError> {
        if requested > MAX_SYNTHETIC_OPTIONS {
            return Err(GenerationError::TooManyWorkers {
                requested,
                limit: MAX_SYNTHETIC_OPTIONS,
            });
        }
        check_requested(self.bounds(), requested)?;

        let result = self.run_workers(requested);
        if let Some(indicator) = &self.indicator {
            indicator.finish();
        }
        let options = result?;

        let narration = match state.current_narration().description.as_str() {
            "" => IDLE_NARRATION.to_string(),
            current => current.to_string(),
        };

        Ok(Generated { narration, options })
    }
}

fn sleeping_action(delay: Range<Duration>) -> WorkerAction {
    Arc::new(move |index| {
        let started = Instant::now();
        let pause = if delay.start < delay.end {
            rand::thread_rng().gen_range(delay.clone())
        } else {
            delay.start
        };
        thread::sleep(pause);
        Ok(format!(
            "Path {} (revealed after {:.2}s)",
            index + 1,
            started.elapsed().as_secs_f64()
        ))
    })
}
