//! Error types for the narration pipeline.
//!
//! Each tier has its own type: the gateway only ever fails recoverably,
//! strategies turn exhausted or broken attempts into fatal generation
//! errors, and the turn engine surfaces [`SessionError`] to the process.

use std::time::Duration;

use thiserror::Error;

/// The call to the narration service itself failed.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to narration service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("narration service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("narration service returned no choices")]
    EmptyResponse,

    #[error("{0}")]
    Other(String),
}

/// One failed attempt at turning history into narration and options.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no JSON object found in reply: {raw:?}")]
    NoJsonFound { raw: String },

    #[error("invalid reply JSON: {source}; raw reply: {raw}")]
    MalformedJson {
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    #[error("expected between {min} and {max} options, got {count}")]
    OptionCountOutOfRange { count: usize, min: usize, max: usize },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// A strategy could not produce an option set for this turn.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation exhausted after {attempts} attempts; last failure: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: GatewayError,
    },

    #[error("option worker {index} failed: {reason}")]
    WorkerFailed { index: usize, reason: String },

    #[error("option workers did not finish within {0:?}")]
    TimedOut(Duration),

    #[error(
        "requested {requested} options; synthetic generation is capped at {limit} workers per step"
    )]
    TooManyWorkers { requested: usize, limit: usize },

    #[error("requested {requested} options, strategy supports {min}..={max}")]
    RequestedCountOutOfRange {
        requested: usize,
        min: usize,
        max: usize,
    },
}

/// Ends the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("player cancelled the selection")]
    PresenterCancelled,

    #[error("presenter failed: {0}")]
    Presenter(#[source] std::io::Error),

    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
