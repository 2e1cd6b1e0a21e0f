use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::protocol::{OpeningScene, TurnConfig};
use crate::engine::service_backed::{RetryConfig, DEFAULT_MAX_ATTEMPTS};
use crate::engine::synthetic::MAX_SYNTHETIC_OPTIONS;
use crate::model::narration::OptionBounds;
use crate::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Narration service over HTTP.
    Service,
    /// Local worker pool, no network.
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub backend: Backend,

    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub request_timeout_secs: u64,

    pub max_attempts: u32,
    pub retry_backoff_ms: u64,

    pub requested_options: usize,
    pub min_options: usize,
    pub max_options: usize,

    pub synthetic_min_delay_ms: u64,
    pub synthetic_max_delay_ms: u64,
    pub synthetic_deadline_secs: u64,

    pub opening: OpeningScene,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            backend: Backend::Service,

            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            temperature: 0.7,
            request_timeout_secs: 120,

            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_backoff_ms: 0,

            requested_options: 4,
            min_options: 2,
            max_options: 4,

            synthetic_min_delay_ms: 1_000,
            synthetic_max_delay_ms: 5_000,
            synthetic_deadline_secs: 30,

            opening: OpeningScene::default(),
        }
    }
}

impl GameSettings {
    pub fn option_bounds(&self) -> OptionBounds {
        OptionBounds::new(self.min_options, self.max_options)
    }

    pub fn retry(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_attempts,
            backoff: Duration::from_millis(self.retry_backoff_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn synthetic_delay(&self) -> std::ops::Range<Duration> {
        Duration::from_millis(self.synthetic_min_delay_ms)
            ..Duration::from_millis(self.synthetic_max_delay_ms)
    }

    pub fn synthetic_deadline(&self) -> Duration {
        Duration::from_secs(self.synthetic_deadline_secs)
    }

    pub fn turn_config(&self) -> TurnConfig {
        TurnConfig {
            requested_options: self.requested_options,
            opening: self.opening.clone(),
        }
    }

    /// Checks the values that would otherwise surface mid-session.
    pub fn validate(&self) -> Result<(), SessionError> {
        let invalid = |msg: String| Err(SessionError::InvalidConfig(msg));

        if self.min_options == 0 {
            return invalid("min_options must be at least 1".into());
        }
        if self.min_options > self.max_options {
            return invalid(format!(
                "min_options ({}) exceeds max_options ({})",
                self.min_options, self.max_options
            ));
        }
        if self.max_attempts == 0 {
            return invalid("max_attempts must be at least 1".into());
        }

        match self.backend {
            Backend::Service => {
                if !self.option_bounds().contains(self.requested_options) {
                    return invalid(format!(
                        "requested_options ({}) must be within {}..={}",
                        self.requested_options, self.min_options, self.max_options
                    ));
                }
                if self.base_url.trim().is_empty() {
                    return invalid("base_url is empty".into());
                }
            }
            Backend::Synthetic => {
                if self.requested_options == 0 {
                    return invalid("requested_options must be at least 1".into());
                }
                if self.requested_options > MAX_SYNTHETIC_OPTIONS {
                    return invalid(format!(
                        "requested_options ({}) exceeds the synthetic backend's limit of \
                         {MAX_SYNTHETIC_OPTIONS} workers per step",
                        self.requested_options
                    ));
                }
                if self.synthetic_min_delay_ms > self.synthetic_max_delay_ms {
                    return invalid("synthetic delay range is empty".into());
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = GameSettings::default();
        settings.validate().unwrap();
        assert_eq!(settings.max_attempts, 5);
        assert_eq!(settings.requested_options, 4);
        assert_eq!(settings.option_bounds(), OptionBounds::new(2, 4));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let settings: GameSettings =
            serde_json::from_str(r#"{"backend":"synthetic","requested_options":6}"#).unwrap();

        assert_eq!(settings.backend, Backend::Synthetic);
        assert_eq!(settings.requested_options, 6);
        assert_eq!(settings.model, "gpt-4o-mini");
        settings.validate().unwrap();
    }

    #[test]
    fn service_backend_rejects_counts_outside_bounds() {
        let settings = GameSettings {
            requested_options: 5,
            ..GameSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SessionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn synthetic_backend_reports_worker_limit() {
        let settings = GameSettings {
            backend: Backend::Synthetic,
            requested_options: MAX_SYNTHETIC_OPTIONS + 1,
            ..GameSettings::default()
        };
        match settings.validate() {
            Err(SessionError::InvalidConfig(msg)) => {
                assert!(msg.contains("limit of 64 workers per step"), "{msg}")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let settings = GameSettings {
            min_options: 4,
            max_options: 2,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn opening_scene_round_trips_through_json() {
        let json = r#"{"opening":{"mode":"generated"}}"#;
        let settings: GameSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.opening, OpeningScene::Generated);

        let json = r#"{"opening":{"mode":"fixed","narration":"Dawn.","options":["Rise","Sleep"]}}"#;
        let settings: GameSettings = serde_json::from_str(json).unwrap();
        assert_eq!(
            settings.opening,
            OpeningScene::Fixed {
                narration: "Dawn.".into(),
                options: vec!["Rise".into(), "Sleep".into()],
            }
        );
    }
}
