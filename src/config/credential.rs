//! API key lookup for the narration service.

use crate::config::settings::Backend;
use crate::SessionError;

/// Environment variable holding the narration service key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Reads the service key through `lookup`. Unset and whitespace-only values
/// are both [`SessionError::MissingCredential`].
pub fn credential(lookup: impl Fn(&str) -> Option<String>) -> Result<String, SessionError> {
    lookup(API_KEY_VAR)
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or(SessionError::MissingCredential(API_KEY_VAR))
}

/// The key `backend` needs, if any. The synthetic backend never looks one up.
pub fn credential_for(
    backend: Backend,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Option<String>, SessionError> {
    match backend {
        Backend::Service => credential(lookup).map(Some),
        Backend::Synthetic => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn env(value: Option<&'static str>) -> impl Fn(&str) -> Option<String> {
        move |name| {
            assert_eq!(name, API_KEY_VAR);
            value.map(str::to_string)
        }
    }

    #[test]
    fn unset_key_is_missing() {
        assert!(matches!(
            credential(env(None)),
            Err(SessionError::MissingCredential("OPENAI_API_KEY"))
        ));
    }

    #[test]
    fn blank_key_is_missing() {
        for blank in ["", "   ", "\t\n"] {
            let result = credential(move |_| Some(blank.to_string()));
            assert!(matches!(result, Err(SessionError::MissingCredential(_))));
        }
    }

    #[test]
    fn key_is_trimmed() {
        assert_eq!(credential(env(Some(" sk-test \n"))).unwrap(), "sk-test");
    }

    #[test]
    fn service_backend_requires_key() {
        assert!(matches!(
            credential_for(Backend::Service, env(None)),
            Err(SessionError::MissingCredential(_))
        ));
        assert_eq!(
            credential_for(Backend::Service, env(Some("sk-test"))).unwrap(),
            Some("sk-test".to_string())
        );
    }

    #[test]
    fn synthetic_backend_never_reads_key() {
        let reads = Cell::new(0);
        let result = credential_for(Backend::Synthetic, |_| {
            reads.set(reads.get() + 1);
            None
        });

        assert!(matches!(result, Ok(None)));
        assert_eq!(reads.get(), 0);
    }
}
