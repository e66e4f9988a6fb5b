//! Error types shared across all Rostercall crates.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RosterError>;

/// Errors surfaced by the provider client, chat sink, and engine.
#[derive(Debug, Error)]
pub enum RosterError {
    /// Provider rejected credentials. Fatal for the tick — never retried.
    #[error("provider auth error ({status}): check app id / secret")]
    Auth { status: u16 },

    /// Provider asked for backoff and the retry ceiling was exhausted.
    #[error("provider rate limit: retries exhausted after {attempts} attempts")]
    RateLimited { attempts: u32 },

    /// Transport-level or unexpected HTTP failure talking to the provider.
    #[error("provider request failed: {0}")]
    Http(String),

    /// Provider returned a payload we could not make sense of.
    #[error("provider payload error: {0}")]
    Provider(String),

    /// Chat sink failure.
    #[error("channel error: {0}")]
    Channel(String),

    /// Configuration load/parse failure.
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RosterError {
    /// Auth failures abort the tick immediately; everything else may retry.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RosterError::Auth { .. } | RosterError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_is_fatal() {
        assert!(RosterError::Auth { status: 401 }.is_fatal());
        assert!(!RosterError::Http("timeout".into()).is_fatal());
        assert!(!RosterError::RateLimited { attempts: 3 }.is_fatal());
    }
}
