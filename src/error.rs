use thiserror::Error;

/// Errors raised by the backlog library.
///
/// Per-entry misses (no search match, a withdrawn app, a non-game app) are
/// not errors: they are outcome variants in `models`. Everything here is
/// fatal to the operation that produced it.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{service} request failed: {status} {reason}")]
    Transport {
        service: &'static str,
        status: u16,
        reason: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected {service} response: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True when the failure happened talking to a remote service, which
    /// the user can retry by hand.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::Network(_))
    }

    pub(crate) fn decode(service: &'static str, message: impl Into<String>) -> Self {
        Error::Decode {
            service,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_message_carries_status_and_reason() {
        let err = Error::Transport {
            service: "HowLongToBeat",
            status: 403,
            reason: "Forbidden".into(),
        };
        assert!(err.is_transport());
        assert_eq!(
            err.to_string(),
            "HowLongToBeat request failed: 403 Forbidden"
        );
    }

    #[test]
    fn invalid_input_is_not_transport() {
        let err = Error::InvalidInput("id must be numeric".into());
        assert!(!err.is_transport());
        assert!(!Error::decode("Steam", "missing field").is_transport());
    }
}
