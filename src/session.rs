use crate::error::{Error, Result};
use std::fmt;

/// Steam credentials for one run of the tool.
///
/// Created once (from flags or on the first library command) and handed
/// to whatever needs it. Never refreshed; restart the process to change it.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    api_key: String,
    steam_id: String,
}

impl Session {
    pub fn new(api_key: &str, steam_id: &str) -> Result<Self> {
        let api_key = api_key.trim();
        let steam_id = steam_id.trim();

        if api_key.is_empty() {
            return Err(Error::InvalidInput("Steam API key must not be empty".into()));
        }
        if steam_id.is_empty() || !steam_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidInput(format!(
                "Steam ID must be a 64-bit numeric id, got '{}'",
                steam_id
            )));
        }

        Ok(Session {
            api_key: api_key.to_string(),
            steam_id: steam_id.to_string(),
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn steam_id(&self) -> &str {
        &self.steam_id
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("api_key", &"<redacted>")
            .field("steam_id", &self.steam_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_keeps_credentials() {
        let session = Session::new("  KEY123 ", " 76561197960287930\n").unwrap();
        assert_eq!(session.api_key(), "KEY123");
        assert_eq!(session.steam_id(), "76561197960287930");
    }

    #[test]
    fn rejects_bad_credentials() {
        assert!(Session::new("", "76561197960287930").is_err());
        assert!(Session::new("KEY", "gaben").is_err());
        assert!(Session::new("KEY", "").is_err());
    }

    #[test]
    fn debug_output_hides_the_key() {
        let session = Session::new("SECRET", "1").unwrap();
        let shown = format!("{:?}", session);
        assert!(!shown.contains("SECRET"));
        assert!(shown.contains("<redacted>"));
    }
}
