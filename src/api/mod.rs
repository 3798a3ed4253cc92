// API module: blocking HTTP clients for the two remote services and the
// collaborator traits the aggregation pipeline is written against.
//
// - `hltb`: HowLongToBeat search and game pages (completion times).
// - `steam`: Steam Web API owned-games list and store app details.
//
// The traits keep the pipeline testable without a network: tests hand in
// fakes or mockall mocks instead of the real clients.

pub mod hltb;
pub mod steam;

pub use hltb::HltbClient;
pub use steam::SteamClient;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{CatalogEntry, Classification, SearchOutcome};
use crate::session::Session;
use reqwest::blocking::{Client, Response};

/// Source of the user's owned apps.
#[cfg_attr(test, mockall::automock)]
pub trait LibrarySource {
    fn list_entries(&self, session: &Session) -> Result<Vec<CatalogEntry>>;
}

/// Maps a catalog app id to a display name, or says why it can't.
#[cfg_attr(test, mockall::automock)]
pub trait CatalogResolver {
    fn lookup_name(&self, app_id: u64) -> Result<Classification>;
}

/// Fuzzy title search returning the single best match.
#[cfg_attr(test, mockall::automock)]
pub trait CompletionTimeSource {
    fn search(&self, term: &str) -> Result<SearchOutcome>;
}

/// Shared blocking client with the configured timeout and user agent.
fn build_client(config: &Config) -> Result<Client> {
    let client = Client::builder()
        .timeout(config.request_timeout)
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}

/// Turn a non-success status into a transport error carrying the status
/// code and reason so the user can decide whether to retry.
fn ensure_success(service: &'static str, res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
    tracing::warn!(service, status = status.as_u16(), %reason, "request failed");
    Err(Error::Transport {
        service,
        status: status.as_u16(),
        reason,
    })
}
