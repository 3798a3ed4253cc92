use crate::error::Result;
use crate::session::Session;
use clap::Parser;

/// Estimate how long your game backlog will take to beat.
#[derive(Parser, Debug, Default)]
#[command(name = "backlog", version, about)]
pub struct Args {
    /// Verbose logging to stderr (RUST_LOG overrides)
    #[arg(long)]
    pub debug: bool,

    /// Steam Web API key; prompted for on first library command if absent
    #[arg(long, env = "STEAM_API_KEY", hide_env_values = true)]
    pub steam_key: Option<String>,

    /// 64-bit Steam ID of the library owner
    #[arg(long, env = "STEAM_ID")]
    pub steam_id: Option<String>,
}

impl Args {
    /// A session when both credentials were supplied up front.
    pub fn session(&self) -> Result<Option<Session>> {
        match (&self.steam_key, &self.steam_id) {
            (Some(key), Some(id)) => Session::new(key, id).map(Some),
            _ => Ok(None),
        }
    }
}
