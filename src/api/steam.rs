use super::{build_client, ensure_success, CatalogResolver, LibrarySource};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{CatalogEntry, Classification};
use crate::session::Session;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::HashMap;

const SERVICE: &str = "Steam";

/// Client for the Steam Web API (owned games) and the store front
/// (app details). Only the owned-games call needs credentials.
#[derive(Clone)]
pub struct SteamClient {
    client: Client,
    api_url: String,
    store_url: String,
}

#[derive(Deserialize, Debug)]
struct OwnedGamesResponse {
    response: OwnedGames,
}

/// Private profiles come back as an empty object.
#[derive(Deserialize, Debug, Default)]
struct OwnedGames {
    #[serde(default)]
    games: Vec<OwnedGame>,
}

#[derive(Deserialize, Debug)]
struct OwnedGame {
    appid: u64,
    #[serde(default)]
    playtime_forever: u64,
    playtime_2weeks: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct AppDetailsEnvelope {
    success: bool,
    data: Option<AppDetails>,
}

#[derive(Deserialize, Debug)]
struct AppDetails {
    #[serde(rename = "type")]
    kind: String,
    name: String,
}

impl SteamClient {
    /// Build a client using the configured URLs, timeout and user agent.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(SteamClient {
            client: build_client(config)?,
            api_url: config.steam_api_url.clone(),
            store_url: config.steam_store_url.clone(),
        })
    }
}

impl LibrarySource for SteamClient {
    fn list_entries(&self, session: &Session) -> Result<Vec<CatalogEntry>> {
        let url = format!("{}IPlayerService/GetOwnedGames/v0001/", self.api_url);
        tracing::debug!(steam_id = session.steam_id(), "listing owned games");
        let res = self
            .client
            .get(&url)
            .query(&[
                ("key", session.api_key()),
                ("steamid", session.steam_id()),
                ("format", "json"),
                ("include_played_free_games", "1"),
            ])
            .send()?;
        let body = ensure_success(SERVICE, res)?.text()?;
        parse_owned_games(&body)
    }
}

impl CatalogResolver for SteamClient {
    fn lookup_name(&self, app_id: u64) -> Result<Classification> {
        let url = format!("{}api/appdetails", self.store_url);
        let res = self
            .client
            .get(&url)
            .query(&[("appids", app_id.to_string())])
            .send()?;
        let body = ensure_success(SERVICE, res)?.text()?;
        parse_app_details(app_id, &body)
    }
}

/// Library entries from a GetOwnedGames body, in the order Steam lists them.
pub fn parse_owned_games(body: &str) -> Result<Vec<CatalogEntry>> {
    let parsed: OwnedGamesResponse =
        serde_json::from_str(body).map_err(|e| Error::decode(SERVICE, e.to_string()))?;

    Ok(parsed
        .response
        .games
        .into_iter()
        .map(|game| CatalogEntry {
            app_id: game.appid,
            playtime_minutes: game.playtime_forever,
            recent_playtime_minutes: game.playtime_2weeks,
        })
        .collect())
}

/// Classify an app from the store's app-details payload. The store answers
/// `null` or leaves the id out entirely for apps it no longer lists.
pub fn parse_app_details(app_id: u64, body: &str) -> Result<Classification> {
    let parsed: Option<HashMap<String, AppDetailsEnvelope>> =
        serde_json::from_str(body).map_err(|e| Error::decode(SERVICE, e.to_string()))?;

    let envelope = parsed.and_then(|mut map| map.remove(&app_id.to_string()));
    let classification = match envelope {
        Some(AppDetailsEnvelope {
            success: true,
            data: Some(details),
        }) => {
            if details.kind.eq_ignore_ascii_case("game") {
                Classification::Resolved(details.name)
            } else {
                Classification::NonGameApplication
            }
        }
        _ => Classification::Removed,
    };

    tracing::debug!(app_id, ?classification, "classified app");
    Ok(classification)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owned_games_keep_source_order() {
        let body = r#"{"response":{"game_count":2,"games":[
            {"appid":620,"playtime_forever":0},
            {"appid":400,"playtime_forever":315,"playtime_2weeks":20}
        ]}}"#;
        let entries = parse_owned_games(body).unwrap();
        assert_eq!(
            entries,
            vec![
                CatalogEntry::new(620, 0),
                CatalogEntry {
                    app_id: 400,
                    playtime_minutes: 315,
                    recent_playtime_minutes: Some(20),
                },
            ]
        );
    }

    #[test]
    fn private_profile_is_empty_library() {
        assert!(parse_owned_games(r#"{"response":{}}"#).unwrap().is_empty());
    }

    #[test]
    fn classifies_app_details() {
        let game = r#"{"620":{"success":true,"data":{"type":"game","name":"Portal 2"}}}"#;
        let tool = r#"{"228980":{"success":true,"data":{"type":"dlc","name":"Steamworks"}}}"#;
        let gone = r#"{"12345":{"success":false}}"#;

        assert_eq!(
            parse_app_details(620, game).unwrap(),
            Classification::Resolved("Portal 2".into())
        );
        assert_eq!(
            parse_app_details(228980, tool).unwrap(),
            Classification::NonGameApplication
        );
        assert_eq!(parse_app_details(12345, gone).unwrap(), Classification::Removed);
        assert_eq!(parse_app_details(1, "null").unwrap(), Classification::Removed);
        assert_eq!(parse_app_details(1, game).unwrap(), Classification::Removed);
    }
}
