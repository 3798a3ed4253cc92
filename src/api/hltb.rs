use super::{build_client, ensure_success, CompletionTimeSource};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{CompletionTimeRecord, SearchOutcome};
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ORIGIN, REFERER};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::LazyLock;

const SERVICE: &str = "HowLongToBeat";

static NEXT_DATA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<script[^>]*id="__NEXT_DATA__"[^>]*>(.*?)</script>"#).unwrap()
});

/// Client for the HowLongToBeat site. The search endpoint is JSON; single
/// games only exist as rendered pages.
#[derive(Clone)]
pub struct HltbClient {
    client: Client,
    base_url: String,
}

/// A search hit as HowLongToBeat returns it. Durations are seconds and
/// zero when the site has no submissions for that category.
#[derive(Deserialize, Debug)]
struct RawGame {
    game_id: u64,
    game_name: String,
    comp_main: Option<u64>,
    comp_plus: Option<u64>,
    comp_100: Option<u64>,
    comp_all: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<RawGame>,
}

impl From<RawGame> for CompletionTimeRecord {
    fn from(raw: RawGame) -> Self {
        let known = |secs: Option<u64>| secs.filter(|s| *s > 0);
        CompletionTimeRecord {
            game_id: raw.game_id,
            name: raw.game_name,
            main: known(raw.comp_main),
            main_extra: known(raw.comp_plus),
            completionist: known(raw.comp_100),
            all_styles: known(raw.comp_all),
        }
    }
}

impl HltbClient {
    /// Build a client against `config.hltb_base_url`.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(HltbClient {
            client: build_client(config)?,
            base_url: config.hltb_base_url.clone(),
        })
    }

    /// The site rejects requests that don't look like they came from itself.
    fn headers(&self) -> Result<HeaderMap> {
        let value = HeaderValue::from_str(&self.base_url)
            .map_err(|_| Error::InvalidInput(format!("bad base url '{}'", self.base_url)))?;
        let mut headers = HeaderMap::new();
        headers.insert(ORIGIN, value.clone());
        headers.insert(REFERER, value);
        Ok(headers)
    }

    /// Fetch a game page by HowLongToBeat id and pull the record out of it.
    pub fn game_by_id(&self, game_id: u64) -> Result<CompletionTimeRecord> {
        let url = format!("{}game/{}", self.base_url, game_id);
        tracing::debug!(%url, "fetching game page");
        let res = self.client.get(&url).headers(self.headers()?).send()?;
        let html = ensure_success(SERVICE, res)?.text()?;
        extract_game_page(&html)
    }
}

impl CompletionTimeSource for HltbClient {
    fn search(&self, term: &str) -> Result<SearchOutcome> {
        let url = format!("{}api/search", self.base_url);
        let terms = search_terms(term);
        tracing::debug!(?terms, "searching");

        let res = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&search_payload(&terms))
            .send()?;
        let body = ensure_success(SERVICE, res)?.text()?;
        parse_search_response(&body)
    }
}

/// Lowercased whitespace tokens, the form the search index matches on.
pub fn search_terms(term: &str) -> Vec<String> {
    term.split_whitespace().map(str::to_lowercase).collect()
}

/// Search request body asking for exactly one result, ranked by popularity.
pub fn search_payload(terms: &[String]) -> Value {
    json!({
        "searchType": "games",
        "searchTerms": terms,
        "searchPage": 1,
        "size": 1,
        "searchOptions": {
            "games": {
                "userId": 0,
                "platform": "",
                "sortCategory": "popular",
                "rangeCategory": "main",
                "rangeTime": { "min": null, "max": null },
                "gameplay": { "perspective": "", "flow": "", "genre": "" },
                "rangeYear": { "min": "", "max": "" },
                "modifier": "",
            },
            "users": { "sortCategory": "postcount" },
            "filter": "",
            "sort": 0,
            "randomizer": 0,
        },
    })
}

/// Take the top-ranked hit verbatim; no hits is `NoMatch`.
pub fn parse_search_response(body: &str) -> Result<SearchOutcome> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| Error::decode(SERVICE, e.to_string()))?;

    Ok(match response.data.into_iter().next() {
        Some(raw) => SearchOutcome::Found(raw.into()),
        None => SearchOutcome::NoMatch,
    })
}

/// Game pages are rendered by Next.js and embed their data as JSON in the
/// `__NEXT_DATA__` script tag.
pub fn extract_game_page(html: &str) -> Result<CompletionTimeRecord> {
    let payload = NEXT_DATA_REGEX
        .captures(html)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| Error::decode(SERVICE, "game page has no embedded data"))?;

    let data: Value = serde_json::from_str(payload.as_str())
        .map_err(|e| Error::decode(SERVICE, e.to_string()))?;
    let game = data
        .pointer("/props/pageProps/game/data/game/0")
        .cloned()
        .ok_or_else(|| Error::decode(SERVICE, "game page data has no game entry"))?;

    let raw: RawGame =
        serde_json::from_value(game).map_err(|e| Error::decode(SERVICE, e.to_string()))?;
    Ok(raw.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_are_lowercase_tokens() {
        assert_eq!(
            search_terms("  The Witcher\t3  Wild HUNT "),
            vec!["the", "witcher", "3", "wild", "hunt"]
        );
        assert!(search_terms("   ").is_empty());
    }

    #[test]
    fn payload_asks_for_one_game() {
        let payload = search_payload(&search_terms("Hollow Knight"));
        assert_eq!(payload["searchType"], "games");
        assert_eq!(payload["size"], 1);
        assert_eq!(payload["searchTerms"], json!(["hollow", "knight"]));
        assert_eq!(payload["searchOptions"]["games"]["sortCategory"], "popular");
        assert!(payload["searchOptions"]["games"]["rangeTime"]["min"].is_null());
    }

    #[test]
    fn zero_durations_become_unknown() {
        let body = r#"{"count":1,"data":[{"game_id":7,"game_name":"Tiny",
            "comp_main":3600,"comp_plus":0,"comp_100":0}]}"#;
        let SearchOutcome::Found(record) = parse_search_response(body).unwrap() else {
            panic!("expected a match");
        };
        assert_eq!(record.main, Some(3600));
        assert_eq!(record.main_extra, None);
        assert_eq!(record.completionist, None);
        assert_eq!(record.all_styles, None);
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        let err = parse_search_response("<html>blocked</html>").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}
