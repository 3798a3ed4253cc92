use serde::{Deserialize, Serialize};

/// One owned app from the user's Steam library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub app_id: u64,
    pub playtime_minutes: u64,
    pub recent_playtime_minutes: Option<u64>,
}

impl CatalogEntry {
    /// Entry with no recent-playtime figure.
    pub fn new(app_id: u64, playtime_minutes: u64) -> Self {
        Self {
            app_id,
            playtime_minutes,
            recent_playtime_minutes: None,
        }
    }

    /// Zero minutes ever played, i.e. part of the backlog.
    pub fn is_unplayed(&self) -> bool {
        self.playtime_minutes == 0
    }
}

/// Best HowLongToBeat match for a title. Durations are in seconds; `None`
/// (or zero) means the site has no estimate for that category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompletionTimeRecord {
    pub game_id: u64,
    pub name: String,
    pub main: Option<u64>,
    pub main_extra: Option<u64>,
    pub completionist: Option<u64>,
    pub all_styles: Option<u64>,
}

/// What the catalog says an app id is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Resolved(String),
    /// Delisted, region-locked or otherwise not returned by the store.
    Removed,
    NonGameApplication,
}

/// Result of a completion-time search: the top hit, or nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(CompletionTimeRecord),
    NoMatch,
}

/// Which library entries an aggregation pass looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    All,
    UnplayedOnly,
}

impl Mode {
    /// Whether `entry` passes this mode's filter.
    pub fn includes(&self, entry: &CatalogEntry) -> bool {
        match self {
            Mode::All => true,
            Mode::UnplayedOnly => entry.is_unplayed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unplayed_mode_filters_on_total_playtime() {
        let mut played_recently = CatalogEntry::new(10, 0);
        played_recently.recent_playtime_minutes = Some(30);

        assert!(Mode::UnplayedOnly.includes(&CatalogEntry::new(1, 0)));
        assert!(!Mode::UnplayedOnly.includes(&CatalogEntry::new(2, 120)));
        assert!(Mode::UnplayedOnly.includes(&played_recently));
        assert!(Mode::All.includes(&CatalogEntry::new(2, 120)));
    }
}
