//! Backlog aggregation over a Steam library.
//!
//! Entries are handled strictly one after another. Per-entry misses
//! (removed apps, non-games, titles HowLongToBeat doesn't know) are counted
//! and skipped; any transport error aborts the pass and no summary is
//! returned.

use crate::api::{CatalogResolver, CompletionTimeSource, LibrarySource};
use crate::duration::{format_half_hourly, format_tenth_hourly, Hours};
use crate::error::Result;
use crate::models::{CatalogEntry, Classification, CompletionTimeRecord, Mode, SearchOutcome};
use crate::resolver::resolve;
use crate::session::Session;

/// Running hour totals per completion category.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryTotals {
    pub main: f64,
    pub main_extra: f64,
    pub completionist: f64,
    pub all_styles: f64,
}

impl CategoryTotals {
    /// Add each category independently; unknown categories contribute nothing.
    fn add(&mut self, record: &CompletionTimeRecord) {
        let pairs = [
            (&mut self.main, record.main),
            (&mut self.main_extra, record.main_extra),
            (&mut self.completionist, record.completionist),
            (&mut self.all_styles, record.all_styles),
        ];
        for (total, seconds) in pairs {
            if let Hours::Known(hours) = format_half_hourly(seconds) {
                *total += hours;
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateSummary {
    pub totals: CategoryTotals,
    pub total_playtime_minutes: u64,
    /// Every entry the library returned.
    pub considered: usize,
    /// Entries hidden by the mode filter.
    pub skipped_by_filter: usize,
    /// Entries that passed the filter.
    pub processed: usize,
    /// Entries whose app id resolved to a game name.
    pub resolved: usize,
    /// Resolved entries that also matched a HowLongToBeat record.
    pub matched: usize,
    pub never_played: usize,
    pub removed: usize,
    pub non_game: usize,
    pub lookup_failures: usize,
}

impl AggregateSummary {
    pub fn total_playtime_hours(&self) -> f64 {
        format_tenth_hourly(self.total_playtime_minutes)
    }

    /// Entries skipped for a per-entry reason (not counting the filter).
    pub fn skipped(&self) -> usize {
        self.removed + self.non_game + self.lookup_failures
    }
}

/// Aggregate a library listing.
pub fn aggregate<R, S>(
    entries: &[CatalogEntry],
    mode: Mode,
    catalog: &R,
    source: &S,
) -> Result<AggregateSummary>
where
    R: CatalogResolver + ?Sized,
    S: CompletionTimeSource + ?Sized,
{
    aggregate_with_progress(entries, mode, catalog, source, |_, _| {})
}

/// Same as [`aggregate`], calling `progress(done, total)` after each entry.
pub fn aggregate_with_progress<R, S, F>(
    entries: &[CatalogEntry],
    mode: Mode,
    catalog: &R,
    source: &S,
    mut progress: F,
) -> Result<AggregateSummary>
where
    R: CatalogResolver + ?Sized,
    S: CompletionTimeSource + ?Sized,
    F: FnMut(usize, usize),
{
    let mut summary = AggregateSummary {
        considered: entries.len(),
        ..Default::default()
    };
    tracing::info!(entries = entries.len(), ?mode, "starting aggregation pass");

    for (index, entry) in entries.iter().enumerate() {
        process_entry(entry, mode, catalog, source, &mut summary)?;
        progress(index + 1, entries.len());
    }

    tracing::info!(
        processed = summary.processed,
        matched = summary.matched,
        skipped = summary.skipped(),
        "aggregation pass finished"
    );
    Ok(summary)
}

fn process_entry<R, S>(
    entry: &CatalogEntry,
    mode: Mode,
    catalog: &R,
    source: &S,
    summary: &mut AggregateSummary,
) -> Result<()>
where
    R: CatalogResolver + ?Sized,
    S: CompletionTimeSource + ?Sized,
{
    if !mode.includes(entry) {
        summary.skipped_by_filter += 1;
        return Ok(());
    }
    summary.processed += 1;

    let name = match catalog.lookup_name(entry.app_id)? {
        Classification::Resolved(name) => name,
        Classification::Removed => {
            tracing::warn!(app_id = entry.app_id, "app removed from store, skipping");
            summary.removed += 1;
            return Ok(());
        }
        Classification::NonGameApplication => {
            tracing::debug!(app_id = entry.app_id, "not a game, skipping");
            summary.non_game += 1;
            return Ok(());
        }
    };
    summary.resolved += 1;

    summary.total_playtime_minutes += entry.playtime_minutes;
    if entry.is_unplayed() {
        summary.never_played += 1;
    }

    match resolve(source, &name)? {
        SearchOutcome::Found(record) => {
            tracing::debug!(app_id = entry.app_id, %name, matched = %record.name, "matched");
            summary.matched += 1;
            summary.totals.add(&record);
        }
        SearchOutcome::NoMatch => {
            tracing::warn!(app_id = entry.app_id, %name, "no HowLongToBeat match");
            summary.lookup_failures += 1;
        }
    }
    Ok(())
}

/// List the session's library and aggregate it.
pub fn run_pass<L, R, S, F>(
    session: &Session,
    mode: Mode,
    library: &L,
    catalog: &R,
    source: &S,
    progress: F,
) -> Result<AggregateSummary>
where
    L: LibrarySource + ?Sized,
    R: CatalogResolver + ?Sized,
    S: CompletionTimeSource + ?Sized,
    F: FnMut(usize, usize),
{
    let entries = library.list_entries(session)?;
    aggregate_with_progress(&entries, mode, catalog, source, progress)
}
