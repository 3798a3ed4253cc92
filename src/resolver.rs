use crate::api::{CatalogResolver, CompletionTimeSource};
use crate::error::Result;
use crate::models::{Classification, CompletionTimeRecord, SearchOutcome};
use crate::normalize::normalize;

/// Normalize a store title and search for its completion times.
pub fn resolve<S>(source: &S, title: &str) -> Result<SearchOutcome>
where
    S: CompletionTimeSource + ?Sized,
{
    let term = normalize(title);
    tracing::debug!(title, %term, "resolving completion times");
    source.search(&term)
}

/// Result of looking up a single Steam app end to end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppLookup {
    Found {
        steam_name: String,
        record: CompletionTimeRecord,
    },
    NoMatch {
        steam_name: String,
    },
    Removed,
    NonGameApplication,
}

/// Steam app id -> store name -> completion times.
pub fn resolve_app<R, S>(catalog: &R, source: &S, app_id: u64) -> Result<AppLookup>
where
    R: CatalogResolver + ?Sized,
    S: CompletionTimeSource + ?Sized,
{
    let steam_name = match catalog.lookup_name(app_id)? {
        Classification::Resolved(name) => name,
        Classification::Removed => return Ok(AppLookup::Removed),
        Classification::NonGameApplication => return Ok(AppLookup::NonGameApplication),
    };

    Ok(match resolve(source, &steam_name)? {
        SearchOutcome::Found(record) => AppLookup::Found { steam_name, record },
        SearchOutcome::NoMatch => AppLookup::NoMatch { steam_name },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockCatalogResolver, MockCompletionTimeSource};
    use mockall::predicate::eq;

    #[test]
    fn searches_with_the_normalized_title() {
        let mut source = MockCompletionTimeSource::new();
        source
            .expect_search()
            .with(eq("Assassins Creed"))
            .times(1)
            .returning(|_| Ok(SearchOutcome::NoMatch));

        let outcome = resolve(&source, "Assassin\u{2019}s Creed\u{2122}").unwrap();
        assert_eq!(outcome, SearchOutcome::NoMatch);
    }

    #[test]
    fn removed_app_skips_search() {
        let mut catalog = MockCatalogResolver::new();
        catalog
            .expect_lookup_name()
            .returning(|_| Ok(Classification::Removed));
        let mut source = MockCompletionTimeSource::new();
        source.expect_search().never();

        assert_eq!(resolve_app(&catalog, &source, 5).unwrap(), AppLookup::Removed);
    }

    #[test]
    fn resolved_app_carries_store_name() {
        let mut catalog = MockCatalogResolver::new();
        catalog
            .expect_lookup_name()
            .with(eq(620))
            .returning(|_| Ok(Classification::Resolved("Portal 2".into())));
        let mut source = MockCompletionTimeSource::new();
        source.expect_search().with(eq("Portal 2")).returning(|_| {
            Ok(SearchOutcome::Found(CompletionTimeRecord {
                game_id: 7231,
                name: "Portal 2".into(),
                main: Some(30_600),
                ..Default::default()
            }))
        });

        let AppLookup::Found { steam_name, record } = resolve_app(&catalog, &source, 620).unwrap()
        else {
            panic!("expected a match");
        };
        assert_eq!(steam_name, "Portal 2");
        assert_eq!(record.game_id, 7231);
    }
}
