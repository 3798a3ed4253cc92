//! Integration tests for title normalization
//!
//! These tests verify:
//! - The documented clean-up examples
//! - Idempotence over arbitrary titles, including decorated ones

use backlog_cli::normalize::normalize;
use proptest::prelude::*;

#[test]
fn test_trademark_and_edition() {
    assert_eq!(normalize("Chrono Trigger\u{2122} Edition"), "Chrono Trigger");
}

#[test]
fn test_single_trailing_edition_and_apostrophes() {
    assert_eq!(normalize("Assassin's Creed's Edition"), "Assassins Creeds");
    assert_eq!(normalize("Assassin\u{2019}s Creed\u{2019}s Edition"), "Assassins Creeds");
}

#[test]
fn test_game_of_the_year() {
    assert_eq!(normalize("Game of the Year Edition"), "Game of the Year");
    assert_eq!(normalize("Deluxe Edition Remastered"), "Deluxe Edition Remastered");
}

fn decorated_title() -> impl Strategy<Value = String> {
    let word = prop_oneof![
        Just("Edition".to_string()),
        Just("EDITION".to_string()),
        Just("Edition'".to_string()),
        Just("Assassin's".to_string()),
        Just("\u{2122}".to_string()),
        Just("\u{00AE}".to_string()),
        Just("\u{2019}".to_string()),
        "[A-Za-z0-9:]{1,8}",
    ];
    let sep = prop_oneof![Just(" "), Just("  "), Just("\t"), Just("")];
    prop::collection::vec((word, sep), 0..8).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(w, s)| format!("{w}{s}"))
            .collect::<String>()
    })
}

proptest! {
    #[test]
    fn normalize_is_idempotent(title in "\\PC{0,40}") {
        let once = normalize(&title);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_is_idempotent_on_decorated_titles(title in decorated_title()) {
        let once = normalize(&title);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert!(!once.contains('\u{2122}'), "trademark glyph left in {:?}", once);
        prop_assert!(!once.contains('\''), "apostrophe left in {:?}", once);
        prop_assert!(!once.contains('\u{2019}'), "curly apostrophe left in {:?}", once);
    }
}
