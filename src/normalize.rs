//! Title clean-up for HowLongToBeat's fuzzy search.
//!
//! Store titles carry decorations the search index does not: trademark
//! glyphs, "... Edition" suffixes and apostrophes. Each pass runs the steps
//! in a fixed order (glyphs first, since the suffix check looks at the bare
//! last word), and `normalize` repeats the pass until the title stops
//! changing so the result is always a fixed point.

const MARK_GLYPHS: [char; 4] = ['\u{2122}', '\u{00A9}', '\u{00AE}', '\u{2117}'];
const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];
const EDITION: &str = "EDITION";

/// Turn a catalog title into a search-friendly term.
///
/// ```
/// use backlog_cli::normalize::normalize;
///
/// assert_eq!(normalize("Chrono Trigger\u{2122} Edition"), "Chrono Trigger");
/// assert_eq!(normalize("Deluxe Edition Remastered"), "Deluxe Edition Remastered");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut current = normalize_once(raw);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_once(raw: &str) -> String {
    let stripped = strip_marks(raw);
    let trimmed = strip_edition_suffix(&stripped);
    strip_apostrophes(trimmed)
}

fn strip_marks(title: &str) -> String {
    title.chars().filter(|c| !MARK_GLYPHS.contains(c)).collect()
}

/// Drops a single trailing "Edition" word together with the whitespace
/// before it. A title that is only "Edition" is left alone.
fn strip_edition_suffix(title: &str) -> &str {
    match title.rsplit_once(char::is_whitespace) {
        Some((head, last)) if last.eq_ignore_ascii_case(EDITION) => head,
        _ => title,
    }
}

fn strip_apostrophes(title: &str) -> String {
    title.chars().filter(|c| !APOSTROPHES.contains(c)).collect()
}
