//! Hierarchy navigation over dotted classification codes

use super::model::Classified;
use super::query::TariffQuery;
use super::rate_parser::count_dots;

/// Whether `code` sits on the level directly below `parent`.
///
/// A direct child is one dot deeper. A code two dots deeper also counts when
/// its final segment is exactly two digits (a statistical suffix, e.g.
/// `1704` → `1704.90.35`). Nothing deeper ever matches.
pub fn is_next_level(parent: &str, code: &str) -> bool {
    let Some(rest) = code.strip_prefix(parent) else {
        return false;
    };
    if !rest.starts_with('.') {
        return false;
    }

    let parent_depth = count_dots(parent);
    let depth = count_dots(code);

    if depth == parent_depth + 1 {
        return true;
    }

    depth == parent_depth + 2 && has_statistical_suffix(code)
}

fn has_statistical_suffix(code: &str) -> bool {
    code.rsplit('.')
        .next()
        .map(|last| last.len() == 2 && last.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false)
}

/// Filter `records` to the classification level directly below `query`.
///
/// Keyword queries yield the top-level (dot-free) codes. Records without a
/// code never match.
pub fn next_level<'a, T: Classified>(query: &TariffQuery, records: &'a [T]) -> Vec<&'a T> {
    records
        .iter()
        .filter(|record| match (query, record.code()) {
            (_, None) => false,
            (TariffQuery::Keyword(_), Some(code)) => count_dots(code) == 0,
            (TariffQuery::Code(parent), Some(code)) => is_next_level(parent, code),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tariff::TariffRecord;

    fn records(codes: &[&str]) -> Vec<TariffRecord> {
        codes.iter().map(|c| TariffRecord::new(c, "")).collect()
    }

    fn codes<'a>(found: &[&'a TariffRecord]) -> Vec<&'a str> {
        found.iter().filter_map(|r| r.code()).collect()
    }

    #[test]
    fn keyword_returns_top_level_only() {
        let set = records(&["1704", "1704.90", "1806", "1806.10.01"]);
        let found = next_level(&TariffQuery::Keyword("sugar".into()), &set);
        assert_eq!(codes(&found), vec!["1704", "1806"]);
    }

    #[test]
    fn code_returns_direct_children() {
        let set = records(&["1704", "1704.10", "1704.90", "1704.90.35", "1705.10"]);
        let found = next_level(&TariffQuery::Code("1704".into()), &set);
        assert_eq!(codes(&found), vec!["1704.10", "1704.90"]);
    }

    #[test]
    fn statistical_suffix_is_accepted_two_levels_down() {
        let set = records(&["1704.90.35", "1704.90.3500", "1704.90.a5", "1704.90.355"]);
        let found = next_level(&TariffQuery::Code("1704".into()), &set);
        assert_eq!(codes(&found), vec!["1704.90.35"]);
    }

    #[test]
    fn three_levels_down_never_matches() {
        assert!(!is_next_level("1704", "1704.90.35.10"));
        assert!(is_next_level("1704.90", "1704.90.35.10"));
        assert!(is_next_level("1704.90.35", "1704.90.35.10"));
    }

    #[test]
    fn prefix_must_end_on_a_segment_boundary() {
        assert!(!is_next_level("1704", "17041.10"));
        assert!(!is_next_level("170", "1704.10"));
        assert!(!is_next_level("1704", "1704"));
    }

    #[test]
    fn missing_codes_are_excluded() {
        let mut set = records(&["1704", "1704.10"]);
        set.push(TariffRecord {
            code: None,
            ..TariffRecord::new("", "Other:")
        });
        set.push(TariffRecord::new("", "Blank"));
        let keyword = next_level(&TariffQuery::Keyword("x".into()), &set);
        assert_eq!(codes(&keyword), vec!["1704"]);
        let code = next_level(&TariffQuery::Code("1704".into()), &set);
        assert_eq!(codes(&code), vec!["1704.10"]);
    }

    #[test]
    fn every_child_is_included_and_non_children_excluded() {
        let parent = "0101.21";
        let set = records(&[
            "0101.21.00",    // child
            "0101.21.00.10", // statistical suffix
            "0101.21.00.1",  // not two digits
            "0101.29.00",    // sibling branch
            "0101.21",       // itself
            "0101",          // ancestor
        ]);
        let found = next_level(&TariffQuery::Code(parent.into()), &set);
        assert_eq!(codes(&found), vec!["0101.21.00", "0101.21.00.10"]);
    }
}
