//! Relevance ranking of search results

use std::cmp::Ordering;

use super::model::Rankable;
use super::rate_parser::parse_tariff_value;

/// Character index of the first case-insensitive occurrence of `keyword`
/// in `text`, or `usize::MAX` when absent.
pub fn keyword_position(text: &str, keyword: &str) -> usize {
    let haystack = text.to_lowercase();
    let needle = keyword.to_lowercase();
    haystack
        .find(&needle)
        .map(|byte_idx| haystack[..byte_idx].chars().count())
        .unwrap_or(usize::MAX)
}

/// Order by earliest keyword occurrence in the leaf description, then by
/// general-rate magnitude (highest first). Ties keep their input order.
pub fn rank<T: Rankable>(items: Vec<T>, keyword: &str) -> Vec<T> {
    let mut keyed: Vec<(usize, f64, T)> = items
        .into_iter()
        .map(|item| {
            let position = keyword_position(item.leaf_description(), keyword);
            let rate = parse_tariff_value(item.general_rate());
            (position, rate, item)
        })
        .collect();

    keyed.sort_by(|(pos_a, rate_a, _), (pos_b, rate_b, _)| {
        pos_a.cmp(pos_b).then_with(|| compare_rate_desc(*rate_a, *rate_b))
    });

    keyed.into_iter().map(|(_, _, item)| item).collect()
}

fn compare_rate_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
