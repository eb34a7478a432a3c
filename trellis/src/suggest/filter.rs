//! Suggestion filtering.
//!
//! Both filters share [`rank`]: an empty query keeps every item in source
//! order, otherwise matches are ordered by score, then by label length (a
//! shorter label is closer to what was typed), then by source order.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// Result of a filter operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterMatch {
    /// Index of the matched item in the original list.
    pub index: usize,
    /// Match score (higher is better).
    pub score: u32,
}

fn rank(
    query: &str,
    labels: &[String],
    mut score: impl FnMut(&str) -> Option<u32>,
) -> Vec<FilterMatch> {
    let mut matches: Vec<FilterMatch> = labels
        .iter()
        .enumerate()
        .filter_map(|(index, label)| {
            let score = if query.is_empty() { Some(0) } else { score(label) };
            score.map(|score| FilterMatch { index, score })
        })
        .collect();

    if !query.is_empty() {
        let len = |m: &FilterMatch| labels[m.index].chars().count();
        matches.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| len(a).cmp(&len(b))));
    }
    matches
}

/// Fuzzy filter using nucleo-matcher, case-insensitive.
///
/// # Example
///
/// ```ignore
/// let labels: Vec<String> = ["apple", "banana", "apricot"].map(String::from).into();
/// let matches = fuzzy_filter("ap", &labels);
/// // apple and apricot, best match first
/// ```
pub fn fuzzy_filter(query: &str, labels: &[String]) -> Vec<FilterMatch> {
    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );
    let mut buf = Vec::new();
    rank(query, labels, |label| {
        pattern.score(Utf32Str::new(label, &mut buf), &mut matcher)
    })
}

/// Case-insensitive substring filter. Every match scores 0, so matches are
/// ordered by label length.
pub fn substring_filter(query: &str, labels: &[String]) -> Vec<FilterMatch> {
    let needle = query.to_lowercase();
    rank(query, labels, |label| {
        label.to_lowercase().contains(&needle).then_some(0)
    })
}
