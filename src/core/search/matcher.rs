use std::cmp::Reverse;

use crate::core::candidate::Candidate;

use super::normalize::Normalized;

/// Hard cap on the number of results a search ever returns.
pub const MAX_RESULTS: usize = 99;

const SCORE_PREFIX: i32 = 2;
const SCORE_CONTAINS: i32 = 1;

/// Characters of a display name to emphasise, as `(start, len)` in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRange {
    pub start: usize,
    pub len: usize,
}

impl HighlightRange {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Position of the candidate in the snapshot it was matched against.
    pub index: usize,
    pub candidate: Candidate,
    pub score: i32,
    pub ranges: Vec<HighlightRange>,
}

/// Ranked matches for one query, never longer than [`MAX_RESULTS`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultList {
    items: Vec<MatchResult>,
}

impl ResultList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[MatchResult] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&MatchResult> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchResult> {
        self.items.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|m| m.candidate.name()).collect()
    }
}

impl<'a> IntoIterator for &'a ResultList {
    type Item = &'a MatchResult;
    type IntoIter = std::slice::Iter<'a, MatchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Substring search over `candidates`.
///
/// An empty (or all-whitespace) query lists the first `limit` candidates in
/// order. Otherwise a candidate matches when the folded query occurs in its
/// folded name; matches starting at the first character rank first, then
/// shorter names, then snapshot order. `limit` is clamped to [`MAX_RESULTS`].
pub fn find_matches(query: &str, candidates: &[Candidate], limit: usize) -> ResultList {
    let limit = limit.min(MAX_RESULTS);
    if limit == 0 {
        return ResultList::new();
    }

    let query = Normalized::new(query);
    if query.is_empty() {
        let items = candidates
            .iter()
            .take(limit)
            .enumerate()
            .map(|(index, candidate)| MatchResult {
                index,
                candidate: candidate.clone(),
                score: 0,
                ranges: Vec::new(),
            })
            .collect();
        return ResultList { items };
    }

    let mut matches: Vec<(MatchResult, usize)> = Vec::new();
    for (index, candidate) in candidates.iter().enumerate() {
        let name = Normalized::new(candidate.name());
        let Some(start) = name.find(&query) else {
            continue;
        };
        let Some((hl_start, hl_len)) = name.original_range(start, start + query.len()) else {
            continue;
        };

        let score = if start == 0 {
            SCORE_PREFIX
        } else {
            SCORE_CONTAINS
        };
        let name_len = candidate.name().chars().count();
        matches.push((
            MatchResult {
                index,
                candidate: candidate.clone(),
                score,
                ranges: vec![HighlightRange {
                    start: hl_start,
                    len: hl_len,
                }],
            },
            name_len,
        ));
    }

    matches.sort_by_key(|(m, name_len)| (Reverse(m.score), *name_len, m.index));
    matches.truncate(limit);

    ResultList {
        items: matches.into_iter().map(|(m, _)| m).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{HighlightRange, MAX_RESULTS, find_matches};
    use crate::core::candidate::candidates_from_names;

    fn films() -> Vec<crate::core::candidate::Candidate> {
        candidates_from_names(["Inception", "Insomnia", "Interstellar"])
    }

    #[test]
    fn shared_prefix_matches_everything() {
        let results = find_matches("In", &films(), MAX_RESULTS);
        assert_eq!(results.len(), 3);
        for m in &results {
            assert_eq!(m.ranges, vec![HighlightRange { start: 0, len: 2 }]);
        }
    }

    #[test]
    fn longer_prefix_narrows_to_one() {
        let results = find_matches("Insom", &films(), MAX_RESULTS);
        assert_eq!(results.names(), vec!["Insomnia"]);
        assert_eq!(results.items()[0].ranges, vec![HighlightRange { start: 0, len: 5 }]);
    }

    #[test]
    fn empty_query_lists_first_99_in_order() {
        let names: Vec<String> = (0..150).map(|i| format!("Folder {i:03}")).collect();
        let candidates = candidates_from_names(names.clone());
        let results = find_matches("", &candidates, MAX_RESULTS);

        assert_eq!(results.len(), 99);
        for (i, m) in results.iter().enumerate() {
            assert_eq!(m.candidate.name(), names[i]);
            assert_eq!(m.index, i);
            assert!(m.ranges.is_empty());
        }
    }

    #[test]
    fn whitespace_query_counts_as_empty() {
        let results = find_matches("   ", &films(), MAX_RESULTS);
        assert_eq!(results.names(), vec!["Inception", "Insomnia", "Interstellar"]);
    }

    #[test]
    fn limit_is_capped_at_99() {
        let candidates = candidates_from_names((0..150).map(|i| format!("Heat {i}")));
        assert_eq!(find_matches("heat", &candidates, 500).len(), 99);
        assert_eq!(find_matches("heat", &candidates, 10).len(), 10);
        assert!(find_matches("heat", &candidates, 0).is_empty());
    }

    #[test]
    fn prefix_matches_rank_above_inner_matches() {
        let candidates = candidates_from_names(["The Thing", "Thor", "Arthur"]);
        let results = find_matches("th", &candidates, MAX_RESULTS);
        assert_eq!(results.names(), vec!["Thor", "The Thing", "Arthur"]);
        assert_eq!(results.items()[2].ranges, vec![HighlightRange { start: 2, len: 2 }]);
    }

    #[test]
    fn ties_keep_snapshot_order() {
        let candidates = candidates_from_names(["Alien", "Aliens", "alien", "Alien 3"]);
        let results = find_matches("alien", &candidates, MAX_RESULTS);
        assert_eq!(results.names(), vec!["Alien", "alien", "Aliens", "Alien 3"]);
    }

    #[test]
    fn highlight_is_in_original_coordinates() {
        let candidates = candidates_from_names(["  Das Boot  "]);
        let results = find_matches("BOOT", &candidates, MAX_RESULTS);
        assert_eq!(results.items()[0].ranges, vec![HighlightRange { start: 6, len: 4 }]);
    }

    #[test]
    fn highlights_stay_in_bounds() {
        let candidates = candidates_from_names(["İstanbul", "Straße", "  x  ", "Amélie"]);
        for query in ["i", "İ", "stan", "ß", "x", "lie", "É"] {
            for m in &find_matches(query, &candidates, MAX_RESULTS) {
                let len = m.candidate.name().chars().count();
                for range in &m.ranges {
                    assert!(range.len > 0);
                    assert!(range.end() <= len, "{query:?} on {:?}", m.candidate.name());
                }
            }
        }
    }

    #[test]
    fn no_candidates_no_results() {
        assert!(find_matches("anything", &[], MAX_RESULTS).is_empty());
        assert!(find_matches("", &[], MAX_RESULTS).is_empty());
    }

    #[test]
    fn non_matching_query_is_empty() {
        assert!(find_matches("zzz", &films(), MAX_RESULTS).is_empty());
    }

    #[test]
    fn repeated_calls_agree() {
        let candidates = films();
        assert_eq!(
            find_matches("e", &candidates, MAX_RESULTS),
            find_matches("e", &candidates, MAX_RESULTS)
        );
    }

    #[test]
    fn result_count_never_exceeds_candidates() {
        let candidates = films();
        for query in ["", "i", "n", "zz", "in"] {
            let results = find_matches(query, &candidates, MAX_RESULTS);
            assert!(results.len() <= candidates.len().min(MAX_RESULTS));
        }
    }
}
