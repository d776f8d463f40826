use crate::core::candidate::Candidate;

use super::normalize::Normalized;

/// Text to append to `query` so that it spells out the one candidate whose
/// name starts with it.
///
/// Returns `None` for an empty query, when no candidate or more than one
/// candidate continues the query, when the query already spells out the
/// whole name, and when the query stops partway through a character whose
/// lowercase form is longer than one char (no appendable text exists then).
pub fn resolve(query: &str, candidates: &[Candidate]) -> Option<String> {
    let query = Normalized::new(query);
    if query.is_empty() {
        return None;
    }

    let mut found: Option<(&Candidate, Normalized)> = None;
    for candidate in candidates {
        let name = Normalized::new(candidate.name());
        if !name.starts_with(&query) {
            continue;
        }
        if found.is_some() {
            return None;
        }
        found = Some((candidate, name));
    }

    let (candidate, name) = found?;
    if !name.is_boundary(query.len()) {
        return None;
    }
    let from = name.original_offset(query.len());
    let to = name.original_offset(name.len());
    let extension: String = candidate
        .name()
        .chars()
        .skip(from)
        .take(to.saturating_sub(from))
        .collect();

    if extension.is_empty() {
        None
    } else {
        Some(extension)
    }
}

/// Display names that start with `query`, in snapshot order, at most `limit`.
pub fn suggestions<'a>(query: &str, candidates: &'a [Candidate], limit: usize) -> Vec<&'a str> {
    let query = Normalized::new(query);
    if query.is_empty() {
        return Vec::new();
    }
    candidates
        .iter()
        .filter(|c| Normalized::new(c.name()).starts_with(&query))
        .map(Candidate::name)
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{resolve, suggestions};
    use crate::core::candidate::candidates_from_names;

    #[test]
    fn unique_prefix_completes() {
        let candidates = candidates_from_names(["Inception", "Insomnia", "Interstellar"]);
        assert_eq!(resolve("Insom", &candidates), Some("nia".to_string()));
    }

    #[test]
    fn ambiguous_prefix_does_not_complete() {
        let candidates = candidates_from_names(["Inception", "Insomnia", "Interstellar"]);
        assert_eq!(resolve("In", &candidates), None);

        let pair = candidates_from_names(["Heat", "Heathers"]);
        assert_eq!(resolve("He", &pair), None);
    }

    #[test]
    fn duplicate_names_are_ambiguous() {
        let candidates = candidates_from_names(["Solaris", "Solaris"]);
        assert_eq!(resolve("Sol", &candidates), None);
    }

    #[test]
    fn no_prefix_match_does_not_complete() {
        let candidates = candidates_from_names(["Inception", "Insomnia"]);
        assert_eq!(resolve("somn", &candidates), None);
        assert_eq!(resolve("xyz", &candidates), None);
    }

    #[test]
    fn empty_query_does_not_complete() {
        let candidates = candidates_from_names(["Inception"]);
        assert_eq!(resolve("", &candidates), None);
        assert_eq!(resolve("  ", &candidates), None);
    }

    #[test]
    fn case_insensitive_and_keeps_display_case() {
        let candidates = candidates_from_names(["Mulholland Drive", "Memento"]);
        assert_eq!(resolve("mulh", &candidates), Some("olland Drive".to_string()));
    }

    #[test]
    fn full_name_has_nothing_to_add() {
        let candidates = candidates_from_names(["Heat"]);
        assert_eq!(resolve("heat", &candidates), None);
    }

    #[test]
    fn trailing_whitespace_in_name_is_not_appended() {
        let candidates = candidates_from_names(["Ran  "]);
        assert_eq!(resolve("R", &candidates), Some("an".to_string()));
    }

    #[test]
    fn query_ending_inside_expanded_fold_does_not_complete() {
        let candidates = candidates_from_names(["İstanbul", "Heat"]);
        assert_eq!(resolve("i", &candidates), None);
        assert_eq!(resolve("i\u{307}s", &candidates), Some("tanbul".to_string()));
    }

    #[test]
    fn suggestions_follow_snapshot_order() {
        let candidates = candidates_from_names(["Heathers", "Alien", "Heat", "heaven"]);
        assert_eq!(suggestions("hea", &candidates, 10), vec!["Heathers", "Heat", "heaven"]);
        assert_eq!(suggestions("hea", &candidates, 1), vec!["Heathers"]);
        assert!(suggestions("", &candidates, 10).is_empty());
    }
}
