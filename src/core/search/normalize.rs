/// Case-folded, trimmed form of a string together with the position of every
/// folded character in the original text.
///
/// Case folding can change the number of characters (`'İ'` folds to two), so
/// matches found in the folded text are mapped back through `origin` before
/// they are reported against the display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    chars: Vec<char>,
    origin: Vec<usize>,
}

impl Normalized {
    pub fn new(text: &str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut origin = Vec::with_capacity(text.len());

        let total = text.chars().count();
        let leading = text.chars().take_while(|c| c.is_whitespace()).count();
        let trailing = text
            .chars()
            .rev()
            .take_while(|c| c.is_whitespace())
            .count();
        let end = total.saturating_sub(trailing).max(leading);

        for (pos, ch) in text.chars().enumerate().take(end).skip(leading) {
            for folded in ch.to_lowercase() {
                chars.push(folded);
                origin.push(pos);
            }
        }

        Self { chars, origin }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }

    /// First folded position where `needle` occurs.
    pub fn find(&self, needle: &Normalized) -> Option<usize> {
        if needle.is_empty() {
            return Some(0);
        }
        if needle.len() > self.len() {
            return None;
        }
        self.chars
            .windows(needle.len())
            .position(|window| window == needle.chars())
    }

    pub fn starts_with(&self, prefix: &Normalized) -> bool {
        self.chars.starts_with(prefix.chars())
    }

    /// Maps the folded range `[start, end)` to a `(start, len)` character
    /// range of the original text. A range that ends inside the expansion of
    /// one original character is widened to cover that whole character.
    pub fn original_range(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        if start >= end || end > self.len() {
            return None;
        }
        let first = self.origin[start];
        let last = self.origin[end - 1];
        Some((first, last + 1 - first))
    }

    /// Whether folded position `pos` falls between two original characters
    /// rather than inside the expansion of one.
    pub fn is_boundary(&self, pos: usize) -> bool {
        if pos == 0 || pos >= self.len() {
            return true;
        }
        self.origin[pos] != self.origin[pos - 1]
    }

    /// Original character offset where the folded position `pos` begins, or
    /// one past the last kept character when `pos` is the end.
    pub fn original_offset(&self, pos: usize) -> usize {
        match self.origin.get(pos) {
            Some(&offset) => offset,
            None => self.origin.last().map(|&last| last + 1).unwrap_or(0),
        }
    }
}

/// Lowercases and trims `text`.
pub fn normalize(text: &str) -> String {
    Normalized::new(text).as_string()
}

#[cfg(test)]
mod tests {
    use super::{Normalized, normalize};

    #[test]
    fn folds_case_and_trims() {
        assert_eq!(normalize("  The Matrix \t"), "the matrix");
        assert_eq!(normalize("ÉCOLE"), "école");
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(normalize("   "), "");
        assert!(Normalized::new("\t \n").is_empty());
    }

    #[test]
    fn keeps_inner_whitespace() {
        assert_eq!(normalize("Blade  Runner"), "blade  runner");
    }

    #[test]
    fn origin_skips_leading_whitespace() {
        let n = Normalized::new("  Heat");
        assert_eq!(n.original_range(0, 4), Some((2, 4)));
        assert_eq!(n.original_offset(4), 6);
    }

    #[test]
    fn expanding_fold_maps_back_to_one_char() {
        // 'İ' lowercases to 'i' followed by a combining dot.
        let n = Normalized::new("İstanbul");
        assert_eq!(n.len(), 9);
        assert_eq!(n.original_range(0, 1), Some((0, 1)));
        assert_eq!(n.original_range(2, 5), Some((1, 3)));
    }

    #[test]
    fn boundary_inside_expanded_fold() {
        let n = Normalized::new("İstanbul");
        assert!(n.is_boundary(0));
        assert!(!n.is_boundary(1));
        assert!(n.is_boundary(2));
        assert!(n.is_boundary(n.len()));
    }

    #[test]
    fn find_and_prefix() {
        let hay = Normalized::new("Interstellar");
        assert_eq!(hay.find(&Normalized::new("STELL")), Some(5));
        assert_eq!(hay.find(&Normalized::new("xyz")), None);
        assert!(hay.starts_with(&Normalized::new("inter")));
        assert!(!hay.starts_with(&Normalized::new("stellar")));
    }
}
