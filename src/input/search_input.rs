use crate::core::candidate::CandidateSource;
use crate::core::error::SearchError;
use crate::core::search::autocomplete;
use crate::core::search::{MAX_RESULTS, ResultList, find_matches};
use crate::input::KeyResult;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};

const SUGGESTION_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Empty query, nothing selected.
    Idle,
    /// Non-empty query, cursor somewhere in it, maybe a partial selection.
    Editing,
    /// The whole query is selected; the next edit replaces it.
    Selected,
}

/// Half-open character range of the query, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Owns the live query and re-runs the search after every edit.
///
/// Every call that changes the query recomputes the result list exactly once
/// against the snapshot `source` hands out at that moment; calls that leave
/// the query untouched (cursor moves, selection changes, failed completions)
/// never recompute.
#[derive(Debug, Clone)]
pub struct SearchInput {
    query: String,
    cursor: usize,
    anchor: Option<usize>,
    state: SearchState,
    limit: usize,
    results: ResultList,
    hint: Option<String>,
    suggestions: Vec<String>,
    revision: u64,
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchInput {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            cursor: 0,
            anchor: None,
            state: SearchState::Idle,
            limit: MAX_RESULTS,
            results: ResultList::new(),
            hint: None,
            suggestions: Vec::new(),
            revision: 0,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.clamp(1, MAX_RESULTS);
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn results(&self) -> &ResultList {
        &self.results
    }

    /// Unique completion for the current query, as computed by the last
    /// recomputation.
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Names continuing the query when there is no unique completion, at
    /// most a handful.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Number of result recomputations so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn selection(&self) -> Option<Selection> {
        let anchor = self.anchor?;
        let selection = Selection {
            start: anchor.min(self.cursor),
            end: anchor.max(self.cursor),
        };
        (!selection.is_empty()).then_some(selection)
    }

    /// Back to an empty query, as when the search surface is (re)opened.
    pub fn reset(&mut self, source: &dyn CandidateSource) -> &ResultList {
        self.query.clear();
        self.cursor = 0;
        self.anchor = None;
        self.state = SearchState::Idle;
        self.recompute(source);
        &self.results
    }

    /// Re-runs the current query against a new snapshot without editing it.
    pub fn refresh(&mut self, source: &dyn CandidateSource) -> &ResultList {
        self.recompute(source);
        &self.results
    }

    /// The input widget reports its whole new text.
    pub fn on_text_changed(&mut self, text: &str, source: &dyn CandidateSource) -> &ResultList {
        self.query.clear();
        self.query.push_str(text);
        self.cursor = self.len();
        self.anchor = None;
        self.settle_after_edit();
        self.recompute(source);
        &self.results
    }

    pub fn on_select_all(&mut self) -> Result<(), SearchError> {
        self.check()?;
        if self.query.is_empty() {
            return Ok(());
        }
        self.anchor = Some(0);
        self.cursor = self.len();
        self.state = SearchState::Selected;
        Ok(())
    }

    /// Appends the unique completion of the query, if there is one.
    /// Returns whether the query changed.
    pub fn on_complete(&mut self, source: &dyn CandidateSource) -> Result<bool, SearchError> {
        self.check()?;
        if self.state == SearchState::Idle {
            return Ok(false);
        }
        let Some(extension) = autocomplete::resolve(&self.query, source.get_candidates()) else {
            return Ok(false);
        };

        let kept = self.query.trim_end().len();
        self.query.truncate(kept);
        self.query.push_str(&extension);
        self.cursor = self.len();
        self.anchor = None;
        self.state = SearchState::Editing;
        self.recompute(source);
        Ok(true)
    }

    pub fn insert_char(&mut self, ch: char, source: &dyn CandidateSource) {
        self.delete_selection();
        let at = byte_offset(&self.query, self.cursor);
        self.query.insert(at, ch);
        self.cursor += 1;
        self.settle_after_edit();
        self.recompute(source);
    }

    pub fn delete_backward(&mut self, source: &dyn CandidateSource) -> bool {
        if !self.delete_selection() {
            if self.cursor == 0 {
                return false;
            }
            let at = byte_offset(&self.query, self.cursor - 1);
            self.query.remove(at);
            self.cursor -= 1;
        }
        self.settle_after_edit();
        self.recompute(source);
        true
    }

    pub fn delete_forward(&mut self, source: &dyn CandidateSource) -> bool {
        if !self.delete_selection() {
            if self.cursor >= self.len() {
                return false;
            }
            let at = byte_offset(&self.query, self.cursor);
            self.query.remove(at);
        }
        self.settle_after_edit();
        self.recompute(source);
        true
    }

    pub fn delete_word_backward(&mut self, source: &dyn CandidateSource) -> bool {
        if !self.delete_selection() {
            let start = self.word_left_of(self.cursor);
            if start == self.cursor {
                return false;
            }
            self.remove_chars(start, self.cursor);
            self.cursor = start;
        }
        self.settle_after_edit();
        self.recompute(source);
        true
    }

    pub fn clear(&mut self, source: &dyn CandidateSource) -> bool {
        if self.query.is_empty() {
            return false;
        }
        self.reset(source);
        true
    }

    pub fn move_left(&mut self, extend: bool) {
        self.move_to(self.cursor.saturating_sub(1), extend);
    }

    pub fn move_right(&mut self, extend: bool) {
        self.move_to((self.cursor + 1).min(self.len()), extend);
    }

    pub fn move_word_left(&mut self, extend: bool) {
        self.move_to(self.word_left_of(self.cursor), extend);
    }

    pub fn move_word_right(&mut self, extend: bool) {
        self.move_to(self.word_right_of(self.cursor), extend);
    }

    pub fn move_home(&mut self, extend: bool) {
        self.move_to(0, extend);
    }

    pub fn move_end(&mut self, extend: bool) {
        self.move_to(self.len(), extend);
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        source: &dyn CandidateSource,
    ) -> Result<KeyResult, SearchError> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            KeyCode::Char(ch) if ctrl => match ch.to_ascii_lowercase() {
                'a' => self.on_select_all()?,
                'w' => {
                    self.delete_word_backward(source);
                }
                'u' => {
                    self.clear(source);
                }
                _ => return Ok(KeyResult::NotHandled),
            },
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::ALT) => {
                return Ok(KeyResult::NotHandled);
            }
            KeyCode::Char(ch) => self.insert_char(ch, source),
            KeyCode::Backspace if ctrl => {
                self.delete_word_backward(source);
            }
            KeyCode::Backspace => {
                self.delete_backward(source);
            }
            KeyCode::Delete => {
                self.delete_forward(source);
            }
            KeyCode::Left if ctrl => self.move_word_left(shift),
            KeyCode::Left => self.move_left(shift),
            KeyCode::Right if ctrl => self.move_word_right(shift),
            KeyCode::Right => self.move_right(shift),
            KeyCode::Home => self.move_home(shift),
            KeyCode::End => self.move_end(shift),
            KeyCode::Tab => {
                self.on_complete(source)?;
            }
            _ => return Ok(KeyResult::NotHandled),
        }
        Ok(KeyResult::Handled)
    }

    fn len(&self) -> usize {
        self.query.chars().count()
    }

    fn check(&self) -> Result<(), SearchError> {
        let len = self.len();
        for offset in std::iter::once(self.cursor).chain(self.anchor) {
            if offset > len {
                return Err(SearchError::InvalidQueryState { offset, len });
            }
        }
        Ok(())
    }

    fn recompute(&mut self, source: &dyn CandidateSource) {
        let candidates = source.get_candidates();
        self.results = find_matches(&self.query, candidates, self.limit);
        self.hint = autocomplete::resolve(&self.query, candidates);
        self.suggestions = if self.hint.is_some() {
            Vec::new()
        } else {
            autocomplete::suggestions(&self.query, candidates, SUGGESTION_LIMIT)
                .into_iter()
                .map(str::to_string)
                .collect()
        };
        self.revision += 1;
        tracing::debug!(
            query = %self.query,
            results = self.results.len(),
            candidates = candidates.len(),
            "search results recomputed"
        );
    }

    fn settle_after_edit(&mut self) {
        self.anchor = None;
        self.state = if self.query.is_empty() {
            SearchState::Idle
        } else {
            SearchState::Editing
        };
    }

    fn move_to(&mut self, pos: usize, extend: bool) {
        if extend {
            self.anchor.get_or_insert(self.cursor);
        } else {
            self.anchor = None;
        }
        self.cursor = pos;
        if self.state == SearchState::Selected {
            self.state = SearchState::Editing;
        }
    }

    /// Removes the selected range, if any. Returns whether anything was
    /// removed.
    fn delete_selection(&mut self) -> bool {
        let Some(selection) = self.selection() else {
            self.anchor = None;
            return false;
        };
        self.remove_chars(selection.start, selection.end);
        self.cursor = selection.start;
        self.anchor = None;
        true
    }

    fn remove_chars(&mut self, start: usize, end: usize) {
        let from = byte_offset(&self.query, start);
        let to = byte_offset(&self.query, end);
        self.query.replace_range(from..to, "");
    }

    fn is_separator(ch: char) -> bool {
        ch.is_whitespace() || matches!(ch, '.' | '/' | ',' | '-' | '_' | ':')
    }

    fn word_left_of(&self, from: usize) -> usize {
        let chars: Vec<char> = self.query.chars().collect();
        let mut pos = from.min(chars.len());
        while pos > 0 && Self::is_separator(chars[pos - 1]) {
            pos -= 1;
        }
        while pos > 0 && !Self::is_separator(chars[pos - 1]) {
            pos -= 1;
        }
        pos
    }

    fn word_right_of(&self, from: usize) -> usize {
        let chars: Vec<char> = self.query.chars().collect();
        let mut pos = from.min(chars.len());
        while pos < chars.len() && Self::is_separator(chars[pos]) {
            pos += 1;
        }
        while pos < chars.len() && !Self::is_separator(chars[pos]) {
            pos += 1;
        }
        pos
    }
}

fn byte_offset(text: &str, char_pos: usize) -> usize {
    text.char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::{SearchInput, SearchState, Selection};
    use crate::core::candidate::{Candidate, candidates_from_names};
    use crate::core::error::SearchError;
    use crate::input::KeyResult;

const SUGGESTION_LIMIT: usize = 5;
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};

    fn films() -> Vec<Candidate> {
        candidates_from_names(["Inception", "Insomnia", "Interstellar", "Heat"])
    }

    fn typed(text: &str, source: &Vec<Candidate>) -> SearchInput {
        let mut input = SearchInput::new();
        input.reset(source);
        for ch in text.chars() {
            input.insert_char(ch, source);
        }
        input
    }

    #[test]
    fn starts_idle_and_lists_everything_after_reset() {
        let source = films();
        let mut input = SearchInput::new();
        assert_eq!(input.state(), SearchState::Idle);
        input.reset(&source);
        assert_eq!(input.results().len(), 4);
        assert_eq!(input.revision(), 1);
    }

    #[test]
    fn typing_enters_editing_and_filters() {
        let source = films();
        let input = typed("ins", &source);
        assert_eq!(input.state(), SearchState::Editing);
        assert_eq!(input.query(), "ins");
        assert_eq!(input.cursor(), 3);
        assert_eq!(input.results().names(), vec!["Insomnia"]);
    }

    #[test]
    fn every_edit_recomputes_once() {
        let source = films();
        let mut input = typed("he", &source);
        assert_eq!(input.revision(), 3);

        input.move_left(false);
        assert_eq!(input.revision(), 3);

        input.delete_backward(&source);
        assert_eq!(input.query(), "e");
        assert_eq!(input.revision(), 4);

        input.move_home(false);
        assert!(!input.delete_backward(&source));
        assert_eq!(input.revision(), 4);
    }

    #[test]
    fn select_all_then_type_replaces_query() {
        let source = films();
        let mut input = typed("Heat", &source);
        input.on_select_all().unwrap();
        assert_eq!(input.state(), SearchState::Selected);
        assert_eq!(input.selection(), Some(Selection { start: 0, end: 4 }));

        input.insert_char('x', &source);
        assert_eq!(input.query(), "x");
        assert_eq!(input.state(), SearchState::Editing);
        assert_eq!(input.selection(), None);
    }

    #[test]
    fn select_all_then_backspace_clears_to_idle() {
        let source = films();
        let mut input = typed("Heat", &source);
        input.on_select_all().unwrap();
        assert!(input.delete_backward(&source));
        assert_eq!(input.query(), "");
        assert_eq!(input.state(), SearchState::Idle);
        assert_eq!(input.results().len(), 4);
    }

    #[test]
    fn select_all_on_empty_query_stays_idle() {
        let mut input = SearchInput::new();
        input.on_select_all().unwrap();
        assert_eq!(input.state(), SearchState::Idle);
        assert_eq!(input.selection(), None);
    }

    #[test]
    fn text_changed_from_selected_replaces_query() {
        let source = films();
        let mut input = typed("Heat", &source);
        input.on_select_all().unwrap();
        input.on_text_changed("inter", &source);
        assert_eq!(input.query(), "inter");
        assert_eq!(input.state(), SearchState::Editing);
        assert_eq!(input.results().names(), vec!["Interstellar"]);
    }

    #[test]
    fn emptying_text_returns_to_idle() {
        let source = films();
        let mut input = typed("Heat", &source);
        input.on_text_changed("", &source);
        assert_eq!(input.state(), SearchState::Idle);
        assert_eq!(input.cursor(), 0);
        assert_eq!(input.results().len(), 4);
    }

    #[test]
    fn empty_text_from_selected_returns_to_idle() {
        let source = films();
        let mut input = typed("Heat", &source);
        input.on_select_all().unwrap();
        let before = input.revision();

        input.on_text_changed("", &source);
        assert_eq!(input.state(), SearchState::Idle);
        assert_eq!(input.selection(), None);
        assert_eq!(input.query(), "");
        assert_eq!(input.revision(), before + 1);
    }

    #[test]
    fn text_changed_in_idle_with_empty_text_stays_idle() {
        let source = films();
        let mut input = SearchInput::new();
        input.reset(&source);
        input.on_text_changed("", &source);
        assert_eq!(input.state(), SearchState::Idle);
        assert_eq!(input.results().len(), 4);
    }

    #[test]
    fn tab_inside_expanded_fold_keeps_results() {
        let source = candidates_from_names(["İstanbul", "Heat"]);
        let mut input = typed("i", &source);
        assert_eq!(input.results().names(), vec!["İstanbul"]);
        assert_eq!(input.hint(), None);

        assert_eq!(input.on_complete(&source), Ok(false));
        assert_eq!(input.query(), "i");
        assert_eq!(input.results().names(), vec!["İstanbul"]);
    }

    #[test]
    fn suggestions_only_when_completion_is_ambiguous() {
        let source = films();
        let input = typed("In", &source);
        assert_eq!(input.suggestions(), ["Inception", "Insomnia", "Interstellar"]);

        let input = typed("Insom", &source);
        assert!(input.suggestions().is_empty());
        assert_eq!(input.hint(), Some("nia"));
    }

    #[test]
    fn completion_appends_unique_extension() {
        let source = films();
        let mut input = typed("Insom", &source);
        assert_eq!(input.hint(), Some("nia"));
        let before = input.revision();

        assert_eq!(input.on_complete(&source), Ok(true));
        assert_eq!(input.query(), "Insomnia");
        assert_eq!(input.cursor(), 8);
        assert_eq!(input.state(), SearchState::Editing);
        assert_eq!(input.revision(), before + 1);
    }

    #[test]
    fn ambiguous_completion_changes_nothing() {
        let source = films();
        let mut input = typed("In", &source);
        let before = input.revision();
        assert_eq!(input.on_complete(&source), Ok(false));
        assert_eq!(input.query(), "In");
        assert_eq!(input.state(), SearchState::Editing);
        assert_eq!(input.revision(), before);
    }

    #[test]
    fn completion_from_selected_returns_to_editing() {
        let source = films();
        let mut input = typed("hea", &source);
        input.on_select_all().unwrap();
        assert_eq!(input.on_complete(&source), Ok(true));
        assert_eq!(input.query(), "heat");
        assert_eq!(input.state(), SearchState::Editing);
        assert_eq!(input.selection(), None);
    }

    #[test]
    fn completion_replaces_trailing_whitespace() {
        let source = films();
        let mut input = typed("Insom ", &source);
        assert_eq!(input.on_complete(&source), Ok(true));
        assert_eq!(input.query(), "Insomnia");
    }

    #[test]
    fn completion_in_idle_is_noop() {
        let source = films();
        let mut input = SearchInput::new();
        input.reset(&source);
        assert_eq!(input.on_complete(&source), Ok(false));
        assert_eq!(input.state(), SearchState::Idle);
    }

    #[test]
    fn next_edit_reads_latest_snapshot() {
        let mut source = films();
        let mut input = typed("h", &source);
        assert_eq!(input.results().names(), vec!["Heat"]);

        source.push(Candidate::named("Hereditary"));
        input.insert_char('e', &source);
        assert_eq!(input.results().names(), vec!["Heat", "Hereditary"]);
    }

    #[test]
    fn typing_over_partial_selection() {
        let source = films();
        let mut input = typed("Heat", &source);
        input.move_left(true);
        input.move_left(true);
        assert_eq!(input.selection(), Some(Selection { start: 2, end: 4 }));
        assert_eq!(input.state(), SearchState::Editing);

        input.insert_char('l', &source);
        assert_eq!(input.query(), "Hel");
    }

    #[test]
    fn multibyte_editing_uses_char_offsets() {
        let source = films();
        let mut input = typed("Amélie", &source);
        input.move_left(false);
        input.move_left(false);
        input.move_left(false);
        input.delete_backward(&source);
        assert_eq!(input.query(), "Amlie");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn word_deletion_and_clear() {
        let source = films();
        let mut input = typed("the dark knight", &source);
        assert!(input.delete_word_backward(&source));
        assert_eq!(input.query(), "the dark ");
        assert!(input.clear(&source));
        assert_eq!(input.query(), "");
        assert_eq!(input.state(), SearchState::Idle);
        assert!(!input.clear(&source));
    }

    #[test]
    fn keys_drive_the_controller() {
        let source = films();
        let mut input = SearchInput::new();
        input.reset(&source);

        for ch in "hea".chars() {
            let key = KeyEvent::plain(KeyCode::Char(ch));
            assert_eq!(input.handle_key(key, &source), Ok(KeyResult::Handled));
        }
        input
            .handle_key(KeyEvent::plain(KeyCode::Tab), &source)
            .unwrap();
        assert_eq!(input.query(), "heat");

        input.handle_key(KeyEvent::ctrl('a'), &source).unwrap();
        assert_eq!(input.state(), SearchState::Selected);

        let upper = KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT);
        input.handle_key(upper, &source).unwrap();
        assert_eq!(input.query(), "X");

        assert_eq!(
            input.handle_key(KeyEvent::plain(KeyCode::Enter), &source),
            Ok(KeyResult::NotHandled)
        );
        assert_eq!(
            input.handle_key(KeyEvent::ctrl('r'), &source),
            Ok(KeyResult::NotHandled)
        );
    }

    #[test]
    fn corrupt_cursor_fails_fast() {
        let mut input = SearchInput::new();
        input.cursor = 5;
        assert_eq!(
            input.on_select_all(),
            Err(SearchError::InvalidQueryState { offset: 5, len: 0 })
        );
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(SearchInput::new().with_limit(500).limit(), 99);
        assert_eq!(SearchInput::new().with_limit(0).limit(), 1);
    }
}
