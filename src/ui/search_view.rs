use unicode_width::UnicodeWidthStr;

use crate::core::search::{HighlightRange, MatchResult, ResultList};
use crate::input::SearchInput;
use crate::terminal::TerminalSize;
use crate::ui::frame::{CursorPos, RenderFrame};
use crate::ui::span::{Span, SpanLine, truncate_line};
use crate::ui::style::{Color, Style};

const PROMPT: &str = "Search: ";
const MARKER: &str = "> ";

/// Everything the search screen shows for one paint.
pub struct SearchView<'a> {
    pub title: &'a str,
    /// Folder being browsed below the library root, if any.
    pub location: Option<&'a str>,
    pub input: &'a SearchInput,
    /// Rows to list; the search results at the library root.
    pub results: &'a ResultList,
    /// Size of the candidate snapshot the results were drawn from, `None`
    /// when listing the contents of a folder.
    pub total: Option<usize>,
    /// Highlighted row within the result list.
    pub selected: usize,
    pub notice: Option<&'a str>,
}

impl SearchView<'_> {
    pub fn render(&self, size: TerminalSize) -> RenderFrame {
        let width = usize::from(size.width);
        let mut frame = RenderFrame::new();

        let mut header = vec![
            Span::styled("Movie Wolp", Style::new().color(Color::Cyan).bold()),
            Span::styled(format!("  {}", self.title), Style::new().color(Color::Cyan)),
        ];
        if let Some(location) = self.location {
            header.push(Span::styled(format!(" / {location}"), Style::new().bold()));
        }
        frame.push(header);

        let input_row = frame.row();
        frame.push(self.query_line());
        let cursor_col = PROMPT.width() + self.query_width_before_cursor();
        frame.cursor = Some(CursorPos {
            col: u16::try_from(cursor_col).unwrap_or(u16::MAX),
            row: input_row,
        });

        if let Some(line) = self.suggestion_line() {
            frame.push(line);
        }

        let results = self.results;
        let count = match self.total {
            Some(total) => format!("{} of {} folders", results.len(), total),
            None => format!("{} entries", results.len()),
        };
        frame.push(vec![Span::styled(count, Style::new().color(Color::DarkGrey))]);
        frame.push(Vec::new());

        let chrome_rows = frame.lines.len() + usize::from(self.notice.is_some());
        let visible = usize::from(size.height)
            .saturating_sub(chrome_rows)
            .max(1);
        let offset = scroll_offset(self.selected, visible);

        for (row, item) in results.iter().enumerate().skip(offset).take(visible) {
            frame.push(result_line(item, row == self.selected));
        }

        if let Some(notice) = self.notice {
            frame.push(vec![Span::styled(
                notice.to_string(),
                Style::new().color(Color::Red),
            )]);
        }

        frame.lines = frame
            .lines
            .into_iter()
            .map(|line| truncate_line(line, width))
            .collect();
        frame
    }

    fn query_line(&self) -> SpanLine {
        let mut line = vec![Span::styled(PROMPT, Style::new().bold())];
        let query = self.input.query();

        match self.input.selection() {
            Some(selection) => {
                let chars: Vec<char> = query.chars().collect();
                let before: String = chars[..selection.start].iter().collect();
                let inside: String = chars[selection.start..selection.end].iter().collect();
                let after: String = chars[selection.end..].iter().collect();
                line.push(Span::new(before));
                line.push(Span::styled(inside, Style::new().reverse()));
                line.push(Span::new(after));
            }
            None => line.push(Span::new(query)),
        }

        // Tab drops trailing whitespace before completing, so a hint drawn
        // after it would not show what Tab produces.
        let at_end = self.input.cursor() == query.chars().count();
        let shows_hint = at_end && !query.ends_with(char::is_whitespace);
        if let Some(hint) = self.input.hint().filter(|_| shows_hint) {
            line.push(Span::styled(hint, Style::new().dim()));
        }
        line.retain(|span| !span.text.is_empty());
        line
    }

    fn suggestion_line(&self) -> Option<SpanLine> {
        let suggestions = self.input.suggestions();
        if self.input.hint().is_some() || suggestions.is_empty() {
            return None;
        }
        Some(vec![Span::styled(
            format!("  {}", suggestions.join("  ")),
            Style::new().dim(),
        )])
    }

    fn query_width_before_cursor(&self) -> usize {
        let before: String = self
            .input
            .query()
            .chars()
            .take(self.input.cursor())
            .collect();
        before.width()
    }
}

fn scroll_offset(selected: usize, visible: usize) -> usize {
    (selected + 1).saturating_sub(visible)
}

fn result_line(item: &MatchResult, selected: bool) -> SpanLine {
    let (base, emphasis) = if selected {
        (
            Style::new().color(Color::White).bold(),
            Style::new().color(Color::Yellow).bold(),
        )
    } else {
        (Style::new(), Style::new().color(Color::Yellow).bold())
    };

    let marker = if selected { MARKER } else { "  " };
    let mut line = vec![Span::styled(marker, base)];
    line.extend(highlight_spans(
        item.candidate.name(),
        &item.ranges,
        base,
        emphasis,
    ));
    line
}

/// Splits `text` into spans, styling characters inside `ranges` with
/// `emphasis` and everything else with `base`.
pub fn highlight_spans(
    text: &str,
    ranges: &[HighlightRange],
    base: Style,
    emphasis: Style,
) -> SpanLine {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    let mut pos = 0;

    for range in ranges {
        let start = range.start.min(chars.len()).max(pos);
        let end = range.end().min(chars.len());
        if start >= end {
            continue;
        }
        if pos < start {
            spans.push(Span::styled(chars[pos..start].iter().collect::<String>(), base));
        }
        spans.push(Span::styled(
            chars[start..end].iter().collect::<String>(),
            emphasis,
        ));
        pos = end;
    }
    if pos < chars.len() {
        spans.push(Span::styled(chars[pos..].iter().collect::<String>(), base));
    }
    spans
}
