//! Row layout for the draft question.
//!
//! Each hard line is split into words with `textwrap` and packed first-fit.
//! Rows are byte ranges of the buffer that keep the spaces after their last
//! word, so every byte lands on exactly one row and the cursor maps back to
//! a row and column.

use textwrap::WordSeparator;
use textwrap::core::{Word, break_words};
use textwrap::wrap_algorithms::wrap_first_fit;
use unicode_width::UnicodeWidthChar;

/// Border (2) + scrollbar and cursor slack (2) consumed horizontally
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from area edge to content (border width)
pub(super) const BORDER_OFFSET: u16 = 1;

/// One visual row: a byte range of the buffer, never containing `\n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Row {
    pub start: usize,
    pub end: usize,
}

/// Inner content width after subtracting border overhead. 0 if too narrow.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Split `text` into rows at most `width` columns wide. Always returns at least one row.
///
/// Words longer than `width` are broken apart. Spaces after the last word of
/// a row hang past the edge, the way a word wrapper drops them.
pub(super) fn wrap_rows(text: &str, width: u16) -> Vec<Row> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    let mut line_start = 0;

    for line in text.split('\n') {
        let words = break_words(WordSeparator::AsciiSpace.find_words(line), width);
        if words.is_empty() {
            rows.push(Row {
                start: line_start,
                end: line_start,
            });
        }

        let mut start = line_start;
        for fragments in wrap_first_fit(&words, &[width as f64]) {
            let end = start + fragments.iter().map(word_len).sum::<usize>();
            rows.push(Row { start, end });
            start = end;
        }
        line_start += line.len() + 1;
    }

    rows
}

/// Bytes of the buffer a word covers, trailing spaces included.
fn word_len(word: &Word<'_>) -> usize {
    word.word.len() + word.whitespace.len()
}

/// Row index and display column of byte offset `pos`, with the column capped at `width`.
///
/// At a soft wrap the cursor belongs to the start of the following row.
pub(super) fn cursor_row_col(text: &str, rows: &[Row], pos: usize, width: u16) -> (usize, u16) {
    let row = rows
        .iter()
        .rposition(|r| r.start <= pos)
        .unwrap_or(0);
    let start = rows.get(row).map_or(0, |r| r.start);
    let col: usize = text[start..pos].chars().map(char_width).sum();
    (row, u16::try_from(col).unwrap_or(u16::MAX).min(width.max(1)))
}

/// Where the cursor lands after moving one row up (`-1`) or down (`1`),
/// keeping its column where the target row allows. `None` at the first or last row.
pub(super) fn move_vertically(text: &str, pos: usize, width: u16, direction: i8) -> Option<usize> {
    let rows = wrap_rows(text, width);
    let (row, col) = cursor_row_col(text, &rows, pos, width);

    let target = if direction < 0 {
        row.checked_sub(1)?
    } else {
        let next = row + 1;
        (next < rows.len()).then_some(next)?
    };
    let target = rows[target];

    // A soft-wrapped row's end offset is displayed on the next row
    let soft_wrapped = target.end < text.len() && text.as_bytes()[target.end] != b'\n';
    let mut limit = target.end;
    if soft_wrapped {
        limit = prev_char_boundary(text, target.end);
    }

    let mut used = 0usize;
    let mut new_pos = target.start;
    for (offset, c) in text[target.start..limit].char_indices() {
        let w = char_width(c);
        if used + w > usize::from(col) {
            break;
        }
        used += w;
        new_pos = target.start + offset + c.len_utf8();
    }
    Some(new_pos.min(limit))
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
