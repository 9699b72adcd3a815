// src/wrap.rs

//! Line splitting and centering for natural-language content.
//!
//! `wrap_line` splits an over-long line exactly once: at the first `", "` if
//! there is one, otherwise at the first space at or after the midpoint. A line
//! that still cannot be split is an error; content is never cut mid-word and
//! never split three ways.

use crate::glyph::UNSET;
use crate::layout::LayoutError;
use log::debug;

/// Splits `text` on line breaks, trims each line, and drops empty lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits a single line into one or two trimmed segments.
///
/// Lines of at most `width` characters come back unchanged. Longer lines are split
/// once; the segments are not re-checked against `width`, callers bound them.
///
/// # Errors
/// `LayoutError::Unsplittable` if the line has neither `", "` nor a space at or
/// after its midpoint.
pub fn wrap_line(line: &str, width: usize) -> Result<Vec<String>, LayoutError> {
    let line = line.trim();
    let len = line.chars().count();
    if len <= width {
        return Ok(vec![line.to_string()]);
    }

    let (left, right) = match line.find(", ") {
        // The comma stays on the left segment.
        Some(idx) => line.split_at(idx + 1),
        None => {
            let mid = byte_offset(line, len / 2);
            match line[mid..].find(' ') {
                Some(idx) => line.split_at(mid + idx),
                None => {
                    return Err(LayoutError::Unsplittable {
                        line: line.to_string(),
                        width,
                    })
                }
            }
        }
    };

    let segments = vec![left.trim().to_string(), right.trim().to_string()];
    debug!("wrap_line: {:?} -> {:?}", line, segments);
    Ok(segments)
}

/// Left-pads `line` with `UNSET` so it sits centered in `width` columns.
///
/// The padding is `floor((width - len) / 2)`; nothing is added on the right.
pub fn center(line: &str, width: usize) -> String {
    let len = line.chars().count();
    let pad = width.saturating_sub(len) / 2;
    let mut out = String::with_capacity(line.len() + pad * UNSET.len_utf8());
    out.extend(std::iter::repeat(UNSET).take(pad));
    out.push_str(line);
    out
}

/// Greedy word wrap: fills each line with as many whitespace-separated words as fit
/// in `width`. A single word longer than `width` gets a line of its own.
pub fn word_wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Byte offset of the `n`th character.
fn byte_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(idx, _)| idx)
}
