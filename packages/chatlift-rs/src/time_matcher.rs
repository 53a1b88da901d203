//! Clock times, and whether a time-shaped token is a timestamp or part of the message.
use chatlift_ocr::Quad;

use crate::cursor::TokenCursor;
use crate::geometry::{below, same_line};
use crate::patterns::Patterns;

#[derive(Debug, Clone, PartialEq)]
pub struct TimeMatch<'a> {
    /// Normalized time, `"H:MM"` or `"H:MM AM"`.
    pub text: String,
    /// The consumed tokens as they were read, for when the time turns out to be message text.
    pub raw: String,
    pub consumed: usize,
    /// Box of the first consumed token.
    pub quad: &'a Quad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRole {
    /// Closes the message above it.
    Timestamp,
    /// More text follows on the same line, so it belongs to the message.
    Inline,
}

/// Tries to read a time at the cursor, pulling in a separate `AM`/`PM` token from the same line.
pub fn match_time<'a>(
    cursor: &TokenCursor<'a>,
    patterns: &Patterns,
    line_tolerance: f32,
) -> Option<TimeMatch<'a>> {
    let first = cursor.peek(0)?;
    let compact = first.text.replace(' ', "").replace('.', ":");

    if patterns.time_full.is_match(&compact) {
        return Some(TimeMatch {
            text: patterns.normalize_time(&compact),
            raw: cursor.joined_text(1),
            consumed: 1,
            quad: first.quad(),
        });
    }

    if !patterns.time_core.is_match(&compact) {
        return None;
    }
    let core = patterns.normalize_time(&compact);

    if let Some(next) = cursor.peek(1) {
        if patterns.meridiem.is_match(&next.text)
            && same_line(first.quad(), next.quad(), line_tolerance)
        {
            return Some(TimeMatch {
                text: format!("{} {}", core, next.text.to_uppercase()),
                raw: cursor.joined_text(2),
                consumed: 2,
                quad: first.quad(),
            });
        }
    }

    Some(TimeMatch {
        text: core,
        raw: cursor.joined_text(1),
        consumed: 1,
        quad: first.quad(),
    })
}

/// A time is a timestamp unless the token after it continues the same line.
/// The last token of the stream has nothing after it and counts as a timestamp.
pub fn classify_time(cursor: &TokenCursor<'_>, time: &TimeMatch<'_>, line_tolerance: f32) -> TimeRole {
    match cursor.peek(time.consumed) {
        Some(next) if !below(time.quad, next.quad(), line_tolerance) => TimeRole::Inline,
        _ => TimeRole::Timestamp,
    }
}
