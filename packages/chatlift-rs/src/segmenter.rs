//! Walks reading-ordered tokens and cuts them into messages at each confirmed timestamp.
//!
//! Every token goes through the same decision order:
//!
//! 1. header region (status bar, contact name) is skipped
//! 2. a date bubble replaces the running date
//! 3. a time closes the pending message, or joins it when more text follows on its line
//! 4. the composer placeholder is skipped
//! 5. anything else is message text
//!
//! Nothing here fails: a token no recognizer claims simply becomes text.
use chatlift_ocr::{Detection, ImageDimensions};
use tracing::{debug, trace};

use crate::config::ParserConfig;
use crate::cursor::TokenCursor;
use crate::date_matcher::match_date;
use crate::message_row::MessageRow;
use crate::patterns::Patterns;
use crate::sender::{classify_sender, Sender};
use crate::sequencer::sort_reading_order;
use crate::time_matcher::{classify_time, match_time, TimeRole};

/// Running context for a single screenshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParserState {
    pub current_date: String,
    /// Last confirmed timestamp.
    pub current_time: Option<String>,
    pub current_sender: Option<Sender>,
    /// Text read since the last confirmed timestamp.
    pub pending: Vec<String>,
}

impl ParserState {
    /// Joins and clears the pending text, if there is any.
    fn take_message(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.pending).join(" "))
    }
}

/// What a single transition did with the token(s) under the cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    SkippedHeader,
    Date,
    /// Carries the message the timestamp closed, if text had accumulated.
    Timestamp(Option<MessageRow>),
    InlineTime,
    SkippedComposer,
    Text,
}

#[derive(Debug, Clone)]
pub struct ChatParser<'p> {
    config: ParserConfig,
    patterns: &'p Patterns,
}

impl ChatParser<'static> {
    pub fn new(config: ParserConfig) -> Self {
        Self::with_patterns(config, Patterns::get())
    }
}

impl Default for ChatParser<'static> {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl<'p> ChatParser<'p> {
    pub fn with_patterns(mut config: ParserConfig, patterns: &'p Patterns) -> Self {
        config.composer_placeholder = config.composer_placeholder.to_lowercase();
        Self { config, patterns }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Reconstructs the messages of one screenshot, in the order their closing event is read.
    pub fn parse(
        &self,
        detections: &[Detection],
        source: &str,
        dimensions: ImageDimensions,
    ) -> Vec<MessageRow> {
        let ordered = sort_reading_order(detections);
        let mut cursor = TokenCursor::new(&ordered);
        let mut state = ParserState::default();
        let mut rows = Vec::new();

        while let Some(step) = self.step(&mut state, &mut cursor, source, dimensions) {
            if let Step::Timestamp(Some(row)) = step {
                rows.push(row);
            }
        }
        rows.extend(self.finish(&mut state, source));

        debug!(
            source,
            detections = detections.len(),
            rows = rows.len(),
            "reconstructed screenshot"
        );
        rows
    }

    /// Runs one transition at the cursor. Returns `None` once the cursor is exhausted.
    pub fn step(
        &self,
        state: &mut ParserState,
        cursor: &mut TokenCursor<'_>,
        source: &str,
        dimensions: ImageDimensions,
    ) -> Option<Step> {
        if cursor.at_end() {
            return None;
        }
        if self.skip_header(cursor, dimensions) {
            return Some(Step::SkippedHeader);
        }
        if self.read_date(state, cursor) {
            return Some(Step::Date);
        }
        if let Some(step) = self.read_time(state, cursor, source, dimensions) {
            return Some(step);
        }
        if self.skip_composer(cursor) {
            return Some(Step::SkippedComposer);
        }
        take_text(state, cursor);
        Some(Step::Text)
    }

    /// Flushes whatever text is still pending once the stream ends.
    pub fn finish(&self, state: &mut ParserState, source: &str) -> Option<MessageRow> {
        let message = state.take_message()?;
        let time = if self.config.stamp_trailing_message {
            state.current_time.clone().unwrap_or_default()
        } else {
            String::new()
        };
        Some(MessageRow {
            date: state.current_date.clone(),
            time,
            sender: state.current_sender.unwrap_or(Sender::Incoming),
            message,
            source: source.to_string(),
        })
    }

    fn skip_header(&self, cursor: &mut TokenCursor<'_>, dimensions: ImageDimensions) -> bool {
        let cutoff = dimensions.height * self.config.header_cutoff_ratio;
        match cursor.peek(0) {
            Some(token) if token.quad().center().y < cutoff => {
                trace!(text = %token.text, "skipping header token");
                cursor.advance(1);
                true
            }
            _ => false,
        }
    }

    fn read_date(&self, state: &mut ParserState, cursor: &mut TokenCursor<'_>) -> bool {
        match match_date(cursor, self.patterns, self.config.line_tolerance) {
            Some(date) => {
                debug!(date = %date.text, "date bubble");
                state.current_date = date.text;
                cursor.advance(date.consumed);
                true
            }
            None => false,
        }
    }

    fn read_time(
        &self,
        state: &mut ParserState,
        cursor: &mut TokenCursor<'_>,
        source: &str,
        dimensions: ImageDimensions,
    ) -> Option<Step> {
        let time = match_time(cursor, self.patterns, self.config.line_tolerance)?;

        let step = match classify_time(cursor, &time, self.config.line_tolerance) {
            TimeRole::Inline => {
                trace!(text = %time.raw, "time-shaped text inside a message");
                state.pending.push(time.raw);
                Step::InlineTime
            }
            TimeRole::Timestamp => {
                let sender =
                    classify_sender(time.quad, dimensions.width, self.config.outgoing_side_ratio);
                debug!(time = %time.text, %sender, "timestamp");
                state.current_sender = Some(sender);
                let row = state.take_message().map(|message| MessageRow {
                    date: state.current_date.clone(),
                    time: time.text.clone(),
                    sender,
                    message,
                    source: source.to_string(),
                });
                state.current_time = Some(time.text);
                Step::Timestamp(row)
            }
        };
        cursor.advance(time.consumed);
        Some(step)
    }

    fn skip_composer(&self, cursor: &mut TokenCursor<'_>) -> bool {
        let is_placeholder = cursor
            .peek(0)
            .map(|t| t.text.to_lowercase().starts_with(&self.config.composer_placeholder))
            .unwrap_or(false);
        if is_placeholder {
            cursor.advance(1);
        }
        is_placeholder
    }
}

/// Appends the current token to the pending message. Blank detections add nothing.
fn take_text(state: &mut ParserState, cursor: &mut TokenCursor<'_>) {
    if let Some(token) = cursor.peek(0) {
        if !token.text.is_empty() {
            state.pending.push(token.text.clone());
        }
    }
    cursor.advance(1);
}

/// Reconstructs one screenshot with the default thresholds.
pub fn messages_from_ocr(
    detections: &[Detection],
    source: &str,
    dimensions: ImageDimensions,
) -> Vec<MessageRow> {
    ChatParser::default().parse(detections, source, dimensions)
}
