//! Cursor over reading-ordered tokens, with bounded lookahead.
use chatlift_ocr::{Detection, Quad};

/// Collapses whitespace runs to single spaces and trims both ends.
pub fn normalize_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A detection paired with its whitespace-normalized text.
#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub detection: &'a Detection,
    pub text: String,
}

impl<'a> Token<'a> {
    pub fn new(detection: &'a Detection) -> Self {
        Self {
            detection,
            text: normalize_spaces(&detection.text),
        }
    }

    pub fn quad(&self) -> &'a Quad {
        &self.detection.quad
    }
}

#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: Vec<Token<'a>>,
    position: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(ordered: &[&'a Detection]) -> Self {
        Self {
            tokens: ordered.iter().map(|&d| Token::new(d)).collect(),
            position: 0,
        }
    }

    /// Token `offset` places after the cursor; `peek(0)` is the current token.
    pub fn peek(&self, offset: usize) -> Option<&Token<'a>> {
        self.tokens.get(self.position + offset)
    }

    pub fn advance(&mut self, n: usize) {
        self.position = (self.position + n).min(self.tokens.len());
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Texts of the next `count` tokens joined by single spaces.
    pub fn joined_text(&self, count: usize) -> String {
        let end = (self.position + count).min(self.tokens.len());
        self.tokens[self.position..end]
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
