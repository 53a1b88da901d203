//! Conversation side from a timestamp's horizontal position.
use chatlift_ocr::Quad;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sender {
    /// Left-aligned, incoming bubbles.
    #[serde(rename = "A")]
    A,
    /// Right-aligned, outgoing bubbles.
    #[serde(rename = "B")]
    B,
    /// No timestamp was seen, so the side is unknown.
    #[serde(rename = "INCOMING")]
    Incoming,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::A => "A",
            Sender::B => "B",
            Sender::Incoming => "INCOMING",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outgoing timestamps hug the right edge; anything reaching `outgoing_side_ratio` of the
/// width is side B.
pub fn classify_sender(time_box: &Quad, image_width: f32, outgoing_side_ratio: f32) -> Sender {
    if time_box.max_x() >= image_width * outgoing_side_ratio {
        Sender::B
    } else {
        Sender::A
    }
}
