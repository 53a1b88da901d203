//! # chatlift-rs
//!
//! Reconstructs chat conversations from the OCR output of chat screenshots.
//!
//! An OCR engine hands back an unordered set of text fragments with bounding boxes. This crate puts
//! them in reading order, recognizes date bubbles and timestamps (including ones OCR split across
//! several fragments), tells timestamps apart from times that are just part of a message, works out
//! which side of the conversation sent each message, and emits one [`MessageRow`] per message.
//!
//! ## Quick Start
//!
//! ```ignore
//! use chatlift_rs::prelude::*;
//!
//! let detections = vec![
//!     Detection::new(Quad::from_rect(420.0, 300.0, 160.0, 24.0), "12 Jan 2023", 0.97),
//!     Detection::new(Quad::from_rect(820.0, 420.0, 90.0, 20.0), "3:45 PM", 0.93),
//!     Detection::new(Quad::from_rect(40.0, 470.0, 240.0, 24.0), "Hello there", 0.95),
//! ];
//! let rows = messages_from_ocr(&detections, "Screenshot 1.png", ImageDimensions::new(1000.0, 2000.0));
//! assert_eq!(rows[0].message, "Hello there");
//!
//! // Whole batches of saved OCR dumps
//! let generator = ChatHistoryGenerator::new(ChatHistoryOptions {
//!     inputs: vec!["ocr/".into()],
//!     ..Default::default()
//! });
//! let result = generator.generate().await?;
//! ```

pub mod chat_history_generator;
pub mod config;
pub mod cursor;
pub mod date_matcher;
pub mod geometry;
pub mod message_row;
pub mod patterns;
pub mod segmenter;
pub mod sender;
pub mod sequencer;
pub mod time_matcher;

// Re-export commonly used types at the root level
pub use chat_history_generator::{ChatHistory, ChatHistoryGenerator, ChatHistoryOptions, ChatHistoryResult, OutputFormat};
pub use chatlift_ocr::{Detection, ImageDimensions, JsonOcrEngine, OcrEngine, OcrError, OcrInput, OcrOutput, Point, Quad};
pub use config::ParserConfig;
pub use message_row::{sort_rows, write_csv, write_json, ChatHistoryDocument, MessageRow};
pub use patterns::Patterns;
pub use segmenter::{messages_from_ocr, ChatParser, ParserState, Step};
pub use sender::{classify_sender, Sender};
pub use sequencer::sort_reading_order;

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```ignore
/// use chatlift_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        messages_from_ocr, sort_reading_order, sort_rows, write_csv, ChatHistoryGenerator, ChatHistoryOptions,
        ChatHistoryResult, ChatParser, Detection, ImageDimensions, MessageRow, OutputFormat, ParserConfig, Quad,
        Sender,
    };
}
