pub mod engine;
pub mod json;
pub mod region;

pub use engine::{OcrEngine, OcrError, OcrInput, OcrOutput};
pub use json::{parse_dump, JsonOcrEngine};
pub use region::{Detection, ImageDimensions, Point, Quad};
