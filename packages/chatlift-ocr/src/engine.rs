use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::region::{Detection, ImageDimensions};

#[derive(Debug, Clone)]
pub enum OcrInput {
    FilePath(PathBuf),
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct OcrOutput {
    /// Identifier of the screenshot the detections came from, when the engine knows it.
    pub image_name: Option<String>,
    pub dimensions: ImageDimensions,
    pub detections: Vec<Detection>,
}

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("unsupported operation")]
    Unsupported,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("engine error: {0}")]
    EngineError(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, input: &OcrInput) -> Result<OcrOutput, OcrError>;
}
