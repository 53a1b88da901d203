//! Replays OCR results that were captured ahead of time as JSON.
//!
//! The layout mirrors the `(box, text, confidence)` triples emitted by detail-level OCR readers,
//! wrapped with the screenshot's dimensions:
//!
//! ```json
//! {
//!   "image": "Screenshot 1.png",
//!   "width": 1080,
//!   "height": 2340,
//!   "detections": [
//!     [[[412, 300], [668, 300], [668, 340], [412, 340]], "12 Jan 2023", 0.97]
//!   ]
//! }
//! ```
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::engine::{OcrEngine, OcrError, OcrInput, OcrOutput};
use crate::region::{Detection, ImageDimensions, Point, Quad};

#[derive(Debug, Deserialize)]
struct OcrDump {
    #[serde(default)]
    image: Option<String>,
    width: f32,
    height: f32,
    #[serde(default)]
    detections: Vec<RawDetection>,
}

#[derive(Debug, Deserialize)]
struct RawDetection(Vec<[f32; 2]>, String, f32);

pub struct JsonOcrEngine;

impl JsonOcrEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOcrEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses an OCR dump, rejecting geometry the reconstruction core cannot work with.
pub fn parse_dump(data: &[u8]) -> Result<OcrOutput, OcrError> {
    let dump: OcrDump =
        serde_json::from_slice(data).map_err(|e| OcrError::InvalidInput(e.to_string()))?;

    if !(dump.width.is_finite() && dump.width > 0.0) || !(dump.height.is_finite() && dump.height > 0.0) {
        return Err(OcrError::InvalidInput(format!(
            "image dimensions must be positive, got {}x{}",
            dump.width, dump.height
        )));
    }

    let detections = dump
        .detections
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| to_detection(idx, raw))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OcrOutput {
        image_name: dump.image,
        dimensions: ImageDimensions::new(dump.width, dump.height),
        detections,
    })
}

fn to_detection(idx: usize, raw: RawDetection) -> Result<Detection, OcrError> {
    let RawDetection(points, text, confidence) = raw;
    let corners: [[f32; 2]; 4] = points.try_into().map_err(|points: Vec<[f32; 2]>| {
        OcrError::InvalidInput(format!(
            "detection {} has {} corner points, expected 4",
            idx,
            points.len()
        ))
    })?;
    if corners.iter().flatten().any(|v| !v.is_finite()) {
        return Err(OcrError::InvalidInput(format!(
            "detection {} has a non-finite coordinate",
            idx
        )));
    }
    let quad = Quad::new(corners.map(|[x, y]| Point::new(x, y)));
    Ok(Detection::new(quad, text, confidence))
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

#[async_trait]
impl OcrEngine for JsonOcrEngine {
    async fn recognize(&self, input: &OcrInput) -> Result<OcrOutput, OcrError> {
        match input {
            OcrInput::FilePath(path) => {
                let data = tokio::fs::read(path).await?;
                let mut output = parse_dump(&data)?;
                if output.image_name.is_none() {
                    output.image_name = file_stem(path);
                }
                Ok(output)
            }
            OcrInput::Bytes(data) => parse_dump(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "image": "Screenshot 1.png",
        "width": 1000,
        "height": 2000,
        "detections": [
            [[[400, 280], [600, 280], [600, 300], [400, 300]], "12 Jan 2023", 0.97],
            [[[820, 330], [900, 330], [900, 350], [820, 350]], "3:45 PM", 0.91]
        ]
    }"#;

    #[test]
    fn test_parse_dump() {
        let output = parse_dump(SAMPLE.as_bytes()).unwrap();
        assert_eq!(output.image_name.as_deref(), Some("Screenshot 1.png"));
        assert_eq!(output.dimensions, ImageDimensions::new(1000.0, 2000.0));
        assert_eq!(output.detections.len(), 2);
        assert_eq!(output.detections[1].text, "3:45 PM");
        assert_eq!(output.detections[1].quad.max_x(), 900.0);
        assert!((output.detections[0].confidence - 0.97).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rejects_short_quad() {
        let data = r#"{"width": 10, "height": 10,
            "detections": [[[[0, 0], [1, 0], [1, 1]], "oops", 0.5]]}"#;
        match parse_dump(data.as_bytes()) {
            Err(OcrError::InvalidInput(msg)) => assert!(msg.contains("3 corner points"), "{}", msg),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let data = r#"{"width": 0, "height": 10, "detections": []}"#;
        assert!(matches!(
            parse_dump(data.as_bytes()),
            Err(OcrError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            parse_dump(b"not json"),
            Err(OcrError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_recognize_bytes() {
        let engine = JsonOcrEngine::new();
        let input = OcrInput::Bytes(SAMPLE.as_bytes().to_vec());
        let output = engine.recognize(&input).await.unwrap();
        assert_eq!(output.detections.len(), 2);
    }

    #[tokio::test]
    async fn test_recognize_file_defaults_image_name_to_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Screenshot 7.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(br#"{"width": 1000, "height": 2000, "detections": []}"#)
            .unwrap();

        let engine = JsonOcrEngine::new();
        let output = engine.recognize(&OcrInput::FilePath(path)).await.unwrap();
        assert_eq!(output.image_name.as_deref(), Some("Screenshot 7"));
        assert!(output.detections.is_empty());
    }

    #[tokio::test]
    async fn test_recognize_missing_file() {
        let engine = JsonOcrEngine::new();
        let input = OcrInput::FilePath("/nonexistent/chatlift/dump.json".into());
        assert!(matches!(engine.recognize(&input).await, Err(OcrError::Io(_))));
    }
}
