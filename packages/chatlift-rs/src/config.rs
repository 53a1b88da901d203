/// Tunable thresholds for chat reconstruction.
///
/// All distances are in image-pixel space; ratios are fractions of the image width or height.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserConfig {
    /// Maximum vertical distance between centers for two boxes to count as one line.
    pub line_tolerance: f32,
    /// Boxes centered above `header_cutoff_ratio * height` belong to the status bar / contact header.
    pub header_cutoff_ratio: f32,
    /// A timestamp whose right edge reaches `outgoing_side_ratio * width` belongs to the outgoing side.
    pub outgoing_side_ratio: f32,
    /// Lower-case prefix of the composer's empty-input hint.
    pub composer_placeholder: String,
    /// Give the message left open at end of stream the last confirmed timestamp instead of an empty time.
    pub stamp_trailing_message: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            line_tolerance: 10.0,
            header_cutoff_ratio: 0.12,
            outgoing_side_ratio: 0.8,
            composer_placeholder: "type a message".to_string(),
            stamp_trailing_message: false,
        }
    }
}
