//! Spatial predicates over OCR boxes. Both compare quad centers only.
use chatlift_ocr::Quad;

/// Centers are within `tolerance` of each other vertically.
pub fn same_line(a: &Quad, b: &Quad, tolerance: f32) -> bool {
    (a.center().y - b.center().y).abs() <= tolerance
}

/// `b` starts a lower line than `a`.
pub fn below(a: &Quad, b: &Quad, tolerance: f32) -> bool {
    b.center().y - a.center().y > tolerance
}
