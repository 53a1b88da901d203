//! Reading order for single-column chat layouts.
use chatlift_ocr::Detection;

/// Orders detections top-to-bottom, then left-to-right, by box center.
///
/// Equal centers keep their input order, so the result is a deterministic total order and
/// re-sorting an already sorted sequence leaves it unchanged.
pub fn sort_reading_order(detections: &[Detection]) -> Vec<&Detection> {
    let mut keyed: Vec<(usize, &Detection)> = detections.iter().enumerate().collect();
    keyed.sort_by(|(ia, a), (ib, b)| {
        let (ca, cb) = (a.quad.center(), b.quad.center());
        ca.y.total_cmp(&cb.y)
            .then(ca.x.total_cmp(&cb.x))
            .then(ia.cmp(ib))
    });
    keyed.into_iter().map(|(_, d)| d).collect()
}
