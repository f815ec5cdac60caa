//! Positional and size similarity between a reference box and a candidate.

use crate::types::BoundingBox;

/// Score how well `candidate` reproduces the position and size of `reference`.
///
/// The score is the product of four terms:
///
/// - horizontal alignment: `max(0, (w_ref - |cx_ref - cx_cand|) / w_ref)`
/// - vertical alignment: `max(0, (h_ref - |cy_ref - cy_cand|) / h_ref)`
/// - width ratio: `min(w_ref, w_cand) / max(w_ref, w_cand)`
/// - height ratio: `min(h_ref, h_cand) / max(h_ref, h_cand)`
///
/// The alignment terms are normalized by the reference box only, so the
/// score is not symmetric. Pass the ground truth as `reference`.
///
/// # Returns
///
/// Returns a value between 0.0 and 1.0; identical boxes score 1.0.
///
/// # Example
///
/// ```
/// use shape_eval::metrics::similarity::calculate_similarity;
/// use shape_eval::types::BoundingBox;
///
/// let gt = BoundingBox::new(0.0, 0.0, 10.0, 10.0).unwrap();
/// let pred = BoundingBox::new(1.0, 1.0, 9.0, 9.0).unwrap();
/// // Same center, 0.8 width ratio, 0.8 height ratio
/// assert!((calculate_similarity(&gt, &pred) - 0.64).abs() < 1e-10);
/// ```
pub fn calculate_similarity(reference: &BoundingBox, candidate: &BoundingBox) -> f64 {
    let (ref_cx, ref_cy) = reference.center();
    let (cand_cx, cand_cy) = candidate.center();

    // Widths and heights are strictly positive for validated boxes
    let (ref_w, ref_h) = (reference.width(), reference.height());
    let (cand_w, cand_h) = (candidate.width(), candidate.height());

    let mid_x = ((ref_w - (ref_cx - cand_cx).abs()) / ref_w).max(0.0);
    let mid_y = ((ref_h - (ref_cy - cand_cy).abs()) / ref_h).max(0.0);
    let width_ratio = ref_w.min(cand_w) / ref_w.max(cand_w);
    let height_ratio = ref_h.min(cand_h) / ref_h.max(cand_h);

    width_ratio * height_ratio * mid_x * mid_y
}
