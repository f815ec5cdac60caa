//! Intersection over Union (IoU) calculation.

use crate::types::BoundingBox;

/// Calculate the Intersection over Union (IoU) between two bounding boxes.
///
/// IoU is defined as the area of intersection divided by the area of union.
/// Boxes that only touch along an edge have an empty intersection.
///
/// # Arguments
///
/// * `bbox1` - First bounding box
/// * `bbox2` - Second bounding box
///
/// # Returns
///
/// Returns a value between 0.0 (no overlap) and 1.0 (perfect overlap).
///
/// # Example
///
/// ```
/// use shape_eval::metrics::iou::calculate_iou;
/// use shape_eval::types::BoundingBox;
///
/// let gt = BoundingBox::new(0.0, 0.0, 10.0, 10.0).unwrap();
/// let pred = BoundingBox::new(1.0, 1.0, 9.0, 9.0).unwrap();
/// let iou = calculate_iou(&gt, &pred);
/// assert!((iou - 0.64).abs() < 1e-10);
/// ```
pub fn calculate_iou(bbox1: &BoundingBox, bbox2: &BoundingBox) -> f64 {
    // Calculate intersection coordinates
    let x_left = bbox1.x1().max(bbox2.x1());
    let y_top = bbox1.y1().max(bbox2.y1());
    let x_right = bbox1.x2().min(bbox2.x2());
    let y_bottom = bbox1.y2().min(bbox2.y2());

    if x_right < x_left || y_bottom < y_top {
        return 0.0;
    }

    let intersection_area = (x_right - x_left) * (y_bottom - y_top);

    // The intersection never exceeds either area, so the union is positive
    // and only overflows when the boxes barely overlap
    let union_area = bbox1.area() + (bbox2.area() - intersection_area);
    let iou = intersection_area / union_area;

    debug_assert!(
        (0.0..=1.0).contains(&iou),
        "IoU must be between 0 and 1, got {iou}"
    );

    iou
}
