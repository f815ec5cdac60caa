//! Metric calculations over bounding boxes and match tallies.

pub mod iou;
pub mod similarity;
pub mod rates;

pub use iou::calculate_iou;
pub use similarity::calculate_similarity;
pub use rates::{calculate_f1, calculate_precision, calculate_recall};
