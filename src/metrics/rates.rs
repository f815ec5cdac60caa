//! Precision, recall and F1 derived from match tallies.
//!
//! These are summary rates over the counts produced by the greedy matcher;
//! they do not depend on confidence scores.

/// Calculate precision from confusion matrix values
///
/// Precision = TP / (TP + FP)
///
/// # Examples
///
/// ```
/// # use shape_eval::metrics::rates::calculate_precision;
/// let precision = calculate_precision(8, 2);
/// assert_eq!(precision, 0.8);
/// ```
#[must_use]
pub fn calculate_precision(tp: usize, fp: usize) -> f64 {
    let denominator = tp + fp;
    if denominator == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let precision = (tp as f64) / (denominator as f64);

    debug_assert!(
        (0.0..=1.0).contains(&precision),
        "Precision must be between 0 and 1, got {precision}"
    );

    precision
}

/// Calculate recall from confusion matrix values
///
/// Recall = TP / (TP + FN)
///
/// # Examples
///
/// ```
/// # use shape_eval::metrics::rates::calculate_recall;
/// let recall = calculate_recall(3, 1);
/// assert_eq!(recall, 0.75);
/// ```
#[must_use]
pub fn calculate_recall(tp: usize, fn_: usize) -> f64 {
    let denominator = tp + fn_;
    if denominator == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let recall = (tp as f64) / (denominator as f64);

    debug_assert!(
        (0.0..=1.0).contains(&recall),
        "Recall must be between 0 and 1, got {recall}"
    );

    recall
}

/// Calculate F1 score, the harmonic mean of precision and recall.
///
/// Returns 0.0 when both inputs are 0.
#[must_use]
pub fn calculate_f1(precision: f64, recall: f64) -> f64 {
    let sum = precision + recall;
    if sum <= 0.0 {
        return 0.0;
    }
    2.0 * precision * recall / sum
}
