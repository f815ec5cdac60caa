//! Greedy matching of predictions to ground truth within one category.

use crate::metrics::iou::calculate_iou;
use crate::types::BoundingBox;
use log::trace;

/// An accepted pairing between a ground-truth box and a prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    pub ground_truth_index: usize,
    pub prediction_index: usize,
    pub iou: f64,
}

/// Outcome of a greedy matching pass over one category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GreedyMatching {
    /// Accepted pairs, in the order they were made.
    pub matches: Vec<Match>,
    /// Indices of predictions that were never matched, in original order.
    pub unmatched_predictions: Vec<usize>,
}

impl GreedyMatching {
    /// Number of true positives.
    pub fn true_positives(&self) -> usize {
        self.matches.len()
    }

    /// Number of false positives.
    pub fn false_positives(&self) -> usize {
        self.unmatched_predictions.len()
    }
}

/// Match ground-truth boxes to predictions, first match wins.
///
/// Ground truths are processed in order. For each one, the predictions not
/// yet consumed are scanned in their original order and the first whose IoU
/// is strictly greater than `iou_threshold` is accepted and consumed. This
/// is not an optimal assignment: a ground truth keeps an early mediocre
/// match even if a better prediction appears later in the list.
///
/// # Arguments
///
/// * `ground_truths` - Ground-truth boxes for one category
/// * `predictions` - Predicted boxes for the same category
/// * `iou_threshold` - IoU a prediction must exceed to be accepted
///
/// # Example
///
/// ```
/// use shape_eval::matching::match_greedy;
/// use shape_eval::types::BoundingBox;
///
/// let gt = vec![BoundingBox::new(0.0, 0.0, 10.0, 10.0).unwrap()];
/// let preds = vec![
///     BoundingBox::new(1.0, 1.0, 9.0, 9.0).unwrap(),
///     BoundingBox::new(50.0, 50.0, 60.0, 60.0).unwrap(),
/// ];
/// let result = match_greedy(&gt, &preds, 0.5);
/// assert_eq!(result.true_positives(), 1);
/// assert_eq!(result.unmatched_predictions, vec![1]);
/// ```
pub fn match_greedy(
    ground_truths: &[BoundingBox],
    predictions: &[BoundingBox],
    iou_threshold: f64,
) -> GreedyMatching {
    let mut consumed = vec![false; predictions.len()];
    let mut matches = Vec::new();

    for (gt_idx, gt_box) in ground_truths.iter().enumerate() {
        let found = predictions
            .iter()
            .enumerate()
            .filter(|(pred_idx, _)| !consumed[*pred_idx])
            .map(|(pred_idx, pred_box)| (pred_idx, calculate_iou(gt_box, pred_box)))
            .find(|&(_, iou)| iou > iou_threshold);

        if let Some((pred_idx, iou)) = found {
            trace!("ground truth {gt_idx} matched prediction {pred_idx} (iou {iou:.4})");
            consumed[pred_idx] = true;
            matches.push(Match {
                ground_truth_index: gt_idx,
                prediction_index: pred_idx,
                iou,
            });
        }
    }

    let unmatched_predictions = consumed
        .iter()
        .enumerate()
        .filter_map(|(idx, &used)| (!used).then_some(idx))
        .collect();

    GreedyMatching {
        matches,
        unmatched_predictions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x1: f64, y1: f64, x2: f64, y2: f64) -> BoundingBox {
        BoundingBox::new(x1, y1, x2, y2).unwrap()
    }

    #[test]
    fn test_perfect_match() {
        let gt = vec![bbox(10.0, 10.0, 60.0, 60.0)];
        let preds = vec![bbox(10.0, 10.0, 60.0, 60.0)];

        let result = match_greedy(&gt, &preds, 0.7);
        assert_eq!(result.true_positives(), 1);
        assert_eq!(result.false_positives(), 0);
        assert!(result.matches[0].iou > 0.99);
    }

    #[test]
    fn test_no_match() {
        let gt = vec![bbox(200.0, 200.0, 250.0, 250.0)];
        let preds = vec![bbox(10.0, 10.0, 60.0, 60.0)];

        let result = match_greedy(&gt, &preds, 0.5);
        assert_eq!(result.true_positives(), 0);
        assert_eq!(result.unmatched_predictions, vec![0]);
    }

    #[test]
    fn test_threshold_is_strict() {
        // IoU is exactly 0.64
        let gt = vec![bbox(0.0, 0.0, 10.0, 10.0)];
        let preds = vec![bbox(1.0, 1.0, 9.0, 9.0)];

        assert_eq!(match_greedy(&gt, &preds, 0.4).true_positives(), 1);
        assert_eq!(match_greedy(&gt, &preds, 0.5).true_positives(), 1);
        assert_eq!(match_greedy(&gt, &preds, 0.64).true_positives(), 0);
        assert_eq!(match_greedy(&gt, &preds, 0.7).true_positives(), 0);
    }

    #[test]
    fn test_first_match_wins() {
        let gt = vec![bbox(0.0, 0.0, 10.0, 10.0)];
        let preds = vec![
            bbox(1.0, 1.0, 9.0, 9.0),   // IoU 0.64
            bbox(0.0, 0.0, 10.0, 10.0), // IoU 1.0
        ];

        let result = match_greedy(&gt, &preds, 0.5);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].prediction_index, 0);
        assert_eq!(result.unmatched_predictions, vec![1]);
    }

    #[test]
    fn test_prediction_consumed_once() {
        let gt = vec![bbox(0.0, 0.0, 10.0, 10.0), bbox(0.0, 0.0, 10.0, 10.0)];
        let preds = vec![bbox(0.0, 0.0, 10.0, 10.0)];

        let result = match_greedy(&gt, &preds, 0.5);
        assert_eq!(result.true_positives(), 1);
        assert_eq!(result.matches[0].ground_truth_index, 0);
        assert_eq!(result.false_positives(), 0);
    }

    #[test]
    fn test_greedy_is_not_optimal() {
        // Pairing gt0 with p1 and gt1 with p0 would match both, but gt0 takes
        // p0 first and gt1 cannot reach the threshold with p1.
        let gt = vec![bbox(0.0, 0.0, 10.0, 10.0), bbox(0.0, 0.0, 9.0, 9.0)];
        let preds = vec![bbox(0.0, 0.0, 9.5, 9.5), bbox(0.0, 0.0, 10.0, 10.0)];

        let result = match_greedy(&gt, &preds, 0.85);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].ground_truth_index, 0);
        assert_eq!(result.matches[0].prediction_index, 0);
        assert_eq!(result.unmatched_predictions, vec![1]);
    }

    #[test]
    fn test_later_predictions_stay_in_order() {
        let gt = vec![bbox(50.0, 50.0, 60.0, 60.0)];
        let preds = vec![
            bbox(0.0, 0.0, 5.0, 5.0),
            bbox(50.0, 50.0, 60.0, 60.0),
            bbox(100.0, 100.0, 105.0, 105.0),
        ];

        let result = match_greedy(&gt, &preds, 0.7);
        assert_eq!(result.matches[0].prediction_index, 1);
        assert_eq!(result.unmatched_predictions, vec![0, 2]);
    }

    #[test]
    fn test_empty_inputs() {
        let preds = vec![bbox(0.0, 0.0, 5.0, 5.0)];
        let result = match_greedy(&[], &preds, 0.5);
        assert_eq!(result.unmatched_predictions, vec![0]);

        let gt = vec![bbox(0.0, 0.0, 5.0, 5.0)];
        let result = match_greedy(&gt, &[], 0.5);
        assert!(result.matches.is_empty());
        assert!(result.unmatched_predictions.is_empty());
    }
}
