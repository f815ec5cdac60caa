//! Per-category evaluation of predictions against ground truth.

use crate::config::MatchConfig;
use crate::error::Result;
use crate::loader::load_from_file;
use crate::matching::{match_greedy, GreedyMatching};
use crate::metrics::similarity::calculate_similarity;
use crate::types::{AnnotationSet, BoundingBox, MatchReport, MatchResult, ScoredMatch};
use log::debug;
use std::path::Path;

/// Match report together with every accepted match and its scores.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    pub report: MatchReport,
    /// Accepted matches across all categories, in match order.
    pub matches: Vec<ScoredMatch>,
}

/// Boxes and matching outcome for a category present in both sets.
struct MatchedCategory {
    ground_truths: Vec<BoundingBox>,
    predictions: Vec<BoundingBox>,
    matching: GreedyMatching,
}

/// Evaluate predictions against ground truth, category by category.
///
/// For every category in `config.categories`:
///
/// - absent from the ground truth: `positives` is `None`, `tp` is 0 and
///   `fp` counts the category's predictions;
/// - absent from the predictions: `tp` and `fp` are 0;
/// - otherwise ground truths are matched greedily (see
///   [`match_greedy`]) and `fp` counts the predictions left unmatched.
///
/// # Errors
///
/// Returns an error if the config is invalid or a box in a matched
/// category has invalid geometry.
///
/// # Example
///
/// ```
/// use shape_eval::config::MatchConfig;
/// use shape_eval::evaluator::evaluate;
/// use shape_eval::loader::load_from_string;
///
/// let gt = load_from_string(r#"{"circle": [[[0, 0], [10, 10]]]}"#).unwrap();
/// let preds = load_from_string(r#"{"circle": [[[1, 1], [9, 9]], [[50, 50], [60, 60]]]}"#).unwrap();
///
/// let report = evaluate(&gt, &preds, &MatchConfig::default().with_threshold(0.5)).unwrap();
/// let circle = report["circle"];
/// assert_eq!((circle.positives, circle.tp, circle.fp), (Some(1), 1, 1));
/// ```
pub fn evaluate(
    ground_truth: &AnnotationSet,
    predictions: &AnnotationSet,
    config: &MatchConfig,
) -> Result<MatchReport> {
    config.validate()?;

    let mut report = MatchReport::new();
    for category in &config.categories {
        let (result, _) =
            evaluate_category(ground_truth, predictions, category, config.iou_threshold)?;
        report.insert(category.clone(), result);
    }

    Ok(report)
}

/// Evaluate like [`evaluate`] and also score every accepted match.
///
/// Each [`ScoredMatch`] carries the IoU and the similarity score with the
/// ground-truth box as reference. Matches are listed category by category
/// in configured order, and within a category in the order they were made.
pub fn evaluate_with_similarity(
    ground_truth: &AnnotationSet,
    predictions: &AnnotationSet,
    config: &MatchConfig,
) -> Result<Evaluation> {
    config.validate()?;

    let mut evaluation = Evaluation::default();
    for category in &config.categories {
        let (result, matched) =
            evaluate_category(ground_truth, predictions, category, config.iou_threshold)?;
        evaluation.report.insert(category.clone(), result);

        let Some(matched) = matched else {
            continue;
        };
        for m in &matched.matching.matches {
            let gt_box = matched.ground_truths[m.ground_truth_index];
            let pred_box = matched.predictions[m.prediction_index];
            evaluation.matches.push(ScoredMatch {
                category: category.clone(),
                ground_truth_index: m.ground_truth_index,
                prediction_index: m.prediction_index,
                ground_truth: gt_box,
                prediction: pred_box,
                iou: m.iou,
                similarity: calculate_similarity(&gt_box, &pred_box),
            });
        }
    }

    Ok(evaluation)
}

/// Load both annotation files and evaluate them.
///
/// # Errors
///
/// Returns an error if either file cannot be read or parsed, or for any
/// reason [`evaluate`] fails.
pub fn evaluate_files<P: AsRef<Path>, Q: AsRef<Path>>(
    ground_truth_path: P,
    predictions_path: Q,
    config: &MatchConfig,
) -> Result<MatchReport> {
    let ground_truth = load_from_file(ground_truth_path)?;
    let predictions = load_from_file(predictions_path)?;
    evaluate(&ground_truth, &predictions, config)
}

fn evaluate_category(
    ground_truth: &AnnotationSet,
    predictions: &AnnotationSet,
    category: &str,
    iou_threshold: f64,
) -> Result<(MatchResult, Option<MatchedCategory>)> {
    let Some(gt_shapes) = ground_truth.get(category) else {
        let fp = predictions.get(category).map_or(0, <[_]>::len);
        debug!("{category}: absent from ground truth, {fp} unmatched predictions");
        return Ok((MatchResult { positives: None, tp: 0, fp }, None));
    };

    let positives = Some(gt_shapes.len());
    let Some(pred_shapes) = predictions.get(category) else {
        debug!("{category}: absent from predictions");
        return Ok((MatchResult { positives, tp: 0, fp: 0 }, None));
    };

    let ground_truths = gt_shapes
        .iter()
        .map(BoundingBox::from_corners)
        .collect::<Result<Vec<_>>>()?;
    let predictions = pred_shapes
        .iter()
        .map(BoundingBox::from_corners)
        .collect::<Result<Vec<_>>>()?;

    let matching = match_greedy(&ground_truths, &predictions, iou_threshold);
    let result = MatchResult {
        positives,
        tp: matching.true_positives(),
        fp: matching.false_positives(),
    };
    debug!(
        "{category}: {} ground truths, {} predictions, tp={} fp={}",
        ground_truths.len(),
        predictions.len(),
        result.tp,
        result.fp
    );

    Ok((
        result,
        Some(MatchedCategory {
            ground_truths,
            predictions,
            matching,
        }),
    ))
}
