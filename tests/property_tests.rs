//! Property-based tests using proptest
//!
//! These tests verify mathematical properties and invariants that should
//! always hold regardless of the input values.

use proptest::prelude::*;
use shape_eval::matching::match_greedy;
use shape_eval::metrics::{calculate_iou, calculate_similarity};
use shape_eval::types::BoundingBox;

fn arb_box() -> impl Strategy<Value = BoundingBox> {
    (0.0f64..100.0, 0.0f64..100.0, 1.0f64..50.0, 1.0f64..50.0)
        .prop_map(|(x, y, w, h)| BoundingBox::new(x, y, x + w, y + h).unwrap())
}

// Property: IoU is symmetric
proptest! {
    #[test]
    fn prop_iou_symmetric(bbox1 in arb_box(), bbox2 in arb_box()) {
        let iou1 = calculate_iou(&bbox1, &bbox2);
        let iou2 = calculate_iou(&bbox2, &bbox1);

        prop_assert!((iou1 - iou2).abs() < 1e-10,
                "IoU should be symmetric: {} vs {}", iou1, iou2);
    }
}

// Property: IoU is always between 0 and 1
proptest! {
    #[test]
    fn prop_iou_range(bbox1 in arb_box(), bbox2 in arb_box()) {
        let iou = calculate_iou(&bbox1, &bbox2);
        prop_assert!((0.0..=1.0).contains(&iou), "IoU should be in [0,1], got {}", iou);
    }
}

// Property: Identical boxes have IoU = 1.0 and similarity = 1.0
proptest! {
    #[test]
    fn prop_identical_boxes(bbox in arb_box()) {
        let iou = calculate_iou(&bbox, &bbox);
        prop_assert!((iou - 1.0).abs() < 1e-10,
                "Identical boxes should have IoU=1.0, got {}", iou);

        let similarity = calculate_similarity(&bbox, &bbox);
        prop_assert!((similarity - 1.0).abs() < 1e-10,
                "Identical boxes should have similarity=1.0, got {}", similarity);
    }
}

// Property: Similarity is always between 0 and 1
proptest! {
    #[test]
    fn prop_similarity_range(reference in arb_box(), candidate in arb_box()) {
        let similarity = calculate_similarity(&reference, &candidate);
        prop_assert!((0.0..=1.0).contains(&similarity),
                "Similarity should be in [0,1], got {}", similarity);
    }
}

// Property: Boxes separated along x have zero IoU
proptest! {
    #[test]
    fn prop_disjoint_boxes(bbox in arb_box(), gap in 0.0f64..20.0) {
        let other = BoundingBox::new(
            bbox.x2() + gap,
            bbox.y1(),
            bbox.x2() + gap + bbox.width(),
            bbox.y2(),
        ).unwrap();
        prop_assert_eq!(calculate_iou(&bbox, &other), 0.0);
    }
}

// Property: Matching never pairs more than min(gt, pred) and never reuses a prediction
proptest! {
    #[test]
    fn prop_matching_counts(
        gts in prop::collection::vec(arb_box(), 0..12),
        preds in prop::collection::vec(arb_box(), 0..12),
        threshold in 0.0f64..1.0,
    ) {
        let result = match_greedy(&gts, &preds, threshold);

        prop_assert!(result.true_positives() <= gts.len().min(preds.len()));
        prop_assert_eq!(result.true_positives() + result.false_positives(), preds.len());

        let mut used: Vec<usize> = result.matches.iter().map(|m| m.prediction_index).collect();
        used.sort_unstable();
        used.dedup();
        prop_assert_eq!(used.len(), result.matches.len());

        for m in &result.matches {
            prop_assert!(m.iou > threshold);
        }
    }
}

// Property: Raising the threshold never increases the number of matches for a single ground truth
proptest! {
    #[test]
    fn prop_single_gt_monotonic(
        gt in arb_box(),
        preds in prop::collection::vec(arb_box(), 0..12),
        low in 0.0f64..0.5,
        high in 0.5f64..1.0,
    ) {
        let gts = [gt];
        let at_low = match_greedy(&gts, &preds, low).true_positives();
        let at_high = match_greedy(&gts, &preds, high).true_positives();
        prop_assert!(at_high <= at_low);
    }
}
