//! Basic evaluation example demonstrating core functionality.
//!
//! Run with `RUST_LOG=debug cargo run --example basic_evaluation` to see
//! per-category tallies and individual matches.

use shape_eval::{
    evaluate, evaluate_with_similarity, load_from_string, metrics::calculate_iou,
    metrics::calculate_similarity, BoundingBox, MatchConfig,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Shape Evaluation Example ===\n");

    // Example 1: IoU and similarity between two boxes
    println!("1. Box Scores");
    let gt_box = BoundingBox::new(0.0, 0.0, 10.0, 10.0)?;
    let pred_box = BoundingBox::new(1.0, 1.0, 9.0, 9.0)?;
    println!("   IoU:        {:.4}", calculate_iou(&gt_box, &pred_box));
    println!("   Similarity: {:.4}", calculate_similarity(&gt_box, &pred_box));
    println!();

    // Example 2: Load annotations
    println!("2. Loading Annotations");
    let ground_truth = load_from_string(
        r#"{
            "circle": [[[0, 0], [10, 10]], [[40, 40], [60, 60]]],
            "triangle": [[[100, 20], [130, 50]]]
        }"#,
    )?;
    let predictions = load_from_string(
        r#"{
            "circle": [[[1, 1], [9, 9]], [[50, 50], [60, 60]], [[41, 39], [61, 59]]],
            "triangle": [[[200, 200], [220, 220]]]
        }"#,
    )?;
    println!("   Ground truth shapes: {}", ground_truth.len());
    println!("   Predicted shapes:    {}", predictions.len());
    println!();

    // Example 3: Match and count at two thresholds
    println!("3. Match Results");
    for threshold in [0.7, 0.5] {
        let config = MatchConfig::default().with_threshold(threshold);
        let report = evaluate(&ground_truth, &predictions, &config)?;
        println!("   IoU > {threshold}: {}", serde_json::to_string(&report)?);
        for (category, result) in &report {
            println!(
                "     {category:<9} precision {:.2}  recall {}",
                result.precision(),
                result
                    .recall()
                    .map_or_else(|| "n/a".to_string(), |r| format!("{r:.2}"))
            );
        }
    }
    println!();

    // Example 4: Scored matches, as used for visual inspection
    println!("4. Scored Matches");
    let evaluation =
        evaluate_with_similarity(&ground_truth, &predictions, &MatchConfig::for_visualization())?;
    for m in &evaluation.matches {
        println!(
            "   {} gt#{} <-> pred#{}: iou {:.4}, similarity {:.4}",
            m.category, m.ground_truth_index, m.prediction_index, m.iou, m.similarity
        );
    }

    Ok(())
}
