//! # shape-eval
//!
//! Detection-quality metrics for shape annotations (circles, triangles, or
//! any other named category) stored as axis-aligned bounding boxes.
//!
//! This library provides:
//! - **IoU** (Intersection over Union) between two boxes
//! - A positional/size **similarity** score relative to a reference box
//! - **Greedy first-match-wins matching** of predictions to ground truth
//! - Per-category **positives / true positive / false positive** tallies
//! - Rendering of matched pairs over the source image for inspection
//!
//! ## Quick Start
//!
//! ```rust
//! use shape_eval::{evaluate, load_from_string, MatchConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ground_truth = load_from_string(r#"{"circle": [[[0, 0], [10, 10]]]}"#)?;
//! let predictions = load_from_string(
//!     r#"{"circle": [[[1, 1], [9, 9]], [[50, 50], [60, 60]]]}"#,
//! )?;
//!
//! let config = MatchConfig::default().with_threshold(0.5);
//! let report = evaluate(&ground_truth, &predictions, &config)?;
//!
//! println!("{}", serde_json::to_string(&report)?);
//! assert_eq!(report["circle"].tp, 1);
//! assert_eq!(report["circle"].fp, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Annotation Format
//!
//! Ground truth and predictions use the same JSON layout, a mapping from
//! category name to a list of two-corner boxes `[[x1, y1], [x2, y2]]` with
//! `(x1, y1)` the top-left and `(x2, y2)` the bottom-right corner:
//!
//! ```json
//! {
//!   "circle": [[[10, 20], [30, 40]]],
//!   "triangle": [[[50, 50], [80, 90]], [[5, 5], [15, 12]]]
//! }
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod loader;
pub mod metrics;
pub mod matching;
pub mod evaluator;
pub mod visualize;

// Re-export commonly used types and functions
pub use error::{Result, ShapeEvalError};
pub use types::{AnnotationSet, BoundingBox, CornerPair, MatchReport, MatchResult, ScoredMatch};
pub use config::MatchConfig;
pub use loader::{load_from_file, load_from_string};
pub use evaluator::{evaluate, evaluate_files, evaluate_with_similarity, Evaluation};
pub use visualize::{render_matches, visualize_files, RenderStyle};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_reexports() {
        let ground_truth = load_from_string(r#"{"circle": [[[0, 0], [10, 10]]]}"#).unwrap();
        let predictions = AnnotationSet::new().with_category(
            "circle",
            vec![BoundingBox::new(1.0, 1.0, 9.0, 9.0).unwrap().corners()],
        );
        let config = MatchConfig::for_visualization();

        let report: MatchReport = evaluate(&ground_truth, &predictions, &config).unwrap();
        assert_eq!(report["circle"], MatchResult { positives: Some(1), tp: 1, fp: 0 });

        let evaluation: Evaluation =
            evaluate_with_similarity(&ground_truth, &predictions, &config).unwrap();
        let rendering = render_matches(
            &image::RgbImage::new(12, 12),
            &evaluation.matches,
            &RenderStyle::default(),
        );
        assert_eq!(rendering.map(|r| r.captions.len()), Some(1));

        let invalid = MatchConfig::default().with_threshold(2.0);
        let err: ShapeEvalError = invalid.validate().unwrap_err();
        assert!(matches!(err, ShapeEvalError::InvalidThreshold(_)));
    }
}
