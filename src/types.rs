//! Core data types for shape annotations and match results.

use crate::error::{Result, ShapeEvalError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw two-corner form of a box as it appears in annotation files:
/// `[[x1, y1], [x2, y2]]`.
pub type CornerPair = [[f64; 2]; 2];

/// Axis-aligned bounding box given by its top-left `(x1, y1)` and
/// bottom-right `(x2, y2)` corners.
///
/// A `BoundingBox` can only be built through [`BoundingBox::new`] or
/// [`BoundingBox::from_corners`], so every value has finite coordinates with
/// `x1 < x2` and `y1 < y2`, and a finite area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CornerPair", into = "CornerPair")]
pub struct BoundingBox {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeEvalError::InvalidGeometry`] if a coordinate is not
    /// finite, if `x1 >= x2` or `y1 >= y2`, or if the width, height or area
    /// overflows to infinity.
    ///
    /// # Example
    ///
    /// ```
    /// use shape_eval::types::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(0.0, 0.0, 10.0, 5.0).unwrap();
    /// assert_eq!(bbox.area(), 50.0);
    /// assert!(BoundingBox::new(10.0, 0.0, 0.0, 5.0).is_err());
    /// ```
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self> {
        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            return Err(ShapeEvalError::InvalidGeometry(format!(
                "non-finite coordinate in [[{x1}, {y1}], [{x2}, {y2}]]"
            )));
        }
        if x1 >= x2 {
            return Err(ShapeEvalError::InvalidGeometry(format!(
                "x1 ({x1}) must be less than x2 ({x2})"
            )));
        }
        if y1 >= y2 {
            return Err(ShapeEvalError::InvalidGeometry(format!(
                "y1 ({y1}) must be less than y2 ({y2})"
            )));
        }
        let (width, height) = (x2 - x1, y2 - y1);
        if !(width * height).is_finite() {
            return Err(ShapeEvalError::InvalidGeometry(format!(
                "box [[{x1}, {y1}], [{x2}, {y2}]] is too large: {width} x {height}"
            )));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// Convert a raw `[[x1, y1], [x2, y2]]` corner pair.
    pub fn from_corners(corners: &CornerPair) -> Result<Self> {
        let [[x1, y1], [x2, y2]] = *corners;
        Self::new(x1, y1, x2, y2)
    }

    pub fn x1(&self) -> f64 {
        self.x1
    }

    pub fn y1(&self) -> f64 {
        self.y1
    }

    pub fn x2(&self) -> f64 {
        self.x2
    }

    pub fn y2(&self) -> f64 {
        self.y2
    }

    /// Get the box width (`x2 - x1`), always positive.
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Get the box height (`y2 - y1`), always positive.
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Get the area of the bounding box.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Get the midpoint `(x, y)` of the box.
    pub fn center(&self) -> (f64, f64) {
        (
            self.x1 + self.width() / 2.0,
            self.y1 + self.height() / 2.0,
        )
    }

    /// Get the box back in raw corner-pair form.
    pub fn corners(&self) -> CornerPair {
        [[self.x1, self.y1], [self.x2, self.y2]]
    }
}

impl TryFrom<CornerPair> for BoundingBox {
    type Error = ShapeEvalError;

    fn try_from(corners: CornerPair) -> Result<Self> {
        Self::from_corners(&corners)
    }
}

impl From<BoundingBox> for CornerPair {
    fn from(bbox: BoundingBox) -> Self {
        bbox.corners()
    }
}

/// Annotations for one image: category name to ordered corner pairs.
///
/// A category that is absent from the file is distinct from a category with
/// an empty list; [`AnnotationSet::get`] returns `None` only for the former.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationSet {
    shapes: BTreeMap<String, Vec<CornerPair>>,
}

impl AnnotationSet {
    /// Create an empty annotation set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the shapes recorded for a category.
    pub fn insert(&mut self, category: impl Into<String>, shapes: Vec<CornerPair>) {
        self.shapes.insert(category.into(), shapes);
    }

    /// Builder-style variant of [`AnnotationSet::insert`].
    pub fn with_category(mut self, category: impl Into<String>, shapes: Vec<CornerPair>) -> Self {
        self.insert(category, shapes);
        self
    }

    /// Get the raw corner pairs for a category, if present.
    pub fn get(&self, category: &str) -> Option<&[CornerPair]> {
        self.shapes.get(category).map(Vec::as_slice)
    }

    /// Convert the shapes of a category into validated boxes.
    ///
    /// Returns `Ok(None)` when the category is absent.
    pub fn boxes(&self, category: &str) -> Result<Option<Vec<BoundingBox>>> {
        self.get(category)
            .map(|shapes| shapes.iter().map(BoundingBox::from_corners).collect())
            .transpose()
    }

    /// Iterate over category names in order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(String::as_str)
    }

    /// Total number of shapes across all categories.
    pub fn len(&self) -> usize {
        self.shapes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-category tally of a matching pass.
///
/// `positives` is `None` when the category does not appear in the ground
/// truth at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    // Key name kept for compatibility with existing result files.
    #[serde(rename = "poitives", alias = "positives")]
    pub positives: Option<usize>,
    pub tp: usize,
    pub fp: usize,
}

impl MatchResult {
    /// Ground-truth shapes left without a matching prediction.
    pub fn false_negatives(&self) -> usize {
        self.positives.map_or(0, |p| p.saturating_sub(self.tp))
    }

    /// Precision `tp / (tp + fp)`, 0.0 when nothing was predicted.
    pub fn precision(&self) -> f64 {
        crate::metrics::rates::calculate_precision(self.tp, self.fp)
    }

    /// Recall `tp / positives`, `None` when the category has no ground truth.
    pub fn recall(&self) -> Option<f64> {
        self.positives
            .map(|_| crate::metrics::rates::calculate_recall(self.tp, self.false_negatives()))
    }

    /// F1 score, `None` when the category has no ground truth.
    pub fn f1(&self) -> Option<f64> {
        self.recall()
            .map(|recall| crate::metrics::rates::calculate_f1(self.precision(), recall))
    }
}

/// Match results for every evaluated category, ordered by category name.
pub type MatchReport = BTreeMap<String, MatchResult>;

/// A single accepted ground-truth / prediction pairing with its scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMatch {
    pub category: String,
    pub ground_truth_index: usize,
    pub prediction_index: usize,
    pub ground_truth: BoundingBox,
    pub prediction: BoundingBox,
    pub iou: f64,
    /// Similarity with the ground truth as reference box.
    pub similarity: f64,
}
