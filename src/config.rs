//! Matching configuration: IoU threshold and the categories to evaluate.

use crate::error::{Result, ShapeEvalError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// IoU threshold used when only counting matches.
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.7;

/// IoU threshold used when rendering matches for inspection.
pub const VISUALIZATION_IOU_THRESHOLD: f64 = 0.4;

/// Categories evaluated when none are configured.
pub const DEFAULT_CATEGORIES: [&str; 2] = ["circle", "triangle"];

fn default_iou_threshold() -> f64 {
    DEFAULT_IOU_THRESHOLD
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| (*c).to_string()).collect()
}

/// Settings for a matching pass.
///
/// Both fields may be omitted from a JSON config file:
///
/// ```json
/// { "iou_threshold": 0.5, "categories": ["circle"] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// A prediction must have IoU strictly greater than this to match.
    #[serde(default = "default_iou_threshold")]
    pub iou_threshold: f64,

    /// Categories to evaluate, in report order.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            categories: default_categories(),
        }
    }
}

impl MatchConfig {
    /// Default configuration for the visualization path (IoU threshold 0.4).
    pub fn for_visualization() -> Self {
        Self::default().with_threshold(VISUALIZATION_IOU_THRESHOLD)
    }

    /// Replace the IoU threshold.
    pub fn with_threshold(mut self, iou_threshold: f64) -> Self {
        self.iou_threshold = iou_threshold;
        self
    }

    /// Replace the evaluated categories.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// fails [`MatchConfig::validate`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON string.
    ///
    /// # Example
    ///
    /// ```
    /// use shape_eval::config::MatchConfig;
    ///
    /// let config = MatchConfig::load_from_string(r#"{"iou_threshold": 0.5}"#).unwrap();
    /// assert_eq!(config.iou_threshold, 0.5);
    /// assert_eq!(config.categories, vec!["circle", "triangle"]);
    /// ```
    pub fn load_from_string(json_str: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the threshold is in [0.0, 1.0] and at least one category is named.
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.iou_threshold)?;
        if self.categories.is_empty() {
            return Err(ShapeEvalError::EmptyConfig(
                "At least one category must be configured".to_string(),
            ));
        }
        Ok(())
    }
}

/// Validate that a threshold is in the valid range [0.0, 1.0].
fn validate_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ShapeEvalError::InvalidThreshold(format!(
            "Threshold must be between 0.0 and 1.0, got {}",
            threshold
        )));
    }
    Ok(())
}
