//! JSON loading utilities for shape annotation files.

use crate::error::Result;
use crate::types::AnnotationSet;
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load an annotation set from a JSON file.
///
/// The file maps category names to lists of `[[x1, y1], [x2, y2]]` corner
/// pairs. Box geometry is not checked here; it is validated when a category
/// is matched.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```no_run
/// use shape_eval::loader::load_from_file;
///
/// let annotations = load_from_file("ground_truth.json").unwrap();
/// println!("Loaded {} shapes", annotations.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<AnnotationSet> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let annotations: AnnotationSet = serde_json::from_reader(reader)?;

    info!(
        "loaded {} shapes in {} categories from {}",
        annotations.len(),
        annotations.categories().count(),
        path.display()
    );

    Ok(annotations)
}

/// Load an annotation set from a JSON string.
///
/// # Example
///
/// ```
/// use shape_eval::loader::load_from_string;
///
/// let json = r#"{"circle": [[[0, 0], [10, 10]]]}"#;
/// let annotations = load_from_string(json).unwrap();
/// assert_eq!(annotations.get("circle").unwrap().len(), 1);
/// assert!(annotations.get("triangle").is_none());
/// ```
pub fn load_from_string(json_str: &str) -> Result<AnnotationSet> {
    let annotations: AnnotationSet = serde_json::from_str(json_str)?;
    Ok(annotations)
}
