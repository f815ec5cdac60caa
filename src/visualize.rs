//! Rendering of matched box pairs over the source image.
//!
//! Every accepted match becomes one panel: a caption strip with the IoU and
//! similarity score, above a copy of the source image with the prediction
//! and the ground truth drawn as hollow rectangles. Panels are stacked top
//! to bottom in match order.

use crate::config::MatchConfig;
use crate::error::Result;
use crate::evaluator::{evaluate_with_similarity, Evaluation};
use crate::loader::load_from_file;
use crate::types::{BoundingBox, ScoredMatch};
use image::{imageops, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use log::{info, warn};
use rusttype::{Font, Scale};
use std::path::Path;

static CAPTION_FONT: &[u8] = include_bytes!("fonts/DejaVuSansMono.ttf");

/// Colors and spacing used when drawing panels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub prediction_color: Rgb<u8>,
    pub ground_truth_color: Rgb<u8>,
    /// Rectangle outline thickness in pixels.
    pub thickness: u32,
    /// Background rows between stacked panels.
    pub panel_gap: u32,
    pub background: Rgb<u8>,
    /// Height of the caption strip above each panel.
    pub caption_height: u32,
    pub caption_color: Rgb<u8>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            prediction_color: Rgb([0, 255, 255]),
            ground_truth_color: Rgb([255, 0, 0]),
            thickness: 1,
            panel_gap: 4,
            background: Rgb([255, 255, 255]),
            caption_height: 16,
            caption_color: Rgb([0, 0, 0]),
        }
    }
}

/// Composite image plus one caption per panel.
#[derive(Debug, Clone)]
pub struct Rendering {
    pub image: RgbImage,
    pub captions: Vec<String>,
}

/// Caption for the panel showing `m`.
pub fn panel_caption(m: &ScoredMatch) -> String {
    format!("iou: {} my metric: {}", m.iou, m.similarity)
}

/// Draw `bbox` on `img` as a hollow rectangle with inclusive corners.
///
/// Thicker outlines grow outwards from the box edge. Corners are clamped
/// to the canvas plus the outline margin before conversion to pixels, so
/// arbitrarily large boxes are safe; a box whose outline cannot touch the
/// canvas is skipped.
pub fn draw_box(img: &mut RgbImage, bbox: &BoundingBox, color: Rgb<u8>, thickness: u32) {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    // Outlines wider than the canvas add nothing visible
    let thickness = thickness.clamp(1, width.max(height));
    let reach = f64::from(thickness - 1);
    let x_last = f64::from(width - 1);
    let y_last = f64::from(height - 1);

    let (x1, y1) = (bbox.x1().round(), bbox.y1().round());
    let (x2, y2) = (bbox.x2().round(), bbox.y2().round());
    if x2 + reach < 0.0 || y2 + reach < 0.0 || x1 - reach > x_last || y1 - reach > y_last {
        return;
    }

    // Clamped values lie within a few canvas sizes of the origin
    let margin = f64::from(thickness);
    let x1 = x1.clamp(-margin, x_last + margin) as i64;
    let y1 = y1.clamp(-margin, y_last + margin) as i64;
    let x2 = x2.clamp(-margin, x_last + margin) as i64;
    let y2 = y2.clamp(-margin, y_last + margin) as i64;

    for t in 0..i64::from(thickness) {
        let rect = match (
            i32::try_from(x1 - t),
            i32::try_from(y1 - t),
            u32::try_from(x2 - x1 + 1 + 2 * t),
            u32::try_from(y2 - y1 + 1 + 2 * t),
        ) {
            (Ok(left), Ok(top), Ok(w), Ok(h)) if w > 0 && h > 0 => {
                Rect::at(left, top).of_size(w, h)
            }
            _ => return,
        };
        draw_hollow_rect_mut(img, rect, color);
    }
}

/// Write `caption` into the strip of `canvas` starting at row `top`.
fn draw_caption(
    canvas: &mut RgbImage,
    top: u32,
    caption: &str,
    style: &RenderStyle,
    font: &Font<'_>,
) {
    let Ok(y) = i32::try_from(top + style.caption_height / 8) else {
        return;
    };
    let scale = Scale::uniform(style.caption_height as f32 * 0.8);
    draw_text_mut(canvas, style.caption_color, 2, y, scale, font, caption);
}

/// Render one panel per match, stacked vertically in match order.
///
/// Each panel is a caption strip of `style.caption_height` rows followed by
/// the annotated source image. Returns `None` when there is nothing to draw.
pub fn render_matches(
    source: &RgbImage,
    matches: &[ScoredMatch],
    style: &RenderStyle,
) -> Option<Rendering> {
    if matches.is_empty() {
        return None;
    }

    let font = Font::try_from_bytes(CAPTION_FONT);
    if font.is_none() {
        warn!("caption font could not be parsed, panels will have no captions");
    }

    let (width, image_height) = source.dimensions();
    let block_height = style.caption_height + image_height;
    let count = matches.len() as u32;
    let height = block_height * count + style.panel_gap * (count - 1);
    let mut canvas = RgbImage::from_pixel(width, height, style.background);
    let mut captions = Vec::with_capacity(matches.len());

    for (i, m) in matches.iter().enumerate() {
        let mut panel = source.clone();
        draw_box(&mut panel, &m.prediction, style.prediction_color, style.thickness);
        draw_box(&mut panel, &m.ground_truth, style.ground_truth_color, style.thickness);

        let top = (block_height + style.panel_gap) * i as u32;
        imageops::replace(&mut canvas, &panel, 0, i64::from(top + style.caption_height));

        let caption = panel_caption(m);
        if let Some(font) = &font {
            draw_caption(&mut canvas, top, &caption, style, font);
        }
        info!("panel {} ({}): {caption}", i + 1, m.category);
        captions.push(caption);
    }

    Some(Rendering {
        image: canvas,
        captions,
    })
}

/// Match the annotation files and save a rendering of every match.
///
/// Uses the visualization threshold from `config` (see
/// [`MatchConfig::for_visualization`]). The composite is written to
/// `output_path` in the format implied by its extension. When nothing
/// matched, no file is written.
///
/// # Errors
///
/// Returns an error if an input cannot be read or decoded, if evaluation
/// fails, or if the output image cannot be written.
pub fn visualize_files<P, Q, R, S>(
    ground_truth_path: P,
    predictions_path: Q,
    image_path: R,
    output_path: S,
    config: &MatchConfig,
) -> Result<Evaluation>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
    S: AsRef<Path>,
{
    let ground_truth = load_from_file(ground_truth_path)?;
    let source = image::open(image_path.as_ref())?.to_rgb8();
    let predictions = load_from_file(predictions_path)?;

    let evaluation = evaluate_with_similarity(&ground_truth, &predictions, config)?;

    match render_matches(&source, &evaluation.matches, &RenderStyle::default()) {
        Some(rendering) => {
            rendering.image.save(output_path.as_ref())?;
            info!(
                "wrote {} panels to {}",
                rendering.captions.len(),
                output_path.as_ref().display()
            );
        }
        None => warn!("no matches above IoU {}, nothing rendered", config.iou_threshold),
    }

    Ok(evaluation)
}
