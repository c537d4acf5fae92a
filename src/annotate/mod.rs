//! Rendering of regions onto a copy of the source image.
//!
//! The annotator never mutates the caller's image: it draws onto a fresh
//! copy of the pixel buffer and returns it alongside draw statistics. A
//! malformed region is logged and skipped so that one bad entry never
//! aborts annotation of the rest of the batch.

mod palette;

pub use palette::{COLORMAP, QUAD_COLORS};

use ab_glyph::FontVec;
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_ellipse_mut, draw_hollow_rect_mut, draw_line_segment_mut, draw_polygon_mut,
    draw_text_mut,
};
use imageproc::point::Point as CanvasPoint;
use imageproc::rect::Rect;
use rand::rngs::{StdRng, ThreadRng};
use rand::{RngExt, SeedableRng};
use tracing::{debug, info, warn};

use crate::region::{Geometry, Region, RegionSet};

/// How a color is chosen for each region.
///
/// The two modes are NOT semantically equivalent: `Indexed` output is
/// reproducible and is what tests and batch pipelines should use;
/// `Random` is acceptable for interactive use and is opt-in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorPolicy {
    /// Region index modulo palette size. Deterministic, the default.
    Indexed,
    /// A palette entry drawn per region. With a seed the sequence is
    /// reproducible; without one the thread RNG is used.
    Random { seed: Option<u64> },
}

impl Default for ColorPolicy {
    fn default() -> Self {
        ColorPolicy::Indexed
    }
}

/// Settings that control how regions are rendered.
pub struct Style {
    /// Fill polygons instead of drawing outlines only.
    pub fill_polygons: bool,

    /// Draw label text next to geometry. Text also needs a font.
    pub show_labels: bool,

    /// Outline thickness in pixels for boxes.
    pub thickness: i32,

    /// The font to use for label rendering. If None, labels are skipped.
    pub font: Option<FontVec>,

    /// The scale factor for the font.
    pub font_scale: f32,

    /// Color selection policy.
    pub colors: ColorPolicy,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill_polygons: false,
            show_labels: true,
            thickness: 2,
            font: None,
            font_scale: 16.0,
            colors: ColorPolicy::Indexed,
        }
    }
}

impl Style {
    /// Creates a style with a system font loaded from common locations.
    ///
    /// If no system font is found, labels are skipped and geometry is
    /// still drawn.
    pub fn with_system_font() -> Self {
        let font_paths = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/System/Library/Fonts/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ];

        for path in &font_paths {
            if let Ok(font_data) = std::fs::read(path) {
                if let Ok(font) = FontVec::try_from_vec(font_data) {
                    info!("Loaded system font: {}", path);
                    return Self {
                        font: Some(font),
                        ..Self::default()
                    };
                }
            }
        }

        debug!("No system font found, label rendering will be skipped");
        Self::default()
    }

    /// Enables polygon filling.
    pub fn with_fill(mut self) -> Self {
        self.fill_polygons = true;
        self
    }

    /// Sets the color selection policy.
    pub fn with_colors(mut self, colors: ColorPolicy) -> Self {
        self.colors = colors;
        self
    }
}

/// The result of annotating one image.
pub struct Annotated {
    /// A new buffer with the same dimensions as the input.
    pub image: RgbImage,

    /// Number of regions drawn.
    pub drawn: usize,

    /// Number of regions skipped because drawing them failed.
    pub skipped: usize,
}

enum ColorPicker {
    Indexed,
    Seeded(StdRng),
    Thread(ThreadRng),
}

impl ColorPicker {
    fn new(policy: ColorPolicy) -> Self {
        match policy {
            ColorPolicy::Indexed => ColorPicker::Indexed,
            ColorPolicy::Random { seed: Some(seed) } => {
                ColorPicker::Seeded(StdRng::seed_from_u64(seed))
            }
            ColorPolicy::Random { seed: None } => ColorPicker::Thread(rand::rng()),
        }
    }

    fn pick(&mut self, index: usize, palette: &[Rgb<u8>]) -> Rgb<u8> {
        match self {
            ColorPicker::Indexed => palette[index % palette.len()],
            ColorPicker::Seeded(rng) => palette[rng.random_range(0..palette.len())],
            ColorPicker::Thread(rng) => palette[rng.random_range(0..palette.len())],
        }
    }
}

/// Draws every region in the set onto a copy of `image`.
///
/// The input image is left untouched; regions are expected to be clamped
/// already (the interpretation pipeline guarantees it). Regions whose
/// geometry cannot be drawn are logged at `warn` and counted in
/// [`Annotated::skipped`].
pub fn annotate(image: &RgbImage, set: &RegionSet, style: &Style) -> Annotated {
    let mut canvas = image.clone();
    let mut picker = ColorPicker::new(style.colors);
    let mut drawn = 0;
    let mut skipped = 0;

    info!(regions = set.len(), "drawing regions");

    for (index, region) in set.regions.iter().enumerate() {
        let palette: &[Rgb<u8>] = match region.geometry {
            Geometry::Quad(_) => &QUAD_COLORS,
            _ => &COLORMAP,
        };
        let color = picker.pick(index, palette);

        match draw_region(&mut canvas, index, region, style, color) {
            Ok(()) => drawn += 1,
            Err(reason) => {
                warn!(region = index, reason, "skipping region");
                skipped += 1;
            }
        }
    }

    debug!(drawn, skipped, "finished drawing");

    Annotated {
        image: canvas,
        drawn,
        skipped,
    }
}

/// Draws one region, reporting a reason string on failure.
fn draw_region(
    canvas: &mut RgbImage,
    index: usize,
    region: &Region,
    style: &Style,
    color: Rgb<u8>,
) -> Result<(), &'static str> {
    if !region.geometry.is_finite() {
        return Err("non-finite coordinates");
    }

    match &region.geometry {
        Geometry::Bounds(bbox) => {
            let bbox = bbox.ordered();
            draw_box(canvas, &bbox, style, color);
            draw_label(canvas, style, bbox.x1 as i32, bbox.y1 as i32, &region.label, color);
        }
        Geometry::Polygon(points) => {
            draw_polygon(canvas, points, style, color)?;
            // Segmentation output has no text labels; a 1-based index at
            // the first vertex identifies the polygon instead.
            let anchor = points[0];
            draw_label(
                canvas,
                style,
                anchor.x as i32,
                anchor.y as i32,
                &(index + 1).to_string(),
                color,
            );
        }
        Geometry::Quad(points) => {
            draw_quad(canvas, points, color);
            let truncated: String = region.label.chars().take(10).collect();
            let anchor = points[0];
            draw_label(
                canvas,
                style,
                anchor.x as i32,
                anchor.y as i32,
                &format!("{}:{}", index + 1, truncated),
                color,
            );
        }
    }

    Ok(())
}

/// Draws a hollow rectangle with the configured thickness.
///
/// A zero-area box degenerates to a 1px border, which is valid output.
fn draw_box(canvas: &mut RgbImage, bbox: &crate::region::BBox, style: &Style, color: Rgb<u8>) {
    let x = bbox.x1 as i32;
    let y = bbox.y1 as i32;
    let width = (bbox.width() as u32).max(1);
    let height = (bbox.height() as u32).max(1);

    draw_hollow_rect_mut(canvas, Rect::at(x, y).of_size(width, height), color);

    // Thickness rings shrink inward so they stay inside the clamped box.
    for t in 1..style.thickness {
        let inner_w = width.saturating_sub(2 * t as u32).max(1);
        let inner_h = height.saturating_sub(2 * t as u32).max(1);
        draw_hollow_rect_mut(canvas, Rect::at(x + t, y + t).of_size(inner_w, inner_h), color);
    }
}

/// Draws a polygon: optional fill, outline, and a dot at every vertex.
fn draw_polygon(
    canvas: &mut RgbImage,
    points: &[crate::region::Point],
    style: &Style,
    color: Rgb<u8>,
) -> Result<(), &'static str> {
    let mut vertices: Vec<CanvasPoint<i32>> = points
        .iter()
        .map(|p| CanvasPoint::new(p.x as i32, p.y as i32))
        .collect();
    vertices.dedup();
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    if vertices.len() < 3 {
        return Err("fewer than 3 distinct vertices");
    }

    if style.fill_polygons {
        draw_polygon_mut(canvas, &vertices, color);
    }

    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        draw_line_segment_mut(
            canvas,
            (a.x as f32, a.y as f32),
            (b.x as f32, b.y as f32),
            color,
        );
    }

    for vertex in &vertices {
        draw_filled_ellipse_mut(canvas, (vertex.x, vertex.y), 2, 2, color);
    }

    Ok(())
}

/// Draws the four outline segments of an OCR quad.
fn draw_quad(canvas: &mut RgbImage, points: &[crate::region::Point; 4], color: Rgb<u8>) {
    for i in 0..4 {
        let a = points[i];
        let b = points[(i + 1) % 4];
        draw_line_segment_mut(
            canvas,
            (a.x as f32, a.y as f32),
            (b.x as f32, b.y as f32),
            color,
        );
    }
}

/// Draws label text at an anchor if labels are enabled and a font is set.
fn draw_label(
    canvas: &mut RgbImage,
    style: &Style,
    x: i32,
    y: i32,
    text: &str,
    color: Rgb<u8>,
) {
    if !style.show_labels || text.is_empty() {
        return;
    }
    let Some(font) = &style.font else {
        return;
    };

    let (width, height) = (canvas.width() as i32, canvas.height() as i32);
    if x >= 0 && y >= 0 && x < width && y < height {
        draw_text_mut(canvas, color, x, y, style.font_scale, font, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{BBox, Point, Region};

    fn checker(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        })
    }

    #[test]
    fn test_annotate_does_not_mutate_input() {
        let image = checker(64, 48);
        let before = image.clone();
        let set = RegionSet::new(vec![Region::new(
            "cat",
            Geometry::Bounds(BBox::from_xyxy(10.0, 10.0, 50.0, 40.0)),
        )]);

        let annotated = annotate(&image, &set, &Style::default());

        assert_eq!(image.as_raw(), before.as_raw());
        assert_eq!(annotated.image.dimensions(), image.dimensions());
        assert_ne!(annotated.image.as_raw(), image.as_raw());
        assert_eq!(annotated.drawn, 1);
        assert_eq!(annotated.skipped, 0);
    }

    #[test]
    fn test_zero_area_box_draws_without_panicking() {
        let image = checker(32, 32);
        let set = RegionSet::new(vec![Region::unlabeled(Geometry::Bounds(BBox::from_xyxy(
            5.0, 5.0, 5.0, 5.0,
        )))]);

        let annotated = annotate(&image, &set, &Style::default());
        assert_eq!(annotated.drawn, 1);
    }

    #[test]
    fn test_degenerate_polygon_is_skipped_not_fatal() {
        let image = checker(32, 32);
        let set = RegionSet::new(vec![
            // All vertices collapse to one pixel after integer conversion.
            Region::unlabeled(Geometry::Polygon(vec![
                Point::new(3.0, 3.0),
                Point::new(3.2, 3.1),
                Point::new(3.4, 3.3),
            ])),
            Region::unlabeled(Geometry::Bounds(BBox::from_xyxy(1.0, 1.0, 10.0, 10.0))),
        ]);

        let annotated = annotate(&image, &set, &Style::default());
        assert_eq!(annotated.drawn, 1);
        assert_eq!(annotated.skipped, 1);
    }

    #[test]
    fn test_filled_polygon_draws() {
        let image = checker(64, 64);
        let set = RegionSet::new(vec![Region::unlabeled(Geometry::Polygon(vec![
            Point::new(10.0, 10.0),
            Point::new(50.0, 10.0),
            Point::new(30.0, 50.0),
        ]))]);

        let annotated = annotate(&image, &set, &Style::default().with_fill());
        assert_eq!(annotated.drawn, 1);
    }

    #[test]
    fn test_quad_draws() {
        let image = checker(64, 64);
        let set = RegionSet::new(vec![Region::new(
            "HELLO WORLD TRUNCATED",
            Geometry::Quad([
                Point::new(5.0, 5.0),
                Point::new(55.0, 8.0),
                Point::new(54.0, 20.0),
                Point::new(4.0, 17.0),
            ]),
        )]);

        let annotated = annotate(&image, &set, &Style::default());
        assert_eq!(annotated.drawn, 1);
    }

    #[test]
    fn test_indexed_colors_are_deterministic() {
        let image = checker(32, 32);
        let set = RegionSet::new(vec![Region::unlabeled(Geometry::Bounds(BBox::from_xyxy(
            2.0, 2.0, 20.0, 20.0,
        )))]);

        let a = annotate(&image, &set, &Style::default());
        let b = annotate(&image, &set, &Style::default());
        assert_eq!(a.image.as_raw(), b.image.as_raw());
    }

    #[test]
    fn test_seeded_random_colors_are_reproducible() {
        let image = checker(32, 32);
        let set = RegionSet::new(vec![
            Region::unlabeled(Geometry::Bounds(BBox::from_xyxy(2.0, 2.0, 12.0, 12.0))),
            Region::unlabeled(Geometry::Bounds(BBox::from_xyxy(14.0, 14.0, 28.0, 28.0))),
        ]);

        let style = |seed| Style::default().with_colors(ColorPolicy::Random { seed: Some(seed) });
        let a = annotate(&image, &set, &style(7));
        let b = annotate(&image, &set, &style(7));
        assert_eq!(a.image.as_raw(), b.image.as_raw());
    }

    #[test]
    fn test_non_finite_geometry_is_skipped() {
        let image = checker(32, 32);
        let set = RegionSet::new(vec![Region::unlabeled(Geometry::Bounds(BBox::from_xyxy(
            f64::NAN,
            0.0,
            10.0,
            10.0,
        )))]);

        let annotated = annotate(&image, &set, &Style::default());
        assert_eq!(annotated.drawn, 0);
        assert_eq!(annotated.skipped, 1);
    }
}
