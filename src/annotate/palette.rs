//! Fixed color palettes for region drawing.
//!
//! The main palette cycles through 19 named colors for detection and
//! segmentation overlays; OCR quad boxes keep their own shorter cycle so
//! dense text pages stay readable.

use image::Rgb;

/// Palette for boxes and polygons.
pub const COLORMAP: [Rgb<u8>; 19] = [
    Rgb([0, 0, 255]),     // blue
    Rgb([255, 165, 0]),   // orange
    Rgb([0, 128, 0]),     // green
    Rgb([128, 0, 128]),   // purple
    Rgb([165, 42, 42]),   // brown
    Rgb([255, 192, 203]), // pink
    Rgb([128, 128, 128]), // gray
    Rgb([128, 128, 0]),   // olive
    Rgb([0, 255, 255]),   // cyan
    Rgb([255, 0, 0]),     // red
    Rgb([0, 255, 0]),     // lime
    Rgb([75, 0, 130]),    // indigo
    Rgb([238, 130, 238]), // violet
    Rgb([0, 255, 255]),   // aqua
    Rgb([255, 0, 255]),   // magenta
    Rgb([255, 127, 80]),  // coral
    Rgb([255, 215, 0]),   // gold
    Rgb([210, 180, 140]), // tan
    Rgb([135, 206, 235]), // skyblue
];

/// Palette for OCR quad boxes.
pub const QUAD_COLORS: [Rgb<u8>; 6] = [
    Rgb([255, 0, 0]),   // red
    Rgb([0, 128, 0]),   // green
    Rgb([0, 0, 255]),   // blue
    Rgb([255, 255, 0]), // yellow
    Rgb([128, 0, 128]), // purple
    Rgb([255, 165, 0]), // orange
];
