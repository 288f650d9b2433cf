//! Rasterizes the first page of a rendered tree into a PNG thumbnail.
//!
//! No font rasterizer is involved: text lines are drawn as greeked bars at
//! their measured width, and images as a placeholder disc. That is enough for
//! a thumbnail and keeps capture deterministic.

use std::io::Cursor;
use std::ops::{Deref, DerefMut};

use image::{DynamicImage, ImageFormat, Pixel, Rgba, RgbaImage};
use tracing::debug;

use crate::export::file::RasterImage;
use crate::export::sanitize::{color_or, sanitize_tree, BACKGROUND_FALLBACK, FOREGROUND_FALLBACK};
use crate::export::ExportError;
use crate::layout::{Node, NodeKind, Rect};

/// Root background while capturing.
pub const CAPTURE_BACKGROUND: &str = "#ffffff";

/// Largest edge we agree to allocate, in pixels.
const MAX_EDGE: u32 = 8192;

const IMAGE_PLACEHOLDER: Rgba<u8> = Rgba([209, 213, 219, 255]);

/// Forces the root background for the lifetime of the guard and restores the
/// previous value on drop, including on early return.
pub struct BackgroundOverride<'a> {
    root: &'a mut Node,
    saved: Option<String>,
}

impl<'a> BackgroundOverride<'a> {
    pub fn new(root: &'a mut Node, background: &str) -> Self {
        let saved = root.paint.background.replace(background.to_string());
        Self { root, saved }
    }
}

impl Deref for BackgroundOverride<'_> {
    type Target = Node;

    fn deref(&self) -> &Node {
        self.root
    }
}

impl DerefMut for BackgroundOverride<'_> {
    fn deref_mut(&mut self) -> &mut Node {
        self.root
    }
}

impl Drop for BackgroundOverride<'_> {
    fn drop(&mut self) {
        self.root.paint.background = self.saved.take();
    }
}

/// Sanitizes colors, then rasterizes the first fold (one letter-proportioned
/// page at the root's width) at `pixel_ratio` pixels per design unit.
pub fn capture(root: &mut Node, pixel_ratio: f32) -> Result<RasterImage, ExportError> {
    sanitize_tree(root);
    let guard = BackgroundOverride::new(root, CAPTURE_BACKGROUND);
    rasterize(&guard, pixel_ratio)
}

fn rasterize(root: &Node, pixel_ratio: f32) -> Result<RasterImage, ExportError> {
    let design_width = root.frame.width;
    let fold_height = design_width * 11.0 / 8.5;
    if !(design_width > 0.0 && pixel_ratio > 0.0 && pixel_ratio.is_finite()) {
        return Err(ExportError::CaptureFailure(format!(
            "nothing to capture (width {design_width}, pixel ratio {pixel_ratio})"
        )));
    }
    let width = (design_width * pixel_ratio).round() as u32;
    let height = (fold_height * pixel_ratio).round() as u32;
    if width == 0 || height == 0 || width > MAX_EDGE || height > MAX_EDGE {
        return Err(ExportError::CaptureFailure(format!(
            "canvas {width}x{height} out of range"
        )));
    }

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    let mut painter = Painter {
        canvas: &mut canvas,
        ratio: pixel_ratio,
    };
    root.visit(&mut |node| painter.paint(node));

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| ExportError::CaptureFailure(e.to_string()))?;
    debug!(width, height, bytes = png.len(), "captured thumbnail");

    Ok(RasterImage::from_png(width, height, &png))
}

struct Painter<'a> {
    canvas: &'a mut RgbaImage,
    ratio: f32,
}

impl Painter<'_> {
    fn paint(&mut self, node: &Node) {
        let paint = &node.paint;
        let frame = node.frame;
        match &node.kind {
            NodeKind::Text { size, .. } => {
                if let Some(mut color) = color_or(paint.color.as_deref(), FOREGROUND_FALLBACK) {
                    // Greeked line: a bar through the x-height band.
                    color.0[3] = (f32::from(color.0[3]) * 0.7) as u8;
                    let bar = Rect::new(
                        frame.x,
                        frame.y + (frame.height - size * 0.5) / 2.0,
                        frame.width,
                        size * 0.5,
                    );
                    self.fill(bar, color, size * 0.1);
                }
            }
            NodeKind::Image { .. } => {
                self.fill(frame, IMAGE_PLACEHOLDER, frame.width.min(frame.height) / 2.0);
            }
            NodeKind::Meter { fraction } => {
                if let Some(track) = color_or(paint.background.as_deref(), BACKGROUND_FALLBACK) {
                    self.fill(frame, track, paint.radius);
                }
                if let Some(fill) = color_or(paint.color.as_deref(), FOREGROUND_FALLBACK) {
                    let filled = Rect::new(frame.x, frame.y, frame.width * fraction, frame.height);
                    self.fill(filled, fill, paint.radius);
                }
            }
            NodeKind::Block | NodeKind::Section { .. } | NodeKind::Rule => {
                if let Some(background) = color_or(paint.background.as_deref(), BACKGROUND_FALLBACK) {
                    self.fill(frame, background, paint.radius);
                }
                if let Some(border) = color_or(paint.border.as_deref(), FOREGROUND_FALLBACK) {
                    self.stroke(frame, border);
                }
            }
        }
    }

    /// Fills a (possibly rounded) rect given in design units.
    fn fill(&mut self, rect: Rect, color: Rgba<u8>, radius: f32) {
        if color.0[3] == 0 {
            return;
        }
        let r = self.ratio;
        let (x0, y0) = (rect.x * r, rect.y * r);
        let (x1, y1) = (rect.right() * r, rect.bottom() * r);
        let radius = (radius * r).min((x1 - x0) / 2.0).min((y1 - y0) / 2.0).max(0.0);

        let (w, h) = self.canvas.dimensions();
        let px0 = x0.floor().max(0.0) as u32;
        let py0 = y0.floor().max(0.0) as u32;
        let px1 = (x1.ceil().max(0.0) as u32).min(w);
        let py1 = (y1.ceil().max(0.0) as u32).min(h);

        for py in py0..py1 {
            for px in px0..px1 {
                let (cx, cy) = (px as f32 + 0.5, py as f32 + 0.5);
                if cx < x0 || cx > x1 || cy < y0 || cy > y1 {
                    continue;
                }
                if radius > 0.0 && outside_corner(cx, cy, x0, y0, x1, y1, radius) {
                    continue;
                }
                self.canvas.get_pixel_mut(px, py).blend(&color);
            }
        }
    }

    /// One-pixel outline.
    fn stroke(&mut self, rect: Rect, color: Rgba<u8>) {
        let px = 1.0 / self.ratio;
        let edges = [
            Rect::new(rect.x, rect.y, rect.width, px),
            Rect::new(rect.x, rect.bottom() - px, rect.width, px),
            Rect::new(rect.x, rect.y, px, rect.height),
            Rect::new(rect.right() - px, rect.y, px, rect.height),
        ];
        for edge in edges {
            self.fill(edge, color, 0.0);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn outside_corner(cx: f32, cy: f32, x0: f32, y0: f32, x1: f32, y1: f32, radius: f32) -> bool {
    let ccx = if cx < x0 + radius {
        x0 + radius
    } else if cx > x1 - radius {
        x1 - radius
    } else {
        return false;
    };
    let ccy = if cy < y0 + radius {
        y0 + radius
    } else if cy > y1 - radius {
        y1 - radius
    } else {
        return false;
    };
    let (dx, dy) = (cx - ccx, cy - ccy);
    dx * dx + dy * dy > radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::sample::sample_document;
    use crate::export::file::to_file;
    use crate::layout::Paint;
    use crate::templates::resolve;

    fn decode(image: &RasterImage) -> RgbaImage {
        let file = to_file(image, "t.png").unwrap();
        image::load_from_memory_with_format(&file.bytes, ImageFormat::Png)
            .unwrap()
            .to_rgba8()
    }

    #[test]
    fn test_capture_first_fold_at_pixel_ratio() {
        let mut root = resolve(Some("01")).render(&sample_document(), &[], 0.0).root;
        let image = capture(&mut root, 0.5).unwrap();
        assert_eq!(image.width, 400);
        assert_eq!(image.height, (800.0_f32 * 11.0 / 8.5 * 0.5).round() as u32);
        assert!(image.data_url.starts_with("data:image/png;base64,"));
        assert_eq!(decode(&image).dimensions(), (image.width, image.height));
    }

    #[test]
    fn test_background_restored_after_capture() {
        let mut root = Node::block(Rect::new(0.0, 0.0, 200.0, 100.0))
            .with_paint(Paint::fill("#EBFDFF"));
        capture(&mut root, 1.0).unwrap();
        assert_eq!(root.paint.background.as_deref(), Some("#EBFDFF"));
    }

    #[test]
    fn test_background_restored_after_failure() {
        let mut root = Node::block(Rect::new(0.0, 0.0, 0.0, 0.0)).with_paint(Paint::fill("#123456"));
        assert!(matches!(capture(&mut root, 1.0), Err(ExportError::CaptureFailure(_))));
        assert_eq!(root.paint.background.as_deref(), Some("#123456"));
    }

    #[test]
    fn test_root_is_painted_white_and_children_keep_colors() {
        let mut root = Node::block(Rect::new(0.0, 0.0, 100.0, 50.0))
            .with_paint(Paint::fill("#000000"))
            .with_children(vec![Node::block(Rect::new(10.0, 10.0, 20.0, 20.0))
                .with_paint(Paint::fill("#ff0000"))]);
        let pixels = decode(&capture(&mut root, 1.0).unwrap());
        assert_eq!(pixels.get_pixel(2, 2), &Rgba([255, 255, 255, 255]));
        assert_eq!(pixels.get_pixel(20, 20), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_unsupported_background_captures_as_white() {
        let mut root = Node::block(Rect::new(0.0, 0.0, 100.0, 50.0)).with_children(vec![
            Node::block(Rect::new(0.0, 0.0, 100.0, 50.0)).with_paint(Paint::fill("oklch(60% 0.2 30)")),
        ]);
        let pixels = decode(&capture(&mut root, 1.0).unwrap());
        assert_eq!(pixels.get_pixel(50, 25), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_oversized_canvas_is_rejected() {
        let mut root = Node::block(Rect::new(0.0, 0.0, 800.0, 100.0));
        assert!(matches!(capture(&mut root, 100.0), Err(ExportError::CaptureFailure(_))));
    }
}
