//! Vector PDF export of a rendered tree.
//!
//! The tree is cut into US-Letter pages of one fold each. Backgrounds are
//! clipped to the page band they fall in; a text line is placed on the page
//! holding its top edge. Fonts are the standard Type1 faces the metric tables
//! describe, so line breaks match the preview exactly.

use image::Rgba;
use pdf_writer::{Content, Finish, Name, Pdf, Rect as PdfRect, Ref, Str};
use tracing::debug;

use crate::export::sanitize::{color_or, BACKGROUND_FALLBACK, FOREGROUND_FALLBACK};
use crate::export::ExportError;
use crate::layout::{FontFamily, FontWeight, Node, NodeKind, Rect, RenderedTree};

pub const PAGE_WIDTH_PT: f32 = 612.0;
pub const PAGE_HEIGHT_PT: f32 = 792.0;

/// Kappa for approximating a quarter circle with one cubic Bézier.
const KAPPA: f32 = 0.552_284_8;

const FONTS: [(FontFamily, FontWeight, &[u8]); 4] = [
    (FontFamily::Helvetica, FontWeight::Regular, b"F1"),
    (FontFamily::Helvetica, FontWeight::Bold, b"F2"),
    (FontFamily::Times, FontWeight::Regular, b"F3"),
    (FontFamily::Times, FontWeight::Bold, b"F4"),
];

fn font_resource(font: FontFamily, weight: FontWeight) -> Name<'static> {
    FONTS
        .iter()
        .find(|(f, w, _)| *f == font && *w == weight)
        .map(|(_, _, name)| Name(*name))
        .unwrap_or(Name(b"F1"))
}

/// Sequential object ids.
struct RefAlloc(i32);

impl RefAlloc {
    fn bump(&mut self) -> Ref {
        self.0 += 1;
        Ref::new(self.0)
    }
}

/// Maps design units onto one page.
#[derive(Clone, Copy)]
struct PageMapping {
    scale: f32,
    band_top: f32,
    band_bottom: f32,
}

impl PageMapping {
    fn x(&self, x: f32) -> f32 {
        x * self.scale
    }

    /// PDF y grows upward from the bottom edge.
    fn y(&self, y: f32) -> f32 {
        PAGE_HEIGHT_PT - (y - self.band_top) * self.scale
    }

    /// The part of `rect` inside this page band.
    fn clip(&self, rect: Rect) -> Option<Rect> {
        let top = rect.y.max(self.band_top);
        let bottom = rect.bottom().min(self.band_bottom);
        (bottom > top && rect.width > 0.0).then(|| Rect::new(rect.x, top, rect.width, bottom - top))
    }

    fn holds_top_of(&self, rect: Rect) -> bool {
        rect.y >= self.band_top && rect.y < self.band_bottom
    }
}

/// Number of letter pages needed for the tree at its design width.
pub fn page_count(tree: &RenderedTree) -> usize {
    let fold = tree.root.frame.width * PAGE_HEIGHT_PT / PAGE_WIDTH_PT;
    if fold <= 0.0 {
        return 1;
    }
    ((tree.root.frame.height / fold).ceil() as usize).max(1)
}

pub fn write_pdf(tree: &RenderedTree) -> Result<Vec<u8>, ExportError> {
    let design_width = tree.root.frame.width;
    if design_width <= 0.0 {
        return Err(ExportError::Print("tree has no width".to_string()));
    }
    let scale = PAGE_WIDTH_PT / design_width;
    let fold = PAGE_HEIGHT_PT / scale;
    let pages = page_count(tree);

    let mut pdf = Pdf::new();
    let mut alloc = RefAlloc(0);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();

    let font_ids: Vec<(Name<'static>, Ref)> = FONTS
        .iter()
        .map(|(family, weight, resource)| {
            let id = alloc.bump();
            pdf.type1_font(id)
                .base_font(Name(family.pdf_base_font(*weight)))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            (Name(*resource), id)
        })
        .collect();

    let mut page_ids = Vec::with_capacity(pages);
    for index in 0..pages {
        let page_id = alloc.bump();
        let content_id = alloc.bump();
        page_ids.push(page_id);

        let mapping = PageMapping {
            scale,
            band_top: index as f32 * fold,
            band_bottom: (index + 1) as f32 * fold,
        };
        let mut content = Content::new();
        tree.root.visit(&mut |node| draw_node(&mut content, node, mapping));
        pdf.stream(content_id, &content.finish());

        let mut page = pdf.page(page_id);
        page.media_box(PdfRect::new(0.0, 0.0, PAGE_WIDTH_PT, PAGE_HEIGHT_PT));
        page.parent(page_tree_id);
        page.contents(content_id);
        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        for (name, id) in &font_ids {
            fonts.pair(*name, *id);
        }
        fonts.finish();
        resources.finish();
        page.finish();
    }

    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(pages as i32);
    pdf.catalog(catalog_id).pages(page_tree_id);

    let bytes = pdf.finish();
    debug!(pages, bytes = bytes.len(), template = %tree.template_id, "wrote pdf");
    Ok(bytes)
}

fn set_fill(content: &mut Content, color: Rgba<u8>) {
    let [r, g, b, _] = color.0;
    content.set_fill_rgb(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
    );
}

fn fill_rect(content: &mut Content, rect: Rect, color: Option<Rgba<u8>>, radius: f32, map: PageMapping) {
    let Some(color) = color else { return };
    if color.0[3] == 0 {
        return;
    }
    let Some(clipped) = map.clip(rect) else { return };
    set_fill(content, color);

    let x = map.x(clipped.x);
    let w = clipped.width * map.scale;
    let h = clipped.height * map.scale;
    let y = map.y(clipped.bottom());
    let r = (radius * map.scale).min(w / 2.0).min(h / 2.0);
    // Rounded corners only when the shape is entirely on this page.
    if r > 0.0 && clipped == rect {
        rounded_rect(content, x, y, w, h, r);
    } else {
        content.rect(x, y, w, h);
    }
    content.fill_nonzero();
}

fn rounded_rect(content: &mut Content, x: f32, y: f32, w: f32, h: f32, r: f32) {
    let k = r * KAPPA;
    content.move_to(x + r, y);
    content.line_to(x + w - r, y);
    content.cubic_to(x + w - r + k, y, x + w, y + r - k, x + w, y + r);
    content.line_to(x + w, y + h - r);
    content.cubic_to(x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h);
    content.line_to(x + r, y + h);
    content.cubic_to(x + r - k, y + h, x, y + h - r + k, x, y + h - r);
    content.line_to(x, y + r);
    content.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    content.close_path();
}

fn draw_node(content: &mut Content, node: &Node, map: PageMapping) {
    let paint = &node.paint;
    let frame = node.frame;
    match &node.kind {
        NodeKind::Text {
            text,
            font,
            size,
            weight,
        } => {
            if !map.holds_top_of(frame) {
                return;
            }
            let Some(color) = color_or(paint.color.as_deref(), FOREGROUND_FALLBACK) else {
                return;
            };
            // Baseline sits a little below the middle of the line box.
            let baseline = frame.y + frame.height / 2.0 + size * 0.35;
            content.save_state();
            set_fill(content, color);
            content.begin_text();
            content.set_font(font_resource(*font, *weight), size * map.scale);
            content.next_line(map.x(frame.x), map.y(baseline));
            content.show(Str(&win_ansi(text)));
            content.end_text();
            content.restore_state();
        }
        NodeKind::Image { .. } => {
            let placeholder = Some(Rgba([209, 213, 219, 255]));
            fill_rect(content, frame, placeholder, frame.width.min(frame.height) / 2.0, map);
        }
        NodeKind::Meter { fraction } => {
            let track = color_or(paint.background.as_deref(), BACKGROUND_FALLBACK);
            fill_rect(content, frame, track, paint.radius, map);
            let filled = Rect::new(frame.x, frame.y, frame.width * fraction, frame.height);
            let fill = color_or(paint.color.as_deref(), FOREGROUND_FALLBACK);
            fill_rect(content, filled, fill, paint.radius, map);
        }
        NodeKind::Block | NodeKind::Section { .. } | NodeKind::Rule => {
            let background = color_or(paint.background.as_deref(), BACKGROUND_FALLBACK);
            fill_rect(content, frame, background, paint.radius, map);
        }
    }
}

/// Encodes text for the WinAnsi-encoded standard fonts. Characters outside
/// the encoding become `?`.
pub fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '\u{20ac}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::sample::sample_document;
    use crate::document::{ResumeDocument, WorkExperience};
    use crate::templates::resolve;

    fn count_pages(pdf: &[u8]) -> usize {
        let needle = b"/Type /Page";
        pdf.windows(needle.len() + 1)
            .filter(|w| &w[..needle.len()] == needle && w[needle.len()] != b's')
            .count()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_write_pdf_single_page() {
        let mut doc = ResumeDocument::default();
        doc.profile.full_name = "Ada Lovelace".into();
        let tree = resolve(Some("05")).render(&doc, &[], 0.0);
        let pdf = write_pdf(&tree).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
        assert_eq!(count_pages(&pdf), 1);
        assert!(contains(&pdf, b"(Ada Lovelace)"));
        assert!(contains(&pdf, b"/Helvetica-Bold"));
    }

    #[test]
    fn test_long_document_paginates() {
        let mut doc = sample_document();
        let job = doc.work_experience[0].clone();
        doc.work_experience = (0..25)
            .map(|i| WorkExperience {
                company: format!("Company {i}"),
                ..job.clone()
            })
            .collect();
        let tree = resolve(Some("08")).render(&doc, &[], 0.0);
        let expected = page_count(&tree);
        assert!(expected > 1);
        assert_eq!(count_pages(&write_pdf(&tree).unwrap()), expected);
    }

    #[test]
    fn test_win_ansi_mapping() {
        assert_eq!(win_ansi("Caf\u{e9} \u{2022} \u{2014}"), b"Caf\xe9 \x95 \x97".to_vec());
        assert_eq!(win_ansi("\u{4e2d}"), b"?".to_vec());
    }

    #[test]
    fn test_clip_to_page_band() {
        let map = PageMapping {
            scale: 1.0,
            band_top: 100.0,
            band_bottom: 200.0,
        };
        assert_eq!(
            map.clip(Rect::new(0.0, 50.0, 10.0, 100.0)),
            Some(Rect::new(0.0, 100.0, 10.0, 50.0))
        );
        assert_eq!(map.clip(Rect::new(0.0, 250.0, 10.0, 10.0)), None);
        assert!(map.holds_top_of(Rect::new(0.0, 150.0, 1.0, 1.0)));
        assert!(!map.holds_top_of(Rect::new(0.0, 200.0, 1.0, 1.0)));
    }
}
