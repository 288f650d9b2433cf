//! A vertical cursor that stacks wrapped text, rows, bullets and rules inside
//! a fixed-width column. Every template skin is built from these primitives.

use crate::document::SectionKind;
use crate::layout::font_metrics::{get_metrics, FontFamily, FontWeight};
use crate::layout::tree::{Node, NodeKind, Paint, Rect};
use crate::layout::wrap::wrap_text;

/// Line box height as a multiple of the font size.
pub const LINE_HEIGHT: f32 = 1.4;

const BULLET_INDENT: f32 = 14.0;
const BULLET_DOT: f32 = 3.5;

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: FontFamily,
    pub size: f32,
    pub weight: FontWeight,
    pub color: String,
}

impl TextStyle {
    pub fn new(font: FontFamily, size: f32, color: impl Into<String>) -> Self {
        Self {
            font,
            size,
            weight: FontWeight::Regular,
            color: color.into(),
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn sized(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn colored(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn line_height(&self) -> f32 {
        self.size * LINE_HEIGHT
    }

    pub fn measure(&self, text: &str) -> f32 {
        get_metrics(self.font).text_width(text, self.size, self.weight)
    }

    fn line_node(&self, text: String, x: f32, y: f32, width: f32) -> Node {
        Node::new(
            NodeKind::Text {
                text,
                font: self.font,
                size: self.size,
                weight: self.weight,
            },
            Rect::new(x, y, width, self.line_height()),
        )
        .with_paint(Paint::text(self.color.clone()))
    }
}

/// Horizontal alignment of a wrapped paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
}

pub struct Flow {
    x: f32,
    width: f32,
    start_y: f32,
    cursor: f32,
    nodes: Vec<Node>,
}

impl Flow {
    pub fn new(x: f32, y: f32, width: f32) -> Self {
        Self {
            x,
            width,
            start_y: y,
            cursor: y,
            nodes: Vec::new(),
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn gap(&mut self, height: f32) {
        self.cursor += height;
    }

    /// Wrapped paragraph. Blank text adds nothing.
    pub fn text(&mut self, text: &str, style: &TextStyle) {
        self.text_aligned(text, style, Align::Left);
    }

    pub fn text_aligned(&mut self, text: &str, style: &TextStyle, align: Align) {
        let lines = wrap_text(
            text,
            get_metrics(style.font),
            style.size,
            style.weight,
            self.width,
        );
        for line in lines {
            let x = match align {
                Align::Left => self.x,
                Align::Center => self.x + (self.width - line.width).max(0.0) / 2.0,
            };
            self.nodes
                .push(style.line_node(line.text, x, self.cursor, line.width));
            self.cursor += style.line_height();
        }
    }

    /// Differently styled runs centered on one line, one space apart. Runs are
    /// not wrapped; blank runs are dropped.
    pub fn spans_centered(&mut self, spans: &[(&str, &TextStyle)]) {
        let spans: Vec<(&str, &TextStyle)> = spans
            .iter()
            .map(|(text, style)| (text.trim(), *style))
            .filter(|(text, _)| !text.is_empty())
            .collect();
        let Some((_, first)) = spans.first() else {
            return;
        };
        let space = first.measure(" ");
        let widths: Vec<f32> = spans.iter().map(|(text, style)| style.measure(text)).collect();
        let total = widths.iter().sum::<f32>() + space * (spans.len() - 1) as f32;
        let height = spans
            .iter()
            .map(|(_, style)| style.line_height())
            .fold(0.0, f32::max);

        let mut x = self.x + (self.width - total).max(0.0) / 2.0;
        for ((text, style), width) in spans.iter().zip(widths) {
            self.nodes
                .push(style.line_node(text.to_string(), x, self.cursor, width));
            x += width + space;
        }
        self.cursor += height;
    }

    /// Left text wrapped into whatever the right-aligned text leaves free.
    /// Either side may be blank.
    pub fn row(&mut self, left: &str, left_style: &TextStyle, right: &str, right_style: &TextStyle) {
        let right = right.trim();
        let left = left.trim();
        if left.is_empty() && right.is_empty() {
            return;
        }
        let right_w = if right.is_empty() {
            0.0
        } else {
            right_style.measure(right).min(self.width)
        };
        let top = self.cursor;
        if !right.is_empty() {
            self.nodes.push(right_style.line_node(
                right.to_string(),
                self.x + self.width - right_w,
                top,
                right_w,
            ));
        }

        let mut left_flow = Flow::new(self.x, top, (self.width - right_w - 8.0).max(1.0));
        left_flow.text(left, left_style);
        let left_bottom = left_flow.cursor;
        self.nodes.extend(left_flow.nodes);

        let right_bottom = if right.is_empty() {
            top
        } else {
            top + right_style.line_height()
        };
        self.cursor = left_bottom.max(right_bottom);
    }

    /// `Label: value` with a bold label, wrapping the value beside it.
    pub fn labeled(&mut self, label: &str, value: &str, style: &TextStyle) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        let label_style = style.clone().bold();
        let label = format!("{label}:");
        let label_w = label_style.measure(&label);
        let top = self.cursor;
        self.nodes
            .push(label_style.line_node(label, self.x, top, label_w));

        let indent = label_w + style.measure(" ");
        let mut value_flow = Flow::new(self.x + indent, top, (self.width - indent).max(1.0));
        value_flow.text(value, style);
        self.cursor = value_flow.cursor.max(top + style.line_height());
        self.nodes.extend(value_flow.nodes);
    }

    /// Bulleted list; each item wraps under its own hanging indent.
    pub fn bullets(&mut self, items: &[String], style: &TextStyle) {
        for item in items {
            let top = self.cursor;
            let dot_y = top + (style.line_height() - BULLET_DOT) / 2.0;
            self.nodes.push(
                Node::block(Rect::new(self.x + 4.0, dot_y, BULLET_DOT, BULLET_DOT))
                    .with_paint(Paint::fill(style.color.clone()).rounded(BULLET_DOT / 2.0)),
            );
            let mut item_flow = Flow::new(
                self.x + BULLET_INDENT,
                top,
                (self.width - BULLET_INDENT).max(1.0),
            );
            item_flow.text(item, style);
            self.cursor = item_flow.cursor;
            self.nodes.extend(item_flow.nodes);
            self.cursor += style.size * 0.2;
        }
    }

    /// Rounded tags laid left to right, wrapping to new rows.
    pub fn chips(&mut self, items: &[&str], style: &TextStyle, background: &str) {
        const PAD_X: f32 = 8.0;
        const PAD_Y: f32 = 3.0;
        const SPACING: f32 = 6.0;

        let chip_h = style.line_height() + PAD_Y * 2.0;
        let mut x = self.x;
        let mut placed_any = false;
        for item in items.iter().map(|i| i.trim()).filter(|i| !i.is_empty()) {
            let text_w = style.measure(item).min(self.width - PAD_X * 2.0);
            let chip_w = text_w + PAD_X * 2.0;
            if placed_any && x + chip_w > self.x + self.width {
                x = self.x;
                self.cursor += chip_h + SPACING;
            }
            let label = style.line_node(item.to_string(), x + PAD_X, self.cursor + PAD_Y, text_w);
            self.nodes.push(
                Node::block(Rect::new(x, self.cursor, chip_w, chip_h))
                    .with_paint(Paint::fill(background).rounded(chip_h / 2.0))
                    .with_children(vec![label]),
            );
            x += chip_w + SPACING;
            placed_any = true;
        }
        if placed_any {
            self.cursor += chip_h;
        }
    }

    pub fn rule(&mut self, color: &str, thickness: f32) {
        self.nodes.push(
            Node::new(NodeKind::Rule, Rect::new(self.x, self.cursor, self.width, thickness))
                .with_paint(Paint::fill(color)),
        );
        self.cursor += thickness;
    }

    /// Proficiency bar across the full column width.
    pub fn meter(&mut self, fraction: f32, track: &str, fill: &str, height: f32) {
        self.nodes.push(
            Node::new(
                NodeKind::Meter {
                    fraction: fraction.clamp(0.0, 1.0),
                },
                Rect::new(self.x, self.cursor, self.width, height),
            )
            .with_paint(Paint {
                background: Some(track.to_string()),
                color: Some(fill.to_string()),
                border: None,
                radius: height / 2.0,
            }),
        );
        self.cursor += height;
    }

    /// Adds a pre-built node and moves the cursor below it.
    pub fn push(&mut self, node: Node) {
        self.cursor = self.cursor.max(node.frame.bottom());
        self.nodes.push(node);
    }

    /// Adds a node without moving the cursor; later content paints over it.
    pub fn place(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Starts a nested flow at the current cursor, indented by `indent`.
    pub fn nested(&self, indent: f32) -> Flow {
        Flow::new(self.x + indent, self.cursor, (self.width - indent).max(1.0))
    }

    /// Takes a nested flow's nodes back, moving the cursor below them.
    pub fn absorb(&mut self, nested: Flow) {
        self.cursor = self.cursor.max(nested.cursor);
        self.nodes.extend(nested.nodes);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn frame(&self) -> Rect {
        Rect::new(self.x, self.start_y, self.width, self.cursor - self.start_y)
    }

    pub fn into_block(self) -> Node {
        let frame = self.frame();
        Node::block(frame).with_children(self.nodes)
    }

    pub fn finish_section(self, section: SectionKind) -> Node {
        let frame = self.frame();
        Node::new(NodeKind::Section { section }, frame).with_children(self.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> TextStyle {
        TextStyle::new(FontFamily::Helvetica, 10.0, "#333333")
    }

    #[test]
    fn test_text_advances_cursor_per_line() {
        let mut flow = Flow::new(0.0, 100.0, 120.0);
        flow.text("Built a streaming parser for structured logs at scale", &body());
        let block = flow.into_block();
        let lines = block.children.len();
        assert!(lines >= 2);
        assert!((block.frame.height - lines as f32 * 14.0).abs() < 1e-3);
        assert_eq!(block.frame.y, 100.0);
    }

    #[test]
    fn test_blank_text_adds_nothing() {
        let mut flow = Flow::new(0.0, 0.0, 100.0);
        flow.text("  ", &body());
        flow.row("", &body(), "", &body());
        flow.labeled("Phone", "", &body());
        assert!(flow.is_empty());
        assert_eq!(flow.cursor(), 0.0);
    }

    #[test]
    fn test_row_right_aligns_second_text() {
        let mut flow = Flow::new(10.0, 0.0, 300.0);
        flow.row("Acme Corp", &body().bold(), "Jan 2020 - Mar 2022", &body());
        let block = flow.into_block();
        let right = &block.children[0];
        assert!((right.frame.right() - 310.0).abs() < 1e-3);
        assert_eq!(block.children[1].frame.x, 10.0);
    }

    #[test]
    fn test_bullets_emit_marker_and_indented_text() {
        let mut flow = Flow::new(0.0, 0.0, 300.0);
        flow.bullets(&["Shipped v2".to_string(), "Cut p99 by 40%".to_string()], &body());
        let block = flow.into_block();
        let texts: Vec<&Node> = block
            .children
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Text { .. }))
            .collect();
        assert_eq!(texts.len(), 2);
        assert!(texts.iter().all(|n| n.frame.x == BULLET_INDENT));
    }

    #[test]
    fn test_chips_wrap_to_new_row() {
        let mut flow = Flow::new(0.0, 0.0, 120.0);
        flow.chips(&["Reading", "Mountaineering", "Chess"], &body(), "#CEFAFE");
        let block = flow.into_block();
        assert_eq!(block.children.len(), 3);
        let rows: std::collections::HashSet<i32> =
            block.children.iter().map(|c| c.frame.y as i32).collect();
        assert!(rows.len() >= 2);
    }

    #[test]
    fn test_spans_centered_share_one_line() {
        let mut flow = Flow::new(0.0, 0.0, 400.0);
        let accent = body().colored("#E60000");
        flow.spans_centered(&[("Ada", &body()), ("  ", &accent), ("Lovelace", &accent)]);
        let block = flow.into_block();
        assert_eq!(block.children.len(), 2);
        let (first, second) = (&block.children[0], &block.children[1]);
        assert_eq!(first.frame.y, second.frame.y);
        assert!(second.frame.x > first.frame.right());
        assert_eq!(second.paint.color.as_deref(), Some("#E60000"));
        let left_margin = first.frame.x;
        let right_margin = 400.0 - second.frame.right();
        assert!((left_margin - right_margin).abs() < 1e-3);
        assert!((block.frame.height - 14.0).abs() < 1e-3);
    }

    #[test]
    fn test_finish_section_tags_node() {
        let mut flow = Flow::new(0.0, 0.0, 100.0);
        flow.text("x", &body());
        let node = flow.finish_section(SectionKind::Interests);
        assert_eq!(node.sections(), vec![SectionKind::Interests]);
    }
}
