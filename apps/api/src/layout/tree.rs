//! The rendered tree: the owned, positioned output of a template skin.
//!
//! Frames are absolute, in design units, with the origin at the top-left of
//! the root. Colors are kept as CSS color strings exactly as the skin wrote
//! them; the export pipeline sanitizes them before rasterizing.

use serde::{Deserialize, Serialize};

use crate::document::SectionKind;
use crate::layout::font_metrics::{FontFamily, FontWeight};
use crate::layout::scale::ScaleTransform;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Smallest rect containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }
}

/// Paint applied to a node. `color` is the text/foreground color.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    /// Corner radius in design units; chips and avatars are rounded.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub radius: f32,
}

fn is_zero(v: &f32) -> bool {
    *v == 0.0
}

impl Paint {
    pub fn fill(background: impl Into<String>) -> Self {
        Self {
            background: Some(background.into()),
            ..Self::default()
        }
    }

    pub fn text(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn rounded(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Plain container.
    Block,
    /// Container holding one document section; what the drag surface targets.
    Section { section: SectionKind },
    /// One already-wrapped line of text. `frame.width` is the measured width.
    Text {
        text: String,
        font: FontFamily,
        size: f32,
        weight: FontWeight,
    },
    /// Horizontal divider; painted with `paint.background`.
    Rule,
    /// Profile photo placeholder referencing the stored asset.
    Image { src: String },
    /// Proficiency bar; `fraction` in `0.0..=1.0` of the frame is filled.
    Meter { fraction: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    pub frame: Rect,
    #[serde(default)]
    pub paint: Paint,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, frame: Rect) -> Self {
        Self {
            kind,
            frame,
            paint: Paint::default(),
            children: Vec::new(),
        }
    }

    pub fn block(frame: Rect) -> Self {
        Self::new(NodeKind::Block, frame)
    }

    pub fn with_paint(mut self, paint: Paint) -> Self {
        self.paint = paint;
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Pre-order traversal.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }

    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut Node)) {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }

    /// Sections in document order, as rendered.
    pub fn sections(&self) -> Vec<SectionKind> {
        let mut out = Vec::new();
        self.visit(&mut |node| {
            if let NodeKind::Section { section } = node.kind {
                out.push(section);
            }
        });
        out
    }

    /// All text lines concatenated with newlines, in pre-order.
    pub fn text_content(&self) -> String {
        let mut lines = Vec::new();
        self.visit(&mut |node| {
            if let NodeKind::Text { text, .. } = &node.kind {
                lines.push(text.as_str());
            }
        });
        lines.join("\n")
    }
}

/// Output of a template render: the positioned tree plus the transform that
/// fits it into the host container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedTree {
    pub template_id: String,
    pub design_width: f32,
    pub root: Node,
    pub transform: ScaleTransform,
}

impl RenderedTree {
    /// Natural (untransformed) size of the layout box.
    pub fn natural_width(&self) -> f32 {
        self.root.frame.width
    }

    pub fn natural_height(&self) -> f32 {
        self.root.frame.height
    }
}
