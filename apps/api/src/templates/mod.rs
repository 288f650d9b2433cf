//! Template skins and the mechanics they share: palette resolution, section
//! order, id lookup and per-mount instance state.
//!
//! Every skin lays out at a fixed design width and returns a positioned
//! [`Node`] tree. Fitting that tree into a host container is the scale
//! coordinator's job, never the skin's.

pub mod blocks;
pub mod handlers;
pub mod instance;
pub mod palette;
pub mod sections;
pub mod selector;

mod ats;
mod banner;
mod classic;
mod columns;
mod sidebar;
mod split;

use crate::document::{ResumeDocument, SectionKind};
use crate::layout::{Node, RenderedTree, ScaleCoordinator};

pub use instance::TemplateInstance;
pub use palette::Palette;
pub use selector::{catalog, resolve, TemplateError, TemplateSummary};

/// Width every skin lays out at, in design units (roughly CSS px).
pub const DESIGN_WIDTH: f32 = 800.0;

/// Height of one US-Letter page at design width.
pub const FOLD_HEIGHT: f32 = DESIGN_WIDTH * 11.0 / 8.5;

pub trait TemplateRenderer: Send + Sync {
    fn id(&self) -> &'static str;

    fn name(&self) -> &'static str;

    fn design_width(&self) -> f32 {
        DESIGN_WIDTH
    }

    fn default_palette(&self) -> Palette {
        Palette::default()
    }

    /// Order the sections take on mount. Fixed-layout skins report the order
    /// their columns place sections in.
    fn default_section_order(&self) -> Vec<SectionKind>;

    /// Whether the user may drag sections into a different order.
    fn supports_reorder(&self) -> bool {
        false
    }

    /// Maximum description bullets per entry.
    fn bullet_cap(&self) -> Option<usize> {
        None
    }

    /// Lays the document out at design width. `order` is honored by skins
    /// that support reordering; sections with no content are skipped but keep
    /// their slot.
    fn layout(&self, doc: &ResumeDocument, palette: &Palette, order: &[SectionKind]) -> Node;

    /// One-shot render with the default section order. `target_width` only
    /// feeds the scale transform; the layout itself never changes with it.
    fn render(&self, doc: &ResumeDocument, palette: &[String], target_width: f32) -> RenderedTree {
        let palette = Palette::or_default(palette, self.default_palette());
        let root = self.layout(doc, &palette, &self.default_section_order());
        let transform =
            ScaleCoordinator::new().update(target_width, root.frame.width, root.frame.height);
        RenderedTree {
            template_id: self.id().to_string(),
            design_width: self.design_width(),
            root,
            transform,
        }
    }
}
