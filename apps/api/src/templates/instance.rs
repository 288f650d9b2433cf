//! A mounted template: the renderer plus the state that lives exactly as long
//! as the mount (scale measurement and section order). Remounting creates a
//! fresh instance, which resets both.

use tracing::{debug, warn};

use crate::document::{ResumeDocument, SectionKind};
use crate::layout::{RenderedTree, ScaleCoordinator};
use crate::templates::palette::Palette;
use crate::templates::sections::{is_permutation, SectionOrder};
use crate::templates::{selector, TemplateRenderer};

pub struct TemplateInstance {
    renderer: &'static dyn TemplateRenderer,
    scale: ScaleCoordinator,
    order: SectionOrder,
}

impl TemplateInstance {
    pub fn mount(theme_id: Option<&str>) -> Self {
        let renderer = selector::resolve(theme_id);
        debug!(template = renderer.id(), "mounting template");
        Self {
            renderer,
            scale: ScaleCoordinator::new(),
            order: SectionOrder::new(renderer.default_section_order()),
        }
    }

    /// Mounts with a previously chosen order. An order that is not a
    /// rearrangement of the template's sections, or any order on a
    /// fixed-layout template, is discarded in favor of the default.
    pub fn mount_with_order(theme_id: Option<&str>, order: Vec<SectionKind>) -> (Self, Option<String>) {
        let mut instance = Self::mount(theme_id);
        let default = instance.renderer.default_section_order();
        if order == default {
            return (instance, None);
        }
        if !instance.renderer.supports_reorder() {
            let message = format!(
                "template {} has a fixed layout; section order ignored",
                instance.renderer.id()
            );
            return (instance, Some(message));
        }
        if !is_permutation(&order, &default) {
            warn!(template = instance.renderer.id(), ?order, "rejecting section order");
            let message = "section order did not match the template's sections; using default".to_string();
            return (instance, Some(message));
        }
        instance.order = SectionOrder::new(order);
        (instance, None)
    }

    #[allow(dead_code)]
    pub fn renderer(&self) -> &'static dyn TemplateRenderer {
        self.renderer
    }

    pub fn template_id(&self) -> &'static str {
        self.renderer.id()
    }

    pub fn section_order(&self) -> &[SectionKind] {
        self.order.as_slice()
    }

    /// Starts a drag. Fixed-layout templates never start one.
    pub fn drag_start(&mut self, index: usize) -> bool {
        self.renderer.supports_reorder() && self.order.drag_start(index)
    }

    pub fn drag_over(&mut self, index: usize) -> Option<Vec<SectionKind>> {
        self.order.drag_over(index)
    }

    pub fn drop(&mut self, index: usize) -> bool {
        let changed = self.order.drop(index);
        if changed {
            debug!(template = self.template_id(), order = ?self.order.as_slice(), "section order changed");
        }
        changed
    }

    #[allow(dead_code)]
    pub fn cancel_drag(&mut self) {
        self.order.cancel();
    }

    /// Lays the document out with its selected palette and the current order,
    /// then fits it to `target_width`.
    pub fn render(&mut self, doc: &ResumeDocument, target_width: f32) -> RenderedTree {
        let palette = Palette::resolve(&doc.template, self.renderer.default_palette());
        let root = self.renderer.layout(doc, &palette, self.order.as_slice());
        let transform = self
            .scale
            .update(target_width, root.frame.width, root.frame.height);
        RenderedTree {
            template_id: self.renderer.id().to_string(),
            design_width: self.renderer.design_width(),
            root,
            transform,
        }
    }
}
