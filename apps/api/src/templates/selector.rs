use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::document::SectionKind;
use crate::templates::ats::AtsTemplate;
use crate::templates::banner::BannerTemplate;
use crate::templates::classic::ClassicTemplate;
use crate::templates::columns::ColumnsTemplate;
use crate::templates::palette::{Palette, THEME_FAMILY};
use crate::templates::sidebar::SidebarTemplate;
use crate::templates::split::SplitTemplate;
use crate::templates::TemplateRenderer;

pub const DEFAULT_TEMPLATE_ID: &str = "01";

static TEMPLATES: &[&dyn TemplateRenderer] = &[
    &SidebarTemplate,
    &BannerTemplate,
    &ColumnsTemplate,
    &ClassicTemplate,
    &SplitTemplate,
    &AtsTemplate,
];

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("unknown template id '{0}'")]
    Unknown(String),
}

/// Exact id lookup.
pub fn lookup(id: &str) -> Result<&'static dyn TemplateRenderer, TemplateError> {
    TEMPLATES
        .iter()
        .copied()
        .find(|t| t.id() == id)
        .ok_or_else(|| TemplateError::Unknown(id.to_string()))
}

/// Maps a stored theme id to its renderer. Absent, blank and unknown ids all
/// resolve to the default template.
pub fn resolve(theme_id: Option<&str>) -> &'static dyn TemplateRenderer {
    let id = theme_id.map(str::trim).unwrap_or_default();
    if id.is_empty() {
        return default_template();
    }
    lookup(id).unwrap_or_else(|e| {
        debug!("{e}; falling back to template {DEFAULT_TEMPLATE_ID}");
        default_template()
    })
}

fn default_template() -> &'static dyn TemplateRenderer {
    TEMPLATES[0]
}

/// Entry in the template picker.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub design_width: f32,
    pub reorderable: bool,
    pub bullet_cap: Option<usize>,
    pub default_palette: Palette,
    pub default_section_order: Vec<SectionKind>,
    /// Palettes selectable by `colorPaletteIndex`.
    pub palettes: Vec<Palette>,
}

pub fn catalog() -> Vec<TemplateSummary> {
    TEMPLATES
        .iter()
        .map(|t| TemplateSummary {
            id: t.id(),
            name: t.name(),
            design_width: t.design_width(),
            reorderable: t.supports_reorder(),
            bullet_cap: t.bullet_cap(),
            default_palette: t.default_palette(),
            default_section_order: t.default_section_order(),
            palettes: THEME_FAMILY.iter().copied().map(Palette::from_static).collect(),
        })
        .collect()
}
