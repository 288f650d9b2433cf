//! Axum route handlers for the template catalog, live preview and section
//! reordering.

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::document::{load_or_default, SectionKind};
use crate::errors::AppError;
use crate::layout::RenderedTree;
use crate::templates::{catalog, TemplateInstance, TemplateSummary};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    #[serde(default)]
    pub document: Value,
    /// Host container width. Zero or negative renders at scale 1.
    #[serde(default)]
    pub target_width: f32,
    /// Order chosen earlier in this session. Absent means the template default.
    #[serde(default)]
    pub section_order: Option<Vec<SectionKind>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub template_id: String,
    pub scale: f32,
    pub natural_width: f32,
    pub section_order: Vec<SectionKind>,
    pub tree: RenderedTree,
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSectionRequest {
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub order: Option<Vec<SectionKind>>,
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSectionResponse {
    pub template_id: String,
    pub order: Vec<SectionKind>,
    pub changed: bool,
    pub warnings: Vec<String>,
}

/// A document laid out for a request: the mounted instance's output plus
/// whatever was recovered along the way.
pub struct Rendered {
    pub tree: RenderedTree,
    pub section_order: Vec<SectionKind>,
    pub warnings: Vec<String>,
}

/// Normalizes `raw`, mounts its selected template and renders at `target_width`.
pub fn render_document(
    raw: &Value,
    target_width: f32,
    section_order: Option<Vec<SectionKind>>,
) -> Rendered {
    let normalized = load_or_default(raw);
    let mut warnings: Vec<String> = normalized.warning.into_iter().collect();
    let theme_id = normalized.document.template.theme_id.as_deref();

    let mut instance = match section_order {
        Some(order) => {
            let (instance, warning) = TemplateInstance::mount_with_order(theme_id, order);
            warnings.extend(warning);
            instance
        }
        None => TemplateInstance::mount(theme_id),
    };
    let tree = instance.render(&normalized.document, target_width);
    Rendered {
        section_order: instance.section_order().to_vec(),
        tree,
        warnings,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_catalog() -> Json<Vec<TemplateSummary>> {
    Json(catalog())
}

/// POST /api/v1/preview
pub async fn handle_preview(Json(request): Json<PreviewRequest>) -> Json<PreviewResponse> {
    let Rendered {
        tree,
        section_order,
        warnings,
    } = render_document(&request.document, request.target_width, request.section_order);
    debug!(
        template = %tree.template_id,
        scale = tree.transform.scale,
        "preview rendered"
    );
    Json(PreviewResponse {
        template_id: tree.template_id.clone(),
        scale: tree.transform.scale,
        natural_width: tree.natural_width(),
        section_order,
        tree,
        warnings,
    })
}

/// POST /api/v1/preview/sections/move
///
/// Replays one complete drag gesture (start at `from`, drop on `to`) against
/// a freshly mounted instance.
pub async fn handle_move_section(
    Json(request): Json<MoveSectionRequest>,
) -> Result<Json<MoveSectionResponse>, AppError> {
    let theme_id = request.template_id.as_deref();
    let (mut instance, warning) = match request.order {
        Some(order) => TemplateInstance::mount_with_order(theme_id, order),
        None => (TemplateInstance::mount(theme_id), None),
    };
    let len = instance.section_order().len();
    if request.from >= len || request.to >= len {
        return Err(AppError::Validation(format!(
            "section indices must be below {len} (from {}, to {})",
            request.from, request.to
        )));
    }

    let mut warnings: Vec<String> = warning.into_iter().collect();
    let changed = if instance.drag_start(request.from) {
        instance.drag_over(request.to);
        instance.drop(request.to)
    } else {
        warnings.push(format!(
            "template {} has a fixed layout; sections cannot be reordered",
            instance.template_id()
        ));
        false
    };

    Ok(Json(MoveSectionResponse {
        template_id: instance.template_id().to_string(),
        order: instance.section_order().to_vec(),
        changed,
        warnings,
    }))
}
