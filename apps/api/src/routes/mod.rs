pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::{self as analysis, MAX_UPLOAD_BYTES};
use crate::document::handlers as resumes;
use crate::errors::AppError;
use crate::export::handlers as export;
use crate::state::AppState;
use crate::templates::handlers as templates;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Templates & preview
        .route("/api/v1/templates", get(templates::handle_catalog))
        .route("/api/v1/preview", post(templates::handle_preview))
        .route(
            "/api/v1/preview/sections/move",
            post(templates::handle_move_section),
        )
        // Resume documents
        .route("/api/v1/resumes/sample", get(resumes::handle_sample))
        .route("/api/v1/resumes/normalize", post(resumes::handle_normalize))
        .route("/api/v1/resumes/edit", post(resumes::handle_edit))
        // Export
        .route("/api/v1/export/thumbnail", post(export::handle_thumbnail))
        .route(
            "/api/v1/export/thumbnail/upload",
            post(export::handle_thumbnail_upload),
        )
        .route("/api/v1/export/pdf", post(export::handle_pdf))
        // Analysis
        .route("/api/v1/analysis/review", post(analysis::handle_review))
        .route("/api/v1/analysis/ats", post(analysis::handle_ats))
        .route(
            "/api/v1/analysis/extract",
            post(analysis::handle_extract).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::document::sample::sample_document;
    use crate::export::ExportPipeline;
    use crate::llm_client::{LlmError, TextModel};
    use crate::export::BinaryFile;
    use crate::storage::memory::MemoryUploader;
    use crate::storage::{AssetUploader, UploadError};

    struct CannedAnalyzer(&'static str);

    #[async_trait]
    impl TextModel for CannedAnalyzer {
        async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    fn app_with(uploader: MemoryUploader) -> (Router, AppState) {
        app_with_parts(ExportPipeline::new(0.5), Arc::new(uploader))
    }

    fn app_with_parts(
        exports: ExportPipeline,
        uploader: Arc<dyn AssetUploader>,
    ) -> (Router, AppState) {
        let state = AppState {
            exports,
            uploader,
            analyzer: Arc::new(CannedAnalyzer(
                "1. ATS Score: 82\nSolid.\n\n2. Missing Keywords\n- Kubernetes\n\n\
                 3. Formatting Issues\n- None\n\n4. Suggestions\n- Add metrics.",
            )),
        };
        (build_router(state.clone()), state)
    }

    fn app() -> Router {
        app_with(MemoryUploader::default()).0
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn sample() -> Value {
        serde_json::to_value(sample_document()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = app()
            .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_catalog_lists_default_first() {
        let response = app()
            .oneshot(Request::get("/api/v1/templates").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body[0]["id"], "01");
        assert!(body.as_array().unwrap().len() >= 4);
    }

    #[tokio::test]
    async fn test_preview_scales_to_target_width() {
        let request = post_json(
            "/api/v1/preview",
            json!({ "document": sample(), "targetWidth": 400.0 }),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["scale"], 0.5);
        assert_eq!(body["naturalWidth"], 800.0);
        assert_eq!(body["warnings"], json!([]));
        assert_eq!(body["tree"]["templateId"], body["templateId"]);
    }

    #[tokio::test]
    async fn test_preview_of_malformed_document_warns() {
        let request = post_json(
            "/api/v1/preview",
            json!({ "document": { "skills": "Rust" }, "targetWidth": 800.0 }),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["templateId"], "01");
        assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_preview_honors_section_order_on_reorderable_template() {
        let order = json!([
            "experience", "summary", "skills", "projects",
            "education", "languages", "certifications", "interests"
        ]);
        let mut document = sample();
        document["template"] = json!({ "themeId": "05" });
        let request = post_json(
            "/api/v1/preview",
            json!({ "document": document, "targetWidth": 800.0, "sectionOrder": order }),
        );
        let body = json_body(app().oneshot(request).await.unwrap()).await;
        assert_eq!(body["templateId"], "05");
        assert_eq!(body["sectionOrder"], order);
    }

    #[tokio::test]
    async fn test_move_section_replays_drag() {
        let request = post_json(
            "/api/v1/preview/sections/move",
            json!({ "templateId": "05", "from": 0, "to": 2 }),
        );
        let body = json_body(app().oneshot(request).await.unwrap()).await;
        assert_eq!(body["changed"], true);
        assert_eq!(body["order"][0], "skills");
        assert_eq!(body["order"][2], "summary");
    }

    #[tokio::test]
    async fn test_move_section_on_fixed_layout_is_a_noop() {
        let request = post_json(
            "/api/v1/preview/sections/move",
            json!({ "templateId": "01", "from": 0, "to": 2 }),
        );
        let body = json_body(app().oneshot(request).await.unwrap()).await;
        assert_eq!(body["changed"], false);
        assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_move_section_rejects_out_of_range() {
        let request = post_json(
            "/api/v1/preview/sections/move",
            json!({ "templateId": "05", "from": 0, "to": 99 }),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_edit_sets_profile_field() {
        let request = post_json(
            "/api/v1/resumes/edit",
            json!({
                "document": {},
                "edit": { "op": "set_field", "section": "profile", "key": "fullName", "value": "Ada" }
            }),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["document"]["profile"]["fullName"], "Ada");
    }

    #[tokio::test]
    async fn test_edit_unknown_section_is_rejected() {
        let request = post_json(
            "/api/v1/resumes/edit",
            json!({ "edit": { "op": "remove_item", "section": "hobbies", "index": 0 } }),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_normalize_fills_defaults() {
        let request = post_json("/api/v1/resumes/normalize", json!({ "profileInfo": null }));
        let body = json_body(app().oneshot(request).await.unwrap()).await;
        assert_eq!(body["document"]["skills"], json!([]));
        assert_eq!(body["warning"], Value::Null);
    }

    #[tokio::test]
    async fn test_thumbnail_export_returns_png() {
        let request = post_json("/api/v1/export/thumbnail", json!({ "document": sample() }));
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "image/png");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[tokio::test]
    async fn test_thumbnail_upload_returns_link() {
        let uploader = MemoryUploader::default();
        let (app, _) = app_with(uploader.clone());
        let request = post_json(
            "/api/v1/export/thumbnail/upload",
            json!({ "document": sample(), "resumeId": "42" }),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["thumbnailLink"], "memory://1/resume-42.png");
        assert_eq!(uploader.uploads.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_thumbnail_name_without_resume_id() {
        let uploader = MemoryUploader::default();
        let (app, _) = app_with(uploader.clone());
        let request = post_json(
            "/api/v1/export/thumbnail/upload",
            json!({ "document": sample() }),
        );
        let body = json_body(app.oneshot(request).await.unwrap()).await;
        assert_eq!(body["thumbnailLink"], "memory://1/thumbnail.png");
    }

    /// Records whether the résumé's export slot was held while uploading.
    struct SlotCheckingUploader {
        exports: ExportPipeline,
        held_during_upload: parking_lot::Mutex<Option<bool>>,
    }

    #[async_trait]
    impl AssetUploader for SlotCheckingUploader {
        async fn upload(&self, file: &BinaryFile) -> Result<String, UploadError> {
            *self.held_during_upload.lock() = Some(self.exports.is_exporting("42"));
            Ok(format!("memory://{}", file.filename))
        }
    }

    #[tokio::test]
    async fn test_export_slot_is_held_until_upload_finishes() {
        let exports = ExportPipeline::new(0.5);
        let uploader = Arc::new(SlotCheckingUploader {
            exports: exports.clone(),
            held_during_upload: parking_lot::Mutex::new(None),
        });
        let (app, state) = app_with_parts(exports, uploader.clone());
        let request = post_json(
            "/api/v1/export/thumbnail/upload",
            json!({ "document": sample(), "resumeId": "42" }),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(*uploader.held_during_upload.lock(), Some(true));
        assert!(!state.exports.is_exporting("42"));
    }

    #[tokio::test]
    async fn test_failed_upload_is_generic_export_failure() {
        let uploader = MemoryUploader {
            fail: true,
            ..Default::default()
        };
        let (app, _) = app_with(uploader);
        let request = post_json(
            "/api/v1/export/thumbnail/upload",
            json!({ "document": sample() }),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"]["message"], "export failed, please retry");
    }

    #[tokio::test]
    async fn test_export_while_in_flight_conflicts() {
        let (app, state) = app_with(MemoryUploader::default());
        let _running = state.exports.begin("resume-1").unwrap();
        let request = post_json(
            "/api/v1/export/pdf",
            json!({ "document": sample(), "resumeId": "resume-1" }),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_pdf_export() {
        let request = post_json(
            "/api/v1/export/pdf",
            json!({ "document": sample(), "filename": "ada.pdf" }),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/pdf");
        assert_eq!(
            response.headers()["content-disposition"],
            "attachment; filename=\"ada.pdf\""
        );
    }

    #[tokio::test]
    async fn test_ats_analysis_of_document() {
        let request = post_json(
            "/api/v1/analysis/ats",
            json!({ "document": sample(), "jobDescription": "Senior Rust engineer" }),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["atsScore"], 82);
        assert_eq!(body["missingKeywords"], "- Kubernetes");
    }

    #[tokio::test]
    async fn test_review_requires_input() {
        let request = post_json("/api/v1/analysis/review", json!({}));
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_extract_rejects_non_pdf_upload() {
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"resume.docx\"\r\n\
             Content-Type: application/octet-stream\r\n\r\nhello\r\n--{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/analysis/extract")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(
            body["error"]["message"],
            "Unsupported file type. Please upload a PDF."
        );
    }
}
