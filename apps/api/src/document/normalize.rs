use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::document::model::ResumeDocument;

/// User-facing text for a document that could not be loaded.
pub const LOAD_FAILURE_MESSAGE: &str = "could not load resume";

#[derive(Debug, Error)]
pub enum DocumentError {
    /// A known field carries the wrong structural type (e.g. a string where a list is expected).
    #[error("malformed resume document: {reason}")]
    Malformed { reason: String },
}

/// Converts an arbitrary, partially-populated record into a `ResumeDocument`.
///
/// Missing or `null` fields become defaults and unknown fields pass through.
/// Only structurally invalid types fail.
pub fn normalize(raw: &Value) -> Result<ResumeDocument, DocumentError> {
    match raw {
        Value::Null => Ok(ResumeDocument::default()),
        Value::Object(_) => {
            ResumeDocument::deserialize(raw).map_err(|e| DocumentError::Malformed {
                reason: e.to_string(),
            })
        }
        other => Err(DocumentError::Malformed {
            reason: format!("expected an object at the document root, found {other}"),
        }),
    }
}

/// Result of loading a document at a boundary where a safe default exists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Normalized {
    pub document: ResumeDocument,
    /// Present when the raw record was malformed and defaults were substituted.
    pub warning: Option<String>,
}

/// Normalizes `raw`, falling back to the all-defaults document on malformed
/// input. Editing is never blocked; the caller surfaces `warning`.
pub fn load_or_default(raw: &Value) -> Normalized {
    match normalize(raw) {
        Ok(document) => Normalized {
            document,
            warning: None,
        },
        Err(e) => {
            warn!("Falling back to an empty resume: {e}");
            Normalized {
                document: ResumeDocument::default(),
                warning: Some(format!("{LOAD_FAILURE_MESSAGE}: {e}")),
            }
        }
    }
}
