//! Résumé analysis: plain text review and ATS scoring through the LLM
//! client, plus text extraction from uploaded PDFs.

pub mod extract;
pub mod handlers;
pub mod prompts;
pub mod report;

use thiserror::Error;

use crate::llm_client::LlmError;

pub use extract::{document_text, extract_pdf_text};
pub use report::{ats_report, review_resume, AtsReport, ReviewReport};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{0} cannot be empty")]
    EmptyInput(&'static str),

    #[error("could not read PDF: {0}")]
    Extraction(String),

    #[error("the PDF has no extractable text")]
    NoText,

    #[error(transparent)]
    Model(#[from] LlmError),
}
