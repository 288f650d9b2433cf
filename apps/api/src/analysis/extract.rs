//! Analyzer input: a flattened text rendition of a document, or the text of
//! an uploaded PDF résumé.

use bytes::Bytes;
use tracing::{debug, warn};

use crate::analysis::AnalysisError;
use crate::document::format::{date_range, description_bullets};
use crate::document::{ResumeDocument, SectionKind};

/// Flattens a document into the plain text the analyzer reads.
///
/// Empty sections are skipped the same way the renderers skip them, so the
/// analyzer sees what a recruiter would see.
pub fn document_text(doc: &ResumeDocument) -> String {
    let mut out: Vec<String> = Vec::new();

    push_nonblank(&mut out, &doc.profile.full_name);
    push_nonblank(&mut out, &doc.profile.designation);
    let contact: Vec<&str> = [
        doc.contact.email.as_str(),
        doc.contact.phone.as_str(),
        doc.contact.location.as_str(),
        doc.contact.linkedin.as_str(),
        doc.contact.github.as_str(),
        doc.contact.website.as_str(),
    ]
    .into_iter()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .collect();
    if !contact.is_empty() {
        out.push(contact.join(" | "));
    }

    for kind in SectionKind::ALL {
        if !doc.has_section(kind) {
            continue;
        }
        out.push(String::new());
        out.push(heading(kind).to_string());
        section_lines(doc, kind, &mut out);
    }

    out.join("\n").trim().to_string()
}

fn heading(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Summary => "SUMMARY",
        SectionKind::Experience => "WORK EXPERIENCE",
        SectionKind::Skills => "SKILLS",
        SectionKind::Education => "EDUCATION",
        SectionKind::Projects => "PROJECTS",
        SectionKind::Certifications => "CERTIFICATIONS",
        SectionKind::Languages => "LANGUAGES",
        SectionKind::Interests => "INTERESTS",
    }
}

fn section_lines(doc: &ResumeDocument, kind: SectionKind, out: &mut Vec<String>) {
    match kind {
        SectionKind::Summary => out.push(doc.profile.summary.trim().to_string()),
        SectionKind::Experience => {
            for job in &doc.work_experience {
                out.push(join_nonblank(&[&job.role, &job.company, &job.location], ", "));
                push_nonblank(out, &date_range(&job.start_date, &job.end_date));
                for bullet in description_bullets(&job.description, None) {
                    out.push(format!("- {bullet}"));
                }
            }
        }
        SectionKind::Skills => out.push(rated_names(&doc.skills)),
        SectionKind::Languages => out.push(rated_names(&doc.languages)),
        SectionKind::Education => {
            for edu in &doc.education {
                out.push(join_nonblank(&[&edu.degree, &edu.institution, &edu.location], ", "));
                push_nonblank(out, &date_range(&edu.start_date, &edu.end_date));
            }
        }
        SectionKind::Projects => {
            for project in &doc.projects {
                push_nonblank(out, &project.title);
                for bullet in description_bullets(&project.description, None) {
                    out.push(format!("- {bullet}"));
                }
                push_nonblank(out, &join_nonblank(&[&project.github, &project.live_demo], " | "));
            }
        }
        SectionKind::Certifications => {
            for cert in &doc.certifications {
                out.push(join_nonblank(&[&cert.title, &cert.issuer, &cert.year], ", "));
            }
        }
        SectionKind::Interests => {
            out.push(doc.visible_interests().collect::<Vec<_>>().join(", "));
        }
    }
}

fn rated_names(items: &[crate::document::RatedItem]) -> String {
    items
        .iter()
        .map(|i| i.name.trim())
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_nonblank(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

fn push_nonblank(out: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        out.push(value.to_string());
    }
}

/// Extracts the text layer of an uploaded PDF.
///
/// Parsing is CPU-bound and runs on the blocking pool. Runs of blank lines
/// are collapsed; a PDF with no text layer (a scanned image) is an error.
pub async fn extract_pdf_text(bytes: Bytes) -> Result<String, AnalysisError> {
    if bytes.is_empty() {
        return Err(AnalysisError::EmptyInput("file"));
    }
    let size = bytes.len();
    let raw = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| AnalysisError::Extraction(format!("extraction task failed: {e}")))?
        .map_err(|e| {
            warn!("PDF text extraction failed ({} bytes): {}", size, e);
            AnalysisError::Extraction(e.to_string())
        })?;

    let text = collapse_blank_lines(&raw);
    if text.is_empty() {
        return Err(AnalysisError::NoText);
    }
    debug!("Extracted {} chars from a {} byte PDF", text.len(), size);
    Ok(text)
}

fn collapse_blank_lines(raw: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for line in raw.lines().map(str::trim_end) {
        if line.trim().is_empty() && out.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        out.push(if line.trim().is_empty() { "" } else { line });
    }
    out.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{RatedItem, WorkExperience};

    #[test]
    fn test_document_text_skips_empty_sections() {
        let mut doc = ResumeDocument::default();
        doc.profile.full_name = "Ada Lovelace".into();
        doc.contact.email = "ada@example.com".into();
        doc.work_experience.push(WorkExperience {
            company: "Analytical Engines".into(),
            role: "Engineer".into(),
            start_date: "2020-01".into(),
            end_date: "2022-06".into(),
            description: "Wrote the first program\n\nDebugged the mill".into(),
            ..Default::default()
        });

        let text = document_text(&doc);
        assert!(text.starts_with("Ada Lovelace\nada@example.com"));
        assert!(text.contains("WORK EXPERIENCE\nEngineer, Analytical Engines\nJan 2020 - Jun 2022"));
        assert!(text.contains("- Wrote the first program\n- Debugged the mill"));
        assert!(!text.contains("SKILLS"));
        assert!(!text.contains("SUMMARY"));
    }

    #[test]
    fn test_document_text_lists_rated_names() {
        let mut doc = ResumeDocument::default();
        doc.skills = vec![RatedItem::new("Rust", 80), RatedItem::new("  ", 40)];
        let text = document_text(&doc);
        assert_eq!(text, "SKILLS\nRust");
    }

    #[test]
    fn test_document_text_of_empty_document_is_empty() {
        assert_eq!(document_text(&ResumeDocument::default()), "");
    }

    #[test]
    fn test_collapse_blank_lines() {
        let raw = "\n\nAda Lovelace  \n\n\n\nEngineer\n \n";
        assert_eq!(collapse_blank_lines(raw), "Ada Lovelace\n\nEngineer");
    }

    #[tokio::test]
    async fn test_extract_pdf_text_rejects_empty_upload() {
        let err = extract_pdf_text(Bytes::new()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyInput("file")));
    }

    #[tokio::test]
    async fn test_extract_pdf_text_rejects_garbage() {
        let err = extract_pdf_text(Bytes::from_static(b"not a pdf at all"))
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Extraction(_)));
    }
}
