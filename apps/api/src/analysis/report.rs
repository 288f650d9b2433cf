//! Review and ATS reports: prompt the model, then cut its plain text answer
//! into named sections.

use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::prompts::{ATS_PROMPT_TEMPLATE, PLAIN_TEXT_SYSTEM, REVIEW_PROMPT_TEMPLATE};
use crate::analysis::AnalysisError;
use crate::llm_client::TextModel;

/// Placeholder for an ATS section the model left out or left empty.
pub const NO_DATA: &str = "No useful data found for this section.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReport {
    pub summary: String,
    pub ats_suggestions: String,
    pub recommended_edits: String,
    pub suggested_courses: String,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsReport {
    /// 0..=100, or `None` when the model gave no readable score.
    pub ats_score: Option<u32>,
    pub missing_keywords: String,
    pub formatting_issues: String,
    pub suggestions: String,
    pub raw: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

pub async fn review_resume(
    resume_text: &str,
    model: &dyn TextModel,
) -> Result<ReviewReport, AnalysisError> {
    let resume_text = resume_text.trim();
    if resume_text.is_empty() {
        return Err(AnalysisError::EmptyInput("resume text"));
    }
    let prompt = REVIEW_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let raw = model.complete(&prompt, PLAIN_TEXT_SYSTEM).await?;
    let report = parse_review(&raw);
    info!(
        "Resume review complete: {} chars in, {} chars out",
        resume_text.len(),
        raw.len()
    );
    Ok(report)
}

pub async fn ats_report(
    resume_text: &str,
    job_description: &str,
    model: &dyn TextModel,
) -> Result<AtsReport, AnalysisError> {
    let resume_text = resume_text.trim();
    let job_description = job_description.trim();
    if resume_text.is_empty() {
        return Err(AnalysisError::EmptyInput("resume text"));
    }
    if job_description.is_empty() {
        return Err(AnalysisError::EmptyInput("job description"));
    }
    let prompt = ATS_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description);
    let raw = model.complete(&prompt, PLAIN_TEXT_SYSTEM).await?;
    let report = parse_ats(&raw);
    info!("ATS report complete: score={:?}", report.ats_score);
    Ok(report)
}

// ────────────────────────────────────────────────────────────────────────────
// Parsing
// ────────────────────────────────────────────────────────────────────────────

pub fn parse_review(raw: &str) -> ReviewReport {
    ReviewReport {
        summary: heading_section(raw, "Resume Summary"),
        ats_suggestions: heading_section(raw, "ATS Compatibility Suggestions"),
        recommended_edits: heading_section(raw, "Recommended Improvements"),
        suggested_courses: heading_section(raw, "Suggested Skills or Courses"),
        raw: raw.to_string(),
    }
}

pub fn parse_ats(raw: &str) -> AtsReport {
    let score = ats_score(raw);
    debug!("Extracted ATS score: {:?}", score);
    AtsReport {
        ats_score: score,
        missing_keywords: numbered_section(raw, "Missing Keywords"),
        formatting_issues: numbered_section(raw, "Formatting Issues"),
        suggestions: numbered_section(raw, "Suggestions"),
        raw: raw.to_string(),
    }
}

/// Strips markdown decoration from a heading candidate: leading `#`, wrapping
/// `**`, and a trailing colon.
fn heading_title(line: &str) -> (usize, &str) {
    let trimmed = line.trim();
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    let title = trimmed[level..]
        .trim()
        .trim_start_matches("**")
        .trim_end_matches(':')
        .trim_end_matches("**")
        .trim_end_matches(':')
        .trim();
    (level, title)
}

fn is_bold_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() > 4 && trimmed.starts_with("**") && trimmed.ends_with("**")
}

/// Body of the `## Label` (or `**Label**`) section, up to the next heading of
/// the same or a higher level. `###` subheadings stay inside the body.
fn heading_section(raw: &str, label: &str) -> String {
    let lines: Vec<&str> = raw.lines().collect();
    let Some(start) = lines.iter().position(|line| {
        let (level, title) = heading_title(line);
        (level > 0 || is_bold_line(line)) && title.eq_ignore_ascii_case(label)
    }) else {
        return String::new();
    };
    let (start_level, _) = heading_title(lines[start]);
    let start_level = if start_level == 0 { 2 } else { start_level };

    let body: Vec<&str> = lines[start + 1..]
        .iter()
        .copied()
        .take_while(|line| {
            let (level, _) = heading_title(line);
            let ends = (level > 0 && level <= start_level) || is_bold_line(line);
            !ends
        })
        .collect();
    body.join("\n").trim().to_string()
}

/// True for lines shaped like `12. Something` starting in column zero.
fn numbered_title(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix('.').map(str::trim)
}

/// Body of the `N. Label` section, up to the next numbered line. The title
/// line itself is skipped, including anything written after the label.
fn numbered_section(raw: &str, label: &str) -> String {
    let lines: Vec<&str> = raw.lines().collect();
    let Some(start) = lines.iter().position(|line| {
        numbered_title(line)
            .map(|title| starts_with_ignore_case(title.trim_start_matches('*'), label))
            .unwrap_or(false)
    }) else {
        return NO_DATA.to_string();
    };
    let body: Vec<&str> = lines[start + 1..]
        .iter()
        .copied()
        .take_while(|line| numbered_title(line).is_none())
        .collect();
    let body = body.join("\n").trim().to_string();
    if body.is_empty() {
        NO_DATA.to_string()
    } else {
        body
    }
}

fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack
        .get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false)
}

/// First integer after "ATS Score", allowing one separator (`-`, `–`, `—`, `:`)
/// and surrounding whitespace. Scores above 100 are treated as unreadable.
fn ats_score(raw: &str) -> Option<u32> {
    const LABEL: &str = "ats score";
    let lower = raw.to_ascii_lowercase();
    let mut from = 0;
    while let Some(found) = lower[from..].find(LABEL) {
        let after = from + found + LABEL.len();
        let rest = raw[after..].trim_start().trim_start_matches('*').trim_start();
        let rest = rest
            .strip_prefix(|c: char| matches!(c, '-' | '–' | '—' | ':'))
            .unwrap_or(rest)
            .trim_start();
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).take(4).collect();
        if (1..=3).contains(&digits.len()) {
            return digits.parse::<u32>().ok().filter(|score| *score <= 100);
        }
        from = after;
    }
    None
}
