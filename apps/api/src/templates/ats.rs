//! Template "08": monochrome, single-column layout tuned for applicant
//! tracking systems. Labeled contact grid, at most three bullets per role,
//! and freely reorderable sections.

use crate::document::format::{date_range, description_bullets, format_year_month};
use crate::document::{ResumeDocument, SectionKind};
use crate::layout::{Flow, FontFamily, Node, NodeKind, Paint, Rect, TextStyle};
use crate::templates::blocks::{contact_fields, link_line, name_columns, ordered_sections};
use crate::templates::palette::Palette;
use crate::templates::{TemplateRenderer, DESIGN_WIDTH, FOLD_HEIGHT};

const PAD: f32 = 24.0;
const INDENT: f32 = 16.0;
const FONT: FontFamily = FontFamily::Helvetica;
const BULLET_CAP: usize = 3;

pub struct AtsTemplate;

impl TemplateRenderer for AtsTemplate {
    fn id(&self) -> &'static str {
        "08"
    }

    fn name(&self) -> &'static str {
        "ATS Classic"
    }

    fn default_palette(&self) -> Palette {
        Palette::from_static(["#FFFFFF", "#F3F4F6", "#D1D5DB", "#000000", "#111111"])
    }

    fn default_section_order(&self) -> Vec<SectionKind> {
        vec![
            SectionKind::Summary,
            SectionKind::Experience,
            SectionKind::Skills,
            SectionKind::Projects,
            SectionKind::Education,
            SectionKind::Certifications,
            SectionKind::Languages,
            SectionKind::Interests,
        ]
    }

    fn supports_reorder(&self) -> bool {
        true
    }

    fn bullet_cap(&self) -> Option<usize> {
        Some(BULLET_CAP)
    }

    fn layout(&self, doc: &ResumeDocument, palette: &Palette, order: &[SectionKind]) -> Node {
        let body = TextStyle::new(FONT, 11.0, palette.text());
        let mut page = Flow::new(PAD, PAD, DESIGN_WIDTH - PAD * 2.0);

        let name = match doc.profile.full_name.trim() {
            "" => "FULL NAME",
            name => name,
        };
        page.text(name, &body.clone().sized(24.0).bold());
        page.gap(6.0);
        contact_grid(&mut page, doc, &body);
        page.gap(10.0);
        page.rule(palette.primary(), 2.0);
        page.gap(14.0);

        let cap = self.bullet_cap();
        ordered_sections(&mut page, doc, order, |section, kind| {
            build_section(section, kind, doc, palette, &body, cap)
        });

        let height = (page.cursor() + PAD).max(FOLD_HEIGHT);
        let mut root = page.into_block();
        root.frame = Rect::new(0.0, 0.0, DESIGN_WIDTH, height);
        root.paint = Paint::fill(palette.background());
        root
    }
}

/// Phone, email and location on the left; profile links on the right.
fn contact_grid(page: &mut Flow, doc: &ResumeDocument, body: &TextStyle) {
    let fields = contact_fields(&doc.contact);
    if fields.is_empty() {
        return;
    }
    let half = (page.width() - 32.0) / 2.0;
    let top = page.cursor();
    let mut left = Flow::new(page.x(), top, half);
    let mut right = Flow::new(page.x() + half + 32.0, top, half);
    for (label, value) in fields {
        let column = match label {
            "Phone" | "Email" | "Location" => &mut left,
            _ => &mut right,
        };
        column.labeled(label, value, body);
        column.gap(2.0);
    }
    page.push(left.into_block());
    page.push(right.into_block());
}

fn heading(flow: &mut Flow, text: &str, palette: &Palette) {
    let style = TextStyle::new(FONT, 12.0, palette.text()).bold();
    let band = style.line_height() + 6.0;
    let top = flow.cursor();
    flow.place(
        Node::block(Rect::new(flow.x(), top, flow.width(), band))
            .with_paint(Paint::fill(palette.soft_accent())),
    );
    flow.place(
        Node::block(Rect::new(flow.x(), top, 4.0, band)).with_paint(Paint::fill(palette.primary())),
    );
    let mut label = flow.nested(14.0);
    label.gap(3.0);
    label.text(&text.to_uppercase(), &style);
    flow.absorb(label);
    flow.gap(3.0 + 6.0);
}

/// Thin vertical rule at `x`, from `top` down to the cursor.
fn entry_rule(flow: &mut Flow, x: f32, top: f32, palette: &Palette) {
    let height = flow.cursor() - top;
    if height > 0.0 {
        flow.place(
            Node::new(NodeKind::Rule, Rect::new(x, top, 2.0, height))
                .with_paint(Paint::fill(palette.chip())),
        );
    }
}

fn build_section(
    flow: &mut Flow,
    kind: SectionKind,
    doc: &ResumeDocument,
    palette: &Palette,
    body: &TextStyle,
    cap: Option<usize>,
) {
    let strong = body.clone().bold();
    let muted = body.clone().sized(10.0).colored("#4B5563");
    match kind {
        SectionKind::Summary => {
            heading(flow, "Professional Summary", palette);
            let mut text = flow.nested(INDENT);
            text.text(&doc.profile.summary, body);
            flow.absorb(text);
        }
        SectionKind::Experience => {
            heading(flow, "Professional Experience", palette);
            for job in &doc.work_experience {
                let top = flow.cursor();
                let mut entry = flow.nested(INDENT + 12.0);
                entry.text(&job.role, &strong.clone().sized(12.0));
                entry.row(
                    &job.company,
                    &strong.clone().colored("#374151"),
                    &date_range(&job.start_date, &job.end_date),
                    &muted,
                );
                entry.text(&job.location, &muted);
                entry.gap(2.0);
                entry.bullets(&description_bullets(&job.description, cap), body);
                flow.absorb(entry);
                let x = flow.x() + INDENT;
                entry_rule(flow, x, top, palette);
                flow.gap(10.0);
            }
        }
        SectionKind::Skills => {
            heading(flow, "Technical Skills", palette);
            let names: Vec<&str> = doc.skills.iter().map(|s| s.name.as_str()).collect();
            let mut grid = flow.nested(INDENT);
            name_columns(&mut grid, &names, 3, body, true);
            flow.absorb(grid);
        }
        SectionKind::Projects => {
            heading(flow, "Key Projects", palette);
            for project in &doc.projects {
                let top = flow.cursor();
                let mut entry = flow.nested(INDENT + 12.0);
                entry.text(&project.title, &strong);
                entry.text(&project.description, body);
                entry.text(&link_line(&project.github, &project.live_demo), &muted);
                flow.absorb(entry);
                let x = flow.x() + INDENT;
                entry_rule(flow, x, top, palette);
                flow.gap(8.0);
            }
        }
        SectionKind::Education => {
            heading(flow, "Education", palette);
            for edu in &doc.education {
                let mut entry = flow.nested(INDENT);
                entry.text(&edu.degree, &strong);
                entry.text(&edu.institution, &body.clone().colored("#374151"));
                let ended = format_year_month(&edu.end_date);
                let place = match (edu.location.trim(), ended.as_str()) {
                    ("", date) => date.to_string(),
                    (location, "") => location.to_string(),
                    (location, date) => format!("{location} \u{2022} {date}"),
                };
                entry.text(&place, &muted);
                flow.absorb(entry);
                flow.gap(8.0);
            }
        }
        SectionKind::Certifications => {
            heading(flow, "Certifications", palette);
            for cert in &doc.certifications {
                let mut entry = flow.nested(INDENT);
                entry.text(&cert.title, &strong);
                entry.text(&cert.issuer, &body.clone().colored("#374151"));
                entry.text(&cert.year, &muted);
                flow.absorb(entry);
                flow.gap(8.0);
            }
        }
        SectionKind::Languages => {
            heading(flow, "Languages", palette);
            let names: Vec<&str> = doc.languages.iter().map(|l| l.name.as_str()).collect();
            let mut grid = flow.nested(INDENT);
            name_columns(&mut grid, &names, 2, &body.clone().bold(), false);
            flow.absorb(grid);
        }
        SectionKind::Interests => {
            heading(flow, "Additional Information", palette);
            let joined = doc.visible_interests().collect::<Vec<_>>().join(" \u{2022} ");
            let mut text = flow.nested(INDENT);
            text.text(&joined, body);
            flow.absorb(text);
        }
    }
    flow.gap(12.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::WorkExperience;

    #[test]
    fn test_bullets_capped_at_three() {
        let doc = ResumeDocument {
            work_experience: vec![WorkExperience {
                role: "Engineer".into(),
                description: "one\ntwo\nthree\nfour\nfive".into(),
                ..WorkExperience::default()
            }],
            ..ResumeDocument::default()
        };
        let text = AtsTemplate.render(&doc, &[], 0.0).root.text_content();
        assert!(text.contains("three"));
        assert!(!text.contains("four"));
    }

    #[test]
    fn test_placeholder_name_and_minimum_height() {
        let tree = AtsTemplate.render(&ResumeDocument::default(), &[], 0.0);
        assert!(tree.root.text_content().starts_with("FULL NAME"));
        assert!(tree.natural_height() >= FOLD_HEIGHT);
    }

    #[test]
    fn test_headings_are_uppercase() {
        let doc = ResumeDocument {
            interests: vec!["Chess".into(), "Climbing".into()],
            ..ResumeDocument::default()
        };
        let text = AtsTemplate.render(&doc, &[], 0.0).root.text_content();
        assert!(text.contains("ADDITIONAL INFORMATION"));
        assert!(text.contains("Chess \u{2022} Climbing"));
    }

    #[test]
    fn test_root_uses_palette_background() {
        let palette: Vec<String> = ["#FAF7F0", "#EEE", "#DDD", "#123456", "#222"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let tree = AtsTemplate.render(&ResumeDocument::default(), &palette, 0.0);
        assert_eq!(tree.root.paint.background.as_deref(), Some("#FAF7F0"));

        let default = AtsTemplate.render(&ResumeDocument::default(), &[], 0.0);
        assert_eq!(default.root.paint.background.as_deref(), Some("#FFFFFF"));
    }
}
