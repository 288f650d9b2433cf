//! Template "05": plain single-column layout with a two-column skills list.
//! Sections below the header can be dragged into any order.

use crate::document::format::{date_range, description_bullets};
use crate::document::{ResumeDocument, SectionKind};
use crate::layout::{Flow, FontFamily, Node, Paint, Rect, TextStyle};
use crate::templates::blocks::{contact_fields, link_line, name_columns, ordered_sections};
use crate::templates::palette::Palette;
use crate::templates::{TemplateRenderer, DESIGN_WIDTH};

const PAD: f32 = 32.0;
const FONT: FontFamily = FontFamily::Helvetica;
const HEADING_COLOR: &str = "#333333";

pub struct SplitTemplate;

impl TemplateRenderer for SplitTemplate {
    fn id(&self) -> &'static str {
        "05"
    }

    fn name(&self) -> &'static str {
        "Split Skills"
    }

    fn default_palette(&self) -> Palette {
        Palette::from_static(["#FFFFFF", "#F3F4F6", "#E5E7EB", "#333333", "#374151"])
    }

    fn default_section_order(&self) -> Vec<SectionKind> {
        vec![
            SectionKind::Summary,
            SectionKind::Skills,
            SectionKind::Experience,
            SectionKind::Projects,
            SectionKind::Education,
            SectionKind::Languages,
            SectionKind::Certifications,
            SectionKind::Interests,
        ]
    }

    fn supports_reorder(&self) -> bool {
        true
    }

    fn layout(&self, doc: &ResumeDocument, palette: &Palette, order: &[SectionKind]) -> Node {
        let body = TextStyle::new(FONT, 12.0, palette.text());
        let mut page = Flow::new(PAD, PAD, DESIGN_WIDTH - PAD * 2.0);

        page.text(&doc.profile.full_name, &body.clone().sized(24.0).bold().colored(HEADING_COLOR));
        page.gap(6.0);
        let (primary, links): (Vec<_>, Vec<_>) = contact_fields(&doc.contact)
            .into_iter()
            .partition(|(label, _)| matches!(*label, "Phone" | "Email" | "Location"));
        let join = |fields: Vec<(&str, &str)>| {
            fields
                .into_iter()
                .map(|(_, v)| v)
                .collect::<Vec<_>>()
                .join("  |  ")
        };
        page.text(&join(primary), &body.clone().sized(11.0));
        page.text(&join(links), &body.clone().sized(11.0).colored(palette.primary()));
        page.gap(20.0);

        ordered_sections(&mut page, doc, order, |section, kind| {
            build_section(section, kind, doc, palette, &body)
        });
        page.gap(PAD);

        let height = page.cursor();
        let mut root = page.into_block();
        root.frame = Rect::new(0.0, 0.0, DESIGN_WIDTH, height);
        root.paint = Paint::fill("#FFFFFF");
        root
    }
}

fn heading(flow: &mut Flow, text: &str, palette: &Palette) {
    flow.text(text, &TextStyle::new(FONT, 14.0, HEADING_COLOR).bold());
    flow.gap(2.0);
    flow.rule(palette.primary(), 1.0);
    flow.gap(8.0);
}

fn build_section(
    flow: &mut Flow,
    kind: SectionKind,
    doc: &ResumeDocument,
    palette: &Palette,
    body: &TextStyle,
) {
    let strong = body.clone().bold().colored(HEADING_COLOR);
    let muted = body.clone().sized(11.0).colored("#6B7280");
    match kind {
        SectionKind::Summary => {
            heading(flow, "SUMMARY", palette);
            flow.text(&doc.profile.summary, body);
        }
        SectionKind::Skills => {
            heading(flow, "SKILLS", palette);
            let names: Vec<&str> = doc.skills.iter().map(|s| s.name.as_str()).collect();
            name_columns(flow, &names, 2, body, true);
        }
        SectionKind::Experience => {
            heading(flow, "EXPERIENCE", palette);
            for job in &doc.work_experience {
                let title = [job.role.trim(), job.company.trim()]
                    .into_iter()
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join(", ");
                flow.row(&title, &strong, &date_range(&job.start_date, &job.end_date), &muted);
                flow.text(&job.location, &muted);
                flow.gap(6.0);
                flow.bullets(&description_bullets(&job.description, None), body);
                flow.gap(12.0);
            }
        }
        SectionKind::Projects => {
            heading(flow, "PROJECTS", palette);
            for project in &doc.projects {
                flow.text(&project.title, &strong);
                flow.text(&project.description, body);
                flow.text(&link_line(&project.github, &project.live_demo), &muted);
                flow.gap(10.0);
            }
        }
        SectionKind::Education => {
            heading(flow, "EDUCATION AND TRAINING", palette);
            for edu in &doc.education {
                flow.row(&edu.degree, &strong, &date_range(&edu.start_date, &edu.end_date), &muted);
                flow.text(&edu.institution, body);
                flow.text(&edu.location, &muted);
                flow.gap(10.0);
            }
        }
        SectionKind::Languages => {
            heading(flow, "LANGUAGES", palette);
            let names: Vec<&str> = doc.languages.iter().map(|l| l.name.as_str()).collect();
            name_columns(flow, &names, 2, body, true);
        }
        SectionKind::Certifications => {
            heading(flow, "CERTIFICATIONS", palette);
            for cert in &doc.certifications {
                flow.row(&cert.title, &strong, &cert.year, &muted);
                flow.text(&cert.issuer, body);
                flow.gap(8.0);
            }
        }
        SectionKind::Interests => {
            heading(flow, "INTERESTS", palette);
            let interests: Vec<&str> = doc.visible_interests().collect();
            flow.chips(&interests, &body.clone().sized(11.0), palette.chip());
        }
    }
    flow.gap(16.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::RatedItem;
    use crate::layout::NodeKind;

    #[test]
    fn test_skills_split_into_two_columns() {
        let doc = ResumeDocument {
            skills: ["Rust", "Go", "SQL", "Kafka", "Docker"]
                .iter()
                .map(|n| RatedItem::new(*n, 60))
                .collect(),
            ..ResumeDocument::default()
        };
        let root = SplitTemplate.layout(&doc, &SplitTemplate.default_palette(), &SplitTemplate.default_section_order());
        let mut xs: Vec<(String, f32)> = Vec::new();
        root.visit(&mut |node| {
            if let NodeKind::Text { text, .. } = &node.kind {
                xs.push((text.clone(), node.frame.x));
            }
        });
        let x_of = |name: &str| xs.iter().find(|(t, _)| t == name).map(|(_, x)| *x);
        // ceil(5 / 2) = 3 in the first column.
        assert_eq!(x_of("Rust"), x_of("SQL"));
        assert_eq!(x_of("Kafka"), x_of("Docker"));
        assert!(x_of("Kafka") > x_of("SQL"));
    }
}
