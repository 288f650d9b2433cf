//! Template "03": name and contact line across the top, the summary below
//! it, then a wide column beside a narrow one.

use crate::document::format::{date_range, description_bullets, format_year_month};
use crate::document::{ResumeDocument, SectionKind};
use crate::layout::{Flow, FontFamily, Node, NodeKind, Paint, Rect, TextStyle};
use crate::templates::blocks::{contact_fields, link_line, name_columns};
use crate::templates::palette::Palette;
use crate::templates::{TemplateRenderer, DESIGN_WIDTH};

const PAD_X: f32 = 32.0;
const PAD_Y: f32 = 24.0;
const GUTTER: f32 = 32.0;
const CONTENT_WIDTH: f32 = DESIGN_WIDTH - PAD_X * 2.0;
const WIDE_WIDTH: f32 = (CONTENT_WIDTH - GUTTER) * 8.0 / 12.0;
const NARROW_X: f32 = PAD_X + WIDE_WIDTH + GUTTER;
const NARROW_WIDTH: f32 = CONTENT_WIDTH - WIDE_WIDTH - GUTTER;
const FONT: FontFamily = FontFamily::Helvetica;

pub struct ColumnsTemplate;

impl TemplateRenderer for ColumnsTemplate {
    fn id(&self) -> &'static str {
        "03"
    }

    fn name(&self) -> &'static str {
        "Two Column"
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

    fn layout(&self, doc: &ResumeDocument, palette: &Palette, _order: &[SectionKind]) -> Node {
        let body = TextStyle::new(FONT, 12.0, palette.text());
        let mut page = Flow::new(PAD_X, PAD_Y, CONTENT_WIDTH);

        page.text(&doc.profile.full_name, &body.clone().sized(24.0).bold());
        page.gap(6.0);
        let reach: Vec<&str> = contact_fields(&doc.contact)
            .into_iter()
            .filter(|(label, _)| matches!(*label, "Phone" | "Email" | "Location"))
            .map(|(_, value)| value)
            .collect();
        page.text(&reach.join("  |  "), &body.clone().sized(11.0));
        page.gap(16.0);

        section(&mut page, doc, SectionKind::Summary, "SUMMARY", palette, |flow| {
            flow.text(&doc.profile.summary, &body);
        });

        let top = page.cursor();
        let mut wide = Flow::new(PAD_X, top, WIDE_WIDTH);
        wide_column(&mut wide, doc, palette, &body);
        let mut narrow = Flow::new(NARROW_X, top, NARROW_WIDTH);
        narrow_column(&mut narrow, doc, palette, &body);
        page.push(wide.into_block());
        page.push(narrow.into_block());
        page.gap(PAD_Y);

        let height = page.cursor();
        let mut root = page.into_block();
        root.frame = Rect::new(0.0, 0.0, DESIGN_WIDTH, height);
        root.paint = Paint::fill("#FFFFFF");
        root
    }
}

/// Bold title with an accent underline as wide as the title itself.
fn heading(flow: &mut Flow, text: &str, palette: &Palette) {
    let style = TextStyle::new(FONT, 14.0, palette.text()).bold();
    flow.text(text, &style);
    flow.gap(2.0);
    flow.push(
        Node::new(NodeKind::Rule, Rect::new(flow.x(), flow.cursor(), style.measure(text), 2.0))
            .with_paint(Paint::fill(palette.primary())),
    );
    flow.gap(10.0);
}

fn section(
    flow: &mut Flow,
    doc: &ResumeDocument,
    kind: SectionKind,
    title: &str,
    palette: &Palette,
    build: impl FnOnce(&mut Flow),
) {
    if !doc.has_section(kind) {
        return;
    }
    let mut section = flow.nested(0.0);
    heading(&mut section, title, palette);
    build(&mut section);
    section.gap(20.0);
    flow.push(section.finish_section(kind));
}

fn wide_column(flow: &mut Flow, doc: &ResumeDocument, palette: &Palette, body: &TextStyle) {
    let strong = body.clone().bold();
    let muted = body.clone().sized(11.0);

    section(flow, doc, SectionKind::Skills, "SKILLS", palette, |flow| {
        let names: Vec<&str> = doc.skills.iter().map(|s| s.name.as_str()).collect();
        name_columns(flow, &names, 2, body, true);
    });

    section(flow, doc, SectionKind::Experience, "EXPERIENCE", palette, |flow| {
        for job in &doc.work_experience {
            let title = [job.role.trim(), job.company.trim()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            flow.row(&title, &strong, &date_range(&job.start_date, &job.end_date), &muted);
            flow.gap(6.0);
            flow.bullets(&description_bullets(&job.description, None), body);
            flow.gap(10.0);
        }
    });

    section(flow, doc, SectionKind::Projects, "PROJECTS", palette, |flow| {
        for project in &doc.projects {
            flow.text(&project.title, &strong);
            flow.text(&project.description, body);
            flow.text(
                &link_line(&project.github, &project.live_demo),
                &muted.clone().colored(palette.primary()),
            );
            flow.gap(10.0);
        }
    });
}

fn narrow_column(flow: &mut Flow, doc: &ResumeDocument, palette: &Palette, body: &TextStyle) {
    let strong = body.clone().bold();
    let small = body.clone().sized(11.0);

    section(flow, doc, SectionKind::Education, "EDUCATION AND TRAINING", palette, |flow| {
        for edu in &doc.education {
            flow.text(&edu.degree, &strong);
            flow.text(&edu.institution, &small);
            flow.text(&format_year_month(&edu.end_date), &small.clone().bold());
            flow.gap(8.0);
        }
    });

    section(flow, doc, SectionKind::Languages, "LANGUAGES", palette, |flow| {
        for language in &doc.languages {
            flow.text(&language.name, &small);
        }
    });

    section(flow, doc, SectionKind::Certifications, "CERTIFICATIONS", palette, |flow| {
        for cert in &doc.certifications {
            flow.text(&cert.title, &strong);
            flow.row(&cert.issuer, &small, &cert.year, &small);
            flow.gap(8.0);
        }
    });

    // Profile links sit between the sections without a heading.
    let mut links = flow.nested(0.0);
    for (label, value) in contact_fields(&doc.contact) {
        if matches!(label, "LinkedIn" | "GitHub" | "Website") {
            links.labeled(label, value, &small);
            links.gap(4.0);
        }
    }
    if !links.is_empty() {
        links.gap(16.0);
    }
    flow.absorb(links);

    section(flow, doc, SectionKind::Interests, "INTERESTS", palette, |flow| {
        let interests: Vec<&str> = doc.visible_interests().collect();
        flow.chips(&interests, &small, palette.background());
    });
}
