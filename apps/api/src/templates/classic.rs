//! Template "04": centered single column. The surname and every section
//! heading take the accent color.

use crate::document::format::{date_range, description_bullets, format_year_month};
use crate::document::{ResumeDocument, SectionKind};
use crate::layout::{Align, Flow, FontFamily, Node, Paint, Rect, TextStyle};
use crate::templates::blocks::{link_line, name_columns, ordered_sections};
use crate::templates::palette::Palette;
use crate::templates::{TemplateRenderer, DESIGN_WIDTH};

const PAD_X: f32 = 40.0;
const PAD_Y: f32 = 32.0;
const FONT: FontFamily = FontFamily::Helvetica;
const NAME_COLOR: &str = "#000000";

pub struct ClassicTemplate;

impl TemplateRenderer for ClassicTemplate {
    fn id(&self) -> &'static str {
        "04"
    }

    fn name(&self) -> &'static str {
        "Classic"
    }

    fn default_palette(&self) -> Palette {
        Palette::from_static(["#EBFDFF", "#A1F4FD", "#CEFAFE", "#E60000", "#4A5565"])
    }

    fn default_section_order(&self) -> Vec<SectionKind> {
        vec![
            SectionKind::Summary,
            SectionKind::Skills,
            SectionKind::Experience,
            SectionKind::Education,
            SectionKind::Projects,
            SectionKind::Certifications,
            SectionKind::Languages,
            SectionKind::Interests,
        ]
    }

    fn layout(&self, doc: &ResumeDocument, palette: &Palette, _order: &[SectionKind]) -> Node {
        let body = TextStyle::new(FONT, 12.0, palette.text());
        let mut page = Flow::new(PAD_X, PAD_Y, DESIGN_WIDTH - PAD_X * 2.0);

        let (first, rest) = split_name(&doc.profile.full_name);
        let name = TextStyle::new(FONT, 28.0, NAME_COLOR).bold();
        page.spans_centered(&[(first, &name), (&rest, &name.clone().colored(palette.primary()))]);
        page.gap(4.0);
        let reach: Vec<&str> = [&doc.contact.location, &doc.contact.phone, &doc.contact.email]
            .into_iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .collect();
        page.text_aligned(&reach.join(" | "), &body.clone().sized(11.0), Align::Center);
        page.gap(24.0);

        ordered_sections(&mut page, doc, &self.default_section_order(), |section, kind| {
            build_section(section, kind, doc, palette, &body)
        });
        page.gap(PAD_Y);

        let height = page.cursor();
        let mut root = page.into_block();
        root.frame = Rect::new(0.0, 0.0, DESIGN_WIDTH, height);
        root.paint = Paint::fill("#FFFFFF");
        root
    }
}

/// First word, then everything after it.
fn split_name(full_name: &str) -> (&str, String) {
    let mut words = full_name.split_whitespace();
    let first = words.next().unwrap_or_default();
    (first, words.collect::<Vec<_>>().join(" "))
}

fn heading(flow: &mut Flow, text: &str, palette: &Palette) {
    let style = TextStyle::new(FONT, 14.0, palette.primary()).bold();
    flow.text_aligned(&text.to_uppercase(), &style, Align::Center);
    flow.gap(2.0);
    flow.rule(palette.primary(), 2.0);
    flow.gap(10.0);
}

fn build_section(
    flow: &mut Flow,
    kind: SectionKind,
    doc: &ResumeDocument,
    palette: &Palette,
    body: &TextStyle,
) {
    let strong = body.clone().bold();
    let accent = body.clone().sized(11.0).colored(palette.primary());
    match kind {
        SectionKind::Summary => {
            heading(flow, "Summary", palette);
            flow.text(&doc.profile.summary, body);
        }
        SectionKind::Skills => {
            heading(flow, "Skills", palette);
            let names: Vec<&str> = doc.skills.iter().map(|s| s.name.as_str()).collect();
            name_columns(flow, &names, 2, body, true);
        }
        SectionKind::Experience => {
            heading(flow, "Experience", palette);
            for job in &doc.work_experience {
                flow.row(&job.role, &strong, &date_range(&job.start_date, &job.end_date), &strong);
                flow.text(&job.company, &strong);
                flow.bullets(&description_bullets(&job.description, None), body);
                flow.gap(10.0);
            }
        }
        SectionKind::Education => {
            heading(flow, "Education and Training", palette);
            for edu in &doc.education {
                flow.text(&edu.degree, &strong);
                flow.text(&edu.institution, body);
                flow.text(&format_year_month(&edu.end_date), &accent);
                flow.gap(8.0);
            }
        }
        SectionKind::Projects => {
            heading(flow, "Projects", palette);
            for project in &doc.projects {
                flow.text(&project.title, &strong);
                flow.text(&project.description, body);
                flow.text(&link_line(&project.github, &project.live_demo), &accent);
                flow.gap(8.0);
            }
        }
        SectionKind::Certifications => {
            heading(flow, "Certifications", palette);
            for cert in &doc.certifications {
                flow.row(&cert.title, &strong, &cert.year, &accent);
                flow.text(&cert.issuer, body);
                flow.gap(8.0);
            }
        }
        SectionKind::Languages => {
            heading(flow, "Languages", palette);
            let names: Vec<String> = doc.languages.iter().map(|l| l.name.clone()).collect();
            flow.bullets(&names, body);
        }
        SectionKind::Interests => {
            heading(flow, "Interests", palette);
            let interests: Vec<String> = doc.visible_interests().map(str::to_string).collect();
            flow.bullets(&interests, body);
        }
    }
    flow.gap(20.0);
}
