//! Template "01": tinted sidebar with avatar, contact, education and
//! languages; everything else in the main column.

use crate::document::format::{date_range, description_bullets};
use crate::document::{ResumeDocument, SectionKind};
use crate::layout::{Align, Flow, FontFamily, Node, Paint, Rect, TextStyle};
use crate::templates::blocks::{avatar, contact_fields, meters};
use crate::templates::palette::Palette;
use crate::templates::{TemplateRenderer, DESIGN_WIDTH};

const PAD: f32 = 12.0;
const SIDEBAR_WIDTH: f32 = 248.0;
const COLUMN_GAP: f32 = 32.0;
const MAIN_X: f32 = PAD + SIDEBAR_WIDTH + COLUMN_GAP;
const MAIN_WIDTH: f32 = DESIGN_WIDTH - MAIN_X - PAD - 28.0;
const FONT: FontFamily = FontFamily::Helvetica;

pub struct SidebarTemplate;

impl TemplateRenderer for SidebarTemplate {
    fn id(&self) -> &'static str {
        "01"
    }

    fn name(&self) -> &'static str {
        "Sidebar"
    }

    fn default_section_order(&self) -> Vec<SectionKind> {
        vec![
            SectionKind::Education,
            SectionKind::Languages,
            SectionKind::Summary,
            SectionKind::Experience,
            SectionKind::Projects,
            SectionKind::Skills,
            SectionKind::Certifications,
            SectionKind::Interests,
        ]
    }

    fn layout(&self, doc: &ResumeDocument, palette: &Palette, _order: &[SectionKind]) -> Node {
        let sidebar = sidebar_column(doc, palette);
        let main = main_column(doc, palette);

        let content_bottom = (sidebar.cursor() + 40.0).max(main.cursor() + 20.0);
        let height = content_bottom + PAD;

        let mut sidebar = sidebar.into_block();
        sidebar.frame = Rect::new(PAD, PAD, SIDEBAR_WIDTH, content_bottom - PAD);
        sidebar.paint = Paint::fill(palette.background());

        Node::block(Rect::new(0.0, 0.0, DESIGN_WIDTH, height))
            .with_paint(Paint::fill("#FFFFFF"))
            .with_children(vec![sidebar, main.into_block()])
    }
}

fn heading(flow: &mut Flow, text: &str, palette: &Palette) {
    let style = TextStyle::new(FONT, 14.0, palette.text()).bold();
    let top = flow.cursor();
    flow.place(
        Node::block(Rect::new(
            flow.x(),
            top + style.line_height() - 8.0,
            style.measure(text),
            8.0,
        ))
        .with_paint(Paint::fill(palette.soft_accent())),
    );
    flow.text(text, &style);
    flow.gap(10.0);
}

fn sidebar_column(doc: &ResumeDocument, palette: &Palette) -> Flow {
    let mut flow = Flow::new(PAD + 8.0, PAD + 40.0, SIDEBAR_WIDTH - 16.0);
    let body = TextStyle::new(FONT, 12.0, palette.text());

    let diameter = 100.0;
    flow.push(avatar(
        &doc.profile,
        PAD + (SIDEBAR_WIDTH - diameter) / 2.0,
        flow.cursor(),
        diameter,
        palette.soft_accent(),
        palette.chip(),
    ));
    flow.gap(12.0);
    flow.text_aligned(&doc.profile.full_name, &body.clone().sized(20.0).bold(), Align::Center);
    flow.text_aligned(&doc.profile.designation, &body.clone().sized(14.0), Align::Center);
    flow.gap(24.0);

    let mut contact = flow.nested(16.0);
    for (_, value) in contact_fields(&doc.contact) {
        let top = contact.cursor();
        contact.place(
            Node::block(Rect::new(contact.x(), top, 22.0, 22.0))
                .with_paint(Paint::fill(palette.chip()).rounded(11.0)),
        );
        let mut line = Flow::new(contact.x() + 30.0, top + 3.0, contact.width() - 30.0);
        line.text(value, &body.clone().sized(11.0));
        let bottom = line.cursor().max(top + 22.0);
        contact.absorb(line);
        contact.gap(bottom - contact.cursor() + 12.0);
    }
    flow.absorb(contact);
    flow.gap(8.0);

    if doc.has_section(SectionKind::Education) {
        let mut section = flow.nested(16.0);
        heading(&mut section, "Education", palette);
        for edu in &doc.education {
            section.text(&edu.degree, &body.clone().bold());
            section.text(&edu.institution, &body.clone().sized(11.0));
            section.text(
                &date_range(&edu.start_date, &edu.end_date),
                &body.clone().sized(10.0).colored(palette.primary()),
            );
            section.gap(10.0);
        }
        flow.push(section.finish_section(SectionKind::Education));
    }

    if doc.has_section(SectionKind::Languages) {
        let mut section = flow.nested(16.0);
        heading(&mut section, "Languages", palette);
        meters(
            &mut section,
            &doc.languages,
            &body.clone().sized(11.0),
            palette.chip(),
            palette.primary(),
        );
        flow.push(section.finish_section(SectionKind::Languages));
    }
    flow
}

fn main_column(doc: &ResumeDocument, palette: &Palette) -> Flow {
    let mut flow = Flow::new(MAIN_X, PAD + 40.0, MAIN_WIDTH);
    let body = TextStyle::new(FONT, 12.0, palette.text());
    let title = TextStyle::new(FONT, 13.0, "#111827").bold();

    if doc.has_section(SectionKind::Summary) {
        let mut section = flow.nested(0.0);
        heading(&mut section, "Professional Summary", palette);
        section.text(&doc.profile.summary, &body);
        section.gap(16.0);
        flow.push(section.finish_section(SectionKind::Summary));
    }

    if doc.has_section(SectionKind::Experience) {
        let mut section = flow.nested(0.0);
        heading(&mut section, "Work Experience", palette);
        for job in &doc.work_experience {
            section.text(&job.company, &title);
            section.row(
                &job.role,
                &body.clone().sized(11.0),
                &date_range(&job.start_date, &job.end_date),
                &body.clone().sized(11.0).bold(),
            );
            section.gap(4.0);
            section.bullets(&description_bullets(&job.description, None), &body.clone().sized(11.0));
            section.gap(10.0);
        }
        flow.push(section.finish_section(SectionKind::Experience));
    }

    if doc.has_section(SectionKind::Projects) {
        let mut section = flow.nested(0.0);
        heading(&mut section, "Projects", palette);
        for project in &doc.projects {
            section.text(&project.title, &title);
            section.text(&project.description, &body.clone().sized(11.0));
            let links: Vec<&str> = [project.github.as_str(), project.live_demo.as_str()]
                .into_iter()
                .filter(|l| !l.trim().is_empty())
                .collect();
            if !links.is_empty() {
                section.gap(4.0);
                section.chips(&links, &body.clone().sized(10.0), palette.chip());
            }
            section.gap(10.0);
        }
        flow.push(section.finish_section(SectionKind::Projects));
    }

    if doc.has_section(SectionKind::Skills) {
        let mut section = flow.nested(0.0);
        heading(&mut section, "Skills", palette);
        let names: Vec<&str> = doc.skills.iter().map(|s| s.name.as_str()).collect();
        section.chips(&names, &body.clone().sized(11.0), palette.chip());
        section.gap(16.0);
        flow.push(section.finish_section(SectionKind::Skills));
    }

    if doc.has_section(SectionKind::Certifications) {
        let mut section = flow.nested(0.0);
        heading(&mut section, "Certifications", palette);
        for cert in &doc.certifications {
            section.row(&cert.title, &title.clone().sized(12.0), &cert.year, &body);
            section.text(&cert.issuer, &body.clone().sized(11.0).colored(palette.primary()));
            section.gap(8.0);
        }
        flow.push(section.finish_section(SectionKind::Certifications));
    }

    if doc.has_section(SectionKind::Interests) {
        let mut section = flow.nested(0.0);
        heading(&mut section, "Interests", palette);
        let interests: Vec<&str> = doc.visible_interests().collect();
        section.chips(&interests, &body.clone().sized(11.0), palette.chip());
        flow.push(section.finish_section(SectionKind::Interests));
    }
    flow
}
