//! Template "02": centered banner header over a two-column body, set in a
//! serif face.

use crate::document::format::{date_range, description_bullets};
use crate::document::{ResumeDocument, SectionKind};
use crate::layout::{Align, Flow, FontFamily, Node, NodeKind, Paint, Rect, TextStyle};
use crate::templates::blocks::{avatar, link_line, meters};
use crate::templates::palette::Palette;
use crate::templates::{TemplateRenderer, DESIGN_WIDTH};

const PAD_X: f32 = 32.0;
const GUTTER: f32 = 32.0;
const CONTENT_WIDTH: f32 = DESIGN_WIDTH - PAD_X * 2.0;
const WIDE_WIDTH: f32 = (CONTENT_WIDTH - GUTTER) * 8.0 / 12.0;
const NARROW_X: f32 = PAD_X + WIDE_WIDTH + GUTTER;
const NARROW_WIDTH: f32 = CONTENT_WIDTH - WIDE_WIDTH - GUTTER;
const FONT: FontFamily = FontFamily::Times;

pub struct BannerTemplate;

impl TemplateRenderer for BannerTemplate {
    fn id(&self) -> &'static str {
        "02"
    }

    fn name(&self) -> &'static str {
        "Banner"
    }

    fn default_section_order(&self) -> Vec<SectionKind> {
        vec![
            SectionKind::Summary,
            SectionKind::Experience,
            SectionKind::Projects,
            SectionKind::Education,
            SectionKind::Skills,
            SectionKind::Languages,
            SectionKind::Certifications,
            SectionKind::Interests,
        ]
    }

    fn layout(&self, doc: &ResumeDocument, palette: &Palette, _order: &[SectionKind]) -> Node {
        let body = TextStyle::new(FONT, 12.0, palette.text());

        let mut page = Flow::new(PAD_X, 0.0, CONTENT_WIDTH);
        header(&mut page, doc, palette, &body);
        page.gap(24.0);

        if doc.has_section(SectionKind::Summary) {
            let mut section = page.nested(0.0);
            heading(&mut section, "Summary", palette);
            section.text(&doc.profile.summary, &body);
            section.gap(20.0);
            page.push(section.finish_section(SectionKind::Summary));
        }

        let top = page.cursor();
        let mut wide = Flow::new(PAD_X, top, WIDE_WIDTH);
        wide_column(&mut wide, doc, palette, &body);
        let mut narrow = Flow::new(NARROW_X, top, NARROW_WIDTH);
        narrow_column(&mut narrow, doc, palette, &body);

        page.push(wide.into_block());
        page.push(narrow.into_block());
        page.gap(24.0);

        let height = page.cursor();
        let mut content = page.into_block();
        content.frame = Rect::new(0.0, 0.0, DESIGN_WIDTH, height);
        content.paint = Paint::fill("#FFFFFF");
        content
    }
}

fn heading(flow: &mut Flow, text: &str, palette: &Palette) {
    flow.text(text, &TextStyle::new(FONT, 16.0, palette.text()).bold());
    flow.gap(2.0);
    flow.rule(palette.primary(), 2.0);
    flow.gap(10.0);
}

fn header(page: &mut Flow, doc: &ResumeDocument, palette: &Palette, body: &TextStyle) {
    page.gap(32.0);
    let diameter = 80.0;
    page.push(avatar(
        &doc.profile,
        (DESIGN_WIDTH - diameter) / 2.0,
        page.cursor(),
        diameter,
        palette.primary(),
        palette.chip(),
    ));
    page.gap(16.0);
    page.text_aligned(
        &doc.profile.full_name,
        &body.clone().sized(24.0).bold(),
        Align::Center,
    );
    page.text_aligned(&doc.profile.designation, &body.clone().sized(14.0), Align::Center);
    page.gap(6.0);

    let contact: Vec<&str> = [
        doc.contact.email.as_str(),
        doc.contact.phone.as_str(),
        doc.contact.location.as_str(),
    ]
    .into_iter()
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .collect();
    page.text_aligned(&contact.join("  |  "), &body.clone().sized(11.0), Align::Center);
    page.gap(24.0);

    // Full-bleed divider under the banner.
    let y = page.cursor();
    page.push(
        Node::new(NodeKind::Rule, Rect::new(0.0, y, DESIGN_WIDTH, 1.0))
            .with_paint(Paint::fill(palette.primary())),
    );
}

fn wide_column(flow: &mut Flow, doc: &ResumeDocument, palette: &Palette, body: &TextStyle) {
    let small = body.clone().sized(11.0);
    let strong = body.clone().bold();

    if doc.has_section(SectionKind::Experience) {
        let mut section = flow.nested(0.0);
        heading(&mut section, "Experience", palette);
        for job in &doc.work_experience {
            let title = [job.company.trim(), job.role.trim()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" | ");
            section.row(
                &title,
                &strong,
                &date_range(&job.start_date, &job.end_date),
                &small.clone().bold(),
            );
            section.gap(4.0);
            let mut bullets = section.nested(16.0);
            bullets.bullets(&description_bullets(&job.description, None), &small);
            section.absorb(bullets);
            section.gap(12.0);
        }
        flow.push(section.finish_section(SectionKind::Experience));
    }

    if doc.has_section(SectionKind::Projects) {
        let mut section = flow.nested(0.0);
        heading(&mut section, "Projects", palette);
        for project in &doc.projects {
            section.text(&project.title, &strong);
            section.text(&project.description, &small);
            section.text(
                &link_line(&project.github, &project.live_demo),
                &small.clone().colored(palette.primary()),
            );
            section.gap(10.0);
        }
        flow.push(section.finish_section(SectionKind::Projects));
    }

    if doc.has_section(SectionKind::Education) {
        let mut section = flow.nested(0.0);
        heading(&mut section, "Education and Training", palette);
        for edu in &doc.education {
            section.row(
                &edu.institution,
                &strong,
                &date_range(&edu.start_date, &edu.end_date),
                &small.clone().bold(),
            );
            section.text(&edu.degree, body);
            section.gap(10.0);
        }
        flow.push(section.finish_section(SectionKind::Education));
    }
}

fn narrow_column(flow: &mut Flow, doc: &ResumeDocument, palette: &Palette, body: &TextStyle) {
    let small = body.clone().sized(11.0);

    if doc.has_section(SectionKind::Skills) {
        let mut section = flow.nested(0.0);
        heading(&mut section, "Skills", palette);
        for skill in &doc.skills {
            section.text(&skill.name, &small);
        }
        section.gap(16.0);
        flow.push(section.finish_section(SectionKind::Skills));
    }

    if doc.has_section(SectionKind::Languages) {
        let mut section = flow.nested(0.0);
        heading(&mut section, "Languages", palette);
        meters(&mut section, &doc.languages, &small, palette.chip(), palette.primary());
        section.gap(8.0);
        flow.push(section.finish_section(SectionKind::Languages));
    }

    if doc.has_section(SectionKind::Certifications) {
        let mut section = flow.nested(0.0);
        heading(&mut section, "Certifications", palette);
        for cert in &doc.certifications {
            section.text(&cert.title, &small.clone().bold());
            let issued = [cert.issuer.trim(), cert.year.trim()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            section.text(&issued, &small);
            section.gap(8.0);
        }
        flow.push(section.finish_section(SectionKind::Certifications));
    }

    let links: Vec<&str> = [
        doc.contact.linkedin.as_str(),
        doc.contact.github.as_str(),
        doc.contact.website.as_str(),
    ]
    .into_iter()
    .map(str::trim)
    .filter(|l| !l.is_empty())
    .collect();
    if !links.is_empty() {
        for link in links {
            flow.text(link, &small.clone().colored(palette.primary()));
        }
        flow.gap(16.0);
    }

    if doc.has_section(SectionKind::Interests) {
        let mut section = flow.nested(0.0);
        heading(&mut section, "Interests", palette);
        let interests: Vec<&str> = doc.visible_interests().collect();
        section.chips(&interests, &small, palette.chip());
        flow.push(section.finish_section(SectionKind::Interests));
    }
}
