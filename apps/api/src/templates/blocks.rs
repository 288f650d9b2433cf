//! Building blocks shared by the skins: avatars, contact lists, multi-column
//! name lists and proficiency meters.

use crate::document::{Contact, Profile, RatedItem, ResumeDocument, SectionKind};
use crate::layout::{Flow, Node, NodeKind, Paint, Rect, TextStyle};

/// Contact fields in display order, blanks removed.
pub fn contact_fields(contact: &Contact) -> Vec<(&'static str, &str)> {
    [
        ("Phone", contact.phone.as_str()),
        ("Email", contact.email.as_str()),
        ("Location", contact.location.as_str()),
        ("LinkedIn", contact.linkedin.as_str()),
        ("GitHub", contact.github.as_str()),
        ("Website", contact.website.as_str()),
    ]
    .into_iter()
    .map(|(label, value)| (label, value.trim()))
    .filter(|(_, value)| !value.is_empty())
    .collect()
}

/// Round avatar: a ring painted `ring`, then the photo when the profile has
/// one, otherwise an empty disc in `placeholder`.
pub fn avatar(profile: &Profile, x: f32, y: f32, diameter: f32, ring: &str, placeholder: &str) -> Node {
    let inset = diameter * 0.05;
    let inner = Rect::new(x + inset, y + inset, diameter - inset * 2.0, diameter - inset * 2.0);
    let content = match &profile.profile_image_ref {
        Some(src) => Node::new(NodeKind::Image { src: src.clone() }, inner)
            .with_paint(Paint::default().rounded(inner.width / 2.0)),
        None => Node::block(inner).with_paint(Paint::fill(placeholder).rounded(inner.width / 2.0)),
    };
    Node::block(Rect::new(x, y, diameter, diameter))
        .with_paint(Paint::fill(ring).rounded(diameter / 2.0))
        .with_children(vec![content])
}

/// Splits `items` into `columns` chunks, earlier chunks taking the remainder
/// (`ceil(n / columns)` items each).
pub fn split_columns<T>(items: &[T], columns: usize) -> Vec<&[T]> {
    if items.is_empty() || columns == 0 {
        return Vec::new();
    }
    let per_column = items.len().div_ceil(columns);
    items.chunks(per_column).collect()
}

/// Lays out short labels in `columns` side-by-side columns, optionally with
/// a bullet marker. The cursor ends below the tallest column.
pub fn name_columns(flow: &mut Flow, names: &[&str], columns: usize, style: &TextStyle, bulleted: bool) {
    const GUTTER: f32 = 16.0;
    if names.is_empty() || columns == 0 {
        return;
    }
    let col_width = (flow.width() - GUTTER * (columns as f32 - 1.0)) / columns as f32;
    let top = flow.cursor();
    for (i, chunk) in split_columns(names, columns).into_iter().enumerate() {
        let mut column = Flow::new(flow.x() + i as f32 * (col_width + GUTTER), top, col_width);
        let items: Vec<String> = chunk.iter().map(|n| n.to_string()).collect();
        if bulleted {
            column.bullets(&items, style);
        } else {
            for item in &items {
                column.text(item, style);
            }
        }
        flow.push(column.into_block());
    }
}

/// Name above a proficiency bar for each item.
pub fn meters(flow: &mut Flow, items: &[RatedItem], label: &TextStyle, track: &str, fill: &str) {
    for item in items {
        flow.text(&item.name, label);
        flow.gap(2.0);
        flow.meter(item.fraction(), track, fill, 5.0);
        flow.gap(8.0);
    }
}

/// Stacks sections in `order`, skipping the ones with nothing to show.
/// `build` fills one section's flow; the wrapping section node is added here.
pub fn ordered_sections(
    flow: &mut Flow,
    doc: &ResumeDocument,
    order: &[SectionKind],
    mut build: impl FnMut(&mut Flow, SectionKind),
) {
    for &kind in order {
        if !doc.has_section(kind) {
            continue;
        }
        let mut section = flow.nested(0.0);
        build(&mut section, kind);
        flow.push(section.finish_section(kind));
    }
}

/// Project links joined on one line, e.g. `Repository: x | Demo: y`.
pub fn link_line(github: &str, live_demo: &str) -> String {
    let parts: Vec<String> = [("Repository", github.trim()), ("Demo", live_demo.trim())]
        .into_iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(label, v)| format!("{label}: {v}"))
        .collect();
    parts.join(" | ")
}
