//! Color sanitization ahead of rasterization.
//!
//! The rasterizer understands hex, `rgb()`/`rgba()` and a small set of named
//! colors. Anything else (`oklch()`, `oklab()`, `lab()`, `lch()`, `color()`,
//! `color-mix()`, keywords like `currentColor`, typos) is replaced in place:
//! text and border colors become black, backgrounds become white.

use image::Rgba;
use tracing::warn;

use crate::layout::Node;

pub const FOREGROUND_FALLBACK: &str = "#000000";
pub const BACKGROUND_FALLBACK: &str = "#ffffff";

const NAMED: &[(&str, [u8; 4])] = &[
    ("black", [0, 0, 0, 255]),
    ("white", [255, 255, 255, 255]),
    ("transparent", [0, 0, 0, 0]),
    ("red", [255, 0, 0, 255]),
    ("green", [0, 128, 0, 255]),
    ("blue", [0, 0, 255, 255]),
    ("gray", [128, 128, 128, 255]),
    ("grey", [128, 128, 128, 255]),
    ("silver", [192, 192, 192, 255]),
    ("navy", [0, 0, 128, 255]),
    ("teal", [0, 128, 128, 255]),
    ("orange", [255, 165, 0, 255]),
    ("purple", [128, 0, 128, 255]),
    ("yellow", [255, 255, 0, 255]),
];

/// Parses a color the rasterizer can paint. `None` means unsupported.
pub fn parse_color(value: &str) -> Option<Rgba<u8>> {
    let value = value.trim().to_ascii_lowercase();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_args(args);
    }
    NAMED
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, rgba)| Rgba(*rgba))
}

fn parse_hex(hex: &str) -> Option<Rgba<u8>> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|n| n * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Rgba([nibble(0)?, nibble(1)?, nibble(2)?, 255])),
        4 => Some(Rgba([nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?])),
        6 => Some(Rgba([byte(0)?, byte(2)?, byte(4)?, 255])),
        8 => Some(Rgba([byte(0)?, byte(2)?, byte(4)?, byte(6)?])),
        _ => None,
    }
}

/// Accepts both `r, g, b[, a]` and `r g b[ / a]`.
fn parse_rgb_args(args: &str) -> Option<Rgba<u8>> {
    let normalized = args.replace(['/', ','], " ");
    let parts: Vec<&str> = normalized.split_whitespace().collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |s: &str| -> Option<u8> {
        let v = match s.strip_suffix('%') {
            Some(pct) => pct.parse::<f32>().ok()? * 2.55,
            None => s.parse::<f32>().ok()?,
        };
        v.is_finite().then(|| v.round().clamp(0.0, 255.0) as u8)
    };
    let alpha = match parts.get(3) {
        None => 255,
        Some(s) => {
            let v = match s.strip_suffix('%') {
                Some(pct) => pct.parse::<f32>().ok()? / 100.0,
                None => s.parse::<f32>().ok()?,
            };
            if !v.is_finite() {
                return None;
            }
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
    };
    Some(Rgba([channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, alpha]))
}

fn replace_if_unsupported(slot: &mut Option<String>, fallback: &str, replaced: &mut usize) {
    if let Some(value) = slot {
        if parse_color(value).is_none() {
            *value = fallback.to_string();
            *replaced += 1;
        }
    }
}

/// Rewrites every unsupported color in the tree and returns how many were
/// replaced. The replacement is lossy; callers get a warning in the log.
pub fn sanitize_tree(root: &mut Node) -> usize {
    let mut replaced = 0;
    root.visit_mut(&mut |node| {
        replace_if_unsupported(&mut node.paint.color, FOREGROUND_FALLBACK, &mut replaced);
        replace_if_unsupported(&mut node.paint.border, FOREGROUND_FALLBACK, &mut replaced);
        replace_if_unsupported(&mut node.paint.background, BACKGROUND_FALLBACK, &mut replaced);
    });
    if replaced > 0 {
        warn!(replaced, "replaced unsupported color values before capture");
    }
    replaced
}

/// Parsed color, or the role's fallback for anything unsupported.
pub fn color_or(value: Option<&str>, fallback: &str) -> Option<Rgba<u8>> {
    let value = value?;
    parse_color(value).or_else(|| parse_color(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{NodeKind, Paint, Rect};

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_color("#fff"), Some(Rgba([255, 255, 255, 255])));
        assert_eq!(parse_color("#00B8DB"), Some(Rgba([0, 184, 219, 255])));
        assert_eq!(parse_color("#00000080"), Some(Rgba([0, 0, 0, 128])));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#zzz"), None);
    }

    #[test]
    fn test_parse_rgb_forms() {
        assert_eq!(parse_color("rgb(10, 20, 30)"), Some(Rgba([10, 20, 30, 255])));
        assert_eq!(parse_color("rgba(10,20,30,0.5)"), Some(Rgba([10, 20, 30, 128])));
        assert_eq!(parse_color("rgb(100% 0% 0% / 50%)"), Some(Rgba([255, 0, 0, 128])));
        assert_eq!(parse_color("rgb(1, 2)"), None);
    }

    #[test]
    fn test_modern_color_functions_are_unsupported() {
        for value in [
            "oklch(70% 0.1 200)",
            "oklab(0.5 0.1 0.1)",
            "lab(50% 40 59)",
            "lch(52% 72 56)",
            "color(display-p3 1 0 0)",
            "color-mix(in srgb, red 50%, blue)",
            "currentColor",
            "",
        ] {
            assert_eq!(parse_color(value), None, "{value}");
        }
    }

    #[test]
    fn test_sanitize_replaces_by_role() {
        let mut root = Node::block(Rect::new(0.0, 0.0, 100.0, 100.0))
            .with_paint(Paint {
                background: Some("oklch(98% 0.01 200)".into()),
                color: Some("lab(20% 0 0)".into()),
                border: Some("color(display-p3 0 0 0)".into()),
                radius: 0.0,
            })
            .with_children(vec![Node::new(NodeKind::Rule, Rect::default())
                .with_paint(Paint::fill("#A1F4FD"))]);

        assert_eq!(sanitize_tree(&mut root), 3);
        assert_eq!(root.paint.background.as_deref(), Some(BACKGROUND_FALLBACK));
        assert_eq!(root.paint.color.as_deref(), Some(FOREGROUND_FALLBACK));
        assert_eq!(root.paint.border.as_deref(), Some(FOREGROUND_FALLBACK));
        assert_eq!(root.children[0].paint.background.as_deref(), Some("#A1F4FD"));

        // Already-clean trees are left alone.
        assert_eq!(sanitize_tree(&mut root), 0);
    }
}
