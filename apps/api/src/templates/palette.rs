//! Five-color template palettes.
//!
//! Positions are fixed across every skin: 0 is the lightest background, 1 a
//! soft accent, 2 the chip/badge background, 3 the primary accent and 4 the
//! body text color.

use serde::Serialize;

use crate::document::TemplateSelection;

pub const PALETTE_SIZE: usize = 5;

pub const DEFAULT_PALETTE: [&str; PALETTE_SIZE] =
    ["#EBFDFF", "#A1F4FD", "#CEFAFE", "#00B8DB", "#4A5565"];

/// The theme family offered by the palette picker; `colorPaletteIndex`
/// indexes into this list.
pub const THEME_FAMILY: [[&str; PALETTE_SIZE]; 12] = [
    ["#EBFDFF", "#A1F4FD", "#CEFAFE", "#00BBDD", "#4A5565"],
    ["#E9FBFF", "#93E2DA", "#2AC9A0", "#30DCA5", "#3D4C54"],
    ["#F5FAFF", "#C9C2F8", "#8579D1", "#4B4B5C", "#444B5C"],
    ["#FFF5F7", "#FFE0EF", "#FAC6D8", "#F6792C", "#5A5A5A"],
    ["#F9FAFF", "#EAE7EB", "#BCB0BE", "#776C95", "#20374B"],
    ["#F4FFFF", "#F3DFD2", "#B0E094", "#34C79D", "#384C48"],
    ["#F4FFFF", "#F3DFD2", "#8ED09A", "#34C79D", "#384C48"],
    ["#F9FCFF", "#EAF2FF", "#C0E2DE", "#2AC9A0", "#4C4C74"],
    ["#F9FCFF", "#EAF2FF", "#C0E2DE", "#2AC9A0", "#3D4565"],
    ["#F7F7FF", "#F2F2F2", "#D9D9FF", "#7A77AA", "#2B3342"],
    ["#F7F7FF", "#E4E4E4", "#CFCFCF", "#444444", "#222222"],
    ["#E3F2FD", "#99CAF9", "#8AD2F4", "#1E88E5", "#0047A1"],
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Palette([String; PALETTE_SIZE]);

impl Default for Palette {
    fn default() -> Self {
        Self::from_static(DEFAULT_PALETTE)
    }
}

impl Palette {
    pub fn from_static(colors: [&str; PALETTE_SIZE]) -> Self {
        Self(colors.map(str::to_string))
    }

    /// Takes the first five colors. `None` when fewer than five non-blank
    /// colors are given.
    pub fn from_colors(colors: &[String]) -> Option<Self> {
        let picked: Vec<String> = colors
            .iter()
            .take(PALETTE_SIZE)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        <[String; PALETTE_SIZE]>::try_from(picked).ok().map(Self)
    }

    /// `colors` when it is a full palette, otherwise `fallback`.
    pub fn or_default(colors: &[String], fallback: Palette) -> Self {
        Self::from_colors(colors).unwrap_or(fallback)
    }

    pub fn from_theme_index(index: usize) -> Option<Self> {
        THEME_FAMILY.get(index).copied().map(Self::from_static)
    }

    /// Explicit colors win over the family index; anything unusable falls
    /// back to the template's own default.
    pub fn resolve(selection: &TemplateSelection, template_default: Palette) -> Self {
        Self::from_colors(&selection.color_palette)
            .or_else(|| selection.color_palette_index.and_then(Self::from_theme_index))
            .unwrap_or(template_default)
    }

    pub fn colors(&self) -> &[String; PALETTE_SIZE] {
        &self.0
    }

    pub fn background(&self) -> &str {
        &self.0[0]
    }

    pub fn soft_accent(&self) -> &str {
        &self.0[1]
    }

    pub fn chip(&self) -> &str {
        &self.0[2]
    }

    pub fn primary(&self) -> &str {
        &self.0[3]
    }

    pub fn text(&self) -> &str {
        &self.0[4]
    }
}
