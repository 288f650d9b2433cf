//! Static font-metric tables for the two typefaces the templates use.
//!
//! Widths are advance widths in em units taken from the standard Type1 AFM
//! files, so the wrap computed here matches what the PDF writer produces with
//! the built-in Helvetica and Times faces. Bold text is approximated with a
//! constant widening factor.
//!
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Sans-serif body face used by most templates.
    Helvetica,
    /// Serif face for the classic templates.
    Times,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

impl FontFamily {
    /// Name of the matching standard-14 PDF font.
    pub fn pdf_base_font(&self, weight: FontWeight) -> &'static [u8] {
        match (self, weight) {
            (FontFamily::Helvetica, FontWeight::Regular) => b"Helvetica",
            (FontFamily::Helvetica, FontWeight::Bold) => b"Helvetica-Bold",
            (FontFamily::Times, FontWeight::Regular) => b"Times-Roman",
            (FontFamily::Times, FontWeight::Bold) => b"Times-Bold",
        }
    }
}

/// U+2022, used as an inline separator. Same advance in both faces.
const BULLET_WIDTH: f32 = 0.350;

/// Bold glyphs run roughly this much wider than regular ones in both faces.
const BOLD_WIDENING: f32 = 1.06;

/// Static character-width table for a font family.
///
/// `widths[i]` = width of ASCII character `(i + 32)` at 1em.
pub struct FontMetricTable {
    pub font: FontFamily,
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures a string in em units. Non-ASCII characters fall back to
    /// `average_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_em(c)).sum()
    }

    pub fn char_em(&self, c: char) -> f32 {
        let code = c as usize;
        match c {
            _ if (32..=126).contains(&code) => self.widths[code - 32],
            '\u{2022}' => BULLET_WIDTH,
            _ => self.average_char_width,
        }
    }

    /// Width of `s` in design units at `size` design units per em.
    pub fn text_width(&self, s: &str, size: f32, weight: FontWeight) -> f32 {
        self.measure_str(s) * size * weight_factor(weight)
    }

    pub fn space_at(&self, size: f32, weight: FontWeight) -> f32 {
        self.space_width * size * weight_factor(weight)
    }
}

fn weight_factor(weight: FontWeight) -> f32 {
    match weight {
        FontWeight::Regular => 1.0,
        FontWeight::Bold => BOLD_WIDENING,
    }
}

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Helvetica,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0-9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.540,
    space_width: 0.278,
};

static TIMES_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Times,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
        // 0-9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.480, 0.200, 0.480, 0.541,
    ],
    average_char_width: 0.480,
    space_width: 0.250,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(font: FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Helvetica => &HELVETICA_TABLE,
        FontFamily::Times => &TIMES_TABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(FontFamily::Helvetica).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(FontFamily::Helvetica);
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics.measure_str("Rust");
        assert!((width - 2.056).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(FontFamily::Times);
        let width = metrics.measure_str("é");
        assert!((width - metrics.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_text_width_scales_with_size_and_weight() {
        let metrics = get_metrics(FontFamily::Helvetica);
        let regular = metrics.text_width("Resume", 10.0, FontWeight::Regular);
        let doubled = metrics.text_width("Resume", 20.0, FontWeight::Regular);
        let bold = metrics.text_width("Resume", 10.0, FontWeight::Bold);
        assert!((doubled - 2.0 * regular).abs() < 1e-3);
        assert!(bold > regular);
    }

    #[test]
    fn test_times_is_narrower_than_helvetica() {
        let text = "Architected distributed caching layer";
        assert!(
            get_metrics(FontFamily::Times).measure_str(text)
                < get_metrics(FontFamily::Helvetica).measure_str(text)
        );
    }

    #[test]
    fn test_pdf_base_font_names() {
        assert_eq!(
            FontFamily::Times.pdf_base_font(FontWeight::Bold),
            b"Times-Bold"
        );
        assert_eq!(
            FontFamily::Helvetica.pdf_base_font(FontWeight::Regular),
            b"Helvetica"
        );
    }
}
