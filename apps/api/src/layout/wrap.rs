use super::font_metrics::{FontMetricTable, FontWeight};

/// One wrapped line and its measured width in design units.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub width: f32,
}

/// Greedy word wrap against `max_width` (design units).
///
/// Whitespace runs collapse to a single space. A word wider than the line on
/// its own is broken at character boundaries so no line overflows, except a
/// single character that is itself wider than `max_width`.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size: f32,
    weight: FontWeight,
    max_width: f32,
) -> Vec<Line> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return vec![];
    }

    let space_w = metrics.space_at(size, weight);
    let mut lines: Vec<Line> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in words {
        let word_w = metrics.text_width(word, size, weight);

        if word_w > max_width {
            if !current.is_empty() {
                lines.push(Line {
                    text: std::mem::take(&mut current),
                    width: current_width,
                });
                current_width = 0.0;
            }
            let mut pieces = break_word(word, metrics, size, weight, max_width);
            // The last fragment stays open so following words can join it.
            if let Some(last) = pieces.pop() {
                lines.extend(pieces);
                current = last.text;
                current_width = last.width;
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + space_w + word_w > max_width {
            lines.push(Line {
                text: std::mem::replace(&mut current, word.to_string()),
                width: current_width,
            });
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space_w + word_w;
        }
    }

    if !current.is_empty() {
        lines.push(Line {
            text: current,
            width: current_width,
        });
    }
    lines
}

fn break_word(
    word: &str,
    metrics: &FontMetricTable,
    size: f32,
    weight: FontWeight,
    max_width: f32,
) -> Vec<Line> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0.0_f32;

    for c in word.chars() {
        let mut buf = [0u8; 4];
        let char_w = metrics.text_width(c.encode_utf8(&mut buf), size, weight);
        if !piece.is_empty() && piece_width + char_w > max_width {
            pieces.push(Line {
                text: std::mem::take(&mut piece),
                width: piece_width,
            });
            piece_width = 0.0;
        }
        piece.push(c);
        piece_width += char_w;
    }
    if !piece.is_empty() {
        pieces.push(Line {
            text: piece,
            width: piece_width,
        });
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{get_metrics, FontFamily};

    fn helvetica() -> &'static FontMetricTable {
        get_metrics(FontFamily::Helvetica)
    }

    #[test]
    fn test_wrap_empty_returns_no_lines() {
        assert!(wrap_text("   ", helvetica(), 10.0, FontWeight::Regular, 100.0).is_empty());
    }

    #[test]
    fn test_wrap_single_word_one_line() {
        let lines = wrap_text("Rust", helvetica(), 10.0, FontWeight::Regular, 100.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Rust");
        assert!((lines[0].width - 20.56).abs() < 0.01);
    }

    #[test]
    fn test_wrap_breaks_on_width_and_never_overflows() {
        let text = "Led a team of five engineers building a distributed ingestion pipeline";
        let lines = wrap_text(text, helvetica(), 12.0, FontWeight::Regular, 150.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width <= 150.0, "{line:?}");
        }
        let rejoined: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(rejoined.join(" "), text);
    }

    #[test]
    fn test_wrap_collapses_whitespace() {
        let lines = wrap_text("a \n\t b", helvetica(), 10.0, FontWeight::Regular, 500.0);
        assert_eq!(lines[0].text, "a b");
    }

    #[test]
    fn test_wrap_char_breaks_overlong_word() {
        let word = "https://github.com/someone/an-extremely-long-repository-name";
        let lines = wrap_text(word, helvetica(), 10.0, FontWeight::Regular, 80.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width <= 80.0);
        }
        let joined: String = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(joined, word);
    }
}
