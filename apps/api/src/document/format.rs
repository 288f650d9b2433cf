//! Shared text formatting used by every template skin.

use chrono::NaiveDate;

/// Formats a `YYYY-MM` (or `YYYY-MM-DD`, or RFC 3339) date as `Mon YYYY`.
///
/// Anything unparsable, including the empty string, formats as `""`.
pub fn format_year_month(raw: &str) -> String {
    parse_year_month(raw)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_default()
}

fn parse_year_month(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

/// `start - end` with the separator dropped when either side is missing.
pub fn date_range(start: &str, end: &str) -> String {
    let start = format_year_month(start);
    let end = format_year_month(end);
    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{start} - {end}"),
        (false, true) => start,
        (true, false) => end,
        (true, true) => String::new(),
    }
}

/// Splits a free-text description into bullet lines, dropping blank lines.
/// `cap` limits the number of bullets kept (a per-template density policy).
pub fn description_bullets(text: &str, cap: Option<usize>) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(cap.unwrap_or(usize::MAX))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_year_month() {
        assert_eq!(format_year_month("2020-01"), "Jan 2020");
        assert_eq!(format_year_month("2022-05-17"), "May 2022");
        assert_eq!(format_year_month("2023-11-02T10:00:00Z"), "Nov 2023");
    }

    #[test]
    fn test_format_year_month_invalid_is_empty() {
        assert_eq!(format_year_month(""), "");
        assert_eq!(format_year_month("present"), "");
        assert_eq!(format_year_month("2020-13"), "");
    }

    #[test]
    fn test_date_range_drops_separator() {
        assert_eq!(date_range("2020-01", "2022-05"), "Jan 2020 - May 2022");
        assert_eq!(date_range("2020-01", ""), "Jan 2020");
        assert_eq!(date_range("", "bogus"), "");
    }

    #[test]
    fn test_description_bullets_filters_blank_lines() {
        let bullets = description_bullets("Built X\n\n  \nShipped Y\n", None);
        assert_eq!(bullets, vec!["Built X", "Shipped Y"]);
    }

    #[test]
    fn test_description_bullets_cap() {
        let bullets = description_bullets("a\nb\nc\nd", Some(3));
        assert_eq!(bullets, vec!["a", "b", "c"]);
    }
}
