//! The normalized, null-safe résumé representation.
//!
//! Every struct deserializes from the loosely-shaped records the editor and
//! the persistence collaborator exchange: absent or `null` values collapse to
//! defaults, historical key spellings are accepted as aliases, and unknown
//! keys are kept in `extra` so they round-trip untouched.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Upper bound of the proficiency scale.
pub const MAX_PROFICIENCY: u8 = 100;
/// Number of steps in the rating widget (each worth 20 points).
pub const RATING_STEPS: u8 = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    #[serde(default, alias = "profileInfo", deserialize_with = "null_as_default")]
    pub profile: Profile,
    #[serde(default, alias = "contactInfo", deserialize_with = "null_as_default")]
    pub contact: Contact,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(default, alias = "certification", deserialize_with = "null_as_default")]
    pub certifications: Vec<Certification>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<RatedItem>,
    #[serde(default, alias = "language", deserialize_with = "null_as_default")]
    pub languages: Vec<RatedItem>,
    #[serde(default, deserialize_with = "text_list")]
    pub interests: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub template: TemplateSelection,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, deserialize_with = "lenient_text")]
    pub full_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub designation: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub summary: String,
    /// Stored-asset URL of the profile photo; blank strings become `None`.
    #[serde(default, alias = "profilePreviewUrl", deserialize_with = "optional_ref")]
    pub profile_image_ref: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(default, alias = "linkedIn", deserialize_with = "lenient_text")]
    pub linkedin: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub github: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub website: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default, deserialize_with = "lenient_text")]
    pub degree: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub institution: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub end_date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    #[serde(default, deserialize_with = "lenient_text")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub end_date: String,
    /// Free text; one bullet per non-blank line.
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub github: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub live_demo: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub issuer: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A skill or language with a proficiency in `0..=100`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedItem {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, alias = "progress", deserialize_with = "clamped_proficiency")]
    pub proficiency: u8,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RatedItem {
    pub fn new(name: impl Into<String>, proficiency: i64) -> Self {
        Self {
            name: name.into(),
            proficiency: clamp_proficiency(proficiency as f64),
            extra: Map::new(),
        }
    }

    /// Position on the 5-step rating widget.
    pub fn rating(&self) -> u8 {
        ((self.proficiency as f32) / 20.0).round() as u8
    }

    /// Inverse of `rating`: each step is worth 20 points.
    pub fn from_rating(name: impl Into<String>, rating: u8) -> Self {
        Self::new(name, i64::from(rating.min(RATING_STEPS)) * 20)
    }

    pub fn fraction(&self) -> f32 {
        f32::from(self.proficiency) / f32::from(MAX_PROFICIENCY)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSelection {
    #[serde(default, alias = "theme", deserialize_with = "optional_ref")]
    pub theme_id: Option<String>,
    #[serde(default, deserialize_with = "optional_index")]
    pub color_palette_index: Option<usize>,
    /// Explicit colors picked in the theme selector. Takes precedence over the index.
    #[serde(default, deserialize_with = "palette_colors")]
    pub color_palette: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub fn clamp_proficiency(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, f64::from(MAX_PROFICIENCY)) as u8
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient field deserializers
// ────────────────────────────────────────────────────────────────────────────

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn value_to_text<E: serde::de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(E::custom(format!("expected text, found {}", kind_of(&other)))),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    value_to_text(Value::deserialize(deserializer)?)
}

fn optional_ref<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = lenient_text(deserializer)?;
    let trimmed = text.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.into_iter().map(value_to_text).collect(),
        other => Err(D::Error::custom(format!(
            "expected a list of text, found {}",
            kind_of(&other)
        ))),
    }
}

fn palette_colors<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if s.trim().is_empty() => Ok(Vec::new()),
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.into_iter().map(value_to_text).collect(),
        other => Err(D::Error::custom(format!(
            "expected a list of colors, found {}",
            kind_of(&other)
        ))),
    }
}

fn optional_index<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_u64().map(|i| i as usize)),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected a palette index, found \"{s}\""))),
        other => Err(D::Error::custom(format!(
            "expected a palette index, found {}",
            kind_of(&other)
        ))),
    }
}

fn clamped_proficiency<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => Ok(clamp_proficiency(n.as_f64().unwrap_or(0.0))),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(clamp_proficiency)
            .map_err(|_| D::Error::custom(format!("expected a proficiency, found \"{s}\""))),
        other => Err(D::Error::custom(format!(
            "expected a proficiency, found {}",
            kind_of(&other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_maps_to_multiples_of_twenty() {
        assert_eq!(RatedItem::from_rating("Rust", 4).proficiency, 80);
        assert_eq!(RatedItem::from_rating("Rust", 9).proficiency, 100);
        assert_eq!(RatedItem::new("Go", 70).rating(), 4);
        assert_eq!(RatedItem::new("Go", 0).rating(), 0);
    }

    #[test]
    fn test_new_clamps_out_of_range() {
        assert_eq!(RatedItem::new("a", -5).proficiency, 0);
        assert_eq!(RatedItem::new("a", 250).proficiency, 100);
    }

    #[test]
    fn test_clamp_nan_is_zero() {
        assert_eq!(clamp_proficiency(f64::NAN), 0);
    }
}
