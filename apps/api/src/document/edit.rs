//! Editor mutations. Each edit replaces one sub-object or list wholesale and
//! yields a new document; the input is never modified in place.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::document::model::ResumeDocument;
use crate::document::normalize::{normalize, DocumentError};

const OBJECT_SECTIONS: &[&str] = &["profile", "contact", "template"];
const LIST_SECTIONS: &[&str] = &[
    "education",
    "workExperience",
    "projects",
    "certifications",
    "skills",
    "languages",
    "interests",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DocumentEdit {
    /// Sets one key of an object section (`profile`, `contact`, `template`).
    SetField {
        section: String,
        key: String,
        value: Value,
    },
    AddItem {
        section: String,
        item: Value,
    },
    /// Replaces one key of a list item, or the whole item when `key` is absent.
    UpdateItem {
        section: String,
        index: usize,
        #[serde(default)]
        key: Option<String>,
        value: Value,
    },
    RemoveItem {
        section: String,
        index: usize,
    },
}

#[derive(Debug, Error)]
pub enum EditError {
    #[error("unknown section '{0}'")]
    UnknownSection(String),

    #[error("section '{0}' is not a list")]
    NotAList(String),

    #[error("section '{0}' is not an object")]
    NotAnObject(String),

    #[error("index {index} is out of bounds for '{section}' (len {len})")]
    IndexOutOfBounds {
        section: String,
        index: usize,
        len: usize,
    },

    #[error("item {index} of '{section}' is not an object")]
    ItemNotAnObject { section: String, index: usize },

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Maps historical section spellings to the canonical key.
fn canonical_section(name: &str) -> Option<&'static str> {
    let canonical = match name {
        "profileInfo" => "profile",
        "contactInfo" => "contact",
        "certification" => "certifications",
        "language" => "languages",
        other => other,
    };
    OBJECT_SECTIONS
        .iter()
        .chain(LIST_SECTIONS.iter())
        .find(|s| **s == canonical)
        .copied()
}

/// Maps historical field spellings to the key the document serializes with.
/// Writing an alias next to its canonical key would make the record ambiguous.
fn canonical_key(key: &str) -> &str {
    match key {
        "progress" => "proficiency",
        "profilePreviewUrl" => "profileImageRef",
        "theme" => "themeId",
        "linkedIn" => "linkedin",
        other => other,
    }
}

/// Applies `edit` to a copy of `doc` and re-normalizes the result.
pub fn apply_edit(doc: &ResumeDocument, edit: &DocumentEdit) -> Result<ResumeDocument, EditError> {
    let mut raw = serde_json::to_value(doc)?;
    let Value::Object(root) = &mut raw else {
        return Err(EditError::NotAnObject("document".to_string()));
    };

    match edit {
        DocumentEdit::SetField {
            section,
            key,
            value,
        } => {
            let name = resolve(section)?;
            if !OBJECT_SECTIONS.contains(&name) {
                return Err(EditError::NotAnObject(name.to_string()));
            }
            let object = root
                .entry(name)
                .or_insert_with(|| Value::Object(Map::new()));
            match object {
                Value::Object(fields) => {
                    fields.insert(canonical_key(key).to_string(), value.clone());
                }
                _ => return Err(EditError::NotAnObject(name.to_string())),
            }
        }
        DocumentEdit::AddItem { section, item } => {
            let items = list_mut(root, section)?;
            items.push(item.clone());
        }
        DocumentEdit::UpdateItem {
            section,
            index,
            key,
            value,
        } => {
            let name = resolve(section)?;
            let items = list_mut(root, section)?;
            let len = items.len();
            let slot = items
                .get_mut(*index)
                .ok_or_else(|| EditError::IndexOutOfBounds {
                    section: name.to_string(),
                    index: *index,
                    len,
                })?;
            match key {
                None => *slot = value.clone(),
                Some(key) => match slot {
                    Value::Object(fields) => {
                        fields.insert(canonical_key(key).to_string(), value.clone());
                    }
                    _ => {
                        return Err(EditError::ItemNotAnObject {
                            section: name.to_string(),
                            index: *index,
                        })
                    }
                },
            }
        }
        DocumentEdit::RemoveItem { section, index } => {
            let name = resolve(section)?;
            let items = list_mut(root, section)?;
            if *index >= items.len() {
                return Err(EditError::IndexOutOfBounds {
                    section: name.to_string(),
                    index: *index,
                    len: items.len(),
                });
            }
            items.remove(*index);
        }
    }

    Ok(normalize(&raw)?)
}

fn resolve(section: &str) -> Result<&'static str, EditError> {
    canonical_section(section).ok_or_else(|| EditError::UnknownSection(section.to_string()))
}

fn list_mut<'a>(
    root: &'a mut Map<String, Value>,
    section: &str,
) -> Result<&'a mut Vec<Value>, EditError> {
    let name = resolve(section)?;
    if !LIST_SECTIONS.contains(&name) {
        return Err(EditError::NotAList(name.to_string()));
    }
    match root.entry(name).or_insert_with(|| Value::Array(Vec::new())) {
        Value::Array(items) => Ok(items),
        _ => Err(EditError::NotAList(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::RatedItem;
    use serde_json::json;

    #[test]
    fn test_set_field_replaces_profile_key() {
        let doc = ResumeDocument::default();
        let edit = DocumentEdit::SetField {
            section: "profileInfo".into(),
            key: "fullName".into(),
            value: json!("Grace Hopper"),
        };
        let next = apply_edit(&doc, &edit).unwrap();
        assert_eq!(next.profile.full_name, "Grace Hopper");
        assert_eq!(doc.profile.full_name, "", "input must stay untouched");
    }

    #[test]
    fn test_add_update_remove_item() {
        let doc = ResumeDocument::default();
        let doc = apply_edit(
            &doc,
            &DocumentEdit::AddItem {
                section: "skills".into(),
                item: json!({"name": "Rust", "progress": 60}),
            },
        )
        .unwrap();
        let doc = apply_edit(
            &doc,
            &DocumentEdit::UpdateItem {
                section: "skills".into(),
                index: 0,
                key: Some("progress".into()),
                value: json!(500),
            },
        )
        .unwrap();
        assert_eq!(doc.skills[0].proficiency, 100);

        let doc = apply_edit(
            &doc,
            &DocumentEdit::RemoveItem {
                section: "skills".into(),
                index: 0,
            },
        )
        .unwrap();
        assert!(doc.skills.is_empty());
    }

    #[test]
    fn test_item_alias_key_updates_canonical_field() {
        let doc = ResumeDocument {
            languages: vec![RatedItem::new("English", 40)],
            ..Default::default()
        };
        let edit = DocumentEdit::UpdateItem {
            section: "language".into(),
            index: 0,
            key: Some("progress".into()),
            value: json!(80),
        };
        let next = apply_edit(&doc, &edit).unwrap();
        assert_eq!(next.languages[0].proficiency, 80);
        assert!(next.languages[0].extra.is_empty());
    }

    #[test]
    fn test_object_alias_keys_update_canonical_fields() {
        let set = |section: &str, key: &str, value: Value| DocumentEdit::SetField {
            section: section.into(),
            key: key.into(),
            value,
        };
        let doc = ResumeDocument::default();
        let doc = apply_edit(&doc, &set("profileInfo", "profilePreviewUrl", json!("https://cdn/a.png")))
            .unwrap();
        let doc = apply_edit(&doc, &set("contactInfo", "linkedIn", json!("in/ada"))).unwrap();
        let doc = apply_edit(&doc, &set("template", "theme", json!("03"))).unwrap();
        // A second write through the alias replaces the first.
        let doc = apply_edit(&doc, &set("template", "theme", json!("04"))).unwrap();

        assert_eq!(doc.profile.profile_image_ref.as_deref(), Some("https://cdn/a.png"));
        assert_eq!(doc.contact.linkedin, "in/ada");
        assert_eq!(doc.template.theme_id.as_deref(), Some("04"));
        assert!(doc.template.extra.is_empty());
    }

    #[test]
    fn test_update_interest_replaces_whole_item() {
        let doc = ResumeDocument {
            interests: vec!["".into()],
            ..Default::default()
        };
        let doc = apply_edit(
            &doc,
            &DocumentEdit::UpdateItem {
                section: "interests".into(),
                index: 0,
                key: None,
                value: json!("Hiking"),
            },
        )
        .unwrap();
        assert_eq!(doc.interests, vec!["Hiking"]);
    }

    #[test]
    fn test_remove_out_of_bounds_fails() {
        let err = apply_edit(
            &ResumeDocument::default(),
            &DocumentEdit::RemoveItem {
                section: "projects".into(),
                index: 3,
            },
        )
        .unwrap_err();
        assert!(matches!(err, EditError::IndexOutOfBounds { len: 0, .. }));
    }

    #[test]
    fn test_unknown_section_fails() {
        let err = apply_edit(
            &ResumeDocument::default(),
            &DocumentEdit::AddItem {
                section: "hobbies".into(),
                item: json!("x"),
            },
        )
        .unwrap_err();
        assert!(matches!(err, EditError::UnknownSection(_)));
    }

    #[test]
    fn test_malformed_item_is_rejected_by_normalize() {
        let err = apply_edit(
            &ResumeDocument::default(),
            &DocumentEdit::AddItem {
                section: "education".into(),
                item: json!(["not", "an", "object"]),
            },
        )
        .unwrap_err();
        assert!(matches!(err, EditError::Document(_)));
    }

    #[test]
    fn test_edit_deserializes_from_tagged_json() {
        let edit: DocumentEdit = serde_json::from_value(json!({
            "op": "remove_item", "section": "workExperience", "index": 1
        }))
        .unwrap();
        assert!(matches!(edit, DocumentEdit::RemoveItem { index: 1, .. }));
    }
}
