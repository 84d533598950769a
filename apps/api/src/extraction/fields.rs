//! The fixed enumeration of extractable resume fields and their
//! caller-supplied metadata (labels and preset option lists).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Every field the extraction endpoint knows how to ask for.
/// The wire names are the snake_case forms (`personal_info`, `languages`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractField {
    PersonalInfo,
    Languages,
    Skills,
    Eeo,
    Salary,
    WorkExperience,
    Education,
}

impl ExtractField {
    /// Wire name, also the key into the request's `metadata` map.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractField::PersonalInfo => "personal_info",
            ExtractField::Languages => "languages",
            ExtractField::Skills => "skills",
            ExtractField::Eeo => "eeo",
            ExtractField::Salary => "salary",
            ExtractField::WorkExperience => "work_experience",
            ExtractField::Education => "education",
        }
    }
}

/// Caller-supplied metadata for one field: an optional human label, an
/// optional list of preset option values the model should prefer, and —
/// for composite fields — nested metadata per sub-field (`country_code`
/// under personal_info, `degree`/`month` under education, and so on).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldMeta {
    pub label: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub fields: HashMap<String, FieldMeta>,
}

impl FieldMeta {
    /// Display name used in prompt text: the label when present, else the wire name.
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(fallback)
    }

    /// Nested metadata for a named sub-field of a composite field.
    pub fn sub(&self, name: &str) -> Option<&FieldMeta> {
        self.fields.get(name)
    }
}

/// Request metadata, keyed by field wire name.
pub type FieldMetadata = HashMap<String, FieldMeta>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_wire_names_round_trip() {
        for field in [
            ExtractField::PersonalInfo,
            ExtractField::Languages,
            ExtractField::Skills,
            ExtractField::Eeo,
            ExtractField::Salary,
            ExtractField::WorkExperience,
            ExtractField::Education,
        ] {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
            let back: ExtractField = serde_json::from_str(&json).unwrap();
            assert_eq!(back, field);
        }
    }

    #[test]
    fn test_field_meta_deserializes_nested_fields() {
        let json = r#"{
            "label": "Education",
            "fields": {
                "degree": {"label": "Degree", "options": ["Bachelor", "Master"]},
                "month": {"options": ["1", "2", "3"]}
            }
        }"#;
        let meta: FieldMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.display_name("education"), "Education");
        assert!(meta.options.is_empty());
        let degree = meta.sub("degree").unwrap();
        assert_eq!(degree.options, vec!["Bachelor", "Master"]);
        assert_eq!(meta.sub("month").unwrap().display_name("month"), "month");
        assert!(meta.sub("year").is_none());
    }

    #[test]
    fn test_field_meta_defaults() {
        let meta: FieldMeta = serde_json::from_str("{}").unwrap();
        assert!(meta.label.is_none());
        assert!(meta.options.is_empty());
        assert!(meta.fields.is_empty());
        assert_eq!(meta.display_name("skills"), "skills");
    }
}
