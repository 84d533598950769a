//! Prompt Builder — assembles the system/user instruction pair sent to the
//! completion backend.
//!
//! `build_prompt` is a pure function of its inputs: no I/O, no randomness,
//! no hidden state. Field instruction lines come from an explicit ordered
//! strategy table, so the emission order never depends on the order the
//! caller listed the fields in.

use serde_json::Value;

use crate::extraction::fields::{ExtractField, FieldMeta, FieldMetadata};

/// The immutable instruction pair consumed exactly once per extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// System instruction: extract-only, no fabrication, reasoned inference,
/// confidence scores on everything.
pub const SYSTEM_PROMPT: &str = "You are a professional resume analyst. \
Extract information from the resume the user provides; never fabricate content. \
Apply intelligent inference:\n\
1. Derive skill experience from the work history instead of simply returning 0 years\n\
2. Give a reasonable inference for dates that are not stated explicitly\n\
3. Infer a reasonable country/region code from the location information in the resume\n\
4. Compute years of experience accurately from the time spans in the work history\n\
5. Score every extracted value with a confidence from 1-10 (10 means fully certain)\n\
Output strictly in the JSON structure the user specifies.";

/// One pure description strategy per field, given that field's metadata.
type DescribeFn = fn(Option<&FieldMeta>) -> String;

/// The fixed emission order of field instructions. Part of the endpoint's
/// contract: callers may list `options` in any order, the prompt does not
/// change.
const FIELD_STRATEGIES: [(ExtractField, DescribeFn); 7] = [
    (ExtractField::Languages, describe_languages),
    (ExtractField::Skills, describe_skills),
    (ExtractField::PersonalInfo, describe_personal_info),
    (ExtractField::Eeo, describe_eeo),
    (ExtractField::Salary, describe_salary),
    (ExtractField::WorkExperience, describe_work_experience),
    (ExtractField::Education, describe_education),
];

/// Builds the prompt pair for one extraction request.
///
/// `document` must be non-empty after trimming and `structure` present;
/// the handler validates both before calling in here.
pub fn build_prompt(
    document: &str,
    fields: &[ExtractField],
    structure: &Value,
    metadata: &FieldMetadata,
) -> PromptPair {
    let mut user = String::from(
        "Extract information from the resume below, applying intelligent inference and analysis.",
    );
    user.push_str(&format!("\n\nResume content:\n{document}\n\n"));
    user.push_str("Extract the following, with in-depth analysis:\n");

    for (field, describe) in FIELD_STRATEGIES {
        if !fields.contains(&field) {
            continue;
        }
        let meta = metadata.get(field.as_str());
        user.push_str(&field_line(field, describe(meta), meta));
    }

    user.push_str(
        "\nReply strictly in the following JSON structure; make sure every value matches \
         the resume text and fabricate nothing:\n",
    );
    user.push_str(&serde_json::to_string_pretty(structure).unwrap_or_default());
    user.push_str(
        "\n\nInclude only the fields the user selected. If the resume has no evidence for a \
         field, use an empty array or empty object for it. Add a confidence field (1-10) to \
         every field.",
    );
    user.push_str(
        "\n\nFor months in work and education history, use integers 1-12; if the resume does \
         not state the month, give the most reasonable inference and lower the confidence value.",
    );

    PromptPair {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}

/// One instruction line: `- {description}` plus the preset-option constraint
/// when the field's own metadata carries a non-empty option list.
fn field_line(field: ExtractField, description: String, meta: Option<&FieldMeta>) -> String {
    let mut line = format!("- {description}");
    if let Some(meta) = meta {
        if !meta.options.is_empty() {
            line.push_str(&format!(
                " For {}, choose primarily from these preset options: [{}].",
                meta.display_name(field.as_str()),
                meta.options.join(", ")
            ));
        }
    }
    line.push('\n');
    line
}

fn describe_languages(meta: Option<&FieldMeta>) -> String {
    let mut d = String::from(
        "Language ability: extract the languages mentioned in the resume and the proficiency \
         of each, and assess confidence.",
    );
    if let Some(label) = meta.and_then(|m| m.label.as_deref()) {
        d.push_str(&format!(
            " For proficiency, refer to the preset options of {label}."
        ));
    }
    d
}

fn describe_skills(_meta: Option<&FieldMeta>) -> String {
    String::from(
        "Skill experience: extract the skills in the resume and derive each skill's actual \
         years of experience from the work history; do not return 0 years unless the skill \
         is clearly new.",
    )
}

fn describe_personal_info(meta: Option<&FieldMeta>) -> String {
    let mut d = String::from(
        "Personal details: extract name, phone, email, address, country/region and similar \
         personal information. For the country code (country_code) use the standard \
         two-letter code (e.g. US, CN) rather than a long form; the system converts it to \
         the full format automatically.",
    );
    if let Some(cc) = meta.and_then(|m| m.sub("country_code")) {
        if !cc.options.is_empty() {
            d.push_str(&format!(
                " For the country/region code, the system will match the full format from \
                 the preset options of {}.",
                cc.display_name("country_code")
            ));
        }
    }
    d
}

fn describe_eeo(meta: Option<&FieldMeta>) -> String {
    let mut d = String::from(
        "Diversity information: gender, ethnicity, veteran status and similar; extract only \
         what the resume states explicitly, otherwise give a reasonable inference. Use \
         lowercase \"yes\" or \"no\" for the veteran and disability fields.",
    );
    if let Some(meta) = meta {
        // HashMap iteration order is unstable; sort so the prompt stays deterministic.
        let mut keys: Vec<&String> = meta.fields.keys().collect();
        keys.sort();
        for key in keys {
            let sub = &meta.fields[key];
            if !sub.options.is_empty() {
                d.push_str(&format!(
                    " For {}, choose from the options [{}].",
                    sub.display_name(key),
                    sub.options.join(", ")
                ));
            }
        }
    }
    d
}

fn describe_salary(_meta: Option<&FieldMeta>) -> String {
    String::from(
        "Expected salary: if the resume mentions it, extract the concrete amount and the \
         period (annual / monthly / hourly).",
    )
}

fn describe_work_experience(meta: Option<&FieldMeta>) -> String {
    let mut d = String::from(
        "Work experience: extract company name, title, location, start and end dates, and \
         responsibility descriptions; compute the duration of each position and infer \
         missing months reasonably. Every position must carry a city — if the resume does \
         not state one, infer a likely city from the company name and other context.",
    );
    if let Some(month) = meta.and_then(|m| m.sub("month")) {
        if !month.options.is_empty() {
            d.push_str(&format!(
                " For months, refer to the preset options of {} (numeric format).",
                month.display_name("month")
            ));
        }
    }
    // Year option lists are too long to inline; the model infers years directly.
    d
}

fn describe_education(meta: Option<&FieldMeta>) -> String {
    let mut d = String::from(
        "Education history: extract school, degree, major, location, start and end dates; \
         infer missing months reasonably. Every entry must carry a city — if the resume \
         does not state one, infer a likely city from the school name and other context.",
    );
    if let Some(degree) = meta.and_then(|m| m.sub("degree")) {
        if !degree.options.is_empty() {
            d.push_str(&format!(
                " For degrees, refer to the preset options of {}.",
                degree.display_name("degree")
            ));
        }
    }
    if let Some(month) = meta.and_then(|m| m.sub("month")) {
        if !month.options.is_empty() {
            d.push_str(&format!(
                " For months, refer to the preset options of {} (numeric format).",
                month.display_name("month")
            ));
        }
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    const RESUME: &str = "Jane Doe — Senior Engineer at Acme Corp, 2019 to present.";

    fn meta_with_options(label: Option<&str>, options: &[&str]) -> FieldMeta {
        FieldMeta {
            label: label.map(str::to_string),
            options: options.iter().map(|s| s.to_string()).collect(),
            fields: HashMap::new(),
        }
    }

    #[test]
    fn test_structure_always_embedded() {
        let structure = json!({"skills": [{"name": "", "years": 0, "confidence": 0}]});
        let prompt = build_prompt(
            RESUME,
            &[ExtractField::Skills],
            &structure,
            &HashMap::new(),
        );
        let serialized = serde_json::to_string_pretty(&structure).unwrap();
        assert!(prompt.user.contains(&serialized));
        assert!(prompt.user.contains(RESUME));
    }

    #[test]
    fn test_empty_field_set_yields_structure_only_prompt() {
        let structure = json!({"anything": {}});
        let prompt = build_prompt(RESUME, &[], &structure, &HashMap::new());
        assert!(!prompt.user.contains("- "));
        assert!(prompt.user.contains("\"anything\""));
    }

    #[test]
    fn test_field_lines_follow_fixed_order_regardless_of_request_order() {
        // Request order reversed vs the emission order
        let fields = [
            ExtractField::Education,
            ExtractField::Skills,
            ExtractField::Languages,
        ];
        let prompt = build_prompt(RESUME, &fields, &json!({}), &HashMap::new());

        let lang = prompt.user.find("Language ability").unwrap();
        let skills = prompt.user.find("Skill experience").unwrap();
        let edu = prompt.user.find("Education history").unwrap();
        assert!(lang < skills);
        assert!(skills < edu);
    }

    #[test]
    fn test_one_instruction_line_per_requested_field() {
        let fields = [ExtractField::Languages, ExtractField::Salary];
        let prompt = build_prompt(RESUME, &fields, &json!({}), &HashMap::new());
        let lines = prompt.user.matches("\n- ").count() + usize::from(prompt.user.starts_with("- "));
        assert_eq!(lines, 2);
        assert!(prompt.user.contains("Language ability"));
        assert!(prompt.user.contains("Expected salary"));
        assert!(!prompt.user.contains("Work experience:"));
    }

    #[test]
    fn test_option_list_constrains_only_its_own_field() {
        let mut metadata = HashMap::new();
        metadata.insert(
            "languages".to_string(),
            meta_with_options(Some("Proficiency"), &["fluent", "basic"]),
        );
        let fields = [ExtractField::Languages, ExtractField::Skills];
        let prompt = build_prompt(RESUME, &fields, &json!({}), &metadata);

        assert!(prompt.user.contains("fluent"));
        assert!(prompt.user.contains("basic"));
        assert!(prompt.user.contains("For Proficiency, choose primarily"));
        // Skills has no metadata, so exactly one option constraint appears
        assert_eq!(prompt.user.matches("preset options:").count(), 1);
    }

    #[test]
    fn test_option_constraint_falls_back_to_wire_name_without_label() {
        let mut metadata = HashMap::new();
        metadata.insert(
            "skills".to_string(),
            meta_with_options(None, &["Rust", "Go"]),
        );
        let prompt = build_prompt(RESUME, &[ExtractField::Skills], &json!({}), &metadata);
        assert!(prompt.user.contains("For skills, choose primarily"));
        assert!(prompt.user.contains("[Rust, Go]"));
    }

    #[test]
    fn test_eeo_subfield_options_each_get_a_constraint() {
        let mut eeo = FieldMeta::default();
        eeo.fields.insert(
            "gender".to_string(),
            meta_with_options(Some("Gender"), &["male", "female", "decline"]),
        );
        eeo.fields.insert(
            "veteran".to_string(),
            meta_with_options(None, &["yes", "no"]),
        );
        let mut metadata = HashMap::new();
        metadata.insert("eeo".to_string(), eeo);

        let prompt = build_prompt(RESUME, &[ExtractField::Eeo], &json!({}), &metadata);
        assert!(prompt.user.contains("For Gender, choose from the options [male, female, decline]."));
        assert!(prompt.user.contains("For veteran, choose from the options [yes, no]."));
    }

    #[test]
    fn test_education_degree_and_month_subfields() {
        let mut edu = FieldMeta::default();
        edu.fields.insert(
            "degree".to_string(),
            meta_with_options(Some("Degree"), &["Bachelor", "Master", "PhD"]),
        );
        edu.fields
            .insert("month".to_string(), meta_with_options(None, &["1", "12"]));
        let mut metadata = HashMap::new();
        metadata.insert("education".to_string(), edu);

        let prompt = build_prompt(RESUME, &[ExtractField::Education], &json!({}), &metadata);
        assert!(prompt.user.contains("preset options of Degree"));
        assert!(prompt.user.contains("preset options of month (numeric format)"));
    }

    #[test]
    fn test_closing_instructions_present() {
        let prompt = build_prompt(RESUME, &[ExtractField::Skills], &json!({}), &HashMap::new());
        assert!(prompt.user.contains("Include only the fields the user selected"));
        assert!(prompt.user.contains("empty array or empty object"));
        assert!(prompt.user.contains("confidence field (1-10)"));
        assert!(prompt.user.contains("integers 1-12"));
        assert!(prompt.system.contains("never fabricate"));
        assert!(prompt.system.contains("confidence from 1-10"));
    }

    #[test]
    fn test_build_is_deterministic() {
        let mut eeo = FieldMeta::default();
        for key in ["gender", "ethnicity", "veteran", "disability"] {
            eeo.fields
                .insert(key.to_string(), meta_with_options(None, &["a", "b"]));
        }
        let mut metadata = HashMap::new();
        metadata.insert("eeo".to_string(), eeo);

        let fields = [ExtractField::Eeo, ExtractField::Skills];
        let first = build_prompt(RESUME, &fields, &json!({"x": 1}), &metadata);
        let second = build_prompt(RESUME, &fields, &json!({"x": 1}), &metadata);
        assert_eq!(first, second);
    }
}
