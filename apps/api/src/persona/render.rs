//! Report rendering — fills the plain-text persona template from a `PersonaRecord`.
//!
//! Templates use `{field}` placeholders. Substitution is single-pass, so text
//! coming from the model can never introduce new placeholders.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::{Captures, Regex};

use crate::persona::parser::PersonaRecord;
use crate::persona::sections::LabeledItem;

/// Template compiled into the binary; used unless `PERSONA_TEMPLATE_PATH` is set.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/persona_template.txt");

/// Shown in place of an empty field or list.
const UNKNOWN: &str = "Unknown";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("placeholder regex"));

/// Loads a report template from disk, or the built-in one when no path is given.
pub fn load_template(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read persona template at {}", path.display())),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

/// Renders `record` into `template`. Unknown placeholders are left as-is.
pub fn render_report(template: &str, record: &PersonaRecord) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            field_value(record, &caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn field_value(record: &PersonaRecord, field: &str) -> Option<String> {
    let value = match field {
        "name" => scalar(&record.name),
        "age" => scalar(&record.age),
        "occupation" => scalar(&record.occupation),
        "status" => scalar(&record.status),
        "location" => scalar(&record.location),
        "archetype" => scalar(&record.archetype),
        "quote" => scalar(&record.quote),
        "personality_bars" => record.personality_bars.join("\n"),
        "motivations" => labeled_list(&record.motivations),
        "frustrations" => labeled_list(&record.frustrations),
        "behaviors" => labeled_list(&record.behaviors),
        "goals" => bullet_list(record.goals.iter().map(String::as_str)),
        _ => return None,
    };
    Some(value)
}

fn scalar(value: &str) -> String {
    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

fn labeled_list(items: &[LabeledItem]) -> String {
    let lines: Vec<String> = items
        .iter()
        .map(|item| {
            if item.detail.is_empty() {
                item.label.clone()
            } else {
                format!("{}: {}", item.label, item.detail)
            }
        })
        .collect();
    bullet_list(lines.iter().map(String::as_str))
}

fn bullet_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let lines: Vec<String> = items.map(|item| format!("- {item}")).collect();
    if lines.is_empty() {
        format!("- {UNKNOWN}")
    } else {
        lines.join("\n")
    }
}
