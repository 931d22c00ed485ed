//! Persona parser — assembles a `PersonaRecord` from the model's raw reply.
//!
//! Infallible by construction: any section the model skipped or mangled comes
//! back as an empty value, and the personality bars fall back to 0% readings.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::persona::prompts::{
    HEADINGS, HEADING_AGE, HEADING_ARCHETYPE, HEADING_BEHAVIORS, HEADING_FRUSTRATIONS,
    HEADING_GOALS, HEADING_LOCATION, HEADING_MOTIVATIONS, HEADING_OCCUPATION,
    HEADING_PERSONALITY, HEADING_QUOTE, HEADING_STATUS,
};
use crate::persona::sections::{
    extract_bullet_list, extract_key_value_pairs, extract_section, LabeledItem,
};
use crate::persona::traits::generate_personality_bars;

/// Structured persona extracted from one model response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonaRecord {
    /// Subject identifier. Not part of the model output; set with `with_name`.
    pub name: String,
    pub motivations: Vec<LabeledItem>,
    pub frustrations: Vec<LabeledItem>,
    pub behaviors: Vec<LabeledItem>,
    pub goals: Vec<String>,
    /// Surrounding double quotes removed.
    pub quote: String,
    pub age: String,
    pub occupation: String,
    pub status: String,
    pub location: String,
    pub archetype: String,
    /// Exactly four rendered bars, see `persona::traits::AXES`.
    pub personality_bars: Vec<String>,
}

impl PersonaRecord {
    /// Attaches the subject the response was generated for.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Parses a raw model response into a `PersonaRecord`. Never fails.
pub fn parse_llm_response(raw: &str) -> PersonaRecord {
    let motivations = extract_section(raw, HEADING_MOTIVATIONS);
    let frustrations = extract_section(raw, HEADING_FRUSTRATIONS);
    let behaviors = extract_section(raw, HEADING_BEHAVIORS);
    let personality = extract_section(raw, HEADING_PERSONALITY);
    let goals = extract_section(raw, HEADING_GOALS);
    let age = extract_section(raw, HEADING_AGE);
    let occupation = extract_section(raw, HEADING_OCCUPATION);
    let status = extract_section(raw, HEADING_STATUS);
    let location = extract_section(raw, HEADING_LOCATION);
    let archetype = extract_section(raw, HEADING_ARCHETYPE);
    let quote = extract_section(raw, HEADING_QUOTE);

    debug!(
        response_len = raw.len(),
        sections_found = count_non_empty(&[
            &motivations,
            &frustrations,
            &behaviors,
            &personality,
            &goals,
            &age,
            &occupation,
            &status,
            &location,
            &archetype,
            &quote,
        ]),
        sections_expected = HEADINGS.len(),
        "Parsing persona response"
    );

    PersonaRecord {
        name: String::new(),
        motivations: extract_key_value_pairs(&motivations),
        frustrations: extract_key_value_pairs(&frustrations),
        behaviors: extract_key_value_pairs(&behaviors),
        goals: extract_bullet_list(&goals),
        quote: quote.trim_matches('"').to_string(),
        age,
        occupation,
        status,
        location,
        archetype,
        personality_bars: generate_personality_bars(&personality),
    }
}

fn count_non_empty(sections: &[&str]) -> usize {
    sections.iter().filter(|s| !s.is_empty()).count()
}
