// Prompt constants for persona extraction.
// The heading names below are shared with the parser: the prompt asks for
// exactly these bold headings and the parser looks up sections by them.

pub const HEADING_MOTIVATIONS: &str = "Motivations";
pub const HEADING_FRUSTRATIONS: &str = "Frustrations";
pub const HEADING_BEHAVIORS: &str = "Behavioral habits";
pub const HEADING_PERSONALITY: &str = "Personality";
pub const HEADING_GOALS: &str = "Goals and needs";
pub const HEADING_AGE: &str = "Age";
pub const HEADING_OCCUPATION: &str = "Occupation";
pub const HEADING_STATUS: &str = "Status";
pub const HEADING_LOCATION: &str = "Location";
pub const HEADING_ARCHETYPE: &str = "Archetype";
pub const HEADING_QUOTE: &str = "Short quote";

/// Every heading the model is asked to produce, in prompt order.
pub const HEADINGS: &[&str] = &[
    HEADING_MOTIVATIONS,
    HEADING_FRUSTRATIONS,
    HEADING_BEHAVIORS,
    HEADING_PERSONALITY,
    HEADING_GOALS,
    HEADING_AGE,
    HEADING_OCCUPATION,
    HEADING_STATUS,
    HEADING_LOCATION,
    HEADING_ARCHETYPE,
    HEADING_QUOTE,
];

/// System prompt for persona extraction.
pub const PERSONA_SYSTEM: &str = "You are an expert persona analyst.";

/// Persona prompt template. Replace `{all_text}` and `{heading_list}` before sending.
pub const PERSONA_PROMPT_TEMPLATE: &str = r#"
Given the following Reddit posts and comments from a user, infer:

- Motivations
- Frustrations
- Behavioral habits
- Personality traits (Analyze the personality based on the following text.
For each MBTI dimension show the dominant side of each of the 4 pairs, along with how strongly the person leans toward that side.
Format the output like this (example values):
52% Introverted, 25% Intuitive, 90% Feeling, 65% Perceiving
- Goals and needs
- Age (just a number or range, no reasoning. e.g., 18 or "20s" or Unknown if not determined)
- Occupation (just the job title, no reasoning. e.g., "Software Engineer" or Unknown if not determined)
- Marital Status (one of: Single, Married, Unknown, no explanation)
- Location (only the place name, no reasoning.)
- Archetype (just the archetype title, no reasoning. e.g., "The Explorer")
- Generate a short quote (less than 140 characters)

Text:
{all_text}

Respond clearly under each heading using bullet points. Use exactly these headings in bold:
{heading_list}
"#;

/// Builds the persona prompt for a user's combined post and comment text.
pub fn build_persona_prompt(all_text: &str) -> String {
    let heading_list = HEADINGS
        .iter()
        .map(|h| format!("**{h}:**"))
        .collect::<Vec<_>>()
        .join("\n");

    PERSONA_PROMPT_TEMPLATE
        .replace("{heading_list}", &heading_list)
        .replace("{all_text}", all_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_every_heading_in_bold() {
        let prompt = build_persona_prompt("some text");
        for heading in HEADINGS {
            assert!(
                prompt.contains(&format!("**{heading}:**")),
                "prompt is missing heading {heading}"
            );
        }
    }

    #[test]
    fn test_prompt_embeds_user_text() {
        let prompt = build_persona_prompt("I love hiking and Rust");
        assert!(prompt.contains("Text:\nI love hiking and Rust\n"));
    }

    #[test]
    fn test_user_text_is_inserted_after_headings() {
        // A post containing the literal placeholder must not receive the heading list.
        let prompt = build_persona_prompt("look at {heading_list}");
        assert!(prompt.contains("look at {heading_list}"));
    }

    #[test]
    fn test_prompt_shows_personality_example_format() {
        let prompt = build_persona_prompt("");
        assert!(prompt.contains("52% Introverted, 25% Intuitive, 90% Feeling, 65% Perceiving"));
    }

    #[test]
    fn test_headings_are_unique() {
        let mut seen = std::collections::HashSet::new();
        assert!(HEADINGS.iter().all(|h| seen.insert(*h)));
        assert_eq!(HEADINGS.len(), 11);
    }
}
