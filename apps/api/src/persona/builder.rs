//! Persona pipeline — fetch history, ask the model, parse, render, save.
//!
//! Flow: fetch_history → combined text → build_persona_prompt → respond →
//!       parse_llm_response → render_report → write `<dir>/<user>_persona.txt`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::PromptResponder;
use crate::persona::parser::{parse_llm_response, PersonaRecord};
use crate::persona::prompts::{build_persona_prompt, PERSONA_SYSTEM};
use crate::persona::render::render_report;
use crate::reddit::PostSource;

/// Profile URLs must start with this prefix.
pub const PROFILE_URL_PREFIX: &str = "https://www.reddit.com/user/";

/// Where reports go and what they look like.
#[derive(Debug, Clone)]
pub struct PersonaSettings {
    pub output_dir: PathBuf,
    pub template: String,
}

/// Result of one persona build, returned to the client as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct PersonaReport {
    pub username: String,
    pub record: PersonaRecord,
    pub rendered: String,
    pub file_path: String,
    pub generated_at: DateTime<Utc>,
}

/// Pulls the username out of `https://www.reddit.com/user/<name>/...`.
///
/// The name is the first path segment after the last `/user/`.
pub fn username_from_profile_url(profile_url: &str) -> Result<String, AppError> {
    let profile_url = profile_url.trim();
    let Some(rest) = profile_url.strip_prefix(PROFILE_URL_PREFIX) else {
        return Err(AppError::Validation(
            "Invalid URL. Please enter a valid Reddit user profile link.".to_string(),
        ));
    };
    let rest = rest.rsplit_once("/user/").map_or(rest, |(_, tail)| tail);

    let username = rest.trim_end_matches('/').split('/').next().unwrap_or_default();
    validate_username(username)?;
    Ok(username.to_string())
}

/// Reddit usernames are letters, digits, `_` and `-`. Anything else is rejected
/// before it can reach a file path.
pub fn validate_username(username: &str) -> Result<(), AppError> {
    if username.is_empty() {
        return Err(AppError::Validation("Username is empty".to_string()));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AppError::Validation(format!(
            "Invalid Reddit username '{username}'"
        )));
    }
    Ok(())
}

/// Path of the saved report for `username`.
pub fn report_path(output_dir: &Path, username: &str) -> PathBuf {
    output_dir.join(format!("{username}_persona.txt"))
}

/// Runs the full persona pipeline for one user and saves the rendered report.
pub async fn build_persona(
    username: &str,
    posts: &dyn PostSource,
    llm: &dyn PromptResponder,
    settings: &PersonaSettings,
) -> Result<PersonaReport, AppError> {
    validate_username(username)?;

    // Step 1: Fetch history
    info!("Fetching Reddit history for u/{username}");
    let history = posts.fetch_history(username).await?;
    let all_text = history.combined_text();
    if all_text.trim().is_empty() {
        warn!("No posts or comments found for u/{username}");
        return Err(AppError::NotFound("No data found for user.".to_string()));
    }

    // Step 2: Ask the model
    let prompt = build_persona_prompt(&all_text);
    let response = llm.respond(&prompt, PERSONA_SYSTEM).await?;
    info!(
        "LLM responded for u/{username} ({} chars)",
        response.len()
    );

    // Step 3: Parse and render
    let record = parse_llm_response(&response).with_name(username);
    let rendered = render_report(&settings.template, &record);

    // Step 4: Save
    tokio::fs::create_dir_all(&settings.output_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create output directory {}",
                settings.output_dir.display()
            )
        })?;
    let path = report_path(&settings.output_dir, username);
    tokio::fs::write(&path, &rendered)
        .await
        .with_context(|| format!("Failed to write persona report {}", path.display()))?;
    info!("Persona for u/{username} written to {}", path.display());

    Ok(PersonaReport {
        username: username.to_string(),
        record,
        rendered,
        file_path: path.display().to_string(),
        generated_at: Utc::now(),
    })
}
