use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::persona::builder::{
    build_persona, report_path, username_from_profile_url, validate_username, PersonaReport,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePersonaRequest {
    pub profile_url: String,
}

/// POST /api/v1/personas
pub async fn handle_create_persona(
    State(state): State<AppState>,
    Json(req): Json<CreatePersonaRequest>,
) -> Result<Json<PersonaReport>, AppError> {
    let username = username_from_profile_url(&req.profile_url)?;
    let report = build_persona(
        &username,
        state.posts.as_ref(),
        state.llm.as_ref(),
        &state.settings,
    )
    .await?;
    Ok(Json(report))
}

/// GET /api/v1/personas/:username
/// Serves a previously generated report as a plain-text download.
pub async fn handle_get_persona(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    validate_username(&username)?;
    let path = report_path(&state.settings.output_dir, &username);

    let rendered = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!(
                "No persona report for u/{username}"
            )))
        }
        Err(e) => return Err(AppError::Internal(e.into())),
    };

    let disposition = format!("attachment; filename=\"{username}_persona.txt\"");
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered,
    ))
}
