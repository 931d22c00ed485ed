use std::sync::Arc;

use crate::llm_client::PromptResponder;
use crate::persona::builder::PersonaSettings;
use crate::reddit::PostSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Where user history comes from. Default: RedditClient.
    pub posts: Arc<dyn PostSource>,
    /// Who answers the persona prompt. Default: LlmClient.
    pub llm: Arc<dyn PromptResponder>,
    pub settings: Arc<PersonaSettings>,
}
