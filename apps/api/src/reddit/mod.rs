//! Reddit client — fetches a user's recent submissions and comments.
//!
//! Uses a "script" app with the password grant, so every fetch first trades
//! the configured credentials for a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_AUTH_URL: &str = "https://www.reddit.com";
pub const DEFAULT_API_URL: &str = "https://oauth.reddit.com";
/// Most recent submissions pulled per user.
pub const SUBMISSION_LIMIT: u32 = 20;
/// Most recent comments pulled per user.
pub const COMMENT_LIMIT: u32 = 50;

#[derive(Debug, Error)]
pub enum RedditError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// A user's recent public activity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserHistory {
    /// `title + " " + selftext` for each submission.
    pub posts: Vec<String>,
    pub comments: Vec<String>,
}

impl UserHistory {
    /// All posts, then all comments, one per line.
    pub fn combined_text(&self) -> String {
        self.posts
            .iter()
            .chain(self.comments.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Source of a user's post and comment history.
///
/// Carried in `AppState` as `Arc<dyn PostSource>`.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_history(&self, username: &str) -> Result<UserHistory, RedditError>;
}

/// Login details for a Reddit script app.
#[derive(Debug, Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
    pub user_agent: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Listing<T> {
    data: ListingData<T>,
}

#[derive(Debug, Deserialize)]
struct ListingData<T> {
    children: Vec<Thing<T>>,
}

#[derive(Debug, Deserialize)]
struct Thing<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct Submission {
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
}

#[derive(Debug, Deserialize)]
struct Comment {
    #[serde(default)]
    body: String,
}

#[derive(Clone)]
pub struct RedditClient {
    client: Client,
    credentials: RedditCredentials,
    auth_url: String,
    api_url: String,
}

impl RedditClient {
    pub fn new(
        credentials: RedditCredentials,
        auth_url: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Result<Self, RedditError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .user_agent(credentials.user_agent.clone())
                .build()?,
            credentials,
            auth_url: auth_url.into().trim_end_matches('/').to_string(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn access_token(&self) -> Result<String, RedditError> {
        let response = self
            .client
            .post(format!("{}/api/v1/access_token", self.auth_url))
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[
                ("grant_type", "password"),
                ("username", self.credentials.username.as_str()),
                ("password", self.credentials.password.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RedditError::Auth(format!("status {status}: {body}")));
        }

        // Reddit reports bad credentials as 200 with an `error` field.
        let token: TokenResponse = response.json().await?;
        match (token.access_token, token.error) {
            (Some(access_token), _) => Ok(access_token),
            (None, Some(error)) => Err(RedditError::Auth(error)),
            (None, None) => Err(RedditError::Auth("no access token returned".to_string())),
        }
    }

    async fn get_listing(
        &self,
        token: &str,
        username: &str,
        kind: &str,
        limit: u32,
    ) -> Result<Response, RedditError> {
        let url = format!("{}/user/{}/{}", self.api_url, username, kind);
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(&[("limit", limit.to_string()), ("raw_json", "1".to_string())])
            .send()
            .await?;

        match response.status() {
            s if s.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(RedditError::NotFound(username.to_string())),
            s => Err(RedditError::Api {
                status: s.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

#[async_trait]
impl PostSource for RedditClient {
    async fn fetch_history(&self, username: &str) -> Result<UserHistory, RedditError> {
        let token = self.access_token().await?;
        debug!("Reddit access token acquired");

        let submissions: Listing<Submission> = self
            .get_listing(&token, username, "submitted", SUBMISSION_LIMIT)
            .await?
            .json()
            .await?;
        let comments: Listing<Comment> = self
            .get_listing(&token, username, "comments", COMMENT_LIMIT)
            .await?
            .json()
            .await?;

        let history = UserHistory {
            posts: submissions
                .data
                .children
                .into_iter()
                .map(|t| format!("{} {}", t.data.title, t.data.selftext))
                .collect(),
            comments: comments
                .data
                .children
                .into_iter()
                .map(|t| t.data.body)
                .collect(),
        };

        info!(
            "Fetched {} posts and {} comments for u/{}",
            history.posts.len(),
            history.comments.len(),
            username
        );
        Ok(history)
    }
}
