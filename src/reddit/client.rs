//! Reddit OAuth API client.
//!
//! Uses application-only OAuth (`client_credentials` grant). The bearer token
//! is cached and refreshed shortly before it expires.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::config::{RedditConfig, RedditCredentials};
use crate::error::AcquisitionError;
use crate::reddit::ActivitySource;
use crate::reddit::types::{
    AccountData, Comment, CommentData, ListingData, Post, RawActivity, SubmissionData, Thing,
    TokenResponse,
};
use crate::util::floor_char_boundary;

/// Reddit caps listing pages at 100 items.
const PAGE_SIZE: usize = 100;

/// Refresh the token this long before Reddit says it expires.
const TOKEN_SLACK: Duration = Duration::from_secs(60);

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Fetches a user's recent activity through the Reddit API.
pub struct RedditClient {
    http: Client,
    credentials: RedditCredentials,
    auth_url: String,
    api_url: String,
    fetch_limit: usize,
    token: Mutex<Option<CachedToken>>,
}

impl RedditClient {
    pub fn new(config: &RedditConfig, credentials: RedditCredentials) -> Result<Self, AcquisitionError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(credentials.user_agent.clone())
            .build()
            .map_err(|e| AcquisitionError::RequestFailed {
                reason: format!("Failed to build reqwest client: {}", e),
            })?;

        Ok(Self {
            http,
            credentials,
            auth_url: config.auth_url.trim_end_matches('/').to_string(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            fetch_limit: config.fetch_limit,
            token: Mutex::new(None),
        })
    }

    /// Return a valid bearer token, requesting a new one if needed.
    async fn bearer(&self) -> Result<String, AcquisitionError> {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref()
            && token.expires_at > Instant::now()
        {
            return Ok(token.value.clone());
        }

        let url = format!("{}/api/v1/access_token", self.auth_url);
        tracing::debug!(%url, "Requesting Reddit access token");

        let response = self
            .http
            .post(&url)
            .basic_auth(
                self.credentials.client_id(),
                Some(self.credentials.client_secret()),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AcquisitionError::AuthFailed {
                reason: format!("token endpoint returned HTTP {}", status),
            });
        }
        let token: TokenResponse = read_json(response).await?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_SLACK);
        *guard = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        Ok(token.access_token)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        handle: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AcquisitionError> {
        let token = self.bearer().await?;
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(AcquisitionError::UserNotFound {
                handle: handle.to_string(),
            }),
            StatusCode::UNAUTHORIZED => {
                // A stale token is the usual cause; force a refresh next time.
                *self.token.lock().await = None;
                Err(AcquisitionError::AuthFailed {
                    reason: format!("HTTP 401 for {}", path),
                })
            }
            StatusCode::FORBIDDEN => Err(AcquisitionError::AuthFailed {
                reason: format!("HTTP 403 for {}", path),
            }),
            StatusCode::TOO_MANY_REQUESTS => Err(AcquisitionError::RateLimited {
                retry_after: retry_after(&response),
            }),
            _ => read_json(response).await,
        }
    }

    /// Walk a user listing until `fetch_limit` items or the end of the listing.
    async fn listing<T: DeserializeOwned>(
        &self,
        handle: &str,
        kind: &str,
    ) -> Result<Vec<T>, AcquisitionError> {
        let path = format!("/user/{}/{}", urlencoding::encode(handle), kind);
        let mut items = Vec::new();
        let mut after: Option<String> = None;

        while items.len() < self.fetch_limit {
            let page_size = PAGE_SIZE.min(self.fetch_limit - items.len());
            let mut query = vec![
                ("sort", "new".to_string()),
                ("limit", page_size.to_string()),
                ("raw_json", "1".to_string()),
            ];
            if let Some(cursor) = after.as_ref() {
                query.push(("after", cursor.clone()));
            }

            let page: Thing<ListingData<T>> = self.get(handle, &path, &query).await?;
            let received = page.data.children.len();
            items.extend(page.data.children.into_iter().map(|c| c.data));

            after = page.data.after;
            if received == 0 || after.is_none() {
                break;
            }
        }

        items.truncate(self.fetch_limit);
        Ok(items)
    }
}

#[async_trait]
impl ActivitySource for RedditClient {
    async fn fetch(&self, handle: &str) -> Result<RawActivity, AcquisitionError> {
        let about_path = format!("/user/{}/about", urlencoding::encode(handle));
        let about: Thing<AccountData> = self
            .get(handle, &about_path, &[("raw_json", "1".to_string())])
            .await?;
        if about.data.is_suspended {
            return Err(AcquisitionError::Suspended {
                handle: handle.to_string(),
            });
        }

        let posts: Vec<Post> = self
            .listing::<SubmissionData>(handle, "submitted")
            .await?
            .into_iter()
            .map(Post::from)
            .collect();
        let comments: Vec<Comment> = self
            .listing::<CommentData>(handle, "comments")
            .await?
            .into_iter()
            .map(Comment::from)
            .collect();

        tracing::info!(
            handle,
            posts = posts.len(),
            comments = comments.len(),
            "Fetched Reddit activity"
        );

        Ok(RawActivity {
            handle: handle.to_string(),
            posts,
            comments,
            karma: about.data.link_karma + about.data.comment_karma,
            exists: true,
        })
    }
}

fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(Duration::from_secs_f64)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, AcquisitionError> {
    let status = response.status();
    let body = response.text().await?;
    let preview = &body[..floor_char_boundary(&body, 200)];

    if !status.is_success() {
        return Err(AcquisitionError::RequestFailed {
            reason: format!("HTTP {}: {}", status, preview),
        });
    }

    serde_json::from_str(&body).map_err(|e| AcquisitionError::InvalidResponse {
        reason: format!("JSON parse error: {}. Raw: {}", e, preview),
    })
}
