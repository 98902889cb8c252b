//! HTTP client for the recommendation backend.
//!
//! This crate talks to the external service that owns user profiles, the
//! ranking model and the interaction log. It handles:
//! - Fetching a ranked job pool for a user
//! - Mirroring swipe decisions to the interaction log
//! - Fetching the jobs a user has liked
//!
//! Callers depend on the [`RecommendationApi`] trait rather than on
//! [`BackendClient`] directly, so sessions can run against a mock backend.

pub mod wire;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

pub use wire::{InteractionPayload, JobRef, RecommendationResponse, RecommendedJob, SkillList};

/// Errors that can occur when interacting with the backend
#[derive(Error, Debug)]
pub enum BackendClientError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),

    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },

    #[error("Actor id '{0}' is not a backend user id")]
    InvalidActor(String),
}

/// The backend keys users by unsigned integer; other actor ids are never
/// sent to it.
pub fn backend_user_id(actor_id: &str) -> Result<u32, BackendClientError> {
    actor_id
        .trim()
        .parse::<u32>()
        .map_err(|_| BackendClientError::InvalidActor(actor_id.to_string()))
}

/// Operations the session core needs from the backend
#[async_trait]
pub trait RecommendationApi: Send + Sync {
    /// Ranked job pool for a user, most relevant first
    async fn fetch_recommendations(
        &self,
        user_id: u32,
    ) -> Result<Vec<RecommendedJob>, BackendClientError>;

    /// Append one decision to the remote interaction log
    async fn log_interaction(&self, payload: &InteractionPayload) -> Result<(), BackendClientError>;

    /// Jobs the user has liked
    async fn fetch_liked_jobs(&self, user_id: u32)
    -> Result<Vec<RecommendedJob>, BackendClientError>;
}

/// reqwest-based client for the backend's JSON API
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the backend at `base_url` (e.g. "http://localhost:8000").
    ///
    /// No connection is made until the first request.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder().timeout(timeout).build()?;
        debug!("Backend client configured for {}", base_url);
        Ok(Self { client, base_url })
    }

    /// Base URL of the backend this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /recommend/{user_id}`
    pub async fn recommendations(
        &self,
        user_id: u32,
    ) -> Result<RecommendationResponse, BackendClientError> {
        self.get_json(&format!("/recommend/{user_id}")).await
    }

    /// `GET /api/liked-jobs/{user_id}`
    pub async fn liked_jobs(&self, user_id: u32) -> Result<Vec<RecommendedJob>, BackendClientError> {
        self.get_json(&format!("/api/liked-jobs/{user_id}")).await
    }

    /// `POST /api/interactions`. The response body is ignored.
    pub async fn record_interaction(
        &self,
        payload: &InteractionPayload,
    ) -> Result<(), BackendClientError> {
        let endpoint = "/api/interactions";
        let response = self
            .client
            .post(self.url(endpoint))
            .json(payload)
            .send()
            .await
            .map_err(|source| request_error(endpoint, source))?;
        check_status(endpoint, &response)?;
        Ok(())
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, BackendClientError> {
        debug!("GET {}", endpoint);
        let response = self
            .client
            .get(self.url(endpoint))
            .send()
            .await
            .map_err(|source| request_error(endpoint, source))?;
        check_status(endpoint, &response)?;

        let body = response
            .text()
            .await
            .map_err(|source| request_error(endpoint, source))?;
        serde_json::from_str(&body).map_err(|e| {
            error!("Malformed response from {}: {}", endpoint, e);
            BackendClientError::InvalidResponse {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

#[async_trait]
impl RecommendationApi for BackendClient {
    async fn fetch_recommendations(
        &self,
        user_id: u32,
    ) -> Result<Vec<RecommendedJob>, BackendClientError> {
        let response = self.recommendations(user_id).await?;
        if let Some(expected) = response.num_recommendations {
            if expected != response.recommendations.len() {
                debug!(
                    "Backend announced {} recommendations but sent {}",
                    expected,
                    response.recommendations.len()
                );
            }
        }
        Ok(response.recommendations)
    }

    async fn log_interaction(&self, payload: &InteractionPayload) -> Result<(), BackendClientError> {
        self.record_interaction(payload).await
    }

    async fn fetch_liked_jobs(
        &self,
        user_id: u32,
    ) -> Result<Vec<RecommendedJob>, BackendClientError> {
        self.liked_jobs(user_id).await
    }
}

fn request_error(endpoint: &str, source: reqwest::Error) -> BackendClientError {
    error!("Request to {} failed: {}", endpoint, source);
    BackendClientError::Request {
        endpoint: endpoint.to_string(),
        source,
    }
}

fn check_status(endpoint: &str, response: &Response) -> Result<(), BackendClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    error!("{} returned status {}", endpoint, status);
    Err(BackendClientError::Status {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response as AxumResponse};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    // ============================================================================
    // Mock Backend
    // ============================================================================

    type Logged = Arc<Mutex<Vec<InteractionPayload>>>;

    /// user 1 gets two jobs, user 2 gets a server error, user 3 gets a
    /// payload without the `recommendations` field.
    async fn recommend(Path(user_id): Path<u32>) -> AxumResponse {
        match user_id {
            1 => Json(json!({
                "user_id": 1,
                "num_recommendations": 2,
                "recommendations": [
                    {"job_id": 11, "title": "Data Engineer", "company": "Flow",
                     "skills": ["Python", "SQL"], "salary_range": "$60K-$90K"},
                    {"job_id": 12, "title": "ML Engineer", "company": "Vector",
                     "company_bucket": "large", "score": 0.93}
                ],
                "note": "test"
            }))
            .into_response(),
            2 => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
            3 => Json(json!({"user_id": 3, "items": []})).into_response(),
            _ => (StatusCode::NOT_FOUND, Json(json!({"detail": "User not found"}))).into_response(),
        }
    }

    async fn liked(Path(user_id): Path<u32>) -> AxumResponse {
        if user_id == 1 {
            Json(json!([{"job_id": "11", "title": "Data Engineer", "company": "Flow"}]))
                .into_response()
        } else {
            Json(json!([])).into_response()
        }
    }

    async fn interactions(
        State(logged): State<Logged>,
        Json(payload): Json<InteractionPayload>,
    ) -> AxumResponse {
        let mut logged = logged.lock().unwrap();
        logged.push(payload);
        Json(json!({"status": "success", "id": logged.len()})).into_response()
    }

    async fn start_mock_backend() -> (String, Logged, tokio::task::JoinHandle<()>) {
        let logged: Logged = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/recommend/:user_id", get(recommend))
            .route("/api/liked-jobs/:user_id", get(liked))
            .route("/api/interactions", post(interactions))
            .with_state(logged.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock backend failed");
        });

        (format!("http://{}", addr), logged, handle)
    }

    fn client(addr: &str) -> BackendClient {
        BackendClient::new(addr, Duration::from_secs(5)).expect("Failed to build client")
    }

    // ============================================================================
    // Tests
    // ============================================================================

    #[test]
    fn test_backend_user_id() {
        assert_eq!(backend_user_id("42").unwrap(), 42);
        assert!(matches!(
            backend_user_id("u1"),
            Err(BackendClientError::InvalidActor(_))
        ));
        assert!(backend_user_id("-3").is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = client("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_fetch_recommendations_success() {
        let (addr, _, handle) = start_mock_backend().await;

        let jobs = client(&addr).fetch_recommendations(1).await.unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].job_id, JobRef::Number(11));
        assert_eq!(jobs[0].salary_range.as_deref(), Some("$60K-$90K"));
        assert_eq!(jobs[1].company_bucket.as_deref(), Some("large"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let (addr, _, handle) = start_mock_backend().await;
        let client = client(&addr);

        let err = client.fetch_recommendations(2).await.unwrap_err();
        assert!(matches!(err, BackendClientError::Status { status: 500, .. }));

        let err = client.fetch_recommendations(99).await.unwrap_err();
        assert!(matches!(err, BackendClientError::Status { status: 404, .. }));

        handle.abort();
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_invalid_response() {
        let (addr, _, handle) = start_mock_backend().await;

        let err = client(&addr).fetch_recommendations(3).await.unwrap_err();
        assert!(matches!(err, BackendClientError::InvalidResponse { .. }));

        handle.abort();
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_request_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = client(&addr).fetch_recommendations(1).await.unwrap_err();
        assert!(matches!(err, BackendClientError::Request { .. }));
    }

    #[tokio::test]
    async fn test_log_interaction_posts_payload() {
        let (addr, logged, handle) = start_mock_backend().await;
        let payload = InteractionPayload {
            user_id: 1,
            item_id: "11".to_string(),
            kind: "job".to_string(),
            action: "like".to_string(),
            timestamp: "2026-10-17T09:00:00+00:00".to_string(),
        };

        client(&addr).log_interaction(&payload).await.unwrap();

        let logged = logged.lock().unwrap();
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0], payload);

        handle.abort();
    }

    #[tokio::test]
    async fn test_fetch_liked_jobs() {
        let (addr, _, handle) = start_mock_backend().await;
        let client = client(&addr);

        let liked = client.fetch_liked_jobs(1).await.unwrap();
        assert_eq!(liked.len(), 1);
        assert_eq!(liked[0].job_id.to_string(), "11");
        assert!(client.fetch_liked_jobs(2).await.unwrap().is_empty());

        handle.abort();
    }
}
