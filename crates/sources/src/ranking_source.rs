//! Ranking Source - the remote, relevance-ranked job pool
//!
//! Asks the recommendation backend for a ranked pool and adapts its records
//! to `JobOffer`. The backend already excludes jobs the user has swiped on,
//! so the result is used as-is.
//!
//! Every failure is returned as a [`FetchFailure`]; deciding what to do
//! about it (fall back to the catalog) is the caller's policy.

use backend_client::{BackendClientError, RecommendationApi, RecommendedJob, backend_user_id};
use catalog::{JobOffer, PoolItem};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Why a ranked pool could not be obtained
#[derive(Error, Debug)]
pub enum FetchFailure {
    #[error("actor '{0}' has no backend user id")]
    UnsupportedActor(String),

    #[error(transparent)]
    Backend(#[from] BackendClientError),
}

/// Pool source backed by the remote ranking service
#[derive(Clone)]
pub struct RankingSource {
    api: Arc<dyn RecommendationApi>,
}

impl RankingSource {
    pub fn new(api: Arc<dyn RecommendationApi>) -> Self {
        Self { api }
    }

    /// Ranked job pool for the actor, most relevant first
    #[instrument(skip(self))]
    pub async fn fetch_ranked(&self, actor_id: &str) -> Result<Vec<PoolItem>, FetchFailure> {
        let user_id = remote_user(actor_id)?;
        let jobs = self.api.fetch_recommendations(user_id).await?;
        debug!("Ranking service returned {} jobs", jobs.len());
        Ok(jobs.into_iter().map(adapt_job).map(PoolItem::Job).collect())
    }

    /// Jobs the actor liked, as recorded by the backend
    #[instrument(skip(self))]
    pub async fn fetch_liked(&self, actor_id: &str) -> Result<Vec<PoolItem>, FetchFailure> {
        let user_id = remote_user(actor_id)?;
        let jobs = self.api.fetch_liked_jobs(user_id).await?;
        Ok(jobs.into_iter().map(adapt_job).map(PoolItem::Job).collect())
    }
}

fn remote_user(actor_id: &str) -> Result<u32, FetchFailure> {
    backend_user_id(actor_id).map_err(|_| FetchFailure::UnsupportedActor(actor_id.to_string()))
}

/// Convert a backend job record into a catalog `JobOffer`.
///
/// - `benefits` serialized as a Python set literal (`{'...'}`) is unwrapped
/// - `company_profile` sent as a JSON-encoded string is parsed; if it does
///   not parse it is dropped rather than failing the whole record
pub fn adapt_job(job: RecommendedJob) -> JobOffer {
    let id = job.job_id.to_string();

    let company_profile = match job.company_profile {
        Some(serde_json::Value::String(raw)) => match serde_json::from_str(&raw) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Dropping unparsable company_profile for job {}: {}", id, e);
                None
            }
        },
        Some(serde_json::Value::Null) | None => None,
        Some(other) => Some(other),
    };

    let benefits = job.benefits.map(|b| {
        match b.strip_prefix("{'").and_then(|rest| rest.strip_suffix("'}")) {
            Some(inner) => inner.to_string(),
            None => b,
        }
    });

    JobOffer {
        id,
        title: job.title,
        company: job.company,
        location: job.location.unwrap_or_default(),
        required_skills: job.skills.map(|s| s.into_vec()).unwrap_or_default(),
        description: job.description.unwrap_or_default(),
        salary: job.salary_range,
        logo: Some("💼".to_string()),
        role: job.role,
        country: job.country,
        experience: job.experience,
        qualifications: job.qualifications,
        work_type: job.work_type,
        company_bucket: job.company_bucket,
        benefits,
        company_profile,
    }
}
