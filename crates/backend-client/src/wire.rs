//! Wire types of the recommendation backend's JSON API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Response of `GET /recommend/{user_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    #[serde(default)]
    pub user_id: Option<u32>,
    #[serde(default)]
    pub num_recommendations: Option<usize>,
    pub recommendations: Vec<RecommendedJob>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Job identifiers arrive as numbers from the ranking model and as strings
/// from hand-entered offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobRef {
    Number(u64),
    Text(String),
}

impl fmt::Display for JobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobRef::Number(n) => write!(f, "{n}"),
            JobRef::Text(s) => f.write_str(s),
        }
    }
}

/// Skill lists are sometimes flattened into one comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillList {
    List(Vec<String>),
    Joined(String),
}

impl SkillList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            SkillList::List(skills) => skills,
            SkillList::Joined(joined) => joined
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// One ranked job record. Only `job_id`, `title` and `company` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedJob {
    pub job_id: JobRef,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Option<SkillList>,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub qualifications: Option<String>,
    #[serde(default)]
    pub work_type: Option<String>,
    #[serde(default)]
    pub company_bucket: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    /// Either a JSON object or a JSON-encoded string of one
    #[serde(default)]
    pub company_profile: Option<serde_json::Value>,
}

/// Body of `POST /api/interactions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionPayload {
    pub user_id: u32,
    pub item_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub action: String,
    /// RFC 3339
    pub timestamp: String,
}
