//! Core domain types shared by every crate in the workspace.
//!
//! Ids are opaque strings: actors come from an external profile store and
//! items come either from a static catalog or from the ranking service.

use crate::error::CatalogError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Aliases
// =============================================================================

/// Opaque identifier of the acting user
pub type ActorId = String;

/// Opaque identifier of a candidate or a job offer
pub type ItemId = String;

// =============================================================================
// Decision-related Types
// =============================================================================

/// The kind of item being decided on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Candidate,
    Job,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Candidate => "candidate",
            Category::Job => "job",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "candidate" | "candidates" => Ok(Category::Candidate),
            "job" | "jobs" => Ok(Category::Job),
            _ => Err(CatalogError::InvalidValue {
                field: "category".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// An actor's judgment on one item.
///
/// Persisted and transmitted with the labels the UI shows: `like` / `pass`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "like")]
    Accept,
    #[serde(rename = "pass")]
    Reject,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Accept => "like",
            Outcome::Reject => "pass",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction of a swipe gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl From<Direction> for Outcome {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Right => Outcome::Accept,
            Direction::Left => Outcome::Reject,
        }
    }
}

impl FromStr for Direction {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "left" | "pass" => Ok(Direction::Left),
            "r" | "right" | "like" => Ok(Direction::Right),
            _ => Err(CatalogError::InvalidValue {
                field: "direction".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// One actor's judgment on one item.
///
/// At most one Decision exists per (actor, item, category); a newer decision
/// on the same tuple replaces the older one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub actor_id: ActorId,
    pub item_id: ItemId,
    pub category: Category,
    pub outcome: Outcome,
    pub decided_at: DateTime<Utc>,
}

impl Decision {
    /// Whether this decision is about the given tuple
    pub fn is_for(&self, actor_id: &str, item_id: &str, category: Category) -> bool {
        self.actor_id == actor_id && self.item_id == item_id && self.category == category
    }
}

// =============================================================================
// Profile Types
// =============================================================================

/// A candidate profile shown to recruiters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: String,
}

/// A job offer shown to job seekers.
///
/// The optional metadata block is only filled for offers coming from the
/// ranking service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOffer {
    pub id: ItemId,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_profile: Option<serde_json::Value>,
}

/// Anything that can sit in a swipe pool.
///
/// The session core only looks at `id()` and `category()`; the payload is
/// carried through for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum PoolItem {
    Candidate(CandidateProfile),
    Job(JobOffer),
}

impl PoolItem {
    pub fn id(&self) -> &str {
        match self {
            PoolItem::Candidate(candidate) => &candidate.id,
            PoolItem::Job(job) => &job.id,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            PoolItem::Candidate(_) => Category::Candidate,
            PoolItem::Job(_) => Category::Job,
        }
    }

    /// One-line label for listings
    pub fn headline(&self) -> String {
        match self {
            PoolItem::Candidate(candidate) => {
                format!("{} ({}, {})", candidate.name, candidate.experience, candidate.location)
            }
            PoolItem::Job(job) => format!("{} @ {}", job.title, job.company),
        }
    }
}

impl From<CandidateProfile> for PoolItem {
    fn from(candidate: CandidateProfile) -> Self {
        PoolItem::Candidate(candidate)
    }
}

impl From<JobOffer> for PoolItem {
    fn from(job: JobOffer) -> Self {
        PoolItem::Job(job)
    }
}
