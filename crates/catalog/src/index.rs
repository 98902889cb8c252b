//! In-memory catalog of poolable items with id lookups.
//!
//! Items keep their insertion order, which is the presentation priority of
//! the static pool. A secondary HashMap gives O(1) lookups by id.

use crate::error::{CatalogError, Result};
use crate::types::{CandidateProfile, Category, ItemId, JobOffer, PoolItem};
use std::collections::HashMap;

/// Ordered, id-indexed collection of candidates and job offers
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    candidates: Vec<CandidateProfile>,
    jobs: Vec<JobOffer>,
    candidate_index: HashMap<ItemId, usize>,
    job_index: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a candidate.
    ///
    /// Returns an error if a candidate with the same id already exists.
    pub fn insert_candidate(&mut self, candidate: CandidateProfile) -> Result<()> {
        if self.candidate_index.contains_key(&candidate.id) {
            return Err(CatalogError::DuplicateId {
                category: Category::Candidate.to_string(),
                id: candidate.id,
            });
        }
        self.candidate_index
            .insert(candidate.id.clone(), self.candidates.len());
        self.candidates.push(candidate);
        Ok(())
    }

    /// Insert a job offer.
    ///
    /// Returns an error if a job with the same id already exists.
    pub fn insert_job(&mut self, job: JobOffer) -> Result<()> {
        if self.job_index.contains_key(&job.id) {
            return Err(CatalogError::DuplicateId {
                category: Category::Job.to_string(),
                id: job.id,
            });
        }
        self.job_index.insert(job.id.clone(), self.jobs.len());
        self.jobs.push(job);
        Ok(())
    }

    pub fn get_candidate(&self, id: &str) -> Option<&CandidateProfile> {
        self.candidate_index.get(id).map(|&i| &self.candidates[i])
    }

    pub fn get_job(&self, id: &str) -> Option<&JobOffer> {
        self.job_index.get(id).map(|&i| &self.jobs[i])
    }

    /// Look up one item of the given category
    pub fn get(&self, category: Category, id: &str) -> Option<PoolItem> {
        match category {
            Category::Candidate => self.get_candidate(id).cloned().map(PoolItem::from),
            Category::Job => self.get_job(id).cloned().map(PoolItem::from),
        }
    }

    /// All items of one category, in catalog order
    pub fn items(&self, category: Category) -> Vec<PoolItem> {
        match category {
            Category::Candidate => self
                .candidates
                .iter()
                .cloned()
                .map(PoolItem::from)
                .collect(),
            Category::Job => self.jobs.iter().cloned().map(PoolItem::from).collect(),
        }
    }

    /// (candidates, jobs)
    pub fn counts(&self) -> (usize, usize) {
        (self.candidates.len(), self.jobs.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str) -> JobOffer {
        JobOffer {
            id: id.to_string(),
            title: format!("Job {id}"),
            company: "Acme".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut catalog = Catalog::new();
        for id in ["3", "1", "2"] {
            catalog.insert_job(job(id)).unwrap();
        }

        let ids: Vec<_> = catalog
            .items(Category::Job)
            .iter()
            .map(|item| item.id().to_string())
            .collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
        assert!(catalog.items(Category::Candidate).is_empty());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut catalog = Catalog::new();
        catalog.insert_job(job("1")).unwrap();

        let err = catalog.insert_job(job("1")).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { .. }));
        assert_eq!(catalog.counts(), (0, 1));
    }

    #[test]
    fn test_lookup_by_category() {
        let mut catalog = Catalog::new();
        catalog.insert_job(job("5")).unwrap();

        assert!(catalog.get(Category::Job, "5").is_some());
        assert!(catalog.get(Category::Candidate, "5").is_none());
        assert!(catalog.get_job("missing").is_none());
    }
}
