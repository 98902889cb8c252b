//! Filter to enforce pairwise-distinct ids in a pool.
//!
//! The first occurrence wins, so the highest-ranked copy of a repeated item
//! keeps its position.

use crate::traits::Filter;
use anyhow::Result;
use catalog::PoolItem;
use sources::DecisionContext;
use std::collections::HashSet;
use tracing::warn;

pub struct DuplicateIdFilter;

impl Filter for DuplicateIdFilter {
    fn name(&self) -> &str {
        "DuplicateIdFilter"
    }

    fn apply(&self, items: Vec<PoolItem>, _context: &DecisionContext) -> Result<Vec<PoolItem>> {
        let input = items.len();
        let mut seen: HashSet<String> = HashSet::with_capacity(input);
        let filtered: Vec<PoolItem> = items
            .into_iter()
            .filter(|item| seen.insert(item.id().to_string()))
            .collect();

        if filtered.len() != input {
            warn!("Dropped {} duplicate pool entries", input - filtered.len());
        }
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Category, JobOffer};

    fn job(id: &str, title: &str) -> PoolItem {
        PoolItem::Job(JobOffer {
            id: id.to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_first_occurrence_wins() {
        let context = DecisionContext::new("u1", Category::Job);
        let items = vec![
            job("1", "first"),
            job("2", "second"),
            job("1", "repeat"),
            job("3", "third"),
            job("2", "repeat"),
        ];

        let filtered = DuplicateIdFilter.apply(items, &context).unwrap();

        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered[0], job("1", "first"));
        assert_eq!(filtered[1].id(), "2");
        assert_eq!(filtered[2].id(), "3");
    }
}
