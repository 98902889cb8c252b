//! Filter to remove items the actor has already accepted or rejected.

use crate::traits::Filter;
use anyhow::Result;
use catalog::PoolItem;
use sources::DecisionContext;

/// Removes items present in the actor's decision journal.
///
/// ## Algorithm
/// Uses the HashSets in DecisionContext for O(1) lookups.
pub struct AlreadyDecidedFilter;

impl Filter for AlreadyDecidedFilter {
    fn name(&self) -> &str {
        "AlreadyDecidedFilter"
    }

    fn apply(&self, items: Vec<PoolItem>, context: &DecisionContext) -> Result<Vec<PoolItem>> {
        let filtered: Vec<PoolItem> = items
            .into_iter()
            .filter(|item| !context.is_decided(item.id()))
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Catalog, Category};

    #[test]
    fn test_already_decided_filter() {
        let mut context = DecisionContext::new("u1", Category::Job);
        context.accepted.insert("3".to_string());
        context.rejected.insert("5".to_string());

        let items = Catalog::builtin().items(Category::Job);
        let filtered = AlreadyDecidedFilter.apply(items, &context).unwrap();

        let ids: Vec<_> = filtered.iter().map(|item| item.id()).collect();
        assert_eq!(ids, vec!["1", "2", "4", "6", "7", "8"]);
    }
}
