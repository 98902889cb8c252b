//! Build a DecisionContext from the decision journal
//!
//! The context is a snapshot of what the actor has already decided in one
//! category, gathered once so filters can do O(1) membership checks instead
//! of re-reading the journal per item.

use catalog::{ActorId, Category, ItemId};
use journal::DecisionJournal;
use std::collections::HashSet;

/// What one actor has already decided in one category
#[derive(Debug, Clone)]
pub struct DecisionContext {
    pub actor_id: ActorId,
    pub category: Category,
    pub accepted: HashSet<ItemId>,
    pub rejected: HashSet<ItemId>,
}

impl DecisionContext {
    /// A context with no decisions
    pub fn new(actor_id: impl Into<ActorId>, category: Category) -> Self {
        Self {
            actor_id: actor_id.into(),
            category,
            accepted: HashSet::new(),
            rejected: HashSet::new(),
        }
    }

    /// Whether the actor accepted or rejected this item
    pub fn is_decided(&self, item_id: &str) -> bool {
        self.accepted.contains(item_id) || self.rejected.contains(item_id)
    }

    /// Number of decided items
    pub fn decided_count(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }
}

/// Snapshot the journal for (actor, category)
pub fn build_decision_context(
    journal: &DecisionJournal,
    actor_id: &str,
    category: Category,
) -> DecisionContext {
    let mut context = DecisionContext::new(actor_id, category);
    context.accepted = journal.list_accepted(actor_id, category).into_iter().collect();
    context.rejected = journal.list_rejected(actor_id, category).into_iter().collect();
    context
}
