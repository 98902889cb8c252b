//! The decision journal: a durable record of every accept/reject an actor
//! has made, scoped by category.
//!
//! The whole journal is one JSON array stored under a single key and is
//! read and rewritten wholesale on every operation. That is fine at the
//! scale of one user's swipe history.

use crate::error::JournalError;
use crate::store::KeyValueStore;
use catalog::{Category, Decision, ItemId, Outcome};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Key the journal is stored under unless configured otherwise
pub const DEFAULT_JOURNAL_KEY: &str = "swipes";

/// Decision journal over an injected persistence port
#[derive(Clone)]
pub struct DecisionJournal {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl DecisionJournal {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: DEFAULT_JOURNAL_KEY.to_string(),
        }
    }

    /// Store the journal under a different key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Insert or overwrite the decision for (actor, item, category).
    ///
    /// Re-recording the same outcome for a tuple is a no-op and returns the
    /// existing decision unchanged, timestamp included.
    pub fn record(
        &self,
        actor_id: &str,
        item_id: &str,
        category: Category,
        outcome: Outcome,
    ) -> Result<Decision, JournalError> {
        let mut decisions = self.load_for_write()?;

        let existing = decisions
            .iter()
            .position(|d| d.is_for(actor_id, item_id, category));

        if let Some(index) = existing {
            if decisions[index].outcome == outcome {
                debug!(actor_id, item_id, %category, %outcome, "Decision unchanged");
                return Ok(decisions[index].clone());
            }
        }

        let decision = Decision {
            actor_id: actor_id.to_string(),
            item_id: item_id.to_string(),
            category,
            outcome,
            decided_at: Utc::now(),
        };

        match existing {
            Some(index) => decisions[index] = decision.clone(),
            None => decisions.push(decision.clone()),
        }

        let encoded = serde_json::to_string(&decisions)?;
        self.store.set(&self.key, &encoded)?;
        debug!(
            actor_id,
            item_id,
            %category,
            %outcome,
            total = decisions.len(),
            "Decision recorded"
        );
        Ok(decision)
    }

    /// Ids the actor accepted in this category, in journal order
    pub fn list_accepted(&self, actor_id: &str, category: Category) -> Vec<ItemId> {
        self.list_with_outcome(actor_id, category, Outcome::Accept)
    }

    /// Ids the actor rejected in this category, in journal order
    pub fn list_rejected(&self, actor_id: &str, category: Category) -> Vec<ItemId> {
        self.list_with_outcome(actor_id, category, Outcome::Reject)
    }

    /// Every id the actor has decided on in this category
    pub fn decided_ids(&self, actor_id: &str, category: Category) -> HashSet<ItemId> {
        self.decisions(actor_id, category)
            .into_iter()
            .map(|d| d.item_id)
            .collect()
    }

    pub fn has_decision(&self, actor_id: &str, item_id: &str, category: Category) -> bool {
        self.load()
            .iter()
            .any(|d| d.is_for(actor_id, item_id, category))
    }

    /// The actor's decisions in this category, in journal order
    pub fn decisions(&self, actor_id: &str, category: Category) -> Vec<Decision> {
        self.load()
            .into_iter()
            .filter(|d| d.actor_id == actor_id && d.category == category)
            .collect()
    }

    /// The whole journal
    pub fn all(&self) -> Vec<Decision> {
        self.load()
    }

    fn list_with_outcome(&self, actor_id: &str, category: Category, outcome: Outcome) -> Vec<ItemId> {
        self.decisions(actor_id, category)
            .into_iter()
            .filter(|d| d.outcome == outcome)
            .map(|d| d.item_id)
            .collect()
    }

    /// Read path: any failure reads as an empty journal.
    fn load(&self) -> Vec<Decision> {
        match self.load_for_write() {
            Ok(decisions) => decisions,
            Err(e) => {
                warn!("Decision journal unreadable, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Write path: a store failure is an error (so a transient read error
    /// never wipes the journal), but a corrupt payload reads as empty and
    /// is replaced by the next write.
    fn load_for_write(&self) -> Result<Vec<Decision>, JournalError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Decision>>(&raw) {
            Ok(decisions) => Ok(decisions),
            Err(e) => {
                warn!(key = %self.key, "Corrupt decision journal, starting empty: {}", e);
                Ok(Vec::new())
            }
        }
    }
}
