//! Decision recording: local journal first, remote mirror second.
//!
//! The journal write is the only part that can fail a decision. The mirror
//! to the backend interaction log is best-effort and its failures are only
//! logged.

use std::sync::Arc;
use std::time::Duration;

use backend_client::{InteractionPayload, RecommendationApi, backend_user_id};
use catalog::{Category, Decision, Direction, Outcome, PoolItem};
use chrono::{DateTime, Utc};
use journal::{DecisionJournal, JournalError};
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct DecisionRecorder {
    journal: DecisionJournal,
    mirror: Option<Arc<dyn RecommendationApi>>,
    settle_delay: Duration,
}

impl DecisionRecorder {
    pub fn new(journal: DecisionJournal, settle_delay: Duration) -> Self {
        Self {
            journal,
            mirror: None,
            settle_delay,
        }
    }

    /// Mirror every recorded decision to this backend
    pub fn with_mirror(mut self, api: Arc<dyn RecommendationApi>) -> Self {
        self.mirror = Some(api);
        self
    }

    pub fn journal(&self) -> &DecisionJournal {
        &self.journal
    }

    /// Record the decision for `item` and mirror it.
    ///
    /// # Returns
    /// * `Ok(Decision)` - The journal entry, even if the mirror failed
    /// * `Err(JournalError)` - The local write failed; nothing was mirrored
    pub async fn record(
        &self,
        actor_id: &str,
        item: &PoolItem,
        category: Category,
        direction: Direction,
    ) -> Result<Decision, JournalError> {
        let outcome = Outcome::from(direction);
        let gesture_at = Utc::now();
        let decision = self.journal.record(actor_id, item.id(), category, outcome)?;

        // An unchanged decision keeps its original timestamp in the journal.
        let unchanged = decision.decided_at < gesture_at;
        if unchanged {
            info!(
                "Repeated {} on {} {} for actor {}",
                decision.outcome, category, decision.item_id, actor_id
            );
        } else {
            info!(
                "Recorded {} on {} {} for actor {}",
                decision.outcome, category, decision.item_id, actor_id
            );
        }

        self.mirror(&decision, decision.decided_at.max(gesture_at)).await;
        Ok(decision)
    }

    /// Send the gesture to the backend interaction log, stamped `at`
    async fn mirror(&self, decision: &Decision, at: DateTime<Utc>) {
        let Some(api) = &self.mirror else {
            return;
        };

        let user_id = match backend_user_id(&decision.actor_id) {
            Ok(id) => id,
            Err(_) => {
                debug!(
                    "Actor {} has no backend user id, not mirroring",
                    decision.actor_id
                );
                return;
            }
        };

        let payload = InteractionPayload {
            user_id,
            item_id: decision.item_id.clone(),
            kind: decision.category.to_string(),
            action: decision.outcome.label().to_string(),
            timestamp: at.to_rfc3339(),
        };

        if let Err(e) = api.log_interaction(&payload).await {
            warn!(
                "Failed to mirror decision on {} to the interaction log: {}",
                decision.item_id, e
            );
        }
    }

    /// Wait out the visual-settle delay
    pub async fn settle(&self) {
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }
    }
}
