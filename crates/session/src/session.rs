//! # Swipe Session
//!
//! One actor swiping through one category. Owns the presentation cursor and
//! the refill policy; delegates pool loading to the [`PoolProvider`] and
//! decision persistence to the [`DecisionRecorder`].
//!
//! Locking: `state` is a std `Mutex` that is never held across an await.
//! Loads snapshot what they need, release the lock, await, then re-lock to
//! apply their result.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use catalog::{ActorId, Category, Decision, Direction, PoolItem};
use journal::JournalError;
use tracing::{debug, info};

use crate::cursor::{CursorState, SessionCursor};
use crate::provider::{PoolOrigin, PoolProvider};
use crate::recorder::DecisionRecorder;
use crate::refill::{RefillDecision, RefillPhase, RefillPolicy};

/// Result of a load or refill request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefillOutcome {
    /// A non-empty pool replaced the previous one
    Loaded { items: usize, origin: PoolOrigin },
    /// The load came back empty; the session shows "no more items"
    NoMoreItems,
    /// The window still has items
    NotNeeded,
    /// Another load is in flight
    InFlight,
    /// Automatic refill before the first load completed
    NotYetLoaded,
    /// A newer load was issued while this one was in flight; its result was
    /// discarded
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Another decision is still being recorded
    InFlight,
    /// Nothing left to decide on
    Exhausted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecideOutcome {
    Recorded(Decision),
    Ignored(IgnoreReason),
}

/// Snapshot of the session for display
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    pub actor_id: ActorId,
    pub category: Category,
    pub state: CursorState,
    pub phase: RefillPhase,
    pub position: usize,
    pub pool_len: usize,
    pub window_len: usize,
    pub origin: Option<PoolOrigin>,
}

struct SessionState {
    cursor: SessionCursor<PoolItem>,
    refill: RefillPolicy,
    origin: Option<PoolOrigin>,
}

pub struct SwipeSession {
    actor_id: ActorId,
    category: Category,
    provider: Arc<PoolProvider>,
    recorder: Arc<DecisionRecorder>,
    state: Mutex<SessionState>,
    deciding: AtomicBool,
}

impl SwipeSession {
    pub fn new(
        actor_id: impl Into<ActorId>,
        category: Category,
        provider: Arc<PoolProvider>,
        recorder: Arc<DecisionRecorder>,
        window_size: usize,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            category,
            provider,
            recorder,
            state: Mutex::new(SessionState {
                cursor: SessionCursor::new(window_size),
                refill: RefillPolicy::new(),
                origin: None,
            }),
            deciding: AtomicBool::new(false),
        }
    }

    pub fn actor_id(&self) -> &str {
        &self.actor_id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Load (or reload) the pool. Supersedes any load already in flight.
    pub async fn load(&self) -> RefillOutcome {
        let generation = self.state().refill.begin_load();
        self.run_load(generation).await
    }

    /// Manual refill. Clears the "no more items" state.
    pub async fn request_refill(&self) -> RefillOutcome {
        info!(
            "Manual refill requested for actor {} ({})",
            self.actor_id, self.category
        );
        self.load().await
    }

    /// Automatic refill: reloads only when the window is empty, no load is
    /// in flight, and the last load was non-empty.
    pub async fn refill_if_exhausted(&self) -> RefillOutcome {
        let generation = {
            let mut state = self.state();
            let window_empty = state.cursor.window().is_empty();
            match state.refill.evaluate(window_empty) {
                RefillDecision::Refill => state.refill.begin_load(),
                RefillDecision::NotNeeded => return RefillOutcome::NotNeeded,
                RefillDecision::InFlight => return RefillOutcome::InFlight,
                RefillDecision::NotYetLoaded => return RefillOutcome::NotYetLoaded,
                RefillDecision::NoMoreItems => return RefillOutcome::NoMoreItems,
            }
        };

        info!(
            "Window exhausted for actor {} ({}), refilling",
            self.actor_id, self.category
        );
        self.run_load(generation).await
    }

    async fn run_load(&self, generation: u64) -> RefillOutcome {
        debug!("Starting load generation {}", generation);
        let loaded = self
            .provider
            .load_pool(&self.actor_id, self.category)
            .await;

        let mut state = self.state();
        if !state.refill.complete_load(generation, !loaded.items.is_empty()) {
            debug!(
                "Discarding load generation {} (latest is {})",
                generation,
                state.refill.latest_generation()
            );
            return RefillOutcome::Superseded;
        }

        let count = loaded.items.len();
        state.cursor.replace(loaded.items);
        state.origin = Some(loaded.origin);

        if count == 0 {
            info!(
                "No more {} items for actor {}",
                self.category, self.actor_id
            );
            RefillOutcome::NoMoreItems
        } else {
            RefillOutcome::Loaded {
                items: count,
                origin: loaded.origin,
            }
        }
    }

    /// Decide on the item at the cursor.
    ///
    /// At most one decision is in flight per session; a second call while
    /// one is running is ignored. The cursor advances after the settle
    /// delay, unless the pool was replaced in the meantime.
    ///
    /// # Returns
    /// * `Ok(Recorded)` - Journal written (mirror failures are only logged)
    /// * `Ok(Ignored)` - Nothing happened
    /// * `Err(JournalError)` - Local write failed; the cursor did not move
    pub async fn decide(&self, direction: Direction) -> Result<DecideOutcome, JournalError> {
        let Some(_guard) = DecisionGuard::acquire(&self.deciding) else {
            debug!("Decision already in flight, ignoring {:?}", direction);
            return Ok(DecideOutcome::Ignored(IgnoreReason::InFlight));
        };

        let (item, epoch) = {
            let state = self.state();
            match state.cursor.current() {
                Some(item) => (item.clone(), state.cursor.epoch()),
                None => return Ok(DecideOutcome::Ignored(IgnoreReason::Exhausted)),
            }
        };

        let decision = self
            .recorder
            .record(&self.actor_id, &item, self.category, direction)
            .await?;

        self.recorder.settle().await;

        let mut state = self.state();
        if state.cursor.epoch() == epoch {
            state.cursor.advance();
        } else {
            debug!(
                "Pool replaced while deciding on {}, leaving the new cursor in place",
                item.id()
            );
        }

        Ok(DecideOutcome::Recorded(decision))
    }

    /// Items currently presented, top first
    pub fn window(&self) -> Vec<PoolItem> {
        self.state().cursor.window().to_vec()
    }

    pub fn status(&self) -> SessionStatus {
        let state = self.state();
        SessionStatus {
            actor_id: self.actor_id.clone(),
            category: self.category,
            state: state.cursor.state(),
            phase: state.refill.phase(),
            position: state.cursor.position(),
            pool_len: state.cursor.pool_len(),
            window_len: state.cursor.window().len(),
            origin: state.origin,
        }
    }

    /// True when the window is empty and only a manual refill can help
    pub fn no_more_items(&self) -> bool {
        let state = self.state();
        state.refill.phase() == RefillPhase::Exhausted && state.cursor.window().is_empty()
    }

    pub fn is_deciding(&self) -> bool {
        self.deciding.load(Ordering::Acquire)
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the per-session decision flag; clears it on drop, including on
/// early return and error paths.
struct DecisionGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> DecisionGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for DecisionGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
