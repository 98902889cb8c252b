//! Exhaustion / refill policy as an explicit state machine.
//!
//! ```text
//!  Unloaded ──load──▶ Loading ──non-empty──▶ Ready ──window empty──▶ Loading
//!                        │                                              │
//!                        └──────empty──▶ Exhausted ◀──────empty─────────┘
//!                                           │
//!                                           └──manual load──▶ Loading
//! ```
//!
//! Every load gets a generation number. Only the latest generation may
//! complete; anything older is a stale response and is discarded.

/// Where the session is in its load lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefillPhase {
    /// No load has been started
    Unloaded,
    /// A load is in flight
    Loading,
    /// The last applied load was non-empty
    Ready,
    /// The last applied load was empty; only a manual load leaves this phase
    Exhausted,
}

/// Verdict of the automatic trigger check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefillDecision {
    Refill,
    /// The window still has items
    NotNeeded,
    InFlight,
    /// The first load has not been started or has not completed
    NotYetLoaded,
    /// An empty load was observed; waiting for a manual re-trigger
    NoMoreItems,
}

#[derive(Debug, Clone)]
pub struct RefillPolicy {
    phase: RefillPhase,
    latest_generation: u64,
}

impl RefillPolicy {
    pub fn new() -> Self {
        Self {
            phase: RefillPhase::Unloaded,
            latest_generation: 0,
        }
    }

    pub fn phase(&self) -> RefillPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == RefillPhase::Loading
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    /// Automatic trigger: refill only when the window is empty, nothing is
    /// loading, and the pool has been non-empty before (`Ready`).
    pub fn evaluate(&self, window_empty: bool) -> RefillDecision {
        if !window_empty {
            return RefillDecision::NotNeeded;
        }
        match self.phase {
            RefillPhase::Ready => RefillDecision::Refill,
            RefillPhase::Loading => RefillDecision::InFlight,
            RefillPhase::Unloaded => RefillDecision::NotYetLoaded,
            RefillPhase::Exhausted => RefillDecision::NoMoreItems,
        }
    }

    /// Start a load and return its generation. Supersedes any load already
    /// in flight.
    pub fn begin_load(&mut self) -> u64 {
        self.latest_generation += 1;
        self.phase = RefillPhase::Loading;
        self.latest_generation
    }

    /// Finish a load. Returns false when `generation` is stale, in which
    /// case its result must be discarded and the phase is left untouched.
    pub fn complete_load(&mut self, generation: u64, non_empty: bool) -> bool {
        if generation != self.latest_generation {
            return false;
        }
        self.phase = if non_empty {
            RefillPhase::Ready
        } else {
            RefillPhase::Exhausted
        };
        true
    }
}

impl Default for RefillPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_refill_before_first_load() {
        let policy = RefillPolicy::new();
        assert_eq!(policy.evaluate(true), RefillDecision::NotYetLoaded);
    }

    #[test]
    fn test_refill_after_non_empty_pool_is_consumed() {
        let mut policy = RefillPolicy::new();
        let generation = policy.begin_load();
        assert_eq!(policy.evaluate(true), RefillDecision::InFlight);
        assert!(policy.complete_load(generation, true));

        assert_eq!(policy.evaluate(false), RefillDecision::NotNeeded);
        assert_eq!(policy.evaluate(true), RefillDecision::Refill);
    }

    #[test]
    fn test_empty_reload_stops_automatic_refill() {
        let mut policy = RefillPolicy::new();
        let first = policy.begin_load();
        policy.complete_load(first, true);

        let second = policy.begin_load();
        policy.complete_load(second, false);

        assert_eq!(policy.phase(), RefillPhase::Exhausted);
        // Asking again does not loop.
        assert_eq!(policy.evaluate(true), RefillDecision::NoMoreItems);
        assert_eq!(policy.evaluate(true), RefillDecision::NoMoreItems);

        // A manual load leaves the exhausted phase.
        let third = policy.begin_load();
        assert!(policy.complete_load(third, true));
        assert_eq!(policy.evaluate(true), RefillDecision::Refill);
    }

    #[test]
    fn test_initial_empty_load_is_exhausted() {
        let mut policy = RefillPolicy::new();
        let generation = policy.begin_load();
        policy.complete_load(generation, false);
        assert_eq!(policy.evaluate(true), RefillDecision::NoMoreItems);
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut policy = RefillPolicy::new();
        let older = policy.begin_load();
        let newer = policy.begin_load();
        assert!(newer > older);

        assert!(policy.complete_load(newer, true));
        assert!(!policy.complete_load(older, false));
        assert_eq!(policy.phase(), RefillPhase::Ready);
    }

    #[test]
    fn test_stale_completion_keeps_newer_load_in_flight() {
        let mut policy = RefillPolicy::new();
        let older = policy.begin_load();
        let _newer = policy.begin_load();

        assert!(!policy.complete_load(older, true));
        assert!(policy.is_loading());
        assert_eq!(policy.latest_generation(), 2);
    }
}
