//! End-to-end session behavior against an in-process mock backend.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use backend_client::{
    BackendClientError, InteractionPayload, JobRef, RecommendationApi, RecommendedJob,
};
use catalog::{Catalog, Category, Direction, Outcome, PoolItem};
use journal::{DecisionJournal, KeyValueStore, MemoryStore, StoreError};
use session::{
    CursorState, DecideOutcome, DecisionRecorder, IgnoreReason, PoolOrigin, PoolProvider,
    RefillOutcome, SwipeEngine,
};

// ============================================================================
// Mock Backend
// ============================================================================

enum Reply {
    Jobs(Vec<RecommendedJob>),
    Fail,
}

/// Answers ranked-pool queries from a script, one reply per call. An empty
/// script answers with a 503.
#[derive(Default)]
struct MockBackend {
    ranked: Mutex<VecDeque<(Duration, Reply)>>,
    ranked_calls: AtomicUsize,
    liked: Mutex<Option<Vec<RecommendedJob>>>,
    fail_interactions: bool,
    interactions: Mutex<Vec<InteractionPayload>>,
}

impl MockBackend {
    fn script(self, replies: Vec<Reply>) -> Self {
        self.script_delayed(replies.into_iter().map(|r| (Duration::ZERO, r)).collect())
    }

    fn script_delayed(self, replies: Vec<(Duration, Reply)>) -> Self {
        self.ranked.lock().unwrap().extend(replies);
        self
    }

    fn calls(&self) -> usize {
        self.ranked_calls.load(Ordering::SeqCst)
    }
}

fn unavailable(endpoint: &str) -> BackendClientError {
    BackendClientError::Status {
        endpoint: endpoint.to_string(),
        status: 503,
    }
}

#[async_trait]
impl RecommendationApi for MockBackend {
    async fn fetch_recommendations(
        &self,
        _user_id: u32,
    ) -> Result<Vec<RecommendedJob>, BackendClientError> {
        self.ranked_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.ranked.lock().unwrap().pop_front();
        match next {
            Some((delay, reply)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                match reply {
                    Reply::Jobs(jobs) => Ok(jobs),
                    Reply::Fail => Err(unavailable("/recommend")),
                }
            }
            None => Err(unavailable("/recommend")),
        }
    }

    async fn log_interaction(&self, payload: &InteractionPayload) -> Result<(), BackendClientError> {
        self.interactions.lock().unwrap().push(payload.clone());
        if self.fail_interactions {
            return Err(unavailable("/api/interactions"));
        }
        Ok(())
    }

    async fn fetch_liked_jobs(
        &self,
        _user_id: u32,
    ) -> Result<Vec<RecommendedJob>, BackendClientError> {
        self.liked
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| unavailable("/api/liked-jobs"))
    }
}

/// Journal store that cannot be read or written
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Io {
            key: key.to_string(),
            source: std::io::Error::other("read-only volume"),
        })
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io {
            key: key.to_string(),
            source: std::io::Error::other("read-only volume"),
        })
    }
}

// ============================================================================
// Test Fixtures
// ============================================================================

fn remote_job(id: u64) -> RecommendedJob {
    RecommendedJob {
        job_id: JobRef::Number(id),
        title: format!("Role {id}"),
        company: "Remote Co".to_string(),
        location: Some("Remote".to_string()),
        description: None,
        skills: None,
        salary_range: None,
        role: None,
        country: None,
        experience: None,
        qualifications: None,
        work_type: None,
        company_bucket: None,
        benefits: None,
        company_profile: None,
    }
}

fn remote_jobs(ids: &[u64]) -> Reply {
    Reply::Jobs(ids.iter().copied().map(remote_job).collect())
}

fn memory_journal() -> DecisionJournal {
    DecisionJournal::new(Arc::new(MemoryStore::new()))
}

fn engine(
    journal: DecisionJournal,
    backend: Option<Arc<MockBackend>>,
    settle_delay: Duration,
) -> SwipeEngine {
    let mut provider = PoolProvider::new(Arc::new(Catalog::builtin()), journal.clone());
    let mut recorder = DecisionRecorder::new(journal, settle_delay);
    if let Some(api) = backend {
        provider = provider.with_ranking(api.clone());
        recorder = recorder.with_mirror(api);
    }
    SwipeEngine::new(provider, recorder, 3)
}

fn ids(items: &[PoolItem]) -> Vec<&str> {
    items.iter().map(|item| item.id()).collect()
}

// ============================================================================
// Loading
// ============================================================================

#[tokio::test]
async fn test_remote_failure_falls_back_to_catalog() {
    let backend = Arc::new(MockBackend::default().script(vec![Reply::Fail]));
    let engine = engine(memory_journal(), Some(backend.clone()), Duration::ZERO);
    let session = engine.session("17", Category::Job);

    let outcome = session.load().await;

    assert_eq!(
        outcome,
        RefillOutcome::Loaded {
            items: 8,
            origin: PoolOrigin::Fallback
        }
    );
    assert_eq!(ids(&session.window()), vec!["1", "2", "3"]);
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_non_numeric_actor_uses_fallback_and_decides() {
    let backend = Arc::new(MockBackend::default().script(vec![remote_jobs(&[40, 41])]));
    let engine = engine(memory_journal(), Some(backend.clone()), Duration::ZERO);
    let session = engine.session("u1", Category::Job);

    let outcome = session.load().await;
    assert_eq!(
        outcome,
        RefillOutcome::Loaded {
            items: 8,
            origin: PoolOrigin::Fallback
        }
    );
    assert_eq!(session.window().len(), 3);

    let decision = match session.decide(Direction::Right).await.unwrap() {
        DecideOutcome::Recorded(decision) => decision,
        other => panic!("expected a recorded decision, got {other:?}"),
    };
    assert_eq!(decision.item_id, "1");
    assert_eq!(decision.outcome, Outcome::Accept);

    assert!(engine.journal().has_decision("u1", "1", Category::Job));
    assert_eq!(session.status().position, 1);
    assert_eq!(ids(&session.window()), vec!["2", "3", "4"]);

    // The actor has no backend id: no remote query, no mirror.
    assert_eq!(backend.calls(), 0);
    assert!(backend.interactions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_fallback_pool_excludes_decided_items() {
    let journal = memory_journal();
    journal.record("u1", "3", Category::Job, Outcome::Accept).unwrap();
    journal.record("u1", "5", Category::Job, Outcome::Reject).unwrap();
    let engine = engine(journal, None, Duration::ZERO);
    let session = engine.session("u1", Category::Job);

    session.load().await;

    let status = session.status();
    assert_eq!(status.pool_len, 6);
    assert_eq!(status.origin, Some(PoolOrigin::Catalog));
    assert_eq!(ids(&session.window()), vec!["1", "2", "4"]);
}

#[tokio::test]
async fn test_ranked_pool_is_used_as_is() {
    let backend = Arc::new(MockBackend::default().script(vec![remote_jobs(&[30, 31, 30, 32])]));
    let journal = memory_journal();
    journal.record("17", "31", Category::Job, Outcome::Reject).unwrap();
    let engine = engine(journal, Some(backend), Duration::ZERO);
    let session = engine.session("17", Category::Job);

    let outcome = session.load().await;

    // Duplicates collapse to the first occurrence. The locally decided "31"
    // stays: ranked pools are not filtered against the journal.
    assert_eq!(
        outcome,
        RefillOutcome::Loaded {
            items: 3,
            origin: PoolOrigin::Ranked
        }
    );
    assert_eq!(ids(&session.window()), vec!["30", "31", "32"]);
}

#[tokio::test]
async fn test_candidate_pool_never_queries_backend() {
    let backend = Arc::new(MockBackend::default().script(vec![remote_jobs(&[1])]));
    let engine = engine(memory_journal(), Some(backend.clone()), Duration::ZERO);
    let session = engine.session("17", Category::Candidate);

    let outcome = session.load().await;

    assert_eq!(
        outcome,
        RefillOutcome::Loaded {
            items: 8,
            origin: PoolOrigin::Catalog
        }
    );
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_stale_load_is_discarded() {
    let backend = Arc::new(MockBackend::default().script_delayed(vec![
        (Duration::from_millis(100), remote_jobs(&[10, 11])),
        (Duration::ZERO, remote_jobs(&[20, 21, 22])),
    ]));
    let engine = engine(memory_journal(), Some(backend), Duration::ZERO);
    let session = engine.session("17", Category::Job);

    let (first, second) = tokio::join!(session.load(), session.request_refill());

    assert_eq!(first, RefillOutcome::Superseded);
    assert_eq!(
        second,
        RefillOutcome::Loaded {
            items: 3,
            origin: PoolOrigin::Ranked
        }
    );
    assert_eq!(ids(&session.window()), vec!["20", "21", "22"]);
}

// ============================================================================
// Exhaustion and Refill
// ============================================================================

#[tokio::test]
async fn test_two_item_pool_exhausts_then_refills() {
    let backend = Arc::new(MockBackend::default().script(vec![
        remote_jobs(&[1, 2]),
        remote_jobs(&[3, 4, 5, 6, 7]),
    ]));
    let engine = engine(memory_journal(), Some(backend), Duration::ZERO);
    let session = engine.session("17", Category::Job);
    session.load().await;

    assert_eq!(
        session.refill_if_exhausted().await,
        RefillOutcome::NotNeeded
    );

    session.decide(Direction::Right).await.unwrap();
    session.decide(Direction::Left).await.unwrap();

    let status = session.status();
    assert_eq!(status.state, CursorState::Empty);
    assert_eq!(status.position, 2);
    assert!(session.window().is_empty());
    assert_eq!(
        session.decide(Direction::Right).await.unwrap(),
        DecideOutcome::Ignored(IgnoreReason::Exhausted)
    );

    let outcome = session.refill_if_exhausted().await;
    assert_eq!(
        outcome,
        RefillOutcome::Loaded {
            items: 5,
            origin: PoolOrigin::Ranked
        }
    );
    assert_eq!(session.status().position, 0);
    assert_eq!(ids(&session.window()), vec!["3", "4", "5"]);
}

#[tokio::test]
async fn test_empty_reload_shows_no_more_items_without_looping() {
    let backend = Arc::new(MockBackend::default().script(vec![
        remote_jobs(&[1]),
        remote_jobs(&[]),
        remote_jobs(&[9]),
    ]));
    let engine = engine(memory_journal(), Some(backend.clone()), Duration::ZERO);
    let session = engine.session("17", Category::Job);
    session.load().await;
    session.decide(Direction::Right).await.unwrap();

    assert_eq!(session.refill_if_exhausted().await, RefillOutcome::NoMoreItems);
    assert!(session.no_more_items());
    assert_eq!(backend.calls(), 2);

    // Further automatic checks do not query again.
    assert_eq!(session.refill_if_exhausted().await, RefillOutcome::NoMoreItems);
    assert_eq!(session.refill_if_exhausted().await, RefillOutcome::NoMoreItems);
    assert_eq!(backend.calls(), 2);

    // A manual refill clears the state.
    let outcome = session.request_refill().await;
    assert_eq!(
        outcome,
        RefillOutcome::Loaded {
            items: 1,
            origin: PoolOrigin::Ranked
        }
    );
    assert!(!session.no_more_items());
    assert_eq!(backend.calls(), 3);
}

#[tokio::test]
async fn test_automatic_refill_waits_for_first_load() {
    let engine = engine(memory_journal(), None, Duration::ZERO);
    let session = engine.session("u1", Category::Candidate);

    assert_eq!(
        session.refill_if_exhausted().await,
        RefillOutcome::NotYetLoaded
    );
    assert!(session.window().is_empty());
}

// ============================================================================
// Decisions
// ============================================================================

#[tokio::test]
async fn test_mirror_failure_still_advances() {
    let backend = Arc::new(MockBackend {
        fail_interactions: true,
        ..Default::default()
    });
    let engine = engine(memory_journal(), Some(backend.clone()), Duration::ZERO);
    let session = engine.session("17", Category::Candidate);
    session.load().await;

    let outcome = session.decide(Direction::Left).await.unwrap();

    assert!(matches!(outcome, DecideOutcome::Recorded(_)));
    assert_eq!(session.status().position, 1);
    assert!(!session.is_deciding());
    assert_eq!(engine.journal().list_rejected("17", Category::Candidate), vec!["1"]);

    let interactions = backend.interactions.lock().unwrap();
    assert_eq!(interactions.len(), 1);
    assert_eq!(interactions[0].kind, "candidate");
    assert_eq!(interactions[0].action, "pass");
}

#[tokio::test]
async fn test_re_decision_keeps_one_entry() {
    let backend = Arc::new(MockBackend::default().script(vec![
        remote_jobs(&[1, 2]),
        remote_jobs(&[1, 2]),
    ]));
    let engine = engine(memory_journal(), Some(backend), Duration::ZERO);
    let session = engine.session("17", Category::Job);

    session.load().await;
    session.decide(Direction::Right).await.unwrap();
    session.request_refill().await;
    session.decide(Direction::Left).await.unwrap();

    let decisions = engine.journal().decisions("17", Category::Job);
    let for_item: Vec<_> = decisions.iter().filter(|d| d.item_id == "1").collect();
    assert_eq!(for_item.len(), 1);
    assert_eq!(for_item[0].outcome, Outcome::Reject);
    assert!(engine.journal().list_accepted("17", Category::Job).is_empty());
}

#[tokio::test]
async fn test_concurrent_decide_is_ignored() {
    let engine = engine(memory_journal(), None, Duration::from_millis(50));
    let session = engine.session("u1", Category::Candidate);
    session.load().await;

    let (first, second) = tokio::join!(
        session.decide(Direction::Right),
        session.decide(Direction::Left)
    );

    assert!(matches!(first.unwrap(), DecideOutcome::Recorded(_)));
    assert_eq!(
        second.unwrap(),
        DecideOutcome::Ignored(IgnoreReason::InFlight)
    );
    assert_eq!(session.status().position, 1);
    assert_eq!(engine.journal().decisions("u1", Category::Candidate).len(), 1);
}

#[tokio::test]
async fn test_pool_replaced_during_decide_is_not_advanced() {
    let engine = engine(memory_journal(), None, Duration::from_millis(50));
    let session = engine.session("u1", Category::Job);
    session.load().await;

    let (decided, reloaded) = tokio::join!(session.decide(Direction::Right), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        session.request_refill().await
    });

    assert!(matches!(decided.unwrap(), DecideOutcome::Recorded(_)));
    assert_eq!(
        reloaded,
        RefillOutcome::Loaded {
            items: 7,
            origin: PoolOrigin::Catalog
        }
    );
    // The new pool already excludes the decided item and starts at 0.
    assert_eq!(session.status().position, 0);
    assert_eq!(ids(&session.window()), vec!["2", "3", "4"]);
}

#[tokio::test]
async fn test_journal_failure_is_returned_and_cursor_stays() {
    let engine = engine(
        DecisionJournal::new(Arc::new(BrokenStore)),
        None,
        Duration::ZERO,
    );
    let session = engine.session("u1", Category::Candidate);
    session.load().await;
    assert_eq!(session.window().len(), 3);

    assert!(session.decide(Direction::Right).await.is_err());
    assert_eq!(session.status().position, 0);
    assert!(!session.is_deciding());

    // The guard was released, so the next attempt runs again.
    assert!(session.decide(Direction::Left).await.is_err());
}

// ============================================================================
// Shortlist
// ============================================================================

#[tokio::test]
async fn test_shortlist_prefers_remote_liked_jobs() {
    let backend = Arc::new(MockBackend::default());
    *backend.liked.lock().unwrap() = Some(vec![remote_job(77), remote_job(78)]);
    let engine = engine(memory_journal(), Some(backend), Duration::ZERO);

    let shortlist = engine.provider().shortlist("17", Category::Job).await;
    assert_eq!(ids(&shortlist), vec!["77", "78"]);
}

#[tokio::test]
async fn test_shortlist_falls_back_to_journal() {
    let backend = Arc::new(MockBackend::default());
    let journal = memory_journal();
    journal.record("17", "5", Category::Job, Outcome::Accept).unwrap();
    journal.record("17", "2", Category::Job, Outcome::Accept).unwrap();
    journal.record("17", "3", Category::Job, Outcome::Reject).unwrap();
    let engine = engine(journal, Some(backend), Duration::ZERO);

    let shortlist = engine.provider().shortlist("17", Category::Job).await;
    assert_eq!(ids(&shortlist), vec!["5", "2"]);
}
