//! # Session Crate
//!
//! Drives one actor through a swipe pool:
//! - [`PoolProvider`] loads the pool (remote ranking with catalog fallback)
//! - [`SessionCursor`] tracks the presentation window
//! - [`DecisionRecorder`] writes the journal and mirrors to the backend
//! - [`RefillPolicy`] decides when an exhausted window reloads
//! - [`SwipeSession`] ties them together behind an async API
//!
//! ## Example Usage
//! ```ignore
//! let config = SessionConfig::from_env()?;
//! let engine = SwipeEngine::from_config(&config, Arc::new(Catalog::builtin()))?;
//!
//! let session = engine.session("17", Category::Job);
//! session.load().await;
//! session.decide(Direction::Right).await?;
//! if session.window().is_empty() {
//!     session.refill_if_exhausted().await;
//! }
//! ```

pub mod config;
pub mod cursor;
pub mod engine;
pub mod provider;
pub mod recorder;
pub mod refill;
pub mod session;

pub use config::SessionConfig;
pub use cursor::{CursorState, SessionCursor};
pub use engine::SwipeEngine;
pub use provider::{LoadedPool, PoolOrigin, PoolProvider};
pub use recorder::DecisionRecorder;
pub use refill::{RefillDecision, RefillPhase, RefillPolicy};
pub use session::{DecideOutcome, IgnoreReason, RefillOutcome, SessionStatus, SwipeSession};
