use std::sync::Arc;

use anyhow::{Context, Result};
use backend_client::{BackendClient, RecommendationApi};
use catalog::{ActorId, Catalog, Category};
use journal::{DecisionJournal, FileStore};
use tracing::info;

use crate::config::SessionConfig;
use crate::provider::PoolProvider;
use crate::recorder::DecisionRecorder;
use crate::session::SwipeSession;

/// Shared components behind every session: one provider, one recorder, one
/// journal.
#[derive(Clone)]
pub struct SwipeEngine {
    provider: Arc<PoolProvider>,
    recorder: Arc<DecisionRecorder>,
    window_size: usize,
}

impl SwipeEngine {
    pub fn new(provider: PoolProvider, recorder: DecisionRecorder, window_size: usize) -> Self {
        Self {
            provider: Arc::new(provider),
            recorder: Arc::new(recorder),
            window_size,
        }
    }

    /// Wire an engine from configuration with a file-backed journal under
    /// `config.journal_dir`.
    pub fn from_config(config: &SessionConfig, catalog: Arc<Catalog>) -> Result<Self> {
        let store = FileStore::new(config.journal_dir.clone());
        info!("Decision journal at {}", store.dir().display());
        Self::with_journal(config, catalog, DecisionJournal::new(Arc::new(store)))
    }

    /// Wire an engine around an existing journal. A configured backend URL
    /// enables ranked job pools and the interaction mirror.
    pub fn with_journal(
        config: &SessionConfig,
        catalog: Arc<Catalog>,
        journal: DecisionJournal,
    ) -> Result<Self> {
        config.validate()?;

        let mut provider = PoolProvider::new(catalog, journal.clone());
        let mut recorder = DecisionRecorder::new(journal, config.settle_delay);

        match &config.backend_url {
            Some(url) => {
                let client = BackendClient::new(url.clone(), config.request_timeout)
                    .with_context(|| format!("Failed to build backend client for {url}"))?;
                let api: Arc<dyn RecommendationApi> = Arc::new(client);
                provider = provider.with_ranking(api.clone());
                recorder = recorder.with_mirror(api);
                info!("Using recommendation backend at {}", url);
            }
            None => info!("No backend configured, serving catalog pools only"),
        }

        Ok(Self::new(provider, recorder, config.window_size))
    }

    /// A fresh, unloaded session for this actor and category
    pub fn session(&self, actor_id: impl Into<ActorId>, category: Category) -> SwipeSession {
        SwipeSession::new(
            actor_id,
            category,
            self.provider.clone(),
            self.recorder.clone(),
            self.window_size,
        )
    }

    pub fn provider(&self) -> &PoolProvider {
        &self.provider
    }

    pub fn journal(&self) -> &DecisionJournal {
        self.provider.journal()
    }
}
