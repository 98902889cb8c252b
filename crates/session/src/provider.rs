//! # Pool Provider
//!
//! Produces the ordered pool for an (actor, category):
//! 1. `candidate`: the catalog, minus items the actor already decided
//! 2. `job` with a ranking backend: the remote ranked pool, de-duplicated
//! 3. `job` when the remote query fails for any reason: the same local
//!    pool as offline, so the caller always gets something to show
//!
//! Loading never fails. Degraded paths are logged at `warn`.

use std::sync::Arc;
use std::time::Instant;

use backend_client::RecommendationApi;
use catalog::{Catalog, Category, PoolItem};
use journal::DecisionJournal;
use pipeline::FilterPipeline;
use sources::{CatalogSource, DecisionContext, RankingSource, build_decision_context};
use tracing::{debug, error, info, instrument, warn};

/// Where a loaded pool came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolOrigin {
    Catalog,
    Ranked,
    /// Remote query failed; catalog pool served instead
    Fallback,
}

#[derive(Debug, Clone)]
pub struct LoadedPool {
    pub items: Vec<PoolItem>,
    pub origin: PoolOrigin,
}

pub struct PoolProvider {
    catalog_source: CatalogSource,
    ranking: Option<RankingSource>,
    journal: DecisionJournal,
    local_pipeline: FilterPipeline,
    trusted_pipeline: FilterPipeline,
}

impl PoolProvider {
    /// Offline provider: every pool comes from the catalog
    pub fn new(catalog: Arc<Catalog>, journal: DecisionJournal) -> Self {
        Self {
            catalog_source: CatalogSource::new(catalog),
            ranking: None,
            journal,
            local_pipeline: FilterPipeline::local_pool(),
            trusted_pipeline: FilterPipeline::trusted_pool(),
        }
    }

    /// Query this backend for ranked job pools and liked jobs
    pub fn with_ranking(mut self, api: Arc<dyn RecommendationApi>) -> Self {
        self.ranking = Some(RankingSource::new(api));
        self
    }

    pub fn journal(&self) -> &DecisionJournal {
        &self.journal
    }

    pub fn is_online(&self) -> bool {
        self.ranking.is_some()
    }

    /// Load the pool to present. Never fails; see the module docs for the
    /// source order.
    #[instrument(skip(self))]
    pub async fn load_pool(&self, actor_id: &str, category: Category) -> LoadedPool {
        let start_time = Instant::now();

        let loaded = match (category, &self.ranking) {
            (Category::Job, Some(ranking)) => match ranking.fetch_ranked(actor_id).await {
                Ok(items) => {
                    let context = DecisionContext::new(actor_id, category);
                    LoadedPool {
                        items: self.filtered(&self.trusted_pipeline, items, &context),
                        origin: PoolOrigin::Ranked,
                    }
                }
                Err(failure) => {
                    warn!(
                        "Ranked pool unavailable for actor {}: {}. Falling back to catalog",
                        actor_id, failure
                    );
                    LoadedPool {
                        items: self.fallback_pool(actor_id, category),
                        origin: PoolOrigin::Fallback,
                    }
                }
            },
            _ => LoadedPool {
                items: self.fallback_pool(actor_id, category),
                origin: PoolOrigin::Catalog,
            },
        };

        info!(
            "Loaded {} {} items for actor {} from {:?} in {:?}",
            loaded.items.len(),
            category,
            actor_id,
            loaded.origin,
            start_time.elapsed()
        );
        loaded
    }

    /// Catalog items of `category` the actor has not decided on, in catalog
    /// order.
    pub fn fallback_pool(&self, actor_id: &str, category: Category) -> Vec<PoolItem> {
        let context = build_decision_context(&self.journal, actor_id, category);
        debug!(
            "Excluding {} decided items for actor {}",
            context.decided_count(),
            actor_id
        );
        let pool = self.catalog_source.get_pool(category);
        self.filtered(&self.local_pipeline, pool, &context)
    }

    /// Items the actor accepted. Jobs come from the backend's liked list
    /// when it answers, otherwise from the journal's accepted ids resolved
    /// against the catalog, in journal order.
    #[instrument(skip(self))]
    pub async fn shortlist(&self, actor_id: &str, category: Category) -> Vec<PoolItem> {
        if let (Category::Job, Some(ranking)) = (category, &self.ranking) {
            match ranking.fetch_liked(actor_id).await {
                Ok(items) => {
                    let context = DecisionContext::new(actor_id, category);
                    return self.filtered(&self.trusted_pipeline, items, &context);
                }
                Err(failure) => {
                    warn!(
                        "Liked jobs unavailable for actor {}: {}. Using local journal",
                        actor_id, failure
                    );
                }
            }
        }

        let accepted = self.journal.list_accepted(actor_id, category);
        self.catalog_source.lookup(category, &accepted)
    }

    fn filtered(
        &self,
        pipeline: &FilterPipeline,
        items: Vec<PoolItem>,
        context: &DecisionContext,
    ) -> Vec<PoolItem> {
        match pipeline.apply(items, context) {
            Ok(pool) => pool,
            Err(e) => {
                error!("Pool filtering failed for actor {}: {}", context.actor_id, e);
                Vec::new()
            }
        }
    }
}
