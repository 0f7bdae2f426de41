//! Shared application state: one handler per RPC service, wired once at startup.

use crate::handlers::{HealthHandler, HealthProbe, SmartFeatureHandler, SmartModelHandler};
use crate::mapper::{EnumPolicy, SmartFeatureMapper, SmartModelMapper};
use crate::repository::{
    MemoryStore, PgSmartFeatureRepository, PgSmartModelRepository, SmartFeatureRepository, SmartModelRepository,
};
use crate::service::{RequestValidator, SmartFeatureService, SmartModelService};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub models: Arc<SmartModelHandler>,
    pub features: Arc<SmartFeatureHandler>,
    pub health: Arc<HealthHandler>,
}

impl AppState {
    pub fn new(
        model_repo: Arc<dyn SmartModelRepository>,
        feature_repo: Arc<dyn SmartFeatureRepository>,
        probe: Arc<dyn HealthProbe>,
        policy: EnumPolicy,
        service_name: &str,
    ) -> Result<Self, regex::Error> {
        let validator = Arc::new(RequestValidator::new()?);
        Ok(AppState {
            models: Arc::new(SmartModelHandler::new(
                SmartModelService::new(model_repo),
                SmartModelMapper::new(policy),
                validator.clone(),
            )),
            features: Arc::new(SmartFeatureHandler::new(
                SmartFeatureService::new(feature_repo),
                SmartFeatureMapper::new(policy),
                validator,
            )),
            health: Arc::new(HealthHandler::new(probe, service_name)),
        })
    }

    /// PostgreSQL-backed state; the pool handle is shared by both repositories and the probe.
    pub fn with_postgres(pool: PgPool, policy: EnumPolicy, service_name: &str) -> Result<Self, regex::Error> {
        AppState::new(
            Arc::new(PgSmartModelRepository::new(pool.clone())),
            Arc::new(PgSmartFeatureRepository::new(pool.clone())),
            Arc::new(pool),
            policy,
            service_name,
        )
    }

    pub fn with_memory_store(
        store: MemoryStore,
        policy: EnumPolicy,
        service_name: &str,
    ) -> Result<Self, regex::Error> {
        AppState::new(
            Arc::new(store.model_repository()),
            Arc::new(store.feature_repository()),
            Arc::new(store),
            policy,
            service_name,
        )
    }
}

/// In-process storage is always reachable.
#[async_trait]
impl HealthProbe for MemoryStore {
    async fn ping(&self) -> Result<(), String> {
        Ok(())
    }
}
