//! Smart feature service.

use crate::domain::{SmartFeature, SmartFeatureUpdate};
use crate::error::RepositoryError;
use crate::repository::SmartFeatureRepository;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct SmartFeatureService {
    repo: Arc<dyn SmartFeatureRepository>,
}

impl SmartFeatureService {
    pub fn new(repo: Arc<dyn SmartFeatureRepository>) -> Self {
        SmartFeatureService { repo }
    }

    pub async fn create(&self, feature: &SmartFeature) -> Result<SmartFeature, RepositoryError> {
        tracing::debug!(id = %feature.id, model_id = %feature.model_id, "create smart feature");
        self.repo.create(feature).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<SmartFeature, RepositoryError> {
        tracing::debug!(id = %id, "get smart feature by id");
        self.repo.get_by_id(id).await
    }

    pub async fn get_with_model_id(&self, model_id: Uuid) -> Result<Vec<SmartFeature>, RepositoryError> {
        tracing::debug!(model_id = %model_id, "get smart features by model id");
        self.repo.get_with_model_id(model_id).await
    }

    pub async fn get_all(&self) -> Result<Vec<SmartFeature>, RepositoryError> {
        tracing::debug!("get all smart features");
        self.repo.get_all().await
    }

    pub async fn update(&self, update: &SmartFeatureUpdate) -> Result<SmartFeature, RepositoryError> {
        tracing::debug!(id = %update.id, "update smart feature");
        self.repo.update(update).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        tracing::debug!(id = %id, "delete smart feature");
        self.repo.delete(id).await
    }
}
