//! Smart model service.

use crate::domain::{ModelType, SmartModel, SmartModelUpdate};
use crate::error::RepositoryError;
use crate::repository::SmartModelRepository;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct SmartModelService {
    repo: Arc<dyn SmartModelRepository>,
}

impl SmartModelService {
    pub fn new(repo: Arc<dyn SmartModelRepository>) -> Self {
        SmartModelService { repo }
    }

    pub async fn create(&self, model: &SmartModel) -> Result<SmartModel, RepositoryError> {
        tracing::debug!(id = %model.id, name = %model.name, "create smart model");
        self.repo.create(model).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<SmartModel, RepositoryError> {
        tracing::debug!(id = %id, "get smart model by id");
        self.repo.get_by_id(id).await
    }

    pub async fn get_with_type(&self, model_type: ModelType) -> Result<Vec<SmartModel>, RepositoryError> {
        tracing::debug!(model_type = %model_type, "get smart models by type");
        self.repo.get_with_type(model_type).await
    }

    pub async fn get_all(&self) -> Result<Vec<SmartModel>, RepositoryError> {
        tracing::debug!("get all smart models");
        self.repo.get_all().await
    }

    pub async fn update(&self, update: &SmartModelUpdate) -> Result<SmartModel, RepositoryError> {
        tracing::debug!(id = %update.id, "update smart model");
        self.repo.update(update).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        tracing::debug!(id = %id, "delete smart model");
        self.repo.delete(id).await
    }
}
