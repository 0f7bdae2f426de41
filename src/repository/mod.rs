//! Repository contracts per entity and their PostgreSQL / in-memory implementations.
//! Every method is a single statement; nothing spans more than one call.

pub mod memory;
mod smart_feature;
mod smart_model;

pub use memory::{MemorySmartFeatureRepository, MemorySmartModelRepository, MemoryStore};
pub use smart_feature::PgSmartFeatureRepository;
pub use smart_model::PgSmartModelRepository;

use crate::domain::{
    value, ModelType, SmartFeature, SmartFeatureUpdate, SmartModel, SmartModelUpdate, StructuredMap,
};
use crate::error::RepositoryError;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use uuid::Uuid;

#[async_trait]
pub trait SmartModelRepository: Send + Sync {
    /// Insert a fully populated model; returns the row as persisted.
    async fn create(&self, model: &SmartModel) -> Result<SmartModel, RepositoryError>;
    async fn get_by_id(&self, id: Uuid) -> Result<SmartModel, RepositoryError>;
    async fn get_with_type(&self, model_type: ModelType) -> Result<Vec<SmartModel>, RepositoryError>;
    async fn get_all(&self) -> Result<Vec<SmartModel>, RepositoryError>;
    /// Replace every mutable field; `NotFound` when no row has the id.
    async fn update(&self, update: &SmartModelUpdate) -> Result<SmartModel, RepositoryError>;
    /// Hard delete. Deleting an absent id is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait SmartFeatureRepository: Send + Sync {
    async fn create(&self, feature: &SmartFeature) -> Result<SmartFeature, RepositoryError>;
    async fn get_by_id(&self, id: Uuid) -> Result<SmartFeature, RepositoryError>;
    async fn get_with_model_id(&self, model_id: Uuid) -> Result<Vec<SmartFeature>, RepositoryError>;
    async fn get_all(&self) -> Result<Vec<SmartFeature>, RepositoryError>;
    async fn update(&self, update: &SmartFeatureUpdate) -> Result<SmartFeature, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

/// Empty maps are stored as NULL.
fn encode_map(map: &StructuredMap, field: &str) -> Result<Option<Json<Value>>, RepositoryError> {
    if map.is_empty() {
        return Ok(None);
    }
    let obj = value::map_to_json(map, field)?;
    Ok(Some(Json(Value::Object(obj))))
}

fn decode_map(stored: Option<Json<Value>>, field: &str) -> Result<StructuredMap, RepositoryError> {
    match stored.map(|j| j.0) {
        None | Some(Value::Null) => Ok(StructuredMap::new()),
        Some(Value::Object(obj)) => Ok(value::map_from_json(obj)),
        Some(other) => Err(RepositoryError::Corrupt(format!(
            "{} must be a JSON object, got {}",
            field, other
        ))),
    }
}
