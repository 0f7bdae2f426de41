//! In-process storage implementing both repository contracts.
//! Reproduces the storage-side rules the core relies on: the feature -> model foreign key,
//! cascade delete of a model's features, and insertion-order listing.

use super::{SmartFeatureRepository, SmartModelRepository};
use crate::domain::{value, ModelType, SmartFeature, SmartFeatureUpdate, SmartModel, SmartModelUpdate, StructuredMap};
use crate::error::RepositoryError;
use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    models: Vec<SmartModel>,
    features: Vec<SmartFeature>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model_repository(&self) -> MemorySmartModelRepository {
        MemorySmartModelRepository { store: self.clone() }
    }

    pub fn feature_repository(&self) -> MemorySmartFeatureRepository {
        MemorySmartFeatureRepository { store: self.clone() }
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Same check the JSONB column imposes.
fn ensure_storable(map: &StructuredMap, field: &str) -> Result<(), RepositoryError> {
    value::map_to_json(map, field)?;
    Ok(())
}

#[derive(Clone)]
pub struct MemorySmartModelRepository {
    store: MemoryStore,
}

#[async_trait]
impl SmartModelRepository for MemorySmartModelRepository {
    async fn create(&self, model: &SmartModel) -> Result<SmartModel, RepositoryError> {
        ensure_storable(&model.metadata, "metadata")?;
        let mut tables = self.store.write();
        if tables.models.iter().any(|m| m.id == model.id) {
            return Err(RepositoryError::Constraint(format!(
                "duplicate key value violates unique constraint on smart_models: {}",
                model.id
            )));
        }
        tables.models.push(model.clone());
        Ok(model.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<SmartModel, RepositoryError> {
        self.store
            .read()
            .models
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound {
                entity: "smart model",
                id,
            })
    }

    async fn get_with_type(&self, model_type: ModelType) -> Result<Vec<SmartModel>, RepositoryError> {
        Ok(self
            .store
            .read()
            .models
            .iter()
            .filter(|m| m.model_type == model_type)
            .cloned()
            .collect())
    }

    async fn get_all(&self) -> Result<Vec<SmartModel>, RepositoryError> {
        Ok(self.store.read().models.clone())
    }

    async fn update(&self, update: &SmartModelUpdate) -> Result<SmartModel, RepositoryError> {
        ensure_storable(&update.metadata, "metadata")?;
        let mut tables = self.store.write();
        let slot = tables
            .models
            .iter_mut()
            .find(|m| m.id == update.id)
            .ok_or(RepositoryError::NotFound {
                entity: "smart model",
                id: update.id,
            })?;
        *slot = update.apply_to(slot);
        Ok(slot.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut tables = self.store.write();
        tables.models.retain(|m| m.id != id);
        tables.features.retain(|f| f.model_id != id);
        Ok(())
    }
}

#[derive(Clone)]
pub struct MemorySmartFeatureRepository {
    store: MemoryStore,
}

#[async_trait]
impl SmartFeatureRepository for MemorySmartFeatureRepository {
    async fn create(&self, feature: &SmartFeature) -> Result<SmartFeature, RepositoryError> {
        ensure_storable(&feature.parameters, "parameters")?;
        let mut tables = self.store.write();
        if !tables.models.iter().any(|m| m.id == feature.model_id) {
            return Err(RepositoryError::Constraint(format!(
                "insert on smart_features violates foreign key: model {} does not exist",
                feature.model_id
            )));
        }
        if tables.features.iter().any(|f| f.id == feature.id) {
            return Err(RepositoryError::Constraint(format!(
                "duplicate key value violates unique constraint on smart_features: {}",
                feature.id
            )));
        }
        tables.features.push(feature.clone());
        Ok(feature.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<SmartFeature, RepositoryError> {
        self.store
            .read()
            .features
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound {
                entity: "smart feature",
                id,
            })
    }

    async fn get_with_model_id(&self, model_id: Uuid) -> Result<Vec<SmartFeature>, RepositoryError> {
        Ok(self
            .store
            .read()
            .features
            .iter()
            .filter(|f| f.model_id == model_id)
            .cloned()
            .collect())
    }

    async fn get_all(&self) -> Result<Vec<SmartFeature>, RepositoryError> {
        Ok(self.store.read().features.clone())
    }

    async fn update(&self, update: &SmartFeatureUpdate) -> Result<SmartFeature, RepositoryError> {
        ensure_storable(&update.parameters, "parameters")?;
        let mut tables = self.store.write();
        let slot = tables
            .features
            .iter_mut()
            .find(|f| f.id == update.id)
            .ok_or(RepositoryError::NotFound {
                entity: "smart feature",
                id: update.id,
            })?;
        *slot = update.apply_to(slot);
        Ok(slot.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.store.write().features.retain(|f| f.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{self, ModelCategory, Protocol, StructuredValue};

    fn model(model_type: ModelType) -> SmartModel {
        let now = domain::now();
        SmartModel {
            id: Uuid::new_v4(),
            name: "Thermostat".into(),
            description: "desc".into(),
            model_type,
            category: ModelCategory::Weather,
            manufacturer: None,
            model_number: None,
            metadata: StructuredMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn feature(model_id: Uuid) -> SmartFeature {
        let now = domain::now();
        SmartFeature {
            id: Uuid::new_v4(),
            model_id,
            name: "SetTemp".into(),
            description: "desc".into(),
            protocol: Protocol::Rest,
            interface_path: "/set".into(),
            parameters: StructuredMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn feature_without_model_violates_foreign_key() {
        let store = MemoryStore::new();
        let err = store
            .feature_repository()
            .create(&feature(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Constraint(_)));
    }

    #[tokio::test]
    async fn deleting_model_cascades_to_features() {
        let store = MemoryStore::new();
        let models = store.model_repository();
        let features = store.feature_repository();
        let m = models.create(&model(ModelType::Device)).await.unwrap();
        let f = features.create(&feature(m.id)).await.unwrap();

        models.delete(m.id).await.unwrap();
        assert!(features.get_with_model_id(m.id).await.unwrap().is_empty());
        assert!(matches!(
            features.get_by_id(f.id).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn update_keeps_identity_and_creation_time() {
        let store = MemoryStore::new();
        let models = store.model_repository();
        let m = models.create(&model(ModelType::Device)).await.unwrap();
        let update = SmartModelUpdate {
            id: m.id,
            name: "Thermostat 2".into(),
            description: "new".into(),
            model_type: ModelType::Service,
            category: ModelCategory::Camera,
            manufacturer: Some("Acme".into()),
            model_number: None,
            metadata: StructuredMap::new(),
            updated_at: m.updated_at + chrono::Duration::seconds(5),
        };
        let updated = models.update(&update).await.unwrap();
        assert_eq!(updated.id, m.id);
        assert_eq!(updated.created_at, m.created_at);
        assert_eq!(updated.name, "Thermostat 2");
        assert_eq!(models.get_by_id(m.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn get_with_type_filters() {
        let store = MemoryStore::new();
        let models = store.model_repository();
        models.create(&model(ModelType::Device)).await.unwrap();
        let service = models.create(&model(ModelType::Service)).await.unwrap();
        let found = models.get_with_type(ModelType::Service).await.unwrap();
        assert_eq!(found, vec![service]);
    }

    #[tokio::test]
    async fn unstorable_parameters_are_rejected() {
        let store = MemoryStore::new();
        let m = store.model_repository().create(&model(ModelType::Device)).await.unwrap();
        let mut f = feature(m.id);
        f.parameters.insert("gain".into(), StructuredValue::Float(f64::NAN));
        let err = store.feature_repository().create(&f).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Encode(_)));
    }

    #[tokio::test]
    async fn delete_of_absent_id_is_ok() {
        let store = MemoryStore::new();
        assert!(store.model_repository().delete(Uuid::new_v4()).await.is_ok());
        assert!(store.feature_repository().delete(Uuid::new_v4()).await.is_ok());
    }
}
