//! Request handlers: decode, validate, call the service, encode, and classify every failure
//! into a caller-facing [`Status`].

pub mod health;
mod smart_feature;
mod smart_model;

pub use health::{HealthHandler, HealthProbe};
pub use smart_feature::SmartFeatureHandler;
pub use smart_model::SmartModelHandler;

use crate::error::{MapError, RepositoryError, Status};

/// `NotFound` keeps its message; anything else is logged and surfaced as a generic internal error.
fn storage_status(err: RepositoryError, action: &'static str) -> Status {
    match err {
        RepositoryError::NotFound { .. } => Status::not_found(err.to_string()),
        other => {
            tracing::error!(error = %other, "failed to {}", action);
            Status::internal(format!("failed to {}", action))
        }
    }
}

fn request_status(err: MapError) -> Status {
    Status::invalid_argument(err.to_string())
}

/// A stored entity that cannot be put on the wire is our fault, not the caller's.
fn response_status(err: MapError, action: &'static str) -> Status {
    tracing::error!(error = %err, "failed to encode response for {}", action);
    Status::internal(format!("failed to {}", action))
}

#[cfg(test)]
pub(crate) mod testing {
    //! Repository doubles that fail every call, for classification tests.

    use crate::domain::{ModelType, SmartFeature, SmartFeatureUpdate, SmartModel, SmartModelUpdate};
    use crate::error::RepositoryError;
    use crate::repository::{SmartFeatureRepository, SmartModelRepository};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    #[derive(Default)]
    pub struct BrokenStore {
        pub calls: AtomicUsize,
    }

    impl BrokenStore {
        fn fail<T>(&self) -> Result<T, RepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(RepositoryError::Db(sqlx::Error::PoolTimedOut))
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SmartModelRepository for BrokenStore {
        async fn create(&self, _: &SmartModel) -> Result<SmartModel, RepositoryError> {
            self.fail()
        }
        async fn get_by_id(&self, _: Uuid) -> Result<SmartModel, RepositoryError> {
            self.fail()
        }
        async fn get_with_type(&self, _: ModelType) -> Result<Vec<SmartModel>, RepositoryError> {
            self.fail()
        }
        async fn get_all(&self) -> Result<Vec<SmartModel>, RepositoryError> {
            self.fail()
        }
        async fn update(&self, _: &SmartModelUpdate) -> Result<SmartModel, RepositoryError> {
            self.fail()
        }
        async fn delete(&self, _: Uuid) -> Result<(), RepositoryError> {
            self.fail()
        }
    }

    #[async_trait]
    impl SmartFeatureRepository for BrokenStore {
        async fn create(&self, _: &SmartFeature) -> Result<SmartFeature, RepositoryError> {
            self.fail()
        }
        async fn get_by_id(&self, _: Uuid) -> Result<SmartFeature, RepositoryError> {
            self.fail()
        }
        async fn get_with_model_id(&self, _: Uuid) -> Result<Vec<SmartFeature>, RepositoryError> {
            self.fail()
        }
        async fn get_all(&self) -> Result<Vec<SmartFeature>, RepositoryError> {
            self.fail()
        }
        async fn update(&self, _: &SmartFeatureUpdate) -> Result<SmartFeature, RepositoryError> {
            self.fail()
        }
        async fn delete(&self, _: Uuid) -> Result<(), RepositoryError> {
            self.fail()
        }
    }
}
