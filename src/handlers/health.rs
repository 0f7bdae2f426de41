//! Health check backed by a single storage reachability probe.

use crate::wire::health::{HealthCheckRequest, HealthCheckResponse, ServingStatus};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> Result<(), String>;
}

#[async_trait]
impl HealthProbe for PgPool {
    async fn ping(&self) -> Result<(), String> {
        sqlx::query("SELECT 1")
            .execute(self)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

#[derive(Clone)]
pub struct HealthHandler {
    probe: Arc<dyn HealthProbe>,
    service_name: String,
}

impl HealthHandler {
    pub fn new(probe: Arc<dyn HealthProbe>, service_name: impl Into<String>) -> Self {
        HealthHandler {
            probe,
            service_name: service_name.into(),
        }
    }

    /// Empty `service` means the whole server. Never fails; an unreachable store is `NOT_SERVING`.
    pub async fn check(&self, req: HealthCheckRequest) -> HealthCheckResponse {
        if !req.service.is_empty() && req.service != self.service_name {
            tracing::debug!(service = %req.service, "health check for unknown service");
            return HealthCheckResponse {
                status: ServingStatus::Unknown as i32,
            };
        }
        let status = match self.probe.ping().await {
            Ok(()) => ServingStatus::Serving,
            Err(e) => {
                tracing::warn!(error = %e, "storage probe failed");
                ServingStatus::NotServing
            }
        };
        HealthCheckResponse { status: status as i32 }
    }
}
