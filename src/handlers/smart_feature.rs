//! `smart_feature.v1.SmartFeatureService` handler.

use super::{request_status, response_status, storage_status};
use crate::error::Status;
use crate::mapper::SmartFeatureMapper;
use crate::service::{RequestValidator, SmartFeatureService};
use crate::wire::smart_feature as pb;
use std::sync::Arc;

#[derive(Clone)]
pub struct SmartFeatureHandler {
    service: SmartFeatureService,
    mapper: SmartFeatureMapper,
    validator: Arc<RequestValidator>,
}

impl SmartFeatureHandler {
    pub fn new(service: SmartFeatureService, mapper: SmartFeatureMapper, validator: Arc<RequestValidator>) -> Self {
        SmartFeatureHandler {
            service,
            mapper,
            validator,
        }
    }

    /// The owning model's existence is enforced by storage; a missing owner surfaces as internal.
    pub async fn create_smart_feature(
        &self,
        req: pb::CreateSmartFeatureRequest,
    ) -> Result<pb::CreateSmartFeatureResponse, Status> {
        tracing::debug!("CreateSmartFeature");
        let feature = self.mapper.to_domain(req).map_err(request_status)?;
        self.validator.validate_feature(&feature)?;
        let created = self
            .service
            .create(&feature)
            .await
            .map_err(|e| storage_status(e, "create smart feature"))?;
        self.mapper
            .to_create_response(&created)
            .map_err(|e| response_status(e, "create smart feature"))
    }

    pub async fn get_smart_feature(
        &self,
        req: pb::GetSmartFeatureRequest,
    ) -> Result<pb::GetSmartFeatureResponse, Status> {
        tracing::debug!(id = %req.id, "GetSmartFeature");
        let id = self.validator.parse_id("id", &req.id)?;
        let feature = self
            .service
            .get_by_id(id)
            .await
            .map_err(|e| storage_status(e, "get smart feature"))?;
        self.mapper
            .to_get_response(&feature)
            .map_err(|e| response_status(e, "get smart feature"))
    }

    /// An unknown model id yields an empty list.
    pub async fn get_features_by_model_id(
        &self,
        req: pb::GetFeaturesByModelIdRequest,
    ) -> Result<pb::GetFeaturesByModelIdResponse, Status> {
        tracing::debug!(model_id = %req.model_id, "GetFeaturesByModelID");
        let model_id = self.validator.parse_id("model_id", &req.model_id)?;
        let features = self
            .service
            .get_with_model_id(model_id)
            .await
            .map_err(|e| storage_status(e, "list smart features"))?;
        self.mapper
            .to_list_response(&features)
            .map_err(|e| response_status(e, "list smart features"))
    }

    pub async fn update_smart_feature(
        &self,
        req: pb::UpdateSmartFeatureRequest,
    ) -> Result<pb::UpdateSmartFeatureResponse, Status> {
        tracing::debug!("UpdateSmartFeature");
        let update = self.mapper.to_domain_update(req).map_err(request_status)?;
        self.validator.validate_feature_update(&update)?;
        let updated = self
            .service
            .update(&update)
            .await
            .map_err(|e| storage_status(e, "update smart feature"))?;
        self.mapper
            .to_update_response(&updated)
            .map_err(|e| response_status(e, "update smart feature"))
    }

    pub async fn delete_smart_feature(
        &self,
        req: pb::DeleteSmartFeatureRequest,
    ) -> Result<pb::DeleteSmartFeatureResponse, Status> {
        tracing::debug!(id = %req.id, "DeleteSmartFeature");
        let id = self.validator.parse_id("id", &req.id)?;
        self.service
            .delete(id)
            .await
            .map_err(|e| storage_status(e, "delete smart feature"))?;
        Ok(pb::DeleteSmartFeatureResponse {})
    }
}
