//! `smart_model.v1.SmartModelService` handler.

use super::{request_status, response_status, storage_status};
use crate::error::Status;
use crate::mapper::SmartModelMapper;
use crate::service::{RequestValidator, SmartModelService};
use crate::wire::smart_model as pb;
use std::sync::Arc;

#[derive(Clone)]
pub struct SmartModelHandler {
    service: SmartModelService,
    mapper: SmartModelMapper,
    validator: Arc<RequestValidator>,
}

impl SmartModelHandler {
    pub fn new(service: SmartModelService, mapper: SmartModelMapper, validator: Arc<RequestValidator>) -> Self {
        SmartModelHandler {
            service,
            mapper,
            validator,
        }
    }

    pub async fn create_smart_model(
        &self,
        req: pb::CreateSmartModelRequest,
    ) -> Result<pb::CreateSmartModelResponse, Status> {
        tracing::debug!("CreateSmartModel");
        let model = self.mapper.to_domain(req).map_err(request_status)?;
        self.validator.validate_model(&model)?;
        let created = self
            .service
            .create(&model)
            .await
            .map_err(|e| storage_status(e, "create smart model"))?;
        self.mapper
            .to_create_response(&created)
            .map_err(|e| response_status(e, "create smart model"))
    }

    pub async fn get_smart_model(&self, req: pb::GetSmartModelRequest) -> Result<pb::GetSmartModelResponse, Status> {
        tracing::debug!(id = %req.id, "GetSmartModel");
        let id = self.validator.parse_id("id", &req.id)?;
        let model = self
            .service
            .get_by_id(id)
            .await
            .map_err(|e| storage_status(e, "get smart model"))?;
        self.mapper
            .to_get_response(&model)
            .map_err(|e| response_status(e, "get smart model"))
    }

    pub async fn list_smart_models(
        &self,
        _req: pb::ListSmartModelsRequest,
    ) -> Result<pb::ListSmartModelsResponse, Status> {
        tracing::debug!("ListSmartModels");
        let models = self
            .service
            .get_all()
            .await
            .map_err(|e| storage_status(e, "list smart models"))?;
        self.mapper
            .to_list_response(&models)
            .map_err(|e| response_status(e, "list smart models"))
    }

    pub async fn list_smart_models_by_type(
        &self,
        req: pb::ListSmartModelsByTypeRequest,
    ) -> Result<pb::ListSmartModelsResponse, Status> {
        tracing::debug!(r#type = req.r#type, "ListSmartModelsByType");
        let model_type = self.mapper.model_type_to_domain(req.r#type).map_err(request_status)?;
        let models = self
            .service
            .get_with_type(model_type)
            .await
            .map_err(|e| storage_status(e, "list smart models"))?;
        self.mapper
            .to_list_response(&models)
            .map_err(|e| response_status(e, "list smart models"))
    }

    pub async fn update_smart_model(
        &self,
        req: pb::UpdateSmartModelRequest,
    ) -> Result<pb::UpdateSmartModelResponse, Status> {
        tracing::debug!("UpdateSmartModel");
        let update = self.mapper.to_domain_update(req).map_err(request_status)?;
        self.validator.validate_model_update(&update)?;
        let updated = self
            .service
            .update(&update)
            .await
            .map_err(|e| storage_status(e, "update smart model"))?;
        self.mapper
            .to_update_response(&updated)
            .map_err(|e| response_status(e, "update smart model"))
    }

    pub async fn delete_smart_model(
        &self,
        req: pb::DeleteSmartModelRequest,
    ) -> Result<pb::DeleteSmartModelResponse, Status> {
        tracing::debug!(id = %req.id, "DeleteSmartModel");
        let id = self.validator.parse_id("id", &req.id)?;
        self.service
            .delete(id)
            .await
            .map_err(|e| storage_status(e, "delete smart model"))?;
        Ok(pb::DeleteSmartModelResponse {})
    }
}
