//! `POST /<package>.<Service>/<Method>` routes. Each takes the request message as a JSON body
//! and returns the response message, or a [`Status`] error body.

use crate::error::Status;
use crate::state::AppState;
use crate::wire::{health, smart_feature as feature_pb, smart_model as model_pb};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tower_http::limit::RequestBodyLimitLayer;

pub const MAX_BODY_BYTES: usize = 1024 * 1024;

type RpcResult<T> = Result<Json<T>, Status>;

/// Malformed bodies are the caller's fault, reported like any other invalid argument.
fn decode<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Status> {
    match body {
        Ok(Json(req)) => Ok(req),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "rejected request body");
            Err(Status::invalid_argument(format!(
                "invalid request body: {}",
                rejection.body_text()
            )))
        }
    }
}

async fn create_smart_model(
    State(state): State<AppState>,
    body: Result<Json<model_pb::CreateSmartModelRequest>, JsonRejection>,
) -> RpcResult<model_pb::CreateSmartModelResponse> {
    state.models.create_smart_model(decode(body)?).await.map(Json)
}

async fn get_smart_model(
    State(state): State<AppState>,
    body: Result<Json<model_pb::GetSmartModelRequest>, JsonRejection>,
) -> RpcResult<model_pb::GetSmartModelResponse> {
    state.models.get_smart_model(decode(body)?).await.map(Json)
}

async fn list_smart_models(
    State(state): State<AppState>,
    body: Result<Json<model_pb::ListSmartModelsRequest>, JsonRejection>,
) -> RpcResult<model_pb::ListSmartModelsResponse> {
    state.models.list_smart_models(decode(body)?).await.map(Json)
}

async fn list_smart_models_by_type(
    State(state): State<AppState>,
    body: Result<Json<model_pb::ListSmartModelsByTypeRequest>, JsonRejection>,
) -> RpcResult<model_pb::ListSmartModelsResponse> {
    state.models.list_smart_models_by_type(decode(body)?).await.map(Json)
}

async fn update_smart_model(
    State(state): State<AppState>,
    body: Result<Json<model_pb::UpdateSmartModelRequest>, JsonRejection>,
) -> RpcResult<model_pb::UpdateSmartModelResponse> {
    state.models.update_smart_model(decode(body)?).await.map(Json)
}

async fn delete_smart_model(
    State(state): State<AppState>,
    body: Result<Json<model_pb::DeleteSmartModelRequest>, JsonRejection>,
) -> RpcResult<model_pb::DeleteSmartModelResponse> {
    state.models.delete_smart_model(decode(body)?).await.map(Json)
}

async fn create_smart_feature(
    State(state): State<AppState>,
    body: Result<Json<feature_pb::CreateSmartFeatureRequest>, JsonRejection>,
) -> RpcResult<feature_pb::CreateSmartFeatureResponse> {
    state.features.create_smart_feature(decode(body)?).await.map(Json)
}

async fn get_smart_feature(
    State(state): State<AppState>,
    body: Result<Json<feature_pb::GetSmartFeatureRequest>, JsonRejection>,
) -> RpcResult<feature_pb::GetSmartFeatureResponse> {
    state.features.get_smart_feature(decode(body)?).await.map(Json)
}

async fn get_features_by_model_id(
    State(state): State<AppState>,
    body: Result<Json<feature_pb::GetFeaturesByModelIdRequest>, JsonRejection>,
) -> RpcResult<feature_pb::GetFeaturesByModelIdResponse> {
    state.features.get_features_by_model_id(decode(body)?).await.map(Json)
}

async fn update_smart_feature(
    State(state): State<AppState>,
    body: Result<Json<feature_pb::UpdateSmartFeatureRequest>, JsonRejection>,
) -> RpcResult<feature_pb::UpdateSmartFeatureResponse> {
    state.features.update_smart_feature(decode(body)?).await.map(Json)
}

async fn delete_smart_feature(
    State(state): State<AppState>,
    body: Result<Json<feature_pb::DeleteSmartFeatureRequest>, JsonRejection>,
) -> RpcResult<feature_pb::DeleteSmartFeatureResponse> {
    state.features.delete_smart_feature(decode(body)?).await.map(Json)
}

async fn health_check(
    State(state): State<AppState>,
    body: Result<Json<health::HealthCheckRequest>, JsonRejection>,
) -> RpcResult<health::HealthCheckResponse> {
    Ok(Json(state.health.check(decode(body)?).await))
}

pub fn rpc_routes(state: AppState) -> Router {
    Router::new()
        .route("/smart_model.v1.SmartModelService/CreateSmartModel", post(create_smart_model))
        .route("/smart_model.v1.SmartModelService/GetSmartModel", post(get_smart_model))
        .route("/smart_model.v1.SmartModelService/ListSmartModels", post(list_smart_models))
        .route(
            "/smart_model.v1.SmartModelService/ListSmartModelsByType",
            post(list_smart_models_by_type),
        )
        .route("/smart_model.v1.SmartModelService/UpdateSmartModel", post(update_smart_model))
        .route("/smart_model.v1.SmartModelService/DeleteSmartModel", post(delete_smart_model))
        .route(
            "/smart_feature.v1.SmartFeatureService/CreateSmartFeature",
            post(create_smart_feature),
        )
        .route("/smart_feature.v1.SmartFeatureService/GetSmartFeature", post(get_smart_feature))
        .route(
            "/smart_feature.v1.SmartFeatureService/GetFeaturesByModelID",
            post(get_features_by_model_id),
        )
        .route(
            "/smart_feature.v1.SmartFeatureService/UpdateSmartFeature",
            post(update_smart_feature),
        )
        .route(
            "/smart_feature.v1.SmartFeatureService/DeleteSmartFeature",
            post(delete_smart_feature),
        )
        .route("/health.v1.Health/Check", post(health_check))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Code, ErrorBody};
    use crate::mapper::EnumPolicy;
    use crate::repository::MemoryStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router() -> Router {
        rpc_routes(AppState::with_memory_store(
            MemoryStore::new(),
            EnumPolicy::Reject,
            "smart-hub",
        )
        .unwrap())
    }

    async fn call(app: Router, path: &str, body: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn malformed_json_is_invalid_argument() {
        let (status, body) = call(router(), "/smart_model.v1.SmartModelService/GetSmartModel", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ErrorBody = serde_json::from_value(body).unwrap();
        assert_eq!(err.error.code, Code::InvalidArgument);
    }

    #[tokio::test]
    async fn wrong_field_type_is_invalid_argument() {
        let (status, _) = call(
            router(),
            "/smart_model.v1.SmartModelService/ListSmartModelsByType",
            r#"{"type": "device"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_returns_the_persisted_model() {
        let req = json!({
            "model": {
                "name": "Thermostat",
                "description": "Smart thermostat",
                "type": 1,
                "category": 3,
                "metadata": {"version": "1.0"}
            }
        });
        let (status, body) = call(
            router(),
            "/smart_model.v1.SmartModelService/CreateSmartModel",
            &req.to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["model"]["name"], "Thermostat");
        assert_eq!(body["model"]["metadata"], json!({"version": "1.0"}));
        assert!(body["model"]["id"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let req = json!({"id": uuid::Uuid::new_v4().to_string()});
        let (status, body) = call(
            router(),
            "/smart_feature.v1.SmartFeatureService/GetSmartFeature",
            &req.to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn health_check_reports_serving() {
        let (status, body) = call(router(), "/health.v1.Health/Check", "{}").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], 1);
    }

    #[tokio::test]
    async fn oversized_body_is_refused() {
        let big = format!(r#"{{"id": "{}"}}"#, "a".repeat(MAX_BODY_BYTES + 1));
        let resp = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/smart_model.v1.SmartModelService/GetSmartModel")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::CONTENT_LENGTH, big.len())
                    .body(Body::from(big))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
