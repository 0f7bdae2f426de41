//! PostgreSQL repository for `smart_features`.

use super::{decode_map, encode_map, SmartFeatureRepository};
use crate::domain::{SmartFeature, SmartFeatureUpdate};
use crate::error::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

const ENTITY: &str = "smart feature";

const INSERT: &str = r#"
    INSERT INTO smart_features (id, model_id, name, description, protocol, interface_path, parameters, created_at, updated_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
    RETURNING id, model_id, name, description, protocol, interface_path, parameters, created_at, updated_at
"#;

const SELECT_BY_ID: &str = r#"
    SELECT id, model_id, name, description, protocol, interface_path, parameters, created_at, updated_at
    FROM smart_features
    WHERE id = $1
"#;

const SELECT_BY_MODEL: &str = r#"
    SELECT id, model_id, name, description, protocol, interface_path, parameters, created_at, updated_at
    FROM smart_features
    WHERE model_id = $1
    ORDER BY created_at, id
"#;

const SELECT_ALL: &str = r#"
    SELECT id, model_id, name, description, protocol, interface_path, parameters, created_at, updated_at
    FROM smart_features
    ORDER BY created_at, id
"#;

const UPDATE: &str = r#"
    UPDATE smart_features
    SET name = $2, description = $3, protocol = $4, interface_path = $5, parameters = $6, updated_at = $7
    WHERE id = $1
    RETURNING id, model_id, name, description, protocol, interface_path, parameters, created_at, updated_at
"#;

const DELETE: &str = "DELETE FROM smart_features WHERE id = $1";

#[derive(sqlx::FromRow)]
struct SmartFeatureRow {
    id: Uuid,
    model_id: Uuid,
    name: String,
    description: String,
    protocol: String,
    interface_path: String,
    parameters: Option<Json<Value>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SmartFeatureRow> for SmartFeature {
    type Error = RepositoryError;

    fn try_from(row: SmartFeatureRow) -> Result<Self, Self::Error> {
        Ok(SmartFeature {
            id: row.id,
            model_id: row.model_id,
            name: row.name,
            description: row.description,
            protocol: row.protocol.parse()?,
            interface_path: row.interface_path,
            parameters: decode_map(row.parameters, "parameters")?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone)]
pub struct PgSmartFeatureRepository {
    pool: PgPool,
}

impl PgSmartFeatureRepository {
    pub fn new(pool: PgPool) -> Self {
        PgSmartFeatureRepository { pool }
    }
}

#[async_trait]
impl SmartFeatureRepository for PgSmartFeatureRepository {
    async fn create(&self, feature: &SmartFeature) -> Result<SmartFeature, RepositoryError> {
        tracing::debug!(sql = %INSERT, id = %feature.id, model_id = %feature.model_id, "query");
        let row = sqlx::query_as::<_, SmartFeatureRow>(INSERT)
            .bind(feature.id)
            .bind(feature.model_id)
            .bind(&feature.name)
            .bind(&feature.description)
            .bind(feature.protocol.as_str())
            .bind(&feature.interface_path)
            .bind(encode_map(&feature.parameters, "parameters")?)
            .bind(feature.created_at)
            .bind(feature.updated_at)
            .fetch_one(&self.pool)
            .await?;
        row.try_into()
    }

    async fn get_by_id(&self, id: Uuid) -> Result<SmartFeature, RepositoryError> {
        tracing::debug!(sql = %SELECT_BY_ID, id = %id, "query");
        let row = sqlx::query_as::<_, SmartFeatureRow>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound { entity: ENTITY, id })?;
        row.try_into()
    }

    async fn get_with_model_id(&self, model_id: Uuid) -> Result<Vec<SmartFeature>, RepositoryError> {
        tracing::debug!(sql = %SELECT_BY_MODEL, model_id = %model_id, "query");
        let rows = sqlx::query_as::<_, SmartFeatureRow>(SELECT_BY_MODEL)
            .bind(model_id)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(SmartFeature::try_from).collect()
    }

    async fn get_all(&self) -> Result<Vec<SmartFeature>, RepositoryError> {
        tracing::debug!(sql = %SELECT_ALL, "query");
        let rows = sqlx::query_as::<_, SmartFeatureRow>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(SmartFeature::try_from).collect()
    }

    async fn update(&self, update: &SmartFeatureUpdate) -> Result<SmartFeature, RepositoryError> {
        tracing::debug!(sql = %UPDATE, id = %update.id, "query");
        let row = sqlx::query_as::<_, SmartFeatureRow>(UPDATE)
            .bind(update.id)
            .bind(&update.name)
            .bind(&update.description)
            .bind(update.protocol.as_str())
            .bind(&update.interface_path)
            .bind(encode_map(&update.parameters, "parameters")?)
            .bind(update.updated_at)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound {
                entity: ENTITY,
                id: update.id,
            })?;
        row.try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        tracing::debug!(sql = %DELETE, id = %id, "query");
        let result = sqlx::query(DELETE).bind(id).execute(&self.pool).await?;
        tracing::debug!(rows_affected = result.rows_affected(), "delete");
        Ok(())
    }
}
