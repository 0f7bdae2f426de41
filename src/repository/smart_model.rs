//! PostgreSQL repository for `smart_models`.

use super::{decode_map, encode_map, SmartModelRepository};
use crate::domain::{ModelType, SmartModel, SmartModelUpdate};
use crate::error::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

const ENTITY: &str = "smart model";

const INSERT: &str = r#"
    INSERT INTO smart_models (id, name, description, type, category, manufacturer, model_number, metadata, created_at, updated_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
    RETURNING id, name, description, type, category, manufacturer, model_number, metadata, created_at, updated_at
"#;

const SELECT_BY_ID: &str = r#"
    SELECT id, name, description, type, category, manufacturer, model_number, metadata, created_at, updated_at
    FROM smart_models
    WHERE id = $1
"#;

const SELECT_BY_TYPE: &str = r#"
    SELECT id, name, description, type, category, manufacturer, model_number, metadata, created_at, updated_at
    FROM smart_models
    WHERE type = $1
    ORDER BY created_at, id
"#;

const SELECT_ALL: &str = r#"
    SELECT id, name, description, type, category, manufacturer, model_number, metadata, created_at, updated_at
    FROM smart_models
    ORDER BY created_at, id
"#;

const UPDATE: &str = r#"
    UPDATE smart_models
    SET name = $2, description = $3, type = $4, category = $5, manufacturer = $6, model_number = $7, metadata = $8, updated_at = $9
    WHERE id = $1
    RETURNING id, name, description, type, category, manufacturer, model_number, metadata, created_at, updated_at
"#;

const DELETE: &str = "DELETE FROM smart_models WHERE id = $1";

#[derive(sqlx::FromRow)]
struct SmartModelRow {
    id: Uuid,
    name: String,
    description: String,
    #[sqlx(rename = "type")]
    model_type: String,
    category: String,
    manufacturer: Option<String>,
    model_number: Option<String>,
    metadata: Option<Json<Value>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SmartModelRow> for SmartModel {
    type Error = RepositoryError;

    fn try_from(row: SmartModelRow) -> Result<Self, Self::Error> {
        Ok(SmartModel {
            id: row.id,
            name: row.name,
            description: row.description,
            model_type: row.model_type.parse()?,
            category: row.category.parse()?,
            manufacturer: row.manufacturer,
            model_number: row.model_number,
            metadata: decode_map(row.metadata, "metadata")?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone)]
pub struct PgSmartModelRepository {
    pool: PgPool,
}

impl PgSmartModelRepository {
    pub fn new(pool: PgPool) -> Self {
        PgSmartModelRepository { pool }
    }

    async fn fetch_many(&self, sql: &str, model_type: Option<ModelType>) -> Result<Vec<SmartModel>, RepositoryError> {
        tracing::debug!(sql = %sql, model_type = ?model_type, "query");
        let mut query = sqlx::query_as::<_, SmartModelRow>(sql);
        if let Some(t) = model_type {
            query = query.bind(t.as_str());
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(SmartModel::try_from).collect()
    }
}

#[async_trait]
impl SmartModelRepository for PgSmartModelRepository {
    async fn create(&self, model: &SmartModel) -> Result<SmartModel, RepositoryError> {
        tracing::debug!(sql = %INSERT, id = %model.id, "query");
        let row = sqlx::query_as::<_, SmartModelRow>(INSERT)
            .bind(model.id)
            .bind(&model.name)
            .bind(&model.description)
            .bind(model.model_type.as_str())
            .bind(model.category.as_str())
            .bind(model.manufacturer.as_deref())
            .bind(model.model_number.as_deref())
            .bind(encode_map(&model.metadata, "metadata")?)
            .bind(model.created_at)
            .bind(model.updated_at)
            .fetch_one(&self.pool)
            .await?;
        row.try_into()
    }

    async fn get_by_id(&self, id: Uuid) -> Result<SmartModel, RepositoryError> {
        tracing::debug!(sql = %SELECT_BY_ID, id = %id, "query");
        let row = sqlx::query_as::<_, SmartModelRow>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound { entity: ENTITY, id })?;
        row.try_into()
    }

    async fn get_with_type(&self, model_type: ModelType) -> Result<Vec<SmartModel>, RepositoryError> {
        self.fetch_many(SELECT_BY_TYPE, Some(model_type)).await
    }

    async fn get_all(&self) -> Result<Vec<SmartModel>, RepositoryError> {
        self.fetch_many(SELECT_ALL, None).await
    }

    async fn update(&self, update: &SmartModelUpdate) -> Result<SmartModel, RepositoryError> {
        tracing::debug!(sql = %UPDATE, id = %update.id, "query");
        let row = sqlx::query_as::<_, SmartModelRow>(UPDATE)
            .bind(update.id)
            .bind(&update.name)
            .bind(&update.description)
            .bind(update.model_type.as_str())
            .bind(update.category.as_str())
            .bind(update.manufacturer.as_deref())
            .bind(update.model_number.as_deref())
            .bind(encode_map(&update.metadata, "metadata")?)
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
