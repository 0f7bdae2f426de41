//! Storage bootstrap: create the target database when missing, then idempotent DDL.

use crate::config::DatabaseConfig;
use crate::domain::{ModelCategory, ModelType, Protocol};
use sqlx::{ConnectOptions, PgPool};

/// Connects to the `postgres` maintenance database on the same server and creates
/// `config.database` if it does not exist yet.
pub async fn ensure_database_exists(config: &DatabaseConfig) -> Result<(), sqlx::Error> {
    if config.database.is_empty() || config.database == "postgres" {
        return Ok(());
    }
    let mut conn = config.admin_connect_options().connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&config.database)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %config.database, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&config.database)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn in_list(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", v.replace('\'', "''")))
        .collect::<Vec<_>>()
        .join(", ")
}

fn statements() -> Vec<String> {
    let types: Vec<&str> = ModelType::ALL.iter().map(|t| t.as_str()).collect();
    let categories: Vec<&str> = ModelCategory::ALL.iter().map(|c| c.as_str()).collect();
    let protocols: Vec<&str> = Protocol::ALL.iter().map(|p| p.as_str()).collect();
    vec![
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS smart_models (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                type TEXT NOT NULL CHECK (type IN ({})),
                category TEXT NOT NULL CHECK (category IN ({})),
                manufacturer TEXT,
                model_number TEXT,
                metadata JSONB,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
            in_list(&types),
            in_list(&categories)
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS smart_features (
                id UUID PRIMARY KEY,
                model_id UUID NOT NULL REFERENCES smart_models(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                protocol TEXT NOT NULL CHECK (protocol IN ({})),
                interface_path TEXT NOT NULL,
                parameters JSONB,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
            in_list(&protocols)
        ),
        "CREATE INDEX IF NOT EXISTS idx_smart_features_model_id ON smart_features (model_id)".to_string(),
    ]
}

/// Safe to run on every start.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    for sql in statements() {
        tracing::debug!(sql = %sql.trim(), "migration");
        sqlx::query(&sql).execute(pool).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_constraints_list_every_domain_variant() {
        let ddl = statements().join("\n");
        assert!(ddl.contains("CHECK (type IN ('device', 'service'))"));
        assert!(ddl.contains("'wearable', 'camera', 'weather', 'entertainment'"));
        assert!(ddl.contains("CHECK (protocol IN ('rest', 'grpc', 'mqtt', 'websocket'))"));
        assert!(ddl.contains("ON DELETE CASCADE"));
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("smart_hub"), "\"smart_hub\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
