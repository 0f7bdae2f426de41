//! Typed errors per layer and the caller-facing RPC status mapping.

use crate::domain::{UnknownVariant, UnrepresentableValue};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Storage-layer failure. Propagated unchanged through services; classified only by handlers.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("stored row is invalid: {0}")]
    Corrupt(String),
    #[error("value cannot be stored: {0}")]
    Encode(#[from] UnrepresentableValue),
    #[error("database: {0}")]
    Db(sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = e {
            if db.is_foreign_key_violation() || db.is_check_violation() || db.is_unique_violation() {
                return RepositoryError::Constraint(db.message().to_string());
            }
        }
        RepositoryError::Db(e)
    }
}

impl From<UnknownVariant> for RepositoryError {
    fn from(e: UnknownVariant) -> Self {
        RepositoryError::Corrupt(e.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Every rule an input broke, not just the first.
#[derive(Error, Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            violations: vec![FieldViolation {
                field: field.into(),
                message: message.into(),
            }],
        }
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("{} {}", v.field, v.message))
            .collect();
        write!(f, "validation failed: {}", parts.join("; "))
    }
}

/// Wire <-> domain conversion failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("invalid request: {0} is required")]
    MissingInput(&'static str),
    #[error("invalid {field}: '{value}' is not a valid UUID")]
    InvalidId { field: &'static str, value: String },
    #[error("unknown {field} value {value}")]
    UnknownEnum { field: &'static str, value: i32 },
    #[error("{0} is not representable as a structured value")]
    Unrepresentable(#[from] UnrepresentableValue),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Code {
    InvalidArgument,
    NotFound,
    Internal,
    Unavailable,
}

impl Code {
    pub fn http_status(self) -> StatusCode {
        match self {
            Code::InvalidArgument => StatusCode::BAD_REQUEST,
            Code::NotFound => StatusCode::NOT_FOUND,
            Code::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Code::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Caller-facing RPC error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code:?}: {message}")]
pub struct Status {
    pub code: Code,
    pub message: String,
}

impl Status {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Status {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Status::new(Code::InvalidArgument, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Status::new(Code::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Status::new(Code::Internal, message)
    }
}

impl From<ValidationError> for Status {
    fn from(e: ValidationError) -> Self {
        Status::invalid_argument(e.to_string())
    }
}

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: Code,
    pub message: String,
}

impl IntoResponse for Status {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.code.http_status(), Json(body)).into_response()
    }
}
