//! Wire <-> domain conversion per entity.

mod smart_feature;
mod smart_model;

pub use smart_feature::SmartFeatureMapper;
pub use smart_model::SmartModelMapper;

use crate::domain::{self, StructuredMap};
use crate::error::{ConfigError, MapError};
use crate::wire::Struct;
use std::str::FromStr;
use uuid::Uuid;

/// What to do with a wire enum value that names no domain variant (including UNSPECIFIED).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnumPolicy {
    /// Fail the call with an invalid-argument error.
    #[default]
    Reject,
    /// Coerce to the first domain variant.
    DefaultToFirst,
}

impl EnumPolicy {
    fn resolve<T>(self, field: &'static str, raw: i32, mapped: Option<T>, first: T) -> Result<T, MapError> {
        match (mapped, self) {
            (Some(v), _) => Ok(v),
            (None, EnumPolicy::DefaultToFirst) => {
                tracing::warn!(field, value = raw, "unknown enum value coerced to first variant");
                Ok(first)
            }
            (None, EnumPolicy::Reject) => Err(MapError::UnknownEnum { field, value: raw }),
        }
    }
}

impl FromStr for EnumPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(EnumPolicy::Reject),
            "default" | "default_to_first" => Ok(EnumPolicy::DefaultToFirst),
            other => Err(ConfigError::Invalid {
                var: "ENUM_POLICY",
                reason: format!("expected 'reject' or 'default', got '{}'", other),
            }),
        }
    }
}

fn parse_uuid(field: &'static str, raw: &str) -> Result<Uuid, MapError> {
    Uuid::parse_str(raw).map_err(|_| MapError::InvalidId {
        field,
        value: raw.to_string(),
    })
}

fn map_to_domain(wire: Option<Struct>) -> StructuredMap {
    wire.map(domain::value::map_from_json).unwrap_or_default()
}

fn map_to_wire(map: &StructuredMap, field: &str) -> Result<Option<Struct>, MapError> {
    if map.is_empty() {
        return Ok(None);
    }
    Ok(Some(domain::value::map_to_json(map, field)?))
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
