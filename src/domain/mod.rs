//! Domain entities: SmartModel and its SmartFeatures, independent of wire and storage encoding.

mod smart_feature;
mod smart_model;
pub mod value;

pub use smart_feature::{Protocol, SmartFeature, SmartFeatureUpdate};
pub use smart_model::{ModelCategory, ModelType, SmartModel, SmartModelUpdate};
pub use value::{StructuredMap, StructuredValue, UnrepresentableValue};

use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}

/// Current time truncated to the microsecond precision PostgreSQL stores.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
