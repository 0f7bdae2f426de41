//! SmartModel: a device or service archetype in the catalog.

use super::value::StructuredMap;
use super::UnknownVariant;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelType {
    Device,
    Service,
}

impl ModelType {
    pub const ALL: [ModelType; 2] = [ModelType::Device, ModelType::Service];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelType::Device => "device",
            ModelType::Service => "service",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("type", s))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelCategory {
    Wearable,
    Camera,
    Weather,
    Entertainment,
}

impl ModelCategory {
    pub const ALL: [ModelCategory; 4] = [
        ModelCategory::Wearable,
        ModelCategory::Camera,
        ModelCategory::Weather,
        ModelCategory::Entertainment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelCategory::Wearable => "wearable",
            ModelCategory::Camera => "camera",
            ModelCategory::Weather => "weather",
            ModelCategory::Entertainment => "entertainment",
        }
    }
}

impl fmt::Display for ModelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("category", s))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SmartModel {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub model_type: ModelType,
    pub category: ModelCategory,
    pub manufacturer: Option<String>,
    pub model_number: Option<String>,
    /// Empty when the caller sent no metadata.
    pub metadata: StructuredMap,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Replacement values for every mutable field of a stored model.
#[derive(Clone, Debug, PartialEq)]
pub struct SmartModelUpdate {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub model_type: ModelType,
    pub category: ModelCategory,
    pub manufacturer: Option<String>,
    pub model_number: Option<String>,
    pub metadata: StructuredMap,
    pub updated_at: DateTime<Utc>,
}

impl SmartModelUpdate {
    /// The model as it looks after this update is applied to `current`.
    pub fn apply_to(&self, current: &SmartModel) -> SmartModel {
        SmartModel {
            id: current.id,
            name: self.name.clone(),
            description: self.description.clone(),
            model_type: self.model_type,
            category: self.category,
            manufacturer: self.manufacturer.clone(),
            model_number: self.model_number.clone(),
            metadata: self.metadata.clone(),
            created_at: current.created_at,
            updated_at: self.updated_at,
        }
    }
}
