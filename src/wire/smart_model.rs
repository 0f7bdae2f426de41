//! `smart_model.v1` messages.

use super::Struct;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ModelType {
    Unspecified = 0,
    Device = 1,
    Service = 2,
}

impl ModelType {
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(ModelType::Unspecified),
            1 => Some(ModelType::Device),
            2 => Some(ModelType::Service),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ModelCategory {
    Unspecified = 0,
    Wearable = 1,
    Camera = 2,
    Weather = 3,
    Entertainment = 4,
}

impl ModelCategory {
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(ModelCategory::Unspecified),
            1 => Some(ModelCategory::Wearable),
            2 => Some(ModelCategory::Camera),
            3 => Some(ModelCategory::Weather),
            4 => Some(ModelCategory::Entertainment),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartModel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub r#type: i32,
    pub category: i32,
    pub manufacturer: String,
    pub model_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Struct>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateSmartModelInput {
    pub name: String,
    pub description: String,
    pub r#type: i32,
    pub category: i32,
    pub manufacturer: String,
    pub model_number: String,
    pub metadata: Option<Struct>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateSmartModelInput {
    pub id: String,
    pub name: String,
    pub description: String,
    pub r#type: i32,
    pub category: i32,
    pub manufacturer: String,
    pub model_number: String,
    pub metadata: Option<Struct>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateSmartModelRequest {
    pub model: Option<CreateSmartModelInput>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateSmartModelResponse {
    pub model: Option<SmartModel>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetSmartModelRequest {
    pub id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetSmartModelResponse {
    pub model: Option<SmartModel>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSmartModelsRequest {}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSmartModelsByTypeRequest {
    pub r#type: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSmartModelsResponse {
    pub models: Vec<SmartModel>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateSmartModelRequest {
    pub model: Option<UpdateSmartModelInput>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateSmartModelResponse {
    pub model: Option<SmartModel>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteSmartModelRequest {
    pub id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteSmartModelResponse {}
