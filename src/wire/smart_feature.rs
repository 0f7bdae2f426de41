//! `smart_feature.v1` messages.

use super::Struct;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ProtocolType {
    Unspecified = 0,
    Rest = 1,
    Grpc = 2,
    Mqtt = 3,
    Websocket = 4,
}

impl ProtocolType {
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(ProtocolType::Unspecified),
            1 => Some(ProtocolType::Rest),
            2 => Some(ProtocolType::Grpc),
            3 => Some(ProtocolType::Mqtt),
            4 => Some(ProtocolType::Websocket),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartFeature {
    pub id: String,
    pub model_id: String,
    pub name: String,
    pub description: String,
    pub protocol: i32,
    pub interface_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Struct>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateSmartFeatureInput {
    pub model_id: String,
    pub name: String,
    pub description: String,
    pub protocol: i32,
    pub interface_path: String,
    pub parameters: Option<Struct>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateSmartFeatureInput {
    pub id: String,
    pub name: String,
    pub description: String,
    pub protocol: i32,
    pub interface_path: String,
    pub parameters: Option<Struct>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateSmartFeatureRequest {
    pub feature: Option<CreateSmartFeatureInput>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateSmartFeatureResponse {
    pub feature: Option<SmartFeature>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetSmartFeatureRequest {
    pub id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetSmartFeatureResponse {
    pub feature: Option<SmartFeature>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetFeaturesByModelIdRequest {
    pub model_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetFeaturesByModelIdResponse {
    pub features: Vec<SmartFeature>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateSmartFeatureRequest {
    pub feature: Option<UpdateSmartFeatureInput>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateSmartFeatureResponse {
    pub feature: Option<SmartFeature>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteSmartFeatureRequest {
    pub id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteSmartFeatureResponse {}
