//! SmartFeature: a named capability of a SmartModel, reachable over a protocol.

use super::value::StructuredMap;
use super::UnknownVariant;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Protocol {
    Rest,
    Grpc,
    Mqtt,
    Websocket,
}

impl Protocol {
    pub const ALL: [Protocol; 4] = [Protocol::Rest, Protocol::Grpc, Protocol::Mqtt, Protocol::Websocket];

    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Rest => "rest",
            Protocol::Grpc => "grpc",
            Protocol::Mqtt => "mqtt",
            Protocol::Websocket => "websocket",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Protocol::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("protocol", s))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SmartFeature {
    pub id: Uuid,
    /// Owning model. Existence is enforced by the storage foreign key, not here.
    pub model_id: Uuid,
    pub name: String,
    pub description: String,
    pub protocol: Protocol,
    pub interface_path: String,
    pub parameters: StructuredMap,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Replacement values for every mutable field of a stored feature. The owner is fixed at creation.
#[derive(Clone, Debug, PartialEq)]
pub struct SmartFeatureUpdate {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub protocol: Protocol,
    pub interface_path: String,
    pub parameters: StructuredMap,
    pub updated_at: DateTime<Utc>,
}

impl SmartFeatureUpdate {
    pub fn apply_to(&self, current: &SmartFeature) -> SmartFeature {
        SmartFeature {
            id: current.id,
            model_id: current.model_id,
            name: self.name.clone(),
            description: self.description.clone(),
            protocol: self.protocol,
            interface_path: self.interface_path.clone(),
            parameters: self.parameters.clone(),
            created_at: current.created_at,
            updated_at: self.updated_at,
        }
    }
}
