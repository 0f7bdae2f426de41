//! Wire messages for the RPC surface. Shapes follow proto3 JSON mapping: absent fields take
//! their zero value, enums travel as `i32`, timestamps as RFC 3339, maps as `Struct` objects.

pub mod health;
pub mod smart_feature;
pub mod smart_model;

/// The `google.protobuf.Struct` well-known type.
pub type Struct = serde_json::Map<String, serde_json::Value>;
