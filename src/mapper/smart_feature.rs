//! SmartFeature wire <-> domain conversion.

use super::{map_to_domain, map_to_wire, parse_uuid, EnumPolicy};
use crate::domain::{self, Protocol, SmartFeature, SmartFeatureUpdate};
use crate::error::MapError;
use crate::wire::smart_feature as pb;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default)]
pub struct SmartFeatureMapper {
    policy: EnumPolicy,
}

impl SmartFeatureMapper {
    pub fn new(policy: EnumPolicy) -> Self {
        SmartFeatureMapper { policy }
    }

    pub fn to_domain(&self, req: pb::CreateSmartFeatureRequest) -> Result<SmartFeature, MapError> {
        let input = req.feature.ok_or(MapError::MissingInput("feature"))?;
        let model_id = parse_uuid("model_id", &input.model_id)?;
        let now = domain::now();
        Ok(SmartFeature {
            id: Uuid::new_v4(),
            model_id,
            name: input.name,
            description: input.description,
            protocol: self.protocol_to_domain(input.protocol)?,
            interface_path: input.interface_path,
            parameters: map_to_domain(input.parameters),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn to_domain_update(&self, req: pb::UpdateSmartFeatureRequest) -> Result<SmartFeatureUpdate, MapError> {
        let input = req.feature.ok_or(MapError::MissingInput("feature"))?;
        Ok(SmartFeatureUpdate {
            id: parse_uuid("id", &input.id)?,
            name: input.name,
            description: input.description,
            protocol: self.protocol_to_domain(input.protocol)?,
            interface_path: input.interface_path,
            parameters: map_to_domain(input.parameters),
            updated_at: domain::now(),
        })
    }

    pub fn to_proto(&self, feature: &SmartFeature) -> Result<pb::SmartFeature, MapError> {
        Ok(pb::SmartFeature {
            id: feature.id.to_string(),
            model_id: feature.model_id.to_string(),
            name: feature.name.clone(),
            description: feature.description.clone(),
            protocol: protocol_to_wire(feature.protocol) as i32,
            interface_path: feature.interface_path.clone(),
            parameters: map_to_wire(&feature.parameters, "parameters")?,
            created_at: Some(feature.created_at),
            updated_at: Some(feature.updated_at),
        })
    }

    pub fn to_create_response(&self, feature: &SmartFeature) -> Result<pb::CreateSmartFeatureResponse, MapError> {
        Ok(pb::CreateSmartFeatureResponse {
            feature: Some(self.to_proto(feature)?),
        })
    }

    pub fn to_get_response(&self, feature: &SmartFeature) -> Result<pb::GetSmartFeatureResponse, MapError> {
        Ok(pb::GetSmartFeatureResponse {
            feature: Some(self.to_proto(feature)?),
        })
    }

    pub fn to_update_response(&self, feature: &SmartFeature) -> Result<pb::UpdateSmartFeatureResponse, MapError> {
        Ok(pb::UpdateSmartFeatureResponse {
            feature: Some(self.to_proto(feature)?),
        })
    }

    pub fn to_list_response(&self, features: &[SmartFeature]) -> Result<pb::GetFeaturesByModelIdResponse, MapError> {
        let mut out = Vec::with_capacity(features.len());
        for f in features {
            out.push(self.to_proto(f)?);
        }
        Ok(pb::GetFeaturesByModelIdResponse { features: out })
    }

    fn protocol_to_domain(&self, raw: i32) -> Result<Protocol, MapError> {
        let mapped = match pb::ProtocolType::from_i32(raw) {
            Some(pb::ProtocolType::Rest) => Some(Protocol::Rest),
            Some(pb::ProtocolType::Grpc) => Some(Protocol::Grpc),
            Some(pb::ProtocolType::Mqtt) => Some(Protocol::Mqtt),
            Some(pb::ProtocolType::Websocket) => Some(Protocol::Websocket),
            Some(pb::ProtocolType::Unspecified) | None => None,
        };
        self.policy.resolve("protocol", raw, mapped, Protocol::ALL[0])
    }
}

fn protocol_to_wire(p: Protocol) -> pb::ProtocolType {
    match p {
        Protocol::Rest => pb::ProtocolType::Rest,
        Protocol::Grpc => pb::ProtocolType::Grpc,
        Protocol::Mqtt => pb::ProtocolType::Mqtt,
        Protocol::Websocket => pb::ProtocolType::Websocket,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_request(model_id: &str, protocol: i32) -> pb::CreateSmartFeatureRequest {
        pb::CreateSmartFeatureRequest {
            feature: Some(pb::CreateSmartFeatureInput {
                model_id: model_id.into(),
                name: "SetTemp".into(),
                description: "desc".into(),
                protocol,
                interface_path: "/set".into(),
                parameters: json!({"param1": "value1", "param2": 123}).as_object().cloned(),
            }),
        }
    }

    #[test]
    fn every_protocol_survives_the_round_trip() {
        let mapper = SmartFeatureMapper::default();
        let owner = Uuid::new_v4().to_string();
        for raw in 1..=4 {
            let feature = mapper.to_domain(create_request(&owner, raw)).unwrap();
            let out = mapper.to_proto(&feature).unwrap();
            assert_eq!(out.protocol, raw);
            assert_eq!(out.model_id, owner);
            assert_eq!(out.interface_path, "/set");
            assert_eq!(out.parameters, json!({"param1": "value1", "param2": 123}).as_object().cloned());
        }
    }

    #[test]
    fn malformed_model_id_is_rejected() {
        let err = SmartFeatureMapper::default()
            .to_domain(create_request("model-1", 1))
            .unwrap_err();
        assert_eq!(
            err,
            MapError::InvalidId {
                field: "model_id",
                value: "model-1".into()
            }
        );
    }

    #[test]
    fn out_of_range_protocol_is_rejected_or_coerced() {
        let owner = Uuid::new_v4().to_string();
        let err = SmartFeatureMapper::new(EnumPolicy::Reject)
            .to_domain(create_request(&owner, 17))
            .unwrap_err();
        assert_eq!(err, MapError::UnknownEnum { field: "protocol", value: 17 });

        let f = SmartFeatureMapper::new(EnumPolicy::DefaultToFirst)
            .to_domain(create_request(&owner, 17))
            .unwrap();
        assert_eq!(f.protocol, Protocol::Rest);
    }

    #[test]
    fn update_carries_fields_and_fresh_timestamp() {
        let id = Uuid::new_v4();
        let before = domain::now();
        let update = SmartFeatureMapper::default()
            .to_domain_update(pb::UpdateSmartFeatureRequest {
                feature: Some(pb::UpdateSmartFeatureInput {
                    id: id.to_string(),
                    name: "Updated Feature".into(),
                    description: "Updated Description".into(),
                    protocol: pb::ProtocolType::Grpc as i32,
                    interface_path: "/updated".into(),
                    parameters: None,
                }),
            })
            .unwrap();
        assert_eq!(update.id, id);
        assert_eq!(update.protocol, Protocol::Grpc);
        assert!(update.updated_at >= before);
        assert!(update.parameters.is_empty());
    }

    mod properties {
        use super::*;
        use crate::domain::value;
        use crate::mapper::strategies::{description, name, structured_map};
        use crate::service::RequestValidator;
        use proptest::prelude::*;
        use std::collections::HashSet;

        fn create_input(model_id: Uuid) -> impl Strategy<Value = pb::CreateSmartFeatureInput> {
            (
                name(),
                description(),
                prop::sample::select(Protocol::ALL.to_vec()),
                "/[A-Za-z0-9_/-]{0,40}",
                structured_map(),
            )
                .prop_map(move |(name, description, protocol, interface_path, parameters)| {
                    pb::CreateSmartFeatureInput {
                        model_id: model_id.to_string(),
                        name,
                        description,
                        protocol: protocol_to_wire(protocol) as i32,
                        interface_path,
                        parameters: Some(value::map_to_json(&parameters, "parameters").unwrap()),
                    }
                })
        }

        proptest! {
            #[test]
            fn representable_fields_survive_round_trip(input in create_input(Uuid::new_v4())) {
                let mapper = SmartFeatureMapper::new(EnumPolicy::Reject);
                let feature = mapper
                    .to_domain(pb::CreateSmartFeatureRequest { feature: Some(input.clone()) })
                    .unwrap();
                prop_assert!(RequestValidator::new().unwrap().validate_feature(&feature).is_ok());

                let out = mapper.to_proto(&feature).unwrap();
                prop_assert_eq!(&out.model_id, &input.model_id);
                prop_assert_eq!(&out.name, &input.name);
                prop_assert_eq!(&out.description, &input.description);
                prop_assert_eq!(out.protocol, input.protocol);
                prop_assert_eq!(&out.interface_path, &input.interface_path);
                let sent = input.parameters.filter(|m| !m.is_empty());
                prop_assert_eq!(out.parameters, sent);
            }

            #[test]
            fn creates_get_fresh_ids_and_equal_timestamps(
                inputs in prop::collection::vec(create_input(Uuid::new_v4()), 1..16)
            ) {
                let mapper = SmartFeatureMapper::default();
                let mut ids = HashSet::new();
                for input in inputs {
                    let feature = mapper
                        .to_domain(pb::CreateSmartFeatureRequest { feature: Some(input) })
                        .unwrap();
                    prop_assert_eq!(feature.created_at, feature.updated_at);
                    prop_assert!(ids.insert(feature.id), "id {} repeated", feature.id);
                }
            }
        }
    }
}
