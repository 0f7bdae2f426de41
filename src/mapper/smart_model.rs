//! SmartModel wire <-> domain conversion.

use super::{map_to_domain, map_to_wire, non_empty, parse_uuid, EnumPolicy};
use crate::domain::{self, ModelCategory, ModelType, SmartModel, SmartModelUpdate};
use crate::error::MapError;
use crate::wire::smart_model as pb;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default)]
pub struct SmartModelMapper {
    policy: EnumPolicy,
}

impl SmartModelMapper {
    pub fn new(policy: EnumPolicy) -> Self {
        SmartModelMapper { policy }
    }

    /// New domain model with a fresh id and `created_at == updated_at`.
    pub fn to_domain(&self, req: pb::CreateSmartModelRequest) -> Result<SmartModel, MapError> {
        let input = req.model.ok_or(MapError::MissingInput("model"))?;
        let now = domain::now();
        Ok(SmartModel {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            model_type: self.model_type_to_domain(input.r#type)?,
            category: self.category_to_domain(input.category)?,
            manufacturer: non_empty(input.manufacturer),
            model_number: non_empty(input.model_number),
            metadata: map_to_domain(input.metadata),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn to_domain_update(&self, req: pb::UpdateSmartModelRequest) -> Result<SmartModelUpdate, MapError> {
        let input = req.model.ok_or(MapError::MissingInput("model"))?;
        Ok(SmartModelUpdate {
            id: parse_uuid("id", &input.id)?,
            name: input.name,
            description: input.description,
            model_type: self.model_type_to_domain(input.r#type)?,
            category: self.category_to_domain(input.category)?,
            manufacturer: non_empty(input.manufacturer),
            model_number: non_empty(input.model_number),
            metadata: map_to_domain(input.metadata),
            updated_at: domain::now(),
        })
    }

    pub fn to_proto(&self, model: &SmartModel) -> Result<pb::SmartModel, MapError> {
        Ok(pb::SmartModel {
            id: model.id.to_string(),
            name: model.name.clone(),
            description: model.description.clone(),
            r#type: model_type_to_wire(model.model_type) as i32,
            category: category_to_wire(model.category) as i32,
            manufacturer: model.manufacturer.clone().unwrap_or_default(),
            model_number: model.model_number.clone().unwrap_or_default(),
            metadata: map_to_wire(&model.metadata, "metadata")?,
            created_at: Some(model.created_at),
            updated_at: Some(model.updated_at),
        })
    }

    pub fn to_create_response(&self, model: &SmartModel) -> Result<pb::CreateSmartModelResponse, MapError> {
        Ok(pb::CreateSmartModelResponse {
            model: Some(self.to_proto(model)?),
        })
    }

    pub fn to_get_response(&self, model: &SmartModel) -> Result<pb::GetSmartModelResponse, MapError> {
        Ok(pb::GetSmartModelResponse {
            model: Some(self.to_proto(model)?),
        })
    }

    pub fn to_update_response(&self, model: &SmartModel) -> Result<pb::UpdateSmartModelResponse, MapError> {
        Ok(pb::UpdateSmartModelResponse {
            model: Some(self.to_proto(model)?),
        })
    }

    /// All or nothing: the first conversion failure aborts the list.
    pub fn to_list_response(&self, models: &[SmartModel]) -> Result<pb::ListSmartModelsResponse, MapError> {
        let models = models
            .iter()
            .map(|m| self.to_proto(m))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pb::ListSmartModelsResponse { models })
    }

    pub fn model_type_to_domain(&self, raw: i32) -> Result<ModelType, MapError> {
        let mapped = match pb::ModelType::from_i32(raw) {
            Some(pb::ModelType::Device) => Some(ModelType::Device),
            Some(pb::ModelType::Service) => Some(ModelType::Service),
            Some(pb::ModelType::Unspecified) | None => None,
        };
        self.policy.resolve("type", raw, mapped, ModelType::ALL[0])
    }

    fn category_to_domain(&self, raw: i32) -> Result<ModelCategory, MapError> {
        let mapped = match pb::ModelCategory::from_i32(raw) {
            Some(pb::ModelCategory::Wearable) => Some(ModelCategory::Wearable),
            Some(pb::ModelCategory::Camera) => Some(ModelCategory::Camera),
            Some(pb::ModelCategory::Weather) => Some(ModelCategory::Weather),
            Some(pb::ModelCategory::Entertainment) => Some(ModelCategory::Entertainment),
            Some(pb::ModelCategory::Unspecified) | None => None,
        };
        self.policy.resolve("category", raw, mapped, ModelCategory::ALL[0])
    }
}

fn model_type_to_wire(t: ModelType) -> pb::ModelType {
    match t {
        ModelType::Device => pb::ModelType::Device,
        ModelType::Service => pb::ModelType::Service,
    }
}

fn category_to_wire(c: ModelCategory) -> pb::ModelCategory {
    match c {
        ModelCategory::Wearable => pb::ModelCategory::Wearable,
        ModelCategory::Camera => pb::ModelCategory::Camera,
        ModelCategory::Weather => pb::ModelCategory::Weather,
        ModelCategory::Entertainment => pb::ModelCategory::Entertainment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StructuredValue;
    use serde_json::json;

    fn create_request(metadata: serde_json::Value) -> pb::CreateSmartModelRequest {
        pb::CreateSmartModelRequest {
            model: Some(pb::CreateSmartModelInput {
                name: "Thermostat".into(),
                description: "desc".into(),
                r#type: pb::ModelType::Device as i32,
                category: pb::ModelCategory::Weather as i32,
                manufacturer: "Acme".into(),
                model_number: "T1000".into(),
                metadata: metadata.as_object().cloned(),
            }),
        }
    }

    #[test]
    fn to_domain_assigns_identity_and_equal_timestamps() {
        let mapper = SmartModelMapper::default();
        let a = mapper.to_domain(create_request(json!({}))).unwrap();
        let b = mapper.to_domain(create_request(json!({}))).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(a.model_type, ModelType::Device);
        assert_eq!(a.category, ModelCategory::Weather);
        assert_eq!(a.manufacturer.as_deref(), Some("Acme"));
    }

    #[test]
    fn proto_of_domain_reproduces_request_fields() {
        let mapper = SmartModelMapper::default();
        let metadata = json!({"version": "1.0", "zones": [1, 2], "eco": {"enabled": true, "target": 19.5}});
        let req = create_request(metadata.clone());
        let input = req.model.clone().unwrap();
        let out = mapper.to_proto(&mapper.to_domain(req).unwrap()).unwrap();

        assert_eq!(out.name, input.name);
        assert_eq!(out.description, input.description);
        assert_eq!(out.r#type, input.r#type);
        assert_eq!(out.category, input.category);
        assert_eq!(out.manufacturer, input.manufacturer);
        assert_eq!(out.model_number, input.model_number);
        assert_eq!(out.metadata, metadata.as_object().cloned());
        assert!(!out.id.is_empty());
    }

    #[test]
    fn missing_model_is_rejected() {
        let err = SmartModelMapper::default()
            .to_domain(pb::CreateSmartModelRequest { model: None })
            .unwrap_err();
        assert_eq!(err, MapError::MissingInput("model"));
    }

    #[test]
    fn unspecified_type_follows_policy() {
        let mut req = create_request(json!({}));
        if let Some(m) = req.model.as_mut() {
            m.r#type = 0;
            m.category = 42;
        }
        let err = SmartModelMapper::new(EnumPolicy::Reject)
            .to_domain(req.clone())
            .unwrap_err();
        assert_eq!(err, MapError::UnknownEnum { field: "type", value: 0 });

        let coerced = SmartModelMapper::new(EnumPolicy::DefaultToFirst).to_domain(req).unwrap();
        assert_eq!(coerced.model_type, ModelType::Device);
        assert_eq!(coerced.category, ModelCategory::Wearable);
    }

    #[test]
    fn update_requires_well_formed_id() {
        let req = pb::UpdateSmartModelRequest {
            model: Some(pb::UpdateSmartModelInput {
                id: "42".into(),
                name: "Thermostat".into(),
                description: "desc".into(),
                r#type: 1,
                category: 1,
                ..Default::default()
            }),
        };
        let err = SmartModelMapper::default().to_domain_update(req).unwrap_err();
        assert!(matches!(err, MapError::InvalidId { field: "id", .. }));
    }

    #[test]
    fn empty_optional_strings_become_none() {
        let mut req = create_request(json!({}));
        if let Some(m) = req.model.as_mut() {
            m.manufacturer.clear();
            m.model_number.clear();
        }
        let model = SmartModelMapper::default().to_domain(req).unwrap();
        assert_eq!(model.manufacturer, None);
        assert_eq!(model.model_number, None);
        assert!(model.metadata.is_empty());
        let out = SmartModelMapper::default().to_proto(&model).unwrap();
        assert_eq!(out.manufacturer, "");
        assert_eq!(out.metadata, None);
    }

    #[test]
    fn list_stops_at_first_unrepresentable_model() {
        let mapper = SmartModelMapper::default();
        let good = mapper.to_domain(create_request(json!({"a": 1}))).unwrap();
        let mut bad = good.clone();
        bad.metadata.insert("drift".into(), StructuredValue::Float(f64::NAN));

        let err = mapper.to_list_response(&[good.clone(), bad]).unwrap_err();
        assert!(matches!(err, MapError::Unrepresentable(_)));
        assert_eq!(mapper.to_list_response(&[good]).unwrap().models.len(), 1);
    }

    mod properties {
        use super::*;
        use crate::domain::value;
        use crate::mapper::strategies::{description, name, structured_map};
        use crate::service::RequestValidator;
        use proptest::prelude::*;
        use std::collections::HashSet;

        fn create_input() -> impl Strategy<Value = pb::CreateSmartModelInput> {
            (
                name(),
                description(),
                prop::sample::select(ModelType::ALL.to_vec()),
                prop::sample::select(ModelCategory::ALL.to_vec()),
                "\\PC{0,255}",
                "[A-Za-z0-9]{0,50}",
                structured_map(),
            )
                .prop_map(|(name, description, t, c, manufacturer, model_number, metadata)| {
                    pb::CreateSmartModelInput {
                        name,
                        description,
                        r#type: model_type_to_wire(t) as i32,
                        category: category_to_wire(c) as i32,
                        manufacturer,
                        model_number,
                        metadata: Some(value::map_to_json(&metadata, "metadata").unwrap()),
                    }
                })
        }

        proptest! {
            #[test]
            fn representable_fields_survive_round_trip(input in create_input()) {
                let mapper = SmartModelMapper::new(EnumPolicy::Reject);
                let model = mapper
                    .to_domain(pb::CreateSmartModelRequest { model: Some(input.clone()) })
                    .unwrap();
                prop_assert!(RequestValidator::new().unwrap().validate_model(&model).is_ok());

                let out = mapper.to_proto(&model).unwrap();
                prop_assert_eq!(&out.name, &input.name);
                prop_assert_eq!(&out.description, &input.description);
                prop_assert_eq!(out.r#type, input.r#type);
                prop_assert_eq!(out.category, input.category);
                prop_assert_eq!(&out.manufacturer, &input.manufacturer);
                prop_assert_eq!(&out.model_number, &input.model_number);
                let sent = input.metadata.filter(|m| !m.is_empty());
                prop_assert_eq!(out.metadata, sent);
            }

            #[test]
            fn creates_get_fresh_ids_and_equal_timestamps(
                inputs in prop::collection::vec(create_input(), 1..16)
            ) {
                let mapper = SmartModelMapper::default();
                let mut ids = HashSet::new();
                for input in inputs {
                    let model = mapper
                        .to_domain(pb::CreateSmartModelRequest { model: Some(input) })
                        .unwrap();
                    prop_assert_eq!(model.created_at, model.updated_at);
                    prop_assert!(ids.insert(model.id), "id {} repeated", model.id);
                }
            }
        }
    }
}
