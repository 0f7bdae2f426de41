//! Structural validation of domain inputs and identifier-format checks.

use crate::domain::{
    SmartFeature, SmartFeatureUpdate, SmartModel, SmartModelUpdate, StructuredMap, StructuredValue,
};
use crate::error::ValidationError;
use regex::Regex;
use uuid::Uuid;

/// Per-field string rule. Lengths count characters, not bytes.
#[derive(Clone, Debug, Default)]
pub struct ValidationRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub pattern_hint: Option<&'static str>,
    pub prefix: Option<&'static str>,
}

impl ValidationRule {
    fn required() -> Self {
        ValidationRule {
            required: true,
            ..Default::default()
        }
    }

    fn min(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    fn max(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    fn matching(mut self, pattern: &str, hint: &'static str) -> Result<Self, regex::Error> {
        self.pattern = Some(Regex::new(pattern)?);
        self.pattern_hint = Some(hint);
        Ok(self)
    }
}

struct ModelRules {
    name: ValidationRule,
    description: ValidationRule,
    manufacturer: ValidationRule,
    model_number: ValidationRule,
}

struct FeatureRules {
    name: ValidationRule,
    description: ValidationRule,
    interface_path: ValidationRule,
}

/// Constructed once at bootstrap and shared by handlers.
pub struct RequestValidator {
    model: ModelRules,
    feature: FeatureRules,
}

impl RequestValidator {
    /// Fails only if a rule pattern does not compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(RequestValidator {
            model: ModelRules {
                name: ValidationRule::required().min(2).max(255),
                description: ValidationRule::required().max(1000),
                manufacturer: ValidationRule::default().max(255),
                model_number: ValidationRule::default()
                    .max(50)
                    .matching("^[A-Za-z0-9]+$", "must be alphanumeric")?,
            },
            feature: FeatureRules {
                name: ValidationRule::required().min(2).max(255),
                description: ValidationRule::required().max(1000),
                interface_path: ValidationRule {
                    required: true,
                    prefix: Some("/"),
                    ..Default::default()
                },
            },
        })
    }

    pub fn validate_model(&self, model: &SmartModel) -> Result<(), ValidationError> {
        let mut errs = ValidationError::default();
        self.check_model_fields(
            &model.name,
            &model.description,
            model.manufacturer.as_deref(),
            model.model_number.as_deref(),
            &model.metadata,
            &mut errs,
        );
        if model.created_at > model.updated_at {
            errs.push("created_at", "must not be after updated_at");
        }
        errs.into_result()
    }

    pub fn validate_model_update(&self, update: &SmartModelUpdate) -> Result<(), ValidationError> {
        let mut errs = ValidationError::default();
        self.check_model_fields(
            &update.name,
            &update.description,
            update.manufacturer.as_deref(),
            update.model_number.as_deref(),
            &update.metadata,
            &mut errs,
        );
        errs.into_result()
    }

    pub fn validate_feature(&self, feature: &SmartFeature) -> Result<(), ValidationError> {
        let mut errs = ValidationError::default();
        if feature.model_id.is_nil() {
            errs.push("model_id", "is required");
        }
        self.check_feature_fields(
            &feature.name,
            &feature.description,
            &feature.interface_path,
            &feature.parameters,
            &mut errs,
        );
        if feature.created_at > feature.updated_at {
            errs.push("created_at", "must not be after updated_at");
        }
        errs.into_result()
    }

    pub fn validate_feature_update(&self, update: &SmartFeatureUpdate) -> Result<(), ValidationError> {
        let mut errs = ValidationError::default();
        self.check_feature_fields(
            &update.name,
            &update.description,
            &update.interface_path,
            &update.parameters,
            &mut errs,
        );
        errs.into_result()
    }

    /// Parse an externally supplied identifier before any storage round trip.
    pub fn parse_id(&self, field: &str, raw: &str) -> Result<Uuid, ValidationError> {
        if raw.trim().is_empty() {
            return Err(ValidationError::single(field, "is required"));
        }
        Uuid::parse_str(raw).map_err(|_| ValidationError::single(field, "must be a valid UUID"))
    }

    fn check_model_fields(
        &self,
        name: &str,
        description: &str,
        manufacturer: Option<&str>,
        model_number: Option<&str>,
        metadata: &StructuredMap,
        errs: &mut ValidationError,
    ) {
        check_str("name", Some(name), &self.model.name, errs);
        check_str("description", Some(description), &self.model.description, errs);
        check_str("manufacturer", manufacturer, &self.model.manufacturer, errs);
        check_str("model_number", model_number, &self.model.model_number, errs);
        check_keys("metadata", metadata, errs);
    }

    fn check_feature_fields(
        &self,
        name: &str,
        description: &str,
        interface_path: &str,
        parameters: &StructuredMap,
        errs: &mut ValidationError,
    ) {
        check_str("name", Some(name), &self.feature.name, errs);
        check_str("description", Some(description), &self.feature.description, errs);
        check_str("interface_path", Some(interface_path), &self.feature.interface_path, errs);
        check_keys("parameters", parameters, errs);
    }
}

fn check_str(field: &str, value: Option<&str>, rule: &ValidationRule, errs: &mut ValidationError) {
    let v = match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            if rule.required {
                errs.push(field, "is required");
            }
            return;
        }
    };
    let len = v.chars().count();
    if let Some(min) = rule.min_length {
        if len < min {
            errs.push(field, format!("must be at least {} characters", min));
        }
    }
    if let Some(max) = rule.max_length {
        if len > max {
            errs.push(field, format!("must be at most {} characters", max));
        }
    }
    if let Some(ref re) = rule.pattern {
        if !re.is_match(v) {
            errs.push(field, rule.pattern_hint.unwrap_or("does not match required pattern"));
        }
    }
    if let Some(prefix) = rule.prefix {
        if !v.starts_with(prefix) {
            errs.push(field, format!("must start with '{}'", prefix));
        }
    }
}

/// Keys must be non-empty at every nesting level.
fn check_keys(field: &str, map: &StructuredMap, errs: &mut ValidationError) {
    for (k, v) in map {
        if k.is_empty() {
            errs.push(field, "keys must not be empty");
            return;
        }
        if let StructuredValue::Map(inner) = v {
            check_keys(&format!("{}.{}", field, k), inner, errs);
        }
    }
}
