//! Services: log intent, delegate to a repository, return its result unchanged.

mod smart_feature;
mod smart_model;
mod validation;
pub use smart_feature::SmartFeatureService;
pub use smart_model::SmartModelService;
pub use validation::{RequestValidator, ValidationRule};
