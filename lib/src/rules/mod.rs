//! Concrete validators built on the model and text extraction APIs.

mod enum_name;
mod noninclusive;

pub use enum_name::{EnumTraitRecommendedNameValidator, RECOMMENDED_NAME_PATTERN};
pub use noninclusive::{NoninclusiveTermsConfig, NoninclusiveTermsRule};
