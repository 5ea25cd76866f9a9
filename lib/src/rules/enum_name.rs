use crate::error::ValidationError;
use crate::model::{EnumTrait, Shape, ShapeGraph};
use crate::report::ValidationEvent;
use crate::validate::Validator;
use regex::Regex;
use std::sync::LazyLock;

pub const RECOMMENDED_NAME_PATTERN: &str = "^[A-Z]+[A-Z_0-9]*$";

static RECOMMENDED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(RECOMMENDED_NAME_PATTERN).expect("enum name pattern is valid"));

/// Warns about enum constant names that are not UPPER_SNAKE_CASE.
///
/// Works on the enum trait directly rather than on extracted text.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumTraitRecommendedNameValidator;

impl EnumTraitRecommendedNameValidator {
    pub const NAME: &'static str = "EnumTraitRecommendedName";

    fn validate_shape(&self, shape: &Shape, enum_trait: &EnumTrait) -> Vec<ValidationEvent> {
        enum_trait
            .values()
            .iter()
            .filter_map(|definition| definition.name())
            .filter(|name| !RECOMMENDED_NAME.is_match(name))
            .map(|name| {
                ValidationEvent::warning(
                    Self::NAME,
                    shape.id().clone(),
                    Some(EnumTrait::id()),
                    format!(
                        "The name `{}` does not match the recommended enum name format of beginning \
                         with an uppercase letter, followed by any number of uppercase letters, \
                         numbers, or underscores.",
                        name
                    ),
                )
            })
            .collect()
    }
}

impl<G: ShapeGraph + ?Sized> Validator<G> for EnumTraitRecommendedNameValidator {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, model: &G) -> Result<Vec<ValidationEvent>, ValidationError> {
        let trait_id = EnumTrait::id();
        let mut events = Vec::new();
        for shape in model.shapes_with_trait(&trait_id) {
            if let Some(enum_trait) = EnumTrait::from_shape(shape)? {
                events.extend(self.validate_shape(shape, &enum_trait));
            }
        }
        Ok(events)
    }
}
