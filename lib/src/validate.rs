use crate::cache::OccurrenceCache;
use crate::error::ValidationError;
use crate::model::{Model, ShapeGraph};
use crate::occurrence::TextOccurrence;
use crate::report::{ValidationEvent, ValidationReport};
use log::{error, info};
use rayon::prelude::*;
use std::sync::Arc;

/// A rule that inspects a whole model.
pub trait Validator<G: ShapeGraph + ?Sized = Model>: Send + Sync {
    fn name(&self) -> &str;

    fn validate(&self, model: &G) -> Result<Vec<ValidationEvent>, ValidationError>;
}

/// A rule fed one text occurrence at a time, in traversal order.
///
/// Every occurrence is delivered; implementations decide which ones matter
/// to them (for example by looking at the trait or `is_trait_key_name`).
pub trait TextOccurrenceConsumer: Send + Sync {
    fn name(&self) -> &str;

    fn evaluate(&self, occurrence: &TextOccurrence)
        -> Result<Vec<ValidationEvent>, ValidationError>;
}

/// Runs a set of validators and text consumers against models.
///
/// Extracted text is cached per model instance, so any number of consumers,
/// and repeated runs over the same `Arc`, share one traversal. The cache can
/// be shared with other `ModelValidator`s through [`ModelValidator::with_cache`].
pub struct ModelValidator<G: ShapeGraph + ?Sized = Model> {
    cache: Arc<OccurrenceCache<G>>,
    validators: Vec<Box<dyn Validator<G>>>,
    consumers: Vec<Box<dyn TextOccurrenceConsumer>>,
}

type Outcome<'a> = (&'a str, Result<Vec<ValidationEvent>, ValidationError>);

impl<G: ShapeGraph + ?Sized> ModelValidator<G> {
    pub fn new() -> Self {
        Self::with_cache(Arc::new(OccurrenceCache::new()))
    }

    pub fn with_cache(cache: Arc<OccurrenceCache<G>>) -> Self {
        ModelValidator {
            cache,
            validators: Vec::new(),
            consumers: Vec::new(),
        }
    }

    pub fn with_validator(mut self, validator: impl Validator<G> + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn with_consumer(mut self, consumer: impl TextOccurrenceConsumer + 'static) -> Self {
        self.consumers.push(Box::new(consumer));
        self
    }

    pub fn cache(&self) -> &Arc<OccurrenceCache<G>> {
        &self.cache
    }

    pub fn text_occurrences(&self, model: &Arc<G>) -> Arc<[TextOccurrence]> {
        self.cache.get_or_extract(model)
    }

    /// Runs every validator and consumer. A failing rule is logged and
    /// recorded in the report; the others still run.
    pub fn validate(&self, model: &Arc<G>) -> ValidationReport {
        info!(
            "Running {} validators and {} text consumers",
            self.validators.len(),
            self.consumers.len()
        );

        let mut outcomes: Vec<Outcome<'_>> = self
            .validators
            .par_iter()
            .map(|validator| (validator.name(), validator.validate(model)))
            .collect();

        if !self.consumers.is_empty() {
            let occurrences = self.text_occurrences(model);
            outcomes.par_extend(self.consumers.par_iter().map(|consumer| {
                let outcome = evaluate_all(consumer.as_ref(), &occurrences);
                (consumer.name(), outcome)
            }));
        }

        let mut report = ValidationReport::new();
        for (name, outcome) in outcomes {
            match outcome {
                Ok(events) => report.extend(events),
                Err(e) => {
                    error!("Validator {} failed: {}", name, e);
                    report.add_failure(name, e.to_string());
                }
            }
        }
        info!(
            "Validation finished with {} events and {} failed validators",
            report.events().len(),
            report.failures().len()
        );
        report
    }
}

impl<G: ShapeGraph + ?Sized> Default for ModelValidator<G> {
    fn default() -> Self {
        Self::new()
    }
}

fn evaluate_all(
    consumer: &dyn TextOccurrenceConsumer,
    occurrences: &[TextOccurrence],
) -> Result<Vec<ValidationEvent>, ValidationError> {
    let mut events = Vec::new();
    for occurrence in occurrences {
        events.extend(consumer.evaluate(occurrence)?);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Shape, ShapeType};
    use crate::types::ShapeId;

    struct EchoNames;

    impl TextOccurrenceConsumer for EchoNames {
        fn name(&self) -> &str {
            "EchoNames"
        }

        fn evaluate(
            &self,
            occurrence: &TextOccurrence,
        ) -> Result<Vec<ValidationEvent>, ValidationError> {
            if !occurrence.is_shape_name() {
                return Ok(Vec::new());
            }
            Ok(vec![ValidationEvent::warning(
                self.name(),
                occurrence.shape().clone(),
                None,
                occurrence.text(),
            )])
        }
    }

    struct AlwaysFails;

    impl TextOccurrenceConsumer for AlwaysFails {
        fn name(&self) -> &str {
            "AlwaysFails"
        }

        fn evaluate(&self, _: &TextOccurrence) -> Result<Vec<ValidationEvent>, ValidationError> {
            Err(ValidationError::Rule("broken rule".to_string()))
        }
    }

    fn model() -> Arc<Model> {
        Arc::new(
            Model::builder()
                .add_shape(Shape::new(ShapeId::new("example", "One"), ShapeType::String))
                .unwrap()
                .add_shape(Shape::new(ShapeId::new("example", "Two"), ShapeType::String))
                .unwrap()
                .build(),
        )
    }

    #[test]
    fn consumers_see_occurrences_in_order() {
        let validator = ModelValidator::new().with_consumer(EchoNames);
        let report = validator.validate(&model());
        let messages: Vec<_> = report.events().iter().map(|e| e.message()).collect();
        assert_eq!(messages, ["One", "Two"]);
    }

    #[test]
    fn failing_consumer_does_not_stop_others() {
        let validator = ModelValidator::new()
            .with_consumer(AlwaysFails)
            .with_consumer(EchoNames);
        let report = validator.validate(&model());
        assert_eq!(report.events().len(), 2);
        assert_eq!(report.failures().len(), 1);
        assert_eq!(report.failures()[0].validator, "AlwaysFails");
        assert_eq!(report.failures()[0].message, "broken rule");
    }

    #[test]
    fn repeated_runs_reuse_the_cache() {
        let validator = ModelValidator::new().with_consumer(EchoNames);
        let model = model();
        validator.validate(&model);
        let cached = validator.cache().get(&model).unwrap();
        validator.validate(&model);
        assert!(Arc::ptr_eq(&cached, &validator.text_occurrences(&model)));
    }
}
