use crate::types::{Severity, ShapeId};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A single diagnostic produced by a validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationEvent {
    id: String,
    severity: Severity,
    shape: ShapeId,
    #[serde(rename = "trait", skip_serializing_if = "Option::is_none")]
    trait_id: Option<ShapeId>,
    message: String,
}

impl ValidationEvent {
    pub fn new(
        id: impl Into<String>,
        severity: Severity,
        shape: ShapeId,
        trait_id: Option<ShapeId>,
        message: impl Into<String>,
    ) -> Self {
        ValidationEvent {
            id: id.into(),
            severity,
            shape,
            trait_id,
            message: message.into(),
        }
    }

    pub fn warning(
        id: impl Into<String>,
        shape: ShapeId,
        trait_id: Option<ShapeId>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(id, Severity::Warning, shape, trait_id, message)
    }

    /// Name of the validator that produced the event.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn shape(&self) -> &ShapeId {
        &self.shape
    }

    pub fn trait_id(&self) -> Option<&ShapeId> {
        self.trait_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {} | {}", self.severity, self.shape, self.message, self.id)
    }
}

/// A validator or consumer that failed during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatorFailure {
    pub validator: String,
    pub message: String,
}

/// Events collected over one validation run, in validator registration order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    events: Vec<ValidationEvent>,
    failures: Vec<ValidatorFailure>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&mut self, event: ValidationEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = ValidationEvent>) {
        self.events.extend(events);
    }

    pub fn add_failure(&mut self, validator: impl Into<String>, message: impl Into<String>) {
        self.failures.push(ValidatorFailure {
            validator: validator.into(),
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[ValidationEvent] {
        &self.events
    }

    pub fn failures(&self) -> &[ValidatorFailure] {
        &self.failures
    }

    /// No events and no failed validators.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.failures.is_empty()
    }

    pub fn events_for_shape<'a>(
        &'a self,
        shape: &'a ShapeId,
    ) -> impl Iterator<Item = &'a ValidationEvent> + 'a {
        self.events.iter().filter(move |event| event.shape() == shape)
    }

    pub fn count_by_severity(&self) -> BTreeMap<Severity, usize> {
        let mut counts = BTreeMap::new();
        for event in &self.events {
            *counts.entry(event.severity()).or_insert(0) += 1;
        }
        counts
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.events.extend(other.events);
        self.failures.extend(other.failures);
    }
}
