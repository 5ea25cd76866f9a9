//! Full-text extraction over shape models.
//!
//! [`extract_text`] walks every non-prelude shape of a [`ShapeGraph`] once and
//! returns each shape name, member name, and every key and string value
//! nested in applied traits as a [`TextOccurrence`] tagged with its location.
//! [`ModelValidator`] caches that sequence per model instance and feeds it to
//! [`TextOccurrenceConsumer`]s alongside whole-model [`Validator`]s.
pub mod cache;
pub mod error;
pub mod extract;
pub mod model;
pub mod occurrence;
pub mod report;
pub mod rules;
pub mod test_utils;
pub mod types;
pub mod validate;
pub mod walker;

pub use cache::OccurrenceCache;
pub use error::{ModelError, OccurrenceError, ValidationError};
pub use extract::extract_text;
pub use model::{Model, Node, Shape, ShapeGraph, ShapeType};
pub use occurrence::{TextOccurrence, TextOccurrenceBuilder};
pub use report::{ValidationEvent, ValidationReport};
pub use types::{Severity, ShapeId, PRELUDE_NAMESPACE};
pub use validate::{ModelValidator, TextOccurrenceConsumer, Validator};
