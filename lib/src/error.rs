use crate::types::ShapeId;
use thiserror::Error;

/// Raised when a `TextOccurrence` is assembled without its required parts.
///
/// This is a programming error in the caller, never a property of the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OccurrenceError {
    #[error("text occurrence requires an owning shape")]
    MissingShape,
    #[error("text occurrence requires text")]
    MissingText,
}

/// Structural problems with a model or one of its trait payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid shape id `{id}`: {reason}")]
    InvalidShapeId { id: String, reason: &'static str },
    #[error("shape `{0}` is defined more than once")]
    DuplicateShape(ShapeId),
    #[error("member shape `{0}` must carry a member name")]
    MemberWithoutName(ShapeId),
    #[error("invalid `{trait_id}` trait on `{shape}`: {reason}")]
    InvalidTrait {
        shape: ShapeId,
        trait_id: ShapeId,
        reason: String,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failure reported by a single validator or text consumer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("{0}")]
    Rule(String),
}
