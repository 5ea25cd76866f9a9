use crate::error::ModelError;
use crate::model::node::Node;
use crate::model::shapes::Shape;
use crate::types::{ShapeId, PRELUDE_NAMESPACE};
use serde::Deserialize;

/// One constant declared by an enumeration-definition trait.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnumDefinition {
    value: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    documentation: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    deprecated: bool,
}

impl EnumDefinition {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }
}

/// Typed view of the `smithy.api#enum` trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumTrait {
    values: Vec<EnumDefinition>,
}

impl EnumTrait {
    pub fn id() -> ShapeId {
        ShapeId::new(PRELUDE_NAMESPACE, "enum")
    }

    /// Reads the trait off `shape`, or `None` when it is not applied.
    pub fn from_shape(shape: &Shape) -> Result<Option<Self>, ModelError> {
        shape
            .get_trait(&Self::id())
            .map(|node| Self::from_node(shape.id(), node))
            .transpose()
    }

    pub fn from_node(shape: &ShapeId, node: &Node) -> Result<Self, ModelError> {
        let values: Vec<EnumDefinition> =
            serde_json::from_value(serde_json::Value::from(node.clone())).map_err(|e| {
                ModelError::InvalidTrait {
                    shape: shape.clone(),
                    trait_id: Self::id(),
                    reason: e.to_string(),
                }
            })?;
        Ok(EnumTrait { values })
    }

    pub fn values(&self) -> &[EnumDefinition] {
        &self.values
    }
}
