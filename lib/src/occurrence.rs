use crate::error::OccurrenceError;
use crate::types::ShapeId;
use serde::Serialize;

/// One located piece of text found in a model.
///
/// Either the name of `shape` (no trait), or a key or value inside the
/// trait `trait_id` applied to `shape`, located by `property_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOccurrence {
    text: String,
    shape: ShapeId,
    #[serde(rename = "trait", skip_serializing_if = "Option::is_none")]
    trait_id: Option<ShapeId>,
    property_path: Vec<String>,
    is_trait_key_name: bool,
}

impl TextOccurrence {
    pub fn builder() -> TextOccurrenceBuilder {
        TextOccurrenceBuilder::default()
    }

    pub(crate) fn shape_name(shape: ShapeId, text: &str) -> Self {
        TextOccurrence {
            text: text.to_string(),
            shape,
            trait_id: None,
            property_path: Vec::new(),
            is_trait_key_name: false,
        }
    }

    pub(crate) fn in_trait(
        shape: &ShapeId,
        trait_id: &ShapeId,
        text: &str,
        property_path: Vec<String>,
        is_trait_key_name: bool,
    ) -> Self {
        TextOccurrence {
            text: text.to_string(),
            shape: shape.clone(),
            trait_id: Some(trait_id.clone()),
            property_path,
            is_trait_key_name,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn shape(&self) -> &ShapeId {
        &self.shape
    }

    pub fn trait_id(&self) -> Option<&ShapeId> {
        self.trait_id.as_ref()
    }

    pub fn property_path(&self) -> &[String] {
        &self.property_path
    }

    /// The property path joined into one string, e.g. `values[0].name`.
    pub fn path_string(&self) -> String {
        self.property_path.concat()
    }

    pub fn is_trait_key_name(&self) -> bool {
        self.is_trait_key_name
    }

    pub fn is_shape_name(&self) -> bool {
        self.trait_id.is_none()
    }
}

#[derive(Debug, Default, Clone)]
pub struct TextOccurrenceBuilder {
    text: Option<String>,
    shape: Option<ShapeId>,
    trait_id: Option<ShapeId>,
    property_path: Vec<String>,
    is_trait_key_name: bool,
}

impl TextOccurrenceBuilder {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn shape(mut self, shape: ShapeId) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn trait_id(mut self, trait_id: ShapeId) -> Self {
        self.trait_id = Some(trait_id);
        self
    }

    /// Copies `path`; later changes to the caller's path are not observed.
    pub fn property_path(mut self, path: &[String]) -> Self {
        self.property_path = path.to_vec();
        self
    }

    pub fn is_trait_key_name(mut self, is_trait_key_name: bool) -> Self {
        self.is_trait_key_name = is_trait_key_name;
        self
    }

    pub fn build(self) -> Result<TextOccurrence, OccurrenceError> {
        let shape = self.shape.ok_or(OccurrenceError::MissingShape)?;
        let text = self.text.ok_or(OccurrenceError::MissingText)?;
        Ok(TextOccurrence {
            text,
            shape,
            trait_id: self.trait_id,
            property_path: self.property_path,
            is_trait_key_name: self.is_trait_key_name,
        })
    }
}
