use crate::model::node::Node;
use crate::types::ShapeId;
use indexmap::IndexMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeType {
    Blob,
    Boolean,
    String,
    Integer,
    Long,
    Float,
    Double,
    Timestamp,
    Document,
    List,
    Map,
    Structure,
    Union,
    Service,
    Operation,
    Resource,
    /// A member slot owned by an aggregate shape, pointing at `target`.
    Member { target: ShapeId },
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ShapeType::Blob => "blob",
            ShapeType::Boolean => "boolean",
            ShapeType::String => "string",
            ShapeType::Integer => "integer",
            ShapeType::Long => "long",
            ShapeType::Float => "float",
            ShapeType::Double => "double",
            ShapeType::Timestamp => "timestamp",
            ShapeType::Document => "document",
            ShapeType::List => "list",
            ShapeType::Map => "map",
            ShapeType::Structure => "structure",
            ShapeType::Union => "union",
            ShapeType::Service => "service",
            ShapeType::Operation => "operation",
            ShapeType::Resource => "resource",
            ShapeType::Member { .. } => "member",
        };
        f.write_str(label)
    }
}

/// Immutable description of one shape in the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    shape_type: ShapeType,
    /// Applied traits, keyed by trait shape id, in application order.
    traits: IndexMap<ShapeId, Node>,
    /// Ids of the member shapes owned (or shared) by this shape.
    members: Vec<ShapeId>,
}

impl Shape {
    pub fn new(id: ShapeId, shape_type: ShapeType) -> Self {
        Shape {
            id,
            shape_type,
            traits: IndexMap::new(),
            members: Vec::new(),
        }
    }

    /// Member shape `parent$name` targeting `target`.
    pub fn member(parent: &ShapeId, name: &str, target: ShapeId) -> Self {
        Shape::new(parent.with_member(name), ShapeType::Member { target })
    }

    pub fn with_trait(mut self, trait_id: ShapeId, value: impl Into<Node>) -> Self {
        self.traits.insert(trait_id, value.into());
        self
    }

    /// Lists `member` among this shape's members, even if it is owned by
    /// another shape.
    pub fn with_member_ref(mut self, member: ShapeId) -> Self {
        self.add_member_ref(member);
        self
    }

    pub(crate) fn add_member_ref(&mut self, member: ShapeId) {
        if !self.members.contains(&member) {
            self.members.push(member);
        }
    }

    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    pub fn shape_type(&self) -> &ShapeType {
        &self.shape_type
    }

    pub fn is_member_shape(&self) -> bool {
        matches!(self.shape_type, ShapeType::Member { .. })
    }

    pub fn target(&self) -> Option<&ShapeId> {
        match &self.shape_type {
            ShapeType::Member { target } => Some(target),
            _ => None,
        }
    }

    /// The text a reader sees for this shape: its declared name, or the
    /// member name for member shapes.
    pub fn display_name(&self) -> &str {
        match (self.is_member_shape(), self.id.member()) {
            (true, Some(member)) => member,
            _ => self.id.name(),
        }
    }

    pub fn traits(&self) -> impl Iterator<Item = (&ShapeId, &Node)> {
        self.traits.iter()
    }

    pub fn get_trait(&self, trait_id: &ShapeId) -> Option<&Node> {
        self.traits.get(trait_id)
    }

    pub fn has_trait(&self, trait_id: &ShapeId) -> bool {
        self.traits.contains_key(trait_id)
    }

    pub fn members(&self) -> &[ShapeId] {
        &self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PRELUDE_NAMESPACE;

    #[test]
    fn member_display_name_is_member_component() {
        let parent = ShapeId::new("example.weather", "Forecast");
        let float = ShapeId::new(PRELUDE_NAMESPACE, "Float");
        let member = Shape::member(&parent, "chanceOfRain", float);
        assert!(member.is_member_shape());
        assert_eq!(member.display_name(), "chanceOfRain");
        assert_eq!(member.target().map(|t| t.name()), Some("Float"));

        let shape = Shape::new(parent, ShapeType::Structure);
        assert_eq!(shape.display_name(), "Forecast");
        assert_eq!(shape.shape_type().to_string(), "structure");
    }

    #[test]
    fn member_refs_are_not_duplicated() {
        let parent = ShapeId::new("example.weather", "Forecast");
        let member = parent.with_member("city");
        let shape = Shape::new(parent, ShapeType::Structure)
            .with_member_ref(member.clone())
            .with_member_ref(member);
        assert_eq!(shape.members().len(), 1);
    }

    #[test]
    fn traits_keep_application_order() {
        let shape = Shape::new(ShapeId::new("ns", "A"), ShapeType::String)
            .with_trait(ShapeId::new(PRELUDE_NAMESPACE, "sensitive"), Node::default())
            .with_trait(ShapeId::new(PRELUDE_NAMESPACE, "documentation"), "docs");
        let names: Vec<_> = shape.traits().map(|(id, _)| id.name().to_string()).collect();
        assert_eq!(names, ["sensitive", "documentation"]);
    }
}
