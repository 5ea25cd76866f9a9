use crate::error::ModelError;
use crate::model::shapes::Shape;
use crate::types::ShapeId;
use indexmap::IndexMap;

/// Read access to a set of uniquely identified shapes.
///
/// Implementations must be immutable for as long as they are shared, since
/// derived data (such as extracted text) is cached per graph instance.
pub trait ShapeGraph: Send + Sync {
    /// All shapes, member shapes included, in the graph's native order.
    fn shapes(&self) -> Box<dyn Iterator<Item = &Shape> + '_>;

    fn get_shape(&self, id: &ShapeId) -> Option<&Shape>;

    /// Built-in shapes never contribute text.
    fn is_prelude_shape(&self, shape: &Shape) -> bool {
        shape.id().is_prelude()
    }

    fn shapes_with_trait<'a>(
        &'a self,
        trait_id: &'a ShapeId,
    ) -> Box<dyn Iterator<Item = &'a Shape> + 'a> {
        Box::new(self.shapes().filter(move |shape| shape.has_trait(trait_id)))
    }
}

/// In-memory shape graph.
#[derive(Debug, Clone, Default)]
pub struct Model {
    shapes: IndexMap<ShapeId, Shape>,
}

impl Model {
    pub fn builder() -> ModelBuilder {
        ModelBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl ShapeGraph for Model {
    fn shapes(&self) -> Box<dyn Iterator<Item = &Shape> + '_> {
        Box::new(self.shapes.values())
    }

    fn get_shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }
}

#[derive(Debug, Default)]
pub struct ModelBuilder {
    shapes: IndexMap<ShapeId, Shape>,
}

impl ModelBuilder {
    /// Adds a shape. Member shapes are linked to their parent when the model
    /// is built, whichever order the two were added in.
    pub fn add_shape(&mut self, shape: Shape) -> Result<&mut Self, ModelError> {
        if shape.is_member_shape() && shape.id().member().is_none() {
            return Err(ModelError::MemberWithoutName(shape.id().clone()));
        }
        if self.shapes.contains_key(shape.id()) {
            return Err(ModelError::DuplicateShape(shape.id().clone()));
        }
        self.shapes.insert(shape.id().clone(), shape);
        Ok(self)
    }

    pub fn add_shapes<I>(&mut self, shapes: I) -> Result<&mut Self, ModelError>
    where
        I: IntoIterator<Item = Shape>,
    {
        for shape in shapes {
            self.add_shape(shape)?;
        }
        Ok(self)
    }

    pub fn build(&mut self) -> Model {
        let mut shapes = std::mem::take(&mut self.shapes);
        let owned: Vec<(ShapeId, ShapeId)> = shapes
            .values()
            .filter(|shape| shape.is_member_shape())
            .map(|shape| (shape.id().without_member(), shape.id().clone()))
            .collect();
        for (parent, member) in owned {
            if let Some(parent) = shapes.get_mut(&parent) {
                parent.add_member_ref(member);
            }
        }
        Model { shapes }
    }
}
