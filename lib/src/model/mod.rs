pub mod enum_trait;
pub mod graph;
pub mod node;
pub mod shapes;

pub use enum_trait::{EnumDefinition, EnumTrait};
pub use graph::{Model, ModelBuilder, ShapeGraph};
pub use node::Node;
pub use shapes::{Shape, ShapeType};
