use crate::model::{Shape, ShapeGraph};
use crate::occurrence::TextOccurrence;
use crate::types::ShapeId;
use crate::walker::TraitWalker;
use log::debug;
use std::collections::HashSet;

/// Collects every text occurrence in `graph`, skipping prelude shapes.
///
/// Each shape is visited at most once: a member shape reachable from several
/// parents is reported under whichever parent reaches it first.
pub fn extract_text<G: ShapeGraph + ?Sized>(graph: &G) -> Vec<TextOccurrence> {
    TextExtractor::new(graph).run()
}

/// Single-use traversal state for [`extract_text`].
pub struct TextExtractor<'g, G: ShapeGraph + ?Sized> {
    graph: &'g G,
    visited: HashSet<ShapeId>,
    occurrences: Vec<TextOccurrence>,
}

impl<'g, G: ShapeGraph + ?Sized> TextExtractor<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        TextExtractor {
            graph,
            visited: HashSet::new(),
            occurrences: Vec::new(),
        }
    }

    pub fn run(mut self) -> Vec<TextOccurrence> {
        let graph = self.graph;
        let mut skipped = 0usize;
        for shape in graph.shapes() {
            if graph.is_prelude_shape(shape) {
                skipped += 1;
                continue;
            }
            self.visit(shape);
        }
        debug!(
            "Extracted {} text occurrences from {} shapes ({} prelude shapes skipped)",
            self.occurrences.len(),
            self.visited.len(),
            skipped
        );
        self.occurrences
    }

    fn visit(&mut self, shape: &'g Shape) {
        if !self.visited.insert(shape.id().clone()) {
            return;
        }

        self.occurrences.push(TextOccurrence::shape_name(
            shape.id().clone(),
            shape.display_name(),
        ));

        for (trait_id, value) in shape.traits() {
            TraitWalker::new(shape.id(), trait_id, &mut self.occurrences).walk_trait(value);
        }

        let graph = self.graph;
        for member_id in shape.members() {
            match graph.get_shape(member_id) {
                Some(member) if graph.is_prelude_shape(member) => {}
                Some(member) => self.visit(member),
                None => debug!("Member {} of {} is not in the model", member_id, shape.id()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Model, Node, ShapeType};
    use crate::types::PRELUDE_NAMESPACE;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc() -> ShapeId {
        ShapeId::new(PRELUDE_NAMESPACE, "documentation")
    }

    fn texts(occurrences: &[TextOccurrence]) -> Vec<&str> {
        occurrences.iter().map(TextOccurrence::text).collect()
    }

    #[test]
    fn empty_model_yields_nothing() {
        assert!(extract_text(&Model::default()).is_empty());
    }

    #[test]
    fn shape_then_traits_then_members() {
        let person = ShapeId::new("example", "Person");
        let model = Model::builder()
            .add_shape(
                Shape::new(person.clone(), ShapeType::Structure).with_trait(doc(), "A human"),
            )
            .unwrap()
            .add_shape(
                Shape::member(&person, "name", ShapeId::new(PRELUDE_NAMESPACE, "String"))
                    .with_trait(doc(), "Full name"),
            )
            .unwrap()
            .build();

        let out = extract_text(&model);
        assert_eq!(texts(&out), ["Person", "A human", "name", "Full name"]);
        assert!(out[0].is_shape_name());
        assert_eq!(out[1].trait_id(), Some(&doc()));
        assert_eq!(out[2].shape(), &person.with_member("name"));
        assert_eq!(out[3].shape(), &person.with_member("name"));
    }

    #[test]
    fn prelude_shapes_are_skipped() {
        let model = Model::builder()
            .add_shape(
                Shape::new(ShapeId::new(PRELUDE_NAMESPACE, "String"), ShapeType::String)
                    .with_trait(doc(), "builtin"),
            )
            .unwrap()
            .build();
        assert!(extract_text(&model).is_empty());
    }

    #[test]
    fn trait_values_of_every_kind_are_walked() {
        let tags = ShapeId::new(PRELUDE_NAMESPACE, "tags");
        let model = Model::builder()
            .add_shape(
                Shape::new(ShapeId::new("example", "Thing"), ShapeType::String)
                    .with_trait(tags.clone(), Node::from(json!(["alpha", 3, "beta"]))),
            )
            .unwrap()
            .build();
        let out = extract_text(&model);
        assert_eq!(texts(&out), ["Thing", "alpha", "beta"]);
        assert_eq!(out[2].path_string(), "[2]");
    }
}
