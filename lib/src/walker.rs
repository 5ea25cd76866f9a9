//! Recursive descent into a single trait value.
//!
//! Every string scalar and every object key reachable from the trait value is
//! emitted as a [`TextOccurrence`], located by the property path leading to
//! it: object keys contribute `key` (first segment) or `.key`, array elements
//! contribute `[index]`.

use crate::model::Node;
use crate::occurrence::TextOccurrence;
use crate::types::ShapeId;

/// Property path under construction during a walk.
///
/// Segments are only ever added through [`PropertyPath::with_segment`], which
/// restores the path to its previous depth on return, so siblings never see
/// each other's segments.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    segments: Vec<String>,
}

impl PropertyPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.segments.clone()
    }

    /// Segment for an object key at the current position. The first segment
    /// of a path carries no leading dot.
    pub fn key_segment(&self, key: &str) -> String {
        if self.segments.is_empty() {
            key.to_string()
        } else {
            format!(".{}", key)
        }
    }

    pub fn index_segment(index: usize) -> String {
        format!("[{}]", index)
    }

    /// Runs `f` with `segment` appended, then restores the previous depth.
    pub fn with_segment<R>(&mut self, segment: String, f: impl FnOnce(&mut Self) -> R) -> R {
        let depth = self.segments.len();
        self.segments.push(segment);
        let result = f(self);
        self.segments.truncate(depth);
        result
    }
}

/// Emits the occurrences found in one trait value applied to one shape.
pub struct TraitWalker<'a> {
    shape: &'a ShapeId,
    trait_id: &'a ShapeId,
    out: &'a mut Vec<TextOccurrence>,
}

impl<'a> TraitWalker<'a> {
    pub fn new(
        shape: &'a ShapeId,
        trait_id: &'a ShapeId,
        out: &'a mut Vec<TextOccurrence>,
    ) -> Self {
        TraitWalker {
            shape,
            trait_id,
            out,
        }
    }

    /// Walks `node` starting from an empty path.
    pub fn walk_trait(mut self, node: &Node) {
        let mut path = PropertyPath::new();
        self.walk(node, &mut path);
    }

    /// Recurses once per nesting level, so stack use grows with the depth of
    /// `node`.
    pub fn walk(&mut self, node: &Node, path: &mut PropertyPath) {
        match node {
            Node::String(text) => self.emit(text, path, false),
            Node::Object(members) => {
                for (key, value) in members {
                    let segment = path.key_segment(key);
                    path.with_segment(segment, |path| {
                        self.emit(key, path, true);
                        match value {
                            Node::String(text) => self.emit(text, path, false),
                            _ => self.walk(value, path),
                        }
                    });
                }
            }
            Node::Array(elements) => {
                for (index, element) in elements.iter().enumerate() {
                    path.with_segment(PropertyPath::index_segment(index), |path| {
                        self.walk(element, path)
                    });
                }
            }
            // not text, nothing to descend into
            Node::Null | Node::Boolean(_) | Node::Number(_) => {}
        }
    }

    fn emit(&mut self, text: &str, path: &PropertyPath, is_trait_key_name: bool) {
        self.out.push(TextOccurrence::in_trait(
            self.shape,
            self.trait_id,
            text,
            path.snapshot(),
            is_trait_key_name,
        ));
    }
}
