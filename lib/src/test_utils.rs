//! Model fixtures and test doubles shared by unit and integration tests.

use crate::error::ModelError;
use crate::model::{EnumTrait, Model, Node, Shape, ShapeGraph, ShapeType};
use crate::types::{ShapeId, PRELUDE_NAMESPACE};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const NAMESPACE: &str = "example.weather";

pub fn prelude(name: &str) -> ShapeId {
    ShapeId::new(PRELUDE_NAMESPACE, name)
}

pub fn local(name: &str) -> ShapeId {
    ShapeId::new(NAMESPACE, name)
}

/// A small service model: a structure with documented members, an enum with
/// one badly named constant, an operation with examples, and a prelude shape.
pub fn weather_model() -> Result<Model, ModelError> {
    let forecast = local("Forecast");
    let shapes = vec![
        Shape::new(prelude("String"), ShapeType::String)
            .with_trait(prelude("documentation"), "Built-in string"),
        Shape::new(forecast.clone(), ShapeType::Structure)
            .with_trait(prelude("documentation"), "Weather forecast for a city"),
        Shape::member(&forecast, "city", prelude("String"))
            .with_trait(prelude("required"), Node::default()),
        Shape::member(&forecast, "conditions", local("Conditions")).with_trait(
            prelude("documentation"),
            "Expected conditions, reported by the master station",
        ),
        Shape::new(local("Conditions"), ShapeType::String).with_trait(
            EnumTrait::id(),
            Node::from(json!([
                {"value": "sunny", "name": "SUNNY"},
                {"value": "rain", "name": "heavy_rain", "tags": ["wet"]},
                {"value": "snow"}
            ])),
        ),
        Shape::new(local("GetForecast"), ShapeType::Operation).with_trait(
            prelude("examples"),
            Node::from(json!([
                {"title": "Seattle", "input": {"city": "Seattle"}, "documentation": null}
            ])),
        ),
    ];
    Ok(Model::builder().add_shapes(shapes)?.build())
}

/// Wraps a graph and counts how often its shapes are enumerated.
pub struct CountingGraph<G> {
    inner: G,
    enumerations: AtomicUsize,
}

impl<G: ShapeGraph> CountingGraph<G> {
    pub fn new(inner: G) -> Self {
        CountingGraph {
            inner,
            enumerations: AtomicUsize::new(0),
        }
    }

    pub fn enumerations(&self) -> usize {
        self.enumerations.load(Ordering::SeqCst)
    }
}

impl<G: ShapeGraph> ShapeGraph for CountingGraph<G> {
    fn shapes(&self) -> Box<dyn Iterator<Item = &Shape> + '_> {
        self.enumerations.fetch_add(1, Ordering::SeqCst);
        self.inner.shapes()
    }

    fn get_shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.inner.get_shape(id)
    }
}
