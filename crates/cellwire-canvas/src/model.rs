//! Serde models for the canvas workspace file.
//!
//! A workspace is what the editor persists: boxes with canvas geometry and
//! code, and arrows wiring them into a dependency graph. The engine never
//! sees geometry; [`CanvasWorkspace::nodes`] and [`CanvasWorkspace::edges`]
//! strip a workspace down to the resolver's structural inputs.

use serde::{Deserialize, Serialize};

use cellwire_eval::{Edge, Node};

/// An executable cell on the canvas.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CanvasBox {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// The code this box runs.
    pub content: String,
    /// Last-known result, persisted so a reopened workspace shows stale
    /// output until the box is re-run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<StoredResult>,
}

impl CanvasBox {
    pub fn new<I: Into<String>, C: Into<String>>(id: I, content: C) -> Self {
        Self {
            id: id.into(),
            x: 0.0,
            y: 0.0,
            width: 200.0,
            height: 120.0,
            content: content.into(),
            results: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

/// A directed dependency arrow: `target` depends on `source`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CanvasArrow {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl CanvasArrow {
    pub fn new<I, S, T>(id: I, source: S, target: T) -> Self
    where
        I: Into<String>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Output summary persisted with a box.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StoredResult {
    /// Either a plain string or the structured `{text_output, data}` record.
    pub output: serde_json::Value,
    #[serde(default)]
    pub error: bool,
}

/// The whole persisted canvas.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CanvasWorkspace {
    #[serde(default)]
    pub boxes: Vec<CanvasBox>,
    #[serde(default)]
    pub arrows: Vec<CanvasArrow>,
}

impl CanvasWorkspace {
    pub fn find_box(&self, id: &str) -> Option<&CanvasBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    pub fn find_box_mut(&mut self, id: &str) -> Option<&mut CanvasBox> {
        self.boxes.iter_mut().find(|b| b.id == id)
    }

    /// Engine-facing node set: identity plus code, geometry dropped.
    pub fn nodes(&self) -> Vec<Node> {
        self.boxes
            .iter()
            .map(|b| Node::new(b.id.as_str(), b.content.clone()))
            .collect()
    }

    /// Engine-facing edge set, in arrow order. Arrow order is load-bearing:
    /// it decides merge precedence for shared ancestor bindings.
    pub fn edges(&self) -> Vec<Edge> {
        self.arrows
            .iter()
            .map(|a| Edge::new(a.source.as_str(), a.target.as_str()))
            .collect()
    }
}
