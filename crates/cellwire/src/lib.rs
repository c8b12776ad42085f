//! Meta crate that re-exports the primary Cellwire building blocks with
//! sensible defaults. Downstream users can depend on this crate and opt into
//! specific layers via feature flags while keeping access to the underlying
//! crates when deeper integration is required.

#[cfg(feature = "common")]
pub use cellwire_common as common;

#[cfg(feature = "eval")]
pub use cellwire_eval as eval;

#[cfg(feature = "canvas")]
pub use cellwire_canvas as canvas;

#[cfg(feature = "common")]
pub use cellwire_common::{CanvasError, CanvasErrorKind, Environment, NodeId, Value};

#[cfg(feature = "eval")]
pub use cellwire_eval::{
    Edge, Evaluator, ExecOutcome, ExecResult, Node, Output, Payload, Resolution,
    resolve_and_evaluate,
};

#[cfg(feature = "canvas")]
pub use cellwire_canvas::{CanvasArrow, CanvasBox, CanvasWorkspace, JsonStore, execute_box};
