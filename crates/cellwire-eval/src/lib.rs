pub mod engine;
pub mod format;
pub mod test_support;
pub mod traits;

pub use engine::{
    AncestorFailure, DependencyGraph, Edge, EnvCache, Node, Resolution, Resolver,
    resolve_and_evaluate,
};
pub use format::{Output, OutputData, RichOutput, format_result};
pub use traits::{Evaluator, ExecOutcome, ExecResult, Payload};

// Re-export for convenience
pub use cellwire_common::{CanvasError, CanvasErrorKind, Environment, NodeId, Value};
