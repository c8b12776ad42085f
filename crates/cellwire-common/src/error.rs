//! Structural error representation shared across the Cellwire stack.
//!
//! - **`CanvasErrorKind`** : the canonical set of failure codes
//! - **`CanvasError`**     : kind + optional message + offending node
//!
//! Evaluation failures inside a cell's code travel through the execution
//! host's result record, not through this type; `CanvasError` covers the
//! graph-structural failures the resolver itself can produce, plus the
//! persistence layer's storage failures.

use std::{error::Error, fmt};

use crate::NodeId;

/// All recognised Cellwire failure codes.
///
/// Names are CamelCase (idiomatic Rust) while `Display` renders stable codes
/// (`#CYCLE!`, ...) that survive into user-facing diagnostics.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CanvasErrorKind {
    /// A target id or edge endpoint has no corresponding node.
    NodeNotFound,
    /// A node on the active recursion path was revisited.
    Cycle,
    /// The execution host reported a failure for the target node.
    Eval,
    /// Workspace persistence failed (I/O or serialization).
    Workspace,
}

impl fmt::Display for CanvasErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NodeNotFound => "#NOTFOUND!",
            Self::Cycle => "#CYCLE!",
            Self::Eval => "#EVAL!",
            Self::Workspace => "#WORKSPACE!",
        })
    }
}

/// The single error struct the stack passes around.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanvasError {
    pub kind: CanvasErrorKind,
    pub message: Option<String>,
    /// The node the failure is attributed to, when one exists.
    pub node: Option<NodeId>,
}

impl From<CanvasErrorKind> for CanvasError {
    fn from(kind: CanvasErrorKind) -> Self {
        Self {
            kind,
            message: None,
            node: None,
        }
    }
}

impl CanvasError {
    /// Basic constructor (no message, no node).
    pub fn new(kind: CanvasErrorKind) -> Self {
        kind.into()
    }

    /// Attach a human-readable explanation.
    pub fn with_message<S: Into<String>>(mut self, msg: S) -> Self {
        self.message = Some(msg.into());
        self
    }

    /// Attach the node the failure is attributed to.
    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(ref msg) = self.message {
            write!(f, ": {msg}")?;
        }
        if let Some(ref node) = self.node {
            write!(f, " (node '{node}')")?;
        }
        Ok(())
    }
}

impl Error for CanvasError {}

impl From<CanvasError> for String {
    fn from(error: CanvasError) -> Self {
        format!("{error}")
    }
}
