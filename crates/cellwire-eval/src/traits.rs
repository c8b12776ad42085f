//! The seam between the resolver and whatever actually runs cell code.
//!
//! The engine never inspects cell source text. It hands the text and a
//! merged ancestor environment to an [`Evaluator`] and gets back an updated
//! environment plus a result record. Host-language concerns (parsing,
//! exceptions, runtime introspection of the trailing value) stay behind this
//! trait; the resolver only sees the closed [`Payload`] classification.

use cellwire_common::{Environment, Value};

/// Executes one cell's code against a given environment.
///
/// Takes `&mut self` because real hosts are stateful (interpreter handles,
/// pooled runtimes). Failures internal to running the code are reported
/// through [`ExecResult::error`], never by panicking or by a separate
/// channel: the resolver decides whether a failure is fatal based on where
/// the node sits in the graph, not on how the host reported it.
pub trait Evaluator {
    fn evaluate(&mut self, source: &str, env: &Environment) -> ExecOutcome;
}

/// What the execution host hands back for one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecOutcome {
    /// The input bindings plus whatever the cell's own code defined or
    /// mutated. On failure this may be a partial environment, down to the
    /// unchanged input.
    pub env: Environment,
    pub result: ExecResult,
}

/// The result record for one cell evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecResult {
    /// Captured textual output (stdout-style), possibly empty.
    pub text: String,
    /// Classification of the trailing value, if any.
    pub payload: Payload,
    /// Host-reported evaluation failure.
    pub error: Option<String>,
}

impl ExecResult {
    pub fn ok(text: String, payload: Payload) -> Self {
        Self {
            text,
            payload,
            error: None,
        }
    }

    pub fn failed<S: Into<String>>(text: String, message: S) -> Self {
        Self {
            text,
            payload: Payload::None,
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Closed classification of a cell's trailing value, produced by the host.
///
/// The resolver and formatter dispatch on this tag alone; no host-language
/// type introspection leaks past the [`Evaluator`] boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The cell ended on a statement; there is no trailing value.
    None,
    /// A scalar/text trailing value.
    Plain(Value),
    /// A rendered artifact such as an image, already encoded by the host.
    RichMedia { mime: String, base64: String },
    /// A markup snippet (e.g. an HTML table) plus its plain-text fallback.
    Markup { markup: String, plain: String },
}
