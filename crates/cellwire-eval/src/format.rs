//! Shapes a raw evaluation result for the caller.
//!
//! Purely presentational: nothing here recomputes or alters the resolution
//! outcome. A cell that ended on a statement yields plain captured text; a
//! cell with a trailing value yields a structured record pairing optional
//! captured text with the typed payload.

use std::fmt::{self, Display};

use crate::traits::{ExecResult, Payload};

/// Caller-facing output of one resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Captured text only (possibly empty), or a diagnostic on failure.
    Text(String),
    /// Captured text plus a typed trailing value.
    Rich(RichOutput),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RichOutput {
    pub text: Option<String>,
    pub data: OutputData,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutputData {
    /// Textual representation of a scalar trailing value.
    Plain(String),
    /// A rendered artifact, already encoded by the execution host.
    Media { mime: String, base64: String },
    /// A markup snippet plus its plain-text fallback.
    Markup { markup: String, plain: String },
}

impl Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Text(text) => f.write_str(text),
            Output::Rich(rich) => match &rich.data {
                OutputData::Plain(plain) => f.write_str(plain),
                OutputData::Media { mime, .. } => write!(f, "<{mime}>"),
                OutputData::Markup { plain, .. } => f.write_str(plain),
            },
        }
    }
}

/// Map a host result record into the caller-facing shape.
pub fn format_result(result: &ExecResult) -> Output {
    let text = result.text.trim();
    match &result.payload {
        Payload::None => Output::Text(text.to_string()),
        Payload::Plain(value) => Output::Rich(RichOutput {
            text: non_empty(text),
            data: OutputData::Plain(value.to_string()),
        }),
        Payload::RichMedia { mime, base64 } => Output::Rich(RichOutput {
            text: non_empty(text),
            data: OutputData::Media {
                mime: mime.clone(),
                base64: base64.clone(),
            },
        }),
        Payload::Markup { markup, plain } => Output::Rich(RichOutput {
            text: non_empty(text),
            data: OutputData::Markup {
                markup: markup.clone(),
                plain: plain.clone(),
            },
        }),
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
