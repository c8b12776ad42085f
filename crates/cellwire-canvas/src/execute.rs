//! Bridges a persisted workspace to the resolution engine.

use cellwire_common::NodeId;
use cellwire_eval::{Evaluator, Output, OutputData, Resolution, resolve_and_evaluate};
use serde_json::json;

use crate::model::{CanvasWorkspace, StoredResult};

/// Run one box against its ancestors.
///
/// The caller-supplied `code` overrides the stored box content for the
/// target, so an editor can execute unsaved text against saved ancestors.
/// Every failure comes back inside the [`Resolution`]; this never panics on
/// bad input.
pub fn execute_box<E: Evaluator>(
    evaluator: &mut E,
    workspace: &CanvasWorkspace,
    box_id: &str,
    code: &str,
) -> Resolution {
    let nodes = workspace.nodes();
    let edges = workspace.edges();
    resolve_and_evaluate(evaluator, &NodeId::from(box_id), code, &nodes, &edges)
}

/// Write the outcome back onto the box so it persists with the workspace.
/// A no-op when the box is gone (deleted between execute and save).
pub fn record_result(workspace: &mut CanvasWorkspace, box_id: &str, resolution: &Resolution) {
    if let Some(canvas_box) = workspace.find_box_mut(box_id) {
        canvas_box.results = Some(StoredResult {
            output: output_to_json(&resolution.output),
            error: resolution.error,
        });
    }
}

/// Serialize an output into the workspace file's result shape: a bare string
/// for plain text, otherwise `{text_output, data}` keyed by media type.
pub fn output_to_json(output: &Output) -> serde_json::Value {
    match output {
        Output::Text(text) => json!(text),
        Output::Rich(rich) => {
            let data = match &rich.data {
                OutputData::Plain(plain) => json!({ "text/plain": plain }),
                OutputData::Media { mime, base64 } => {
                    let mut map = serde_json::Map::new();
                    map.insert(mime.clone(), json!(base64));
                    serde_json::Value::Object(map)
                }
                OutputData::Markup { markup, plain } => {
                    json!({ "text/html": markup, "text/plain": plain })
                }
            };
            json!({
                "text_output": rich.text,
                "data": data,
            })
        }
    }
}
