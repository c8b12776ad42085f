//! End-to-end: persisted workspace in, executed box result out.
use cellwire_canvas::{
    CanvasArrow, CanvasBox, CanvasWorkspace, execute_box, output_to_json, record_result,
};
use cellwire_eval::test_support::ScriptEvaluator;
use serde_json::json;

fn workspace() -> CanvasWorkspace {
    CanvasWorkspace {
        boxes: vec![
            CanvasBox::new("a", "x = 1"),
            CanvasBox::new("b", "x = 2"),
            CanvasBox::new("c", "x"),
        ],
        arrows: vec![
            CanvasArrow::new("e1", "a", "c"),
            CanvasArrow::new("e2", "b", "c"),
        ],
    }
}

#[test]
fn execute_resolves_ancestors_through_the_workspace() {
    let workspace = workspace();
    let mut evaluator = ScriptEvaluator::new();

    let resolution = execute_box(&mut evaluator, &workspace, "c", "x");

    assert!(!resolution.error);
    assert_eq!(
        output_to_json(&resolution.output),
        json!({ "text_output": null, "data": { "text/plain": "2" } })
    );
}

#[test]
fn recorded_result_persists_on_the_box() {
    let mut workspace = workspace();
    let mut evaluator = ScriptEvaluator::new();

    let resolution = execute_box(&mut evaluator, &workspace, "c", "x");
    record_result(&mut workspace, "c", &resolution);

    let stored = workspace.find_box("c").unwrap().results.as_ref().unwrap();
    assert!(!stored.error);
    assert_eq!(stored.output["data"]["text/plain"], "2");
}

#[test]
fn plain_text_output_is_stored_as_a_bare_string() {
    let mut workspace = workspace();
    let mut evaluator = ScriptEvaluator::new();

    let resolution = execute_box(&mut evaluator, &workspace, "a", "print 1");
    record_result(&mut workspace, "a", &resolution);

    let stored = workspace.find_box("a").unwrap().results.as_ref().unwrap();
    assert_eq!(stored.output, json!("1"));
}

#[test]
fn unknown_box_id_reports_an_error_resolution() {
    let workspace = workspace();
    let mut evaluator = ScriptEvaluator::new();

    let resolution = execute_box(&mut evaluator, &workspace, "ghost", "x");

    assert!(resolution.error);
    let diagnostic = output_to_json(&resolution.output);
    assert!(diagnostic.as_str().unwrap().contains("#NOTFOUND!"));
}

#[test]
fn failed_target_is_recorded_with_the_error_flag() {
    let mut workspace = workspace();
    let mut evaluator = ScriptEvaluator::new();

    let resolution = execute_box(&mut evaluator, &workspace, "c", "fail boom");
    record_result(&mut workspace, "c", &resolution);

    let stored = workspace.find_box("c").unwrap().results.as_ref().unwrap();
    assert!(stored.error);
    let diagnostic = stored.output.as_str().unwrap();
    assert!(diagnostic.contains("#EVAL!"), "got: {diagnostic}");
    assert!(diagnostic.contains("boom"), "got: {diagnostic}");
}

#[test]
fn rich_media_output_shape() {
    let workspace = CanvasWorkspace {
        boxes: vec![CanvasBox::new("plot", "media image/png aGVsbG8=")],
        arrows: vec![],
    };
    let mut evaluator = ScriptEvaluator::new();

    let resolution = execute_box(&mut evaluator, &workspace, "plot", "media image/png aGVsbG8=");

    assert_eq!(
        output_to_json(&resolution.output),
        json!({ "text_output": null, "data": { "image/png": "aGVsbG8=" } })
    );
}

#[test]
fn markup_output_carries_both_representations() {
    let workspace = CanvasWorkspace {
        boxes: vec![CanvasBox::new("table", "")],
        arrows: vec![],
    };
    let mut evaluator = ScriptEvaluator::new();

    let resolution = execute_box(&mut evaluator, &workspace, "table", "markup <b>hi</b>");

    assert_eq!(
        output_to_json(&resolution.output),
        json!({
            "text_output": null,
            "data": { "text/html": "<b>hi</b>", "text/plain": "<b>hi</b>" }
        })
    );
}
