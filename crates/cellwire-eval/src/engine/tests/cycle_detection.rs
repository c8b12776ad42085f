//! Cycle detection along the active recursion path.
use super::common::{edge, node};
use crate::engine::{DependencyGraph, EnvCache, Resolver, resolve_and_evaluate};
use crate::format::Output;
use crate::test_support::ScriptEvaluator;
use cellwire_common::{CanvasErrorKind, NodeId};

fn ring() -> (Vec<crate::engine::Node>, Vec<crate::engine::Edge>) {
    let nodes = vec![
        node("A", "a = 1"),
        node("B", "b = 2"),
        node("C", "c = 3"),
        node("D", "d = 4"),
    ];
    // A -> B -> C -> A, plus D off on its own.
    let edges = vec![edge("A", "B"), edge("B", "C"), edge("C", "A")];
    (nodes, edges)
}

#[test]
fn three_node_cycle_is_fatal_and_names_a_cycle_node() {
    let (nodes, edges) = ring();

    let mut evaluator = ScriptEvaluator::new();
    let resolution = resolve_and_evaluate(&mut evaluator, &NodeId::from("C"), "c = 3", &nodes, &edges);

    assert!(resolution.error);
    let Output::Text(diagnostic) = &resolution.output else {
        panic!("cycle failure must render as a text diagnostic");
    };
    assert!(diagnostic.contains("#CYCLE!"), "got: {diagnostic}");
    // The revisited node is the target itself: C -> B -> A -> C.
    assert!(diagnostic.contains("'C'"), "got: {diagnostic}");
}

#[test]
fn node_outside_the_cycle_still_resolves() {
    let (nodes, edges) = ring();

    let mut evaluator = ScriptEvaluator::new();
    let resolution = resolve_and_evaluate(&mut evaluator, &NodeId::from("D"), "d * 2", &nodes, &edges);

    assert!(!resolution.error);
}

#[test]
fn self_loop_is_a_cycle() {
    let nodes = vec![node("A", "a = 1")];
    let edges = vec![edge("A", "A")];

    let mut evaluator = ScriptEvaluator::new();
    let resolution = resolve_and_evaluate(&mut evaluator, &NodeId::from("A"), "a = 1", &nodes, &edges);

    assert!(resolution.error);
    let Output::Text(diagnostic) = &resolution.output else {
        panic!("expected text diagnostic");
    };
    assert!(diagnostic.contains("#CYCLE!"));
}

#[test]
fn resolver_reports_cycle_as_a_typed_error() {
    let (nodes, edges) = ring();
    let graph = DependencyGraph::build(&nodes, &edges);
    let mut cache = EnvCache::new();
    let mut evaluator = ScriptEvaluator::new();
    let mut resolver = Resolver::new(&graph, &mut evaluator, &mut cache);

    let err = resolver.resolve(&NodeId::from("A")).unwrap_err();
    assert_eq!(err.kind, CanvasErrorKind::Cycle);
    assert_eq!(err.node, Some(NodeId::from("A")));
}

#[test]
fn completed_sibling_branch_is_not_a_false_cycle() {
    // Diamond: B and C both depend on A; D depends on B then C. Resolving C's
    // branch revisits A after B's branch completed, which must be a cache hit,
    // not a cycle.
    let nodes = vec![
        node("A", "x = 1"),
        node("B", "b = x"),
        node("C", "c = x"),
        node("D", ""),
    ];
    let edges = vec![edge("A", "B"), edge("A", "C"), edge("B", "D"), edge("C", "D")];

    let mut evaluator = ScriptEvaluator::new();
    let resolution =
        resolve_and_evaluate(&mut evaluator, &NodeId::from("D"), "b + c", &nodes, &edges);

    assert!(!resolution.error, "diamond must not be reported as a cycle");
}
