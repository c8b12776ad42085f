//! Per-request memoization: each reachable node runs at most once.
use super::common::{edge, node};
use crate::engine::{DependencyGraph, EnvCache, Resolver, resolve_and_evaluate};
use crate::test_support::ScriptEvaluator;
use cellwire_common::{Environment, NodeId, Value};

#[test]
fn diamond_ancestor_runs_exactly_once() {
    let nodes = vec![
        node("A", "x = 1"),
        node("B", "b = x + 1"),
        node("C", "c = x + 2"),
        node("D", ""),
    ];
    let edges = vec![edge("A", "B"), edge("A", "C"), edge("B", "D"), edge("C", "D")];

    let mut evaluator = ScriptEvaluator::new();
    let resolution =
        resolve_and_evaluate(&mut evaluator, &NodeId::from("D"), "b + c", &nodes, &edges);

    assert!(!resolution.error);
    assert_eq!(evaluator.evaluations_of("x = 1"), 1);
    // A, B, C once each plus the target.
    assert_eq!(evaluator.calls, 4);
}

#[test]
fn duplicate_edges_do_not_rerun_the_parent() {
    let nodes = vec![node("A", "x = 1"), node("B", "")];
    let edges = vec![edge("A", "B"), edge("A", "B")];

    let mut evaluator = ScriptEvaluator::new();
    let resolution = resolve_and_evaluate(&mut evaluator, &NodeId::from("B"), "x", &nodes, &edges);

    assert!(!resolution.error);
    assert_eq!(evaluator.evaluations_of("x = 1"), 1);
}

#[test]
fn cached_environment_short_circuits_resolution() {
    let nodes = vec![node("A", "fail must not run")];
    let graph = DependencyGraph::build(&nodes, &[]);
    let mut cache = EnvCache::new();

    let seeded: Environment = [("x", Value::Int(9))].into_iter().collect();
    cache.put(NodeId::from("A"), seeded.clone());

    let mut evaluator = ScriptEvaluator::new();
    let mut resolver = Resolver::new(&graph, &mut evaluator, &mut cache);
    let env = resolver.resolve(&NodeId::from("A")).unwrap();

    assert_eq!(env, seeded);
    assert_eq!(evaluator.calls, 0);
}

#[test]
fn fresh_cache_per_request_means_identical_reruns() {
    let nodes = vec![
        node("A", "x = 2"),
        node("B", "y = x * 3"),
        node("C", ""),
    ];
    let edges = vec![edge("A", "B"), edge("B", "C")];

    let mut evaluator = ScriptEvaluator::new();
    let first = resolve_and_evaluate(&mut evaluator, &NodeId::from("C"), "y + x", &nodes, &edges);
    let second = resolve_and_evaluate(&mut evaluator, &NodeId::from("C"), "y + x", &nodes, &edges);

    assert_eq!(first, second);
    // Each request re-evaluates from scratch: no cross-request cache.
    assert_eq!(evaluator.calls, 6);
}

#[test]
fn long_chain_evaluates_each_node_once() {
    let nodes: Vec<_> = (0..10)
        .map(|i| node(&format!("n{i}"), &format!("v{i} = {i}")))
        .collect();
    let edges: Vec<_> = (0..9)
        .map(|i| edge(&format!("n{i}"), &format!("n{}", i + 1)))
        .collect();

    let mut evaluator = ScriptEvaluator::new();
    let resolution =
        resolve_and_evaluate(&mut evaluator, &NodeId::from("n9"), "v8 + 1", &nodes, &edges);

    assert!(!resolution.error);
    assert_eq!(evaluator.calls, 10);
}
