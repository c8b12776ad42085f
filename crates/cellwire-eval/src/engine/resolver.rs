//! Recursive, memoized, cycle-guarded ancestor resolution.

use cellwire_common::{CanvasError, CanvasErrorKind, Environment, NodeId};
use rustc_hash::FxHashSet;

use super::cache::EnvCache;
use super::graph::{DependencyGraph, Edge, Node};
use crate::format::{Output, format_result};
use crate::traits::{Evaluator, ExecResult};

/// A non-fatal evaluation failure recorded while resolving an ancestor.
///
/// Resolution continued with whatever partial environment the failed node
/// produced; the record exists so callers can surface the warning.
#[derive(Debug, Clone, PartialEq)]
pub struct AncestorFailure {
    pub node: NodeId,
    pub message: String,
}

/// Outcome of one top-level resolution request.
///
/// Always well-formed: every failure path, structural or evaluative, is
/// translated into `{ output, error: true }` before this leaves the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub output: Output,
    pub error: bool,
    pub warnings: Vec<AncestorFailure>,
}

/// Walks the dependency graph depth-first, evaluating each visited node at
/// most once per request.
///
/// `path` is the set of nodes on the active recursion path from the original
/// target down to the node in hand. Entries are pushed before descending and
/// popped on every exit path, so the set is always exactly the current path:
/// a node already resolved (and cached) on a completed sibling branch is a
/// cache hit, not a false cycle.
pub struct Resolver<'a, E> {
    graph: &'a DependencyGraph,
    evaluator: &'a mut E,
    cache: &'a mut EnvCache,
    path: FxHashSet<NodeId>,
    warnings: Vec<AncestorFailure>,
}

impl<'a, E: Evaluator> Resolver<'a, E> {
    pub fn new(graph: &'a DependencyGraph, evaluator: &'a mut E, cache: &'a mut EnvCache) -> Self {
        Self {
            graph,
            evaluator,
            cache,
            path: FxHashSet::default(),
            warnings: Vec::new(),
        }
    }

    /// Resolve one node: merged parent environments in, evaluated and cached
    /// environment out.
    ///
    /// Only structural failures (`NodeNotFound`, `Cycle`) come back as `Err`;
    /// an evaluation failure inside the node is recorded as a warning and the
    /// partial environment is returned, because downstream nodes proceed with
    /// whatever their ancestors managed to produce.
    pub fn resolve(&mut self, id: &NodeId) -> Result<Environment, CanvasError> {
        if let Some(env) = self.cache.get(id) {
            return Ok(env.clone());
        }
        if !self.path.insert(id.clone()) {
            return Err(CanvasError::new(CanvasErrorKind::Cycle)
                .with_message(format!("dependency cycle closes at node '{id}'"))
                .with_node(id.clone()));
        }
        let resolved = self.resolve_unguarded(id);
        self.path.remove(id);
        resolved
    }

    fn resolve_unguarded(&mut self, id: &NodeId) -> Result<Environment, CanvasError> {
        let graph = self.graph;
        let node = graph.node(id).ok_or_else(|| {
            CanvasError::new(CanvasErrorKind::NodeNotFound)
                .with_message(format!("no node with id '{id}'"))
                .with_node(id.clone())
        })?;

        let merged = self.merged_parent_env(id)?;
        let outcome = self.evaluator.evaluate(&node.source, &merged);
        if let Some(message) = &outcome.result.error {
            #[cfg(feature = "tracing")]
            tracing::warn!(node = %id, error = %message, "ancestor evaluation failed");
            self.warnings.push(AncestorFailure {
                node: id.clone(),
                message: message.clone(),
            });
        }
        self.cache.put(id.clone(), outcome.env.clone());
        Ok(outcome.env)
    }

    /// Resolve every parent of `id` in stored edge order and merge the
    /// returned environments left-to-right. A binding defined by a later
    /// parent overwrites the same name from an earlier one: last dependency
    /// listed wins.
    fn merged_parent_env(&mut self, id: &NodeId) -> Result<Environment, CanvasError> {
        let graph = self.graph;
        let parents = graph.parents_of(id);
        let mut merged = Environment::new();
        for parent in parents {
            let env = self.resolve(parent)?;
            merged.merge_from(&env);
        }
        Ok(merged)
    }

    /// Resolve the target's ancestors and evaluate `code` against the merged
    /// environment. The caller-supplied code overrides the node's stored
    /// source, so an editor can run unsaved text against saved ancestors.
    pub fn evaluate_target(&mut self, id: &NodeId, code: &str) -> Result<ExecResult, CanvasError> {
        if !self.graph.contains(id) {
            return Err(CanvasError::new(CanvasErrorKind::NodeNotFound)
                .with_message(format!("no node with id '{id}'"))
                .with_node(id.clone()));
        }

        // The target sits on the path while its ancestors resolve, so a
        // cycle running back through the target itself is caught.
        self.path.insert(id.clone());
        let merged = self.merged_parent_env(id);
        self.path.remove(id);
        let merged = merged?;

        let outcome = self.evaluator.evaluate(code, &merged);
        self.cache.put(id.clone(), outcome.env);
        Ok(outcome.result)
    }

    pub fn warnings(&self) -> &[AncestorFailure] {
        &self.warnings
    }

    fn take_warnings(&mut self) -> Vec<AncestorFailure> {
        std::mem::take(&mut self.warnings)
    }
}

/// The one operation the engine exposes to its caller.
///
/// Builds the adjacency for this request, resolves and evaluates every
/// ancestor of `target_id`, evaluates `target_code` against the merged
/// ancestor environment, and shapes the raw result for the caller.
///
/// Failure semantics: structural errors and a failing target evaluation are
/// fatal and produce `{ output: diagnostic, error: true }`; a failing
/// ancestor only adds a warning. The cache lives and dies inside this call.
pub fn resolve_and_evaluate<E: Evaluator>(
    evaluator: &mut E,
    target_id: &NodeId,
    target_code: &str,
    nodes: &[Node],
    edges: &[Edge],
) -> Resolution {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!(
        "resolve_and_evaluate",
        target = %target_id,
        nodes = nodes.len(),
        edges = edges.len()
    )
    .entered();

    let graph = DependencyGraph::build(nodes, edges);
    let mut cache = EnvCache::new();
    let mut resolver = Resolver::new(&graph, evaluator, &mut cache);

    let resolved = resolver.evaluate_target(target_id, target_code);
    let warnings = resolver.take_warnings();

    match resolved {
        Ok(result) => match result.error {
            Some(message) => Resolution {
                output: Output::Text(
                    CanvasError::new(CanvasErrorKind::Eval)
                        .with_message(message)
                        .with_node(target_id.clone())
                        .to_string(),
                ),
                error: true,
                warnings,
            },
            None => Resolution {
                output: format_result(&result),
                error: false,
                warnings,
            },
        },
        Err(err) => Resolution {
            output: Output::Text(err.to_string()),
            error: true,
            warnings,
        },
    }
}
