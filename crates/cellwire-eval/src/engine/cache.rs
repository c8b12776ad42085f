//! Request-scoped memo of resolved environments.

use cellwire_common::{Environment, NodeId};
use rustc_hash::FxHashMap;

/// Per-request cache mapping a node id to the environment its evaluation
/// produced.
///
/// Created empty at the start of a resolution and discarded with it; the
/// top-level call owns the cache, so stale entries can never leak into a
/// later request against a modified graph. Bounded by the node count of one
/// request, so there is no eviction.
#[derive(Debug, Default)]
pub struct EnvCache {
    entries: FxHashMap<NodeId, Environment>,
}

impl EnvCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &NodeId) -> Option<&Environment> {
        self.entries.get(id)
    }

    pub fn put(&mut self, id: NodeId, env: Environment) {
        self.entries.insert(id, env);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
