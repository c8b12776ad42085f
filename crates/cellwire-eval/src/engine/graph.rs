use cellwire_common::NodeId;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// A cell on the canvas: identity plus the code it runs.
///
/// Immutable input for the duration of one resolution request; edits happen
/// in the caller's workspace model before the request is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub source: String,
}

impl Node {
    pub fn new<I: Into<NodeId>, S: Into<String>>(id: I, source: S) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
        }
    }
}

/// A directed dependency: `target` depends on `source`.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new<S: Into<NodeId>, T: Into<NodeId>>(source: S, target: T) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Most cells have a handful of parents at most.
type ParentList = SmallVec<[NodeId; 4]>;

/// Structural view of one resolution request's node and edge sets.
///
/// Holds the node arena, an id index, and the parent adjacency. Parent lists
/// preserve edge-slice order exactly: that order is the merge precedence
/// (later parent wins), so no canonicalization happens here. Dangling edge
/// endpoints are kept as-is and surface as not-found errors in the resolver,
/// never silently dropped.
pub struct DependencyGraph {
    nodes: Vec<Node>,
    index: FxHashMap<NodeId, usize>,
    parents: FxHashMap<NodeId, ParentList>,
}

impl DependencyGraph {
    pub fn build(nodes: &[Node], edges: &[Edge]) -> Self {
        let mut arena = Vec::with_capacity(nodes.len());
        let mut index = FxHashMap::default();
        for node in nodes {
            // Ids are unique per the data model; a duplicate keeps the last
            // definition, matching a map built from the same input.
            index.insert(node.id.clone(), arena.len());
            arena.push(node.clone());
        }

        let mut parents: FxHashMap<NodeId, ParentList> = FxHashMap::default();
        for edge in edges {
            parents
                .entry(edge.target.clone())
                .or_default()
                .push(edge.source.clone());
        }

        Self {
            nodes: arena,
            index,
            parents,
        }
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Direct ancestors of `id`, in the order their edges were supplied.
    pub fn parents_of(&self, id: &NodeId) -> &[NodeId] {
        self.parents.get(id).map(|p| p.as_slice()).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
