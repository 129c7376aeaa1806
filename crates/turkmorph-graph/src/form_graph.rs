// Suffix-form graph: lazily expanded automaton over (state, attributes)
//
// Nodes live in a sharded concurrent map and are created at most once per
// key. A node's edges are computed on first request and published through
// a `OnceLock`; two threads racing on the same node may both compute the
// edge list, but only one is stored and both observe the stored one.
// Edges name their target by key, so the graph holds no reference cycles.

use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use hashbrown::DefaultHashBuilder;
use tracing::debug;
use turkmorph_core::phonetic::PhoneticAttributes;
use turkmorph_core::root::Root;

use crate::GraphError;
use crate::form::{SuffixFormApplication, apply_suffix};
use crate::graph::{StateId, StateType, SuffixGraph};

/// Identity of a suffix-form node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SuffixFormNodeKey {
    pub state: StateId,
    pub attributes: PhoneticAttributes,
}

impl SuffixFormNodeKey {
    pub const fn new(state: StateId, attributes: PhoneticAttributes) -> Self {
        Self { state, attributes }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SuffixFormEdge {
    pub target: SuffixFormNodeKey,
    pub application: SuffixFormApplication,
}

#[derive(Debug)]
pub struct SuffixFormNode {
    key: SuffixFormNodeKey,
    state_type: StateType,
    edges: OnceLock<Vec<SuffixFormEdge>>,
}

impl SuffixFormNode {
    /// An unexpanded node.
    pub fn new(key: SuffixFormNodeKey, state_type: StateType) -> Self {
        Self {
            key,
            state_type,
            edges: OnceLock::new(),
        }
    }

    pub fn key(&self) -> SuffixFormNodeKey {
        self.key
    }

    pub fn state(&self) -> StateId {
        self.key.state
    }

    pub fn phonetic_attributes(&self) -> PhoneticAttributes {
        self.key.attributes
    }

    pub fn state_type(&self) -> StateType {
        self.state_type
    }

    pub fn is_terminal(&self) -> bool {
        self.state_type == StateType::Terminal
    }

    /// True once the edge list has been published.
    pub fn is_expanded(&self) -> bool {
        self.edges.get().is_some()
    }
}

/// Shared, lazily built suffix-form graph over a frozen morphotactic graph.
///
/// `SuffixFormGraph` is `Send + Sync`; wrap it in an `Arc` to share it
/// between parser threads.
pub struct SuffixFormGraph {
    graph: Arc<SuffixGraph>,
    nodes: DashMap<SuffixFormNodeKey, Arc<SuffixFormNode>, DefaultHashBuilder>,
}

impl std::fmt::Debug for SuffixFormGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuffixFormGraph")
            .field("state_count", &self.graph.state_count())
            .field("node_count", &self.nodes.len())
            .finish()
    }
}

impl SuffixFormGraph {
    pub fn new(graph: Arc<SuffixGraph>) -> Self {
        Self {
            graph,
            nodes: DashMap::with_hasher(DefaultHashBuilder::default()),
        }
    }

    /// The morphotactic graph this graph expands.
    pub fn suffix_graph(&self) -> &Arc<SuffixGraph> {
        &self.graph
    }

    /// Return the node for `(state, attributes)`, creating it if absent.
    ///
    /// Concurrent callers with the same key receive the same `Arc`.
    pub fn get_or_create_node(
        &self,
        state: StateId,
        attributes: PhoneticAttributes,
    ) -> Result<Arc<SuffixFormNode>, GraphError> {
        let key = SuffixFormNodeKey::new(state, attributes);
        if let Some(node) = self.nodes.get(&key) {
            return Ok(Arc::clone(node.value()));
        }

        let state_type = self
            .graph
            .state(state)
            .ok_or(GraphError::UnknownState(state))?
            .state_type();
        let entry = self.nodes.entry(key).or_insert_with(|| {
            debug!(state = %state, attributes = ?attributes, "created suffix-form node");
            Arc::new(SuffixFormNode::new(key, state_type))
        });
        Ok(Arc::clone(entry.value()))
    }

    pub fn get_node(&self, key: &SuffixFormNodeKey) -> Option<Arc<SuffixFormNode>> {
        self.nodes.get(key).map(|node| Arc::clone(node.value()))
    }

    /// Insert a prepared node; fails if its key is already present.
    pub fn insert_node(&self, node: SuffixFormNode) -> Result<Arc<SuffixFormNode>, GraphError> {
        let key = node.key;
        if self.graph.state(key.state).is_none() {
            return Err(GraphError::UnknownState(key.state));
        }
        match self.nodes.entry(key) {
            Entry::Occupied(_) => Err(GraphError::DuplicateNode {
                state: key.state,
                attributes: key.attributes,
            }),
            Entry::Vacant(vacant) => {
                let node = Arc::new(node);
                vacant.insert(Arc::clone(&node));
                Ok(node)
            }
        }
    }

    /// Outgoing edges of `node`, expanding it on first use.
    ///
    /// Every call on the same node returns the same slice.
    pub fn edges<'n>(&self, node: &'n SuffixFormNode) -> Result<&'n [SuffixFormEdge], GraphError> {
        if let Some(edges) = node.edges.get() {
            return Ok(edges);
        }
        let edges = self.expand(node)?;
        Ok(node.edges.get_or_init(|| edges))
    }

    fn expand(&self, node: &SuffixFormNode) -> Result<Vec<SuffixFormEdge>, GraphError> {
        let state = self
            .graph
            .state(node.key.state)
            .ok_or(GraphError::UnknownState(node.key.state))?;

        let mut edges = Vec::with_capacity(state.outgoing().len());
        for transition in state.outgoing() {
            let suffix = self
                .graph
                .suffix(transition.suffix)
                .ok_or(GraphError::UnknownSuffix(transition.suffix))?;
            let Some(application) = apply_suffix(transition.suffix, suffix.forms(), node.key.attributes)? else {
                continue;
            };
            let target = self.get_or_create_node(transition.target, application.attributes)?;
            edges.push(SuffixFormEdge {
                target: target.key(),
                application,
            });
        }

        debug!(
            state = state.name(),
            attributes = ?node.key.attributes,
            edges = edges.len(),
            "expanded suffix-form node"
        );
        Ok(edges)
    }

    pub fn default_state_for_root(&self, root: &Root) -> Result<StateId, GraphError> {
        self.graph
            .default_state_for_root(root)
            .ok_or_else(|| GraphError::NoDefaultState {
                lemma: root.lexeme().lemma().to_string(),
                pos: root.lexeme().primary_pos(),
            })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
