//! The `Graph` container plus helper algorithms re-exported as `narwhal_graphlib::alg`.

use rustc_hash::FxBuildHasher;

mod edge_key;

pub mod alg;

pub use edge_key::EdgeKey;
use edge_key::EdgeKeyView;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphOptions {
    /// Allow several edges between the same ordered pair, told apart by name.
    pub multigraph: bool,
}

#[derive(Debug, Clone)]
struct NodeEntry<N> {
    id: String,
    label: N,
}

#[derive(Debug, Clone)]
struct EdgeEntry<E> {
    key: EdgeKey,
    label: E,
    tail: usize,
    head: usize,
}

/// Directed (multi)graph with string vertex ids and insertion-ordered storage.
///
/// `N`, `E` and `G` are the vertex, edge and graph label types. Adjacency lists are kept
/// eagerly, so `successors`/`out_edges` and friends are proportional to the vertex degree.
#[derive(Clone)]
pub struct Graph<N, E, G = ()>
where
    N: Default,
    E: Default,
    G: Default,
{
    options: GraphOptions,
    graph_label: G,

    nodes: Vec<NodeEntry<N>>,
    node_index: HashMap<String, usize>,

    edges: Vec<EdgeEntry<E>>,
    edge_index: HashMap<EdgeKey, usize>,

    out_adj: Vec<Vec<usize>>,
    in_adj: Vec<Vec<usize>>,
}

impl<N, E, G> Default for Graph<N, E, G>
where
    N: Default,
    E: Default,
    G: Default,
{
    fn default() -> Self {
        Self::new(GraphOptions::default())
    }
}

impl<N, E, G> std::fmt::Debug for Graph<N, E, G>
where
    N: Default + std::fmt::Debug,
    E: Default + std::fmt::Debug,
    G: Default + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("options", &self.options)
            .field("graph", &self.graph_label)
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .finish()
    }
}

impl<N, E, G> Graph<N, E, G>
where
    N: Default,
    E: Default,
    G: Default,
{
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            graph_label: G::default(),
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
            out_adj: Vec::new(),
            in_adj: Vec::new(),
        }
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.graph_label = label;
        self
    }

    pub fn graph(&self) -> &G {
        &self.graph_label
    }

    fn view<'a>(&self, v: &'a str, w: &'a str, name: Option<&'a str>) -> EdgeKeyView<'a> {
        let name = if self.options.multigraph { name } else { None };
        EdgeKeyView { v, w, name }
    }

    fn edge_ix(&self, v: &str, w: &str, name: Option<&str>) -> Option<usize> {
        self.edge_index.get(&self.view(v, w, name)).copied()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut Self {
        let id = id.into();
        if let Some(&idx) = self.node_index.get(&id) {
            self.nodes[idx].label = label;
            return self;
        }
        let idx = self.nodes.len();
        self.node_index.insert(id.clone(), idx);
        self.nodes.push(NodeEntry { id, label });
        self.out_adj.push(Vec::new());
        self.in_adj.push(Vec::new());
        self
    }

    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.node_index.contains_key(&id) {
            return self;
        }
        self.set_node(id, N::default())
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx].label)
    }

    /// Insertion position of a vertex, stable until a vertex is removed.
    pub fn node_ix(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn node_id_by_ix(&self, ix: usize) -> Option<&str> {
        self.nodes.get(ix).map(|n| n.id.as_str())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.iter().map(|e| &e.key)
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges.iter().map(|e| e.key.clone()).collect()
    }

    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        self.set_edge_named(v, w, None::<String>, None)
    }

    pub fn set_edge_with_label(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        label: E,
    ) -> &mut Self {
        self.set_edge_named(v, w, None::<String>, Some(label))
    }

    /// Inserts (or relabels) an edge. Missing endpoints are created with default labels.
    ///
    /// Names are ignored unless the graph is a multigraph.
    pub fn set_edge_named(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        name: Option<impl Into<String>>,
        label: Option<E>,
    ) -> &mut Self {
        let v = v.into();
        let w = w.into();
        let name = if self.options.multigraph {
            name.map(Into::into)
        } else {
            None
        };

        if let Some(idx) = self.edge_ix(&v, &w, name.as_deref()) {
            if let Some(label) = label {
                self.edges[idx].label = label;
            }
            return self;
        }

        self.ensure_node(v.clone());
        self.ensure_node(w.clone());
        let tail = self.node_index[&v];
        let head = self.node_index[&w];

        let idx = self.edges.len();
        let key = EdgeKey { v, w, name };
        self.edge_index.insert(key.clone(), idx);
        self.edges.push(EdgeEntry {
            key,
            label: label.unwrap_or_default(),
            tail,
            head,
        });
        self.out_adj[tail].push(idx);
        self.in_adj[head].push(idx);
        self
    }

    pub fn set_edge_key(&mut self, key: EdgeKey, label: E) -> &mut Self {
        self.set_edge_named(key.v, key.w, key.name, Some(label))
    }

    pub fn set_path(&mut self, nodes: &[&str]) -> &mut Self {
        for pair in nodes.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }

    pub fn edge(&self, v: &str, w: &str, name: Option<&str>) -> Option<&E> {
        self.edge_ix(v, w, name).map(|idx| &self.edges[idx].label)
    }

    pub fn remove_edge(&mut self, v: &str, w: &str, name: Option<&str>) -> bool {
        let Some(idx) = self.edge_ix(v, w, name) else {
            return false;
        };
        let removed = self.edges.remove(idx);
        self.edge_index.remove(&removed.key);
        self.reindex_edges();
        true
    }

    pub fn remove_node(&mut self, id: &str) -> bool {
        let Some(idx) = self.node_index.remove(id) else {
            return false;
        };
        self.nodes.remove(idx);
        for (i, n) in self.nodes.iter().enumerate().skip(idx) {
            if let Some(slot) = self.node_index.get_mut(n.id.as_str()) {
                *slot = i;
            }
        }

        self.edges.retain(|e| e.key.v != id && e.key.w != id);
        self.edge_index.clear();
        for (i, e) in self.edges.iter().enumerate() {
            self.edge_index.insert(e.key.clone(), i);
        }
        self.reindex_edges();
        true
    }

    // Recomputes endpoint indices and adjacency after a removal shifted storage.
    fn reindex_edges(&mut self) {
        self.out_adj = vec![Vec::new(); self.nodes.len()];
        self.in_adj = vec![Vec::new(); self.nodes.len()];
        for (i, e) in self.edges.iter_mut().enumerate() {
            e.tail = self.node_index[e.key.v.as_str()];
            e.head = self.node_index[e.key.w.as_str()];
            if let Some(slot) = self.edge_index.get_mut(&e.key) {
                *slot = i;
            }
            self.out_adj[e.tail].push(i);
            self.in_adj[e.head].push(i);
        }
    }

    pub fn successors(&self, v: &str) -> Vec<&str> {
        let Some(&ix) = self.node_index.get(v) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = Vec::with_capacity(self.out_adj[ix].len());
        for &e in &self.out_adj[ix] {
            let w = self.edges[e].key.w.as_str();
            if !out.contains(&w) {
                out.push(w);
            }
        }
        out
    }

    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        let Some(&ix) = self.node_index.get(v) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = Vec::with_capacity(self.in_adj[ix].len());
        for &e in &self.in_adj[ix] {
            let u = self.edges[e].key.v.as_str();
            if !out.contains(&u) {
                out.push(u);
            }
        }
        out
    }

    /// Distinct successors followed by distinct predecessors not already listed.
    pub fn neighbors(&self, v: &str) -> Vec<&str> {
        let mut out = self.successors(v);
        for u in self.predecessors(v) {
            if !out.contains(&u) {
                out.push(u);
            }
        }
        out
    }

    pub fn out_edges(&self, v: &str, w: Option<&str>) -> Vec<EdgeKey> {
        let Some(&ix) = self.node_index.get(v) else {
            return Vec::new();
        };
        self.out_adj[ix]
            .iter()
            .map(|&e| &self.edges[e].key)
            .filter(|k| w.is_none_or(|w| k.w == w))
            .cloned()
            .collect()
    }

    pub fn in_edges(&self, v: &str, u: Option<&str>) -> Vec<EdgeKey> {
        let Some(&ix) = self.node_index.get(v) else {
            return Vec::new();
        };
        self.in_adj[ix]
            .iter()
            .map(|&e| &self.edges[e].key)
            .filter(|k| u.is_none_or(|u| k.v == u))
            .cloned()
            .collect()
    }

    pub fn node_edges(&self, v: &str) -> Vec<EdgeKey> {
        let mut out = self.out_edges(v, None);
        for e in self.in_edges(v, None) {
            if !e.is_self_loop() {
                out.push(e);
            }
        }
        out
    }

    pub fn out_degree(&self, v: &str) -> usize {
        self.node_ix(v)
            .map(|ix| self.out_adj[ix].len())
            .unwrap_or(0)
    }

    pub fn in_degree(&self, v: &str) -> usize {
        self.node_ix(v).map(|ix| self.in_adj[ix].len()).unwrap_or(0)
    }

    pub fn sources(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(ix, _)| self.in_adj[*ix].is_empty())
            .map(|(_, n)| n.id.as_str())
            .collect()
    }

    pub fn sinks(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(ix, _)| self.out_adj[*ix].is_empty())
            .map(|(_, n)| n.id.as_str())
            .collect()
    }

    /// Copies the vertices in `ids` (in the given order) plus every edge between them.
    pub fn subgraph(&self, ids: &[String]) -> Self
    where
        N: Clone,
        E: Clone,
        G: Clone,
    {
        let mut sub = Self::new(self.options);
        sub.set_graph(self.graph_label.clone());
        for id in ids {
            if let Some(label) = self.node(id) {
                sub.set_node(id.clone(), label.clone());
            }
        }
        for e in &self.edges {
            if sub.has_node(&e.key.v) && sub.has_node(&e.key.w) {
                sub.set_edge_key(e.key.clone(), e.label.clone());
            }
        }
        sub
    }
}
