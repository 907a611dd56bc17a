use crate::model::VertexId;

/// Block roots. Each vertex points at a vertex of the same block, and `find` resolves the
/// block root, compressing the path it walked.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    pub fn find(&mut self, v: VertexId) -> VertexId {
        let mut root = v.index();
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = v.index();
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        VertexId(root)
    }

    /// Puts `v` into the block of `u`.
    pub fn attach(&mut self, v: VertexId, u: VertexId) {
        let root = self.find(u);
        let v_root = self.find(v);
        self.parent[v_root.index()] = root.index();
    }

    pub fn is_root(&self, v: VertexId) -> bool {
        self.parent[v.index()] == v.index()
    }
}
