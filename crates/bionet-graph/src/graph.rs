/// Dense vertex identity, `0..vertex_count`.
pub type VertexId = usize;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("vertex {vertex} is out of range for a graph of {len} vertices")]
    OutOfRange { vertex: VertexId, len: usize },
}

#[derive(Debug, Clone, Default)]
struct VertexEntry {
    neighbors: Vec<VertexId>,
}

/// Undirected graph with a vertex count fixed at construction.
///
/// Adjacency is symmetric: one [`Graph::add_edge`] call inserts both
/// directions. Self-loops are absorbed and duplicate pairs are idempotent,
/// so a vertex's degree always equals its number of distinct neighbors.
#[derive(Debug, Clone)]
pub struct Graph {
    vertices: Vec<VertexEntry>,
    edge_count: usize,
}

impl Graph {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertices: vec![VertexEntry::default(); vertex_count],
            edge_count: 0,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of distinct undirected edges inserted so far.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Inserts the undirected edge `{v0, v1}`.
    ///
    /// A self-loop (`v0 == v1`) is accepted but produces no adjacency entry
    /// and leaves degrees unchanged. Re-inserting an existing pair is a
    /// no-op. Both endpoints must be in range.
    pub fn add_edge(&mut self, v0: VertexId, v1: VertexId) -> Result<()> {
        let len = self.vertices.len();
        for v in [v0, v1] {
            if v >= len {
                return Err(Error::OutOfRange { vertex: v, len });
            }
        }
        if v0 == v1 {
            return Ok(());
        }
        if self.vertices[v0].neighbors.contains(&v1) {
            return Ok(());
        }
        self.vertices[v0].neighbors.push(v1);
        self.vertices[v1].neighbors.push(v0);
        self.edge_count += 1;
        Ok(())
    }

    pub fn has_edge(&self, v0: VertexId, v1: VertexId) -> bool {
        self.vertices
            .get(v0)
            .is_some_and(|e| e.neighbors.contains(&v1))
    }

    /// Distinct neighbors of `v`, in insertion order. Empty for an
    /// out-of-range id.
    pub fn neighbors(&self, v: VertexId) -> &[VertexId] {
        self.vertices
            .get(v)
            .map(|e| e.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Number of distinct neighbors of `v` (self-loops and repeated
    /// insertions excluded). Zero for an out-of-range id.
    pub fn degree(&self, v: VertexId) -> usize {
        self.neighbors(v).len()
    }

    /// All vertex ids in increasing order, regardless of connectivity.
    pub fn vertices(&self) -> std::ops::Range<VertexId> {
        0..self.vertices.len()
    }

    /// Each undirected edge exactly once, in depth-first discovery order
    /// starting from every unvisited vertex in increasing id order.
    pub fn edges(&self) -> EdgeIter<'_> {
        EdgeIter::new(self)
    }

    /// Histogram over degree values: entry `k` counts the vertices with
    /// exactly `k` neighbors. The histogram has `vertex_count` entries,
    /// since the maximum possible degree is `vertex_count - 1`.
    pub fn degree_distribution(&self) -> Vec<usize> {
        let mut histogram = vec![0usize; self.vertices.len()];
        for entry in &self.vertices {
            histogram[entry.neighbors.len()] += 1;
        }
        histogram
    }
}

/// Lazy depth-first edge iterator, see [`Graph::edges`].
///
/// Uses an explicit work list instead of recursion so component size never
/// translates into stack depth. `discovered` tracks membership in the work
/// list; `emitted` marks vertices whose adjacency has already been yielded,
/// which is what guarantees one emission per unordered pair.
pub struct EdgeIter<'a> {
    graph: &'a Graph,
    discovered: Vec<bool>,
    emitted: Vec<bool>,
    stack: Vec<VertexId>,
    current: Option<(VertexId, usize)>,
    next_root: VertexId,
}

impl<'a> EdgeIter<'a> {
    fn new(graph: &'a Graph) -> Self {
        let n = graph.vertex_count();
        Self {
            graph,
            discovered: vec![false; n],
            emitted: vec![false; n],
            stack: Vec::new(),
            current: None,
            next_root: 0,
        }
    }
}

impl Iterator for EdgeIter<'_> {
    type Item = (VertexId, VertexId);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((v, i)) = self.current {
                if let Some(&w) = self.graph.neighbors(v).get(i) {
                    self.current = Some((v, i + 1));
                    if !self.discovered[w] {
                        self.discovered[w] = true;
                        self.stack.push(w);
                    }
                    if !self.emitted[w] {
                        return Some((v, w));
                    }
                    continue;
                }
                self.current = None;
            }
            if let Some(v) = self.stack.pop() {
                self.emitted[v] = true;
                self.current = Some((v, 0));
                continue;
            }
            // Exhausted the current component; seed the next unvisited root.
            while self.next_root < self.graph.vertex_count() {
                let root = self.next_root;
                self.next_root += 1;
                if !self.discovered[root] {
                    self.discovered[root] = true;
                    self.stack.push(root);
                    break;
                }
            }
            if self.stack.is_empty() {
                return None;
            }
        }
    }
}
