//! Connected-component algorithms over [`Graph`].
//!
//! Both entry points run an iterative depth-first traversal from each
//! unvisited vertex in increasing id order, so they always agree on the
//! component count for the same graph.

use crate::{Graph, VertexId};
use rustc_hash::FxHashMap;

/// A connected component extracted from a larger graph.
///
/// Vertices are renumbered `0..k` in discovery order; `vertex_ids[new_id]`
/// is the id the vertex had in the source graph.
#[derive(Debug, Clone)]
pub struct Component {
    pub graph: Graph,
    pub vertex_ids: Vec<VertexId>,
}

impl Component {
    pub fn vertex_count(&self) -> usize {
        self.vertex_ids.len()
    }
}

/// Number of connected components. Isolated vertices each form their own
/// component, so an edge-less graph has `vertex_count` components.
pub fn count_components(g: &Graph) -> usize {
    let mut visited = vec![false; g.vertex_count()];
    let mut stack: Vec<VertexId> = Vec::new();
    let mut count = 0;
    for root in g.vertices() {
        if visited[root] {
            continue;
        }
        count += 1;
        visited[root] = true;
        stack.push(root);
        while let Some(v) = stack.pop() {
            for &w in g.neighbors(v) {
                if !visited[w] {
                    visited[w] = true;
                    stack.push(w);
                }
            }
        }
    }
    count
}

/// Extracts every connected component as its own [`Graph`], re-inserting
/// exactly the edges encountered during traversal.
pub fn components(g: &Graph) -> Vec<Component> {
    let mut visited = vec![false; g.vertex_count()];
    let mut stack: Vec<VertexId> = Vec::new();
    let mut out = Vec::new();

    for root in g.vertices() {
        if visited[root] {
            continue;
        }
        let mut vertex_ids: Vec<VertexId> = Vec::new();
        let mut renumber: FxHashMap<VertexId, usize> = FxHashMap::default();

        visited[root] = true;
        renumber.insert(root, 0);
        vertex_ids.push(root);
        stack.push(root);
        while let Some(v) = stack.pop() {
            for &w in g.neighbors(v) {
                if !visited[w] {
                    visited[w] = true;
                    renumber.insert(w, vertex_ids.len());
                    vertex_ids.push(w);
                    stack.push(w);
                }
            }
        }

        let mut graph = Graph::new(vertex_ids.len());
        for &v in &vertex_ids {
            let new_v = renumber[&v];
            for &w in g.neighbors(v) {
                let new_w = renumber[&w];
                if new_v < new_w {
                    graph
                        .add_edge(new_v, new_w)
                        .expect("renumbered component ids are in range");
                }
            }
        }
        out.push(Component { graph, vertex_ids });
    }

    out
}
