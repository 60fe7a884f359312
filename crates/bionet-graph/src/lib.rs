#![forbid(unsafe_code)]

//! Undirected graph container used across the bionet workspace.
//!
//! A [`Graph`] is sized once at construction; vertex ids are dense
//! (`0..vertex_count`) and the only mutation after creation is edge
//! insertion. Traversal-based queries (edge iteration, connected
//! components) assume a quiescent graph for their duration.

pub mod alg;
mod graph;

pub use graph::{EdgeIter, Error, Graph, Result, VertexId};
