#![forbid(unsafe_code)]

//! Graph file import and export.
//!
//! Three formats are supported, selected by file suffix: plain edge lists
//! (`.txt`), GEXF (`.gexf`) and LEDA graph text (`.gw`). Importers surface
//! malformed-input errors before a [`Graph`] is constructed; the graph a
//! caller receives is always structurally valid.

mod export;
mod import;

pub use export::{write_edge_list, write_gexf, write_leda};
pub use import::{read_edge_list, read_gexf, read_leda};

use bionet_graph::Graph;
use std::path::Path;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] bionet_graph::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad {format} graph data: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("cannot recognize the graph file format of {path}")]
    UnknownFormat { path: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Vertex count followed by `v0 v1` pairs.
    EdgeList,
    /// GEXF XML graph interchange.
    Gexf,
    /// LEDA `.gw` graph text.
    Leda,
}

impl Format {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "txt" => Some(Self::EdgeList),
            "gexf" => Some(Self::Gexf),
            "gw" => Some(Self::Leda),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::EdgeList => "edge-list",
            Self::Gexf => "gexf",
            Self::Leda => "leda",
        }
    }
}

fn detect(path: &Path) -> Result<Format> {
    Format::from_path(path).ok_or_else(|| Error::UnknownFormat {
        path: path.display().to_string(),
    })
}

/// Imports a graph from `path`, choosing the format by suffix.
pub fn read_graph_file(path: &Path) -> Result<Graph> {
    let format = detect(path)?;
    let text = std::fs::read_to_string(path)?;
    match format {
        Format::EdgeList => read_edge_list(&text),
        Format::Gexf => read_gexf(&text),
        Format::Leda => read_leda(&text),
    }
}

/// Exports `graph` to `path`, choosing the format by suffix.
pub fn write_graph_file(graph: &Graph, path: &Path) -> Result<()> {
    let format = detect(path)?;
    let text = match format {
        Format::EdgeList => write_edge_list(graph),
        Format::Gexf => write_gexf(graph),
        Format::Leda => write_leda(graph),
    };
    std::fs::write(path, text)?;
    Ok(())
}
