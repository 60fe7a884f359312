use crate::{Error, Result};
use bionet_graph::Graph;
use indexmap::IndexMap;
use tracing::debug;

fn parse_usize(token: &str, format: &'static str, what: &str) -> Result<usize> {
    token.trim().parse::<usize>().map_err(|_| Error::Parse {
        format,
        message: format!("expected {what}, found {token:?}"),
    })
}

/// Plain edge-list text: the first whitespace-separated token is the vertex
/// count, every following pair of tokens is an undirected edge.
pub fn read_edge_list(text: &str) -> Result<Graph> {
    let mut tokens = text.split_whitespace();
    let vertex_count = match tokens.next() {
        Some(token) => parse_usize(token, "edge-list", "a vertex count")?,
        None => {
            return Err(Error::Parse {
                format: "edge-list",
                message: "missing vertex count".into(),
            });
        }
    };

    let mut graph = Graph::new(vertex_count);
    while let Some(a) = tokens.next() {
        let Some(b) = tokens.next() else {
            return Err(Error::Parse {
                format: "edge-list",
                message: format!("dangling edge endpoint {a:?}"),
            });
        };
        let v0 = parse_usize(a, "edge-list", "an edge endpoint")?;
        let v1 = parse_usize(b, "edge-list", "an edge endpoint")?;
        graph.add_edge(v0, v1)?;
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "imported edge-list graph"
    );
    Ok(graph)
}

fn gexf_endpoint(
    ids: &IndexMap<&str, usize>,
    edge: roxmltree::Node<'_, '_>,
    attribute: &str,
) -> Result<usize> {
    let Some(raw) = edge.attribute(attribute) else {
        return Err(Error::Parse {
            format: "gexf",
            message: format!("edge element without a {attribute} attribute"),
        });
    };
    ids.get(raw).copied().ok_or_else(|| Error::Parse {
        format: "gexf",
        message: format!("edge references unknown node id {raw:?}"),
    })
}

/// GEXF: `<node id="...">` elements become vertices numbered in document
/// order; `<edge source="..." target="...">` elements become edges.
pub fn read_gexf(text: &str) -> Result<Graph> {
    let doc = roxmltree::Document::parse(text).map_err(|e| Error::Parse {
        format: "gexf",
        message: e.to_string(),
    })?;

    let mut ids: IndexMap<&str, usize> = IndexMap::new();
    for node in doc.descendants().filter(|n| n.has_tag_name("node")) {
        let Some(id) = node.attribute("id") else {
            return Err(Error::Parse {
                format: "gexf",
                message: "node element without an id attribute".into(),
            });
        };
        let next = ids.len();
        ids.entry(id).or_insert(next);
    }

    let mut graph = Graph::new(ids.len());
    for edge in doc.descendants().filter(|n| n.has_tag_name("edge")) {
        let v0 = gexf_endpoint(&ids, edge, "source")?;
        let v1 = gexf_endpoint(&ids, edge, "target")?;
        graph.add_edge(v0, v1)?;
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "imported gexf graph"
    );
    Ok(graph)
}

// LEDA node/edge sections may be interleaved with blank or commented lines.
fn is_meaningful(line: &str) -> bool {
    !line.trim().is_empty() && !line.contains('#')
}

fn leda_truncated(what: &str) -> Error {
    Error::Parse {
        format: "leda",
        message: format!("truncated {what} section"),
    }
}

/// LEDA `.gw` text: a `LEDA.GRAPH` header, three type/kind lines, the node
/// section, then the edge section with 1-based endpoints.
pub fn read_leda(text: &str) -> Result<Graph> {
    let mut lines = text.lines();
    if lines.next().map(str::trim) != Some("LEDA.GRAPH") {
        return Err(Error::Parse {
            format: "leda",
            message: "missing LEDA.GRAPH header".into(),
        });
    }
    for _ in 0..3 {
        if lines.next().is_none() {
            return Err(leda_truncated("header"));
        }
    }

    let mut meaningful = lines.filter(|l| is_meaningful(l));
    let vertex_count = match meaningful.next() {
        Some(line) => parse_usize(line, "leda", "a node count")?,
        None => return Err(leda_truncated("node")),
    };
    for _ in 0..vertex_count {
        if meaningful.next().is_none() {
            return Err(leda_truncated("node"));
        }
    }
    let declared_edges = match meaningful.next() {
        Some(line) => parse_usize(line, "leda", "an edge count")?,
        None => return Err(leda_truncated("edge")),
    };

    let mut graph = Graph::new(vertex_count);
    for line in meaningful {
        let mut tokens = line.split_whitespace();
        let (Some(a), Some(b), Some(_info)) = (tokens.next(), tokens.next(), tokens.next()) else {
            // Edge lines carry source, target and an info field; anything
            // shorter is skipped.
            continue;
        };
        let v0 = leda_endpoint(a)?;
        let v1 = leda_endpoint(b)?;
        graph.add_edge(v0, v1)?;
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        declared_edges,
        "imported leda graph"
    );
    Ok(graph)
}

fn leda_endpoint(token: &str) -> Result<usize> {
    let one_based = parse_usize(token, "leda", "an edge endpoint")?;
    one_based.checked_sub(1).ok_or_else(|| Error::Parse {
        format: "leda",
        message: "edge endpoints are 1-based; found 0".into(),
    })
}
