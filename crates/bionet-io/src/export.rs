use bionet_graph::Graph;
use std::fmt::Write as _;

/// Vertex count on the first line, one `v0 v1` pair per edge after it.
pub fn write_edge_list(graph: &Graph) -> String {
    let mut out = String::new();
    let _ = writeln!(&mut out, "{}", graph.vertex_count());
    for (v0, v1) in graph.edges() {
        let _ = writeln!(&mut out, "{v0} {v1}");
    }
    out
}

/// Minimal GEXF document with vertex ids as node ids and labels.
pub fn write_gexf(graph: &Graph) -> String {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    out.push('\n');
    out.push_str(r#"<gexf xmlns="http://www.gexf.net/1.2draft" version="1.2">"#);
    out.push('\n');
    out.push_str(r#"  <graph defaultedgetype="undirected" mode="static">"#);
    out.push('\n');

    out.push_str("    <nodes>\n");
    for v in graph.vertices() {
        let _ = writeln!(&mut out, r#"      <node id="{v}" label="{v}" />"#);
    }
    out.push_str("    </nodes>\n");

    out.push_str("    <edges>\n");
    for (i, (v0, v1)) in graph.edges().enumerate() {
        let _ = writeln!(
            &mut out,
            r#"      <edge id="{i}" source="{v0}" target="{v1}" />"#
        );
    }
    out.push_str("    </edges>\n");

    out.push_str("  </graph>\n</gexf>\n");
    out
}

/// LEDA `.gw` text with `|{...}|` info fields and 1-based edge endpoints.
pub fn write_leda(graph: &Graph) -> String {
    let mut out = String::new();
    out.push_str("LEDA.GRAPH\nstring\nint\n-2\n");

    let _ = writeln!(&mut out, "{}", graph.vertex_count());
    for v in graph.vertices() {
        let _ = writeln!(&mut out, "|{{{v}}}|");
    }

    let _ = writeln!(&mut out, "{}", graph.edge_count());
    for (v0, v1) in graph.edges() {
        let _ = writeln!(&mut out, "{} {} 0 |{{}}|", v0 + 1, v1 + 1);
    }
    out
}
