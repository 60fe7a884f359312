#![forbid(unsafe_code)]

//! SVG rendering for laid-out graphs.
//!
//! Consumes a [`Graph`] plus the positions and extents reported by the
//! layout engine and produces a standalone SVG document: one `<line>` per
//! edge underneath one `<circle>` per vertex.

use bionet_graph::Graph;
use bionet_layout::{MIN_EXTENT, Point};
use std::fmt::Write as _;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{positions} positions for a graph of {vertices} vertices")]
    PositionCountMismatch { positions: usize, vertices: usize },
}

#[derive(Debug, Clone)]
pub struct SvgOptions {
    /// Viewport size in pixels.
    pub width: f64,
    pub height: f64,
    /// Blank border inside the viewport.
    pub margin: f64,
    pub vertex_radius: f64,
    /// Optional CSS background color; `None` leaves the canvas transparent.
    pub background: Option<String>,
    pub vertex_fill: String,
    pub edge_stroke: String,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin: 16.0,
            vertex_radius: 4.0,
            background: None,
            vertex_fill: "#2563eb".to_string(),
            edge_stroke: "#4b5563".to_string(),
        }
    }
}

/// Renders `graph` at the given layout into an SVG document.
///
/// Layout coordinates are normalized per axis into the viewport minus the
/// margin; degenerate extents are floored so a single vertex still maps to
/// a finite pixel position.
pub fn render_svg(
    graph: &Graph,
    positions: &[Point],
    extents: (f64, f64),
    options: &SvgOptions,
) -> Result<String> {
    if positions.len() != graph.vertex_count() {
        return Err(Error::PositionCountMismatch {
            positions: positions.len(),
            vertices: graph.vertex_count(),
        });
    }

    let avail_w = (options.width - 2.0 * options.margin).max(1.0);
    let avail_h = (options.height - 2.0 * options.margin).max(1.0);
    let extent_x = extents.0.max(MIN_EXTENT);
    let extent_y = extents.1.max(MIN_EXTENT);
    let project = |p: Point| {
        (
            options.margin + p.x / extent_x * avail_w,
            options.margin + p.y / extent_y * avail_h,
        )
    };

    let mut out = String::new();
    let _ = writeln!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        fmt(options.width),
        fmt(options.height),
        fmt(options.width),
        fmt(options.height)
    );
    if let Some(background) = &options.background {
        let _ = writeln!(
            &mut out,
            r#"<rect width="100%" height="100%" fill="{background}" />"#
        );
    }

    out.push_str(r#"<g class="edges">"#);
    out.push('\n');
    for (v0, v1) in graph.edges() {
        let (x1, y1) = project(positions[v0]);
        let (x2, y2) = project(positions[v1]);
        let _ = writeln!(
            &mut out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="1" />"#,
            fmt(x1),
            fmt(y1),
            fmt(x2),
            fmt(y2),
            options.edge_stroke
        );
    }
    out.push_str("</g>\n");

    out.push_str(r#"<g class="nodes">"#);
    out.push('\n');
    for v in graph.vertices() {
        let (cx, cy) = project(positions[v]);
        let _ = writeln!(
            &mut out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" />"#,
            fmt(cx),
            fmt(cy),
            fmt(options.vertex_radius),
            options.vertex_fill
        );
    }
    out.push_str("</g>\n");

    out.push_str("</svg>\n");
    Ok(out)
}

fn fmt(v: f64) -> String {
    // Round-trippable decimal form, avoiding `-0` and tiny float noise.
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}
