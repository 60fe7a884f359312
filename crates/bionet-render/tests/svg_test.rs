use bionet_graph::Graph;
use bionet_layout::Point;
use bionet_render::{SvgOptions, render_svg};

fn triangle() -> (Graph, Vec<Point>) {
    let mut g = Graph::new(3);
    for (a, b) in [(0, 1), (1, 2), (2, 0)] {
        g.add_edge(a, b).unwrap();
    }
    let positions = vec![
        Point { x: 0.0, y: 0.0 },
        Point { x: 2.0, y: 0.0 },
        Point { x: 1.0, y: 2.0 },
    ];
    (g, positions)
}

#[test]
fn svg_has_a_circle_per_vertex_and_a_line_per_edge() {
    let (graph, positions) = triangle();
    let svg = render_svg(&graph, &positions, (2.0, 2.0), &SvgOptions::default()).unwrap();

    let doc = roxmltree::Document::parse(&svg).unwrap();
    let circles = doc
        .descendants()
        .filter(|n| n.has_tag_name("circle"))
        .count();
    let lines = doc.descendants().filter(|n| n.has_tag_name("line")).count();
    assert_eq!(circles, 3);
    assert_eq!(lines, 3);
}

#[test]
fn coordinates_stay_inside_the_viewport() {
    let (graph, positions) = triangle();
    let options = SvgOptions::default();
    let svg = render_svg(&graph, &positions, (2.0, 2.0), &options).unwrap();

    let doc = roxmltree::Document::parse(&svg).unwrap();
    for circle in doc.descendants().filter(|n| n.has_tag_name("circle")) {
        let cx: f64 = circle.attribute("cx").unwrap().parse().unwrap();
        let cy: f64 = circle.attribute("cy").unwrap().parse().unwrap();
        assert!(cx >= options.margin && cx <= options.width - options.margin);
        assert!(cy >= options.margin && cy <= options.height - options.margin);
    }
}

#[test]
fn degenerate_extents_render_finite_coordinates() {
    let graph = Graph::new(1);
    let positions = vec![Point { x: 0.0, y: 0.0 }];
    let svg = render_svg(&graph, &positions, (0.0, 0.0), &SvgOptions::default()).unwrap();

    let doc = roxmltree::Document::parse(&svg).unwrap();
    let circle = doc
        .descendants()
        .find(|n| n.has_tag_name("circle"))
        .unwrap();
    let cx: f64 = circle.attribute("cx").unwrap().parse().unwrap();
    let cy: f64 = circle.attribute("cy").unwrap().parse().unwrap();
    assert!(cx.is_finite() && cy.is_finite());
}

#[test]
fn background_rect_is_optional() {
    let (graph, positions) = triangle();
    let plain = render_svg(&graph, &positions, (2.0, 2.0), &SvgOptions::default()).unwrap();
    assert!(!plain.contains("<rect"));

    let with_background = render_svg(
        &graph,
        &positions,
        (2.0, 2.0),
        &SvgOptions {
            background: Some("#ffffff".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(with_background.contains(r##"fill="#ffffff""##));
}
