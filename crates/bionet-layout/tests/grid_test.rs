use bionet_layout::grid::SpatialGrid;
use bionet_layout::{Body, Bounds};

fn corner_bodies() -> Vec<Body> {
    vec![
        Body::at(0.0, 0.0),
        Body::at(10.0, 0.0),
        Body::at(0.0, 10.0),
        Body::at(10.0, 10.0),
    ]
}

#[test]
fn every_body_lands_in_exactly_one_cell() {
    let bodies = corner_bodies();
    let mut grid = SpatialGrid::new(2, 2);
    grid.rebuild(&bodies, Bounds::of(&bodies));

    let total: usize = grid.cells().iter().map(|c| c.members.len()).sum();
    assert_eq!(total, bodies.len());

    for (i, b) in bodies.iter().enumerate() {
        let cell = grid.cell_at(b.x, b.y);
        assert!(cell.members.contains(&i));
    }
}

#[test]
fn centroids_are_member_means() {
    let bodies = vec![
        Body::at(0.0, 0.0),
        Body::at(2.0, 0.0),
        Body::at(40.0, 40.0),
    ];
    let mut grid = SpatialGrid::new(4, 4);
    grid.rebuild(&bodies, Bounds::of(&bodies));

    let near = grid.cell_at(1.0, 0.0);
    assert_eq!(near.members.len(), 2);
    assert_eq!((near.centroid_x, near.centroid_y), (1.0, 0.0));

    let far = grid.cell_at(40.0, 40.0);
    assert_eq!(far.members.len(), 1);
    assert_eq!((far.centroid_x, far.centroid_y), (40.0, 40.0));
}

#[test]
fn rebuild_clears_previous_state() {
    let bodies = corner_bodies();
    let mut grid = SpatialGrid::new(2, 2);
    grid.rebuild(&bodies, Bounds::of(&bodies));
    grid.cell_mut(0).marker = Some(3);

    let moved = vec![Body::at(5.0, 5.0)];
    grid.rebuild(&moved, Bounds::of(&moved));

    let total: usize = grid.cells().iter().map(|c| c.members.len()).sum();
    assert_eq!(total, 1);
    assert!(grid.cells().iter().all(|c| c.marker.is_none()));
}

#[test]
fn radius_query_reports_cells_by_centroid_distance() {
    let bodies = corner_bodies();
    let mut grid = SpatialGrid::new(2, 2);
    grid.rebuild(&bodies, Bounds::of(&bodies));

    // Each corner body occupies its own cell, so each centroid is a corner.
    let mut near = Vec::new();
    grid.cells_within(0.0, 0.0, 3.0, &mut near);
    assert_eq!(near, vec![grid.cell_index(0.0, 0.0)]);

    let mut all = Vec::new();
    grid.cells_within(5.0, 5.0, 20.0, &mut all);
    assert_eq!(all.len(), 4);
}

#[test]
fn radius_query_is_clipped_to_the_grid() {
    let bodies = corner_bodies();
    let mut grid = SpatialGrid::new(2, 2);
    grid.rebuild(&bodies, Bounds::of(&bodies));

    // A query centered far outside the box must not panic and only sees
    // centroids actually within the radius.
    let mut out = Vec::new();
    grid.cells_within(-100.0, -100.0, 5.0, &mut out);
    assert!(out.is_empty());

    grid.cells_within(-100.0, -100.0, 1000.0, &mut out);
    assert_eq!(out.len(), 4);
}
