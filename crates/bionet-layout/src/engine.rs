use crate::grid::SpatialGrid;
use crate::{
    Acceleration, Body, Bounds, LayoutOptions, MIN_DISTANCE, MIN_EXTENT, Point,
};
use bionet_graph::Graph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

/// Relative tolerance of the convergence check: the run stops once the mean
/// per-axis displacement drops below this fraction of the summed extents.
const CONVERGENCE_TOLERANCE: f64 = 1e-5;

/// Result of one simulation step: the iteration to pass back in, or `Done`
/// once the layout converged or hit the step cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Iteration(u32),
    Done,
}

/// Owns the per-vertex simulation state and drives the iteration loop.
///
/// The engine holds no reference to the graph it lays out; `run` and
/// `step(.., Step::Iteration(0))` bind fresh state for whatever graph they
/// are handed, discarding the previous layout.
pub struct LayoutEngine {
    options: LayoutOptions,
    rng: StdRng,
    bodies: Vec<Body>,
    grid: Option<SpatialGrid>,
    near_cells: Vec<usize>,
    x_scale: f64,
    y_scale: f64,
}

impl LayoutEngine {
    pub fn new(options: LayoutOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            options,
            rng,
            bodies: Vec::new(),
            grid: None,
            near_cells: Vec::new(),
            x_scale: 1.0,
            y_scale: 1.0,
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Runs the simulation to convergence or for at most `max_steps`
    /// iterations (whichever comes first, and never past the configured
    /// hard cap), then normalizes positions so the minimum x/y are zero.
    pub fn run(&mut self, graph: &Graph, max_steps: u32) {
        self.bind(graph);
        let mut current = 0u32;
        for _ in 0..max_steps {
            match self.simulate(graph, current) {
                Step::Iteration(next) => current = next,
                Step::Done => break,
            }
        }
        self.normalize();
        debug!(iterations = current, "layout run finished");
    }

    /// Performs exactly one iteration and returns the next one, or
    /// [`Step::Done`] when the layout has converged or exceeded the cap.
    ///
    /// `Step::Iteration(0)` (re)binds simulation state for `graph`, so a
    /// caller can restart on a new graph at any time. Positions are
    /// normalized after every call, making them safe to render between
    /// iterations.
    pub fn step(&mut self, graph: &Graph, step: Step) -> Step {
        let current = match step {
            Step::Done => return Step::Done,
            Step::Iteration(i) => i,
        };
        if current == 0 || self.bodies.len() != graph.vertex_count() {
            self.bind(graph);
        }
        let next = self.simulate(graph, current);
        self.normalize();
        next
    }

    /// Positions of all vertices, indexed by vertex id.
    pub fn positions(&self) -> Vec<Point> {
        self.bodies.iter().map(|b| Point { x: b.x, y: b.y }).collect()
    }

    /// Width and height of the laid-out point set, each floored at
    /// [`MIN_EXTENT`] once a layout has been normalized.
    pub fn extents(&self) -> (f64, f64) {
        (self.x_scale, self.y_scale)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Seeds positions uniformly in a density-scaled square and sizes the
    /// grid when acceleration is enabled.
    fn bind(&mut self, graph: &Graph) {
        let n = graph.vertex_count();
        if let Some(seed) = self.options.seed {
            // Re-seed on every bind so identical runs are reproducible.
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.x_scale = (n as f64).sqrt() * self.options.meters_per_particle;
        self.y_scale = self.x_scale;
        debug!(
            vertices = n,
            acceleration = ?self.options.acceleration,
            "binding simulation state"
        );

        self.bodies.clear();
        for v in 0..n {
            let x = self.rng.gen_range(0.0..=self.x_scale);
            let y = self.rng.gen_range(0.0..=self.y_scale);
            self.bodies.push(Body {
                x,
                y,
                force_x: 0.0,
                force_y: 0.0,
                mass: graph.degree(v).max(1) as f64,
            });
        }

        self.grid = match self.options.acceleration {
            Acceleration::None => None,
            Acceleration::Grid => {
                let side = (((n / 4) as f64).sqrt() as usize).max(1);
                Some(SpatialGrid::new(side, side))
            }
        };
    }

    fn simulate(&mut self, graph: &Graph, iteration: u32) -> Step {
        if self.bodies.is_empty() || iteration >= self.options.max_steps {
            return Step::Done;
        }

        self.accumulate_spring(graph);
        match self.options.acceleration {
            Acceleration::None => self.accumulate_repulsion_exact(),
            Acceleration::Grid => self.accumulate_repulsion_grid(),
        }

        // Cooling schedule: the displacement cap shrinks as e^-(i/max)^2.
        let ratio = f64::from(iteration) / f64::from(self.options.max_steps);
        let limit = self.options.step_scale * (-(ratio * ratio)).exp();

        let mut displacement = 0.0;
        for b in &mut self.bodies {
            let mass = b.mass.max(1.0);
            let dx = limit * b.force_x / mass;
            let dy = limit * b.force_y / mass;
            b.x += dx;
            b.y += dy;
            displacement += dx.abs() + dy.abs();
            b.force_x = 0.0;
            b.force_y = 0.0;
        }
        let mean = displacement / (2.0 * self.bodies.len() as f64);
        trace!(iteration, mean_displacement = mean, "layout step");

        if mean < CONVERGENCE_TOLERANCE * (self.x_scale + self.y_scale) {
            debug!(iteration, "layout converged");
            return Step::Done;
        }
        Step::Iteration(iteration + 1)
    }

    /// Logarithmic spring along every edge, applied with equal and opposite
    /// sign to both endpoints.
    fn accumulate_spring(&mut self, graph: &Graph) {
        let c1 = self.options.spring_strength;
        let c2 = self.options.spring_length;
        for (v0, v1) in graph.edges() {
            let dx = self.bodies[v1].x - self.bodies[v0].x;
            let dy = self.bodies[v1].y - self.bodies[v0].y;
            let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
            let f = c1 * (dist / c2).ln();
            let fx = dx / dist * f;
            let fy = dy / dist * f;
            self.bodies[v0].force_x += fx;
            self.bodies[v0].force_y += fy;
            self.bodies[v1].force_x -= fx;
            self.bodies[v1].force_y -= fy;
        }
    }

    fn accumulate_repulsion_exact(&mut self) {
        let scale = (self.x_scale + self.y_scale) * 0.5;
        let c3 = self.options.repulsion_strength;
        for v in 0..self.bodies.len() {
            let bv = self.bodies[v];
            let mut fx = 0.0;
            let mut fy = 0.0;
            for (w, bw) in self.bodies.iter().enumerate() {
                if w == v {
                    continue;
                }
                let (dfx, dfy) = pair_repulsion(&bv, bw.x, bw.y, 1.0, c3, scale);
                fx += dfx;
                fy += dfy;
            }
            self.bodies[v].force_x += fx;
            self.bodies[v].force_y += fy;
        }
    }

    /// Grid-accelerated repulsion: exact interaction with the occupants of
    /// cells whose centroid is within `near_radius`, then one aggregate
    /// interaction per remaining occupied cell, weighted by its count. The
    /// cell marker keeps a cell from contributing twice to the same vertex.
    fn accumulate_repulsion_grid(&mut self) {
        let scale = (self.x_scale + self.y_scale) * 0.5;
        let c3 = self.options.repulsion_strength;
        let radius = self.options.near_radius;
        let Self {
            bodies,
            grid,
            near_cells,
            ..
        } = self;
        let Some(grid) = grid.as_mut() else {
            return;
        };
        grid.rebuild(bodies, Bounds::of(bodies));

        for v in 0..bodies.len() {
            let bv = bodies[v];
            let mut fx = 0.0;
            let mut fy = 0.0;

            grid.cells_within(bv.x, bv.y, radius, near_cells);
            for &ci in near_cells.iter() {
                for &m in &grid.cells()[ci].members {
                    if m == v {
                        continue;
                    }
                    let bm = bodies[m];
                    let (dfx, dfy) = pair_repulsion(&bv, bm.x, bm.y, 1.0, c3, scale);
                    fx += dfx;
                    fy += dfy;
                }
                grid.cell_mut(ci).marker = Some(v);
            }

            for ci in 0..grid.cell_count() {
                let cell = &grid.cells()[ci];
                if cell.members.is_empty() || cell.marker == Some(v) {
                    continue;
                }
                let mass = cell.members.len() as f64;
                let (dfx, dfy) =
                    pair_repulsion(&bv, cell.centroid_x, cell.centroid_y, mass, c3, scale);
                fx += dfx;
                fy += dfy;
            }

            bodies[v].force_x += fx;
            bodies[v].force_y += fy;
        }
    }

    /// Translates the layout so the minimum x/y are zero and records the
    /// resulting extents as the current scale.
    fn normalize(&mut self) {
        if self.bodies.is_empty() {
            self.x_scale = MIN_EXTENT;
            self.y_scale = MIN_EXTENT;
            return;
        }
        let bounds = Bounds::of(&self.bodies);
        for b in &mut self.bodies {
            b.x -= bounds.min_x;
            b.y -= bounds.min_y;
        }
        self.x_scale = bounds.width().max(MIN_EXTENT);
        self.y_scale = bounds.height().max(MIN_EXTENT);
    }
}

/// Inverse-square repulsion felt by `bv` from a point of the given mass,
/// capped at a tenth of the current scale so one interaction cannot fling a
/// vertex across the layout.
fn pair_repulsion(bv: &Body, x: f64, y: f64, mass: f64, c3: f64, scale: f64) -> (f64, f64) {
    let dx = x - bv.x;
    let dy = y - bv.y;
    let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
    let f = (-mass * c3 / (dist * dist)).clamp(-scale / 10.0, 0.0);
    (dx / dist * f, dy / dist * f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repulsion_is_capped_by_scale() {
        let body = Body::at(0.0, 0.0);
        // Two bodies a hair apart: the raw 1/d² term would be ~1e6.
        let (fx, fy) = pair_repulsion(&body, MIN_DISTANCE, 0.0, 1.0, 1.0, 10.0);
        assert_eq!(fx, -1.0);
        assert_eq!(fy, 0.0);
    }

    #[test]
    fn stepping_a_done_layout_stays_done() {
        let graph = Graph::new(1);
        let mut engine = LayoutEngine::new(LayoutOptions::default());
        assert_eq!(engine.step(&graph, Step::Done), Step::Done);
    }
}
