#![forbid(unsafe_code)]

//! Force-directed layout for undirected graphs.
//!
//! The engine pulls edge-connected vertices together with a logarithmic
//! spring and pushes every vertex pair apart with an inverse-square
//! repulsion, integrating under a cooling schedule until the mean
//! displacement falls below a tolerance or a step cap is reached. Repulsion
//! can run exactly (all pairs) or through a uniform [`grid::SpatialGrid`]
//! that aggregates distant interactions per cell centroid.

mod engine;
pub mod grid;

pub use engine::{LayoutEngine, Step};

use serde::Serialize;

/// Distances are floored at this value before dividing, so coincident
/// vertices never produce an infinite force.
pub const MIN_DISTANCE: f64 = 1e-3;

/// Substituted for a zero-size bounding-box extent (all vertices
/// coincident) wherever an extent is used as a divisor.
pub const MIN_EXTENT: f64 = 1e-6;

/// A laid-out vertex position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Per-vertex simulation state, indexed by vertex id.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub x: f64,
    pub y: f64,
    /// Force accumulator, reset to zero after every integration step.
    pub force_x: f64,
    pub force_y: f64,
    /// Vertex degree floored at 1.
    pub mass: f64,
}

impl Body {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            force_x: 0.0,
            force_y: 0.0,
            mass: 1.0,
        }
    }
}

/// Axis-aligned bounding box of a body set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounding box of `bodies`. An empty slice yields an inverted box;
    /// callers guard against empty body sets before using it.
    pub fn of(bodies: &[Body]) -> Self {
        let mut bounds = Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for b in bodies {
            bounds.min_x = bounds.min_x.min(b.x);
            bounds.max_x = bounds.max_x.max(b.x);
            bounds.min_y = bounds.min_y.min(b.y);
            bounds.max_y = bounds.max_y.max(b.y);
        }
        bounds
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// How repulsion between vertex pairs is approximated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Acceleration {
    /// Exact all-pairs interaction, O(n²) per iteration.
    #[default]
    None,
    /// Spatial-grid bucketing: exact within nearby cells, centroid
    /// aggregates for the rest.
    Grid,
}

impl std::str::FromStr for Acceleration {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "grid" => Ok(Self::Grid),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Spring force scale (`c1`).
    pub spring_strength: f64,
    /// Rest length of the spring (`c2`); edges shorter than this push
    /// apart, longer ones pull together.
    pub spring_length: f64,
    /// Repulsion force scale (`c3`).
    pub repulsion_strength: f64,
    /// Base per-step displacement limit before cooling is applied.
    pub step_scale: f64,
    /// Hard iteration cap; also the denominator of the cooling schedule.
    pub max_steps: u32,
    /// Side length of the initial random square is
    /// `sqrt(vertex_count) * meters_per_particle`.
    pub meters_per_particle: f64,
    /// Radius of the exact near-field interaction in grid mode.
    pub near_radius: f64,
    pub acceleration: Acceleration,
    /// Seed for the position initializer. `None` seeds from the OS; a fixed
    /// seed makes runs reproducible.
    pub seed: Option<u64>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            spring_strength: 1.0,
            spring_length: 1.0,
            repulsion_strength: 1.0,
            step_scale: 0.1,
            max_steps: 2000,
            meters_per_particle: 2.0,
            near_radius: 15.0,
            acceleration: Acceleration::None,
            seed: None,
        }
    }
}
