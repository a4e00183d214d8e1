use std::sync::Arc;

use crate::shared::geo::Coordinate;

/// Stable index into the catalogue's stop arena. The arena is append-only,
/// so an id handed out once stays valid for the catalogue's lifetime.
pub type StopId = u32;

/// A named geographic point. Immutable once added.
#[derive(Debug, Clone)]
pub struct Stop {
    pub index: StopId,
    pub name: Arc<str>,
    pub coordinate: Coordinate,
}

/// A named traversal of stops together with its precomputed statistics.
#[derive(Debug, Clone)]
pub struct Route {
    pub index: u32,
    pub name: Arc<str>,
    pub is_roundtrip: bool,
    /// The stored traversal order. Linear routes carry the synthesized
    /// return leg, so `A-B-C` is stored as `A-B-C-B-A`.
    pub stops: Box<[StopId]>,
    pub number_stops: usize,
    pub unique_stops: usize,
    /// Road length in meters, summed over consecutive legs.
    pub distance: u32,
    /// Ratio of road length to straight-line geographic length.
    pub curvature: f64,
}
