//! An in-memory catalogue of transit stops and bus routes.
//!
//! The catalogue is filled once during a build phase (`add_stop`,
//! `set_distance`, `add_route`) and is read-only afterwards. Queries return
//! route statistics and the routes serving a stop, and [`render::MapRenderer`]
//! turns the whole network into an ordered list of vector shapes ready for an
//! external sink to serialize.

pub mod catalogue;
pub mod render;
pub mod shared;

pub mod prelude {
    pub use crate::catalogue::{Catalogue, Route, Stop, StopId};
    pub use crate::render::{Color, MapRenderer, RenderSettings, Shape};
    pub use crate::shared::geo::Coordinate;
}
