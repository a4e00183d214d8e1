use super::shapes::Point;
use crate::shared::geo::Coordinate;

const EPSILON: f64 = 1e-6;

fn is_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Maps geographic coordinates onto a fixed-size canvas.
///
/// Built once from the bounding box of every coordinate the map will show;
/// pure afterwards. The zoom fits the box into the canvas minus padding on
/// each side. A degenerate box (empty input, or every point identical along
/// both axes) gets a zoom of zero, collapsing all points onto the padding
/// offset.
#[derive(Debug, Default, Clone)]
pub struct SphereProjector {
    padding: f64,
    min_lon: f64,
    max_lat: f64,
    zoom: f64,
}

impl SphereProjector {
    pub fn new(coordinates: &[Coordinate], width: f64, height: f64, padding: f64) -> Self {
        let mut projector = Self {
            padding,
            ..Default::default()
        };
        let Some(first) = coordinates.first() else {
            return projector;
        };

        let (mut min_lon, mut max_lon) = (first.longitude, first.longitude);
        let (mut min_lat, mut max_lat) = (first.latitude, first.latitude);
        for coordinate in &coordinates[1..] {
            min_lon = min_lon.min(coordinate.longitude);
            max_lon = max_lon.max(coordinate.longitude);
            min_lat = min_lat.min(coordinate.latitude);
            max_lat = max_lat.max(coordinate.latitude);
        }
        projector.min_lon = min_lon;
        projector.max_lat = max_lat;

        let width_zoom =
            (!is_zero(max_lon - min_lon)).then(|| (width - 2.0 * padding) / (max_lon - min_lon));
        let height_zoom =
            (!is_zero(max_lat - min_lat)).then(|| (height - 2.0 * padding) / (max_lat - min_lat));
        projector.zoom = match (width_zoom, height_zoom) {
            (Some(width_zoom), Some(height_zoom)) => width_zoom.min(height_zoom),
            (Some(width_zoom), None) => width_zoom,
            (None, Some(height_zoom)) => height_zoom,
            (None, None) => 0.0,
        };
        projector
    }

    /// Projects a coordinate into canvas space. Latitude grows northwards
    /// while canvas y grows downwards, so the y axis is inverted.
    pub fn project(&self, coordinate: Coordinate) -> Point {
        Point {
            x: (coordinate.longitude - self.min_lon) * self.zoom + self.padding,
            y: (self.max_lat - coordinate.latitude) * self.zoom + self.padding,
        }
    }
}
