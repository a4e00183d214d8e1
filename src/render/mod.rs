use std::{collections::BTreeSet, sync::Arc, time::Instant};

use thiserror::Error;
use tracing::debug;

mod projector;
mod settings;
mod shapes;
pub use projector::*;
pub use settings::*;
pub use shapes::*;

use crate::{
    catalogue::{Catalogue, Route, Stop},
    shared::geo::Coordinate,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("color palette must not be empty")]
    EmptyPalette,
}

/// Renders the catalogue's route network as an ordered list of vector
/// shapes for an external sink to serialize.
///
/// The output order is the draw order and is part of the contract: route
/// polylines, then route label pairs, then stop markers, then stop label
/// pairs. Routes are laid down alphabetically, stops too.
pub struct MapRenderer<'a> {
    catalogue: &'a Catalogue,
    settings: RenderSettings,
}

impl<'a> MapRenderer<'a> {
    pub fn new(catalogue: &'a Catalogue, settings: RenderSettings) -> Self {
        Self {
            catalogue,
            settings,
        }
    }

    pub fn render(&self) -> Result<Vec<Shape>, Error> {
        if self.settings.color_palette.is_empty() {
            return Err(Error::EmptyPalette);
        }
        let now = Instant::now();

        let coordinates = self.collect_coordinates();
        let projector = SphereProjector::new(
            &coordinates,
            self.settings.width,
            self.settings.height,
            self.settings.padding,
        );

        let mut lines: Vec<Shape> = Vec::with_capacity(self.catalogue.len());
        let mut route_labels: Vec<Shape> = Vec::new();
        let mut served_stops: BTreeSet<Arc<str>> = BTreeSet::new();

        // Empty routes are skipped and do not consume a palette slot.
        for (slot, route) in self
            .catalogue
            .route_names()
            .filter_map(|name| self.catalogue.route(name))
            .filter(|route| !route.stops.is_empty())
            .enumerate()
        {
            let color = &self.settings.color_palette[slot % self.settings.color_palette.len()];

            let points = route
                .stops
                .iter()
                .map(|id| projector.project(self.catalogue.stop_at(*id).coordinate))
                .collect();
            lines.push(Shape::Polyline(Polyline {
                points,
                stroke: color.clone(),
                stroke_width: self.settings.line_width,
            }));

            let first = self.catalogue.stop_at(route.stops[0]);
            self.push_route_labels(&mut route_labels, &projector, route, first, color);
            // A linear route gets a second label at its other terminus,
            // which sits at the middle of the stored there-and-back order.
            let midpoint = route.stops[route.stops.len() / 2];
            if !route.is_roundtrip && midpoint != route.stops[0] {
                let terminus = self.catalogue.stop_at(midpoint);
                self.push_route_labels(&mut route_labels, &projector, route, terminus, color);
            }

            for id in route.stops.iter() {
                served_stops.insert(self.catalogue.stop_at(*id).name.clone());
            }
        }

        let mut markers: Vec<Shape> = Vec::with_capacity(served_stops.len());
        let mut stop_labels: Vec<Shape> = Vec::with_capacity(served_stops.len() * 2);
        for name in &served_stops {
            let Some(stop) = self.catalogue.stop(name) else {
                continue;
            };
            let position = projector.project(stop.coordinate);
            markers.push(Shape::Circle(Circle {
                center: position,
                radius: self.settings.stop_radius,
                fill: Color::name("white"),
            }));
            stop_labels.push(Shape::Label(Label {
                position,
                offset: self.settings.stop_label_offset,
                font_size: self.settings.stop_label_font_size,
                bold: false,
                content: name.to_string(),
                fill: self.settings.underlayer_color.clone(),
                stroke: Some((
                    self.settings.underlayer_color.clone(),
                    self.settings.underlayer_width,
                )),
            }));
            stop_labels.push(Shape::Label(Label {
                position,
                offset: self.settings.stop_label_offset,
                font_size: self.settings.stop_label_font_size,
                bold: false,
                content: name.to_string(),
                fill: Color::name("black"),
                stroke: None,
            }));
        }

        let mut shapes = lines;
        shapes.extend(route_labels);
        shapes.extend(markers);
        shapes.extend(stop_labels);

        debug!("Rendered {} shapes in {:?}", shapes.len(), now.elapsed());
        Ok(shapes)
    }

    fn push_route_labels(
        &self,
        labels: &mut Vec<Shape>,
        projector: &SphereProjector,
        route: &Route,
        stop: &Stop,
        color: &Color,
    ) {
        let position = projector.project(stop.coordinate);
        labels.push(Shape::Label(Label {
            position,
            offset: self.settings.bus_label_offset,
            font_size: self.settings.bus_label_font_size,
            bold: true,
            content: route.name.to_string(),
            fill: self.settings.underlayer_color.clone(),
            stroke: Some((
                self.settings.underlayer_color.clone(),
                self.settings.underlayer_width,
            )),
        }));
        labels.push(Shape::Label(Label {
            position,
            offset: self.settings.bus_label_offset,
            font_size: self.settings.bus_label_font_size,
            bold: true,
            content: route.name.to_string(),
            fill: color.clone(),
            stroke: None,
        }));
    }

    /// Every coordinate traversed by a registered route. Duplicates are fine
    /// here; the projector only looks at the bounding box.
    fn collect_coordinates(&self) -> Vec<Coordinate> {
        let mut coordinates = Vec::new();
        for name in self.catalogue.route_names() {
            let Some(route) = self.catalogue.route(name) else {
                continue;
            };
            for id in route.stops.iter() {
                coordinates.push(self.catalogue.stop_at(*id).coordinate);
            }
        }
        coordinates
    }
}
