use std::{
    collections::{BTreeSet, HashMap, HashSet},
    sync::Arc,
};

use thiserror::Error;
use tracing::debug;

mod models;
pub use models::*;

use crate::shared::geo::Coordinate;

#[derive(Error, Debug)]
pub enum Error {
    #[error("stop \"{0}\" is already registered")]
    DuplicateStop(String),
    #[error("route \"{route}\" references unknown stop \"{stop}\"")]
    UnknownRouteStop { route: String, stop: String },
    #[error("distance declared for unknown stop \"{0}\"")]
    UnknownDistanceStop(String),
}

type StopLookup = HashMap<Arc<str>, StopId>;
type RouteLookup = HashMap<Arc<str>, u32>;
type RoutesOnStops = HashMap<Arc<str>, BTreeSet<Arc<str>>>;

/// The transit catalogue. Stops and routes live in append-only arenas and
/// every cross-reference between them is an arena index, so growing the
/// arenas never invalidates a reference held elsewhere.
///
/// The catalogue is written during the build phase (`add_stop`,
/// `set_distance`, `add_route`, in that order) and only read afterwards.
#[derive(Debug, Default)]
pub struct Catalogue {
    stops: Vec<Stop>,
    routes: Vec<Route>,
    stop_lookup: StopLookup,
    route_lookup: RouteLookup,
    routes_on_stops: RoutesOnStops,
    distances: HashMap<(StopId, StopId), u32>,
    sorted_routes: Vec<Arc<str>>,
}

impl Catalogue {
    pub fn new() -> Self {
        Default::default()
    }

    /// Registers a stop under a unique name.
    /// Re-registering a name is an error: the old record would stay alive in
    /// the arena while the lookup points at the new one, leaving two truths
    /// for one name.
    pub fn add_stop(&mut self, name: &str, coordinate: Coordinate) -> Result<StopId, Error> {
        if self.stop_lookup.contains_key(name) {
            return Err(Error::DuplicateStop(name.to_string()));
        }
        let index = self.stops.len() as StopId;
        let name: Arc<str> = name.into();
        self.stop_lookup.insert(name.clone(), index);
        self.routes_on_stops.insert(name.clone(), BTreeSet::new());
        self.stops.push(Stop {
            index,
            name,
            coordinate,
        });
        Ok(index)
    }

    /// Registers a route over stops that were already added.
    ///
    /// Re-registering a route name is a silent no-op. A declared stop that
    /// was never added rejects the whole route and leaves the catalogue
    /// unchanged. Linear routes get the return leg synthesized, so `n`
    /// declared stops are stored as `2n - 1`.
    pub fn add_route(
        &mut self,
        name: &str,
        declared_stops: &[&str],
        is_roundtrip: bool,
    ) -> Result<(), Error> {
        let slot = match self
            .sorted_routes
            .binary_search_by(|probe| probe.as_ref().cmp(name))
        {
            Ok(_) => {
                debug!("route {name} is already registered, ignoring");
                return Ok(());
            }
            Err(slot) => slot,
        };

        let mut resolved: Vec<StopId> = Vec::with_capacity(declared_stops.len());
        for stop in declared_stops {
            let index =
                self.stop_lookup
                    .get(*stop)
                    .copied()
                    .ok_or_else(|| Error::UnknownRouteStop {
                        route: name.to_string(),
                        stop: (*stop).to_string(),
                    })?;
            resolved.push(index);
        }

        let unique_stops = resolved.iter().collect::<HashSet<_>>().len();

        if !is_roundtrip && resolved.len() > 1 {
            let declared = resolved.len();
            resolved.reserve(declared - 1);
            for i in (0..declared - 1).rev() {
                resolved.push(resolved[i]);
            }
        }

        let distance = self.road_length(&resolved);
        let geo_length = self.geo_length(&resolved);
        let curvature = if resolved.is_empty() {
            0.0
        } else if geo_length == 0.0 {
            // All legs collapse to one coordinate; the road is as straight
            // as it can get.
            1.0
        } else {
            f64::from(distance) / geo_length
        };

        let name: Arc<str> = name.into();
        let index = self.routes.len() as u32;
        self.sorted_routes.insert(slot, name.clone());
        self.route_lookup.insert(name.clone(), index);
        for stop_id in &resolved {
            let stop_name = self.stops[*stop_id as usize].name.clone();
            self.routes_on_stops
                .entry(stop_name)
                .or_default()
                .insert(name.clone());
        }
        self.routes.push(Route {
            index,
            name,
            is_roundtrip,
            number_stops: resolved.len(),
            unique_stops,
            distance,
            curvature,
            stops: resolved.into(),
        });
        Ok(())
    }

    /// Records a directional road distance in meters between two registered
    /// stops. May be called for pairs no route uses.
    pub fn set_distance(&mut self, from: &str, to: &str, meters: u32) -> Result<(), Error> {
        let from = self.declared_stop(from)?;
        let to = self.declared_stop(to)?;
        self.distances.insert((from, to), meters);
        Ok(())
    }

    /// Road distance in meters from one stop to another.
    ///
    /// Resolution order: the declared distance for (from, to), then the
    /// declared distance for (to, from), then the great-circle distance
    /// rounded to whole meters. None if either stop is unknown.
    pub fn road_distance(&self, from: &str, to: &str) -> Option<u32> {
        let from = *self.stop_lookup.get(from)?;
        let to = *self.stop_lookup.get(to)?;
        Some(self.distance_between(from, to))
    }

    /// Get a stop with the given name.
    /// If no stop is found with the given name None is returned.
    pub fn stop(&self, name: &str) -> Option<&Stop> {
        let index = self.stop_lookup.get(name)?;
        Some(&self.stops[*index as usize])
    }

    /// Get a route with the given name.
    /// If no route is found with the given name None is returned.
    pub fn route(&self, name: &str) -> Option<&Route> {
        let index = self.route_lookup.get(name)?;
        Some(&self.routes[*index as usize])
    }

    /// The names of all routes traversing the given stop, sorted.
    /// None if the stop itself is unknown; an empty set if the stop exists
    /// but no route serves it.
    pub fn routes_on_stop(&self, name: &str) -> Option<&BTreeSet<Arc<str>>> {
        self.routes_on_stops.get(name)
    }

    /// Resolves a stop id handed out by [`Catalogue::add_stop`] or found in
    /// [`Route::stops`].
    pub fn stop_at(&self, id: StopId) -> &Stop {
        &self.stops[id as usize]
    }

    /// Route names in alphabetical order. The order is stable across runs
    /// for the same input; rendering relies on it.
    pub fn route_names(&self) -> impl Iterator<Item = &str> {
        self.sorted_routes.iter().map(|name| name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    fn declared_stop(&self, name: &str) -> Result<StopId, Error> {
        self.stop_lookup
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownDistanceStop(name.to_string()))
    }

    fn distance_between(&self, from: StopId, to: StopId) -> u32 {
        if let Some(meters) = self.distances.get(&(from, to)) {
            return *meters;
        }
        if let Some(meters) = self.distances.get(&(to, from)) {
            return *meters;
        }
        let from = self.stops[from as usize].coordinate;
        let to = self.stops[to as usize].coordinate;
        from.distance_m(&to).round() as u32
    }

    fn road_length(&self, stops: &[StopId]) -> u32 {
        stops
            .windows(2)
            .map(|leg| self.distance_between(leg[0], leg[1]))
            .sum()
    }

    fn geo_length(&self, stops: &[StopId]) -> f64 {
        stops
            .windows(2)
            .map(|leg| {
                let from = self.stops[leg[0] as usize].coordinate;
                let to = self.stops[leg[1] as usize].coordinate;
                from.distance_m(&to)
            })
            .sum()
    }
}
