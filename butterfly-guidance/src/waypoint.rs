//! Waypoints: where each requested coordinate was snapped to

use geo::{Distance, Haversine, Point};
use serde::Serialize;

use crate::facade::DataFacade;
use crate::types::{Coordinate, PhantomNode, PhantomNodes};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    pub name: String,
    pub location: Coordinate,
    /// Meters between the requested and the snapped location
    pub distance: f64,
}

fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let p1 = Point::new(a.lon_deg(), a.lat_deg());
    let p2 = Point::new(b.lon_deg(), b.lat_deg());
    Haversine::distance(p1, p2)
}

fn make_waypoint<F: DataFacade + ?Sized>(facade: &F, phantom: &PhantomNode) -> Waypoint {
    Waypoint {
        name: facade.name_of(phantom.name_id).to_string(),
        location: phantom.location,
        distance: haversine_distance(phantom.input_location, phantom.location),
    }
}

/// First leg's source, then every leg's target
pub fn make_waypoints<F: DataFacade + ?Sized>(facade: &F, legs: &[PhantomNodes]) -> Vec<Waypoint> {
    let Some(first) = legs.first() else {
        return Vec::new();
    };
    std::iter::once(&first.source)
        .chain(legs.iter().map(|leg| &leg.target))
        .map(|phantom| make_waypoint(facade, phantom))
        .collect()
}
