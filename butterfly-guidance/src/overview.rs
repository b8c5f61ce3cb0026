//! Whole-route overview geometry

use std::str::FromStr;

use geo::{LineString, Simplify};
use serde::{Deserialize, Serialize};

use crate::error::{GuidanceError, Result};
use crate::geometry::LegGeometry;
use crate::types::{Coordinate, COORDINATE_PRECISION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverviewType {
    /// No overview geometry
    False,
    /// Douglas-Peucker reduced to roughly screen resolution
    #[default]
    Simplified,
    /// Every location of every leg
    Full,
}

impl FromStr for OverviewType {
    type Err = GuidanceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "false" => Ok(Self::False),
            "simplified" => Ok(Self::Simplified),
            "full" => Ok(Self::Full),
            _ => Err(GuidanceError::invalid_parameter("overview", s)),
        }
    }
}

/// Resolution of the simplified overview: the route's bounding box is
/// mapped onto this many "pixels" along its longer side.
const OVERVIEW_RESOLUTION: f64 = 1024.0;

/// Concatenate the leg geometries into one line.
///
/// Consecutive legs share their joining location; it is kept once.
pub fn assemble_overview(leg_geometries: &[LegGeometry], use_simplification: bool) -> Vec<Coordinate> {
    let mut overview: Vec<Coordinate> = Vec::with_capacity(
        leg_geometries.iter().map(|g| g.locations.len()).sum(),
    );
    for geometry in leg_geometries {
        let skip = match (overview.last(), geometry.locations.first()) {
            (Some(last), Some(first)) if last == first => 1,
            _ => 0,
        };
        overview.extend_from_slice(&geometry.locations[skip..]);
    }

    if use_simplification {
        simplify(overview)
    } else {
        overview
    }
}

fn simplify(coordinates: Vec<Coordinate>) -> Vec<Coordinate> {
    if coordinates.len() < 3 {
        return coordinates;
    }

    let (min_lon, max_lon, min_lat, max_lat) = coordinates.iter().fold(
        (i64::MAX, i64::MIN, i64::MAX, i64::MIN),
        |(min_lon, max_lon, min_lat, max_lat), c| {
            let (lon, lat) = (i64::from(c.lon), i64::from(c.lat));
            (min_lon.min(lon), max_lon.max(lon), min_lat.min(lat), max_lat.max(lat))
        },
    );
    let extent = (max_lon - min_lon).max(max_lat - min_lat) as f64 / COORDINATE_PRECISION;
    if extent == 0.0 {
        return coordinates;
    }
    let epsilon = extent / OVERVIEW_RESOLUTION;

    let line: LineString<f64> = coordinates.iter().map(|&c| geo::Coord::from(c)).collect();
    line.simplify(&epsilon)
        .coords()
        .map(|c| Coordinate::from_degrees(c.x, c.y))
        .collect()
}
