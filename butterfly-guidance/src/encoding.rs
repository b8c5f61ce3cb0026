//! Geometry output formats
//!
//! The same dispatch serves the route overview and every step geometry.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GuidanceError, Result};
use crate::types::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometriesType {
    /// Encoded polyline, 5 decimal digits
    #[default]
    Polyline,
    /// Encoded polyline, 6 decimal digits
    Polyline6,
    /// GeoJSON LineString
    GeoJson,
}

impl FromStr for GeometriesType {
    type Err = GuidanceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "polyline" => Ok(Self::Polyline),
            "polyline6" => Ok(Self::Polyline6),
            "geojson" => Ok(Self::GeoJson),
            _ => Err(GuidanceError::invalid_parameter("geometries", s)),
        }
    }
}

/// A geometry in its wire representation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EncodedGeometry {
    Polyline(String),
    GeoJson(geojson::Geometry),
}

pub fn encode_geometry(format: GeometriesType, coordinates: &[Coordinate]) -> Result<EncodedGeometry> {
    match format {
        GeometriesType::Polyline => encode_polyline(coordinates, 5).map(EncodedGeometry::Polyline),
        GeometriesType::Polyline6 => encode_polyline(coordinates, 6).map(EncodedGeometry::Polyline),
        GeometriesType::GeoJson => Ok(EncodedGeometry::GeoJson(geojson_line(coordinates))),
    }
}

fn encode_polyline(coordinates: &[Coordinate], precision: u32) -> Result<String> {
    polyline::encode_coordinates(coordinates.iter().map(|&c| geo::Coord::from(c)), precision)
        .map_err(|e| GuidanceError::Encoding(e.to_string()))
}

fn geojson_line(coordinates: &[Coordinate]) -> geojson::Geometry {
    let positions = coordinates
        .iter()
        .map(|c| vec![c.lon_deg(), c.lat_deg()])
        .collect();
    geojson::Geometry::new(geojson::Value::LineString(positions))
}
