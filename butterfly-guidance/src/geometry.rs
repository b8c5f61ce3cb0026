//! Per-leg geometry and index ranges into it
//!
//! A leg geometry is three parallel vectors:
//! - `locations`: every coordinate along the leg
//! - `osm_node_ids`: the OSM node behind each location
//! - `annotations`: one entry per pair of adjacent locations
//!
//! Steps address their part of the geometry through half-open index ranges.

use serde::{Deserialize, Serialize};

use crate::error::{GuidanceError, Result};
use crate::types::{Coordinate, OsmNodeId};

/// Metrics of a single segment between two adjacent locations
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentAnnotation {
    /// Meters
    pub distance: f64,
    /// Seconds
    pub duration: f64,
    pub weight: f64,
    pub datasource: u8,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LegGeometry {
    pub locations: Vec<Coordinate>,
    pub annotations: Vec<SegmentAnnotation>,
    pub osm_node_ids: Vec<OsmNodeId>,
}

impl LegGeometry {
    /// Check the parallel-vector invariant.
    ///
    /// An empty geometry is accepted; otherwise there is one annotation per
    /// adjacent pair and one node id per location.
    pub fn validate(&self) -> Result<()> {
        let n = self.locations.len();
        let expected_annotations = n.saturating_sub(1);
        if self.annotations.len() != expected_annotations || self.osm_node_ids.len() != n {
            return Err(GuidanceError::MalformedGeometry {
                locations: n,
                annotations: self.annotations.len(),
                nodes: self.osm_node_ids.len(),
            });
        }
        Ok(())
    }

    /// Build a checked range over `locations`
    pub fn range(&self, begin: usize, end: usize) -> Result<GeometryRange> {
        GeometryRange::new(begin, end, self.locations.len())
    }

    /// Locations covered by `range`
    pub fn slice(&self, range: GeometryRange) -> Result<&[Coordinate]> {
        // A range built for a longer geometry must still be rejected here
        self.locations
            .get(range.begin..range.end)
            .ok_or(GuidanceError::GeometryRange {
                begin: range.begin,
                end: range.end,
                len: self.locations.len(),
            })
    }
}

/// Half-open index range `[begin, end)` into a leg's locations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryRange {
    begin: usize,
    end: usize,
}

impl GeometryRange {
    pub fn new(begin: usize, end: usize, len: usize) -> Result<Self> {
        if begin > end || end > len {
            return Err(GuidanceError::GeometryRange { begin, end, len });
        }
        Ok(Self { begin, end })
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}
