//! Search-result types consumed by the route document builder
//!
//! These mirror what the query layer hands over after unpacking a path:
//! per-leg anchor pairs, the unpacked edge sequence of every leg and the
//! direction in which the leg endpoints were traversed.

use serde::{Deserialize, Serialize};

use crate::error::{GuidanceError, Result};
use crate::instruction::TurnInstruction;

/// Node id of the edge-based graph (one directed road segment)
pub type EdgeBasedNodeId = u32;
/// Node id of the node-based graph (one junction or shape point)
pub type NodeId = u32;
/// Original OpenStreetMap node id
pub type OsmNodeId = u64;
/// Index into the street name table
pub type NameId = u32;
/// Integer route weight as produced by the search
pub type EdgeWeight = i32;

/// Fixed-point precision of [`Coordinate`]: 1e-6 degrees
pub const COORDINATE_PRECISION: f64 = 1e6;

/// A WGS84 position in fixed-point micro-degrees.
///
/// Fixed point keeps equality exact, which the override resolver relies on
/// when it looks up a via-node inside a step geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lon: i32,
    pub lat: i32,
}

impl Coordinate {
    pub fn new(lon: i32, lat: i32) -> Self {
        Self { lon, lat }
    }

    pub fn from_degrees(lon: f64, lat: f64) -> Self {
        Self {
            lon: (lon * COORDINATE_PRECISION).round() as i32,
            lat: (lat * COORDINATE_PRECISION).round() as i32,
        }
    }

    pub fn lon_deg(&self) -> f64 {
        self.lon as f64 / COORDINATE_PRECISION
    }

    pub fn lat_deg(&self) -> f64 {
        self.lat as f64 / COORDINATE_PRECISION
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self::from_degrees(lon, lat)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lon_deg(), c.lat_deg()]
    }
}

impl From<Coordinate> for geo::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Coord {
            x: c.lon_deg(),
            y: c.lat_deg(),
        }
    }
}

/// Edge-based segment a phantom node sits on, for one direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SegmentId {
    pub id: EdgeBasedNodeId,
}

impl SegmentId {
    pub fn new(id: EdgeBasedNodeId) -> Self {
        Self { id }
    }
}

/// A query coordinate snapped onto the network
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhantomNode {
    /// Snapped location on the road
    pub location: Coordinate,
    /// Location the user asked for
    pub input_location: Coordinate,
    pub name_id: NameId,
    pub forward_segment_id: SegmentId,
    pub reverse_segment_id: SegmentId,
}

impl PhantomNode {
    /// Segment id in the direction the route actually travels
    pub fn active_segment_id(&self, traversed_in_reverse: bool) -> EdgeBasedNodeId {
        if traversed_in_reverse {
            self.reverse_segment_id.id
        } else {
            self.forward_segment_id.id
        }
    }
}

/// Source and target anchors of a single leg
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhantomNodes {
    pub source: PhantomNode,
    pub target: PhantomNode,
}

/// One unpacked edge of a leg, as produced by path unpacking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathData {
    /// Edge-based node the turn starts from
    pub from_edge_based_node: EdgeBasedNodeId,
    /// Node-based node at which the turn happens
    pub turn_via_node: NodeId,
    pub name_id: NameId,
    pub turn_instruction: TurnInstruction,
    /// Deciseconds travelled up to the turn
    pub duration_until_turn: u32,
    pub weight_until_turn: EdgeWeight,
}

/// A single candidate route from the search
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawRoute {
    pub segment_end_coordinates: Vec<PhantomNodes>,
    pub unpacked_path_segments: Vec<Vec<PathData>>,
    pub source_traversed_in_reverse: Vec<bool>,
    pub target_traversed_in_reverse: Vec<bool>,
    /// `None` when the search could not connect the waypoints
    pub shortest_path_weight: Option<EdgeWeight>,
}

impl RawRoute {
    pub fn is_valid(&self) -> bool {
        self.shortest_path_weight.is_some()
    }

    /// Number of legs, after checking that all per-leg vectors agree
    pub fn leg_count(&self) -> Result<usize> {
        let anchors = self.segment_end_coordinates.len();
        if self.unpacked_path_segments.len() != anchors
            || self.source_traversed_in_reverse.len() != anchors
            || self.target_traversed_in_reverse.len() != anchors
        {
            return Err(GuidanceError::LegMismatch {
                anchors,
                paths: self.unpacked_path_segments.len(),
                reversed_sources: self.source_traversed_in_reverse.len(),
                reversed_targets: self.target_traversed_in_reverse.len(),
            });
        }
        Ok(anchors)
    }
}

/// All candidate routes of one request; index 0 is the primary route
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ManyRoutes {
    pub routes: Vec<RawRoute>,
}
