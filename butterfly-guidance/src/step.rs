//! Route steps: one maneuver each, plus the part of the leg geometry
//! travelled until the next maneuver.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{GeometryRange, LegGeometry};
use crate::instruction::TurnInstruction;
use crate::types::{Coordinate, EdgeBasedNodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointType {
    #[default]
    None,
    Depart,
    Arrive,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StepManeuver {
    pub location: Coordinate,
    pub bearing_before: u16,
    pub bearing_after: u16,
    pub instruction: TurnInstruction,
    pub waypoint_type: WaypointType,
    /// Roundabout exit number, 0 if not applicable
    pub exit: u32,
}

impl StepManeuver {
    /// Type string emitted for this maneuver; waypoints win over the instruction
    pub fn type_name(&self) -> &'static str {
        match self.waypoint_type {
            WaypointType::Depart => "depart",
            WaypointType::Arrive => "arrive",
            WaypointType::None => self.instruction.turn_type.as_str(),
        }
    }
}

/// An intersection passed within a step (built by guidance post-processing)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Intersection {
    pub location: Coordinate,
    pub bearings: Vec<u16>,
    pub entry: Vec<bool>,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub in_bearing: Option<usize>,
    #[serde(rename = "out", skip_serializing_if = "Option::is_none")]
    pub out_bearing: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteStep {
    /// Edge-based node the step starts on; maneuver overrides are keyed by it
    pub from_id: EdgeBasedNodeId,
    pub name: String,
    pub mode: String,
    pub distance: f64,
    pub duration: f64,
    pub weight: f64,
    /// First location of this step in the leg geometry
    pub geometry_begin: usize,
    /// One past the last location of this step
    pub geometry_end: usize,
    pub maneuver: StepManeuver,
    pub intersections: Vec<Intersection>,
}

impl RouteStep {
    /// Checked range of this step within `geometry`
    pub fn geometry_range(&self, geometry: &LegGeometry) -> Result<GeometryRange> {
        geometry.range(self.geometry_begin, self.geometry_end)
    }

    /// Locations travelled during this step
    pub fn locations<'g>(&self, geometry: &'g LegGeometry) -> Result<&'g [Coordinate]> {
        geometry.slice(self.geometry_range(geometry)?)
    }
}
