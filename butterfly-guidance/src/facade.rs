//! Read-only view of the road network used while assembling a response
//!
//! The builder only ever reads from the facade, so one facade can back many
//! concurrent builders without locking.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::instruction::{DirectionModifier, TurnType};
use crate::types::{Coordinate, EdgeBasedNodeId, NameId, NodeId};

/// A manually authored correction for one from → via → to turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManeuverOverride {
    /// Edge-based node the turn is approached on
    pub from_node: EdgeBasedNodeId,
    /// Node-based node where the turn happens
    pub via_node: NodeId,
    /// Edge-based node the turn leaves on
    pub to_node: EdgeBasedNodeId,
    pub override_type: TurnType,
    /// `None` keeps the computed direction and only replaces the type
    pub direction: Option<DirectionModifier>,
}

pub trait DataFacade: Sync {
    /// Overrides whose `from_node` equals `node`, in authoring order
    fn overrides_starting_at(&self, node: EdgeBasedNodeId) -> &[ManeuverOverride];

    /// Location of a node-based node, `None` if unknown
    fn coordinate_of(&self, node: NodeId) -> Option<Coordinate>;

    /// Label of the weight the search optimised (e.g. "routability")
    fn weight_name(&self) -> &str;

    /// Street name, empty when unnamed
    fn name_of(&self, name_id: NameId) -> &str;
}

/// HashMap-backed facade, handy for tools and tests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryFacade {
    pub weight_name: String,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub coordinates: HashMap<NodeId, Coordinate>,
    #[serde(default)]
    pub overrides: HashMap<EdgeBasedNodeId, Vec<ManeuverOverride>>,
}

impl InMemoryFacade {
    pub fn new(weight_name: impl Into<String>) -> Self {
        Self {
            weight_name: weight_name.into(),
            ..Default::default()
        }
    }

    pub fn set_coordinate(&mut self, node: NodeId, coordinate: Coordinate) {
        self.coordinates.insert(node, coordinate);
    }

    /// Register an override; lookups return overrides in insertion order
    pub fn add_override(&mut self, maneuver: ManeuverOverride) {
        self.overrides
            .entry(maneuver.from_node)
            .or_default()
            .push(maneuver);
    }

    /// Append a street name and return its id
    pub fn add_name(&mut self, name: impl Into<String>) -> NameId {
        self.names.push(name.into());
        (self.names.len() - 1) as NameId
    }
}

impl DataFacade for InMemoryFacade {
    fn overrides_starting_at(&self, node: EdgeBasedNodeId) -> &[ManeuverOverride] {
        self.overrides.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    fn coordinate_of(&self, node: NodeId) -> Option<Coordinate> {
        self.coordinates.get(&node).copied()
    }

    fn weight_name(&self) -> &str {
        &self.weight_name
    }

    fn name_of(&self, name_id: NameId) -> &str {
        self.names
            .get(name_id as usize)
            .map(String::as_str)
            .unwrap_or("")
    }
}
