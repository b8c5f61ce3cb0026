//! Per-segment annotation arrays
//!
//! Which arrays are built is decided by an [`AnnotationsType`] flag set. All
//! arrays except `nodes` line up 1:1 with `LegGeometry::annotations`; `nodes`
//! has one entry per location.

use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::geometry::{LegGeometry, SegmentAnnotation};

/// Set of requested annotation arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationsType {
    pub speed: bool,
    pub duration: bool,
    pub distance: bool,
    pub weight: bool,
    pub datasources: bool,
    pub nodes: bool,
}

impl AnnotationsType {
    pub const NONE: Self = Self {
        speed: false,
        duration: false,
        distance: false,
        weight: false,
        datasources: false,
        nodes: false,
    };

    pub const ALL: Self = Self {
        speed: true,
        duration: true,
        distance: true,
        weight: true,
        datasources: true,
        nodes: true,
    };

    pub const SPEED: Self = Self { speed: true, ..Self::NONE };
    pub const DURATION: Self = Self { duration: true, ..Self::NONE };
    pub const DISTANCE: Self = Self { distance: true, ..Self::NONE };
    pub const WEIGHT: Self = Self { weight: true, ..Self::NONE };
    pub const DATASOURCES: Self = Self { datasources: true, ..Self::NONE };
    pub const NODES: Self = Self { nodes: true, ..Self::NONE };

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Flag for a single annotation name as used in request parameters
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "speed" => Some(Self::SPEED),
            "duration" => Some(Self::DURATION),
            "distance" => Some(Self::DISTANCE),
            "weight" => Some(Self::WEIGHT),
            "datasources" => Some(Self::DATASOURCES),
            "nodes" => Some(Self::NODES),
            _ => None,
        }
    }
}

impl BitOr for AnnotationsType {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            speed: self.speed || rhs.speed,
            duration: self.duration || rhs.duration,
            distance: self.distance || rhs.distance,
            weight: self.weight || rhs.weight,
            datasources: self.datasources || rhs.datasources,
            nodes: self.nodes || rhs.nodes,
        }
    }
}

/// Effective annotation request.
///
/// Requests built before the flag set existed only set the boolean; they
/// mean "everything" as long as no explicit flag was set.
pub fn resolve_requested(legacy_annotations: bool, annotations_type: AnnotationsType) -> AnnotationsType {
    if legacy_annotations && annotations_type.is_none() {
        AnnotationsType::ALL
    } else {
        annotations_type
    }
}

/// Annotation arrays of one leg; absent fields were not requested
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LegAnnotation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasources: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<u64>>,
}

/// Replace non-finite values by the largest finite value of the same sign.
/// NaN maps to `f64::MAX`.
pub fn clamp_float(value: f64) -> f64 {
    if value.is_nan() || value == f64::INFINITY {
        f64::MAX
    } else if value == f64::NEG_INFINITY {
        f64::MIN
    } else {
        value
    }
}

/// Speed in m/s rounded to one decimal
pub fn segment_speed(annotation: &SegmentAnnotation) -> f64 {
    clamp_float((annotation.distance / annotation.duration * 10.0).round() / 10.0)
}

fn collect<T>(geometry: &LegGeometry, get: impl Fn(&SegmentAnnotation) -> T) -> Vec<T> {
    geometry.annotations.iter().map(get).collect()
}

/// Build the requested arrays for one leg
pub fn extract_annotations(requested: AnnotationsType, geometry: &LegGeometry) -> LegAnnotation {
    LegAnnotation {
        speed: requested.speed.then(|| collect(geometry, segment_speed)),
        duration: requested.duration.then(|| collect(geometry, |a| a.duration)),
        distance: requested.distance.then(|| collect(geometry, |a| a.distance)),
        weight: requested.weight.then(|| collect(geometry, |a| a.weight)),
        datasources: requested.datasources.then(|| collect(geometry, |a| a.datasource)),
        nodes: requested.nodes.then(|| geometry.osm_node_ids.clone()),
    }
}
