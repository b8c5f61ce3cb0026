//! Error types for route document assembly
//!
//! Only contract violations and internal invariant breaks are errors here.
//! Invalid alternatives, missing override matches and a last-step override
//! hit are ordinary outcomes and never surface as `GuidanceError`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GuidanceError {
    /// The caller handed over a result set without a single route.
    #[error("route result set is empty; at least one route is required")]
    EmptyRouteSet,

    /// The per-leg vectors of a raw route disagree in length.
    #[error(
        "raw route has {anchors} anchor pairs, {paths} path segments, \
         {reversed_sources}/{reversed_targets} reversal flags"
    )]
    LegMismatch {
        anchors: usize,
        paths: usize,
        reversed_sources: usize,
        reversed_targets: usize,
    },

    /// A step range points outside of its leg geometry.
    #[error("geometry range [{begin}, {end}) out of bounds for {len} locations")]
    GeometryRange { begin: usize, end: usize, len: usize },

    /// The assembler produced a geometry whose parallel vectors do not line up.
    #[error(
        "malformed leg geometry: {locations} locations, {annotations} annotations, {nodes} node ids"
    )]
    MalformedGeometry {
        locations: usize,
        annotations: usize,
        nodes: usize,
    },

    #[error("failed to encode geometry: {0}")]
    Encoding(String),

    #[error("invalid value {value:?} for parameter {key:?}")]
    InvalidParameter { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, GuidanceError>;

impl GuidanceError {
    pub(crate) fn invalid_parameter(key: &str, value: &str) -> Self {
        Self::InvalidParameter {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}
