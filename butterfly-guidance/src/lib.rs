//! Route response assembly for the butterfly-osm toolkit
//!
//! Takes the unpacked result of a route search and turns it into the route
//! document: legs, steps with guidance post-processing and manual maneuver
//! overrides, per-segment annotations, encoded geometries and waypoints.

pub mod annotations;
pub mod api;
pub mod assembler;
pub mod encoding;
pub mod error;
pub mod facade;
pub mod geometry;
pub mod instruction;
pub mod leg;
pub mod observer;
pub mod overrides;
pub mod overview;
pub mod parameters;
pub mod pipeline;
pub mod step;
pub mod types;
pub mod waypoint;

pub use annotations::{AnnotationsType, LegAnnotation};
pub use api::{RouteApi, RouteResponse};
pub use assembler::{LegAssembler, LegInput};
pub use encoding::{EncodedGeometry, GeometriesType};
pub use error::{GuidanceError, Result};
pub use facade::{DataFacade, InMemoryFacade, ManeuverOverride};
pub use geometry::{LegGeometry, SegmentAnnotation};
pub use instruction::{DirectionModifier, TurnInstruction, TurnType};
pub use leg::{Route, RouteLeg};
pub use observer::{NoopObserver, RouteObserver, TracingObserver};
pub use overview::OverviewType;
pub use parameters::RouteParameters;
pub use pipeline::{GuidanceTransforms, NoPostProcessing};
pub use step::{RouteStep, StepManeuver, WaypointType};
pub use types::{ManyRoutes, PathData, PhantomNode, PhantomNodes, RawRoute};
