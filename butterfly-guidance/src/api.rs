//! Route response builder
//!
//! Turns the search result of one request into the route document:
//!
//! ```text
//! for each valid route
//!   for each leg
//!     assemble geometry + leg
//!     if steps: assemble steps -> guidance pipeline -> maneuver overrides
//!   overview geometry, step geometries, annotations
//! waypoints from route 0, code "Ok"
//! ```
//!
//! A builder borrows everything it needs read-only and owns only the
//! per-request structures it assembles, which move into the response.

use serde::Serialize;

use crate::annotations::{extract_annotations, LegAnnotation};
use crate::assembler::{LegAssembler, LegInput};
use crate::encoding::{encode_geometry, EncodedGeometry};
use crate::error::{GuidanceError, Result};
use crate::facade::DataFacade;
use crate::geometry::LegGeometry;
use crate::leg::{assemble_route, RouteLeg};
use crate::observer::{NoopObserver, RouteObserver};
use crate::overrides::apply_maneuver_overrides;
use crate::overview::{assemble_overview, OverviewType};
use crate::parameters::RouteParameters;
use crate::pipeline::{postprocess_steps, GuidanceTransforms};
use crate::step::{Intersection, RouteStep, StepManeuver};
use crate::types::{Coordinate, ManyRoutes, RawRoute};
use crate::waypoint::{make_waypoints, Waypoint};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResponse {
    pub code: String,
    pub waypoints: Vec<Waypoint>,
    pub routes: Vec<RouteObject>,
}

impl RouteResponse {
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteObject {
    pub legs: Vec<LegObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<EncodedGeometry>,
    pub weight_name: String,
    pub distance: f64,
    pub duration: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegObject {
    pub steps: Vec<StepObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<LegAnnotation>,
    pub distance: f64,
    pub duration: f64,
    pub weight: f64,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepObject {
    pub geometry: EncodedGeometry,
    pub maneuver: ManeuverObject,
    pub name: String,
    pub mode: String,
    pub distance: f64,
    pub duration: f64,
    pub weight: f64,
    pub intersections: Vec<Intersection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManeuverObject {
    pub location: Coordinate,
    pub bearing_before: u16,
    pub bearing_after: u16,
    #[serde(rename = "type")]
    pub maneuver_type: &'static str,
    pub modifier: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit: Option<u32>,
}

impl From<&StepManeuver> for ManeuverObject {
    fn from(maneuver: &StepManeuver) -> Self {
        Self {
            location: maneuver.location,
            bearing_before: maneuver.bearing_before,
            bearing_after: maneuver.bearing_after,
            maneuver_type: maneuver.type_name(),
            modifier: maneuver.instruction.direction_modifier.as_str(),
            exit: (maneuver.exit != 0).then_some(maneuver.exit),
        }
    }
}

pub struct RouteApi<'a, F: ?Sized, A, T: ?Sized> {
    facade: &'a F,
    parameters: &'a RouteParameters,
    assembler: &'a A,
    transforms: &'a T,
    observer: &'a dyn RouteObserver,
}

impl<'a, F, A, T> RouteApi<'a, F, A, T>
where
    F: DataFacade + ?Sized,
    A: LegAssembler<F>,
    T: GuidanceTransforms + ?Sized,
{
    pub fn new(
        facade: &'a F,
        parameters: &'a RouteParameters,
        assembler: &'a A,
        transforms: &'a T,
    ) -> Self {
        Self {
            facade,
            parameters,
            assembler,
            transforms,
            observer: &NoopObserver,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn RouteObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Build the response for all candidate routes of a request.
    ///
    /// `raw_routes` must hold at least one route; an empty set is a caller
    /// bug and reported as [`GuidanceError::EmptyRouteSet`]. Invalid routes
    /// are dropped, but waypoints always come from route 0.
    pub fn make_response(&self, raw_routes: &ManyRoutes) -> Result<RouteResponse> {
        let primary = raw_routes
            .routes
            .first()
            .ok_or(GuidanceError::EmptyRouteSet)?;

        let mut routes = Vec::with_capacity(raw_routes.routes.len());
        for (index, route) in raw_routes.routes.iter().enumerate() {
            self.observer.raw_route(index, route);
            if !route.is_valid() {
                tracing::debug!(route = index, "skipping route without a path");
                continue;
            }
            routes.push(self.make_route(route)?);
        }

        Ok(RouteResponse {
            code: "Ok".to_string(),
            waypoints: make_waypoints(self.facade, &primary.segment_end_coordinates),
            routes,
        })
    }

    fn make_route(&self, route: &RawRoute) -> Result<RouteObject> {
        let number_of_legs = route.leg_count()?;
        let mut legs = Vec::with_capacity(number_of_legs);
        let mut leg_geometries = Vec::with_capacity(number_of_legs);

        for idx in 0..number_of_legs {
            let (leg, geometry) = self.make_leg(route, idx)?;
            legs.push(leg);
            leg_geometries.push(geometry);
        }

        let totals = assemble_route(&legs);

        let geometry = match self.parameters.overview {
            OverviewType::False => None,
            OverviewType::Simplified => Some(assemble_overview(&leg_geometries, true)),
            OverviewType::Full => Some(assemble_overview(&leg_geometries, false)),
        }
        .map(|overview| encode_geometry(self.parameters.geometries, &overview))
        .transpose()?;

        let requested = self.parameters.requested_annotations();
        let legs = legs
            .into_iter()
            .zip(&leg_geometries)
            .map(|(leg, geometry)| {
                let annotation =
                    (!requested.is_none()).then(|| extract_annotations(requested, geometry));
                self.make_leg_object(leg, geometry, annotation)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RouteObject {
            legs,
            geometry,
            weight_name: self.facade.weight_name().to_string(),
            distance: totals.distance,
            duration: totals.duration,
            weight: totals.weight,
        })
    }

    /// Assemble leg `idx`; with steps, also post-process and resolve overrides
    fn make_leg(&self, route: &RawRoute, idx: usize) -> Result<(RouteLeg, LegGeometry)> {
        let phantoms = &route.segment_end_coordinates[idx];
        let input = LegInput {
            path_data: &route.unpacked_path_segments[idx],
            source: &phantoms.source,
            target: &phantoms.target,
            source_traversed_in_reverse: route.source_traversed_in_reverse[idx],
            target_traversed_in_reverse: route.target_traversed_in_reverse[idx],
        };

        let geometry = self.assembler.assemble_geometry(self.facade, &input);
        geometry.validate()?;
        let mut leg = self
            .assembler
            .assemble_leg(self.facade, &input, &geometry, self.parameters.steps);

        if !self.parameters.steps {
            return Ok((leg, geometry));
        }

        let steps = self.assembler.assemble_steps(self.facade, &input, &geometry);
        let (mut steps, geometry) = postprocess_steps(self.transforms, steps, geometry, phantoms)?;

        let arrival_segment = phantoms
            .target
            .active_segment_id(input.target_traversed_in_reverse);
        apply_maneuver_overrides(self.facade, &mut steps, &geometry, arrival_segment)?;

        tracing::debug!(leg = idx, steps = steps.len(), "assembled leg");
        leg.steps = steps;
        Ok((leg, geometry))
    }

    fn make_leg_object(
        &self,
        leg: RouteLeg,
        geometry: &LegGeometry,
        annotation: Option<LegAnnotation>,
    ) -> Result<LegObject> {
        let steps = leg
            .steps
            .into_iter()
            .map(|step| self.make_step_object(step, geometry))
            .collect::<Result<Vec<_>>>()?;

        Ok(LegObject {
            steps,
            annotation,
            distance: leg.distance,
            duration: leg.duration,
            weight: leg.weight,
            summary: leg.summary,
        })
    }

    fn make_step_object(&self, step: RouteStep, geometry: &LegGeometry) -> Result<StepObject> {
        let locations = step.locations(geometry)?;
        Ok(StepObject {
            geometry: encode_geometry(self.parameters.geometries, locations)?,
            maneuver: ManeuverObject::from(&step.maneuver),
            name: step.name,
            mode: step.mode,
            distance: step.distance,
            duration: step.duration,
            weight: step.weight,
            intersections: step.intersections,
        })
    }
}
