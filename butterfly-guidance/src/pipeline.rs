//! Step post-processing pipeline
//!
//! Steps come out of the assembler one per turn. Guidance then rewrites them
//! in a fixed sequence of stages, each taking ownership of the previous
//! stage's output:
//!
//! 1. trim short segments (may also shorten the geometry)
//! 2. roundabouts
//! 3. collapse turn instructions
//! 4. anticipate lane changes
//! 5. build intersections
//! 6. suppress short name segments
//! 7. assign relative locations
//! 8. resync geometry
//!
//! Collapsing expects roundabouts to be tagged already, and relative
//! locations need the final step boundaries. Stages must run in this order.

use crate::error::{GuidanceError, Result};
use crate::geometry::LegGeometry;
use crate::step::RouteStep;
use crate::types::PhantomNodes;

/// Bodies of the guidance stages.
///
/// Every stage defaults to passing its input through, so an implementation
/// overrides only the stages it provides.
pub trait GuidanceTransforms {
    fn trim_short_segments(
        &self,
        steps: Vec<RouteStep>,
        _geometry: &mut LegGeometry,
    ) -> Vec<RouteStep> {
        steps
    }

    fn handle_roundabouts(&self, steps: Vec<RouteStep>) -> Vec<RouteStep> {
        steps
    }

    fn collapse_turn_instructions(&self, steps: Vec<RouteStep>) -> Vec<RouteStep> {
        steps
    }

    fn anticipate_lane_change(&self, steps: Vec<RouteStep>) -> Vec<RouteStep> {
        steps
    }

    fn build_intersections(&self, steps: Vec<RouteStep>) -> Vec<RouteStep> {
        steps
    }

    fn suppress_short_name_segments(&self, steps: Vec<RouteStep>) -> Vec<RouteStep> {
        steps
    }

    fn assign_relative_locations(
        &self,
        steps: Vec<RouteStep>,
        _geometry: &LegGeometry,
        _phantoms: &PhantomNodes,
    ) -> Vec<RouteStep> {
        steps
    }

    fn resync_geometry(&self, geometry: LegGeometry, _steps: &[RouteStep]) -> LegGeometry {
        geometry
    }
}

/// Leaves the assembler's steps untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPostProcessing;

impl GuidanceTransforms for NoPostProcessing {}

/// Run all stages on one leg, in order, and check the result.
///
/// Returns the final steps and the resynced geometry.
pub fn postprocess_steps<T: GuidanceTransforms + ?Sized>(
    transforms: &T,
    steps: Vec<RouteStep>,
    mut geometry: LegGeometry,
    phantoms: &PhantomNodes,
) -> Result<(Vec<RouteStep>, LegGeometry)> {
    let steps = transforms.trim_short_segments(steps, &mut geometry);
    let steps = transforms.handle_roundabouts(steps);
    let steps = transforms.collapse_turn_instructions(steps);
    let steps = transforms.anticipate_lane_change(steps);
    let steps = transforms.build_intersections(steps);
    let steps = transforms.suppress_short_name_segments(steps);
    let steps = transforms.assign_relative_locations(steps, &geometry, phantoms);
    let geometry = transforms.resync_geometry(geometry, &steps);

    geometry.validate()?;
    check_step_ranges(&steps, &geometry)?;

    tracing::trace!(
        steps = steps.len(),
        locations = geometry.locations.len(),
        "guidance post-processing done"
    );

    Ok((steps, geometry))
}

/// Every step range must lie inside the geometry, in travel order.
pub fn check_step_ranges(steps: &[RouteStep], geometry: &LegGeometry) -> Result<()> {
    let mut previous_begin = 0;
    for step in steps {
        let range = step.geometry_range(geometry)?;
        if range.begin() < previous_begin {
            return Err(GuidanceError::GeometryRange {
                begin: range.begin(),
                end: range.end(),
                len: geometry.locations.len(),
            });
        }
        previous_begin = range.begin();
    }
    Ok(())
}
