//! Maneuver override resolution
//!
//! A maneuver override says: when travelling from `from_node` through
//! `via_node` onto `to_node`, announce `override_type` (and optionally
//! `direction`) instead of what guidance computed.
//!
//! Matching against the final steps of a leg happens in two passes per
//! candidate override:
//! 1. the `to_node` must be the origin of one of the next
//!    [`MAX_MANEUVER_LOOKAHEAD`] steps, or, if the leg ends before the window
//!    is full, the edge the leg arrives on;
//! 2. the via-node coordinate must appear in the geometry of one of those
//!    steps.
//!
//! The step containing the via-node is the approach to the turn; the turn
//! itself is the maneuver of the following step, which is the one rewritten.
//! The first match ends resolution for the whole leg.

use crate::error::Result;
use crate::facade::{DataFacade, ManeuverOverride};
use crate::geometry::LegGeometry;
use crate::instruction::TurnType;
use crate::step::RouteStep;
use crate::types::EdgeBasedNodeId;

/// How many steps (the current one included) are searched for `to_node`
pub const MAX_MANEUVER_LOOKAHEAD: usize = 5;

/// An override that fits the route, and where
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideMatch {
    pub maneuver: ManeuverOverride,
    /// Step whose `from_id` keyed the override
    pub from_step: usize,
    /// Step whose geometry contains the via-node
    pub via_step: usize,
}

impl OverrideMatch {
    /// Step carrying the turn maneuver; may be one past the last step
    pub fn target_step(&self) -> usize {
        self.via_step + 1
    }
}

/// Find the first override that applies to this leg.
///
/// `arrival_segment` is the edge-based node the leg ends on (the target
/// anchor's segment in the direction of travel).
pub fn find_override_match<F: DataFacade + ?Sized>(
    facade: &F,
    steps: &[RouteStep],
    geometry: &LegGeometry,
    arrival_segment: EdgeBasedNodeId,
) -> Result<Option<OverrideMatch>> {
    for (from_step, step) in steps.iter().enumerate() {
        let overrides = facade.overrides_starting_at(step.from_id);
        if overrides.is_empty() {
            continue;
        }

        let window_end = (from_step + MAX_MANEUVER_LOOKAHEAD).min(steps.len());
        let window = &steps[from_step..window_end];
        let window_clipped = window.len() < MAX_MANEUVER_LOOKAHEAD;

        for maneuver in overrides {
            let to_in_window = window.iter().any(|s| s.from_id == maneuver.to_node);
            if !to_in_window && (!window_clipped || arrival_segment != maneuver.to_node) {
                continue;
            }

            if let Some(via_step) = find_via_step(facade, window, geometry, maneuver)? {
                tracing::trace!(
                    from_node = maneuver.from_node,
                    via_node = maneuver.via_node,
                    to_node = maneuver.to_node,
                    from_step,
                    via_step = from_step + via_step,
                    "maneuver override matched"
                );
                return Ok(Some(OverrideMatch {
                    maneuver: *maneuver,
                    from_step,
                    via_step: from_step + via_step,
                }));
            }
        }
    }

    Ok(None)
}

/// Index within `window` of the first step whose geometry holds the via-node
fn find_via_step<F: DataFacade + ?Sized>(
    facade: &F,
    window: &[RouteStep],
    geometry: &LegGeometry,
    maneuver: &ManeuverOverride,
) -> Result<Option<usize>> {
    let Some(via_location) = facade.coordinate_of(maneuver.via_node) else {
        tracing::trace!(via_node = maneuver.via_node, "via node has no coordinate");
        return Ok(None);
    };

    for (idx, step) in window.iter().enumerate() {
        if step.locations(geometry)?.contains(&via_location) {
            return Ok(Some(idx));
        }
    }
    Ok(None)
}

/// Resolve overrides for one leg and rewrite the matched maneuver.
///
/// Returns the match, if any. A match on the last step leaves every
/// instruction as computed but still ends resolution.
pub fn apply_maneuver_overrides<F: DataFacade + ?Sized>(
    facade: &F,
    steps: &mut [RouteStep],
    geometry: &LegGeometry,
    arrival_segment: EdgeBasedNodeId,
) -> Result<Option<OverrideMatch>> {
    let Some(found) = find_override_match(facade, steps, geometry, arrival_segment)? else {
        return Ok(None);
    };

    debug_assert_ne!(found.maneuver.override_type, TurnType::Invalid);

    match steps.get_mut(found.target_step()) {
        Some(step) => {
            let instruction = &mut step.maneuver.instruction;
            instruction.turn_type = found.maneuver.override_type;
            if let Some(direction) = found.maneuver.direction {
                instruction.direction_modifier = direction;
            }
        }
        None => {
            tracing::trace!(
                via_step = found.via_step,
                "maneuver override matched on the last step, nothing to rewrite"
            );
        }
    }

    Ok(Some(found))
}
