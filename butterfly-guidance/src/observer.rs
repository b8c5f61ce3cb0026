//! Diagnostics hook for route assembly
//!
//! Nothing is emitted unless a caller injects an observer. [`TracingObserver`]
//! reports every raw route as a `tracing` event, which is what to reach for
//! when checking what the search handed over against the guidance output.

use crate::types::{PathData, RawRoute};

pub trait RouteObserver {
    /// Called once per raw route, valid or not, before it is assembled
    fn raw_route(&self, _index: usize, _route: &RawRoute) {}
}

/// Default observer: does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RouteObserver for NoopObserver {}

/// Emits one `debug` event per leg of every raw route
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RouteObserver for TracingObserver {
    fn raw_route(&self, index: usize, route: &RawRoute) {
        for (leg, path) in route.unpacked_path_segments.iter().enumerate() {
            let Some(phantoms) = route.segment_end_coordinates.get(leg) else {
                continue;
            };
            let source_reversed = route.source_traversed_in_reverse.get(leg).copied().unwrap_or(false);
            let target_reversed = route.target_traversed_in_reverse.get(leg).copied().unwrap_or(false);

            tracing::debug!(
                route = index,
                leg,
                valid = route.is_valid(),
                source_segment = phantoms.source.active_segment_id(source_reversed),
                target_segment = phantoms.target.active_segment_id(target_reversed),
                path = %describe_path(path),
                "raw route leg"
            );
        }
    }
}

/// `(from_node type modifier)` per path element
pub fn describe_path(path: &[PathData]) -> String {
    path.iter()
        .map(|data| {
            format!(
                "({} {:?} {:?})",
                data.from_edge_based_node,
                data.turn_instruction.turn_type,
                data.turn_instruction.direction_modifier
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}
