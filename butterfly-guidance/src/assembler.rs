//! Per-leg geometry, metrics and raw steps
//!
//! Assembling a leg means walking the unpacked path with the network data at
//! hand (segment lengths, durations, shape points). That is the business of
//! the routing data layer, so this crate only defines the contract.

use crate::facade::DataFacade;
use crate::geometry::LegGeometry;
use crate::leg::RouteLeg;
use crate::step::RouteStep;
use crate::types::{PathData, PhantomNode};

/// Inputs shared by all assembler calls for one leg
#[derive(Debug, Clone, Copy)]
pub struct LegInput<'a> {
    pub path_data: &'a [PathData],
    pub source: &'a PhantomNode,
    pub target: &'a PhantomNode,
    pub source_traversed_in_reverse: bool,
    pub target_traversed_in_reverse: bool,
}

pub trait LegAssembler<F: DataFacade + ?Sized> {
    /// Coordinates, node ids and per-segment annotations of the leg.
    ///
    /// Must satisfy [`LegGeometry::validate`].
    fn assemble_geometry(&self, facade: &F, input: &LegInput<'_>) -> LegGeometry;

    /// Leg totals and summary; `steps` stays empty.
    ///
    /// `collapse_summary` tells whether the summary will be shown next to
    /// steps (the assembler may pick a shorter summary then).
    fn assemble_leg(
        &self,
        facade: &F,
        input: &LegInput<'_>,
        geometry: &LegGeometry,
        collapse_summary: bool,
    ) -> RouteLeg;

    /// One step per maneuver with ranges into `geometry`, before any
    /// guidance post-processing.
    fn assemble_steps(
        &self,
        facade: &F,
        input: &LegInput<'_>,
        geometry: &LegGeometry,
    ) -> Vec<RouteStep>;
}
