//! Legs and whole-route totals

use serde::{Deserialize, Serialize};

use crate::step::RouteStep;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteLeg {
    pub distance: f64,
    pub duration: f64,
    pub weight: f64,
    pub summary: String,
    /// Empty unless steps were requested
    pub steps: Vec<RouteStep>,
}

/// Totals over all legs of a route
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Route {
    pub distance: f64,
    pub duration: f64,
    pub weight: f64,
}

/// Sum leg totals into route totals
pub fn assemble_route(legs: &[RouteLeg]) -> Route {
    legs.iter().fold(Route::default(), |acc, leg| Route {
        distance: acc.distance + leg.distance,
        duration: acc.duration + leg.duration,
        weight: acc.weight + leg.weight,
    })
}
