//! Route request options that shape the response document
//!
//! Parameters arrive either as JSON (serde) or as an OSRM-style query string:
//!
//! ```text
//! steps=true&geometries=polyline6&overview=full&annotations=duration,nodes
//! ```

use serde::{Deserialize, Serialize};

use crate::annotations::{resolve_requested, AnnotationsType};
use crate::encoding::GeometriesType;
use crate::error::{GuidanceError, Result};
use crate::overview::OverviewType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteParameters {
    /// Emit turn-by-turn steps
    pub steps: bool,
    /// Legacy switch: `true` with no explicit flags means all annotations
    pub annotations: bool,
    pub annotations_type: AnnotationsType,
    pub geometries: GeometriesType,
    pub overview: OverviewType,
}

impl RouteParameters {
    /// Annotation flags after applying the legacy-switch rule
    pub fn requested_annotations(&self) -> AnnotationsType {
        resolve_requested(self.annotations, self.annotations_type)
    }

    /// Parse `key=value` pairs separated by `&`. Unknown keys are rejected.
    pub fn from_query(query: &str) -> Result<Self> {
        let mut params = Self::default();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| GuidanceError::invalid_parameter(pair, ""))?;
            match key {
                "steps" => params.steps = parse_bool(key, value)?,
                "geometries" => params.geometries = value.parse()?,
                "overview" => params.overview = value.parse()?,
                "annotations" => {
                    // either the legacy boolean or a list of names
                    match value {
                        "true" => params.annotations = true,
                        "false" => params.annotations = false,
                        list => {
                            params.annotations = true;
                            params.annotations_type = parse_annotation_list(list)?;
                        }
                    }
                }
                _ => return Err(GuidanceError::invalid_parameter(key, value)),
            }
        }
        Ok(params)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(GuidanceError::invalid_parameter(key, value)),
    }
}

fn parse_annotation_list(list: &str) -> Result<AnnotationsType> {
    list.split(',').try_fold(AnnotationsType::NONE, |acc, name| {
        AnnotationsType::from_name(name)
            .map(|flag| acc | flag)
            .ok_or_else(|| GuidanceError::invalid_parameter("annotations", name))
    })
}
