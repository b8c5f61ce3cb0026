//! End-to-end response assembly over a small synthetic network

use anyhow::Result;
use butterfly_guidance::geometry::SegmentAnnotation;
use butterfly_guidance::types::{Coordinate, SegmentId};
use butterfly_guidance::{
    AnnotationsType, DataFacade, DirectionModifier, GeometriesType, GuidanceError,
    InMemoryFacade, LegAssembler, LegGeometry, LegInput, ManeuverOverride, ManyRoutes,
    NoPostProcessing, OverviewType, PathData, PhantomNode, PhantomNodes, RawRoute, RouteApi,
    RouteLeg, RouteParameters, RouteStep, TracingObserver, TurnInstruction, TurnType,
    WaypointType,
};
use serde_json::{json, Value};

const LAT: i32 = 50_000_000;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("butterfly_guidance=trace")
        .with_test_writer()
        .try_init();
}

/// Turn node `k` sits at longitude `k * 1000` micro-degrees
fn node_location(node: u32) -> Coordinate {
    Coordinate::new(node as i32 * 1_000, LAT)
}

/// One location per turn node between the two anchors, 10 m and 1 s per segment.
///
/// Step 0 departs, step `i` announces the turn of `path[i - 1]` and the last
/// step arrives on the final path edge. Step `i < path.len()` covers `[i, i + 2)`.
/// The arrival segment itself never shows up as a step origin, so overrides
/// pointing at it can only match through the end-of-leg fallback.
struct StraightLineAssembler;

impl LegAssembler<InMemoryFacade> for StraightLineAssembler {
    fn assemble_geometry(&self, facade: &InMemoryFacade, input: &LegInput<'_>) -> LegGeometry {
        let mut locations = vec![input.source.location];
        locations.extend(
            input
                .path_data
                .iter()
                .filter_map(|data| facade.coordinate_of(data.turn_via_node)),
        );
        locations.push(input.target.location);

        let annotations = vec![
            SegmentAnnotation {
                distance: 10.0,
                duration: 1.0,
                weight: 2.0,
                datasource: 0,
            };
            locations.len() - 1
        ];
        let osm_node_ids = (0..locations.len() as u64).map(|i| 9_000 + i).collect();

        LegGeometry {
            locations,
            annotations,
            osm_node_ids,
        }
    }

    fn assemble_leg(
        &self,
        facade: &InMemoryFacade,
        input: &LegInput<'_>,
        geometry: &LegGeometry,
        _collapse_summary: bool,
    ) -> RouteLeg {
        RouteLeg {
            distance: geometry.annotations.iter().map(|a| a.distance).sum(),
            duration: geometry.annotations.iter().map(|a| a.duration).sum(),
            weight: geometry.annotations.iter().map(|a| a.weight).sum(),
            summary: facade.name_of(input.source.name_id).to_string(),
            steps: Vec::new(),
        }
    }

    fn assemble_steps(
        &self,
        facade: &InMemoryFacade,
        input: &LegInput<'_>,
        geometry: &LegGeometry,
    ) -> Vec<RouteStep> {
        let path = input.path_data;
        let last = geometry.locations.len() - 1;

        let mut steps: Vec<RouteStep> = path
            .iter()
            .enumerate()
            .map(|(i, data)| {
                let mut step = RouteStep {
                    from_id: data.from_edge_based_node,
                    name: facade.name_of(data.name_id).to_string(),
                    mode: "driving".to_string(),
                    distance: 10.0,
                    duration: 1.0,
                    weight: 2.0,
                    geometry_begin: i,
                    geometry_end: i + 2,
                    ..Default::default()
                };
                step.maneuver.location = geometry.locations[i];
                if i == 0 {
                    step.maneuver.waypoint_type = WaypointType::Depart;
                } else {
                    step.maneuver.instruction = path[i - 1].turn_instruction;
                }
                step
            })
            .collect();

        let mut arrive = RouteStep {
            from_id: path.last().map_or(
                input.source.active_segment_id(input.source_traversed_in_reverse),
                |data| data.from_edge_based_node,
            ),
            mode: "driving".to_string(),
            geometry_begin: last,
            geometry_end: last + 1,
            ..Default::default()
        };
        arrive.maneuver.location = geometry.locations[last];
        arrive.maneuver.waypoint_type = WaypointType::Arrive;
        steps.push(arrive);
        steps
    }
}

fn facade() -> InMemoryFacade {
    let mut facade = InMemoryFacade::new("routability");
    facade.add_name("");
    for node in 1..=20 {
        facade.set_coordinate(node, node_location(node));
    }
    facade
}

fn phantom(segment: u32, lon: i32, name_id: u32) -> PhantomNode {
    PhantomNode {
        location: Coordinate::new(lon, LAT),
        input_location: Coordinate::new(lon, LAT),
        name_id,
        forward_segment_id: SegmentId::new(segment),
        reverse_segment_id: SegmentId::new(segment + 1),
    }
}

/// `(from_edge_based_node, turn_via_node)` pairs
fn path(edges: &[(u32, u32)]) -> Vec<PathData> {
    edges
        .iter()
        .map(|&(from, via)| PathData {
            from_edge_based_node: from,
            turn_via_node: via,
            name_id: 0,
            turn_instruction: TurnInstruction::new(TurnType::Continue, DirectionModifier::Straight),
            duration_until_turn: 10,
            weight_until_turn: 2,
        })
        .collect()
}

fn route(legs: Vec<(PhantomNodes, Vec<PathData>)>, weight: Option<i32>) -> RawRoute {
    let n = legs.len();
    let (segment_end_coordinates, unpacked_path_segments) = legs.into_iter().unzip();
    RawRoute {
        segment_end_coordinates,
        unpacked_path_segments,
        source_traversed_in_reverse: vec![false; n],
        target_traversed_in_reverse: vec![false; n],
        shortest_path_weight: weight,
    }
}

/// Single leg from lon 0 to lon 100_000 turning at the given nodes
fn single_leg(vias: &[u32], weight: Option<i32>) -> RawRoute {
    let edges: Vec<(u32, u32)> = vias.iter().map(|&via| (100 + via, via)).collect();
    let anchors = PhantomNodes {
        source: phantom(100, 0, 0),
        target: phantom(500, 100_000, 0),
    };
    route(vec![(anchors, path(&edges))], weight)
}

fn respond(facade: &InMemoryFacade, params: &RouteParameters, routes: &ManyRoutes) -> Result<Value> {
    let api = RouteApi::new(facade, params, &StraightLineAssembler, &NoPostProcessing);
    Ok(api.make_response(routes)?.to_json()?)
}

#[test]
fn test_invalid_routes_are_dropped_in_order() -> Result<()> {
    init_tracing();
    let facade = facade();
    let routes = ManyRoutes {
        routes: vec![
            single_leg(&[1, 2], Some(10)),
            single_leg(&[3], None),
            single_leg(&[4, 5, 6], Some(30)),
        ],
    };

    let json = respond(&facade, &RouteParameters::default(), &routes)?;
    assert_eq!(json["code"], "Ok");

    let distances: Vec<f64> = json["routes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["distance"].as_f64().unwrap())
        .collect();
    assert_eq!(distances, vec![30.0, 40.0]);
    Ok(())
}

#[test]
fn test_waypoints_come_from_the_first_route_even_if_invalid() -> Result<()> {
    let mut facade = facade();
    let start = facade.add_name("Start Street");
    let finish = facade.add_name("Finish Lane");

    let mut first = single_leg(&[1], None);
    first.segment_end_coordinates[0].source.name_id = start;
    first.segment_end_coordinates[0].target.name_id = finish;
    let second = single_leg(&[2], Some(5));

    let routes = ManyRoutes {
        routes: vec![first, second],
    };
    let json = respond(&facade, &RouteParameters::default(), &routes)?;

    assert_eq!(json["routes"].as_array().unwrap().len(), 1);
    let names: Vec<&str> = json["waypoints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Start Street", "Finish Lane"]);
    Ok(())
}

#[test]
fn test_multi_leg_route() -> Result<()> {
    let facade = facade();
    let first = PhantomNodes {
        source: phantom(100, 0, 0),
        target: phantom(300, 4_500, 0),
    };
    let second = PhantomNodes {
        source: phantom(300, 4_500, 0),
        target: phantom(700, 9_500, 0),
    };
    let raw = route(
        vec![
            (first, path(&[(101, 1), (102, 2), (103, 3)])),
            (second, path(&[(105, 5), (107, 7)])),
        ],
        Some(40),
    );

    let params = RouteParameters {
        geometries: GeometriesType::GeoJson,
        overview: OverviewType::Full,
        ..Default::default()
    };
    let json = respond(&facade, &params, &ManyRoutes { routes: vec![raw] })?;
    let route = &json["routes"][0];

    assert_eq!(json["waypoints"].as_array().unwrap().len(), 3);
    assert_eq!(route["legs"].as_array().unwrap().len(), 2);
    // 4 + 3 segments of 10 m each
    assert_eq!(route["distance"], 70.0);
    assert_eq!(route["weight"], 14.0);
    assert_eq!(route["weight_name"], "routability");

    // 5 + 4 locations, joined at lon 4_500
    let overview = route["geometry"]["coordinates"].as_array().unwrap();
    assert_eq!(overview.len(), 8);
    assert_eq!(route["geometry"]["type"], "LineString");
    Ok(())
}

#[test]
fn test_annotation_array_lengths() -> Result<()> {
    let facade = facade();
    let params = RouteParameters {
        annotations: true,
        ..Default::default()
    };
    let routes = ManyRoutes {
        routes: vec![single_leg(&[1, 2, 3], Some(10))],
    };
    let json = respond(&facade, &params, &routes)?;
    let annotation = &json["routes"][0]["legs"][0]["annotation"];

    // 3 turn nodes + 2 anchors
    let locations = 5;
    for key in ["speed", "duration", "distance", "weight", "datasources"] {
        assert_eq!(annotation[key].as_array().unwrap().len(), locations - 1, "{key}");
    }
    assert_eq!(annotation["nodes"].as_array().unwrap().len(), locations);
    assert_eq!(annotation["speed"][0], 10.0);
    Ok(())
}

#[test]
fn test_no_annotations_unless_requested() -> Result<()> {
    let facade = facade();
    let routes = ManyRoutes {
        routes: vec![single_leg(&[1], Some(1))],
    };
    let json = respond(&facade, &RouteParameters::default(), &routes)?;
    assert!(json["routes"][0]["legs"][0].get("annotation").is_none());

    let params = RouteParameters {
        annotations_type: AnnotationsType::NODES,
        ..Default::default()
    };
    let json = respond(&facade, &params, &routes)?;
    let annotation = json["routes"][0]["legs"][0]["annotation"].as_object().unwrap();
    assert_eq!(annotation.keys().map(String::as_str).collect::<Vec<_>>(), vec!["nodes"]);
    Ok(())
}

#[test]
fn test_legacy_annotations_flag_equals_explicit_all() -> Result<()> {
    let facade = facade();
    let routes = ManyRoutes {
        routes: vec![single_leg(&[1, 2], Some(10))],
    };
    let legacy = RouteParameters {
        annotations: true,
        annotations_type: AnnotationsType::NONE,
        ..Default::default()
    };
    let explicit = RouteParameters {
        annotations: false,
        annotations_type: AnnotationsType::ALL,
        ..Default::default()
    };

    assert_eq!(
        respond(&facade, &legacy, &routes)?,
        respond(&facade, &explicit, &routes)?
    );
    Ok(())
}

#[test]
fn test_override_rewrites_the_turn_after_the_via_step() -> Result<()> {
    init_tracing();
    let mut facade = facade();
    // steps: S0 depart on 101, S1 on 102, S2 on 103, S3 on 104, S4 arrive
    facade.add_override(ManeuverOverride {
        from_node: 102,
        via_node: 2,
        to_node: 103,
        override_type: TurnType::Turn,
        direction: Some(DirectionModifier::SharpLeft),
    });
    let params = RouteParameters {
        steps: true,
        ..Default::default()
    };
    let routes = ManyRoutes {
        routes: vec![single_leg(&[1, 2, 3, 4], Some(10))],
    };

    let json = respond(&facade, &params, &routes)?;
    let steps = json["routes"][0]["legs"][0]["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 5);

    let types: Vec<&str> = steps
        .iter()
        .map(|s| s["maneuver"]["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["depart", "continue", "turn", "continue", "arrive"]);
    assert_eq!(steps[2]["maneuver"]["modifier"], "sharp left");
    assert_eq!(steps[3]["maneuver"]["modifier"], "straight");
    Ok(())
}

#[test]
fn test_override_ignored_without_steps() -> Result<()> {
    let mut facade = facade();
    facade.add_override(ManeuverOverride {
        from_node: 102,
        via_node: 2,
        to_node: 103,
        override_type: TurnType::Turn,
        direction: None,
    });
    let routes = ManyRoutes {
        routes: vec![single_leg(&[1, 2, 3], Some(10))],
    };
    let json = respond(&facade, &RouteParameters::default(), &routes)?;
    assert_eq!(json["routes"][0]["legs"][0]["steps"], json!([]));
    Ok(())
}

#[test]
fn test_overview_false_omits_route_geometry() -> Result<()> {
    let facade = facade();
    let routes = ManyRoutes {
        routes: vec![single_leg(&[1, 2], Some(10))],
    };

    let params = RouteParameters {
        overview: OverviewType::False,
        ..Default::default()
    };
    let json = respond(&facade, &params, &routes)?;
    assert!(json["routes"][0].get("geometry").is_none());

    let json = respond(&facade, &RouteParameters::default(), &routes)?;
    assert!(json["routes"][0]["geometry"].is_string());
    Ok(())
}

#[test]
fn test_step_geometries_follow_requested_format() -> Result<()> {
    let facade = facade();
    let routes = ManyRoutes {
        routes: vec![single_leg(&[1, 2], Some(10))],
    };

    let params = RouteParameters {
        steps: true,
        geometries: GeometriesType::GeoJson,
        ..Default::default()
    };
    let json = respond(&facade, &params, &routes)?;
    let steps = json["routes"][0]["legs"][0]["steps"].as_array().unwrap();
    assert_eq!(
        steps[1]["geometry"],
        json!({
            "type": "LineString",
            "coordinates": [[0.001, 50.0], [0.002, 50.0]]
        })
    );
    // arrive step is a single point
    assert_eq!(
        steps[2]["geometry"]["coordinates"],
        json!([[0.1, 50.0]])
    );

    let params = RouteParameters {
        steps: true,
        geometries: GeometriesType::Polyline6,
        ..Default::default()
    };
    let json = respond(&facade, &params, &routes)?;
    let steps = json["routes"][0]["legs"][0]["steps"].as_array().unwrap();
    assert!(steps.iter().all(|s| s["geometry"].is_string()));
    Ok(())
}

#[test]
fn test_empty_route_set_is_rejected() {
    let facade = facade();
    let params = RouteParameters::default();
    let api = RouteApi::new(&facade, &params, &StraightLineAssembler, &NoPostProcessing);
    assert_eq!(
        api.make_response(&ManyRoutes::default()).unwrap_err(),
        GuidanceError::EmptyRouteSet
    );
}

#[test]
fn test_mismatched_leg_vectors_are_rejected() {
    let facade = facade();
    let params = RouteParameters::default();
    let mut raw = single_leg(&[1], Some(1));
    raw.target_traversed_in_reverse.push(true);

    let api = RouteApi::new(&facade, &params, &StraightLineAssembler, &NoPostProcessing)
        .with_observer(&TracingObserver);
    let err = api
        .make_response(&ManyRoutes { routes: vec![raw] })
        .unwrap_err();
    assert!(matches!(err, GuidanceError::LegMismatch { anchors: 1, .. }));
}

/// Leg 0: 0 -> 4_500 over nodes 1, 2, 3. Leg 1: 4_500 -> 9_500 over nodes 5, 6, 7.
///
/// Step origins are 101..=103 in leg 0 and 105..=107 in leg 1; leg 0 arrives
/// on segment 300 forward or 301 reversed.
fn two_legs() -> RawRoute {
    let first = PhantomNodes {
        source: phantom(100, 0, 0),
        target: phantom(300, 4_500, 0),
    };
    let second = PhantomNodes {
        source: phantom(300, 4_500, 0),
        target: phantom(700, 9_500, 0),
    };
    route(
        vec![
            (first, path(&[(101, 1), (102, 2), (103, 3)])),
            (second, path(&[(105, 5), (106, 6), (107, 7)])),
        ],
        Some(40),
    )
}

fn step_field<'a>(json: &'a Value, leg: usize, field: &str) -> Vec<&'a str> {
    json["routes"][0]["legs"][leg]["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["maneuver"][field].as_str().unwrap())
        .collect()
}

#[test]
fn test_overrides_resolve_per_leg_with_reversed_arrival() -> Result<()> {
    let mut facade = facade();
    // only matches if the arrival were the forward segment
    facade.add_override(ManeuverOverride {
        from_node: 101,
        via_node: 1,
        to_node: 300,
        override_type: TurnType::Merge,
        direction: None,
    });
    // reaches the reversed arrival segment of leg 0
    facade.add_override(ManeuverOverride {
        from_node: 102,
        via_node: 2,
        to_node: 301,
        override_type: TurnType::Turn,
        direction: None,
    });
    facade.add_override(ManeuverOverride {
        from_node: 106,
        via_node: 6,
        to_node: 107,
        override_type: TurnType::Turn,
        direction: Some(DirectionModifier::Left),
    });

    let mut raw = two_legs();
    raw.target_traversed_in_reverse[0] = true;
    let params = RouteParameters {
        steps: true,
        ..Default::default()
    };
    let json = respond(&facade, &params, &ManyRoutes { routes: vec![raw] })?;

    assert_eq!(
        step_field(&json, 0, "type"),
        vec!["depart", "continue", "turn", "arrive"]
    );
    assert_eq!(step_field(&json, 0, "modifier")[2], "straight");
    assert_eq!(
        step_field(&json, 1, "type"),
        vec!["depart", "continue", "turn", "arrive"]
    );
    assert_eq!(step_field(&json, 1, "modifier")[2], "left");
    Ok(())
}

#[test]
fn test_forward_arrival_ignores_reverse_segment_override() -> Result<()> {
    let mut facade = facade();
    facade.add_override(ManeuverOverride {
        from_node: 102,
        via_node: 2,
        to_node: 301,
        override_type: TurnType::Turn,
        direction: None,
    });
    let params = RouteParameters {
        steps: true,
        ..Default::default()
    };
    let json = respond(&facade, &params, &ManyRoutes { routes: vec![two_legs()] })?;

    assert_eq!(
        step_field(&json, 0, "type"),
        vec!["depart", "continue", "continue", "arrive"]
    );
    Ok(())
}

#[test]
fn test_override_lookahead_stays_within_leg() -> Result<()> {
    let mut facade = facade();
    // to_node is the first step of leg 1, within five steps of 103 across the join
    facade.add_override(ManeuverOverride {
        from_node: 103,
        via_node: 3,
        to_node: 105,
        override_type: TurnType::Fork,
        direction: Some(DirectionModifier::SlightRight),
    });
    let params = RouteParameters {
        steps: true,
        ..Default::default()
    };
    let json = respond(&facade, &params, &ManyRoutes { routes: vec![two_legs()] })?;

    for leg in 0..2 {
        assert_eq!(
            step_field(&json, leg, "type"),
            vec!["depart", "continue", "continue", "arrive"],
            "leg {leg}"
        );
    }
    Ok(())
}
