//! Properties of pour problem extraction over complete circuits.
//!
//! These tests parse circuit JSON through the public API, resolve
//! connectivity with the built-in map, and check the extracted problem.

use copper_pour_problem::circuit::{Circuit, Layer, Point};
use copper_pour_problem::connectivity::{ConnectivityMap, ConnectivityResolver};
use copper_pour_problem::pour::{
    convert_circuit_to_problem, Bounds, Pad, PadGeometry, PourError, PourOptions,
};
use serde_json::{json, Value};

const EPS: f64 = 1e-9;

fn circuit(elements: Value) -> Circuit {
    Circuit::from_json_value(elements).expect("Failed to parse circuit")
}

fn board(extra: Value) -> Value {
    let mut board = json!({
        "type": "pcb_board",
        "pcb_board_id": "pcb_board_0",
        "width": 10,
        "height": 10
    });
    if let (Some(board), Some(extra)) = (board.as_object_mut(), extra.as_object()) {
        board.extend(extra.clone());
    }
    board
}

fn convert(circuit: &Circuit, options: &PourOptions) -> Vec<Pad> {
    let resolver = ConnectivityMap::from_circuit(circuit);
    convert_circuit_to_problem(circuit, options, &resolver)
        .expect("Conversion failed")
        .pads
}

fn top_options() -> PourOptions {
    PourOptions::new(Layer::Top, "connectivity_net0", 0.2, 0.2)
}

// =============================================================================
// Element classification
// =============================================================================

#[test]
fn rect_smtpad_bounds_match_source_geometry() {
    let c = circuit(json!([
        board(json!({})),
        { "type": "pcb_smtpad", "pcb_smtpad_id": "p0", "shape": "rect",
          "x": 1.5, "y": -2.0, "width": 0.9, "height": 0.4, "layer": "top" },
        { "type": "pcb_smtpad", "pcb_smtpad_id": "p1", "shape": "rect",
          "x": -3.0, "y": 4.0, "width": 2.0, "height": 1.25, "layer": "top" }
    ]));

    let pads = convert(&c, &top_options());
    assert_eq!(pads.len(), 2);

    let expected = [(1.5, -2.0, 0.9, 0.4), (-3.0, 4.0, 2.0, 1.25)];
    for (pad, (x, y, w, h)) in pads.iter().zip(expected) {
        let PadGeometry::Rect { bounds } = &pad.geometry else {
            panic!("Expected rect pad, got {:?}", pad.geometry);
        };
        assert!((bounds.width() - w).abs() < EPS);
        assert!((bounds.height() - h).abs() < EPS);
        assert!((bounds.center().x - x).abs() < EPS);
        assert!((bounds.center().y - y).abs() < EPS);
    }
}

#[test]
fn smtpad_on_other_layer_never_appears() {
    let c = circuit(json!([
        board(json!({})),
        { "type": "pcb_smtpad", "pcb_smtpad_id": "bottom_pad", "shape": "circle",
          "x": 0, "y": 0, "radius": 0.5, "layer": "bottom" },
        { "type": "pcb_smtpad", "pcb_smtpad_id": "top_pad", "shape": "circle",
          "x": 0, "y": 0, "radius": 0.5, "layer": "top" }
    ]));

    let pads = convert(&c, &top_options());
    assert!(pads.iter().all(|p| p.pad_id != "bottom_pad"));
    assert_eq!(pads.len(), 1);
}

#[test]
fn circular_elements_have_positive_radius() {
    let c = circuit(json!([
        board(json!({})),
        { "type": "pcb_smtpad", "pcb_smtpad_id": "smt", "shape": "circle",
          "x": 0, "y": 0, "radius": 0.3, "layer": "top" },
        { "type": "pcb_plated_hole", "pcb_plated_hole_id": "pth", "shape": "circle",
          "x": 1, "y": 1, "outer_diameter": 1.6, "hole_diameter": 0.8,
          "layers": ["top", "bottom"] },
        { "type": "pcb_hole", "pcb_hole_id": "mount", "hole_shape": "circle",
          "x": 4, "y": 4, "hole_diameter": 3.2 },
        { "type": "pcb_via", "pcb_via_id": "via", "x": 2, "y": 2,
          "outer_diameter": 0.6, "hole_diameter": 0.3, "layers": ["top", "bottom"] },
        { "type": "pcb_cutout", "pcb_cutout_id": "slot", "shape": "circle",
          "center": { "x": -4, "y": -4 }, "radius": 0.75 }
    ]));

    let pads = convert(&c, &top_options());
    assert_eq!(pads.len(), 5);

    let radii: Vec<f64> = pads
        .iter()
        .map(|p| match p.geometry {
            PadGeometry::Circle { radius, .. } => radius,
            ref other => panic!("Expected circle, got {other:?}"),
        })
        .collect();
    assert!(radii.iter().all(|r| *r > 0.0));
    assert!((radii[1] - 0.8).abs() < EPS, "plated hole uses outer diameter");
    assert!((radii[2] - 1.6).abs() < EPS, "bare hole uses drill diameter");
    assert!((radii[3] - 0.3).abs() < EPS);
}

#[test]
fn synthetic_keys_for_unconnected_elements() {
    let c = circuit(json!([
        board(json!({})),
        { "type": "pcb_smtpad", "pcb_smtpad_id": "smt", "shape": "circle",
          "x": 0, "y": 0, "radius": 0.3, "layer": "top" },
        { "type": "pcb_plated_hole", "pcb_plated_hole_id": "pth", "shape": "circle",
          "x": 1, "y": 1, "outer_diameter": 1.6, "layers": ["top"] },
        { "type": "pcb_hole", "pcb_hole_id": "mount", "hole_shape": "circle",
          "x": 4, "y": 4, "hole_diameter": 3.2 },
        { "type": "pcb_via", "pcb_via_id": "via", "x": 2, "y": 2,
          "outer_diameter": 0.6, "layers": ["top", "bottom"] },
        { "type": "pcb_cutout", "pcb_cutout_id": "cut", "shape": "rect",
          "center": { "x": -4, "y": -4 }, "width": 1, "height": 2 }
    ]));

    let keys: Vec<String> = convert(&c, &top_options())
        .iter()
        .map(|p| p.connectivity_key.to_string())
        .collect();
    assert_eq!(
        keys,
        [
            "unconnected:smt",
            "unconnected-plated-hole:pth",
            "hole:mount",
            "unconnected-via:via",
            "cutout:cut",
        ]
    );
}

#[test]
fn polygon_smtpads_do_not_block_conversion() {
    let polygon = |id: &str, layer: &str| {
        json!({ "type": "pcb_smtpad", "pcb_smtpad_id": id, "shape": "polygon", "layer": layer,
                "points": [{ "x": 0, "y": 0 }, { "x": 1, "y": 0 }, { "x": 0.5, "y": 1 }] })
    };
    let c = circuit(json!([
        board(json!({})),
        polygon("poly_bottom", "bottom"),
        polygon("poly_top", "top"),
        { "type": "pcb_smtpad", "pcb_smtpad_id": "rect_top", "shape": "rect",
          "x": 2, "y": 0, "width": 1, "height": 1, "layer": "top" }
    ]));

    let pads = convert(&c, &top_options());
    assert_eq!(pads.len(), 1);
    assert_eq!(pads[0].pad_id, "rect_top");
    assert!(matches!(pads[0].geometry, PadGeometry::Rect { .. }));
}

#[test]
fn unsupported_pad_and_cutout_shapes_are_dropped() {
    let c = circuit(json!([
        board(json!({})),
        { "type": "pcb_smtpad", "pcb_smtpad_id": "pill", "shape": "pill", "x": 0, "y": 0,
          "width": 2, "height": 1, "radius": 0.5, "layer": "top" },
        { "type": "pcb_smtpad", "pcb_smtpad_id": "rotated", "shape": "rotated_rect", "x": 1,
          "y": 1, "width": 2, "height": 1, "ccw_rotation": 45, "layer": "top" },
        { "type": "pcb_smtpad", "pcb_smtpad_id": "poly", "shape": "polygon", "layer": "top",
          "points": [{ "x": 0, "y": 0 }, { "x": 1, "y": 0 }, { "x": 0, "y": 1 }] },
        { "type": "pcb_cutout", "pcb_cutout_id": "slot", "shape": "path",
          "route": [{ "x": 0, "y": 0 }, { "x": 3, "y": 0 }], "slot_width": 0.5 }
    ]));

    let resolver = ConnectivityMap::from_circuit(&c);
    let problem = convert_circuit_to_problem(&c, &top_options(), &resolver)
        .expect("Unsupported shapes must not fail the conversion");
    assert!(problem.pads.is_empty());
    assert_eq!(problem.regions_for_pour.len(), 1);
}

#[test]
fn non_circular_holes_and_unknown_elements_are_dropped() {
    let c = circuit(json!([
        board(json!({})),
        { "type": "pcb_plated_hole", "pcb_plated_hole_id": "oval", "shape": "oval",
          "x": 0, "y": 0, "outer_width": 2, "outer_height": 1, "layers": ["top", "bottom"] },
        { "type": "pcb_hole", "pcb_hole_id": "square", "hole_shape": "square",
          "x": 0, "y": 0, "hole_diameter": 1 },
        { "type": "pcb_silkscreen_text", "pcb_silkscreen_text_id": "t", "text": "U1" },
        { "type": "pcb_fabrication_note_path", "route": [] }
    ]));

    assert!(convert(&c, &top_options()).is_empty());
}

#[test]
fn connected_pad_gets_net_key() {
    let c = circuit(json!([
        board(json!({})),
        { "type": "source_port", "source_port_id": "sp_r1_1", "name": "pin1" },
        { "type": "source_net", "source_net_id": "net_gnd", "name": "GND" },
        { "type": "source_trace", "source_trace_id": "st_0",
          "connected_source_port_ids": ["sp_r1_1"], "connected_source_net_ids": ["net_gnd"] },
        { "type": "pcb_port", "pcb_port_id": "pp_r1_1", "source_port_id": "sp_r1_1" },
        { "type": "pcb_smtpad", "pcb_smtpad_id": "r1_1", "shape": "rect", "x": 0, "y": 0,
          "width": 1, "height": 1, "layer": "top", "pcb_port_id": "pp_r1_1" }
    ]));

    let resolver = ConnectivityMap::from_circuit(&c);
    let net_key = resolver.lookup("net_gnd").expect("GND should be connected");
    let pads = convert(&c, &top_options());
    assert_eq!(pads[0].connectivity_key.to_string(), net_key);
}

// =============================================================================
// Trace segmentation
// =============================================================================

fn layer_hopping_trace() -> Circuit {
    circuit(json!([
        board(json!({})),
        { "type": "source_trace", "source_trace_id": "st_0",
          "connected_source_port_ids": [], "connected_source_net_ids": ["net_sig"] },
        { "type": "pcb_trace", "pcb_trace_id": "tr", "source_trace_id": "st_0", "route": [
            { "route_type": "wire", "x": -4, "y": 0, "width": 0.15, "layer": "top" },
            { "route_type": "wire", "x": -2, "y": 0, "width": 0.15, "layer": "top" },
            { "route_type": "via", "x": -2, "y": 0, "from_layer": "top", "to_layer": "bottom" },
            { "route_type": "wire", "x": -2, "y": 0, "width": 0.3, "layer": "bottom" },
            { "route_type": "wire", "x": 2, "y": 0, "width": 0.3, "layer": "bottom" },
            { "route_type": "via", "x": 2, "y": 0, "from_layer": "bottom", "to_layer": "top" },
            { "route_type": "wire", "x": 2, "y": 0, "width": 0.25, "layer": "top" },
            { "route_type": "wire", "x": 4, "y": 0, "width": 0.25, "layer": "top" },
            { "route_type": "wire", "x": 4, "y": 2, "width": 0.25, "layer": "top" }
        ]}
    ]))
}

fn trace_runs(pads: &[Pad]) -> Vec<(Vec<Point>, f64)> {
    pads.iter()
        .filter_map(|p| match &p.geometry {
            PadGeometry::Trace { segments, width } => Some((segments.clone(), *width)),
            _ => None,
        })
        .collect()
}

#[test]
fn layer_change_yields_separate_trace_pads() {
    let c = layer_hopping_trace();
    let pads = convert(&c, &top_options());
    let runs = trace_runs(&pads);

    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].0, vec![Point::new(-4.0, 0.0), Point::new(-2.0, 0.0)]);
    assert_eq!(
        runs[1].0,
        vec![
            Point::new(2.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 2.0)
        ]
    );
    assert!((runs[0].1 - 0.15).abs() < EPS);
    assert!((runs[1].1 - 0.25).abs() < EPS);
    assert!(runs.iter().all(|(points, _)| points.len() >= 2));

    assert_eq!(pads[0].pad_id, "tr-0");
    assert_eq!(pads[1].pad_id, "tr-1");
    assert_eq!(pads[0].connectivity_key, pads[1].connectivity_key);
}

#[test]
fn bottom_layer_sees_middle_run_only() {
    let c = layer_hopping_trace();
    let options = PourOptions::new(Layer::Bottom, "connectivity_net0", 0.2, 0.2);
    let runs = trace_runs(&convert(&c, &options));
    assert_eq!(runs.len(), 1);
    assert!((runs[0].1 - 0.3).abs() < EPS);
}

#[test]
fn single_wire_run_never_appears() {
    let c = circuit(json!([
        board(json!({})),
        { "type": "source_trace", "source_trace_id": "st_0",
          "connected_source_port_ids": [], "connected_source_net_ids": ["net_sig"] },
        { "type": "pcb_trace", "pcb_trace_id": "tr", "source_trace_id": "st_0", "route": [
            { "route_type": "wire", "x": 0, "y": 0, "width": 0.15, "layer": "top" },
            { "route_type": "via", "x": 0, "y": 0, "from_layer": "top", "to_layer": "bottom" },
            { "route_type": "wire", "x": 0, "y": 0, "width": 0.15, "layer": "bottom" },
            { "route_type": "wire", "x": 3, "y": 0, "width": 0.15, "layer": "bottom" }
        ]}
    ]));

    assert!(convert(&c, &top_options()).is_empty());
}

#[test]
fn unconnected_trace_is_skipped() {
    let c = circuit(json!([
        board(json!({})),
        { "type": "pcb_trace", "pcb_trace_id": "floating", "route": [
            { "route_type": "wire", "x": 0, "y": 0, "width": 0.15, "layer": "top" },
            { "route_type": "wire", "x": 3, "y": 0, "width": 0.15, "layer": "top" }
        ]}
    ]));

    assert!(convert(&c, &top_options()).is_empty());
}

// =============================================================================
// Bounds
// =============================================================================

#[test]
fn bounds_fall_back_to_board_dimensions() {
    let c = circuit(json!([board(json!({}))]));
    let resolver = ConnectivityMap::from_circuit(&c);
    let problem = convert_circuit_to_problem(&c, &top_options(), &resolver).unwrap();

    assert_eq!(problem.regions_for_pour.len(), 1);
    let region = &problem.regions_for_pour[0];
    assert_eq!(region.bounds, Bounds::new(-5.0, -5.0, 5.0, 5.0));
    assert!(region.outline.is_none());
}

#[test]
fn outline_override_ignores_board_outline() {
    let c = circuit(json!([board(json!({
        "outline": [
            { "x": -20, "y": -20 }, { "x": 20, "y": -20 },
            { "x": 20, "y": 20 }, { "x": -20, "y": 20 }
        ]
    }))]));
    let outline = vec![
        Point::new(-5.0, -5.0),
        Point::new(-4.0, -5.0),
        Point::new(0.0, -2.0),
        Point::new(-1.0, 3.0),
        Point::new(-5.0, 3.0),
    ];
    let options = top_options().with_outline(outline.clone());
    let resolver = ConnectivityMap::from_circuit(&c);
    let problem = convert_circuit_to_problem(&c, &options, &resolver).unwrap();

    let region = &problem.regions_for_pour[0];
    assert_eq!(region.bounds, Bounds::new(-5.0, -5.0, 0.0, 3.0));
    assert_eq!(region.outline.as_ref(), Some(&outline));
}

#[test]
fn board_outline_is_carried_to_region() {
    let c = circuit(json!([board(json!({
        "outline": [{ "x": 0, "y": 0 }, { "x": 8, "y": 0 }, { "x": 8, "y": 6 }]
    }))]));
    let resolver = ConnectivityMap::from_circuit(&c);
    let problem = convert_circuit_to_problem(&c, &top_options(), &resolver).unwrap();

    let region = &problem.regions_for_pour[0];
    assert_eq!(region.bounds, Bounds::new(0.0, 0.0, 8.0, 6.0));
    assert_eq!(region.outline.as_ref().map(Vec::len), Some(3));
}

#[test]
fn missing_board_is_fatal() {
    let c = circuit(json!([
        { "type": "pcb_smtpad", "pcb_smtpad_id": "p", "shape": "circle",
          "x": 0, "y": 0, "radius": 0.5, "layer": "top" }
    ]));
    let resolver = ConnectivityMap::from_circuit(&c);
    assert!(matches!(
        convert_circuit_to_problem(&c, &top_options(), &resolver),
        Err(PourError::NoBoard)
    ));
}

#[test]
fn problem_serialises_to_solver_contract() {
    let c = circuit(json!([
        board(json!({})),
        { "type": "pcb_hole", "pcb_hole_id": "mount", "hole_shape": "circle",
          "x": 1, "y": 1, "hole_diameter": 2 }
    ]));
    let resolver = ConnectivityMap::from_circuit(&c);
    let options = top_options().with_cutout_margin(0.3);
    let problem = convert_circuit_to_problem(&c, &options, &resolver).unwrap();

    let value = serde_json::to_value(&problem).unwrap();
    assert_eq!(
        value,
        json!({
            "pads": [{
                "shape": "circle",
                "padId": "mount",
                "layer": "top",
                "connectivityKey": "hole:mount",
                "x": 1.0,
                "y": 1.0,
                "radius": 1.0
            }],
            "regionsForPour": [{
                "shape": "rect",
                "layer": "top",
                "bounds": { "minX": -5.0, "minY": -5.0, "maxX": 5.0, "maxY": 5.0 },
                "connectivityKey": "connectivity_net0",
                "padMargin": 0.2,
                "traceMargin": 0.2,
                "board_edge_margin": 0.0,
                "cutout_margin": 0.3
            }]
        })
    );
}
