//! Circuit JSON reading.
//!
//! Each record is first deserialised into a permissive raw struct whose
//! geometry fields are all optional, then validated into the typed element.
//! Geometry required by the record's shape must be present; unknown record
//! types are skipped.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::elements::{
    Board, CircuitElement, Cutout, CutoutShape, Hole, HoleShape, Layer, PlatedHole, Point, Port,
    RoutePoint, SmtPad, SmtPadShape, SourceNet, SourcePort, SourceTrace, Trace, Via,
};
use super::error::{CircuitError, CircuitResult};

/// Parses a JSON document into validated circuit elements.
pub(super) fn parse_elements(value: Value) -> CircuitResult<Vec<CircuitElement>> {
    let Value::Array(items) = value else {
        return Err(CircuitError::NotAnArray);
    };

    let mut elements = Vec::with_capacity(items.len());
    let mut skipped = 0usize;

    for (index, item) in items.into_iter().enumerate() {
        let Some(element_type) = item.get("type").and_then(Value::as_str).map(str::to_owned)
        else {
            tracing::debug!(index, "Skipping record without a type tag");
            skipped += 1;
            continue;
        };

        let ty = element_type.as_str();
        let element = match ty {
            "pcb_board" => CircuitElement::Board(decode::<RawBoard>(index, ty, item)?.into()),
            "pcb_smtpad" => {
                CircuitElement::SmtPad(decode::<RawSmtPad>(index, ty, item)?.try_into()?)
            }
            "pcb_plated_hole" => {
                CircuitElement::PlatedHole(decode::<RawPlatedHole>(index, ty, item)?.try_into()?)
            }
            "pcb_hole" => CircuitElement::Hole(decode::<RawHole>(index, ty, item)?.try_into()?),
            "pcb_cutout" => {
                CircuitElement::Cutout(decode::<RawCutout>(index, ty, item)?.try_into()?)
            }
            "pcb_via" => CircuitElement::Via(decode::<RawVia>(index, ty, item)?.try_into()?),
            "pcb_trace" => CircuitElement::Trace(decode::<RawTrace>(index, ty, item)?.try_into()?),
            "pcb_port" => CircuitElement::Port(decode::<RawPort>(index, ty, item)?.into()),
            "source_port" => {
                CircuitElement::SourcePort(decode::<RawSourcePort>(index, ty, item)?.into())
            }
            "source_trace" => {
                CircuitElement::SourceTrace(decode::<RawSourceTrace>(index, ty, item)?.into())
            }
            "source_net" => {
                CircuitElement::SourceNet(decode::<RawSourceNet>(index, ty, item)?.into())
            }
            _ => {
                tracing::trace!(index, element_type = %ty, "Skipping unhandled element type");
                skipped += 1;
                continue;
            }
        };
        tracing::trace!(
            index,
            element_type = element.type_name(),
            id = element.id(),
            "Parsed element"
        );
        elements.push(element);
    }

    tracing::debug!(count = elements.len(), skipped, "Parsed circuit elements");

    Ok(elements)
}

fn decode<T: DeserializeOwned>(index: usize, element_type: &str, value: Value) -> CircuitResult<T> {
    serde_json::from_value(value).map_err(|e| CircuitError::invalid_element(index, element_type, e))
}

fn require<T>(
    value: Option<T>,
    element_type: &str,
    element_id: &str,
    field: &'static str,
) -> CircuitResult<T> {
    value.ok_or_else(|| CircuitError::missing_field(element_type, element_id, field))
}

fn parse_layer(element_id: &str, name: &str) -> CircuitResult<Layer> {
    Layer::parse(name).ok_or_else(|| CircuitError::unknown_layer(element_id, name))
}

fn parse_layers(element_id: &str, names: &[String]) -> CircuitResult<Vec<Layer>> {
    names.iter().map(|name| parse_layer(element_id, name)).collect()
}

#[derive(Deserialize)]
struct RawBoard {
    pcb_board_id: String,
    width: Option<f64>,
    height: Option<f64>,
    outline: Option<Vec<Point>>,
}

impl From<RawBoard> for Board {
    fn from(raw: RawBoard) -> Self {
        Self {
            id: raw.pcb_board_id,
            width: raw.width,
            height: raw.height,
            outline: raw.outline,
        }
    }
}

#[derive(Deserialize)]
struct RawSmtPad {
    pcb_smtpad_id: String,
    shape: String,
    x: Option<f64>,
    y: Option<f64>,
    layer: String,
    width: Option<f64>,
    height: Option<f64>,
    radius: Option<f64>,
    pcb_port_id: Option<String>,
}

impl TryFrom<RawSmtPad> for SmtPad {
    type Error = CircuitError;

    fn try_from(raw: RawSmtPad) -> CircuitResult<Self> {
        const TYPE: &str = "pcb_smtpad";
        let id = raw.pcb_smtpad_id;
        let center = |id: &str| -> CircuitResult<Point> {
            Ok(Point::new(
                require(raw.x, TYPE, id, "x")?,
                require(raw.y, TYPE, id, "y")?,
            ))
        };
        let shape = match raw.shape.as_str() {
            "rect" => SmtPadShape::Rect {
                center: center(&id)?,
                width: require(raw.width, TYPE, &id, "width")?,
                height: require(raw.height, TYPE, &id, "height")?,
            },
            "circle" => SmtPadShape::Circle {
                center: center(&id)?,
                radius: require(raw.radius, TYPE, &id, "radius")?,
            },
            _ => SmtPadShape::Other(raw.shape),
        };
        let layer = parse_layer(&id, &raw.layer)?;

        Ok(Self {
            id,
            layer,
            shape,
            pcb_port_id: raw.pcb_port_id,
        })
    }
}

#[derive(Deserialize)]
struct RawPlatedHole {
    pcb_plated_hole_id: String,
    shape: String,
    x: f64,
    y: f64,
    #[serde(default)]
    layers: Vec<String>,
    outer_diameter: Option<f64>,
    pcb_port_id: Option<String>,
}

impl TryFrom<RawPlatedHole> for PlatedHole {
    type Error = CircuitError;

    fn try_from(raw: RawPlatedHole) -> CircuitResult<Self> {
        let id = raw.pcb_plated_hole_id;
        let shape = match raw.shape.as_str() {
            "circle" => HoleShape::Circle {
                diameter: require(raw.outer_diameter, "pcb_plated_hole", &id, "outer_diameter")?,
            },
            _ => HoleShape::Other(raw.shape),
        };
        let layers = parse_layers(&id, &raw.layers)?;

        Ok(Self {
            id,
            x: raw.x,
            y: raw.y,
            layers,
            shape,
            pcb_port_id: raw.pcb_port_id,
        })
    }
}

#[derive(Deserialize)]
struct RawHole {
    pcb_hole_id: String,
    hole_shape: String,
    x: f64,
    y: f64,
    hole_diameter: Option<f64>,
}

impl TryFrom<RawHole> for Hole {
    type Error = CircuitError;

    fn try_from(raw: RawHole) -> CircuitResult<Self> {
        let id = raw.pcb_hole_id;
        let shape = match raw.hole_shape.as_str() {
            "circle" => HoleShape::Circle {
                diameter: require(raw.hole_diameter, "pcb_hole", &id, "hole_diameter")?,
            },
            _ => HoleShape::Other(raw.hole_shape),
        };

        Ok(Self {
            id,
            x: raw.x,
            y: raw.y,
            shape,
        })
    }
}

#[derive(Deserialize)]
struct RawCutout {
    pcb_cutout_id: String,
    shape: String,
    center: Option<Point>,
    width: Option<f64>,
    height: Option<f64>,
    radius: Option<f64>,
    points: Option<Vec<Point>>,
}

impl TryFrom<RawCutout> for Cutout {
    type Error = CircuitError;

    fn try_from(raw: RawCutout) -> CircuitResult<Self> {
        const TYPE: &str = "pcb_cutout";
        let id = raw.pcb_cutout_id;
        let shape = match raw.shape.as_str() {
            "rect" => CutoutShape::Rect {
                center: require(raw.center, TYPE, &id, "center")?,
                width: require(raw.width, TYPE, &id, "width")?,
                height: require(raw.height, TYPE, &id, "height")?,
            },
            "circle" => CutoutShape::Circle {
                center: require(raw.center, TYPE, &id, "center")?,
                radius: require(raw.radius, TYPE, &id, "radius")?,
            },
            "polygon" => CutoutShape::Polygon {
                points: require(raw.points, TYPE, &id, "points")?,
            },
            _ => CutoutShape::Other(raw.shape),
        };

        Ok(Self { id, shape })
    }
}

#[derive(Deserialize)]
struct RawVia {
    pcb_via_id: String,
    x: f64,
    y: f64,
    #[serde(default)]
    layers: Vec<String>,
    outer_diameter: Option<f64>,
    pcb_trace_id: Option<String>,
}

impl TryFrom<RawVia> for Via {
    type Error = CircuitError;

    fn try_from(raw: RawVia) -> CircuitResult<Self> {
        let id = raw.pcb_via_id;
        let outer_diameter = require(raw.outer_diameter, "pcb_via", &id, "outer_diameter")?;
        let layers = parse_layers(&id, &raw.layers)?;

        Ok(Self {
            id,
            x: raw.x,
            y: raw.y,
            layers,
            outer_diameter,
            pcb_trace_id: raw.pcb_trace_id,
        })
    }
}

#[derive(Deserialize)]
struct RawRoutePoint {
    route_type: String,
    x: Option<f64>,
    y: Option<f64>,
    width: Option<f64>,
    layer: Option<String>,
    start_pcb_port_id: Option<String>,
    end_pcb_port_id: Option<String>,
}

#[derive(Deserialize)]
struct RawTrace {
    pcb_trace_id: String,
    #[serde(default)]
    route: Vec<RawRoutePoint>,
    source_trace_id: Option<String>,
}

impl TryFrom<RawTrace> for Trace {
    type Error = CircuitError;

    fn try_from(raw: RawTrace) -> CircuitResult<Self> {
        const TYPE: &str = "pcb_trace";
        let id = raw.pcb_trace_id;
        let route = raw
            .route
            .into_iter()
            .map(|point| {
                if point.route_type != "wire" {
                    return Ok(RoutePoint::Other {
                        route_type: point.route_type,
                    });
                }
                let layer = require(point.layer, TYPE, &id, "route.layer")?;
                Ok(RoutePoint::Wire {
                    x: require(point.x, TYPE, &id, "route.x")?,
                    y: require(point.y, TYPE, &id, "route.y")?,
                    width: require(point.width, TYPE, &id, "route.width")?,
                    layer: parse_layer(&id, &layer)?,
                    start_pcb_port_id: point.start_pcb_port_id,
                    end_pcb_port_id: point.end_pcb_port_id,
                })
            })
            .collect::<CircuitResult<Vec<_>>>()?;

        Ok(Self {
            id,
            route,
            source_trace_id: raw.source_trace_id,
        })
    }
}

#[derive(Deserialize)]
struct RawPort {
    pcb_port_id: String,
    source_port_id: Option<String>,
}

impl From<RawPort> for Port {
    fn from(raw: RawPort) -> Self {
        Self {
            id: raw.pcb_port_id,
            source_port_id: raw.source_port_id,
        }
    }
}

#[derive(Deserialize)]
struct RawSourcePort {
    source_port_id: String,
}

impl From<RawSourcePort> for SourcePort {
    fn from(raw: RawSourcePort) -> Self {
        Self {
            id: raw.source_port_id,
        }
    }
}

#[derive(Deserialize)]
struct RawSourceTrace {
    source_trace_id: String,
    #[serde(default)]
    connected_source_port_ids: Vec<String>,
    #[serde(default)]
    connected_source_net_ids: Vec<String>,
}

impl From<RawSourceTrace> for SourceTrace {
    fn from(raw: RawSourceTrace) -> Self {
        Self {
            id: raw.source_trace_id,
            connected_source_port_ids: raw.connected_source_port_ids,
            connected_source_net_ids: raw.connected_source_net_ids,
        }
    }
}

#[derive(Deserialize)]
struct RawSourceNet {
    source_net_id: String,
    name: String,
    subcircuit_connectivity_map_key: Option<String>,
}

impl From<RawSourceNet> for SourceNet {
    fn from(raw: RawSourceNet) -> Self {
        Self {
            id: raw.source_net_id,
            name: raw.name,
            subcircuit_connectivity_map_key: raw.subcircuit_connectivity_map_key,
        }
    }
}
