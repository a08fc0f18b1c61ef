//! Typed board element records.
//!
//! These types represent the validated elements of a circuit JSON document:
//! the physical PCB primitives (pads, holes, cutouts, vias, traces), the board
//! itself, and the source-side records that carry electrical connectivity.

use serde::{Deserialize, Serialize};

/// A 2D point in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X position in mm.
    pub x: f64,
    /// Y position in mm.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Copper layer references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Top copper layer.
    #[default]
    Top,
    /// Bottom copper layer.
    Bottom,
    /// Inner copper layer 1.
    Inner1,
    /// Inner copper layer 2.
    Inner2,
    /// Inner copper layer 3.
    Inner3,
    /// Inner copper layer 4.
    Inner4,
    /// Inner copper layer 5.
    Inner5,
    /// Inner copper layer 6.
    Inner6,
}

impl Layer {
    /// Returns the circuit JSON layer name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Inner1 => "inner1",
            Self::Inner2 => "inner2",
            Self::Inner3 => "inner3",
            Self::Inner4 => "inner4",
            Self::Inner5 => "inner5",
            Self::Inner6 => "inner6",
        }
    }

    /// Parses a layer from its circuit JSON name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "inner1" => Some(Self::Inner1),
            "inner2" => Some(Self::Inner2),
            "inner3" => Some(Self::Inner3),
            "inner4" => Some(Self::Inner4),
            "inner5" => Some(Self::Inner5),
            "inner6" => Some(Self::Inner6),
            _ => None,
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The board definition (`pcb_board`).
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Board id.
    pub id: String,
    /// Board width in mm, if declared.
    pub width: Option<f64>,
    /// Board height in mm, if declared.
    pub height: Option<f64>,
    /// Board outline polygon, if declared.
    pub outline: Option<Vec<Point>>,
}

/// Geometry of an SMT pad.
#[derive(Debug, Clone, PartialEq)]
pub enum SmtPadShape {
    /// Axis-aligned rectangle.
    Rect {
        /// Centre in mm.
        center: Point,
        /// Width in mm.
        width: f64,
        /// Height in mm.
        height: f64,
    },
    /// Circle.
    Circle {
        /// Centre in mm.
        center: Point,
        /// Radius in mm.
        radius: f64,
    },
    /// Any shape the pour pipeline does not model (`pill`, `rotated_rect`,
    /// `polygon`, ...). Its geometry is not read.
    Other(String),
}

/// A surface-mount pad (`pcb_smtpad`).
#[derive(Debug, Clone, PartialEq)]
pub struct SmtPad {
    /// Pad id.
    pub id: String,
    /// Layer the pad sits on.
    pub layer: Layer,
    /// Pad geometry.
    pub shape: SmtPadShape,
    /// Port this pad belongs to, if any.
    pub pcb_port_id: Option<String>,
}

/// Shape of a plated or bare hole.
#[derive(Debug, Clone, PartialEq)]
pub enum HoleShape {
    /// Circular hole with the given diameter (outer copper diameter for
    /// plated holes, drill diameter for bare holes).
    Circle {
        /// Diameter in mm.
        diameter: f64,
    },
    /// Oval, pill, square, ... (not modelled).
    Other(String),
}

/// A plated through-hole (`pcb_plated_hole`).
#[derive(Debug, Clone, PartialEq)]
pub struct PlatedHole {
    /// Hole id.
    pub id: String,
    /// Centre X in mm.
    pub x: f64,
    /// Centre Y in mm.
    pub y: f64,
    /// Layers with copper around the hole.
    pub layers: Vec<Layer>,
    /// Hole geometry.
    pub shape: HoleShape,
    /// Port this hole belongs to, if any.
    pub pcb_port_id: Option<String>,
}

/// A non-plated hole (`pcb_hole`).
#[derive(Debug, Clone, PartialEq)]
pub struct Hole {
    /// Hole id.
    pub id: String,
    /// Centre X in mm.
    pub x: f64,
    /// Centre Y in mm.
    pub y: f64,
    /// Hole geometry.
    pub shape: HoleShape,
}

/// Geometry of a board cutout.
#[derive(Debug, Clone, PartialEq)]
pub enum CutoutShape {
    /// Rectangle.
    Rect {
        /// Centre of the rectangle.
        center: Point,
        /// Width in mm.
        width: f64,
        /// Height in mm.
        height: f64,
    },
    /// Circle.
    Circle {
        /// Centre of the circle.
        center: Point,
        /// Radius in mm.
        radius: f64,
    },
    /// Arbitrary polygon.
    Polygon {
        /// Polygon vertices, in order.
        points: Vec<Point>,
    },
    /// Unsupported cutout shape.
    Other(String),
}

/// A board cutout (`pcb_cutout`).
#[derive(Debug, Clone, PartialEq)]
pub struct Cutout {
    /// Cutout id.
    pub id: String,
    /// Cutout geometry.
    pub shape: CutoutShape,
}

/// A via (`pcb_via`).
#[derive(Debug, Clone, PartialEq)]
pub struct Via {
    /// Via id.
    pub id: String,
    /// Centre X in mm.
    pub x: f64,
    /// Centre Y in mm.
    pub y: f64,
    /// Copper layers the via connects.
    pub layers: Vec<Layer>,
    /// Annular ring outer diameter in mm.
    pub outer_diameter: f64,
    /// Trace the via belongs to, if any.
    pub pcb_trace_id: Option<String>,
}

/// A single waypoint of a trace route.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutePoint {
    /// A wire waypoint on a copper layer.
    Wire {
        /// X position in mm.
        x: f64,
        /// Y position in mm.
        y: f64,
        /// Wire width in mm.
        width: f64,
        /// Layer of the wire.
        layer: Layer,
        /// Port the wire starts at, if any.
        start_pcb_port_id: Option<String>,
        /// Port the wire ends at, if any.
        end_pcb_port_id: Option<String>,
    },
    /// Any other waypoint (layer-changing via, ...).
    Other {
        /// The route type tag, e.g. `via`.
        route_type: String,
    },
}

/// A copper trace (`pcb_trace`).
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// Trace id.
    pub id: String,
    /// Ordered route waypoints.
    pub route: Vec<RoutePoint>,
    /// Source trace this PCB trace implements, if any.
    pub source_trace_id: Option<String>,
}

/// A PCB port (`pcb_port`), linking physical pads to source ports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    /// Port id.
    pub id: String,
    /// Source port this PCB port implements.
    pub source_port_id: Option<String>,
}

/// A logical component port (`source_port`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePort {
    /// Source port id.
    pub id: String,
}

/// A logical connection (`source_trace`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceTrace {
    /// Source trace id.
    pub id: String,
    /// Ports the trace connects.
    pub connected_source_port_ids: Vec<String>,
    /// Nets the trace connects.
    pub connected_source_net_ids: Vec<String>,
}

/// A named net (`source_net`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceNet {
    /// Net id.
    pub id: String,
    /// Net name (e.g. `GND`).
    pub name: String,
    /// Precomputed connectivity key from a subcircuit, if any.
    pub subcircuit_connectivity_map_key: Option<String>,
}

/// A validated circuit element.
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitElement {
    /// `pcb_board`
    Board(Board),
    /// `pcb_smtpad`
    SmtPad(SmtPad),
    /// `pcb_plated_hole`
    PlatedHole(PlatedHole),
    /// `pcb_hole`
    Hole(Hole),
    /// `pcb_cutout`
    Cutout(Cutout),
    /// `pcb_via`
    Via(Via),
    /// `pcb_trace`
    Trace(Trace),
    /// `pcb_port`
    Port(Port),
    /// `source_port`
    SourcePort(SourcePort),
    /// `source_trace`
    SourceTrace(SourceTrace),
    /// `source_net`
    SourceNet(SourceNet),
}

impl CircuitElement {
    /// Returns the element's id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Board(e) => &e.id,
            Self::SmtPad(e) => &e.id,
            Self::PlatedHole(e) => &e.id,
            Self::Hole(e) => &e.id,
            Self::Cutout(e) => &e.id,
            Self::Via(e) => &e.id,
            Self::Trace(e) => &e.id,
            Self::Port(e) => &e.id,
            Self::SourcePort(e) => &e.id,
            Self::SourceTrace(e) => &e.id,
            Self::SourceNet(e) => &e.id,
        }
    }

    /// Returns the circuit JSON `type` tag of the element.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Board(_) => "pcb_board",
            Self::SmtPad(_) => "pcb_smtpad",
            Self::PlatedHole(_) => "pcb_plated_hole",
            Self::Hole(_) => "pcb_hole",
            Self::Cutout(_) => "pcb_cutout",
            Self::Via(_) => "pcb_via",
            Self::Trace(_) => "pcb_trace",
            Self::Port(_) => "pcb_port",
            Self::SourcePort(_) => "source_port",
            Self::SourceTrace(_) => "source_trace",
            Self::SourceNet(_) => "source_net",
        }
    }
}
