//! Solver input shapes.
//!
//! Every relevant board element is normalised into a [`Pad`]: an obstacle or
//! connection target tagged with the layer it occupies and the connectivity
//! key the solver uses to decide whether the pour connects to it.

use serde::Serialize;

use super::key::ConnectivityKey;
use crate::circuit::{Layer, Point};

/// An axis-aligned bounding box in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    /// Minimum X.
    pub min_x: f64,
    /// Minimum Y.
    pub min_y: f64,
    /// Maximum X.
    pub max_x: f64,
    /// Maximum Y.
    pub max_y: f64,
}

impl Bounds {
    /// Creates bounds from explicit extents.
    #[must_use]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates bounds of a `width` x `height` box centred on (`x`, `y`).
    #[must_use]
    pub fn from_center(x: f64, y: f64, width: f64, height: f64) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Self::new(x - half_w, y - half_h, x + half_w, y + half_h)
    }

    /// Returns the bounding box of `points`, or `None` if there are none.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let init = Self::new(first.x, first.y, first.x, first.y);
        Some(rest.iter().fold(init, |b, p| {
            Self::new(
                b.min_x.min(p.x),
                b.min_y.min(p.y),
                b.max_x.max(p.x),
                b.max_y.max(p.y),
            )
        }))
    }

    /// Width of the box.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the box.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Centre of the box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// Geometry of a pad.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum PadGeometry {
    /// Axis-aligned rectangle.
    Rect {
        /// Rectangle extents.
        bounds: Bounds,
    },
    /// Circle.
    Circle {
        /// Centre X.
        x: f64,
        /// Centre Y.
        y: f64,
        /// Radius in mm.
        radius: f64,
    },
    /// Closed polygon.
    Polygon {
        /// Vertices in order.
        points: Vec<Point>,
    },
    /// Polyline of uniform width, always at least two points.
    Trace {
        /// Polyline points in order.
        segments: Vec<Point>,
        /// Wire width in mm.
        width: f64,
    },
}

/// A solver input shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pad {
    /// Pad id (the source element id, or `<traceId>-<n>` for trace runs).
    pub pad_id: String,
    /// Layer the pad occupies.
    pub layer: Layer,
    /// Connectivity key.
    pub connectivity_key: ConnectivityKey,
    /// Geometry.
    #[serde(flatten)]
    pub geometry: PadGeometry,
}

impl Pad {
    /// Creates a rectangular pad.
    #[must_use]
    pub fn rect(
        pad_id: impl Into<String>,
        layer: Layer,
        connectivity_key: ConnectivityKey,
        bounds: Bounds,
    ) -> Self {
        Self {
            pad_id: pad_id.into(),
            layer,
            connectivity_key,
            geometry: PadGeometry::Rect { bounds },
        }
    }

    /// Creates a circular pad.
    #[must_use]
    pub fn circle(
        pad_id: impl Into<String>,
        layer: Layer,
        connectivity_key: ConnectivityKey,
        center: Point,
        radius: f64,
    ) -> Self {
        Self {
            pad_id: pad_id.into(),
            layer,
            connectivity_key,
            geometry: PadGeometry::Circle {
                x: center.x,
                y: center.y,
                radius,
            },
        }
    }

    /// Creates a polygon pad.
    #[must_use]
    pub fn polygon(
        pad_id: impl Into<String>,
        layer: Layer,
        connectivity_key: ConnectivityKey,
        points: Vec<Point>,
    ) -> Self {
        Self {
            pad_id: pad_id.into(),
            layer,
            connectivity_key,
            geometry: PadGeometry::Polygon { points },
        }
    }

    /// Creates a trace pad.
    #[must_use]
    pub fn trace(
        pad_id: impl Into<String>,
        layer: Layer,
        connectivity_key: ConnectivityKey,
        segments: Vec<Point>,
        width: f64,
    ) -> Self {
        Self {
            pad_id: pad_id.into(),
            layer,
            connectivity_key,
            geometry: PadGeometry::Trace { segments, width },
        }
    }

    /// Returns true for trace pads.
    #[must_use]
    pub const fn is_trace(&self) -> bool {
        matches!(self.geometry, PadGeometry::Trace { .. })
    }
}
