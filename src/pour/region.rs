//! Pour region descriptor.

use serde::Serialize;

use super::bounds::RegionExtent;
use super::pad::Bounds;
use super::problem::PourOptions;
use crate::circuit::{Layer, Point};

/// Shape tag of a pour region. Regions are always described by their
/// bounding rectangle, refined by the optional outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionShape {
    /// Rectangular bounds.
    #[default]
    Rect,
}

/// The area to fill with copper and the margins to keep around obstacles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PourRegion {
    /// Shape tag (always `rect`).
    pub shape: RegionShape,
    /// Layer to pour on.
    pub layer: Layer,
    /// Bounding box of the region.
    pub bounds: Bounds,
    /// True outline of the region; the fill must stay inside it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<Vec<Point>>,
    /// Connectivity key of the net the pour belongs to.
    #[serde(rename = "connectivityKey")]
    pub connectivity_key: String,
    /// Clearance around pads of other nets, in mm.
    #[serde(rename = "padMargin")]
    pub pad_margin: f64,
    /// Clearance around traces of other nets, in mm.
    #[serde(rename = "traceMargin")]
    pub trace_margin: f64,
    /// Clearance from the region outline, in mm.
    pub board_edge_margin: f64,
    /// Clearance around cutouts, in mm. The solver picks a default if unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutout_margin: Option<f64>,
}

impl PourRegion {
    /// Builds the region for `options` over the resolved `extent`.
    ///
    /// An unset board edge margin becomes `0`.
    #[must_use]
    pub fn new(options: &PourOptions, extent: RegionExtent) -> Self {
        Self {
            shape: RegionShape::Rect,
            layer: options.layer,
            bounds: extent.bounds,
            outline: extent.outline,
            connectivity_key: options.pour_connectivity_key.clone(),
            pad_margin: options.pad_margin,
            trace_margin: options.trace_margin,
            board_edge_margin: options.board_edge_margin.unwrap_or(0.0),
            cutout_margin: options.cutout_margin,
        }
    }
}
