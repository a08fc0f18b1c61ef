//! Problem assembly.

use serde::Serialize;

use super::bounds::resolve_extent;
use super::error::{PourError, PourResult};
use super::extract::extract_pads;
use super::pad::Pad;
use super::region::PourRegion;
use crate::circuit::{Circuit, Layer, Point};
use crate::connectivity::ConnectivityResolver;

/// Options for one pour conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct PourOptions {
    /// Layer to pour on.
    pub layer: Layer,
    /// Connectivity key of the net the pour belongs to.
    pub pour_connectivity_key: String,
    /// Clearance around pads of other nets, in mm.
    pub pad_margin: f64,
    /// Clearance around traces of other nets, in mm.
    pub trace_margin: f64,
    /// Clearance from the region outline, in mm (default 0).
    pub board_edge_margin: Option<f64>,
    /// Clearance around cutouts, in mm.
    pub cutout_margin: Option<f64>,
    /// Region outline replacing the board outline.
    pub outline: Option<Vec<Point>>,
}

impl PourOptions {
    /// Creates options with the required settings.
    #[must_use]
    pub fn new(
        layer: Layer,
        pour_connectivity_key: impl Into<String>,
        pad_margin: f64,
        trace_margin: f64,
    ) -> Self {
        Self {
            layer,
            pour_connectivity_key: pour_connectivity_key.into(),
            pad_margin,
            trace_margin,
            board_edge_margin: None,
            cutout_margin: None,
            outline: None,
        }
    }

    /// Sets the board edge margin.
    #[must_use]
    pub fn with_board_edge_margin(mut self, margin: f64) -> Self {
        self.board_edge_margin = Some(margin);
        self
    }

    /// Sets the cutout margin.
    #[must_use]
    pub fn with_cutout_margin(mut self, margin: f64) -> Self {
        self.cutout_margin = Some(margin);
        self
    }

    /// Sets an outline replacing the board outline.
    #[must_use]
    pub fn with_outline(mut self, outline: Vec<Point>) -> Self {
        self.outline = Some(outline);
        self
    }
}

/// A solver-ready copper pour problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Problem {
    /// Obstacles and connection targets on the pour layer.
    pub pads: Vec<Pad>,
    /// The region to fill (exactly one per conversion).
    #[serde(rename = "regionsForPour")]
    pub regions_for_pour: Vec<PourRegion>,
}

/// Converts `circuit` into a pour problem for one layer and net.
///
/// # Errors
///
/// Returns an error if the circuit has no board, or if the board has neither
/// an outline (nor `options.outline`) nor width/height.
pub fn convert_circuit_to_problem<R>(
    circuit: &Circuit,
    options: &PourOptions,
    resolver: &R,
) -> PourResult<Problem>
where
    R: ConnectivityResolver + ?Sized,
{
    let board = circuit.board().ok_or(PourError::NoBoard)?;

    let pads = extract_pads(circuit.elements(), options.layer, resolver);
    let extent = resolve_extent(board, options.outline.as_deref())?;
    let region = PourRegion::new(options, extent);

    tracing::info!(
        layer = %options.layer,
        net = %options.pour_connectivity_key,
        pads = pads.len(),
        traces = pads.iter().filter(|p| p.is_trace()).count(),
        "Built pour problem"
    );

    Ok(Problem {
        pads,
        regions_for_pour: vec![region],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Board, CircuitElement};
    use std::collections::HashMap;

    #[test]
    fn missing_board_is_fatal() {
        let circuit = Circuit::default();
        let options = PourOptions::new(Layer::Top, "k", 0.2, 0.2);
        let resolver: HashMap<String, String> = HashMap::new();
        assert!(matches!(
            convert_circuit_to_problem(&circuit, &options, &resolver),
            Err(PourError::NoBoard)
        ));
    }

    #[test]
    fn empty_board_yields_one_region_and_no_pads() {
        let circuit = Circuit::new(vec![CircuitElement::Board(Board {
            id: "pcb_board_0".to_string(),
            width: Some(10.0),
            height: Some(6.0),
            outline: None,
        })]);
        let options = PourOptions::new(Layer::Top, "k", 0.2, 0.2);
        let resolver: HashMap<String, String> = HashMap::new();
        let problem = convert_circuit_to_problem(&circuit, &options, &resolver).unwrap();
        assert!(problem.pads.is_empty());
        assert_eq!(problem.regions_for_pour.len(), 1);
        assert!((problem.regions_for_pour[0].bounds.max_y - 3.0).abs() < f64::EPSILON);

        let value = serde_json::to_value(&problem).unwrap();
        assert!(value["regionsForPour"].is_array());
    }
}
