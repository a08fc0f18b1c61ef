//! Pour targets named by net.
//!
//! Callers usually know which net they want to pour ("GND"), not its
//! connectivity key. A [`PourRequest`] names the net; it is resolved to a key
//! and converted into an independent [`Problem`]. Several requests over the
//! same circuit yield several problems, one region each.

use serde::Deserialize;

use super::error::{PourError, PourResult};
use super::problem::{convert_circuit_to_problem, PourOptions, Problem};
use crate::circuit::{Circuit, Layer, Point};
use crate::connectivity::ConnectivityResolver;

/// A pour on one layer for one named net.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PourRequest {
    /// Layer to pour on.
    pub layer: Layer,
    /// Name of the `source_net` to pour.
    pub net_name: String,
    /// Clearance around pads of other nets, in mm.
    pub pad_margin: f64,
    /// Clearance around traces of other nets, in mm.
    pub trace_margin: f64,
    /// Clearance from the region outline, in mm.
    #[serde(default)]
    pub board_edge_margin: Option<f64>,
    /// Clearance around cutouts, in mm.
    #[serde(default)]
    pub cutout_margin: Option<f64>,
    /// Region outline replacing the board outline.
    #[serde(default)]
    pub outline: Option<Vec<Point>>,
}

impl PourRequest {
    /// Returns conversion options for this request with the resolved key.
    #[must_use]
    pub fn to_options(&self, pour_connectivity_key: impl Into<String>) -> PourOptions {
        PourOptions {
            layer: self.layer,
            pour_connectivity_key: pour_connectivity_key.into(),
            pad_margin: self.pad_margin,
            trace_margin: self.trace_margin,
            board_edge_margin: self.board_edge_margin,
            cutout_margin: self.cutout_margin,
            outline: self.outline.clone(),
        }
    }
}

/// Resolves the connectivity key of the net named `net_name`.
///
/// The net's id is looked up in `resolver`; if that fails, the net's
/// `subcircuit_connectivity_map_key` is used.
///
/// # Errors
///
/// Returns [`PourError::NetNotFound`] if no such net exists, and
/// [`PourError::NetNotConnected`] if it has no key either way.
pub fn resolve_pour_key<R>(circuit: &Circuit, resolver: &R, net_name: &str) -> PourResult<String>
where
    R: ConnectivityResolver + ?Sized,
{
    let net = circuit
        .source_net_by_name(net_name)
        .ok_or_else(|| PourError::net_not_found(net_name))?;

    resolver
        .lookup(&net.id)
        .map(str::to_string)
        .or_else(|| net.subcircuit_connectivity_map_key.clone())
        .ok_or_else(|| PourError::net_not_connected(net_name))
}

/// Resolves `request`'s net and converts the circuit for it.
///
/// # Errors
///
/// Returns an error if the net cannot be resolved or the conversion fails.
pub fn build_problem<R>(
    circuit: &Circuit,
    request: &PourRequest,
    resolver: &R,
) -> PourResult<Problem>
where
    R: ConnectivityResolver + ?Sized,
{
    let key = resolve_pour_key(circuit, resolver, &request.net_name)?;
    tracing::debug!(net = %request.net_name, key = %key, "Resolved pour net");
    convert_circuit_to_problem(circuit, &request.to_options(key), resolver)
}

/// Builds one problem per request, in order.
///
/// # Errors
///
/// Fails on the first request that cannot be built.
pub fn build_problems<R>(
    circuit: &Circuit,
    requests: &[PourRequest],
    resolver: &R,
) -> PourResult<Vec<Problem>>
where
    R: ConnectivityResolver + ?Sized,
{
    requests
        .iter()
        .map(|request| build_problem(circuit, request, resolver))
        .collect()
}
