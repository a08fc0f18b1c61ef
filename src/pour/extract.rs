//! Element classification.
//!
//! Turns board elements into solver pads for one target layer:
//!
//! | Element | Included when | Pad | Key without a net |
//! |---------|---------------|-----|-------------------|
//! | SMT pad | on the layer | rect / circle | `unconnected:<id>` |
//! | Plated hole | circular, layer in its layers | circle, outer diameter | `unconnected-plated-hole:<id>` |
//! | Hole | circular (through-all) | circle, drill diameter | always `hole:<id>` |
//! | Cutout | always (through-all) | rect / circle / polygon | always `cutout:<id>` |
//! | Via | layer in its layers | circle, outer diameter | `unconnected-via:<id>` |
//! | Trace | has a net | one trace pad per same-layer run | skipped |

use super::key::ConnectivityKey;
use super::pad::{Bounds, Pad};
use super::trace::segment_trace;
use crate::circuit::{
    CircuitElement, Cutout, CutoutShape, Hole, HoleShape, Layer, PlatedHole, Point, SmtPad,
    SmtPadShape, Via,
};
use crate::connectivity::ConnectivityResolver;

/// Extracts the pads relevant to `layer`, in element order.
pub fn extract_pads<R>(elements: &[CircuitElement], layer: Layer, resolver: &R) -> Vec<Pad>
where
    R: ConnectivityResolver + ?Sized,
{
    let mut pads = Vec::new();

    for element in elements {
        let pad = match element {
            CircuitElement::SmtPad(pad) => smt_pad(pad, layer, resolver),
            CircuitElement::PlatedHole(hole) => plated_hole(hole, layer, resolver),
            CircuitElement::Hole(hole) => bare_hole(hole, layer),
            CircuitElement::Cutout(cutout) => cutout_pad(cutout, layer),
            CircuitElement::Via(via) => via_pad(via, layer, resolver),
            CircuitElement::Trace(trace) => {
                let Some(key) = resolver.lookup(&trace.id) else {
                    tracing::debug!(trace = %trace.id, "Skipping trace without connectivity");
                    continue;
                };
                let key = ConnectivityKey::Real(key.to_string());
                let runs = segment_trace(trace, layer, &key, pads.len());
                pads.extend(runs);
                continue;
            }
            CircuitElement::Board(_)
            | CircuitElement::Port(_)
            | CircuitElement::SourcePort(_)
            | CircuitElement::SourceTrace(_)
            | CircuitElement::SourceNet(_) => None,
        };

        if let Some(pad) = pad {
            pads.push(pad);
        }
    }

    pads
}

fn smt_pad<R>(pad: &SmtPad, layer: Layer, resolver: &R) -> Option<Pad>
where
    R: ConnectivityResolver + ?Sized,
{
    if pad.layer != layer {
        return None;
    }

    let key = ConnectivityKey::resolved_or(resolver.lookup(&pad.id), || {
        ConnectivityKey::Unconnected(pad.id.clone())
    });

    match &pad.shape {
        SmtPadShape::Rect {
            center,
            width,
            height,
        } => Some(Pad::rect(
            &pad.id,
            pad.layer,
            key,
            Bounds::from_center(center.x, center.y, *width, *height),
        )),
        SmtPadShape::Circle { center, radius } => {
            Some(Pad::circle(&pad.id, pad.layer, key, *center, *radius))
        }
        SmtPadShape::Other(shape) => {
            tracing::debug!(
                pad = %pad.id,
                shape = %shape,
                "Skipping SMT pad with unsupported shape"
            );
            None
        }
    }
}

fn plated_hole<R>(hole: &PlatedHole, layer: Layer, resolver: &R) -> Option<Pad>
where
    R: ConnectivityResolver + ?Sized,
{
    let HoleShape::Circle { diameter } = &hole.shape else {
        tracing::debug!(hole = %hole.id, "Skipping non-circular plated hole");
        return None;
    };
    if !hole.layers.contains(&layer) {
        return None;
    }

    let key = ConnectivityKey::resolved_or(resolver.lookup(&hole.id), || {
        ConnectivityKey::UnconnectedPlatedHole(hole.id.clone())
    });

    Some(Pad::circle(
        &hole.id,
        layer,
        key,
        Point::new(hole.x, hole.y),
        diameter / 2.0,
    ))
}

fn bare_hole(hole: &Hole, layer: Layer) -> Option<Pad> {
    let HoleShape::Circle { diameter } = &hole.shape else {
        tracing::debug!(hole = %hole.id, "Skipping non-circular hole");
        return None;
    };

    Some(Pad::circle(
        &hole.id,
        layer,
        ConnectivityKey::Hole(hole.id.clone()),
        Point::new(hole.x, hole.y),
        diameter / 2.0,
    ))
}

fn cutout_pad(cutout: &Cutout, layer: Layer) -> Option<Pad> {
    let key = ConnectivityKey::Cutout(cutout.id.clone());

    match &cutout.shape {
        CutoutShape::Rect {
            center,
            width,
            height,
        } => Some(Pad::rect(
            &cutout.id,
            layer,
            key,
            Bounds::from_center(center.x, center.y, *width, *height),
        )),
        CutoutShape::Circle { center, radius } => {
            Some(Pad::circle(&cutout.id, layer, key, *center, *radius))
        }
        CutoutShape::Polygon { points } => {
            Some(Pad::polygon(&cutout.id, layer, key, points.clone()))
        }
        CutoutShape::Other(shape) => {
            tracing::debug!(
                cutout = %cutout.id,
                shape = %shape,
                "Skipping cutout with unsupported shape"
            );
            None
        }
    }
}

fn via_pad<R>(via: &Via, layer: Layer, resolver: &R) -> Option<Pad>
where
    R: ConnectivityResolver + ?Sized,
{
    if !via.layers.contains(&layer) {
        return None;
    }

    let key = ConnectivityKey::resolved_or(resolver.lookup(&via.id), || {
        ConnectivityKey::UnconnectedVia(via.id.clone())
    });

    Some(Pad::circle(
        &via.id,
        layer,
        key,
        Point::new(via.x, via.y),
        via.outer_diameter / 2.0,
    ))
}
