//! Trace segmentation.
//!
//! A trace route may hop between layers through vias. Only maximal runs of
//! consecutive wire waypoints on the target layer form a shape on that layer,
//! so the route is split at every waypoint that is not such a wire.

use super::key::ConnectivityKey;
use super::pad::Pad;
use crate::circuit::{Layer, Point, RoutePoint, Trace};

/// An open run of same-layer wire waypoints.
#[derive(Default)]
struct Run {
    points: Vec<Point>,
    /// Width of the first wire accepted into the run.
    width: Option<f64>,
}

impl Run {
    fn push(&mut self, point: Point, width: f64) {
        self.width.get_or_insert(width);
        self.points.push(point);
    }

    /// Closes the run, returning its points and width if it spans at least
    /// one segment.
    fn close(&mut self) -> Option<(Vec<Point>, f64)> {
        let run = std::mem::take(self);
        match run.width {
            Some(width) if run.points.len() >= 2 => Some((run.points, width)),
            _ => None,
        }
    }
}

/// Splits `trace` into one trace pad per contiguous run of wires on `layer`.
///
/// `first_index` is the number of pads already emitted by the current
/// conversion; pad ids continue that count (`<traceId>-<n>`) so they are
/// unique across the whole problem. Runs of a single waypoint are dropped.
#[must_use]
pub fn segment_trace(
    trace: &Trace,
    layer: Layer,
    connectivity_key: &ConnectivityKey,
    first_index: usize,
) -> Vec<Pad> {
    let mut pads = Vec::new();
    let mut run = Run::default();

    let emit = |run: &mut Run, pads: &mut Vec<Pad>| {
        if let Some((segments, width)) = run.close() {
            let pad_id = format!("{}-{}", trace.id, first_index + pads.len());
            pads.push(Pad::trace(
                pad_id,
                layer,
                connectivity_key.clone(),
                segments,
                width,
            ));
        }
    };

    for point in &trace.route {
        match point {
            RoutePoint::Wire {
                x,
                y,
                width,
                layer: wire_layer,
                ..
            } if *wire_layer == layer => run.push(Point::new(*x, *y), *width),
            _ => emit(&mut run, &mut pads),
        }
    }
    emit(&mut run, &mut pads);

    tracing::trace!(
        trace = %trace.id,
        layer = %layer,
        runs = pads.len(),
        "Segmented trace"
    );

    pads
}
