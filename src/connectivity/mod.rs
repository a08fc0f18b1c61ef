//! Connectivity resolution.
//!
//! The pour pipeline only needs one question answered: which connectivity
//! group (net) does a physical element belong to? [`ConnectivityResolver`]
//! is that seam. [`ConnectivityMap`] is a basic resolver derived from the
//! explicit links in a circuit; other engines can implement the trait.

use std::collections::HashMap;
use std::hash::BuildHasher;

use indexmap::IndexMap;

use crate::circuit::{Circuit, CircuitElement, RoutePoint};

/// Prefix of the keys generated by [`ConnectivityMap`].
pub const NET_KEY_PREFIX: &str = "connectivity_net";

/// Maps element ids to connectivity keys.
///
/// Implementations must be read-only; conversions may share one resolver
/// across threads.
pub trait ConnectivityResolver {
    /// Returns the connectivity key of `element_id`, or `None` if the element
    /// is not connected to anything.
    fn lookup(&self, element_id: &str) -> Option<&str>;
}

impl<S: BuildHasher> ConnectivityResolver for HashMap<String, String, S> {
    fn lookup(&self, element_id: &str) -> Option<&str> {
        self.get(element_id).map(String::as_str)
    }
}

/// Connectivity groups derived from the links in a circuit.
///
/// Two ids share a group when a chain of links joins them:
///
/// - `source_trace` to its connected source ports and nets
/// - `pcb_port` to its `source_port`
/// - `pcb_smtpad` / `pcb_plated_hole` to their `pcb_port`
/// - `pcb_trace` to its `source_trace` and the ports its wires start or end at
/// - `pcb_via` to its `pcb_trace`
///
/// Each group is keyed `connectivity_net<n>`, numbered in order of first
/// appearance. Ids that take part in no link resolve to nothing.
#[derive(Debug, Clone, Default)]
pub struct ConnectivityMap {
    keys: HashMap<String, String>,
    net_count: usize,
}

impl ConnectivityMap {
    /// Builds the connectivity groups of `circuit`.
    #[must_use]
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let mut builder = GroupBuilder::default();

        for element in circuit.elements() {
            match element {
                CircuitElement::SourceTrace(trace) => {
                    for port in &trace.connected_source_port_ids {
                        builder.link(&trace.id, port);
                    }
                    for net in &trace.connected_source_net_ids {
                        builder.link(&trace.id, net);
                    }
                }
                CircuitElement::Port(port) => {
                    if let Some(source_port) = &port.source_port_id {
                        builder.link(&port.id, source_port);
                    }
                }
                CircuitElement::SmtPad(pad) => {
                    if let Some(port) = &pad.pcb_port_id {
                        builder.link(&pad.id, port);
                    }
                }
                CircuitElement::PlatedHole(hole) => {
                    if let Some(port) = &hole.pcb_port_id {
                        builder.link(&hole.id, port);
                    }
                }
                CircuitElement::Trace(trace) => {
                    if let Some(source_trace) = &trace.source_trace_id {
                        builder.link(&trace.id, source_trace);
                    }
                    for point in &trace.route {
                        if let RoutePoint::Wire {
                            start_pcb_port_id,
                            end_pcb_port_id,
                            ..
                        } = point
                        {
                            for port in [start_pcb_port_id, end_pcb_port_id].into_iter().flatten() {
                                builder.link(&trace.id, port);
                            }
                        }
                    }
                }
                CircuitElement::Via(via) => {
                    if let Some(trace) = &via.pcb_trace_id {
                        builder.link(&via.id, trace);
                    }
                }
                CircuitElement::Board(_)
                | CircuitElement::Hole(_)
                | CircuitElement::Cutout(_)
                | CircuitElement::SourcePort(_)
                | CircuitElement::SourceNet(_) => {}
            }
        }

        let map = builder.finish();
        tracing::debug!(
            ids = map.keys.len(),
            nets = map.net_count,
            "Built connectivity map"
        );
        map
    }

    /// Returns the number of connectivity groups.
    #[must_use]
    pub const fn net_count(&self) -> usize {
        self.net_count
    }

    /// Returns true when `a` and `b` belong to the same group.
    #[must_use]
    pub fn are_connected(&self, a: &str, b: &str) -> bool {
        match (self.lookup(a), self.lookup(b)) {
            (Some(ka), Some(kb)) => ka == kb,
            _ => false,
        }
    }
}

impl ConnectivityResolver for ConnectivityMap {
    fn lookup(&self, element_id: &str) -> Option<&str> {
        self.keys.get(element_id).map(String::as_str)
    }
}

/// Union-find over element ids, in order of first appearance.
#[derive(Default)]
struct GroupBuilder {
    ids: IndexMap<String, usize>,
    parent: Vec<usize>,
}

impl GroupBuilder {
    fn index_of(&mut self, id: &str) -> usize {
        if let Some(&index) = self.ids.get(id) {
            return index;
        }
        let index = self.parent.len();
        self.ids.insert(id.to_string(), index);
        self.parent.push(index);
        index
    }

    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut node = i;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    fn link(&mut self, a: &str, b: &str) {
        let ia = self.index_of(a);
        let ib = self.index_of(b);
        let ra = self.find(ia);
        let rb = self.find(ib);
        if ra != rb {
            self.parent[rb] = ra;
        }
    }

    fn finish(mut self) -> ConnectivityMap {
        let mut net_numbers: IndexMap<usize, usize> = IndexMap::new();
        let mut keys = HashMap::with_capacity(self.parent.len());

        let ids: Vec<(String, usize)> = std::mem::take(&mut self.ids).into_iter().collect();
        for (id, index) in ids {
            let root = self.find(index);
            let next = net_numbers.len();
            let number = *net_numbers.entry(root).or_insert(next);
            keys.insert(id, format!("{NET_KEY_PREFIX}{number}"));
        }

        ConnectivityMap {
            keys,
            net_count: net_numbers.len(),
        }
    }
}
