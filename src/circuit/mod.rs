//! Circuit JSON board model.
//!
//! A circuit JSON document is a flat array of records, each tagged with a
//! `type` field:
//!
//! ```text
//! [
//!   { "type": "pcb_board", "width": 10, "height": 10, ... },
//!   { "type": "pcb_smtpad", "shape": "rect", "layer": "top", ... },
//!   { "type": "pcb_trace", "route": [ { "route_type": "wire", ... }, ... ] },
//!   { "type": "source_net", "name": "GND", ... },
//!   ...
//! ]
//! ```
//!
//! Only the record types relevant to copper pour extraction are modelled;
//! everything else is skipped while reading.

pub mod elements;
pub mod error;
mod reader;

pub use elements::{
    Board, CircuitElement, Cutout, CutoutShape, Hole, HoleShape, Layer, PlatedHole, Point, Port,
    RoutePoint, SmtPad, SmtPadShape, SourceNet, SourcePort, SourceTrace, Trace, Via,
};
pub use error::{CircuitError, CircuitResult};

use std::path::Path;

/// A parsed circuit: the ordered list of modelled elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Circuit {
    elements: Vec<CircuitElement>,
}

impl Circuit {
    /// Creates a circuit from already validated elements.
    #[must_use]
    pub const fn new(elements: Vec<CircuitElement>) -> Self {
        Self { elements }
    }

    /// Reads a circuit from a circuit JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid circuit JSON.
    pub fn read(path: impl AsRef<Path>) -> CircuitResult<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| CircuitError::file_read(path, e))?;
        let circuit = Self::from_json_str(&contents)?;

        tracing::info!(
            path = %path.display(),
            count = circuit.elements.len(),
            "Read circuit JSON"
        );

        Ok(circuit)
    }

    /// Parses a circuit from a circuit JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a JSON array, or if a known
    /// element is missing geometry its shape requires.
    pub fn from_json_str(json: &str) -> CircuitResult<Self> {
        let value = serde_json::from_str(json).map_err(|source| CircuitError::Json { source })?;
        Self::from_json_value(value)
    }

    /// Parses a circuit from an already decoded JSON value.
    ///
    /// # Errors
    ///
    /// See [`Circuit::from_json_str`].
    pub fn from_json_value(value: serde_json::Value) -> CircuitResult<Self> {
        reader::parse_elements(value).map(Self::new)
    }

    /// Returns all elements in document order.
    #[must_use]
    pub fn elements(&self) -> &[CircuitElement] {
        &self.elements
    }

    /// Returns the first board definition, if any.
    #[must_use]
    pub fn board(&self) -> Option<&Board> {
        self.elements.iter().find_map(|e| match e {
            CircuitElement::Board(board) => Some(board),
            _ => None,
        })
    }

    /// Finds a source net by name.
    #[must_use]
    pub fn source_net_by_name(&self, name: &str) -> Option<&SourceNet> {
        self.elements.iter().find_map(|e| match e {
            CircuitElement::SourceNet(net) if net.name == name => Some(net),
            _ => None,
        })
    }
}
