//! Copper pour problem extraction.
//!
//! Converts a [`Circuit`](crate::circuit::Circuit) into the flat input of a
//! copper pour solver for one layer and one net:
//!
//! ```text
//! elements ──▶ extract (per-kind rules, connectivity keys)
//!                 └─▶ trace segmentation (same-layer wire runs)
//!          ──▶ pads
//! board / outline override ──▶ bounds + outline ──▶ pour region
//! pads + region ──▶ Problem { pads, regionsForPour }
//! ```
//!
//! The conversion is pure: no I/O, no shared mutable state. The only
//! collaborator is a read-only [`ConnectivityResolver`](crate::connectivity::ConnectivityResolver).
//!
//! # Example
//!
//! ```
//! use copper_pour_problem::circuit::{Circuit, Layer};
//! use copper_pour_problem::connectivity::ConnectivityMap;
//! use copper_pour_problem::pour::{build_problem, PourRequest};
//!
//! let circuit = Circuit::from_json_str(r#"[
//!     { "type": "pcb_board", "pcb_board_id": "pcb_board_0", "width": 10, "height": 10 },
//!     { "type": "source_net", "source_net_id": "source_net_0", "name": "GND",
//!       "subcircuit_connectivity_map_key": "gnd" }
//! ]"#).unwrap();
//! let resolver = ConnectivityMap::from_circuit(&circuit);
//! let request = PourRequest {
//!     layer: Layer::Top,
//!     net_name: "GND".to_string(),
//!     pad_margin: 0.2,
//!     trace_margin: 0.2,
//!     board_edge_margin: None,
//!     cutout_margin: None,
//!     outline: None,
//! };
//!
//! let problem = build_problem(&circuit, &request, &resolver).unwrap();
//! assert_eq!(problem.regions_for_pour[0].connectivity_key, "gnd");
//! ```

pub mod bounds;
pub mod error;
pub mod extract;
pub mod key;
pub mod pad;
mod problem;
pub mod region;
pub mod target;
pub mod trace;

pub use bounds::{resolve_extent, RegionExtent};
pub use error::{PourError, PourResult};
pub use extract::extract_pads;
pub use key::ConnectivityKey;
pub use pad::{Bounds, Pad, PadGeometry};
pub use problem::{convert_circuit_to_problem, PourOptions, Problem};
pub use region::{PourRegion, RegionShape};
pub use target::{build_problem, build_problems, resolve_pour_key, PourRequest};
pub use trace::segment_trace;
