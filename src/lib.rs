//! copper-pour-problem: solver input extraction for copper pours
//!
//! This library turns a circuit JSON board design into the flat, solver-ready
//! problem a copper pour engine consumes: a list of obstacle and connection
//! shapes ("pads") plus one pour region (layer, bounds, outline, margins and
//! target net).
//!
//! # Architecture
//!
//! - **Circuit reading**: typed, validated board elements from circuit JSON
//! - **Connectivity**: a resolver seam mapping elements to nets
//! - **Extraction**: per-kind pad rules, trace segmentation, region bounds
//!
//! The pour solver itself (boolean operations, clearances, filling) is not
//! part of this crate.
//!
//! # Modules
//!
//! - [`circuit`]: Circuit JSON model and reader
//! - [`config`]: Configuration loading and validation
//! - [`connectivity`]: Connectivity resolution
//! - [`error`]: Error types
//! - [`pour`]: Pour problem extraction

pub mod circuit;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod pour;
