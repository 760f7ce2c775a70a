//! # gridview-io
//!
//! The grid JSON contract: document types ([`schema`]), the importer that wires
//! a document into a [`GridData`] snapshot, and the exporter that mirrors a
//! snapshot back into a document.

pub mod data;
pub mod export;
pub mod import;
pub mod schema;

pub use data::GridData;
pub use export::{grid_to_json, to_pretty_string};
pub use import::{json_to_grid, load_grid_json, parse_grid_json};
pub use schema::{CableJson, EntityJson, FuseJson, GridJson, LoadJson, MeterJson, StateJson};
