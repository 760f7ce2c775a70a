//! # gridview UI Common
//!
//! Client-side state layer shared by gridview front-ends.
//!
//! ## Architecture
//!
//! ```text
//! UI actions ──► GridState (mutations) ──► GridEvent broadcast ──► UI refresh
//! UI bindings ─► GridView (fallbacks) ──► GridState (reads) ──► IdIndex ──► series
//!                     └──► format helpers (TBD / percent strings / chart records)
//! ```
//!
//! ## Core Components
//!
//! - [`GridState`]: The live grid, its index maps and measurement series
//! - [`GridView`]: Display fallbacks for unresolved reads
//! - [`format`]: Load estimate rendering
//! - [`UiService`]: File-level operations over a shared store
//! - [`GridviewConfig`]: Configuration for all front-ends

pub mod config;
pub mod error;
pub mod events;
pub mod format;
pub mod service;
pub mod store;
pub mod view;

// Re-exports for convenience
pub use config::{CoreConfig, DisplayConfig, GridviewConfig, StoreConfig};
pub use error::{Error, Result};
pub use events::{GridEvent, GridSource};
pub use format::{pretty_str, pretty_str_with, uloads_data, uloads_data_with, ULoadInfo, TBD};
pub use service::{UiService, UiServiceBuilder};
pub use store::GridState;
pub use view::GridView;
