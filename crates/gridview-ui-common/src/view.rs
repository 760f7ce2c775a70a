//! Display fallbacks for UI bindings.
//!
//! The store reports unresolved ids as errors. The front-end does not show
//! those errors; it renders a fixed fallback instead:
//!
//! | Read | Fallback |
//! |---|---|
//! | fuse state | `CLOSED` |
//! | fuse / cable loads | empty list (rendered as `TBD`) |
//! | confidence level | `-1` / `"-1"` |
//! | meter consumption | `-1` for an unresolved id, `0` for a missing slot |
//! | meter name | empty string |
//! | cable meters | empty list |
//!
//! Every fallback is logged at `warn` level.

use gridview_core::{CableId, FuseId, GridError, Meter, MeterId, State, ULoad};
use tracing::warn;

use crate::format::{pretty_str, uloads_data, ULoadInfo};
use crate::store::GridState;

/// Read-only view applying display fallbacks over a [`GridState`].
#[derive(Clone, Copy)]
pub struct GridView<'a> {
    state: &'a GridState,
}

impl<'a> GridView<'a> {
    pub fn new(state: &'a GridState) -> Self {
        Self { state }
    }

    pub fn fuse_state(&self, id: FuseId) -> State {
        self.state
            .fuse_state(id)
            .unwrap_or_else(|err| fallback("fuse_state", err, State::Closed))
    }

    pub fn fuse_is_closed(&self, id: FuseId) -> bool {
        self.fuse_state(id) == State::Closed
    }

    pub fn fuse_uloads(&self, id: FuseId) -> &'a [ULoad] {
        self.state
            .fuse_uloads(id)
            .unwrap_or_else(|err| fallback("fuse_uloads", err, Default::default()))
    }

    pub fn cable_uloads(&self, id: CableId) -> &'a [ULoad] {
        self.state
            .cable_uloads(id)
            .unwrap_or_else(|err| fallback("cable_uloads", err, Default::default()))
    }

    pub fn fuse_conf_level(&self, id: FuseId) -> f64 {
        self.state
            .fuse_conf_level(id)
            .unwrap_or_else(|err| fallback("fuse_conf_level", err, -1.0))
    }

    pub fn fuse_conf_level_str(&self, id: FuseId) -> String {
        self.state
            .fuse_conf_level_str(id)
            .unwrap_or_else(|err| fallback("fuse_conf_level_str", err, "-1".to_string()))
    }

    pub fn meter_cons(&self, id: MeterId) -> f64 {
        match self.state.meter_cons(id) {
            Ok(value) => value,
            Err(err @ GridError::UnresolvedId { .. }) => fallback("meter_cons", err, -1.0),
            Err(err) => fallback("meter_cons", err, 0.0),
        }
    }

    pub fn meter_name(&self, id: MeterId) -> &'a str {
        self.state
            .meter_name(id)
            .unwrap_or_else(|err| fallback("meter_name", err, ""))
    }

    pub fn meters(&self, cable_id: CableId) -> Vec<&'a Meter> {
        self.state
            .meters(cable_id)
            .unwrap_or_else(|err| fallback("meters", err, Vec::new()))
    }

    /// Fuse loads rendered with [`pretty_str`].
    pub fn fuse_loads_str(&self, id: FuseId) -> String {
        pretty_str(Some(self.fuse_uloads(id)))
    }

    /// Fuse loads shaped for a chart with [`uloads_data`].
    pub fn fuse_loads_data(&self, id: FuseId) -> Vec<ULoadInfo> {
        uloads_data(Some(self.fuse_uloads(id)))
    }

    /// Cable loads rendered with [`pretty_str`].
    pub fn cable_loads_str(&self, id: CableId) -> String {
        pretty_str(Some(self.cable_uloads(id)))
    }
}

fn fallback<T>(read: &str, err: GridError, value: T) -> T {
    warn!(read, error = %err, "grid read fell back to display default");
    value
}
