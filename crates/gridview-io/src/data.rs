//! Fully wired grid snapshot: static topology plus the per-element series.

use gridview_core::{
    Cable, CableId, ConfidenceLevel, ElementKind, Entity, Fuse, FuseId, Grid, GridError,
    GridResult, IdIndex, Meter, MeterId, State, ULoad,
};

/// A grid together with its index maps and measurement arrays.
///
/// Every registered fuse, meter and cable owns exactly one slot in each of its
/// series; the slot is found through the matching [`IdIndex`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridData {
    pub grid: Grid,

    pub meter_idx: IdIndex<MeterId>,
    pub fuse_idx: IdIndex<FuseId>,
    pub cable_idx: IdIndex<CableId>,

    pub meters_cons: Vec<f64>,
    pub fuses_state: Vec<State>,
    pub fuses_conf: Vec<ConfidenceLevel>,
    pub fuses_uloads: Vec<Vec<ULoad>>,
    pub cables_uloads: Vec<Vec<ULoad>>,
}

impl GridData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fuse records (one series slot per fuse).
    pub fn fuse_count(&self) -> usize {
        self.fuses_state.len()
    }

    /// First free fuse id at or after the current fuse count.
    pub fn next_fuse_id(&self) -> FuseId {
        let mut candidate = self.fuse_count();
        while self.grid.fuses.contains_key(&FuseId::new(candidate)) {
            candidate += 1;
        }
        FuseId::new(candidate)
    }

    pub fn register_fuse(
        &mut self,
        fuse: Fuse,
        state: State,
        confidence: ConfidenceLevel,
        loads: Vec<ULoad>,
    ) -> GridResult<usize> {
        if self.grid.fuses.contains_key(&fuse.id) {
            return Err(duplicate(ElementKind::Fuse, fuse.id.value()));
        }
        let offset = self.fuses_state.len();
        self.fuse_idx.insert(fuse.id, offset)?;
        self.fuses_state.push(state);
        self.fuses_conf.push(confidence);
        self.fuses_uloads.push(loads);
        self.grid.fuses.insert(fuse.id, fuse);
        Ok(offset)
    }

    pub fn register_meter(&mut self, meter: Meter, consumption: f64) -> GridResult<usize> {
        if self.grid.meters.contains_key(&meter.id) {
            return Err(duplicate(ElementKind::Meter, meter.id.value()));
        }
        let offset = self.meters_cons.len();
        self.meter_idx.insert(meter.id, offset)?;
        self.meters_cons.push(consumption);
        self.grid.meters.insert(meter.id, meter);
        Ok(offset)
    }

    /// Register a cable. Both fuses and every listed meter must already exist.
    pub fn register_cable(&mut self, cable: Cable, loads: Vec<ULoad>) -> GridResult<usize> {
        if self.grid.cables.contains_key(&cable.id) {
            return Err(duplicate(ElementKind::Cable, cable.id.value()));
        }
        for fuse in cable.fuses() {
            if !self.grid.fuses.contains_key(&fuse) {
                return Err(GridError::missing(ElementKind::Fuse, fuse.value()));
            }
        }
        for meter in &cable.meters {
            if !self.grid.meters.contains_key(meter) {
                return Err(GridError::missing(ElementKind::Meter, meter.value()));
            }
        }
        let offset = self.cables_uloads.len();
        self.cable_idx.insert(cable.id, offset)?;
        self.cables_uloads.push(loads);
        self.grid.cables.insert(cable.id, cable);
        Ok(offset)
    }

    /// Register an entity. Every listed fuse must already exist.
    pub fn register_entity(&mut self, entity: Entity) -> GridResult<()> {
        if self.grid.entities.contains_key(&entity.id) {
            return Err(duplicate(ElementKind::Entity, entity.id.value()));
        }
        for fuse in &entity.fuses {
            if !self.grid.fuses.contains_key(fuse) {
                return Err(GridError::missing(ElementKind::Fuse, fuse.value()));
            }
        }
        self.grid.entities.insert(entity.id, entity);
        Ok(())
    }
}

fn duplicate(kind: ElementKind, id: usize) -> GridError {
    GridError::DuplicateId { kind, id }
}
