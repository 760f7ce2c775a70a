//! Grid JSON exporter.

use gridview_core::{ElementKind, GridError, GridResult};

use crate::data::GridData;
use crate::schema::{CableJson, EntityJson, FuseJson, GridJson, LoadJson, MeterJson, StateJson};

/// Mirror a [`GridData`] snapshot into a grid document.
///
/// Entity and meter ids are always written so that a re-import reproduces the
/// same ids. Fuse loads are only written when at least one estimate exists.
pub fn grid_to_json(data: &GridData) -> GridResult<GridJson> {
    let entities = data
        .grid
        .entities
        .values()
        .map(|entity| EntityJson {
            id: Some(entity.id.value()),
            name: entity.name.clone(),
            entity_type: entity.entity_type,
            fuses: entity.fuses.clone(),
            location: entity.location,
        })
        .collect();

    let mut fuses = Vec::with_capacity(data.grid.fuses.len());
    for fuse in data.grid.fuses.values() {
        let offset = data.fuse_idx.resolve(fuse.id)?;
        let loads = series_slot(&data.fuses_uloads, offset, ElementKind::Fuse, fuse.id.value())?;
        let state = series_slot(&data.fuses_state, offset, ElementKind::Fuse, fuse.id.value())?;
        let confidence =
            series_slot(&data.fuses_conf, offset, ElementKind::Fuse, fuse.id.value())?;
        fuses.push(FuseJson {
            id: fuse.id,
            name: fuse.name.clone(),
            state: StateJson {
                status: *state,
                confidence: confidence.level,
            },
            load: (!loads.is_empty()).then(|| {
                loads
                    .iter()
                    .map(|ul| LoadJson {
                        value: ul.load,
                        confidence: ul.confidence.level,
                    })
                    .collect()
            }),
        });
    }

    let mut cables = Vec::with_capacity(data.grid.cables.len());
    for cable in data.grid.cables.values() {
        let mut meters = Vec::with_capacity(cable.meters.len());
        for meter_id in &cable.meters {
            let meter = data
                .grid
                .meters
                .get(meter_id)
                .ok_or_else(|| GridError::missing(ElementKind::Meter, meter_id.value()))?;
            let offset = data.meter_idx.resolve(meter.id)?;
            let consumption =
                series_slot(&data.meters_cons, offset, ElementKind::Meter, meter.id.value())?;
            meters.push(MeterJson {
                id: Some(meter.id),
                name: meter.name.clone(),
                consumption: *consumption,
                location: meter.location,
            });
        }
        cables.push(CableJson {
            id: cable.id,
            fuses: cable.fuses(),
            meters,
        });
    }

    Ok(GridJson {
        entities,
        fuses,
        cables,
    })
}

/// Serialize a grid document with two-space indentation.
pub fn to_pretty_string(json: &GridJson) -> GridResult<String> {
    Ok(serde_json::to_string_pretty(json)?)
}

fn series_slot<T>(series: &[T], offset: usize, kind: ElementKind, id: usize) -> GridResult<&T> {
    series
        .get(offset)
        .ok_or_else(|| GridError::missing(kind, id))
}
