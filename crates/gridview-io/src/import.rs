//! Grid JSON importer.
//!
//! Turns a [`GridJson`] document into a fully wired [`GridData`]: elements are
//! registered in document order, so the offset of every element in its series
//! equals its position in the document.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gridview_core::{
    Cable, ConfidenceLevel, Entity, EntityId, Fuse, GridError, GridResult, Meter, MeterId, ULoad,
};
use tracing::debug;

use crate::data::GridData;
use crate::schema::{GridJson, LoadJson};

/// Parse a grid document from a JSON string.
pub fn parse_grid_json(input: &str) -> GridResult<GridJson> {
    Ok(serde_json::from_str(input)?)
}

/// Read and parse a grid document from disk.
pub fn load_grid_json(path: &Path) -> Result<GridJson> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading grid file '{}'", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing grid file '{}'", path.display()))
}

/// Build a [`GridData`] snapshot from a grid document.
pub fn json_to_grid(json: &GridJson) -> GridResult<GridData> {
    let mut data = GridData::new();

    for fuse_json in &json.fuses {
        let fuse = Fuse {
            id: fuse_json.id,
            name: fuse_json.name.clone(),
        };
        let loads = fuse_json
            .load
            .as_deref()
            .map(loads_from_json)
            .unwrap_or_default();
        data.register_fuse(
            fuse,
            fuse_json.state.status,
            ConfidenceLevel::new(fuse_json.state.confidence),
            loads,
        )?;
    }

    let explicit_meter_ids: HashSet<MeterId> = json
        .cables
        .iter()
        .flat_map(|cable| cable.meters.iter().filter_map(|meter| meter.id))
        .collect();
    let mut next_meter = 0usize;

    for cable_json in &json.cables {
        let [fuse1, fuse2] = cable_json.fuses;
        if fuse1 == fuse2 {
            return Err(GridError::MalformedImport(format!(
                "cable {} uses fuse {} on both ends",
                cable_json.id, fuse1
            )));
        }
        let mut cable = Cable::new(cable_json.id, fuse1, fuse2);

        for meter_json in &cable_json.meters {
            let id = match meter_json.id {
                Some(id) => id,
                None => {
                    while explicit_meter_ids.contains(&MeterId::new(next_meter))
                        || data.grid.meters.contains_key(&MeterId::new(next_meter))
                    {
                        next_meter += 1;
                    }
                    MeterId::new(next_meter)
                }
            };
            let meter = Meter {
                id,
                name: meter_json.name.clone(),
                location: meter_json.location,
            };
            data.register_meter(meter, meter_json.consumption)?;
            cable.meters.push(id);
        }

        data.register_cable(cable, Vec::new())?;
    }

    let explicit_entity_ids: HashSet<usize> =
        json.entities.iter().filter_map(|entity| entity.id).collect();
    let mut next_entity = 0usize;

    for entity_json in &json.entities {
        let id = match entity_json.id {
            Some(id) => id,
            None => {
                while explicit_entity_ids.contains(&next_entity)
                    || data.grid.entities.contains_key(&EntityId::new(next_entity))
                {
                    next_entity += 1;
                }
                next_entity
            }
        };
        let entity = Entity {
            id: EntityId::new(id),
            entity_type: entity_json.entity_type,
            name: entity_json.name.clone(),
            fuses: entity_json.fuses.clone(),
            location: entity_json.location,
        };
        data.register_entity(entity)?;
    }

    debug!(
        entities = data.grid.entities.len(),
        fuses = data.grid.fuses.len(),
        cables = data.grid.cables.len(),
        meters = data.grid.meters.len(),
        "grid json imported"
    );
    Ok(data)
}

fn loads_from_json(loads: &[LoadJson]) -> Vec<ULoad> {
    loads
        .iter()
        .map(|load| ULoad::new(load.value, load.confidence))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridview_core::{CableId, ElementKind, FuseId, State};

    const SAMPLE: &str = r#"{
        "entities": [
            { "name": "North", "type": "substation", "fuses": [10] },
            { "id": 7, "name": "Cab 7", "type": "cabinet", "fuses": [11],
              "location": { "lat": 50.1, "long": 4.2 } }
        ],
        "fuses": [
            { "id": 10, "name": "F10", "state": { "status": "CLOSED", "confidence": 0.9 },
              "load": [{ "value": 12.5, "confidence": 0.8 }] },
            { "id": 11, "name": "F11", "state": { "status": "OPEN", "confidence": 0.6 } }
        ],
        "cables": [
            { "id": 4, "fuses": [10, 11], "meters": [
                { "name": "auto", "consumption": 1.5 },
                { "id": 0, "name": "explicit", "consumption": 2.5 }
            ] }
        ]
    }"#;

    #[test]
    fn imports_sample_document() {
        let json = parse_grid_json(SAMPLE).unwrap();
        let data = json_to_grid(&json).unwrap();

        assert_eq!(data.grid.fuses.len(), 2);
        assert_eq!(data.grid.cables.len(), 1);
        assert_eq!(data.grid.meters.len(), 2);
        assert_eq!(data.grid.entities.len(), 2);

        let offset = data.fuse_idx.resolve(FuseId::new(11)).unwrap();
        assert_eq!(data.fuses_state[offset], State::Open);
        assert_eq!(data.fuses_conf[offset].level, 0.6);

        let offset = data.fuse_idx.resolve(FuseId::new(10)).unwrap();
        assert_eq!(data.fuses_uloads[offset], vec![ULoad::new(12.5, 0.8)]);

        // first entity gets the lowest id not claimed explicitly
        assert!(data.grid.entities.contains_key(&EntityId::new(0)));
        assert!(data.grid.entities.contains_key(&EntityId::new(7)));
    }

    #[test]
    fn auto_meter_ids_avoid_explicit_ones() {
        let data = json_to_grid(&parse_grid_json(SAMPLE).unwrap()).unwrap();
        let cable = &data.grid.cables[&CableId::new(4)];
        assert_eq!(cable.meters, vec![MeterId::new(1), MeterId::new(0)]);

        let offset = data.meter_idx.resolve(MeterId::new(0)).unwrap();
        assert_eq!(data.meters_cons[offset], 2.5);
    }

    #[test]
    fn auto_entity_ids_avoid_explicit_ones() {
        let json = parse_grid_json(
            r#"{ "entities": [
                    { "name": "A", "type": "substation", "fuses": [] },
                    { "id": 0, "name": "B", "type": "cabinet", "fuses": [] },
                    { "name": "C", "type": "cabinet", "fuses": [] }
                ] }"#,
        )
        .unwrap();
        let data = json_to_grid(&json).unwrap();

        let names: Vec<(usize, &str)> = data
            .grid
            .entities
            .values()
            .map(|e| (e.id.value(), e.name.as_str()))
            .collect();
        assert_eq!(names, vec![(0, "B"), (1, "A"), (2, "C")]);
    }

    #[test]
    fn dangling_fuse_reference_fails() {
        let json = parse_grid_json(
            r#"{ "fuses": [{ "id": 0, "name": "F0", "state": { "status": "CLOSED" } }],
                 "cables": [{ "id": 0, "fuses": [0, 1] }] }"#,
        )
        .unwrap();
        let err = json_to_grid(&json).unwrap_err();
        assert!(matches!(
            err,
            GridError::MissingReference {
                kind: ElementKind::Fuse,
                id: 1
            }
        ));
    }

    #[test]
    fn same_fuse_on_both_ends_is_malformed() {
        let json = parse_grid_json(
            r#"{ "fuses": [{ "id": 0, "name": "F0", "state": { "status": "CLOSED" } }],
                 "cables": [{ "id": 0, "fuses": [0, 0] }] }"#,
        )
        .unwrap();
        assert!(matches!(
            json_to_grid(&json),
            Err(GridError::MalformedImport(_))
        ));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        assert!(matches!(
            parse_grid_json("{ not json"),
            Err(GridError::Parse(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        fs::write(&path, SAMPLE).unwrap();
        let json = load_grid_json(&path).unwrap();
        assert_eq!(json.fuses.len(), 2);

        assert!(load_grid_json(&dir.path().join("missing.json")).is_err());
    }
}
