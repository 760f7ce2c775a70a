use std::collections::HashSet;

use gridview_core::{
    AddressingMode, CableId, ElementKind, EntityId, EntityType, FuseId, GridError, MeterId, State,
    ULoad,
};
use gridview_scenarios::Scenario;
use gridview_ui_common::{
    uloads_data, GridEvent, GridSource, GridState, GridView, GridviewConfig, UiService,
};
use serde_json::Value;

fn scenario_store(cables: usize) -> GridState {
    let mut state = GridState::new();
    state
        .init_from_scenario(&Scenario::with_cables("test", cables))
        .unwrap();
    state
}

fn store_with_two_entities() -> GridState {
    let mut state = GridState::new();
    state.init_empty();
    state
        .add_entity(EntityId::new(1), EntityType::Substation)
        .unwrap();
    state
        .add_entity(EntityId::new(2), EntityType::Cabinet)
        .unwrap();
    state
}

const SPARSE_GRID: &str = r#"{
    "entities": [
        { "id": 1, "name": "North", "type": "substation", "fuses": [10] },
        { "id": 2, "name": "South", "type": "substation", "fuses": [11] }
    ],
    "fuses": [
        { "id": 10, "name": "F10", "state": { "status": "CLOSED", "confidence": 0.9 } },
        { "id": 11, "name": "F11", "state": { "status": "OPEN", "confidence": 0.4 },
          "load": [{ "value": 20.0, "confidence": 0.5 }] }
    ],
    "cables": [
        { "id": 30, "fuses": [10, 11], "meters": [{ "id": 70, "name": "M70", "consumption": 4.0 }] }
    ]
}"#;

#[test]
fn scenario_builds_paired_fuses_cables_and_meters() {
    let state = scenario_store(3);
    let grid = state.grid();

    assert_eq!(grid.fuses.len(), 6);
    assert_eq!(grid.cables.len(), 3);
    assert_eq!(grid.meters.len(), 3);
    assert_eq!(state.addressing_mode(), AddressingMode::Identity);

    for (i, cable) in grid.cables.values().enumerate() {
        assert_eq!(cable.fuses(), [FuseId::new(2 * i), FuseId::new(2 * i + 1)]);
        let meters = state.meters(cable.id).unwrap();
        assert_eq!(meters.len(), 1);
        assert_eq!(state.meter_cons(meters[0].id).unwrap(), 0.0);
    }
    for fuse in state.fuse_ids() {
        assert_eq!(state.fuse_state(fuse).unwrap(), State::Closed);
        assert!(state.fuse_conf(fuse).unwrap().is_unknown());
    }
}

#[test]
fn scenario_replaces_previous_grid() {
    let mut state = scenario_store(5);
    state
        .init_from_scenario(&Scenario::with_cables("small", 1))
        .unwrap();
    assert_eq!(state.grid().fuses.len(), 2);
    assert!(state.fuse_state(FuseId::new(4)).is_err());
}

#[test]
fn odd_scenario_is_rejected_without_touching_the_grid() {
    let mut state = scenario_store(1);
    let mut scenario = Scenario::with_cables("odd", 1);
    scenario.fuses = Some(3);

    assert!(matches!(
        state.init_from_scenario(&scenario),
        Err(GridError::InvalidScenario(_))
    ));
    assert_eq!(state.grid().fuses.len(), 2);
}

#[test]
fn empty_store_reads_report_unresolved_ids() {
    let mut state = scenario_store(2);
    state.init_empty();

    assert_eq!(state.addressing_mode(), AddressingMode::Indexed);
    assert!(state.grid().is_empty());
    for err in [
        state.fuse_state(FuseId::new(0)).unwrap_err(),
        state.fuse_uloads(FuseId::new(0)).unwrap_err(),
        state.cable_uloads(CableId::new(0)).unwrap_err(),
        state.fuse_conf_level(FuseId::new(0)).unwrap_err(),
        state.meter_cons(MeterId::new(0)).unwrap_err(),
    ] {
        assert!(err.is_not_found());
    }
}

#[test]
fn add_cable_allocates_two_sequential_fuses() {
    let mut state = store_with_two_entities();
    let fuses = state
        .add_cable(CableId::new(5), EntityId::new(1), EntityId::new(2))
        .unwrap();

    assert_eq!(fuses, [FuseId::new(0), FuseId::new(1)]);
    assert_eq!(state.grid().fuses.len(), 2);

    let cable = &state.grid().cables[&CableId::new(5)];
    assert_eq!(cable.fuses(), fuses);
    assert_eq!(state.grid().entities[&EntityId::new(1)].fuses, vec![fuses[0]]);
    assert_eq!(state.grid().entities[&EntityId::new(2)].fuses, vec![fuses[1]]);
    assert!(state.fuse_is_closed(fuses[0]).unwrap());
    assert!(state.cable_uloads(CableId::new(5)).unwrap().is_empty());

    let more = state
        .add_cable(CableId::new(6), EntityId::new(2), EntityId::new(1))
        .unwrap();
    assert_eq!(more, [FuseId::new(2), FuseId::new(3)]);
    assert_eq!(state.grid().entities[&EntityId::new(1)].fuses.len(), 2);
}

#[test]
fn add_cable_to_missing_entity_fails_cleanly() {
    let mut state = store_with_two_entities();
    let err = state
        .add_cable(CableId::new(5), EntityId::new(1), EntityId::new(9))
        .unwrap_err();

    assert!(matches!(
        err,
        GridError::MissingReference {
            kind: ElementKind::Entity,
            id: 9
        }
    ));
    assert!(state.grid().fuses.is_empty());
    assert!(state.grid().cables.is_empty());
    assert!(state.grid().entities[&EntityId::new(1)].fuses.is_empty());
}

#[test]
fn duplicate_entity_is_rejected() {
    let mut state = store_with_two_entities();
    assert!(matches!(
        state.add_entity(EntityId::new(1), EntityType::Transformer),
        Err(GridError::DuplicateId { .. })
    ));
    assert_eq!(
        state.grid().entities[&EntityId::new(1)].entity_type,
        EntityType::Substation
    );
}

#[test]
fn meters_are_added_and_connected() {
    let mut state = store_with_two_entities();
    state
        .add_cable(CableId::new(1), EntityId::new(1), EntityId::new(2))
        .unwrap();
    state
        .add_cable(CableId::new(2), EntityId::new(1), EntityId::new(2))
        .unwrap();
    state.add_meter(MeterId::new(40)).unwrap();
    state.add_meter(MeterId::new(41)).unwrap();

    assert_eq!(state.meter_cons(MeterId::new(41)).unwrap(), 0.0);
    assert!(state.meters(CableId::new(1)).unwrap().is_empty());

    state
        .connect_meter_to_cable(MeterId::new(40), CableId::new(1))
        .unwrap();
    state
        .connect_meter_to_cable(MeterId::new(41), CableId::new(1))
        .unwrap();
    let names: Vec<&str> = state
        .meters(CableId::new(1))
        .unwrap()
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(names, vec!["Meter 40", "Meter 41"]);

    // moving a meter detaches it from its previous cable
    state
        .connect_meter_to_cable(MeterId::new(40), CableId::new(2))
        .unwrap();
    assert_eq!(state.meters(CableId::new(1)).unwrap().len(), 1);
    assert_eq!(state.meters(CableId::new(2)).unwrap()[0].id, MeterId::new(40));

    assert!(state
        .connect_meter_to_cable(MeterId::new(99), CableId::new(1))
        .is_err());
    assert!(state
        .connect_meter_to_cable(MeterId::new(40), CableId::new(99))
        .is_err());
}

#[test]
fn switch_fuse_twice_restores_state() {
    let mut state = scenario_store(2);
    for fuse in state.fuse_ids().collect::<Vec<_>>() {
        let before = state.fuse_state(fuse).unwrap();
        assert_ne!(state.switch_fuse(fuse).unwrap(), before);
        state.switch_fuse(fuse).unwrap();
        assert_eq!(state.fuse_state(fuse).unwrap(), before);
    }
    assert!(state.switch_fuse(FuseId::new(100)).is_err());
}

#[test]
fn live_updates_change_series() {
    let mut state = scenario_store(2);
    state.update_consumption(MeterId::new(1), 3.25).unwrap();
    state.update_state_conf(FuseId::new(2), 0.75).unwrap();
    state
        .update_cable_loads(CableId::new(0), vec![ULoad::new(1.0, 0.3)])
        .unwrap();

    assert_eq!(state.meter_cons(MeterId::new(1)).unwrap(), 3.25);
    assert_eq!(state.fuse_conf_level(FuseId::new(2)).unwrap(), 0.75);
    assert_eq!(state.fuse_conf_level_str(FuseId::new(2)).unwrap(), "75");
    assert_eq!(state.cable_uloads(CableId::new(0)).unwrap().len(), 1);

    assert!(state.update_consumption(MeterId::new(9), 1.0).is_err());
    assert!(state.update_state_conf(FuseId::new(9), 1.0).is_err());
}

#[test]
fn sparse_json_ids_resolve_through_the_index() {
    let mut state = GridState::new();
    state.init_from_json_str(SPARSE_GRID).unwrap();
    assert_eq!(state.addressing_mode(), AddressingMode::Indexed);

    assert_eq!(state.fuse_state(FuseId::new(11)).unwrap(), State::Open);
    assert_eq!(state.fuse_conf_level(FuseId::new(10)).unwrap(), 0.9);
    assert_eq!(state.fuse_uloads(FuseId::new(11)).unwrap().len(), 1);
    assert_eq!(state.meter_cons(MeterId::new(70)).unwrap(), 4.0);
    assert_eq!(state.meter_name(MeterId::new(70)).unwrap(), "M70");

    // confidence updates address the fuse itself, not the raw id as offset
    state.update_state_conf(FuseId::new(11), 0.7).unwrap();
    assert_eq!(state.fuse_conf_level(FuseId::new(11)).unwrap(), 0.7);
    assert_eq!(state.fuse_conf_level(FuseId::new(10)).unwrap(), 0.9);

    // new fuses continue from the fuse count
    state
        .add_cable(CableId::new(31), EntityId::new(1), EntityId::new(2))
        .unwrap();
    assert!(state.grid().fuses.contains_key(&FuseId::new(2)));
    assert!(state.grid().fuses.contains_key(&FuseId::new(3)));
}

#[test]
fn rejected_json_keeps_current_grid() {
    let mut state = scenario_store(1);
    let err = state
        .init_from_json_str(r#"{ "cables": [{ "id": 0, "fuses": [0, 1] }] }"#)
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(state.grid().cables.len(), 1);
    assert!(state.init_from_json_str("[1, 2").is_err());
}

#[test]
fn scenario_export_round_trips_through_import() {
    let mut original = scenario_store(4);
    original.switch_fuse(FuseId::new(3)).unwrap();
    original.update_state_conf(FuseId::new(0), 0.6).unwrap();
    original.update_consumption(MeterId::new(2), 8.5).unwrap();
    original
        .update_fuse_loads(FuseId::new(5), vec![ULoad::new(2.0, 0.5), ULoad::new(3.0, 0.25)])
        .unwrap();

    let mut restored = GridState::new();
    restored
        .init_from_json_str(&original.grid_json().unwrap())
        .unwrap();

    assert_eq!(restored.data(), original.data());
}

#[test]
fn grid_json_cables_reference_exported_fuses() {
    let mut state = store_with_two_entities();
    state
        .add_cable(CableId::new(5), EntityId::new(1), EntityId::new(2))
        .unwrap();
    state.add_meter(MeterId::new(0)).unwrap();
    state
        .connect_meter_to_cable(MeterId::new(0), CableId::new(5))
        .unwrap();

    let doc: Value = serde_json::from_str(&state.grid_json().unwrap()).unwrap();
    let fuse_ids: HashSet<u64> = doc["fuses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_u64().unwrap())
        .collect();

    let cables = doc["cables"].as_array().unwrap();
    assert_eq!(cables.len(), 1);
    for cable in cables {
        let fuses = cable["fuses"].as_array().unwrap();
        assert_eq!(fuses.len(), 2);
        for fuse in fuses {
            assert!(fuse_ids.contains(&fuse.as_u64().unwrap()));
        }
    }
    assert_eq!(doc["entities"][0]["fuses"][0], 0);
    assert_eq!(doc["cables"][0]["meters"][0]["consumption"], 0.0);
    assert_eq!(doc["fuses"][0]["state"]["status"], "CLOSED");
}

#[test]
fn mutations_broadcast_events() {
    let mut state = GridState::new();
    let mut rx = state.subscribe();

    state
        .init_from_scenario(&Scenario::with_cables("ev", 1))
        .unwrap();
    state.update_consumption(MeterId::new(0), 1.5).unwrap();

    assert_eq!(
        rx.try_recv().unwrap(),
        GridEvent::GridReplaced {
            source: GridSource::Scenario,
            n_fuses: 2,
            n_cables: 1,
            n_meters: 1,
            n_entities: 0,
        }
    );
    assert_eq!(
        rx.try_recv().unwrap(),
        GridEvent::ConsumptionUpdated {
            id: MeterId::new(0),
            value: 1.5
        }
    );

    // failed mutations stay silent
    assert!(state.switch_fuse(FuseId::new(50)).is_err());
    assert!(rx.try_recv().is_err());
}

#[test]
fn view_renders_placeholders_for_unknown_ids() {
    let state = scenario_store(1);
    let view = GridView::new(&state);

    assert_eq!(view.fuse_loads_str(FuseId::new(0)), "TBD");
    assert_eq!(view.fuse_loads_data(FuseId::new(0)), uloads_data(None));
    assert_eq!(view.meter_cons(MeterId::new(9)), -1.0);
    assert_eq!(view.fuse_state(FuseId::new(9)), State::Closed);
}

#[test]
fn service_opens_and_saves_files() {
    let dir = tempfile::tempdir().unwrap();
    let scenario_path = dir.path().join("scenario.yaml");
    std::fs::write(&scenario_path, "scenario_id: demo\nfeeders:\n  - name: f1\n    cables: 2\n")
        .unwrap();

    let service = UiService::with_config(GridviewConfig::default()).unwrap();
    service.open_scenario(&scenario_path).unwrap();
    assert!(service.has_grid());
    assert_eq!(service.state().read().grid().cables.len(), 2);

    let out = dir.path().join("grid.json");
    service.save_grid(&out).unwrap();

    service.reset();
    assert!(!service.has_grid());

    service.open_grid(&out).unwrap();
    assert_eq!(service.state().read().grid().fuses.len(), 4);
    assert_eq!(service.recent_files(), vec![out, scenario_path]);

    let missing = service.open_grid(dir.path().join("nope.json"));
    assert!(matches!(
        missing,
        Err(gridview_ui_common::Error::LoadFailed { .. })
    ));
}
