//! Grid JSON document types.
//!
//! The same document shape is read by the importer and written by the exporter:
//!
//! ```json
//! {
//!   "entities": [{ "id": 1, "name": "substation 1", "type": "substation", "fuses": [0] }],
//!   "fuses": [{ "id": 0, "name": "Fuse 0", "state": { "status": "CLOSED", "confidence": 0.9 } }],
//!   "cables": [{ "id": 0, "fuses": [0, 1], "meters": [{ "name": "Meter 0", "consumption": 1.5 }] }]
//! }
//! ```

use gridview_core::{CableId, EntityType, FuseId, GeoLocation, MeterId, State};
use serde::{Deserialize, Serialize};

/// Top-level grid document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridJson {
    #[serde(default)]
    pub entities: Vec<EntityJson>,
    #[serde(default)]
    pub fuses: Vec<FuseJson>,
    #[serde(default)]
    pub cables: Vec<CableJson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityJson {
    /// Entity id; the lowest id not used by another entity when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<usize>,
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    #[serde(default)]
    pub fuses: Vec<FuseId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuseJson {
    pub id: FuseId,
    pub name: String,
    pub state: StateJson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load: Option<Vec<LoadJson>>,
}

/// Fuse status together with the confidence of that status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateJson {
    pub status: State,
    #[serde(default = "unknown_confidence")]
    pub confidence: f64,
}

fn unknown_confidence() -> f64 {
    -1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadJson {
    pub value: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableJson {
    pub id: CableId,
    pub fuses: [FuseId; 2],
    #[serde(default)]
    pub meters: Vec<MeterJson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterJson {
    /// Meter id; assigned sequentially when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MeterId>,
    pub name: String,
    #[serde(default)]
    pub consumption: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_document_parses() {
        let doc: GridJson = serde_json::from_str(
            r#"{
                "fuses": [{ "id": 3, "name": "F3", "state": { "status": "OPEN" } }],
                "cables": [{ "id": 1, "fuses": [3, 4] }]
            }"#,
        )
        .unwrap();

        assert!(doc.entities.is_empty());
        assert_eq!(doc.fuses[0].state.status, State::Open);
        assert_eq!(doc.fuses[0].state.confidence, -1.0);
        assert!(doc.fuses[0].load.is_none());
        assert!(doc.cables[0].meters.is_empty());
    }

    #[test]
    fn entity_type_uses_type_key() {
        let entity: EntityJson = serde_json::from_str(
            r#"{ "name": "C", "type": "consumer-site", "fuses": [1],
                 "location": { "lat": 50.5, "long": 4.1 } }"#,
        )
        .unwrap();
        assert_eq!(entity.entity_type, EntityType::ConsumerSite);
        assert_eq!(entity.location.map(|l| l.lat), Some(50.5));
        assert!(entity.id.is_none());
    }

    #[test]
    fn optional_fields_are_omitted_on_output() {
        let meter = MeterJson {
            id: None,
            name: "M".into(),
            consumption: 0.0,
            location: None,
        };
        let json = serde_json::to_string(&meter).unwrap();
        assert_eq!(json, r#"{"name":"M","consumption":0.0}"#);
    }
}
