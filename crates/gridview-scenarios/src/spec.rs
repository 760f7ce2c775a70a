use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gridview_core::{GridError, GridResult};
use serde::{Deserialize, Serialize};

/// Description of a synthetic grid.
///
/// Only the fuse count matters to the store: it builds one cable per fuse pair
/// and one meter per cable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub scenario_id: String,
    pub description: Option<String>,
    #[serde(default)]
    pub feeders: Vec<FeederSpec>,
    /// Explicit fuse count; overrides the count derived from `feeders`.
    #[serde(default)]
    pub fuses: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeederSpec {
    pub name: String,
    #[serde(default = "default_cables")]
    pub cables: usize,
}

/// Upper bound on the number of fuses a scenario may generate.
pub const MAX_FUSES: usize = 1_000_000;

fn default_cables() -> usize {
    1
}

impl Scenario {
    /// Scenario with `cables` cables on a single feeder.
    pub fn with_cables(scenario_id: impl Into<String>, cables: usize) -> Self {
        Self {
            scenario_id: scenario_id.into(),
            description: None,
            feeders: vec![FeederSpec {
                name: "feeder-1".to_string(),
                cables,
            }],
            fuses: None,
        }
    }

    /// Number of fuses to generate. Always even: every cable has two ends.
    pub fn fuse_count(&self) -> GridResult<usize> {
        let count = match self.fuses {
            Some(explicit) => explicit,
            None => self
                .feeders
                .iter()
                .try_fold(0usize, |total, feeder| {
                    feeder
                        .cables
                        .checked_mul(2)
                        .and_then(|fuses| total.checked_add(fuses))
                })
                .ok_or_else(|| {
                    GridError::InvalidScenario(format!(
                        "scenario '{}' declares more cables than can be counted",
                        self.scenario_id
                    ))
                })?,
        };
        if count > MAX_FUSES {
            return Err(GridError::InvalidScenario(format!(
                "scenario '{}' declares {} fuses; at most {} are supported",
                self.scenario_id, count, MAX_FUSES
            )));
        }
        if count % 2 != 0 {
            return Err(GridError::InvalidScenario(format!(
                "scenario '{}' declares {} fuses; fuses pair up into cables so the count must be even",
                self.scenario_id, count
            )));
        }
        Ok(count)
    }

    pub fn validate(&self) -> GridResult<()> {
        if self.scenario_id.trim().is_empty() {
            return Err(GridError::InvalidScenario(
                "scenario_id cannot be empty".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for feeder in &self.feeders {
            if !seen.insert(feeder.name.as_str()) {
                return Err(GridError::InvalidScenario(format!(
                    "duplicate feeder '{}' in scenario '{}'",
                    feeder.name, self.scenario_id
                )));
            }
        }
        self.fuse_count().map(|_| ())
    }
}

pub fn load_scenario_from_path(path: &Path) -> Result<Scenario> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading scenario '{}'", path.display()))?;
    let scenario: Scenario = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            serde_yaml::from_str(&data).context("parsing scenario yaml")?
        }
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            serde_json::from_str(&data).context("parsing scenario json")?
        }
        _ => serde_yaml::from_str(&data)
            .or_else(|_| serde_json::from_str(&data))
            .context("parsing scenario")?,
    };
    scenario
        .validate()
        .with_context(|| format!("validating scenario '{}'", path.display()))?;
    Ok(scenario)
}
