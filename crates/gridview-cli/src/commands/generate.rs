use std::path::Path;

use anyhow::{Context, Result};
use gridview_ui_common::UiService;
use tracing::info;

pub fn handle(service: &UiService, scenario: &Path, out: Option<&Path>) -> Result<()> {
    info!("Generating grid from scenario {}", scenario.display());
    service
        .open_scenario(scenario)
        .with_context(|| format!("generating grid from {}", scenario.display()))?;
    {
        let state = service.state().read();
        let grid = state.grid();
        info!(
            fuses = grid.fuses.len(),
            cables = grid.cables.len(),
            meters = grid.meters.len(),
            "scenario grid ready"
        );
    }
    super::emit_grid(service, out)
}
