use std::path::Path;

use anyhow::{Context, Result};
use gridview_core::FuseId;
use gridview_ui_common::UiService;
use tracing::info;

pub fn handle(service: &UiService, grid: &Path, fuse: usize, out: Option<&Path>) -> Result<()> {
    service
        .open_grid(grid)
        .with_context(|| format!("loading grid {}", grid.display()))?;

    let id = FuseId::new(fuse);
    let (before, after) = {
        let mut state = service.state().write();
        let before = state.fuse_state(id)?;
        let after = state
            .switch_fuse(id)
            .with_context(|| format!("switching fuse {id}"))?;
        (before, after)
    };
    info!("Fuse {id}: {before} -> {after}");
    // Only the export goes to stdout when no output file is given.
    if out.is_some() {
        println!("Fuse {id}: {before} -> {after}");
    }
    super::emit_grid(service, out)
}
