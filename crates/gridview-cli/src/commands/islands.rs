use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use gridview_core::find_islands;
use gridview_ui_common::{GridView, UiService};
use tabwriter::TabWriter;
use tracing::info;

pub fn handle(service: &UiService, grid: &Path) -> Result<()> {
    info!("Finding islands in {}", grid.display());
    service
        .open_grid(grid)
        .with_context(|| format!("loading grid {}", grid.display()))?;

    let state = service.state().read();
    let view = GridView::new(&state);
    let analysis = find_islands(state.grid(), |fuse| view.fuse_is_closed(fuse));

    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "ISLAND\tENTITIES\tMEMBERS")?;
    for island in &analysis.islands {
        let members: Vec<String> = island.entities.iter().map(|e| e.to_string()).collect();
        writeln!(
            writer,
            "{}\t{}\t{}",
            island.island_id,
            island.entities.len(),
            members.join(", ")
        )?;
    }
    writer.flush()?;

    println!("Islands: {}", analysis.islands.len());
    if !analysis.open_cables.is_empty() {
        let open: Vec<String> = analysis.open_cables.iter().map(|c| c.to_string()).collect();
        println!("Open cables: {}", open.join(", "));
    }
    if !analysis.dangling_cables.is_empty() {
        let dangling: Vec<String> = analysis
            .dangling_cables
            .iter()
            .map(|c| c.to_string())
            .collect();
        println!("Cables without owning entities: {}", dangling.join(", "));
    }
    Ok(())
}
