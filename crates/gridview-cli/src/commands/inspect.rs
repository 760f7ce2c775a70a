//! Tabular dump of a grid document through the display fallbacks.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use gridview_ui_common::{pretty_str_with, GridState, GridView, UiService};
use tabwriter::TabWriter;

pub fn handle(service: &UiService, grid: &Path) -> Result<()> {
    service
        .open_grid(grid)
        .with_context(|| format!("loading grid {}", grid.display()))?;

    let precision = service.config().read().display.load_precision;
    let state = service.state().read();
    let g = state.grid();

    println!("Grid summary for {}:", grid.display());
    println!("  Entities : {}", g.entities.len());
    println!("  Fuses    : {}", g.fuses.len());
    println!("  Cables   : {}", g.cables.len());
    println!("  Meters   : {}", g.meters.len());
    println!();

    print_entities(&state)?;
    println!();
    print_fuses(&state, precision)?;
    println!();
    print_cables(&state, precision)?;
    Ok(())
}

fn print_entities(state: &GridState) -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "ENTITY\tTYPE\tNAME\tFUSES")?;
    for entity in state.grid().entities.values() {
        let fuses: Vec<String> = entity.fuses.iter().map(|f| f.to_string()).collect();
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            entity.id,
            entity.entity_type,
            entity.name,
            fuses.join(", ")
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn print_fuses(state: &GridState, precision: usize) -> Result<()> {
    let view = GridView::new(state);
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "FUSE\tNAME\tSTATE\tCONFIDENCE\tLOADS")?;
    for fuse in state.grid().fuses.values() {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}%\t{}",
            fuse.id,
            fuse.name,
            view.fuse_state(fuse.id),
            view.fuse_conf_level_str(fuse.id),
            pretty_str_with(Some(view.fuse_uloads(fuse.id)), precision)
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn print_cables(state: &GridState, precision: usize) -> Result<()> {
    let view = GridView::new(state);
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "CABLE\tFUSES\tMETERS\tLOADS")?;
    for cable in state.grid().cables.values() {
        let meters: Vec<String> = view
            .meters(cable.id)
            .iter()
            .map(|m| format!("{} ({:.*})", m.name, precision, view.meter_cons(m.id)))
            .collect();
        writeln!(
            writer,
            "{}\t{}-{}\t{}\t{}",
            cable.id,
            cable.fuse1,
            cable.fuse2,
            meters.join(", "),
            pretty_str_with(Some(view.cable_uloads(cable.id)), precision)
        )?;
    }
    writer.flush()?;
    Ok(())
}
