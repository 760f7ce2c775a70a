pub mod generate;
pub mod inspect;
pub mod islands;
pub mod switch;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gridview_ui_common::{UiService, UiServiceBuilder};

/// Build the service, reading configuration from `config` when given.
pub fn service(config: Option<&Path>) -> Result<UiService> {
    let builder = match config {
        Some(path) => UiServiceBuilder::new().config_path(path),
        None => UiServiceBuilder::new(),
    };
    builder.build().context("initializing gridview service")
}

/// Write the exported grid to `out`, or print it when no path is given.
pub fn emit_grid(service: &UiService, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            ensure_parent(path)?;
            service
                .save_grid(path)
                .with_context(|| format!("writing grid to {}", path.display()))?;
            println!("Grid written to {}", path.display());
        }
        None => {
            let text = service.state().read().grid_json()?;
            println!("{text}");
        }
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    Ok(())
}
