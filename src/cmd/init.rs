use crate::data::PickerSettings;
use anyhow::{bail, Result};
use std::path::Path;
use tracing::info;

pub fn run(dir: &Path, force: bool) -> Result<()> {
    run_in_dir(dir, force)?;
    println!("Wrote default settings to {}", dir.join("config.yaml").display());
    Ok(())
}

/// Writes a default config.yaml into `dir`. Refuses to overwrite unless `force`.
pub(crate) fn run_in_dir(dir: &Path, force: bool) -> Result<()> {
    let path = dir.join("config.yaml");
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    PickerSettings::default().save_to(dir)?;
    info!(path = %path.display(), "initialized config");
    Ok(())
}
