use crate::data::CalendarSettings;
use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::info;

pub fn run() -> Result<()> {
    let dir = crate::data::persistence::get_data_dir()?;
    fs::create_dir_all(&dir)?;
    run_in_dir(&dir)?;
    println!("Settings initialized successfully.");
    Ok(())
}

/// Writes the default calendar.yaml into `dir`. Exposed for unit testing.
pub(crate) fn run_in_dir(dir: &Path) -> Result<()> {
    CalendarSettings::defaults().save_to(dir)?;
    info!(dir = %dir.display(), "wrote default calendar settings");
    Ok(())
}
