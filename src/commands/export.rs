//! CSV export of all bookings.

use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use roomcal_core::{Frontdesk, LocalStore, export};

pub async fn run(desk: &mut Frontdesk<LocalStore>, out: Option<PathBuf>) -> Result<()> {
    desk.refresh().await?;
    let csv = export::to_csv(desk.store());

    match out {
        Some(path) => {
            std::fs::write(&path, &csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "Exported {} night(s) to {}",
                desk.store().night_count().to_string().green(),
                path.display().bold()
            );
        }
        None => print!("{csv}"),
    }
    Ok(())
}
