use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use engine_logging::engine_info;
use harvester_engine::HarvestSettings;

/// Load harvest settings from a RON file, or defaults when no file is given.
/// Fields missing from the file keep their default values.
pub fn load_settings(path: Option<&Path>) -> Result<HarvestSettings> {
    let Some(path) = path else {
        return Ok(HarvestSettings::default());
    };
    let content =
        fs::read_to_string(path).with_context(|| format!("reading settings from {path:?}"))?;
    let settings: HarvestSettings =
        ron::from_str(&content).with_context(|| format!("parsing settings in {path:?}"))?;
    ensure!(
        settings.fetch_timeout_covers_settle(),
        "secondary_fetch_timeout_ms ({}) must exceed settle_delay_ms ({}) in {path:?}",
        settings.secondary_fetch_timeout_ms,
        settings.settle_delay_ms
    );
    engine_info!("Loaded settings from {:?}", path);
    Ok(settings)
}
