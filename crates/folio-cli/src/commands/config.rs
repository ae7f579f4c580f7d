use anyhow::{Context, Result};

use folio_core::AppConfig;

pub fn run(config: &AppConfig, path_only: bool, init: bool) -> Result<()> {
    let path = AppConfig::config_path();
    if path_only {
        println!("{}", path.display());
        return Ok(());
    }

    if init {
        if path.exists() {
            println!("{} already exists, leaving it untouched", path.display());
        } else {
            AppConfig::default()
                .save()
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote default configuration to {}", path.display());
        }
        return Ok(());
    }

    if !path.exists() {
        println!("# {} not found, showing defaults", path.display());
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
