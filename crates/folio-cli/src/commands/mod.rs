pub mod config;
pub mod inspect;
pub mod preview;
pub mod simulate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use folio_core::{AppConfig, PageLayout};

/// Layout from the command line, then the config, then the built-in page
pub fn load_layout(config: &AppConfig, path: Option<PathBuf>) -> Result<PageLayout> {
    match path.or_else(|| config.general.layout_path.clone()) {
        Some(path) => PageLayout::load(&path)
            .with_context(|| format!("failed to load layout {}", path.display())),
        None => Ok(PageLayout::portfolio()),
    }
}
