use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use folio_core::script::{run_script, Script};
use folio_core::{AppConfig, ScrollEngine};

/// Replay a script and print each event as one JSON object per line
pub async fn run(
    config: AppConfig,
    layout: Option<PathBuf>,
    script_path: &Path,
    realtime: bool,
) -> Result<()> {
    let layout = super::load_layout(&config, layout)?;
    let script = Script::load(script_path)
        .with_context(|| format!("failed to load script {}", script_path.display()))?;
    let mut engine = ScrollEngine::new(layout, config)?;

    let log = run_script(&mut engine, &script);
    info!(events = log.len(), position = engine.position(), "simulation finished");

    let mut last = Duration::ZERO;
    for (at, event) in log {
        if realtime && at > last {
            tokio::time::sleep(at - last).await;
        }
        last = at;

        let mut value = serde_json::to_value(&event)?;
        if let Some(object) = value.as_object_mut() {
            object.insert("at_ms".into(), serde_json::json!(at.as_millis() as u64));
        }
        println!("{}", serde_json::to_string(&value)?);
    }

    Ok(())
}
