use std::path::PathBuf;

use anyhow::Result;

use folio_core::{AppConfig, ScrollEngine};

/// Print what the engine measures for a layout at a given viewport
pub fn run(
    config: AppConfig,
    layout: Option<PathBuf>,
    width: Option<f64>,
    height: Option<f64>,
) -> Result<()> {
    let mut layout = super::load_layout(&config, layout)?;
    if let Some(width) = width {
        layout.viewport.width = width;
    }
    if let Some(height) = height {
        layout.viewport.height = height;
    }

    let engine = ScrollEngine::new(layout, config)?;
    let viewport = engine.viewport();
    let geometry = engine.geometry();

    println!("viewport   {:.0} x {:.0}", viewport.width, viewport.height);
    println!(
        "document   {:.0}px, max scroll {:.0}px",
        geometry.document_height(),
        geometry.max_scroll(viewport)
    );

    println!();
    println!("{:<16} {:>9} {:>9}", "section", "top", "height");
    for (id, rect) in geometry.rects() {
        println!("{:<16} {:>9.0} {:>9.0}", id, rect.top, rect.height);
    }

    if let Some(pin) = engine.pin() {
        let state = pin.state();
        println!();
        println!(
            "pin        #{} {}",
            pin.region(),
            if state.enabled { "pinned" } else { "flat" }
        );
        println!("travel     {:.0}px", state.total_travel);
        println!("snaps      {:?}", state.snap_points);
    }

    println!();
    println!("{:<18} {:<16} {:>9} {:>9}", "trigger", "region", "start", "end");
    for (handle, window) in engine.trigger_windows() {
        let name = format!("{:?}", handle);
        let region = engine.registry().region(handle).unwrap_or("?");
        match window {
            Some(w) => println!("{:<18} {:<16} {:>9.0} {:>9.0}", name, region, w.start, w.end),
            None => println!("{:<18} {:<16} {:>9} {:>9}", name, region, "-", "-"),
        }
    }

    Ok(())
}
