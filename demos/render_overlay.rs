//! Border overlay demo for geoborders-rs
//!
//! This demo shows how to:
//! - Load a zipped country boundary shapefile
//! - Clip it to the extent of a forecast grid
//! - Build the per-frame concatenated trace and the static per-subplot traces
//!
//! Usage: `cargo run --example render_overlay -- path/to/countries.zip`
//!
//! No boundary data ships with the crate; pass a Natural Earth
//! `ne_110m_admin_0_countries.zip` (or any polygon shapefile).

use geoborders_rs::prelude::*;
use serde_json::json;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("=== geoborders-rs Overlay Demo ===\n");

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: render_overlay <countries.zip | layer.shp | layer-dir>");
        std::process::exit(2);
    };

    // The owning application keeps this around between redraws.
    let cache = DatasetCache::new(&path);
    let world = cache.get()?;
    let stats = world.stats();
    println!("Loaded {} units ({} parts, {} points)", stats.units, stats.parts, stats.points);

    // A Nordic forecast grid, 0.25 degree spacing.
    let lons: Vec<f64> = (0..=120).map(|i| -5.0 + i as f64 * 0.25).collect();
    let lats: Vec<f64> = (0..=80).map(|j| 52.0 + j as f64 * 0.25).collect();
    let bbox = BoundingBox::from_grid(&lons, &lats)?;
    let region = world.filter(&bbox);
    println!("{} units intersect the grid\n", region.len());

    let pipeline = BorderPipeline::default();

    // --- Per-frame overlay: one trace, breaks as nulls ---
    let Assembled { output, skipped } = pipeline.concatenated(&region);
    let (xs, ys) = output.to_xy_nullable();
    println!("Concatenated trace: {} values, {} rings", xs.len(), output.ring_count());
    println!("Skipped: {skipped:?}");
    let frame_trace = json!({
        "type": "scatter",
        "mode": "lines",
        "x": xs,
        "y": ys,
        "line": { "color": output.style.color, "width": output.style.width },
        "showlegend": false,
        "hoverinfo": "skip",
    });
    println!("First 120 chars: {:.120}\n", frame_trace.to_string());

    // --- Static overlay: one trace per ring, in subplot rows 1..=4 ---
    for row in 1..=4 {
        let traces = pipeline.discrete(&region, Some(SubplotCell::new(row, 1)));
        println!("Row {row}: {} traces", traces.output.len());
    }

    Ok(())
}
