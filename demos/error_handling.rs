//! Error handling demo for geoborders-rs
//!
//! This demo shows which failures are fatal and which are only counted.

use geoborders_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== geoborders-rs Error Handling Demo ===\n");

    // Example 1: Missing boundary archive
    println!("--- Example 1: Loading a missing archive ---");
    match BoundaryDataset::load("data/does_not_exist.zip") {
        Ok(ds) => println!("  Unexpectedly loaded {} units", ds.len()),
        Err(BorderError::SourceNotFound(what)) => println!("  Source not found: {what}"),
        Err(e) => return Err(e),
    }
    println!();

    // Example 2: Malformed bounding boxes fail up front
    println!("--- Example 2: Invalid bounding boxes ---");
    let boxes = [
        (-10.0, 50.0, 30.0, 72.0),
        (30.0, 50.0, -10.0, 72.0),
        (0.0, 60.0, 10.0, 60.0),
    ];
    for (min_lon, min_lat, max_lon, max_lat) in boxes {
        match BoundingBox::new(min_lon, min_lat, max_lon, max_lat) {
            Ok(b) => println!("  OK:       {b:?}"),
            Err(e) => println!("  Rejected: {e}"),
        }
    }
    println!();

    // Example 3: Per-unit problems are counted, never fatal
    println!("--- Example 3: Skipped geometry is reported ---");
    let square: Ring = [(10.0, 50.0), (10.0, 55.0), (15.0, 55.0), (15.0, 50.0), (10.0, 50.0)]
        .into_iter()
        .collect();
    let sliver: Ring = [(179.0, 65.0), (181.0, 65.0), (181.0, 70.0), (179.0, 65.0)]
        .into_iter()
        .collect();
    let ds = BoundaryDataset::new(vec![
        AdminUnit::new(Geometry::SinglePart(Polygon::new(square, vec![]))),
        AdminUnit::new(Geometry::SinglePart(Polygon::new(sliver, vec![]))),
        AdminUnit::new(Geometry::Null),
        AdminUnit::new(Geometry::Unsupported("Polyline".to_string())),
    ]);
    let out = BorderPipeline::default().concatenated(&ds);
    println!("  Rings drawn:  {}", out.output.ring_count());
    println!("  Skipped:      {:?}", out.skipped);
    println!("  Total skips:  {}", out.skipped.total());
    println!();

    // Example 4: Bad configuration
    println!("--- Example 4: Rejected configuration ---");
    match PipelineConfig::from_json_str(r#"{ "thresholds": { "polar_latitude": 120 } }"#) {
        Ok(_) => println!("  Accepted"),
        Err(e) => println!("  {e}"),
    }

    Ok(())
}
