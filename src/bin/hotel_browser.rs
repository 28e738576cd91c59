// Minimal text front end: loads a catalog snapshot and prints one page of results
//
// Usage: hotel_browser [catalog.json] [field=value ...]
// e.g.   hotel_browser samples/hotel_data.json search=park sort=price-asc page=2

use anyhow::{bail, Context, Result};
use hotel_listing_engine::{Catalog, EngineConfig, QueryController, SAMPLE_CATALOG_PATH};
use std::sync::Arc;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1).peekable();
    let path = match args.peek() {
        Some(arg) if !arg.contains('=') => args.next().unwrap_or_default(),
        _ => SAMPLE_CATALOG_PATH.to_string(),
    };

    let config = EngineConfig::default();
    let catalog = Catalog::from_path(&path, &config)
        .with_context(|| format!("Failed to load catalog from {}", path))?;
    let mut controller = QueryController::new(Arc::new(catalog), &config)?;

    for arg in args {
        let Some((field, value)) = arg.split_once('=') else {
            bail!("Expected field=value, got {}", arg);
        };
        controller.apply_str(field, value)?;
    }

    let view = controller.view();
    match view.showing_range() {
        Some((first, last)) => println!(
            "Showing {}-{} of {} properties",
            first, last, view.total_matches
        ),
        None => println!("No properties match"),
    }

    for hotel in &view.records {
        let icons: Vec<&str> = hotel
            .amenity_icons()
            .map(|(_, icon)| icon.icon_name())
            .collect();
        println!(
            "  {:<28} {:<22} ${:>8.2}  {:.1}/5 ({} reviews)  [{}]",
            hotel.name(),
            hotel.location(),
            hotel.headline_price(),
            hotel.rating(),
            hotel.review_count(),
            icons.join(", ")
        );
    }

    println!("Page {} of {}", view.current_page, view.total_pages);
    if view.quarantined > 0 {
        println!("({} catalog entries skipped as malformed)", view.quarantined);
    }

    Ok(())
}
