//! Profiling tool to time each generation stage

use std::time::Instant;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use city_generator::city::buildings::{fill_buildings, BuildingCatalog};
use city_generator::city::grid::CityLayout;
use city_generator::city::hooks::{NullRenderer, NullViewport};
use city_generator::city::{landmarks, police, roads};
use city_generator::{CityConfig, MapSizePreset};

fn main() {
    let seed = 1337u64;
    let config = CityConfig::from(MapSizePreset::Large);
    let catalog = match BuildingCatalog::new(&config.catalog) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("=== Performance Profiling ===");
    println!(
        "Map size: {}x{} ({} cells), {} road attempts",
        config.width,
        config.height,
        config.width * config.height,
        config.max_iterations
    );
    println!();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut layout = CityLayout::new(config.width, config.height);

    let start = Instant::now();
    let stats = roads::carve_roads(&mut layout, &config, &mut rng, &mut NullRenderer);
    let road_time = start.elapsed();
    println!("Road carving: {:?} ({} cells, {} rejected)", road_time, stats.accepted, stats.rejected);

    let start = Instant::now();
    let placed = landmarks::place_landmarks(&mut layout, &mut rng, &mut NullRenderer, &mut NullViewport);
    let landmark_time = start.elapsed();
    let landmark_count = placed.iter().filter(|(_, p)| p.is_some()).count();
    println!("Landmarks: {:?} ({} placed)", landmark_time, landmark_count);

    let start = Instant::now();
    let stations = police::place_police_stations(
        &mut layout,
        config.police_count,
        config.min_distance,
        &mut rng,
        &mut NullRenderer,
    );
    let police_time = start.elapsed();
    println!("Police: {:?} ({} stations)", police_time, stations.len());

    let start = Instant::now();
    let buildings = fill_buildings(&mut layout, &catalog, &mut rng, &mut NullRenderer);
    let building_time = start.elapsed();
    println!("Building fill: {:?} ({} buildings)", building_time, buildings);

    // Summary
    let total = road_time + landmark_time + police_time + building_time;
    let pct = |d: std::time::Duration| 100.0 * d.as_secs_f64() / total.as_secs_f64().max(f64::MIN_POSITIVE);
    println!("\n=== Summary ===");
    println!("Roads:            {:>8.2}% ({:?})", pct(road_time), road_time);
    println!("Landmarks:        {:>8.2}% ({:?})", pct(landmark_time), landmark_time);
    println!("Police:           {:>8.2}% ({:?})", pct(police_time), police_time);
    println!("Buildings:        {:>8.2}% ({:?})", pct(building_time), building_time);
    println!("─────────────────────────────────");
    println!("Total:            {:?}", total);
}
