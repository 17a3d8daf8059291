use std::fs::File;
use std::io::Write;

use image::{ImageBuffer, Rgb, RgbImage};
use serde::Serialize;

use crate::city::landmarks::LandmarkPlacement;
use crate::city::summary::CitySummary;
use crate::city::types::{BuildingKind, CellState};
use crate::city::GeneratedCity;
use crate::error::CityError;

/// Map color for a cell state.
pub fn cell_color(cell: &CellState) -> [u8; 3] {
    match cell {
        CellState::Empty => [24, 28, 24],
        CellState::Road => [90, 90, 96],

        CellState::PlayerApartment => [255, 255, 255],
        CellState::Parliament => [200, 40, 40],
        CellState::Court => [150, 60, 170],
        CellState::University => [40, 90, 200],
        CellState::Hospital => [240, 240, 120],
        CellState::MilitaryBase => [70, 100, 40],
        CellState::TownCenter => [240, 150, 30],
        CellState::PoliceStation => [20, 60, 255],

        CellState::CourtYard => [210, 190, 140],
        CellState::Office => [150, 150, 170],
        CellState::Jail => [80, 50, 90],
        CellState::CarPark => [60, 60, 60],
        CellState::Park => [60, 170, 70],
        CellState::WeaponsDepot => [110, 80, 40],

        CellState::Building(kind) => building_color(kind),
    }
}

fn building_color(kind: &BuildingKind) -> [u8; 3] {
    match kind {
        BuildingKind::Apartments => [170, 120, 100],
        BuildingKind::Factory => [120, 100, 90],
        BuildingKind::SmallHouse => [200, 150, 110],
        BuildingKind::LargeHouse => [180, 130, 90],
        BuildingKind::Park => [90, 150, 80],
        BuildingKind::CarPark => [100, 100, 105],
        BuildingKind::Office => [130, 140, 160],
        BuildingKind::Embassy => [190, 170, 200],
        BuildingKind::Storage => [140, 120, 80],
        BuildingKind::MedicalCenter => [220, 220, 200],
        BuildingKind::Kiosk => [200, 180, 60],
        BuildingKind::Bar => [160, 70, 70],
        BuildingKind::School => [230, 200, 120],
    }
}

/// Render a city to an image, `scale` pixels per cell. Image row 0 is the
/// highest y so the picture matches the ASCII map.
pub fn render_image(city: &GeneratedCity, scale: u32) -> RgbImage {
    let scale = scale.max(1);
    let width = city.width() as u32;
    let height = city.height() as u32;
    let mut img: RgbImage = ImageBuffer::new(width * scale, height * scale);

    for (x, y, cell) in city.grid.iter() {
        let color = Rgb(cell_color(cell));
        let px0 = x as u32 * scale;
        let py0 = (height - 1 - y as u32) * scale;
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(px0 + dx, py0 + dy, color);
            }
        }
    }

    img
}

/// Export a city as a colored PNG.
pub fn export_png(city: &GeneratedCity, path: &str, scale: u32) -> Result<(), CityError> {
    render_image(city, scale).save(path)?;
    Ok(())
}

/// Exported city data
#[derive(Clone, Debug, Serialize)]
pub struct CityExport {
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub roads: Vec<(i32, i32)>,
    pub landmarks: Vec<LandmarkPlacement>,
    pub police_stations: Vec<(i32, i32)>,
    pub buildings_placed: usize,
    pub summary: CitySummary,
}

impl CityExport {
    pub fn new(city: &GeneratedCity, seed: u64) -> Self {
        Self {
            seed,
            width: city.width(),
            height: city.height(),
            roads: city.roads.clone(),
            landmarks: city
                .landmarks
                .iter()
                .filter_map(|(_, p)| p.clone())
                .collect(),
            police_stations: city.police_stations.clone(),
            buildings_placed: city.buildings_placed,
            summary: city.summary(),
        }
    }
}

/// Export city data to a JSON file.
pub fn export_json(city: &GeneratedCity, seed: u64, path: &str) -> Result<(), CityError> {
    let export = CityExport::new(city, seed);
    let json = serde_json::to_string_pretty(&export)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
