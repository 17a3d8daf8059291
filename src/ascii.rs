//! ASCII rendering and export for generated cities
//!
//! Rows are printed top-down from the highest y, so "up" on screen is +y.

use std::fs::File;
use std::io::{self, Write};
use chrono::Local;

use crate::city::grid::CityGrid;
use crate::city::hooks::TileRenderer;
use crate::city::types::{BuildingKind, CellState};
use crate::city::GeneratedCity;

/// Get ASCII character for a cell
pub fn cell_char(cell: &CellState) -> char {
    match cell {
        CellState::Empty => ' ',
        CellState::Road => '#',

        // Landmarks
        CellState::PlayerApartment => '@',
        CellState::Parliament => 'P',
        CellState::Court => 'C',
        CellState::University => 'U',
        CellState::Hospital => 'H',
        CellState::MilitaryBase => 'M',
        CellState::TownCenter => 'T',
        CellState::PoliceStation => '!',

        // Satellites
        CellState::CourtYard => 'y',
        CellState::Office => 'o',
        CellState::Jail => 'j',
        CellState::CarPark => 'k',
        CellState::Park => '*',
        CellState::WeaponsDepot => 'w',

        CellState::Building(kind) => building_char(kind),
    }
}

fn building_char(kind: &BuildingKind) -> char {
    match kind {
        BuildingKind::Apartments => 'a',
        BuildingKind::Factory => 'f',
        BuildingKind::SmallHouse => 'h',
        BuildingKind::LargeHouse => 'l',
        BuildingKind::Park => '"',
        BuildingKind::CarPark => '=',
        BuildingKind::Office => 'e',
        BuildingKind::Embassy => 'b',
        BuildingKind::Storage => 's',
        BuildingKind::MedicalCenter => '+',
        BuildingKind::Kiosk => 'i',
        BuildingKind::Bar => 'r',
        BuildingKind::School => 'c',
    }
}

/// Render the whole grid, one line per row.
pub fn render_grid(grid: &CityGrid) -> String {
    let mut out = String::with_capacity((grid.width + 1) * grid.height);
    for y in (0..grid.height as i32).rev() {
        for x in 0..grid.width as i32 {
            out.push(grid.get(x, y).map(cell_char).unwrap_or(' '));
        }
        out.push('\n');
    }
    out
}

/// Render a square window of `radius` around `center`. Cells off the map are
/// drawn as `.` so the window keeps its size at the edges.
pub fn render_window(grid: &CityGrid, center: (i32, i32), radius: i32) -> String {
    let mut out = String::new();
    for y in (center.1 - radius..=center.1 + radius).rev() {
        for x in center.0 - radius..=center.0 + radius {
            out.push(grid.get(x, y).map(cell_char).unwrap_or('.'));
        }
        out.push('\n');
    }
    out
}

/// Character canvas painted incrementally through [`TileRenderer`].
#[derive(Clone, Debug)]
pub struct AsciiCanvas {
    pub width: usize,
    pub height: usize,
    chars: Vec<char>,
}

impl AsciiCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            chars: vec![' '; width * height],
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.chars.chunks(self.width.max(1)).rev() {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

impl TileRenderer for AsciiCanvas {
    fn paint(&mut self, (x, y): (i32, i32), state: CellState) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.chars[y as usize * self.width + x as usize] = cell_char(&state);
    }
}

/// Write the map legend
fn write_legend<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "=== LEGEND ===")?;
    for state in CellState::structures() {
        writeln!(out, "  {}  {}", cell_char(state), state.display_name())?;
    }
    for kind in BuildingKind::all() {
        writeln!(out, "  {}  {}", building_char(kind), kind.display_name())?;
    }
    Ok(())
}

/// Export a city as a text file: header, map, statistics and legend.
pub fn export_city_file(city: &GeneratedCity, seed: u64, path: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    write_city(&mut file, city, seed)
}

pub fn write_city<W: Write>(out: &mut W, city: &GeneratedCity, seed: u64) -> io::Result<()> {
    writeln!(out, "=== CITY GENERATOR MAP FILE ===")?;
    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Size: {}x{}", city.width(), city.height())?;
    writeln!(out, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out)?;

    writeln!(out, "=== MAP ===")?;
    write!(out, "{}", render_grid(&city.grid))?;
    writeln!(out)?;

    writeln!(out, "=== STATISTICS ===")?;
    write!(out, "{}", city.summary())?;
    writeln!(out)?;

    write_legend(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::generate_with;
    use crate::city::hooks::NullViewport;
    use crate::config::{CityConfig, MapSizePreset};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_cell_chars_are_unique() {
        let mut chars: HashSet<char> = CellState::structures().iter().map(cell_char).collect();
        chars.insert(cell_char(&CellState::Empty));
        for kind in BuildingKind::all() {
            chars.insert(building_char(kind));
        }
        assert_eq!(chars.len(), CellState::structures().len() + 1 + BuildingKind::all().len());
    }

    #[test]
    fn test_render_grid_puts_high_y_first() {
        let mut grid = CityGrid::new(3, 2);
        grid.try_set(0, 1, CellState::Road);
        grid.try_set(2, 0, CellState::Hospital);
        assert_eq!(render_grid(&grid), "#  \n  H\n");
    }

    #[test]
    fn test_render_window_pads_off_map() {
        let mut grid = CityGrid::new(3, 3);
        grid.try_set(0, 0, CellState::PlayerApartment);
        assert_eq!(render_window(&grid, (0, 0), 1), ".  \n.@ \n...\n");
    }

    #[test]
    fn test_canvas_matches_final_grid() {
        let config = CityConfig::from(MapSizePreset::Small);
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut canvas = AsciiCanvas::new(config.width, config.height);
        let city = generate_with(&config, &mut rng, &mut canvas, &mut NullViewport).unwrap();
        assert_eq!(canvas.render(), render_grid(&city.grid));
    }

    #[test]
    fn test_write_city_sections() {
        let config = CityConfig::from(MapSizePreset::Small);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let city = crate::city::generate(&config, &mut rng).unwrap();
        let mut buf = Vec::new();
        write_city(&mut buf, &city, 3).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Seed: 3"));
        assert!(text.contains("Size: 100x100"));
        assert!(text.contains("=== MAP ==="));
        assert!(text.contains("=== LEGEND ==="));
    }
}
