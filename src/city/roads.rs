//! Road network carving
//!
//! Grows a thin, branching street skeleton by random walk: each step picks an
//! existing road cell at random, steps one cell in a random direction, and
//! keeps the new cell only if the surrounding 3x3 block is still sparse.
//! Growing from the whole network rather than a single tip gives a tree-like
//! layout instead of one long snake.

use rand::Rng;

use crate::city::grid::CityLayout;
use crate::city::hooks::TileRenderer;
use crate::city::types::{CellState, Direction};
use crate::config::CityConfig;

/// Outcome counters for one carving run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoadStats {
    /// Cells turned into road, seed included.
    pub accepted: usize,
    /// Candidates discarded (out of bounds, occupied, or too dense).
    pub rejected: usize,
}

/// Pick a seed cell inside the configured margin and carve from it.
pub fn carve_roads<R: Rng + ?Sized>(
    layout: &mut CityLayout,
    config: &CityConfig,
    rng: &mut R,
    renderer: &mut dyn TileRenderer,
) -> RoadStats {
    let margin = config.seed_margin as i32;
    let start_x = rng.gen_range(margin..layout.grid.width as i32 - margin);
    let start_y = rng.gen_range(margin..layout.grid.height as i32 - margin);
    carve_roads_from(layout, (start_x, start_y), config, rng, renderer)
}

/// Carve a road network from a fixed seed cell.
///
/// Runs exactly `config.max_iterations` steps regardless of how many are
/// accepted. Returns empty stats if the seed cell itself cannot be placed.
pub fn carve_roads_from<R: Rng + ?Sized>(
    layout: &mut CityLayout,
    start: (i32, i32),
    config: &CityConfig,
    rng: &mut R,
    renderer: &mut dyn TileRenderer,
) -> RoadStats {
    let mut stats = RoadStats::default();
    if !layout.place(start, CellState::Road, renderer) {
        log::warn!("Road seed {:?} is not an empty in-bounds cell", start);
        return stats;
    }
    stats.accepted += 1;

    for _ in 0..config.max_iterations {
        let from = layout.roads[rng.gen_range(0..layout.roads.len())];
        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        let candidate = direction.step(from);

        if is_valid_extension(layout, candidate, config.max_road_neighbors)
            && layout.place(candidate, CellState::Road, renderer)
        {
            stats.accepted += 1;
        } else {
            stats.rejected += 1;
        }
    }

    log::info!(
        "Carved {} road cells ({} candidates rejected) from seed {:?}",
        stats.accepted,
        stats.rejected,
        start
    );
    stats
}

/// A candidate must be an in-bounds empty cell whose 3x3 block holds at most
/// `max_neighbors` roads before it is placed.
fn is_valid_extension(layout: &CityLayout, (x, y): (i32, i32), max_neighbors: usize) -> bool {
    layout.grid.is_empty_at(x, y) && layout.grid.roads_around(x, y) <= max_neighbors
}
