//! Police station placement with a minimum spacing

use rand::Rng;

use crate::city::grid::CityLayout;
use crate::city::hooks::TileRenderer;
use crate::city::sites::road_adjacent_sites;
use crate::city::types::CellState;

fn distance(a: (i32, i32), b: (i32, i32)) -> f32 {
    let dx = (a.0 - b.0) as f32;
    let dy = (a.1 - b.1) as f32;
    (dx * dx + dy * dy).sqrt()
}

/// Greedily place up to `count` stations on road-adjacent sites, each at
/// least `min_distance` from every earlier station.
///
/// Candidates are drawn at random and removed whether or not they are
/// accepted; there is no backtracking, so fewer than `count` stations is a
/// normal outcome. Returns the stations in placement order.
pub fn place_police_stations<R: Rng + ?Sized>(
    layout: &mut CityLayout,
    count: usize,
    min_distance: f32,
    rng: &mut R,
    renderer: &mut dyn TileRenderer,
) -> Vec<(i32, i32)> {
    let mut candidates = road_adjacent_sites(&layout.grid, &layout.roads);
    let mut stations: Vec<(i32, i32)> = Vec::with_capacity(count);
    let mut rejected = 0usize;

    while stations.len() < count && !candidates.is_empty() {
        let pos = candidates.swap_remove(rng.gen_range(0..candidates.len()));

        let far_enough = stations.iter().all(|&s| distance(pos, s) >= min_distance);
        if far_enough && layout.place(pos, CellState::PoliceStation, renderer) {
            stations.push(pos);
        } else {
            rejected += 1;
        }
    }

    if stations.len() < count {
        log::debug!(
            "Candidate pool exhausted after {} station(s), {} rejected",
            stations.len(),
            rejected
        );
    }
    log::info!(
        "Placed {}/{} police stations (min distance {})",
        stations.len(),
        count,
        min_distance
    );
    stations
}
