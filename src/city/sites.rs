//! Road-adjacent site discovery

use crate::city::grid::CityGrid;

/// Every empty cell 4-adjacent to a road, listed once per adjacent road.
///
/// A cell touching two roads appears twice, which doubles its weight under
/// uniform sampling. Order follows the road list, then up/down/right/left.
pub fn road_adjacent_sites(grid: &CityGrid, roads: &[(i32, i32)]) -> Vec<(i32, i32)> {
    roads
        .iter()
        .flat_map(|&(x, y)| grid.neighbors(x, y))
        .filter(|&(x, y)| grid.is_empty_at(x, y))
        .collect()
}
