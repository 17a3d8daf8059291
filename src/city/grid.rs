//! City grid and the shared layout mutated by every generation stage

use crate::city::hooks::TileRenderer;
use crate::city::types::CellState;
use crate::tilemap::Tilemap;

pub type CityGrid = Tilemap<CellState>;

impl Tilemap<CellState> {
    /// True only for in-bounds `Empty` cells.
    pub fn is_empty_at(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map(|c| c.is_empty()).unwrap_or(false)
    }

    /// True only for in-bounds `Road` cells.
    pub fn is_road_at(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map(|c| c.is_road()).unwrap_or(false)
    }

    /// Write `state` into an in-bounds `Empty` cell. Never overwrites.
    pub fn try_set(&mut self, x: i32, y: i32, state: CellState) -> bool {
        if !self.is_empty_at(x, y) {
            return false;
        }
        self.set(x, y, state).is_ok()
    }

    /// Road cells in the clamped 3x3 window centered on (x, y).
    pub fn roads_around(&self, x: i32, y: i32) -> usize {
        self.window(x, y, 1)
            .filter(|&(wx, wy)| self.is_road_at(wx, wy))
            .count()
    }
}

/// The grid plus the insertion-ordered list of road cells.
#[derive(Clone, Debug)]
pub struct CityLayout {
    pub grid: CityGrid,
    pub roads: Vec<(i32, i32)>,
}

impl CityLayout {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: CityGrid::new(width, height),
            roads: Vec::new(),
        }
    }

    /// Occupy an empty cell and notify the renderer. Returns false (and paints
    /// nothing) when the cell is out of range or taken.
    pub fn place(
        &mut self,
        pos: (i32, i32),
        state: CellState,
        renderer: &mut dyn TileRenderer,
    ) -> bool {
        if !self.grid.try_set(pos.0, pos.1, state) {
            return false;
        }
        if state.is_road() {
            self.roads.push(pos);
        }
        renderer.paint(pos, state);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::hooks::{NullRenderer, RecordingRenderer};

    #[test]
    fn test_try_set_never_overwrites() {
        let mut grid = CityGrid::new(10, 10);
        assert!(grid.try_set(3, 3, CellState::Road));
        assert!(!grid.try_set(3, 3, CellState::Park));
        assert_eq!(*grid.get(3, 3).unwrap(), CellState::Road);
        assert!(!grid.try_set(10, 3, CellState::Park));
        assert!(!grid.try_set(-1, 0, CellState::Park));
    }

    #[test]
    fn test_out_of_bounds_is_neither_empty_nor_road() {
        let grid = CityGrid::new(10, 10);
        assert!(!grid.is_empty_at(-1, 5));
        assert!(!grid.is_road_at(-1, 5));
        assert!(grid.is_empty_at(0, 0));
    }

    #[test]
    fn test_roads_around_counts_window() {
        let mut grid = CityGrid::new(10, 10);
        grid.try_set(0, 0, CellState::Road);
        grid.try_set(1, 1, CellState::Road);
        grid.try_set(5, 5, CellState::Road);
        assert_eq!(grid.roads_around(0, 1), 2);
        assert_eq!(grid.roads_around(4, 4), 1);
        assert_eq!(grid.roads_around(8, 8), 0);
    }

    #[test]
    fn test_place_tracks_roads_and_paints() {
        let mut layout = CityLayout::new(10, 10);
        let mut renderer = RecordingRenderer::default();
        assert!(layout.place((2, 2), CellState::Road, &mut renderer));
        assert!(layout.place((2, 3), CellState::Park, &mut renderer));
        assert!(!layout.place((2, 3), CellState::Road, &mut renderer));
        assert_eq!(layout.roads, vec![(2, 2)]);
        assert_eq!(
            renderer.calls,
            vec![((2, 2), CellState::Road), ((2, 3), CellState::Park)]
        );

        assert!(!layout.place((20, 3), CellState::Road, &mut NullRenderer));
        assert_eq!(layout.roads.len(), 1);
    }
}
