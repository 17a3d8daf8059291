//! Per-state cell counts for a generated city

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::city::grid::CityGrid;
use crate::city::types::{BuildingKind, CellState};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CitySummary {
    pub width: usize,
    pub height: usize,
    pub empty: usize,
    /// Non-building structures: roads, landmarks, satellites, police.
    pub structures: BTreeMap<CellState, usize>,
    pub buildings: BTreeMap<BuildingKind, usize>,
}

impl CitySummary {
    pub fn from_grid(grid: &CityGrid) -> Self {
        let mut summary = CitySummary {
            width: grid.width,
            height: grid.height,
            ..Default::default()
        };

        for (_, _, cell) in grid.iter() {
            match cell {
                CellState::Empty => summary.empty += 1,
                CellState::Building(kind) => *summary.buildings.entry(*kind).or_default() += 1,
                other => *summary.structures.entry(*other).or_default() += 1,
            }
        }
        summary
    }

    pub fn count(&self, state: CellState) -> usize {
        match state {
            CellState::Empty => self.empty,
            CellState::Building(kind) => self.buildings.get(&kind).copied().unwrap_or(0),
            other => self.structures.get(&other).copied().unwrap_or(0),
        }
    }

    pub fn total_buildings(&self) -> usize {
        self.buildings.values().sum()
    }
}

impl fmt::Display for CitySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "City {}x{} ({} empty cells)", self.width, self.height, self.empty)?;
        for state in CellState::structures() {
            writeln!(f, "  {:<18} {:>6}", state.display_name(), self.count(*state))?;
        }
        writeln!(f, "  Buildings          {:>6}", self.total_buildings())?;
        for (kind, n) in &self.buildings {
            writeln!(f, "    {:<18} {:>6}", kind.display_name(), n)?;
        }
        Ok(())
    }
}
