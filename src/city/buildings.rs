//! Filler buildings along the road network
//!
//! Every empty cell touching a road gets one building, drawn independently
//! from a weighted catalog.

use std::collections::HashSet;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::city::grid::CityLayout;
use crate::city::hooks::TileRenderer;
use crate::city::types::{BuildingKind, CellState};
use crate::error::CityError;

/// One catalog row: a building kind and its integer weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub kind: BuildingKind,
    pub weight: u32,
}

impl CatalogEntry {
    pub const fn new(kind: BuildingKind, weight: u32) -> Self {
        Self { kind, weight }
    }
}

/// Weights sum to 100, so each weight reads as a percentage.
pub const DEFAULT_CATALOG: [CatalogEntry; 13] = [
    CatalogEntry::new(BuildingKind::Apartments, 30),
    CatalogEntry::new(BuildingKind::Factory, 10),
    CatalogEntry::new(BuildingKind::SmallHouse, 10),
    CatalogEntry::new(BuildingKind::LargeHouse, 6),
    CatalogEntry::new(BuildingKind::Park, 6),
    CatalogEntry::new(BuildingKind::CarPark, 6),
    CatalogEntry::new(BuildingKind::Office, 5),
    CatalogEntry::new(BuildingKind::Embassy, 5),
    CatalogEntry::new(BuildingKind::Storage, 5),
    CatalogEntry::new(BuildingKind::MedicalCenter, 5),
    CatalogEntry::new(BuildingKind::Kiosk, 5),
    CatalogEntry::new(BuildingKind::Bar, 5),
    CatalogEntry::new(BuildingKind::School, 2),
];

pub fn default_catalog() -> Vec<CatalogEntry> {
    DEFAULT_CATALOG.to_vec()
}

/// A validated catalog with a cumulative-weight sampler.
#[derive(Clone, Debug)]
pub struct BuildingCatalog {
    entries: Vec<CatalogEntry>,
    sampler: WeightedIndex<u32>,
}

impl BuildingCatalog {
    /// Fails when the catalog is empty or every weight is zero.
    pub fn new(entries: &[CatalogEntry]) -> Result<Self, CityError> {
        let sampler = WeightedIndex::new(entries.iter().map(|e| e.weight))?;
        Ok(Self {
            entries: entries.to_vec(),
            sampler,
        })
    }

    pub fn total_weight(&self) -> u32 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Probability of drawing `kind` (summed over duplicate rows).
    pub fn probability(&self, kind: BuildingKind) -> f64 {
        let weight: u32 = self
            .entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.weight)
            .sum();
        weight as f64 / self.total_weight() as f64
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BuildingKind {
        self.entries[self.sampler.sample(rng)].kind
    }
}

/// Line every road with buildings. Returns the number of buildings written.
///
/// Roads are visited in carving order and their neighbors in up/down/right/left
/// order; a neighbor qualifies when it is in bounds, empty and not a road cell.
pub fn fill_buildings<R: Rng + ?Sized>(
    layout: &mut CityLayout,
    catalog: &BuildingCatalog,
    rng: &mut R,
    renderer: &mut dyn TileRenderer,
) -> usize {
    let road_set: HashSet<(i32, i32)> = layout.roads.iter().copied().collect();
    let mut placed = 0;

    for i in 0..layout.roads.len() {
        let (x, y) = layout.roads[i];
        for pos in layout.grid.neighbors(x, y) {
            if !layout.grid.is_empty_at(pos.0, pos.1) || road_set.contains(&pos) {
                continue;
            }
            let kind = catalog.sample(rng);
            if layout.place(pos, CellState::Building(kind), renderer) {
                placed += 1;
            }
        }
    }

    log::info!("Filled {} buildings along {} road cells", placed, layout.roads.len());
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::hooks::NullRenderer;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    #[test]
    fn test_default_catalog_sums_to_100() {
        let catalog = BuildingCatalog::new(&DEFAULT_CATALOG).unwrap();
        assert_eq!(catalog.total_weight(), 100);
        assert!((catalog.probability(BuildingKind::Apartments) - 0.30).abs() < 1e-9);
        assert!((catalog.probability(BuildingKind::School) - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_catalog_rejected() {
        assert!(matches!(BuildingCatalog::new(&[]), Err(CityError::Catalog(_))));
        let zeros = [CatalogEntry::new(BuildingKind::Bar, 0)];
        assert!(matches!(BuildingCatalog::new(&zeros), Err(CityError::Catalog(_))));
    }

    #[test]
    fn test_sample_frequencies_match_weights() {
        let catalog = BuildingCatalog::new(&DEFAULT_CATALOG).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let draws = 200_000;
        let mut counts: HashMap<BuildingKind, usize> = HashMap::new();
        for _ in 0..draws {
            *counts.entry(catalog.sample(&mut rng)).or_default() += 1;
        }

        for entry in DEFAULT_CATALOG.iter() {
            let observed = counts.get(&entry.kind).copied().unwrap_or(0) as f64 / draws as f64;
            let expected = entry.weight as f64 / 100.0;
            assert!(
                (observed - expected).abs() < 0.01,
                "{:?}: observed {:.4}, expected {:.2}",
                entry.kind,
                observed,
                expected
            );
        }
    }

    #[test]
    fn test_fill_lines_roads_only() {
        let mut layout = CityLayout::new(10, 10);
        for x in 2..6 {
            layout.place((x, 5), CellState::Road, &mut NullRenderer);
        }
        layout.grid.try_set(3, 6, CellState::Parliament);

        let catalog = BuildingCatalog::new(&DEFAULT_CATALOG).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let placed = fill_buildings(&mut layout, &catalog, &mut rng, &mut NullRenderer);

        // 4 above + 4 below + 2 ends, minus the parliament cell
        assert_eq!(placed, 9);
        assert_eq!(*layout.grid.get(3, 6).unwrap(), CellState::Parliament);
        assert!(matches!(layout.grid.get(1, 5).unwrap(), CellState::Building(_)));
        assert!(matches!(layout.grid.get(6, 5).unwrap(), CellState::Building(_)));
        assert!(layout.grid.is_empty_at(2, 7));
        assert_eq!(layout.grid.count(|c| c.is_road()), 4);
    }

    #[test]
    fn test_fill_respects_map_edge() {
        let mut layout = CityLayout::new(3, 3);
        layout.place((0, 0), CellState::Road, &mut NullRenderer);
        let catalog = BuildingCatalog::new(&DEFAULT_CATALOG).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(fill_buildings(&mut layout, &catalog, &mut rng, &mut NullRenderer), 2);
    }
}
