//! Cell states, building kinds and directions
//!
//! Defines everything that can occupy a city cell, plus the axis-aligned
//! directions used by road carving and landmark satellite placement.

use serde::{Deserialize, Serialize};

/// Contents of a single grid cell.
///
/// Only `Empty` cells accept a placement; anything else is permanent for the
/// lifetime of the generated city.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Empty,
    Road,
    PlayerApartment,
    Parliament,
    CourtYard,
    Office,
    Court,
    Jail,
    CarPark,
    University,
    Park,
    Hospital,
    MilitaryBase,
    WeaponsDepot,
    TownCenter,
    PoliceStation,
    /// Filler building lining a road.
    Building(BuildingKind),
}

impl CellState {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellState::Empty)
    }

    pub fn is_road(&self) -> bool {
        matches!(self, CellState::Road)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CellState::Empty => "Empty",
            CellState::Road => "Road",
            CellState::PlayerApartment => "Player Apartment",
            CellState::Parliament => "Parliament",
            CellState::CourtYard => "Courtyard",
            CellState::Office => "Office",
            CellState::Court => "Court",
            CellState::Jail => "Jail",
            CellState::CarPark => "Car Park",
            CellState::University => "University",
            CellState::Park => "Park",
            CellState::Hospital => "Hospital",
            CellState::MilitaryBase => "Military Base",
            CellState::WeaponsDepot => "Weapons Depot",
            CellState::TownCenter => "Town Center",
            CellState::PoliceStation => "Police Station",
            CellState::Building(kind) => kind.display_name(),
        }
    }

    /// Every state except the per-kind buildings, in legend order.
    pub fn structures() -> &'static [CellState] {
        &[
            CellState::Road,
            CellState::PlayerApartment,
            CellState::Parliament,
            CellState::CourtYard,
            CellState::Office,
            CellState::Court,
            CellState::Jail,
            CellState::CarPark,
            CellState::University,
            CellState::Park,
            CellState::Hospital,
            CellState::MilitaryBase,
            CellState::WeaponsDepot,
            CellState::TownCenter,
            CellState::PoliceStation,
        ]
    }
}

/// Filler building types drawn from the weighted catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    Apartments,
    Factory,
    SmallHouse,
    LargeHouse,
    Park,
    CarPark,
    Office,
    Embassy,
    Storage,
    MedicalCenter,
    Kiosk,
    Bar,
    School,
}

impl BuildingKind {
    pub fn all() -> &'static [BuildingKind] {
        &[
            BuildingKind::Apartments,
            BuildingKind::Factory,
            BuildingKind::SmallHouse,
            BuildingKind::LargeHouse,
            BuildingKind::Park,
            BuildingKind::CarPark,
            BuildingKind::Office,
            BuildingKind::Embassy,
            BuildingKind::Storage,
            BuildingKind::MedicalCenter,
            BuildingKind::Kiosk,
            BuildingKind::Bar,
            BuildingKind::School,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BuildingKind::Apartments => "Apartments",
            BuildingKind::Factory => "Factory",
            BuildingKind::SmallHouse => "Small House",
            BuildingKind::LargeHouse => "Large House",
            BuildingKind::Park => "Park (filler)",
            BuildingKind::CarPark => "Car Park (filler)",
            BuildingKind::Office => "Office (filler)",
            BuildingKind::Embassy => "Embassy",
            BuildingKind::Storage => "Storage",
            BuildingKind::MedicalCenter => "Medical Center",
            BuildingKind::Kiosk => "Kiosk",
            BuildingKind::Bar => "Bar",
            BuildingKind::School => "School",
        }
    }
}

/// Axis-aligned unit step. `Up` is +y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Right,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Right, Direction::Left];

    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
        }
    }

    pub fn step(&self, (x, y): (i32, i32)) -> (i32, i32) {
        let (dx, dy) = self.offset();
        (x + dx, y + dy)
    }
}

/// The unique buildings of a city, in placement order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Landmark {
    PlayerApartment,
    Parliament,
    Court,
    University,
    Hospital,
    MilitaryBase,
    TownCenter,
}

impl Landmark {
    pub const ALL: [Landmark; 7] = [
        Landmark::PlayerApartment,
        Landmark::Parliament,
        Landmark::Court,
        Landmark::University,
        Landmark::Hospital,
        Landmark::MilitaryBase,
        Landmark::TownCenter,
    ];

    pub fn cell_state(&self) -> CellState {
        match self {
            Landmark::PlayerApartment => CellState::PlayerApartment,
            Landmark::Parliament => CellState::Parliament,
            Landmark::Court => CellState::Court,
            Landmark::University => CellState::University,
            Landmark::Hospital => CellState::Hospital,
            Landmark::MilitaryBase => CellState::MilitaryBase,
            Landmark::TownCenter => CellState::TownCenter,
        }
    }

    pub fn display_name(&self) -> &'static str {
        self.cell_state().display_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_step() {
        assert_eq!(Direction::Up.step((3, 3)), (3, 4));
        assert_eq!(Direction::Down.step((3, 3)), (3, 2));
        assert_eq!(Direction::Right.step((3, 3)), (4, 3));
        assert_eq!(Direction::Left.step((0, 3)), (-1, 3));
    }

    #[test]
    fn test_landmark_tags_are_distinct() {
        let tags: std::collections::HashSet<CellState> =
            Landmark::ALL.iter().map(|l| l.cell_state()).collect();
        assert_eq!(tags.len(), Landmark::ALL.len());
        assert!(tags.iter().all(|t| !t.is_empty() && !t.is_road()));
    }

    #[test]
    fn test_default_cell_is_empty() {
        assert!(CellState::default().is_empty());
        assert!(!CellState::Building(BuildingKind::Bar).is_empty());
    }
}
