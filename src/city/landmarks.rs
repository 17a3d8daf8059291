//! Landmark and satellite placement
//!
//! Each landmark lands on a random road-adjacent site and pulls one or two
//! functionally paired satellites next to it (a jail by the court, a weapons
//! depot by the military base, ...). Satellite directions come from a
//! per-landmark rule table with road-aware fallbacks.

use rand::Rng;
use serde::Serialize;

use crate::city::grid::{CityGrid, CityLayout};
use crate::city::hooks::{TileRenderer, ViewportController};
use crate::city::sites::road_adjacent_sites;
use crate::city::types::{CellState, Direction, Landmark};

/// Satellite placed unconditionally, in a direction chosen by whether any of
/// the primary satellite's checked directions was blocked by a road.
#[derive(Clone, Copy, Debug)]
pub struct PairedSatellite {
    pub state: CellState,
    pub when_blocked: Direction,
    pub otherwise: Direction,
}

/// Satellite placement rule for one landmark.
#[derive(Clone, Copy, Debug)]
pub struct LandmarkRule {
    pub landmark: Landmark,
    /// Ordered preferences. All but the last are taken only when that
    /// direction is not blocked by a road; the last is the final fallback.
    pub fallbacks: &'static [(Direction, CellState)],
    pub paired: Option<PairedSatellite>,
}

use CellState::{CarPark, CourtYard, Jail, Office, Park, WeaponsDepot};
use Direction::{Down, Left, Right, Up};

pub static LANDMARK_RULES: [LandmarkRule; 7] = [
    LandmarkRule {
        landmark: Landmark::PlayerApartment,
        fallbacks: &[],
        paired: None,
    },
    LandmarkRule {
        landmark: Landmark::Parliament,
        fallbacks: &[(Up, CourtYard), (Down, Office), (Left, CourtYard)],
        paired: None,
    },
    LandmarkRule {
        landmark: Landmark::Court,
        fallbacks: &[(Up, Jail), (Down, Jail), (Left, Jail)],
        paired: Some(PairedSatellite { state: CarPark, when_blocked: Right, otherwise: Down }),
    },
    LandmarkRule {
        landmark: Landmark::University,
        fallbacks: &[(Up, Park), (Down, Park), (Left, Park)],
        paired: Some(PairedSatellite { state: Park, when_blocked: Right, otherwise: Down }),
    },
    LandmarkRule {
        landmark: Landmark::Hospital,
        fallbacks: &[(Right, CarPark), (Left, CarPark), (Down, CarPark)],
        paired: Some(PairedSatellite { state: Park, when_blocked: Up, otherwise: Left }),
    },
    LandmarkRule {
        landmark: Landmark::MilitaryBase,
        fallbacks: &[
            (Right, WeaponsDepot),
            (Left, WeaponsDepot),
            (Down, WeaponsDepot),
            (Up, WeaponsDepot),
        ],
        paired: None,
    },
    LandmarkRule {
        landmark: Landmark::TownCenter,
        fallbacks: &[(Up, CourtYard), (Down, CourtYard), (Right, CourtYard), (Left, CourtYard)],
        paired: None,
    },
];

pub fn rule_for(landmark: Landmark) -> &'static LandmarkRule {
    let index = match landmark {
        Landmark::PlayerApartment => 0,
        Landmark::Parliament => 1,
        Landmark::Court => 2,
        Landmark::University => 3,
        Landmark::Hospital => 4,
        Landmark::MilitaryBase => 5,
        Landmark::TownCenter => 6,
    };
    &LANDMARK_RULES[index]
}

/// Where a landmark and its satellites ended up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LandmarkPlacement {
    pub landmark: Landmark,
    pub position: (i32, i32),
    /// Satellites actually written, in write order.
    pub satellites: Vec<((i32, i32), CellState)>,
}

fn blocked_by_road(grid: &CityGrid, pos: (i32, i32), direction: Direction) -> bool {
    let (x, y) = direction.step(pos);
    grid.is_road_at(x, y)
}

/// Place one landmark and its satellites. Returns `None` when no
/// road-adjacent site is left.
pub fn place_landmark<R: Rng + ?Sized>(
    layout: &mut CityLayout,
    rule: &LandmarkRule,
    rng: &mut R,
    renderer: &mut dyn TileRenderer,
) -> Option<LandmarkPlacement> {
    let sites = road_adjacent_sites(&layout.grid, &layout.roads);
    if sites.is_empty() {
        log::warn!("No site left for {}", rule.landmark.display_name());
        return None;
    }

    let position = sites[rng.gen_range(0..sites.len())];
    if !layout.place(position, rule.landmark.cell_state(), renderer) {
        return None;
    }

    let mut placement = LandmarkPlacement {
        landmark: rule.landmark,
        position,
        satellites: Vec::new(),
    };

    if let Some((&last, checked)) = rule.fallbacks.split_last() {
        // Blocked flags are read before any satellite is written.
        let blocked: Vec<bool> = checked
            .iter()
            .map(|&(dir, _)| blocked_by_road(&layout.grid, position, dir))
            .collect();

        let (direction, state) = checked
            .iter()
            .zip(&blocked)
            .find(|(_, is_blocked)| !**is_blocked)
            .map(|(choice, _)| *choice)
            .unwrap_or(last);
        place_satellite(layout, &mut placement, direction, state, renderer);

        if let Some(paired) = rule.paired {
            let direction = if blocked.iter().any(|&b| b) {
                paired.when_blocked
            } else {
                paired.otherwise
            };
            place_satellite(layout, &mut placement, direction, paired.state, renderer);
        }
    }

    log::debug!(
        "Placed {} at {:?} with {} satellite(s)",
        rule.landmark.display_name(),
        position,
        placement.satellites.len()
    );
    Some(placement)
}

fn place_satellite(
    layout: &mut CityLayout,
    placement: &mut LandmarkPlacement,
    direction: Direction,
    state: CellState,
    renderer: &mut dyn TileRenderer,
) {
    let pos = direction.step(placement.position);
    if layout.place(pos, state, renderer) {
        placement.satellites.push((pos, state));
    }
}

/// Place every landmark in order, re-scanning sites before each one.
/// The viewport is recentered on the player apartment once it is placed.
pub fn place_landmarks<R: Rng + ?Sized>(
    layout: &mut CityLayout,
    rng: &mut R,
    renderer: &mut dyn TileRenderer,
    viewport: &mut dyn ViewportController,
) -> Vec<(Landmark, Option<LandmarkPlacement>)> {
    let mut results = Vec::with_capacity(LANDMARK_RULES.len());

    for rule in LANDMARK_RULES.iter() {
        let placement = place_landmark(layout, rule, rng, renderer);
        if rule.landmark == Landmark::PlayerApartment {
            if let Some(p) = &placement {
                viewport.recenter(p.position);
            }
        }
        results.push((rule.landmark, placement));
    }

    let placed = results.iter().filter(|(_, p)| p.is_some()).count();
    log::info!("Placed {}/{} landmarks", placed, results.len());
    results
}
