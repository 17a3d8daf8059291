//! Collaborator interfaces invoked by the generator
//!
//! The generator never draws or moves a camera itself. Hosts pass a
//! [`TileRenderer`] that receives every successful cell write in order, and a
//! [`ViewportController`] that is told where the player apartment landed.

use crate::city::types::CellState;

/// Receives one call per successful cell write, in write order.
pub trait TileRenderer {
    fn paint(&mut self, pos: (i32, i32), state: CellState);
}

/// Recenters the host's view on a grid coordinate.
pub trait ViewportController {
    fn recenter(&mut self, pos: (i32, i32));
}

/// Renderer that discards every paint call.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl TileRenderer for NullRenderer {
    fn paint(&mut self, _pos: (i32, i32), _state: CellState) {}
}

/// Viewport that ignores recentering.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullViewport;

impl ViewportController for NullViewport {
    fn recenter(&mut self, _pos: (i32, i32)) {}
}

/// Keeps the full ordered paint log.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<((i32, i32), CellState)>,
}

impl TileRenderer for RecordingRenderer {
    fn paint(&mut self, pos: (i32, i32), state: CellState) {
        self.calls.push((pos, state));
    }
}

/// Remembers the most recent focus point.
#[derive(Clone, Copy, Debug, Default)]
pub struct FocusViewport {
    pub focus: Option<(i32, i32)>,
    pub recenter_count: usize,
}

impl ViewportController for FocusViewport {
    fn recenter(&mut self, pos: (i32, i32)) {
        self.focus = Some(pos);
        self.recenter_count += 1;
    }
}
