use crate::error::{GameError, Result};
use crate::grid::Grid;
use crate::types::{CellCount, Coord2};

pub use random::RandomMineGenerator;

mod random;

/// Seam between the session and the mine-placement strategy. `populate` is
/// called exactly once per game, on a grid with no mines, with the
/// coordinate of the first reveal.
pub trait MineGenerator {
    fn populate(&mut self, grid: &mut Grid, mines: CellCount, first_click: Coord2) -> Result<()>;
}

/// Places an explicit mine layout, ignoring the first-click exclusion.
/// Intended for tests and replays; [`RandomMineGenerator`] is the gameplay
/// default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedMineGenerator {
    layout: Vec<Coord2>,
}

impl FixedMineGenerator {
    pub fn new(layout: impl Into<Vec<Coord2>>) -> Self {
        Self {
            layout: layout.into(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn populate(&mut self, grid: &mut Grid, mines: CellCount, _first_click: Coord2) -> Result<()> {
        if self.layout.len() as CellCount != mines {
            log::warn!(
                "fixed layout places {} mines, session expects {}",
                self.layout.len(),
                mines
            );
        }
        for &coords in &self.layout {
            if !grid.in_bounds(coords) {
                return Err(GameError::OutOfBounds);
            }
            grid.place_mine(coords);
        }
        Ok(())
    }
}
