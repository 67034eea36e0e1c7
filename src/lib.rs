//! Minesweeper board logic, decoupled from any presentation layer.
//!
//! The crate owns the grid, the randomized mine placement (deferred until
//! the first reveal so the opening click and its neighbors are always safe),
//! the flood-fill reveal of zero-count regions, and win/loss tracking. A UI
//! drives a [`GameSession`] with reveal/flag/restart requests and renders
//! the [`CellView`] projections and [`RevealOutcome`]s it gets back.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use session::*;
pub use types::{CellCount, Coord, Coord2, NeighborIter, ToNdIndex};

mod cell;
mod error;
mod generator;
mod grid;
mod session;
mod types;

/// Board shape plus mine count. [`GameConfig::new`] validates that the board
/// is non-empty and leaves room for the first-click exclusion zone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    /// Worst-case size of the first-click exclusion zone: the clicked cell
    /// plus its eight neighbors.
    pub const EXCLUSION_ZONE: CellCount = 9;

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let config = Self {
            width,
            height,
            mines,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.mines == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.mines > self.total_cells().saturating_sub(Self::EXCLUSION_ZONE) {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        types::mult(self.width, self.height)
    }

    /// Number of non-mine cells; revealing them all wins the game.
    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    /// Board shape as `(rows, cols)`.
    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }
}

/// Result of a reveal request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Nothing changed: the cell was already revealed, flagged, or the
    /// session has ended.
    NoOp,
    /// Every coordinate this request revealed, either a single cell or a
    /// whole flood-filled region.
    Opened(BTreeSet<Coord2>),
    /// A mine was revealed; the session transitions to lost.
    HitMine,
}

impl RevealOutcome {
    pub fn has_update(&self) -> bool {
        !matches!(self, Self::NoOp)
    }
}
