use std::collections::BTreeSet;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::MineGenerator;
use crate::error::{GameError, Result};
use crate::grid::Grid;
use crate::types::{CellCount, Coord2};

/// Uniform rejection sampling over the flattened cell space: draw linear
/// indices at random, discard anything inside the first-click exclusion zone
/// without counting it, and stop once the requested number of distinct cells
/// is chosen. The feasibility check up front keeps the loop finite.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Deterministic stream for reproducible games.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMineGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MineGenerator for RandomMineGenerator {
    fn populate(&mut self, grid: &mut Grid, mines: CellCount, first_click: Coord2) -> Result<()> {
        let total = grid.total_cells();

        let mut excluded: BTreeSet<CellCount> = grid
            .neighbors(first_click)
            .map(|pos| grid.index_of(pos))
            .collect();
        excluded.insert(grid.index_of(first_click));

        if mines > total - excluded.len() as CellCount {
            return Err(GameError::TooManyMines);
        }

        let mut chosen: BTreeSet<CellCount> = BTreeSet::new();
        while (chosen.len() as CellCount) < mines {
            let index = self.rng.random_range(0..total);
            if excluded.contains(&index) {
                continue;
            }
            chosen.insert(index);
        }

        for &index in &chosen {
            let coords = grid.coord_of(index);
            grid.place_mine(coords);
        }
        log::debug!("placed {mines} mines, first click at {first_click:?}");
        Ok(())
    }
}
