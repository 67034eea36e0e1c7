use std::collections::{BTreeSet, VecDeque};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::RevealOutcome;
use crate::cell::Cell;
use crate::types::{CellCount, Coord, Coord2, NeighborIter, ToNdIndex, coord_of, index_of};

/// Owns the cell array and performs every direct board mutation, including
/// the flood-fill reveal. Placement policy and win/loss tracking live in
/// [`GameSession`](crate::GameSession).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
}

impl Grid {
    pub(crate) fn new((rows, cols): Coord2) -> Self {
        Self {
            cells: Array2::default((rows as usize, cols as usize)),
            revealed_count: 0,
            flagged_count: 0,
        }
    }

    /// Board shape as `(rows, cols)`.
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().1
    }

    pub fn height(&self) -> Coord {
        self.size().0
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn in_bounds(&self, (row, col): Coord2) -> bool {
        let (rows, cols) = self.size();
        row < rows && col < cols
    }

    /// The up-to-8 in-bounds coordinates surrounding `coords`.
    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn cell(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Row-major index into the flattened cell space, for uniform sampling.
    pub(crate) fn index_of(&self, coords: Coord2) -> CellCount {
        index_of(coords, self.width())
    }

    pub(crate) fn coord_of(&self, index: CellCount) -> Coord2 {
        coord_of(index, self.width())
    }

    /// Marks a mine and bumps the adjacency count of every in-bounds
    /// neighbor. Mine cells accumulate counts too; they are just never
    /// displayed.
    pub(crate) fn place_mine(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()].mine = true;
        for pos in self.neighbors(coords) {
            self.cells[pos.to_nd_index()].adjacent_mines += 1;
        }
    }

    pub(crate) fn set_flag(&mut self, coords: Coord2, flagged: bool) {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.flagged == flagged {
            return;
        }
        cell.flagged = flagged;
        if flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
    }

    /// Opens one cell. Revealed and flagged cells are left alone; a mine is
    /// terminal; a zero-count cell triggers the flood fill.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self.cell(coords);
        if cell.revealed || cell.flagged {
            return RevealOutcome::NoOp;
        }
        if cell.mine {
            self.reveal_cell(coords);
            return RevealOutcome::HitMine;
        }

        self.reveal_cell(coords);
        let mut opened = BTreeSet::from([coords]);
        if cell.adjacent_mines == 0 {
            self.flood_fill(coords, &mut opened);
        }
        RevealOutcome::Opened(opened)
    }

    /// Iterative zero-region expansion over an explicit work list. Every
    /// entry in the list is a zero-count cell; its `exhausted` marker is set
    /// before the neighbors are visited, so no coordinate is expanded twice.
    /// A zero cell has no mine neighbors, which keeps mines out of reach,
    /// but flagged cells in the region are revealed and their flags cleared.
    fn flood_fill(&mut self, origin: Coord2, opened: &mut BTreeSet<Coord2>) {
        let mut work = VecDeque::from([origin]);
        while let Some(center) = work.pop_front() {
            if self.cell(center).exhausted {
                continue;
            }
            self.cells[center.to_nd_index()].exhausted = true;

            for pos in self.neighbors(center) {
                let neighbor = self.cell(pos);
                if neighbor.revealed || neighbor.mine {
                    continue;
                }
                self.reveal_cell(pos);
                opened.insert(pos);
                if neighbor.adjacent_mines == 0 {
                    work.push_back(pos);
                }
            }
        }
    }

    fn reveal_cell(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.revealed = true;
        self.revealed_count += 1;
        if cell.flagged {
            cell.flagged = false;
            self.flagged_count -= 1;
        }
    }
}
