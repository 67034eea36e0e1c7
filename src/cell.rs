use serde::{Deserialize, Serialize};

/// Full internal state of one board position. The coordinate is the cell's
/// identity and lives in the owning [`Grid`](crate::Grid), not here.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) mine: bool,
    pub(crate) adjacent_mines: u8,
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
    /// Flood-fill marker: set once this zero-count cell's expansion has been
    /// processed, so cyclic grid adjacency never reprocesses it.
    pub(crate) exhausted: bool,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.mine
    }

    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }
}

/// Projection of a [`Cell`] safe to hand to the presentation layer: mine and
/// count information is withheld until the cell is revealed (or, for mines,
/// until the game is over).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub revealed: bool,
    pub flagged: bool,
    pub mine: Option<bool>,
    pub adjacent_mines: Option<u8>,
}
