use serde::{Deserialize, Serialize};

use crate::cell::CellView;
use crate::error::{GameError, Result};
use crate::generator::{MineGenerator, RandomMineGenerator};
use crate::grid::Grid;
use crate::types::{CellCount, Coord2};
use crate::{GameConfig, RevealOutcome};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Drives one game: defers mine placement to the first reveal, applies the
/// flag budget, tracks the win/loss status the presentation layer renders,
/// and resets everything on restart.
#[derive(Clone, Debug)]
pub struct GameSession<G = RandomMineGenerator> {
    config: GameConfig,
    grid: Grid,
    generator: G,
    first_move_taken: bool,
    status: GameStatus,
}

impl GameSession<RandomMineGenerator> {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_generator(config, RandomMineGenerator::new())
    }

    pub fn from_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomMineGenerator::from_seed(seed))
    }
}

impl<G: MineGenerator> GameSession<G> {
    /// Validates the configuration and allocates an empty grid; mines are
    /// only placed once the first reveal arrives.
    pub fn with_generator(config: GameConfig, generator: G) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            grid: Grid::new(config.size()),
            config,
            generator,
            first_move_taken: false,
            status: GameStatus::InProgress,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mines_remaining(&self) -> CellCount {
        self.config.mines - self.grid.flagged_count()
    }

    /// Opens a cell, placing the mines first if this is the opening move of
    /// the game. Terminal sessions ignore the request.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.validate_coords(coords)?;
        if self.status.is_finished() {
            return Ok(RevealOutcome::NoOp);
        }

        if !self.first_move_taken {
            self.generator
                .populate(&mut self.grid, self.config.mines, coords)?;
            self.first_move_taken = true;
        }

        let outcome = self.grid.reveal(coords);
        match &outcome {
            RevealOutcome::HitMine => self.status = GameStatus::Lost,
            RevealOutcome::Opened(_) => {
                if self.grid.revealed_count() == self.config.safe_cells() {
                    self.status = GameStatus::Won;
                }
            }
            RevealOutcome::NoOp => {}
        }
        Ok(outcome)
    }

    /// Toggles a flag and returns the new flag state. Turning a flag ON
    /// requires an unspent flag budget; turning it OFF always works.
    /// Revealed cells and terminal sessions are left untouched.
    pub fn flag_toggle(&mut self, coords: Coord2) -> Result<bool> {
        self.validate_coords(coords)?;
        let cell = self.grid.cell(coords);
        if self.status.is_finished() || cell.is_revealed() {
            return Ok(cell.is_flagged());
        }

        if cell.is_flagged() {
            self.grid.set_flag(coords, false);
            Ok(false)
        } else if self.mines_remaining() > 0 {
            self.grid.set_flag(coords, true);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Back to the initial lifecycle state: fresh grid, no mines placed yet.
    /// The generator keeps its RNG stream, so consecutive games differ.
    pub fn restart(&mut self) {
        self.grid = Grid::new(self.config.size());
        self.first_move_taken = false;
        self.status = GameStatus::InProgress;
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        self.validate_coords(coords)?;
        let cell = self.grid.cell(coords);
        let game_over = self.status.is_finished();
        Ok(CellView {
            revealed: cell.is_revealed(),
            flagged: cell.is_flagged(),
            mine: (cell.is_revealed() || game_over).then(|| cell.is_mine()),
            adjacent_mines: cell.is_revealed().then(|| cell.adjacent_mines()),
        })
    }

    fn validate_coords(&self, coords: Coord2) -> Result<()> {
        if self.grid.in_bounds(coords) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::FixedMineGenerator;

    fn session(size: (u8, u8), mines: &[Coord2]) -> GameSession<FixedMineGenerator> {
        let config = GameConfig::new(size.1, size.0, mines.len() as CellCount).unwrap();
        GameSession::with_generator(config, FixedMineGenerator::new(mines)).unwrap()
    }

    #[test]
    fn first_click_flood_fill_wins_when_region_covers_all_safe_cells() {
        // 5x5 board, single mine pinned at (4,4): the zero region from (0,0)
        // reaches every safe cell, so the opening click clears the board.
        let mut game = session((5, 5), &[(4, 4)]);

        let outcome = game.reveal((0, 0)).unwrap();

        let RevealOutcome::Opened(opened) = outcome else {
            panic!("expected Opened, got {outcome:?}");
        };
        assert_eq!(opened.len(), 24);
        assert_eq!(game.status(), GameStatus::Won);
        assert!(!game.grid().cell((4, 4)).is_revealed());
    }

    #[test]
    fn revealing_a_mine_loses_and_freezes_the_session() {
        let mut game = session((5, 5), &[(0, 1)]);

        game.reveal((0, 0)).unwrap();
        assert_eq!(game.reveal((0, 1)).unwrap(), RevealOutcome::HitMine);
        assert_eq!(game.status(), GameStatus::Lost);

        // Terminal session ignores further requests.
        assert_eq!(game.reveal((3, 3)).unwrap(), RevealOutcome::NoOp);
        assert!(!game.flag_toggle((3, 3)).unwrap());
        assert!(!game.grid().cell((3, 3)).is_revealed());
    }

    #[test]
    fn mines_are_only_placed_on_the_first_reveal() {
        let config = GameConfig::new(9, 9, 10).unwrap();
        let mut game = GameSession::from_seed(config, 42).unwrap();

        // Flagging is allowed before the first reveal and places no mines.
        assert!(game.flag_toggle((0, 0)).unwrap());
        assert_eq!(game.grid().cell((8, 8)).adjacent_mines(), 0);

        game.reveal((4, 4)).unwrap();
        assert!(!game.grid().cell((4, 4)).is_mine());
        for pos in game.grid().neighbors((4, 4)) {
            assert!(!game.grid().cell(pos).is_mine());
        }
    }

    #[test]
    fn reveal_of_revealed_cell_is_a_noop() {
        let mut game = session((5, 5), &[(0, 1)]);

        game.reveal((0, 0)).unwrap();
        let before = game.grid().clone();

        assert_eq!(game.reveal((0, 0)).unwrap(), RevealOutcome::NoOp);
        assert_eq!(game.grid(), &before);
    }

    #[test]
    fn flag_shields_a_cell_from_direct_reveal() {
        let mut game = session((5, 5), &[(0, 1)]);

        game.reveal((0, 0)).unwrap();
        assert!(game.flag_toggle((2, 2)).unwrap());

        assert_eq!(game.reveal((2, 2)).unwrap(), RevealOutcome::NoOp);
        assert!(!game.grid().cell((2, 2)).is_revealed());
    }

    #[test]
    fn flood_fill_clears_flags_and_restores_the_budget() {
        let mut game = session((5, 5), &[(4, 4)]);

        assert!(game.flag_toggle((1, 1)).unwrap());
        assert_eq!(game.mines_remaining(), 0);

        game.reveal((0, 0)).unwrap();

        assert_eq!(game.mines_remaining(), 1);
        let view = game.cell_view((1, 1)).unwrap();
        assert!(view.revealed);
        assert!(!view.flagged);
    }

    #[test]
    fn flag_budget_never_goes_negative() {
        let mut game = session((5, 5), &[(4, 4)]);

        assert!(game.flag_toggle((0, 0)).unwrap());
        assert_eq!(game.mines_remaining(), 0);

        // Budget exhausted: toggling ON elsewhere is refused.
        assert!(!game.flag_toggle((0, 1)).unwrap());
        assert!(!game.grid().cell((0, 1)).is_flagged());

        // Toggling OFF always works.
        assert!(!game.flag_toggle((0, 0)).unwrap());
        assert_eq!(game.mines_remaining(), 1);
    }

    #[test]
    fn flag_toggle_on_revealed_cell_is_refused() {
        let mut game = session((5, 5), &[(0, 1)]);

        game.reveal((0, 0)).unwrap();
        assert!(!game.flag_toggle((0, 0)).unwrap());
        assert!(!game.grid().cell((0, 0)).is_flagged());
    }

    #[test]
    fn cell_view_withholds_hidden_information() {
        let mut game = session((5, 5), &[(0, 1)]);

        let hidden = game.cell_view((0, 1)).unwrap();
        assert_eq!(hidden.mine, None);
        assert_eq!(hidden.adjacent_mines, None);

        game.reveal((0, 0)).unwrap();
        let revealed = game.cell_view((0, 0)).unwrap();
        assert_eq!(revealed.mine, Some(false));
        assert_eq!(revealed.adjacent_mines, Some(1));

        // Game over uncovers mine locations, but not unrevealed counts.
        game.reveal((0, 1)).unwrap();
        let mine = game.cell_view((0, 1)).unwrap();
        assert_eq!(mine.mine, Some(true));
        let other = game.cell_view((3, 3)).unwrap();
        assert!(!other.revealed);
        assert_eq!(other.mine, Some(false));
        assert_eq!(other.adjacent_mines, None);
    }

    #[test]
    fn restart_is_indistinguishable_from_a_fresh_session() {
        let mut played = session((5, 5), &[(0, 1)]);
        played.reveal((2, 2)).unwrap();
        played.flag_toggle((0, 1)).unwrap();
        played.reveal((0, 1)).unwrap();

        played.restart();
        let fresh = session((5, 5), &[(0, 1)]);

        assert_eq!(played.status(), fresh.status());
        assert_eq!(played.mines_remaining(), fresh.mines_remaining());
        for row in 0..5 {
            for col in 0..5 {
                assert_eq!(
                    played.cell_view((row, col)).unwrap(),
                    fresh.cell_view((row, col)).unwrap()
                );
            }
        }
    }

    #[test]
    fn restart_places_a_new_board_on_the_next_first_reveal() {
        let config = GameConfig::new(9, 9, 10).unwrap();
        let mut game = GameSession::from_seed(config, 3).unwrap();

        game.reveal((4, 4)).unwrap();
        game.restart();
        assert_eq!(game.grid().revealed_count(), 0);

        game.reveal((4, 4)).unwrap();
        assert!(!game.grid().cell((4, 4)).is_mine());
    }

    #[test]
    fn out_of_bounds_requests_fail_without_mutation() {
        let mut game = session((5, 5), &[(4, 4)]);

        assert_eq!(game.reveal((5, 0)), Err(GameError::OutOfBounds));
        assert_eq!(game.flag_toggle((0, 5)), Err(GameError::OutOfBounds));
        assert_eq!(game.cell_view((9, 9)), Err(GameError::OutOfBounds));
        assert_eq!(game.grid().revealed_count(), 0);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn won_session_ignores_further_reveals() {
        let mut game = session((5, 5), &[(4, 4)]);

        game.reveal((0, 0)).unwrap();
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.reveal((4, 4)).unwrap(), RevealOutcome::NoOp);
        assert!(!game.grid().cell((4, 4)).is_revealed());
    }
}
