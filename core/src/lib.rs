//! Board model and rules for a hazard-grid puzzle.
//!
//! A [`GameSession`] owns a [`Grid`] seeded with hidden hazards. Each turn the
//! front end feeds one [`Action`] through [`GameSession::apply_action`] and
//! draws the result from [`GameSession::cell_view`] or a [`BoardView`].
#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board_view::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use reveal::*;
pub use session::*;
pub use types::*;

mod board_view;
mod cell;
mod error;
mod generator;
mod grid;
mod reveal;
mod session;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub hazards: CellCount,
}

impl GameConfig {
    /// The reference board: 10 by 10 with 20 hazards.
    pub const CLASSIC: Self = Self::new_unchecked((10, 10), 20);

    pub const fn new_unchecked(size: Coord2, hazards: CellCount) -> Self {
        Self { size, hazards }
    }

    pub fn new(size: Coord2, hazards: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, hazards);
        config.validate()?;
        Ok(config)
    }

    /// Rejects empty boards and boards with no safe cell left.
    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 || self.hazards >= self.total_cells() {
            Err(GameError::InvalidConfiguration)
        } else {
            Ok(())
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.hazards)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::CLASSIC
    }
}
