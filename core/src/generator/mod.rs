use alloc::vec::Vec;

use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Grid>;
}

/// Random board for `config`, reproducible from `seed`.
pub fn generate(config: GameConfig, seed: u64) -> Result<Grid> {
    RandomBoardGenerator::new(seed).generate(config)
}

/// Places hazards at a known set of coordinates, for scripted boards and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedBoardGenerator {
    hazards: Vec<Coord2>,
}

impl FixedBoardGenerator {
    pub fn new(hazards: impl Into<Vec<Coord2>>) -> Self {
        Self {
            hazards: hazards.into(),
        }
    }
}

impl BoardGenerator for FixedBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Grid> {
        config.validate()?;
        let grid = Grid::from_hazard_coords(config.size, &self.hazards)?;

        if grid.hazard_count() != config.hazards {
            log::debug!(
                "Fixed layout has {} distinct hazards, config asks for {}",
                grid.hazard_count(),
                config.hazards
            );
            return Err(GameError::InvalidConfiguration);
        }

        Ok(grid)
    }
}
