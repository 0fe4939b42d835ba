use super::*;

/// Uniform rejection sampling: draw a random cell, keep it if it is not a
/// hazard yet, repeat until the requested count is placed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Grid> {
        use rand::prelude::*;

        // also guarantees the loop below has a free cell to find
        config.validate()?;

        let (width, height) = config.size;
        let mut grid = Grid::new(config.size)?;
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut draws: u32 = 0;

        while grid.hazard_count() < config.hazards {
            let coords = (rng.random_range(0..width), rng.random_range(0..height));
            draws = draws.saturating_add(1);

            if !grid.get(coords)?.is_hazard() {
                grid.place_hazard(coords)?;
            }
        }

        log::debug!(
            "Generated {}x{} board with {} hazards from seed {} in {} draws",
            width,
            height,
            config.hazards,
            self.seed,
            draws
        );
        Ok(grid)
    }
}
