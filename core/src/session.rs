use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Reveal,
    Flag,
    /// Hides a revealed cell again, kept as a debugging primitive.
    Unreveal,
}

/// What the front end should do after an action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Continue,
    Lost,
    Won,
}

impl Outcome {
    pub const fn is_final(self) -> bool {
        !matches!(self, Self::Continue)
    }
}

/// One game from generation until it is won or lost.
///
/// Deserializing rebuilds the counters and state from the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSession")]
pub struct GameSession {
    grid: Grid,
    revealed_safe_cells: CellCount,
    flagged_cells: CellCount,
    state: SessionState,
    triggered_hazard: Option<Coord2>,
}

impl GameSession {
    /// Starts a game on a prepared grid, counting any cells it already has revealed or flagged.
    pub fn new(grid: Grid) -> Self {
        let revealed_safe_cells =
            grid.count_cells(|cell| cell.state() == CellState::Revealed && !cell.is_hazard());
        let flagged_cells = grid.count_cells(|cell| cell.state() == CellState::Flagged);
        log::debug!(
            "New session on {:?} board with {} hazards",
            grid.size(),
            grid.hazard_count()
        );

        let mut session = Self {
            grid,
            revealed_safe_cells,
            flagged_cells,
            state: SessionState::InProgress,
            triggered_hazard: None,
        };
        let revealed_hazard = session
            .grid
            .iter()
            .find(|(_, cell)| cell.state() == CellState::Revealed && cell.is_hazard())
            .map(|(coords, _)| coords);
        if let Some(coords) = revealed_hazard {
            session.triggered_hazard = Some(coords);
            session.state = SessionState::Lost;
        } else if session.revealed_safe_cells == session.grid.safe_cell_count() {
            session.state = SessionState::Won;
        }
        session
    }

    pub fn generate(config: GameConfig, seed: u64) -> Result<Self> {
        Ok(Self::new(generate(config, seed)?))
    }

    pub fn with_generator(generator: impl BoardGenerator, config: GameConfig) -> Result<Self> {
        Ok(Self::new(generator.generate(config)?))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.hazard_count())
    }

    pub fn hazard_count(&self) -> CellCount {
        self.grid.hazard_count()
    }

    pub fn revealed_safe_cells(&self) -> CellCount {
        self.revealed_safe_cells
    }

    pub fn flagged_cells(&self) -> CellCount {
        self.flagged_cells
    }

    /// Hazards minus flags, negative when the player over-flags.
    pub fn hazards_left(&self) -> isize {
        (self.hazard_count() as isize) - (self.flagged_cells as isize)
    }

    /// The hazard that ended the game, if it was lost.
    pub fn triggered_hazard(&self) -> Option<Coord2> {
        self.triggered_hazard
    }

    /// Rendering snapshot of one cell; hazard identity of unrevealed cells is
    /// only exposed once the game is over.
    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        Ok(CellView::new(self.grid.get(coords)?, self.is_finished()))
    }

    /// Applies one player action. Nothing changes when an error is returned.
    pub fn apply_action(&mut self, action: Action, coords: Coord2) -> Result<Outcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_in_progress()?;

        let outcome = match action {
            Action::Reveal => self.reveal(coords)?,
            Action::Flag => {
                let cell = self.grid.get(coords)?;
                if self.grid.toggle_flag(coords)?.has_update() {
                    match cell.state() {
                        CellState::Hidden => self.flagged_cells += 1,
                        _ => self.flagged_cells -= 1,
                    }
                }
                Outcome::Continue
            }
            Action::Unreveal => {
                let cell = self.grid.get(coords)?;
                if self.grid.unreveal(coords)?.has_update() && !cell.is_hazard() {
                    self.revealed_safe_cells -= 1;
                }
                Outcome::Continue
            }
        };

        log::debug!("{:?} at {:?} -> {:?}", action, coords, outcome);
        Ok(outcome)
    }

    fn reveal(&mut self, coords: Coord2) -> Result<Outcome> {
        // a flag does not protect a hazard
        let cell = self.grid.get(coords)?;
        if cell.is_hazard() && cell.state() == CellState::Flagged {
            self.grid
                .set(coords, |cell| cell.set_state(CellState::Revealed))?;
            self.flagged_cells -= 1;
            return Ok(self.trigger_hazard(coords));
        }

        match self.grid.reveal(coords)? {
            RevealOutcome::NoChange => Ok(Outcome::Continue),
            RevealOutcome::Hazard => Ok(self.trigger_hazard(coords)),
            RevealOutcome::Revealed { safe_cells } => {
                self.revealed_safe_cells += safe_cells;
                if self.revealed_safe_cells == self.grid.safe_cell_count() {
                    self.end_game(true);
                    Ok(Outcome::Won)
                } else {
                    Ok(Outcome::Continue)
                }
            }
        }
    }

    fn trigger_hazard(&mut self, coords: Coord2) -> Outcome {
        self.triggered_hazard = Some(coords);
        self.end_game(false);
        Outcome::Lost
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            SessionState::Won
        } else {
            SessionState::Lost
        };
        log::debug!(
            "Game ended {:?} with {} of {} safe cells revealed",
            self.state,
            self.revealed_safe_cells,
            self.grid.safe_cell_count()
        );
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::SessionTerminated)
        } else {
            Ok(())
        }
    }
}

/// Wire shape of [`GameSession`]; counters and state are derived again from the grid.
#[derive(Deserialize)]
struct RawSession {
    grid: Grid,
}

impl From<RawSession> for GameSession {
    fn from(raw: RawSession) -> Self {
        Self::new(raw.grid)
    }
}
