use alloc::vec;
use core::ops::BitOr;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of revealing a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    /// `safe_cells` newly revealed, the target included
    Revealed { safe_cells: CellCount },
    Hazard,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn revealed_safe_cells(self) -> CellCount {
        match self {
            Self::Revealed { safe_cells } => safe_cells,
            Self::NoChange | Self::Hazard => 0,
        }
    }
}

/// Used to merge outcomes of several reveals
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            // hazard has priority
            (Hazard, _) | (_, Hazard) => Hazard,
            (Revealed { safe_cells: a }, Revealed { safe_cells: b }) => Revealed {
                safe_cells: a.saturating_add(b),
            },
            (revealed @ Revealed { .. }, NoChange) | (NoChange, revealed @ Revealed { .. }) => {
                revealed
            }
            (NoChange, NoChange) => NoChange,
        }
    }
}

impl Grid {
    /// Reveals a hidden cell; a safe cell with no hazard around it also opens
    /// its whole zero region and that region's border.
    ///
    /// Hazards are revealed like any other cell and reported as
    /// [`RevealOutcome::Hazard`], ending the game is up to the caller.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let cell = self.get(coords)?;
        if cell.state() != CellState::Hidden {
            return Ok(RevealOutcome::NoChange);
        }

        self.set(coords, |cell| cell.set_state(CellState::Revealed))?;
        if cell.is_hazard() {
            log::debug!("Revealed hazard at {:?}", coords);
            return Ok(RevealOutcome::Hazard);
        }

        let mut safe_cells: CellCount = 1;
        log::debug!(
            "Revealed cell at {:?}, adjacent hazards: {}",
            coords,
            cell.adjacent_hazards()
        );

        if cell.adjacent_hazards() == 0 {
            // every entry turned Hidden -> Revealed before being pushed, so the
            // stack never holds more than the cell count
            let mut to_visit = vec![coords];

            while let Some(visit_coords) = to_visit.pop() {
                for neighbor in self.iter_neighbors(visit_coords) {
                    let next = self.get(neighbor)?;
                    if next.state() != CellState::Hidden {
                        continue;
                    }

                    self.set(neighbor, |cell| cell.set_state(CellState::Revealed))?;
                    if !next.is_hazard() {
                        safe_cells += 1;
                    }
                    log::trace!(
                        "Flood revealed cell at {:?}, adjacent hazards: {}",
                        neighbor,
                        next.adjacent_hazards()
                    );

                    if next.is_empty_safe() {
                        to_visit.push(neighbor);
                    }
                }
            }

            log::trace!("Flood fill from {:?} revealed {} cells", coords, safe_cells);
        }

        Ok(RevealOutcome::Revealed { safe_cells })
    }

    /// Hides a revealed cell again. Debugging aid, not part of normal play.
    pub fn unreveal(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.set(coords, |cell| match cell.state() {
            CellState::Revealed => {
                cell.set_state(CellState::Hidden);
                MarkOutcome::Changed
            }
            CellState::Hidden | CellState::Flagged => MarkOutcome::NoChange,
        })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use CellState::*;

        self.set(coords, |cell| match cell.state() {
            Hidden => {
                cell.set_state(Flagged);
                MarkOutcome::Changed
            }
            Flagged => {
                cell.set_state(Hidden);
                MarkOutcome::Changed
            }
            Revealed => MarkOutcome::NoChange,
        })
    }
}
