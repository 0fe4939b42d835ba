use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

impl CellState {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

/// One grid position. Hazard placement and the adjacency count are fixed once
/// the board is generated; only the state changes during play.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    is_hazard: bool,
    adjacent_hazards: u8,
    state: CellState,
}

impl Cell {
    pub const fn is_hazard(self) -> bool {
        self.is_hazard
    }

    pub const fn adjacent_hazards(self) -> u8 {
        self.adjacent_hazards
    }

    pub const fn state(self) -> CellState {
        self.state
    }

    /// Non-hazard cell with no hazard around it, the trigger for region expansion.
    pub const fn is_empty_safe(self) -> bool {
        !self.is_hazard && self.adjacent_hazards == 0
    }

    pub(crate) fn place_hazard(&mut self) {
        self.is_hazard = true;
    }

    pub(crate) fn add_adjacent_hazard(&mut self) {
        self.adjacent_hazards += 1;
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
}

/// Read-only snapshot of a cell for rendering.
///
/// `adjacent_hazards` is only present on revealed cells and `is_hazard` only on
/// revealed cells or once the game has ended, so a renderer cannot peek.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub state: CellState,
    pub adjacent_hazards: Option<u8>,
    pub is_hazard: Option<bool>,
}

impl CellView {
    pub(crate) fn new(cell: Cell, game_over: bool) -> Self {
        let revealed = matches!(cell.state, CellState::Revealed);
        Self {
            state: cell.state,
            adjacent_hazards: revealed.then_some(cell.adjacent_hazards),
            is_hazard: (revealed || game_over).then_some(cell.is_hazard),
        }
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::new(Cell::default(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hazard() -> Cell {
        let mut cell = Cell::default();
        cell.place_hazard();
        cell
    }

    #[test]
    fn default_cell_is_hidden_and_safe() {
        let cell = Cell::default();

        assert_eq!(cell.state(), CellState::Hidden);
        assert!(!cell.is_hazard());
        assert_eq!(cell.adjacent_hazards(), 0);
        assert!(cell.is_empty_safe());
    }

    #[test]
    fn view_of_hidden_hazard_hides_identity() {
        let view = CellView::new(hazard(), false);

        assert_eq!(view.state, CellState::Hidden);
        assert_eq!(view.adjacent_hazards, None);
        assert_eq!(view.is_hazard, None);
    }

    #[test]
    fn view_of_flagged_hazard_hides_identity() {
        let mut cell = hazard();
        cell.set_state(CellState::Flagged);

        assert_eq!(CellView::new(cell, false).is_hazard, None);
    }

    #[test]
    fn view_after_game_over_exposes_hazards() {
        let view = CellView::new(hazard(), true);

        assert_eq!(view.is_hazard, Some(true));
        assert_eq!(view.adjacent_hazards, None);
    }

    #[test]
    fn view_of_revealed_cell_exposes_count() {
        let mut cell = Cell::default();
        cell.add_adjacent_hazard();
        cell.add_adjacent_hazard();
        cell.set_state(CellState::Revealed);

        let view = CellView::new(cell, false);

        assert_eq!(view.adjacent_hazards, Some(2));
        assert_eq!(view.is_hazard, Some(false));
    }
}
