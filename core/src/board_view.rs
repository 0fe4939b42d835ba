use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Whole-board snapshot for a renderer, built cell by cell from
/// [`GameSession::cell_view`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub hazard_count: CellCount,
    pub hazards_left: isize,
    pub state: SessionState,
    pub cells: Array2<CellView>,
}

impl BoardView {
    pub fn from_session(session: &GameSession) -> Result<Self> {
        let size = session.size();
        let mut cells = Array2::default(size.to_nd_index());

        let (x_end, y_end) = size;
        for x in 0..x_end {
            for y in 0..y_end {
                let coords = (x, y);
                cells[coords.to_nd_index()] = session.cell_view(coords)?;
            }
        }

        Ok(Self {
            size,
            hazard_count: session.hazard_count(),
            hazards_left: session.hazards_left(),
            state: session.state(),
            cells,
        })
    }

    pub fn cell(&self, coords: Coord2) -> Result<CellView> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(self.cells[coords.to_nd_index()])
        } else {
            Err(GameError::OutOfBounds)
        }
    }
}
