use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size board of cells, indexed by `(x, y)`.
///
/// All access goes through [`Grid::get`] and [`Grid::set`], which reject
/// coordinates outside `[0, width) × [0, height)`.
///
/// Deserializing re-places the hazards and rejects boards whose stored counts
/// disagree with them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    cells: Array2<Cell>,
    hazard_count: CellCount,
}

impl Grid {
    /// Empty grid, every cell hidden and safe.
    pub fn new(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidConfiguration);
        }

        Ok(Self {
            cells: Array2::default(size.to_nd_index()),
            hazard_count: 0,
        })
    }

    /// Grid with hazards at exactly the given coordinates, duplicates are placed once.
    pub fn from_hazard_coords(size: Coord2, hazard_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Self::new(size)?;

        for &coords in hazard_coords {
            let coords = grid.validate_coords(coords)?;
            if !grid.get(coords)?.is_hazard() {
                grid.place_hazard(coords)?;
            }
        }

        if grid.hazard_count >= grid.total_cells() {
            return Err(GameError::InvalidConfiguration);
        }

        Ok(grid)
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.cells.dim();
        // every constructor rejects axes wider than `Coord`
        (
            x.try_into().unwrap_or(Coord::MAX),
            y.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn total_cells(&self) -> CellCount {
        let (x, y) = self.size();
        mult(x, y)
    }

    pub fn hazard_count(&self) -> CellCount {
        self.hazard_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.hazard_count)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    /// Applies `transform` to the cell in place and returns whatever it returns.
    pub(crate) fn set<R>(
        &mut self,
        coords: Coord2,
        transform: impl FnOnce(&mut Cell) -> R,
    ) -> Result<R> {
        let coords = self.validate_coords(coords)?;
        Ok(transform(&mut self.cells[coords.to_nd_index()]))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// All cells with their coordinates, column by column.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        let (width, height) = self.size();
        (0..width)
            .flat_map(move |x| (0..height).map(move |y| (x, y)))
            .map(|coords| (coords, self.cells[coords.to_nd_index()]))
    }

    pub fn count_cells(&self, predicate: impl Fn(Cell) -> bool) -> CellCount {
        self.cells
            .iter()
            .filter(|&&cell| predicate(cell))
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    /// Marks `coords` as a hazard and bumps the count of each neighbor.
    ///
    /// Callers must make sure the cell is not a hazard yet.
    pub(crate) fn place_hazard(&mut self, coords: Coord2) -> Result<()> {
        self.set(coords, Cell::place_hazard)?;
        self.hazard_count += 1;

        for neighbor in self.iter_neighbors(coords) {
            self.set(neighbor, Cell::add_adjacent_hazard)?;
        }

        log::trace!("Placed hazard at {:?}", coords);
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawGrid {
    cells: Array2<Cell>,
    hazard_count: CellCount,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GameError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        let (x, y) = raw.cells.dim();
        let size: Coord2 = (
            x.try_into().map_err(|_| GameError::InvalidConfiguration)?,
            y.try_into().map_err(|_| GameError::InvalidConfiguration)?,
        );

        let (x_end, y_end) = size;
        let coords: Vec<Coord2> = (0..x_end)
            .flat_map(|x| (0..y_end).map(move |y| (x, y)))
            .collect();
        let hazards: Vec<Coord2> = coords
            .iter()
            .copied()
            .filter(|&coords| raw.cells[coords.to_nd_index()].is_hazard())
            .collect();

        let mut grid = Self::from_hazard_coords(size, &hazards)?;
        if grid.hazard_count != raw.hazard_count {
            return Err(GameError::InvalidConfiguration);
        }

        for coords in coords {
            let stored = raw.cells[coords.to_nd_index()];
            if stored.adjacent_hazards() != grid.get(coords)?.adjacent_hazards() {
                return Err(GameError::InvalidConfiguration);
            }
            grid.set(coords, |cell| cell.set_state(stored.state()))?;
        }

        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_dimensions() {
        assert_eq!(Grid::new((0, 4)), Err(GameError::InvalidConfiguration));
        assert_eq!(Grid::new((4, 0)), Err(GameError::InvalidConfiguration));
    }

    #[test]
    fn get_rejects_out_of_bounds() {
        let grid = Grid::new((3, 2)).unwrap();

        assert!(grid.get((2, 1)).is_ok());
        assert_eq!(grid.get((3, 0)), Err(GameError::OutOfBounds));
        assert_eq!(grid.get((0, 2)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn set_out_of_bounds_does_not_run_transform() {
        let mut grid = Grid::new((2, 2)).unwrap();
        let before = grid.clone();

        let result = grid.set((5, 5), |cell| cell.set_state(CellState::Revealed));

        assert_eq!(result, Err(GameError::OutOfBounds));
        assert_eq!(grid, before);
    }

    #[test]
    fn hazard_counts_neighbors_not_itself() {
        let grid = Grid::from_hazard_coords((3, 3), &[(1, 1)]).unwrap();

        assert_eq!(grid.hazard_count(), 1);
        assert_eq!(grid.get((1, 1)).unwrap().adjacent_hazards(), 0);
        for (coords, cell) in grid.iter() {
            if coords != (1, 1) {
                assert_eq!(cell.adjacent_hazards(), 1, "at {coords:?}");
            }
        }
    }

    #[test]
    fn adjacent_hazards_accumulate() {
        let grid = Grid::from_hazard_coords((3, 1), &[(0, 0), (2, 0)]).unwrap();

        assert_eq!(grid.get((1, 0)).unwrap().adjacent_hazards(), 2);
        assert_eq!(grid.safe_cell_count(), 1);
    }

    #[test]
    fn duplicate_hazard_coords_are_placed_once() {
        let grid = Grid::from_hazard_coords((3, 3), &[(0, 0), (0, 0)]).unwrap();

        assert_eq!(grid.hazard_count(), 1);
        assert_eq!(grid.get((1, 1)).unwrap().adjacent_hazards(), 1);
    }

    #[test]
    fn from_hazard_coords_rejects_full_board_and_bad_coords() {
        assert_eq!(
            Grid::from_hazard_coords((1, 2), &[(0, 0), (0, 1)]),
            Err(GameError::InvalidConfiguration)
        );
        assert_eq!(
            Grid::from_hazard_coords((2, 2), &[(2, 0)]),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn count_cells_filters() {
        let grid = Grid::from_hazard_coords((4, 4), &[(0, 0), (3, 3)]).unwrap();

        assert_eq!(grid.count_cells(Cell::is_hazard), 2);
        assert_eq!(grid.count_cells(|cell| cell.state().is_unrevealed()), 16);
    }

    fn json_of(grid: &Grid) -> serde_json::Value {
        serde_json::to_value(grid).unwrap()
    }

    #[test]
    fn deserialize_keeps_states_of_consistent_grid() {
        let mut grid = Grid::from_hazard_coords((3, 2), &[(2, 1)]).unwrap();
        grid.reveal((0, 0)).unwrap();
        grid.toggle_flag((2, 1)).unwrap();

        let restored: Grid = serde_json::from_value(json_of(&grid)).unwrap();

        assert_eq!(restored, grid);
    }

    #[test]
    fn deserialize_rejects_tampered_counts() {
        let grid = Grid::from_hazard_coords((2, 2), &[(0, 0)]).unwrap();

        let mut wrong_total = json_of(&grid);
        wrong_total["hazard_count"] = serde_json::json!(0);
        assert!(serde_json::from_value::<Grid>(wrong_total).is_err());

        // cells are stored column by column, (1, 1) is the last one
        let mut wrong_adjacency = json_of(&grid);
        wrong_adjacency["cells"]["data"][3]["adjacent_hazards"] = serde_json::json!(5);
        assert!(serde_json::from_value::<Grid>(wrong_adjacency).is_err());
    }

    #[test]
    fn deserialize_rejects_full_board() {
        let grid = Grid::from_hazard_coords((2, 1), &[(0, 0)]).unwrap();

        let mut full = json_of(&grid);
        full["cells"]["data"][1]["is_hazard"] = serde_json::json!(true);
        full["hazard_count"] = serde_json::json!(2);

        assert!(serde_json::from_value::<Grid>(full).is_err());
    }
}
