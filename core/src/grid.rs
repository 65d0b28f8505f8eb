use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular board variant.
///
/// Cells are stored row-major: `(x, y)` lives at linear index `y * width + x`. The underlying [`Board`]
/// is still reachable through [`PuzzleBoard`], so bulk replacement can leave the cell count out of step
/// with the declared size. Coordinate accessors check against the real cell count, and
/// [`validate`](Self::validate) reports the mismatch.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "E: ElementData + Serialize",
    deserialize = "E: ElementData + Deserialize<'de>"
))]
pub struct GridBoard<E, R: ?Sized = dyn CaseRule> {
    size: Coord2,
    board: Board<E, R>,
}

impl<E: ElementData, R: ?Sized> GridBoard<E, R> {
    pub fn new(config: BoardConfig) -> Self
    where
        E: Default,
    {
        let cells = (0..config.total_cells()).map(|_| E::default()).collect();
        let mut board = Board::from_cells(cells);
        board.set_modifiable(config.modifiable);
        Self {
            size: config.size,
            board,
        }
    }

    pub fn from_cells(size: Coord2, cells: Vec<E>) -> Result<Self> {
        let expected = usize::from(mult(size.0, size.1));
        if cells.len() != expected {
            log::debug!(
                "Grid cell count mismatch, size: {:?}, expected: {}, actual: {}",
                size,
                expected,
                cells.len()
            );
            return Err(BoardError::InvalidBoardShape);
        }

        Ok(Self {
            size,
            board: Board::from_cells(cells),
        })
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn width(&self) -> Coord {
        self.size.0
    }

    pub fn height(&self) -> Coord {
        self.size.1
    }

    pub fn config(&self) -> BoardConfig {
        BoardConfig::new_unchecked(self.size, self.board.is_modifiable())
    }

    pub fn validate(&self) -> Result<()> {
        if self.board.element_count() == usize::from(mult(self.size.0, self.size.1)) {
            Ok(())
        } else {
            Err(BoardError::InvalidBoardShape)
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size;
        if coords.0 < size.0 && coords.1 < size.1 && self.linear(coords) < self.board.element_count() {
            Ok(coords)
        } else {
            Err(BoardError::InvalidCoords)
        }
    }

    pub fn index_of(&self, coords: Coord2) -> Result<usize> {
        let coords = self.validate_coords(coords)?;
        Ok(self.linear(coords))
    }

    pub fn coords_of(&self, index: usize) -> Result<Coord2> {
        let len = self.board.element_count();
        let width = usize::from(self.size.0);
        let out_of_range = BoardError::IndexOutOfRange { index, len };
        if index >= len || width == 0 {
            return Err(out_of_range);
        }

        let x = Coord::try_from(index % width).map_err(|_| out_of_range)?;
        let y = Coord::try_from(index / width).map_err(|_| out_of_range)?;
        if y >= self.size.1 {
            return Err(out_of_range);
        }
        Ok((x, y))
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&E> {
        let index = self.index_of(coords)?;
        self.board.element(index)
    }

    pub fn cell_at_mut(&mut self, coords: Coord2) -> Result<&mut E> {
        let index = self.index_of(coords)?;
        self.board.element_mut(index)
    }

    /// Replaces the cell at `coords` without recording it as modified.
    pub fn set_cell_at(&mut self, coords: Coord2, element: E) -> Result<()> {
        *self.cell_at_mut(coords)? = element;
        Ok(())
    }

    /// Neighbors of `coords` that fall inside the grid. `coords` itself must be on the grid.
    pub fn iter_neighbors(&self, coords: Coord2, adjacency: Adjacency) -> Result<NeighborIter> {
        let coords = self.validate_coords(coords)?;
        Ok(NeighborIter::new(coords, self.size, adjacency))
    }

    pub fn iter_neighbor_cells(
        &self,
        coords: Coord2,
        adjacency: Adjacency,
    ) -> Result<impl Iterator<Item = (Coord2, &E)> + '_> {
        Ok(self
            .iter_neighbors(coords, adjacency)?
            .filter_map(|pos| self.cell_at(pos).ok().map(|cell| (pos, cell))))
    }

    /// Two-dimensional view of the cells with shape `(height, width)`, indexed `[y, x]`.
    pub fn as_array(&self) -> Result<ArrayView2<'_, E>> {
        let shape = (usize::from(self.size.1), usize::from(self.size.0));
        ArrayView2::from_shape(shape, self.board.elements())
            .map_err(|_| BoardError::InvalidBoardShape)
    }

    fn linear(&self, (x, y): Coord2) -> usize {
        usize::from(y) * usize::from(self.size.0) + usize::from(x)
    }

    /// Like [`linear`](Self::linear), but panics instead of wrapping into the next row.
    fn linear_or_panic(&self, coords: Coord2) -> usize {
        let (width, height) = self.size;
        assert!(
            coords.0 < width && coords.1 < height,
            "coordinates {:?} outside {}x{} grid",
            coords,
            width,
            height
        );
        self.linear(coords)
    }
}

impl<E: ElementData, R: ?Sized> Clone for GridBoard<E, R> {
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            board: self.board.clone(),
        }
    }
}

impl<E: ElementData, R: ?Sized> PartialEq for GridBoard<E, R> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.board == other.board
    }
}

impl<E: ElementData, R: ?Sized> Eq for GridBoard<E, R> {}

impl<E: ElementData, R: ?Sized + CaseRule> PuzzleBoard for GridBoard<E, R> {
    type Element = E;
    type Rule = R;

    fn board(&self) -> &Board<E, R> {
        &self.board
    }

    fn board_mut(&mut self) -> &mut Board<E, R> {
        &mut self.board
    }

    fn copy(&self) -> Self {
        log::trace!("Copying {}x{} grid board", self.size.0, self.size.1);
        self.clone()
    }
}

impl<E: ElementData, R: ?Sized> Index<Coord2> for GridBoard<E, R> {
    type Output = E;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.board[self.linear_or_panic(coords)]
    }
}

impl<E: ElementData, R: ?Sized> IndexMut<Coord2> for GridBoard<E, R> {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        let index = self.linear_or_panic(coords);
        &mut self.board[index]
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec;

    use super::*;

    #[derive(Debug)]
    struct LatinRule;

    impl CaseRule for LatinRule {
        fn name(&self) -> &str {
            "latin"
        }
    }

    fn grid_3x2() -> GridBoard<u8> {
        GridBoard::from_cells((3, 2), vec![0, 1, 2, 3, 4, 5]).unwrap()
    }

    #[test]
    fn new_fills_with_default_and_applies_config() {
        let grid: GridBoard<u8> = GridBoard::new(BoardConfig::new((4, 3), false));

        assert_eq!(grid.element_count(), 12);
        assert_eq!(grid.cell_at((3, 2)), Ok(&0));
        assert!(!grid.is_modifiable());
        assert_eq!(grid.config(), BoardConfig::new((4, 3), false));
    }

    #[test]
    fn from_cells_rejects_wrong_length() {
        let result: Result<GridBoard<u8>> = GridBoard::from_cells((3, 3), vec![0; 8]);

        assert_eq!(result.unwrap_err(), BoardError::InvalidBoardShape);
    }

    #[test]
    fn cells_are_row_major() {
        let grid = grid_3x2();

        assert_eq!(grid.cell_at((2, 0)), Ok(&2));
        assert_eq!(grid.cell_at((0, 1)), Ok(&3));
        assert_eq!(grid.index_of((1, 1)), Ok(4));
        assert_eq!(grid.coords_of(4), Ok((1, 1)));
        assert_eq!(grid[(2, 1)], 5);
    }

    #[test]
    fn coordinates_outside_grid_are_rejected() {
        let mut grid = grid_3x2();

        assert_eq!(grid.cell_at((3, 0)), Err(BoardError::InvalidCoords));
        assert_eq!(grid.set_cell_at((0, 2), 9), Err(BoardError::InvalidCoords));
        assert_eq!(
            grid.coords_of(6),
            Err(BoardError::IndexOutOfRange { index: 6, len: 6 })
        );
    }

    #[test]
    fn set_cell_at_round_trips_without_marking() {
        let mut grid = grid_3x2();

        grid.set_cell_at((1, 0), 7).unwrap();

        assert_eq!(grid.cell_at((1, 0)), Ok(&7));
        assert_eq!(grid.element(1), Ok(&7));
        assert!(!grid.is_modified());
    }

    #[test]
    fn corner_neighbors() {
        let grid = grid_3x2();

        assert_eq!(grid.iter_neighbors((0, 0), Adjacency::Orthogonal).unwrap().count(), 2);
        assert_eq!(grid.iter_neighbors((0, 0), Adjacency::All).unwrap().count(), 3);

        let cells: Vec<_> = grid
            .iter_neighbor_cells((2, 1), Adjacency::Orthogonal)
            .unwrap()
            .map(|(_, &cell)| cell)
            .collect();
        assert_eq!(cells, [2, 4]);
    }

    #[test]
    fn neighbors_of_off_grid_center_are_rejected() {
        let grid = grid_3x2();

        assert_eq!(
            grid.iter_neighbors((3, 1), Adjacency::All).unwrap_err(),
            BoardError::InvalidCoords
        );
        assert!(grid.iter_neighbor_cells((0, 2), Adjacency::Orthogonal).is_err());
    }

    #[test]
    #[should_panic(expected = "outside 3x2 grid")]
    fn index_past_width_panics_instead_of_wrapping() {
        let grid = grid_3x2();

        let _cell = grid[(3, 0)];
    }

    #[test]
    #[should_panic(expected = "outside 3x2 grid")]
    fn index_mut_past_width_panics_instead_of_wrapping() {
        let mut grid = grid_3x2();

        grid[(3, 0)] = 9;
    }

    #[test]
    fn array_view_matches_coordinates() {
        let grid = grid_3x2();
        let view = grid.as_array().unwrap();

        assert_eq!(view.dim(), (2, 3));
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(Ok(&view[(x, y).to_nd_index()]), grid.cell_at((x, y)));
            }
        }
    }

    #[test]
    fn bulk_replace_breaks_shape() {
        let mut grid = grid_3x2();

        grid.elements_mut().pop();

        assert_eq!(grid.validate(), Err(BoardError::InvalidBoardShape));
        assert_eq!(grid.as_array().unwrap_err(), BoardError::InvalidBoardShape);
        assert_eq!(grid.cell_at((2, 1)), Err(BoardError::InvalidCoords));
        assert_eq!(grid.cell_at((1, 1)), Ok(&4));
    }

    #[test]
    fn copy_is_independent() {
        let mut grid: GridBoard<u8> = grid_3x2();
        let rule: Arc<dyn CaseRule> = Arc::new(LatinRule);
        grid.set_case_rule(Some(rule.clone()));
        grid.add_modified(4);

        let mut copy = grid.copy();
        copy.set_cell_at((0, 0), 9).unwrap();
        copy.add_modified(9);

        assert_eq!(grid.cell_at((0, 0)), Ok(&0));
        assert!(!grid.is_element_modified(&9));
        assert!(copy.is_element_modified(&4));
        assert_eq!(copy.size(), grid.size());
        assert!(Arc::ptr_eq(copy.case_rule().unwrap(), &rule));
    }
}
