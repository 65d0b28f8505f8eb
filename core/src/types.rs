/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

/// Row-major `[y, x]`, matching the layout of [`GridBoard::as_array`](crate::GridBoard::as_array).
impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Which surrounding cells count as neighbors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Adjacency {
    /// Up, down, left and right.
    #[default]
    Orthogonal,
    /// Orthogonal plus the four diagonals.
    All,
}

impl Adjacency {
    const fn displacements(self) -> &'static [(isize, isize)] {
        match self {
            Self::Orthogonal => &ORTHOGONAL,
            Self::All => &ALL,
        }
    }
}

const ORTHOGONAL: [(isize, isize); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

const ALL: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    displacements: &'static [(isize, isize)],
    index: usize,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2, adjacency: Adjacency) -> Self {
        Self {
            center,
            bounds,
            displacements: adjacency.displacements(),
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = self.displacements.get(self.index) {
            self.index += 1;
            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
        None
    }
}
