/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Row-major linearization: `index = row * width + col`.
pub(crate) const fn index_of((row, col): Coord2, width: Coord) -> CellCount {
    row as CellCount * width as CellCount + col as CellCount
}

pub(crate) const fn coord_of(index: CellCount, width: Coord) -> Coord2 {
    let width = width as CellCount;
    ((index / width) as Coord, (index % width) as Coord)
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it stays within
/// `bounds` (exclusive, as `(rows, cols)`).
fn apply_delta(
    (row, col): Coord2,
    (d_row, d_col): (i8, i8),
    (rows, cols): Coord2,
) -> Option<Coord2> {
    let next_row = row.checked_add_signed(d_row)?;
    let next_col = col.checked_add_signed(d_col)?;
    (next_row < rows && next_col < cols).then_some((next_row, next_col))
}

/// Iterator over the up-to-8 in-bounds coordinates surrounding a center.
/// The visitation order follows a fixed displacement table, so it is stable
/// within a call.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    deltas: core::slice::Iter<'static, (i8, i8)>,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            deltas: DISPLACEMENTS.iter(),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let (center, bounds) = (self.center, self.bounds);
        self.deltas
            .by_ref()
            .find_map(|&delta| apply_delta(center, delta, bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((1, 1), (3, 3)).collect();

        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&(1, 1)));
    }

    #[test]
    fn corners_and_edges_are_clipped() {
        assert_eq!(NeighborIter::new((0, 0), (3, 3)).count(), 3);
        assert_eq!(NeighborIter::new((2, 2), (3, 3)).count(), 3);
        assert_eq!(NeighborIter::new((0, 1), (3, 3)).count(), 5);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn linear_index_round_trips() {
        let width = 7;
        for row in 0..4 {
            for col in 0..width {
                let index = index_of((row, col), width);
                assert_eq!(coord_of(index, width), (row, col));
            }
        }
        assert_eq!(index_of((2, 3), width), 17);
    }
}
