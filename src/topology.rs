use itertools::Itertools;
use strum::VariantArray;
use varisat::{ExtendFormula, Lit};

use crate::label::LabelId;

/// A cardinal direction from a cell toward one of its four boundaries.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, VariantArray)]
pub enum Direction {
    /// Toward the cell above, i.e. toward row 0.
    North,
    /// Toward the cell below.
    South,
    /// Toward the cell to the right.
    East,
    /// Toward the cell to the left, i.e. toward column 0.
    West,
}

/// The mapping from grid coordinates to the engine's variables.
///
/// All variables are allocated up front, before any clause is asserted. Edge variables live in two
/// flat arrays indexed by boundary rather than by cell, so the boundary between a cell and its
/// neighbor resolves to the *same* literal from either side; the perimeter boundaries are real
/// variables too, forced false by the wall constraints rather than special-cased here.
pub(crate) struct Topology {
    pairs: usize,
    width: usize,
    height: usize,
    assignments: Vec<Lit>,
    sinks: Vec<Lit>,
    // (width + 1) * height vertical boundaries
    east_west: Vec<Lit>,
    // width * (height + 1) horizontal boundaries
    north_south: Vec<Lit>,
}

impl Topology {
    pub(crate) fn new(
        formula: &mut impl ExtendFormula,
        pairs: usize,
        width: usize,
        height: usize,
    ) -> Self {
        let mut fresh =
            |count: usize| (0..count).map(|_| formula.new_var().positive()).collect_vec();

        Self {
            pairs,
            width,
            height,
            assignments: fresh(pairs * width * height),
            sinks: fresh(width * height),
            east_west: fresh((width + 1) * height),
            north_south: fresh(width * (height + 1)),
        }
    }

    #[inline]
    pub(crate) fn pairs(&self) -> usize {
        self.pairs
    }

    #[inline]
    pub(crate) fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub(crate) fn height(&self) -> usize {
        self.height
    }

    /// The literal stating that cell `(i, j)` belongs to the path of label `k`.
    pub(crate) fn assignment(&self, i: usize, j: usize, k: LabelId) -> Lit {
        assert!(i < self.height && j < self.width && k < self.pairs);
        self.assignments[(i * self.width + j) * self.pairs + k]
    }

    /// The literal stating that cell `(i, j)` is a path endpoint.
    pub(crate) fn sink(&self, i: usize, j: usize) -> Lit {
        assert!(i < self.height && j < self.width);
        self.sinks[i * self.width + j]
    }

    /// The literal stating that the path crosses the boundary of cell `(i, j)` in `direction`.
    ///
    /// Shared boundaries alias: `edge(i, j, South) == edge(i + 1, j, North)` and
    /// `edge(i, j, East) == edge(i, j + 1, West)`.
    pub(crate) fn edge(&self, i: usize, j: usize, direction: Direction) -> Lit {
        assert!(i < self.height && j < self.width);
        match direction {
            Direction::East | Direction::West => {
                self.east_west[i * (self.width + 1) + j + (direction == Direction::East) as usize]
            }
            Direction::North | Direction::South => {
                self.north_south[(i + (direction == Direction::South) as usize) * self.width + j]
            }
        }
    }

    /// The five ports of cell `(i, j)`: its sink slot followed by its four edges. Exactly two of
    /// these are occupied in any solution.
    pub(crate) fn ports(&self, i: usize, j: usize) -> Vec<Lit> {
        let mut ports = Vec::with_capacity(1 + Direction::VARIANTS.len());
        ports.push(self.sink(i, j));
        ports.extend(Direction::VARIANTS.iter().map(|direction| self.edge(i, j, *direction)));
        ports
    }
}
