use std::convert::identity;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use varisat::{ExtendFormula, Lit, Solver};

use crate::cardinality;
use crate::label::LabelId;
use crate::logic;
use crate::topology::{Direction, Topology};

/// A puzzle instance in clausal form: the engine, the variable layout, and the constraint
/// emitters that tie them together.
///
/// An [`Instance`] owns its [`Solver`] for its whole lifetime; every variable is allocated at
/// construction and every constraint only appends clauses, so the emitters may run in any order.
///
/// # Logical setup
///
/// ## Cells
/// Every cell carries exactly one label, and has exactly two occupied ports among its sink slot
/// and four edges. A clue cell uses its sink slot plus the one edge by which its path leaves; a
/// through-cell uses the two edges by which the path enters and leaves.
///
/// ## Edges
/// An edge being active means the path crosses that boundary, so the two cells it joins carry the
/// same label; conversely two adjacent cells carrying the same label force the edge between them
/// active. The perimeter edges are simply false: no path exits the grid.
///
/// ## Corners
/// Where the path turns, say entering a cell from the north and leaving to the west, the cell
/// diagonally across the turn must either be a sink or turn in parallel, continuing in the same
/// two directions. This rejects models that reroute a path through a diagonal detour without
/// changing any cell's label, leaving one canonical routing per label region.
pub(crate) struct Instance {
    solver: Solver<'static>,
    topology: Topology,
}

impl Instance {
    pub(crate) fn new(pairs: usize, width: usize, height: usize) -> Self {
        let mut solver = Solver::new();
        let topology = Topology::new(&mut solver, pairs, width, height);

        Self { solver, topology }
    }

    #[cfg(test)]
    pub(crate) fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Emit every structural constraint. Clue injection ([`Self::fill`] and [`Self::empty`]) is
    /// separate so callers can place clues after the structure is in place.
    pub(crate) fn constrain(&mut self) {
        self.constrain_assignments();
        self.constrain_walls();
        self.constrain_degrees();
        self.constrain_links();
        self.constrain_sticks();
        self.constrain_corners();
    }

    // every cell has exactly one label
    fn constrain_assignments(&mut self) {
        for i in 0..self.topology.height() {
            for j in 0..self.topology.width() {
                let labels = (0..self.topology.pairs())
                    .map(|k| self.topology.assignment(i, j, k))
                    .collect_vec();
                cardinality::exactly(&mut self.solver, 1, &labels);
            }
        }
    }

    // no path exits the grid
    fn constrain_walls(&mut self) {
        let width = self.topology.width();
        let height = self.topology.height();

        for i in 0..height {
            let west_wall = self.topology.edge(i, 0, Direction::West);
            let east_wall = self.topology.edge(i, width - 1, Direction::East);
            self.solver.add_clause(&[!west_wall]);
            self.solver.add_clause(&[!east_wall]);
        }
        for j in 0..width {
            let north_wall = self.topology.edge(0, j, Direction::North);
            let south_wall = self.topology.edge(height - 1, j, Direction::South);
            self.solver.add_clause(&[!north_wall]);
            self.solver.add_clause(&[!south_wall]);
        }
    }

    // every cell has exactly two occupied ports
    fn constrain_degrees(&mut self) {
        for i in 0..self.topology.height() {
            for j in 0..self.topology.width() {
                let ports = self.topology.ports(i, j);
                cardinality::exactly(&mut self.solver, 2, &ports);
            }
        }
    }

    // an active edge glues the same label onto both of its cells
    fn constrain_links(&mut self) {
        for i in 1..self.topology.height() {
            for j in 0..self.topology.width() {
                let edge = self.topology.edge(i, j, Direction::North);
                for k in 0..self.topology.pairs() {
                    let below = self.topology.assignment(i, j, k);
                    let above = self.topology.assignment(i - 1, j, k);
                    logic::glue(&mut self.solver, edge, below, above);
                }
            }
        }

        for i in 0..self.topology.height() {
            for j in 1..self.topology.width() {
                let edge = self.topology.edge(i, j, Direction::West);
                for k in 0..self.topology.pairs() {
                    let right = self.topology.assignment(i, j, k);
                    let left = self.topology.assignment(i, j - 1, k);
                    logic::glue(&mut self.solver, edge, right, left);
                }
            }
        }
    }

    // two same-labeled neighbors force the edge between them; without this, a label's region
    // could satisfy every per-cell constraint while splitting into disconnected components
    fn constrain_sticks(&mut self) {
        for i in 1..self.topology.height() {
            for j in 0..self.topology.width() {
                let edge = self.topology.edge(i, j, Direction::North);
                for k in 0..self.topology.pairs() {
                    let below = self.topology.assignment(i, j, k);
                    let above = self.topology.assignment(i - 1, j, k);
                    logic::stick(&mut self.solver, edge, below, above);
                }
            }
        }

        for i in 0..self.topology.height() {
            for j in 1..self.topology.width() {
                let edge = self.topology.edge(i, j, Direction::West);
                for k in 0..self.topology.pairs() {
                    let right = self.topology.assignment(i, j, k);
                    let left = self.topology.assignment(i, j - 1, k);
                    logic::stick(&mut self.solver, edge, right, left);
                }
            }
        }
    }

    fn constrain_corners(&mut self) {
        for i in 0..self.topology.height() {
            for j in 0..self.topology.width() {
                if i > 0 && j > 0 {
                    self.corner_propagation(i, j, Direction::North, Direction::West);
                }
                if i > 0 && j + 1 < self.topology.width() {
                    self.corner_propagation(i, j, Direction::North, Direction::East);
                }
                if i + 1 < self.topology.height() && j > 0 {
                    self.corner_propagation(i, j, Direction::South, Direction::West);
                }
                if i + 1 < self.topology.height() && j + 1 < self.topology.width() {
                    self.corner_propagation(i, j, Direction::South, Direction::East);
                }
            }
        }
    }

    // a path turning at (i, j) propagates through the diagonal neighbor (ii, jj) unless that
    // neighbor is a sink:
    // (enter * exit) => (sink(ii, jj) + continues vertically) and likewise horizontally
    fn corner_propagation(&mut self, i: usize, j: usize, vertical: Direction, horizontal: Direction) {
        let ii = if vertical == Direction::North { i - 1 } else { i + 1 };
        let jj = if horizontal == Direction::West { j - 1 } else { j + 1 };

        let enter = self.topology.edge(i, j, vertical);
        let exit = self.topology.edge(i, j, horizontal);
        let diagonal_sink = self.topology.sink(ii, jj);
        let continues_vertical = self.topology.edge(ii, jj, vertical);
        let continues_horizontal = self.topology.edge(ii, jj, horizontal);

        self.solver.add_clause(&[!enter, !exit, diagonal_sink, continues_vertical]);
        self.solver.add_clause(&[!enter, !exit, diagonal_sink, continues_horizontal]);
    }

    /// Assert that cell `(i, j)` is a clue for label `k`: it carries `k` and is a path endpoint.
    pub(crate) fn fill(&mut self, i: usize, j: usize, k: LabelId) {
        let assignment = self.topology.assignment(i, j, k);
        let sink = self.topology.sink(i, j);
        self.solver.add_clause(&[assignment]);
        self.solver.add_clause(&[sink]);
    }

    /// Assert that cell `(i, j)` holds no clue, i.e. is not a path endpoint.
    pub(crate) fn empty(&mut self, i: usize, j: usize) {
        let sink = self.topology.sink(i, j);
        self.solver.add_clause(&[!sink]);
    }

    /// Set assumptions for the next [`Self::solve`] call.
    #[cfg(test)]
    pub(crate) fn assume(&mut self, assumptions: &[Lit]) {
        self.solver.assume(assumptions);
    }

    /// Run the engine. Returns the variable layout and the satisfying model, or [`None`] if the
    /// formula is unsatisfiable, i.e. no unique spanning solution exists.
    pub(crate) fn solve(mut self) -> Option<(Topology, Vec<Lit>)> {
        if !self.solver.solve().is_ok_and(identity) {
            return None;
        }
        let model = self.solver.model().unwrap();

        Some((self.topology, model))
    }
}

/// A solved board: a satisfying truth assignment together with the variable layout needed to
/// read it back, obtained from [`Board::solve`](crate::Board::solve).
pub struct Solution {
    pub(crate) labels: Vec<char>,
    pub(crate) topology: Topology,
    pub(crate) model: Vec<Lit>,
}

impl Solution {
    #[inline]
    fn value(&self, lit: Lit) -> bool {
        self.model.get(lit.var().index()).unwrap().is_positive()
    }

    /// The width of the solved board.
    pub fn width(&self) -> usize {
        self.topology.width()
    }

    /// The height of the solved board.
    pub fn height(&self) -> usize {
        self.topology.height()
    }

    /// Whether cell `(i, j)` is a path endpoint.
    pub fn is_sink(&self, i: usize, j: usize) -> bool {
        self.value(self.topology.sink(i, j))
    }

    /// Whether the path crosses the boundary of cell `(i, j)` in `direction`.
    pub fn edge_active(&self, i: usize, j: usize, direction: Direction) -> bool {
        self.value(self.topology.edge(i, j, direction))
    }

    /// The label character carried by cell `(i, j)`.
    pub fn label_at(&self, i: usize, j: usize) -> char {
        let k = (0..self.topology.pairs())
            .find(|k| self.value(self.topology.assignment(i, j, *k)))
            .unwrap();
        self.labels[k]
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity(self.height() * (self.width() + 1));

        for i in 0..self.height() {
            for j in 0..self.width() {
                if self.is_sink(i, j) {
                    out.push(self.label_at(i, j));
                    continue;
                }

                let mut line = 0;
                for (bit, direction) in [
                    (1, Direction::North),
                    (2, Direction::South),
                    (4, Direction::East),
                    (8, Direction::West),
                ] {
                    if self.edge_active(i, j, direction) {
                        line |= bit;
                    }
                }
                out.push(match line {
                    3 => '│',
                    5 => '└',
                    9 => '┘',
                    6 => '┌',
                    10 => '┐',
                    12 => '─',
                    _ => ' ',
                });
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
