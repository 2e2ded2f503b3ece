use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;

use crate::cell::Cell;
use crate::label::LabelId;
use crate::solver::{Instance, Solution};

/// Reasons a puzzle's text form may fail to parse.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ParseBoardError {
    /// A row's length disagrees with the first row's.
    RaggedRow {
        /// The width established by the first row.
        expected: usize,
        /// The width of the offending row.
        found: usize,
    },
    /// The input contains no rows at all.
    Empty,
}

impl Display for ParseBoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RaggedRow { expected, found } => {
                write!(f, "ragged row: expected width {expected}, found {found}")
            }
            Self::Empty => write!(f, "no puzzle rows in input"),
        }
    }
}

impl std::error::Error for ParseBoardError {}

/// An unsolved Numberlink board: a rectangular grid of clue and empty cells plus the set of
/// labels appearing on it.
///
/// Build one with [`Board::parse`], then call [`Board::solve`].
pub struct Board {
    pub(crate) cells: Array2<Cell>,
    pub(crate) labels: Vec<char>,
}

impl Board {
    /// Parse a plain-text puzzle.
    ///
    /// Each line is a row; `.` is an empty cell, any other character is a clue. Labels are
    /// interned in order of first appearance. Blank lines and lines starting with `#` are
    /// skipped. Rows must all have the same width.
    pub fn parse(input: &str) -> Result<Self, ParseBoardError> {
        let mut labels = Vec::new();
        let mut label_ids: HashMap<char, LabelId> = HashMap::new();
        let mut rows: Vec<Vec<Cell>> = Vec::new();

        for line in input.lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let row = line
                .chars()
                .map(|c| match c {
                    '.' => Cell::Empty,
                    c => {
                        let label = *label_ids.entry(c).or_insert_with(|| {
                            labels.push(c);
                            labels.len() - 1
                        });
                        Cell::Clue { label }
                    }
                })
                .collect_vec();

            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(ParseBoardError::RaggedRow {
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(ParseBoardError::Empty);
        }

        let height = rows.len();
        let width = rows[0].len();
        let cells = Array2::from_shape_fn((height, width), |(i, j)| rows[i][j]);

        Ok(Self { cells, labels })
    }

    /// The width of this board.
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// The height of this board.
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// The label characters appearing on this board, in order of first appearance.
    pub fn labels(&self) -> &[char] {
        &self.labels
    }

    /// Solve this board, deferring to an [`Instance`] and the SAT engine behind it.
    ///
    /// Returns [`None`] if no unique spanning solution exists, whether because the clues admit no
    /// non-crossing spanning paths at all or because no single canonical routing can be pinned
    /// down.
    pub fn solve(&self) -> Option<Solution> {
        let mut instance = Instance::new(self.labels.len(), self.width(), self.height());
        instance.constrain();

        for ((i, j), cell) in self.cells.indexed_iter() {
            match cell {
                Cell::Clue { label } => instance.fill(i, j, *label),
                Cell::Empty => instance.empty(i, j),
            }
        }

        let (topology, model) = instance.solve()?;

        Some(Solution {
            labels: self.labels.clone(),
            topology,
            model,
        })
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity(self.height() * (self.width() + 1));

        for row in self.cells.rows() {
            for cell in row {
                out.push(match cell {
                    Cell::Clue { label } => self.labels[*label],
                    Cell::Empty => '.',
                });
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
