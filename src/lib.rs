#![warn(missing_docs)]

//! # `meander`
//!
//! A solver for [Numberlink](https://en.wikipedia.org/wiki/Numberlink) puzzles: connect each pair of
//! identically labeled cells with a path such that no two paths cross and the paths jointly tile the
//! whole grid. Begin by parsing a plain-text puzzle with [`Board::parse`], then call
//! [`solve()`](Board::solve) to obtain a [`Solution`], which can be queried cell by cell or rendered
//! with box-drawing characters via its [`Display`](std::fmt::Display) impl.
//!
//! # Internals
//! This crate is driven by expressing the puzzle as a Boolean satisfiability problem, handing it to
//! the [`varisat`] engine, and reading the board back out of the satisfying model.
//!
//! A high level overview is as follows:
//!
//! For a `width x height` grid with `pairs` distinct labels, we allocate one variable per
//! (cell, label) pair stating "this cell belongs to this label's path", one "sink" variable per cell
//! stating "this cell is a path endpoint", and one variable per cell boundary stating "the path
//! crosses this boundary". Boundary variables are shared: the south edge of a cell *is* the north
//! edge of the cell below it, so the two can never disagree.
//!
//! We then assert, in conjunctive normal form:
//! 1. Every cell carries exactly one label.
//! 2. No edge on the outer perimeter is active.
//! 3. Every cell has exactly two occupied ports among its sink slot and its four edges, so a
//!    through-cell carries the path in and out and an endpoint uses its sink slot plus one edge.
//! 4. An active edge forces the same label on both of its cells, and conversely two same-labeled
//!    neighbors force the edge between them active. Together these make "edge active" equivalent to
//!    "labels equal", which rules out a label's region splitting into disconnected pieces.
//! 5. A path turning a corner propagates through the diagonally adjacent cell unless that cell is
//!    itself an endpoint, which pins down one canonical routing where several geometrically distinct
//!    ones would otherwise satisfy every other constraint.
//!
//! Clue cells are asserted to carry their label and to be sinks; all other cells are asserted to not
//! be sinks. An unsatisfiable formula means the puzzle has no unique spanning solution.

pub use board::{Board, ParseBoardError};
pub use solver::Solution;
pub use topology::Direction;

pub(crate) mod board;
mod tests;
pub(crate) mod cardinality;
pub(crate) mod cell;
pub(crate) mod label;
pub mod logic;
pub(crate) mod solver;
pub(crate) mod topology;
