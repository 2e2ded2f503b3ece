use crate::label::LabelId;

/// One cell of an unsolved board.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum Cell {
    /// A clue: this cell is an endpoint of the path for `label`.
    Clue { label: LabelId },
    #[default]
    Empty,
}
