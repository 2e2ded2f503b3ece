/// Index of a label in a board's label set, in order of first appearance in the input.
pub(crate) type LabelId = usize;
