//! Small clause-emission helpers over a [`varisat`] formula: the reusable boolean gates the
//! encoder is built from.

use varisat::{ExtendFormula, Lit};

/// Assert `x <=> y`.
///
/// x <=> y
/// = (x => y) * (y => x)
/// = (!x + y) * (x + !y)
pub fn equiv(formula: &mut impl ExtendFormula, x: Lit, y: Lit) {
    formula.add_clause(&[!x, y]);
    formula.add_clause(&[x, !y]);
}

/// Assert `g => (x <=> y)`: if the gate holds, the two sides agree.
///
/// !g + (!x + y)(x + !y)
/// = (!g + !x + y) * (!g + x + !y)
pub fn glue(formula: &mut impl ExtendFormula, g: Lit, x: Lit, y: Lit) {
    formula.add_clause(&[!g, !x, y]);
    formula.add_clause(&[!g, x, !y]);
}

/// Assert `(x * y) => g`: if both sides hold, so does the gate.
///
/// !(x * y) + g
/// = (g + !x + !y)
pub fn stick(formula: &mut impl ExtendFormula, g: Lit, x: Lit, y: Lit) {
    formula.add_clause(&[g, !x, !y]);
}
