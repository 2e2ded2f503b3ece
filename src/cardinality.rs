use itertools::Itertools;
use varisat::{ExtendFormula, Lit};

/// Assert that at most `n` of `lits` are true.
///
/// For every choice of `n + 1` literals, at least one must be false:
/// (!A + !B + ...) over each subset of size n + 1.
///
/// If `n >= lits.len()` there is nothing to choose and nothing to assert; the constraint is
/// vacuously satisfied.
pub(crate) fn at_most(formula: &mut impl ExtendFormula, n: usize, lits: &[Lit]) {
    for subset in lits.iter().combinations(n + 1) {
        formula.add_clause(&subset.into_iter().map(|lit| !*lit).collect_vec());
    }
}

/// Assert that at least `n` of `lits` are true.
///
/// Equivalent to "at most `lits.len() - n` of `lits` are false": for every choice of
/// `lits.len() - n + 1` literals, at least one must be true:
/// (A + B + ...) over each subset of that size.
///
/// Requiring more true literals than exist is an immediate contradiction; for
/// `n == lits.len() + 1` the single size-0 subset yields the empty clause on its own, and larger
/// `n` emits it explicitly.
pub(crate) fn at_least(formula: &mut impl ExtendFormula, n: usize, lits: &[Lit]) {
    if n == 0 {
        return;
    }

    let subset_size = match (lits.len() + 1).checked_sub(n) {
        Some(size) => size,
        None => {
            formula.add_clause(&[]);
            return;
        }
    };

    for subset in lits.iter().combinations(subset_size) {
        formula.add_clause(&subset.into_iter().copied().collect_vec());
    }
}

/// Assert that exactly `n` of `lits` are true.
pub(crate) fn exactly(formula: &mut impl ExtendFormula, n: usize, lits: &[Lit]) {
    at_most(formula, n, lits);
    at_least(formula, n, lits);
}
