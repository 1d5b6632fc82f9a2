//! Simplification rules for expressions involving addition, including combining like terms.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{fraction::{join_coefficient, split_coefficient}, rules::do_add, step::Step},
    step_collector::StepCollector,
};
use rug::Rational;

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| !term.is_zero())
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// Combines like terms, including numbers.
///
/// `a+a = 2a`
/// `2a+3a = 5a`
/// `a-a = 0`
/// `1+2 = 3`
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        // terms are like terms if they are strictly equal after removing their coefficients
        let mut groups: Vec<(Rational, SymExpr)> = Vec::with_capacity(terms.len());
        for term in terms {
            let (coefficient, rest) = split_coefficient(term);
            match groups.iter_mut().find(|(_, existing)| *existing == rest) {
                Some((sum, _)) => *sum += coefficient,
                None => groups.push((coefficient, rest)),
            }
        }

        if groups.len() == terms.len() {
            return None;
        }

        let new_terms = groups.into_iter()
            .filter(|(coefficient, _)| *coefficient != 0)
            .map(|(coefficient, rest)| join_coefficient(coefficient, rest))
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    add_zero(expr, step_collector)
        .or_else(|| combine_like_terms(expr, step_collector))
}
