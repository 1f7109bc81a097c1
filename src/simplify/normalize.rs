use std::collections::BTreeMap;

use crate::expr::{Expr, Rational};
use crate::simplify::rules::{split_coeff, sum_terms, term_from};
use crate::simplify::{simplify_add, simplify_fully};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// Bring `expr` to its compact form.
///
/// The expression is canonicalized first; if the result is a sum, the common
/// rational content and every factor shared by all terms are pulled out in
/// front, so `16*x^2*exp(u) - 4*exp(u)` becomes `4*exp(u)*(4*x^2 - 1)`.
/// Expressions with nothing in common come back in canonical form.
pub fn normalize(expr: Expr) -> Expr {
    extract_common(simplify_fully(expr))
}

fn extract_common(expr: Expr) -> Expr {
    let terms = sum_terms(&expr);
    if terms.len() < 2 {
        return expr;
    }

    let split: Vec<(Rational, BTreeMap<Expr, Rational>)> = terms
        .iter()
        .map(|term| {
            let (coeff, factors) = split_coeff(term);
            (coeff, exponent_map(factors))
        })
        .collect();

    let content = rational_content(split.iter().map(|(c, _)| c));
    let common = common_factors(split.iter().map(|(_, m)| m));
    if content.is_one() && common.is_empty() {
        return expr;
    }

    let remainder = split
        .into_iter()
        .map(|(coeff, mut exps)| {
            for (base, e) in &common {
                if let Some(current) = exps.get_mut(base) {
                    *current -= e;
                }
            }
            term_from(&(coeff / &content), &factors_from(exps))
        })
        .reduce(simplify_add)
        .unwrap_or_else(crate::expr::zero);

    let prefix = term_from(&content, &factors_from(common));
    if prefix.is_one() {
        remainder
    } else {
        Expr::Mul(prefix.boxed(), remainder.boxed())
    }
}

fn exponent_map(factors: Vec<Expr>) -> BTreeMap<Expr, Rational> {
    let mut exps = BTreeMap::new();
    for factor in factors {
        let (base, e) = match factor {
            Expr::Pow(base, exp) => match *exp {
                Expr::Constant(e) => (*base, e),
                other => (Expr::Pow(base, other.boxed()), Rational::one()),
            },
            other => (other, Rational::one()),
        };
        exps.entry(base)
            .and_modify(|acc: &mut Rational| *acc += &e)
            .or_insert(e);
    }
    exps
}

fn factors_from(exps: BTreeMap<Expr, Rational>) -> Vec<Expr> {
    let mut factors: Vec<Expr> = exps
        .into_iter()
        .filter(|(_, e)| !e.is_zero())
        .map(|(base, e)| {
            if e.is_one() {
                base
            } else {
                Expr::Pow(base.boxed(), Expr::Constant(e).boxed())
            }
        })
        .collect();
    factors.sort();
    factors
}

/// gcd of the numerators over the lcm of the denominators, negative only when
/// every coefficient is negative.
fn rational_content<'a, I>(coeffs: I) -> Rational
where
    I: Iterator<Item = &'a Rational>,
{
    let mut numer = BigInt::zero();
    let mut denom = BigInt::one();
    let mut all_negative = true;
    for c in coeffs {
        numer = numer.gcd(c.numer());
        denom = denom.lcm(c.denom());
        all_negative &= c.is_negative();
    }
    if numer.is_zero() {
        return Rational::one();
    }
    let content = Rational::new(numer, denom);
    if all_negative {
        -content
    } else {
        content
    }
}

/// Bases present in every term with a positive exponent, at their smallest exponent.
fn common_factors<'a, I>(mut maps: I) -> BTreeMap<Expr, Rational>
where
    I: Iterator<Item = &'a BTreeMap<Expr, Rational>>,
{
    let mut common: BTreeMap<Expr, Rational> = match maps.next() {
        Some(first) => first
            .iter()
            .filter(|(_, e)| e.is_positive())
            .map(|(b, e)| (b.clone(), e.clone()))
            .collect(),
        None => return BTreeMap::new(),
    };
    for exps in maps {
        common = common
            .into_iter()
            .filter_map(|(base, e)| match exps.get(&base) {
                Some(other) if other.is_positive() => Some((base, e.min(other.clone()))),
                _ => None,
            })
            .collect();
    }
    common
}

#[cfg(test)]
mod normalize_internal_tests {
    use super::*;

    fn q(n: i64, d: i64) -> Rational {
        Rational::new(n.into(), d.into())
    }

    #[test]
    fn content_uses_gcd_and_lcm() {
        let coeffs = [q(16, 1), q(-4, 1)];
        assert_eq!(rational_content(coeffs.iter()), q(4, 1));
        let coeffs = [q(1, 2), q(3, 4)];
        assert_eq!(rational_content(coeffs.iter()), q(1, 4));
    }

    #[test]
    fn content_is_negative_when_all_terms_are() {
        let coeffs = [q(-6, 1), q(-9, 1)];
        assert_eq!(rational_content(coeffs.iter()), q(-3, 1));
    }

    #[test]
    fn common_factors_take_smallest_exponent() {
        let x = Expr::var("x");
        let y = Expr::var("y");
        let a: BTreeMap<Expr, Rational> = [(x.clone(), q(3, 1)), (y.clone(), q(1, 1))].into();
        let b: BTreeMap<Expr, Rational> = [(x.clone(), q(2, 1))].into();
        let common = common_factors([a, b].iter());
        assert_eq!(common.len(), 1);
        assert_eq!(common.get(&x), Some(&q(2, 1)));
    }
}
