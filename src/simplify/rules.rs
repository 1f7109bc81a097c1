use std::collections::{BTreeMap, HashMap};

use crate::expr::{Expr, Rational, one, zero};
use log::trace;
use num_traits::{One, Signed, ToPrimitive, Zero};

const DISTRIBUTE_TERM_LIMIT: usize = 64;
const FIXED_POINT_LIMIT: usize = 64;

#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
struct CanonKey(Vec<Expr>);

pub fn simplify(expr: Expr) -> Expr {
    let mut cache = HashMap::new();
    simplify_cached(expr, &mut cache)
}

fn simplify_cached(expr: Expr, cache: &mut HashMap<Expr, Expr>) -> Expr {
    if let Some(hit) = cache.get(&expr) {
        return hit.clone();
    }

    let key = expr.clone();
    let result = match expr {
        Expr::Add(a, b) => simplify_add(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Sub(a, b) => simplify_sub(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Mul(a, b) => simplify_mul(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Div(a, b) => simplify_div(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Pow(a, b) => simplify_pow(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Neg(a) => simplify_neg(simplify_cached(*a, cache)),
        Expr::Exp(a) => simplify_exp(simplify_cached(*a, cache)),
        Expr::Log(a) => simplify_log(simplify_cached(*a, cache)),
        e => e,
    };

    cache.insert(key, result.clone());
    result
}

/// Apply simplification passes until the expression stops changing or we hit the iteration cap.
pub fn simplify_fully(expr: Expr) -> Expr {
    simplify_with_limit(expr, FIXED_POINT_LIMIT)
}

/// Apply simplification passes up to `max_iters`, returning the last value if convergence is not reached.
pub fn simplify_with_limit(expr: Expr, max_iters: usize) -> Expr {
    let mut cache = HashMap::new();
    let mut current = expr;
    for pass in 0..max_iters {
        let next = simplify_cached(current.clone(), &mut cache);
        if next == current {
            trace!("simplification reached a fixed point after {pass} passes");
            return current;
        }
        current = next;
    }
    trace!("simplification stopped at the {max_iters} pass cap");
    current
}

pub fn simplify_add(x: Expr, y: Expr) -> Expr {
    rebuild_sum(collect_sum(
        sum_terms(&x).into_iter().chain(sum_terms(&y)),
    ))
}

pub fn simplify_sub(x: Expr, y: Expr) -> Expr {
    simplify_add(x, simplify_neg(y))
}

pub fn simplify_mul(x: Expr, y: Expr) -> Expr {
    multiply(x, y, DISTRIBUTE_TERM_LIMIT)
}

/// Multiply two simplified expressions, distributing over sums while the
/// number of resulting terms stays within `term_limit`.
pub(crate) fn multiply(x: Expr, y: Expr, term_limit: usize) -> Expr {
    if is_zero(&x) || is_zero(&y) {
        return zero();
    }
    if is_one(&x) {
        return y;
    }
    if is_one(&y) {
        return x;
    }

    let left = sum_terms(&x);
    let right = sum_terms(&y);
    if (left.len() > 1 || right.len() > 1) && left.len().saturating_mul(right.len()) <= term_limit
    {
        let mut terms = Vec::with_capacity(left.len() * right.len());
        for a in &left {
            for b in &right {
                terms.push(multiply(a.clone(), b.clone(), term_limit));
            }
        }
        return rebuild_sum(collect_sum(terms));
    }

    let (coeff, factors) = split_coeff(&Expr::Mul(x.boxed(), y.boxed()));
    term_from(&coeff, &factors)
}

pub fn simplify_div(x: Expr, y: Expr) -> Expr {
    if is_zero(&y) {
        return Expr::Div(x.boxed(), y.boxed());
    }
    if is_zero(&x) {
        return zero();
    }
    if is_one(&y) {
        return x;
    }
    if x == y {
        return one();
    }
    simplify_mul(x, simplify_pow(y, Expr::Constant(-Rational::one())))
}

pub fn simplify_pow(x: Expr, y: Expr) -> Expr {
    let e = match y {
        Expr::Constant(e) => e,
        y => return Expr::Pow(x.boxed(), y.boxed()),
    };
    if e.is_zero() {
        return one();
    }
    if e.is_one() {
        return x;
    }

    match x {
        Expr::Constant(b) => {
            if e.is_integer() && !(b.is_zero() && e.is_negative()) {
                Expr::Constant(pow_rational(&b, &e))
            } else {
                Expr::Pow(Expr::Constant(b).boxed(), Expr::Constant(e).boxed())
            }
        }
        // Collapse nested powers only when the outer exponent is an integer to avoid branch changes.
        Expr::Pow(base, inner) if e.is_integer() => match *inner {
            Expr::Constant(inner_e) => simplify_pow(*base, Expr::Constant(inner_e * e)),
            other => Expr::Pow(
                Expr::Pow(base, other.boxed()).boxed(),
                Expr::Constant(e).boxed(),
            ),
        },
        Expr::Exp(arg) => simplify_exp(simplify_mul(Expr::Constant(e), *arg)),
        base @ (Expr::Mul(_, _) | Expr::Neg(_) | Expr::Div(_, _)) if e.is_integer() => {
            let (coeff, factors) = split_coeff(&base);
            if coeff.is_zero() {
                return if e.is_positive() {
                    zero()
                } else {
                    Expr::Pow(base.boxed(), Expr::Constant(e).boxed())
                };
            }
            factors.into_iter().fold(
                Expr::Constant(pow_rational(&coeff, &e)),
                |acc, factor| simplify_mul(acc, simplify_pow(factor, Expr::Constant(e.clone()))),
            )
        }
        base => Expr::Pow(base.boxed(), Expr::Constant(e).boxed()),
    }
}

pub fn simplify_neg(expr: Expr) -> Expr {
    match expr {
        Expr::Constant(x) => Expr::Constant(-x),
        Expr::Neg(x) => *x,
        sum @ (Expr::Add(_, _) | Expr::Sub(_, _)) => {
            rebuild_sum(collect_sum(sum_terms(&sum).into_iter().map(simplify_neg)))
        }
        product @ Expr::Mul(_, _) => {
            let (coeff, factors) = split_coeff(&product);
            term_from(&-coeff, &factors)
        }
        other => Expr::Neg(other.boxed()),
    }
}

pub fn simplify_exp(arg: Expr) -> Expr {
    match arg {
        x if is_zero(&x) => one(),
        Expr::Log(inner) => *inner,
        x => Expr::Exp(x.boxed()),
    }
}

pub fn simplify_log(arg: Expr) -> Expr {
    match arg {
        x if is_one(&x) => zero(),
        Expr::Exp(inner) => *inner,
        x => Expr::Log(x.boxed()),
    }
}

/// Terms of a (possibly nested) sum, with subtraction and negation pushed onto the terms.
pub(crate) fn sum_terms(expr: &Expr) -> Vec<Expr> {
    match expr {
        Expr::Add(a, b) => {
            let mut out = sum_terms(a);
            out.extend(sum_terms(b));
            out
        }
        Expr::Sub(a, b) => {
            let mut out = sum_terms(a);
            out.extend(sum_terms(b).into_iter().map(simplify_neg));
            out
        }
        Expr::Neg(a) => sum_terms(a).into_iter().map(simplify_neg).collect(),
        other => vec![other.clone()],
    }
}

/// Split a product into its rational coefficient and its sorted, merged factors.
///
/// Equal bases are merged by adding their constant exponents, and all
/// exponential factors are merged into a single `exp` of the summed arguments.
pub(crate) fn split_coeff(expr: &Expr) -> (Rational, Vec<Expr>) {
    let (coeff, raw) = collect_product(expr);
    merge_factors(coeff, raw)
}

fn collect_product(expr: &Expr) -> (Rational, Vec<Expr>) {
    match expr {
        Expr::Constant(c) => (c.clone(), Vec::new()),
        Expr::Neg(inner) => {
            let (c, f) = collect_product(inner);
            (-c, f)
        }
        Expr::Mul(a, b) => {
            let (ca, mut fa) = collect_product(a);
            let (cb, mut fb) = collect_product(b);
            fa.append(&mut fb);
            (ca * cb, fa)
        }
        Expr::Div(a, b) => {
            let (cb, fb) = collect_product(b);
            if cb.is_zero() {
                return (Rational::one(), vec![expr.clone()]);
            }
            let (ca, mut fa) = collect_product(a);
            for factor in fb {
                fa.push(Expr::Pow(
                    factor.boxed(),
                    Expr::Constant(-Rational::one()).boxed(),
                ));
            }
            (ca / cb, fa)
        }
        other => (Rational::one(), vec![other.clone()]),
    }
}

fn merge_factors(mut coeff: Rational, raw: Vec<Expr>) -> (Rational, Vec<Expr>) {
    let mut powers: BTreeMap<Expr, Rational> = BTreeMap::new();
    let mut exp_args: Vec<Expr> = Vec::new();

    for factor in raw {
        let (base, e) = base_and_exponent(factor);
        match base {
            Expr::Constant(c) if e.is_integer() && !(c.is_zero() && e.is_negative()) => {
                coeff *= pow_rational(&c, &e);
            }
            Expr::Exp(arg) => exp_args.push(simplify_mul(Expr::Constant(e), *arg)),
            base => add_exponent(&mut powers, base, e),
        }
    }

    if coeff.is_zero() {
        return (Rational::zero(), Vec::new());
    }

    let mut factors: Vec<Expr> = powers
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

    if let Some(arg) = exp_args.into_iter().reduce(simplify_add) {
        match simplify_exp(arg) {
            Expr::Constant(c) => coeff *= c,
            merged => factors.push(merged),
        }
    }

    factors.sort();
    (coeff, factors)
}

fn base_and_exponent(factor: Expr) -> (Expr, Rational) {
    match factor {
        Expr::Pow(base, exp) => match *exp {
            Expr::Constant(e) => match *base {
                Expr::Pow(inner_base, inner_exp) if e.is_integer() => match *inner_exp {
                    Expr::Constant(inner_e) => (*inner_base, inner_e * e),
                    other => (Expr::Pow(inner_base, other.boxed()), e),
                },
                base => (base, e),
            },
            other => (Expr::Pow(base, other.boxed()), Rational::one()),
        },
        other => (other, Rational::one()),
    }
}

fn add_exponent(map: &mut BTreeMap<Expr, Rational>, base: Expr, exp: Rational) {
    map.entry(base)
        .and_modify(|e| *e += &exp)
        .or_insert(exp);
}

fn collect_sum<I>(terms: I) -> BTreeMap<CanonKey, Rational>
where
    I: IntoIterator<Item = Expr>,
{
    let mut map = BTreeMap::new();
    for term in terms {
        let (c, factors) = split_coeff(&term);
        if c.is_zero() {
            continue;
        }
        map.entry(CanonKey(factors))
            .and_modify(|acc| *acc += &c)
            .or_insert(c);
    }
    map
}

fn rebuild_sum(mut map: BTreeMap<CanonKey, Rational>) -> Expr {
    let const_term = map
        .remove(&CanonKey(Vec::new()))
        .unwrap_or_else(Rational::zero);

    let mut terms: Vec<Expr> = map
        .into_iter()
        .filter(|(_, coef)| !coef.is_zero())
        .map(|(CanonKey(factors), coef)| term_from(&coef, &factors))
        .collect();

    if !const_term.is_zero() {
        terms.push(Expr::Constant(const_term));
    }

    mk_add_list(terms)
}

/// Build `coef * f1 * f2 * ...` from an already sorted factor list.
pub(crate) fn term_from(coef: &Rational, factors: &[Expr]) -> Expr {
    if coef.is_zero() {
        return zero();
    }
    if factors.is_empty() {
        return Expr::Constant(coef.clone());
    }

    let core = mul_from_sorted_factors(factors);
    if coef.is_one() {
        core
    } else if *coef == -Rational::one() {
        Expr::Neg(core.boxed())
    } else {
        Expr::Mul(Expr::Constant(coef.clone()).boxed(), core.boxed())
    }
}

fn mul_from_sorted_factors(factors: &[Expr]) -> Expr {
    let mut iter = factors.iter().cloned();
    match iter.next() {
        Some(first) => iter.fold(first, |acc, item| Expr::Mul(acc.boxed(), item.boxed())),
        None => one(),
    }
}

fn mk_add_list(items: Vec<Expr>) -> Expr {
    let mut iter = items.into_iter();
    match iter.next() {
        Some(first) => iter.fold(first, |acc, item| Expr::Add(acc.boxed(), item.boxed())),
        None => zero(),
    }
}

/// Raise a rational to an integer power; non-integer exponents leave the base untouched.
pub(crate) fn pow_rational(base: &Rational, exp: &Rational) -> Rational {
    if exp.is_zero() {
        return Rational::one();
    }
    if !exp.is_integer() {
        return base.clone();
    }
    let n = exp.to_integer();
    if let Some(pow) = n.abs().to_u32() {
        let num = base.numer().pow(pow);
        let den = base.denom().pow(pow);
        if n.is_negative() {
            return Rational::new(den, num);
        } else {
            return Rational::new(num, den);
        }
    }
    base.clone()
}

fn is_zero(expr: &Expr) -> bool {
    matches!(expr, Expr::Constant(r) if r.is_zero())
}

fn is_one(expr: &Expr) -> bool {
    matches!(expr, Expr::Constant(r) if r.is_one())
}
