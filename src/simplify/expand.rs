use crate::expr::{Expr, Rational};
use crate::simplify::rules::{multiply, sum_terms};
use crate::simplify::{
    simplify_add, simplify_exp, simplify_fully, simplify_log, simplify_neg, simplify_pow,
    simplify_sub,
};
use num_traits::{Signed, ToPrimitive};

const EXPAND_POWER_LIMIT: u32 = 16;

/// Distribute every product over its sums and multiply out positive integer
/// powers of sums. No term limit applies and nothing is factored back.
pub fn expand(expr: Expr) -> Expr {
    simplify_fully(expand_once(expr))
}

fn expand_once(expr: Expr) -> Expr {
    match expr {
        Expr::Add(a, b) => simplify_add(expand_once(*a), expand_once(*b)),
        Expr::Sub(a, b) => simplify_sub(expand_once(*a), expand_once(*b)),
        Expr::Mul(a, b) => multiply(expand_once(*a), expand_once(*b), usize::MAX),
        Expr::Div(a, b) => {
            let den = expand_once(*b);
            if den.is_zero() {
                return Expr::Div(expand_once(*a).boxed(), den.boxed());
            }
            let inv = simplify_pow(den, Expr::Constant(-Rational::from_integer(1.into())));
            multiply(expand_once(*a), inv, usize::MAX)
        }
        Expr::Pow(a, b) => expand_pow(expand_once(*a), expand_once(*b)),
        Expr::Neg(a) => simplify_neg(expand_once(*a)),
        Expr::Exp(a) => simplify_exp(expand_once(*a)),
        Expr::Log(a) => simplify_log(expand_once(*a)),
        leaf => leaf,
    }
}

fn expand_pow(base: Expr, exp: Expr) -> Expr {
    if let Expr::Constant(e) = &exp {
        if e.is_integer() && e.is_positive() && sum_terms(&base).len() > 1 {
            if let Some(n) = e.to_integer().to_u32().filter(|n| *n <= EXPAND_POWER_LIMIT) {
                return (1..n).fold(base.clone(), |acc, _| multiply(acc, base.clone(), usize::MAX));
            }
        }
    }
    simplify_pow(base, exp)
}
