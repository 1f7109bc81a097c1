//! Symbolic simplification, expansion, normalization, and substitution utilities.

mod expand;
mod normalize;
mod rules;
mod substitute;

pub use expand::expand;
pub use normalize::normalize;
pub use rules::{
    simplify, simplify_add, simplify_div, simplify_exp, simplify_fully, simplify_log,
    simplify_mul, simplify_neg, simplify_pow, simplify_sub, simplify_with_limit,
};
pub use substitute::substitute;
