//! Exact symbolic Laplacians on a small computer algebra core.
//!
//! The core parses, differentiates, expands, substitutes, and simplifies
//! expression trees over rational constants. [`laplacian::run`] uses it to
//! report the Laplacians of a Gaussian and a saddle field.

pub mod calculus;
pub mod config;
pub mod error;
pub mod expr;
pub mod format;
pub mod laplacian;
pub mod parser;
pub mod report;
pub mod simplify;
pub mod symbol;

#[cfg(test)]
mod proptests;

pub use calculus::{differentiate, differentiate_n, laplacian as laplacian_of};
pub use config::EvaluatorConfig;
pub use error::{CasError, Result};
pub use expr::{Expr, Rational, add, div, exp, log, mul, neg, one, pow, rational, sub, zero};
pub use format::{latex, pretty};
pub use laplacian::{FieldSymbols, GaussianReport, SaddleReport, run};
pub use parser::parse_expr;
pub use report::{LatexReporter, RecordingReporter, Reporter, TextReporter};
pub use simplify::{
    expand, normalize, simplify, simplify_fully, simplify_with_limit, substitute,
};
pub use symbol::{Symbol, symbols};
