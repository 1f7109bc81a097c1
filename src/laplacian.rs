//! Laplacians of a Gaussian and a saddle field.
//!
//! The Gaussian results are reported as the *negated* Laplacian while the
//! saddle results are reported as the plain sum `hxx + hyy`. The two sign
//! conventions differ on purpose; both are kept as they were first written.

use log::debug;

use crate::calculus::{differentiate_n, laplacian};
use crate::config::EvaluatorConfig;
use crate::error::Result;
use crate::expr::{Expr, Rational, add, exp, mul, neg, pow, sub};
use crate::report::Reporter;
use crate::simplify::{expand, normalize, simplify_add, simplify_neg, substitute};
use crate::symbol::Symbol;

/// Spatial symbols `x`, `y` and the parameters `alpha`, `beta`, `gamma`.
///
/// `beta` and `gamma` are declared alongside `alpha` but no field uses them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSymbols {
    pub x: Symbol,
    pub y: Symbol,
    pub alpha: Symbol,
    pub beta: Symbol,
    pub gamma: Symbol,
}

impl FieldSymbols {
    pub fn declare() -> Result<Self> {
        Ok(FieldSymbols {
            x: Symbol::new("x")?,
            y: Symbol::new("y")?,
            alpha: Symbol::new("alpha")?,
            beta: Symbol::new("beta")?,
            gamma: Symbol::new("gamma")?,
        })
    }

    fn spatial(&self) -> [&str; 2] {
        [self.x.name(), self.y.name()]
    }
}

/// `exp(-alpha*(x^2 + y^2))`
pub fn gaussian_field(symbols: &FieldSymbols) -> Expr {
    let r2 = add(square(symbols.x.expr()), square(symbols.y.expr()));
    exp(mul(neg(symbols.alpha.expr()), r2))
}

/// `x^2 - y^2`
pub fn saddle_field(symbols: &FieldSymbols) -> Expr {
    sub(square(symbols.x.expr()), square(symbols.y.expr()))
}

fn square(base: Expr) -> Expr {
    pow(base, Expr::integer(2))
}

/// `-(sum of unmixed second partials)`, fully expanded.
///
/// This is the negative of [`crate::calculus::laplacian`]: for the Gaussian at
/// `alpha = 2` it is `+8` at the origin.
pub fn negated_laplacian(expr: &Expr, vars: &[&str]) -> Expr {
    expand(simplify_neg(laplacian(expr, vars)))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GaussianReport {
    pub field: Expr,
    pub laplacian: Expr,
    pub laplacian_at_alpha: Expr,
    pub second_x_at_alpha: Expr,
}

impl GaussianReport {
    pub fn compute(symbols: &FieldSymbols, alpha_value: &Rational) -> Self {
        let field = gaussian_field(symbols);
        let alpha = symbols.alpha.name();
        let value = Expr::rational(alpha_value.clone());

        let laplacian = negated_laplacian(&field, &symbols.spatial());
        debug!("gaussian: negated laplacian {laplacian}");

        let laplacian_at_alpha = normalize(substitute(&laplacian, alpha, &value));
        debug!("gaussian: laplacian with {alpha}={alpha_value} is {laplacian_at_alpha}");

        let x = symbols.x.name();
        let second_x = differentiate_n(&field, &[x, x]);
        let second_x_at_alpha = normalize(substitute(&second_x, alpha, &value));
        debug!("gaussian: d2/d{x}2 with {alpha}={alpha_value} is {second_x_at_alpha}");

        GaussianReport {
            field,
            laplacian,
            laplacian_at_alpha,
            second_x_at_alpha,
        }
    }

    /// Reported expressions, in report order.
    pub fn expressions(&self) -> [&Expr; 4] {
        [
            &self.field,
            &self.laplacian,
            &self.laplacian_at_alpha,
            &self.second_x_at_alpha,
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaddleReport {
    pub field: Expr,
    pub hxx: Expr,
    pub hyy: Expr,
    pub sum: Expr,
}

impl SaddleReport {
    pub fn compute(symbols: &FieldSymbols) -> Self {
        let field = saddle_field(symbols);
        let (x, y) = (symbols.x.name(), symbols.y.name());
        let hxx = differentiate_n(&field, &[x, x]);
        let hyy = differentiate_n(&field, &[y, y]);
        let sum = simplify_add(hxx.clone(), hyy.clone());
        debug!("saddle: hxx={hxx} hyy={hyy} sum={sum}");
        SaddleReport {
            field,
            hxx,
            hyy,
            sum,
        }
    }

    /// Reported expressions, in report order. The field itself is not reported.
    pub fn expressions(&self) -> [&Expr; 3] {
        [&self.hxx, &self.hyy, &self.sum]
    }
}

/// Compute both fields and send the seven results to `reporter`, then finish it.
pub fn run<R: Reporter>(reporter: &mut R, config: &EvaluatorConfig) -> Result<()> {
    let symbols = FieldSymbols::declare()?;

    let gaussian = GaussianReport::compute(&symbols, &config.alpha_value);
    for expr in gaussian.expressions() {
        reporter.report(&config.label, expr)?;
    }

    let saddle = SaddleReport::compute(&symbols);
    for expr in saddle.expressions() {
        reporter.report(&config.label, expr)?;
    }

    debug!("reported {} expressions", gaussian.expressions().len() + saddle.expressions().len());
    reporter.finish()
}
