use crate::expr::{Expr, Rational, zero};
use crate::simplify::{simplify, simplify_add, simplify_fully, simplify_neg, simplify_sub};
use num_traits::{One, Zero};

/// Partial derivative of `expr` with respect to `var`.
pub fn differentiate(var: &str, expr: &Expr) -> Expr {
    Differentiator { var }.derive(expr)
}

/// Differentiate repeatedly, once per entry of `vars`, in order.
///
/// `differentiate_n(h, &["x", "x"])` is the second partial in `x`; mixed
/// partials are written by listing different variables.
pub fn differentiate_n(expr: &Expr, vars: &[&str]) -> Expr {
    simplify_fully(
        vars.iter()
            .fold(expr.clone(), |acc, var| differentiate(var, &acc)),
    )
}

/// Sum of the unmixed second partials of `expr` over `vars`.
pub fn laplacian(expr: &Expr, vars: &[&str]) -> Expr {
    let sum = vars
        .iter()
        .map(|var| differentiate_n(expr, &[*var, *var]))
        .fold(zero(), simplify_add);
    simplify_fully(sum)
}

struct Differentiator<'a> {
    var: &'a str,
}

impl<'a> Differentiator<'a> {
    fn derive(&self, expr: &Expr) -> Expr {
        if !expr.contains_var(self.var) {
            return Expr::Constant(Rational::zero());
        }

        match expr {
            Expr::Variable(name) if name == self.var => Expr::Constant(Rational::one()),
            Expr::Variable(_) => Expr::Constant(Rational::zero()),
            Expr::Constant(_) => Expr::Constant(Rational::zero()),

            Expr::Add(a, b) => simplify_add(self.derive(a), self.derive(b)),
            Expr::Sub(a, b) => simplify_sub(self.derive(a), self.derive(b)),
            Expr::Mul(a, b) => self.product_rule(a, b),
            Expr::Div(a, b) => self.quotient_rule(a, b),
            Expr::Pow(a, b) => self.power_rule(a, b),
            Expr::Neg(a) => simplify_neg(self.derive(a)),

            Expr::Exp(a) => self.chain_rule(a, |inner| Expr::Exp(inner.boxed())),
            Expr::Log(a) => simplify(Expr::Div(self.derive(a).boxed(), a.clone())),
        }
    }

    fn product_rule(&self, a: &Expr, b: &Expr) -> Expr {
        let da = self.derive(a);
        let db = self.derive(b);
        simplify(Expr::Add(
            Expr::Mul(da.boxed(), b.clone().boxed()).boxed(),
            Expr::Mul(a.clone().boxed(), db.boxed()).boxed(),
        ))
    }

    fn quotient_rule(&self, a: &Expr, b: &Expr) -> Expr {
        simplify(Expr::Div(
            Expr::Sub(
                Expr::Mul(self.derive(a).boxed(), b.clone().boxed()).boxed(),
                Expr::Mul(a.clone().boxed(), self.derive(b).boxed()).boxed(),
            )
            .boxed(),
            Expr::Pow(
                b.clone().boxed(),
                Expr::Constant(Rational::from_integer(2.into())).boxed(),
            )
            .boxed(),
        ))
    }

    fn power_rule(&self, base: &Expr, exp: &Expr) -> Expr {
        match exp {
            Expr::Constant(n) => {
                let db = self.derive(base);
                simplify(Expr::Mul(
                    Expr::Mul(
                        Expr::Constant(n.clone()).boxed(),
                        Expr::Pow(
                            base.clone().boxed(),
                            Expr::Constant(n - Rational::one()).boxed(),
                        )
                        .boxed(),
                    )
                    .boxed(),
                    db.boxed(),
                ))
            }
            _ => {
                // d(f^g) = f^g * (g' log f + g f' / f)
                let f = Expr::Pow(base.clone().boxed(), exp.clone().boxed());
                let da = self.derive(base);
                let db = self.derive(exp);
                simplify(Expr::Mul(
                    f.boxed(),
                    Expr::Add(
                        Expr::Mul(db.boxed(), Expr::Log(base.clone().boxed()).boxed()).boxed(),
                        Expr::Div(
                            Expr::Mul(exp.clone().boxed(), da.boxed()).boxed(),
                            base.clone().boxed(),
                        )
                        .boxed(),
                    )
                    .boxed(),
                ))
            }
        }
    }

    fn chain_rule<F>(&self, arg: &Expr, outer: F) -> Expr
    where
        F: Fn(Expr) -> Expr,
    {
        let da = self.derive(arg);
        simplify(Expr::Mul(da.boxed(), outer(arg.clone()).boxed()))
    }
}
