use crate::expr::Expr;
use num_rational::BigRational;
use num_traits::Signed;

const GREEK: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lambda", "mu", "nu", "xi", "pi", "rho", "sigma", "tau", "upsilon", "phi", "chi", "psi",
    "omega", "Gamma", "Delta", "Theta", "Lambda", "Xi", "Pi", "Sigma", "Upsilon", "Phi", "Psi",
    "Omega",
];

/// Render `expr` as LaTeX math (without the surrounding `$` or `\[`).
///
/// Greek symbol names become their LaTeX commands, so `alpha` prints as `\alpha`.
pub fn latex(expr: &Expr) -> String {
    fn tex(ctx: u8, expr: &Expr) -> String {
        match expr {
            Expr::Variable(v) => symbol(v),
            Expr::Constant(r) => {
                let atomic = r.is_integer() && !r.is_negative();
                bracket(ctx, if atomic { 4 } else { 2 }, show_rational(r))
            }

            Expr::Add(a, b) | Expr::Sub(a, b) => {
                let negate = matches!(expr, Expr::Sub(_, _));
                let (neg_b, b_inner) = split_neg(b);
                let op = if neg_b ^ negate { "-" } else { "+" };
                bracket(ctx, 1, format!("{} {op} {}", tex(1, a), tex(2, &b_inner)))
            }

            Expr::Mul(_, _) => {
                let mut factors = Vec::new();
                collect_mul_factors(expr, &mut factors);
                let mut neg = false;
                let mut body = String::new();
                for factor in factors {
                    let (is_neg, inner) = split_neg(&factor);
                    neg ^= is_neg;
                    let part = tex(3, &inner);
                    if !body.is_empty() {
                        let numeric_run = body.ends_with(|c: char| c.is_ascii_digit())
                            && part.starts_with(|c: char| c.is_ascii_digit());
                        body.push_str(if numeric_run { " \\cdot " } else { " " });
                    }
                    body.push_str(&part);
                }
                if neg {
                    bracket(ctx, 2, format!("-{body}"))
                } else {
                    bracket(ctx, 2, body)
                }
            }

            Expr::Div(a, b) => {
                let (na, a_inner) = split_neg(a);
                let (nb, b_inner) = split_neg(b);
                let body = format!("\\frac{{{}}}{{{}}}", tex(0, &a_inner), tex(0, &b_inner));
                if na ^ nb {
                    bracket(ctx, 2, format!("-{body}"))
                } else {
                    body
                }
            }

            Expr::Pow(a, b) => bracket(ctx, 3, format!("{}^{{{}}}", tex(4, a), tex(0, b))),

            Expr::Neg(a) => {
                let (is_neg, inner) = split_neg(a);
                if is_neg {
                    tex(ctx, &inner)
                } else {
                    bracket(ctx, 2, format!("-{}", tex(3, &inner)))
                }
            }

            Expr::Exp(a) => bracket(ctx, 3, format!("e^{{{}}}", tex(0, a))),
            Expr::Log(a) => format!("\\log\\left({}\\right)", tex(0, a)),
        }
    }

    tex(0, expr)
}

fn symbol(name: &str) -> String {
    if GREEK.contains(&name) {
        format!("\\{name}")
    } else if name.chars().count() > 1 {
        format!("\\mathrm{{{name}}}")
    } else {
        name.to_string()
    }
}

fn collect_mul_factors(expr: &Expr, out: &mut Vec<Expr>) {
    match expr {
        Expr::Mul(a, b) => {
            collect_mul_factors(a, out);
            collect_mul_factors(b, out);
        }
        other => out.push(other.clone()),
    }
}

fn split_neg(expr: &Expr) -> (bool, Expr) {
    match expr {
        Expr::Neg(inner) => (true, *inner.clone()),
        Expr::Constant(r) if r.is_negative() => (true, Expr::Constant(-r)),
        Expr::Mul(a, b) => {
            let (na, a_inner) = split_neg(a);
            let (nb, b_inner) = split_neg(b);
            if na ^ nb {
                (true, Expr::Mul(a_inner.boxed(), b_inner.boxed()))
            } else {
                (false, expr.clone())
            }
        }
        other => (false, other.clone()),
    }
}

fn bracket(ctx: u8, prec: u8, body: String) -> String {
    if prec < ctx {
        format!("\\left({body}\\right)")
    } else {
        body
    }
}

fn show_rational(r: &BigRational) -> String {
    if r.is_integer() {
        format!("{}", r.numer())
    } else if r.is_negative() {
        format!("-\\frac{{{}}}{{{}}}", -r.numer(), r.denom())
    } else {
        format!("\\frac{{{}}}{{{}}}", r.numer(), r.denom())
    }
}
