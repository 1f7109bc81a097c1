use crate::expr::Expr;
use num_rational::BigRational;
use num_traits::Signed;

fn collect_mul_factors(expr: &Expr, out: &mut Vec<Expr>) {
    match expr {
        Expr::Mul(a, b) => {
            collect_mul_factors(a, out);
            collect_mul_factors(b, out);
        }
        other => out.push(other.clone()),
    }
}

fn rebuild_mul_factors(factors: Vec<Expr>) -> Expr {
    let mut iter = factors.into_iter();
    let Some(first) = iter.next() else {
        return Expr::Constant(BigRational::from_integer(1.into()));
    };
    iter.fold(first, |acc, item| Expr::Mul(acc.boxed(), item.boxed()))
}

/// Render `expr` as plain infix text, e.g. `4*alpha^2*x^2*exp(-alpha*x^2-alpha*y^2)`.
pub fn pretty(expr: &Expr) -> String {
    fn pp(ctx: u8, expr: &Expr) -> String {
        match expr {
            Expr::Variable(v) => v.clone(),
            Expr::Constant(r) => {
                let atomic = r.is_integer() && !r.is_negative();
                bracket(ctx, if atomic { 4 } else { 2 }, show_rational(r))
            }

            Expr::Add(a, b) => {
                let s_a = pp(1, a);
                let (neg_b, b_inner) = split_neg(b);
                let s_b = pp(2, &b_inner);
                let body = format!("{s_a}{}{}", if neg_b { "-" } else { "+" }, s_b);
                bracket(ctx, 1, body)
            }

            Expr::Sub(a, b) => {
                let s_a = pp(1, a);
                let (neg_b, b_inner) = split_neg(b);
                let s_b = pp(2, &b_inner);
                let body = format!("{s_a}{}{}", if neg_b { "+" } else { "-" }, s_b);
                bracket(ctx, 1, body)
            }

            Expr::Mul(_, _) => {
                let mut factors = Vec::new();
                collect_mul_factors(expr, &mut factors);
                let mut neg = false;
                let mut parts = Vec::with_capacity(factors.len());
                for factor in factors {
                    let (is_neg, inner) = split_neg(&factor);
                    neg ^= is_neg;
                    parts.push(pp(3, &inner));
                }
                let body = parts.join("*");
                if neg {
                    bracket(ctx, 2, format!("-{body}"))
                } else {
                    bracket(ctx, 2, body)
                }
            }

            Expr::Div(a, b) => {
                let (na, a_inner) = split_neg(a);
                let (nb, b_inner) = split_neg(b);
                let body = format!("{}/{}", pp(2, &a_inner), pp(3, &b_inner));
                if na ^ nb {
                    bracket(ctx, 2, format!("-{body}"))
                } else {
                    bracket(ctx, 2, body)
                }
            }

            Expr::Pow(a, b) => bracket(ctx, 3, format!("{}^{}", pp(4, a), pp(4, b))),

            Expr::Neg(a) => {
                let (is_neg, inner) = split_neg(a);
                if is_neg {
                    pp(ctx, &inner)
                } else {
                    bracket(ctx, 2, format!("-{}", pp(2, &inner)))
                }
            }

            Expr::Exp(a) => format!("exp({})", pp(0, a)),
            Expr::Log(a) => format!("log({})", pp(0, a)),
        }
    }

    pp(0, expr)
}

fn split_neg(expr: &Expr) -> (bool, Expr) {
    match expr {
        Expr::Neg(inner) => (true, *inner.clone()),
        Expr::Constant(r) if r < &BigRational::from_integer(0.into()) => {
            (true, Expr::Constant(-r))
        }
        Expr::Mul(_, _) => {
            let mut factors = Vec::new();
            collect_mul_factors(expr, &mut factors);
            let mut neg = false;
            let mut cleaned = Vec::with_capacity(factors.len());
            for factor in factors {
                let (is_neg, inner) = split_neg(&factor);
                neg ^= is_neg;
                cleaned.push(inner);
            }
            if neg {
                (true, rebuild_mul_factors(cleaned))
            } else {
                (false, expr.clone())
            }
        }
        other => (false, other.clone()),
    }
}

fn bracket(ctx: u8, prec: u8, body: String) -> String {
    if prec < ctx {
        format!("({body})")
    } else {
        body
    }
}

fn show_rational(r: &BigRational) -> String {
    let n = r.numer().clone();
    let d = r.denom().clone();
    if d == 1.into() {
        format!("{n}")
    } else if n < 0.into() {
        format!("-{}/{}", -n, d)
    } else {
        format!("{}/{}", n, d)
    }
}

#[cfg(test)]
mod pretty_tests {
    use super::*;
    use crate::parser::parse_expr;

    fn parsed(input: &str) -> Expr {
        parse_expr(input).unwrap()
    }

    fn render(input: &str) -> String {
        pretty(&parse_expr(input).unwrap())
    }

    #[test]
    fn keeps_needed_parentheses_only() {
        assert_eq!(render("exp(-alpha*(x^2 + y^2))"), "exp(-alpha*(x^2+y^2))");
        assert_eq!(render("x^2 - y^2"), "x^2-y^2");
        assert_eq!(render("(x + 1)^2"), "(x+1)^2");
    }

    #[test]
    fn negative_coefficients_read_naturally() {
        assert_eq!(render("-4*x"), "-4*x");
        assert_eq!(render("a + -2*b"), "a-2*b");
        assert_eq!(render("x^-1"), "x^(-1)");
    }

    #[test]
    fn negated_products_need_no_parentheses() {
        let arg = Expr::Add(
            Expr::Neg(parsed("alpha*x^2").boxed()).boxed(),
            Expr::Neg(parsed("alpha*y^2").boxed()).boxed(),
        );
        assert_eq!(pretty(&Expr::Exp(arg.boxed())), "exp(-alpha*x^2-alpha*y^2)");
        assert_eq!(render("-(x + y)"), "-(x+y)");
    }

    #[test]
    fn fractions_in_products_are_grouped() {
        let half_x = Expr::Mul(Expr::constant(1, 2).boxed(), Expr::var("x").boxed());
        assert_eq!(pretty(&half_x), "(1/2)*x");
        assert_eq!(pretty(&Expr::constant(3, 4)), "3/4");
    }
}
