//! Property-based tests for canonical forms.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::calculus::{differentiate, differentiate_n};
    use crate::config::EvaluatorConfig;
    use crate::expr::{Expr, add, exp, mul, neg, pow};
    use crate::format::pretty;
    use crate::laplacian::run;
    use crate::report::RecordingReporter;
    use crate::simplify::{expand, normalize, simplify, simplify_fully};

    // Strategy for a monomial c * x^i * y^j * alpha^k, optionally times exp(-m*(x^2 + y^2)).
    fn monomial() -> impl Strategy<Value = Expr> {
        (
            prop_oneof![-6i64..=-1, 1i64..=6],
            0u32..3,
            0u32..3,
            0u32..3,
            proptest::option::of(1i64..4),
        )
            .prop_map(|(c, i, j, k, gauss)| {
                let mut term = Expr::integer(c);
                for (name, power) in [("x", i), ("y", j), ("alpha", k)] {
                    if power > 0 {
                        term = mul(term, pow(Expr::var(name), Expr::integer(power)));
                    }
                }
                if let Some(m) = gauss {
                    let r2 = add(
                        pow(Expr::var("x"), Expr::integer(2)),
                        pow(Expr::var("y"), Expr::integer(2)),
                    );
                    term = mul(term, exp(mul(neg(Expr::integer(m)), r2)));
                }
                term
            })
    }

    // Strategy for small sums of monomials.
    fn field() -> impl Strategy<Value = Expr> {
        proptest::collection::vec(monomial(), 1..=4).prop_map(|terms| {
            terms
                .into_iter()
                .reduce(add)
                .unwrap_or_else(|| Expr::integer(0))
        })
    }

    proptest! {
        #[test]
        fn simplify_fully_is_a_fixed_point(e in field()) {
            let once = simplify_fully(e);
            prop_assert_eq!(simplify(once.clone()), once);
        }

        #[test]
        fn normalize_is_idempotent(e in field()) {
            let once = normalize(e);
            prop_assert_eq!(normalize(once.clone()), once);
        }

        #[test]
        fn normalize_preserves_the_canonical_form(e in field()) {
            prop_assert_eq!(simplify_fully(normalize(e.clone())), simplify_fully(e));
        }

        #[test]
        fn expand_agrees_with_simplify_on_sums_of_monomials(e in field()) {
            prop_assert_eq!(expand(e.clone()), simplify_fully(e));
        }

        #[test]
        fn mixed_partials_commute(e in field()) {
            let xy = differentiate_n(&e, &["x", "y"]);
            let yx = differentiate_n(&e, &["y", "x"]);
            prop_assert_eq!(xy, yx);
        }

        #[test]
        fn derivative_is_linear(a in field(), b in field()) {
            let lhs = simplify_fully(differentiate("x", &add(a.clone(), b.clone())));
            let rhs = simplify_fully(add(differentiate("x", &a), differentiate("x", &b)));
            prop_assert_eq!(lhs, rhs);
        }
    }

    #[test]
    fn repeated_runs_render_identically() {
        let render = || {
            let mut reporter = RecordingReporter::new();
            run(&mut reporter, &EvaluatorConfig::default()).unwrap();
            reporter.expressions().map(pretty).collect::<Vec<_>>()
        };
        assert_eq!(render(), render());
    }
}
