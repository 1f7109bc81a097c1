#![allow(dead_code)]

use lapcas::Expr;
use num_traits::ToPrimitive;

/// Evaluate `expr` numerically with the given symbol values.
pub fn eval_expr_f64(expr: &Expr, env: &[(&str, f64)]) -> Option<f64> {
    let value = match expr {
        Expr::Constant(c) => c.to_f64()?,
        Expr::Variable(v) => env.iter().find(|(name, _)| name == v).map(|(_, x)| *x)?,
        Expr::Add(a, b) => eval_expr_f64(a, env)? + eval_expr_f64(b, env)?,
        Expr::Sub(a, b) => eval_expr_f64(a, env)? - eval_expr_f64(b, env)?,
        Expr::Mul(a, b) => eval_expr_f64(a, env)? * eval_expr_f64(b, env)?,
        Expr::Div(a, b) => eval_expr_f64(a, env)? / eval_expr_f64(b, env)?,
        Expr::Pow(base, exp) => eval_expr_f64(base, env)?.powf(eval_expr_f64(exp, env)?),
        Expr::Neg(inner) => -eval_expr_f64(inner, env)?,
        Expr::Exp(inner) => eval_expr_f64(inner, env)?.exp(),
        Expr::Log(inner) => eval_expr_f64(inner, env)?.ln(),
    };
    value.is_finite().then_some(value)
}

pub const SAMPLE_POINTS: &[(f64, f64)] = &[
    (0.0, 0.0),
    (1.0, 0.0),
    (0.0, 1.0),
    (0.5, -0.25),
    (-1.5, 0.75),
    (2.0, 1.0),
];

/// Assert `got` and `expected` agree at every sample point in `x`, `y`.
pub fn assert_agree_on_samples(got: &Expr, expected: &Expr, extra: &[(&str, f64)]) {
    for &(x, y) in SAMPLE_POINTS {
        let mut env = vec![("x", x), ("y", y)];
        env.extend_from_slice(extra);
        let a = eval_expr_f64(got, &env).expect("evaluate result");
        let b = eval_expr_f64(expected, &env).expect("evaluate expected");
        assert!(
            (a - b).abs() <= 1e-9 * (1.0 + b.abs()),
            "mismatch at x={x}, y={y}: got {a}, expected {b}"
        );
    }
}
