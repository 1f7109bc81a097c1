mod common;

use common::assert_agree_on_samples;
use lapcas::{differentiate, differentiate_n, laplacian_of, parse_expr, simplify_fully, Expr};

fn assert_diff_eq(var: &str, input: &str, expected: &str) {
    let expr = parse_expr(input).expect("parse input");
    let got = simplify_fully(differentiate(var, &expr));
    let expected_expr = simplify_fully(parse_expr(expected).expect("parse expected"));
    assert_eq!(got, expected_expr, "d/d{var} {input}");
}

#[test]
fn basic_vars_and_constants() {
    assert_diff_eq("x", "x", "1");
    assert_diff_eq("x", "y", "0");
    assert_diff_eq("x", "5", "0");
    assert_diff_eq("x", "alpha*y", "0");
}

#[test]
fn polynomials_and_products() {
    assert_diff_eq("x", "x^3", "3*x^2");
    assert_diff_eq("x", "x*y", "y");
    assert_diff_eq("x", "2*x^2+3*x", "4*x+3");
    assert_diff_eq("y", "x^2 - y^2", "-2*y");
}

#[test]
fn exponentials_and_logs() {
    assert_diff_eq("x", "exp(x^2)", "2*x*exp(x^2)");
    assert_diff_eq("x", "exp(-alpha*(x^2+y^2))", "-2*alpha*x*exp(-alpha*x^2-alpha*y^2)");
    assert_diff_eq("x", "log(x)", "1/x");
}

#[test]
fn general_power_rule() {
    assert_diff_eq("x", "x^x", "x^x*(log(x)+1)");
}

#[test]
fn quotient_rule_matches_numerically() {
    let expr = parse_expr("x/(1 + y^2)").unwrap();
    let got = differentiate("y", &expr);
    let expected = parse_expr("-2*x*y/(1 + y^2)^2").unwrap();
    assert_agree_on_samples(&got, &expected, &[]);
}

#[test]
fn repeated_derivatives_follow_argument_order() {
    let h = parse_expr("x^3*y^2").unwrap();
    assert_eq!(
        differentiate_n(&h, &["x", "x"]),
        simplify_fully(parse_expr("6*x*y^2").unwrap())
    );
    assert_eq!(
        differentiate_n(&h, &["x", "y"]),
        simplify_fully(parse_expr("6*x^2*y").unwrap())
    );
    assert_eq!(differentiate_n(&h, &[]), simplify_fully(h.clone()));
}

#[test]
fn laplacian_of_paraboloid_is_constant() {
    let h = parse_expr("x^2 + y^2").unwrap();
    assert_eq!(laplacian_of(&h, &["x", "y"]), Expr::integer(4));
}

#[test]
fn saddle_is_harmonic() {
    let h = parse_expr("x^2 - y^2").unwrap();
    assert_eq!(laplacian_of(&h, &["x", "y"]), Expr::integer(0));
}

#[test]
fn gaussian_second_derivative_in_x() {
    let h = parse_expr("exp(-2*(x^2+y^2))").unwrap();
    let got = differentiate_n(&h, &["x", "x"]);
    let expected = parse_expr("(16*x^2 - 4)*exp(-2*x^2-2*y^2)").unwrap();
    assert_eq!(got, simplify_fully(expected.clone()));
    assert_agree_on_samples(&got, &expected, &[]);
}
