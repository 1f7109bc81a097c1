use crate::error::{CasError, Result};
use crate::expr::{Expr, Rational};
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, char, digit1, multispace0, satisfy};
use nom::combinator::{all_consuming, map, map_res, opt, recognize};
use nom::error::VerboseError;
use nom::multi::{fold_many0, many0_count};
use nom::sequence::{delimited, pair, preceded};
use num_bigint::BigInt;
use num_traits::Num;

/// Parse infix text such as `exp(-alpha*(x^2 + y^2))` into an expression.
pub fn parse_expr(input: &str) -> Result<Expr> {
    match all_consuming(ws(parse_add_sub))(input) {
        Ok((_, expr)) => Ok(expr),
        Err(e) => Err(CasError::Parse(format!("{e:?}"))),
    }
}

fn parse_add_sub(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    let (rest, init) = parse_mul_div(input)?;
    fold_many0(
        pair(ws(alt((char('+'), char('-')))), parse_mul_div),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '+' => Expr::Add(acc.boxed(), rhs.boxed()),
            _ => Expr::Sub(acc.boxed(), rhs.boxed()),
        },
    )(rest)
}

fn parse_mul_div(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    let (rest, init) = parse_pow(input)?;
    fold_many0(
        pair(ws(alt((char('*'), char('/')))), parse_pow),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '*' => Expr::Mul(acc.boxed(), rhs.boxed()),
            _ => Expr::Div(acc.boxed(), rhs.boxed()),
        },
    )(rest)
}

fn parse_pow(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    let (rest, base) = parse_unary(input)?;
    if let Ok((next, exp)) = preceded(ws(char('^')), parse_pow_operand)(rest) {
        Ok((next, Expr::Pow(base.boxed(), exp.boxed())))
    } else {
        Ok((rest, base))
    }
}

// Exponents bind tighter than unary minus on the left: `-x^2` is `-(x^2)`,
// while `x^-1` still reads a signed exponent.
fn parse_pow_operand(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    if let Ok((rest, expr)) = preceded(ws(char('-')), parse_pow_operand)(input) {
        Ok((rest, Expr::Neg(expr.boxed())))
    } else {
        let (rest, base) = parse_primary(input)?;
        if let Ok((next, exp)) = preceded(ws(char('^')), parse_pow_operand)(rest) {
            Ok((next, Expr::Pow(base.boxed(), exp.boxed())))
        } else {
            Ok((rest, base))
        }
    }
}

fn parse_unary(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    if let Ok((rest, expr)) = preceded(ws(char('-')), parse_pow)(input) {
        Ok((rest, Expr::Neg(expr.boxed())))
    } else {
        parse_primary(input)
    }
}

fn parse_primary(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    alt((
        parse_parens,
        parse_function,
        parse_number,
        parse_identifier,
    ))(input)
}

fn parse_parens(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    delimited(ws(char('(')), parse_add_sub, ws(char(')')))(input)
}

fn parse_number(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    map(parse_int, |n| Expr::Constant(Rational::from_integer(n)))(input)
}

fn parse_identifier(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    map(ws(identifier), |s: &str| Expr::Variable(s.to_string()))(input)
}

fn identifier(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    recognize(pair(
        alpha1,
        many0_count(satisfy(|c| c.is_ascii_alphanumeric() || c == '_')),
    ))(input)
}

fn parse_function(input: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    let (rest, (name, arg)) = pair(
        ws(alt((tag("exp"), tag("log")))),
        delimited(ws(char('(')), parse_add_sub, ws(char(')'))),
    )(input)?;

    let expr = match name {
        "exp" => Expr::Exp(arg.boxed()),
        _ => Expr::Log(arg.boxed()),
    };

    Ok((rest, expr))
}

fn parse_int(input: &str) -> IResult<&str, BigInt, VerboseError<&str>> {
    map_res(ws(recognize(pair(opt(char('-')), digit1))), |s: &str| {
        BigInt::from_str_radix(s, 10)
    })(input)
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O, VerboseError<&'a str>>
where
    F: FnMut(&'a str) -> IResult<&'a str, O, VerboseError<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

#[cfg(test)]
mod parser_tests {
    use super::*;
    use crate::expr::{add, div, exp, mul, neg, pow, sub};
    use crate::simplify::simplify_fully;

    fn x() -> Expr {
        Expr::var("x")
    }

    #[test]
    fn parses_gaussian_field() {
        let got = parse_expr("exp(-alpha*(x^2 + y^2))").unwrap();
        let expected = exp(mul(
            neg(Expr::var("alpha")),
            add(pow(x(), Expr::integer(2)), pow(Expr::var("y"), Expr::integer(2))),
        ));
        assert_eq!(got, expected);
    }

    #[test]
    fn unary_minus_binds_looser_than_power() {
        assert_eq!(parse_expr("-x^2").unwrap(), neg(pow(x(), Expr::integer(2))));
        assert_eq!(
            parse_expr("x^-1").unwrap(),
            pow(x(), neg(Expr::integer(1)))
        );
    }

    #[test]
    fn parses_fractions_and_differences() {
        assert_eq!(
            parse_expr("x^2 - 1/2").unwrap(),
            sub(pow(x(), Expr::integer(2)), div(Expr::integer(1), Expr::integer(2)))
        );
    }

    #[test]
    fn division_is_left_associative() {
        let chained = simplify_fully(parse_expr("x/2/3").unwrap());
        assert_eq!(chained, simplify_fully(parse_expr("(x/2)/3").unwrap()));
        assert_eq!(chained, mul(Expr::constant(1, 6), x()));
        assert_eq!(
            simplify_fully(parse_expr("x/1/2").unwrap()),
            mul(Expr::constant(1, 2), x())
        );
    }

    #[test]
    fn identifiers_may_start_with_function_names() {
        assert_eq!(parse_expr("exponent").unwrap(), Expr::var("exponent"));
        assert_eq!(parse_expr("logx").unwrap(), Expr::var("logx"));
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(matches!(parse_expr("x +"), Err(CasError::Parse(_))));
        assert!(matches!(parse_expr("exp(x"), Err(CasError::Parse(_))));
    }

    #[test]
    fn zero_denominator_is_kept_as_division() {
        let expr = parse_expr("1/0").unwrap();
        assert_eq!(expr, div(Expr::integer(1), Expr::integer(0)));
        assert_eq!(simplify_fully(expr.clone()), expr);
    }
}
