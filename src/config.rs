use crate::expr::Rational;

/// Settings for a Laplacian evaluation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Value substituted for `alpha` before simplifying the Gaussian results.
    pub alpha_value: Rational,
    /// Label passed with every reported expression.
    pub label: String,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        EvaluatorConfig {
            alpha_value: Rational::from_integer(2.into()),
            label: String::new(),
        }
    }
}
