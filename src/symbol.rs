//! Named scalar indeterminates.

use std::fmt;

use crate::error::{CasError, Result};
use crate::expr::Expr;

/// A named symbol. Two symbols with the same name are the same symbol.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Symbol {
    name: String,
}

impl Symbol {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(CasError::InvalidSymbol(name));
        }
        Ok(Symbol { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expr(&self) -> Expr {
        Expr::Variable(self.name.clone())
    }
}

impl From<&Symbol> for Expr {
    fn from(symbol: &Symbol) -> Self {
        symbol.expr()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Declare several symbols from a whitespace-separated list, e.g. `"x y"`.
pub fn symbols(names: &str) -> Result<Vec<Symbol>> {
    names.split_whitespace().map(Symbol::new).collect()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
