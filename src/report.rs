//! Output channels for reported expressions.

use std::io::Write;

use crate::error::Result;
use crate::expr::Expr;
use crate::format::{latex, pretty};

/// Receives each reported expression and is told once when the run is over.
pub trait Reporter {
    fn report(&mut self, label: &str, expr: &Expr) -> Result<()>;

    /// Flush or close the output channel. Called exactly once, after the last report.
    fn finish(&mut self) -> Result<()>;
}

/// Writes one plain-text line per expression.
pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        TextReporter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, label: &str, expr: &Expr) -> Result<()> {
        if label.is_empty() {
            writeln!(self.out, "{}", pretty(expr))?;
        } else {
            writeln!(self.out, "{label}: {}", pretty(expr))?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Collects display-math blocks and writes a complete LaTeX document on `finish`.
pub struct LatexReporter<W: Write> {
    out: W,
    blocks: Vec<String>,
}

impl<W: Write> LatexReporter<W> {
    pub fn new(out: W) -> Self {
        LatexReporter {
            out,
            blocks: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for LatexReporter<W> {
    fn report(&mut self, label: &str, expr: &Expr) -> Result<()> {
        let block = if label.is_empty() {
            format!("\\[\n{}\n\\]", latex(expr))
        } else {
            format!("\\[\n\\text{{{label}}} \\quad {}\n\\]", latex(expr))
        };
        self.blocks.push(block);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.out, "\\documentclass{{article}}")?;
        writeln!(self.out, "\\usepackage{{amsmath}}")?;
        writeln!(self.out, "\\begin{{document}}")?;
        for block in self.blocks.drain(..) {
            writeln!(self.out, "{block}")?;
        }
        writeln!(self.out, "\\end{{document}}")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps every reported expression in memory.
#[derive(Clone, Debug, Default)]
pub struct RecordingReporter {
    pub entries: Vec<(String, Expr)>,
    pub finish_calls: usize,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expressions(&self) -> impl Iterator<Item = &Expr> {
        self.entries.iter().map(|(_, expr)| expr)
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, label: &str, expr: &Expr) -> Result<()> {
        self.entries.push((label.to_string(), expr.clone()));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finish_calls += 1;
        Ok(())
    }
}
