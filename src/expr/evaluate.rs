//! Numeric evaluation of expression trees.
//!
//! This exists so that properties of translated trees can be checked by value ("the root of 8
//! with degree 3 is 2") as well as by shape. Evaluation is done in `f64` and never rewrites the
//! tree.

use std::collections::HashMap;

use crate::error::MathsError;

use super::{Expr, Function};

/// Settings needed for evaluation: currently just the values bound to free symbols.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationSettings {
    pub variables: HashMap<String, f64>,
}

impl EvaluationSettings {
    /// Returns these settings with `name` bound to `value`, to allow chaining.
    pub fn with_variable(mut self, name: impl Into<String>, value: f64) -> Self {
        self.variables.insert(name.into(), value);
        self
    }
}

/// Something which can be evaluated into a number, optionally with variables substituted into it.
pub trait Evaluable {
    /// Evaluates this expression and returns either the result, or a [MathsError] if evaluation
    /// was not successful.
    fn evaluate(&self, settings: &EvaluationSettings) -> Result<f64, MathsError>;

    /// Substitutes the named symbol with a given expression, and returns a new evaluable
    /// expression.
    fn substitute(&self, variable: &str, value: &Expr) -> Self;
}

impl Evaluable for Expr {
    fn evaluate(&self, settings: &EvaluationSettings) -> Result<f64, MathsError> {
        match self {
            Expr::Number(n) => Ok(n.to_f64()),
            Expr::Constant(c) => Ok(c.value()),
            Expr::Symbol(name) => settings.variables.get(name)
                .copied()
                .ok_or_else(|| MathsError::MissingVariable(name.clone())),

            Expr::Apply(f, args) => {
                // Trees from the translator are already validated, but hand-built ones may not be
                f.check_arity(args.len()).map_err(|_| MathsError::Unsupported(f.name()))?;

                // Sum binds its index variable, so its arguments can't be evaluated up front
                if *f == Function::Sum {
                    return Err(MathsError::Unsupported(f.name()))
                }

                let values = args.iter()
                    .map(|a| a.evaluate(settings))
                    .collect::<Result<Vec<_>, _>>()?;
                f.evaluate(&values)
            }
        }
    }

    fn substitute(&self, variable: &str, value: &Expr) -> Self {
        match self {
            Expr::Symbol(name) if name == variable => value.clone(),
            Expr::Apply(f, args) => Expr::Apply(
                *f,
                args.iter().map(|a| a.substitute(variable, value)).collect(),
            ),
            Expr::Number(_) | Expr::Symbol(_) | Expr::Constant(_) => self.clone(),
        }
    }
}
