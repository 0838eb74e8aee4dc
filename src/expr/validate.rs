//! The well-formedness check run on every tree handed out by the translator or the reader.

use num_traits::Zero;

use crate::{Number, error::ValidationError, number::MAX_PRECISION};

use super::Expr;

impl Expr {
    /// Checks that every application in this tree has an acceptable number of arguments, that
    /// rationals have non-zero denominators, and that floats have a precision `Decimal` can hold.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Expr::Apply(f, args) => {
                f.check_arity(args.len())?;
                args.iter().try_for_each(Expr::validate)
            }

            Expr::Number(Number::Rational(n, d)) if d.is_zero() => Err(ValidationError::ZeroDenominator(n.clone())),
            Expr::Number(Number::Float(f)) if f.precision() == 0 || f.precision() > MAX_PRECISION =>
                Err(ValidationError::Precision { text: f.text().to_string(), precision: f.precision() }),

            Expr::Number(_) | Expr::Symbol(_) | Expr::Constant(_) => Ok(()),
        }
    }
}
