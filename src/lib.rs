//! Translates Content MathML into symbolic expression trees.
//!
//! ```
//! use mml2expr::{translate, Expr};
//!
//! let expr = translate("<math><apply><minus/><ci>x</ci><ci>y</ci></apply></math>").unwrap();
//! assert_eq!(
//!     expr,
//!     Expr::make_add(vec![Expr::symbol("x"), Expr::symbol("y").negate()]),
//! );
//! ```

pub mod error;
pub mod expr;
pub mod number;
pub mod translate;
pub mod vocabulary;

#[cfg(test)]
mod tests;

pub use crate::{
    number::Number,
    expr::{Expr, Function, Constant, evaluate::{Evaluable, EvaluationSettings}},
    translate::{translate, Translator, TranslatorSettings},
    vocabulary::Vocabulary,
};

pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");
