use num_bigint::BigInt;
use thiserror::Error;

/// An error which aborts the translation of a MathML fragment. No partial tree is ever returned
/// alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The fragment left after stripping the `<math>` wrapper is not well-formed XML.
    #[error("malformed markup: {0}")]
    MalformedMarkup(String),

    /// The operator tag is not in the vocabulary, or is a relation/calculus tag.
    #[error("{0} is not currently supported")]
    UnsupportedOperator(String),

    /// An `apply` element has the wrong number of children for its operator.
    #[error("`{operator}` expected {expected}, but found {found}")]
    StructuralMismatch {
        operator: String,
        expected: &'static str,
        found: usize,
    },

    /// A `cn`/`ci` leaf holds a float whose exponent does not fit in an `i32`.
    #[error("numeric literal `{0}` is out of range")]
    LiteralOverflow(String),

    /// Elements are nested deeper than `TranslatorSettings::max_depth`.
    #[error("expression nesting exceeds the maximum depth of {0}")]
    DepthExceeded(usize),

    /// The assembled tree is not well-formed for the expression engine.
    #[error("translated expression is not well-formed: {0}")]
    HostValidationFailure(#[from] ValidationError),
}

/// A well-formedness violation found by [Expr::validate](crate::expr::Expr::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{function} takes {expected} arguments, but was given {found}")]
    Arity {
        function: &'static str,
        expected: &'static str,
        found: usize,
    },

    #[error("rational {0}/0 has a zero denominator")]
    ZeroDenominator(BigInt),

    #[error("float `{text}` has a precision of {precision} digits, must be between 1 and 28")]
    Precision { text: String, precision: u32 },

    #[error("`{0}` cannot be applied to arguments")]
    NotCallable(String),
}

/// An error from reading the text form produced by [Expr::srepr](crate::expr::Expr::srepr).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected character `{found}` at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("unknown constructor `{name}` at offset {offset}")]
    UnknownConstructor { name: String, offset: usize },

    #[error("invalid literal `{text}` at offset {offset}")]
    InvalidLiteral { text: String, offset: usize },

    #[error("unexpected tokens at end, starting at offset {0}")]
    UnexpectedTokensAtEnd(usize),

    #[error("expression nesting exceeds the maximum depth of {0}")]
    DepthExceeded(usize),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// An error encountered while numerically evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathsError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("no value was given for variable `{0}`")]
    MissingVariable(String),

    #[error("{0} is undefined for this argument")]
    Domain(&'static str),

    #[error("{0} cannot be evaluated numerically")]
    Unsupported(&'static str),
}
