use crate::error::{MathsError, ValidationError};

/// A function or operator which may be applied to arguments in an expression tree.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub enum Function {
    Add,
    Mul,
    Pow,
    Max,
    Min,
    Abs,
    Floor,
    Ceiling,
    Exp,
    Log,
    Sum,

    Sin, Cos, Tan, Sec, Csc, Cot,
    Sinh, Cosh, Tanh, Sech, Csch, Coth,

    Asin, Acos, Atan, Asec, Acsc, Acot,
    Asinh, Acosh, Atanh, Asech, Acsch, Acoth,
}

/// The plain trigonometric and hyperbolic functions, in the same order as their inverses in
/// `INVERSE_TRIG`.
pub const TRIG: [Function; 12] = [
    Function::Sin, Function::Cos, Function::Tan, Function::Sec, Function::Csc, Function::Cot,
    Function::Sinh, Function::Cosh, Function::Tanh, Function::Sech, Function::Csch, Function::Coth,
];

pub const INVERSE_TRIG: [Function; 12] = [
    Function::Asin, Function::Acos, Function::Atan, Function::Asec, Function::Acsc, Function::Acot,
    Function::Asinh, Function::Acosh, Function::Atanh, Function::Asech, Function::Acsch, Function::Acoth,
];

/// Every function, used for name lookups.
pub const ALL: [Function; 35] = [
    Function::Add, Function::Mul, Function::Pow, Function::Max, Function::Min, Function::Abs,
    Function::Floor, Function::Ceiling, Function::Exp, Function::Log, Function::Sum,
    Function::Sin, Function::Cos, Function::Tan, Function::Sec, Function::Csc, Function::Cot,
    Function::Sinh, Function::Cosh, Function::Tanh, Function::Sech, Function::Csch, Function::Coth,
    Function::Asin, Function::Acos, Function::Atan, Function::Asec, Function::Acsc, Function::Acot,
    Function::Asinh, Function::Acosh, Function::Atanh, Function::Asech, Function::Acsch, Function::Acoth,
];

impl Function {
    /// The name used for this function when an expression is printed or read back.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Mul => "Mul",
            Self::Pow => "Pow",
            Self::Max => "Max",
            Self::Min => "Min",
            Self::Abs => "Abs",
            Self::Floor => "floor",
            Self::Ceiling => "ceiling",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Sum => "Sum",

            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sec => "sec",
            Self::Csc => "csc",
            Self::Cot => "cot",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Sech => "sech",
            Self::Csch => "csch",
            Self::Coth => "coth",

            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Asec => "asec",
            Self::Acsc => "acsc",
            Self::Acot => "acot",
            Self::Asinh => "asinh",
            Self::Acosh => "acosh",
            Self::Atanh => "atanh",
            Self::Asech => "asech",
            Self::Acsch => "acsch",
            Self::Acoth => "acoth",
        }
    }

    /// Looks up a function by the name returned from [Function::name].
    pub fn from_name(name: &str) -> Option<Function> {
        ALL.iter().copied().find(|f| f.name() == name)
    }

    /// The inverse of a plain trigonometric or hyperbolic function, e.g. `sin` gives `asin`.
    pub fn inverse(&self) -> Option<Function> {
        TRIG.iter()
            .position(|f| f == self)
            .map(|i| INVERSE_TRIG[i])
    }

    /// The smallest and (if bounded) largest number of arguments this function accepts.
    pub fn arity(&self) -> (usize, Option<usize>) {
        match self {
            Self::Add | Self::Mul | Self::Max | Self::Min | Self::Sum => (1, None),
            Self::Pow => (2, Some(2)),
            Self::Log => (1, Some(2)),
            _ => (1, Some(1)),
        }
    }

    /// Describes the arity for error messages.
    pub fn arity_description(&self) -> &'static str {
        match self.arity() {
            (1, None) => "at least 1",
            (2, Some(2)) => "exactly 2",
            (1, Some(2)) => "1 or 2",
            _ => "exactly 1",
        }
    }

    /// Returns an error if `count` arguments is not acceptable for this function.
    pub fn check_arity(&self, count: usize) -> Result<(), ValidationError> {
        let (min, max) = self.arity();
        if count < min || max.map_or(false, |max| count > max) {
            Err(ValidationError::Arity {
                function: self.name(),
                expected: self.arity_description(),
                found: count,
            })
        } else {
            Ok(())
        }
    }

    /// Evaluates this function, given values for its arguments.
    /// The argument count must already have been checked with [Function::check_arity].
    pub fn evaluate(&self, arguments: &[f64]) -> Result<f64, MathsError> {
        let x = arguments[0];
        let result = match self {
            Self::Add => arguments.iter().sum(),
            Self::Mul => arguments.iter().product(),
            Self::Pow => {
                let exp = arguments[1];
                if x == 0.0 && exp < 0.0 {
                    return Err(MathsError::DivisionByZero)
                }
                x.powf(exp)
            },
            Self::Max => arguments.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::Min => arguments.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Abs => x.abs(),
            Self::Floor => x.floor(),
            Self::Ceiling => x.ceil(),
            Self::Exp => x.exp(),
            Self::Log => {
                if x <= 0.0 {
                    return Err(MathsError::Domain(self.name()))
                }
                match arguments.get(1) {
                    Some(&base) if base <= 0.0 || base == 1.0 => return Err(MathsError::Domain(self.name())),
                    Some(&base) => x.ln() / base.ln(),
                    None => x.ln(),
                }
            },
            Self::Sum => return Err(MathsError::Unsupported(self.name())),

            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Sec => reciprocal(x.cos())?,
            Self::Csc => reciprocal(x.sin())?,
            Self::Cot => reciprocal(x.tan())?,
            Self::Sinh => x.sinh(),
            Self::Cosh => x.cosh(),
            Self::Tanh => x.tanh(),
            Self::Sech => reciprocal(x.cosh())?,
            Self::Csch => reciprocal(x.sinh())?,
            Self::Coth => reciprocal(x.tanh())?,

            Self::Asin => x.asin(),
            Self::Acos => x.acos(),
            Self::Atan => x.atan(),
            Self::Asec => reciprocal(x)?.acos(),
            Self::Acsc => reciprocal(x)?.asin(),
            Self::Acot => reciprocal(x)?.atan(),
            Self::Asinh => x.asinh(),
            Self::Acosh => x.acosh(),
            Self::Atanh => x.atanh(),
            Self::Asech => reciprocal(x)?.acosh(),
            Self::Acsch => reciprocal(x)?.asinh(),
            Self::Acoth => reciprocal(x)?.atanh(),
        };

        // Out-of-domain arguments to the real-valued functions come back as NaN
        if result.is_nan() {
            Err(MathsError::Domain(self.name()))
        } else {
            Ok(result)
        }
    }
}

fn reciprocal(x: f64) -> Result<f64, MathsError> {
    if x == 0.0 {
        Err(MathsError::DivisionByZero)
    } else {
        Ok(1.0 / x)
    }
}
