//! The symbolic expression tree which MathML is translated into, along with the small expression
//! engine which works on it.
//!
//! An [Expr] is one of a number, a free symbol, a named constant, or an application of a
//! [Function] to an ordered list of arguments. Trees are plain values: they are built bottom-up
//! using the builder functions on [Expr], compared structurally, and never mutated once built.
//!
//! The engine provides:
//!   - a printer, [Expr::srepr], which writes the tree as constructor calls, and a
//!     [reader](reader) which parses that text back into an identical tree,
//!   - a [well-formedness check](validate), run on every translated tree,
//!   - numeric [evaluation](evaluate),
//!   - a [Content MathML writer](mathml) for going back the other way.

pub mod function;
pub mod reader;
pub mod validate;
pub mod evaluate;
pub mod mathml;

use core::fmt;

use crate::Number;

pub use function::Function;

/// A named mathematical constant.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "E",
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Self::Pi => core::f64::consts::PI,
            Self::E => core::f64::consts::E,
        }
    }
}

#[derive(PartialEq, Eq, Hash, Debug, Clone)]
pub enum Expr {
    Number(Number),
    Symbol(String),
    Constant(Constant),
    Apply(Function, Vec<Expr>),
}

impl Expr {
    pub fn integer(i: i64) -> Expr {
        Expr::Number(Number::from(i))
    }

    pub fn rational(numer: i64, denom: i64) -> Expr {
        Expr::Number(Number::rational(numer, denom))
    }

    pub fn symbol(name: impl Into<String>) -> Expr {
        Expr::Symbol(name.into())
    }

    pub fn make_call(function: Function, args: Vec<Expr>) -> Expr {
        Expr::Apply(function, args)
    }

    pub fn make_add(args: Vec<Expr>) -> Expr {
        Self::make_call(Function::Add, args)
    }

    pub fn make_mul(args: Vec<Expr>) -> Expr {
        Self::make_call(Function::Mul, args)
    }

    pub fn make_pow(base: Expr, exp: Expr) -> Expr {
        Self::make_call(Function::Pow, vec![base, exp])
    }

    /// Returns a new node: a multiplication of this node by -1.
    pub fn negate(self) -> Expr {
        Self::make_mul(vec![Self::integer(-1), self])
    }

    /// Returns a new node: this node raised to the power -1.
    pub fn reciprocal(self) -> Expr {
        Self::make_pow(self, Self::integer(-1))
    }

    /// If this is an application, returns its function and arguments.
    pub fn as_apply(&self) -> Option<(Function, &[Expr])> {
        if let Expr::Apply(f, args) = self {
            Some((*f, &args[..]))
        } else {
            None
        }
    }

    /// The depth of the tree, where a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Expr::Apply(_, args) => 1 + args.iter().map(Expr::depth).max().unwrap_or(0),
            Expr::Number(_) | Expr::Symbol(_) | Expr::Constant(_) => 1,
        }
    }

    /// Writes this tree as nested constructor calls, for example
    /// `Add(Symbol('x'), Mul(Integer(-1), Symbol('y')))`. The result can be parsed back into an
    /// identical tree with `str::parse`.
    pub fn srepr(&self) -> String {
        let mut out = String::new();
        self.write_srepr(&mut out);
        out
    }

    fn write_srepr(&self, out: &mut String) {
        match self {
            Expr::Number(n) => out.push_str(&n.srepr()),
            Expr::Symbol(name) => {
                out.push_str("Symbol('");
                for c in name.chars() {
                    if c == '\'' || c == '\\' {
                        out.push('\\');
                    }
                    out.push(c);
                }
                out.push_str("')");
            }
            Expr::Constant(c) => out.push_str(c.name()),
            Expr::Apply(f, args) => {
                out.push_str(f.name());
                out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    arg.write_srepr(out);
                }
                out.push(')');
            }
        }
    }
}

/// A compact form, with numbers and symbols written bare: `Add(x, Mul(-1, y))`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Symbol(name) => write!(f, "{}", name),
            Expr::Constant(c) => write!(f, "{}", c.name()),
            Expr::Apply(func, args) => {
                write!(f, "{}(", func.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<Number> for Expr {
    fn from(n: Number) -> Self {
        Expr::Number(n)
    }
}

impl From<Constant> for Expr {
    fn from(c: Constant) -> Self {
        Expr::Constant(c)
    }
}
