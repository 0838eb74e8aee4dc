//! The table of MathML tags which the translator understands.
//!
//! A [Vocabulary] is an immutable value owned by each [Translator](crate::Translator). The
//! standard one covers the arithmetic, power, rounding, logarithm, summation and trigonometric
//! elements of Content MathML. Modified copies can be made with [Vocabulary::with] and
//! [Vocabulary::without], so translators with different vocabularies can exist side by side.

use std::collections::HashMap;

use crate::expr::{Constant, Function, function::{INVERSE_TRIG, TRIG}};

/// Tags which are never translated, however a vocabulary is configured. Calculus isn't supported,
/// and relations aren't expressions.
pub const UNSUPPORTED_TAGS: [&str; 8] = ["diff", "int", "eq", "neq", "geq", "leq", "gt", "lt"];

/// Operators which need a rewrite rather than a direct function application.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum SpecialForm {
    /// `minus`, which negates with one operand and subtracts with two.
    Minus,
    /// `divide`, which becomes a multiplication by a reciprocal.
    Divide,
    /// `root`, with an optional `degree` qualifier.
    Root,
    /// `inverse`, applied to a trigonometric or hyperbolic function.
    Inverse,
}

impl SpecialForm {
    /// Describes the operand count this form accepts, for error messages.
    pub fn arity_description(&self) -> &'static str {
        match self {
            Self::Minus => "1 or 2 operands",
            Self::Divide => "exactly 2 operands",
            Self::Root => "a radicand, optionally preceded by a degree",
            Self::Inverse => "a trigonometric or hyperbolic function",
        }
    }
}

/// What a tag means when it appears as the first child of an `apply` element.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Operator {
    /// Applied directly to the translated operands.
    Function(Function),
    /// Rewritten by the translator.
    Special(SpecialForm),
    /// A constant atom such as `pi`. Known, but can't be applied to anything.
    Constant(Constant),
    /// A literal container (`cn`, `ci`) or qualifier (`logbase`). Known, but can't be applied to
    /// anything either.
    Container,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    operators: HashMap<String, Operator>,
    atoms: HashMap<String, Constant>,
}

impl Vocabulary {
    /// A vocabulary which knows no tags at all.
    pub fn empty() -> Self {
        Self { operators: HashMap::new(), atoms: HashMap::new() }
    }

    /// The standard Content MathML vocabulary.
    pub fn standard() -> Self {
        let mut operators = HashMap::new();
        let mut insert = |tag: &str, op| { operators.insert(tag.to_string(), op); };

        insert("cn", Operator::Container);
        insert("ci", Operator::Container);
        insert("logbase", Operator::Container);

        insert("plus", Operator::Function(Function::Add));
        insert("minus", Operator::Special(SpecialForm::Minus));
        insert("times", Operator::Function(Function::Mul));
        insert("divide", Operator::Special(SpecialForm::Divide));
        insert("power", Operator::Function(Function::Pow));
        insert("root", Operator::Special(SpecialForm::Root));
        insert("inverse", Operator::Special(SpecialForm::Inverse));
        insert("max", Operator::Function(Function::Max));
        insert("min", Operator::Function(Function::Min));
        insert("abs", Operator::Function(Function::Abs));
        insert("floor", Operator::Function(Function::Floor));
        insert("ceiling", Operator::Function(Function::Ceiling));
        insert("exp", Operator::Function(Function::Exp));
        insert("exponentiale", Operator::Function(Function::Exp));
        insert("ln", Operator::Function(Function::Log));
        insert("log", Operator::Function(Function::Log));
        insert("sum", Operator::Function(Function::Sum));
        insert("pi", Operator::Constant(Constant::Pi));

        for f in TRIG {
            insert(f.name(), Operator::Function(f));
        }
        for f in INVERSE_TRIG {
            // asin is written arcsin
            insert(&format!("arc{}", &f.name()[1..]), Operator::Function(f));
        }

        let mut atoms = HashMap::new();
        atoms.insert("pi".to_string(), Constant::Pi);
        atoms.insert("exponentiale".to_string(), Constant::E);

        Self { operators, atoms }
    }

    /// Returns a copy of this vocabulary where `tag` means `operator`. Tags in
    /// [UNSUPPORTED_TAGS] are left out, since they are always rejected.
    pub fn with(&self, tag: &str, operator: Operator) -> Self {
        let mut result = self.clone();
        if !UNSUPPORTED_TAGS.contains(&tag) {
            result.operators.insert(tag.to_string(), operator);
        }
        result
    }

    /// Returns a copy of this vocabulary where a childless `tag` element is the given constant.
    pub fn with_atom(&self, tag: &str, constant: Constant) -> Self {
        let mut result = self.clone();
        result.atoms.insert(tag.to_string(), constant);
        result
    }

    /// Returns a copy of this vocabulary which doesn't know `tag` in either role.
    pub fn without(&self, tag: &str) -> Self {
        let mut result = self.clone();
        result.operators.remove(tag);
        result.atoms.remove(tag);
        result
    }

    /// Looks up the meaning of `tag` as the operator of an `apply`.
    pub fn operator(&self, tag: &str) -> Option<Operator> {
        self.operators.get(tag).copied()
    }

    /// Looks up the constant which a childless `tag` element stands for.
    pub fn atom(&self, tag: &str) -> Option<Constant> {
        self.atoms.get(tag).copied()
    }

    /// If `tag` names a function with an inverse in this vocabulary, returns the inverse.
    pub fn inverse_of(&self, tag: &str) -> Option<Function> {
        match self.operator(tag)? {
            Operator::Function(f) => f.inverse(),
            _ => None,
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::standard()
    }
}
