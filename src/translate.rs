//! Translation of Content MathML into expression trees.
//!
//! The translator is a recursive descent over the element tree. Leaves (`cn`, `ci`, constant
//! atoms) become numbers, symbols or constants. An `apply` element is matched against an ordered
//! list of [cases](Case): several MathML idioms span more than one element (`root` with a
//! `degree`, `log` with a `logbase`, `power` of `exponentiale`, `inverse` of a trig function) and
//! must be recognised before falling back to a direct application of the operator.

use log::{debug, info, warn};
use num_bigint::BigInt;
use roxmltree::{Document, Node};

use crate::{
    Number,
    error::{TranslateError, ValidationError},
    expr::{Expr, Function},
    number::DEFAULT_PRECISION,
    vocabulary::{Operator, SpecialForm, UNSUPPORTED_TAGS, Vocabulary},
};

const INDENT_STR: &str = "  ";

/// Settings which control translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslatorSettings {
    /// The deepest element nesting which will be translated before giving up with
    /// [TranslateError::DepthExceeded].
    pub max_depth: usize,

    /// Significant digits held by float literals.
    pub float_precision: u32,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self { max_depth: 128, float_precision: DEFAULT_PRECISION }
    }
}

/// Translates Content MathML into [Expr] trees. A translator holds no state between calls, so one
/// instance can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    vocabulary: Vocabulary,
    settings: TranslatorSettings,
}

/// Translates a Content MathML fragment with the standard vocabulary and default settings.
pub fn translate(expression_raw: &str) -> Result<Expr, TranslateError> {
    Translator::new().translate(expression_raw)
}

/// Strips a `<math ...>` wrapper from `raw`, if there is one. Everything up to the end of the
/// opening `<math` tag is discarded, along with a trailing `</math>`.
///
/// Returns the inner fragment, and whether a wrapper was stripped.
pub fn strip_math_wrapper(raw: &str) -> (&str, bool) {
    let inner_start = raw.find("<math")
        .and_then(|start| raw[start..].find('>').map(|end| start + end + 1));

    match inner_start {
        Some(start) => {
            let inner = raw[start..].trim_end();
            (inner.strip_suffix("</math>").unwrap_or(inner), true)
        }
        None => (raw, false),
    }
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: TranslatorSettings) -> Self {
        Self { vocabulary: Vocabulary::standard(), settings }
    }

    pub fn with_vocabulary(vocabulary: Vocabulary, settings: TranslatorSettings) -> Self {
        Self { vocabulary, settings }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn settings(&self) -> &TranslatorSettings {
        &self.settings
    }

    /// Translates `expression_raw`, a Content MathML fragment optionally wrapped in a `<math>`
    /// element, into an expression tree. The tree is checked with [Expr::validate] before being
    /// returned.
    pub fn translate(&self, expression_raw: &str) -> Result<Expr, TranslateError> {
        let result = self.translate_inner(expression_raw);
        if let Err(e) = &result {
            warn!("Failed mml translation: {}", e);
        }
        result
    }

    fn translate_inner(&self, expression_raw: &str) -> Result<Expr, TranslateError> {
        let (inner, stripped) = strip_math_wrapper(expression_raw);
        info!(
            "Begin mml translation{}, inner markup: {}",
            if stripped { ", stripped <math> tag" } else { "" },
            inner,
        );

        check_nesting(inner, self.settings.max_depth)?;
        let doc = Document::parse(inner)
            .map_err(|e| TranslateError::MalformedMarkup(e.to_string()))?;

        let expr = self.translate_node(doc.root_element(), 0, None)?;
        expr.validate()?;

        info!("Completed mml translation: {}", expr);
        Ok(expr)
    }

    /// Translates one element. `trailing` is an extra argument spliced in by an enclosing `apply`
    /// whose operator is this element (see [Case::NestedApply]).
    fn translate_node(&self, node: Node, depth: usize, trailing: Option<Expr>) -> Result<Expr, TranslateError> {
        if depth >= self.settings.max_depth {
            return Err(TranslateError::DepthExceeded(self.settings.max_depth))
        }

        let indent = INDENT_STR.repeat(depth);
        let tag = node.tag_name().name();

        let result = if tag == "apply" {
            let apply = Apply::new(node, &self.vocabulary)?;
            let case = Case::ORDER.iter()
                .copied()
                .find(|case| case.matches(&apply, &self.vocabulary))
                .ok_or_else(|| TranslateError::UnsupportedOperator(apply.operator_tag.to_string()))?;

            debug!("{}Apply block for {}, case {:?}", indent, apply.operator_tag, case);
            if trailing.is_some() && !case.accepts_trailing() {
                return Err(TranslateError::StructuralMismatch {
                    operator: apply.operator_tag.to_string(),
                    expected: "no operand spliced in from an enclosing apply",
                    found: 1,
                })
            }

            self.translate_apply(case, &apply, depth, trailing)?
        } else {
            if trailing.is_some() {
                return Err(TranslateError::StructuralMismatch {
                    operator: tag.to_string(),
                    expected: "an apply element to splice an operand into",
                    found: 1,
                })
            }
            self.translate_leaf(node, tag)?
        };

        debug!("{}Completed {} block: {}", indent, tag, result);
        Ok(result)
    }

    /// Translates a leaf element by sniffing its text: integers and floats become numbers, and
    /// anything else becomes a symbol with that name. Childless constant atoms such as `<pi/>`
    /// become constants.
    fn translate_leaf(&self, node: Node, tag: &str) -> Result<Expr, TranslateError> {
        if tag == "cn" && node.attribute("type") == Some("rational") {
            return Self::translate_rational(node)
        }

        if !node.has_children() {
            if let Some(constant) = self.vocabulary.atom(tag) {
                return Ok(Expr::Constant(constant))
            }
        }

        let content = node.text().unwrap_or("").trim();
        Ok(match Number::sniff(content, self.settings.float_precision)? {
            Some(number) => Expr::Number(number),
            None => Expr::symbol(content),
        })
    }

    /// Translates `<cn type="rational">n<sep/>d</cn>`. The fraction is kept as written, so a zero
    /// denominator is left for validation to reject.
    fn translate_rational(node: Node) -> Result<Expr, TranslateError> {
        let mut parts = vec![String::new()];
        for child in node.children() {
            if child.is_element() && child.tag_name().name() == "sep" {
                parts.push(String::new());
            } else if let (true, Some(text), Some(part)) = (child.is_text(), child.text(), parts.last_mut()) {
                part.push_str(text);
            }
        }

        match &parts[..] {
            [numer, denom] => match (numer.trim().parse::<BigInt>(), denom.trim().parse::<BigInt>()) {
                (Ok(numer), Ok(denom)) => Ok(Expr::Number(Number::Rational(numer, denom))),
                _ => Err(TranslateError::MalformedMarkup(
                    format!("rational `{}/{}` is not a pair of integers", numer.trim(), denom.trim())
                )),
            },
            _ => Err(TranslateError::StructuralMismatch {
                operator: "cn".to_string(),
                expected: "a numerator and denominator separated by <sep/>",
                found: parts.len(),
            }),
        }
    }

    fn translate_apply(&self, case: Case, apply: &Apply, depth: usize, trailing: Option<Expr>) -> Result<Expr, TranslateError> {
        let child = |node| self.translate_node(node, depth + 1, None);
        // Inside a `degree` or `logbase`, which is one element deeper
        let qualified_child = |node| self.translate_node(node, depth + 2, None);
        let operands = &apply.operands[..];

        Ok(match case {
            Case::UnaryMinus => child(operands[0])?.negate(),

            Case::BinaryMinus => Expr::make_add(vec![
                child(operands[0])?,
                child(operands[1])?.negate(),
            ]),

            Case::Division => {
                apply.expect_operands(2, SpecialForm::Divide.arity_description())?;
                Expr::make_mul(vec![
                    child(operands[0])?,
                    child(operands[1])?.reciprocal(),
                ])
            }

            Case::Root => {
                if apply.second_tag() == Some("degree") {
                    apply.expect_operands(2, SpecialForm::Root.arity_description())?;
                    let degree = qualified(operands[0], "degree")?;
                    Expr::make_pow(child(operands[1])?, qualified_child(degree)?.reciprocal())
                } else {
                    apply.expect_operands(1, SpecialForm::Root.arity_description())?;
                    Expr::make_pow(child(operands[0])?, Expr::rational(1, 2))
                }
            }

            Case::LogWithBase => {
                apply.expect_operands(2, "a logbase and exactly 1 operand")?;
                let base = qualified(operands[0], "logbase")?;
                Expr::make_call(Function::Log, vec![child(operands[1])?, qualified_child(base)?])
            }

            Case::PowerOfE => {
                apply.expect_operands(2, "exactly 2 operands")?;
                Expr::make_call(Function::Exp, vec![child(operands[1])?])
            }

            Case::InverseTrig => {
                // Matching guarantees the second child names a function with an inverse
                let function = apply.second_tag()
                    .and_then(|tag| self.vocabulary.inverse_of(tag))
                    .ok_or_else(|| TranslateError::UnsupportedOperator(apply.operator_tag.to_string()))?;

                let mut args = operands[1..].iter()
                    .map(|&n| child(n))
                    .collect::<Result<Vec<_>, _>>()?;
                args.extend(trailing);
                Self::check_minimum_arity(function, apply.operator_tag, &args)?;
                Expr::make_call(function, args)
            }

            Case::NestedApply => {
                apply.expect_operands(1, "exactly 1 operand after a nested apply")?;
                let operand = child(operands[0])?;
                self.translate_node(apply.operator, depth + 1, Some(operand))?
            }

            Case::Generic => match apply.operator_kind {
                Some(Operator::Function(function)) => {
                    let mut args = operands.iter()
                        .map(|&n| child(n))
                        .collect::<Result<Vec<_>, _>>()?;
                    args.extend(trailing);
                    Self::check_minimum_arity(function, apply.operator_tag, &args)?;
                    Expr::make_call(function, args)
                }

                // Minus with no operands or more than two
                Some(Operator::Special(form @ SpecialForm::Minus)) => return Err(TranslateError::StructuralMismatch {
                    operator: apply.operator_tag.to_string(),
                    expected: form.arity_description(),
                    found: operands.len(),
                }),

                Some(Operator::Constant(_) | Operator::Container) =>
                    return Err(ValidationError::NotCallable(apply.operator_tag.to_string()).into()),

                Some(Operator::Special(_)) | None =>
                    return Err(TranslateError::UnsupportedOperator(apply.operator_tag.to_string())),
            },
        })
    }

    fn check_minimum_arity(function: Function, tag: &str, args: &[Expr]) -> Result<(), TranslateError> {
        let (min, _) = function.arity();
        if args.len() < min {
            Err(TranslateError::StructuralMismatch {
                operator: tag.to_string(),
                expected: function.arity_description(),
                found: args.len(),
            })
        } else {
            Ok(())
        }
    }
}

/// Checks that elements in `markup` nest no deeper than `max_depth`, without building a document,
/// so that overly deep input is rejected before the XML parser recurses into it. Comments,
/// processing instructions, CDATA and declarations are skipped, and a `>` inside a quoted attribute
/// value doesn't end a tag. Anything malformed is left for the parser to report.
fn check_nesting(markup: &str, max_depth: usize) -> Result<(), TranslateError> {
    let bytes = markup.as_bytes();
    let skip_past = |from: usize, terminator: &str| {
        markup[from..].find(terminator).map_or(markup.len(), |i| from + i + terminator.len())
    };

    let mut depth = 0usize;
    let mut index = 0;
    while let Some(offset) = markup[index..].find('<') {
        let start = index + offset;
        let rest = &markup[start..];

        index = if rest.starts_with("<!--") {
            skip_past(start, "-->")
        } else if rest.starts_with("<![CDATA[") {
            skip_past(start, "]]>")
        } else if rest.starts_with("<?") {
            skip_past(start, "?>")
        } else if rest.starts_with("<!") {
            skip_past(start, ">")
        } else if rest.starts_with("</") {
            depth = depth.saturating_sub(1);
            skip_past(start, ">")
        } else {
            depth += 1;
            if depth > max_depth {
                return Err(TranslateError::DepthExceeded(max_depth))
            }

            let end = tag_end(bytes, start);
            if end < bytes.len() && bytes[end - 1] == b'/' {
                depth -= 1;
            }
            (end + 1).min(markup.len())
        };
    }

    Ok(())
}

/// Finds the `>` closing the tag which opens at `start`, ignoring any inside quoted attribute
/// values. Returns the length of `bytes` if the tag is never closed.
fn tag_end(bytes: &[u8], start: usize) -> usize {
    let mut quote = None;
    for (i, &b) in bytes.iter().enumerate().skip(start + 1) {
        match (quote, b) {
            (None, b'"' | b'\'') => quote = Some(b),
            (Some(q), _) if q == b => quote = None,
            (None, b'>') => return i,
            _ => {}
        }
    }
    bytes.len()
}

/// Returns the single element inside a qualifier such as `degree` or `logbase`.
fn qualified<'a, 'input>(qualifier: Node<'a, 'input>, tag: &str) -> Result<Node<'a, 'input>, TranslateError> {
    let children = qualifier.children().filter(Node::is_element).collect::<Vec<_>>();
    match children[..] {
        [inner] => Ok(inner),
        _ => Err(TranslateError::StructuralMismatch {
            operator: tag.to_string(),
            expected: "exactly 1 child element",
            found: children.len(),
        }),
    }
}

/// The parts of an `apply` element, with whitespace between elements discarded.
struct Apply<'a, 'input> {
    operator: Node<'a, 'input>,
    operator_tag: &'a str,
    operator_kind: Option<Operator>,
    operands: Vec<Node<'a, 'input>>,
}

impl<'a, 'input> Apply<'a, 'input> {
    fn new(node: Node<'a, 'input>, vocabulary: &Vocabulary) -> Result<Self, TranslateError> {
        let mut children = node.children().filter(Node::is_element);
        let operator = children.next().ok_or_else(|| TranslateError::StructuralMismatch {
            operator: "apply".to_string(),
            expected: "an operator element",
            found: 0,
        })?;
        let operator_tag = operator.tag_name().name();

        // Relations and calculus are never looked up, whatever the vocabulary says
        let operator_kind = if UNSUPPORTED_TAGS.contains(&operator_tag) {
            None
        } else {
            vocabulary.operator(operator_tag)
        };

        Ok(Self { operator, operator_tag, operator_kind, operands: children.collect() })
    }

    /// The tag of the element after the operator.
    fn second_tag(&self) -> Option<&'a str> {
        self.operands.first().map(|n| n.tag_name().name())
    }

    fn expect_operands(&self, count: usize, expected: &'static str) -> Result<(), TranslateError> {
        if self.operands.len() == count {
            Ok(())
        } else {
            Err(TranslateError::StructuralMismatch {
                operator: self.operator_tag.to_string(),
                expected,
                found: self.operands.len(),
            })
        }
    }
}

/// The ways an `apply` element can be translated. These are tried in the order of [Case::ORDER],
/// and the first which matches is used.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
enum Case {
    UnaryMinus,
    BinaryMinus,
    Division,
    Root,
    LogWithBase,
    PowerOfE,
    InverseTrig,
    NestedApply,
    Generic,
}

impl Case {
    const ORDER: [Case; 9] = [
        Case::UnaryMinus,
        Case::BinaryMinus,
        Case::Division,
        Case::Root,
        Case::LogWithBase,
        Case::PowerOfE,
        Case::InverseTrig,
        Case::NestedApply,
        Case::Generic,
    ];

    fn matches(&self, apply: &Apply, vocabulary: &Vocabulary) -> bool {
        let special = |form| apply.operator_kind == Some(Operator::Special(form));
        let function = |f| apply.operator_kind == Some(Operator::Function(f));

        match self {
            Case::UnaryMinus => special(SpecialForm::Minus) && apply.operands.len() == 1,
            Case::BinaryMinus => special(SpecialForm::Minus) && apply.operands.len() == 2,
            Case::Division => special(SpecialForm::Divide),
            Case::Root => special(SpecialForm::Root),
            Case::LogWithBase => function(Function::Log) && apply.second_tag() == Some("logbase"),
            Case::PowerOfE => function(Function::Pow)
                && matches!(apply.second_tag(), Some("exponentiale" | "exp")),
            Case::InverseTrig => special(SpecialForm::Inverse)
                && apply.second_tag().and_then(|tag| vocabulary.inverse_of(tag)).is_some(),
            Case::NestedApply => apply.operator_tag == "apply",
            Case::Generic => apply.operator_kind.is_some(),
        }
    }

    /// Whether this case can take an extra trailing argument from an enclosing `apply`.
    fn accepts_trailing(&self) -> bool {
        matches!(self, Case::InverseTrig | Case::Generic)
    }
}
