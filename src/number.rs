use core::{fmt, str::FromStr};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};
use rust_decimal::Decimal;

use crate::error::TranslateError;

/// The number of significant digits a float literal is held to when no other precision is given.
pub const DEFAULT_PRECISION: u32 = 15;

/// The largest precision a `Decimal` can hold.
pub const MAX_PRECISION: u32 = 28;

/// A numeric literal in an expression tree.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub enum Number {
    /// An exact integer, of any size.
    Integer(BigInt),

    /// An exact fraction. Always kept in lowest terms with a positive denominator when built with
    /// [Number::rational].
    Rational(BigInt, BigInt),

    /// A decimal literal which remembers the text it was written as.
    Float(Float),
}

/// A floating-point literal. The source text is kept verbatim so that printing the literal gives
/// back exactly what was read.
///
/// The value is held in scientific form, `significand * 10^exponent`, with the significand rounded
/// to `precision` significant digits and normalised so that `1 <= |significand| < 10` (or it is
/// zero). This covers exponents far beyond what a bare `Decimal` can scale to.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct Float {
    text: String,
    significand: Decimal,
    exponent: i32,
    precision: u32,
}

impl Float {
    /// Parses a float literal. Returns `None` if `text` isn't float syntax at all, or
    /// `Some(Err(_))` if it is, but its exponent doesn't fit in an `i32`.
    pub fn parse(text: &str, precision: u32) -> Option<Result<Float, TranslateError>> {
        let syntax = FloatSyntax::split(text)?;

        Some(
            syntax.to_scientific(precision)
                .map(|(significand, exponent)| Float { text: text.to_string(), significand, exponent, precision })
                .ok_or_else(|| TranslateError::LiteralOverflow(text.to_string()))
        )
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn significand(&self) -> Decimal {
        self.significand
    }

    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// The value as a plain `Decimal`, if it is within the range and scale a `Decimal` can hold.
    pub fn to_decimal(&self) -> Option<Decimal> {
        Decimal::from_scientific(&format!("{}e{}", self.significand, self.exponent)).ok()
    }

    /// The value as an `f64`. Values too large for an `f64` become infinite, and values too small
    /// become zero.
    pub fn to_f64(&self) -> f64 {
        format!("{}e{}", self.significand, self.exponent).parse().unwrap_or(f64::NAN)
    }
}

/// The parts of a float literal: an optional sign, a mantissa with at least one digit and an
/// optional point, then an optional exponent. At least one of the point or exponent must be
/// present, otherwise this is an integer.
struct FloatSyntax<'a> {
    negative: bool,
    whole: &'a str,
    fraction: &'a str,
    exponent: Option<&'a str>,
}

impl<'a> FloatSyntax<'a> {
    fn split(text: &'a str) -> Option<Self> {
        let (negative, unsigned) = match text.as_bytes().first()? {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        let (mantissa, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
            Some(i) => (&unsigned[..i], Some(&unsigned[i + 1..])),
            None => (unsigned, None),
        };

        let (whole, fraction) = match mantissa.split_once('.') {
            Some((w, f)) => (w, Some(f)),
            None => (mantissa, None),
        };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !fraction.map_or(true, all_digits) {
            return None;
        }
        if whole.is_empty() && fraction.map_or(true, str::is_empty) {
            return None;
        }
        if fraction.is_none() && exponent.is_none() {
            return None;
        }

        if let Some(exponent) = exponent {
            let digits = exponent.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(exponent);
            if digits.is_empty() || !all_digits(digits) {
                return None;
            }
        }

        Some(Self { negative, whole, fraction: fraction.unwrap_or(""), exponent })
    }

    /// Converts to a rounded significand and a power-of-ten exponent, or `None` if the exponent is
    /// out of range.
    fn to_scientific(&self, precision: u32) -> Option<(Decimal, i32)> {
        let digits = format!("{}{}", self.whole, self.fraction);
        let leading_zeros = digits.bytes().take_while(|&b| b == b'0').count();
        let significant = &digits[leading_zeros..];
        if significant.is_empty() {
            return Some((Decimal::ZERO, 0));
        }

        let shift = match self.exponent {
            Some(e) => e.parse::<i64>().ok()?,
            None => 0,
        };
        // The first significant digit sits at this power of ten
        let mut exponent = (self.whole.len() as i64 - 1 - leading_zeros as i64).checked_add(shift)?;

        // A `Decimal` holds at most 28 significant digits
        let kept = &significant[..significant.len().min(MAX_PRECISION as usize)];
        let mantissa = kept.parse::<i128>().ok()?;
        let mut significand = Decimal::try_from_i128_with_scale(mantissa, kept.len() as u32 - 1).ok()?;
        if self.negative {
            significand = -significand;
        }

        let mut rounded = significand
            .round_sf(precision.clamp(1, MAX_PRECISION))
            .unwrap_or(significand);
        if rounded.abs() >= Decimal::TEN {
            rounded /= Decimal::TEN;
            exponent += 1;
        }

        Some((rounded.normalize(), i32::try_from(exponent).ok()?))
    }
}

/// Checks that `text` is an optional sign followed by one or more digits.
fn is_integer_syntax(text: &str) -> bool {
    let digits = text.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl Number {
    /// Classifies the text content of a leaf element. Integers become `Integer`, decimal and
    /// scientific literals become `Float` at the given precision, and anything else is not a
    /// number, giving `Ok(None)`.
    pub fn sniff(text: &str, precision: u32) -> Result<Option<Number>, TranslateError> {
        if is_integer_syntax(text) {
            return BigInt::from_str(text.strip_prefix('+').unwrap_or(text))
                .map(|i| Some(Number::Integer(i)))
                .map_err(|_| TranslateError::LiteralOverflow(text.to_string()));
        }

        match Float::parse(text, precision) {
            Some(result) => result.map(|f| Some(Number::Float(f))),
            None => Ok(None),
        }
    }

    /// Builds a rational number in lowest terms, with any negative sign on the numerator. A whole
    /// result is still returned as a `Rational` with denominator 1; zero denominators are kept as
    /// they are, for validation to reject.
    pub fn rational(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Number {
        let (numer, denom) = (numer.into(), denom.into());
        if denom.is_zero() {
            return Number::Rational(numer, denom);
        }

        let gcd = numer.gcd(&denom);
        let (numer, denom) = (numer / &gcd, denom / &gcd);
        if denom.is_negative() {
            Number::Rational(-numer, -denom)
        } else {
            Number::Rational(numer, denom)
        }
    }

    /// Converts this number to an `f64` for evaluation.
    pub fn to_f64(&self) -> f64 {
        let big = |i: &BigInt| i.to_f64().unwrap_or(f64::NAN);
        match self {
            Number::Integer(i) => big(i),
            Number::Rational(n, d) => big(n) / big(d),
            Number::Float(f) => f.to_f64(),
        }
    }

    /// Writes the constructor form of this number, as read back by the expression reader.
    pub fn srepr(&self) -> String {
        match self {
            Number::Integer(i) => format!("Integer({})", i),
            Number::Rational(n, d) => format!("Rational({}, {})", n, d),
            Number::Float(f) => format!("Float('{}', precision={})", f.text, f.precision),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Rational(n, d) => write!(f, "{}/{}", n, d),
            Number::Float(float) => match float.to_decimal() {
                Some(d) if (-7..=20).contains(&float.exponent) => write!(f, "{}", d.normalize()),
                _ => write!(f, "{}e{}", float.significand, float.exponent),
            },
        }
    }
}

impl From<i64> for Number {
    fn from(i: i64) -> Self {
        Self::Integer(BigInt::from(i))
    }
}

impl From<BigInt> for Number {
    fn from(i: BigInt) -> Self {
        Self::Integer(i)
    }
}
