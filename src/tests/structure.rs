use num_bigint::BigInt;
use rust_decimal::Decimal;

use crate::{Expr, Number, Translator, TranslatorSettings, error::{TranslateError, ValidationError}, translate};

#[test]
fn test_unsupported_operators() {
    assert_eq!(
        translate("<apply><diff/><ci>x</ci></apply>"),
        Err(TranslateError::UnsupportedOperator("diff".into())),
    );
    assert_eq!(
        translate("<apply><eq/><ci>x</ci><cn>1</cn></apply>"),
        Err(TranslateError::UnsupportedOperator("eq".into())),
    );
    assert_eq!(
        translate("<apply><frobnicate/><ci>x</ci></apply>"),
        Err(TranslateError::UnsupportedOperator("frobnicate".into())),
    );

    // Nested inside a supported operator
    assert_eq!(
        translate("<apply><plus/><cn>1</cn><apply><int/><ci>x</ci></apply></apply>"),
        Err(TranslateError::UnsupportedOperator("int".into())),
    );

    // Only trig functions have an inverse
    assert_eq!(
        translate("<apply><inverse/><plus/><ci>x</ci></apply>"),
        Err(TranslateError::UnsupportedOperator("inverse".into())),
    );
}

#[test]
fn test_arity_mismatches() {
    assert!(matches!(
        translate("<apply><divide/><cn>1</cn></apply>"),
        Err(TranslateError::StructuralMismatch { operator, found: 1, .. }) if operator == "divide",
    ));
    assert!(matches!(
        translate("<apply><divide/><cn>1</cn><cn>2</cn><cn>3</cn></apply>"),
        Err(TranslateError::StructuralMismatch { found: 3, .. }),
    ));
    assert!(matches!(
        translate("<apply><minus/><cn>1</cn><cn>2</cn><cn>3</cn></apply>"),
        Err(TranslateError::StructuralMismatch { operator, found: 3, .. }) if operator == "minus",
    ));
    assert!(matches!(
        translate("<apply><minus/></apply>"),
        Err(TranslateError::StructuralMismatch { found: 0, .. }),
    ));
    assert!(matches!(
        translate("<apply/>"),
        Err(TranslateError::StructuralMismatch { operator, found: 0, .. }) if operator == "apply",
    ));

    // Root with a degree but no radicand
    assert!(matches!(
        translate("<apply><root/><degree><cn>3</cn></degree></apply>"),
        Err(TranslateError::StructuralMismatch { operator, found: 1, .. }) if operator == "root",
    ));

    // Qualifiers must hold exactly one element
    assert!(matches!(
        translate("<apply><log/><logbase><cn>2</cn><cn>3</cn></logbase><cn>8</cn></apply>"),
        Err(TranslateError::StructuralMismatch { operator, found: 2, .. }) if operator == "logbase",
    ));
    assert!(matches!(
        translate("<apply><root/><degree/><cn>8</cn></apply>"),
        Err(TranslateError::StructuralMismatch { operator, found: 0, .. }) if operator == "degree",
    ));

    // Power of e with nothing to raise it to
    assert!(matches!(
        translate("<apply><power/><exponentiale/></apply>"),
        Err(TranslateError::StructuralMismatch { operator, found: 1, .. }) if operator == "power",
    ));

    // Functions applied to nothing
    assert!(matches!(
        translate("<apply><sin/></apply>"),
        Err(TranslateError::StructuralMismatch { operator, found: 0, .. }) if operator == "sin",
    ));
}

#[test]
fn test_nested_apply_is_narrow() {
    // Exactly one operand may follow a nested apply
    assert!(matches!(
        translate("<apply><apply><inverse/><sin/></apply><ci>x</ci><ci>y</ci></apply>"),
        Err(TranslateError::StructuralMismatch { operator, found: 2, .. }) if operator == "apply",
    ));

    // Rewritten forms can't take a spliced operand
    assert!(matches!(
        translate("<apply><apply><minus/><ci>x</ci></apply><ci>y</ci></apply>"),
        Err(TranslateError::StructuralMismatch { operator, .. }) if operator == "minus",
    ));
    assert!(matches!(
        translate("<apply><apply><apply><sin/></apply><ci>x</ci></apply><ci>y</ci></apply>"),
        Err(TranslateError::StructuralMismatch { .. }),
    ));
}

#[test]
fn test_host_validation() {
    // Too many arguments is caught once the tree is built
    assert_eq!(
        translate("<apply><sin/><ci>x</ci><ci>y</ci></apply>"),
        Err(TranslateError::HostValidationFailure(ValidationError::Arity {
            function: "sin",
            expected: "exactly 1",
            found: 2,
        })),
    );
    assert!(matches!(
        translate("<apply><power/><ci>x</ci><cn>1</cn><cn>2</cn></apply>"),
        Err(TranslateError::HostValidationFailure(ValidationError::Arity { function: "Pow", found: 3, .. })),
    ));

    // Known tags which can't be applied
    assert_eq!(
        translate("<apply><pi/></apply>"),
        Err(TranslateError::HostValidationFailure(ValidationError::NotCallable("pi".into()))),
    );
    assert_eq!(
        translate("<apply><ci>f</ci><ci>x</ci></apply>"),
        Err(TranslateError::HostValidationFailure(ValidationError::NotCallable("ci".into()))),
    );
}

#[test]
fn test_malformed_markup() {
    for markup in [
        "",
        "<apply><plus/><ci>x</ci>",
        "<ci>x</ci><ci>y</ci>",
        "<math><apply><plus/></math>",
        "plain text",
    ] {
        assert!(
            matches!(translate(markup), Err(TranslateError::MalformedMarkup(_))),
            "expected {:?} to be malformed", markup,
        );
    }
}

#[test]
fn test_large_literals() {
    // Integers are exact at any size
    assert_eq!(
        translate("<cn>123456789012345678901234567890</cn>"),
        Ok(Expr::Number(Number::Integer("123456789012345678901234567890".parse::<BigInt>().unwrap()))),
    );
    assert_eq!(
        translate("<cn>-98765432109876543210</cn>").unwrap().srepr(),
        "Integer(-98765432109876543210)",
    );

    // Float exponents may go well past what a `Decimal` can scale to
    for (text, significand, exponent) in [
        ("6.626e-34", Decimal::new(6626, 3), -34),
        ("1e-29", Decimal::ONE, -29),
        ("1.0e-28", Decimal::ONE, -28),
        ("1e30", Decimal::ONE, 30),
        ("1e400", Decimal::ONE, 400),
        ("0.00000000000000000000000000000012", Decimal::new(12, 1), -31),
    ] {
        match translate(&format!("<cn>{}</cn>", text)) {
            Ok(Expr::Number(Number::Float(f))) => {
                assert_eq!((f.significand(), f.exponent()), (significand, exponent), "for {}", text);
                assert_eq!(f.text(), text);
            }
            other => panic!("expected {} to be a float, got {:?}", text, other),
        }
    }

    // Only an exponent which doesn't fit in an i32 is out of range
    assert_eq!(
        translate("<cn>1e99999999999</cn>"),
        Err(TranslateError::LiteralOverflow("1e99999999999".into())),
    );
}

#[test]
fn test_rational_literals() {
    assert_eq!(
        translate("<cn type=\"rational\">3<sep/>0</cn>"),
        Err(TranslateError::HostValidationFailure(ValidationError::ZeroDenominator(BigInt::from(3)))),
    );
    assert!(matches!(
        translate("<cn type=\"rational\">3</cn>"),
        Err(TranslateError::StructuralMismatch { operator, found: 1, .. }) if operator == "cn",
    ));
    assert!(matches!(
        translate("<cn type=\"rational\">x<sep/>2</cn>"),
        Err(TranslateError::MalformedMarkup(_)),
    ));
}

#[test]
fn test_depth_limit() {
    let translator = Translator::with_settings(TranslatorSettings { max_depth: 3, ..Default::default() });

    assert!(translator.translate("<apply><minus/><apply><minus/><ci>x</ci></apply></apply>").is_ok());
    assert_eq!(
        translator.translate("<apply><minus/><apply><minus/><apply><minus/><ci>x</ci></apply></apply></apply>"),
        Err(TranslateError::DepthExceeded(3)),
    );

    // Qualifiers count as a level of nesting
    assert!(translator.translate("<apply><root/><degree><cn>3</cn></degree><ci>x</ci></apply>").is_ok());
    assert_eq!(
        translator.translate("<apply><root/><degree><apply><abs/><cn>3</cn></apply></degree><ci>x</ci></apply>"),
        Err(TranslateError::DepthExceeded(3)),
    );

    // Comments, self-closing tags and `>` in attribute values don't affect the count
    let translator = Translator::with_settings(TranslatorSettings { max_depth: 2, ..Default::default() });
    assert_eq!(
        translator.translate("<apply><plus/><!-- <a><b><c> --><ci class=\"a>b\">x</ci><cn>1</cn></apply>"),
        Ok(call!(Add, sym!(x), int!(1))),
    );

    // The default limit stops runaway nesting without overflowing the stack
    let deep = format!("{}<ci>x</ci>{}", "<apply><abs/>".repeat(1000), "</apply>".repeat(1000));
    assert_eq!(translate(&deep), Err(TranslateError::DepthExceeded(128)));
    let deep = format!("{}<ci>x</ci>", "<apply><abs/>".repeat(100_000));
    assert_eq!(translate(&deep), Err(TranslateError::DepthExceeded(128)));

    // Right up to the limit is fine, and the tree can be read back
    let deepest = format!("{}<ci>y</ci>{}", "<apply><minus/><ci>x</ci>".repeat(127), "</apply>".repeat(127));
    let expr = translate(&deepest).unwrap();
    assert_eq!(expr.depth(), 255);
    assert_eq!(expr.srepr().parse::<Expr>(), Ok(expr));
}
