use crate::{Constant, Expr, Function, Number};

use super::util::COMPLEX_EXPRESSION;

const MATH_OPEN: &str = "<math xmlns=\"http://www.w3.org/1998/Math/MathML\">";

fn wrapped(inner: &str) -> String {
    format!("{}{}</math>", MATH_OPEN, inner)
}

#[test]
fn test_to_mathml() {
    assert_eq!(
        call!(Add, sym!(x), call!(Mul, int!(-1), sym!(y))).to_mathml(),
        wrapped("<apply><plus/><ci>x</ci><apply><times/><cn>-1</cn><ci>y</ci></apply></apply>"),
    );
    assert_eq!(
        call!(Log, sym!(x), int!(10)).to_mathml(),
        wrapped("<apply><log/><logbase><cn>10</cn></logbase><ci>x</ci></apply>"),
    );
    assert_eq!(
        call!(Log, sym!(x)).to_mathml(),
        wrapped("<apply><ln/><ci>x</ci></apply>"),
    );
    assert_eq!(
        call!(Acosh, float!(1.5)).to_mathml(),
        wrapped("<apply><arccosh/><cn>1.5</cn></apply>"),
    );
    assert_eq!(
        call!(Mul, Expr::Constant(Constant::Pi), Expr::Constant(Constant::E)).to_mathml(),
        wrapped("<apply><times/><pi/><exponentiale/></apply>"),
    );
    assert_eq!(
        Expr::rational(1, 2).to_mathml(),
        wrapped("<cn type=\"rational\">1<sep/>2</cn>"),
    );
    assert_eq!(
        Expr::symbol("a<b & c").to_mathml(),
        wrapped("<ci>a&lt;b &amp; c</ci>"),
    );
}

#[test]
fn test_mathml_round_trip() {
    for markup in [
        COMPLEX_EXPRESSION,
        "<apply><log/><logbase><cn>2</cn></logbase><ci>x</ci></apply>",
        "<apply><apply><inverse/><cot/></apply><ci>x</ci></apply>",
        "<apply><power/><exponentiale/><ci>t</ci></apply>",
        "<apply><ceiling/><apply><min/><cn>2.75</cn><ci>x</ci><pi/></apply></apply>",
        "<apply><sum/><ci>i</ci></apply>",
        "<ci>a&lt;b</ci>",
    ] {
        let expr = mml!(markup);
        assert_eq!(mml!(&expr.to_mathml()), expr, "failed to round-trip {}", expr);
    }
}

#[test]
fn test_rational_round_trip() {
    let expr = mml!("<apply><root/><ci>x</ci></apply>");
    assert_eq!(expr, call!(Pow, sym!(x), Expr::rational(1, 2)));
    assert_eq!(mml!(&expr.to_mathml()), expr);

    // Kept as written, and surrounding whitespace is ignored
    assert_eq!(
        mml!("<cn type=\"rational\"> -2 <sep/> 4 </cn>"),
        Expr::Number(Number::Rational((-2).into(), 4.into())),
    );
    assert_eq!(
        mml!("<cn type=\"rational\">123456789012345678901234567890<sep/>7</cn>").srepr(),
        "Rational(123456789012345678901234567890, 7)",
    );
}

#[test]
fn test_every_function_has_a_tag() {
    for f in crate::expr::function::ALL {
        // Log is written differently depending on its arity, so check it separately
        if f == Function::Log {
            continue;
        }

        let args = if f == Function::Pow { vec![sym!(x), int!(2)] } else { vec![sym!(x)] };
        let expr = Expr::make_call(f, args);
        assert_eq!(mml!(&expr.to_mathml()), expr, "{} didn't round-trip", f.name());
    }
}
