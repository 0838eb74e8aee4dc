macro_rules! int {
    ($n:expr) => { crate::Expr::integer($n) };
}

macro_rules! sym {
    ($n:ident) => { crate::Expr::symbol(stringify!($n)) };
}

macro_rules! float {
    ($l:literal) => {
        crate::Expr::Number(crate::Number::Float(
            crate::number::Float::parse(stringify!($l), crate::number::DEFAULT_PRECISION).unwrap().unwrap()
        ))
    };
}

macro_rules! call {
    ($f:ident, $($a:expr),* $(,)?) => { crate::Expr::Apply(crate::Function::$f, vec![ $($a),* ]) };
}

macro_rules! mml {
    ($s:expr) => { crate::translate($s).unwrap() };
}

macro_rules! assert_approx {
    ($l:expr, $r:expr $(,)?) => {
        {
            let (l, r): (f64, f64) = ($l, $r);
            assert!((l - r).abs() < 1e-9, "{} is not approximately {}", l, r);
        }
    };
}

/// The Content MathML for
///
/// ```text
/// x - y - z - y*z/(x + z*tan(x^2)) + sin(z) + exp(-3/x)*acos(5*x) - 1 + sqrt(x/(y^2 + z^2))
/// ```
pub const COMPLEX_EXPRESSION: &str = r#"<math xmlns="http://www.w3.org/1998/Math/MathML">
  <apply><plus/>
    <ci>x</ci>
    <apply><minus/><ci>y</ci></apply>
    <apply><minus/><ci>z</ci></apply>
    <apply><minus/>
      <apply><divide/>
        <apply><times/><ci>y</ci><ci>z</ci></apply>
        <apply><plus/>
          <ci>x</ci>
          <apply><times/>
            <ci>z</ci>
            <apply><tan/><apply><power/><ci>x</ci><cn>2</cn></apply></apply>
          </apply>
        </apply>
      </apply>
    </apply>
    <apply><sin/><ci>z</ci></apply>
    <apply><times/>
      <apply><power/><exponentiale/><apply><divide/><cn>-3</cn><ci>x</ci></apply></apply>
      <apply><arccos/><apply><times/><cn>5</cn><ci>x</ci></apply></apply>
    </apply>
    <cn>-1</cn>
    <apply><root/>
      <apply><divide/>
        <ci>x</ci>
        <apply><plus/>
          <apply><power/><ci>y</ci><cn>2</cn></apply>
          <apply><power/><ci>z</ci><cn>2</cn></apply>
        </apply>
      </apply>
    </apply>
  </apply>
</math>"#;

/// `COMPLEX_EXPRESSION` computed directly.
pub fn complex_expression_value(x: f64, y: f64, z: f64) -> f64 {
    x - y - z - y * z / (x + z * (x * x).tan()) + z.sin() + (-3.0 / x).exp() * (5.0 * x).acos() - 1.0
        + (x / (y * y + z * z)).sqrt()
}
