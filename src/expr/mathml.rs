//! Writes expression trees as Content MathML.
//!
//! The markup produced here is what the [translator](crate::translate) reads, so for any tree the
//! translator produced, translating the written markup gives back an identical tree. Rationals
//! are written as `<cn type="rational">n<sep/>d</cn>`.

use crate::Number;

use super::{Constant, Expr, Function};

impl Function {
    /// The Content MathML operator element for this function.
    pub fn mathml_tag(&self) -> &'static str {
        match self {
            Self::Add => "plus",
            Self::Mul => "times",
            Self::Pow => "power",
            Self::Max => "max",
            Self::Min => "min",
            Self::Abs => "abs",
            Self::Floor => "floor",
            Self::Ceiling => "ceiling",
            Self::Exp => "exp",
            Self::Log => "ln",
            Self::Sum => "sum",

            Self::Asin => "arcsin",
            Self::Acos => "arccos",
            Self::Atan => "arctan",
            Self::Asec => "arcsec",
            Self::Acsc => "arccsc",
            Self::Acot => "arccot",
            Self::Asinh => "arcsinh",
            Self::Acosh => "arccosh",
            Self::Atanh => "arctanh",
            Self::Asech => "arcsech",
            Self::Acsch => "arccsch",
            Self::Acoth => "arccoth",

            // The plain trig functions share their names with their tags
            _ => self.name(),
        }
    }
}

impl Constant {
    pub fn mathml_tag(&self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "exponentiale",
        }
    }
}

impl Expr {
    /// Writes this tree as a Content MathML fragment, wrapped in a `<math>` element.
    pub fn to_mathml(&self) -> String {
        let mut xml = String::from("<math xmlns=\"http://www.w3.org/1998/Math/MathML\">");
        self.write_mathml(&mut xml);
        xml.push_str("</math>");
        xml
    }

    fn write_mathml(&self, xml: &mut String) {
        match self {
            Expr::Number(Number::Rational(n, d)) =>
                xml.push_str(&format!("<cn type=\"rational\">{}<sep/>{}</cn>", n, d)),
            Expr::Number(Number::Float(f)) => xml.push_str(&format!("<cn>{}</cn>", f.text())),
            Expr::Number(n) => xml.push_str(&format!("<cn>{}</cn>", n)),
            Expr::Symbol(name) => xml.push_str(&format!("<ci>{}</ci>", xml_escape(name))),
            Expr::Constant(c) => xml.push_str(&format!("<{}/>", c.mathml_tag())),

            // log with a base is written with a `logbase` qualifier, which comes before the argument
            Expr::Apply(Function::Log, args) if args.len() == 2 => {
                xml.push_str("<apply><log/><logbase>");
                args[1].write_mathml(xml);
                xml.push_str("</logbase>");
                args[0].write_mathml(xml);
                xml.push_str("</apply>");
            }

            Expr::Apply(f, args) => {
                xml.push_str(&format!("<apply><{}/>", f.mathml_tag()));
                for arg in args {
                    arg.write_mathml(xml);
                }
                xml.push_str("</apply>");
            }
        }
    }
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
