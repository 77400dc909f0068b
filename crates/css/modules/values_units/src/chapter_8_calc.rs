//! CSS Values & Units Level 3: §8 Mathematical Expressions: `calc()`
//! See <https://www.w3.org/TR/css-values-3/#calc-notation>
//!
//! The expression is kept as a tree and evaluated against a
//! [`LengthContext`] at layout time, because percentages and font-relative
//! terms are only known then.

use crate::ParseError;
use crate::chapter_6_dimensions::{Length, LengthContext, compute_length_px, unit_from_str};
use cssparser::{ParseError as CssParseError, Parser, Token};

type CalcResult<'input, T> = Result<T, CssParseError<'input, ()>>;

/// One node of a `calc()` tree.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcNode {
    /// A unitless number, only meaningful as a factor or divisor.
    Number(f32),
    /// A length or percentage leaf.
    Value(Length),
    Sum(Box<CalcNode>, Box<CalcNode>),
    Difference(Box<CalcNode>, Box<CalcNode>),
    Product(Box<CalcNode>, Box<CalcNode>),
    Quotient(Box<CalcNode>, Box<CalcNode>),
}

/// Result of evaluating a subtree.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Evaluated {
    Number(f32),
    Pixels(f32),
}

impl Evaluated {
    #[inline]
    const fn raw(self) -> f32 {
        match self {
            Self::Number(value) | Self::Pixels(value) => value,
        }
    }
}

impl CalcNode {
    fn has_percentage(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Value(length) => length.depends_on_container(),
            Self::Sum(left, right)
            | Self::Difference(left, right)
            | Self::Product(left, right)
            | Self::Quotient(left, right) => left.has_percentage() || right.has_percentage(),
        }
    }

    fn evaluate(&self, context: &LengthContext, reference: Option<f32>) -> Option<Evaluated> {
        match self {
            Self::Number(value) => Some(Evaluated::Number(*value)),
            Self::Value(length) => {
                compute_length_px(length, context, reference).map(Evaluated::Pixels)
            }
            Self::Sum(left, right) | Self::Difference(left, right) => {
                let lhs = left.evaluate(context, reference)?;
                let rhs = right.evaluate(context, reference)?;
                let sign = if matches!(self, Self::Sum(..)) { 1.0 } else { -1.0 };
                let value = rhs.raw().mul_add(sign, lhs.raw());
                // Number terms in a sum are read as pixels.
                Some(match (lhs, rhs) {
                    (Evaluated::Number(_), Evaluated::Number(_)) => Evaluated::Number(value),
                    _ => Evaluated::Pixels(value),
                })
            }
            Self::Product(left, right) => {
                match (left.evaluate(context, reference)?, right.evaluate(context, reference)?) {
                    (Evaluated::Number(lhs), Evaluated::Number(rhs)) => {
                        Some(Evaluated::Number(lhs * rhs))
                    }
                    (Evaluated::Number(factor), Evaluated::Pixels(pixels))
                    | (Evaluated::Pixels(pixels), Evaluated::Number(factor)) => {
                        Some(Evaluated::Pixels(pixels * factor))
                    }
                    (Evaluated::Pixels(_), Evaluated::Pixels(_)) => None,
                }
            }
            Self::Quotient(left, right) => {
                let lhs = left.evaluate(context, reference)?;
                let Evaluated::Number(divisor) = right.evaluate(context, reference)? else {
                    return None;
                };
                if divisor == 0.0 {
                    return None;
                }
                Some(match lhs {
                    Evaluated::Number(value) => Evaluated::Number(value / divisor),
                    Evaluated::Pixels(value) => Evaluated::Pixels(value / divisor),
                })
            }
        }
    }
}

/// A parsed `calc()` with its source text for display.
#[derive(Clone, Debug, PartialEq)]
pub struct CalcExpression {
    root: CalcNode,
    source: String,
}

impl CalcExpression {
    #[inline]
    pub const fn root(&self) -> &CalcNode {
        &self.root
    }

    /// Inner text of the `calc(...)`, trimmed.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether any term is a percentage, so the result depends on the container.
    pub fn has_percentage(&self) -> bool {
        self.root.has_percentage()
    }

    /// Evaluate to pixels; `None` when a percentage has no reference or the
    /// expression multiplies or divides two lengths.
    pub fn evaluate(&self, context: &LengthContext, reference: Option<f32>) -> Option<f32> {
        self.root
            .evaluate(context, reference)
            .map(Evaluated::raw)
    }
}

/// Parse the arguments of a `calc(` function token the caller just consumed.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the block is not a valid sum.
pub(crate) fn parse_calc_arguments(input: &mut Parser) -> Result<CalcExpression, ParseError> {
    input
        .parse_nested_block(|nested| {
            let start = nested.position();
            let root = parse_sum(nested)?;
            let source = nested.slice_from(start).trim().to_owned();
            Ok(CalcExpression { root, source })
        })
        .map_err(|_: CssParseError<'_, ()>| ParseError::UnexpectedToken)
}

fn parse_sum<'input>(input: &mut Parser<'input, '_>) -> CalcResult<'input, CalcNode> {
    let mut node = parse_product(input)?;
    loop {
        let state = input.state();
        match input.next().cloned() {
            Ok(Token::Delim('+')) => {
                let right = parse_product(input)?;
                node = CalcNode::Sum(Box::new(node), Box::new(right));
            }
            Ok(Token::Delim('-')) => {
                let right = parse_product(input)?;
                node = CalcNode::Difference(Box::new(node), Box::new(right));
            }
            // `100% -20px` tokenizes the sign into the dimension; read it as a sum.
            Ok(
                Token::Dimension { has_sign: true, .. }
                | Token::Number { has_sign: true, .. }
                | Token::Percentage { has_sign: true, .. },
            ) => {
                input.reset(&state);
                let right = parse_product(input)?;
                node = CalcNode::Sum(Box::new(node), Box::new(right));
            }
            _ => {
                input.reset(&state);
                return Ok(node);
            }
        }
    }
}

fn parse_product<'input>(input: &mut Parser<'input, '_>) -> CalcResult<'input, CalcNode> {
    let mut node = parse_term(input)?;
    loop {
        let state = input.state();
        match input.next().cloned() {
            Ok(Token::Delim('*')) => {
                let right = parse_term(input)?;
                node = CalcNode::Product(Box::new(node), Box::new(right));
            }
            Ok(Token::Delim('/')) => {
                let right = parse_term(input)?;
                node = CalcNode::Quotient(Box::new(node), Box::new(right));
            }
            _ => {
                input.reset(&state);
                return Ok(node);
            }
        }
    }
}

fn parse_term<'input>(input: &mut Parser<'input, '_>) -> CalcResult<'input, CalcNode> {
    let token = input.next()?.clone();
    match token {
        Token::Number { value, .. } => Ok(CalcNode::Number(value)),
        Token::Percentage { unit_value, .. } => {
            Ok(CalcNode::Value(Length::percent(unit_value * 100.0)))
        }
        Token::Dimension { value, unit, .. } => match unit_from_str(&unit) {
            Some(kind) => {
                let mut length = Length::px(value);
                length.unit = kind;
                Ok(CalcNode::Value(length))
            }
            None => Err(input.new_custom_error(())),
        },
        Token::ParenthesisBlock => input.parse_nested_block(|nested| parse_sum(nested)),
        Token::Function(name) if name.eq_ignore_ascii_case("calc") => {
            input.parse_nested_block(|nested| parse_sum(nested))
        }
        _ => Err(input.new_custom_error(())),
    }
}
