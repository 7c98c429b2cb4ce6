//! Weighted expressions for Markov chains.
//!
//! Labels follow the plain algebra, except that a union records each
//! operand's probability as a bracketed weight in thousandths:
//! `a[845]+(b:c)[155]`. Operands that are themselves unions already carry
//! their own weights and are only parenthesized; any other operand longer
//! than one symbol is parenthesized before its weight, as in `(c*)[500]`.

use super::{is_empty_set, is_epsilon, is_union, parenthesize, EPSILON, UNION};
use crate::probability::Probability;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An expression paired with the probability mass it carries.
///
/// # Example
///
/// ```rust
/// use statelim::algebra::weighted::{concat, union, WeightedExpression};
///
/// let a = WeightedExpression::new("a", "0.5".parse().unwrap());
/// let b = WeightedExpression::new("b", "0.4".parse().unwrap());
///
/// let ab = concat(&a, &b);
/// assert_eq!(ab.expression, "a:b");
/// assert_eq!(ab.probability, "0.2".parse().unwrap());
///
/// let either = union(&a, &b);
/// assert_eq!(either.expression, "a[500]+b[400]");
/// assert_eq!(either.probability, "0.9".parse().unwrap());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeightedExpression {
    pub expression: String,
    pub probability: Probability,
}

impl WeightedExpression {
    pub fn new(expression: impl Into<String>, probability: Probability) -> Self {
        Self {
            expression: expression.into(),
            probability,
        }
    }
}

impl fmt::Display for WeightedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.expression, self.probability.compact())
    }
}

/// `[w]`, the bracketed weight of `p` in thousandths.
pub fn weight_tag(p: &Probability) -> String {
    format!("[{}]", p.permille().to_plain_string())
}

fn weighted_operand(expr: &str, p: &Probability) -> String {
    if is_union(expr) {
        return parenthesize(expr);
    }
    if expr.chars().count() > 1 {
        return format!("{}{}", parenthesize(expr), weight_tag(p));
    }
    format!("{}{}", expr, weight_tag(p))
}

/// Render `r1 + r2` with each operand tagged by its probability.
///
/// The identities of the plain union hold: the empty language vanishes
/// and `λ + λ` is `λ`.
pub fn union_label(r1: &str, p1: &Probability, r2: &str, p2: &Probability) -> String {
    if is_empty_set(r1) {
        return r2.to_string();
    }
    if is_empty_set(r2) {
        return r1.to_string();
    }
    if is_epsilon(r1) && is_epsilon(r2) {
        return EPSILON.to_string();
    }
    format!(
        "{}{}{}",
        weighted_operand(r1, p1),
        UNION,
        weighted_operand(r2, p2)
    )
}

/// Alternation. Probabilities add.
pub fn union(a: &WeightedExpression, b: &WeightedExpression) -> WeightedExpression {
    WeightedExpression {
        expression: union_label(&a.expression, &a.probability, &b.expression, &b.probability),
        probability: &a.probability + &b.probability,
    }
}

/// Concatenation. Probabilities multiply.
pub fn concat(a: &WeightedExpression, b: &WeightedExpression) -> WeightedExpression {
    WeightedExpression {
        expression: super::concat(&a.expression, &b.expression),
        probability: &a.probability * &b.probability,
    }
}

/// Closure. The label is the plain star; the raw probability of the starred
/// term is kept as is.
pub fn star(a: &WeightedExpression) -> WeightedExpression {
    WeightedExpression {
        expression: super::star(&a.expression),
        probability: a.probability.clone(),
    }
}
