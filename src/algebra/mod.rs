//! Expression algebra over string labels.
//!
//! Expressions are plain strings built only through [`union`], [`concat`]
//! and [`star`]. Precedence is star > concatenation > union, and each
//! operator adds parentheses only where that precedence would otherwise
//! regroup an operand:
//!
//! | operator | marker | parenthesizes operands that are |
//! |----------|--------|---------------------------------|
//! | union    | `+`    | multi-term unions               |
//! | concat   | `:`    | multi-term unions               |
//! | star     | `*`    | unions or concatenations        |
//!
//! Two sentinels carry the algebraic identities: [`EMPTY`] (the empty
//! language, absorbing for concatenation, identity for union) and
//! [`EPSILON`] (the empty word, identity for concatenation).
//!
//! # Example
//!
//! ```rust
//! use statelim::algebra::{concat, star, union, EMPTY, EPSILON};
//!
//! let ab = union("a", "b");
//! assert_eq!(ab, "a+b");
//! assert_eq!(concat(&ab, "c"), "(a+b):c");
//! assert_eq!(star(&concat("a", "b")), "(a:b)*");
//!
//! assert_eq!(concat(EMPTY, "a"), EMPTY);
//! assert_eq!(concat(EPSILON, "a"), "a");
//! assert_eq!(star(EMPTY), EPSILON);
//! assert_eq!(union(EMPTY, "a"), "a");
//! ```

pub mod weighted;

/// The empty language.
pub const EMPTY: &str = "ø";

/// The language holding only the empty word.
pub const EPSILON: &str = "λ";

pub const UNION: char = '+';
pub const CONCAT: char = ':';
pub const STAR: char = '*';

/// True for the empty-language sentinel.
pub fn is_empty_set(expr: &str) -> bool {
    expr == EMPTY
}

/// True for the epsilon sentinel. A blank label also denotes the empty word.
pub fn is_epsilon(expr: &str) -> bool {
    expr == EPSILON || expr.is_empty()
}

/// Split `expr` on `separator` wherever it occurs outside parentheses and
/// weight brackets.
///
/// ```rust
/// use statelim::algebra::{split_top_level, UNION};
///
/// assert_eq!(split_top_level("a+(b+c):d", UNION), vec!["a", "(b+c):d"]);
/// ```
pub fn split_top_level(expr: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in expr.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&expr[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&expr[start..]);
    parts
}

/// True if `expr` is a union of more than one term at top level.
pub fn is_union(expr: &str) -> bool {
    split_top_level(expr, UNION).len() > 1
}

/// True if `expr` is a concatenation of more than one factor at top level.
pub fn is_concatenation(expr: &str) -> bool {
    !is_union(expr) && split_top_level(expr, CONCAT).len() > 1
}

/// True if `expr` is a single starred term such as `a*` or `(a+b)*`.
pub fn is_starred(expr: &str) -> bool {
    expr.ends_with(STAR) && !is_union(expr) && !is_concatenation(expr)
}

/// Wrap `expr` in parentheses.
pub fn parenthesize(expr: &str) -> String {
    format!("({expr})")
}

fn group_union(expr: &str) -> String {
    if is_union(expr) {
        parenthesize(expr)
    } else {
        expr.to_string()
    }
}

/// Concatenation `r1 r2`.
pub fn concat(r1: &str, r2: &str) -> String {
    if is_empty_set(r1) || is_empty_set(r2) {
        return EMPTY.to_string();
    }
    if is_epsilon(r1) {
        return r2.to_string();
    }
    if is_epsilon(r2) {
        return r1.to_string();
    }
    format!("{}{}{}", group_union(r1), CONCAT, group_union(r2))
}

/// Kleene closure `r*`.
pub fn star(r: &str) -> String {
    if is_empty_set(r) || is_epsilon(r) {
        return EPSILON.to_string();
    }
    if is_union(r) || is_concatenation(r) {
        return format!("{}{}", parenthesize(r), STAR);
    }
    if is_starred(r) {
        // (r*)* = r*
        return r.to_string();
    }
    format!("{r}{STAR}")
}

/// Alternation `r1 + r2`.
pub fn union(r1: &str, r2: &str) -> String {
    if is_empty_set(r1) {
        return r2.to_string();
    }
    if is_empty_set(r2) {
        return r1.to_string();
    }
    if is_epsilon(r1) && is_epsilon(r2) {
        return EPSILON.to_string();
    }
    format!("{}{}{}", group_union(r1), UNION, group_union(r2))
}

/// Rewrite an expression into conventional regex syntax: `|` for union,
/// juxtaposition for concatenation, weight brackets dropped, epsilon as an
/// empty group.
///
/// Returns `None` for the empty language, which no pattern denotes without
/// engine-specific tricks.
///
/// ```rust
/// use statelim::algebra::to_pattern;
///
/// assert_eq!(to_pattern("a:(b+c)*").as_deref(), Some("a(b|c)*"));
/// assert_eq!(to_pattern("a[845]+b[155]").as_deref(), Some("a|b"));
/// assert_eq!(to_pattern("ø"), None);
/// ```
pub fn to_pattern(expr: &str) -> Option<String> {
    if is_empty_set(expr) {
        return None;
    }
    let mut pattern = String::with_capacity(expr.len());
    let mut in_weight = false;
    for c in expr.chars() {
        if in_weight {
            in_weight = c != ']';
            continue;
        }
        match c {
            '[' => in_weight = true,
            UNION => pattern.push('|'),
            CONCAT => {}
            'λ' => pattern.push_str("(?:)"),
            'ø' => pattern.push_str(r"[^\s\S]"),
            '.' | '^' | '$' | '|' | '?' | '{' | '}' | '\\' => {
                pattern.push('\\');
                pattern.push(c);
            }
            _ => pattern.push(c),
        }
    }
    Some(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_respects_nesting() {
        assert_eq!(split_top_level("a", UNION), vec!["a"]);
        assert_eq!(split_top_level("a+b+c", UNION), vec!["a", "b", "c"]);
        assert_eq!(split_top_level("(a+b):c", UNION), vec!["(a+b):c"]);
        assert_eq!(split_top_level("(a+b):c", CONCAT), vec!["(a+b)", "c"]);
        assert_eq!(split_top_level("a[5]+b[7]", UNION), vec!["a[5]", "b[7]"]);
    }

    #[test]
    fn split_handles_multibyte_symbols() {
        assert_eq!(split_top_level("λ+ab", UNION), vec!["λ", "ab"]);
    }

    #[test]
    fn classification() {
        assert!(is_union("a+b"));
        assert!(!is_union("(a+b)"));
        assert!(is_concatenation("a:b"));
        assert!(!is_concatenation("a:b+c"));
        assert!(is_starred("(a+b)*"));
        assert!(!is_starred("a:b*"));
    }

    #[test]
    fn concat_identities() {
        assert_eq!(concat(EMPTY, "a"), EMPTY);
        assert_eq!(concat("a", EMPTY), EMPTY);
        assert_eq!(concat(EPSILON, EMPTY), EMPTY);
        assert_eq!(concat(EPSILON, "a"), "a");
        assert_eq!(concat("a", EPSILON), "a");
        assert_eq!(concat("", "a"), "a");
    }

    #[test]
    fn concat_groups_unions_only() {
        assert_eq!(concat("a", "b"), "a:b");
        assert_eq!(concat("a+b", "c"), "(a+b):c");
        assert_eq!(concat("a:b", "c*"), "a:b:c*");
        assert_eq!(concat("c", "a+b"), "c:(a+b)");
    }

    #[test]
    fn star_rules() {
        assert_eq!(star(EMPTY), EPSILON);
        assert_eq!(star(EPSILON), EPSILON);
        assert_eq!(star("a"), "a*");
        assert_eq!(star("a*"), "a*");
        assert_eq!(star("a+b"), "(a+b)*");
        assert_eq!(star("a:b"), "(a:b)*");
        assert_eq!(star(&star("a+b")), "(a+b)*");
    }

    #[test]
    fn union_rules() {
        assert_eq!(union(EMPTY, "a"), "a");
        assert_eq!(union("a", EMPTY), "a");
        assert_eq!(union(EPSILON, EPSILON), EPSILON);
        assert_eq!(union(EPSILON, "a"), "λ+a");
        assert_eq!(union("a", "b:c"), "a+b:c");
        assert_eq!(union("a+b", "c"), "(a+b)+c");
    }

    #[test]
    fn pattern_translation() {
        assert_eq!(to_pattern("λ+a").as_deref(), Some("(?:)|a"));
        assert_eq!(to_pattern("(a:b)*:c").as_deref(), Some("(ab)*c"));
        assert_eq!(to_pattern("(s1:s2)[500]+s3[500]").as_deref(), Some("(s1s2)|s3"));
        assert_eq!(to_pattern("a.b").as_deref(), Some(r"a\.b"));
    }
}
