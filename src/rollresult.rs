//! The result types `eval_expr` and `Roller` hand back (spec.md §4.5, §7).
//!
//! Replaces `caith`'s much richer `rollresult/` module (history tracking,
//! critic markers, fudge dice, operator overloads on results) with the
//! flatter shape this grammar actually needs: a dice expression reduces to
//! one integer total plus a record of which faces produced it.

use std::fmt;

/// The faces that contributed to a `dice_expression`'s total.
///
/// A bare `dice_roll` contributes one flat list. Combining two
/// `dice_expression`s under a `binary_operator` nests their two sides
/// rather than flattening them, per spec.md §9: `(1d6+1d6)` keeps each
/// side's roll visible instead of merging both dice pools into one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Faces {
    Flat(Vec<i64>),
    Nested(Box<Faces>, Box<Faces>),
}

impl Faces {
    /// Combine two sub-expressions' faces the way a `dice_expression`'s
    /// binary-operator branch does: an empty side just propagates the
    /// other side untouched, two non-empty sides nest.
    pub fn combine(a: Faces, b: Faces) -> Faces {
        match (a.is_empty(), b.is_empty()) {
            (true, _) => b,
            (_, true) => a,
            (false, false) => Faces::Nested(Box::new(a), Box::new(b)),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Faces::Flat(v) => v.is_empty(),
            Faces::Nested(a, b) => a.is_empty() && b.is_empty(),
        }
    }
}

impl fmt::Display for Faces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Faces::Flat(values) => {
                write!(f, "[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Faces::Nested(a, b) => write!(f, "[{a}, {b}]"),
        }
    }
}

/// The outcome of evaluating one `dice_expression` (spec.md §4.5, §7):
/// the final integer and the faces that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollResult {
    pub total: i64,
    pub faces: Faces,
}

impl RollResult {
    pub fn new(total: i64, faces: Faces) -> Self {
        Self { total, faces }
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.total, self.faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combining_two_flat_sides_nests_them() {
        let a = Faces::Flat(vec![1, 2]);
        let b = Faces::Flat(vec![3]);
        assert_eq!(
            Faces::combine(a.clone(), b.clone()),
            Faces::Nested(Box::new(a), Box::new(b))
        );
    }

    #[test]
    fn combining_with_an_empty_side_propagates_the_other() {
        let a = Faces::Flat(vec![1, 2]);
        let empty = Faces::Flat(Vec::new());
        assert_eq!(Faces::combine(a.clone(), empty.clone()), a.clone());
        assert_eq!(Faces::combine(empty, a.clone()), a);
    }

    #[test]
    fn display_renders_nested_faces_bracketed() {
        let nested = Faces::Nested(
            Box::new(Faces::Flat(vec![1, 2])),
            Box::new(Faces::Flat(vec![3])),
        );
        assert_eq!(nested.to_string(), "[[1, 2], [3]]");
    }

    #[test]
    fn roll_result_displays_total_then_faces() {
        let result = RollResult::new(6, Faces::Flat(vec![2, 4]));
        assert_eq!(result.to_string(), "6 [2, 4]");
    }
}
