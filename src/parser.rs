use pest::iterators::Pair;
use pest_derive::Parser;

use crate::math::{apply_expr_binary_op, eval_math};
use crate::rng::DiceRollSource;
use crate::rollresult::Faces;

/// Grammar of the chat-embedded dice/arithmetic expression language; see
/// `dice.pest`. The derived `Rule` enum is the tagged parse-tree node type
/// that spec.md §9 describes ("parse tree as tagged variant"): evaluators
/// below pattern-match on `Rule` variants instead of walking rule-name
/// strings the way the distilled-from Python implementation did.
#[derive(Parser)]
#[grammar = "dice.pest"]
pub struct DiceParser;

/// Reduce a `dice_expression` parse node to its total and contributing
/// faces (spec.md §4.5).
///
/// `dice_expression` has exactly one of three shapes: a parenthesized
/// binary combination of two `dice_expression`s, a bare `dice_roll`, or a
/// bare `math_expression`. The shape is read off the first child's `Rule`.
///
/// Note the operator here is `apply_expr_binary_op`, not `apply_binary_op`:
/// at this level `%` is not modulo (see `math::apply_expr_binary_op` and
/// DESIGN.md, Open Question 2).
pub fn eval_expr(pair: Pair<Rule>, dice: &mut dyn DiceRollSource) -> (i64, Faces) {
    let mut inner = pair.into_inner();
    let first = inner.next().expect("dice_expression always has a child");

    match first.as_rule() {
        Rule::dice_expression => {
            let op = inner.next().expect("binary_operator after first operand");
            let second = inner.next().expect("second operand after operator");
            let (a_sum, a_faces) = eval_expr(first, dice);
            let (b_sum, b_faces) = eval_expr(second, dice);
            let sum = apply_expr_binary_op(a_sum, op.as_str(), b_sum);
            (sum, Faces::combine(a_faces, b_faces))
        }
        Rule::dice_roll => {
            let (total, faces) = crate::dice::eval_dice(first, dice);
            (total, Faces::Flat(faces))
        }
        Rule::math_expression => (eval_math(first), Faces::Flat(Vec::new())),
        other => unreachable!("dice_expression cannot start with {other:?}"),
    }
}
