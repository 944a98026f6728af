//! Dice evaluator for a bare `dice_roll` node (spec.md §4.3), the ~35%
//! component of this crate: number-of-dice and face-count evaluation,
//! clamping, the basic roll, and delegating to a modifier if present.

use pest::iterators::Pair;

use crate::limits::{MAX_DICE, MIN_DICE};
use crate::math::eval_math;
use crate::modifiers;
use crate::parser::Rule;
use crate::rng::DiceRollSource;

/// Draw `n` dice of `f` faces, after clamping both to `[0, 300]`
/// (spec.md §3). A non-positive face count yields `n` zeros rather than
/// drawing from an empty range.
pub fn do_roll(n: i64, f: i64, dice: &mut dyn DiceRollSource) -> Vec<i64> {
    let n = n.clamp(MIN_DICE, MAX_DICE) as usize;
    let f = f.min(MAX_DICE);
    if f <= 0 {
        return vec![0; n];
    }
    (0..n).map(|_| dice.roll_die(f)).collect()
}

/// Reduce a `dice_roll` parse node to `(sum, kept_faces)` (spec.md §4.3).
pub fn eval_dice(pair: Pair<Rule>, dice: &mut dyn DiceRollSource) -> (i64, Vec<i64>) {
    let mut inner = pair.into_inner();
    let n_pair = inner.next().expect("dice_roll always has a count operand");
    let f_pair = inner.next().expect("dice_roll always has a faces operand");
    let modifier = inner.next();

    let n = eval_math(n_pair);
    let f = eval_math(f_pair);
    let mut rolls = do_roll(n, f, dice);

    if let Some(dice_mod) = modifier {
        let actual = dice_mod
            .into_inner()
            .next()
            .expect("dice_mod always wraps exactly one modifier rule");
        rolls = modifiers::apply(rolls, f, actual, dice);
    }

    let sum = rolls.iter().sum();
    (sum, rolls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::DiceParser;
    use crate::rng::{FixedSequence, MaxRoller};
    use pest::Parser;

    #[test]
    fn zero_dice_is_an_empty_roll() {
        let mut src = MaxRoller;
        assert_eq!(do_roll(0, 6, &mut src), Vec::<i64>::new());
    }

    #[test]
    fn nonpositive_faces_yields_zeros() {
        let mut src = MaxRoller;
        assert_eq!(do_roll(3, 0, &mut src), vec![0, 0, 0]);
        assert_eq!(do_roll(2, -5, &mut src), vec![0, 0]);
    }

    #[test]
    fn clamps_dice_and_faces_to_300() {
        let mut src = MaxRoller;
        let rolls = do_roll(500, 500, &mut src);
        assert_eq!(rolls.len(), 300);
        assert!(rolls.iter().all(|&r| r == 300));
    }

    #[test]
    fn basic_roll_sums_its_faces() {
        let mut src = FixedSequence::new(vec![4]);
        let rolls = do_roll(1, 6, &mut src);
        assert_eq!(rolls, vec![4]);
    }

    #[test]
    fn parsed_dice_roll_with_a_modifier_applies_it() {
        let pair = DiceParser::parse(Rule::dice_roll, "1d6!!")
            .unwrap()
            .next()
            .unwrap();
        // A single d6 rolling max every time should keep exploding, one
        // extra die per batch, up to the cumulative 100-dice cap.
        let mut src = MaxRoller;
        let (total, faces) = eval_dice(pair, &mut src);
        assert_eq!(faces.len(), 100);
        assert_eq!(total, 600);
    }
}
