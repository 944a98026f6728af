//! Dice modifier semantics (spec.md §4.4), grounded directly on
//! `original_source/server/src/api/http/chat.py`'s `modRoll`, the
//! function this specification was distilled from. Each table row gets
//! its own function, in the spirit of `caith::parser::compute_option`'s
//! per-rule dispatch, generalized to this grammar's modifier set.

use pest::iterators::{Pair, Pairs};

use crate::limits::MAX_EXPANSION;
use crate::math::eval_math;
use crate::parser::Rule;
use crate::rng::DiceRollSource;

/// The six comparators the grammar's `comparator` rule recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Ne,
    Ge,
    Le,
    Gt,
    Lt,
}

impl Comparator {
    fn parse(s: &str) -> Self {
        match s {
            "==" => Comparator::Eq,
            "!=" => Comparator::Ne,
            ">=" => Comparator::Ge,
            "<=" => Comparator::Le,
            ">" => Comparator::Gt,
            "<" => Comparator::Lt,
            other => unreachable!("unknown comparator {other:?}"),
        }
    }

    pub fn matches(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Comparator::Eq => lhs == rhs,
            Comparator::Ne => lhs != rhs,
            Comparator::Ge => lhs >= rhs,
            Comparator::Le => lhs <= rhs,
            Comparator::Gt => lhs > rhs,
            Comparator::Lt => lhs < rhs,
        }
    }
}

/// Read an optional `comparator math_expression` pair, defaulting when
/// absent. Returns whether a predicate was explicitly supplied, since
/// `!p`'s default tracking of the current face count only applies when
/// the user didn't spell one out (spec.md §9).
fn predicate_with_math(
    inner: &mut Pairs<Rule>,
    default_cmp: Comparator,
    default_val: i64,
) -> (Comparator, i64, bool) {
    match inner.next() {
        Some(cmp_pair) => {
            let cmp = Comparator::parse(cmp_pair.as_str());
            let val = eval_math(inner.next().expect("math_expression after comparator"));
            (cmp, val, true)
        }
        None => (default_cmp, default_val, false),
    }
}

/// Same, but for `reroll` (`r`), whose grammar uses a bare `number`
/// rather than a full `math_expression` for the threshold.
fn predicate_with_number(
    inner: &mut Pairs<Rule>,
    default_cmp: Comparator,
    default_val: i64,
) -> (Comparator, i64) {
    match inner.next() {
        Some(cmp_pair) => {
            let cmp = Comparator::parse(cmp_pair.as_str());
            let val: i64 = inner
                .next()
                .expect("number after comparator")
                .as_str()
                .parse()
                .unwrap_or(i64::MAX);
            (cmp, val)
        }
        None => (default_cmp, default_val),
    }
}

fn draw(dice: &mut dyn DiceRollSource, count: usize, faces: i64) -> Vec<i64> {
    let faces = faces.min(crate::limits::MAX_DICE);
    if faces <= 0 {
        return vec![0; count];
    }
    (0..count).map(|_| dice.roll_die(faces)).collect()
}

/// `!!` compound explode: while under the 100-roll cap, any die in the
/// previous batch matching the predicate spawns one new die; repeats on
/// the newly spawned batch.
pub fn compound_explode(
    rolls: Vec<i64>,
    faces: i64,
    modifier: Pair<Rule>,
    dice: &mut dyn DiceRollSource,
) -> Vec<i64> {
    let mut inner = modifier.into_inner();
    let (cmp, val, _) = predicate_with_math(&mut inner, Comparator::Eq, faces);
    if cmp == Comparator::Eq && val <= 1 {
        return rolls;
    }

    let mut rolls = rolls;
    let mut previous = rolls.clone();
    while rolls.len() < MAX_EXPANSION {
        let matching = previous.iter().filter(|&&x| cmp.matches(x, val)).count();
        if matching == 0 {
            break;
        }
        let new_batch = draw(dice, matching, faces);
        rolls.extend(new_batch.iter().copied());
        previous = new_batch;
    }
    rolls
}

/// `!p` penetrating explode: same loop as `!!`, but the face count
/// decreases by one after every batch, and a default (non-explicit)
/// predicate value tracks that decreasing face count.
pub fn pen_explode(
    rolls: Vec<i64>,
    faces: i64,
    modifier: Pair<Rule>,
    dice: &mut dyn DiceRollSource,
) -> Vec<i64> {
    let mut inner = modifier.into_inner();
    let (cmp, mut val, explicit) = predicate_with_math(&mut inner, Comparator::Eq, faces);

    let mut rolls = rolls;
    let mut previous = rolls.clone();
    let mut current_faces = faces;
    while rolls.len() < MAX_EXPANSION {
        let matching = if cmp == Comparator::Eq && val <= 1 {
            0
        } else {
            previous.iter().filter(|&&x| cmp.matches(x, val)).count()
        };
        current_faces -= 1;
        if matching == 0 || current_faces == 0 {
            break;
        }
        let new_batch = draw(dice, matching, current_faces);
        rolls.extend(new_batch.iter().copied());
        previous = new_batch;
        if !explicit {
            val = current_faces;
        }
    }
    rolls
}

/// `!` single explode: one non-recursive pass over the original dice.
pub fn explode(
    rolls: Vec<i64>,
    faces: i64,
    modifier: Pair<Rule>,
    dice: &mut dyn DiceRollSource,
) -> Vec<i64> {
    let mut inner = modifier.into_inner();
    let (cmp, val, _) = predicate_with_math(&mut inner, Comparator::Eq, faces);
    if cmp == Comparator::Eq && val <= 1 {
        return rolls;
    }

    let matching = rolls.iter().filter(|&&x| cmp.matches(x, val)).count();
    let mut result = rolls;
    if matching > 0 {
        result.extend(draw(dice, matching, faces));
    }
    result
}

/// `d N` drop the lowest `N` dice.
pub fn drop_mod(rolls: Vec<i64>, modifier: Pair<Rule>) -> Vec<i64> {
    let n = eval_math(modifier.into_inner().next().expect("drop carries a count"));
    let mut sorted = rolls;
    sorted.sort_unstable();
    let keep = (sorted.len() as i64) - n;
    if keep > 0 {
        let keep = (keep as usize).min(sorted.len());
        sorted.truncate(keep);
        sorted
    } else {
        Vec::new()
    }
}

/// `k N` keep — sorts ascending and keeps the first `N`, i.e. the
/// *lowest* `N`, per the observed (not "fixed") behavior in spec.md §9
/// Open Question 1.
pub fn keep_mod(rolls: Vec<i64>, modifier: Pair<Rule>) -> Vec<i64> {
    let n = eval_math(modifier.into_inner().next().expect("keep carries a count"));
    let mut sorted = rolls;
    sorted.sort_unstable();
    if n > 0 {
        let n = (n as usize).min(sorted.len());
        sorted.truncate(n);
        sorted
    } else {
        Vec::new()
    }
}

/// `b N` bottom — sorts ascending and drops the first `N`, keeping from
/// index `N` onward, per spec.md §9 Open Question 1.
///
/// A negative `N` mirrors Python's `list[N:]` slicing (what the original
/// does): it counts back from the end, so `b(0-1)` keeps only the single
/// highest die rather than the whole pool.
pub fn bottom_mod(rolls: Vec<i64>, modifier: Pair<Rule>) -> Vec<i64> {
    let n = eval_math(
        modifier
            .into_inner()
            .next()
            .expect("bottom carries a count"),
    );
    let mut sorted = rolls;
    sorted.sort_unstable();
    let len = sorted.len() as i64;
    if n < len {
        let start = if n >= 0 { n } else { (len + n).max(0) };
        sorted.drain(..start as usize);
        sorted
    } else {
        Vec::new()
    }
}

/// Guard conditions on `ro`'s comparator: each comparator has its own
/// condition under which a reroll is even attempted, preventing
/// impossible predicates (e.g. `==` on a d1) from rerolling everything.
fn reroll_once_guard_ok(cmp: Comparator, val: i64, faces: i64) -> bool {
    match cmp {
        Comparator::Eq => faces != 1,
        Comparator::Ne => val > 0 && val <= faces,
        Comparator::Ge => val > 1,
        Comparator::Le => val < faces,
        Comparator::Gt => val <= faces,
        Comparator::Lt => val >= 1,
    }
}

/// `ro` reroll once: matched dice are replaced with exactly one fresh
/// draw each, non-recursively.
pub fn reroll_once(
    rolls: Vec<i64>,
    faces: i64,
    modifier: Pair<Rule>,
    dice: &mut dyn DiceRollSource,
) -> Vec<i64> {
    let mut inner = modifier.into_inner();
    let (cmp, val, _) = predicate_with_math(&mut inner, Comparator::Le, 1);
    if !reroll_once_guard_ok(cmp, val, faces) {
        return rolls;
    }

    let (to_reroll, mut kept): (Vec<i64>, Vec<i64>) =
        rolls.into_iter().partition(|&x| cmp.matches(x, val));
    if to_reroll.is_empty() {
        return kept;
    }
    kept.extend(draw(dice, to_reroll.len(), faces));
    kept
}

/// `r` reroll loop: repeat until nothing matches or the cumulative count
/// of rerolled dice (not loop iterations) reaches 100 (spec.md §9 Open
/// Question 3).
pub fn reroll_loop(
    rolls: Vec<i64>,
    faces: i64,
    modifier: Pair<Rule>,
    dice: &mut dyn DiceRollSource,
) -> Vec<i64> {
    let mut inner = modifier.into_inner();
    let (cmp, val) = predicate_with_number(&mut inner, Comparator::Le, 1);

    let mut keep = rolls;
    let mut cumulative = 0usize;
    while cumulative < MAX_EXPANSION {
        let (to_reroll, remaining): (Vec<i64>, Vec<i64>) =
            keep.into_iter().partition(|&x| cmp.matches(x, val));
        if to_reroll.is_empty() {
            keep = remaining;
            break;
        }
        cumulative += to_reroll.len();
        keep = remaining;
        keep.extend(draw(dice, to_reroll.len(), faces));
    }
    keep
}

/// Dispatch a `dice_mod`'s single child (one of the modifier rules) to
/// its handler.
pub fn apply(
    rolls: Vec<i64>,
    faces: i64,
    modifier: Pair<Rule>,
    dice: &mut dyn DiceRollSource,
) -> Vec<i64> {
    match modifier.as_rule() {
        Rule::compound_explode => compound_explode(rolls, faces, modifier, dice),
        Rule::pen_explode => pen_explode(rolls, faces, modifier, dice),
        Rule::explode => explode(rolls, faces, modifier, dice),
        Rule::drop => drop_mod(rolls, modifier),
        Rule::keep => keep_mod(rolls, modifier),
        Rule::reroll_once => reroll_once(rolls, faces, modifier, dice),
        Rule::reroll => reroll_loop(rolls, faces, modifier, dice),
        Rule::bottom => bottom_mod(rolls, modifier),
        other => unreachable!("unknown dice_mod child {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedSequence;

    #[test]
    fn drop_lowest_keeps_the_rest_ascending() {
        let sorted = {
            let mut rolls = vec![17, 4];
            rolls.sort_unstable();
            rolls
        };
        assert_eq!(sorted, vec![4, 17]);
    }

    #[test]
    fn comparator_matches_are_symmetric_with_table() {
        assert!(Comparator::Ge.matches(5, 5));
        assert!(!Comparator::Gt.matches(5, 5));
        assert!(Comparator::Le.matches(3, 3));
        assert!(Comparator::Lt.matches(2, 3));
    }

    #[test]
    fn reroll_once_guard_blocks_impossible_eq_on_d1() {
        assert!(!reroll_once_guard_ok(Comparator::Eq, 1, 1));
    }

    #[test]
    fn fixed_sequence_source_feeds_draw_in_order() {
        let mut src = FixedSequence::new(vec![6, 6]);
        let rolled = draw(&mut src, 2, 6);
        assert_eq!(rolled, vec![6, 6]);
    }
}
