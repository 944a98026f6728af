//! Random source abstraction (spec.md §2 item 1, §6.3). Generalized from
//! `caith::Roller`'s internal `DiceRollSource` trait, widened from `u64`
//! to `i64` to match this crate's face-count type.

use rand::Rng;

/// Capability `uniform(1, sides) -> integer`, injectable so evaluation is
/// deterministic in tests. Implementors only ever see `sides >= 1`: the
/// clamp-and-zero handling for non-positive face counts lives in
/// `crate::dice::do_roll` and the modifier draw helpers, not here.
pub trait DiceRollSource {
    fn roll_die(&mut self, sides: i64) -> i64;
}

/// Adapts any `rand::Rng` into a `DiceRollSource`, the way `caith` wraps
/// `rand::thread_rng()` behind its own trait.
pub struct RngDiceSource<'a, R: Rng> {
    rng: &'a mut R,
}

impl<'a, R: Rng> RngDiceSource<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DiceRollSource for RngDiceSource<'_, R> {
    fn roll_die(&mut self, sides: i64) -> i64 {
        debug_assert!(sides >= 1, "roll_die called with non-positive sides");
        self.rng.gen_range(1..=sides)
    }
}

/// A deterministic test double that hands out a fixed sequence of
/// results, panicking if it runs dry — analogous to `caith`'s
/// `IteratorDiceRollSource` test helper. Exposed (not `#[cfg(test)]`-only)
/// so downstream crates can reuse it for their own deterministic tests,
/// mirroring how `caith` keeps its helper `pub(crate)` within its own
/// test module; here it's small enough to just ship.
pub struct FixedSequence {
    values: std::collections::VecDeque<i64>,
}

impl FixedSequence {
    pub fn new(values: Vec<i64>) -> Self {
        Self {
            values: values.into(),
        }
    }
}

impl DiceRollSource for FixedSequence {
    fn roll_die(&mut self, sides: i64) -> i64 {
        let value = self
            .values
            .pop_front()
            .expect("FixedSequence ran out of values");
        assert!(
            value >= 1 && value <= sides,
            "FixedSequence yielded {value} for a d{sides}"
        );
        value
    }
}

/// A deterministic test double whose every draw equals the face count —
/// the "each `uniform(1, f)` returns `f`" source spec.md §8's concrete
/// scenarios are seeded with.
pub struct MaxRoller;

impl DiceRollSource for MaxRoller {
    fn roll_die(&mut self, sides: i64) -> i64 {
        sides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_sequence_yields_values_in_order() {
        let mut src = FixedSequence::new(vec![3, 5]);
        assert_eq!(src.roll_die(6), 3);
        assert_eq!(src.roll_die(6), 5);
    }

    #[test]
    #[should_panic(expected = "ran out of values")]
    fn fixed_sequence_panics_when_exhausted() {
        let mut src = FixedSequence::new(vec![1]);
        src.roll_die(6);
        src.roll_die(6);
    }

    #[test]
    fn max_roller_always_returns_the_face_count() {
        let mut src = MaxRoller;
        assert_eq!(src.roll_die(20), 20);
        assert_eq!(src.roll_die(6), 6);
    }
}
