//! Named bounds used throughout the crate (spec.md §3), kept in one place
//! instead of scattered magic numbers.

/// Smallest number of dice a `dice_roll` will actually draw; negative
/// counts clamp up to this, not to zero.
pub const MIN_DICE: i64 = 0;

/// Largest number of dice (and largest face count) a single `dice_roll`
/// will use, regardless of what the chat text asked for.
pub const MAX_DICE: i64 = 300;

/// Cap on the total number of dice any single explode/reroll modifier can
/// add or replace, counted cumulatively across the whole modifier's run
/// rather than per iteration (spec.md §9, Open Question 3).
pub const MAX_EXPANSION: usize = 100;

/// Longest chat message `render_chat` will evaluate. Longer input is
/// returned unevaluated, matching the HTTP handler's guard in the
/// implementation this crate's chat-rendering behavior is modeled on.
pub const MAX_MESSAGE_CHARS: usize = 200;
