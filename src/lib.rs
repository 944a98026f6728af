#![warn(missing_docs)]
//! A chat-embedded dice and arithmetic expression evaluator for tabletop
//! RPG chat messages.
//!
//! A chat message may contain zero or more `[[...]]` spans; each span
//! holds a dice/arithmetic expression (e.g. `[[(2d6+3)]]`, `[[4d6!]]`,
//! `[[1d20k1]]`). [`render_chat`] walks the message, evaluates every
//! span against a random source, and substitutes the total and the faces
//! that produced it, leaving everything else untouched. There is no
//! `WHITESPACE` rule in the grammar, so spaces inside a span (even around
//! operators) keep it from parsing as an equation at all.
//!
//! For callers that already have an isolated expression (no surrounding
//! chat text, no `[[...]]` brackets) and want a typed result instead of
//! rendered text, [`Roller`] evaluates a bare `dice_expression` directly.
//!
//! # Usage
//!
//! ```
//! use dicechat::render_chat_with;
//! use rand::rngs::mock::StepRng;
//!
//! let mut rng = StepRng::new(3, 0);
//! let rendered = render_chat_with("rolling [[1d6]] for damage", &mut rng);
//! assert!(rendered.starts_with("rolling "));
//! ```
//!
//! # Syntax
//!
//! ```text
//! [[xdyMODIFIER]]     -- roll x dice of y sides, with at most one modifier
//! [[(expr op expr)]]  -- combine two dice/math expressions: + - * / % ^
//!
//! No whitespace is allowed anywhere inside a span.
//!
//! Modifiers:
//! !!#  : compound explode  (reroll and add for every die matching the predicate, recursively)
//! !p#  : penetrating explode (like !!, but the die size shrinks by one each round)
//! !#   : single explode (one non-recursive extra round)
//! d#   : drop the lowest # dice
//! k#   : keep the lowest # dice
//! b#   : drop the highest # dice (keep from the bottom up)
//! ro#  : reroll once, replacing each die matching the predicate
//! r#   : reroll repeatedly, replacing matching dice until none match or the cap is hit
//!
//! A predicate defaults to "equal to the die's face count" when the
//! comparator and value are omitted; `r` and `ro` default to "<= 1".
//! ```
//!
//! # Examples
//!
//! `[[(2d6+3d10)]]` rolls two six-sided dice and three ten-sided dice and
//! sums everything.
//!
//! `[[3d6!]]` rolls three six-sided dice, exploding (recursively) on the
//! maximum face value.
//!
//! `[[4d6d1]]` rolls four six-sided dice and drops the lowest one.
//!
//! `[[(1d20+1d4)]]` rolls a d20 and a d4 and adds them, keeping both
//! sides' faces visible rather than merging them into one pool.

use pest::Parser;
use rand::Rng;

mod dice;
mod error;
mod limits;
mod math;
mod modifiers;
mod parser;
mod render;
mod rollresult;
mod rng;

pub use error::{Result, RollError};
pub use parser::{DiceParser, Rule};
pub use render::{render_chat, render_chat_with, render_chat_with_source};
pub use rng::{DiceRollSource, FixedSequence, MaxRoller, RngDiceSource};
pub use rollresult::{Faces, RollResult};

/// Metadata carried alongside a chat message through rendering, mirroring
/// the `LogInfo` contract the game-log socket handler this crate's chat
/// entry point is modeled on expects to forward unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLogMetadata {
    /// Name of the user or system that sent the message.
    pub source: String,
    /// Whether the log entry is visible to players (vs. GM-only).
    pub visibility: bool,
    /// Date/time the message was sent, as supplied by the caller.
    pub dtg: String,
}

/// A chat message after rendering, paired with the metadata it came in
/// with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChatMessage {
    /// The metadata passed in unchanged.
    pub metadata: ChatLogMetadata,
    /// The rendered contents, with every `[[ ... ]]` span evaluated.
    pub contents: String,
}

/// Render `contents` with the thread-local RNG and pair the result with
/// `metadata`, for callers (e.g. a game log) that need to carry message
/// provenance alongside the rendered text.
pub fn process_chat_message(contents: &str, metadata: ChatLogMetadata) -> RenderedChatMessage {
    RenderedChatMessage {
        contents: render_chat(contents),
        metadata,
    }
}

/// A single `dice_expression`, held for repeated or later evaluation.
///
/// Unlike the chat entry points, a bare expression is not total: it has
/// no "any character" fallback, so a malformed expression is a genuine
/// parse error rather than text to pass through.
#[derive(Clone, Debug)]
pub struct Roller(String);

impl Roller {
    /// Store the input. Parsing happens at `roll` time, not here.
    pub fn new(input: &str) -> Self {
        Roller(input.to_owned())
    }

    /// Evaluate the expression using `rand::thread_rng()`.
    pub fn roll(&self) -> Result<RollResult> {
        self.roll_with(&mut rand::thread_rng())
    }

    /// Evaluate the expression using the given `rand::Rng`.
    pub fn roll_with<RNG: Rng>(&self, rng: &mut RNG) -> Result<RollResult> {
        let mut source = RngDiceSource::new(rng);
        self.roll_with_source(&mut source)
    }

    /// Evaluate the expression using an injectable `DiceRollSource`.
    pub fn roll_with_source(&self, dice: &mut dyn DiceRollSource) -> Result<RollResult> {
        let mut pairs = DiceParser::parse(Rule::dice_expression, &self.0)?;
        let expr = pairs.next().expect("dice_expression rule always parses to one pair");
        let (total, faces) = parser::eval_expr(expr, dice);
        Ok(RollResult::new(total, faces))
    }

    /// Give back the original expression text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_number_rolls_to_itself() {
        let r = Roller::new("20");
        let res = r.roll_with_source(&mut MaxRoller).unwrap();
        assert_eq!(res.total, 20);
    }

    #[test]
    fn basic_dice_roll_sums_with_max_roller() {
        let r = Roller::new("3d6");
        let res = r.roll_with_source(&mut MaxRoller).unwrap();
        assert_eq!(res.total, 18);
    }

    #[test]
    fn fixed_sequence_drives_a_deterministic_roll() {
        let r = Roller::new("2d6");
        let mut src = FixedSequence::new(vec![3, 5]);
        let res = r.roll_with_source(&mut src).unwrap();
        assert_eq!(res.total, 8);
    }

    #[test]
    fn malformed_expression_is_a_parse_error() {
        let r = Roller::new("not a dice expression (((");
        assert!(r.roll_with_source(&mut MaxRoller).is_err());
    }

    #[test]
    fn combined_expression_nests_both_sides_faces() {
        let r = Roller::new("(1d6+1d4)");
        let mut src = FixedSequence::new(vec![3, 2]);
        let res = r.roll_with_source(&mut src).unwrap();
        assert_eq!(res.total, 5);
        assert_eq!(
            res.faces,
            Faces::Nested(
                Box::new(Faces::Flat(vec![3])),
                Box::new(Faces::Flat(vec![2]))
            )
        );
    }

    #[test]
    fn render_chat_leaves_plain_messages_alone() {
        let mut src = FixedSequence::new(vec![]);
        assert_eq!(
            render_chat_with_source("no dice here", &mut src),
            "no dice here"
        );
    }

    #[test]
    fn process_chat_message_carries_metadata_through() {
        let metadata = ChatLogMetadata {
            source: "gm".to_string(),
            visibility: true,
            dtg: "2026-07-27T00:00:00Z".to_string(),
        };
        let message = process_chat_message("no dice here", metadata.clone());
        assert_eq!(message.contents, "no dice here");
        assert_eq!(message.metadata, metadata);
    }
}
