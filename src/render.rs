//! Chat-message rendering (spec.md §4.6/§4.7): replace every `[[ ... ]]`
//! span in a chat message with its evaluated total and contributing
//! faces, passing every other character through untouched.
//!
//! Grounded directly on `original_source/server/src/api/http/chat.py`'s
//! `render`/`parseChat` pair, reimplemented as a single pass over the
//! `pest` pairs of `Rule::chat_request` instead of recursing over a
//! two-element `(head, tail)` parse tree.

use pest::Parser;
use rand::Rng;

use crate::limits::MAX_MESSAGE_CHARS;
use crate::parser::{eval_expr, DiceParser, Rule};
use crate::rng::{DiceRollSource, RngDiceSource};

/// Render `input` using the thread-local RNG.
pub fn render_chat(input: &str) -> String {
    render_chat_with(input, &mut rand::thread_rng())
}

/// Render `input` using the given `rand::Rng`.
pub fn render_chat_with(input: &str, rng: &mut impl Rng) -> String {
    let mut source = RngDiceSource::new(rng);
    render_chat_with_source(input, &mut source)
}

/// Render `input` using an injectable `DiceRollSource`, for deterministic
/// tests and for callers who already have their own source.
///
/// The grammar's `chat_request` rule is total over its input (the
/// trailing `chat_char` alternative matches any single character), so a
/// `pest` parse failure here only indicates an implementation bug rather
/// than malformed chat text. If it happens anyway, the input is logged
/// and returned unchanged (spec.md §7).
pub fn render_chat_with_source(input: &str, dice: &mut dyn DiceRollSource) -> String {
    if input.chars().count() > MAX_MESSAGE_CHARS {
        return "Message too long.".to_string();
    }

    let mut pairs = match DiceParser::parse(Rule::chat_request, input) {
        Ok(pairs) => pairs,
        Err(e) => {
            tracing::warn!(error = %e, "chat_request failed to parse; returning input unchanged");
            return input.to_string();
        }
    };

    let chat_request = pairs
        .next()
        .expect("chat_request rule always produces one top-level pair");

    let mut rendered = String::new();
    for part in chat_request.into_inner() {
        match part.as_rule() {
            Rule::equation_request => {
                let dice_expr = part
                    .into_inner()
                    .next()
                    .expect("equation_request always wraps a dice_expression");
                let source_text = dice_expr.as_str().to_string();
                let (total, faces) = eval_expr(dice_expr, dice);
                rendered.push_str(&format!("{total} {{{source_text} {faces}}}"));
            }
            Rule::chat_char => rendered.push_str(part.as_str()),
            Rule::EOI => {}
            other => unreachable!("chat_request child cannot be {other:?}"),
        }
    }

    if rendered.chars().count() > MAX_MESSAGE_CHARS {
        tracing::debug!("rendered chat output exceeded the length guard");
        return "Message too long.".to_string();
    }

    rendered
}
