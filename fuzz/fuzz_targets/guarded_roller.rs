#![no_main]
use libfuzzer_sys::fuzz_target;

use ::dicechat::{render_chat_with_source, DiceRollSource};

// `chat_request` is total over its input (the grammar's trailing
// `chat_char` alternative matches any character), so `render_chat` never
// fails to parse; this exercises the evaluator and modifier logic on
// arbitrary chat text instead. `WrappingSource` stands in for an RNG:
// every draw is in range, so no modifier guard can panic on an
// out-of-bounds value.
struct WrappingSource;

impl DiceRollSource for WrappingSource {
    fn roll_die(&mut self, sides: i64) -> i64 {
        sides.max(1)
    }
}

fuzz_target!(|data: &str| {
    let _ = render_chat_with_source(data, &mut WrappingSource);
});
