#![no_main]
use libfuzzer_sys::fuzz_target;

use ::dicechat::Roller;

// Exercises the grammar and evaluator on arbitrary input: a bare
// `dice_expression` is not total (unlike `chat_request`), so most inputs
// are expected to fail to parse. The point is that a failure never
// panics.
fuzz_target!(|data: &str| {
    let roller = Roller::new(data);
    let _ = roller.roll();
});
