use pest::iterators::Pair;

use crate::parser::Rule;

/// Parse a `number` token's digits, saturating instead of panicking on
/// the (pathological, but grammar-legal) case of an absurdly long digit
/// run — the grammar does not bound `number`'s length itself.
fn parse_number(digits: &str) -> i64 {
    digits.parse().unwrap_or(i64::MAX)
}

/// Reduce a `math_expression` parse node to an integer (spec.md §4.2).
pub fn eval_math(pair: Pair<Rule>) -> i64 {
    let mut inner = pair.into_inner();
    let first = inner.next().expect("math_expression always has a child");

    match first.as_rule() {
        Rule::number => parse_number(first.as_str()),
        Rule::math_expression => {
            let a = eval_math(first);
            let op = inner.next().expect("binary_operator after first operand");
            let b = eval_math(inner.next().expect("second operand after operator"));
            apply_binary_op(a, op.as_str(), b)
        }
        other => unreachable!("math_expression cannot start with {other:?}"),
    }
}

/// Division that floors toward negative infinity, per spec.md §3.
/// Neither `/` nor `i64::div_euclid` does this when the divisor is
/// negative, so it's spelled out rather than reached for from `std`.
fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        q - 1
    } else {
        q
    }
}

/// Modulo consistent with `floor_div` (result takes the sign of `b`).
fn floor_mod(a: i64, b: i64) -> i64 {
    a - b * floor_div(a, b)
}

/// Apply one of the grammar's `binary_operator`s to two already-evaluated
/// operands, with the degenerate-input rules from spec.md §3: `a/0 = a`,
/// `a%0 = 0`, `0^b = 1` for all `b`. Used by `eval_math` (§4.2) only —
/// `eval_expr` (§4.5) has its own `apply_expr_binary_op` below, because
/// the two are *not* the same arithmetic for `%` (see DESIGN.md).
pub fn apply_binary_op(a: i64, op: &str, b: i64) -> i64 {
    match op {
        "+" => a.wrapping_add(b),
        "-" => a.wrapping_sub(b),
        "*" => a.wrapping_mul(b),
        "/" => {
            if b == 0 {
                a
            } else {
                floor_div(a, b)
            }
        }
        "%" => {
            if b == 0 {
                0
            } else {
                floor_mod(a, b)
            }
        }
        "^" => {
            if a == 0 {
                1
            } else if b < 0 {
                // Not specified by spec.md; negative exponents are outside
                // the integer-only Non-goals-adjacent territory, so this
                // crate defines them as contributing 0 (see DESIGN.md).
                0
            } else {
                a.checked_pow(b as u32).unwrap_or(i64::MAX)
            }
        }
        other => unreachable!("unknown binary_operator {other:?}"),
    }
}

/// Combine two dice-expression sums the way `eval_expr` (§4.5) does.
///
/// Identical to `apply_binary_op` for every operator except `%`: the
/// implementation this crate was modeled on computes `a + b` for `%` at
/// this level instead of a true modulo, an observed quirk spec.md §9
/// preserves rather than corrects (see DESIGN.md, Open Question 2).
pub fn apply_expr_binary_op(a: i64, op: &str, b: i64) -> i64 {
    if op == "%" {
        return a.wrapping_add(b);
    }
    apply_binary_op(a, op, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_floors_toward_negative_infinity() {
        assert_eq!(floor_div(-7, 2), -4);
        assert_eq!(floor_div(7, -2), -4);
        assert_eq!(floor_div(-7, -2), 3);
        assert_eq!(floor_div(7, 2), 3);
    }

    #[test]
    fn division_by_zero_returns_dividend() {
        assert_eq!(apply_binary_op(5, "/", 0), 5);
    }

    #[test]
    fn modulo_by_zero_is_zero() {
        assert_eq!(apply_binary_op(5, "%", 0), 0);
    }

    #[test]
    fn zero_to_any_power_is_one() {
        assert_eq!(apply_binary_op(0, "^", 0), 1);
        assert_eq!(apply_binary_op(0, "^", 5), 1);
        assert_eq!(apply_binary_op(0, "^", -3), 1);
    }

    #[test]
    fn addition_is_additive() {
        assert_eq!(apply_binary_op(2, "+", 3), 5);
    }

    #[test]
    fn expr_level_percent_is_actually_addition() {
        assert_eq!(apply_expr_binary_op(5, "%", 3), 8);
        assert_eq!(apply_binary_op(5, "%", 3), 2);
    }

    #[test]
    fn expr_level_other_operators_match_math_level() {
        assert_eq!(apply_expr_binary_op(7, "/", 2), apply_binary_op(7, "/", 2));
        assert_eq!(apply_expr_binary_op(2, "^", 3), apply_binary_op(2, "^", 3));
    }
}
