//! Parameter coercion kinds.
//!
//! The host application is allowed to pass symbolic parameter values
//! (`"black"`, `"easeInOut"`, `"minutes,hours"`); the device side of the
//! protocol works with the numeric forms. Each parameter schema names one
//! coercion from this closed set, so the whole command table stays
//! data-driven and serializable – there are no arbitrary callables hiding in
//! the schema.
//!
//! Every coercion is idempotent on its own output: applying it to an
//! already-coerced value returns that value unchanged. The codec relies on
//! this for encode/decode round-trips.

use serde::{Deserialize, Serialize};

use crate::protocol::value::Value;

/// Names one coercion rule for a command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coercion {
    /// Pass the value through untouched.
    Raw,
    /// Boolean flag: integers become `false`/`true` by zero-test, strings by
    /// emptiness.
    Bool,
    /// Text: integers are rendered as decimal strings.
    Text,
    /// Display color: `clear` → −1, `black` → 0, `white` → 1, numbers pass
    /// through.
    Color,
    /// Numeric resource identifier for images, icons, and fonts.
    MediaId,
    /// Text overflow mode: `wrap` → 0, `ellipsis` → 1, `fill` → 2.
    TextOverflow,
    /// Text alignment: `left` → 0, `center` → 1, `right` → 2.
    TextAlign,
    /// Bitmask over the fixed key set seconds/minutes/hours/days/months/years
    /// (bits 0–5); accepts a comma-separated key list or a prebuilt mask.
    TimeUnits,
    /// Compositing operation: `assign`/`normal` → 0, `assignInverted`/
    /// `invert` → 1, `or` → 2, `and` → 3, `clear` → 4, `set` → 5.
    Compositing,
    /// Animation easing curve: `linear` → 0, `easeIn` → 1, `easeOut` → 2,
    /// `easeInOut` → 3.
    AnimationCurve,
}

impl Coercion {
    /// Applies this coercion to a raw wire value.
    ///
    /// `Null` always coerces to `Null`; a symbolic string with no entry in
    /// the keyword table falls back to numeric parsing, then to `Null`.
    pub fn apply(self, raw: &Value) -> Value {
        if raw.is_null() {
            return Value::Null;
        }
        match self {
            Coercion::Raw => raw.clone(),
            Coercion::Bool => match raw {
                Value::Bool(b) => Value::Bool(*b),
                Value::Int(n) => Value::Bool(*n != 0),
                Value::Str(s) => Value::Bool(!s.is_empty()),
                Value::Null => Value::Null,
            },
            Coercion::Text => match raw {
                Value::Str(_) => raw.clone(),
                Value::Int(n) => Value::Str(n.to_string()),
                Value::Bool(b) => Value::Str(b.to_string()),
                Value::Null => Value::Null,
            },
            Coercion::Color => keyword_or_numeric(&[("clear", -1), ("black", 0), ("white", 1)], raw),
            Coercion::MediaId => keyword_or_numeric(&[], raw),
            Coercion::TextOverflow => {
                keyword_or_numeric(&[("wrap", 0), ("ellipsis", 1), ("fill", 2)], raw)
            }
            Coercion::TextAlign => {
                keyword_or_numeric(&[("left", 0), ("center", 1), ("right", 2)], raw)
            }
            Coercion::TimeUnits => time_units_mask(raw),
            Coercion::Compositing => keyword_or_numeric(
                &[
                    ("assign", 0),
                    ("normal", 0),
                    ("assignInverted", 1),
                    ("invert", 1),
                    ("or", 2),
                    ("and", 3),
                    ("clear", 4),
                    ("set", 5),
                ],
                raw,
            ),
            Coercion::AnimationCurve => keyword_or_numeric(
                &[("linear", 0), ("easeIn", 1), ("easeOut", 2), ("easeInOut", 3)],
                raw,
            ),
        }
    }
}

/// Looks a symbolic string up in `table`, falling back to numeric parsing.
/// Integers and booleans pass through as integers.
fn keyword_or_numeric(table: &[(&str, i64)], raw: &Value) -> Value {
    match raw {
        Value::Int(n) => Value::Int(*n),
        Value::Bool(b) => Value::Int(i64::from(*b)),
        Value::Str(s) => {
            if let Some((_, n)) = table.iter().find(|(k, _)| k == s) {
                Value::Int(*n)
            } else {
                s.parse::<i64>().map(Value::Int).unwrap_or(Value::Null)
            }
        }
        Value::Null => Value::Null,
    }
}

/// Builds the time-unit bitmask. Only the fixed key set is recognized;
/// unknown keys are ignored.
fn time_units_mask(raw: &Value) -> Value {
    match raw {
        Value::Int(n) => Value::Int(*n),
        Value::Str(s) => {
            let mut mask = 0i64;
            for key in s.split(',').map(str::trim) {
                match key {
                    "seconds" => mask |= 1 << 0,
                    "minutes" => mask |= 1 << 1,
                    "hours" => mask |= 1 << 2,
                    "days" => mask |= 1 << 3,
                    "months" => mask |= 1 << 4,
                    "years" => mask |= 1 << 5,
                    _ => {}
                }
            }
            Value::Int(mask)
        }
        Value::Bool(b) => Value::Int(i64::from(*b)),
        Value::Null => Value::Null,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_maps_symbolic_names() {
        assert_eq!(Coercion::Color.apply(&Value::Str("clear".into())), Value::Int(-1));
        assert_eq!(Coercion::Color.apply(&Value::Str("black".into())), Value::Int(0));
        assert_eq!(Coercion::Color.apply(&Value::Str("white".into())), Value::Int(1));
    }

    #[test]
    fn test_color_passes_numbers_through() {
        assert_eq!(Coercion::Color.apply(&Value::Int(5)), Value::Int(5));
        assert_eq!(Coercion::Color.apply(&Value::Str("7".into())), Value::Int(7));
    }

    #[test]
    fn test_bool_zero_tests_integers() {
        assert_eq!(Coercion::Bool.apply(&Value::Int(0)), Value::Bool(false));
        assert_eq!(Coercion::Bool.apply(&Value::Int(2)), Value::Bool(true));
    }

    #[test]
    fn test_text_renders_integers_as_decimal() {
        assert_eq!(Coercion::Text.apply(&Value::Int(42)), Value::Str("42".into()));
        assert_eq!(
            Coercion::Text.apply(&Value::Str("abc".into())),
            Value::Str("abc".into())
        );
    }

    #[test]
    fn test_time_units_builds_mask_from_key_list() {
        let mask = Coercion::TimeUnits.apply(&Value::Str("minutes,hours".into()));
        assert_eq!(mask, Value::Int((1 << 1) | (1 << 2)));
    }

    #[test]
    fn test_time_units_ignores_unknown_keys() {
        let mask = Coercion::TimeUnits.apply(&Value::Str("minutes,fortnights".into()));
        assert_eq!(mask, Value::Int(1 << 1));
    }

    #[test]
    fn test_compositing_aliases_map_to_same_code() {
        assert_eq!(Coercion::Compositing.apply(&Value::Str("assign".into())), Value::Int(0));
        assert_eq!(Coercion::Compositing.apply(&Value::Str("normal".into())), Value::Int(0));
        assert_eq!(Coercion::Compositing.apply(&Value::Str("invert".into())), Value::Int(1));
    }

    #[test]
    fn test_animation_curve_table() {
        assert_eq!(
            Coercion::AnimationCurve.apply(&Value::Str("easeInOut".into())),
            Value::Int(3)
        );
    }

    #[test]
    fn test_unknown_symbol_without_numeric_form_coerces_to_null() {
        assert_eq!(Coercion::Color.apply(&Value::Str("magenta".into())), Value::Null);
    }

    #[test]
    fn test_null_always_coerces_to_null() {
        for c in [
            Coercion::Raw,
            Coercion::Bool,
            Coercion::Text,
            Coercion::Color,
            Coercion::TimeUnits,
        ] {
            assert_eq!(c.apply(&Value::Null), Value::Null);
        }
    }

    #[test]
    fn test_all_coercions_are_idempotent_on_their_output() {
        let inputs = [
            Value::Str("clear".into()),
            Value::Str("minutes,hours".into()),
            Value::Str("easeIn".into()),
            Value::Int(3),
            Value::Bool(true),
            Value::Str("some text".into()),
        ];
        for c in [
            Coercion::Raw,
            Coercion::Bool,
            Coercion::Text,
            Coercion::Color,
            Coercion::MediaId,
            Coercion::TextOverflow,
            Coercion::TextAlign,
            Coercion::TimeUnits,
            Coercion::Compositing,
            Coercion::AnimationCurve,
        ] {
            for input in &inputs {
                let once = c.apply(input);
                let twice = c.apply(&once);
                assert_eq!(once, twice, "{c:?} must be idempotent on {input:?}");
            }
        }
    }
}
