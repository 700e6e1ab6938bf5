//! String to scalar coercion
//!
//! Converts raw input into the [`Scalar`] a leaf of a given [`ScalarKind`]
//! stores. Empty input always coerces to the zero value.

use crate::config::OverflowPolicy;
use crate::error::ErrorKind;
use crate::parse::{parse_bool, parse_f32, parse_f64, parse_integer};
use crate::scalar::{Scalar, ScalarKind};

/// Coerce `raw` into a value of `kind`
///
/// Integers are parsed in the 64-bit domain, then narrowed to the target
/// width. [`OverflowPolicy::Truncate`] keeps the low bits (`"300"` into a
/// `u8` is `44`); [`OverflowPolicy::Reject`] fails instead.
///
/// # Errors
/// Returns [`ErrorKind::TypeMismatch`] if `raw` is not a literal of `kind`
pub fn coerce(raw: &str, kind: ScalarKind, overflow: OverflowPolicy) -> Result<Scalar, ErrorKind> {
    if raw.is_empty() {
        return Ok(kind.zero());
    }
    let mismatch = |reason: &dyn ToString| ErrorKind::scalar_mismatch(raw, kind, reason.to_string());

    let value = match kind {
        ScalarKind::String => Scalar::String(raw.to_string()),
        ScalarKind::Bool => Scalar::Bool(parse_bool(raw).map_err(|e| mismatch(&e))?),
        ScalarKind::F32 => {
            let value = parse_f32(raw).map_err(|e| mismatch(&e))?;
            if overflow == OverflowPolicy::Reject && value.is_infinite() && !spells_infinity(raw) {
                return Err(mismatch(&"value overflows f32"));
            }
            Scalar::F32(value)
        }
        ScalarKind::F64 => {
            let value = parse_f64(raw).map_err(|e| mismatch(&e))?;
            if overflow == OverflowPolicy::Reject && value.is_infinite() && !spells_infinity(raw) {
                return Err(mismatch(&"value overflows f64"));
            }
            Scalar::F64(value)
        }
        _ => {
            let wide = parse_integer(raw).map_err(|e| mismatch(&e))?;
            narrow(wide, kind, overflow).ok_or_else(|| {
                mismatch(&format!("value does not fit in {kind}"))
            })?
        }
    };
    Ok(value)
}

/// Coerce with the default truncating overflow policy
///
/// # Errors
/// Returns [`ErrorKind::TypeMismatch`] if `raw` is not a literal of `kind`
#[inline]
pub fn coerce_default(raw: &str, kind: ScalarKind) -> Result<Scalar, ErrorKind> {
    coerce(raw, kind, OverflowPolicy::default())
}

fn spells_infinity(raw: &str) -> bool {
    let digits = raw.trim_start_matches(['+', '-']);
    digits.eq_ignore_ascii_case("inf") || digits.eq_ignore_ascii_case("infinity")
}

/// Narrow a 64-bit-domain integer to an integer kind
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn narrow(wide: i128, kind: ScalarKind, overflow: OverflowPolicy) -> Option<Scalar> {
    macro_rules! narrow_to {
        ($variant:ident, $ty:ty) => {
            match overflow {
                OverflowPolicy::Truncate => Some(Scalar::$variant(wide as $ty)),
                OverflowPolicy::Reject => <$ty>::try_from(wide).ok().map(Scalar::$variant),
            }
        };
    }

    match kind {
        ScalarKind::I8 => narrow_to!(I8, i8),
        ScalarKind::I16 => narrow_to!(I16, i16),
        ScalarKind::I32 => narrow_to!(I32, i32),
        ScalarKind::I64 => narrow_to!(I64, i64),
        ScalarKind::Isize => narrow_to!(Isize, isize),
        ScalarKind::U8 => narrow_to!(U8, u8),
        ScalarKind::U16 => narrow_to!(U16, u16),
        ScalarKind::U32 => narrow_to!(U32, u32),
        ScalarKind::U64 => narrow_to!(U64, u64),
        ScalarKind::Usize => narrow_to!(Usize, usize),
        ScalarKind::Bool | ScalarKind::F32 | ScalarKind::F64 | ScalarKind::String => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn truncating(raw: &str, kind: ScalarKind) -> Result<Scalar, ErrorKind> {
        coerce(raw, kind, OverflowPolicy::Truncate)
    }

    #[test]
    fn empty_is_zero_for_every_kind() {
        for kind in [
            ScalarKind::Bool,
            ScalarKind::I8,
            ScalarKind::I64,
            ScalarKind::Usize,
            ScalarKind::F32,
            ScalarKind::String,
        ] {
            assert_eq!(truncating("", kind), Ok(kind.zero()));
            assert_eq!(coerce("", kind, OverflowPolicy::Reject), Ok(kind.zero()));
        }
    }

    #[test]
    fn integers_parse_base_ten() {
        assert_eq!(truncating("7", ScalarKind::I32), Ok(Scalar::I32(7)));
        assert_eq!(truncating("-12", ScalarKind::I64), Ok(Scalar::I64(-12)));
        assert_eq!(truncating("+3", ScalarKind::U16), Ok(Scalar::U16(3)));
    }

    #[test]
    fn wide_integers_truncate_by_default() {
        assert_eq!(truncating("300", ScalarKind::U8), Ok(Scalar::U8(44)));
        assert_eq!(truncating("128", ScalarKind::I8), Ok(Scalar::I8(-128)));
        assert_eq!(truncating("4294967297", ScalarKind::I32), Ok(Scalar::I32(1)));
        assert_eq!(truncating("-1", ScalarKind::U32), Ok(Scalar::U32(u32::MAX)));
    }

    #[test]
    fn reject_policy_refuses_overflow() {
        let err = coerce("300", ScalarKind::U8, OverflowPolicy::Reject).unwrap_err();
        assert!(matches!(err, ErrorKind::TypeMismatch { ref target, .. } if target == "u8"));
        assert_eq!(
            coerce("255", ScalarKind::U8, OverflowPolicy::Reject),
            Ok(Scalar::U8(255))
        );
        assert!(coerce("-1", ScalarKind::U64, OverflowPolicy::Reject).is_err());
    }

    #[test]
    fn outside_64_bit_domain_always_fails() {
        assert!(truncating("99999999999999999999", ScalarKind::U64).is_err());
        assert!(truncating("-9223372036854775809", ScalarKind::I64).is_err());
    }

    #[test]
    fn non_numeric_is_mismatch() {
        let err = truncating("confId", ScalarKind::I32).unwrap_err();
        match err {
            ErrorKind::TypeMismatch { raw, target, .. } => {
                assert_eq!(raw, "confId");
                assert_eq!(target, "i32");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(truncating("1.5", ScalarKind::I64).is_err());
    }

    #[test]
    fn floats_round_to_precision() {
        assert_eq!(truncating("0.1", ScalarKind::F32), Ok(Scalar::F32(0.1)));
        assert_eq!(truncating("2.5e2", ScalarKind::F64), Ok(Scalar::F64(250.0)));
        assert!(truncating("two", ScalarKind::F64).is_err());
    }

    #[test]
    fn float_overflow_policy() {
        assert_eq!(truncating("1e40", ScalarKind::F32), Ok(Scalar::F32(f32::INFINITY)));
        assert!(coerce("1e40", ScalarKind::F32, OverflowPolicy::Reject).is_err());
        assert_eq!(
            coerce("-inf", ScalarKind::F64, OverflowPolicy::Reject),
            Ok(Scalar::F64(f64::NEG_INFINITY))
        );
    }

    #[test]
    fn default_policy_truncates() {
        assert_eq!(coerce_default("65537", ScalarKind::U16), Ok(Scalar::U16(1)));
    }

    #[test]
    fn bool_and_string() {
        assert_eq!(truncating("T", ScalarKind::Bool), Ok(Scalar::Bool(true)));
        assert!(truncating("yes", ScalarKind::Bool).is_err());
        assert_eq!(
            truncating("new_playerId", ScalarKind::String),
            Ok(Scalar::String("new_playerId".to_string()))
        );
    }
}
