//! Scalar leaf values
//!
//! Provides [`ScalarKind`], the tag of every leaf type the setter can write,
//! and [`Scalar`], the typed value produced by coercion.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Kind of a terminal scalar leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    String,
}

impl ScalarKind {
    /// Zero value of this kind
    ///
    /// Used for empty raw input, which never fails to coerce.
    #[must_use]
    pub fn zero(self) -> Scalar {
        match self {
            Self::Bool => Scalar::Bool(false),
            Self::I8 => Scalar::I8(0),
            Self::I16 => Scalar::I16(0),
            Self::I32 => Scalar::I32(0),
            Self::I64 => Scalar::I64(0),
            Self::Isize => Scalar::Isize(0),
            Self::U8 => Scalar::U8(0),
            Self::U16 => Scalar::U16(0),
            Self::U32 => Scalar::U32(0),
            Self::U64 => Scalar::U64(0),
            Self::Usize => Scalar::Usize(0),
            Self::F32 => Scalar::F32(0.0),
            Self::F64 => Scalar::F64(0.0),
            Self::String => Scalar::String(String::new()),
        }
    }

    /// Check if kind is a signed or unsigned integer
    #[inline]
    #[must_use]
    pub fn is_integer(self) -> bool {
        !matches!(self, Self::Bool | Self::F32 | Self::F64 | Self::String)
    }

    /// Check if kind is a floating point number
    #[inline]
    #[must_use]
    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Type name as written in Rust source
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "string",
        }
    }
}

impl Display for ScalarKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Typed leaf value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Scalar {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    String(String),
}

impl Scalar {
    /// Kind tag of this value
    #[must_use]
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::I8(_) => ScalarKind::I8,
            Self::I16(_) => ScalarKind::I16,
            Self::I32(_) => ScalarKind::I32,
            Self::I64(_) => ScalarKind::I64,
            Self::Isize(_) => ScalarKind::Isize,
            Self::U8(_) => ScalarKind::U8,
            Self::U16(_) => ScalarKind::U16,
            Self::U32(_) => ScalarKind::U32,
            Self::U64(_) => ScalarKind::U64,
            Self::Usize(_) => ScalarKind::Usize,
            Self::F32(_) => ScalarKind::F32,
            Self::F64(_) => ScalarKind::F64,
            Self::String(_) => ScalarKind::String,
        }
    }

    /// Check if value is the zero value of its kind
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == self.kind().zero()
    }
}

/// Canonical text form: integers in base 10, floats in shortest round-trip
/// form, booleans as `true`/`false`, strings verbatim.
impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::Isize(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::Usize(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
        }
    }
}

/// Rust types that map one-to-one onto a [`ScalarKind`]
///
/// Implemented for every primitive leaf type. Leaves and map keys are read
/// and written through it.
pub trait ScalarValue: Clone + 'static {
    /// Kind tag of this type
    const KIND: ScalarKind;

    /// Convert to a [`Scalar`]
    fn to_scalar(&self) -> Scalar;

    /// Convert from a [`Scalar`] of the matching kind
    ///
    /// Returns `None` when the scalar holds a different kind.
    fn from_scalar(value: Scalar) -> Option<Self>;
}

macro_rules! impl_scalar_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl ScalarValue for $ty {
            const KIND: ScalarKind = ScalarKind::$variant;

            #[inline]
            fn to_scalar(&self) -> Scalar {
                Scalar::$variant(Clone::clone(self))
            }

            #[inline]
            fn from_scalar(value: Scalar) -> Option<Self> {
                match value {
                    Scalar::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Scalar {
            #[inline]
            fn from(value: $ty) -> Self {
                Scalar::$variant(value)
            }
        }
    )*};
}

impl_scalar_value! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => String,
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_matches_kind() {
        for kind in [ScalarKind::Bool, ScalarKind::U16, ScalarKind::F32, ScalarKind::String] {
            let zero = kind.zero();
            assert_eq!(zero.kind(), kind);
            assert!(zero.is_zero());
        }
    }

    #[test]
    fn kind_predicates() {
        assert!(ScalarKind::Isize.is_integer());
        assert!(!ScalarKind::F64.is_integer());
        assert!(ScalarKind::F32.is_float());
        assert!(!ScalarKind::String.is_float());
    }

    #[test]
    fn scalar_display() {
        assert_eq!(Scalar::I32(-7).to_string(), "-7");
        assert_eq!(Scalar::F64(2.5).to_string(), "2.5");
        assert_eq!(Scalar::Bool(true).to_string(), "true");
        assert_eq!(Scalar::from("frog").to_string(), "frog");
    }

    #[test]
    fn scalar_value_round_trip() {
        assert_eq!(i32::from_scalar(7i32.to_scalar()), Some(7));
        assert_eq!(i32::from_scalar(Scalar::I64(7)), None);
        assert_eq!(<String as ScalarValue>::KIND, ScalarKind::String);
    }

    #[test]
    fn scalar_serde_tagged() {
        let json = serde_json::to_value(Scalar::U8(3)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "u8", "value": 3}));
    }
}
