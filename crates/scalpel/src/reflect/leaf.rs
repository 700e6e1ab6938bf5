//! Scalar leaves
//!
//! Leaves are recognised by shape identity against the [`ScalarValue`]
//! types, read with `Peek::get` and written with `Partial::set`.

use facet_core::{Facet, Shape};
use facet_reflect::Peek;

use super::{reflect_failure, referent, unsupported, Builder};
use crate::error::ErrorKind;
use crate::scalar::{Scalar, ScalarKind, ScalarValue};

/// Run `$body` with `$ty` bound to the Rust type of a scalar kind
macro_rules! with_leaf_type {
    ($kind:expr, $ty:ident => $body:expr) => {
        match $kind {
            ScalarKind::Bool => { type $ty = bool; $body }
            ScalarKind::I8 => { type $ty = i8; $body }
            ScalarKind::I16 => { type $ty = i16; $body }
            ScalarKind::I32 => { type $ty = i32; $body }
            ScalarKind::I64 => { type $ty = i64; $body }
            ScalarKind::Isize => { type $ty = isize; $body }
            ScalarKind::U8 => { type $ty = u8; $body }
            ScalarKind::U16 => { type $ty = u16; $body }
            ScalarKind::U32 => { type $ty = u32; $body }
            ScalarKind::U64 => { type $ty = u64; $body }
            ScalarKind::Usize => { type $ty = usize; $body }
            ScalarKind::F32 => { type $ty = f32; $body }
            ScalarKind::F64 => { type $ty = f64; $body }
            ScalarKind::String => { type $ty = String; $body }
        }
    };
}

const LEAF_KINDS: [ScalarKind; 14] = [
    ScalarKind::Bool,
    ScalarKind::I8,
    ScalarKind::I16,
    ScalarKind::I32,
    ScalarKind::I64,
    ScalarKind::Isize,
    ScalarKind::U8,
    ScalarKind::U16,
    ScalarKind::U32,
    ScalarKind::U64,
    ScalarKind::Usize,
    ScalarKind::F32,
    ScalarKind::F64,
    ScalarKind::String,
];

/// Scalar kind of a leaf shape
pub(crate) fn leaf_kind(shape: &'static Shape) -> Option<ScalarKind> {
    LEAF_KINDS
        .into_iter()
        .find(|&kind| with_leaf_type!(kind, T => shape.is_type::<T>()))
}

/// Current value of the leaf `node` holds, looking through references
pub(crate) fn read_scalar(node: Peek<'_, 'static>) -> Result<Scalar, ErrorKind> {
    let shape = node.shape();
    if let Some(kind) = leaf_kind(shape) {
        return with_leaf_type!(kind, T => read::<T>(node));
    }
    match referent(node)? {
        Some(inner) => read_scalar(inner),
        None => Err(unsupported(shape)),
    }
}

fn read<T: ScalarValue + Facet<'static>>(node: Peek<'_, 'static>) -> Result<Scalar, ErrorKind> {
    node.get::<T>()
        .map(ScalarValue::to_scalar)
        .map_err(|e| reflect_failure(node.shape(), &e))
}

/// Write `value` into the leaf frame `partial` is positioned on
pub(crate) fn write_scalar(partial: Builder, value: Scalar) -> Result<Builder, ErrorKind> {
    let shape = partial.shape();
    let kind = leaf_kind(shape).ok_or_else(|| unsupported(shape))?;
    with_leaf_type!(kind, T => write::<T>(partial, value))
}

fn write<T: ScalarValue + Facet<'static>>(partial: Builder, value: Scalar) -> Result<Builder, ErrorKind> {
    let shape = partial.shape();
    let target = T::KIND;
    let leaf = T::from_scalar(value.clone()).ok_or_else(|| {
        ErrorKind::scalar_mismatch(
            value.to_string(),
            target,
            format!("expected {target} value, got {}", value.kind()),
        )
    })?;
    partial.set(leaf).map_err(|e| reflect_failure(shape, &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_reflect::Partial;
    use std::sync::Arc;

    #[test]
    fn leaf_kinds_follow_shape_identity() {
        assert_eq!(leaf_kind(u16::SHAPE), Some(ScalarKind::U16));
        assert_eq!(leaf_kind(String::SHAPE), Some(ScalarKind::String));
        assert_eq!(leaf_kind(<Vec<u16>>::SHAPE), None);
        assert_eq!(leaf_kind(char::SHAPE), None);
    }

    #[test]
    fn reads_through_references() {
        assert_eq!(read_scalar(Peek::new(&-3i8)), Ok(Scalar::I8(-3)));
        assert_eq!(read_scalar(Peek::new(&Some(Arc::new(2.5f32)))), Ok(Scalar::F32(2.5)));

        let empty: Option<u8> = None;
        assert!(matches!(
            read_scalar(Peek::new(&empty)),
            Err(ErrorKind::UnsupportedKind { .. })
        ));
    }

    #[test]
    fn writes_into_leaf_frames() {
        let partial = Partial::alloc_owned::<u64>().unwrap();
        let built = write_scalar(partial, Scalar::U64(9)).unwrap().build().unwrap();
        assert_eq!(built.materialize::<u64>().unwrap(), 9);
    }

    #[test]
    fn mismatched_scalar_is_rejected() {
        let partial = Partial::alloc_owned::<u64>().unwrap();
        let err = write_scalar(partial, Scalar::Bool(true));
        assert!(matches!(err, Err(ErrorKind::TypeMismatch { .. })));
    }
}
