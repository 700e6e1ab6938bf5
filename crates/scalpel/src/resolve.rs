//! Path resolution
//!
//! The single place that interprets a path segment against a node. Every
//! step also reports the [`MutationStrategy`] the rebuilder must use to get
//! a changed child back into that node.

use std::num::IntErrorKind;

use facet_reflect::Peek;

use crate::coerce::coerce;
use crate::config::SetOptions;
use crate::error::{ErrorKind, SetFieldError, SetFieldResult};
use crate::parse::{parse_integer, ParseError};
use crate::path::FieldPath;
use crate::reflect::{
    classify, field_names, key_kind, nth_field, read_scalar, reflect_failure, referent, unsupported,
    NodeKind, Ownership,
};
use crate::scalar::Scalar;
use crate::strategy::MutationStrategy;

/// How a child was selected from its parent
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Selector {
    /// Field position in declaration order
    Field(usize),
    Index(usize),
    Key(Scalar),
    /// Referent of a reference; the segment is not consumed
    Deref,
}

impl Selector {
    /// Whether the path advances past the segment
    #[inline]
    pub(crate) fn consumes_segment(&self) -> bool {
        !matches!(self, Self::Deref)
    }
}

/// One resolution step
pub(crate) struct Step<'mem> {
    pub(crate) selector: Selector,
    pub(crate) child: Peek<'mem, 'static>,
    /// How a changed `child` is put back into the node it came from
    pub(crate) strategy: MutationStrategy,
}

/// Resolve `segment` one level below `node` without unwrapping references
///
/// A reference yields its referent with [`Selector::Deref`]; the caller
/// reapplies the same segment to it.
pub(crate) fn step<'mem>(
    node: Peek<'mem, 'static>,
    segment: &str,
    options: &SetOptions,
) -> Result<Step<'mem>, ErrorKind> {
    let shape = node.shape();
    let kind = classify(shape);
    let strategy = MutationStrategy::for_node(kind, Ownership::of(shape));

    let (selector, child) = match kind {
        NodeKind::Struct => {
            let index = field_names(shape)
                .position(|name| name == segment)
                .ok_or_else(|| ErrorKind::FieldNotFound {
                    field: segment.to_string(),
                    type_name: shape.type_identifier,
                })?;
            (Selector::Field(index), nth_field(node, index)?)
        }
        NodeKind::Sequence => {
            let items = node.into_list().map_err(|e| reflect_failure(shape, &e))?;
            let len = items.len();
            let index = parse_index(segment, len)?;
            let child = items.get(index).ok_or(ErrorKind::IndexOutOfRange {
                index: index as i128,
                len,
            })?;
            (Selector::Index(index), child)
        }
        NodeKind::Map => {
            let key_kind = key_kind(shape).ok_or_else(|| unsupported(shape))?;
            let key = coerce(segment, key_kind, options.overflow)?;
            let child = entry(node, &key)?.ok_or_else(|| ErrorKind::KeyNotFound {
                key: segment.to_string(),
            })?;
            (Selector::Key(key), child)
        }
        NodeKind::Reference => {
            let child = referent(node)?.ok_or_else(|| ErrorKind::FieldNotFound {
                field: segment.to_string(),
                type_name: shape.type_identifier,
            })?;
            (Selector::Deref, child)
        }
        NodeKind::Leaf(_) | NodeKind::Opaque => return Err(unsupported(shape)),
    };

    Ok(Step {
        selector,
        child,
        strategy,
    })
}

/// Resolve `segment` below `node`, unwrapping any references first
pub(crate) fn resolve<'mem>(
    node: Peek<'mem, 'static>,
    segment: &str,
    options: &SetOptions,
) -> Result<Peek<'mem, 'static>, ErrorKind> {
    let mut current = node;
    loop {
        let next = step(current, segment, options)?;
        if next.selector.consumes_segment() {
            return Ok(next.child);
        }
        current = next.child;
    }
}

/// Follow `path` from `root` to the node it addresses
pub(crate) fn locate<'mem>(
    root: Peek<'mem, 'static>,
    path: &FieldPath,
    options: &SetOptions,
) -> SetFieldResult<Peek<'mem, 'static>> {
    let mut current = root;
    for (position, segment) in path.iter().enumerate() {
        let node_kind = classify(current.shape());
        current = resolve(current, segment, options)
            .map_err(|kind| SetFieldError::new(kind, path, position, node_kind))?;
    }
    Ok(current)
}

/// Value stored under `key` in the map `node`
pub(crate) fn entry<'mem>(
    node: Peek<'mem, 'static>,
    key: &Scalar,
) -> Result<Option<Peek<'mem, 'static>>, ErrorKind> {
    let shape = node.shape();
    let entries = node.into_map().map_err(|e| reflect_failure(shape, &e))?;
    for (candidate, value) in entries.iter() {
        if read_scalar(candidate)? == *key {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// Parse a sequence index; `""` is index 0
///
/// Any integer literal is an index, however large. Only the ones inside
/// `[0, len)` address an element.
fn parse_index(segment: &str, len: usize) -> Result<usize, ErrorKind> {
    let mismatch = |e: &dyn std::fmt::Display| ErrorKind::type_mismatch(segment, "sequence index", e);
    let wide = match parse_integer(segment) {
        Ok(wide) => wide,
        Err(ParseError::OutOfRange(_)) => segment.parse::<i128>().map_err(|e| mismatch(&e))?,
        Err(ParseError::Int(e)) => match e.kind() {
            IntErrorKind::PosOverflow => i128::MAX,
            IntErrorKind::NegOverflow => i128::MIN,
            _ => return Err(mismatch(&e)),
        },
        Err(e) => return Err(mismatch(&e)),
    };
    usize::try_from(wide)
        .ok()
        .filter(|&index| index < len)
        .ok_or(ErrorKind::IndexOutOfRange { index: wide, len })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::scalar_of;
    use std::collections::HashMap;
    use std::rc::Rc;
    use std::sync::Arc;

    fn options() -> SetOptions {
        SetOptions::default()
    }

    #[test]
    fn sequence_index_bounds() {
        let array = vec![1i32, 2, 3];
        let peek = Peek::new(&array);
        assert!(resolve(peek, "2", &options()).is_ok());
        assert_eq!(
            resolve(peek, "3", &options()).err(),
            Some(ErrorKind::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            resolve(peek, "-1", &options()).err(),
            Some(ErrorKind::IndexOutOfRange { index: -1, len: 3 })
        );
        assert!(matches!(
            resolve(peek, "good", &options()),
            Err(ErrorKind::TypeMismatch { .. })
        ));
    }

    #[test]
    fn huge_indices_are_out_of_range() {
        let array = vec![1u8, 2];
        let peek = Peek::new(&array);
        assert_eq!(
            resolve(peek, "99999999999999999999", &options()).err(),
            Some(ErrorKind::IndexOutOfRange {
                index: 99_999_999_999_999_999_999,
                len: 2,
            })
        );

        let beyond_i128 = "9".repeat(60);
        assert_eq!(
            resolve(peek, &beyond_i128, &options()).err(),
            Some(ErrorKind::IndexOutOfRange {
                index: i128::MAX,
                len: 2,
            })
        );
        let below_i128 = format!("-{beyond_i128}");
        assert_eq!(
            resolve(peek, &below_i128, &options()).err(),
            Some(ErrorKind::IndexOutOfRange {
                index: i128::MIN,
                len: 2,
            })
        );
    }

    #[test]
    fn empty_index_segment_is_zero() {
        let array = vec![10u8, 20];
        let child = resolve(Peek::new(&array), "", &options()).unwrap();
        assert_eq!(read_scalar(child), Ok(Scalar::U8(10)));
    }

    #[test]
    fn map_keys_use_key_kind() {
        let map: HashMap<i32, i32> = HashMap::from([(1, 100), (2, 200)]);
        let peek = Peek::new(&map);
        let child = resolve(peek, "2", &options()).unwrap();
        assert_eq!(read_scalar(child), Ok(Scalar::I32(200)));
        assert_eq!(
            resolve(peek, "3", &options()).err(),
            Some(ErrorKind::KeyNotFound { key: "3".to_string() })
        );
        assert!(matches!(
            resolve(peek, "two", &options()),
            Err(ErrorKind::TypeMismatch { .. })
        ));
    }

    #[test]
    fn references_reapply_segment() {
        let boxed = Some(Box::new(vec![5i64, 6]));
        let child = resolve(Peek::new(&boxed), "1", &options()).unwrap();
        assert_eq!(read_scalar(child), Ok(Scalar::I64(6)));

        let empty: Option<Vec<i64>> = None;
        assert!(matches!(
            resolve(Peek::new(&empty), "0", &options()),
            Err(ErrorKind::FieldNotFound { .. })
        ));
    }

    #[test]
    fn leaves_have_no_children() {
        let leaf = String::from("player_1");
        assert!(matches!(
            resolve(Peek::new(&leaf), "Category", &options()),
            Err(ErrorKind::UnsupportedKind {
                kind: NodeKind::Leaf(crate::scalar::ScalarKind::String),
                ..
            })
        ));
    }

    #[test]
    fn steps_report_strategy() {
        let map: HashMap<String, String> = HashMap::from([("frog".into(), "immortal".into())]);
        let next = step(Peek::new(&map), "frog", &options()).unwrap();
        assert_eq!(next.strategy, MutationStrategy::Rebuild);
        assert_eq!(next.selector, Selector::Key(Scalar::from("frog")));

        let array = vec![1u16];
        let next = step(Peek::new(&array), "0", &options()).unwrap();
        assert_eq!(next.strategy, MutationStrategy::InPlace);

        let boxed = Box::new(array.clone());
        let next = step(Peek::new(&boxed), "0", &options()).unwrap();
        assert_eq!(next.selector, Selector::Deref);
        assert_eq!(next.strategy, MutationStrategy::InPlace);
    }

    #[test]
    fn shared_pointer_steps_rebuild() {
        let shared = Rc::new(vec![1u32]);
        let _other = Rc::clone(&shared);
        let next = step(Peek::new(&shared), "0", &options()).unwrap();
        assert_eq!(next.selector, Selector::Deref);
        assert_eq!(next.strategy, MutationStrategy::Rebuild);

        let shared = Arc::new(7u8);
        let next = step(Peek::new(&shared), "", &options()).unwrap();
        assert_eq!(next.strategy, MutationStrategy::Rebuild);
        assert_eq!(scalar_of(&shared), Ok(Scalar::U8(7)));
    }

    #[test]
    fn locate_reports_position() {
        let nested = vec![vec![1i8], vec![2i8, 3]];
        let path = FieldPath::from(["1", "4"]);
        let err = locate(Peek::new(&nested), &path, &options()).err().unwrap();
        assert_eq!(err.position(), 1);
        assert_eq!(err.node_kind(), NodeKind::Sequence);
        assert!(err.is_index_out_of_range());
    }
}
