//! Structural classification of facet shapes
//!
//! Every type deriving [`facet::Facet`] carries a static [`Shape`]. The
//! setter never inspects values directly: it classifies the shape into one
//! [`NodeKind`], reads through [`facet_reflect::Peek`], and writes by
//! building a replacement with [`facet_reflect::Partial`].
//!
//! | Kind | Shape |
//! |------|-------|
//! | named fields | `Type::User(UserType::Struct(_))` |
//! | indexed sequence | `Def::List` (`Vec`) |
//! | keyed container | `Def::Map` (`HashMap`, `BTreeMap`) |
//! | single reference | `Def::Option`, `Def::Pointer` (`Box`, `Arc`, `Rc`, `&T`) |
//! | leaf | primitives and `String` |

use std::fmt::{self, Display, Formatter};

use facet_core::{Def, Facet, KnownPointer, Shape, Type, UserType};
use facet_reflect::{Partial, Peek, ReflectError};
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;
use crate::scalar::{Scalar, ScalarKind};

mod leaf;

pub(crate) use leaf::{leaf_kind, read_scalar, write_scalar};

/// Work-in-progress value a rebuild writes into
pub(crate) type Builder = Partial<'static, false>;

/// Structural kind of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "scalar", rename_all = "snake_case")]
pub enum NodeKind {
    Struct,
    Sequence,
    Map,
    Reference,
    Leaf(ScalarKind),
    Opaque,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => f.write_str("struct"),
            Self::Sequence => f.write_str("sequence"),
            Self::Map => f.write_str("map"),
            Self::Reference => f.write_str("reference"),
            Self::Leaf(kind) => write!(f, "leaf {kind}"),
            Self::Opaque => f.write_str("opaque value"),
        }
    }
}

/// Classify a shape
#[must_use]
pub fn classify(shape: &'static Shape) -> NodeKind {
    match shape.def {
        Def::List(_) => NodeKind::Sequence,
        Def::Map(_) => NodeKind::Map,
        Def::Option(_) | Def::Pointer(_) => NodeKind::Reference,
        _ => {
            if let Some(kind) = leaf_kind(shape) {
                NodeKind::Leaf(kind)
            } else if let Type::User(UserType::Struct(_)) = &shape.ty {
                NodeKind::Struct
            } else {
                NodeKind::Opaque
            }
        }
    }
}

/// Kind of a value
#[inline]
#[must_use]
pub fn kind_of<T: Facet<'static>>(_value: &T) -> NodeKind {
    classify(T::SHAPE)
}

/// Who else may hold the referent of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ownership {
    /// Owned by its parent alone: fields, elements, `Option`, `Box`
    Exclusive,
    /// Reference-counted referent other owners may observe
    Shared,
    /// Borrowed referent; it cannot be rebuilt
    Borrowed,
}

impl Ownership {
    /// Ownership of the referent of a value of `shape`
    #[must_use]
    pub fn of(shape: &'static Shape) -> Self {
        match shape.def {
            Def::Pointer(pointer) => match pointer.known {
                Some(KnownPointer::Box) => Self::Exclusive,
                Some(KnownPointer::Arc | KnownPointer::Rc) => Self::Shared,
                _ => Self::Borrowed,
            },
            _ => Self::Exclusive,
        }
    }
}

/// Field names of a struct shape in declaration order, renames applied
pub(crate) fn field_names(shape: &'static Shape) -> impl Iterator<Item = &'static str> {
    let fields = match &shape.ty {
        Type::User(UserType::Struct(st)) => st.fields,
        _ => &[],
    };
    fields.iter().map(|field| field.rename.unwrap_or(field.name))
}

/// Field `index` of the struct `node`
pub(crate) fn nth_field<'mem>(
    node: Peek<'mem, 'static>,
    index: usize,
) -> Result<Peek<'mem, 'static>, ErrorKind> {
    let shape = node.shape();
    node.into_struct()
        .map_err(|e| reflect_failure(shape, &e))?
        .field(index)
        .map_err(|e| ErrorKind::Reflect {
            type_name: shape.type_identifier,
            reason: e.to_string(),
        })
}

/// Key kind of a map shape
pub(crate) fn key_kind(shape: &'static Shape) -> Option<ScalarKind> {
    match shape.def {
        Def::Map(map) => leaf_kind(map.k()),
        _ => None,
    }
}

/// Error for a reflection call the shape refused
pub(crate) fn reflect_failure(shape: &'static Shape, err: &ReflectError) -> ErrorKind {
    ErrorKind::Reflect {
        type_name: shape.type_identifier,
        reason: err.to_string(),
    }
}

/// Error for a node with no usable structure
pub(crate) fn unsupported(shape: &'static Shape) -> ErrorKind {
    ErrorKind::UnsupportedKind {
        kind: classify(shape),
        type_name: shape.type_identifier,
    }
}

/// Referent of an `Option` or pointer, `None` when it points to nothing
pub(crate) fn referent<'mem>(node: Peek<'mem, 'static>) -> Result<Option<Peek<'mem, 'static>>, ErrorKind> {
    let shape = node.shape();
    match shape.def {
        Def::Option(_) => node
            .into_option()
            .map(|option| option.value())
            .map_err(|e| reflect_failure(shape, &e)),
        Def::Pointer(_) => node
            .into_pointer()
            .map(|pointer| pointer.borrow_inner())
            .map_err(|e| reflect_failure(shape, &e)),
        _ => Err(unsupported(shape)),
    }
}

/// Current value of a leaf, looking through references
///
/// # Errors
/// Returns [`ErrorKind::UnsupportedKind`] if `value` is not a leaf or is an
/// empty reference
pub fn scalar_of<T: Facet<'static>>(value: &T) -> Result<Scalar, ErrorKind> {
    read_scalar(Peek::new(value))
}

/// Render a leaf as text
///
/// # Errors
/// Returns [`ErrorKind::UnsupportedKind`] if `value` is not a leaf
pub fn render<T: Facet<'static>>(value: &T) -> Result<String, ErrorKind> {
    scalar_of(value).map(|scalar| scalar.to_string())
}
