//! Error types for field setting
//!
//! [`ErrorKind`] is the failure taxonomy shared by the resolver, the coercer
//! and both mutation strategies. [`SetFieldError`] attaches the location of
//! the failure: the full path, the failing segment, its position and the
//! structural kind of the node being traversed.

use crate::path::FieldPath;
use crate::reflect::NodeKind;
use crate::scalar::ScalarKind;

/// What went wrong while resolving or writing a leaf
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// The value sits behind a borrow and cannot be rebuilt
    #[error("value is not addressable (borrowed reference {type_name})")]
    NotAddressable { type_name: &'static str },

    /// Named field does not exist, or a reference points to nothing
    #[error("failed to find field `{field}` in {type_name}")]
    FieldNotFound {
        field: String,
        type_name: &'static str,
    },

    /// Sequence index outside `[0, len)`
    #[error("invalid index {index} for sequence with length {len}")]
    IndexOutOfRange { index: i128, len: usize },

    /// Map key absent
    #[error("failed to find key `{key}` in map")]
    KeyNotFound { key: String },

    /// Traversal or write through a kind that has no children
    #[error("unsupported kind {kind} ({type_name})")]
    UnsupportedKind {
        kind: NodeKind,
        type_name: &'static str,
    },

    /// Raw input cannot be coerced into the target
    #[error("cannot coerce {raw:?} into {target}: {reason}")]
    TypeMismatch {
        raw: String,
        target: String,
        reason: String,
    },

    /// Path has no segments
    #[error("path must contain at least one segment")]
    EmptyPath,

    /// Path exceeds the configured limit
    #[error("path has {len} segments, limit is {max}")]
    PathTooLong { len: usize, max: usize },

    /// facet refused a read or write on a shape
    #[error("reflection failed on {type_name}: {reason}")]
    Reflect {
        type_name: &'static str,
        reason: String,
    },
}

impl ErrorKind {
    /// Create type mismatch error
    pub fn type_mismatch(
        raw: impl Into<String>,
        target: impl ToString,
        reason: impl ToString,
    ) -> Self {
        Self::TypeMismatch {
            raw: raw.into(),
            target: target.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create type mismatch error for a scalar target
    pub fn scalar_mismatch(raw: impl Into<String>, target: ScalarKind, reason: impl ToString) -> Self {
        Self::type_mismatch(raw, target, reason)
    }
}

/// Located failure of a set, rebuild or read call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed at segment {position} (`{segment}`) of `{path}` on {node_kind}: {kind}")]
pub struct SetFieldError {
    kind: ErrorKind,
    path: FieldPath,
    segment: String,
    position: usize,
    node_kind: NodeKind,
}

impl SetFieldError {
    /// Create error located at `position` of `path`
    ///
    /// A position equal to the path length points past the last segment,
    /// which is where leaf writes fail; the last segment is reported.
    #[must_use]
    pub fn new(kind: ErrorKind, path: &FieldPath, position: usize, node_kind: NodeKind) -> Self {
        let segment = path
            .segments()
            .get(position)
            .or_else(|| path.segments().last())
            .cloned()
            .unwrap_or_default();
        Self {
            kind,
            path: path.clone(),
            segment,
            position: position.min(path.len().saturating_sub(1)),
            node_kind,
        }
    }

    /// Failure category
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Full path of the call
    #[inline]
    #[must_use]
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Segment being applied when the call failed
    #[inline]
    #[must_use]
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Zero-based position of the failing segment
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Structural kind of the node the segment was applied to
    #[inline]
    #[must_use]
    pub fn node_kind(&self) -> NodeKind {
        self.node_kind
    }

    /// Check for [`ErrorKind::NotAddressable`]
    #[inline]
    #[must_use]
    pub fn is_not_addressable(&self) -> bool {
        matches!(self.kind, ErrorKind::NotAddressable { .. })
    }

    /// Check for [`ErrorKind::FieldNotFound`]
    #[inline]
    #[must_use]
    pub fn is_field_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::FieldNotFound { .. })
    }

    /// Check for [`ErrorKind::IndexOutOfRange`]
    #[inline]
    #[must_use]
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self.kind, ErrorKind::IndexOutOfRange { .. })
    }

    /// Check for [`ErrorKind::KeyNotFound`]
    #[inline]
    #[must_use]
    pub fn is_key_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::KeyNotFound { .. })
    }

    /// Check for [`ErrorKind::UnsupportedKind`]
    #[inline]
    #[must_use]
    pub fn is_unsupported_kind(&self) -> bool {
        matches!(self.kind, ErrorKind::UnsupportedKind { .. })
    }

    /// Check for [`ErrorKind::TypeMismatch`]
    #[inline]
    #[must_use]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.kind, ErrorKind::TypeMismatch { .. })
    }
}

/// Result type alias for field operations
pub type SetFieldResult<T> = Result<T, SetFieldError>;
