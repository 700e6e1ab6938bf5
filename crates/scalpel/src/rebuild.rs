//! Rebuilding
//!
//! Produces a copy of a value with one leaf replaced. The input is only
//! read through [`Peek`]; the copy is assembled frame by frame in a
//! [`facet_reflect::Partial`]. Every node on the path is emitted the way its
//! step's [`MutationStrategy`] says, and every node off the path is copied
//! structurally.

use facet_core::{Def, Facet, Shape};
use facet_reflect::{Partial, Peek, ReflectError};

use crate::coerce::coerce;
use crate::config::SetOptions;
use crate::error::{ErrorKind, SetFieldError, SetFieldResult};
use crate::path::FieldPath;
use crate::reflect::{
    classify, field_names, nth_field, read_scalar, reflect_failure, referent, unsupported,
    write_scalar, Builder, NodeKind, Ownership,
};
use crate::resolve::{step, Selector};
use crate::scalar::Scalar;
use crate::strategy::MutationStrategy;

/// Copy of `root` with the leaf at `path` set from `raw`
pub(crate) fn rebuild_root<T: Facet<'static>>(
    root: &T,
    path: &FieldPath,
    raw: &str,
    options: &SetOptions,
) -> SetFieldResult<T> {
    let node_kind = classify(T::SHAPE);
    let locate = |e: ReflectError| SetFieldError::new(reflect_failure(T::SHAPE, &e), path, 0, node_kind);

    let partial = Partial::alloc_owned::<T>().map_err(locate)?;
    let rebuild = Rebuild { path, raw, options };
    let partial = rebuild.emit(Peek::new(root), partial, 0)?;
    partial
        .build()
        .map_err(locate)?
        .materialize::<T>()
        .map_err(locate)
}

/// One rebuild of one path
struct Rebuild<'a> {
    path: &'a FieldPath,
    raw: &'a str,
    options: &'a SetOptions,
}

impl Rebuild<'_> {
    /// Emit `node`, which the segment at `position` applies to
    fn emit(&self, node: Peek<'_, 'static>, partial: Builder, position: usize) -> SetFieldResult<Builder> {
        let Some(segment) = self.path.segments().get(position) else {
            return self.emit_leaf(node, partial);
        };
        let shape = node.shape();
        let node_kind = classify(shape);
        let locate = |kind| SetFieldError::new(kind, self.path, position, node_kind);
        tracing::trace!("segment {} (`{}`) on {}", position, segment, node_kind);

        let next = step(node, segment, self.options).map_err(locate)?;
        match (next.strategy, next.selector) {
            (MutationStrategy::InPlace, Selector::Field(index)) => {
                self.descend_field(node, partial, index, next.child, position)
            }
            (MutationStrategy::InPlace, Selector::Index(index)) => {
                self.descend_element(node, partial, index, next.child, position)
            }
            (MutationStrategy::InPlace, Selector::Deref) => {
                self.descend_referent(shape, partial, next.child, position)
            }
            (MutationStrategy::Rebuild, Selector::Key(key)) => {
                self.replace_entry(node, partial, &key, next.child, position)
            }
            (MutationStrategy::Rebuild, Selector::Deref) => {
                self.replace_referent(shape, partial, next.child, position)
            }
            _ => Err(locate(unsupported(shape))),
        }
    }

    /// Struct: every field copied except the selected one, emitted in its slot
    fn descend_field(
        &self,
        node: Peek<'_, 'static>,
        mut partial: Builder,
        selected: usize,
        child: Peek<'_, 'static>,
        position: usize,
    ) -> SetFieldResult<Builder> {
        let shape = node.shape();
        let locate = |kind| SetFieldError::new(kind, self.path, position, NodeKind::Struct);
        let fail = |e: ReflectError| locate(reflect_failure(shape, &e));

        for index in 0..field_names(shape).count() {
            partial = partial.begin_nth_field(index).map_err(fail)?;
            partial = if index == selected {
                self.emit(child, partial, position + 1)?
            } else {
                copy(nth_field(node, index).map_err(locate)?, partial).map_err(locate)?
            };
            partial = partial.end().map_err(fail)?;
        }
        Ok(partial)
    }

    /// Sequence: every element copied except the selected one
    fn descend_element(
        &self,
        node: Peek<'_, 'static>,
        mut partial: Builder,
        selected: usize,
        child: Peek<'_, 'static>,
        position: usize,
    ) -> SetFieldResult<Builder> {
        let shape = node.shape();
        let locate = |kind| SetFieldError::new(kind, self.path, position, NodeKind::Sequence);
        let fail = |e: ReflectError| locate(reflect_failure(shape, &e));

        let items = node.into_list().map_err(fail)?;
        partial = partial.begin_list().map_err(fail)?;
        for (index, item) in items.iter().enumerate() {
            partial = partial.begin_list_item().map_err(fail)?;
            partial = if index == selected {
                self.emit(child, partial, position + 1)?
            } else {
                copy(item, partial).map_err(locate)?
            };
            partial = partial.end().map_err(fail)?;
        }
        Ok(partial)
    }

    /// Exclusively owned reference: the same segment continues below it
    fn descend_referent(
        &self,
        shape: &'static Shape,
        partial: Builder,
        child: Peek<'_, 'static>,
        position: usize,
    ) -> SetFieldResult<Builder> {
        let locate = |kind| SetFieldError::new(kind, self.path, position, NodeKind::Reference);
        let partial = open_referent(shape, partial).map_err(locate)?;
        let partial = self.emit(child, partial, position)?;
        partial.end().map_err(|e| locate(reflect_failure(shape, &e)))
    }

    /// Map: all entries re-inserted, the selected value rebuilt
    fn replace_entry(
        &self,
        node: Peek<'_, 'static>,
        mut partial: Builder,
        key: &Scalar,
        child: Peek<'_, 'static>,
        position: usize,
    ) -> SetFieldResult<Builder> {
        let shape = node.shape();
        let locate = |kind| SetFieldError::new(kind, self.path, position, NodeKind::Map);
        let fail = |e: ReflectError| locate(reflect_failure(shape, &e));
        tracing::debug!("rebuilding entry `{}` of {} in `{}`", key, shape.type_identifier, self.path);

        let entries = node.into_map().map_err(fail)?;
        partial = partial.begin_map().map_err(fail)?;
        for (candidate, value) in entries.iter() {
            let current = read_scalar(candidate).map_err(locate)?;
            let selected = current == *key;

            partial = partial.begin_key().map_err(fail)?;
            partial = write_scalar(partial, current).map_err(locate)?;
            partial = partial.end().map_err(fail)?;

            partial = partial.begin_value().map_err(fail)?;
            partial = if selected {
                self.emit(child, partial, position + 1)?
            } else {
                copy(value, partial).map_err(locate)?
            };
            partial = partial.end().map_err(fail)?;
        }
        Ok(partial)
    }

    /// Shared pointer: a fresh allocation replaces it, other owners keep the
    /// old referent
    fn replace_referent(
        &self,
        shape: &'static Shape,
        partial: Builder,
        child: Peek<'_, 'static>,
        position: usize,
    ) -> SetFieldResult<Builder> {
        let locate = |kind| SetFieldError::new(kind, self.path, position, NodeKind::Reference);
        tracing::debug!("rebuilding shared {} in `{}`", shape.type_identifier, self.path);

        let partial = partial
            .begin_smart_ptr()
            .map_err(|e| locate(reflect_failure(shape, &e)))?;
        let partial = self.emit(child, partial, position)?;
        partial.end().map_err(|e| locate(reflect_failure(shape, &e)))
    }

    /// Coerce `raw` into the leaf at the end of the path, re-wrapping any
    /// references around it
    fn emit_leaf(&self, node: Peek<'_, 'static>, partial: Builder) -> SetFieldResult<Builder> {
        let shape = node.shape();
        let node_kind = classify(shape);
        let locate = |kind| SetFieldError::new(kind, self.path, self.path.len(), node_kind);

        match node_kind {
            NodeKind::Leaf(kind) => {
                let value = coerce(self.raw, kind, self.options.overflow).map_err(locate)?;
                write_scalar(partial, value).map_err(locate)
            }
            NodeKind::Reference => {
                let inner = referent(node).map_err(locate)?.ok_or_else(|| {
                    locate(ErrorKind::FieldNotFound {
                        field: self.path.last().unwrap_or_default().to_string(),
                        type_name: shape.type_identifier,
                    })
                })?;
                let partial = open_referent(shape, partial).map_err(locate)?;
                let partial = self.emit_leaf(inner, partial)?;
                partial.end().map_err(|e| locate(reflect_failure(shape, &e)))
            }
            _ => Err(locate(unsupported(shape))),
        }
    }
}

/// Open the referent frame of an `Option` or owning pointer
fn open_referent(shape: &'static Shape, partial: Builder) -> Result<Builder, ErrorKind> {
    let opened = match (shape.def, Ownership::of(shape)) {
        (Def::Option(_), _) => partial.begin_some(),
        (_, Ownership::Borrowed) => {
            return Err(ErrorKind::NotAddressable {
                type_name: shape.type_identifier,
            })
        }
        _ => partial.begin_smart_ptr(),
    };
    opened.map_err(|e| reflect_failure(shape, &e))
}

/// Emit a structural copy of `node`
fn copy(node: Peek<'_, 'static>, mut partial: Builder) -> Result<Builder, ErrorKind> {
    let shape = node.shape();
    let fail = |e: ReflectError| reflect_failure(shape, &e);

    match classify(shape) {
        NodeKind::Leaf(_) => write_scalar(partial, read_scalar(node)?),
        NodeKind::Struct => {
            for index in 0..field_names(shape).count() {
                partial = partial.begin_nth_field(index).map_err(fail)?;
                partial = copy(nth_field(node, index)?, partial)?;
                partial = partial.end().map_err(fail)?;
            }
            Ok(partial)
        }
        NodeKind::Sequence => {
            let items = node.into_list().map_err(fail)?;
            partial = partial.begin_list().map_err(fail)?;
            for item in items.iter() {
                partial = partial.begin_list_item().map_err(fail)?;
                partial = copy(item, partial)?;
                partial = partial.end().map_err(fail)?;
            }
            Ok(partial)
        }
        NodeKind::Map => {
            let entries = node.into_map().map_err(fail)?;
            partial = partial.begin_map().map_err(fail)?;
            for (key, value) in entries.iter() {
                partial = partial.begin_key().map_err(fail)?;
                partial = copy(key, partial)?;
                partial = partial.end().map_err(fail)?;
                partial = partial.begin_value().map_err(fail)?;
                partial = copy(value, partial)?;
                partial = partial.end().map_err(fail)?;
            }
            Ok(partial)
        }
        NodeKind::Reference => match referent(node)? {
            Some(inner) => {
                partial = open_referent(shape, partial)?;
                partial = copy(inner, partial)?;
                partial.end().map_err(fail)
            }
            None if matches!(shape.def, Def::Option(_)) => partial.set_default().map_err(fail),
            None => Err(unsupported(shape)),
        },
        NodeKind::Opaque => Err(unsupported(shape)),
    }
}
