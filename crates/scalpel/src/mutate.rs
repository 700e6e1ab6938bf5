//! In-place mutation
//!
//! Builds the replacement of a mutable root along the path, then commits it
//! with a single assignment. Nothing is written before the replacement is
//! complete, so on error the root is unchanged.

use facet_core::Facet;

use crate::config::SetOptions;
use crate::error::SetFieldResult;
use crate::path::FieldPath;
use crate::rebuild::rebuild_root;
use crate::reflect::classify;

/// Apply `raw` to the leaf at `path` below `root`
pub(crate) fn set_in_place<T: Facet<'static>>(
    root: &mut T,
    path: &FieldPath,
    raw: &str,
    options: &SetOptions,
) -> SetFieldResult<()> {
    tracing::trace!("writing `{}` below {}", path, classify(T::SHAPE));
    let next = rebuild_root(&*root, path, raw, options)?;
    *root = next;
    tracing::trace!("committed `{}` on {}", path, T::SHAPE.type_identifier);
    Ok(())
}
