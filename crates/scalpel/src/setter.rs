//! Field setter façade
//!
//! [`FieldSetter`] validates paths against its [`SetOptions`] and drives the
//! in-place mutator, the rebuilder or the read-back resolver. The free
//! functions use default options.

use facet_core::Facet;
use facet_reflect::Peek;

use crate::config::SetOptions;
use crate::error::{ErrorKind, SetFieldError, SetFieldResult};
use crate::mutate::set_in_place;
use crate::path::FieldPath;
use crate::rebuild::rebuild_root;
use crate::reflect::{classify, read_scalar};
use crate::resolve::locate;
use crate::scalar::Scalar;

/// Sets, rebuilds and reads single leaves by path
///
/// # Examples
/// ```
/// use scalpel::{FieldSetter, OverflowPolicy, SetOptions};
///
/// let setter = FieldSetter::new(SetOptions::new().with_overflow(OverflowPolicy::Reject));
/// let mut levels = vec![1u8, 2, 3];
///
/// setter.set(&mut levels, &["1"], "200").unwrap();
/// assert_eq!(levels, vec![1, 200, 3]);
///
/// assert!(setter.set(&mut levels, &["1"], "300").is_err());
/// assert_eq!(setter.get_string(&levels, &["1"]).unwrap(), "200");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSetter {
    options: SetOptions,
}

impl FieldSetter {
    /// Create setter with options
    #[inline]
    #[must_use]
    pub fn new(options: SetOptions) -> Self {
        Self { options }
    }

    /// Options in use
    #[inline]
    #[must_use]
    pub fn options(&self) -> &SetOptions {
        &self.options
    }

    /// Coerce `raw` into the leaf at `path` and write it into `root`
    ///
    /// # Errors
    /// Returns error if the path cannot be resolved or `raw` cannot be
    /// coerced; `root` is unchanged in that case
    pub fn set<T: Facet<'static>, S: AsRef<str>>(&self, root: &mut T, path: &[S], raw: &str) -> SetFieldResult<()> {
        self.set_path(root, &to_path(path), raw)
    }

    /// [`FieldSetter::set`] with a prepared [`FieldPath`]
    ///
    /// # Errors
    /// Returns error if the path cannot be resolved or `raw` cannot be
    /// coerced; `root` is unchanged in that case
    pub fn set_path<T: Facet<'static>>(&self, root: &mut T, path: &FieldPath, raw: &str) -> SetFieldResult<()> {
        self.validate::<T>(path, false)?;
        tracing::debug!("setting `{}` on {} to {:?}", path, T::SHAPE.type_identifier, raw);

        match set_in_place(root, path, raw, &self.options) {
            Ok(()) => {
                tracing::debug!("set `{}`", path);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("set of `{}` failed: {}", path, err);
                Err(err)
            }
        }
    }

    /// Copy of `root` with the leaf at `path` replaced; `root` is not touched
    ///
    /// # Errors
    /// Returns error if the path cannot be resolved or `raw` cannot be coerced
    pub fn rebuild<T: Facet<'static>, S: AsRef<str>>(&self, root: &T, path: &[S], raw: &str) -> SetFieldResult<T> {
        let path = to_path(path);
        self.validate::<T>(&path, false)?;
        tracing::debug!("rebuilding {} along `{}`", T::SHAPE.type_identifier, path);
        rebuild_root(root, &path, raw, &self.options)
    }

    /// Current value of the leaf at `path`
    ///
    /// An empty path reads `root` itself.
    ///
    /// # Errors
    /// Returns error if the path cannot be resolved or does not end on a leaf
    pub fn get<T: Facet<'static>, S: AsRef<str>>(&self, root: &T, path: &[S]) -> SetFieldResult<Scalar> {
        let path = to_path(path);
        self.validate::<T>(&path, true)?;
        let node = locate(Peek::new(root), &path, &self.options)?;
        read_scalar(node).map_err(|kind| SetFieldError::new(kind, &path, path.len(), classify(node.shape())))
    }

    /// Leaf at `path` rendered as text
    ///
    /// # Errors
    /// Returns error if the path cannot be resolved or does not end on a leaf
    pub fn get_string<T: Facet<'static>, S: AsRef<str>>(&self, root: &T, path: &[S]) -> SetFieldResult<String> {
        self.get(root, path).map(|scalar| scalar.to_string())
    }

    fn validate<T: Facet<'static>>(&self, path: &FieldPath, allow_empty: bool) -> SetFieldResult<()> {
        let kind = if path.is_empty() && !allow_empty {
            ErrorKind::EmptyPath
        } else if path.len() > self.options.max_path_len {
            ErrorKind::PathTooLong {
                len: path.len(),
                max: self.options.max_path_len,
            }
        } else {
            return Ok(());
        };
        Err(SetFieldError::new(kind, path, 0, classify(T::SHAPE)))
    }
}

fn to_path<S: AsRef<str>>(path: &[S]) -> FieldPath {
    FieldPath::new(path.iter().map(|s| s.as_ref().to_string()).collect())
}

/// Coerce `raw` into the leaf at `path` and write it into `root`
///
/// Shorthand for [`FieldSetter::set`] with default options.
///
/// # Errors
/// Returns error if the path cannot be resolved or `raw` cannot be coerced;
/// `root` is unchanged in that case
pub fn set_field<T: Facet<'static>, S: AsRef<str>>(root: &mut T, path: &[S], raw: &str) -> SetFieldResult<()> {
    FieldSetter::default().set(root, path, raw)
}

/// Current value of the leaf at `path`, with default options
///
/// # Errors
/// Returns error if the path cannot be resolved or does not end on a leaf
pub fn get_field<T: Facet<'static>, S: AsRef<str>>(root: &T, path: &[S]) -> SetFieldResult<Scalar> {
    FieldSetter::default().get(root, path)
}

/// Copy of `root` with the leaf at `path` replaced, with default options
///
/// # Errors
/// Returns error if the path cannot be resolved or `raw` cannot be coerced
pub fn rebuild_field<T: Facet<'static>, S: AsRef<str>>(root: &T, path: &[S], raw: &str) -> SetFieldResult<T> {
    FieldSetter::default().rebuild(root, path, raw)
}
