//! Scalpel
//!
//! Typed single-leaf mutation over reflected Rust values.
//!
//! # Core Concepts
//!
//! - [`facet::Facet`]: Derived shape of a value; [`classify`] maps it to a
//!   [`NodeKind`] (struct, sequence, map, reference, leaf)
//! - [`FieldPath`]: Ordered segments addressing one leaf
//! - [`coerce`]: Raw string to typed [`Scalar`] conversion
//! - [`MutationStrategy`]: Descend in place, or rebuild maps and shared
//!   pointers
//! - [`FieldSetter`]: Entry point carrying [`SetOptions`]
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use facet::Facet;
//! use scalpel::{get_field, set_field, Scalar};
//!
//! #[derive(Debug, Clone, Default, Facet)]
//! struct Player {
//!     level: u32,
//!     scores: Vec<i64>,
//!     tags: HashMap<String, String>,
//! }
//!
//! let mut player = Player {
//!     scores: vec![10, 20],
//!     tags: HashMap::from([("guild".to_string(), "none".to_string())]),
//!     ..Player::default()
//! };
//!
//! set_field(&mut player, &["level"], "12").unwrap();
//! set_field(&mut player, &["scores", "1"], "25").unwrap();
//! set_field(&mut player, &["tags", "guild"], "owls").unwrap();
//!
//! assert_eq!(player.level, 12);
//! assert_eq!(player.scores, vec![10, 25]);
//! assert_eq!(get_field(&player, &["tags", "guild"]).unwrap(), Scalar::from("owls"));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod coerce;
mod config;
mod error;
mod mutate;
mod path;
mod rebuild;
mod resolve;
mod scalar;
mod setter;
mod strategy;

/// Primitive string parsers
pub mod parse;

/// Shape classification
pub mod reflect;

// Re-exports
pub use coerce::{coerce, coerce_default};
pub use config::{ConfigError, OverflowPolicy, SetOptions, DEFAULT_MAX_PATH_LEN};
pub use error::{ErrorKind, SetFieldError, SetFieldResult};
pub use path::{FieldPath, PathError};
pub use reflect::{classify, kind_of, render, scalar_of, NodeKind, Ownership};
pub use scalar::{Scalar, ScalarKind, ScalarValue};
pub use setter::{get_field, rebuild_field, set_field, FieldSetter};
pub use strategy::MutationStrategy;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
