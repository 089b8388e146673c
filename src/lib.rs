//! WP Config Patcher: source-preserving edits to wp-config.php
//!
//! Adds, updates, and removes `define('NAME', VALUE);` constants and
//! `$name = VALUE;` variable assignments in an existing config file without
//! disturbing any other byte: comments, whitespace, unrelated statements, and
//! line-ending style all survive untouched.
//!
//! # Architecture
//!
//! Statements are located by a hand-rolled byte-span scanner ([`scan`]), and
//! every mutation is a span splice against the original buffer rather than a
//! global find-and-replace, so identical literals elsewhere in the file are
//! never disturbed. The file on disk is the single source of truth: each
//! operation re-reads and re-scans it, and the persistence gate skips the
//! write entirely when the computed content is byte-equal to the original.
//!
//! # Safety
//!
//! - Byte-exact spans: untouched regions are guaranteed identical
//! - No-op detection: redundant edits never rewrite the file
//! - Exclusive advisory lock for the duration of the write
//! - Validation (anchor presence, raw-value emptiness) before any write
//!
//! # Example
//!
//! ```no_run
//! use wp_config_patcher::{ConfigKind, ConfigTransformer, UpdateOptions};
//!
//! let transformer = ConfigTransformer::new("/path/to/wp-config.php");
//!
//! if transformer.exists(ConfigKind::Constant, "WP_DEBUG")? {
//!     transformer.update(
//!         ConfigKind::Constant,
//!         "WP_DEBUG",
//!         "true",
//!         &UpdateOptions { raw: true, ..Default::default() },
//!     )?;
//! }
//! # Ok::<(), wp_config_patcher::TransformError>(())
//! ```

pub mod errors;
pub mod patch;
pub mod persist;
pub mod registry;
pub mod scan;
pub mod transformer;
pub mod value;

// Re-exports
pub use errors::TransformError;
pub use patch::{Placement, DEFAULT_ANCHOR, DEFAULT_BUFFER};
pub use registry::Registry;
pub use scan::{scan, ConfigKind, Definition, Span};
pub use transformer::{AddOptions, ConfigTransformer, UpdateOptions};
pub use value::{format_value, quote, unquote};
