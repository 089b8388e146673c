//! Public operation surface: exists / add / update / remove / get_value.
//!
//! Config files are read as UTF-8. A file containing invalid UTF-8 surfaces
//! as a [`TransformError::FileAccess`] error; byte-oriented editing of such
//! files is not supported.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::TransformError;
use crate::patch::{self, Placement, DEFAULT_ANCHOR, DEFAULT_BUFFER};
use crate::persist;
use crate::registry::Registry;
use crate::scan::{self, ConfigKind};
use crate::value::format_value;

/// Options for [`ConfigTransformer::add`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddOptions {
    /// Emit the value verbatim instead of as a quoted literal.
    pub raw: bool,
    /// Placement anchor; must appear verbatim in the source.
    /// Defaults to [`DEFAULT_ANCHOR`].
    pub anchor: Option<String>,
    pub placement: Placement,
    /// Separator between the statement and the anchor.
    /// Defaults to [`DEFAULT_BUFFER`].
    pub buffer: Option<String>,
}

/// Options for [`ConfigTransformer::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOptions {
    pub raw: bool,
    /// Rewrite the whole statement in canonical form instead of splicing the
    /// value in place.
    pub normalize: bool,
    /// Fall back to `add` when the definition is missing. Defaults to true.
    pub add_if_missing: bool,
    /// Anchor/placement/buffer forwarded to `add` on fallback.
    pub anchor: Option<String>,
    pub placement: Placement,
    pub buffer: Option<String>,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            raw: false,
            normalize: false,
            add_if_missing: true,
            anchor: None,
            placement: Placement::default(),
            buffer: None,
        }
    }
}

/// One-call snapshot of the file: its text and the registry scanned from it.
struct Snapshot {
    text: String,
    registry: Registry,
}

/// Edits constant and variable definitions in a wp-config.php style file.
///
/// Every operation re-reads the file, re-scans it, and (for mutations) hands
/// the computed content to the persistence gate. No state survives across
/// calls, so edits made by other processes between calls are always observed.
/// There is still an inherent read-modify-write race with concurrent external
/// writers; only the write itself is serialized by the file lock.
///
/// # Example
///
/// ```no_run
/// use wp_config_patcher::{AddOptions, ConfigKind, ConfigTransformer};
///
/// let transformer = ConfigTransformer::new("/path/to/wp-config.php");
/// transformer.exists(ConfigKind::Constant, "WP_DEBUG")?;
/// transformer.update(ConfigKind::Constant, "WP_DEBUG", "true", &Default::default())?;
/// transformer.add(ConfigKind::Constant, "WP_CACHE", "true", &AddOptions { raw: true, ..Default::default() })?;
/// transformer.remove(ConfigKind::Constant, "WP_CACHE")?;
/// # Ok::<(), wp_config_patcher::TransformError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigTransformer {
    path: PathBuf,
}

impl ConfigTransformer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether an effective definition exists for (kind, name).
    pub fn exists(&self, kind: ConfigKind, name: &str) -> Result<bool, TransformError> {
        let snapshot = self.load()?;
        Ok(snapshot.registry.contains(kind, name))
    }

    /// The value text of the effective definition, as written in the source.
    pub fn get_value(&self, kind: ConfigKind, name: &str) -> Result<String, TransformError> {
        let snapshot = self.load()?;
        match snapshot.registry.lookup(kind, name) {
            Some(def) => Ok(def.value_text(&snapshot.text).to_string()),
            None => Err(TransformError::NotFound {
                kind,
                name: name.to_string(),
            }),
        }
    }

    /// Add a definition next to the placement anchor. Returns `false` when
    /// the definition already exists.
    pub fn add(
        &self,
        kind: ConfigKind,
        name: &str,
        value: &str,
        options: &AddOptions,
    ) -> Result<bool, TransformError> {
        let snapshot = self.load()?;
        self.add_to(&snapshot, kind, name, value, options)
    }

    /// Update an existing definition. Returns `false` when nothing changed,
    /// or when the definition is missing and `add_if_missing` is off.
    pub fn update(
        &self,
        kind: ConfigKind,
        name: &str,
        value: &str,
        options: &UpdateOptions,
    ) -> Result<bool, TransformError> {
        let snapshot = self.load()?;

        let def = match snapshot.registry.lookup(kind, name) {
            Some(def) => def.clone(),
            None => {
                if !options.add_if_missing {
                    return Ok(false);
                }
                let add_options = AddOptions {
                    raw: options.raw,
                    anchor: options.anchor.clone(),
                    placement: options.placement,
                    buffer: options.buffer.clone(),
                };
                return self.add_to(&snapshot, kind, name, value, &add_options);
            }
        };

        let rendered = format_value(value, options.raw)?;
        let computed = if options.normalize {
            let statement = patch::canonical_statement(kind, name, &rendered);
            patch::replace_statement(&snapshot.text, &def, &statement)
        } else {
            patch::splice_value(&snapshot.text, &def, &rendered)
        };

        persist::save(&self.path, &snapshot.text, &computed)
    }

    /// Remove a definition and its trailing line terminator. Returns `false`
    /// when the definition is absent.
    pub fn remove(&self, kind: ConfigKind, name: &str) -> Result<bool, TransformError> {
        let snapshot = self.load()?;
        let def = match snapshot.registry.lookup(kind, name) {
            Some(def) => def,
            None => return Ok(false),
        };
        let computed = patch::delete_statement(&snapshot.text, def);
        persist::save(&self.path, &snapshot.text, &computed)
    }

    fn add_to(
        &self,
        snapshot: &Snapshot,
        kind: ConfigKind,
        name: &str,
        value: &str,
        options: &AddOptions,
    ) -> Result<bool, TransformError> {
        if snapshot.registry.contains(kind, name) {
            return Ok(false);
        }

        let anchor = options.anchor.as_deref().unwrap_or(DEFAULT_ANCHOR);
        let buffer = options.buffer.as_deref().unwrap_or(DEFAULT_BUFFER);

        // Validate the anchor before formatting so a failed add never depends
        // on value rendering order.
        if !snapshot.text.contains(anchor) {
            return Err(TransformError::AnchorNotFound {
                anchor: anchor.to_string(),
            });
        }

        let rendered = format_value(value, options.raw)?;
        let statement = patch::canonical_statement(kind, name, &rendered);
        let computed =
            patch::insert_at_anchor(&snapshot.text, anchor, options.placement, buffer, &statement)?;

        persist::save(&self.path, &snapshot.text, &computed)
    }

    fn load(&self) -> Result<Snapshot, TransformError> {
        let text = fs::read_to_string(&self.path).map_err(|source| TransformError::FileAccess {
            path: self.path.clone(),
            source,
        })?;
        if text.trim().is_empty() {
            return Err(TransformError::EmptyFile {
                path: self.path.clone(),
            });
        }
        let registry = Registry::build(scan::scan(&text));
        Ok(Snapshot { text, registry })
    }
}
