//! Configuration types for usenet-nzb
//!
//! Every field has a default, so `Config::default()` (or `{}` in JSON) is a working
//! configuration. Functions that take no config use the defaults.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::types::MetaKind;

/// Largest accepted XML indentation width
const MAX_INDENT: usize = 8;

/// Rank per metadata type for [`MetaEditor::sort`](crate::editor::MetaEditor::sort);
/// lower ranks sort first
pub type SortPriority = HashMap<String, usize>;

/// Main configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Decoding behavior
    #[serde(default)]
    pub decode: DecodeConfig,

    /// Encoding behavior
    #[serde(default)]
    pub encode: EncodeConfig,

    /// Writing NZBs to disk
    #[serde(default)]
    pub output: OutputConfig,

    /// Metadata editor defaults
    #[serde(default)]
    pub editor: EditorConfig,
}

impl Config {
    /// Check the configuration for values the library cannot honor
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if self.encode.indent > MAX_INDENT {
            return Err(Error::Config {
                message: format!(
                    "indent must be at most {}, got {}",
                    MAX_INDENT, self.encode.indent
                ),
                key: Some("encode.indent".to_string()),
            });
        }

        if let Some(key) = self
            .editor
            .sort_priority
            .keys()
            .find(|key| MetaKind::parse(key).is_none())
        {
            return Err(Error::Config {
                message: format!("unknown metadata type '{}' in sort priority", key),
                key: Some("editor.sort_priority".to_string()),
            });
        }

        let mut seen = HashSet::new();
        for key in self.editor.sort_priority.keys() {
            if !seen.insert(key.to_ascii_lowercase()) {
                return Err(Error::Config {
                    message: format!(
                        "metadata type '{}' appears more than once in sort priority",
                        key.to_ascii_lowercase()
                    ),
                    key: Some("editor.sort_priority".to_string()),
                });
            }
        }

        Ok(())
    }
}

/// Decoding configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// Detect gzip by its magic bytes, not just by a `.gz`/`.gzip` extension (default: true)
    #[serde(default = "default_true")]
    pub sniff_gzip: bool,

    /// Reject documents without any `<file>` (default: false)
    #[serde(default)]
    pub require_files: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            sniff_gzip: true,
            require_files: false,
        }
    }
}

/// Encoding configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeConfig {
    /// Pretty-print JSON output (default: true)
    #[serde(default = "default_true")]
    pub pretty_json: bool,

    /// Spaces per XML nesting level, 0 for a single line (default: 2)
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            pretty_json: true,
            indent: default_indent(),
        }
    }
}

/// Output configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// What to do when the destination already exists (default: skip)
    #[serde(default)]
    pub collision: FileCollisionAction,
}

/// Metadata editor configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Default sort ranks (default: title, category, password, tag)
    #[serde(default = "default_sort_priority")]
    pub sort_priority: SortPriority,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            sort_priority: default_sort_priority(),
        }
    }
}

/// File collision handling strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCollisionAction {
    /// Append (1), (2), etc. to filename
    Rename,
    /// Overwrite existing file
    Overwrite,
    /// Refuse to write, keep existing (default)
    #[default]
    Skip,
}

impl FileCollisionAction {
    /// Map an overwrite flag to a collision action
    pub fn from_overwrite(overwrite: bool) -> Self {
        if overwrite { Self::Overwrite } else { Self::Skip }
    }
}

fn default_true() -> bool {
    true
}

fn default_indent() -> usize {
    2
}

/// Default metadata sort ranks: title, category, password, tag
pub fn default_sort_priority() -> SortPriority {
    [
        MetaKind::Title,
        MetaKind::Category,
        MetaKind::Password,
        MetaKind::Tag,
    ]
    .into_iter()
    .enumerate()
    .map(|(rank, kind)| (kind.as_str().to_string(), rank))
    .collect()
}
