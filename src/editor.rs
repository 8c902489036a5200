//! Editing the `<head>` metadata of an NZB
//!
//! Only the recognized metadata types (`category`, `password`, `tag`, `title`) can be
//! added or removed. Entries of any other type that came in with the document are
//! preserved untouched, including their position when sorting.
//!
//! # Example
//!
//! ```
//! use usenet_nzb::{MetaEditor, Nzb};
//!
//! let mut editor = MetaEditor::new(Nzb::default());
//! editor.append("Password", "hunter2");
//! editor.append("title", "Some Release");
//! editor.sort(None);
//!
//! let kinds: Vec<_> = editor.metadata().iter().map(|m| m.kind.as_str()).collect();
//! assert_eq!(kinds, ["title", "password"]);
//! ```

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::{Config, FileCollisionAction, SortPriority};
use crate::error::Result;
use crate::parser;
use crate::types::{Meta, MetaKind, Nzb};

/// Owns an NZB and edits its metadata in place
#[derive(Clone, Debug)]
pub struct MetaEditor {
    nzb: Nzb,
    config: Config,
}

impl MetaEditor {
    /// Edit `nzb` with the default configuration
    pub fn new(nzb: Nzb) -> Self {
        Self::with_config(nzb, Config::default())
    }

    /// Edit `nzb`, taking sort ranks and output settings from `config`
    pub fn with_config(nzb: Nzb, config: Config) -> Self {
        Self { nzb, config }
    }

    /// Load an NZB from disk for editing
    ///
    /// # Errors
    ///
    /// See [`parser::from_file`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_with_config(path, Config::default())
    }

    /// Like [`MetaEditor::from_file`], with explicit configuration
    ///
    /// # Errors
    ///
    /// See [`parser::from_file`].
    pub fn from_file_with_config(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        let nzb = parser::from_file_with_config(path, &config)?;
        Ok(Self::with_config(nzb, config))
    }

    /// Current metadata entries, in order
    pub fn metadata(&self) -> &[Meta] {
        &self.nzb.meta
    }

    /// The NZB being edited
    pub fn nzb(&self) -> &Nzb {
        &self.nzb
    }

    /// Give back the edited NZB
    pub fn into_nzb(self) -> Nzb {
        self.nzb
    }

    /// Append an entry of a recognized type (case-insensitive)
    ///
    /// The entry is stored under the canonical lowercase type name. Returns `false`
    /// and leaves the metadata unchanged if `key` is not a recognized type.
    pub fn append(&mut self, key: &str, value: impl Into<String>) -> bool {
        let Some(kind) = MetaKind::parse(key) else {
            warn!(key, "ignoring metadata of unrecognized type");
            return false;
        };
        self.nzb.meta.push(Meta::new(kind, value));
        true
    }

    /// Remove every entry of a recognized type (case-insensitive)
    ///
    /// Returns the number of entries removed; unrecognized keys remove nothing.
    pub fn remove(&mut self, key: &str) -> usize {
        let Some(kind) = MetaKind::parse(key) else {
            warn!(key, "not removing metadata of unrecognized type");
            return 0;
        };
        let before = self.nzb.meta.len();
        self.nzb.meta.retain(|m| m.recognized_kind() != Some(kind));
        before - self.nzb.meta.len()
    }

    /// Replace the value of every existing entry of a recognized type
    ///
    /// Returns the number of entries updated. Nothing is added when the type has
    /// no entries yet.
    pub fn set(&mut self, key: &str, value: &str) -> usize {
        let Some(kind) = MetaKind::parse(key) else {
            warn!(key, "not updating metadata of unrecognized type");
            return 0;
        };
        let mut updated = 0;
        for meta in self
            .nzb
            .meta
            .iter_mut()
            .filter(|m| m.recognized_kind() == Some(kind))
        {
            meta.value = value.to_string();
            updated += 1;
        }
        updated
    }

    /// Remove all metadata
    pub fn clear(&mut self) {
        self.nzb.meta.clear();
    }

    /// Stable sort of the metadata by type rank
    ///
    /// Ranks come from `priority`, or from the configured defaults when `None`
    /// (title, category, password, tag). Type names are matched ignoring case; if
    /// several keys match a type, the lowest rank applies.
    /// Entries whose type has no rank stay in their exact positions; ranked
    /// entries are reordered among the remaining positions, equal ranks keeping
    /// their relative order.
    pub fn sort(&mut self, priority: Option<&SortPriority>) {
        let priority = priority.unwrap_or(&self.config.editor.sort_priority);
        let rank_of = |kind: &str| {
            priority
                .iter()
                .filter(|(key, _)| key.eq_ignore_ascii_case(kind))
                .map(|(_, &rank)| rank)
                .min()
        };

        let slots: Vec<(usize, usize)> = self
            .nzb
            .meta
            .iter()
            .enumerate()
            .filter_map(|(slot, m)| rank_of(&m.kind).map(|rank| (slot, rank)))
            .collect();

        let mut ranked: Vec<(usize, Meta)> = slots
            .iter()
            .map(|&(slot, rank)| (rank, self.nzb.meta[slot].clone()))
            .collect();
        ranked.sort_by_key(|(rank, _)| *rank);

        for (&(slot, _), (_, meta)) in slots.iter().zip(ranked) {
            self.nzb.meta[slot] = meta;
        }
        debug!(
            entries = self.nzb.meta.len(),
            ranked = slots.len(),
            "sorted metadata"
        );
    }

    /// Encode the edited NZB as XML
    ///
    /// # Errors
    ///
    /// See [`parser::to_xml_string`].
    pub fn to_xml_string(&self) -> Result<String> {
        parser::to_xml_string_with_config(&self.nzb, &self.config)
    }

    /// Write the edited NZB to `path`
    ///
    /// Format and compression follow the file name as in [`parser::to_file`].
    /// Returns the path actually written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`](crate::Error::AlreadyExists) when `path`
    /// exists and `collision` is [`FileCollisionAction::Skip`], or an I/O error.
    pub fn to_file(&self, path: impl AsRef<Path>, collision: FileCollisionAction) -> Result<PathBuf> {
        parser::write_nzb(&self.nzb, path.as_ref(), collision, &self.config)
    }
}

impl From<Nzb> for MetaEditor {
    fn from(nzb: Nzb) -> Self {
        Self::new(nzb)
    }
}
