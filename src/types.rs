//! Core types for usenet-nzb
//!
//! Plain records mirroring the NZB structure. Derived facts (sizes, groups, main file)
//! live in [`crate::aggregate`]; nothing here caches computed values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A decoded NZB document
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nzb {
    /// Metadata entries from `<head>`, in document order
    #[serde(default)]
    pub meta: Vec<Meta>,

    /// File records, in document order
    #[serde(default)]
    pub files: Vec<File>,
}

/// One posted file: a subject line plus the segments that make it up
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// Poster identity (usually `Name <email>`)
    #[serde(default)]
    pub poster: String,

    /// Posting time, Unix epoch seconds (UTC)
    pub date: i64,

    /// Free-text subject line
    #[serde(default)]
    pub subject: String,

    /// Newsgroups the file was posted to
    #[serde(default)]
    pub groups: Vec<String>,

    /// Segments, in document order
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl File {
    /// Posting time as a UTC timestamp
    ///
    /// Returns `None` when the stored epoch is outside chrono's representable range.
    pub fn date_posted(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.date, 0)
    }
}

/// One posted article of a file
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Position of this segment within its file (1-based by convention)
    pub number: u32,

    /// Article size in bytes
    pub bytes: u64,

    /// Message-ID of the article
    pub id: String,
}

/// A `<meta type="...">value</meta>` entry
///
/// The raw type string is kept as read so unrecognized types survive a round trip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Metadata type as it appears in the document
    #[serde(rename = "type")]
    pub kind: String,

    /// Metadata value
    #[serde(default)]
    pub value: String,
}

impl Meta {
    /// Create a metadata entry of a recognized kind
    pub fn new(kind: MetaKind, value: impl Into<String>) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            value: value.into(),
        }
    }

    /// The recognized kind of this entry, if any
    pub fn recognized_kind(&self) -> Option<MetaKind> {
        MetaKind::parse(&self.kind)
    }
}

/// The metadata types the editor can produce
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaKind {
    /// `category`
    Category,
    /// `password`
    Password,
    /// `tag`
    Tag,
    /// `title`
    Title,
}

impl MetaKind {
    /// All recognized kinds
    pub const ALL: [MetaKind; 4] = [
        MetaKind::Category,
        MetaKind::Password,
        MetaKind::Tag,
        MetaKind::Title,
    ];

    /// Parse a metadata type, ignoring case
    ///
    /// Returns `None` for types outside the recognized vocabulary.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
    }

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            MetaKind::Category => "category",
            MetaKind::Password => "password",
            MetaKind::Tag => "tag",
            MetaKind::Title => "title",
        }
    }
}

impl std::fmt::Display for MetaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Nzb {
    /// Human-readable dump of the metadata and every file
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== META ===")?;
        for m in &self.meta {
            writeln!(f, "{}: {}", m.kind, m.value)?;
        }

        writeln!(f)?;
        writeln!(f, "=== FILES ===")?;
        for (i, file) in self.files.iter().enumerate() {
            writeln!(f, "File {}:", i + 1)?;
            writeln!(f, "\tPoster:\t{}", file.poster)?;
            match file.date_posted() {
                Some(date) => writeln!(f, "\tDate:\t{} ({})", file.date, date.to_rfc3339())?,
                None => writeln!(f, "\tDate:\t{}", file.date)?,
            }
            writeln!(f, "\tSubject:\t{}", file.subject)?;

            if !file.groups.is_empty() {
                writeln!(f, "\tGroups:")?;
                for g in &file.groups {
                    writeln!(f, "\t- {}", g)?;
                }
            }

            if !file.segments.is_empty() {
                writeln!(f, "\tSegments:")?;
                for s in &file.segments {
                    writeln!(f, "\t- Number: {}, Bytes: {}, ID: {}", s.number, s.bytes, s.id)?;
                }
            }
        }
        Ok(())
    }
}
