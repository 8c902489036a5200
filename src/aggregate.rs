//! Derived facts over a decoded NZB
//!
//! Everything here is recomputed from the current segments on each call. Sizes are
//! never cached on the records because segments may be appended after decoding.

use crate::error::{PreconditionError, Result};
use crate::filename::{extract_filename, split_filename};
use crate::types::{File, MetaKind, Nzb};

/// Subject marker identifying PAR2 repair files
const PAR2_MARKER: &str = ".par2";

impl File {
    /// Total size in bytes (sum of segment sizes)
    pub fn size(&self) -> u64 {
        self.segments.iter().map(|s| s.bytes).sum()
    }

    /// Whether this is a PAR2 repair file (subject contains `.par2`, case-sensitive)
    pub fn is_par2(&self) -> bool {
        self.subject.contains(PAR2_MARKER)
    }

    /// Filename recovered from the subject, if any
    pub fn filename(&self) -> Option<String> {
        extract_filename(&self.subject)
    }

    /// Recovered filename split into `(stem, extension)`
    ///
    /// Both parts are empty when no filename could be recovered.
    pub fn stem_and_extension(&self) -> (String, String) {
        let filename = self.filename().unwrap_or_default();
        let (stem, ext) = split_filename(&filename);
        (stem.to_string(), ext.to_string())
    }

    /// Whether the recovered filename has extension `ext` (case and dot insensitive)
    pub fn has_extension(&self, ext: &str) -> bool {
        crate::filename::subject_has_extension(&self.subject, ext)
    }
}

impl Nzb {
    /// Total size in bytes of every file
    pub fn size(&self) -> u64 {
        self.files.iter().map(File::size).sum()
    }

    /// Number of segments across all files
    pub fn segment_count(&self) -> usize {
        self.files.iter().map(|f| f.segments.len()).sum()
    }

    /// First file in document order
    pub fn first_file(&self) -> Option<&File> {
        self.files.first()
    }

    /// Distinct group names, in first-seen order
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for group in self.files.iter().flat_map(|f| f.groups.iter()) {
            if !groups.contains(&group.as_str()) {
                groups.push(group);
            }
        }
        groups
    }

    /// Distinct posters, in first-seen order
    pub fn posters(&self) -> Vec<&str> {
        let mut posters: Vec<&str> = Vec::new();
        for file in &self.files {
            if !posters.contains(&file.poster.as_str()) {
                posters.push(&file.poster);
            }
        }
        posters
    }

    /// Recovered filenames in file order; files without one are skipped, duplicates kept
    pub fn filenames(&self) -> Vec<String> {
        self.files.iter().filter_map(File::filename).collect()
    }

    /// First value of a recognized metadata kind
    pub fn meta_value(&self, kind: MetaKind) -> Option<&str> {
        self.meta
            .iter()
            .find(|m| m.recognized_kind() == Some(kind))
            .map(|m| m.value.as_str())
    }

    /// PAR2 repair files, in document order
    pub fn par2_files(&self) -> Vec<&File> {
        self.files.iter().filter(|f| f.is_par2()).collect()
    }

    /// Total size in bytes of the PAR2 repair files
    pub fn par2_size(&self) -> u64 {
        self.files.iter().filter(|f| f.is_par2()).map(File::size).sum()
    }

    /// Fraction of the total size taken by PAR2 files, in `0.0..=1.0`
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::EmptyNzb`] when the NZB has no bytes at all.
    pub fn par2_percentage(&self) -> Result<f64> {
        let total = self.size();
        if total == 0 {
            return Err(PreconditionError::EmptyNzb.into());
        }
        Ok(self.par2_size() as f64 / total as f64)
    }

    /// The main content file: the largest non-PAR2 file
    ///
    /// Ties go to the file that appears first.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::NoMainFile`] when the NZB has no files or only
    /// PAR2 files.
    pub fn main_file(&self) -> Result<&File> {
        let mut main: Option<(&File, u64)> = None;
        for file in self.files.iter().filter(|f| !f.is_par2()) {
            let size = file.size();
            if main.is_none_or(|(_, largest)| size > largest) {
                main = Some((file, size));
            }
        }

        main.map(|(file, _)| file).ok_or_else(|| {
            PreconditionError::NoMainFile {
                files: self.files.len(),
                par2_files: self.files.iter().filter(|f| f.is_par2()).count(),
            }
            .into()
        })
    }
}
