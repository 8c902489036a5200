//! Obfuscated filename detection and handling
//!
//! Usenet releases often use obfuscated (random) filenames. This module classifies a
//! filename stem as meaningless or not, and picks the best available name for a
//! download from the job name, the NZB title and the main file.
//!
//! Classification is rule-based on the stem's literal text: a few hash/placeholder
//! patterns mark a stem obfuscated outright, then character-class counts look for
//! evidence of a human-written name. Without such evidence the stem is obfuscated.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::filename::split_filename;
use crate::types::{MetaKind, Nzb};

/// Highest uppercase/lowercase ratio still read as a capitalized word ("Gattaca")
const CAPITALIZED_WORD_MAX_RATIO: f64 = 0.25;

/// Compiled obfuscation patterns, built once on first use
struct ObfuscationPatterns {
    /// Bare 32-character hash
    md5_hash: Regex,
    /// Long run of hex and dots
    hex_and_dots: Regex,
    /// Hash fragment anywhere in the stem
    hex_run: Regex,
    /// `[tag]` groups of ASCII word characters
    bracket_tag: Regex,
    /// Placeholder prefix used by some posters
    placeholder: Regex,
}

#[allow(clippy::expect_used)]
static PATTERNS: Lazy<ObfuscationPatterns> = Lazy::new(|| ObfuscationPatterns {
    md5_hash: Regex::new(r"^[a-f0-9]{32}$").expect("md5 pattern is valid"),
    hex_and_dots: Regex::new(r"^[a-f0-9.]{40,}$").expect("hex/dots pattern is valid"),
    hex_run: Regex::new(r"[a-f0-9]{30}").expect("hex run pattern is valid"),
    bracket_tag: Regex::new(r"\[(?-u:\w)+\]").expect("bracket pattern is valid"),
    placeholder: Regex::new(r"^abc\.xyz").expect("placeholder pattern is valid"),
});

/// Character-class counts over a stem
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CharCounts {
    digits: usize,
    upper: usize,
    lower: usize,
    separators: usize,
}

impl CharCounts {
    fn scan(stem: &str) -> Self {
        let mut counts = Self::default();
        for c in stem.chars() {
            if c.is_numeric() {
                counts.digits += 1;
            }
            if c.is_uppercase() {
                counts.upper += 1;
            }
            if c.is_lowercase() {
                counts.lower += 1;
            }
            if matches!(c, ' ' | '.' | '_') {
                counts.separators += 1;
            }
        }
        counts
    }
}

/// Check if a filename stem appears to be obfuscated (random/meaningless)
///
/// Pass a stem, not a full filename; see [`split_filename`].
///
/// # Examples
///
/// ```
/// use usenet_nzb::deobfuscation::is_obfuscated;
///
/// assert!(is_obfuscated(""));
/// assert!(is_obfuscated("a3f8b2c9d1e5f7a4b6c8d0e2f4a6b8c0"));
/// assert!(!is_obfuscated("Great Pretender"));
/// assert!(!is_obfuscated("Spiderman.2021.1080p"));
/// assert!(!is_obfuscated("Gattaca"));
/// ```
#[must_use]
pub fn is_obfuscated(stem: &str) -> bool {
    if stem.is_empty() || matches_obfuscation_pattern(stem) {
        return true;
    }
    !looks_human(stem, CharCounts::scan(stem))
}

/// Hash-like and placeholder shapes that are obfuscated regardless of counts
fn matches_obfuscation_pattern(stem: &str) -> bool {
    let patterns = &*PATTERNS;

    if patterns.md5_hash.is_match(stem) || patterns.hex_and_dots.is_match(stem) {
        return true;
    }

    // Hash fragment plus several bracket tags, e.g. "[grp][1080p] 3f9c...e1"
    if patterns.hex_run.is_match(stem) && patterns.bracket_tag.find_iter(stem).nth(1).is_some() {
        return true;
    }

    patterns.placeholder.is_match(stem)
}

/// Signatures of a human-written name
fn looks_human(stem: &str, counts: CharCounts) -> bool {
    // "Great Pretender"
    if counts.upper >= 2 && counts.lower >= 2 && counts.separators >= 1 {
        return true;
    }

    // "this is a regular name"
    if counts.separators >= 3 {
        return true;
    }

    // "Spiderman 2021"
    if counts.upper + counts.lower >= 4 && counts.digits >= 4 && counts.separators >= 1 {
        return true;
    }

    // "Gattaca": capitalized, mostly lowercase
    let starts_upper = stem.chars().next().is_some_and(char::is_uppercase);
    starts_upper
        && counts.lower > 2
        && (counts.upper as f64 / counts.lower as f64) <= CAPITALIZED_WORD_MAX_RATIO
}

/// Determine the final name for a download using priority-based sources
///
/// Priority order:
/// 1. Job name (NZB filename without extension)
/// 2. NZB meta title (`<meta type="title">`)
/// 3. Stem of the filename recovered from the main (largest non-PAR2) file
/// 4. Fallback to job name even if obfuscated
///
/// # Examples
///
/// ```
/// use usenet_nzb::Nzb;
/// use usenet_nzb::deobfuscation::determine_final_name;
///
/// let nzb = Nzb::default();
/// let name = determine_final_name("Movie.Name.2024.1080p", &nzb);
/// assert_eq!(name, "Movie.Name.2024.1080p");
/// ```
pub fn determine_final_name(job_name: &str, nzb: &Nzb) -> String {
    // 1. Job name - if not obfuscated
    if !is_obfuscated(split_filename(job_name).0) {
        return job_name.to_string();
    }

    // 2. NZB meta title - if present and not obfuscated
    if let Some(title) = nzb.meta_value(MetaKind::Title)
        && !is_obfuscated(split_filename(title).0)
    {
        return title.to_string();
    }

    // 3. Main file's recovered name
    if let Ok(main) = nzb.main_file()
        && let Some(filename) = main.filename()
    {
        let (stem, _) = split_filename(&filename);
        if !is_obfuscated(stem) {
            return stem.to_string();
        }
    }

    tracing::debug!(job_name, "no readable name found, keeping obfuscated job name");
    job_name.to_string()
}
