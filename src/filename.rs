//! Filename recovery from NZB subject lines
//!
//! Subjects rarely carry a clean filename. Recovery runs an ordered cascade of
//! matchers over the subject; the first matcher that yields a non-empty capture wins.
//! The recovered name can then be split into a stem and a (lowercase) extension.

use once_cell::sync::Lazy;
use regex::Regex;

/// Something that can pull a filename candidate out of a subject line
///
/// Implementations perform a single match; the returned slice is the raw capture
/// (untrimmed). `None` means the matcher does not apply to this subject.
pub trait FilenameMatcher: Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Attempt extraction on `subject`
    fn extract<'s>(&self, subject: &'s str) -> Option<&'s str>;
}

/// A matcher backed by a regex whose first capture group is the filename
pub struct PatternMatcher {
    name: &'static str,
    regex: Regex,
}

impl PatternMatcher {
    /// Compile a matcher
    ///
    /// # Errors
    ///
    /// Returns the regex error when `pattern` does not compile.
    pub fn new(name: &'static str, pattern: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            name,
            regex: Regex::new(pattern)?,
        })
    }
}

impl FilenameMatcher for PatternMatcher {
    fn name(&self) -> &'static str {
        self.name
    }

    fn extract<'s>(&self, subject: &'s str) -> Option<&'s str> {
        self.regex
            .captures(subject)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Everything between the first and the last double quote
const QUOTED_PATTERN: &str = r#""(.*)""#;

/// `[01/10] - name yEnc (1/20) 12345`, which must span the whole subject
const PART_COUNTER_PATTERN: &str =
    r"^[\[(]\d+/\d+[\])]\s-\s(.*)\syEnc\s[\[(]\d+/\d+[\])]\s\d+$";

/// Longest run of filename-safe characters ending in a short extension
const TOKEN_PATTERN: &str =
    r"\b([\w\-+()' .,]+(?:\[[\w\-/+()' .,]*\][\w\-+()' .,]*)*\.[A-Za-z0-9]{2,4})\b";

/// Extension-shaped suffix: a dot, one lowercase letter, then 2-5 word characters
const EXTENSION_PATTERN: &str = r"\.([a-z][A-Za-z0-9_]{2,5})$";

#[allow(clippy::expect_used)]
static DEFAULT_MATCHERS: Lazy<[PatternMatcher; 3]> = Lazy::new(|| {
    [
        PatternMatcher::new("quoted", QUOTED_PATTERN).expect("quoted pattern is valid"),
        PatternMatcher::new("part_counter", PART_COUNTER_PATTERN)
            .expect("part counter pattern is valid"),
        PatternMatcher::new("token", TOKEN_PATTERN).expect("token pattern is valid"),
    ]
});

#[allow(clippy::expect_used)]
static EXTENSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(EXTENSION_PATTERN).expect("extension pattern is valid"));

/// The built-in matcher cascade, most specific first
pub fn default_matchers() -> [&'static dyn FilenameMatcher; 3] {
    let [quoted, part_counter, token] = &*DEFAULT_MATCHERS;
    [quoted as &dyn FilenameMatcher, part_counter, token]
}

/// Recover a filename from a subject line using the built-in cascade
///
/// # Examples
///
/// ```
/// use usenet_nzb::filename::extract_filename;
///
/// assert_eq!(
///     extract_filename(r#"[1/5] - "Movie.2024.part1.rar" yEnc (1/100)"#).as_deref(),
///     Some("Movie.2024.part1.rar")
/// );
/// assert_eq!(extract_filename("no filename here"), None);
/// ```
#[must_use]
pub fn extract_filename(subject: &str) -> Option<String> {
    extract_filename_with(&default_matchers(), subject)
}

/// Recover a filename using a caller-supplied cascade
///
/// Matchers run in order and the first non-empty capture wins; later matchers are
/// not consulted. The winner is trimmed, and a winner that trims to nothing means
/// there is no filename.
#[must_use]
pub fn extract_filename_with(matchers: &[&dyn FilenameMatcher], subject: &str) -> Option<String> {
    let (matcher, capture) = matchers.iter().find_map(|matcher| {
        matcher
            .extract(subject)
            .filter(|capture| !capture.is_empty())
            .map(|capture| (matcher, capture))
    })?;

    let filename = capture.trim();
    if filename.is_empty() {
        tracing::trace!(matcher = matcher.name(), "blank capture, no filename");
        return None;
    }
    tracing::trace!(matcher = matcher.name(), filename, "filename recovered");
    Some(filename.to_string())
}

/// Split a filename into `(stem, extension)`
///
/// The extension is returned without its dot. Only lowercase-led extensions of 3-6
/// characters are recognized; anything else stays part of the stem.
///
/// # Examples
///
/// ```
/// use usenet_nzb::filename::split_filename;
///
/// assert_eq!(split_filename("Movie.2024.mkv"), ("Movie.2024", "mkv"));
/// assert_eq!(split_filename("archive.part01.rar"), ("archive.part01", "rar"));
/// assert_eq!(split_filename("README.TXT"), ("README.TXT", ""));
/// ```
#[must_use]
pub fn split_filename(filename: &str) -> (&str, &str) {
    match EXTENSION_RE.captures(filename) {
        Some(caps) => match (caps.get(0), caps.get(1)) {
            (Some(whole), Some(ext)) => (&filename[..whole.start()], ext.as_str()),
            _ => (filename, ""),
        },
        None => (filename, ""),
    }
}

/// Whether the filename recovered from `subject` has extension `ext`
///
/// Comparison ignores case and one leading dot on `ext`. A subject without a
/// recoverable extension has no extension at all, so this is `false` for every `ext`.
#[must_use]
pub fn subject_has_extension(subject: &str, ext: &str) -> bool {
    let Some(filename) = extract_filename(subject) else {
        return false;
    };
    let (_, extension) = split_filename(&filename);
    !extension.is_empty() && extension.eq_ignore_ascii_case(ext.strip_prefix('.').unwrap_or(ext))
}
