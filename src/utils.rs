//! Utility functions for file operations and path manipulation

use crate::config::FileCollisionAction;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Maximum number of rename attempts when resolving file collisions
const MAX_RENAME_ATTEMPTS: u32 = 9999;

/// Leading bytes of every gzip stream
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Get the path to write to, handling collisions according to the specified action
///
/// # Arguments
///
/// * `path` - The desired file path
/// * `action` - How to handle file collisions
///
/// # Returns
///
/// Returns the final path to use. For Rename action, this may have a suffix added.
/// For Skip action, returns [`Error::AlreadyExists`] if the file already exists.
/// For Overwrite action, returns the original path unchanged.
///
/// # Examples
///
/// ```
/// use usenet_nzb::utils::get_unique_path;
/// use usenet_nzb::config::FileCollisionAction;
/// use std::path::Path;
///
/// let path = Path::new("/tmp/release.nzb");
/// let unique = get_unique_path(path, FileCollisionAction::Rename).unwrap();
/// // If /tmp/release.nzb exists, returns /tmp/release (1).nzb
/// // If that exists too, returns /tmp/release (2).nzb, etc.
/// ```
pub fn get_unique_path(path: &Path, action: FileCollisionAction) -> Result<PathBuf> {
    match action {
        FileCollisionAction::Overwrite => Ok(path.to_path_buf()),
        FileCollisionAction::Skip => {
            if path.exists() {
                return Err(Error::AlreadyExists {
                    path: path.to_path_buf(),
                });
            }
            Ok(path.to_path_buf())
        }
        FileCollisionAction::Rename => {
            if !path.exists() {
                return Ok(path.to_path_buf());
            }

            let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(|| {
                Error::io(
                    path,
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        "cannot extract file stem",
                    ),
                )
            })?;
            let extension = path.extension().and_then(|e| e.to_str());
            let parent = path.parent().unwrap_or_else(|| Path::new(""));

            // Try adding (1), (2), (3), ... until we find a unique name
            for i in 1..=MAX_RENAME_ATTEMPTS {
                let new_name = match extension {
                    Some(ext) => format!("{} ({}).{}", stem, i, ext),
                    None => format!("{} ({})", stem, i),
                };
                let new_path = parent.join(new_name);
                if !new_path.exists() {
                    return Ok(new_path);
                }
            }

            Err(Error::AlreadyExists {
                path: path.to_path_buf(),
            })
        }
    }
}

/// Whether a path names a gzip-compressed file (`.gz` or `.gzip`, any case)
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use usenet_nzb::utils::is_gzip_path;
///
/// assert!(is_gzip_path(Path::new("release.nzb.gz")));
/// assert!(is_gzip_path(Path::new("release.NZB.GZIP")));
/// assert!(!is_gzip_path(Path::new("release.nzb")));
/// ```
#[must_use]
pub fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz") || ext.eq_ignore_ascii_case("gzip"))
}

/// Whether `bytes` start with the gzip magic number
#[must_use]
pub fn has_gzip_magic(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}
