//! Decoding and encoding NZB documents
//!
//! NZBs are read from XML (the native format) or JSON, optionally gzip-compressed,
//! and always come back fully populated or not at all. Writing honors a
//! [`FileCollisionAction`] so an existing file is never replaced by accident.
//!
//! # Example
//!
//! ```no_run
//! use usenet_nzb::parser;
//!
//! # fn example() -> usenet_nzb::Result<()> {
//! let nzb = parser::from_file("release.nzb.gz")?;
//! println!("{} bytes in {} files", nzb.size(), nzb.files.len());
//!
//! let json = parser::to_json(&nzb)?;
//! # let _ = json;
//! # Ok(())
//! # }
//! ```

mod xml;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::{Config, FileCollisionAction};
use crate::error::{Error, Result};
use crate::types::Nzb;
use crate::utils::{get_unique_path, has_gzip_magic, is_gzip_path};

pub use xml::NZB_NAMESPACE;

/// Serialized forms an NZB can take on disk
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NzbFormat {
    /// NZB 1.1 XML
    Xml,
    /// JSON encoding of the same model
    Json,
}

impl NzbFormat {
    /// Pick the format from a file name, looking through a `.gz`/`.gzip` suffix
    ///
    /// `*.json` and `*.json.gz` are JSON; everything else is XML.
    pub fn from_path(path: &Path) -> Self {
        let inner = if is_gzip_path(path) {
            path.file_stem().map(Path::new)
        } else {
            path.file_name().map(Path::new)
        };
        let is_json = inner
            .and_then(|name| name.extension())
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json { Self::Json } else { Self::Xml }
    }
}

impl std::str::FromStr for Nzb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        from_str(s)
    }
}

/// Parse an NZB from an XML string
///
/// # Errors
///
/// Returns [`Error::InvalidNzb`] if the XML is malformed or is not an NZB.
pub fn from_str(content: &str) -> Result<Nzb> {
    decoded(xml::decode(content.as_bytes())?, &Config::default())
}

/// Parse an NZB from XML bytes, decompressing gzip input when detected
///
/// # Errors
///
/// Returns [`Error::InvalidNzb`] if decompression or decoding fails.
pub fn from_bytes(bytes: &[u8]) -> Result<Nzb> {
    from_bytes_with_config(bytes, &Config::default())
}

/// Like [`from_bytes`], with explicit configuration
///
/// # Errors
///
/// Returns [`Error::InvalidNzb`] if decompression or decoding fails.
pub fn from_bytes_with_config(bytes: &[u8], config: &Config) -> Result<Nzb> {
    if config.decode.sniff_gzip && has_gzip_magic(bytes) {
        let raw = gunzip(bytes)?;
        return decoded(xml::decode(&raw)?, config);
    }
    decoded(xml::decode(bytes)?, config)
}

/// Parse an NZB from its JSON encoding
///
/// # Errors
///
/// Returns [`Error::InvalidNzb`] if the JSON does not describe an NZB.
pub fn from_json(json: &str) -> Result<Nzb> {
    from_json_with_config(json, &Config::default())
}

/// Like [`from_json`], with explicit configuration
///
/// # Errors
///
/// Returns [`Error::InvalidNzb`] if the JSON does not describe an NZB.
pub fn from_json_with_config(json: &str, config: &Config) -> Result<Nzb> {
    let nzb = serde_json::from_str(json)
        .map_err(|e| Error::InvalidNzb(format!("invalid JSON: {}", e)))?;
    decoded(nzb, config)
}

/// Read an NZB from disk
///
/// Gzip is detected from the `.gz`/`.gzip` extension (and from the content's magic
/// bytes unless disabled); `*.json[.gz]` files are decoded as JSON.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::InvalidNzb`]
/// (mentioning the path) if its content is not a valid NZB.
pub fn from_file(path: impl AsRef<Path>) -> Result<Nzb> {
    from_file_with_config(path, &Config::default())
}

/// Like [`from_file`], with explicit configuration
///
/// # Errors
///
/// See [`from_file`].
pub fn from_file_with_config(path: impl AsRef<Path>, config: &Config) -> Result<Nzb> {
    let path = path.as_ref();
    let mut content = std::fs::read(path).map_err(|e| Error::io(path, e))?;

    let compressed =
        is_gzip_path(path) || (config.decode.sniff_gzip && has_gzip_magic(&content));
    if compressed {
        content = gunzip(&content).map_err(|e| with_path(path, e))?;
    }
    debug!(path = %path.display(), compressed, bytes = content.len(), "reading NZB");

    let result = match NzbFormat::from_path(path) {
        NzbFormat::Json => std::str::from_utf8(&content)
            .map_err(|e| Error::InvalidNzb(format!("JSON is not UTF-8: {}", e)))
            .and_then(|json| from_json_with_config(json, config)),
        NzbFormat::Xml => xml::decode(&content).and_then(|nzb| decoded(nzb, config)),
    };
    result.map_err(|e| with_path(path, e))
}

/// Encode an NZB as XML with the default indentation
///
/// # Errors
///
/// Returns [`Error::Xml`] if writing fails.
pub fn to_xml_string(nzb: &Nzb) -> Result<String> {
    to_xml_string_with_config(nzb, &Config::default())
}

/// Like [`to_xml_string`], with explicit configuration
///
/// # Errors
///
/// Returns [`Error::Xml`] if writing fails.
pub fn to_xml_string_with_config(nzb: &Nzb, config: &Config) -> Result<String> {
    xml::encode(nzb, config.encode.indent)
}

/// Encode an NZB as pretty-printed JSON
///
/// # Errors
///
/// Returns [`Error::Serialization`] if serialization fails.
pub fn to_json(nzb: &Nzb) -> Result<String> {
    to_json_with_config(nzb, &Config::default())
}

/// Like [`to_json`], with explicit configuration
///
/// # Errors
///
/// Returns [`Error::Serialization`] if serialization fails.
pub fn to_json_with_config(nzb: &Nzb, config: &Config) -> Result<String> {
    let json = if config.encode.pretty_json {
        serde_json::to_string_pretty(nzb)?
    } else {
        serde_json::to_string(nzb)?
    };
    Ok(json)
}

/// Write an NZB to disk, refusing to replace an existing file
///
/// Format and compression follow the destination name (see [`NzbFormat::from_path`]).
/// Returns the path actually written.
///
/// # Errors
///
/// Returns [`Error::AlreadyExists`] if `path` exists, [`Error::Io`] if writing fails.
pub fn to_file(nzb: &Nzb, path: impl AsRef<Path>) -> Result<PathBuf> {
    to_file_with_config(nzb, path, &Config::default())
}

/// Like [`to_file`], with the collision policy and encoding taken from `config`
///
/// # Errors
///
/// See [`to_file`].
pub fn to_file_with_config(nzb: &Nzb, path: impl AsRef<Path>, config: &Config) -> Result<PathBuf> {
    write_nzb(nzb, path.as_ref(), config.output.collision, config)
}

pub(crate) fn write_nzb(
    nzb: &Nzb,
    path: &Path,
    collision: FileCollisionAction,
    config: &Config,
) -> Result<PathBuf> {
    let target = get_unique_path(path, collision).inspect_err(|e| {
        if matches!(e, Error::AlreadyExists { .. }) {
            warn!(path = %path.display(), "destination exists and overwriting is disabled");
        }
    })?;

    let text = match NzbFormat::from_path(&target) {
        NzbFormat::Json => to_json_with_config(nzb, config)?,
        NzbFormat::Xml => to_xml_string_with_config(nzb, config)?,
    };

    let compressed = is_gzip_path(&target);
    let bytes = if compressed {
        gzip(text.as_bytes()).map_err(|e| Error::io(&target, e))?
    } else {
        text.into_bytes()
    };

    std::fs::write(&target, &bytes).map_err(|e| Error::io(&target, e))?;
    debug!(
        path = %target.display(),
        compressed,
        files = nzb.files.len(),
        bytes = bytes.len(),
        "wrote NZB"
    );
    Ok(target)
}

/// Post-decode checks shared by every input path
fn decoded(nzb: Nzb, config: &Config) -> Result<Nzb> {
    if config.decode.require_files && nzb.files.is_empty() {
        return Err(Error::InvalidNzb("document contains no files".to_string()));
    }
    debug!(
        files = nzb.files.len(),
        segments = nzb.segment_count(),
        meta = nzb.meta.len(),
        "decoded NZB"
    );
    Ok(nzb)
}

fn gunzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut out)
        .map_err(|e| Error::InvalidNzb(format!("gzip decompression failed: {}", e)))?;
    Ok(out)
}

fn gzip(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()
}

/// Prefix decode failures with the file they came from
fn with_path(path: &Path, err: Error) -> Error {
    match err {
        Error::InvalidNzb(reason) => Error::InvalidNzb(format!("{}: {}", path.display(), reason)),
        other => other,
    }
}
