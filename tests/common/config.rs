//! Test configuration helpers

use usenet_nzb::{Config, FileCollisionAction};

/// Single-line XML and compact JSON
pub fn compact_config() -> Config {
    let mut config = Config::default();
    config.encode.indent = 0;
    config.encode.pretty_json = false;
    config
}

/// Strict decoding: gzip only by extension, at least one file required
pub fn strict_config() -> Config {
    let mut config = Config::default();
    config.decode.sniff_gzip = false;
    config.decode.require_files = true;
    config
}

/// Writes pick a fresh `name (N).ext` instead of refusing
pub fn renaming_config() -> Config {
    let mut config = Config::default();
    config.output.collision = FileCollisionAction::Rename;
    config
}
