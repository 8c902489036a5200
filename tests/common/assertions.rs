//! Custom test assertions and filesystem helpers

use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;
use std::path::{Path, PathBuf};
use usenet_nzb::{Nzb, parser};

/// Assert an NZB survives XML and JSON round trips unchanged
pub fn assert_round_trips(nzb: &Nzb) {
    let xml = parser::to_xml_string(nzb).expect("XML encoding failed");
    let from_xml = parser::from_str(&xml).expect("XML decoding failed");
    assert_eq!(&from_xml, nzb, "XML round trip changed the document:\n{}", xml);

    let json = parser::to_json(nzb).expect("JSON encoding failed");
    let from_json = parser::from_json(&json).expect("JSON decoding failed");
    assert_eq!(&from_json, nzb, "JSON round trip changed the document:\n{}", json);
}

/// Assert the metadata types appear in exactly this order
pub fn assert_meta_order(nzb: &Nzb, expected: &[&str]) {
    let kinds: Vec<&str> = nzb.meta.iter().map(|m| m.kind.as_str()).collect();
    assert_eq!(kinds, expected, "unexpected metadata order");
}

/// Write `content` to `dir/name` and return the path
pub fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("failed to write fixture");
    path
}

/// Write `content` gzip-compressed to `dir/name` and return the path
pub fn write_gzip_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(content.as_bytes())
        .expect("failed to compress fixture");
    let bytes = encoder.finish().expect("failed to finish gzip stream");

    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("failed to write fixture");
    path
}
