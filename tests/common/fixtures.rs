//! NZB fixtures and test content generators

/// Minimal valid NZB for testing (single segment)
pub const MINIMAL_NZB: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE nzb PUBLIC "-//newzBin//DTD NZB 1.1//EN" "http://www.newzbin.com/DTD/nzb/nzb-1.1.dtd">
<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
  <head>
    <meta type="title">Test Download</meta>
  </head>
  <file poster="test@example.com" date="1234567890" subject="test.txt (1/1)">
    <groups>
      <group>alt.test</group>
    </groups>
    <segments>
      <segment bytes="100" number="1">test-msgid-12345@example.com</segment>
    </segments>
  </file>
</nzb>"#;

/// NZB with multiple segments in one file
pub const MULTI_SEGMENT_NZB: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE nzb PUBLIC "-//newzBin//DTD NZB 1.1//EN" "http://www.newzbin.com/DTD/nzb/nzb-1.1.dtd">
<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
  <head>
    <meta type="title">Multi-Segment Test</meta>
  </head>
  <file poster="test@example.com" date="1234567890" subject="test.bin (1/3)">
    <groups>
      <group>alt.test</group>
    </groups>
    <segments>
      <segment bytes="1000" number="1">multi-part1@example.com</segment>
      <segment bytes="1000" number="2">multi-part2@example.com</segment>
      <segment bytes="500" number="3">multi-part3@example.com</segment>
    </segments>
  </file>
</nzb>"#;

/// NZB with password metadata and an unrecognized metadata type
pub const PASSWORD_NZB: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE nzb PUBLIC "-//newzBin//DTD NZB 1.1//EN" "http://www.newzbin.com/DTD/nzb/nzb-1.1.dtd">
<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
  <head>
    <meta type="tag">hd</meta>
    <meta type="x-indexer">example-indexer</meta>
    <meta type="password">secret123</meta>
    <meta type="title">Password Protected</meta>
  </head>
  <file poster="test@example.com" date="1234567890" subject="protected.rar (1/1)">
    <groups>
      <group>alt.test</group>
    </groups>
    <segments>
      <segment bytes="5000" number="1">protected-rar@example.com</segment>
    </segments>
  </file>
</nzb>"#;

/// Release with a content file and two PAR2 repair files
///
/// Content: 800000 bytes, repair: 50000 bytes.
pub const MULTI_FILE_NZB: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE nzb PUBLIC "-//newzBin//DTD NZB 1.1//EN" "http://www.newzbin.com/DTD/nzb/nzb-1.1.dtd">
<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
  <head>
    <meta type="title">Multi-File Test</meta>
    <meta type="category">TV</meta>
  </head>
  <file poster="uploader &lt;up@example.com&gt;" date="1700000000" subject="Show.S01E01 [1/3] - &quot;Show.S01E01.1080p.mkv&quot; yEnc (1/2)">
    <groups>
      <group>alt.binaries.test</group>
      <group>alt.binaries.misc</group>
    </groups>
    <segments>
      <segment bytes="500000" number="1">show-part1@example.com</segment>
      <segment bytes="300000" number="2">show-part2@example.com</segment>
    </segments>
  </file>
  <file poster="uploader &lt;up@example.com&gt;" date="1700000001" subject="Show.S01E01 [2/3] - &quot;Show.S01E01.1080p.par2&quot; yEnc (1/1)">
    <groups>
      <group>alt.binaries.test</group>
    </groups>
    <segments>
      <segment bytes="10000" number="1">show-par2@example.com</segment>
    </segments>
  </file>
  <file poster="other &lt;other@example.com&gt;" date="1700000002" subject="Show.S01E01 [3/3] - &quot;Show.S01E01.1080p.vol00+01.par2&quot; yEnc (1/1)">
    <groups>
      <group>alt.binaries.misc</group>
      <group>alt.binaries.extra</group>
    </groups>
    <segments>
      <segment bytes="40000" number="1">show-vol@example.com</segment>
    </segments>
  </file>
</nzb>"#;

/// Release whose content file name is a hash
pub const OBFUSCATED_NZB: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE nzb PUBLIC "-//newzBin//DTD NZB 1.1//EN" "http://www.newzbin.com/DTD/nzb/nzb-1.1.dtd">
<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
  <file poster="anon@example.com" date="1700000000" subject="[1/2] - &quot;a3f8b2c9d1e5f7a4b6c8d0e2f4a6b8c0.mkv&quot; yEnc (1/1)">
    <groups>
      <group>alt.binaries.test</group>
    </groups>
    <segments>
      <segment bytes="900000" number="1">obf-main@example.com</segment>
    </segments>
  </file>
  <file poster="anon@example.com" date="1700000000" subject="[2/2] - &quot;a3f8b2c9d1e5f7a4b6c8d0e2f4a6b8c0.par2&quot; yEnc (1/1)">
    <groups>
      <group>alt.binaries.test</group>
    </groups>
    <segments>
      <segment bytes="9000" number="1">obf-par2@example.com</segment>
    </segments>
  </file>
</nzb>"#;

/// Generate an NZB for a single file from `(message_id, size_bytes)` pairs
///
/// # Arguments
/// * `title` - Title for the NZB metadata
/// * `filename` - Subject filename
/// * `group` - Newsgroup name
/// * `segments` - List of (message_id, size_bytes) tuples
pub fn create_nzb_from_segments(
    title: &str,
    filename: &str,
    group: &str,
    segments: &[(String, u64)],
) -> String {
    let mut segments_xml = String::new();
    for (i, (message_id, size)) in segments.iter().enumerate() {
        segments_xml.push_str(&format!(
            "      <segment bytes=\"{}\" number=\"{}\">{}</segment>\n",
            size,
            i + 1,
            message_id
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE nzb PUBLIC "-//newzBin//DTD NZB 1.1//EN" "http://www.newzbin.com/DTD/nzb/nzb-1.1.dtd">
<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
  <head>
    <meta type="title">{}</meta>
  </head>
  <file poster="test@example.com" date="{}" subject="&quot;{}&quot; yEnc (1/{})">
    <groups>
      <group>{}</group>
    </groups>
    <segments>
{}    </segments>
  </file>
</nzb>"#,
        title,
        chrono::Utc::now().timestamp(),
        filename,
        segments.len(),
        group,
        segments_xml
    )
}
