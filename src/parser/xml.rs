//! NZB XML reading and writing on top of the quick-xml event API

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::types::{File, Meta, Nzb, Segment};

/// Namespace of NZB 1.1 documents
pub const NZB_NAMESPACE: &str = "http://www.newzbin.com/DTD/2003/nzb";

/// DOCTYPE body written ahead of the root element
const NZB_DOCTYPE: &str =
    r#"nzb PUBLIC "-//newzBin//DTD NZB 1.1//EN" "http://www.newzbin.com/DTD/nzb/nzb-1.1.dtd""#;

/// Elements the decoder understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    Nzb,
    Head,
    Meta,
    File,
    Groups,
    Group,
    Segments,
    Segment,
    /// Anything else, including known names in unexpected places
    Other,
}

impl Element {
    /// Classify a tag given the element it is nested in
    fn classify(name: &[u8], parent: Option<Element>) -> Element {
        match (name, parent) {
            (b"nzb", None) => Element::Nzb,
            (b"head", Some(Element::Nzb)) => Element::Head,
            (b"meta", Some(Element::Head)) => Element::Meta,
            (b"file", Some(Element::Nzb)) => Element::File,
            (b"groups", Some(Element::File)) => Element::Groups,
            (b"group", Some(Element::Groups)) => Element::Group,
            (b"segments", Some(Element::File)) => Element::Segments,
            (b"segment", Some(Element::Segments)) => Element::Segment,
            _ => Element::Other,
        }
    }

    /// Whether text inside this element is data
    fn takes_text(self) -> bool {
        matches!(self, Element::Meta | Element::Group | Element::Segment)
    }
}

/// Accumulates records while walking the event stream
#[derive(Default)]
struct Decoder {
    nzb: Nzb,
    seen_root: bool,
    /// Open elements with their tag names, innermost last
    stack: Vec<(Element, String)>,
    file: Option<File>,
    meta_kind: String,
    segment: Option<(u32, u64)>,
    text: String,
}

impl Decoder {
    fn open(&mut self, start: &BytesStart<'_>) -> Result<()> {
        let name = start.local_name();
        let parent = self.stack.last().map(|(element, _)| *element);
        if parent.is_none() && name.as_ref() != b"nzb" {
            return Err(Error::InvalidNzb(format!(
                "expected <nzb> root element, found <{}>",
                String::from_utf8_lossy(name.as_ref())
            )));
        }

        let element = Element::classify(name.as_ref(), parent);
        match element {
            Element::Nzb => self.seen_root = true,
            Element::Meta => {
                self.meta_kind = attribute(start, "meta", "type")?.unwrap_or_default();
            }
            Element::File => {
                self.file = Some(File {
                    poster: attribute(start, "file", "poster")?.unwrap_or_default(),
                    date: required_number(start, "file", "date")?,
                    subject: attribute(start, "file", "subject")?.unwrap_or_default(),
                    groups: Vec::new(),
                    segments: Vec::new(),
                });
            }
            Element::Segment => {
                self.segment = Some((
                    required_number(start, "segment", "number")?,
                    required_number(start, "segment", "bytes")?,
                ));
            }
            _ => {}
        }

        if element.takes_text() {
            self.text.clear();
        }
        self.stack
            .push((element, String::from_utf8_lossy(name.as_ref()).into_owned()));
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if self.stack.last().is_some_and(|(e, _)| e.takes_text()) {
            self.text.push_str(text);
        }
    }

    fn close(&mut self) {
        let Some((element, _)) = self.stack.pop() else {
            return;
        };

        match element {
            Element::Meta => self.nzb.meta.push(Meta {
                kind: std::mem::take(&mut self.meta_kind),
                value: std::mem::take(&mut self.text),
            }),
            Element::Group => {
                let group = std::mem::take(&mut self.text);
                if let Some(file) = self.file.as_mut() {
                    file.groups.push(group);
                }
            }
            Element::Segment => {
                let id = std::mem::take(&mut self.text);
                if let (Some(file), Some((number, bytes))) = (self.file.as_mut(), self.segment.take())
                {
                    file.segments.push(Segment { number, bytes, id });
                }
            }
            Element::File => {
                if let Some(file) = self.file.take() {
                    self.nzb.files.push(file);
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> Result<Nzb> {
        if !self.seen_root {
            return Err(Error::InvalidNzb("missing <nzb> root element".to_string()));
        }
        if let Some((_, tag)) = self.stack.last() {
            return Err(Error::InvalidNzb(format!(
                "unexpected end of document: unclosed <{}>",
                tag
            )));
        }
        Ok(self.nzb)
    }
}

/// Look up an attribute by local name
fn attribute(start: &BytesStart<'_>, tag: &str, name: &str) -> Result<Option<String>> {
    for attr in start.attributes() {
        let attr = attr
            .map_err(|e| Error::InvalidNzb(format!("malformed attribute on <{}>: {}", tag, e)))?;
        if attr.key.local_name().as_ref() == name.as_bytes() {
            let value = attr.unescape_value().map_err(|e| {
                Error::InvalidNzb(format!("bad value for {}.{}: {}", tag, name, e))
            })?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// A numeric attribute that must be present
fn required_number<T>(start: &BytesStart<'_>, tag: &str, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = attribute(start, tag, name)?
        .ok_or_else(|| Error::InvalidNzb(format!("<{}> is missing the '{}' attribute", tag, name)))?;
    raw.trim().parse().map_err(|e| {
        Error::InvalidNzb(format!("invalid {}.{} value '{}': {}", tag, name, raw, e))
    })
}

/// Decode an NZB document from UTF-8 XML bytes
pub(crate) fn decode(bytes: &[u8]) -> Result<Nzb> {
    let mut reader = quick_xml::Reader::from_reader(bytes);

    let mut decoder = Decoder::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => decoder.open(&e)?,
            Ok(Event::Empty(e)) => {
                decoder.open(&e)?;
                decoder.close();
            }
            Ok(Event::End(_)) => decoder.close(),
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| Error::InvalidNzb(format!("bad text content: {}", err)))?;
                decoder.text(&text);
            }
            Ok(Event::CData(e)) => {
                let text = std::str::from_utf8(&e)
                    .map_err(|err| Error::InvalidNzb(format!("CDATA is not UTF-8: {}", err)))?;
                decoder.text(text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::InvalidNzb(format!(
                    "malformed XML at byte {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    decoder.finish()
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Xml(e.to_string()))
}

/// Encode an NZB document as XML; `indent` of 0 writes everything on one line
pub(crate) fn encode(nzb: &Nzb, indent: usize) -> Result<String> {
    let mut writer = if indent > 0 {
        Writer::new_with_indent(Vec::new(), b' ', indent)
    } else {
        Writer::new(Vec::new())
    };

    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    emit(&mut writer, Event::DocType(BytesText::from_escaped(NZB_DOCTYPE)))?;
    emit(
        &mut writer,
        Event::Start(BytesStart::new("nzb").with_attributes([("xmlns", NZB_NAMESPACE)])),
    )?;

    if !nzb.meta.is_empty() {
        emit(&mut writer, Event::Start(BytesStart::new("head")))?;
        for meta in &nzb.meta {
            emit(
                &mut writer,
                Event::Start(BytesStart::new("meta").with_attributes([("type", meta.kind.as_str())])),
            )?;
            emit(&mut writer, Event::Text(BytesText::new(&meta.value)))?;
            emit(&mut writer, Event::End(BytesEnd::new("meta")))?;
        }
        emit(&mut writer, Event::End(BytesEnd::new("head")))?;
    }

    for file in &nzb.files {
        write_file(&mut writer, file)?;
    }

    emit(&mut writer, Event::End(BytesEnd::new("nzb")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| Error::Xml(e.to_string()))
}

fn write_file(writer: &mut Writer<Vec<u8>>, file: &File) -> Result<()> {
    let date = file.date.to_string();
    emit(
        writer,
        Event::Start(BytesStart::new("file").with_attributes([
            ("poster", file.poster.as_str()),
            ("date", date.as_str()),
            ("subject", file.subject.as_str()),
        ])),
    )?;

    emit(writer, Event::Start(BytesStart::new("groups")))?;
    for group in &file.groups {
        emit(writer, Event::Start(BytesStart::new("group")))?;
        emit(writer, Event::Text(BytesText::new(group)))?;
        emit(writer, Event::End(BytesEnd::new("group")))?;
    }
    emit(writer, Event::End(BytesEnd::new("groups")))?;

    emit(writer, Event::Start(BytesStart::new("segments")))?;
    for segment in &file.segments {
        let bytes = segment.bytes.to_string();
        let number = segment.number.to_string();
        emit(
            writer,
            Event::Start(BytesStart::new("segment").with_attributes([
                ("bytes", bytes.as_str()),
                ("number", number.as_str()),
            ])),
        )?;
        emit(writer, Event::Text(BytesText::new(&segment.id)))?;
        emit(writer, Event::End(BytesEnd::new("segment")))?;
    }
    emit(writer, Event::End(BytesEnd::new("segments")))?;

    emit(writer, Event::End(BytesEnd::new("file")))
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE nzb PUBLIC "-//newzBin//DTD NZB 1.1//EN" "http://www.newzbin.com/DTD/nzb/nzb-1.1.dtd">
<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
  <head>
    <meta type="title">Test &amp; Download</meta>
    <meta type="x-custom">kept</meta>
  </head>
  <file poster="Joe &lt;joe@example.com&gt;" date="1234567890" subject="Here's your file!  abc-mr2a.r01 (1/2)">
    <groups>
      <group>alt.binaries.newzbin</group>
      <group>alt.binaries.mojo</group>
    </groups>
    <segments>
      <segment bytes="102394" number="1">123456789abcdef@news.newzbin.com</segment>
      <segment bytes="4501" number="2">987654321fedbca@news.newzbin.com</segment>
    </segments>
  </file>
</nzb>"#;

    #[test]
    fn test_decode_sample() {
        let nzb = decode(SAMPLE.as_bytes()).unwrap();
        assert_eq!(nzb.meta.len(), 2);
        assert_eq!(nzb.meta[0].kind, "title");
        assert_eq!(nzb.meta[0].value, "Test & Download");
        assert_eq!(nzb.meta[1].kind, "x-custom");

        assert_eq!(nzb.files.len(), 1);
        let file = &nzb.files[0];
        assert_eq!(file.poster, "Joe <joe@example.com>");
        assert_eq!(file.date, 1234567890);
        assert_eq!(file.subject, "Here's your file!  abc-mr2a.r01 (1/2)");
        assert_eq!(file.groups, vec!["alt.binaries.newzbin", "alt.binaries.mojo"]);
        assert_eq!(file.segments.len(), 2);
        assert_eq!(file.segments[1].number, 2);
        assert_eq!(file.segments[1].bytes, 4501);
        assert_eq!(file.segments[1].id, "987654321fedbca@news.newzbin.com");
    }

    #[test]
    fn test_decode_without_head() {
        let xml = r#"<nzb><file poster="p" date="1" subject="s"><groups/><segments/></file></nzb>"#;
        let nzb = decode(xml.as_bytes()).unwrap();
        assert!(nzb.meta.is_empty());
        assert_eq!(nzb.files.len(), 1);
        assert!(nzb.files[0].groups.is_empty());
        assert!(nzb.files[0].segments.is_empty());
    }

    #[test]
    fn test_decode_skips_unknown_elements() {
        let xml = r#"<nzb>
            <extra><file poster="ignored" date="x" subject="ignored"/></extra>
            <file date="5">
              <groups><group>a.b.c</group><note>skip</note></groups>
              <segments><segment bytes="10" number="1"><![CDATA[cdata-id@x]]></segment></segments>
            </file>
        </nzb>"#;
        let nzb = decode(xml.as_bytes()).unwrap();
        assert_eq!(nzb.files.len(), 1);
        let file = &nzb.files[0];
        assert_eq!(file.poster, "");
        assert_eq!(file.subject, "");
        assert_eq!(file.groups, vec!["a.b.c"]);
        assert_eq!(file.segments[0].id, "cdata-id@x");
    }

    #[test]
    fn test_decode_self_closing_meta() {
        let xml = r#"<nzb><head><meta type="tag"/></head></nzb>"#;
        let nzb = decode(xml.as_bytes()).unwrap();
        assert_eq!(nzb.meta, vec![Meta {
            kind: "tag".to_string(),
            value: String::new(),
        }]);
    }

    #[test]
    fn test_decode_rejects_wrong_root() {
        let err = decode(b"<rss><channel/></rss>").unwrap_err();
        assert!(err.is_decode_failure());
        assert!(err.to_string().contains("<rss>"));
    }

    #[test]
    fn test_decode_rejects_empty_input() {
        let err = decode(b"").unwrap_err();
        assert!(err.to_string().contains("missing <nzb> root"));
    }

    #[test]
    fn test_decode_rejects_mismatched_tags() {
        assert!(decode(b"<nzb><head></nzb>").is_err());
    }

    #[test]
    fn test_decode_rejects_truncated_document() {
        let xml = r#"<nzb><file date="1" subject="a.mkv"><segments><segment bytes="5" number="1">id1</segment></segments></file><file date="2" subject="b.mkv"><segments><segment bytes="7" number="1">id2</segment>"#;
        let err = decode(xml.as_bytes()).unwrap_err();
        assert!(err.is_decode_failure());
        assert!(err.to_string().contains("unclosed <segments>"));

        let err = decode(b"<nzb><head><meta type=\"title\">x</meta>").unwrap_err();
        assert!(err.to_string().contains("unclosed <head>"));

        let err = decode(b"<nzb>").unwrap_err();
        assert!(err.to_string().contains("unclosed <nzb>"));
    }

    #[test]
    fn test_round_trip_keeps_surrounding_whitespace() {
        let nzb = Nzb {
            meta: vec![Meta {
                kind: "title".to_string(),
                value: "  padded  ".to_string(),
            }],
            files: vec![File {
                poster: " p ".to_string(),
                date: 1,
                subject: "s".to_string(),
                groups: vec![" alt.binaries.x\t".to_string()],
                segments: vec![Segment {
                    number: 1,
                    bytes: 10,
                    id: " id@x ".to_string(),
                }],
            }],
        };
        for indent in [0, 2] {
            let xml = encode(&nzb, indent).unwrap();
            assert_eq!(decode(xml.as_bytes()).unwrap(), nzb, "indent {}", indent);
        }
    }

    #[test]
    fn test_indentation_does_not_leak_into_values() {
        let xml = "<nzb>\n  <head>\n    <meta type=\"tag\">hd</meta>\n  </head>\n  <file date=\"1\">\n    <groups>\n      <group>a.b</group>\n    </groups>\n  </file>\n</nzb>\n";
        let nzb = decode(xml.as_bytes()).unwrap();
        assert_eq!(nzb.meta[0].value, "hd");
        assert_eq!(nzb.files[0].groups, vec!["a.b"]);
    }

    #[test]
    fn test_decode_rejects_missing_or_bad_numbers() {
        let missing = r#"<nzb><file poster="p" subject="s"/></nzb>"#;
        let err = decode(missing.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("'date'"));

        let bad = r#"<nzb><file date="1"><segments><segment bytes="-1" number="1">x</segment></segments></file></nzb>"#;
        let err = decode(bad.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("segment.bytes"));
    }

    #[test]
    fn test_encode_then_decode_preserves_fields() {
        let nzb = decode(SAMPLE.as_bytes()).unwrap();
        let xml = encode(&nzb, 2).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<!DOCTYPE nzb PUBLIC"));
        assert!(xml.contains(r#"<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">"#));
        assert_eq!(decode(xml.as_bytes()).unwrap(), nzb);

        let compact = encode(&nzb, 0).unwrap();
        assert!(!compact.contains("\n  <head>"));
        assert_eq!(decode(compact.as_bytes()).unwrap(), nzb);
    }

    #[test]
    fn test_encode_omits_empty_head() {
        let xml = encode(&Nzb::default(), 2).unwrap();
        assert!(!xml.contains("<head>"));
        assert_eq!(decode(xml.as_bytes()).unwrap(), Nzb::default());
    }
}
