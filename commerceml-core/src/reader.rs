//! quick-xml adapter: drives a [`StreamParser`] from any `BufRead`.
//!
//! The engine itself is tokenizer-agnostic; this module is the one place
//! that knows about quick-xml. It forwards start/text/end events, expands
//! self-closing tags into a start/end pair, treats CDATA as text, and
//! ignores comments, processing instructions and the prolog. Character
//! decoding goes through the reader's decoder, so documents declaring
//! `encoding="windows-1251"` - still the norm for 1C exports - work
//! without any caller-side transcoding.

use std::io::BufRead;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event as XmlEvent};
use quick_xml::Reader;

use crate::error::Error;
use crate::parser::StreamParser;

/// Feed a whole XML document from a buffered reader into the parser.
///
/// Returns after the tokenizer reports end of input; truncated documents
/// (EOF inside an open element) are a structural error. Records are
/// delivered to the parser's listeners as their subtrees complete, so
/// memory stays bounded by the largest matched subtree.
pub fn parse_reader<R: BufRead>(src: R, parser: &mut StreamParser) -> Result<(), Error> {
    let mut reader = Reader::from_reader(src);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            XmlEvent::Start(e) => {
                let (name, attributes) = decode_start(&reader, &e)?;
                parser.start_element(&name, &attributes)?;
            }
            XmlEvent::Empty(e) => {
                let (name, attributes) = decode_start(&reader, &e)?;
                parser.start_element(&name, &attributes)?;
                parser.end_element(&name)?;
            }
            XmlEvent::Text(e) => {
                let raw = reader.decoder().decode(e.as_ref())?;
                let content = unescape(&raw)?;
                if !content.is_empty() {
                    parser.text(&content)?;
                }
            }
            XmlEvent::CData(e) => {
                let content = reader.decoder().decode(e.as_ref())?;
                parser.text(&content)?;
            }
            XmlEvent::End(e) => {
                let name = reader.decoder().decode(e.name().as_ref())?.into_owned();
                parser.end_element(&name)?;
            }
            XmlEvent::Eof => break,
            // prolog, comments, PIs, doctype
            _ => {}
        }
        buf.clear();
    }

    parser.finish()
}

/// Convenience wrapper over [`parse_reader`] for in-memory documents.
pub fn parse_str(input: &str, parser: &mut StreamParser) -> Result<(), Error> {
    parse_reader(input.as_bytes(), parser)
}

fn decode_start<R>(
    reader: &Reader<R>,
    e: &BytesStart<'_>,
) -> Result<(String, Vec<(String, String)>), Error> {
    let decoder = reader.decoder();
    let name = decoder.decode(e.name().as_ref())?.into_owned();

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = decoder.decode(attr.key.as_ref())?.into_owned();
        let raw = decoder.decode(attr.value.as_ref())?;
        let value = unescape(&raw)?.into_owned();
        attributes.push((key, value));
    }
    Ok((name, attributes))
}
