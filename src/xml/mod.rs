//! XML token stream and formatter used by the object model
//!
//! The object model only needs a small surface from XML: a stream of start
//! and end tokens carrying a name, attributes and namespace declarations, and
//! a formatter accepting attribute key/value pairs. Both are thin adapters
//! over quick-xml.

pub mod attributes;
mod fragment;

pub use fragment::XmlFragment;

use crate::diagnostics::{ErrorLog, SedErrorCode};
use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::name::{PrefixDeclaration, ResolveResult};
use quick_xml::{NsReader, Reader, Writer};
use std::collections::VecDeque;
use std::io::Write as IoWrite;

/// One attribute of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// Local name
    pub name: String,
    /// Prefix, empty when unprefixed
    pub prefix: String,
    /// Unescaped value
    pub value: String,
}

/// Ordered bag of attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlAttributes {
    attributes: Vec<XmlAttribute>,
}

impl XmlAttributes {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an unprefixed attribute
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.add_with_prefix(name, "", value);
    }

    /// Add or replace an attribute with a prefix
    pub fn add_with_prefix(
        &mut self,
        name: impl Into<String>,
        prefix: impl Into<String>,
        value: impl Into<String>,
    ) {
        let name = name.into();
        let prefix = prefix.into();
        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|a| a.name == name && a.prefix == prefix)
        {
            Some(existing) => existing.value = value,
            None => self.attributes.push(XmlAttribute {
                name,
                prefix,
                value,
            }),
        }
    }

    /// Value of the unprefixed attribute `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name && a.prefix.is_empty())
            .map(|a| a.value.as_str())
    }

    /// Whether the unprefixed attribute `name` is present
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove the unprefixed attribute `name`
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self
            .attributes
            .iter()
            .position(|a| a.name == name && a.prefix.is_empty())?;
        Some(self.attributes.remove(index).value)
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the bag is empty
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, XmlAttribute> {
        self.attributes.iter()
    }
}

/// Ordered namespace declarations, prefix to URI
///
/// The empty prefix denotes the default namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNamespaces {
    entries: Vec<(String, String)>,
}

impl XmlNamespaces {
    /// Create an empty set of declarations
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `uri` under `prefix`, replacing an earlier binding of `prefix`
    pub fn add(&mut self, uri: impl Into<String>, prefix: impl Into<String>) {
        let uri = uri.into();
        let prefix = prefix.into();
        match self.entries.iter_mut().find(|(p, _)| *p == prefix) {
            Some(entry) => entry.1 = uri,
            None => self.entries.push((prefix, uri)),
        }
    }

    /// URI bound to `prefix`
    pub fn uri(&self, prefix: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, u)| u.as_str())
    }

    /// First prefix bound to `uri`
    pub fn prefix(&self, uri: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, u)| u == uri)
            .map(|(p, _)| p.as_str())
    }

    /// Whether some prefix is bound to `uri`
    pub fn has_uri(&self, uri: &str) -> bool {
        self.prefix(uri).is_some()
    }

    /// Remove the binding of `prefix`
    pub fn remove(&mut self, prefix: &str) -> Option<String> {
        let index = self.entries.iter().position(|(p, _)| p == prefix)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is declared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(prefix, uri)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }
}

/// Kind of token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Element start; empty elements yield a start followed by an end
    Start,
    /// Element end
    End,
}

/// Namespace an element name resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementNamespace {
    /// No prefix and no default namespace in scope
    Unbound,
    /// Bound to the given URI
    Bound(String),
    /// The prefix is not declared in scope
    Undeclared(String),
}

/// One token of the element stream
#[derive(Debug, Clone, PartialEq)]
pub struct XmlToken {
    /// Start or end
    pub kind: TokenKind,
    /// Local name
    pub name: String,
    /// Prefix, empty when unprefixed
    pub prefix: String,
    /// Resolved namespace of the element
    pub namespace: ElementNamespace,
    /// Attributes other than namespace declarations
    pub attributes: XmlAttributes,
    /// Namespace declarations made on this element
    pub namespaces: XmlNamespaces,
    /// 1-based line of the tag
    pub line: u32,
    /// 1-based column of the tag
    pub column: u32,
    /// Byte offset of the tag's `<`
    pub offset: usize,
    /// Byte offset just past the tag's `>`
    pub end_offset: usize,
}

impl XmlToken {
    /// Whether this is a start token
    pub fn is_start(&self) -> bool {
        self.kind == TokenKind::Start
    }

    /// Whether this is an end token
    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }

    /// Whether this is the end token for `start`
    pub fn is_end_for(&self, start: &XmlToken) -> bool {
        self.is_end() && self.name == start.name && self.prefix == start.prefix
    }
}

/// Pull stream of element tokens over an in-memory document
///
/// Text, comments, processing instructions and the XML declaration are
/// skipped. Well-formedness failures are logged into the caller's log and
/// end the stream.
pub struct XmlInputStream<'a> {
    source: &'a str,
    reader: NsReader<&'a [u8]>,
    line_starts: Vec<usize>,
    pending: VecDeque<XmlToken>,
    depth: usize,
    good: bool,
    eof: bool,
}

impl<'a> XmlInputStream<'a> {
    /// Create a stream over `xml`
    pub fn from_str(xml: &'a str) -> Self {
        let mut reader = NsReader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut line_starts = vec![0];
        line_starts.extend(
            xml.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );

        Self {
            source: xml,
            reader,
            line_starts,
            pending: VecDeque::new(),
            depth: 0,
            good: true,
            eof: false,
        }
    }

    /// Whether no fatal error has been met so far
    pub fn is_good(&self) -> bool {
        self.good
    }

    /// Whether the stream is exhausted or stopped
    pub fn is_done(&mut self, log: &mut ErrorLog) -> bool {
        self.peek(log).is_none()
    }

    /// Next token without consuming it
    pub fn peek(&mut self, log: &mut ErrorLog) -> Option<&XmlToken> {
        self.fill(log);
        self.pending.front()
    }

    /// Consume and return the next token
    pub fn next(&mut self, log: &mut ErrorLog) -> Option<XmlToken> {
        self.fill(log);
        self.pending.pop_front()
    }

    /// Consume tokens up to and including the end token matching `start`
    pub fn skip_past_end(&mut self, start: &XmlToken, log: &mut ErrorLog) {
        let mut depth = 0usize;
        while let Some(token) = self.next(log) {
            match token.kind {
                TokenKind::Start => depth += 1,
                TokenKind::End if depth == 0 => {
                    if token.is_end_for(start) {
                        return;
                    }
                }
                TokenKind::End => depth -= 1,
            }
        }
    }

    /// Consume the element opened by `start` and keep it as a fragment
    ///
    /// Returns `None` when the stream stops before the element is closed.
    pub fn capture(&mut self, start: &XmlToken, log: &mut ErrorLog) -> Option<XmlFragment> {
        let mut depth = 0usize;
        let end = loop {
            let token = self.next(log)?;
            match token.kind {
                TokenKind::Start => depth += 1,
                TokenKind::End if depth == 0 => break token.end_offset,
                TokenKind::End => depth -= 1,
            }
        };
        let raw = self.source.get(start.offset..end)?;
        XmlFragment::parse(raw)
    }

    fn position(&self, offset: usize) -> (u32, u32) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let column = offset - self.line_starts[line] + 1;
        (line as u32 + 1, column as u32)
    }

    fn fill(&mut self, log: &mut ErrorLog) {
        while self.pending.is_empty() && self.good && !self.eof {
            let (namespace, event) = match self.reader.read_resolved_event() {
                Ok((resolved, event)) => (element_namespace(resolved), event),
                Err(e) => {
                    let (line, column) = self.position(self.reader.error_position() as usize);
                    log.log_error(
                        SedErrorCode::BadlyFormedXml,
                        format!("XML parsing error: {}", e),
                        line,
                        column,
                    );
                    self.good = false;
                    return;
                }
            };

            match event {
                Event::Start(e) => {
                    let offset = self.tag_offset(e.len() + 2);
                    let token = self.start_token(&e, namespace, offset, log);
                    self.depth += 1;
                    self.pending.push_back(token);
                }
                Event::Empty(e) => {
                    let offset = self.tag_offset(e.len() + 3);
                    let token = self.start_token(&e, namespace, offset, log);
                    let mut end = token.clone();
                    end.kind = TokenKind::End;
                    end.attributes = XmlAttributes::new();
                    end.namespaces = XmlNamespaces::new();
                    self.pending.push_back(token);
                    self.pending.push_back(end);
                }
                Event::End(e) => {
                    let offset = self.tag_offset(e.len() + 3);
                    let (line, column) = self.position(offset);
                    let (name, prefix) = split_name(e.name().as_ref());
                    self.depth = self.depth.saturating_sub(1);
                    self.pending.push_back(XmlToken {
                        kind: TokenKind::End,
                        name,
                        prefix,
                        namespace,
                        attributes: XmlAttributes::new(),
                        namespaces: XmlNamespaces::new(),
                        line,
                        column,
                        offset,
                        end_offset: self.reader.buffer_position() as usize,
                    });
                }
                Event::DocType(_) => {
                    let (line, column) = self.position(self.reader.buffer_position() as usize);
                    log.log_error(
                        SedErrorCode::BadXmlDoctype,
                        "DOCTYPE declarations are not allowed in SED-ML documents",
                        line,
                        column,
                    );
                    self.good = false;
                }
                Event::Eof => {
                    if self.depth > 0 {
                        let (line, column) =
                            self.position(self.reader.buffer_position() as usize);
                        log.log_error(
                            SedErrorCode::XmlUnexpectedEof,
                            format!("{} element(s) left open at end of input", self.depth),
                            line,
                            column,
                        );
                        self.good = false;
                    }
                    self.eof = true;
                }
                _ => {}
            }
        }
    }

    fn tag_offset(&self, tag_len: usize) -> usize {
        (self.reader.buffer_position() as usize).saturating_sub(tag_len)
    }

    fn start_token(
        &self,
        e: &BytesStart<'_>,
        namespace: ElementNamespace,
        offset: usize,
        log: &mut ErrorLog,
    ) -> XmlToken {
        let (line, column) = self.position(offset);
        let (name, prefix) = split_name(e.name().as_ref());

        let mut attributes = XmlAttributes::new();
        let mut namespaces = XmlNamespaces::new();
        for attr in e.attributes() {
            let attr = match attr {
                Ok(a) => a,
                Err(quick_xml::events::attributes::AttrError::Duplicated(_, _)) => {
                    log.log_error(
                        SedErrorCode::DuplicateXmlAttribute,
                        format!("Duplicate attribute on element <{}>", name),
                        line,
                        column,
                    );
                    continue;
                }
                Err(err) => {
                    log.log_error(
                        SedErrorCode::BadlyFormedXml,
                        format!("Malformed attribute on element <{}>: {}", name, err),
                        line,
                        column,
                    );
                    continue;
                }
            };
            let value = match attr.unescape_value() {
                Ok(v) => v.into_owned(),
                Err(err) => {
                    log.log_error(
                        SedErrorCode::BadlyFormedXml,
                        format!("Malformed attribute value on element <{}>: {}", name, err),
                        line,
                        column,
                    );
                    continue;
                }
            };
            match attr.key.as_namespace_binding() {
                Some(PrefixDeclaration::Default) => namespaces.add(value, ""),
                Some(PrefixDeclaration::Named(p)) => {
                    namespaces.add(value, String::from_utf8_lossy(p).into_owned())
                }
                None => {
                    let (local, attr_prefix) = split_name(attr.key.as_ref());
                    attributes.add_with_prefix(local, attr_prefix, value);
                }
            }
        }

        XmlToken {
            kind: TokenKind::Start,
            name,
            prefix,
            namespace,
            attributes,
            namespaces,
            line,
            column,
            offset,
            end_offset: self.reader.buffer_position() as usize,
        }
    }
}

fn element_namespace(resolved: ResolveResult<'_>) -> ElementNamespace {
    match resolved {
        ResolveResult::Unbound => ElementNamespace::Unbound,
        ResolveResult::Bound(ns) => {
            ElementNamespace::Bound(String::from_utf8_lossy(ns.as_ref()).into_owned())
        }
        ResolveResult::Unknown(prefix) => {
            ElementNamespace::Undeclared(String::from_utf8_lossy(&prefix).into_owned())
        }
    }
}

/// Split a raw qualified name into (local name, prefix)
fn split_name(raw: &[u8]) -> (String, String) {
    let qname = String::from_utf8_lossy(raw);
    match qname.split_once(':') {
        Some((prefix, local)) => (local.to_string(), prefix.to_string()),
        None => (qname.into_owned(), String::new()),
    }
}

/// Formatter writing elements with attribute bags
pub struct XmlOutputStream<W: IoWrite> {
    writer: Writer<W>,
}

impl<W: IoWrite> XmlOutputStream<W> {
    /// Create a formatter indenting with `indent_size` copies of `indent_char`
    pub fn new(inner: W, indent_char: u8, indent_size: usize) -> Self {
        Self {
            writer: Writer::new_with_indent(inner, indent_char, indent_size),
        }
    }

    /// Write the `<?xml version="1.0" encoding="UTF-8"?>` declaration
    pub fn write_declaration(&mut self) -> Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| Error::xml_write(format!("Failed to write XML declaration: {}", e)))
    }

    /// Open element `name`, or write it as empty when `empty` is set
    pub fn start_element(
        &mut self,
        name: &str,
        namespaces: &XmlNamespaces,
        attributes: &XmlAttributes,
        empty: bool,
    ) -> Result<()> {
        let mut elem = BytesStart::new(name);
        for (prefix, uri) in namespaces.iter() {
            if prefix.is_empty() {
                elem.push_attribute(("xmlns", uri));
            } else {
                let key = format!("xmlns:{}", prefix);
                elem.push_attribute((key.as_str(), uri));
            }
        }
        for attr in attributes.iter() {
            if attr.prefix.is_empty() {
                elem.push_attribute((attr.name.as_str(), attr.value.as_str()));
            } else {
                let key = format!("{}:{}", attr.prefix, attr.name);
                elem.push_attribute((key.as_str(), attr.value.as_str()));
            }
        }
        let event = if empty {
            Event::Empty(elem)
        } else {
            Event::Start(elem)
        };
        self.writer
            .write_event(event)
            .map_err(|e| Error::xml_write(format!("Failed to write <{}>: {}", name, e)))
    }

    /// Close element `name`
    pub fn end_element(&mut self, name: &str) -> Result<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(|e| Error::xml_write(format!("Failed to write </{}>: {}", name, e)))
    }

    /// Write a captured element, re-indenting its child elements
    pub fn write_fragment(&mut self, fragment: &XmlFragment) -> Result<()> {
        let mut reader = Reader::from_str(fragment.as_str());
        loop {
            let event = reader.read_event().map_err(|e| {
                Error::xml_write(format!("Failed to replay <{}>: {}", fragment.name(), e))
            })?;
            if let Event::Eof = event {
                return Ok(());
            }
            self.writer
                .write_event(event)
                .map_err(|e| Error::xml_write(format!("Failed to write <{}>: {}", fragment.name(), e)))?;
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(xml: &str) -> (Vec<XmlToken>, ErrorLog) {
        let mut log = ErrorLog::new();
        let mut stream = XmlInputStream::from_str(xml);
        let mut tokens = Vec::new();
        while let Some(t) = stream.next(&mut log) {
            tokens.push(t);
        }
        (tokens, log)
    }

    #[test]
    fn test_tokens_carry_positions_and_namespaces() {
        let xml = "<?xml version=\"1.0\"?>\n<sedML xmlns=\"urn:a\" level=\"1\">\n  <model id=\"m\"/>\n</sedML>";
        let (tokens, log) = drain(xml);
        assert!(log.is_empty());
        assert_eq!(tokens.len(), 4);

        assert_eq!(tokens[0].name, "sedML");
        assert_eq!((tokens[0].line, tokens[0].column), (2, 1));
        assert_eq!(tokens[0].namespaces.uri(""), Some("urn:a"));
        assert_eq!(tokens[0].attributes.get("level"), Some("1"));
        assert_eq!(tokens[0].attributes.len(), 1);

        assert_eq!(tokens[1].name, "model");
        assert_eq!((tokens[1].line, tokens[1].column), (3, 3));
        assert_eq!(tokens[1].namespace, ElementNamespace::Bound("urn:a".to_string()));
        assert!(tokens[2].is_end_for(&tokens[1]));
        assert!(tokens[3].is_end_for(&tokens[0]));
    }

    #[test]
    fn test_doctype_is_rejected() {
        let (tokens, log) = drain("<!DOCTYPE sedML><sedML/>");
        assert!(tokens.is_empty());
        assert!(log.contains(SedErrorCode::BadXmlDoctype));
    }

    #[test]
    fn test_mismatched_end_is_fatal() {
        let (_, log) = drain("<a><b></a>");
        assert!(log.contains(SedErrorCode::BadlyFormedXml));
        assert!(log.has_fatal());
    }

    #[test]
    fn test_unclosed_element_reports_eof() {
        let (_, log) = drain("<a><b/>");
        assert!(
            log.contains(SedErrorCode::XmlUnexpectedEof)
                || log.contains(SedErrorCode::BadlyFormedXml)
        );
    }

    #[test]
    fn test_skip_past_end_consumes_subtree() {
        let mut log = ErrorLog::new();
        let mut stream = XmlInputStream::from_str("<r><x><y/><x/></x><z/></r>");
        let _r = stream.next(&mut log);
        let x = stream.next(&mut log).map(|t| t.name);
        assert_eq!(x.as_deref(), Some("x"));
        let start = XmlToken {
            kind: TokenKind::Start,
            name: "x".to_string(),
            prefix: String::new(),
            namespace: ElementNamespace::Unbound,
            attributes: XmlAttributes::new(),
            namespaces: XmlNamespaces::new(),
            line: 0,
            column: 0,
            offset: 0,
            end_offset: 0,
        };
        stream.skip_past_end(&start, &mut log);
        assert_eq!(stream.next(&mut log).map(|t| t.name).as_deref(), Some("z"));
    }

    #[test]
    fn test_capture_keeps_subtree_and_resumes() {
        let xml = "<r>\n  <notes>\n    <p xmlns=\"urn:x\">hi <b>there</b></p>\n  </notes>\n  <z/>\n</r>";
        let mut log = ErrorLog::new();
        let mut stream = XmlInputStream::from_str(xml);
        let _r = stream.next(&mut log);
        let notes = stream.next(&mut log).unwrap();
        assert_eq!((notes.line, notes.column), (2, 3));

        let fragment = stream.capture(&notes, &mut log).unwrap();
        assert_eq!(fragment.name(), "notes");
        assert_eq!(fragment.as_str(), "<notes><p xmlns=\"urn:x\">hi <b>there</b></p></notes>");
        assert_eq!(stream.next(&mut log).map(|t| t.name).as_deref(), Some("z"));
        assert!(log.is_empty());
    }

    #[test]
    fn test_capture_of_empty_element() {
        let mut log = ErrorLog::new();
        let mut stream = XmlInputStream::from_str("<r><annotation/><z/></r>");
        let _r = stream.next(&mut log);
        let start = stream.next(&mut log).unwrap();
        let fragment = stream.capture(&start, &mut log).unwrap();
        assert_eq!(fragment.as_str(), "<annotation/>");
        assert_eq!(stream.next(&mut log).map(|t| t.name).as_deref(), Some("z"));
    }

    #[test]
    fn test_fragment_written_indented() {
        let fragment = XmlFragment::parse("<notes><p>a <b>b</b> c</p></notes>").unwrap();
        let mut out = XmlOutputStream::new(Vec::new(), b' ', 2);
        out.start_element("model", &XmlNamespaces::new(), &XmlAttributes::new(), false)
            .unwrap();
        out.write_fragment(&fragment).unwrap();
        out.end_element("model").unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(text, "<model>\n  <notes>\n    <p>a <b>b</b> c</p>\n  </notes>\n</model>");
        assert_eq!(XmlFragment::parse(&text[10..text.len() - 9]).as_ref(), Some(&fragment));
    }

    #[test]
    fn test_output_escapes_attribute_values() {
        let mut out = XmlOutputStream::new(Vec::new(), b' ', 2);
        let mut attrs = XmlAttributes::new();
        attrs.add("target", "/a[@b=\"c\"] & d");
        out.start_element("removeXML", &XmlNamespaces::new(), &attrs, true)
            .unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(text, "<removeXML target=\"/a[@b=&quot;c&quot;] &amp; d\"/>");
    }
}
