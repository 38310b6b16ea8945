//! Opaque XML kept verbatim on a node
//!
//! `<notes>`, `<annotation>` and MathML `<math>` are not modelled as nodes.
//! They are captured as a single element and written back as read. Stored
//! text is normalized: whitespace-only text spanning lines is dropped, so
//! re-indented output reads back to the same fragment.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::Event;
use std::fmt;

/// One well-formed XML element held as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlFragment {
    name: String,
    xml: String,
}

impl XmlFragment {
    /// Parse `xml`, which must hold exactly one element
    pub fn parse(xml: &str) -> Option<Self> {
        let mut reader = Reader::from_str(xml);
        let mut writer = Writer::new(Vec::new());
        let mut depth = 0usize;
        let mut name = None;

        loop {
            let event = reader.read_event().ok()?;
            match &event {
                Event::Eof => break,
                Event::Text(text) if is_layout(text, depth) => continue,
                Event::Decl(_) | Event::DocType(_) => return None,
                Event::Start(e) | Event::Empty(e) => {
                    if depth == 0 {
                        if name.is_some() {
                            return None;
                        }
                        name = Some(local_name(e.name().as_ref()));
                    }
                    if matches!(event, Event::Start(_)) {
                        depth += 1;
                    }
                }
                Event::End(_) => depth = depth.checked_sub(1)?,
                Event::Text(_) | Event::CData(_) | Event::GeneralRef(_) if depth == 0 => {
                    return None;
                }
                _ => {}
            }
            writer.write_event(event).ok()?;
        }

        if depth != 0 {
            return None;
        }
        let xml = String::from_utf8(writer.into_inner()).ok()?;
        Some(Self { name: name?, xml })
    }

    /// Parse `xml` as the element `name`, wrapping it when it is only content
    pub fn parse_as(name: &str, xml: &str) -> Option<Self> {
        match Self::parse(xml) {
            Some(fragment) if fragment.name == name => Some(fragment),
            _ => Self::parse(&format!("<{name}>{xml}</{name}>")),
        }
    }

    /// Local name of the element
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized XML text of the element
    pub fn as_str(&self) -> &str {
        &self.xml
    }
}

impl fmt::Display for XmlFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.xml)
    }
}

/// Indentation between elements, or any blank text outside the element
fn is_layout(text: &[u8], depth: usize) -> bool {
    text.iter().all(u8::is_ascii_whitespace) && (depth == 0 || text.contains(&b'\n'))
}

fn local_name(raw: &[u8]) -> String {
    let qname = String::from_utf8_lossy(raw);
    match qname.split_once(':') {
        Some((_, local)) => local.to_string(),
        None => qname.into_owned(),
    }
}
