//! XML writing for SED-ML documents
//!
//! Serialization walks the tree depth-first. Each node writes its own
//! attributes through [`SedBase::write_attributes`], then its `<notes>` and
//! `<annotation>`, then its children in order, then any opaque XML such as a
//! data generator's `<math>`. A `listOf*` collection with no items and no
//! notes or annotation is left out entirely.
//!
//! The `<sedML>` element always declares the canonical namespace for the
//! document's level and version, so a document read under an alternate URI
//! is written back under the canonical one.

use crate::error::Result;
use crate::model::SedDocument;
use crate::namespaces::{self, sed_namespace_uri};
use crate::node::SedBase;
use crate::xml::{XmlAttributes, XmlFragment, XmlNamespaces, XmlOutputStream};
use std::fs::File;
use std::io::{BufWriter, Write as IoWrite};
use std::path::Path;

/// Prefix given to a foreign default namespace moved off the root
pub const ADDED_PREFIX: &str = "addedPrefix";

/// Options controlling how documents are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    indent_char: char,
    indent_size: usize,
    declaration: bool,
}

impl WriterConfig {
    /// Configuration with default settings
    pub fn new() -> Self {
        Self {
            indent_char: ' ',
            indent_size: 2,
            declaration: true,
        }
    }

    /// Indent nested elements with `size` copies of `ch`
    ///
    /// Non-ASCII characters fall back to a space.
    pub fn with_indent(mut self, ch: char, size: usize) -> Self {
        self.indent_char = if ch.is_ascii() { ch } else { ' ' };
        self.indent_size = size;
        self
    }

    /// Whether to write the `<?xml ...?>` declaration
    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    /// Indent character and width
    pub fn indent(&self) -> (char, usize) {
        (self.indent_char, self.indent_size)
    }

    /// Whether the declaration is written
    pub fn declaration(&self) -> bool {
        self.declaration
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes [`SedDocument`] trees to XML
#[derive(Debug, Clone, Default)]
pub struct SedWriter {
    config: WriterConfig,
}

impl SedWriter {
    /// Writer with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer with the given settings
    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Write `doc` to any byte sink
    pub fn write_to_writer<W: IoWrite>(&self, doc: &SedDocument, writer: W) -> Result<()> {
        let indent_char = u8::try_from(self.config.indent_char).unwrap_or(b' ');
        let mut out = XmlOutputStream::new(writer, indent_char, self.config.indent_size);
        if self.config.declaration {
            out.write_declaration()?;
        }
        log::debug!(
            "writing SED-ML L{}V{} under {}",
            doc.level(),
            doc.version(),
            sed_namespace_uri(doc.level(), doc.version())
        );
        write_node(&mut out, doc, &document_namespaces(doc))?;
        out.into_inner().flush()?;
        Ok(())
    }

    /// Write `doc` to a string
    pub fn write_to_string(&self, doc: &SedDocument) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to_writer(doc, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Write `doc` to a file, replacing it
    pub fn write_to_file(&self, doc: &SedDocument, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        log::debug!("writing SED-ML to {}", path.display());
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to_writer(doc, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Write a document to a string with default settings
pub fn write_sedml_to_string(doc: &SedDocument) -> Result<String> {
    SedWriter::new().write_to_string(doc)
}

/// Write a document to a file with default settings
pub fn write_sedml_to_file(doc: &SedDocument, path: impl AsRef<Path>) -> Result<()> {
    SedWriter::new().write_to_file(doc, path)
}

/// Declarations for the root: the canonical default first, then the rest
fn document_namespaces(doc: &SedDocument) -> XmlNamespaces {
    let declared = doc.namespaces();
    let mut out = XmlNamespaces::new();
    out.add(sed_namespace_uri(doc.level(), doc.version()), "");

    if let Some(uri) = declared.uri("")
        && !namespaces::is_sed_namespace(uri)
        && !declared.iter().any(|(prefix, bound)| !prefix.is_empty() && bound == uri)
    {
        log::debug!("moving foreign default namespace {} to prefix {}", uri, ADDED_PREFIX);
        out.add(uri, ADDED_PREFIX);
    }

    for (prefix, uri) in declared.iter() {
        if !prefix.is_empty() {
            out.add(uri, prefix);
        }
    }
    out
}

/// Declarations a non-root node repeats: only those outside SED-ML
fn foreign_namespaces(node: &dyn SedBase) -> XmlNamespaces {
    let mut out = XmlNamespaces::new();
    for (prefix, uri) in node.base().sed_namespaces().namespaces().iter() {
        if !namespaces::is_sed_namespace(uri) {
            out.add(uri, prefix);
        }
    }
    out
}

fn write_node<W: IoWrite>(
    out: &mut XmlOutputStream<W>,
    node: &dyn SedBase,
    declarations: &XmlNamespaces,
) -> Result<()> {
    let mut attributes = XmlAttributes::new();
    node.write_attributes(&mut attributes);

    let children: Vec<&dyn SedBase> = node
        .children()
        .into_iter()
        .filter(|child| {
            child.list_size() != Some(0) || child.is_set_notes() || child.is_set_annotation()
        })
        .collect();
    let name = node.element_name();
    let leading: Vec<&XmlFragment> = node.notes().into_iter().chain(node.annotation()).collect();
    let trailing = node.other_xml();

    if children.is_empty() && leading.is_empty() && trailing.is_none() {
        return out.start_element(name, declarations, &attributes, true);
    }

    out.start_element(name, declarations, &attributes, false)?;
    for fragment in leading {
        out.write_fragment(fragment)?;
    }
    for child in children {
        log::trace!("writing <{}>", child.element_name());
        write_node(out, child, &foreign_namespaces(child))?;
    }
    if let Some(fragment) = trailing {
        out.write_fragment(fragment)?;
    }
    out.end_element(name)
}
