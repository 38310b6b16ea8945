//! Reading SED-ML documents
//!
//! Reading never fails on document content: every problem ends up in the
//! returned document's [`ErrorLog`](crate::diagnostics::ErrorLog) and the tree
//! holds whatever could be interpreted. Only file access returns an error.
//!
//! The reader itself knows nothing about concrete element kinds. For each
//! child start tag it asks the node being populated to
//! [`create_object`](crate::node::SedBase::create_object) the matching child,
//! then recurses into it.

use crate::diagnostics::{ErrorLog, SedErrorCode};
use crate::error::Result;
use crate::model::SedDocument;
use crate::namespaces::{self, DEFAULT_LEVEL, DEFAULT_VERSION};
use crate::node::SedBase;
use crate::xml::attributes::{ExpectedAttributes, XmlValue};
use crate::xml::{ElementNamespace, XmlInputStream, XmlToken};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Default limit on element nesting
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options controlling how documents are read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    max_depth: usize,
    strict_namespaces: bool,
    default_level: u32,
    default_version: u32,
}

impl ReaderConfig {
    /// Configuration with default settings
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict_namespaces: true,
            default_level: DEFAULT_LEVEL,
            default_version: DEFAULT_VERSION,
        }
    }

    /// Skip elements nested deeper than `max_depth`
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether a root outside the SED-ML namespaces is reported
    pub fn with_strict_namespaces(mut self, strict: bool) -> Self {
        self.strict_namespaces = strict;
        self
    }

    /// Level and version used when the root declares neither
    pub fn with_default_version(mut self, level: u32, version: u32) -> Self {
        self.default_level = level;
        self.default_version = version;
        self
    }

    /// Nesting limit
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Whether the root namespace is checked
    pub fn strict_namespaces(&self) -> bool {
        self.strict_namespaces
    }

    /// Fallback (level, version)
    pub fn default_version(&self) -> (u32, u32) {
        (self.default_level, self.default_version)
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds [`SedDocument`] trees from XML text
#[derive(Debug, Clone, Default)]
pub struct SedReader {
    config: ReaderConfig,
}

impl SedReader {
    /// Reader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Reader with the given settings
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Read a document from a string
    pub fn read_from_string(&self, xml: &str) -> SedDocument {
        let mut state = ReadState {
            config: &self.config,
            stream: XmlInputStream::from_str(xml),
            log: ErrorLog::new(),
            document_uri: None,
        };
        let (level, version) = self.config.default_version();
        let mut doc = SedDocument::new(level, version);
        state.read_root(&mut doc);
        check_unique_ids(&doc, &mut state.log);

        if state.log.has_fatal() {
            log::warn!(
                "document could not be fully read: {} diagnostic(s)",
                state.log.num_errors()
            );
        } else {
            log::debug!(
                "read SED-ML L{}V{} with {} diagnostic(s)",
                doc.level(),
                doc.version(),
                state.log.num_errors()
            );
        }
        doc.set_error_log(state.log);
        doc
    }

    /// Read a document from raw bytes, which must be UTF-8
    pub fn read_from_bytes(&self, bytes: &[u8]) -> SedDocument {
        match std::str::from_utf8(bytes) {
            Ok(xml) => self.read_from_string(xml),
            Err(e) => {
                let (level, version) = self.config.default_version();
                let mut doc = SedDocument::new(level, version);
                doc.error_log_mut().log_error(
                    SedErrorCode::NotUtf8,
                    format!("Invalid UTF-8 after byte {}", e.valid_up_to()),
                    0,
                    0,
                );
                doc
            }
        }
    }

    /// Read a document from a file
    pub fn read_from_file(&self, path: impl AsRef<Path>) -> Result<SedDocument> {
        let path = path.as_ref();
        log::debug!("reading SED-ML from {}", path.display());
        let bytes = fs::read(path)?;
        let doc = self.read_from_bytes(&bytes);
        if doc.error_log().has_fatal() {
            log::warn!("{}: document has fatal diagnostics", path.display());
        }
        Ok(doc)
    }
}

/// Read a document from a string with default settings
pub fn read_sedml_from_string(xml: &str) -> SedDocument {
    SedReader::new().read_from_string(xml)
}

/// Read a document from a file with default settings
pub fn read_sedml_from_file(path: impl AsRef<Path>) -> Result<SedDocument> {
    SedReader::new().read_from_file(path)
}

struct ReadState<'c, 'x> {
    config: &'c ReaderConfig,
    stream: XmlInputStream<'x>,
    log: ErrorLog,
    /// Namespace the root element was read in
    document_uri: Option<String>,
}

impl ReadState<'_, '_> {
    fn read_root(&mut self, doc: &mut SedDocument) {
        let Some(root) = self.stream.next(&mut self.log) else {
            if self.stream.is_good() {
                self.log.log_error(
                    SedErrorCode::BadlyFormedXml,
                    "The document has no root element.",
                    1,
                    1,
                );
            }
            return;
        };

        if root.name != "sedML" {
            let message = format!(
                "The root element must be <sedML>, found <{}>.",
                root.name
            );
            self.log
                .log_error(SedErrorCode::NotSchemaConformant, message, root.line, root.column);
            return;
        }

        doc.base_mut().set_position(root.line, root.column);
        doc.base_mut()
            .sed_namespaces_mut()
            .set_namespaces(root.namespaces.clone());

        let (level, version) = self.resolve_version(&root);
        log::debug!("resolved document version L{}V{}", level, version);
        doc.update_level_and_version(level, version);

        let mut expected = ExpectedAttributes::new();
        doc.add_expected_attributes(&mut expected);
        doc.read_attributes(&root.attributes, &expected, &mut self.log);
        self.check_root_namespace(&root, level, version);

        self.read_children(doc, 1);
    }

    /// Level and version from the root's attributes, then its namespace, then the defaults
    fn resolve_version(&self, root: &XmlToken) -> (u32, u32) {
        let attr = |name: &str| root.attributes.get(name).and_then(u32::parse_xml);
        if let (Some(level), Some(version)) = (attr("level"), attr("version")) {
            return (level, version);
        }
        let from_namespace = match &root.namespace {
            ElementNamespace::Bound(uri) => namespaces::from_uri(uri),
            _ => None,
        };
        match from_namespace {
            Some(descriptor) => (descriptor.level, descriptor.version),
            None => self.config.default_version(),
        }
    }

    fn check_root_namespace(&mut self, root: &XmlToken, level: u32, version: u32) {
        let recognized = match &root.namespace {
            ElementNamespace::Bound(uri) => {
                self.document_uri = Some(uri.clone());
                namespaces::lookup(level, version).recognizes(uri)
            }
            ElementNamespace::Unbound => false,
            ElementNamespace::Undeclared(prefix) => {
                let message = format!("The prefix '{}' of <{}> is not declared.", prefix, root.name);
                self.log
                    .log_error(SedErrorCode::NsUndeclared, message, root.line, root.column);
                false
            }
        };
        if !recognized && self.config.strict_namespaces() {
            let message = format!(
                "The <sedML> element must use the namespace {} for Level {} Version {}.",
                namespaces::sed_namespace_uri(level, version),
                level,
                version
            );
            self.log
                .log_error(SedErrorCode::InvalidNamespaceOnSed, message, root.line, root.column);
        }
    }

    fn is_document_namespace(&self, uri: &str) -> bool {
        self.document_uri.as_deref() == Some(uri) || namespaces::is_sed_namespace(uri)
    }

    fn in_document_namespace(&self, namespace: &ElementNamespace) -> bool {
        match namespace {
            ElementNamespace::Bound(uri) => self.is_document_namespace(uri),
            ElementNamespace::Unbound => true,
            ElementNamespace::Undeclared(_) => false,
        }
    }

    /// Keep a `<notes>` or `<annotation>` element on `node`
    fn read_notes_or_annotation(&mut self, node: &mut dyn SedBase, token: &XmlToken) {
        let is_notes = token.name == "notes";
        let already_set = if is_notes {
            node.is_set_notes()
        } else {
            node.is_set_annotation()
        };
        if already_set {
            let message = format!(
                "Only one <{}> element is permitted inside <{}>.",
                token.name,
                node.element_name()
            );
            self.log
                .log_error(SedErrorCode::NotSchemaConformant, message, token.line, token.column);
        } else if is_notes && node.is_set_annotation() {
            self.log.log_error(
                SedErrorCode::NotSchemaConformant,
                "Incorrect ordering of <annotation> and <notes> elements: <notes> must come before <annotation>.",
                token.line,
                token.column,
            );
        }

        let Some(fragment) = self.stream.capture(token, &mut self.log) else {
            return;
        };
        if is_notes {
            node.base_mut().set_notes_fragment(Some(fragment));
        } else {
            node.base_mut().set_annotation_fragment(Some(fragment));
        }
    }

    /// Populate `node` from `start` and its content
    fn read_element(&mut self, node: &mut dyn SedBase, start: &XmlToken, depth: usize) {
        node.base_mut().set_position(start.line, start.column);
        if !start.namespaces.is_empty() {
            node.base_mut()
                .sed_namespaces_mut()
                .set_namespaces(start.namespaces.clone());
        }

        let mut expected = ExpectedAttributes::new();
        node.add_expected_attributes(&mut expected);
        node.read_attributes(&start.attributes, &expected, &mut self.log);
        self.read_children(node, depth);

        if node.list_size() == Some(0) {
            let message = format!("The <{}> element must not be empty.", start.name);
            self.log
                .log_error(SedErrorCode::EmptyListElement, message, start.line, start.column);
        }
    }

    /// Dispatch child elements of `node` until its end tag
    fn read_children(&mut self, node: &mut dyn SedBase, depth: usize) {
        while let Some(token) = self.stream.next(&mut self.log) {
            if token.is_end() {
                return;
            }

            if depth >= self.config.max_depth() {
                let message = format!(
                    "<{}> is nested deeper than {} elements and was skipped.",
                    token.name,
                    self.config.max_depth()
                );
                self.log
                    .log_error(SedErrorCode::NotSchemaConformant, message, token.line, token.column);
                self.stream.skip_past_end(&token, &mut self.log);
                continue;
            }

            if let ElementNamespace::Undeclared(prefix) = &token.namespace {
                let message =
                    format!("The prefix '{}' of <{}> is not declared.", prefix, token.name);
                self.log
                    .log_error(SedErrorCode::NsUndeclared, message, token.line, token.column);
                self.stream.skip_past_end(&token, &mut self.log);
                continue;
            }

            if self.in_document_namespace(&token.namespace)
                && matches!(token.name.as_str(), "notes" | "annotation")
            {
                self.read_notes_or_annotation(node, &token);
                continue;
            }

            if node.accepts_other_xml(&token) {
                log::trace!("keeping <{}> as opaque XML", token.name);
                if let Some(fragment) = self.stream.capture(&token, &mut self.log) {
                    node.read_other_xml(&token, fragment, &mut self.log);
                }
                continue;
            }

            match &token.namespace {
                ElementNamespace::Bound(uri) if !self.is_document_namespace(uri) => {
                    log::debug!("skipping <{}> in foreign namespace {}", token.name, uri);
                    self.stream.skip_past_end(&token, &mut self.log);
                    continue;
                }
                _ => {}
            }

            match node.create_object(&token.name, &mut self.log) {
                Some(child) => {
                    log::trace!("reading <{}> at {}:{}", token.name, token.line, token.column);
                    self.read_element(child, &token, depth + 1);
                }
                None => {
                    let message = format!(
                        "Element <{}> is not permitted inside <{}>.",
                        token.name,
                        node.element_name()
                    );
                    self.log.log_error(
                        SedErrorCode::UnrecognizedElement,
                        message,
                        token.line,
                        token.column,
                    );
                    self.stream.skip_past_end(&token, &mut self.log);
                }
            }
        }
    }
}

/// Log every top-level component whose id repeats an earlier one
fn check_unique_ids(doc: &SedDocument, log: &mut ErrorLog) {
    let mut seen = HashSet::new();
    for list in doc.children() {
        for item in list.children() {
            let Some(id) = item.id() else { continue };
            if !seen.insert(id) {
                let message = format!(
                    "The id '{}' of <{}> is already used by another component.",
                    id,
                    item.element_name()
                );
                log.log_error(SedErrorCode::DuplicateComponentId, message, item.line(), item.column());
            }
        }
    }
}
