//! Base node abstraction shared by every element kind
//!
//! A tree is made of values that own their children directly. Upward
//! relations are not pointers: every node records the index path from the
//! root of its tree, the type of its parent and whether that root is a
//! document. These links are recomputed by [`SedBase::connect_to_child`]
//! after every structural change, so they can never dangle. A document
//! resolves them back into nodes with
//! [`SedDocument::node_at`](crate::model::SedDocument::node_at) and
//! [`SedDocument::parent_of`](crate::model::SedDocument::parent_of).

mod list_of;

pub use list_of::{ListItem, ListOf};

use crate::diagnostics::{ErrorLog, SedErrorCode};
use crate::error::{OperationError, OperationResult};
use crate::namespaces::SedNamespaces;
use crate::syntax;
use crate::type_codes::TypeCode;
use crate::xml::{XmlAttributes, XmlFragment, XmlToken};
use crate::xml::attributes::{AttributeDescriptor, AttributeKind, ExpectedAttributes, ReadContext};
use std::fmt;

const ID: AttributeDescriptor = AttributeDescriptor::new("id", AttributeKind::SId);
const NAME: AttributeDescriptor = AttributeDescriptor::new("name", AttributeKind::String);
const METAID: AttributeDescriptor = AttributeDescriptor::new("metaid", AttributeKind::Id);

/// Non-owning position of a node within its tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct NodeLink {
    path: Vec<usize>,
    parent_type: Option<TypeCode>,
    in_document: bool,
}

/// What a child needs to know about its parent when connecting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentInfo {
    path: Vec<usize>,
    type_code: TypeCode,
    in_document: bool,
}

impl ParentInfo {
    /// Describe a parent of kind `type_code` with base `base`
    pub fn new(type_code: TypeCode, base: &NodeBase) -> Self {
        Self {
            path: base.link.path.clone(),
            type_code,
            in_document: base.link.in_document,
        }
    }
}

/// State every node carries regardless of its kind
pub struct NodeBase {
    id: Option<String>,
    name: Option<String>,
    meta_id: Option<String>,
    notes: Option<XmlFragment>,
    annotation: Option<XmlFragment>,
    sed_namespaces: SedNamespaces,
    line: u32,
    column: u32,
    link: NodeLink,
}

impl NodeBase {
    /// Base for a node at (level, version) with no declarations
    pub fn new(level: u32, version: u32) -> Self {
        Self::with_namespaces(SedNamespaces::bare(level, version))
    }

    /// Base carrying the given level, version and declarations
    pub fn with_namespaces(sed_namespaces: SedNamespaces) -> Self {
        Self {
            id: None,
            name: None,
            meta_id: None,
            notes: None,
            annotation: None,
            sed_namespaces,
            line: 0,
            column: 0,
            link: NodeLink::default(),
        }
    }

    /// Identifier
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Set the identifier; an empty string unsets it
    pub fn set_id(&mut self, id: &str) -> OperationResult {
        if id.is_empty() {
            self.id = None;
            return Ok(());
        }
        if !syntax::is_valid_sid(id) {
            return Err(OperationError::InvalidAttributeValue);
        }
        self.id = Some(id.to_string());
        Ok(())
    }

    /// Human-readable name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name; an empty string unsets it
    pub fn set_name(&mut self, name: &str) -> OperationResult {
        self.name = (!name.is_empty()).then(|| name.to_string());
        Ok(())
    }

    /// Metadata identifier
    pub fn meta_id(&self) -> Option<&str> {
        self.meta_id.as_deref()
    }

    /// Set the metadata identifier; an empty string unsets it
    pub fn set_meta_id(&mut self, meta_id: &str) -> OperationResult {
        if meta_id.is_empty() {
            self.meta_id = None;
            return Ok(());
        }
        if !syntax::is_valid_xml_id(meta_id) {
            return Err(OperationError::InvalidAttributeValue);
        }
        self.meta_id = Some(meta_id.to_string());
        Ok(())
    }

    /// The `<notes>` element
    pub fn notes(&self) -> Option<&XmlFragment> {
        self.notes.as_ref()
    }

    /// Set `<notes>` from a whole element or from its content
    ///
    /// An empty string unsets it.
    pub fn set_notes(&mut self, xml: &str) -> OperationResult {
        self.notes = parse_fragment("notes", xml)?;
        Ok(())
    }

    /// Store a `<notes>` element read from a document
    pub fn set_notes_fragment(&mut self, notes: Option<XmlFragment>) {
        self.notes = notes;
    }

    /// The `<annotation>` element
    pub fn annotation(&self) -> Option<&XmlFragment> {
        self.annotation.as_ref()
    }

    /// Set `<annotation>` from a whole element or from its content
    ///
    /// An empty string unsets it.
    pub fn set_annotation(&mut self, xml: &str) -> OperationResult {
        self.annotation = parse_fragment("annotation", xml)?;
        Ok(())
    }

    /// Store an `<annotation>` element read from a document
    pub fn set_annotation_fragment(&mut self, annotation: Option<XmlFragment>) {
        self.annotation = annotation;
    }

    /// Source line, 0 when not read from a document
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Source column, 0 when not read from a document
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Record where this node was read from
    pub fn set_position(&mut self, line: u32, column: u32) {
        self.line = line;
        self.column = column;
    }

    /// Schema level
    pub fn level(&self) -> u32 {
        self.sed_namespaces.level()
    }

    /// Schema version
    pub fn version(&self) -> u32 {
        self.sed_namespaces.version()
    }

    /// Level, version and declarations
    pub fn sed_namespaces(&self) -> &SedNamespaces {
        &self.sed_namespaces
    }

    /// Mutable level, version and declarations
    pub fn sed_namespaces_mut(&mut self) -> &mut SedNamespaces {
        &mut self.sed_namespaces
    }

    /// Index path from the root of the tree
    pub fn path(&self) -> &[usize] {
        &self.link.path
    }

    /// Kind of the parent, `None` for a root or detached node
    pub fn parent_type(&self) -> Option<TypeCode> {
        self.link.parent_type
    }

    /// Whether the root of this node's tree is a document
    pub fn is_in_document(&self) -> bool {
        self.link.in_document
    }

    /// Make this node the root of a document tree
    pub(crate) fn make_document_root(&mut self) {
        self.link = NodeLink {
            path: Vec::new(),
            parent_type: None,
            in_document: true,
        };
    }

    fn attach(&mut self, parent: &ParentInfo, index: usize) {
        let mut path = parent.path.clone();
        path.push(index);
        self.link = NodeLink {
            path,
            parent_type: Some(parent.type_code),
            in_document: parent.in_document,
        };
    }

    fn detach(&mut self) {
        self.link = NodeLink::default();
    }

    /// Read `id`, `name` and `metaid`, reporting unexpected unprefixed attributes
    pub fn read_core_attributes(
        &mut self,
        element: &'static str,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        log: &mut ErrorLog,
    ) {
        for attr in attributes.iter() {
            if attr.prefix.is_empty() && !expected.has(&attr.name) {
                let message = format!(
                    "Attribute '{}' is not part of the definition of the <{}> element.",
                    attr.name, element
                );
                log.log_error(SedErrorCode::UnknownCoreAttribute, message, self.line, self.column);
            }
        }

        let mut cx = self.read_context(element, attributes, log);
        let id = ID.read_string(&mut cx);
        let name = NAME.read_string(&mut cx);
        let meta_id = METAID.read_string(&mut cx);
        self.id = id;
        self.name = name;
        self.meta_id = meta_id;
    }

    /// Read the core attributes of a concrete kind
    ///
    /// Unknown attributes are refined into `allowed`, the kind's own
    /// "allowed attributes" id, which is also used when a required `id` is
    /// missing.
    pub fn read_element_core(
        &mut self,
        element: &'static str,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        log: &mut ErrorLog,
        allowed: SedErrorCode,
        id_required: bool,
    ) {
        let mark = log.mark();
        self.read_core_attributes(element, attributes, expected, log);
        log.reclassify_since(mark, SedErrorCode::UnknownCoreAttribute, allowed);

        if id_required && self.id.is_none() && !attributes.has("id") {
            let message = format!("Sedml attribute 'id' is missing from the <{}> element.", element);
            log.log_error(allowed, message, self.line, self.column);
        }
    }

    /// Reading context positioned at this node
    pub fn read_context<'a>(
        &self,
        element: &'static str,
        attributes: &'a XmlAttributes,
        log: &'a mut ErrorLog,
    ) -> ReadContext<'a> {
        ReadContext {
            attributes,
            log,
            element,
            line: self.line,
            column: self.column,
            level: self.level(),
            version: self.version(),
        }
    }

    /// Write `id`, `name` and `metaid` when set
    pub fn write_core_attributes(&self, out: &mut XmlAttributes) {
        METAID.write_str(self.meta_id(), out);
        ID.write_str(self.id(), out);
        NAME.write_str(self.name(), out);
    }
}

impl Clone for NodeBase {
    /// Copies attributes and position; the copy starts detached
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            meta_id: self.meta_id.clone(),
            notes: self.notes.clone(),
            annotation: self.annotation.clone(),
            sed_namespaces: self.sed_namespaces.clone(),
            line: self.line,
            column: self.column,
            link: NodeLink::default(),
        }
    }
}

impl PartialEq for NodeBase {
    /// Compares attributes, level and version; position and links are ignored
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.meta_id == other.meta_id
            && self.notes == other.notes
            && self.annotation == other.annotation
            && self.level() == other.level()
            && self.version() == other.version()
    }
}

impl fmt::Debug for NodeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeBase")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("meta_id", &self.meta_id)
            .field("notes", &self.notes)
            .field("annotation", &self.annotation)
            .field("level", &self.level())
            .field("version", &self.version())
            .field("path", &self.link.path)
            .finish()
    }
}

/// The read/write/connect contract every element kind implements
///
/// Concrete kinds supply the required methods and override the hooks they
/// need; identifier accessors, connection and tree queries come for free.
pub trait SedBase: fmt::Debug {
    /// Shared node state
    fn base(&self) -> &NodeBase;

    /// Mutable shared node state
    fn base_mut(&mut self) -> &mut NodeBase;

    /// Discriminator of the concrete kind
    fn type_code(&self) -> TypeCode;

    /// Tag this kind serializes under
    fn element_name(&self) -> &'static str;

    /// Whether every required attribute is set
    fn has_required_attributes(&self) -> bool {
        true
    }

    /// Whether every required child element is present
    fn has_required_elements(&self) -> bool {
        true
    }

    /// Declare the attribute names this kind reads
    fn add_expected_attributes(&self, expected: &mut ExpectedAttributes) {
        add_core_expected_attributes(expected);
    }

    /// Populate this node from an element's attributes
    fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        log: &mut ErrorLog,
    ) {
        let element = self.element_name();
        self.base_mut()
            .read_core_attributes(element, attributes, expected, log);
    }

    /// Add every set attribute to `out`
    fn write_attributes(&self, out: &mut XmlAttributes) {
        self.base().write_core_attributes(out);
    }

    /// Produce the owned, empty child for the next element named `name`
    ///
    /// Returns `None` for names this node does not accept; the caller then
    /// reports and skips the element.
    fn create_object(&mut self, name: &str, log: &mut ErrorLog) -> Option<&mut dyn SedBase> {
        let _ = (name, log);
        None
    }

    /// Owned children in serialization order
    fn children(&self) -> Vec<&dyn SedBase> {
        Vec::new()
    }

    /// Mutable owned children in serialization order
    fn children_mut(&mut self) -> Vec<&mut dyn SedBase> {
        Vec::new()
    }

    /// Number of items when this node is a collection
    fn list_size(&self) -> Option<usize> {
        None
    }

    /// Whether this kind keeps the element opened by `token` as opaque XML
    fn accepts_other_xml(&self, token: &XmlToken) -> bool {
        let _ = token;
        false
    }

    /// Store an element accepted by [`accepts_other_xml`](Self::accepts_other_xml)
    fn read_other_xml(&mut self, token: &XmlToken, fragment: XmlFragment, log: &mut ErrorLog) {
        let _ = (token, fragment, log);
    }

    /// Opaque XML written after the children
    fn other_xml(&self) -> Option<&XmlFragment> {
        None
    }

    /// Rewrite this node's own reference attributes naming `old_id`
    fn rename_own_sid_refs(&mut self, old_id: &str, new_id: &str) {
        let _ = (old_id, new_id);
    }

    /// Replace references to `old_id` with `new_id` in this subtree
    fn rename_sid_refs(&mut self, old_id: &str, new_id: &str) {
        self.rename_own_sid_refs(old_id, new_id);
        for child in self.children_mut() {
            child.rename_sid_refs(old_id, new_id);
        }
    }

    /// Identifier
    fn id(&self) -> Option<&str> {
        self.base().id()
    }

    /// Set the identifier; empty unsets, invalid syntax is rejected
    fn set_id(&mut self, id: &str) -> OperationResult {
        self.base_mut().set_id(id)
    }

    /// Whether the identifier is set
    fn is_set_id(&self) -> bool {
        self.base().id().is_some()
    }

    /// Unset the identifier
    fn unset_id(&mut self) -> OperationResult {
        self.base_mut().set_id("")
    }

    /// Human-readable name
    fn name(&self) -> Option<&str> {
        self.base().name()
    }

    /// Set the name
    fn set_name(&mut self, name: &str) -> OperationResult {
        self.base_mut().set_name(name)
    }

    /// Whether the name is set
    fn is_set_name(&self) -> bool {
        self.base().name().is_some()
    }

    /// The `<notes>` element
    fn notes(&self) -> Option<&XmlFragment> {
        self.base().notes()
    }

    /// Set `<notes>` from a whole element or its content; empty unsets
    fn set_notes(&mut self, xml: &str) -> OperationResult {
        self.base_mut().set_notes(xml)
    }

    /// Whether `<notes>` is set
    fn is_set_notes(&self) -> bool {
        self.base().notes().is_some()
    }

    /// Unset `<notes>`
    fn unset_notes(&mut self) -> OperationResult {
        self.base_mut().set_notes_fragment(None);
        Ok(())
    }

    /// The `<annotation>` element
    fn annotation(&self) -> Option<&XmlFragment> {
        self.base().annotation()
    }

    /// Set `<annotation>` from a whole element or its content; empty unsets
    fn set_annotation(&mut self, xml: &str) -> OperationResult {
        self.base_mut().set_annotation(xml)
    }

    /// Whether `<annotation>` is set
    fn is_set_annotation(&self) -> bool {
        self.base().annotation().is_some()
    }

    /// Unset `<annotation>`
    fn unset_annotation(&mut self) -> OperationResult {
        self.base_mut().set_annotation_fragment(None);
        Ok(())
    }

    /// Schema level
    fn level(&self) -> u32 {
        self.base().level()
    }

    /// Schema version
    fn version(&self) -> u32 {
        self.base().version()
    }

    /// Source line
    fn line(&self) -> u32 {
        self.base().line()
    }

    /// Source column
    fn column(&self) -> u32 {
        self.base().column()
    }

    /// Kind of the parent node
    fn parent_type_code(&self) -> Option<TypeCode> {
        self.base().parent_type()
    }

    /// Recompute the links of every node below this one
    fn connect_to_child(&mut self) {
        let info = ParentInfo::new(self.type_code(), self.base());
        for (index, child) in self.children_mut().into_iter().enumerate() {
            child.connect_to_parent(&info, index);
        }
    }

    /// Attach this node as child `index` of `parent` and relink its subtree
    fn connect_to_parent(&mut self, parent: &ParentInfo, index: usize) {
        self.base_mut().attach(parent, index);
        self.connect_to_child();
    }

    /// Mark this subtree as belonging, or not, to a document
    fn set_sed_document(&mut self, attached: bool) {
        self.base_mut().link.in_document = attached;
        for child in self.children_mut() {
            child.set_sed_document(attached);
        }
    }

    /// Move this subtree to another level and version
    fn update_level_and_version(&mut self, level: u32, version: u32) {
        self.base_mut()
            .sed_namespaces_mut()
            .set_level_and_version(level, version);
        for child in self.children_mut() {
            child.update_level_and_version(level, version);
        }
    }

    /// First node below this one with identifier `id`, depth-first
    fn element_by_sid(&self, id: &str) -> Option<&dyn SedBase> {
        for child in self.children() {
            if child.id() == Some(id) {
                return Some(child);
            }
            if let Some(found) = child.element_by_sid(id) {
                return Some(found);
            }
        }
        None
    }

    /// Every node below this one, depth-first in document order
    fn all_elements(&self) -> Vec<&dyn SedBase> {
        let mut out = Vec::new();
        for child in self.children() {
            out.push(child);
            out.extend(child.all_elements());
        }
        out
    }
}

/// Accept the attributes every node kind reads
pub fn add_core_expected_attributes(expected: &mut ExpectedAttributes) {
    expected.add("id");
    expected.add("name");
    expected.add("metaid");
}

/// Set an identifier-reference field, validating SId syntax
pub(crate) fn set_sid_ref(field: &mut Option<String>, value: &str) -> OperationResult {
    if value.is_empty() {
        *field = None;
        return Ok(());
    }
    if !syntax::is_valid_sid(value) {
        return Err(OperationError::InvalidAttributeValue);
    }
    *field = Some(value.to_string());
    Ok(())
}

/// Rewrite `field` when it references `old_id`
pub(crate) fn rename_ref(field: &mut Option<String>, old_id: &str, new_id: &str) {
    if field.as_deref() == Some(old_id) {
        // a rejected new id leaves the old reference in place
        let _ = set_sid_ref(field, new_id);
    }
}

/// Parse `xml` as element `name`; an empty string yields `None`
pub(crate) fn parse_fragment(name: &str, xml: &str) -> Result<Option<XmlFragment>, OperationError> {
    if xml.trim().is_empty() {
        return Ok(None);
    }
    XmlFragment::parse_as(name, xml)
        .map(Some)
        .ok_or(OperationError::InvalidXmlOperation)
}

/// Set a free-text field; an empty string unsets it
pub(crate) fn set_text(field: &mut Option<String>, value: &str) -> OperationResult {
    *field = (!value.is_empty()).then(|| value.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_id_rules() {
        let mut base = NodeBase::new(1, 3);
        assert_eq!(base.set_id("m1"), Ok(()));
        assert_eq!(base.id(), Some("m1"));
        assert_eq!(base.set_id("1m"), Err(OperationError::InvalidAttributeValue));
        assert_eq!(base.id(), Some("m1"));
        assert_eq!(base.set_id(""), Ok(()));
        assert_eq!(base.id(), None);
    }

    #[test]
    fn test_clone_is_detached_and_equal() {
        let mut base = NodeBase::new(1, 3);
        base.set_id("x").unwrap();
        base.set_position(3, 4);
        base.make_document_root();

        let copy = base.clone();
        assert_eq!(copy, base);
        assert!(!copy.is_in_document());
        assert_eq!(copy.line(), 3);
    }

    #[test]
    fn test_equality_ignores_position() {
        let mut a = NodeBase::new(1, 3);
        let mut b = NodeBase::new(1, 3);
        a.set_position(1, 1);
        b.set_position(9, 9);
        assert_eq!(a, b);
        b.set_name("n").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unknown_attributes_are_logged() {
        let mut base = NodeBase::new(1, 3);
        let mut attrs = XmlAttributes::new();
        attrs.add("id", "a");
        attrs.add("colour", "red");
        attrs.add_with_prefix("foo", "x", "ignored");
        let mut expected = ExpectedAttributes::new();
        expected.add("id");
        let mut log = ErrorLog::new();

        base.read_core_attributes("model", &attrs, &expected, &mut log);
        assert_eq!(base.id(), Some("a"));
        assert_eq!(log.num_errors(), 1);
        assert!(log.contains(SedErrorCode::UnknownCoreAttribute));
    }

    #[derive(Debug)]
    struct Holder {
        base: NodeBase,
        reference: Option<String>,
        inner: Vec<Holder>,
    }

    impl Holder {
        fn new(reference: &str, inner: Vec<Holder>) -> Self {
            Self {
                base: NodeBase::new(1, 3),
                reference: Some(reference.to_string()),
                inner,
            }
        }
    }

    impl SedBase for Holder {
        fn base(&self) -> &NodeBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut NodeBase {
            &mut self.base
        }

        fn type_code(&self) -> TypeCode {
            TypeCode::Task
        }

        fn element_name(&self) -> &'static str {
            "holder"
        }

        fn children(&self) -> Vec<&dyn SedBase> {
            self.inner.iter().map(|h| h as &dyn SedBase).collect()
        }

        fn children_mut(&mut self) -> Vec<&mut dyn SedBase> {
            self.inner.iter_mut().map(|h| h as &mut dyn SedBase).collect()
        }

        fn rename_own_sid_refs(&mut self, old_id: &str, new_id: &str) {
            rename_ref(&mut self.reference, old_id, new_id);
        }
    }

    #[test]
    fn test_rename_reaches_children_of_referencing_kind() {
        let mut outer = Holder::new("a", vec![Holder::new("a", vec![Holder::new("a", vec![])])]);
        outer.rename_sid_refs("a", "b");
        assert_eq!(outer.reference.as_deref(), Some("b"));
        assert_eq!(outer.inner[0].reference.as_deref(), Some("b"));
        assert_eq!(outer.inner[0].inner[0].reference.as_deref(), Some("b"));
    }

    #[test]
    fn test_notes_and_annotation_accessors() {
        let mut holder = Holder::new("a", vec![]);
        assert!(!holder.is_set_notes());

        holder.set_notes("<p xmlns=\"http://www.w3.org/1999/xhtml\">text</p>").unwrap();
        assert_eq!(
            holder.notes().map(|n| n.as_str()),
            Some("<notes><p xmlns=\"http://www.w3.org/1999/xhtml\">text</p></notes>")
        );
        assert_eq!(holder.set_notes("<p>"), Err(OperationError::InvalidXmlOperation));
        assert!(holder.is_set_notes());

        holder.set_annotation("<annotation><x xmlns=\"urn:x\"/></annotation>").unwrap();
        assert_eq!(holder.annotation().map(|a| a.name()), Some("annotation"));

        let copy = NodeBase::clone(holder.base());
        assert_eq!(&copy, holder.base());

        holder.unset_notes().unwrap();
        holder.set_annotation("").unwrap();
        assert!(!holder.is_set_notes());
        assert!(!holder.is_set_annotation());
        assert_ne!(&copy, holder.base());
    }

    #[test]
    fn test_rename_ref_validates() {
        let mut field = Some("old".to_string());
        rename_ref(&mut field, "old", "new");
        assert_eq!(field.as_deref(), Some("new"));
        rename_ref(&mut field, "new", "not valid");
        assert_eq!(field.as_deref(), Some("new"));
        rename_ref(&mut field, "other", "x");
        assert_eq!(field.as_deref(), Some("new"));
    }
}
