use super::{Change, ChangeAttribute, RemoveXml};
use crate::diagnostics::{ErrorLog, SedErrorCode};
use crate::error::OperationResult;
use crate::namespaces::SedNamespaces;
use crate::node::{ListItem, ListOf, NodeBase, SedBase, add_core_expected_attributes, set_text};
use crate::type_codes::TypeCode;
use crate::xml::XmlAttributes;
use crate::xml::attributes::{AttributeDescriptor, AttributeKind, ExpectedAttributes};

const LANGUAGE: AttributeDescriptor = AttributeDescriptor::new("language", AttributeKind::String)
    .required_from_version(4, SedErrorCode::ModelAllowedAttributes);
const SOURCE: AttributeDescriptor = AttributeDescriptor::new("source", AttributeKind::String);

/// A model to be simulated, with the changes applied before simulation
#[derive(Debug, PartialEq)]
pub struct SedModel {
    base: NodeBase,
    language: Option<String>,
    source: Option<String>,
    changes: ListOf<Change>,
}

impl SedModel {
    /// Create an empty model at (level, version)
    pub fn new(level: u32, version: u32) -> Self {
        let mut model = Self {
            base: NodeBase::new(level, version),
            language: None,
            source: None,
            changes: ListOf::new(level, version),
        };
        model.connect_to_child();
        model
    }

    /// Encoding language URN, e.g. `urn:sedml:language:sbml`
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Set the language; empty unsets
    pub fn set_language(&mut self, language: &str) -> OperationResult {
        set_text(&mut self.language, language)
    }

    /// Whether the language is set
    pub fn is_set_language(&self) -> bool {
        self.language.is_some()
    }

    /// Unset the language
    pub fn unset_language(&mut self) -> OperationResult {
        self.language = None;
        Ok(())
    }

    /// Location of the model: a URI or the id of another model
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Set the source; empty unsets
    pub fn set_source(&mut self, source: &str) -> OperationResult {
        set_text(&mut self.source, source)
    }

    /// Whether the source is set
    pub fn is_set_source(&self) -> bool {
        self.source.is_some()
    }

    /// Unset the source
    pub fn unset_source(&mut self) -> OperationResult {
        self.source = None;
        Ok(())
    }

    /// The `listOfChanges` collection
    pub fn changes(&self) -> &ListOf<Change> {
        &self.changes
    }

    /// Mutable `listOfChanges` collection
    pub fn changes_mut(&mut self) -> &mut ListOf<Change> {
        &mut self.changes
    }

    /// Number of changes
    pub fn num_changes(&self) -> usize {
        self.changes.size()
    }

    /// Change at `index`
    pub fn change(&self, index: usize) -> Option<&Change> {
        self.changes.get(index)
    }

    /// Append a copy of `change` after checking it
    pub fn add_change(&mut self, change: &Change) -> OperationResult {
        self.changes.append(change)
    }

    /// Append a new, empty `changeAttribute` and return it
    pub fn create_change_attribute(&mut self) -> &mut Change {
        let (level, version) = (self.level(), self.version());
        self.changes
            .push_owned(Change::Attribute(ChangeAttribute::new(level, version)))
    }

    /// Append a new, empty `removeXML` and return it
    pub fn create_remove_xml(&mut self) -> &mut Change {
        let (level, version) = (self.level(), self.version());
        self.changes
            .push_owned(Change::RemoveXml(RemoveXml::new(level, version)))
    }

    /// Detach and return the change at `index`
    pub fn remove_change(&mut self, index: usize) -> Option<Change> {
        self.changes.remove(index)
    }
}

impl Clone for SedModel {
    fn clone(&self) -> Self {
        let mut copy = Self {
            base: self.base.clone(),
            language: self.language.clone(),
            source: self.source.clone(),
            changes: self.changes.clone(),
        };
        copy.connect_to_child();
        copy
    }
}

impl SedBase for SedModel {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn type_code(&self) -> TypeCode {
        TypeCode::Model
    }

    fn element_name(&self) -> &'static str {
        "model"
    }

    fn has_required_attributes(&self) -> bool {
        self.is_set_id()
            && (self.is_set_language() || !LANGUAGE.is_required(self.level(), self.version()))
    }

    fn add_expected_attributes(&self, expected: &mut ExpectedAttributes) {
        add_core_expected_attributes(expected);
        expected.add("language");
        expected.add("source");
    }

    fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        log: &mut ErrorLog,
    ) {
        self.base.read_element_core(
            "model",
            attributes,
            expected,
            log,
            SedErrorCode::ModelAllowedAttributes,
            true,
        );
        let mut cx = self.base.read_context("model", attributes, log);
        self.language = LANGUAGE.read_string(&mut cx);
        self.source = SOURCE.read_string(&mut cx);
    }

    fn write_attributes(&self, out: &mut XmlAttributes) {
        self.base.write_core_attributes(out);
        LANGUAGE.write_str(self.language(), out);
        SOURCE.write_str(self.source(), out);
    }

    fn create_object(&mut self, name: &str, _log: &mut ErrorLog) -> Option<&mut dyn SedBase> {
        match name {
            "listOfChanges" => Some(&mut self.changes as &mut dyn SedBase),
            _ => None,
        }
    }

    fn children(&self) -> Vec<&dyn SedBase> {
        vec![&self.changes as &dyn SedBase]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedBase> {
        vec![&mut self.changes as &mut dyn SedBase]
    }
}

impl ListItem for SedModel {
    const ITEM_TYPE: TypeCode = TypeCode::Model;
    const LIST_ELEMENT: &'static str = "listOfModels";
    const LIST_ATTRIBUTES_CODE: SedErrorCode = SedErrorCode::DocumentLoModelsAllowedCoreAttributes;

    fn create_for_element(name: &str, namespaces: &SedNamespaces) -> Option<Self> {
        (name == "model").then(|| SedModel::new(namespaces.level(), namespaces.version()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_attributes() {
        let mut m = SedModel::new(1, 3);
        assert!(!m.has_required_attributes());
        m.set_id("m1").unwrap();
        assert!(m.has_required_attributes());

        let mut v4 = SedModel::new(1, 4);
        v4.set_id("m1").unwrap();
        assert!(!v4.has_required_attributes());
        v4.set_language("urn:sedml:language:sbml").unwrap();
        assert!(v4.has_required_attributes());
    }

    #[test]
    fn test_missing_language_depends_on_version() {
        let mut attrs = XmlAttributes::new();
        attrs.add("id", "m");
        attrs.add("source", "m.xml");

        for (version, expect_error) in [(3, false), (4, true)] {
            let mut m = SedModel::new(1, version);
            let mut expected = ExpectedAttributes::new();
            m.add_expected_attributes(&mut expected);
            let mut log = ErrorLog::new();
            m.read_attributes(&attrs, &expected, &mut log);
            assert_eq!(log.contains(SedErrorCode::ModelAllowedAttributes), expect_error);
        }
    }

    #[test]
    fn test_unknown_attribute_is_refined() {
        let mut attrs = XmlAttributes::new();
        attrs.add("id", "m");
        attrs.add("source", "m.xml");
        attrs.add("colour", "blue");
        let mut m = SedModel::new(1, 3);
        let mut expected = ExpectedAttributes::new();
        m.add_expected_attributes(&mut expected);
        let mut log = ErrorLog::new();
        m.read_attributes(&attrs, &expected, &mut log);

        assert_eq!(log.num_errors(), 1);
        assert!(log.contains(SedErrorCode::ModelAllowedAttributes));
        assert!(!log.contains(SedErrorCode::UnknownCoreAttribute));
    }

    #[test]
    fn test_clone_is_deep() {
        let mut m = SedModel::new(1, 3);
        m.set_id("m").unwrap();
        m.create_remove_xml();
        let copy = m.clone();
        assert_eq!(copy, m);
        m.remove_change(0);
        assert_eq!(copy.num_changes(), 1);
        assert_eq!(copy.change(0).map(|c| c.base().path()), Some(&[0usize, 0][..]));
    }
}
