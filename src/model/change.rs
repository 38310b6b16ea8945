use crate::diagnostics::{ErrorLog, SedErrorCode};
use crate::error::OperationResult;
use crate::namespaces::SedNamespaces;
use crate::node::{ListItem, NodeBase, SedBase, add_core_expected_attributes, set_text};
use crate::type_codes::TypeCode;
use crate::xml::XmlAttributes;
use crate::xml::attributes::{AttributeDescriptor, AttributeKind, ExpectedAttributes};

const TARGET: AttributeDescriptor = AttributeDescriptor::new("target", AttributeKind::String)
    .required(SedErrorCode::ChangeAllowedAttributes);
const NEW_VALUE: AttributeDescriptor = AttributeDescriptor::new("newValue", AttributeKind::String)
    .required(SedErrorCode::ChangeAttributeAllowedAttributes);

/// A modification applied to a model before simulation
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// `changeAttribute`
    Attribute(ChangeAttribute),
    /// `removeXML`
    RemoveXml(RemoveXml),
}

delegate_to_variant!(Change { Attribute, RemoveXml });

impl Change {
    /// XPath of the modified element
    pub fn target(&self) -> Option<&str> {
        match self {
            Change::Attribute(c) => c.target(),
            Change::RemoveXml(c) => c.target(),
        }
    }

    /// Set the target; empty unsets
    pub fn set_target(&mut self, target: &str) -> OperationResult {
        match self {
            Change::Attribute(c) => c.set_target(target),
            Change::RemoveXml(c) => c.set_target(target),
        }
    }

    /// The `changeAttribute` variant, if this is one
    pub fn as_change_attribute(&self) -> Option<&ChangeAttribute> {
        match self {
            Change::Attribute(c) => Some(c),
            _ => None,
        }
    }

    /// Mutable `changeAttribute` variant, if this is one
    pub fn as_change_attribute_mut(&mut self) -> Option<&mut ChangeAttribute> {
        match self {
            Change::Attribute(c) => Some(c),
            _ => None,
        }
    }

    /// The `removeXML` variant, if this is one
    pub fn as_remove_xml(&self) -> Option<&RemoveXml> {
        match self {
            Change::RemoveXml(c) => Some(c),
            _ => None,
        }
    }
}

impl From<ChangeAttribute> for Change {
    fn from(c: ChangeAttribute) -> Self {
        Change::Attribute(c)
    }
}

impl From<RemoveXml> for Change {
    fn from(c: RemoveXml) -> Self {
        Change::RemoveXml(c)
    }
}

impl ListItem for Change {
    const ITEM_TYPE: TypeCode = TypeCode::Change;
    const LIST_ELEMENT: &'static str = "listOfChanges";
    const LIST_ATTRIBUTES_CODE: SedErrorCode = SedErrorCode::ModelLoChangesAllowedCoreAttributes;

    fn create_for_element(name: &str, namespaces: &SedNamespaces) -> Option<Self> {
        let (level, version) = (namespaces.level(), namespaces.version());
        match name {
            "changeAttribute" => Some(Change::Attribute(ChangeAttribute::new(level, version))),
            "removeXML" => Some(Change::RemoveXml(RemoveXml::new(level, version))),
            _ => None,
        }
    }
}

/// Sets an attribute of the targeted model element to a new value
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeAttribute {
    base: NodeBase,
    target: Option<String>,
    new_value: Option<String>,
}

impl ChangeAttribute {
    /// Create an empty change at (level, version)
    pub fn new(level: u32, version: u32) -> Self {
        Self {
            base: NodeBase::new(level, version),
            target: None,
            new_value: None,
        }
    }

    /// XPath of the modified attribute
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Set the target; empty unsets
    pub fn set_target(&mut self, target: &str) -> OperationResult {
        set_text(&mut self.target, target)
    }

    /// Whether the target is set
    pub fn is_set_target(&self) -> bool {
        self.target.is_some()
    }

    /// Unset the target
    pub fn unset_target(&mut self) -> OperationResult {
        self.target = None;
        Ok(())
    }

    /// Replacement value
    pub fn new_value(&self) -> Option<&str> {
        self.new_value.as_deref()
    }

    /// Set the replacement value; empty unsets
    pub fn set_new_value(&mut self, value: &str) -> OperationResult {
        set_text(&mut self.new_value, value)
    }

    /// Whether the replacement value is set
    pub fn is_set_new_value(&self) -> bool {
        self.new_value.is_some()
    }

    /// Unset the replacement value
    pub fn unset_new_value(&mut self) -> OperationResult {
        self.new_value = None;
        Ok(())
    }
}

impl SedBase for ChangeAttribute {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn type_code(&self) -> TypeCode {
        TypeCode::ChangeAttribute
    }

    fn element_name(&self) -> &'static str {
        "changeAttribute"
    }

    fn has_required_attributes(&self) -> bool {
        self.is_set_target() && self.is_set_new_value()
    }

    fn add_expected_attributes(&self, expected: &mut ExpectedAttributes) {
        add_core_expected_attributes(expected);
        expected.add("target");
        expected.add("newValue");
    }

    fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        log: &mut ErrorLog,
    ) {
        self.base.read_element_core(
            "changeAttribute",
            attributes,
            expected,
            log,
            SedErrorCode::ChangeAttributeAllowedAttributes,
            false,
        );
        let mut cx = self.base.read_context("changeAttribute", attributes, log);
        self.target = TARGET.read_string(&mut cx);
        self.new_value = NEW_VALUE.read_string(&mut cx);
    }

    fn write_attributes(&self, out: &mut XmlAttributes) {
        self.base.write_core_attributes(out);
        TARGET.write_str(self.target(), out);
        NEW_VALUE.write_str(self.new_value(), out);
    }
}

/// Removes the targeted element from the model
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveXml {
    base: NodeBase,
    target: Option<String>,
}

impl RemoveXml {
    /// Create an empty removal at (level, version)
    pub fn new(level: u32, version: u32) -> Self {
        Self {
            base: NodeBase::new(level, version),
            target: None,
        }
    }

    /// XPath of the removed element
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Set the target; empty unsets
    pub fn set_target(&mut self, target: &str) -> OperationResult {
        set_text(&mut self.target, target)
    }

    /// Whether the target is set
    pub fn is_set_target(&self) -> bool {
        self.target.is_some()
    }

    /// Unset the target
    pub fn unset_target(&mut self) -> OperationResult {
        self.target = None;
        Ok(())
    }
}

impl SedBase for RemoveXml {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn type_code(&self) -> TypeCode {
        TypeCode::RemoveXml
    }

    fn element_name(&self) -> &'static str {
        "removeXML"
    }

    fn has_required_attributes(&self) -> bool {
        self.is_set_target()
    }

    fn add_expected_attributes(&self, expected: &mut ExpectedAttributes) {
        add_core_expected_attributes(expected);
        expected.add("target");
    }

    fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        log: &mut ErrorLog,
    ) {
        self.base.read_element_core(
            "removeXML",
            attributes,
            expected,
            log,
            SedErrorCode::RemoveXmlAllowedCoreAttributes,
            false,
        );
        let mut cx = self.base.read_context("removeXML", attributes, log);
        self.target = TARGET.read_string(&mut cx);
    }

    fn write_attributes(&self, out: &mut XmlAttributes) {
        self.base.write_core_attributes(out);
        TARGET.write_str(self.target(), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_dispatch() {
        let ns = SedNamespaces::bare(1, 3);
        let change = Change::create_for_element("removeXML", &ns).unwrap();
        assert_eq!(change.type_code(), TypeCode::RemoveXml);
        assert_eq!(change.element_name(), "removeXML");
        assert!(change.type_code().is_a(Change::ITEM_TYPE));
        assert!(Change::create_for_element("model", &ns).is_none());
    }

    #[test]
    fn test_required_attributes() {
        let mut c = ChangeAttribute::new(1, 3);
        c.set_target("/sbml:sbml/sbml:model/@id").unwrap();
        assert!(!c.has_required_attributes());
        c.set_new_value("2.5").unwrap();
        assert!(c.has_required_attributes());

        let mut change = Change::from(RemoveXml::new(1, 3));
        assert!(!change.has_required_attributes());
        change.set_target("/sbml:sbml/sbml:model/sbml:listOfSpecies").unwrap();
        assert!(change.has_required_attributes());
    }

    #[test]
    fn test_missing_target_uses_change_code() {
        let attrs = XmlAttributes::new();
        let mut c = ChangeAttribute::new(1, 3);
        let mut expected = ExpectedAttributes::new();
        c.add_expected_attributes(&mut expected);
        let mut log = ErrorLog::new();
        c.read_attributes(&attrs, &expected, &mut log);

        assert_eq!(log.errors_with_code(SedErrorCode::ChangeAllowedAttributes).len(), 1);
        assert_eq!(
            log.errors_with_code(SedErrorCode::ChangeAttributeAllowedAttributes).len(),
            1
        );
    }
}
