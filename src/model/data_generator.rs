//! Data generators and the variables and parameters they combine
//!
//! The `math` child of a data generator is MathML. It is kept as an opaque
//! fragment and written back after the two lists.

use crate::diagnostics::{ErrorLog, SedErrorCode};
use crate::error::{OperationError, OperationResult};
use crate::namespaces::{MATHML_URI, SedNamespaces};
use crate::node::{
    ListItem, ListOf, NodeBase, SedBase, add_core_expected_attributes, rename_ref, set_sid_ref,
    set_text,
};
use crate::type_codes::TypeCode;
use crate::xml::{ElementNamespace, XmlAttributes, XmlFragment, XmlToken};
use crate::xml::attributes::{AttributeDescriptor, AttributeKind, ExpectedAttributes};

const TARGET: AttributeDescriptor = AttributeDescriptor::new("target", AttributeKind::String);
const SYMBOL: AttributeDescriptor = AttributeDescriptor::new("symbol", AttributeKind::String);
const TASK_REFERENCE: AttributeDescriptor =
    AttributeDescriptor::new("taskReference", AttributeKind::SIdRef)
        .invalid(SedErrorCode::VariableTaskReferenceMustBeAbstractTask);
const MODEL_REFERENCE: AttributeDescriptor =
    AttributeDescriptor::new("modelReference", AttributeKind::SIdRef)
        .invalid(SedErrorCode::VariableModelReferenceMustBeModel);
const VALUE: AttributeDescriptor = AttributeDescriptor::new("value", AttributeKind::Double)
    .required(SedErrorCode::ParameterAllowedAttributes)
    .invalid(SedErrorCode::ParameterValueMustBeDouble);

/// Post-processed output computed from simulation variables
#[derive(Debug, PartialEq)]
pub struct DataGenerator {
    base: NodeBase,
    variables: ListOf<Variable>,
    parameters: ListOf<Parameter>,
    math: Option<XmlFragment>,
}

impl DataGenerator {
    /// Create an empty data generator at (level, version)
    pub fn new(level: u32, version: u32) -> Self {
        let mut generator = Self {
            base: NodeBase::new(level, version),
            variables: ListOf::new(level, version),
            parameters: ListOf::new(level, version),
            math: None,
        };
        generator.connect_to_child();
        generator
    }

    /// The `listOfVariables` collection
    pub fn variables(&self) -> &ListOf<Variable> {
        &self.variables
    }

    /// Mutable `listOfVariables` collection
    pub fn variables_mut(&mut self) -> &mut ListOf<Variable> {
        &mut self.variables
    }

    /// Number of variables
    pub fn num_variables(&self) -> usize {
        self.variables.size()
    }

    /// Append a copy of `variable` after checking it
    pub fn add_variable(&mut self, variable: &Variable) -> OperationResult {
        self.variables.append(variable)
    }

    /// Append a new, empty variable and return it
    pub fn create_variable(&mut self) -> &mut Variable {
        let (level, version) = (self.level(), self.version());
        self.variables.push_owned(Variable::new(level, version))
    }

    /// The `listOfParameters` collection
    pub fn parameters(&self) -> &ListOf<Parameter> {
        &self.parameters
    }

    /// Mutable `listOfParameters` collection
    pub fn parameters_mut(&mut self) -> &mut ListOf<Parameter> {
        &mut self.parameters
    }

    /// Number of parameters
    pub fn num_parameters(&self) -> usize {
        self.parameters.size()
    }

    /// Append a copy of `parameter` after checking it
    pub fn add_parameter(&mut self, parameter: &Parameter) -> OperationResult {
        self.parameters.append(parameter)
    }

    /// Append a new, empty parameter and return it
    pub fn create_parameter(&mut self) -> &mut Parameter {
        let (level, version) = (self.level(), self.version());
        self.parameters.push_owned(Parameter::new(level, version))
    }

    /// The MathML `<math>` element
    pub fn math(&self) -> Option<&XmlFragment> {
        self.math.as_ref()
    }

    /// Set the formula from a `<math>` element or from MathML content
    ///
    /// Content without a `<math>` root is wrapped in one declaring the
    /// MathML namespace. An empty string unsets it.
    pub fn set_math(&mut self, xml: &str) -> OperationResult {
        if xml.trim().is_empty() {
            self.math = None;
            return Ok(());
        }
        let fragment = match XmlFragment::parse(xml) {
            Some(fragment) if fragment.name() == "math" => fragment,
            _ => XmlFragment::parse(&format!("<math xmlns=\"{MATHML_URI}\">{xml}</math>"))
                .ok_or(OperationError::InvalidXmlOperation)?,
        };
        self.math = Some(fragment);
        Ok(())
    }

    /// Whether the formula is set
    pub fn is_set_math(&self) -> bool {
        self.math.is_some()
    }

    /// Unset the formula
    pub fn unset_math(&mut self) -> OperationResult {
        self.math = None;
        Ok(())
    }
}

impl Clone for DataGenerator {
    fn clone(&self) -> Self {
        let mut copy = Self {
            base: self.base.clone(),
            variables: self.variables.clone(),
            parameters: self.parameters.clone(),
            math: self.math.clone(),
        };
        copy.connect_to_child();
        copy
    }
}

impl SedBase for DataGenerator {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn type_code(&self) -> TypeCode {
        TypeCode::DataGenerator
    }

    fn element_name(&self) -> &'static str {
        "dataGenerator"
    }

    fn has_required_attributes(&self) -> bool {
        self.is_set_id()
    }

    fn has_required_elements(&self) -> bool {
        self.math.is_some()
    }

    fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        log: &mut ErrorLog,
    ) {
        self.base.read_element_core(
            "dataGenerator",
            attributes,
            expected,
            log,
            SedErrorCode::DataGeneratorAllowedAttributes,
            true,
        );
    }

    fn accepts_other_xml(&self, token: &XmlToken) -> bool {
        token.name == "math"
    }

    fn read_other_xml(&mut self, token: &XmlToken, fragment: XmlFragment, log: &mut ErrorLog) {
        if !matches!(&token.namespace, ElementNamespace::Bound(uri) if uri == MATHML_URI) {
            log.log_error(
                SedErrorCode::DataGeneratorAllowedElements,
                "The <math> element of a <dataGenerator> must use the MathML namespace.",
                token.line,
                token.column,
            );
        }
        if self.math.is_some() {
            log.log_error(
                SedErrorCode::DataGeneratorAllowedElements,
                "A <dataGenerator> may contain only one <math> element.",
                token.line,
                token.column,
            );
        }
        self.math = Some(fragment);
    }

    fn other_xml(&self) -> Option<&XmlFragment> {
        self.math.as_ref()
    }

    fn create_object(&mut self, name: &str, _log: &mut ErrorLog) -> Option<&mut dyn SedBase> {
        match name {
            "listOfVariables" => Some(&mut self.variables as &mut dyn SedBase),
            "listOfParameters" => Some(&mut self.parameters as &mut dyn SedBase),
            _ => None,
        }
    }

    fn children(&self) -> Vec<&dyn SedBase> {
        vec![
            &self.variables as &dyn SedBase,
            &self.parameters as &dyn SedBase,
        ]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedBase> {
        vec![
            &mut self.variables as &mut dyn SedBase,
            &mut self.parameters as &mut dyn SedBase,
        ]
    }
}

impl ListItem for DataGenerator {
    const ITEM_TYPE: TypeCode = TypeCode::DataGenerator;
    const LIST_ELEMENT: &'static str = "listOfDataGenerators";
    const LIST_ATTRIBUTES_CODE: SedErrorCode =
        SedErrorCode::DocumentLoDataGeneratorsAllowedCoreAttributes;

    fn create_for_element(name: &str, namespaces: &SedNamespaces) -> Option<Self> {
        (name == "dataGenerator")
            .then(|| DataGenerator::new(namespaces.level(), namespaces.version()))
    }
}

/// A quantity taken from a task or model, by XPath target or symbol
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    base: NodeBase,
    target: Option<String>,
    symbol: Option<String>,
    task_reference: Option<String>,
    model_reference: Option<String>,
}

impl Variable {
    /// Create an empty variable at (level, version)
    pub fn new(level: u32, version: u32) -> Self {
        Self {
            base: NodeBase::new(level, version),
            target: None,
            symbol: None,
            task_reference: None,
            model_reference: None,
        }
    }

    /// XPath of the observed model element
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

    /// Implicit model symbol, e.g. `urn:sedml:symbol:time`
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    /// Set the symbol; empty unsets
    pub fn set_symbol(&mut self, symbol: &str) -> OperationResult {
        set_text(&mut self.symbol, symbol)
    }

    /// Whether the symbol is set
    pub fn is_set_symbol(&self) -> bool {
        self.symbol.is_some()
    }

    /// Id of the task the value comes from
    pub fn task_reference(&self) -> Option<&str> {
        self.task_reference.as_deref()
    }

    /// Set the task reference; empty unsets, invalid syntax is rejected
    pub fn set_task_reference(&mut self, id: &str) -> OperationResult {
        set_sid_ref(&mut self.task_reference, id)
    }

    /// Whether the task reference is set
    pub fn is_set_task_reference(&self) -> bool {
        self.task_reference.is_some()
    }

    /// Id of the model the value comes from
    pub fn model_reference(&self) -> Option<&str> {
        self.model_reference.as_deref()
    }

    /// Set the model reference; empty unsets, invalid syntax is rejected
    pub fn set_model_reference(&mut self, id: &str) -> OperationResult {
        set_sid_ref(&mut self.model_reference, id)
    }

    /// Whether the model reference is set
    pub fn is_set_model_reference(&self) -> bool {
        self.model_reference.is_some()
    }
}

impl SedBase for Variable {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn type_code(&self) -> TypeCode {
        TypeCode::Variable
    }

    fn element_name(&self) -> &'static str {
        "variable"
    }

    fn has_required_attributes(&self) -> bool {
        self.is_set_id()
    }

    fn add_expected_attributes(&self, expected: &mut ExpectedAttributes) {
        add_core_expected_attributes(expected);
        expected.add("target");
        expected.add("symbol");
        expected.add("taskReference");
        expected.add("modelReference");
    }

    fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        log: &mut ErrorLog,
    ) {
        self.base.read_element_core(
            "variable",
            attributes,
            expected,
            log,
            SedErrorCode::VariableAllowedAttributes,
            true,
        );
        let mut cx = self.base.read_context("variable", attributes, log);
        self.target = TARGET.read_string(&mut cx);
        self.symbol = SYMBOL.read_string(&mut cx);
        self.task_reference = TASK_REFERENCE.read_string(&mut cx);
        self.model_reference = MODEL_REFERENCE.read_string(&mut cx);
    }

    fn write_attributes(&self, out: &mut XmlAttributes) {
        self.base.write_core_attributes(out);
        TARGET.write_str(self.target(), out);
        SYMBOL.write_str(self.symbol(), out);
        TASK_REFERENCE.write_str(self.task_reference(), out);
        MODEL_REFERENCE.write_str(self.model_reference(), out);
    }

    fn rename_own_sid_refs(&mut self, old_id: &str, new_id: &str) {
        rename_ref(&mut self.task_reference, old_id, new_id);
        rename_ref(&mut self.model_reference, old_id, new_id);
    }
}

impl ListItem for Variable {
    const ITEM_TYPE: TypeCode = TypeCode::Variable;
    const LIST_ELEMENT: &'static str = "listOfVariables";
    const LIST_ATTRIBUTES_CODE: SedErrorCode =
        SedErrorCode::DataGeneratorLoVariablesAllowedCoreAttributes;

    fn create_for_element(name: &str, namespaces: &SedNamespaces) -> Option<Self> {
        (name == "variable").then(|| Variable::new(namespaces.level(), namespaces.version()))
    }
}

/// Named constant used in a data generator's math
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    base: NodeBase,
    value: Option<f64>,
}

impl Parameter {
    /// Create an empty parameter at (level, version)
    pub fn new(level: u32, version: u32) -> Self {
        Self {
            base: NodeBase::new(level, version),
            value: None,
        }
    }

    /// Value
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Set the value
    pub fn set_value(&mut self, value: f64) -> OperationResult {
        self.value = Some(value);
        Ok(())
    }

    /// Whether the value is set
    pub fn is_set_value(&self) -> bool {
        self.value.is_some()
    }

    /// Unset the value
    pub fn unset_value(&mut self) -> OperationResult {
        self.value = None;
        Ok(())
    }
}

impl SedBase for Parameter {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn type_code(&self) -> TypeCode {
        TypeCode::Parameter
    }

    fn element_name(&self) -> &'static str {
        "parameter"
    }

    fn has_required_attributes(&self) -> bool {
        self.is_set_id() && self.is_set_value()
    }

    fn add_expected_attributes(&self, expected: &mut ExpectedAttributes) {
        add_core_expected_attributes(expected);
        expected.add("value");
    }

    fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        log: &mut ErrorLog,
    ) {
        self.base.read_element_core(
            "parameter",
            attributes,
            expected,
            log,
            SedErrorCode::ParameterAllowedAttributes,
            true,
        );
        let mut cx = self.base.read_context("parameter", attributes, log);
        self.value = VALUE.read(&mut cx);
    }

    fn write_attributes(&self, out: &mut XmlAttributes) {
        self.base.write_core_attributes(out);
        VALUE.write(self.value.as_ref(), out);
    }
}

impl ListItem for Parameter {
    const ITEM_TYPE: TypeCode = TypeCode::Parameter;
    const LIST_ELEMENT: &'static str = "listOfParameters";
    const LIST_ATTRIBUTES_CODE: SedErrorCode =
        SedErrorCode::DataGeneratorLoParametersAllowedCoreAttributes;

    fn create_for_element(name: &str, namespaces: &SedNamespaces) -> Option<Self> {
        (name == "parameter").then(|| Parameter::new(namespaces.level(), namespaces.version()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_are_linked_in_order() {
        let mut dg = DataGenerator::new(1, 3);
        dg.set_id("dg").unwrap();
        dg.create_variable().set_id("v").unwrap();
        dg.create_parameter().set_id("p").unwrap();

        assert_eq!(dg.children().len(), 2);
        let v = dg.variables().get(0).unwrap();
        assert_eq!(v.base().path(), &[0, 0]);
        let p = dg.parameters().get(0).unwrap();
        assert_eq!(p.base().path(), &[1, 0]);
        assert_eq!(dg.element_by_sid("p").map(|n| n.type_code()), Some(TypeCode::Parameter));
    }

    #[test]
    fn test_math_is_the_required_element() {
        let mut dg = DataGenerator::new(1, 3);
        assert!(!dg.has_required_elements());

        dg.set_math("<ci>v</ci>").unwrap();
        assert!(dg.has_required_elements());
        assert_eq!(
            dg.math().map(|m| m.as_str()),
            Some("<math xmlns=\"http://www.w3.org/1998/Math/MathML\"><ci>v</ci></math>")
        );

        let copy = dg.clone();
        assert_eq!(copy.math(), dg.math());

        assert_eq!(dg.set_math("<apply>"), Err(OperationError::InvalidXmlOperation));
        assert!(dg.is_set_math());
        dg.unset_math().unwrap();
        assert!(!dg.is_set_math());
        assert_ne!(copy, dg);
    }

    #[test]
    fn test_parameter_gate() {
        let mut p = Parameter::new(1, 3);
        p.set_id("k").unwrap();
        assert!(!p.has_required_attributes());
        p.set_value(0.5).unwrap();
        assert!(p.has_required_attributes());
    }

    #[test]
    fn test_variable_rename() {
        let mut dg = DataGenerator::new(1, 3);
        let v = dg.create_variable();
        v.set_id("time").unwrap();
        v.set_task_reference("task1").unwrap();
        v.set_model_reference("model1").unwrap();
        v.set_symbol("urn:sedml:symbol:time").unwrap();

        dg.rename_sid_refs("task1", "task2");
        let v = dg.variables().get(0).unwrap();
        assert_eq!(v.task_reference(), Some("task2"));
        assert_eq!(v.model_reference(), Some("model1"));
    }

    #[test]
    fn test_parameter_value_must_be_double() {
        let mut attrs = XmlAttributes::new();
        attrs.add("id", "p");
        attrs.add("value", "fast");
        let mut p = Parameter::new(1, 3);
        let mut expected = ExpectedAttributes::new();
        p.add_expected_attributes(&mut expected);
        let mut log = ErrorLog::new();
        p.read_attributes(&attrs, &expected, &mut log);
        assert_eq!(log.num_errors(), 1);
        assert!(log.contains(SedErrorCode::ParameterValueMustBeDouble));
    }
}
