use crate::diagnostics::{ErrorLog, SedErrorCode};
use crate::error::OperationResult;
use crate::namespaces::SedNamespaces;
use crate::node::{
    ListItem, NodeBase, SedBase, add_core_expected_attributes, rename_ref, set_sid_ref,
};
use crate::type_codes::TypeCode;
use crate::xml::XmlAttributes;
use crate::xml::attributes::{AttributeDescriptor, AttributeKind, ExpectedAttributes};

const MODEL_REFERENCE: AttributeDescriptor =
    AttributeDescriptor::new("modelReference", AttributeKind::SIdRef)
        .invalid(SedErrorCode::TaskModelReferenceMustBeModel);
const SIMULATION_REFERENCE: AttributeDescriptor =
    AttributeDescriptor::new("simulationReference", AttributeKind::SIdRef)
        .invalid(SedErrorCode::TaskSimulationReferenceMustBeSimulation);

/// Runs one simulation on one model
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    base: NodeBase,
    model_reference: Option<String>,
    simulation_reference: Option<String>,
}

impl Task {
    /// Create an empty task at (level, version)
    pub fn new(level: u32, version: u32) -> Self {
        Self {
            base: NodeBase::new(level, version),
            model_reference: None,
            simulation_reference: None,
        }
    }

    /// Id of the model to simulate
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

    /// Unset the model reference
    pub fn unset_model_reference(&mut self) -> OperationResult {
        self.model_reference = None;
        Ok(())
    }

    /// Id of the simulation to run
    pub fn simulation_reference(&self) -> Option<&str> {
        self.simulation_reference.as_deref()
    }

    /// Set the simulation reference; empty unsets, invalid syntax is rejected
    pub fn set_simulation_reference(&mut self, id: &str) -> OperationResult {
        set_sid_ref(&mut self.simulation_reference, id)
    }

    /// Whether the simulation reference is set
    pub fn is_set_simulation_reference(&self) -> bool {
        self.simulation_reference.is_some()
    }

    /// Unset the simulation reference
    pub fn unset_simulation_reference(&mut self) -> OperationResult {
        self.simulation_reference = None;
        Ok(())
    }
}

impl SedBase for Task {
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
        "task"
    }

    fn has_required_attributes(&self) -> bool {
        self.is_set_id()
    }

    fn add_expected_attributes(&self, expected: &mut ExpectedAttributes) {
        add_core_expected_attributes(expected);
        expected.add("modelReference");
        expected.add("simulationReference");
    }

    fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        log: &mut ErrorLog,
    ) {
        self.base.read_element_core(
            "task",
            attributes,
            expected,
            log,
            SedErrorCode::TaskAllowedAttributes,
            true,
        );
        let mut cx = self.base.read_context("task", attributes, log);
        self.model_reference = MODEL_REFERENCE.read_string(&mut cx);
        self.simulation_reference = SIMULATION_REFERENCE.read_string(&mut cx);
    }

    fn write_attributes(&self, out: &mut XmlAttributes) {
        self.base.write_core_attributes(out);
        MODEL_REFERENCE.write_str(self.model_reference(), out);
        SIMULATION_REFERENCE.write_str(self.simulation_reference(), out);
    }

    fn rename_own_sid_refs(&mut self, old_id: &str, new_id: &str) {
        rename_ref(&mut self.model_reference, old_id, new_id);
        rename_ref(&mut self.simulation_reference, old_id, new_id);
    }
}

impl ListItem for Task {
    const ITEM_TYPE: TypeCode = TypeCode::AbstractTask;
    const LIST_ELEMENT: &'static str = "listOfTasks";
    const LIST_ATTRIBUTES_CODE: SedErrorCode = SedErrorCode::DocumentLoTasksAllowedCoreAttributes;

    fn create_for_element(name: &str, namespaces: &SedNamespaces) -> Option<Self> {
        (name == "task").then(|| Task::new(namespaces.level(), namespaces.version()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OperationError;

    #[test]
    fn test_reference_setters_validate() {
        let mut t = Task::new(1, 3);
        assert_eq!(t.set_model_reference("model1"), Ok(()));
        assert_eq!(
            t.set_simulation_reference("sim 1"),
            Err(OperationError::InvalidAttributeValue)
        );
        assert!(!t.is_set_simulation_reference());
    }

    #[test]
    fn test_rename_touches_only_matching_references() {
        let mut t = Task::new(1, 3);
        t.set_id("task1").unwrap();
        t.set_model_reference("m").unwrap();
        t.set_simulation_reference("s").unwrap();
        t.rename_sid_refs("m", "m2");
        assert_eq!(t.model_reference(), Some("m2"));
        assert_eq!(t.simulation_reference(), Some("s"));
        assert_eq!(t.id(), Some("task1"));
    }

    #[test]
    fn test_bad_reference_syntax_is_reported_and_kept() {
        let mut attrs = XmlAttributes::new();
        attrs.add("id", "t");
        attrs.add("modelReference", "9lives");
        let mut t = Task::new(1, 3);
        let mut expected = ExpectedAttributes::new();
        t.add_expected_attributes(&mut expected);
        let mut log = ErrorLog::new();
        t.read_attributes(&attrs, &expected, &mut log);

        assert!(log.contains(SedErrorCode::TaskModelReferenceMustBeModel));
        assert_eq!(t.model_reference(), Some("9lives"));
    }
}
