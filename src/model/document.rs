//! The `sedML` root element
//!
//! A [`SedDocument`] owns every node of the tree and the [`ErrorLog`] filled
//! while reading it. Nodes carry only index paths back to the document, so
//! upward navigation goes through [`SedDocument::node_at`] and
//! [`SedDocument::parent_of`].

use super::{DataGenerator, Output, SedModel, Simulation, Task};
use crate::diagnostics::{ErrorLog, SedErrorCode};
use crate::error::OperationResult;
use crate::namespaces::{self, DEFAULT_LEVEL, DEFAULT_VERSION, SedNamespaces};
use crate::node::{ListOf, NodeBase, SedBase, add_core_expected_attributes};
use crate::type_codes::TypeCode;
use crate::xml::{XmlAttributes, XmlNamespaces};
use crate::xml::attributes::{AttributeDescriptor, AttributeKind, ExpectedAttributes};
use std::fmt;

const LEVEL: AttributeDescriptor = AttributeDescriptor::new("level", AttributeKind::Integer)
    .required(SedErrorCode::DocumentAllowedAttributes)
    .invalid(SedErrorCode::DocumentLevelMustBeNonNegativeInteger);
const VERSION: AttributeDescriptor = AttributeDescriptor::new("version", AttributeKind::Integer)
    .required(SedErrorCode::DocumentAllowedAttributes)
    .invalid(SedErrorCode::DocumentVersionMustBeNonNegativeInteger);

/// Root of a simulation experiment description
pub struct SedDocument {
    base: NodeBase,
    models: ListOf<SedModel>,
    simulations: ListOf<Simulation>,
    tasks: ListOf<Task>,
    data_generators: ListOf<DataGenerator>,
    outputs: ListOf<Output>,
    error_log: ErrorLog,
}

impl SedDocument {
    /// Create an empty document at (level, version)
    pub fn new(level: u32, version: u32) -> Self {
        let mut base = NodeBase::with_namespaces(SedNamespaces::new(level, version));
        base.make_document_root();
        let mut doc = Self {
            base,
            models: ListOf::new(level, version),
            simulations: ListOf::new(level, version),
            tasks: ListOf::new(level, version),
            data_generators: ListOf::new(level, version),
            outputs: ListOf::new(level, version),
            error_log: ErrorLog::new(),
        };
        doc.connect_to_child();
        doc
    }

    /// Namespace declarations of the root element
    pub fn namespaces(&self) -> &XmlNamespaces {
        self.base.sed_namespaces().namespaces()
    }

    /// Mutable namespace declarations of the root element
    pub fn namespaces_mut(&mut self) -> &mut XmlNamespaces {
        self.base.sed_namespaces_mut().namespaces_mut()
    }

    /// Move the whole tree to (level, version)
    ///
    /// A default namespace recognized as SED-ML is replaced by the canonical
    /// URI of the new version; foreign declarations are kept.
    pub fn set_level_and_version(&mut self, level: u32, version: u32) -> OperationResult {
        let default_is_sed = self
            .namespaces()
            .uri("")
            .is_none_or(namespaces::is_sed_namespace);
        if default_is_sed {
            self.namespaces_mut()
                .add(namespaces::sed_namespace_uri(level, version), "");
        }
        self.update_level_and_version(level, version);
        Ok(())
    }

    /// Diagnostics collected while reading
    pub fn error_log(&self) -> &ErrorLog {
        &self.error_log
    }

    /// Mutable diagnostics
    pub fn error_log_mut(&mut self) -> &mut ErrorLog {
        &mut self.error_log
    }

    /// Number of diagnostics
    pub fn num_errors(&self) -> usize {
        self.error_log.num_errors()
    }

    /// The `listOfModels` collection
    pub fn models(&self) -> &ListOf<SedModel> {
        &self.models
    }

    /// Mutable `listOfModels` collection
    pub fn models_mut(&mut self) -> &mut ListOf<SedModel> {
        &mut self.models
    }

    /// Number of models
    pub fn num_models(&self) -> usize {
        self.models.size()
    }

    /// Model at `index`
    pub fn model(&self, index: usize) -> Option<&SedModel> {
        self.models.get(index)
    }

    /// Append a copy of `model` after checking it
    pub fn add_model(&mut self, model: &SedModel) -> OperationResult {
        self.models.append(model)
    }

    /// Append a new, empty model and return it
    pub fn create_model(&mut self) -> &mut SedModel {
        let (level, version) = (self.level(), self.version());
        self.models.push_owned(SedModel::new(level, version))
    }

    /// The `listOfSimulations` collection
    pub fn simulations(&self) -> &ListOf<Simulation> {
        &self.simulations
    }

    /// Mutable `listOfSimulations` collection
    pub fn simulations_mut(&mut self) -> &mut ListOf<Simulation> {
        &mut self.simulations
    }

    /// Number of simulations
    pub fn num_simulations(&self) -> usize {
        self.simulations.size()
    }

    /// Simulation at `index`
    pub fn simulation(&self, index: usize) -> Option<&Simulation> {
        self.simulations.get(index)
    }

    /// Append a copy of `simulation` after checking it
    pub fn add_simulation(&mut self, simulation: &Simulation) -> OperationResult {
        self.simulations.append(simulation)
    }

    /// Append a new, empty `uniformTimeCourse` and return it
    pub fn create_uniform_time_course(&mut self) -> &mut Simulation {
        let (level, version) = (self.level(), self.version());
        self.simulations
            .push_owned(super::UniformTimeCourse::new(level, version).into())
    }

    /// Append a new, empty `oneStep` and return it
    pub fn create_one_step(&mut self) -> &mut Simulation {
        let (level, version) = (self.level(), self.version());
        self.simulations
            .push_owned(super::OneStep::new(level, version).into())
    }

    /// Append a new, empty `steadyState` and return it
    pub fn create_steady_state(&mut self) -> &mut Simulation {
        let (level, version) = (self.level(), self.version());
        self.simulations
            .push_owned(super::SteadyState::new(level, version).into())
    }

    /// The `listOfTasks` collection
    pub fn tasks(&self) -> &ListOf<Task> {
        &self.tasks
    }

    /// Mutable `listOfTasks` collection
    pub fn tasks_mut(&mut self) -> &mut ListOf<Task> {
        &mut self.tasks
    }

    /// Number of tasks
    pub fn num_tasks(&self) -> usize {
        self.tasks.size()
    }

    /// Task at `index`
    pub fn task(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Append a copy of `task` after checking it
    pub fn add_task(&mut self, task: &Task) -> OperationResult {
        self.tasks.append(task)
    }

    /// Append a new, empty task and return it
    pub fn create_task(&mut self) -> &mut Task {
        let (level, version) = (self.level(), self.version());
        self.tasks.push_owned(Task::new(level, version))
    }

    /// The `listOfDataGenerators` collection
    pub fn data_generators(&self) -> &ListOf<DataGenerator> {
        &self.data_generators
    }

    /// Mutable `listOfDataGenerators` collection
    pub fn data_generators_mut(&mut self) -> &mut ListOf<DataGenerator> {
        &mut self.data_generators
    }

    /// Number of data generators
    pub fn num_data_generators(&self) -> usize {
        self.data_generators.size()
    }

    /// Data generator at `index`
    pub fn data_generator(&self, index: usize) -> Option<&DataGenerator> {
        self.data_generators.get(index)
    }

    /// Append a copy of `generator` after checking it
    pub fn add_data_generator(&mut self, generator: &DataGenerator) -> OperationResult {
        self.data_generators.append(generator)
    }

    /// Append a new, empty data generator and return it
    pub fn create_data_generator(&mut self) -> &mut DataGenerator {
        let (level, version) = (self.level(), self.version());
        self.data_generators
            .push_owned(DataGenerator::new(level, version))
    }

    /// The `listOfOutputs` collection
    pub fn outputs(&self) -> &ListOf<Output> {
        &self.outputs
    }

    /// Mutable `listOfOutputs` collection
    pub fn outputs_mut(&mut self) -> &mut ListOf<Output> {
        &mut self.outputs
    }

    /// Number of outputs
    pub fn num_outputs(&self) -> usize {
        self.outputs.size()
    }

    /// Output at `index`
    pub fn output(&self, index: usize) -> Option<&Output> {
        self.outputs.get(index)
    }

    /// Append a copy of `output` after checking it
    pub fn add_output(&mut self, output: &Output) -> OperationResult {
        self.outputs.append(output)
    }

    /// Append a new, empty `report` and return it
    pub fn create_report(&mut self) -> &mut Output {
        let (level, version) = (self.level(), self.version());
        self.outputs
            .push_owned(super::Report::new(level, version).into())
    }

    /// Append a new, empty `plot2D` and return it
    pub fn create_plot2d(&mut self) -> &mut Output {
        let (level, version) = (self.level(), self.version());
        self.outputs
            .push_owned(super::Plot2D::new(level, version).into())
    }

    /// Node at index `path` from the root; the empty path is the document
    pub fn node_at(&self, path: &[usize]) -> Option<&dyn SedBase> {
        let mut node: &dyn SedBase = self;
        for &index in path {
            node = node.children().get(index).copied()?;
        }
        Some(node)
    }

    /// Parent of `node`, if it belongs to this document's tree
    pub fn parent_of(&self, node: &dyn SedBase) -> Option<&dyn SedBase> {
        if !node.base().is_in_document() {
            return None;
        }
        let (_, parent_path) = node.base().path().split_last()?;
        self.node_at(parent_path)
    }

    /// Replace the error log
    pub(crate) fn set_error_log(&mut self, log: ErrorLog) {
        self.error_log = log;
    }
}

impl Default for SedDocument {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL, DEFAULT_VERSION)
    }
}

impl Clone for SedDocument {
    fn clone(&self) -> Self {
        let mut base = self.base.clone();
        base.make_document_root();
        let mut copy = Self {
            base,
            models: self.models.clone(),
            simulations: self.simulations.clone(),
            tasks: self.tasks.clone(),
            data_generators: self.data_generators.clone(),
            outputs: self.outputs.clone(),
            error_log: self.error_log.clone(),
        };
        copy.connect_to_child();
        copy
    }
}

impl PartialEq for SedDocument {
    /// Compares the trees; the error logs are ignored
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
            && self.models == other.models
            && self.simulations == other.simulations
            && self.tasks == other.tasks
            && self.data_generators == other.data_generators
            && self.outputs == other.outputs
    }
}

impl fmt::Debug for SedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SedDocument")
            .field("level", &self.level())
            .field("version", &self.version())
            .field("models", &self.models)
            .field("simulations", &self.simulations)
            .field("tasks", &self.tasks)
            .field("data_generators", &self.data_generators)
            .field("outputs", &self.outputs)
            .field("errors", &self.error_log.num_errors())
            .finish()
    }
}

impl SedBase for SedDocument {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn type_code(&self) -> TypeCode {
        TypeCode::Document
    }

    fn element_name(&self) -> &'static str {
        "sedML"
    }

    fn add_expected_attributes(&self, expected: &mut ExpectedAttributes) {
        add_core_expected_attributes(expected);
        expected.add("level");
        expected.add("version");
    }

    fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        log: &mut ErrorLog,
    ) {
        self.base.read_element_core(
            "sedML",
            attributes,
            expected,
            log,
            SedErrorCode::DocumentAllowedAttributes,
            false,
        );
        let mut cx = self.base.read_context("sedML", attributes, log);
        let level = LEVEL.read::<u32>(&mut cx);
        let version = VERSION.read::<u32>(&mut cx);
        if let (Some(level), Some(version)) = (level, version) {
            self.update_level_and_version(level, version);
        }
    }

    fn write_attributes(&self, out: &mut XmlAttributes) {
        self.base.write_core_attributes(out);
        LEVEL.write(Some(&self.level()), out);
        VERSION.write(Some(&self.version()), out);
    }

    fn create_object(&mut self, name: &str, _log: &mut ErrorLog) -> Option<&mut dyn SedBase> {
        match name {
            "listOfModels" => Some(&mut self.models as &mut dyn SedBase),
            "listOfSimulations" => Some(&mut self.simulations as &mut dyn SedBase),
            "listOfTasks" => Some(&mut self.tasks as &mut dyn SedBase),
            "listOfDataGenerators" => Some(&mut self.data_generators as &mut dyn SedBase),
            "listOfOutputs" => Some(&mut self.outputs as &mut dyn SedBase),
            _ => None,
        }
    }

    fn children(&self) -> Vec<&dyn SedBase> {
        vec![
            &self.models as &dyn SedBase,
            &self.simulations as &dyn SedBase,
            &self.tasks as &dyn SedBase,
            &self.data_generators as &dyn SedBase,
            &self.outputs as &dyn SedBase,
        ]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedBase> {
        vec![
            &mut self.models as &mut dyn SedBase,
            &mut self.simulations as &mut dyn SedBase,
            &mut self.tasks as &mut dyn SedBase,
            &mut self.data_generators as &mut dyn SedBase,
            &mut self.outputs as &mut dyn SedBase,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OperationError;

    #[test]
    fn test_new_document_links() {
        let doc = SedDocument::new(1, 3);
        assert_eq!(doc.namespaces().uri(""), Some(namespaces::sed_namespace_uri(1, 3)));
        assert!(doc.base().is_in_document());
        assert!(doc.models().base().is_in_document());
        assert_eq!(doc.models().parent_type_code(), Some(TypeCode::Document));
        assert_eq!(doc.outputs().base().path(), &[4]);
    }

    #[test]
    fn test_navigation() {
        let mut doc = SedDocument::new(1, 3);
        doc.create_model().set_id("m1").unwrap();
        let sim = doc.create_uniform_time_course();
        sim.set_id("sim").unwrap();
        sim.create_algorithm().set_kisao_id("KISAO:0000019").unwrap();

        let algorithm = doc
            .simulation(0)
            .and_then(|s| s.algorithm())
            .map(|a| a as &dyn SedBase)
            .unwrap();
        assert_eq!(algorithm.base().path(), &[1, 0, 0]);

        let parent = doc.parent_of(algorithm).unwrap();
        assert_eq!(parent.id(), Some("sim"));
        let grandparent = doc.parent_of(parent).unwrap();
        assert_eq!(grandparent.type_code(), TypeCode::ListOf);
        assert_eq!(doc.parent_of(grandparent).map(|n| n.type_code()), Some(TypeCode::Document));
        assert!(doc.parent_of(&doc).is_none());
        assert!(doc.node_at(&[0, 7]).is_none());
    }

    #[test]
    fn test_removed_node_has_no_parent() {
        let mut doc = SedDocument::new(1, 3);
        doc.create_model().set_id("m1").unwrap();
        let removed = doc.models_mut().remove_by_id("m1").unwrap();
        assert!(!removed.base().is_in_document());
        assert!(doc.parent_of(&removed).is_none());
    }

    #[test]
    fn test_add_checks_version() {
        let mut doc = SedDocument::new(1, 3);
        let mut task = Task::new(1, 2);
        task.set_id("t").unwrap();
        assert_eq!(doc.add_task(&task), Err(OperationError::VersionMismatch));
        assert_eq!(doc.add_task(&Task::new(1, 3)), Err(OperationError::InvalidObject));
        assert_eq!(doc.num_tasks(), 0);
    }

    #[test]
    fn test_set_level_and_version_moves_tree() {
        let mut doc = SedDocument::new(1, 2);
        doc.create_task().set_id("t").unwrap();
        doc.set_level_and_version(1, 4).unwrap();

        assert_eq!(doc.namespaces().uri(""), Some(namespaces::sed_namespace_uri(1, 4)));
        assert_eq!(doc.task(0).map(|t| t.version()), Some(4));
        assert_eq!(doc.tasks().version(), 4);
    }

    #[test]
    fn test_clone_is_a_separate_document() {
        let mut doc = SedDocument::new(1, 3);
        doc.create_model().set_id("m1").unwrap();
        let copy = doc.clone();
        assert_eq!(copy, doc);
        assert!(copy.model(0).unwrap().base().is_in_document());

        doc.models_mut().remove(0);
        assert_eq!(copy.num_models(), 1);
        assert_ne!(copy, doc);
    }
}
