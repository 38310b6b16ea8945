//! Simulation settings and the algorithm that runs them
//!
//! Every concrete simulation owns at most one [`Algorithm`], created by the
//! simulation itself when an `<algorithm>` child is read.

use crate::diagnostics::{ErrorLog, SedErrorCode};
use crate::error::{OperationError, OperationResult};
use crate::kisao;
use crate::namespaces::SedNamespaces;
use crate::node::{
    ListItem, ListOf, NodeBase, ParentInfo, SedBase, add_core_expected_attributes, set_text,
};
use crate::type_codes::TypeCode;
use crate::xml::XmlAttributes;
use crate::xml::attributes::{AttributeDescriptor, AttributeKind, ExpectedAttributes};

const INITIAL_TIME: AttributeDescriptor =
    AttributeDescriptor::new("initialTime", AttributeKind::Double)
        .required(SedErrorCode::UniformTimeCourseAllowedAttributes)
        .invalid(SedErrorCode::UniformTimeCourseInitialTimeMustBeDouble);
const OUTPUT_START_TIME: AttributeDescriptor =
    AttributeDescriptor::new("outputStartTime", AttributeKind::Double)
        .required(SedErrorCode::UniformTimeCourseAllowedAttributes)
        .invalid(SedErrorCode::UniformTimeCourseOutputStartTimeMustBeDouble);
const OUTPUT_END_TIME: AttributeDescriptor =
    AttributeDescriptor::new("outputEndTime", AttributeKind::Double)
        .required(SedErrorCode::UniformTimeCourseAllowedAttributes)
        .invalid(SedErrorCode::UniformTimeCourseOutputEndTimeMustBeDouble);
const NUMBER_OF_POINTS: AttributeDescriptor =
    AttributeDescriptor::new("numberOfPoints", AttributeKind::Integer)
        .invalid(SedErrorCode::UniformTimeCourseNumberOfPointsMustBeInteger);
const NUMBER_OF_STEPS: AttributeDescriptor =
    AttributeDescriptor::new("numberOfSteps", AttributeKind::Integer)
        .invalid(SedErrorCode::UniformTimeCourseNumberOfPointsMustBeInteger);
const STEP: AttributeDescriptor = AttributeDescriptor::new("step", AttributeKind::Double)
    .required(SedErrorCode::OneStepAllowedAttributes)
    .invalid(SedErrorCode::OneStepStepMustBeDouble);
const ALGORITHM_KISAO_ID: AttributeDescriptor =
    AttributeDescriptor::new("kisaoID", AttributeKind::String)
        .required(SedErrorCode::AlgorithmAllowedAttributes);
const PARAMETER_KISAO_ID: AttributeDescriptor =
    AttributeDescriptor::new("kisaoID", AttributeKind::String)
        .required(SedErrorCode::AlgorithmParameterAllowedAttributes);
const PARAMETER_VALUE: AttributeDescriptor = AttributeDescriptor::new("value", AttributeKind::String)
    .required(SedErrorCode::AlgorithmParameterAllowedAttributes);

/// `numberOfSteps` replaced `numberOfPoints` in version 4
fn uses_number_of_steps(level: u32, version: u32) -> bool {
    level > 1 || version >= 4
}

/// Any simulation kind
#[derive(Debug, Clone, PartialEq)]
pub enum Simulation {
    /// `uniformTimeCourse`
    UniformTimeCourse(UniformTimeCourse),
    /// `oneStep`
    OneStep(OneStep),
    /// `steadyState`
    SteadyState(SteadyState),
}

delegate_to_variant!(Simulation { UniformTimeCourse, OneStep, SteadyState });

impl Simulation {
    fn slot(&self) -> &AlgorithmSlot {
        match self {
            Simulation::UniformTimeCourse(s) => &s.algorithm,
            Simulation::OneStep(s) => &s.algorithm,
            Simulation::SteadyState(s) => &s.algorithm,
        }
    }

    fn parts_mut(&mut self) -> (&mut AlgorithmSlot, &NodeBase, TypeCode) {
        match self {
            Simulation::UniformTimeCourse(s) => {
                (&mut s.algorithm, &s.base, TypeCode::UniformTimeCourse)
            }
            Simulation::OneStep(s) => (&mut s.algorithm, &s.base, TypeCode::OneStep),
            Simulation::SteadyState(s) => (&mut s.algorithm, &s.base, TypeCode::SteadyState),
        }
    }

    /// The algorithm, if one is set
    pub fn algorithm(&self) -> Option<&Algorithm> {
        self.slot().get()
    }

    /// Mutable algorithm, if one is set
    pub fn algorithm_mut(&mut self) -> Option<&mut Algorithm> {
        self.parts_mut().0.get_mut()
    }

    /// Replace the algorithm with a new, empty one and return it
    pub fn create_algorithm(&mut self) -> &mut Algorithm {
        let (slot, base, owner) = self.parts_mut();
        slot.create(owner, base)
    }

    /// Replace the algorithm with a copy of `algorithm`
    pub fn set_algorithm(&mut self, algorithm: &Algorithm) -> OperationResult {
        let (slot, base, owner) = self.parts_mut();
        slot.set(owner, base, algorithm)
    }

    /// Whether an algorithm is set
    pub fn is_set_algorithm(&self) -> bool {
        self.slot().get().is_some()
    }

    /// The `uniformTimeCourse` variant, if this is one
    pub fn as_uniform_time_course(&self) -> Option<&UniformTimeCourse> {
        match self {
            Simulation::UniformTimeCourse(s) => Some(s),
            _ => None,
        }
    }

    /// Mutable `uniformTimeCourse` variant, if this is one
    pub fn as_uniform_time_course_mut(&mut self) -> Option<&mut UniformTimeCourse> {
        match self {
            Simulation::UniformTimeCourse(s) => Some(s),
            _ => None,
        }
    }

    /// The `oneStep` variant, if this is one
    pub fn as_one_step(&self) -> Option<&OneStep> {
        match self {
            Simulation::OneStep(s) => Some(s),
            _ => None,
        }
    }

    /// Mutable `oneStep` variant, if this is one
    pub fn as_one_step_mut(&mut self) -> Option<&mut OneStep> {
        match self {
            Simulation::OneStep(s) => Some(s),
            _ => None,
        }
    }
}

impl From<UniformTimeCourse> for Simulation {
    fn from(s: UniformTimeCourse) -> Self {
        Simulation::UniformTimeCourse(s)
    }
}

impl From<OneStep> for Simulation {
    fn from(s: OneStep) -> Self {
        Simulation::OneStep(s)
    }
}

impl From<SteadyState> for Simulation {
    fn from(s: SteadyState) -> Self {
        Simulation::SteadyState(s)
    }
}

impl ListItem for Simulation {
    const ITEM_TYPE: TypeCode = TypeCode::Simulation;
    const LIST_ELEMENT: &'static str = "listOfSimulations";
    const LIST_ATTRIBUTES_CODE: SedErrorCode =
        SedErrorCode::DocumentLoSimulationsAllowedCoreAttributes;

    fn create_for_element(name: &str, namespaces: &SedNamespaces) -> Option<Self> {
        let (level, version) = (namespaces.level(), namespaces.version());
        match name {
            "uniformTimeCourse" => Some(UniformTimeCourse::new(level, version).into()),
            "oneStep" => Some(OneStep::new(level, version).into()),
            "steadyState" => Some(SteadyState::new(level, version).into()),
            _ => None,
        }
    }
}

/// Optional singleton `algorithm` child shared by every simulation kind
#[derive(Debug, Clone, Default, PartialEq)]
struct AlgorithmSlot(Option<Algorithm>);

impl AlgorithmSlot {
    fn get(&self) -> Option<&Algorithm> {
        self.0.as_ref()
    }

    fn get_mut(&mut self) -> Option<&mut Algorithm> {
        self.0.as_mut()
    }

    fn install(&mut self, owner: TypeCode, base: &NodeBase, algorithm: Algorithm) -> &mut Algorithm {
        let stored = self.0.insert(algorithm);
        stored.connect_to_parent(&ParentInfo::new(owner, base), 0);
        stored
    }

    fn create(&mut self, owner: TypeCode, base: &NodeBase) -> &mut Algorithm {
        self.install(owner, base, Algorithm::new(base.level(), base.version()))
    }

    fn set(&mut self, owner: TypeCode, base: &NodeBase, algorithm: &Algorithm) -> OperationResult {
        if algorithm.level() != base.level() {
            return Err(OperationError::LevelMismatch);
        }
        if algorithm.version() != base.version() {
            return Err(OperationError::VersionMismatch);
        }
        self.install(owner, base, algorithm.clone());
        Ok(())
    }

    fn reconnect(&mut self, owner: TypeCode, base: &NodeBase) {
        if let Some(algorithm) = self.0.as_mut() {
            algorithm.connect_to_parent(&ParentInfo::new(owner, base), 0);
        }
    }

    /// `create_object` hook for an `<algorithm>` child
    fn create_from_element(
        &mut self,
        owner: TypeCode,
        base: &NodeBase,
        log: &mut ErrorLog,
    ) -> &mut Algorithm {
        if self.0.is_some() {
            log.log_error(
                SedErrorCode::SimulationAllowedElements,
                "Only one <algorithm> element is allowed on a simulation.",
                base.line(),
                base.column(),
            );
        }
        self.create(owner, base)
    }

    fn children(&self) -> Vec<&dyn SedBase> {
        self.0.iter().map(|a| a as &dyn SedBase).collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedBase> {
        self.0.iter_mut().map(|a| a as &mut dyn SedBase).collect()
    }
}

/// Implements the parts of [`SedBase`] every simulation kind shares
macro_rules! simulation_node {
    ($ty:ident, $code:expr, $element:literal) => {
        impl $ty {
            /// The algorithm, if one is set
            pub fn algorithm(&self) -> Option<&Algorithm> {
                self.algorithm.get()
            }

            /// Mutable algorithm, if one is set
            pub fn algorithm_mut(&mut self) -> Option<&mut Algorithm> {
                self.algorithm.get_mut()
            }

            /// Replace the algorithm with a new, empty one and return it
            pub fn create_algorithm(&mut self) -> &mut Algorithm {
                self.algorithm.create($code, &self.base)
            }

            /// Replace the algorithm with a copy of `algorithm`
            pub fn set_algorithm(&mut self, algorithm: &Algorithm) -> OperationResult {
                self.algorithm.set($code, &self.base, algorithm)
            }
        }

        impl Clone for $ty {
            fn clone(&self) -> Self {
                let mut copy = Self {
                    base: self.base.clone(),
                    algorithm: self.algorithm.clone(),
                    ..*self
                };
                copy.algorithm.reconnect($code, &copy.base);
                copy
            }
        }

        impl SedBase for $ty {
            fn base(&self) -> &NodeBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut NodeBase {
                &mut self.base
            }

            fn type_code(&self) -> TypeCode {
                $code
            }

            fn element_name(&self) -> &'static str {
                $element
            }

            fn has_required_attributes(&self) -> bool {
                self.is_set_id() && self.has_own_required_attributes()
            }

            fn has_required_elements(&self) -> bool {
                self.algorithm.get().is_some()
            }

            fn add_expected_attributes(&self, expected: &mut ExpectedAttributes) {
                add_core_expected_attributes(expected);
                self.add_own_expected_attributes(expected);
            }

            fn read_attributes(
                &mut self,
                attributes: &XmlAttributes,
                expected: &ExpectedAttributes,
                log: &mut ErrorLog,
            ) {
                self.base
                    .read_element_core($element, attributes, expected, log, Self::ALLOWED, false);
                if self.base.id().is_none() && !attributes.has("id") {
                    let message = format!(
                        "Sedml attribute 'id' is missing from the <{}> element.",
                        $element
                    );
                    log.log_error(
                        SedErrorCode::SimulationAllowedAttributes,
                        message,
                        self.base.line(),
                        self.base.column(),
                    );
                }
                self.read_own_attributes(attributes, log);
            }

            fn write_attributes(&self, out: &mut XmlAttributes) {
                self.base.write_core_attributes(out);
                self.write_own_attributes(out);
            }

            fn create_object(
                &mut self,
                name: &str,
                log: &mut ErrorLog,
            ) -> Option<&mut dyn SedBase> {
                if name != "algorithm" {
                    return None;
                }
                let stored: &mut dyn SedBase =
                    self.algorithm.create_from_element($code, &self.base, log);
                Some(stored)
            }

            fn children(&self) -> Vec<&dyn SedBase> {
                self.algorithm.children()
            }

            fn children_mut(&mut self) -> Vec<&mut dyn SedBase> {
                self.algorithm.children_mut()
            }
        }
    };
}

/// Time course with evenly spaced output points
#[derive(Debug, PartialEq)]
pub struct UniformTimeCourse {
    base: NodeBase,
    algorithm: AlgorithmSlot,
    initial_time: Option<f64>,
    output_start_time: Option<f64>,
    output_end_time: Option<f64>,
    number_of_points: Option<i32>,
}

impl UniformTimeCourse {
    const ALLOWED: SedErrorCode = SedErrorCode::UniformTimeCourseAllowedAttributes;

    /// Create an empty time course at (level, version)
    pub fn new(level: u32, version: u32) -> Self {
        Self {
            base: NodeBase::new(level, version),
            algorithm: AlgorithmSlot::default(),
            initial_time: None,
            output_start_time: None,
            output_end_time: None,
            number_of_points: None,
        }
    }

    /// Simulation start time
    pub fn initial_time(&self) -> Option<f64> {
        self.initial_time
    }

    /// Set the start time
    pub fn set_initial_time(&mut self, value: f64) -> OperationResult {
        self.initial_time = Some(value);
        Ok(())
    }

    /// Unset the start time
    pub fn unset_initial_time(&mut self) -> OperationResult {
        self.initial_time = None;
        Ok(())
    }

    /// Whether the start time is set
    pub fn is_set_initial_time(&self) -> bool {
        self.initial_time.is_some()
    }

    /// Time of the first output point
    pub fn output_start_time(&self) -> Option<f64> {
        self.output_start_time
    }

    /// Set the time of the first output point
    pub fn set_output_start_time(&mut self, value: f64) -> OperationResult {
        self.output_start_time = Some(value);
        Ok(())
    }

    /// Unset the output start time
    pub fn unset_output_start_time(&mut self) -> OperationResult {
        self.output_start_time = None;
        Ok(())
    }

    /// Whether the output start time is set
    pub fn is_set_output_start_time(&self) -> bool {
        self.output_start_time.is_some()
    }

    /// Time of the last output point
    pub fn output_end_time(&self) -> Option<f64> {
        self.output_end_time
    }

    /// Set the time of the last output point
    pub fn set_output_end_time(&mut self, value: f64) -> OperationResult {
        self.output_end_time = Some(value);
        Ok(())
    }

    /// Unset the output end time
    pub fn unset_output_end_time(&mut self) -> OperationResult {
        self.output_end_time = None;
        Ok(())
    }

    /// Whether the output end time is set
    pub fn is_set_output_end_time(&self) -> bool {
        self.output_end_time.is_some()
    }

    /// Number of output intervals, written as `numberOfSteps` from version 4
    pub fn number_of_points(&self) -> Option<i32> {
        self.number_of_points
    }

    /// Set the number of output intervals
    pub fn set_number_of_points(&mut self, value: i32) -> OperationResult {
        self.number_of_points = Some(value);
        Ok(())
    }

    /// Unset the number of output intervals
    pub fn unset_number_of_points(&mut self) -> OperationResult {
        self.number_of_points = None;
        Ok(())
    }

    /// Whether the number of output intervals is set
    pub fn is_set_number_of_points(&self) -> bool {
        self.number_of_points.is_some()
    }

    fn has_own_required_attributes(&self) -> bool {
        self.is_set_initial_time() && self.is_set_output_start_time() && self.is_set_output_end_time()
    }

    fn add_own_expected_attributes(&self, expected: &mut ExpectedAttributes) {
        expected.add("initialTime");
        expected.add("outputStartTime");
        expected.add("outputEndTime");
        expected.add("numberOfPoints");
        if uses_number_of_steps(self.level(), self.version()) {
            expected.add("numberOfSteps");
        }
    }

    fn read_own_attributes(&mut self, attributes: &XmlAttributes, log: &mut ErrorLog) {
        let mut cx = self.base.read_context("uniformTimeCourse", attributes, log);
        self.initial_time = INITIAL_TIME.read(&mut cx);
        self.output_start_time = OUTPUT_START_TIME.read(&mut cx);
        self.output_end_time = OUTPUT_END_TIME.read(&mut cx);
        let steps = if uses_number_of_steps(self.base.level(), self.base.version()) {
            NUMBER_OF_STEPS.read(&mut cx)
        } else {
            None
        };
        self.number_of_points = steps.or_else(|| NUMBER_OF_POINTS.read(&mut cx));
    }

    fn write_own_attributes(&self, out: &mut XmlAttributes) {
        INITIAL_TIME.write(self.initial_time.as_ref(), out);
        OUTPUT_START_TIME.write(self.output_start_time.as_ref(), out);
        OUTPUT_END_TIME.write(self.output_end_time.as_ref(), out);
        if uses_number_of_steps(self.level(), self.version()) {
            NUMBER_OF_STEPS.write(self.number_of_points.as_ref(), out);
        } else {
            NUMBER_OF_POINTS.write(self.number_of_points.as_ref(), out);
        }
    }
}

simulation_node!(UniformTimeCourse, TypeCode::UniformTimeCourse, "uniformTimeCourse");

/// Single step of given length from the current state
#[derive(Debug, PartialEq)]
pub struct OneStep {
    base: NodeBase,
    algorithm: AlgorithmSlot,
    step: Option<f64>,
}

impl OneStep {
    const ALLOWED: SedErrorCode = SedErrorCode::OneStepAllowedAttributes;

    /// Create an empty one-step simulation at (level, version)
    pub fn new(level: u32, version: u32) -> Self {
        Self {
            base: NodeBase::new(level, version),
            algorithm: AlgorithmSlot::default(),
            step: None,
        }
    }

    /// Step length
    pub fn step(&self) -> Option<f64> {
        self.step
    }

    /// Set the step length
    pub fn set_step(&mut self, value: f64) -> OperationResult {
        self.step = Some(value);
        Ok(())
    }

    /// Unset the step length
    pub fn unset_step(&mut self) -> OperationResult {
        self.step = None;
        Ok(())
    }

    /// Whether the step length is set
    pub fn is_set_step(&self) -> bool {
        self.step.is_some()
    }

    fn has_own_required_attributes(&self) -> bool {
        self.is_set_step()
    }

    fn add_own_expected_attributes(&self, expected: &mut ExpectedAttributes) {
        expected.add("step");
    }

    fn read_own_attributes(&mut self, attributes: &XmlAttributes, log: &mut ErrorLog) {
        let mut cx = self.base.read_context("oneStep", attributes, log);
        self.step = STEP.read(&mut cx);
    }

    fn write_own_attributes(&self, out: &mut XmlAttributes) {
        STEP.write(self.step.as_ref(), out);
    }
}

simulation_node!(OneStep, TypeCode::OneStep, "oneStep");

/// Simulation to a steady state
#[derive(Debug, PartialEq)]
pub struct SteadyState {
    base: NodeBase,
    algorithm: AlgorithmSlot,
}

impl SteadyState {
    const ALLOWED: SedErrorCode = SedErrorCode::SteadyStateAllowedCoreAttributes;

    /// Create an empty steady-state simulation at (level, version)
    pub fn new(level: u32, version: u32) -> Self {
        Self {
            base: NodeBase::new(level, version),
            algorithm: AlgorithmSlot::default(),
        }
    }

    fn has_own_required_attributes(&self) -> bool {
        true
    }

    fn add_own_expected_attributes(&self, _expected: &mut ExpectedAttributes) {}

    fn read_own_attributes(&mut self, _attributes: &XmlAttributes, _log: &mut ErrorLog) {}

    fn write_own_attributes(&self, _out: &mut XmlAttributes) {}
}

simulation_node!(SteadyState, TypeCode::SteadyState, "steadyState");

/// Numerical method identified by a KiSAO term
#[derive(Debug, PartialEq)]
pub struct Algorithm {
    base: NodeBase,
    kisao_id: Option<String>,
    parameters: ListOf<AlgorithmParameter>,
}

impl Algorithm {
    /// Create an empty algorithm at (level, version)
    pub fn new(level: u32, version: u32) -> Self {
        let mut algorithm = Self {
            base: NodeBase::new(level, version),
            kisao_id: None,
            parameters: ListOf::new(level, version),
        };
        algorithm.connect_to_child();
        algorithm
    }

    /// KiSAO term, e.g. `KISAO:0000019`
    pub fn kisao_id(&self) -> Option<&str> {
        self.kisao_id.as_deref()
    }

    /// Set the KiSAO term; fills the name from the term table when none is set
    pub fn set_kisao_id(&mut self, kisao_id: &str) -> OperationResult {
        set_text(&mut self.kisao_id, kisao_id)?;
        if !self.is_set_name() {
            if let Some(name) = kisao::name_for(kisao_id) {
                self.set_name(name)?;
            }
        }
        Ok(())
    }

    /// Whether the KiSAO term is set
    pub fn is_set_kisao_id(&self) -> bool {
        self.kisao_id.is_some()
    }

    /// Unset the KiSAO term
    pub fn unset_kisao_id(&mut self) -> OperationResult {
        self.kisao_id = None;
        Ok(())
    }

    /// The `listOfAlgorithmParameters` collection
    pub fn parameters(&self) -> &ListOf<AlgorithmParameter> {
        &self.parameters
    }

    /// Mutable `listOfAlgorithmParameters` collection
    pub fn parameters_mut(&mut self) -> &mut ListOf<AlgorithmParameter> {
        &mut self.parameters
    }

    /// Number of algorithm parameters
    pub fn num_algorithm_parameters(&self) -> usize {
        self.parameters.size()
    }

    /// Append a copy of `parameter` after checking it
    pub fn add_algorithm_parameter(&mut self, parameter: &AlgorithmParameter) -> OperationResult {
        self.parameters.append(parameter)
    }

    /// Append a new, empty parameter and return it
    pub fn create_algorithm_parameter(&mut self) -> &mut AlgorithmParameter {
        let (level, version) = (self.level(), self.version());
        self.parameters
            .push_owned(AlgorithmParameter::new(level, version))
    }
}

impl Clone for Algorithm {
    fn clone(&self) -> Self {
        let mut copy = Self {
            base: self.base.clone(),
            kisao_id: self.kisao_id.clone(),
            parameters: self.parameters.clone(),
        };
        copy.connect_to_child();
        copy
    }
}

impl SedBase for Algorithm {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn type_code(&self) -> TypeCode {
        TypeCode::Algorithm
    }

    fn element_name(&self) -> &'static str {
        "algorithm"
    }

    fn has_required_attributes(&self) -> bool {
        self.is_set_kisao_id()
    }

    fn add_expected_attributes(&self, expected: &mut ExpectedAttributes) {
        add_core_expected_attributes(expected);
        expected.add("kisaoID");
    }

    fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        log: &mut ErrorLog,
    ) {
        self.base.read_element_core(
            "algorithm",
            attributes,
            expected,
            log,
            SedErrorCode::AlgorithmAllowedAttributes,
            false,
        );
        let mut cx = self.base.read_context("algorithm", attributes, log);
        self.kisao_id = ALGORITHM_KISAO_ID.read_string(&mut cx);
    }

    fn write_attributes(&self, out: &mut XmlAttributes) {
        self.base.write_core_attributes(out);
        ALGORITHM_KISAO_ID.write_str(self.kisao_id(), out);
    }

    fn create_object(&mut self, name: &str, _log: &mut ErrorLog) -> Option<&mut dyn SedBase> {
        match name {
            "listOfAlgorithmParameters" => Some(&mut self.parameters as &mut dyn SedBase),
            _ => None,
        }
    }

    fn children(&self) -> Vec<&dyn SedBase> {
        vec![&self.parameters as &dyn SedBase]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedBase> {
        vec![&mut self.parameters as &mut dyn SedBase]
    }
}

/// Setting of one algorithm parameter, identified by a KiSAO term
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmParameter {
    base: NodeBase,
    kisao_id: Option<String>,
    value: Option<String>,
}

impl AlgorithmParameter {
    /// Create an empty parameter at (level, version)
    pub fn new(level: u32, version: u32) -> Self {
        Self {
            base: NodeBase::new(level, version),
            kisao_id: None,
            value: None,
        }
    }

    /// KiSAO term of the parameter
    pub fn kisao_id(&self) -> Option<&str> {
        self.kisao_id.as_deref()
    }

    /// Set the KiSAO term; empty unsets
    pub fn set_kisao_id(&mut self, kisao_id: &str) -> OperationResult {
        set_text(&mut self.kisao_id, kisao_id)
    }

    /// Whether the KiSAO term is set
    pub fn is_set_kisao_id(&self) -> bool {
        self.kisao_id.is_some()
    }

    /// Parameter value, kept as text
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Set the value; empty unsets
    pub fn set_value(&mut self, value: &str) -> OperationResult {
        set_text(&mut self.value, value)
    }

    /// Whether the value is set
    pub fn is_set_value(&self) -> bool {
        self.value.is_some()
    }
}

impl SedBase for AlgorithmParameter {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn type_code(&self) -> TypeCode {
        TypeCode::AlgorithmParameter
    }

    fn element_name(&self) -> &'static str {
        "algorithmParameter"
    }

    fn has_required_attributes(&self) -> bool {
        self.is_set_kisao_id() && self.is_set_value()
    }

    fn add_expected_attributes(&self, expected: &mut ExpectedAttributes) {
        add_core_expected_attributes(expected);
        expected.add("kisaoID");
        expected.add("value");
    }

    fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        log: &mut ErrorLog,
    ) {
        self.base.read_element_core(
            "algorithmParameter",
            attributes,
            expected,
            log,
            SedErrorCode::AlgorithmParameterAllowedAttributes,
            false,
        );
        let mut cx = self.base.read_context("algorithmParameter", attributes, log);
        self.kisao_id = PARAMETER_KISAO_ID.read_string(&mut cx);
        self.value = PARAMETER_VALUE.read_string(&mut cx);
    }

    fn write_attributes(&self, out: &mut XmlAttributes) {
        self.base.write_core_attributes(out);
        PARAMETER_KISAO_ID.write_str(self.kisao_id(), out);
        PARAMETER_VALUE.write_str(self.value(), out);
    }
}

impl ListItem for AlgorithmParameter {
    const ITEM_TYPE: TypeCode = TypeCode::AlgorithmParameter;
    const LIST_ELEMENT: &'static str = "listOfAlgorithmParameters";
    const LIST_ATTRIBUTES_CODE: SedErrorCode =
        SedErrorCode::AlgorithmLoAlgorithmParametersAllowedCoreAttributes;

    fn create_for_element(name: &str, namespaces: &SedNamespaces) -> Option<Self> {
        (name == "algorithmParameter")
            .then(|| AlgorithmParameter::new(namespaces.level(), namespaces.version()))
    }
}
