//! Numeric diagnostic identifiers
//!
//! The numbering follows the established SED-ML error table so that logs can
//! be compared with other tools: `1xxx` for the XML layer, `10xxx` for core
//! structure, `2xxxx` for per-element rules.

use super::{ErrorCategory, Severity};

/// Categorical identifier of a diagnostic record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
#[allow(missing_docs)]
pub enum SedErrorCode {
    // XML layer
    XmlFileUnreadable = 2,
    BadXmlDoctype = 1004,
    BadlyFormedXml = 1006,
    DuplicateXmlAttribute = 1010,
    XmlAttributeTypeMismatch = 1016,
    XmlUnexpectedEof = 1024,

    // Core structure
    Unknown = 10000,
    NotUtf8 = 10001,
    UnrecognizedElement = 10002,
    NotSchemaConformant = 10003,
    NsUndeclared = 10101,
    ElementNotInNs = 10102,
    DuplicateComponentId = 10301,
    IdSyntaxRule = 10302,
    InvalidMetaidSyntax = 10303,

    // Document
    InvalidNamespaceOnSed = 20101,
    EmptyListElement = 20103,
    DocumentAllowedAttributes = 20203,
    DocumentAllowedElements = 20204,
    DocumentLevelMustBeNonNegativeInteger = 20205,
    DocumentVersionMustBeNonNegativeInteger = 20206,
    DocumentLoModelsAllowedCoreAttributes = 20215,
    DocumentLoSimulationsAllowedCoreAttributes = 20216,
    DocumentLoTasksAllowedCoreAttributes = 20217,
    DocumentLoDataGeneratorsAllowedCoreAttributes = 20218,
    DocumentLoOutputsAllowedCoreAttributes = 20219,

    // Model and changes
    ModelAllowedAttributes = 20303,
    ModelAllowedElements = 20304,
    ModelLoChangesAllowedCoreAttributes = 20309,
    ChangeAllowedAttributes = 20403,
    ChangeAttributeAllowedAttributes = 20603,
    RemoveXmlAllowedCoreAttributes = 22701,

    // Data generators
    VariableAllowedAttributes = 20703,
    VariableTaskReferenceMustBeAbstractTask = 20707,
    VariableModelReferenceMustBeModel = 20708,
    ParameterAllowedAttributes = 20803,
    ParameterValueMustBeDouble = 20804,
    DataGeneratorAllowedAttributes = 21403,
    DataGeneratorAllowedElements = 21404,
    DataGeneratorLoVariablesAllowedCoreAttributes = 21408,
    DataGeneratorLoParametersAllowedCoreAttributes = 21409,

    // Simulations
    SimulationAllowedAttributes = 20903,
    SimulationAllowedElements = 20904,
    UniformTimeCourseAllowedAttributes = 21003,
    UniformTimeCourseInitialTimeMustBeDouble = 21004,
    UniformTimeCourseOutputStartTimeMustBeDouble = 21005,
    UniformTimeCourseOutputEndTimeMustBeDouble = 21006,
    UniformTimeCourseNumberOfPointsMustBeInteger = 21007,
    AlgorithmAllowedAttributes = 21103,
    AlgorithmAllowedElements = 21104,
    AlgorithmLoAlgorithmParametersAllowedCoreAttributes = 21107,
    AlgorithmParameterAllowedAttributes = 22403,
    OneStepAllowedAttributes = 23303,
    OneStepStepMustBeDouble = 23304,
    SteadyStateAllowedCoreAttributes = 23401,

    // Tasks
    TaskAllowedAttributes = 21303,
    TaskModelReferenceMustBeModel = 21304,
    TaskSimulationReferenceMustBeSimulation = 21305,

    // Outputs
    OutputAllowedAttributes = 21503,
    PlotAllowedAttributes = 21603,
    PlotLegendMustBeBoolean = 21605,
    Plot2DAllowedElements = 21703,
    Plot2DLoCurvesAllowedCoreAttributes = 21705,
    AbstractCurveLogXMustBeBoolean = 21905,
    AbstractCurveXDataReferenceMustBeDataReference = 21909,
    CurveAllowedAttributes = 22003,
    CurveYDataReferenceMustBeDataGenerator = 22004,
    CurveLogYMustBeBoolean = 22005,
    DataSetAllowedAttributes = 22203,
    DataSetDataReferenceMustBeDataGenerator = 22205,
    ReportAllowedElements = 22303,
    ReportLoDataSetsAllowedCoreAttributes = 22305,

    UnknownCoreAttribute = 99994,
}

impl SedErrorCode {
    /// Numeric identifier
    pub fn id(self) -> u32 {
        self as u32
    }

    /// Default severity for records with this id
    pub fn severity(self) -> Severity {
        match self.category() {
            ErrorCategory::Xml => Severity::Fatal,
            _ if self == SedErrorCode::Unknown => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    /// Category the id belongs to
    pub fn category(self) -> ErrorCategory {
        match self.id() {
            0..=9999 => ErrorCategory::Xml,
            10000..=10199 => ErrorCategory::Sedml,
            10300..=10399 => ErrorCategory::IdentifierConsistency,
            99994 => ErrorCategory::Internal,
            _ => ErrorCategory::GeneralConsistency,
        }
    }

    /// One-line summary used when no detailed message is supplied
    pub fn short_message(self) -> &'static str {
        use SedErrorCode::*;
        match self {
            XmlFileUnreadable => "Unreadable XML file",
            BadXmlDoctype => "Bad XML DOCTYPE declaration",
            BadlyFormedXml => "Badly formed XML",
            DuplicateXmlAttribute => "Duplicate XML attribute",
            XmlAttributeTypeMismatch => "XML attribute value has the wrong type",
            XmlUnexpectedEof => "Unexpected end of XML input",
            Unknown => "Encountered unknown internal libSEDML error",
            NotUtf8 => "File does not use UTF-8 encoding",
            UnrecognizedElement => "Encountered unrecognized element",
            NotSchemaConformant => "Document does not conform to the SED-ML XML schema",
            NsUndeclared => "Undeclared namespace prefix",
            ElementNotInNs => "Element is not in the SED-ML namespace",
            DuplicateComponentId => "Duplicate 'id' attribute value",
            IdSyntaxRule => "Invalid SId syntax",
            InvalidMetaidSyntax => "Invalid syntax for a 'metaid' attribute value",
            InvalidNamespaceOnSed => "Invalid namespace on <sedML>",
            EmptyListElement => "No empty listOf elements allowed",
            DocumentAllowedAttributes => "Attributes allowed on <sedML>.",
            DocumentAllowedElements => "Elements allowed on <sedML>.",
            DocumentLevelMustBeNonNegativeInteger => {
                "The 'level' attribute must be a non-negative integer."
            }
            DocumentVersionMustBeNonNegativeInteger => {
                "The 'version' attribute must be a non-negative integer."
            }
            DocumentLoModelsAllowedCoreAttributes => "Core attributes allowed on <listOfModels>.",
            DocumentLoSimulationsAllowedCoreAttributes => {
                "Core attributes allowed on <listOfSimulations>."
            }
            DocumentLoTasksAllowedCoreAttributes => "Core attributes allowed on <listOfTasks>.",
            DocumentLoDataGeneratorsAllowedCoreAttributes => {
                "Core attributes allowed on <listOfDataGenerators>."
            }
            DocumentLoOutputsAllowedCoreAttributes => "Core attributes allowed on <listOfOutputs>.",
            ModelAllowedAttributes => "Attributes allowed on <model>.",
            ModelAllowedElements => "Elements allowed on <model>.",
            ModelLoChangesAllowedCoreAttributes => "Core attributes allowed on <listOfChanges>.",
            ChangeAllowedAttributes => "Attributes allowed on <change>.",
            ChangeAttributeAllowedAttributes => "Attributes allowed on <changeAttribute>.",
            RemoveXmlAllowedCoreAttributes => "Core attributes allowed on <removeXML>.",
            VariableAllowedAttributes => "Attributes allowed on <variable>.",
            VariableTaskReferenceMustBeAbstractTask => {
                "The 'taskReference' attribute must point to an AbstractTask object."
            }
            VariableModelReferenceMustBeModel => {
                "The 'modelReference' attribute must point to a Model object."
            }
            ParameterAllowedAttributes => "Attributes allowed on <parameter>.",
            ParameterValueMustBeDouble => "The 'value' attribute must be Double.",
            DataGeneratorAllowedAttributes => "Attributes allowed on <dataGenerator>.",
            DataGeneratorAllowedElements => "Elements allowed on <dataGenerator>.",
            DataGeneratorLoVariablesAllowedCoreAttributes => {
                "Core attributes allowed on <listOfVariables>."
            }
            DataGeneratorLoParametersAllowedCoreAttributes => {
                "Core attributes allowed on <listOfParameters>."
            }
            SimulationAllowedAttributes => "Attributes allowed on <simulation>.",
            SimulationAllowedElements => "Elements allowed on <simulation>.",
            UniformTimeCourseAllowedAttributes => "Attributes allowed on <uniformTimeCourse>.",
            UniformTimeCourseInitialTimeMustBeDouble => {
                "The 'initialTime' attribute must be Double."
            }
            UniformTimeCourseOutputStartTimeMustBeDouble => {
                "The 'outputStartTime' attribute must be Double."
            }
            UniformTimeCourseOutputEndTimeMustBeDouble => {
                "The 'outputEndTime' attribute must be Double."
            }
            UniformTimeCourseNumberOfPointsMustBeInteger => {
                "The 'numberOfPoints' attribute must be Integer."
            }
            AlgorithmAllowedAttributes => "Attributes allowed on <algorithm>.",
            AlgorithmAllowedElements => "Elements allowed on <algorithm>.",
            AlgorithmLoAlgorithmParametersAllowedCoreAttributes => {
                "Core attributes allowed on <listOfAlgorithmParameters>."
            }
            AlgorithmParameterAllowedAttributes => "Attributes allowed on <algorithmParameter>.",
            OneStepAllowedAttributes => "Attributes allowed on <oneStep>.",
            OneStepStepMustBeDouble => "The 'step' attribute must be Double.",
            SteadyStateAllowedCoreAttributes => "Core attributes allowed on <steadyState>.",
            TaskAllowedAttributes => "Attributes allowed on <task>.",
            TaskModelReferenceMustBeModel => {
                "The 'modelReference' attribute must point to a Model object."
            }
            TaskSimulationReferenceMustBeSimulation => {
                "The 'simulationReference' attribute must point to a Simulation object."
            }
            OutputAllowedAttributes => "Attributes allowed on <output>.",
            PlotAllowedAttributes => "Attributes allowed on <plot>.",
            PlotLegendMustBeBoolean => "The 'legend' attribute must be Boolean.",
            Plot2DAllowedElements => "Elements allowed on <plot2D>.",
            Plot2DLoCurvesAllowedCoreAttributes => "Core attributes allowed on <listOfCurves>.",
            AbstractCurveLogXMustBeBoolean => "The 'logX' attribute must be Boolean.",
            AbstractCurveXDataReferenceMustBeDataReference => {
                "The 'xDataReference' attribute must point to a DataGenerator object."
            }
            CurveAllowedAttributes => "Attributes allowed on <curve>.",
            CurveYDataReferenceMustBeDataGenerator => {
                "The 'yDataReference' attribute must point to a DataGenerator object."
            }
            CurveLogYMustBeBoolean => "The 'logY' attribute must be Boolean.",
            DataSetAllowedAttributes => "Attributes allowed on <dataSet>.",
            DataSetDataReferenceMustBeDataGenerator => {
                "The 'dataReference' attribute must point to a DataGenerator object."
            }
            ReportAllowedElements => "Elements allowed on <report>.",
            ReportLoDataSetsAllowedCoreAttributes => "Core attributes allowed on <listOfDataSets>.",
            UnknownCoreAttribute => "Unknown attribute",
        }
    }
}

impl std::fmt::Display for SedErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_codes_are_fatal() {
        assert_eq!(SedErrorCode::BadlyFormedXml.severity(), Severity::Fatal);
        assert_eq!(SedErrorCode::BadXmlDoctype.category(), ErrorCategory::Xml);
        assert_eq!(SedErrorCode::Unknown.severity(), Severity::Fatal);
    }

    #[test]
    fn test_schema_codes_are_errors() {
        assert_eq!(SedErrorCode::ModelAllowedAttributes.id(), 20303);
        assert_eq!(SedErrorCode::ModelAllowedAttributes.severity(), Severity::Error);
        assert_eq!(
            SedErrorCode::IdSyntaxRule.category(),
            ErrorCategory::IdentifierConsistency
        );
        assert_eq!(
            SedErrorCode::UnknownCoreAttribute.category(),
            ErrorCategory::Internal
        );
    }
}
