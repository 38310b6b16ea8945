//! Discriminators for concrete node kinds

/// Identifies the concrete kind of a node
///
/// Discriminants follow the established SED-ML numbering. Abstract families
/// (`Change`, `Simulation`, `AbstractTask`, `Output`, `Plot`, `AbstractCurve`)
/// are used as the declared item type of collections; [`TypeCode::is_a`]
/// decides whether a concrete kind belongs to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i32)]
#[allow(missing_docs)]
pub enum TypeCode {
    Unknown = 0,
    Document = 1,
    Model = 2,
    Change = 3,
    ChangeAttribute = 5,
    Variable = 6,
    Parameter = 7,
    Simulation = 8,
    UniformTimeCourse = 9,
    Algorithm = 10,
    AbstractTask = 11,
    Task = 12,
    DataGenerator = 13,
    Output = 14,
    Plot = 15,
    Plot2D = 16,
    AbstractCurve = 18,
    Curve = 19,
    DataSet = 21,
    Report = 22,
    AlgorithmParameter = 23,
    RemoveXml = 26,
    OneStep = 33,
    SteadyState = 34,
    ListOf = 61,
}

impl TypeCode {
    /// Numeric discriminator
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Inverse of [`code`](Self::code)
    pub fn from_i32(code: i32) -> Option<Self> {
        use TypeCode::*;
        let tc = match code {
            0 => Unknown,
            1 => Document,
            2 => Model,
            3 => Change,
            5 => ChangeAttribute,
            6 => Variable,
            7 => Parameter,
            8 => Simulation,
            9 => UniformTimeCourse,
            10 => Algorithm,
            11 => AbstractTask,
            12 => Task,
            13 => DataGenerator,
            14 => Output,
            15 => Plot,
            16 => Plot2D,
            18 => AbstractCurve,
            19 => Curve,
            21 => DataSet,
            22 => Report,
            23 => AlgorithmParameter,
            26 => RemoveXml,
            33 => OneStep,
            34 => SteadyState,
            61 => ListOf,
            _ => return None,
        };
        Some(tc)
    }

    /// Abstract family this kind directly belongs to, if any
    pub fn family(self) -> Option<TypeCode> {
        use TypeCode::*;
        match self {
            ChangeAttribute | RemoveXml => Some(Change),
            UniformTimeCourse | OneStep | SteadyState => Some(Simulation),
            Task => Some(AbstractTask),
            Plot2D => Some(Plot),
            Plot | Report => Some(Output),
            Curve => Some(AbstractCurve),
            _ => None,
        }
    }

    /// Whether this kind is `other` or a member of the family `other`
    pub fn is_a(self, other: TypeCode) -> bool {
        let mut current = Some(self);
        while let Some(tc) = current {
            if tc == other {
                return true;
            }
            current = tc.family();
        }
        false
    }

    /// Human-readable kind name
    pub fn as_str(self) -> &'static str {
        use TypeCode::*;
        match self {
            Unknown => "(Unknown SED-ML Type)",
            Document => "Document",
            Model => "Model",
            Change => "Change",
            ChangeAttribute => "ChangeAttribute",
            Variable => "Variable",
            Parameter => "Parameter",
            Simulation => "Simulation",
            UniformTimeCourse => "UniformTimeCourse",
            Algorithm => "Algorithm",
            AbstractTask => "AbstractTask",
            Task => "Task",
            DataGenerator => "DataGenerator",
            Output => "Output",
            Plot => "Plot",
            Plot2D => "Plot2D",
            AbstractCurve => "AbstractCurve",
            Curve => "Curve",
            DataSet => "DataSet",
            Report => "Report",
            AlgorithmParameter => "AlgorithmParameter",
            RemoveXml => "RemoveXML",
            OneStep => "OneStep",
            SteadyState => "SteadyState",
            ListOf => "ListOf",
        }
    }
}

impl std::fmt::Display for TypeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
