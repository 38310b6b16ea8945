use crate::diagnostics::{ErrorLog, SedErrorCode};
use crate::error::OperationResult;
use crate::namespaces::SedNamespaces;
use crate::node::{
    ListItem, ListOf, NodeBase, SedBase, add_core_expected_attributes, rename_ref, set_sid_ref,
    set_text,
};
use crate::type_codes::TypeCode;
use crate::xml::XmlAttributes;
use crate::xml::attributes::{AttributeDescriptor, AttributeKind, ExpectedAttributes};

const LEGEND: AttributeDescriptor = AttributeDescriptor::new("legend", AttributeKind::Boolean)
    .invalid(SedErrorCode::PlotLegendMustBeBoolean);
const LABEL: AttributeDescriptor = AttributeDescriptor::new("label", AttributeKind::String)
    .required(SedErrorCode::DataSetAllowedAttributes);
const DATA_REFERENCE: AttributeDescriptor =
    AttributeDescriptor::new("dataReference", AttributeKind::SIdRef)
        .invalid(SedErrorCode::DataSetDataReferenceMustBeDataGenerator);
const LOG_X: AttributeDescriptor = AttributeDescriptor::new("logX", AttributeKind::Boolean)
    .invalid(SedErrorCode::AbstractCurveLogXMustBeBoolean);
const LOG_Y: AttributeDescriptor = AttributeDescriptor::new("logY", AttributeKind::Boolean)
    .invalid(SedErrorCode::CurveLogYMustBeBoolean);
const X_DATA_REFERENCE: AttributeDescriptor =
    AttributeDescriptor::new("xDataReference", AttributeKind::SIdRef)
        .required(SedErrorCode::CurveAllowedAttributes)
        .invalid(SedErrorCode::AbstractCurveXDataReferenceMustBeDataReference);
const Y_DATA_REFERENCE: AttributeDescriptor =
    AttributeDescriptor::new("yDataReference", AttributeKind::SIdRef)
        .required(SedErrorCode::CurveAllowedAttributes)
        .invalid(SedErrorCode::CurveYDataReferenceMustBeDataGenerator);

/// Any output kind
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// `report`
    Report(Report),
    /// `plot2D`
    Plot2D(Plot2D),
}

delegate_to_variant!(Output { Report, Plot2D });

impl Output {
    /// The `report` variant, if this is one
    pub fn as_report(&self) -> Option<&Report> {
        match self {
            Output::Report(r) => Some(r),
            _ => None,
        }
    }

    /// Mutable `report` variant, if this is one
    pub fn as_report_mut(&mut self) -> Option<&mut Report> {
        match self {
            Output::Report(r) => Some(r),
            _ => None,
        }
    }

    /// The `plot2D` variant, if this is one
    pub fn as_plot2d(&self) -> Option<&Plot2D> {
        match self {
            Output::Plot2D(p) => Some(p),
            _ => None,
        }
    }

    /// Mutable `plot2D` variant, if this is one
    pub fn as_plot2d_mut(&mut self) -> Option<&mut Plot2D> {
        match self {
            Output::Plot2D(p) => Some(p),
            _ => None,
        }
    }
}

impl From<Report> for Output {
    fn from(r: Report) -> Self {
        Output::Report(r)
    }
}

impl From<Plot2D> for Output {
    fn from(p: Plot2D) -> Self {
        Output::Plot2D(p)
    }
}

impl ListItem for Output {
    const ITEM_TYPE: TypeCode = TypeCode::Output;
    const LIST_ELEMENT: &'static str = "listOfOutputs";
    const LIST_ATTRIBUTES_CODE: SedErrorCode = SedErrorCode::DocumentLoOutputsAllowedCoreAttributes;

    fn create_for_element(name: &str, namespaces: &SedNamespaces) -> Option<Self> {
        let (level, version) = (namespaces.level(), namespaces.version());
        match name {
            "report" => Some(Report::new(level, version).into()),
            "plot2D" => Some(Plot2D::new(level, version).into()),
            _ => None,
        }
    }
}

/// Tabular output made of data sets
#[derive(Debug, PartialEq)]
pub struct Report {
    base: NodeBase,
    data_sets: ListOf<DataSet>,
}

impl Report {
    /// Create an empty report at (level, version)
    pub fn new(level: u32, version: u32) -> Self {
        let mut report = Self {
            base: NodeBase::new(level, version),
            data_sets: ListOf::new(level, version),
        };
        report.connect_to_child();
        report
    }

    /// The `listOfDataSets` collection
    pub fn data_sets(&self) -> &ListOf<DataSet> {
        &self.data_sets
    }

    /// Mutable `listOfDataSets` collection
    pub fn data_sets_mut(&mut self) -> &mut ListOf<DataSet> {
        &mut self.data_sets
    }

    /// Number of data sets
    pub fn num_data_sets(&self) -> usize {
        self.data_sets.size()
    }

    /// Append a copy of `data_set` after checking it
    pub fn add_data_set(&mut self, data_set: &DataSet) -> OperationResult {
        self.data_sets.append(data_set)
    }

    /// Append a new, empty data set and return it
    pub fn create_data_set(&mut self) -> &mut DataSet {
        let (level, version) = (self.level(), self.version());
        self.data_sets.push_owned(DataSet::new(level, version))
    }
}

impl Clone for Report {
    fn clone(&self) -> Self {
        let mut copy = Self {
            base: self.base.clone(),
            data_sets: self.data_sets.clone(),
        };
        copy.connect_to_child();
        copy
    }
}

impl SedBase for Report {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn type_code(&self) -> TypeCode {
        TypeCode::Report
    }

    fn element_name(&self) -> &'static str {
        "report"
    }

    fn has_required_attributes(&self) -> bool {
        self.is_set_id()
    }

    fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        log: &mut ErrorLog,
    ) {
        self.base.read_element_core(
            "report",
            attributes,
            expected,
            log,
            SedErrorCode::OutputAllowedAttributes,
            true,
        );
    }

    fn create_object(&mut self, name: &str, _log: &mut ErrorLog) -> Option<&mut dyn SedBase> {
        match name {
            "listOfDataSets" => Some(&mut self.data_sets as &mut dyn SedBase),
            _ => None,
        }
    }

    fn children(&self) -> Vec<&dyn SedBase> {
        vec![&self.data_sets as &dyn SedBase]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedBase> {
        vec![&mut self.data_sets as &mut dyn SedBase]
    }
}

/// One column of a report
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    base: NodeBase,
    label: Option<String>,
    data_reference: Option<String>,
}

impl DataSet {
    /// Create an empty data set at (level, version)
    pub fn new(level: u32, version: u32) -> Self {
        Self {
            base: NodeBase::new(level, version),
            label: None,
            data_reference: None,
        }
    }

    /// Column heading
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Set the heading; empty unsets
    pub fn set_label(&mut self, label: &str) -> OperationResult {
        set_text(&mut self.label, label)
    }

    /// Whether the heading is set
    pub fn is_set_label(&self) -> bool {
        self.label.is_some()
    }

    /// Id of the data generator filling the column
    pub fn data_reference(&self) -> Option<&str> {
        self.data_reference.as_deref()
    }

    /// Set the data reference; empty unsets, invalid syntax is rejected
    pub fn set_data_reference(&mut self, id: &str) -> OperationResult {
        set_sid_ref(&mut self.data_reference, id)
    }

    /// Whether the data reference is set
    pub fn is_set_data_reference(&self) -> bool {
        self.data_reference.is_some()
    }
}

impl SedBase for DataSet {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn type_code(&self) -> TypeCode {
        TypeCode::DataSet
    }

    fn element_name(&self) -> &'static str {
        "dataSet"
    }

    fn has_required_attributes(&self) -> bool {
        self.is_set_id() && self.is_set_label()
    }

    fn add_expected_attributes(&self, expected: &mut ExpectedAttributes) {
        add_core_expected_attributes(expected);
        expected.add("label");
        expected.add("dataReference");
    }

    fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        log: &mut ErrorLog,
    ) {
        self.base.read_element_core(
            "dataSet",
            attributes,
            expected,
            log,
            SedErrorCode::DataSetAllowedAttributes,
            true,
        );
        let mut cx = self.base.read_context("dataSet", attributes, log);
        self.label = LABEL.read_string(&mut cx);
        self.data_reference = DATA_REFERENCE.read_string(&mut cx);
    }

    fn write_attributes(&self, out: &mut XmlAttributes) {
        self.base.write_core_attributes(out);
        LABEL.write_str(self.label(), out);
        DATA_REFERENCE.write_str(self.data_reference(), out);
    }

    fn rename_own_sid_refs(&mut self, old_id: &str, new_id: &str) {
        rename_ref(&mut self.data_reference, old_id, new_id);
    }
}

impl ListItem for DataSet {
    const ITEM_TYPE: TypeCode = TypeCode::DataSet;
    const LIST_ELEMENT: &'static str = "listOfDataSets";
    const LIST_ATTRIBUTES_CODE: SedErrorCode = SedErrorCode::ReportLoDataSetsAllowedCoreAttributes;

    fn create_for_element(name: &str, namespaces: &SedNamespaces) -> Option<Self> {
        (name == "dataSet").then(|| DataSet::new(namespaces.level(), namespaces.version()))
    }
}

/// Two-dimensional plot made of curves
#[derive(Debug, PartialEq)]
pub struct Plot2D {
    base: NodeBase,
    legend: Option<bool>,
    curves: ListOf<Curve>,
}

impl Plot2D {
    /// Create an empty plot at (level, version)
    pub fn new(level: u32, version: u32) -> Self {
        let mut plot = Self {
            base: NodeBase::new(level, version),
            legend: None,
            curves: ListOf::new(level, version),
        };
        plot.connect_to_child();
        plot
    }

    /// Whether a legend is drawn
    pub fn legend(&self) -> Option<bool> {
        self.legend
    }

    /// Set whether a legend is drawn
    pub fn set_legend(&mut self, legend: bool) -> OperationResult {
        self.legend = Some(legend);
        Ok(())
    }

    /// Whether the legend flag is set
    pub fn is_set_legend(&self) -> bool {
        self.legend.is_some()
    }

    /// Unset the legend flag
    pub fn unset_legend(&mut self) -> OperationResult {
        self.legend = None;
        Ok(())
    }

    /// The `listOfCurves` collection
    pub fn curves(&self) -> &ListOf<Curve> {
        &self.curves
    }

    /// Mutable `listOfCurves` collection
    pub fn curves_mut(&mut self) -> &mut ListOf<Curve> {
        &mut self.curves
    }

    /// Number of curves
    pub fn num_curves(&self) -> usize {
        self.curves.size()
    }

    /// Append a copy of `curve` after checking it
    pub fn add_curve(&mut self, curve: &Curve) -> OperationResult {
        self.curves.append(curve)
    }

    /// Append a new, empty curve and return it
    pub fn create_curve(&mut self) -> &mut Curve {
        let (level, version) = (self.level(), self.version());
        self.curves.push_owned(Curve::new(level, version))
    }
}

impl Clone for Plot2D {
    fn clone(&self) -> Self {
        let mut copy = Self {
            base: self.base.clone(),
            legend: self.legend,
            curves: self.curves.clone(),
        };
        copy.connect_to_child();
        copy
    }
}

impl SedBase for Plot2D {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn type_code(&self) -> TypeCode {
        TypeCode::Plot2D
    }

    fn element_name(&self) -> &'static str {
        "plot2D"
    }

    fn has_required_attributes(&self) -> bool {
        self.is_set_id()
    }

    fn add_expected_attributes(&self, expected: &mut ExpectedAttributes) {
        add_core_expected_attributes(expected);
        expected.add("legend");
    }

    fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        log: &mut ErrorLog,
    ) {
        self.base.read_element_core(
            "plot2D",
            attributes,
            expected,
            log,
            SedErrorCode::PlotAllowedAttributes,
            true,
        );
        let mut cx = self.base.read_context("plot2D", attributes, log);
        self.legend = LEGEND.read(&mut cx);
    }

    fn write_attributes(&self, out: &mut XmlAttributes) {
        self.base.write_core_attributes(out);
        LEGEND.write(self.legend.as_ref(), out);
    }

    fn create_object(&mut self, name: &str, _log: &mut ErrorLog) -> Option<&mut dyn SedBase> {
        match name {
            "listOfCurves" => Some(&mut self.curves as &mut dyn SedBase),
            _ => None,
        }
    }

    fn children(&self) -> Vec<&dyn SedBase> {
        vec![&self.curves as &dyn SedBase]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedBase> {
        vec![&mut self.curves as &mut dyn SedBase]
    }
}

/// One line of a 2D plot
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    base: NodeBase,
    log_x: Option<bool>,
    log_y: Option<bool>,
    x_data_reference: Option<String>,
    y_data_reference: Option<String>,
}

impl Curve {
    /// Create an empty curve at (level, version)
    pub fn new(level: u32, version: u32) -> Self {
        Self {
            base: NodeBase::new(level, version),
            log_x: None,
            log_y: None,
            x_data_reference: None,
            y_data_reference: None,
        }
    }

    /// Whether the x axis is logarithmic
    pub fn log_x(&self) -> Option<bool> {
        self.log_x
    }

    /// Set whether the x axis is logarithmic
    pub fn set_log_x(&mut self, value: bool) -> OperationResult {
        self.log_x = Some(value);
        Ok(())
    }

    /// Whether the y axis is logarithmic
    pub fn log_y(&self) -> Option<bool> {
        self.log_y
    }

    /// Set whether the y axis is logarithmic
    pub fn set_log_y(&mut self, value: bool) -> OperationResult {
        self.log_y = Some(value);
        Ok(())
    }

    /// Id of the data generator for the x values
    pub fn x_data_reference(&self) -> Option<&str> {
        self.x_data_reference.as_deref()
    }

    /// Set the x data reference; empty unsets, invalid syntax is rejected
    pub fn set_x_data_reference(&mut self, id: &str) -> OperationResult {
        set_sid_ref(&mut self.x_data_reference, id)
    }

    /// Whether the x data reference is set
    pub fn is_set_x_data_reference(&self) -> bool {
        self.x_data_reference.is_some()
    }

    /// Id of the data generator for the y values
    pub fn y_data_reference(&self) -> Option<&str> {
        self.y_data_reference.as_deref()
    }

    /// Set the y data reference; empty unsets, invalid syntax is rejected
    pub fn set_y_data_reference(&mut self, id: &str) -> OperationResult {
        set_sid_ref(&mut self.y_data_reference, id)
    }

    /// Whether the y data reference is set
    pub fn is_set_y_data_reference(&self) -> bool {
        self.y_data_reference.is_some()
    }
}

impl SedBase for Curve {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn type_code(&self) -> TypeCode {
        TypeCode::Curve
    }

    fn element_name(&self) -> &'static str {
        "curve"
    }

    fn has_required_attributes(&self) -> bool {
        self.is_set_x_data_reference() && self.is_set_y_data_reference()
    }

    fn add_expected_attributes(&self, expected: &mut ExpectedAttributes) {
        add_core_expected_attributes(expected);
        expected.add("logX");
        expected.add("logY");
        expected.add("xDataReference");
        expected.add("yDataReference");
    }

    fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        log: &mut ErrorLog,
    ) {
        self.base.read_element_core(
            "curve",
            attributes,
            expected,
            log,
            SedErrorCode::CurveAllowedAttributes,
            false,
        );
        let mut cx = self.base.read_context("curve", attributes, log);
        self.log_x = LOG_X.read(&mut cx);
        self.log_y = LOG_Y.read(&mut cx);
        self.x_data_reference = X_DATA_REFERENCE.read_string(&mut cx);
        self.y_data_reference = Y_DATA_REFERENCE.read_string(&mut cx);
    }

    fn write_attributes(&self, out: &mut XmlAttributes) {
        self.base.write_core_attributes(out);
        LOG_X.write(self.log_x.as_ref(), out);
        LOG_Y.write(self.log_y.as_ref(), out);
        X_DATA_REFERENCE.write_str(self.x_data_reference(), out);
        Y_DATA_REFERENCE.write_str(self.y_data_reference(), out);
    }

    fn rename_own_sid_refs(&mut self, old_id: &str, new_id: &str) {
        rename_ref(&mut self.x_data_reference, old_id, new_id);
        rename_ref(&mut self.y_data_reference, old_id, new_id);
    }
}

impl ListItem for Curve {
    const ITEM_TYPE: TypeCode = TypeCode::AbstractCurve;
    const LIST_ELEMENT: &'static str = "listOfCurves";
    const LIST_ATTRIBUTES_CODE: SedErrorCode = SedErrorCode::Plot2DLoCurvesAllowedCoreAttributes;

    fn create_for_element(name: &str, namespaces: &SedNamespaces) -> Option<Self> {
        (name == "curve").then(|| Curve::new(namespaces.level(), namespaces.version()))
    }
}
