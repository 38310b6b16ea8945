//! Attribute schema reader and writer
//!
//! Each attribute a node kind understands is described once by an
//! [`AttributeDescriptor`]: its name, value type, whether it is required and
//! which diagnostic ids to use when it is missing or malformed. Reading goes
//! through a [`ReadContext`] so every problem lands in the error log with the
//! element's position.
//!
//! Coercion failures are first logged by the XML layer as the generic
//! `XmlAttributeTypeMismatch` and then refined into the descriptor's own id.

use super::XmlAttributes;
use crate::diagnostics::{ErrorLog, SedErrorCode};
use crate::syntax;

/// Attribute names a node kind accepts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedAttributes {
    names: Vec<&'static str>,
}

impl ExpectedAttributes {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `name`
    pub fn add(&mut self, name: &'static str) {
        if !self.names.contains(&name) {
            self.names.push(name);
        }
    }

    /// Whether `name` is accepted
    pub fn has(&self, name: &str) -> bool {
        self.names.contains(&name)
    }

    /// Number of accepted names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing is accepted
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A value that can live in an XML attribute
pub trait XmlValue: Sized {
    /// Schema type name used in messages
    const TYPE_NAME: &'static str;

    /// Parse from attribute text
    fn parse_xml(s: &str) -> Option<Self>;

    /// Format as attribute text
    fn to_xml(&self) -> String;
}

impl XmlValue for String {
    const TYPE_NAME: &'static str = "string";

    fn parse_xml(s: &str) -> Option<Self> {
        Some(s.to_string())
    }

    fn to_xml(&self) -> String {
        self.clone()
    }
}

impl XmlValue for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn parse_xml(s: &str) -> Option<Self> {
        match s.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }

    fn to_xml(&self) -> String {
        let text = if *self { "true" } else { "false" };
        text.to_string()
    }
}

impl XmlValue for i32 {
    const TYPE_NAME: &'static str = "integer";

    fn parse_xml(s: &str) -> Option<Self> {
        s.trim().parse().ok()
    }

    fn to_xml(&self) -> String {
        self.to_string()
    }
}

impl XmlValue for u32 {
    const TYPE_NAME: &'static str = "non-negative integer";

    fn parse_xml(s: &str) -> Option<Self> {
        s.trim().parse().ok()
    }

    fn to_xml(&self) -> String {
        self.to_string()
    }
}

impl XmlValue for f64 {
    const TYPE_NAME: &'static str = "double";

    fn parse_xml(s: &str) -> Option<Self> {
        let s = s.trim();
        match s {
            "INF" | "+INF" => return Some(f64::INFINITY),
            "-INF" => return Some(f64::NEG_INFINITY),
            "NaN" => return Some(f64::NAN),
            _ => {}
        }
        // Rust also accepts "inf" and "nan", which XML doubles do not
        if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
            return None;
        }
        s.parse().ok()
    }

    fn to_xml(&self) -> String {
        let v = *self;
        if v.is_nan() {
            "NaN".to_string()
        } else if v.is_infinite() {
            let text = if v > 0.0 { "INF" } else { "-INF" };
            text.to_string()
        } else if v != 0.0 && (v.abs() >= 1e15 || v.abs() < 1e-5) {
            format!("{:e}", v)
        } else {
            format!("{}", v)
        }
    }
}

/// Everything needed to read one element's attributes
pub struct ReadContext<'a> {
    /// Attributes of the element being read
    pub attributes: &'a XmlAttributes,
    /// Destination for diagnostics
    pub log: &'a mut ErrorLog,
    /// Element name, for messages
    pub element: &'static str,
    /// Element position
    pub line: u32,
    /// Element position
    pub column: u32,
    /// Level of the node being read
    pub level: u32,
    /// Version of the node being read
    pub version: u32,
}

impl<'a> ReadContext<'a> {
    /// Log a diagnostic at the element's position
    pub fn log_error(&mut self, code: SedErrorCode, message: impl Into<String>) {
        self.log.log_error(code, message, self.line, self.column);
    }

    /// Coerce attribute `name` into `T`, logging a type mismatch on failure
    pub fn read_into<T: XmlValue>(&mut self, name: &str) -> Option<T> {
        let raw = self.attributes.get(name)?;
        match T::parse_xml(raw) {
            Some(v) => Some(v),
            None => {
                let message = format!(
                    "The value '{}' of attribute '{}' on the <{}> element is not a valid {}.",
                    raw,
                    name,
                    self.element,
                    T::TYPE_NAME
                );
                self.log_error(SedErrorCode::XmlAttributeTypeMismatch, message);
                None
            }
        }
    }
}

/// Value type of a described attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Free text
    String,
    /// Identifier defining this element
    SId,
    /// Identifier pointing at another element
    SIdRef,
    /// XML ID, used by `metaid`
    Id,
    /// `true`/`false`
    Boolean,
    /// Signed integer
    Integer,
    /// Double-precision number
    Double,
}

/// When a described attribute is mandatory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Never required
    Optional,
    /// Always required
    Required,
    /// Required for Level 1 from the given version on, and for later levels
    RequiredFromVersion(u32),
}

/// Name, type and required-ness of one attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDescriptor {
    /// Attribute name
    pub name: &'static str,
    /// Value type
    pub kind: AttributeKind,
    /// Required-ness
    pub requirement: Requirement,
    /// Id logged when a required value is missing
    pub on_missing: SedErrorCode,
    /// Id a coercion or syntax failure is refined into
    pub on_invalid: Option<SedErrorCode>,
}

impl AttributeDescriptor {
    /// Describe an optional attribute
    pub const fn new(name: &'static str, kind: AttributeKind) -> Self {
        Self {
            name,
            kind,
            requirement: Requirement::Optional,
            on_missing: SedErrorCode::NotSchemaConformant,
            on_invalid: None,
        }
    }

    /// Make the attribute required, logging `code` when it is missing
    pub const fn required(mut self, code: SedErrorCode) -> Self {
        self.requirement = Requirement::Required;
        self.on_missing = code;
        self
    }

    /// Make the attribute required from `version` on, logging `code` when missing
    pub const fn required_from_version(mut self, version: u32, code: SedErrorCode) -> Self {
        self.requirement = Requirement::RequiredFromVersion(version);
        self.on_missing = code;
        self
    }

    /// Refine invalid values into `code`
    pub const fn invalid(mut self, code: SedErrorCode) -> Self {
        self.on_invalid = Some(code);
        self
    }

    /// Whether the attribute is required at (level, version)
    pub fn is_required(&self, level: u32, version: u32) -> bool {
        match self.requirement {
            Requirement::Optional => false,
            Requirement::Required => true,
            Requirement::RequiredFromVersion(v) => level > 1 || version >= v,
        }
    }

    fn report_missing(&self, cx: &mut ReadContext<'_>) {
        if self.is_required(cx.level, cx.version) {
            let message = format!(
                "Sedml attribute '{}' is missing from the <{}> element.",
                self.name, cx.element
            );
            cx.log_error(self.on_missing, message);
        }
    }

    /// Read a text-valued attribute (string, SId, SIdRef or ID)
    ///
    /// Empty values are reported and treated as absent. Values with invalid
    /// identifier syntax are reported but kept.
    pub fn read_string(&self, cx: &mut ReadContext<'_>) -> Option<String> {
        let Some(value) = cx.attributes.get(self.name) else {
            self.report_missing(cx);
            return None;
        };
        if value.is_empty() {
            let message = format!(
                "The attribute '{}' on the <{}> element must not be an empty string.",
                self.name, cx.element
            );
            cx.log_error(SedErrorCode::NotSchemaConformant, message);
            return None;
        }
        let value = value.to_string();

        let syntax_error = match self.kind {
            AttributeKind::SId | AttributeKind::SIdRef if !syntax::is_valid_sid(&value) => {
                Some(SedErrorCode::IdSyntaxRule)
            }
            AttributeKind::Id if !syntax::is_valid_xml_id(&value) => {
                Some(SedErrorCode::InvalidMetaidSyntax)
            }
            _ => None,
        };
        if let Some(code) = syntax_error {
            let message = format!(
                "The attribute {}='{}' on the <{}> element does not conform to the syntax.",
                self.name, value, cx.element
            );
            cx.log_error(self.on_invalid.unwrap_or(code), message);
        }
        Some(value)
    }

    /// Read a typed attribute
    pub fn read<T: XmlValue>(&self, cx: &mut ReadContext<'_>) -> Option<T> {
        if !cx.attributes.has(self.name) {
            self.report_missing(cx);
            return None;
        }
        let mark = cx.log.mark();
        let value = cx.read_into::<T>(self.name);
        if value.is_none() {
            if let Some(code) = self.on_invalid {
                cx.log
                    .reclassify_since(mark, SedErrorCode::XmlAttributeTypeMismatch, code);
            }
        }
        value
    }

    /// Write `value` when it is set
    pub fn write<T: XmlValue>(&self, value: Option<&T>, out: &mut XmlAttributes) {
        if let Some(v) = value {
            out.add(self.name, v.to_xml());
        }
    }

    /// Write a text value when it is set
    pub fn write_str(&self, value: Option<&str>, out: &mut XmlAttributes) {
        if let Some(v) = value {
            out.add(self.name, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUE: AttributeDescriptor = AttributeDescriptor::new("value", AttributeKind::Double)
        .required(SedErrorCode::ParameterAllowedAttributes)
        .invalid(SedErrorCode::ParameterValueMustBeDouble);

    const REF: AttributeDescriptor = AttributeDescriptor::new("modelReference", AttributeKind::SIdRef)
        .required(SedErrorCode::TaskAllowedAttributes);

    fn context<'a>(attributes: &'a XmlAttributes, log: &'a mut ErrorLog) -> ReadContext<'a> {
        ReadContext {
            attributes,
            log,
            element: "parameter",
            line: 4,
            column: 2,
            level: 1,
            version: 3,
        }
    }

    #[test]
    fn test_double_mismatch_is_refined() {
        let mut attrs = XmlAttributes::new();
        attrs.add("value", "abc");
        let mut log = ErrorLog::new();
        let value = VALUE.read::<f64>(&mut context(&attrs, &mut log));

        assert_eq!(value, None);
        assert_eq!(log.num_errors(), 1);
        assert!(log.contains(SedErrorCode::ParameterValueMustBeDouble));
        assert!(!log.contains(SedErrorCode::XmlAttributeTypeMismatch));
        assert_eq!(log.error(0).map(|e| (e.line, e.column)), Some((4, 2)));
    }

    #[test]
    fn test_missing_required_is_logged() {
        let attrs = XmlAttributes::new();
        let mut log = ErrorLog::new();
        assert_eq!(VALUE.read::<f64>(&mut context(&attrs, &mut log)), None);
        assert!(log.contains(SedErrorCode::ParameterAllowedAttributes));
    }

    #[test]
    fn test_invalid_reference_is_kept_and_reported() {
        let mut attrs = XmlAttributes::new();
        attrs.add("modelReference", "1bad");
        let mut log = ErrorLog::new();
        let value = REF.read_string(&mut context(&attrs, &mut log));
        assert_eq!(value.as_deref(), Some("1bad"));
        assert!(log.contains(SedErrorCode::IdSyntaxRule));
    }

    #[test]
    fn test_empty_string_is_absent() {
        let mut attrs = XmlAttributes::new();
        attrs.add("modelReference", "");
        let mut log = ErrorLog::new();
        assert_eq!(REF.read_string(&mut context(&attrs, &mut log)), None);
        assert!(log.contains(SedErrorCode::NotSchemaConformant));
    }

    #[test]
    fn test_version_dependent_requirement() {
        let d = AttributeDescriptor::new("language", AttributeKind::String)
            .required_from_version(4, SedErrorCode::ModelAllowedAttributes);
        assert!(!d.is_required(1, 3));
        assert!(d.is_required(1, 4));
        assert!(d.is_required(2, 1));
    }

    #[test]
    fn test_double_text_forms() {
        assert_eq!(f64::parse_xml("INF"), Some(f64::INFINITY));
        assert_eq!(f64::parse_xml("-INF"), Some(f64::NEG_INFINITY));
        assert!(f64::parse_xml("NaN").is_some_and(f64::is_nan));
        assert_eq!(f64::parse_xml("inf"), None);
        assert_eq!(f64::parse_xml(" 1.5e3 "), Some(1500.0));
        assert_eq!(f64::NEG_INFINITY.to_xml(), "-INF");
        assert_eq!(10.0f64.to_xml(), "10");
        assert_eq!(f64::parse_xml(&1e-7f64.to_xml()), Some(1e-7));
        assert_eq!(bool::parse_xml("1"), Some(true));
        assert_eq!(bool::parse_xml("yes"), None);
    }
}
