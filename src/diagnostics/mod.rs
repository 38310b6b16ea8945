//! Accumulating diagnostics for document reading and checking
//!
//! Structural and schema problems never abort a read. Each one becomes a
//! [`SedError`] appended to an [`ErrorLog`], which the caller inspects after
//! the fact. A generic record may later be refined into a more specific one
//! with [`ErrorLog::reclassify_since`]; refinement is scoped by a [`LogMark`]
//! so records from unrelated elements are never touched.

mod codes;

pub use codes::SedErrorCode;

use std::fmt;

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Informational only
    Info,
    /// Suspicious but not invalid
    Warning,
    /// The document violates a rule
    Error,
    /// Reading could not continue past this point
    Fatal,
}

impl Severity {
    /// Lower-case label
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }
}

/// Broad grouping of diagnostic ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Library-internal bookkeeping records
    Internal,
    /// XML well-formedness and tokenization
    Xml,
    /// SED-ML core structure
    Sedml,
    /// Per-element attribute and content rules
    GeneralConsistency,
    /// Identifier syntax and uniqueness
    IdentifierConsistency,
}

/// One diagnostic record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SedError {
    /// Categorical id
    pub code: SedErrorCode,
    /// Severity of the record
    pub severity: Severity,
    /// Category of the id
    pub category: ErrorCategory,
    /// Detailed message
    pub message: String,
    /// 1-based source line, 0 when unknown
    pub line: u32,
    /// 1-based source column, 0 when unknown
    pub column: u32,
}

impl SedError {
    /// Create a record with the default severity and category of `code`
    pub fn new(code: SedErrorCode, message: impl Into<String>, line: u32, column: u32) -> Self {
        let message = message.into();
        Self {
            code,
            severity: code.severity(),
            category: code.category(),
            message: if message.is_empty() {
                code.short_message().to_string()
            } else {
                message
            },
            line,
            column,
        }
    }

    /// Override the severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Whether this record is an error or worse
    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Error
    }
}

impl fmt::Display for SedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) ", self.severity.as_str(), self.code)?;
        if self.line > 0 {
            write!(f, "at line {}, column {}: ", self.line, self.column)?;
        }
        write!(f, "{}", self.message)
    }
}

/// Position in an [`ErrorLog`] taken before a step that may log records
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LogMark(usize);

/// Ordered, appendable sequence of diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorLog {
    errors: Vec<SedError>,
}

impl ErrorLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a record with the default severity of `code`
    pub fn log_error(&mut self, code: SedErrorCode, message: impl Into<String>, line: u32, column: u32) {
        self.add(SedError::new(code, message, line, column));
    }

    /// Append a prepared record
    pub fn add(&mut self, error: SedError) {
        log::debug!("sedml diagnostic: {}", error);
        self.errors.push(error);
    }

    /// Number of records
    pub fn num_errors(&self) -> usize {
        self.errors.len()
    }

    /// Whether the log holds no records
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record at `index`, if any
    pub fn error(&self, index: usize) -> Option<&SedError> {
        self.errors.get(index)
    }

    /// Iterate records in the order they were logged
    pub fn iter(&self) -> std::slice::Iter<'_, SedError> {
        self.errors.iter()
    }

    /// Whether any record has id `code`
    pub fn contains(&self, code: SedErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Remove and return the first record with id `code`
    pub fn remove(&mut self, code: SedErrorCode) -> Option<SedError> {
        let index = self.errors.iter().position(|e| e.code == code)?;
        Some(self.errors.remove(index))
    }

    /// Remove every record with id `code`, returning how many were removed
    pub fn remove_all(&mut self, code: SedErrorCode) -> usize {
        let before = self.errors.len();
        self.errors.retain(|e| e.code != code);
        before - self.errors.len()
    }

    /// Number of records with exactly the given severity
    pub fn num_fails_with_severity(&self, severity: Severity) -> usize {
        self.errors.iter().filter(|e| e.severity == severity).count()
    }

    /// All records with id `code`
    pub fn errors_with_code(&self, code: SedErrorCode) -> Vec<&SedError> {
        self.errors.iter().filter(|e| e.code == code).collect()
    }

    /// Whether any record is fatal
    pub fn has_fatal(&self) -> bool {
        self.num_fails_with_severity(Severity::Fatal) > 0
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Move every record of `other` to the end of this log
    pub fn append(&mut self, other: &mut ErrorLog) {
        self.errors.append(&mut other.errors);
    }

    /// Current end of the log
    pub fn mark(&self) -> LogMark {
        LogMark(self.errors.len())
    }

    /// Re-log records with id `from` appended since `mark` under id `to`
    ///
    /// Each matching record is removed and a new record with the same message
    /// and position is appended. Returns the number of refined records.
    pub fn reclassify_since(&mut self, mark: LogMark, from: SedErrorCode, to: SedErrorCode) -> usize {
        let end = self.mark();
        self.reclassify_between(mark, end, from, to)
    }

    /// Like [`reclassify_since`](Self::reclassify_since), limited to `[start, end)`
    pub fn reclassify_between(
        &mut self,
        start: LogMark,
        end: LogMark,
        from: SedErrorCode,
        to: SedErrorCode,
    ) -> usize {
        let end = end.0.min(self.errors.len());
        let mut refined = Vec::new();
        let mut index = start.0.min(end);
        let mut stop = end;
        while index < stop {
            if self.errors[index].code == from {
                refined.push(self.errors.remove(index));
                stop -= 1;
            } else {
                index += 1;
            }
        }
        let count = refined.len();
        for old in refined {
            self.log_error(to, old.message, old.line, old.column);
        }
        count
    }
}

impl<'a> IntoIterator for &'a ErrorLog {
    type Item = &'a SedError;
    type IntoIter = std::slice::Iter<'a, SedError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_takes_first_match() {
        let mut log = ErrorLog::new();
        log.log_error(SedErrorCode::UnknownCoreAttribute, "first", 1, 1);
        log.log_error(SedErrorCode::IdSyntaxRule, "", 2, 1);
        log.log_error(SedErrorCode::UnknownCoreAttribute, "second", 3, 1);

        let removed = log.remove(SedErrorCode::UnknownCoreAttribute);
        assert_eq!(removed.map(|e| e.message), Some("first".to_string()));
        assert_eq!(log.num_errors(), 2);
        assert!(log.contains(SedErrorCode::UnknownCoreAttribute));
        assert_eq!(log.error(0).map(|e| e.message.as_str()), Some("Invalid SId syntax"));
    }

    #[test]
    fn test_reclassify_is_scoped_to_mark() {
        let mut log = ErrorLog::new();
        log.log_error(SedErrorCode::UnknownCoreAttribute, "outer", 1, 1);
        let mark = log.mark();
        log.log_error(SedErrorCode::UnknownCoreAttribute, "inner", 2, 5);

        let n = log.reclassify_since(
            mark,
            SedErrorCode::UnknownCoreAttribute,
            SedErrorCode::ModelAllowedAttributes,
        );
        assert_eq!(n, 1);
        assert_eq!(log.errors_with_code(SedErrorCode::UnknownCoreAttribute).len(), 1);
        let refined = log.errors_with_code(SedErrorCode::ModelAllowedAttributes);
        assert_eq!(refined.len(), 1);
        assert_eq!(refined[0].message, "inner");
        assert_eq!((refined[0].line, refined[0].column), (2, 5));
    }

    #[test]
    fn test_reclassify_between_leaves_later_records() {
        let mut log = ErrorLog::new();
        let start = log.mark();
        log.log_error(SedErrorCode::UnknownCoreAttribute, "a", 1, 1);
        let end = log.mark();
        log.log_error(SedErrorCode::UnknownCoreAttribute, "b", 2, 1);

        log.reclassify_between(
            start,
            end,
            SedErrorCode::UnknownCoreAttribute,
            SedErrorCode::DocumentLoModelsAllowedCoreAttributes,
        );
        assert_eq!(log.error(0).map(|e| e.message.as_str()), Some("b"));
        assert_eq!(
            log.error(1).map(|e| e.code),
            Some(SedErrorCode::DocumentLoModelsAllowedCoreAttributes)
        );
    }

    #[test]
    fn test_severity_counts() {
        let mut log = ErrorLog::new();
        log.log_error(SedErrorCode::BadlyFormedXml, "", 1, 1);
        log.log_error(SedErrorCode::ModelAllowedAttributes, "", 1, 1);
        log.add(SedError::new(SedErrorCode::ElementNotInNs, "", 0, 0).with_severity(Severity::Warning));

        assert_eq!(log.num_fails_with_severity(Severity::Fatal), 1);
        assert_eq!(log.num_fails_with_severity(Severity::Error), 1);
        assert_eq!(log.num_fails_with_severity(Severity::Warning), 1);
        assert!(log.has_fatal());
        assert_eq!(log.remove_all(SedErrorCode::BadlyFormedXml), 1);
        assert!(!log.has_fatal());
    }
}
