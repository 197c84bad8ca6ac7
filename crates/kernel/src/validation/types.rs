//! Shared types for input validation.
//!
//! Defines finding codes, severity levels, individual findings and the
//! `ValidationReport` that collects them.

use std::fmt;

use drillhole_types::HoleId;

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Blocks reconstruction; no `ValidatedInput` is produced.
    Error,
    /// Informational, or excludes a single borehole later in the pipeline.
    Warning,
}

/// Enumeration of all validation finding codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingCode {
    // --- Structure ---
    /// A required column is absent.
    MissingColumn,
    /// A column that the table's schema does not name.
    ExtraColumn,
    /// A column's element type differs from the schema.
    WrongType,
    /// Columns of one table have different lengths.
    RaggedColumn,
    /// A feature column whose type cannot be draped.
    UnsupportedFeatureType,

    // --- Content ---
    /// NaN or infinite coordinate, depth or angle.
    NonFiniteValue,
    /// More than one collar row for the same borehole.
    DuplicateCollar,
    /// Survey AT does not strictly increase within a borehole.
    UnorderedSurvey,
    /// Too few survey stations to build a trajectory.
    InsufficientSurvey,
    /// FROM is negative or not below TO.
    InvalidInterval,
    /// A borehole appears in some tables but not in others.
    IdMismatch,
}

impl fmt::Display for FindingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single validation finding (error or warning).
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFinding {
    pub code: FindingCode,
    pub severity: Severity,
    /// Table the finding refers to (`collar`, `survey` or the feature table's name).
    pub table: String,
    /// Column name, or `ID` for borehole-level findings.
    pub field: String,
    pub hole_id: Option<HoleId>,
    pub expected: String,
    pub actual: String,
}

impl ValidationFinding {
    pub fn error(code: FindingCode, table: &str, field: &str) -> Self {
        Self {
            code,
            severity: Severity::Error,
            table: table.to_owned(),
            field: field.to_owned(),
            hole_id: None,
            expected: String::new(),
            actual: String::new(),
        }
    }

    pub fn warning(code: FindingCode, table: &str, field: &str) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(code, table, field)
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn for_hole(mut self, hole_id: &HoleId) -> Self {
        self.hole_id = Some(hole_id.clone());
        self
    }

    pub fn expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = expected.into();
        self
    }

    pub fn actual(mut self, actual: impl Into<String>) -> Self {
        self.actual = actual.into();
        self
    }
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sev = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
        };
        write!(f, "[{}] {}.{}", sev, self.table, self.field)?;
        if let Some(hole) = &self.hole_id {
            write!(f, " hole={hole}")?;
        }
        write!(f, ": expected {}, found {} (code: {})", self.expected, self.actual, self.code)
    }
}

/// Everything validation found, split by severity.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationFinding>,
    pub warnings: Vec<ValidationFinding>,
}

impl ValidationReport {
    pub fn push(&mut self, finding: ValidationFinding) {
        match finding.severity {
            Severity::Error => self.errors.push(finding),
            Severity::Warning => self.warnings.push(finding),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Filter errors and warnings by a specific code.
    pub fn findings_of(&self, code: FindingCode) -> Vec<&ValidationFinding> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .filter(|f| f.code == code)
            .collect()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ValidationReport: valid={}, errors={}, warnings={}",
            self.is_valid(),
            self.errors.len(),
            self.warnings.len()
        )?;
        for e in &self.errors {
            writeln!(f, "  {e}")?;
        }
        for w in &self.warnings {
            writeln!(f, "  {w}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}
