use std::fmt;

/// Category of a single field-level validation problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// A required field was not supplied.
    Missing,
    /// A field not declared on the type was supplied while extra fields are forbidden.
    ExtraForbidden,
    /// The supplied value has the wrong shape for the field.
    Type,
    /// A declared constraint (length, range, email, ...) rejected the value.
    Constraint,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Missing => "missing",
            IssueKind::ExtraForbidden => "extra_forbidden",
            IssueKind::Type => "type_error",
            IssueKind::Constraint => "constraint",
        }
    }
}

/// One problem found while validating a transfer object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Field name, or the type name when the problem is not tied to one field.
    pub field: String,
    pub kind: IssueKind,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }
}

/// Raised when values fail the constraints declared by a transfer object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the type being validated.
    pub model: &'static str,
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn new(model: &'static str, issues: Vec<FieldIssue>) -> Self {
        Self { model, issues }
    }

    pub fn single(model: &'static str, issue: FieldIssue) -> Self {
        Self::new(model, vec![issue])
    }

    /// Issues reported for `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldIssue> + 'a {
        self.issues.iter().filter(move |issue| issue.field == field)
    }

    pub fn has_issue(&self, field: &str, kind: IssueKind) -> bool {
        self.for_field(field).any(|issue| issue.kind == kind)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} validation error(s) for {}",
            self.issues.len(),
            self.model
        )?;
        for issue in &self.issues {
            write!(f, "; {}: {} [{}]", issue.field, issue.message, issue.kind.as_str())?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised by the converter functions.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An argument that must be a plain record (or a mapped sub-record) is not.
    #[error("Type error: {0}")]
    Type(String),

    /// A value expected to be a stored model instance is not one.
    #[error("Not a valid model instance: {0}")]
    NotValidModel(String),

    #[error("Model {model} has no attribute `{attribute}`")]
    UnknownAttribute { model: String, attribute: String },
}
