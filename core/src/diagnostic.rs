//! Structured errors and warnings collected while parsing and rendering.
//!
//! Nothing in here is a Rust error type: a [`Diagnostic`] is data handed back
//! to the caller inside a render result, and an [`ErrorSink`] is the ordered,
//! append-only list of them for exactly one parse or render call.

use core::fmt;

/// How serious a [`Diagnostic`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The output is missing something or could not be produced.
    Error,
    /// The output was produced but degraded.
    Warning,
}

/// Machine-readable classification of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum StatusCode {
    /// The payload is not valid JSON or has no usable root.
    InvalidJson,
    /// Rendering failed, for one element or for the whole card.
    RenderFailed,
    /// A property the element cannot do without is absent.
    RequiredPropertyMissing,
    /// A property holds a value of the wrong shape.
    InvalidPropertyValue,
    /// No renderer is registered for the element's type.
    NoRendererForType,
    /// An element's type could not be classified at all.
    UnknownElementType,
    /// An action's type is not one of the supported actions.
    UnknownActionElementType,
    /// The host does not support interactive content.
    InteractivityNotSupported,
    /// More actions were declared than the host allows.
    MaxActionsExceeded,
    /// A resource referenced by the card could not be loaded.
    AssetLoadFailed,
    /// None of a media element's sources can be played.
    UnsupportedMediaType,
    /// A value was accepted but ignored.
    InvalidValue,
    /// Host-defined error.
    CustomError,
    /// Host-defined warning.
    CustomWarning,
}

impl StatusCode {
    /// Returns the severity this code is recorded with when a renderer
    /// reports it.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::InvalidJson
            | Self::RenderFailed
            | Self::RequiredPropertyMissing
            | Self::InvalidPropertyValue
            | Self::CustomError => Severity::Error,
            Self::NoRendererForType
            | Self::UnknownElementType
            | Self::UnknownActionElementType
            | Self::InteractivityNotSupported
            | Self::MaxActionsExceeded
            | Self::AssetLoadFailed
            | Self::UnsupportedMediaType
            | Self::InvalidValue
            | Self::CustomWarning => Severity::Warning,
        }
    }

    /// Returns the name used when displaying this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidJson => "InvalidJson",
            Self::RenderFailed => "RenderFailed",
            Self::RequiredPropertyMissing => "RequiredPropertyMissing",
            Self::InvalidPropertyValue => "InvalidPropertyValue",
            Self::NoRendererForType => "NoRendererForType",
            Self::UnknownElementType => "UnknownElementType",
            Self::UnknownActionElementType => "UnknownActionElementType",
            Self::InteractivityNotSupported => "InteractivityNotSupported",
            Self::MaxActionsExceeded => "MaxActionsExceeded",
            Self::AssetLoadFailed => "AssetLoadFailed",
            Self::UnsupportedMediaType => "UnsupportedMediaType",
            Self::InvalidValue => "InvalidValue",
            Self::CustomError => "CustomError",
            Self::CustomWarning => "CustomWarning",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `(severity, status code, message)` record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    severity: Severity,
    code: StatusCode,
    message: String,
}

impl Diagnostic {
    /// Creates a diagnostic with an explicit severity.
    pub fn new(severity: Severity, code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
        }
    }

    /// Creates an error record.
    pub fn error(code: StatusCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    /// Creates a warning record.
    pub fn warning(code: StatusCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    /// Returns the severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the status code.
    #[must_use]
    pub const fn code(&self) -> StatusCode {
        self.code
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` for [`Severity::Error`] records.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{severity}[{}]: {}", self.code, self.message)
    }
}

/// Ordered, append-only collection of diagnostics.
///
/// Insertion order is the observable order; duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSink {
    entries: Vec<Diagnostic>,
}

impl ErrorSink {
    /// Creates an empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a record.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Appends an error record.
    pub fn add_error(&mut self, code: StatusCode, message: impl Into<String>) {
        self.push(Diagnostic::error(code, message));
    }

    /// Appends a warning record.
    pub fn add_warning(&mut self, code: StatusCode, message: impl Into<String>) {
        self.push(Diagnostic::warning(code, message));
    }

    /// Returns every record in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Iterates over every record in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Iterates over error records only.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|entry| entry.is_error())
    }

    /// Iterates over warning records only.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|entry| !entry.is_error())
    }

    /// Returns `true` if at least one error record is present.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the sink, returning the records.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl Extend<Diagnostic> for ErrorSink {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl FromIterator<Diagnostic> for ErrorSink {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ErrorSink {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorSink {
    type Item = &'a Diagnostic;
    type IntoIter = core::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
