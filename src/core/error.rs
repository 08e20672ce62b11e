use thiserror::Error;

/// Errors that can occur while building, validating, rendering or exporting invoices.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FatturaError {
    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Tax-exclusive derivation failed (e.g. a tax rate of -100%).
    #[error("computation error on {field}: {message}")]
    Computation {
        /// Path of the offending field (e.g. "lines[1].vat_rate").
        field: String,
        message: String,
    },

    /// The intermediate document tree has a shape the renderer cannot emit.
    #[error("render error: {0}")]
    Render(String),

    /// The XML writer failed, or produced bytes that are not UTF-8.
    #[error("cannot write FatturaPA XML: {0}")]
    Write(String),

    /// Archive packaging error.
    #[error("archive error: {0}")]
    Archive(String),
}

impl FatturaError {
    pub(crate) fn computation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Computation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for FatturaError {
    fn from(e: std::io::Error) -> Self {
        Self::Write(e.to_string())
    }
}

/// A field that breaks a FatturaPA constraint.
///
/// `sdi_code` carries the SdI rejection code (e.g. `00311`) when the
/// exchange system would refuse the document for the same reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Path to the invalid field, e.g. `recipient.address.country_code` or `lines[0].quantity`.
    pub field: String,
    pub message: String,
    pub sdi_code: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        match &self.sdi_code {
            Some(code) => write!(f, " (SdI {code})"),
            None => Ok(()),
        }
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            sdi_code: None,
        }
    }

    /// Attach the SdI rejection code for this failure.
    pub fn sdi(mut self, code: impl Into<String>) -> Self {
        self.sdi_code = Some(code.into());
        self
    }
}
