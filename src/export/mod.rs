//! Single and batch export of rendered invoices.
//!
//! A single invoice is exported as its raw XML document; several invoices
//! are packaged into a zip archive. Batches are all-or-nothing: every
//! invoice is rendered before the archive is started, and the first failure
//! aborts the export without output.
//!
//! # Example
//!
//! ```ignore
//! use fattura::export::*;
//!
//! let exporter = Exporter::new();
//! let payload = exporter.export(&invoices)?;
//! // payload.filename():     "IT01234567890_00001.xml" or "invoices.zip"
//! // payload.content_type(): "text/xml" or "application/zip"
//! ```

mod archive;
mod filename;

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::core::{FatturaError, Invoice};
use crate::xml::{RenderConfig, to_fattura_xml_with};

pub use filename::{FilenameScheme, SdiFilename};

/// Name of the archive produced for multi-invoice exports.
pub const ARCHIVE_FILENAME: &str = "invoices.zip";

/// Content type of a single exported document.
pub const XML_CONTENT_TYPE: &str = "text/xml";

/// Content type of a multi-invoice archive.
pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Result of [`Exporter::export`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportPayload {
    /// Exactly one invoice: the XML document itself.
    Xml { filename: String, bytes: Vec<u8> },
    /// Several invoices packaged as a zip archive.
    Archive { filename: String, bytes: Vec<u8> },
}

impl ExportPayload {
    pub fn filename(&self) -> &str {
        match self {
            Self::Xml { filename, .. } | Self::Archive { filename, .. } => filename,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Xml { .. } => XML_CONTENT_TYPE,
            Self::Archive { .. } => ZIP_CONTENT_TYPE,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Xml { bytes, .. } | Self::Archive { bytes, .. } => bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Xml { bytes, .. } | Self::Archive { bytes, .. } => bytes,
        }
    }
}

/// Renders invoices and names the resulting files.
#[derive(Debug, Clone)]
pub struct Exporter<S = SdiFilename> {
    scheme: S,
    config: RenderConfig,
}

impl Exporter<SdiFilename> {
    /// Exporter with SdI file names and the default FatturaPA configuration.
    pub fn new() -> Self {
        Self {
            scheme: SdiFilename,
            config: RenderConfig::default(),
        }
    }
}

impl Default for Exporter<SdiFilename> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: FilenameScheme> Exporter<S> {
    /// Replace the file naming convention.
    pub fn with_scheme<T: FilenameScheme>(self, scheme: T) -> Exporter<T> {
        Exporter {
            scheme,
            config: self.config,
        }
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render one invoice, returning its file name and XML bytes.
    #[instrument(skip_all, fields(number = %invoice.number))]
    pub fn render_one(&self, invoice: &Invoice) -> Result<(String, Vec<u8>), FatturaError> {
        let xml = to_fattura_xml_with(invoice, &self.config)?;
        let filename = self.scheme.filename(invoice);
        debug!(%filename, bytes = xml.len(), "rendered invoice");
        Ok((filename, xml.into_bytes()))
    }

    /// Render every invoice and package them into a zip archive.
    ///
    /// Fails on the first invoice that cannot be rendered, and on duplicate
    /// file names; no archive is produced in either case.
    #[instrument(skip_all, fields(count = invoices.len()))]
    pub fn render_many(&self, invoices: &[Invoice]) -> Result<Vec<u8>, FatturaError> {
        let files = self.render_all(invoices)?;
        let archive = archive::zip_files(&files)?;
        debug!(files = files.len(), bytes = archive.len(), "packaged archive");
        Ok(archive)
    }

    /// Export one invoice as XML, or several as a zip archive.
    pub fn export(&self, invoices: &[Invoice]) -> Result<ExportPayload, FatturaError> {
        match invoices {
            [] => Err(FatturaError::Builder("no invoices to export".into())),
            [invoice] => {
                let (filename, bytes) = self.render_one(invoice)?;
                Ok(ExportPayload::Xml { filename, bytes })
            }
            _ => Ok(ExportPayload::Archive {
                filename: ARCHIVE_FILENAME.into(),
                bytes: self.render_many(invoices)?,
            }),
        }
    }

    fn render_all(&self, invoices: &[Invoice]) -> Result<Vec<(String, Vec<u8>)>, FatturaError> {
        if invoices.is_empty() {
            return Err(FatturaError::Builder("no invoices to export".into()));
        }

        let files = invoices
            .iter()
            .map(|invoice| self.render_one(invoice))
            .collect::<Result<Vec<_>, _>>()?;

        {
            let mut seen = HashSet::new();
            if let Some((name, _)) = files.iter().find(|(name, _)| !seen.insert(name.as_str())) {
                return Err(FatturaError::Archive(format!("duplicate file name '{name}'")));
            }
        }
        Ok(files)
    }
}
