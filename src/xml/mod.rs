//! FatturaPA v1.2 XML generation.
//!
//! Rendering happens in two steps: [`build_document`] turns an [`Invoice`]
//! into a normalized [`Document`] tree, and [`render_document`] writes it
//! as namespaced XML, splitting long texts into repeated elements.
//!
//! # Example
//!
//! ```no_run
//! use fattura::core::*;
//! use fattura::xml;
//!
//! let invoice: Invoice = todo!(); // build via InvoiceBuilder
//! let xml = xml::to_fattura_xml(&invoice).unwrap();
//! ```

mod document;
mod render;
mod tree;

use serde::{Deserialize, Serialize};

use crate::core::{FatturaError, Invoice};

pub use document::{TRANSMISSION_SEQUENCE, build_document};
pub use render::{chunk_text, render_document};
pub use tree::{Document, MapBuilder, Node, Scalar};

/// FatturaPA namespace URIs.
pub mod ns {
    pub const FATTURA: &str = "http://ivaservizi.agenziaentrate.gov.it/docs/xsd/fatture/v1.2";
    pub const DS: &str = "http://www.w3.org/2000/09/xmldsig#";
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
}

/// `xsi:schemaLocation` of the public FatturaPA v1.2 XSD.
pub const SCHEMA_LOCATION: &str = concat!(
    "http://ivaservizi.agenziaentrate.gov.it/docs/xsd/fatture/v1.2 ",
    "http://www.fatturapa.gov.it/export/fatturazione/sdi/fatturapa/v1.2",
    "/Schema_del_file_xml_FatturaPA_versione_1.2.xsd"
);

/// Root element name.
pub const ROOT_ELEMENT: &str = "FatturaElettronica";

/// Maximum characters per text element before it is split.
pub const CHUNK_SIZE: usize = 200;

/// A namespace prefix and its URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub prefix: String,
    pub uri: String,
}

impl Namespace {
    pub fn new(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }
}

/// Namespaces declared on the root element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceMap {
    /// Primary document namespace; the root element is qualified with it.
    pub document: Namespace,
    /// XML digital signature namespace.
    pub signature: Namespace,
    /// XML Schema instance namespace, used for `schemaLocation`.
    pub schema_instance: Namespace,
}

impl Default for NamespaceMap {
    fn default() -> Self {
        Self {
            document: Namespace::new("p", ns::FATTURA),
            signature: Namespace::new("ds", ns::DS),
            schema_instance: Namespace::new("xsi", ns::XSI),
        }
    }
}

/// Rendering configuration. Immutable once built; share it by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub namespaces: NamespaceMap,
    pub schema_location: String,
    pub root_element: String,
    /// Maximum characters per text element.
    pub chunk_size: usize,
    /// Indentation width; `None` writes everything on one line.
    pub indent: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            namespaces: NamespaceMap::default(),
            schema_location: SCHEMA_LOCATION.into(),
            root_element: ROOT_ELEMENT.into(),
            chunk_size: CHUNK_SIZE,
            indent: Some(2),
        }
    }
}

/// Generate FatturaPA XML for an invoice with the default configuration.
pub fn to_fattura_xml(invoice: &Invoice) -> Result<String, FatturaError> {
    to_fattura_xml_with(invoice, &RenderConfig::default())
}

/// Generate FatturaPA XML for an invoice.
pub fn to_fattura_xml_with(invoice: &Invoice, config: &RenderConfig) -> Result<String, FatturaError> {
    let document = build_document(invoice)?;
    render_document(&document, config)
}
