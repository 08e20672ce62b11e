//! # fattura
//!
//! Italian electronic invoicing: FatturaPA v1.2 XML rendering and export.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Prices are stored tax-inclusive and rendered tax-exclusive with two decimals.
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(feature = "xml")] {
//! use chrono::NaiveDate;
//! use fattura::core::*;
//! use rust_decimal_macros::dec;
//!
//! let sede = AddressBuilder::new("Viale Roma 543", "07100", "Sassari", "SS", "IT").build();
//! let invoice = InvoiceBuilder::new("123", NaiveDate::from_ymd_opt(2017, 1, 18).unwrap())
//!     .sender(SenderBuilder::new("IT", "01234567890", "ALPHA SRL", sede.clone())
//!         .tax_regime(TaxRegime::FLAT_RATE)
//!         .build())
//!     .recipient(RecipientBuilder::company("AMMINISTRAZIONE BETA", sede)
//!         .fiscal_code("09876543210")
//!         .code("AAAAAAA")
//!         .build())
//!     .add_line(LineItemBuilder::new("DESCRIZIONE DELLA FORNITURA", dec!(5), dec!(1.22)))
//!     .build()
//!     .unwrap();
//!
//! let xml = fattura::xml::to_fattura_xml(&invoice).unwrap();
//! assert!(xml.contains("<PrezzoUnitario>1.00</PrezzoUnitario>"));
//! assert!(xml.contains("<ImponibileImporto>5.00</ImponibileImporto>"));
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice types, code tables, formatting, validation |
//! | `xml` | FatturaPA document tree and XML rendering |
//! | `export` | Single/batch export with zip packaging |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "xml")]
pub mod xml;

#[cfg(feature = "export")]
pub mod export;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
