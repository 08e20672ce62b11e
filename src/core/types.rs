use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::codes::*;

/// A finalized invoice ready for FatturaPA rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Issuing party (`CedentePrestatore`).
    pub sender: Sender,
    /// Receiving party (`CessionarioCommittente`) and its SdI routing data.
    pub recipient: Recipient,
    /// `Numero`: invoice number as displayed on the document.
    pub number: String,
    /// `TipoDocumento`.
    pub document_type: DocumentType,
    /// `Divisa`: ISO 4217 currency code.
    pub currency_code: String,
    /// `Data`: issue date.
    pub issue_date: NaiveDate,
    /// `FormatoTrasmissione`; also the root `versione` attribute.
    pub transmission_format: TransmissionFormat,
    /// `Causale`: free text of any length.
    pub causal: String,
    /// Invoice VAT rate in percent (e.g. `22`).
    pub tax_rate: Decimal,
    /// Tax-inclusive invoice total.
    pub amount: Decimal,
    /// Declared total tax. Kept for the record; the summary is derived from
    /// `amount` and `tax_rate`.
    pub tax_amount: Decimal,
    /// `CondizioniPagamento`.
    pub payment_condition: PaymentCondition,
    /// `ModalitaPagamento`.
    pub payment_method: PaymentMethod,
    /// `DataScadenzaPagamento`.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// `DettaglioLinee`, in row order.
    pub lines: Vec<LineItem>,
}

/// Invoice line. Prices are tax-inclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// `NumeroLinea`, 1-based.
    pub row: u32,
    pub description: String,
    pub quantity: Decimal,
    /// Tax-inclusive price per unit.
    pub unit_price: Decimal,
    /// Tax-inclusive line total.
    pub total_price: Decimal,
    /// VAT rate in percent.
    pub vat_rate: Decimal,
}

/// The issuing company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sender {
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: String,
    /// Sender code, used as both VAT and fiscal identifier.
    pub code: String,
    pub company_name: String,
    pub tax_regime: TaxRegime,
    pub address: Address,
    #[serde(default)]
    pub contact: Option<Contact>,
}

/// `Contatti` of the issuing company.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// `Sede`: postal address shared by sender and recipient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    /// `Indirizzo`: street and house number.
    pub street: String,
    /// `CAP`.
    pub postcode: String,
    /// `Comune`.
    pub city: String,
    /// `Provincia`: two-letter province code.
    pub province: String,
    /// `Nazione`: ISO 3166-1 alpha-2 country code.
    pub country_code: String,
}

/// The receiving party.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub identity: RecipientIdentity,
    pub tax_id: RecipientTaxId,
    pub address: Address,
    /// `CodiceDestinatario`: 7-character SdI routing code.
    #[serde(default)]
    pub code: Option<String>,
    /// `PECDestinatario`: certified-mail address.
    #[serde(default)]
    pub pec: Option<String>,
}

/// `Anagrafica` of the recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecipientIdentity {
    /// `Denominazione`.
    Company { denomination: String },
    /// `Nome` + `Cognome`.
    Person {
        first_name: String,
        last_name: String,
    },
}

/// Fiscal identification of the recipient. Exactly one form is emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecipientTaxId {
    /// `CodiceFiscale`.
    FiscalCode { code: String },
    /// `IdFiscaleIVA` (`IdPaese` + `IdCodice`).
    Vat { country_code: String, code: String },
}

impl RecipientTaxId {
    /// Picks the fiscal-code form when a fiscal code is given, the VAT form otherwise.
    pub fn from_parts(
        fiscal_code: Option<&str>,
        country_code: impl Into<String>,
        tax_code: impl Into<String>,
    ) -> Self {
        match fiscal_code {
            Some(code) if !code.trim().is_empty() => Self::FiscalCode { code: code.into() },
            _ => Self::Vat {
                country_code: country_code.into(),
                code: tax_code.into(),
            },
        }
    }
}

/// `DatiRiepilogo` values, already formatted for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxSummary {
    /// `AliquotaIVA`.
    pub rate: String,
    /// `ImponibileImporto`.
    pub taxable_amount: String,
    /// `Imposta`.
    pub tax_amount: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_id_prefers_fiscal_code() {
        let id = RecipientTaxId::from_parts(Some("RSSMRA80A01H501U"), "IT", "01234567890");
        assert_eq!(
            id,
            RecipientTaxId::FiscalCode {
                code: "RSSMRA80A01H501U".into()
            }
        );
    }

    #[test]
    fn tax_id_falls_back_to_vat() {
        let id = RecipientTaxId::from_parts(Some("  "), "IT", "01234567890");
        assert_eq!(
            id,
            RecipientTaxId::Vat {
                country_code: "IT".into(),
                code: "01234567890".into()
            }
        );
        assert!(matches!(
            RecipientTaxId::from_parts(None, "IT", "1"),
            RecipientTaxId::Vat { .. }
        ));
    }
}
