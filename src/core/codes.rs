//! FatturaPA code tables.
//!
//! Each code list serializes as its wire code (e.g. `"TD01"`), so records
//! coming from a persistence layer as JSON deserialize directly.

use serde::{Deserialize, Serialize};

/// `FormatoTrasmissione`: target of the transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransmissionFormat {
    /// FPA12: invoice towards a public administration.
    #[serde(rename = "FPA12")]
    PublicAdministration,
    /// FPR12: invoice towards private recipients.
    #[serde(rename = "FPR12")]
    Private,
}

impl TransmissionFormat {
    pub fn code(&self) -> &'static str {
        match self {
            Self::PublicAdministration => "FPA12",
            Self::Private => "FPR12",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "FPA12" => Some(Self::PublicAdministration),
            "FPR12" => Some(Self::Private),
            _ => None,
        }
    }
}

/// `TipoDocumento`: document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// TD01: fattura.
    #[serde(rename = "TD01")]
    Invoice,
    /// TD02: acconto/anticipo su fattura.
    #[serde(rename = "TD02")]
    InvoiceAdvance,
    /// TD03: acconto/anticipo su parcella.
    #[serde(rename = "TD03")]
    FeeNoteAdvance,
    /// TD04: nota di credito.
    #[serde(rename = "TD04")]
    CreditNote,
    /// TD05: nota di debito.
    #[serde(rename = "TD05")]
    DebitNote,
    /// TD06: parcella.
    #[serde(rename = "TD06")]
    FeeNote,
}

impl DocumentType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invoice => "TD01",
            Self::InvoiceAdvance => "TD02",
            Self::FeeNoteAdvance => "TD03",
            Self::CreditNote => "TD04",
            Self::DebitNote => "TD05",
            Self::FeeNote => "TD06",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TD01" => Some(Self::Invoice),
            "TD02" => Some(Self::InvoiceAdvance),
            "TD03" => Some(Self::FeeNoteAdvance),
            "TD04" => Some(Self::CreditNote),
            "TD05" => Some(Self::DebitNote),
            "TD06" => Some(Self::FeeNote),
            _ => None,
        }
    }
}

/// `RegimeFiscale`: sender tax regime (RF01..RF19).
///
/// Stored as its ordinal; the wire code is `RF` followed by two digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaxRegime(u8);

impl TaxRegime {
    /// RF01: regime ordinario.
    pub const ORDINARY: Self = Self(1);
    /// RF02: contribuenti minimi.
    pub const MINIMUM_TAXPAYERS: Self = Self(2);
    /// RF18: altro.
    pub const OTHER: Self = Self(18);
    /// RF19: regime forfettario.
    pub const FLAT_RATE: Self = Self(19);

    pub fn code(&self) -> String {
        format!("RF{:02}", self.0)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        numbered_code(code, "RF", 19).map(Self)
    }
}

impl TryFrom<String> for TaxRegime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_code(&value).ok_or_else(|| format!("unknown tax regime code '{value}'"))
    }
}

impl From<TaxRegime> for String {
    fn from(value: TaxRegime) -> Self {
        value.code()
    }
}

/// `CondizioniPagamento`: payment condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentCondition {
    /// TP01: pagamento a rate.
    #[serde(rename = "TP01")]
    Installments,
    /// TP02: pagamento completo.
    #[serde(rename = "TP02")]
    Full,
    /// TP03: anticipo.
    #[serde(rename = "TP03")]
    Advance,
}

impl PaymentCondition {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Installments => "TP01",
            Self::Full => "TP02",
            Self::Advance => "TP03",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TP01" => Some(Self::Installments),
            "TP02" => Some(Self::Full),
            "TP03" => Some(Self::Advance),
            _ => None,
        }
    }
}

/// `ModalitaPagamento`: payment method (MP01..MP22).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaymentMethod(u8);

impl PaymentMethod {
    /// MP01: contanti.
    pub const CASH: Self = Self(1);
    /// MP02: assegno.
    pub const CHEQUE: Self = Self(2);
    /// MP05: bonifico.
    pub const BANK_TRANSFER: Self = Self(5);
    /// MP08: carta di pagamento.
    pub const CARD: Self = Self(8);
    /// MP12: RIBA.
    pub const RIBA: Self = Self(12);
    /// MP19: SEPA Direct Debit.
    pub const SEPA_DIRECT_DEBIT: Self = Self(19);

    pub fn code(&self) -> String {
        format!("MP{:02}", self.0)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        numbered_code(code, "MP", 22).map(Self)
    }
}

impl TryFrom<String> for PaymentMethod {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_code(&value).ok_or_else(|| format!("unknown payment method code '{value}'"))
    }
}

impl From<PaymentMethod> for String {
    fn from(value: PaymentMethod) -> Self {
        value.code()
    }
}

/// Parse `{prefix}NN` codes with `NN` in `1..=max`.
fn numbered_code(code: &str, prefix: &str, max: u8) -> Option<u8> {
    let digits = code.strip_prefix(prefix)?;
    if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: u8 = digits.parse().ok()?;
    (1..=max).contains(&n).then_some(n)
}
