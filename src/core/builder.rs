use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::codes::*;
use super::error::FatturaError;
use super::format::tax_exclusive_for;
use super::types::*;
use super::validation;

/// Builder for constructing valid invoices.
///
/// Line rows are numbered in insertion order, starting at 1. When no total
/// is given, the invoice amount is the sum of the line totals, and the
/// declared tax amount is derived from it.
///
/// ```
/// use fattura::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let address = AddressBuilder::new("Via Roma 1", "00100", "Roma", "RM", "IT").build();
/// let invoice = InvoiceBuilder::new("2024/001", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
///     .sender(SenderBuilder::new("IT", "01234567890", "ALPHA SRL", address.clone()).build())
///     .recipient(
///         RecipientBuilder::company("BETA SPA", address)
///             .vat_id("IT", "09876543210")
///             .code("ABC1234")
///             .build(),
///     )
///     .add_line(LineItemBuilder::new("Consulenza", dec!(2), dec!(61)).vat_rate(dec!(22)))
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.lines[0].row, 1);
/// assert_eq!(invoice.amount, dec!(122));
/// assert_eq!(invoice.tax_amount, dec!(22.00));
/// ```
pub struct InvoiceBuilder {
    number: String,
    issue_date: NaiveDate,
    sender: Option<Sender>,
    recipient: Option<Recipient>,
    document_type: DocumentType,
    currency_code: String,
    transmission_format: TransmissionFormat,
    causal: String,
    tax_rate: Decimal,
    amount: Option<Decimal>,
    tax_amount: Option<Decimal>,
    payment_condition: PaymentCondition,
    payment_method: PaymentMethod,
    due_date: Option<NaiveDate>,
    lines: Vec<LineItemBuilder>,
}

impl InvoiceBuilder {
    pub fn new(number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            issue_date,
            sender: None,
            recipient: None,
            document_type: DocumentType::Invoice,
            currency_code: "EUR".to_string(),
            transmission_format: TransmissionFormat::Private,
            causal: String::new(),
            tax_rate: dec!(22),
            amount: None,
            tax_amount: None,
            payment_condition: PaymentCondition::Full,
            payment_method: PaymentMethod::BANK_TRANSFER,
            due_date: None,
            lines: Vec::new(),
        }
    }

    pub fn sender(mut self, sender: Sender) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn recipient(mut self, recipient: Recipient) -> Self {
        self.recipient = Some(recipient);
        self
    }

    pub fn document_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = document_type;
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    pub fn transmission_format(mut self, format: TransmissionFormat) -> Self {
        self.transmission_format = format;
        self
    }

    pub fn causal(mut self, causal: impl Into<String>) -> Self {
        self.causal = causal.into();
        self
    }

    pub fn tax_rate(mut self, rate: Decimal) -> Self {
        self.tax_rate = rate;
        self
    }

    /// Tax-inclusive invoice total.
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn tax_amount(mut self, amount: Decimal) -> Self {
        self.tax_amount = Some(amount);
        self
    }

    pub fn payment(mut self, condition: PaymentCondition, method: PaymentMethod) -> Self {
        self.payment_condition = condition;
        self.payment_method = method;
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn add_line(mut self, line: LineItemBuilder) -> Self {
        self.lines.push(line);
        self
    }

    /// Build the invoice and run validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Invoice, FatturaError> {
        if self.lines.len() > 9_999 {
            return Err(FatturaError::Builder(
                "invoice cannot have more than 9,999 line items".into(),
            ));
        }

        let derive_tax = self.tax_amount.is_none();
        let mut invoice = self.assemble()?;

        let errors = validation::validate_invoice(&invoice);
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(FatturaError::Validation(msg));
        }

        if derive_tax {
            invoice.tax_amount = derived_tax_amount(&invoice)?;
        }
        Ok(invoice)
    }

    /// Build without validation, e.g. for records imported from elsewhere.
    /// The tax amount defaults to zero when not given.
    pub fn build_unchecked(self) -> Result<Invoice, FatturaError> {
        self.assemble()
    }

    fn assemble(self) -> Result<Invoice, FatturaError> {
        let sender = self
            .sender
            .ok_or_else(|| FatturaError::Builder("sender is required".into()))?;
        let recipient = self
            .recipient
            .ok_or_else(|| FatturaError::Builder("recipient is required".into()))?;

        let lines = self
            .lines
            .into_iter()
            .zip(1u32..)
            .map(|(line, row)| line.build(row))
            .collect::<Result<Vec<_>, _>>()?;

        let amount = match self.amount {
            Some(amount) => amount,
            None => lines
                .iter()
                .try_fold(Decimal::ZERO, |sum, l| sum.checked_add(l.total_price))
                .ok_or_else(|| FatturaError::Builder("sum of line totals overflows".into()))?,
        };

        Ok(Invoice {
            sender,
            recipient,
            number: self.number,
            document_type: self.document_type,
            currency_code: self.currency_code,
            issue_date: self.issue_date,
            transmission_format: self.transmission_format,
            causal: self.causal,
            tax_rate: self.tax_rate,
            amount,
            tax_amount: self.tax_amount.unwrap_or_default(),
            payment_condition: self.payment_condition,
            payment_method: self.payment_method,
            due_date: self.due_date,
            lines,
        })
    }
}

fn derived_tax_amount(invoice: &Invoice) -> Result<Decimal, FatturaError> {
    let taxable = tax_exclusive_for("tax_rate", invoice.amount, invoice.tax_rate)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    invoice
        .amount
        .checked_sub(taxable)
        .ok_or_else(|| FatturaError::computation("amount", "tax amount overflows"))
}

/// Builder for Sender.
pub struct SenderBuilder {
    country_code: String,
    code: String,
    company_name: String,
    tax_regime: TaxRegime,
    address: Address,
    contact: Option<Contact>,
}

impl SenderBuilder {
    pub fn new(
        country_code: impl Into<String>,
        code: impl Into<String>,
        company_name: impl Into<String>,
        address: Address,
    ) -> Self {
        Self {
            country_code: country_code.into(),
            code: code.into(),
            company_name: company_name.into(),
            tax_regime: TaxRegime::ORDINARY,
            address,
            contact: None,
        }
    }

    pub fn tax_regime(mut self, regime: TaxRegime) -> Self {
        self.tax_regime = regime;
        self
    }

    pub fn contact(mut self, phone: Option<String>, email: Option<String>) -> Self {
        self.contact = Some(Contact { phone, email });
        self
    }

    pub fn build(self) -> Sender {
        Sender {
            country_code: self.country_code,
            code: self.code,
            company_name: self.company_name,
            tax_regime: self.tax_regime,
            address: self.address,
            contact: self.contact,
        }
    }
}

/// Builder for Recipient.
///
/// Without an explicit tax identifier the recipient gets an empty VAT
/// identifier in its address country, which validation rejects.
pub struct RecipientBuilder {
    identity: RecipientIdentity,
    tax_id: Option<RecipientTaxId>,
    address: Address,
    code: Option<String>,
    pec: Option<String>,
}

impl RecipientBuilder {
    pub fn company(denomination: impl Into<String>, address: Address) -> Self {
        Self::with_identity(
            RecipientIdentity::Company {
                denomination: denomination.into(),
            },
            address,
        )
    }

    pub fn person(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: Address,
    ) -> Self {
        Self::with_identity(
            RecipientIdentity::Person {
                first_name: first_name.into(),
                last_name: last_name.into(),
            },
            address,
        )
    }

    fn with_identity(identity: RecipientIdentity, address: Address) -> Self {
        Self {
            identity,
            tax_id: None,
            address,
            code: None,
            pec: None,
        }
    }

    pub fn fiscal_code(mut self, code: impl Into<String>) -> Self {
        self.tax_id = Some(RecipientTaxId::FiscalCode { code: code.into() });
        self
    }

    pub fn vat_id(mut self, country_code: impl Into<String>, code: impl Into<String>) -> Self {
        self.tax_id = Some(RecipientTaxId::Vat {
            country_code: country_code.into(),
            code: code.into(),
        });
        self
    }

    /// SdI routing code (`CodiceDestinatario`).
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Certified-mail address (`PECDestinatario`).
    pub fn pec(mut self, pec: impl Into<String>) -> Self {
        self.pec = Some(pec.into());
        self
    }

    pub fn build(self) -> Recipient {
        let tax_id = self.tax_id.unwrap_or_else(|| RecipientTaxId::Vat {
            country_code: self.address.country_code.clone(),
            code: String::new(),
        });
        Recipient {
            identity: self.identity,
            tax_id,
            address: self.address,
            code: self.code,
            pec: self.pec,
        }
    }
}

/// Builder for Address.
pub struct AddressBuilder {
    street: String,
    postcode: String,
    city: String,
    province: String,
    country_code: String,
}

impl AddressBuilder {
    pub fn new(
        street: impl Into<String>,
        postcode: impl Into<String>,
        city: impl Into<String>,
        province: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            postcode: postcode.into(),
            city: city.into(),
            province: province.into(),
            country_code: country_code.into(),
        }
    }

    pub fn build(self) -> Address {
        Address {
            street: self.street,
            postcode: self.postcode,
            city: self.city,
            province: self.province,
            country_code: self.country_code,
        }
    }
}

/// Builder for LineItem. The row follows the order of [`InvoiceBuilder::add_line`] calls.
pub struct LineItemBuilder {
    description: String,
    quantity: Decimal,
    unit_price: Decimal,
    total_price: Option<Decimal>,
    vat_rate: Decimal,
}

impl LineItemBuilder {
    /// Prices are tax-inclusive.
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            total_price: None,
            vat_rate: dec!(22),
        }
    }

    /// Tax-inclusive line total; defaults to `quantity * unit_price`.
    pub fn total_price(mut self, total: Decimal) -> Self {
        self.total_price = Some(total);
        self
    }

    pub fn vat_rate(mut self, rate: Decimal) -> Self {
        self.vat_rate = rate;
        self
    }

    fn build(self, row: u32) -> Result<LineItem, FatturaError> {
        let total_price = match self.total_price {
            Some(total) => total,
            None => self.quantity.checked_mul(self.unit_price).ok_or_else(|| {
                FatturaError::Builder(format!(
                    "line {row}: {} x {} overflows",
                    self.quantity, self.unit_price
                ))
            })?,
        };
        Ok(LineItem {
            row,
            description: self.description,
            quantity: self.quantity,
            unit_price: self.unit_price,
            total_price,
            vat_rate: self.vat_rate,
        })
    }
}
