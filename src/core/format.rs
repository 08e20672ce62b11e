//! Amount formatting and tax-exclusive derivation.
//!
//! All arithmetic uses [`Decimal`]; inputs are tax-inclusive and the wire
//! format wants tax-exclusive amounts with exactly two decimals.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::error::FatturaError;
use super::types::{Invoice, TaxSummary};

/// Format any numeric value with exactly two decimals (half-up).
///
/// ```
/// use fattura::core::format_decimal;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_decimal(1), "1.00");
/// assert_eq!(format_decimal(dec!(2.5)), "2.50");
/// assert_eq!(format_decimal(dec!(0.125)), "0.13");
/// ```
pub fn format_decimal(value: impl Into<Decimal>) -> String {
    let mut d = round_cents(value.into());
    d.rescale(2);
    d.to_string()
}

/// Back out the tax-exclusive amount: `amount / (1 + rate / 100)`.
///
/// The result is not rounded. A rate of -100% has no tax-exclusive
/// counterpart and is reported as [`FatturaError::Computation`].
pub fn tax_exclusive_amount(
    tax_inclusive_amount: Decimal,
    tax_rate_percent: Decimal,
) -> Result<Decimal, FatturaError> {
    tax_exclusive_for("amount", tax_inclusive_amount, tax_rate_percent)
}

/// Same as [`tax_exclusive_amount`], naming `field` in the error.
pub(crate) fn tax_exclusive_for(
    field: &str,
    tax_inclusive_amount: Decimal,
    tax_rate_percent: Decimal,
) -> Result<Decimal, FatturaError> {
    (tax_rate_percent / dec!(100))
        .checked_add(Decimal::ONE)
        .and_then(|divisor| tax_inclusive_amount.checked_div(divisor))
        .ok_or_else(|| {
            FatturaError::computation(
                field,
                format!("cannot remove a tax rate of {tax_rate_percent}% from {tax_inclusive_amount}"),
            )
        })
}

/// `DatiRiepilogo` for the whole invoice.
///
/// The taxable amount is rounded to cents before the tax is derived, so
/// `taxable_amount + tax_amount` always equals the invoice amount.
pub fn invoice_tax_summary(invoice: &Invoice) -> Result<TaxSummary, FatturaError> {
    let taxable = round_cents(tax_exclusive_for(
        "tax_rate",
        invoice.amount,
        invoice.tax_rate,
    )?);
    let tax = invoice.amount.checked_sub(taxable).ok_or_else(|| {
        FatturaError::computation("amount", format!("tax on {} overflows", invoice.amount))
    })?;

    Ok(TaxSummary {
        rate: format_decimal(invoice.tax_rate),
        taxable_amount: format_decimal(taxable),
        tax_amount: format_decimal(tax),
    })
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
