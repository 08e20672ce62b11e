use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ValidationError;
use super::types::*;

/// Placeholder `CodiceDestinatario` used when the invoice is delivered by PEC
/// or the recipient has no routing code.
pub const DEFAULT_RECIPIENT_CODE: &str = "0000000";

/// Validate an invoice against the FatturaPA constraints the renderer relies on.
/// Returns all validation errors found (not just the first).
pub fn validate_invoice(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Numero is String20 in the schema
    let number = invoice.number.trim();
    if number.is_empty() {
        errors.push(ValidationError::new(
            "number",
            "invoice number must not be empty",
        ));
    } else if number.chars().count() > 20 {
        errors.push(ValidationError::new(
            "number",
            "invoice number cannot exceed 20 characters",
        ));
    }

    if invoice.currency_code.len() != 3
        || !invoice.currency_code.bytes().all(|b| b.is_ascii_uppercase())
    {
        errors.push(ValidationError::new(
            "currency_code",
            "currency code must be 3 uppercase letters (ISO 4217)",
        ));
    }

    validate_rate("tax_rate", invoice.tax_rate, &mut errors);
    if invoice.amount < Decimal::ZERO {
        errors.push(ValidationError::new(
            "amount",
            "invoice amount must not be negative",
        ));
    }

    validate_sender(&invoice.sender, &mut errors);
    validate_recipient(&invoice.recipient, &mut errors);
    validate_lines(&invoice.lines, &mut errors);

    errors
}

fn validate_sender(sender: &Sender, errors: &mut Vec<ValidationError>) {
    validate_country("sender.country_code", &sender.country_code, errors);
    if sender.code.trim().is_empty() {
        errors.push(ValidationError::new(
            "sender.code",
            "sender code must not be empty",
        ));
    } else if sender.code.chars().count() > 28 {
        errors.push(ValidationError::new(
            "sender.code",
            "sender code cannot exceed 28 characters",
        ));
    }
    if sender.company_name.trim().is_empty() {
        errors.push(ValidationError::new(
            "sender.company_name",
            "company name must not be empty",
        ));
    }
    validate_address("sender.address", &sender.address, errors);
}

fn validate_recipient(recipient: &Recipient, errors: &mut Vec<ValidationError>) {
    match &recipient.identity {
        RecipientIdentity::Company { denomination } => {
            if denomination.trim().is_empty() {
                errors.push(ValidationError::new(
                    "recipient.identity.denomination",
                    "denomination must not be empty",
                ));
            }
        }
        RecipientIdentity::Person {
            first_name,
            last_name,
        } => {
            if first_name.trim().is_empty() {
                errors.push(ValidationError::new(
                    "recipient.identity.first_name",
                    "first name must not be empty",
                ));
            }
            if last_name.trim().is_empty() {
                errors.push(ValidationError::new(
                    "recipient.identity.last_name",
                    "last name must not be empty",
                ));
            }
        }
    }

    match &recipient.tax_id {
        RecipientTaxId::FiscalCode { code } => {
            let len = code.trim().len();
            if !(11..=16).contains(&len) {
                errors.push(ValidationError::new(
                    "recipient.tax_id.code",
                    "fiscal code must be 11 to 16 characters",
                )
                .sdi("00417"));
            }
        }
        RecipientTaxId::Vat { country_code, code } => {
            validate_country("recipient.tax_id.country_code", country_code, errors);
            if code.trim().is_empty() {
                errors.push(ValidationError::new(
                    "recipient.tax_id.code",
                    "a fiscal code or VAT identifier is required",
                )
                .sdi("00417"));
            }
        }
    }

    let code = recipient.code.as_deref().map(str::trim).unwrap_or("");
    let pec = recipient.pec.as_deref().map(str::trim).unwrap_or("");
    if !code.is_empty() && code.chars().count() != 7 {
        errors.push(ValidationError::new(
            "recipient.code",
            "recipient code must be exactly 7 characters",
        )
        .sdi("00311"));
    }
    if (code.is_empty() || code == DEFAULT_RECIPIENT_CODE) && pec.is_empty() {
        errors.push(ValidationError::new(
            "recipient.pec",
            "a recipient code or PEC address is required",
        )
        .sdi("00426"));
    }
    if !pec.is_empty() && !pec.contains('@') {
        errors.push(ValidationError::new(
            "recipient.pec",
            "PEC address must be an email address",
        ));
    }

    validate_address("recipient.address", &recipient.address, errors);
}

fn validate_lines(lines: &[LineItem], errors: &mut Vec<ValidationError>) {
    if lines.is_empty() {
        errors.push(ValidationError::new(
            "lines",
            "at least one line item is required",
        ));
    }

    for (i, line) in lines.iter().enumerate() {
        let path = format!("lines[{i}]");
        if line.row as usize != i + 1 {
            errors.push(ValidationError::new(
                format!("{path}.row"),
                format!("expected row {}, found {}", i + 1, line.row),
            ));
        }
        if line.description.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("{path}.description"),
                "description must not be empty",
            ));
        }
        if line.quantity <= Decimal::ZERO {
            errors.push(ValidationError::new(
                format!("{path}.quantity"),
                "quantity must be positive",
            ));
        }
        validate_rate(&format!("{path}.vat_rate"), line.vat_rate, errors);
    }
}

fn validate_address(path: &str, address: &Address, errors: &mut Vec<ValidationError>) {
    if address.street.trim().is_empty() {
        errors.push(ValidationError::new(
            format!("{path}.street"),
            "street must not be empty",
        ));
    }
    if address.city.trim().is_empty() {
        errors.push(ValidationError::new(
            format!("{path}.city"),
            "city must not be empty",
        ));
    }
    validate_country(&format!("{path}.country_code"), &address.country_code, errors);
}

fn validate_country(path: &str, code: &str, errors: &mut Vec<ValidationError>) {
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
        errors.push(ValidationError::new(
            path,
            format!("'{code}' is not an ISO 3166-1 alpha-2 country code"),
        ));
    }
}

fn validate_rate(path: &str, rate: Decimal, errors: &mut Vec<ValidationError>) {
    if rate < Decimal::ZERO || rate > dec!(100) {
        errors.push(ValidationError::new(
            path,
            format!("VAT rate {rate} must be between 0 and 100"),
        ));
    }
}
