use crate::core::Invoice;

/// Naming convention for exported invoice files.
pub trait FilenameScheme {
    fn filename(&self, invoice: &Invoice) -> String;
}

impl<F> FilenameScheme for F
where
    F: Fn(&Invoice) -> String,
{
    fn filename(&self, invoice: &Invoice) -> String {
        self(invoice)
    }
}

/// SdI naming: `{country}{sender code}_{invoice number}.xml`.
///
/// Characters of the invoice number outside `[A-Za-z0-9]` are dropped, so
/// `2024/001` becomes `2024001`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SdiFilename;

impl FilenameScheme for SdiFilename {
    fn filename(&self, invoice: &Invoice) -> String {
        let progressive: String = invoice
            .number
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();
        format!(
            "{}{}_{}.xml",
            invoice.sender.country_code, invoice.sender.code, progressive
        )
    }
}
