use chrono::NaiveDate;

use super::tree::{Document, MapBuilder, Node};
use crate::core::*;

/// `ProgressivoInvio`. Constant: transmissions are not sequenced yet.
pub const TRANSMISSION_SEQUENCE: u32 = 1;

/// Build the FatturaPA document tree for an invoice.
///
/// All amounts are derived before the tree is assembled, so a computation
/// error aborts the invoice before anything is rendered.
pub fn build_document(invoice: &Invoice) -> Result<Document, FatturaError> {
    let body = body(invoice)?;
    let tree = Node::map()
        .entry("FatturaElettronicaHeader", header(invoice))
        .entry("FatturaElettronicaBody", body)
        .build();
    Document::new(invoice.transmission_format.code(), tree)
}

fn header(invoice: &Invoice) -> MapBuilder {
    let sender = &invoice.sender;
    let recipient = &invoice.recipient;

    Node::map()
        .entry(
            "DatiTrasmissione",
            Node::map()
                .entry("IdTrasmittente", id_fiscale(&sender.country_code, &sender.code))
                .entry("ProgressivoInvio", TRANSMISSION_SEQUENCE)
                .entry("FormatoTrasmissione", invoice.transmission_format.code())
                .entry("CodiceDestinatario", recipient_code(recipient))
                .entry("ContattiTrasmittente", contacts(sender.contact.as_ref()))
                .entry("PECDestinatario", trimmed(recipient.pec.as_deref())),
        )
        .entry(
            "CedentePrestatore",
            Node::map()
                .entry(
                    "DatiAnagrafici",
                    Node::map()
                        .entry("IdFiscaleIVA", id_fiscale(&sender.country_code, &sender.code))
                        .entry("CodiceFiscale", &sender.code)
                        .entry(
                            "Anagrafica",
                            Node::map().entry("Denominazione", &sender.company_name),
                        )
                        .entry("RegimeFiscale", sender.tax_regime.code()),
                )
                .entry("Sede", sede(&sender.address))
                .entry("Contatti", contacts(sender.contact.as_ref())),
        )
        .entry(
            "CessionarioCommittente",
            Node::map()
                .entry("DatiAnagrafici", recipient_registry(recipient))
                .entry("Sede", sede(&recipient.address)),
        )
}

fn body(invoice: &Invoice) -> Result<MapBuilder, FatturaError> {
    let lines = invoice
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| line_detail(i, line))
        .collect::<Result<Vec<_>, _>>()?;
    let summary = invoice_tax_summary(invoice)?;

    Ok(Node::map()
        .entry(
            "DatiGenerali",
            Node::map().entry(
                "DatiGeneraliDocumento",
                Node::map()
                    .entry("TipoDocumento", invoice.document_type.code())
                    .entry("Divisa", &invoice.currency_code)
                    .entry("Data", iso_date(invoice.issue_date))
                    .entry("Numero", &invoice.number)
                    .entry("Causale", &invoice.causal),
            ),
        )
        .entry(
            "DatiBeniServizi",
            Node::map().entry("DettaglioLinee", lines).entry(
                "DatiRiepilogo",
                Node::map()
                    .entry("AliquotaIVA", summary.rate)
                    .entry("ImponibileImporto", summary.taxable_amount)
                    .entry("Imposta", summary.tax_amount),
            ),
        )
        .entry(
            "DatiPagamento",
            Node::map()
                .entry("CondizioniPagamento", invoice.payment_condition.code())
                .entry(
                    "DettaglioPagamento",
                    Node::map()
                        .entry("ModalitaPagamento", invoice.payment_method.code())
                        .entry("DataScadenzaPagamento", invoice.due_date.map(iso_date))
                        .entry("ImportoPagamento", format_decimal(invoice.amount)),
                ),
        ))
}

fn line_detail(index: usize, line: &LineItem) -> Result<Node, FatturaError> {
    let field = format!("lines[{index}].vat_rate");
    let unit_price = tax_exclusive_for(&field, line.unit_price, line.vat_rate)?;
    let total_price = tax_exclusive_for(&field, line.total_price, line.vat_rate)?;

    Ok(Node::map()
        .entry("NumeroLinea", line.row)
        .entry("Descrizione", &line.description)
        .entry("Quantita", format_decimal(line.quantity))
        .entry("PrezzoUnitario", format_decimal(unit_price))
        .entry("PrezzoTotale", format_decimal(total_price))
        .entry("AliquotaIVA", format_decimal(line.vat_rate))
        .build())
}

fn recipient_registry(recipient: &Recipient) -> MapBuilder {
    let (vat_id, fiscal_code) = match &recipient.tax_id {
        RecipientTaxId::FiscalCode { code } => (None, Some(code)),
        RecipientTaxId::Vat { country_code, code } => (Some(id_fiscale(country_code, code)), None),
    };
    let anagrafica = match &recipient.identity {
        RecipientIdentity::Company { denomination } => {
            Node::map().entry("Denominazione", denomination)
        }
        RecipientIdentity::Person {
            first_name,
            last_name,
        } => Node::map().entry("Nome", first_name).entry("Cognome", last_name),
    };

    Node::map()
        .entry("IdFiscaleIVA", vat_id)
        .entry("CodiceFiscale", fiscal_code)
        .entry("Anagrafica", anagrafica)
}

fn recipient_code(recipient: &Recipient) -> &str {
    trimmed(recipient.code.as_deref()).unwrap_or(DEFAULT_RECIPIENT_CODE)
}

/// Blank values count as absent.
fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn id_fiscale(country_code: &str, code: &str) -> MapBuilder {
    Node::map().entry("IdPaese", country_code).entry("IdCodice", code)
}

fn sede(address: &Address) -> MapBuilder {
    Node::map()
        .entry("Indirizzo", &address.street)
        .entry("CAP", &address.postcode)
        .entry("Comune", &address.city)
        .entry("Provincia", &address.province)
        .entry("Nazione", &address.country_code)
}

fn contacts(contact: Option<&Contact>) -> Option<MapBuilder> {
    contact.map(|c| {
        Node::map()
            .entry("Telefono", c.phone.as_ref())
            .entry("Email", c.email.as_ref())
    })
}

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
