#![cfg(feature = "export")]

use std::io::{Cursor, Read};

use chrono::NaiveDate;
use fattura::core::*;
use fattura::export::*;
use fattura::xml::RenderConfig;
use rust_decimal_macros::dec;
use zip::ZipArchive;

fn invoice(number: &str) -> Invoice {
    let address = AddressBuilder::new("Via Roma 1", "00100", "Roma", "RM", "IT").build();
    InvoiceBuilder::new(number, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        .sender(SenderBuilder::new("IT", "01234567890", "ALPHA SRL", address.clone()).build())
        .recipient(
            RecipientBuilder::company("BETA SPA", address)
                .vat_id("IT", "09876543210")
                .code("ABC1234")
                .build(),
        )
        .add_line(LineItemBuilder::new("Consulenza", dec!(1), dec!(122)))
        .build()
        .unwrap()
}

fn entries(bytes: &[u8]) -> Vec<(String, String)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut entry = archive.by_index(i).unwrap();
            let mut contents = String::new();
            entry.read_to_string(&mut contents).unwrap();
            (entry.name().to_string(), contents)
        })
        .collect()
}

#[test]
fn single_invoice_is_plain_xml() {
    let exporter = Exporter::new();
    let payload = exporter.export(&[invoice("00001")]).unwrap();
    assert!(matches!(payload, ExportPayload::Xml { .. }));
    assert_eq!(payload.filename(), "IT01234567890_00001.xml");
    assert_eq!(payload.content_type(), "text/xml");

    let xml = String::from_utf8(payload.into_bytes()).unwrap();
    assert!(xml.contains("<p:FatturaElettronica"));
    assert!(xml.contains("<Numero>00001</Numero>"));
}

#[test]
fn several_invoices_are_zipped() {
    let exporter = Exporter::new();
    let invoices = [invoice("00001"), invoice("00002"), invoice("00003")];
    let payload = exporter.export(&invoices).unwrap();
    assert!(matches!(payload, ExportPayload::Archive { .. }));
    assert_eq!(payload.filename(), ARCHIVE_FILENAME);
    assert_eq!(payload.content_type(), "application/zip");

    let files = entries(payload.bytes());
    let names: Vec<&str> = files.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "IT01234567890_00001.xml",
            "IT01234567890_00002.xml",
            "IT01234567890_00003.xml",
        ]
    );
    for ((_, contents), invoice) in files.iter().zip(&invoices) {
        let (_, expected) = exporter.render_one(invoice).unwrap();
        assert_eq!(contents.as_bytes(), expected.as_slice());
    }
}

#[test]
fn batch_fails_as_a_whole() {
    let mut broken = invoice("00002");
    broken.lines[0].vat_rate = dec!(-100);
    let invoices = [invoice("00001"), broken, invoice("00003")];

    let err = Exporter::new().export(&invoices).unwrap_err();
    match err {
        FatturaError::Computation { field, .. } => assert_eq!(field, "lines[0].vat_rate"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_batch_is_rejected() {
    assert!(matches!(
        Exporter::new().export(&[]),
        Err(FatturaError::Builder(_))
    ));
    assert!(Exporter::new().render_many(&[]).is_err());
}

#[test]
fn duplicate_file_names_are_rejected() {
    let invoices = [invoice("2024/001"), invoice("2024-001")];
    let err = Exporter::new().export(&invoices).unwrap_err();
    assert!(matches!(err, FatturaError::Archive(msg) if msg.contains("IT01234567890_2024001.xml")));
}

#[test]
fn closure_filename_scheme() {
    let exporter = Exporter::new().with_scheme(|invoice: &Invoice| format!("fattura-{}.xml", invoice.number));
    let payload = exporter.export(&[invoice("7"), invoice("8")]).unwrap();
    let names: Vec<String> = entries(payload.bytes()).into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["fattura-7.xml", "fattura-8.xml"]);
}

#[test]
fn render_config_is_applied() {
    let config = RenderConfig {
        indent: None,
        ..RenderConfig::default()
    };
    let exporter = Exporter::new().with_config(config.clone());
    assert_eq!(exporter.config(), &config);

    let (_, bytes) = exporter.render_one(&invoice("1")).unwrap();
    assert!(!String::from_utf8(bytes).unwrap().contains('\n'));
}

#[test]
fn archives_are_reproducible() {
    let invoices = [invoice("1"), invoice("2")];
    let exporter = Exporter::new();
    assert_eq!(
        exporter.render_many(&invoices).unwrap(),
        exporter.render_many(&invoices).unwrap()
    );
}
