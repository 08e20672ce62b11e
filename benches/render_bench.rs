use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use fattura::core::*;
use fattura::export::Exporter;
use fattura::xml;

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn build_invoice(number: &str, lines: usize) -> Invoice {
    let mut builder = InvoiceBuilder::new(number, test_date())
        .sender(
            SenderBuilder::new(
                "IT",
                "01234567890",
                "Benchmark SRL",
                AddressBuilder::new("Via Roma 1", "00100", "Roma", "RM", "IT").build(),
            )
            .build(),
        )
        .recipient(
            RecipientBuilder::company(
                "Cliente SPA",
                AddressBuilder::new("Corso Italia 42", "20122", "Milano", "MI", "IT").build(),
            )
            .vat_id("IT", "09876543210")
            .code("ABC1234")
            .build(),
        )
        .causal("Fornitura servizi di consulenza ".repeat(20));

    for i in 1..=lines {
        builder = builder.add_line(
            LineItemBuilder::new(format!("Service item {i}"), dec!(5), dec!(146.40)).vat_rate(dec!(22)),
        );
    }

    builder.build().unwrap()
}

fn bench_build_invoice(c: &mut Criterion) {
    c.bench_function("build_invoice_10_lines", |b| {
        b.iter(|| black_box(build_invoice("BENCH-001", 10)));
    });
}

fn bench_render(c: &mut Criterion) {
    let invoice = build_invoice("BENCH-001", 10);
    c.bench_function("render_10_lines", |b| {
        b.iter(|| black_box(xml::to_fattura_xml(black_box(&invoice))));
    });

    let large = build_invoice("BENCH-BIG", 1000);
    c.bench_function("render_1000_lines", |b| {
        b.iter(|| black_box(xml::to_fattura_xml(black_box(&large))));
    });
}

fn bench_build_document(c: &mut Criterion) {
    let invoice = build_invoice("BENCH-001", 10);
    c.bench_function("build_document_10_lines", |b| {
        b.iter(|| black_box(xml::build_document(black_box(&invoice))));
    });
}

fn bench_export_batch(c: &mut Criterion) {
    let invoices: Vec<Invoice> = (1..=100)
        .map(|n| build_invoice(&format!("{n:05}"), 2))
        .collect();
    let exporter = Exporter::new();
    c.bench_function("export_100_invoices", |b| {
        b.iter(|| black_box(exporter.export(black_box(&invoices))));
    });
}

criterion_group!(
    benches,
    bench_build_invoice,
    bench_render,
    bench_build_document,
    bench_export_batch,
);
criterion_main!(benches);
