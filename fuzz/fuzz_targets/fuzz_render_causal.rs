#![no_main]

use chrono::NaiveDate;
use fattura::core::*;
use libfuzzer_sys::fuzz_target;
use rust_decimal_macros::dec;

fuzz_target!(|data: &[u8]| {
    if let Ok(causal) = std::str::from_utf8(data) {
        let address = AddressBuilder::new("Via Roma 1", "00100", "Roma", "RM", "IT").build();
        let invoice = InvoiceBuilder::new("1", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
            .sender(SenderBuilder::new("IT", "01234567890", "ALPHA SRL", address.clone()).build())
            .recipient(
                RecipientBuilder::company("BETA SPA", address)
                    .vat_id("IT", "09876543210")
                    .code("ABC1234")
                    .build(),
            )
            .causal(causal)
            .add_line(LineItemBuilder::new(causal, dec!(1), dec!(1.22)))
            .build_unchecked()
            .unwrap();

        // Rendering arbitrary text must not panic, and chunks must reassemble.
        let _ = fattura::xml::to_fattura_xml(&invoice);
        let chunks = fattura::xml::chunk_text(causal, fattura::xml::CHUNK_SIZE);
        assert_eq!(chunks.concat(), causal);
    }
});
