#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any record that deserializes must render or fail cleanly.
    if let Ok(invoice) = serde_json::from_slice::<fattura::core::Invoice>(data) {
        let _ = fattura::xml::to_fattura_xml(&invoice);
    }
});
