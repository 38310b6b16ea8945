#![no_main]

use libfuzzer_sys::fuzz_target;
use libsedml::SedReader;

fuzz_target!(|data: &[u8]| {
    // Reading must never panic, whatever the bytes
    let doc = SedReader::new().read_from_bytes(data);
    let _ = doc.num_errors();
});
