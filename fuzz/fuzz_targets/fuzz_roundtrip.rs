#![no_main]

use libfuzzer_sys::fuzz_target;
use libsedml::{read_sedml_from_string, write_sedml_to_string};

fuzz_target!(|data: &str| {
    let doc = read_sedml_from_string(data);
    if doc.error_log().has_fatal() {
        return;
    }
    // Whatever was read must be writable and read back without fatal errors
    let xml = write_sedml_to_string(&doc).expect("in-memory write cannot fail");
    let again = read_sedml_from_string(&xml);
    assert!(!again.error_log().has_fatal(), "{xml}");
});
