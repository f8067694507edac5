#![no_main]

use libfuzzer_sys::fuzz_target;
use rest_wire::client::ConnectionInfo;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(info) = ConnectionInfo::parse(s) {
            // Parsed URLs never carry credentials or query
            assert!(!info.url.contains('?'));
            let _ = info.to_settings();
        }
    }
});
