#![no_main]

use libfuzzer_sys::fuzz_target;
use rest_wire::connection::Settings;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        if let Ok(settings) = Settings::from_value("fuzz", value) {
            assert!(!settings.probe_timeout().is_zero());
        }
    }
});
