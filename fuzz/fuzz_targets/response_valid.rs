#![no_main]

use libfuzzer_sys::fuzz_target;
use smb2_nego::{Dialect, Response};

// The validity predicate must never panic, and a true verdict must make
// every projection of the buffer panic-free: fixed fields, the security
// buffer slice, and enumeration of every declared context record.
fuzz_target!(|data: &[u8]| {
    let response = Response::new(data);
    if response.valid() {
        let _ = response.security_mode();
        let _ = response.server_id();
        let _ = response.capabilities();
        let _ = response.system_time();
        let _ = response.server_start_time();
        let _ = response.security_buffer();
        if response.dialect_revision() == Dialect::Smb311 {
            for record in response.context_list().iter(response.context_count()) {
                let _ = record.context_type();
                let _ = record.data();
            }
        }
    }
});
