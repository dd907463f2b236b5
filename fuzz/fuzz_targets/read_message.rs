#![no_main]

use cowsay_core::message::{self, MAX_MESSAGE_BYTES};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let data = if data.len() > 64 * 1024 {
        &data[..64 * 1024]
    } else {
        data
    };

    let m = message::from_reader(data).expect("in-memory reads never fail");
    assert!(m.text.len() <= MAX_MESSAGE_BYTES);
    assert!(!m.text.contains('\n'));
    assert_eq!(m.truncated(), !m.diagnostics.is_empty());
});
