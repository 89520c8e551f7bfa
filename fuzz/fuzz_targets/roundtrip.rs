#![no_main]
use libfuzzer_sys::fuzz_target;
use msgpack_core::{deserialize, serialize};

fuzz_target!(|data: &[u8]| {
    let mut cursor = 0;
    if let Ok(obj) = deserialize(data, &mut cursor) {
        let mut out = Vec::new();
        let _ = serialize(&obj, &mut out);
    }
});
