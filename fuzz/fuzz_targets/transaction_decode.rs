#![no_main]
use incentive_consensus::serialization::{deserialize_transaction, serialize_transaction};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must re-encode to the same bytes
    if let Ok(tx) = deserialize_transaction(data) {
        assert_eq!(serialize_transaction(&tx), data);
    }
});
