#![no_main]
use jsoncorpus::{Verdict, classify};
use libfuzzer_sys::fuzz_target;

// Arbitrary bytes must classify without panicking, and anything called
// valid must really be an object with a string `text`.
fuzz_target!(|data: &[u8]| {
    if classify(data) == Verdict::Valid {
        let value: serde_json::Value = serde_json::from_slice(data).unwrap();
        assert!(value["text"].is_string());
    }
});
