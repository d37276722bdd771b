#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic for arbitrary bytes; a round-trip of anything that
    // decodes must reproduce the input prefix.
    if let Ok((signed, consumed)) = seglog_records::DigitallySigned::read_from(data) {
        assert_eq!(signed.serialize(), &data[..consumed]);
    }
    let _ = seglog_records::DigitallySigned::deserialize(data);
});
