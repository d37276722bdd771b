#![no_main]

use libfuzzer_sys::fuzz_target;
use seglog_records::{LogHeadCheckpoint, LogSegmentCheckpoint};

fuzz_target!(|data: &[u8]| {
    if let Ok(checkpoint) = LogSegmentCheckpoint::deserialize(data) {
        assert_eq!(checkpoint.serialize(), data);
    }
    if let Ok(checkpoint) = LogHeadCheckpoint::deserialize(data) {
        assert_eq!(checkpoint.serialize(), data);
    }
});
