#![no_main]

use libfuzzer_sys::fuzz_target;
use seglog_records::SegmentData;

fuzz_target!(|data: &[u8]| {
    if let Ok(decoded) = SegmentData::deserialize_segment_info(data) {
        // Anything that decodes satisfies the shared-sequence invariant
        // and re-encodes to the same bytes.
        assert_eq!(
            decoded.log_segment.sequence_number,
            decoded.log_head.sequence_number
        );
        assert_eq!(decoded.serialize_segment_info(), data);
    }
});
