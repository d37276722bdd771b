#![no_main]

use libfuzzer_sys::fuzz_target;
use seglog_records::{AuditProof, TreeType};

fuzz_target!(|data: &[u8]| {
    // First byte routes the proof, standing in for the out-of-band tree
    // knowledge a real receiver has.
    let Some((selector, record)) = data.split_first() else {
        return;
    };
    let tree_type = if selector & 1 == 0 {
        TreeType::LogSegmentTree
    } else {
        TreeType::SegmentInfoTree
    };
    if let Ok(proof) = AuditProof::deserialize(tree_type, record) {
        assert_eq!(proof.serialize(), record);
    }
});
