//! Decode records and print their fields.

use anyhow::{Context, Result};
use seglog_records::{AuditProof, DigitallySigned, SegmentData, TreeType};
use std::path::Path;
use tracing::debug;

use crate::Format;

use super::load_bytes;

pub fn signature(file: &Path, hex_input: bool, format: Format) -> Result<()> {
    let bytes = load_bytes(file, hex_input)?;
    debug!(len = bytes.len(), "decoding DigitallySigned");
    let signed = DigitallySigned::deserialize(&bytes).context("malformed DigitallySigned")?;
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&signed)?),
        Format::Human => {
            println!("hash_algo:  {:?}", signed.hash_algo);
            println!("sig_algo:   {:?}", signed.sig_algo);
            println!(
                "signature:  {} ({} bytes)",
                hex::encode(&signed.signature),
                signed.signature.len()
            );
        }
    }
    Ok(())
}

pub fn segment_info(file: &Path, hex_input: bool, format: Format) -> Result<()> {
    let bytes = load_bytes(file, hex_input)?;
    debug!(len = bytes.len(), "decoding segment-info record");
    let data =
        SegmentData::deserialize_segment_info(&bytes).context("malformed segment-info record")?;
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&data)?),
        Format::Human => {
            println!("sequence_number:  {}", data.log_segment.sequence_number);
            println!("timestamp:        {}", data.timestamp);
            println!("segment_size:     {}", data.log_segment.segment_size);
            println!(
                "segment sig:      {:?}/{:?}, {} bytes",
                data.log_segment.signature.hash_algo,
                data.log_segment.signature.sig_algo,
                data.log_segment.signature.signature.len()
            );
            println!(
                "head sig:         {:?}/{:?}, {} bytes",
                data.log_head.signature.hash_algo,
                data.log_head.signature.sig_algo,
                data.log_head.signature.signature.len()
            );
        }
    }
    Ok(())
}

pub fn proof(tree_type: TreeType, file: &Path, hex_input: bool, format: Format) -> Result<()> {
    let bytes = load_bytes(file, hex_input)?;
    debug!(len = bytes.len(), ?tree_type, "decoding audit proof");
    let proof = AuditProof::deserialize(tree_type, &bytes).context("malformed audit proof")?;
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&proof)?),
        Format::Human => {
            println!("tree_type:        {:?}", proof.tree_type);
            println!("sequence_number:  {}", proof.sequence_number);
            println!("tree_size:        {}", proof.tree_size);
            println!("leaf_index:       {}", proof.leaf_index);
            println!(
                "signature:        {:?}/{:?}, {} bytes",
                proof.signature.hash_algo,
                proof.signature.sig_algo,
                proof.signature.signature.len()
            );
            println!("audit_path:       {} nodes", proof.audit_path.len());
            for (i, node) in proof.audit_path.iter().enumerate() {
                println!("  [{i}] {node}");
            }
        }
    }
    Ok(())
}
