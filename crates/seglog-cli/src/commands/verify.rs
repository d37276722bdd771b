//! Recompute and compare Merkle roots from audit proofs.

use anyhow::{bail, Context, Result};
use seglog_merkle::verify_audit_proof;
use seglog_records::{AuditProof, Hash32, TreeType};
use std::path::Path;
use tracing::{debug, info};

use super::load_bytes;

pub fn proof(
    tree_type: TreeType,
    root_hex: &str,
    leaf_file: &Path,
    proof_file: &Path,
    hex_input: bool,
) -> Result<()> {
    let root_bytes = hex::decode(root_hex).context("invalid root hex")?;
    let root: [u8; 32] = root_bytes
        .as_slice()
        .try_into()
        .context("root must be exactly 32 bytes")?;
    let expected_root = Hash32(root);

    let leaf_data = std::fs::read(leaf_file)
        .with_context(|| format!("reading {}", leaf_file.display()))?;
    let proof_bytes = load_bytes(proof_file, hex_input)?;
    debug!(
        proof_len = proof_bytes.len(),
        leaf_len = leaf_data.len(),
        "verifying audit proof"
    );

    let proof = AuditProof::deserialize(tree_type, &proof_bytes).context("malformed audit proof")?;
    match verify_audit_proof(&proof, &leaf_data, &expected_root) {
        Ok(()) => {
            info!(
                leaf_index = proof.leaf_index,
                tree_size = proof.tree_size,
                "audit proof verified"
            );
            println!("OK: leaf {} is in the tree under {}", proof.leaf_index, expected_root);
            Ok(())
        }
        Err(err) => bail!("audit proof rejected: {err}"),
    }
}
