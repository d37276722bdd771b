pub mod inspect;
pub mod verify;

use anyhow::{Context, Result};
use std::path::Path;

/// Load record bytes from a file, optionally hex-decoding the contents.
pub fn load_bytes(path: &Path, hex_input: bool) -> Result<Vec<u8>> {
    let raw = std::fs::read(path)
        .with_context(|| format!("reading {}", path.display()))?;
    if !hex_input {
        return Ok(raw);
    }
    let text = String::from_utf8(raw).context("hex input is not UTF-8")?;
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&cleaned).context("invalid hex input")
}
