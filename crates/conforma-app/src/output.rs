use anyhow::Context;
use camino::Utf8Path;
use conforma_types::{PvpResult, RuleCatalog};

/// Parse the host's rule catalog from JSON.
pub fn parse_catalog_json(text: &str) -> anyhow::Result<RuleCatalog> {
    serde_json::from_str(text).context("parse rule catalog json")
}

pub fn serialize_result(result: &PvpResult) -> anyhow::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(result).context("serialize pvp result")?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write `bytes` to `path`, creating parent directories as needed.
pub fn write_output(path: &Utf8Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write {path}"))
}
