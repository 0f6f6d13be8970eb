//! Allowlist file (`allowlist.json`): a JSON array of address strings.

use std::path::Path;

use nft_allowlist::Allowlist;
use tracing::info;

use crate::errors::ProjectError;
use crate::files::{read_json, write_json};

/// Raw entries in file order.
pub fn load_entries(path: &Path) -> Result<Vec<String>, ProjectError> {
    read_json(path)
}

/// Parse the file and build the commitment. An empty file is an error.
pub fn load_allowlist(path: &Path) -> Result<Allowlist, ProjectError> {
    let entries = load_entries(path)?;
    let allowlist = Allowlist::from_entries(&entries)?;
    info!(
        "[project] Loaded {} allowlist entries from {} ({} unique)",
        entries.len(),
        path.display(),
        allowlist.len()
    );
    Ok(allowlist)
}

/// Write the root and every proof for the front end.
pub fn write_proofs(path: &Path, allowlist: &Allowlist) -> Result<(), ProjectError> {
    write_json(path, &allowlist.bundle()?)?;
    info!(
        "[project] Wrote {} proofs to {}",
        allowlist.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nft_allowlist::AllowlistError;
    use std::fs;

    const HARDHAT_1: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
    const HARDHAT_2: &str = "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC";

    #[test]
    fn test_load_allowlist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("allowlist.json");
        fs::write(&path, format!(r#"["{HARDHAT_1}", "{HARDHAT_2}", "{HARDHAT_1}"]"#)).unwrap();

        let allowlist = load_allowlist(&path).unwrap();
        assert_eq!(allowlist.len(), 2);
        assert!(allowlist.proof_for(HARDHAT_2).is_ok());
    }

    #[test]
    fn test_empty_allowlist_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("allowlist.json");
        fs::write(&path, "[]").unwrap();
        assert!(matches!(
            load_allowlist(&path),
            Err(ProjectError::Allowlist(AllowlistError::EmptyAllowlist))
        ));
    }

    #[test]
    fn test_write_proofs() {
        let dir = tempfile::tempdir().unwrap();
        let allowlist = Allowlist::from_entries([HARDHAT_1, HARDHAT_2]).unwrap();
        let out = dir.path().join("proofs.json");
        write_proofs(&out, &allowlist).unwrap();

        let written: serde_json::Value = read_json(&out).unwrap();
        assert_eq!(written["root"], allowlist.root().to_hex());
        assert_eq!(written["proofs"][HARDHAT_1].as_array().unwrap().len(), 1);
    }
}
