//! Allowlist root, proofs and mint preflight.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use nft_allowlist::AllowlistError;
use nft_contract::{format_ether, parse_ether, Address, CollectionApi, MintKind};
use nft_project::{load_allowlist, write_proofs, ProjectPaths};
use primitive_types::U256;

use crate::context::OpsContext;

pub(super) fn root(paths: &ProjectPaths) -> Result<()> {
    let allowlist = load_allowlist(&paths.allowlist_file)?;
    println!("{}", allowlist.root());
    Ok(())
}

pub(super) fn proof(paths: &ProjectPaths, address: &str) -> Result<()> {
    let allowlist = load_allowlist(&paths.allowlist_file)?;
    let proof = allowlist.proof_for(address).map_err(|e| match e {
        AllowlistError::NotAMember(_) => anyhow!("{address} is not on the allowlist"),
        e if e.is_malformed_input() => anyhow!(e).context(format!("{address} is not an address")),
        e => anyhow!(e),
    })?;
    println!("The proof of the address is: {}", proof.to_hex_strings().join(","));
    Ok(())
}

pub(super) fn proofs(paths: &ProjectPaths, out: &Path) -> Result<()> {
    let allowlist = load_allowlist(&paths.allowlist_file)?;
    write_proofs(out, &allowlist)?;
    println!("Wrote {} proofs to {}", allowlist.len(), out.display());
    Ok(())
}

pub(super) async fn check_mint(
    ctx: &OpsContext,
    address: &str,
    amount: u64,
    public: bool,
    value: Option<&str>,
) -> Result<()> {
    let minter: Address = address
        .parse()
        .with_context(|| format!("invalid address {address}"))?;
    let service = ctx.collection().await?;

    let value = match value {
        Some(text) => parse_ether(text)?,
        None => {
            let price = service.snapshot().await?.mint_price;
            price.checked_mul(U256::from(amount)).unwrap_or(U256::MAX)
        }
    };

    let kind = if public { MintKind::Public } else { MintKind::Allowlist };
    let cost = match kind {
        MintKind::Public => service.preflight_public_mint(minter, amount, value).await?,
        MintKind::Allowlist => {
            let allowlist = load_allowlist(&ctx.paths.allowlist_file)?;
            let proof = allowlist
                .proof_for_identity(&minter)
                .with_context(|| format!("{minter} is not on the allowlist"))?;
            service
                .preflight_allowlist_mint(minter, amount, value, &proof)
                .await?
        }
    };

    println!(
        "{kind:?} mint of {amount} by {minter} would succeed for {} {}",
        format_ether(cost),
        ctx.contract.gas_token
    );
    Ok(())
}
