//! Owner operations: sale phases, reveal, root updates, owner mint, withdraw.

use anyhow::{anyhow, Context, Result};
use nft_contract::{format_ether, Address, CollectionApi, ContractError};
use nft_project::load_allowlist;
use tracing::info;

use super::print_report;
use crate::context::OpsContext;

pub(super) async fn close_sales(ctx: &OpsContext) -> Result<()> {
    let service = ctx.collection().await?;
    let report = service.close_sales().await?;
    print_report(&report, "All sales are now closed!");
    Ok(())
}

pub(super) async fn open_allowlist_sale(ctx: &OpsContext) -> Result<()> {
    let allowlist = load_allowlist(&ctx.paths.allowlist_file)?;
    let terms = ctx.contract.allowlist_terms()?;
    info!(
        "Allowlist sale terms: {} {} per token, {} per tx",
        format_ether(terms.mint_price),
        ctx.contract.gas_token,
        terms.max_mint_amount_per_tx
    );

    let service = ctx.collection().await?;
    let report = service.open_allowlist_sale(&allowlist.root(), &terms).await?;
    print_report(&report, "Allowlist sale is now open!");
    Ok(())
}

pub(super) async fn open_public_sale(ctx: &OpsContext) -> Result<()> {
    let terms = ctx.contract.public_terms()?;
    info!(
        "Public sale terms: {} {} per token, {} per tx",
        format_ether(terms.mint_price),
        ctx.contract.gas_token,
        terms.max_mint_amount_per_tx
    );

    let service = ctx.collection().await?;
    let report = service.open_public_sale(&terms).await?;
    print_report(&report, "Public sale is now open!");
    Ok(())
}

pub(super) async fn reveal(ctx: &OpsContext, uri: &str) -> Result<()> {
    let service = ctx.collection().await?;
    let report = service.reveal(uri).await.map_err(|err| match err {
        ContractError::InvalidValue(_) => anyhow!(
            "Please set METADATA_URI (or --uri) to the metadata URI of your collection"
        ),
        other => other.into(),
    })?;
    print_report(&report, "Your collection is now revealed!");
    Ok(())
}

pub(super) async fn update_root(ctx: &OpsContext) -> Result<()> {
    let allowlist = load_allowlist(&ctx.paths.allowlist_file)?;
    let service = ctx.collection().await?;
    let report = service.update_merkle_root(&allowlist.root()).await?;
    print_report(&report, &format!("Merkle root is {}", allowlist.root()));
    Ok(())
}

pub(super) async fn mint_for(ctx: &OpsContext, address: &str, amount: u64) -> Result<()> {
    let receiver: Address = address
        .parse()
        .with_context(|| format!("invalid address {address}"))?;
    let service = ctx.collection().await?;
    let report = service.mint_for_address(receiver, amount).await?;
    print_report(&report, &format!("Minted {amount} to {receiver}"));
    Ok(())
}

pub(super) async fn withdraw(ctx: &OpsContext) -> Result<()> {
    let service = ctx.collection().await?;
    let report = service.withdraw().await?;
    print_report(&report, "Balance withdrawn to the owner");
    Ok(())
}
