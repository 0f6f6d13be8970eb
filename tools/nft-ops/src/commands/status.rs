//! Read-only views of the collection.

use anyhow::Result;
use nft_contract::{format_ether, CollectionApi};

use crate::context::OpsContext;

pub(super) async fn status(ctx: &OpsContext) -> Result<()> {
    let service = ctx.collection().await?;
    let snapshot = service.snapshot().await?;
    let token = &ctx.contract.gas_token;

    println!("{} on {}", ctx.contract.contract_name, ctx.network.name);
    println!("  address:            {}", service.address());
    println!("  owner:              {}", service.owner().await?);
    println!("  sale state:         {}", snapshot.sale_state);
    println!("  merkle root:        {}", snapshot.merkle_root);
    println!("  mint price:         {} {token}", format_ether(snapshot.mint_price));
    println!("  max per tx:         {}", snapshot.max_mint_amount_per_tx);
    println!("  supply:             {} / {}", snapshot.total_supply, snapshot.max_supply);
    println!("  revealed:           {}", snapshot.revealed);
    println!("  base URI:           {}", snapshot.base_uri);
    println!("  hidden metadata:    {}", snapshot.hidden_metadata_uri);
    Ok(())
}

pub(super) async fn token_uri(ctx: &OpsContext, token_id: u64) -> Result<()> {
    let service = ctx.collection().await?;
    println!("{}", service.token_uri(token_id).await?);
    Ok(())
}
