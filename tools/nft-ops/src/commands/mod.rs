//! Command implementations.

mod allowlist;
mod deploy;
mod sale;
mod status;

use anyhow::Result;
use nft_contract::{PhaseAction, PhaseReport};
use nft_project::ProjectPaths;

use crate::cli::{Cli, Command};
use crate::context::OpsContext;

/// Run one command.
pub async fn run(cli: Cli) -> Result<()> {
    let paths = ProjectPaths::new(&cli.root, &cli.front_end);

    // Offline commands need the project files only
    match &cli.command {
        Command::Root => return allowlist::root(&paths),
        Command::Proof { address } => return allowlist::proof(&paths, address),
        Command::Proofs { out } => return allowlist::proofs(&paths, out),
        _ => {}
    }

    let ctx = OpsContext::load(&cli)?;
    match cli.command {
        Command::Deploy {
            verify,
            update_front_end,
            hidden_metadata_uri,
        } => deploy::deploy(&ctx, verify, update_front_end, hidden_metadata_uri).await,
        Command::Verify => deploy::verify(&ctx).await,
        Command::UpdateFrontEnd => deploy::update_front_end(&ctx),
        Command::CloseSales => sale::close_sales(&ctx).await,
        Command::OpenAllowlistSale => sale::open_allowlist_sale(&ctx).await,
        Command::OpenPublicSale => sale::open_public_sale(&ctx).await,
        Command::Reveal { uri } => sale::reveal(&ctx, &uri).await,
        Command::UpdateRoot => sale::update_root(&ctx).await,
        Command::MintFor { address, amount } => sale::mint_for(&ctx, &address, amount).await,
        Command::Withdraw => sale::withdraw(&ctx).await,
        Command::CheckMint {
            address,
            amount,
            public,
            value,
        } => allowlist::check_mint(&ctx, &address, amount, public, value.as_deref()).await,
        Command::Status => status::status(&ctx).await,
        Command::TokenUri { token_id } => status::token_uri(&ctx, token_id).await,
        Command::Root | Command::Proof { .. } | Command::Proofs { .. } => Ok(()),
    }
}

/// Print what an operation did.
fn print_report(report: &PhaseReport, done: &str) {
    for action in &report.actions {
        match action {
            PhaseAction::Sent {
                method,
                tx_hash,
                block_number,
            } => println!("  {method}: {tx_hash} (block {block_number})"),
            PhaseAction::Unchanged { method } => println!("  {method}: unchanged"),
        }
    }
    if report.is_noop() {
        println!("Nothing to change. {done}");
    } else {
        println!("{done}");
    }
}
