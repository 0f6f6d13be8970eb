//! Deployment, explorer verification and front-end publication.

use anyhow::{Context, Result};
use nft_contract::{
    Deployer, EtherscanVerifier, VerificationRequest, VerificationStatus,
};
use nft_project::{
    front_end_update_requested, DeploymentRecord, FrontEndRelease, HardhatArtifact,
    HIDDEN_METADATA_URI,
};
use tracing::{info, warn};

use crate::context::OpsContext;

pub(super) async fn deploy(
    ctx: &OpsContext,
    verify_after: bool,
    update_front_end_after: bool,
    hidden_metadata_uri: Option<String>,
) -> Result<()> {
    let name = &ctx.contract.contract_name;
    let artifact = HardhatArtifact::load(&ctx.paths.artifacts_dir, name)
        .context("compile the contracts before deploying")?;
    let hidden_metadata_uri = hidden_metadata_uri.unwrap_or_else(|| HIDDEN_METADATA_URI.to_string());
    let settings = ctx.contract.collection_settings(&hidden_metadata_uri)?;

    let previous = DeploymentRecord::load(&ctx.paths, &ctx.network.name, name)?
        .map(|record| record.previous())
        .transpose()?;

    let chain = ctx.connect().await?;
    let deployer = Deployer::new(chain, ctx.client_config.clone());
    let outcome = deployer
        .deploy(&artifact.creation_code()?, &settings, previous.as_ref())
        .await?;

    let record = DeploymentRecord::from_outcome(
        name,
        &ctx.network.name,
        ctx.network.chain_id,
        &outcome,
        artifact.abi.clone(),
    );
    if outcome.reused {
        println!("{name} already deployed at {} (reused)", outcome.address);
    } else {
        record.save(&ctx.paths)?;
        println!(
            "{name} deployed at {} in block {}",
            outcome.address, outcome.block_number
        );
    }

    if verify_after {
        verify_record(ctx, &artifact, &record).await?;
    }
    if update_front_end_after || front_end_update_requested() {
        publish(ctx, &record)?;
    }
    Ok(())
}

pub(super) async fn verify(ctx: &OpsContext) -> Result<()> {
    let name = &ctx.contract.contract_name;
    let record = DeploymentRecord::require(&ctx.paths, &ctx.network.name, name)?;
    let artifact = HardhatArtifact::load(&ctx.paths.artifacts_dir, name)?;
    verify_record(ctx, &artifact, &record).await
}

async fn verify_record(
    ctx: &OpsContext,
    artifact: &HardhatArtifact,
    record: &DeploymentRecord,
) -> Result<()> {
    if ctx.network.is_development() {
        info!("Skipping verification on development network {}", ctx.network.name);
        return Ok(());
    }
    let Some(explorer) = &ctx.network.explorer else {
        warn!("No explorer API key for {}; skipping verification", ctx.network.name);
        return Ok(());
    };

    println!("Verifying contract...");
    let build_info = artifact
        .build_info()
        .context("reading compiler build info for verification")?;
    let request = VerificationRequest {
        address: record.address,
        contract_name: artifact.fully_qualified_name(),
        compiler_version: build_info.compiler_version(),
        standard_json_input: build_info.standard_json_input(),
        constructor_args: record.constructor_args_bytes()?,
    };
    let verifier = EtherscanVerifier::new(
        &explorer.api_url,
        &explorer.api_key,
        ctx.client_config.clone(),
    )?;
    match verifier.verify(&request).await? {
        VerificationStatus::Verified => println!("Verified!"),
        VerificationStatus::AlreadyVerified => println!("Already verified!"),
    }
    Ok(())
}

pub(super) fn update_front_end(ctx: &OpsContext) -> Result<()> {
    let record =
        DeploymentRecord::require(&ctx.paths, &ctx.network.name, &ctx.contract.contract_name)?;
    publish(ctx, &record)
}

fn publish(ctx: &OpsContext, record: &DeploymentRecord) -> Result<()> {
    println!("Writing to front end...");
    let mut config = ctx.contract.clone();
    let summary = FrontEndRelease::from_record(record).publish(&ctx.paths, &mut config)?;
    println!("Front end written! (release {})", summary.revision);
    Ok(())
}
