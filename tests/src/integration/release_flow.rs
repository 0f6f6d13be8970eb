//! Deploy, record and publish to the front end, then do it all again.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nft_allowlist::ProofBundle;
    use nft_contract::{ContractClientConfig, Deployer, DeploymentOutcome, MockChain};
    use nft_project::files::read_json;
    use nft_project::{
        load_allowlist, write_proofs, ContractConfig, DeploymentRecord, FrontEndRelease,
        HardhatArtifact, ProjectError, ProjectPaths, DEFAULT_NETWORK, HIDDEN_METADATA_URI,
    };
    use tempfile::TempDir;

    use crate::integration::fixtures::{identity, write_project, ALLOWLISTED, CREATION_CODE};

    const CHAIN_ID: u64 = 1337;

    async fn deploy(
        chain: &Arc<MockChain>,
        paths: &ProjectPaths,
        previous: Option<&DeploymentRecord>,
    ) -> (DeploymentOutcome, HardhatArtifact) {
        let config = ContractConfig::load(&paths.contract_config_file).unwrap();
        let artifact = HardhatArtifact::load(&paths.artifacts_dir, &config.contract_name).unwrap();
        let previous = previous.map(|record| record.previous().unwrap());
        let outcome = Deployer::new(Arc::clone(chain), ContractClientConfig::for_testing())
            .deploy(
                &artifact.creation_code().unwrap(),
                &config.collection_settings(HIDDEN_METADATA_URI).unwrap(),
                previous.as_ref(),
            )
            .await
            .unwrap();
        (outcome, artifact)
    }

    #[tokio::test]
    async fn test_deploy_record_and_publish() {
        let dir = TempDir::new().unwrap();
        let paths = write_project(dir.path());
        let chain = Arc::new(MockChain::default().with_auto_mine(true));
        chain.register_creation_code(CREATION_CODE.to_vec());

        assert!(matches!(
            DeploymentRecord::require(&paths, DEFAULT_NETWORK, "MyNftCollection"),
            Err(ProjectError::NotDeployed { .. })
        ));

        let (outcome, artifact) = deploy(&chain, &paths, None).await;
        assert!(!outcome.reused);
        let record = DeploymentRecord::from_outcome(
            &artifact.contract_name,
            DEFAULT_NETWORK,
            CHAIN_ID,
            &outcome,
            artifact.abi.clone(),
        );
        record.save(&paths).unwrap();

        let loaded = DeploymentRecord::require(&paths, DEFAULT_NETWORK, "MyNftCollection").unwrap();
        assert_eq!(loaded.address, outcome.address);
        assert_eq!(loaded.args[0], "My NFT Collection");
        assert_eq!(loaded.args[2], HIDDEN_METADATA_URI);
        assert_eq!(loaded.constructor_args_bytes().unwrap(), outcome.constructor_args);

        // Same bytecode and settings: nothing is sent
        let (again, _) = deploy(&chain, &paths, Some(&loaded)).await;
        assert!(again.reused);
        assert_eq!(again.address, outcome.address);
        assert_eq!(chain.sent_methods(), vec!["constructor"]);

        let mut config = ContractConfig::load(&paths.contract_config_file).unwrap();
        let first = FrontEndRelease::from_record(&loaded)
            .publish(&paths, &mut config)
            .unwrap();
        assert_eq!(first.revision, 1);
        assert!(first.address_added);

        let second = FrontEndRelease::from_record(&loaded)
            .publish(&paths, &mut config)
            .unwrap();
        assert_eq!(second.revision, 2);
        assert!(!second.address_added);

        let published = ContractConfig::load(&paths.contract_config_file).unwrap();
        assert_eq!(published.addresses_for(CHAIN_ID).len(), 1);
        assert_eq!(published.latest_address(CHAIN_ID).unwrap(), Some(outcome.address));
        // Fields the tooling does not model survive the rewrite
        assert_eq!(published.gas_token, "ETH");

        let abi: serde_json::Value = read_json(&paths.abi_file).unwrap();
        assert_eq!(abi, artifact.abi);
        let release: FrontEndRelease = read_json(&paths.release_file).unwrap();
        assert_eq!(release.revision, 2);
        assert_eq!(release.address, outcome.address);
    }

    #[tokio::test]
    async fn test_changed_config_redeploys() {
        let dir = TempDir::new().unwrap();
        let paths = write_project(dir.path());
        let chain = Arc::new(MockChain::default().with_auto_mine(true));
        chain.register_creation_code(CREATION_CODE.to_vec());

        let (outcome, artifact) = deploy(&chain, &paths, None).await;
        let record = DeploymentRecord::from_outcome(
            &artifact.contract_name,
            DEFAULT_NETWORK,
            CHAIN_ID,
            &outcome,
            artifact.abi.clone(),
        );

        let mut config = ContractConfig::load(&paths.contract_config_file).unwrap();
        config.max_supply = 20;
        config.save(&paths.contract_config_file).unwrap();

        let (redeployed, _) = deploy(&chain, &paths, Some(&record)).await;
        assert!(!redeployed.reused);
        assert_ne!(redeployed.address, outcome.address);
        assert_ne!(redeployed.bytecode_hash, outcome.bytecode_hash);
    }

    #[test]
    fn test_exported_proofs_match_allowlist() {
        let dir = TempDir::new().unwrap();
        let paths = write_project(dir.path());
        let allowlist = load_allowlist(&paths.allowlist_file).unwrap();
        let out = dir.path().join("proofs.json");

        write_proofs(&out, &allowlist).unwrap();
        let bundle: ProofBundle = read_json(&out).unwrap();

        assert_eq!(bundle.root, allowlist.root());
        assert_eq!(bundle.proofs.len(), ALLOWLISTED.len());
        for address in ALLOWLISTED {
            let expected = allowlist
                .proof_for_identity(&identity(address))
                .unwrap()
                .to_hex_strings();
            assert_eq!(bundle.proofs[address], expected);
        }
    }
}
