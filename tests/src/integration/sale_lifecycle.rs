//! A collection deployed from project files and taken through every sale phase.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nft_allowlist::Allowlist;
    use nft_contract::abi::methods;
    use nft_contract::{
        parse_ether, CallRequest, ChainClient, CollectionApi, CollectionService, ContractClientConfig,
        ContractError, Deployer, MintGuard, MintKind, MintRejection, MintRequest, MockChain,
        SaleState, TransactionRequest,
    };
    use nft_project::{load_allowlist, ContractConfig, HardhatArtifact, HIDDEN_METADATA_URI};
    use primitive_types::U256;
    use tempfile::TempDir;

    use crate::integration::fixtures::{
        identity, write_project, ALLOWLISTED, CREATION_CODE, DEPLOYER, OUTSIDER,
    };

    struct Deployed {
        _dir: TempDir,
        chain: Arc<MockChain>,
        service: CollectionService<MockChain>,
        config: ContractConfig,
        allowlist: Allowlist,
    }

    async fn deploy_project() -> Deployed {
        let dir = TempDir::new().unwrap();
        let paths = write_project(dir.path());
        let config = ContractConfig::load(&paths.contract_config_file).unwrap();
        let allowlist = load_allowlist(&paths.allowlist_file).unwrap();
        let artifact = HardhatArtifact::load(&paths.artifacts_dir, &config.contract_name).unwrap();

        let chain = Arc::new(MockChain::default().with_auto_mine(true));
        chain.register_creation_code(CREATION_CODE.to_vec());
        let outcome = Deployer::new(Arc::clone(&chain), ContractClientConfig::for_testing())
            .deploy(
                &artifact.creation_code().unwrap(),
                &config.collection_settings(HIDDEN_METADATA_URI).unwrap(),
                None,
            )
            .await
            .unwrap();

        let service = CollectionService::new(
            Arc::clone(&chain),
            outcome.address,
            ContractClientConfig::for_testing(),
        );
        Deployed {
            _dir: dir,
            chain,
            service,
            config,
            allowlist,
        }
    }

    async fn mint_as(
        chain: &MockChain,
        minter: &str,
        collection: nft_contract::Address,
        data: Vec<u8>,
        value: U256,
    ) {
        chain.set_sender(identity(minter));
        let request = TransactionRequest {
            value,
            ..TransactionRequest::call(collection, data)
        };
        chain.send_transaction(&request).await.unwrap();
        chain.set_sender(identity(DEPLOYER));
    }

    #[tokio::test]
    async fn test_full_sale_lifecycle() {
        let Deployed {
            _dir,
            chain,
            service,
            config,
            allowlist,
        } = deploy_project().await;
        let address = service.address();

        // Freshly deployed: closed, hidden, no root
        let snapshot = service.snapshot().await.unwrap();
        assert_eq!(snapshot.sale_state, SaleState::Closed);
        assert!(!snapshot.revealed);
        assert!(matches!(
            service.token_uri(1).await,
            Err(ContractError::Reverted(_))
        ));

        // Constructor already carries the allowlist terms, so only the root and
        // the state change are sent
        let report = service
            .open_allowlist_sale(&allowlist.root(), &config.allowlist_terms().unwrap())
            .await
            .unwrap();
        assert_eq!(report.transactions_sent(), 2);
        assert_eq!(
            chain.sent_methods(),
            vec!["constructor", methods::SET_MERKLE_ROOT, methods::SET_ALLOWLIST_ONLY]
        );

        let member = ALLOWLISTED[1];
        let proof = allowlist.proof_for(member).unwrap();
        let price = parse_ether("0.01").unwrap();

        assert_eq!(
            service
                .preflight_allowlist_mint(identity(member), 1, price, &proof)
                .await
                .unwrap(),
            price
        );
        assert!(matches!(
            service
                .preflight_allowlist_mint(identity(member), 2, price * 2u64, &proof)
                .await,
            Err(ContractError::MintRejected(MintRejection::InvalidMintAmount))
        ));
        assert!(matches!(
            service
                .preflight_allowlist_mint(identity(OUTSIDER), 1, price, &proof)
                .await,
            Err(ContractError::MintRejected(MintRejection::InvalidProof))
        ));
        assert!(matches!(
            service
                .preflight_public_mint(identity(OUTSIDER), 1, price)
                .await,
            Err(ContractError::MintRejected(MintRejection::SaleClosed(
                MintKind::Public
            )))
        ));

        mint_as(
            &chain,
            member,
            address,
            methods::allowlist_mint(1, &proof.siblings),
            price,
        )
        .await;
        assert_eq!(service.snapshot().await.unwrap().total_supply, U256::one());

        // The claim is only visible to the contract
        assert!(matches!(
            service
                .preflight_allowlist_mint(identity(member), 1, price, &proof)
                .await,
            Err(ContractError::MintRejected(
                MintRejection::AddressAlreadyClaimed
            ))
        ));

        // Hidden until revealed
        assert_eq!(service.token_uri(1).await.unwrap(), HIDDEN_METADATA_URI);

        let report = service
            .open_public_sale(&config.public_terms().unwrap())
            .await
            .unwrap();
        assert_eq!(report.transactions_sent(), 3);
        let public_price = parse_ether("0.02").unwrap();
        assert_eq!(
            service
                .preflight_public_mint(identity(OUTSIDER), 3, public_price * 3u64)
                .await
                .unwrap(),
            public_price * 3u64
        );
        assert!(matches!(
            service
                .preflight_public_mint(identity(OUTSIDER), 3, public_price * 2u64)
                .await,
            Err(ContractError::MintRejected(MintRejection::InsufficientFunds))
        ));
        assert!(matches!(
            service
                .preflight_allowlist_mint(identity(ALLOWLISTED[2]), 1, price, &proof)
                .await,
            Err(ContractError::MintRejected(MintRejection::SaleClosed(
                MintKind::Allowlist
            )))
        ));

        service.reveal("ipfs://QmRevealed/").await.unwrap();
        assert_eq!(service.token_uri(1).await.unwrap(), "ipfs://QmRevealed/1.json");

        let report = service.close_sales().await.unwrap();
        assert_eq!(report.sent_methods(), vec![methods::SET_CLOSED]);
        assert!(service.close_sales().await.unwrap().is_noop());
        assert_eq!(
            service.snapshot().await.unwrap().sale_state,
            SaleState::Closed
        );
    }

    #[tokio::test]
    async fn test_supply_cap_reached_through_owner_mints() {
        let Deployed {
            _dir,
            service,
            config,
            ..
        } = deploy_project().await;
        service
            .open_public_sale(&config.public_terms().unwrap())
            .await
            .unwrap();

        // maxSupply is 10 and the public cap is 3 per transaction
        for _ in 0..3 {
            service
                .mint_for_address(identity(ALLOWLISTED[0]), 3)
                .await
                .unwrap();
        }
        let price = parse_ether("0.02").unwrap();
        assert!(service
            .preflight_public_mint(identity(OUTSIDER), 1, price)
            .await
            .is_ok());
        assert!(matches!(
            service
                .preflight_public_mint(identity(OUTSIDER), 2, price * 2u64)
                .await,
            Err(ContractError::MintRejected(MintRejection::MaxSupplyExceeded))
        ));
    }

    #[tokio::test]
    async fn test_local_guards_agree_with_contract() {
        let Deployed {
            _dir,
            chain,
            service,
            config,
            allowlist,
        } = deploy_project().await;
        let address = service.address();
        let member = ALLOWLISTED[3];
        let proof = allowlist.proof_for(member).unwrap();
        let price = parse_ether("0.01").unwrap();

        let cases = [
            (MintKind::Allowlist, member, 1, price),
            (MintKind::Allowlist, member, 0, price),
            (MintKind::Allowlist, member, 1, price - U256::one()),
            (MintKind::Allowlist, OUTSIDER, 1, price),
            (MintKind::Public, OUTSIDER, 1, price),
            (MintKind::Public, OUTSIDER, 4, price * 4u64),
        ];

        for phase in 0..3 {
            match phase {
                0 => {}
                1 => {
                    service
                        .open_allowlist_sale(&allowlist.root(), &config.allowlist_terms().unwrap())
                        .await
                        .unwrap();
                }
                _ => {
                    service
                        .open_public_sale(&config.allowlist_terms().unwrap())
                        .await
                        .unwrap();
                }
            }
            let snapshot = service.snapshot().await.unwrap();

            for (kind, minter, amount, value) in cases.iter().cloned() {
                let request = MintRequest {
                    kind,
                    minter: identity(minter),
                    amount,
                    value,
                    proof: (kind == MintKind::Allowlist).then(|| proof.clone()),
                };
                let local = MintGuard::new(&snapshot).check(&request);

                let data = match kind {
                    MintKind::Allowlist => methods::allowlist_mint(amount, &proof.siblings),
                    MintKind::Public => methods::public_mint(amount),
                };
                let call = CallRequest::new(address, data)
                    .sender(identity(minter))
                    .with_value(value);
                let contract = chain.call(&call).await;

                match (local, contract) {
                    (Ok(_), Ok(_)) => {}
                    (Err(expected), Err(ContractError::MintRejected(actual))) => {
                        assert_eq!(expected, actual, "phase {phase}, {kind:?} by {minter}");
                    }
                    (local, contract) => {
                        panic!("phase {phase}, {kind:?} by {minter}: {local:?} vs {contract:?}")
                    }
                }
            }
        }
    }
}
