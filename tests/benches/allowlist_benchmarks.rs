//! # Allowlist Commitment Benchmarks
//!
//! | Operation | Cost | Target at 10k addresses |
//! |-----------|------|-------------------------|
//! | Tree build | O(n) hashes | < 50ms |
//! | Proof generation | O(log n) after lookup | < 1ms |
//! | Proof verification | O(log n) hashes | < 50µs |
//!
//! Run with `cargo bench -p nft-tests`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nft_allowlist::{
    build_tree, encode_leaf, generate_proof, keccak256, verify_proof, Allowlist, Identity,
    IDENTITY_LEN,
};
use std::time::Duration;

const SIZES: [usize; 4] = [16, 256, 1_024, 10_000];

fn identities(count: usize) -> Vec<Identity> {
    (0..count as u64)
        .map(|i| {
            let digest = keccak256(&i.to_be_bytes());
            let mut bytes = [0u8; IDENTITY_LEN];
            bytes.copy_from_slice(&digest[32 - IDENTITY_LEN..]);
            Identity::new(bytes)
        })
        .collect()
}

// ============================================================================
// Leaf encoding and tree construction
// ============================================================================

fn bench_tree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("allowlist-tree-build");
    group.measurement_time(Duration::from_secs(10));

    for size in SIZES {
        let leaves: Vec<_> = identities(size).iter().map(encode_leaf).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("build_tree", size), &leaves, |b, leaves| {
            b.iter(|| black_box(build_tree(leaves).map(|tree| tree.root())))
        });
    }

    let entries: Vec<String> = identities(1_024)
        .iter()
        .map(Identity::to_checksum)
        .collect();
    group.bench_function("from_entries_1024_checksummed", |b| {
        b.iter(|| black_box(Allowlist::from_entries(entries.iter()).map(|a| a.root())))
    });

    group.finish();
}

// ============================================================================
// Proofs
// ============================================================================

fn bench_proofs(c: &mut Criterion) {
    let mut group = c.benchmark_group("allowlist-proofs");

    for size in SIZES {
        let members = identities(size);
        let leaves: Vec<_> = members.iter().map(encode_leaf).collect();
        let tree = match build_tree(&leaves) {
            Ok(tree) => tree,
            Err(e) => panic!("benchmark tree: {e}"),
        };
        let root = tree.root();
        let target = leaves[size / 2];
        let proof = match generate_proof(&tree, &target) {
            Ok(proof) => proof,
            Err(e) => panic!("benchmark proof: {e}"),
        };

        group.bench_with_input(BenchmarkId::new("generate", size), &target, |b, leaf| {
            b.iter(|| black_box(generate_proof(&tree, leaf).is_ok()))
        });
        group.bench_with_input(BenchmarkId::new("verify", size), &proof, |b, proof| {
            b.iter(|| black_box(verify_proof(&root, &proof.leaf, &proof.siblings)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tree_build, bench_proofs);
criterion_main!(benches);
