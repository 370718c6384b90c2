//! # Badge Ledger Benchmarks
//!
//! | Path | Expectation |
//! |------|-------------|
//! | Mint (self-service) | O(log n) per badge |
//! | Transfer | O(log n) per badge |
//! | Eligibility / ownership queries | O(1), read lock only |

use badge_ledger::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

const OWNER: Address = Address::repeat_byte(0xaa);

fn user(n: u32) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = 0x10;
    bytes[16..].copy_from_slice(&n.to_be_bytes());
    Address::new(bytes)
}

fn setup(verified: u32) -> BadgeService<Arc<InMemoryIdentityRegistry>> {
    let registry = Arc::new(InMemoryIdentityRegistry::new(OWNER));
    for n in 0..verified {
        let _ = registry.issue(OWNER, user(n), "ipfs://identity");
    }
    match BadgeService::new(&LedgerConfig::new(OWNER, Address::repeat_byte(0xbb)), registry) {
        Ok(service) => service,
        Err(e) => panic!("benchmark config must be valid: {e}"),
    }
}

// ============================================================================
// MINTING
// ============================================================================

fn bench_mint(c: &mut Criterion) {
    let mut group = c.benchmark_group("badge-mint");
    group.measurement_time(Duration::from_secs(5));

    for size in [100u32, 1_000, 10_000] {
        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(BenchmarkId::new("mint_badge_batch", size), &size, |b, &size| {
            b.iter_with_setup(
                || setup(size),
                |service| {
                    for n in 0..size {
                        black_box(service.mint_badge(user(n), "ipfs://badge").is_ok());
                    }
                },
            );
        });
    }

    group.bench_function("rejected_mint_not_eligible", |b| {
        let service = setup(0);
        b.iter(|| black_box(service.mint_badge(user(1), "ipfs://badge").is_err()));
    });

    group.finish();
}

// ============================================================================
// TRANSFERS
// ============================================================================

fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("badge-transfer");

    let service = setup(1_000);
    for n in 0..1_000 {
        let _ = service.mint_badge(user(n), "ipfs://badge");
    }

    // Ping-pong a badge between two holders.
    let (a, b_addr) = (user(0), user(1));
    let mut holder = a;
    group.bench_function("transfer_ping_pong", |b| {
        b.iter(|| {
            let next = if holder == a { b_addr } else { a };
            black_box(service.transfer(holder, next, 0).is_ok());
            holder = next;
        });
    });

    group.finish();
}

// ============================================================================
// QUERIES
// ============================================================================

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("badge-queries");

    let service = setup(10_000);
    for n in 0..5_000 {
        let _ = service.mint_badge(user(n), "ipfs://badge");
    }
    let mut rng = rand::thread_rng();

    group.bench_function("is_eligible_for_badge", |b| {
        b.iter(|| black_box(service.is_eligible_for_badge(user(rng.gen_range(0..10_000)))));
    });
    group.bench_function("owner_of", |b| {
        b.iter(|| black_box(service.owner_of(rng.gen_range(0..5_000)).is_ok()));
    });
    group.bench_function("badge_status", |b| {
        b.iter(|| black_box(service.badge_status(user(rng.gen_range(0..10_000)))));
    });

    group.finish();
}

criterion_group!(benches, bench_mint, bench_transfer, bench_queries);
criterion_main!(benches);
