//! # Concurrency
//!
//! Contention on one shared service: every mutation must be all-or-nothing
//! and readers must only ever see committed state.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use badge_ledger::prelude::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    const MINTERS: u32 = 64;

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_duplicate_mint_race_has_one_winner_per_address() {
        let (service, registry) = badge_service();
        for n in 0..MINTERS {
            verify(&registry, user(n)).unwrap();
        }

        // Every address fires the same request twice.
        let mut handles = Vec::new();
        for n in 0..MINTERS {
            for _ in 0..2 {
                let service = service.clone();
                handles.push(tokio::task::spawn_blocking(move || {
                    (user(n), service.mint_badge(user(n), BADGE_URI))
                }));
            }
        }

        let mut winners = HashSet::new();
        let mut ids = Vec::new();
        for handle in handles {
            let (who, result) = handle.await.unwrap();
            match result {
                Ok(receipt) => {
                    assert!(winners.insert(who), "{who} minted twice");
                    ids.push(receipt.token_id);
                }
                Err(err) => assert_eq!(err.kind(), BadgeErrorKind::AlreadyMinted),
            }
        }

        ids.sort_unstable();
        assert_eq!(ids, (0..u64::from(MINTERS)).collect::<Vec<_>>());
        assert_eq!(winners.len(), MINTERS as usize);
        assert_eq!(service.total_supply(), u64::from(MINTERS));
        assert_eq!(service.stats().rejected, u64::from(MINTERS));
        assert!(service.check_invariants().is_valid());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_transfers_of_one_badge() {
        let (service, registry) = badge_service();
        let x = user(0);
        verify(&registry, x).unwrap();
        service.mint_badge(x, BADGE_URI).unwrap();

        let mut handles = Vec::new();
        for n in 1..=16 {
            let service = service.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                service.transfer(x, user(n), 0)
            }));
        }

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => successes += 1,
                Err(err) => assert_eq!(err.kind(), BadgeErrorKind::NotOwner),
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(service.balance_of(x), 0);
        assert_ne!(service.owner_of(0).unwrap(), x);
    }

    #[test]
    fn test_readers_only_see_committed_state() {
        let (service, registry) = badge_service();
        for n in 0..MINTERS {
            verify(&registry, user(n)).unwrap();
        }
        let done = AtomicBool::new(false);

        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let mut last_supply = 0;
                    while !done.load(Ordering::Acquire) {
                        service.with_state(|state| {
                            let supply = state.total_supply();
                            assert!(supply >= last_supply, "supply went backwards");
                            last_supply = supply;
                            assert!(check_all_invariants(state).is_valid());
                        });
                    }
                });
            }

            let writers: Vec<_> = (0..4u32)
                .map(|w| {
                    let service = &service;
                    scope.spawn(move || {
                        for n in (w..MINTERS).step_by(4) {
                            service.mint_badge(user(n), BADGE_URI).unwrap();
                        }
                    })
                })
                .collect();
            for writer in writers {
                writer.join().unwrap();
            }
            done.store(true, Ordering::Release);
        });

        assert_eq!(service.total_supply(), u64::from(MINTERS));
    }

    #[test]
    fn test_revocation_racing_mint_is_atomic() {
        // Either the mint sees the credential and succeeds, or it sees none
        // and is rejected; no third outcome.
        for round in 0..50 {
            let (service, registry) = badge_service();
            let x = user(round);
            verify(&registry, x).unwrap();

            let (mint, revoke) = thread::scope(|scope| {
                let mint = scope.spawn(|| service.mint_badge(x, BADGE_URI));
                let revoke = scope.spawn(|| registry.revoke(OWNER, x));
                (mint.join().unwrap(), revoke.join().unwrap())
            });

            assert!(revoke.is_ok());
            match mint {
                Ok(receipt) => {
                    assert_eq!(receipt.token_id, 0);
                    assert_eq!(service.total_supply(), 1);
                }
                Err(err) => {
                    assert_eq!(err.kind(), BadgeErrorKind::NotEligible);
                    assert_eq!(service.total_supply(), 0);
                }
            }
        }
    }
}
