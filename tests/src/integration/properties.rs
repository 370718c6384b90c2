//! # Ledger Properties
//!
//! Randomized operation sequences checked against a tiny reference model
//! after every step. Seeds are fixed so failures reproduce.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use badge_ledger::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::{HashMap, HashSet};

    const POPULATION: u32 = 12;
    const STEPS: usize = 400;
    const SEEDS: [u64; 4] = [1, 7, 42, 2024];

    /// What the ledger should look like from the outside.
    #[derive(Default)]
    struct Model {
        verified: HashSet<Address>,
        minted: HashSet<Address>,
        owners: Vec<Address>,
    }

    impl Model {
        fn eligible(&self, a: Address) -> bool {
            self.verified.contains(&a) && !self.minted.contains(&a)
        }

        fn balance(&self, a: Address) -> u64 {
            self.owners.iter().filter(|o| **o == a).count() as u64
        }
    }

    fn assert_matches_model(service: &BadgeService<SharedRegistry>, model: &Model) {
        assert_eq!(service.total_supply(), model.owners.len() as u64);
        for n in 0..POPULATION {
            let a = user(n);
            assert_eq!(service.is_eligible_for_badge(a), model.eligible(a), "eligibility of {a}");
            assert_eq!(service.balance_of(a), model.balance(a), "balance of {a}");
            assert_eq!(service.has_minted(a), model.minted.contains(&a));
        }
        for (id, owner) in model.owners.iter().enumerate() {
            assert_eq!(service.owner_of(id as u64).unwrap(), *owner);
        }
        assert!(service.check_invariants().is_valid());
    }

    fn run_sequence(seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (service, registry) = badge_service();
        let mut model = Model::default();

        for _ in 0..STEPS {
            let actor = user(rng.gen_range(0..POPULATION));
            match rng.gen_range(0..10) {
                // Identity changes happen outside the ledger.
                0 | 1 => {
                    if model.verified.contains(&actor) {
                        registry.revoke(OWNER, actor).unwrap();
                        model.verified.remove(&actor);
                    } else {
                        verify(&registry, actor).unwrap();
                        model.verified.insert(actor);
                    }
                }
                2..=4 => {
                    let via_owner = rng.gen_bool(0.3);
                    let result = if via_owner {
                        service.safe_mint(OWNER, actor, BADGE_URI)
                    } else {
                        service.mint_badge(actor, BADGE_URI)
                    };
                    match result {
                        Ok(receipt) => {
                            assert!(model.eligible(actor));
                            assert_eq!(receipt.token_id, model.owners.len() as u64);
                            model.minted.insert(actor);
                            model.owners.push(actor);
                        }
                        Err(err) if model.minted.contains(&actor) => {
                            assert_eq!(err.kind(), BadgeErrorKind::AlreadyMinted);
                        }
                        Err(err) => {
                            assert!(!model.verified.contains(&actor));
                            assert_eq!(err.kind(), BadgeErrorKind::NotEligible);
                        }
                    }
                }
                _ => {
                    if model.owners.is_empty() {
                        continue;
                    }
                    let id = rng.gen_range(0..model.owners.len());
                    let to = user(rng.gen_range(0..POPULATION));
                    let holder = model.owners[id];
                    let eligible_before = (model.eligible(actor), model.eligible(to));

                    match service.transfer(actor, to, id as u64) {
                        Ok(()) => {
                            assert_eq!(actor, holder);
                            model.owners[id] = to;
                        }
                        Err(err) => {
                            assert_ne!(actor, holder);
                            assert_eq!(err.kind(), BadgeErrorKind::NotOwner);
                        }
                    }
                    assert_eq!(
                        (service.is_eligible_for_badge(actor), service.is_eligible_for_badge(to)),
                        eligible_before
                    );
                }
            }
            assert_matches_model(&service, &model);
        }
    }

    #[test]
    fn test_random_sequences_match_model() {
        for seed in SEEDS {
            run_sequence(seed);
        }
    }

    #[test]
    fn test_rejected_mint_changes_nothing() {
        let mut rng = StdRng::seed_from_u64(9);
        let (service, registry) = badge_service();
        for n in 0..POPULATION / 2 {
            verify(&registry, user(n)).unwrap();
            service.mint_badge(user(n), BADGE_URI).unwrap();
        }

        for _ in 0..100 {
            let before = service.snapshot();
            let target = user(rng.gen_range(0..POPULATION * 2));
            if service.is_eligible_for_badge(target) {
                continue;
            }
            assert!(service.mint_badge(target, BADGE_URI).is_err());
            let after = service.snapshot();
            assert_eq!(after.total_supply(), before.total_supply());
            assert_eq!(after.events().len(), before.events().len());
            assert_eq!(after.balance_of(target), before.balance_of(target));
        }
    }

    #[test]
    fn test_transfers_never_change_supply_or_mint_rights() {
        let mut rng = StdRng::seed_from_u64(77);
        let (service, registry) = badge_service();
        let minters: Vec<Address> = (0..4).map(user).collect();
        for m in &minters {
            verify(&registry, *m).unwrap();
            service.mint_badge(*m, BADGE_URI).unwrap();
        }
        let mut owners: HashMap<u64, Address> =
            (0..4u64).map(|id| (id, minters[id as usize])).collect();

        for _ in 0..200 {
            let id = rng.gen_range(0..4u64);
            let to = user(rng.gen_range(0..POPULATION));
            let from = owners[&id];
            service.transfer(from, to, id).unwrap();
            owners.insert(id, to);
            assert_eq!(service.total_supply(), 4);
        }

        for m in &minters {
            assert_eq!(
                service.mint_badge(*m, BADGE_URI).unwrap_err().kind(),
                BadgeErrorKind::AlreadyMinted
            );
        }
        assert_eq!(service.minted_events().len(), 4);
    }

    #[test]
    fn test_ids_are_dense_in_mint_order() {
        let (service, registry) = badge_service();
        let mut expected = Vec::new();
        for n in (0..POPULATION).rev() {
            verify(&registry, user(n)).unwrap();
            let id = service.mint_badge(user(n), BADGE_URI).unwrap().token_id;
            expected.push((user(n), id));
        }
        for (i, (minter, id)) in expected.iter().enumerate() {
            assert_eq!(*id, i as u64);
            assert_eq!(service.token_by_index(i as u64).unwrap(), *id);
            assert_eq!(service.minted_by(*id).unwrap(), *minter);
        }
        assert_eq!(
            service.token_by_index(u64::from(POPULATION)).unwrap_err().kind(),
            BadgeErrorKind::IndexOutOfBounds
        );
    }
}
