use super::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEEDS: [u64; 4] = [1, 7, 42, 2024];
const OPS_PER_RUN: usize = 500;

fn random_selection(rng: &mut impl Rng) -> Selection {
    match rng.gen_range(0..3) {
        0 => {
            let variants = [None, Some("half"), Some("full"), Some("jumbo")];
            let mut selection = Selection::product(1);
            if let Some(variant) = variants[rng.gen_range(0..variants.len())] {
                selection = selection.with_variant(variant);
            }
            if rng.gen_bool(0.3) {
                selection = selection.with_addons(["raita"]);
            }
            selection
        }
        1 => fries(),
        _ => {
            let addons: Vec<&str> = ["extra-cheese", "mayo", "mayo"]
                .into_iter()
                .filter(|_| rng.gen_bool(0.5))
                .collect();
            burger(&addons)
        }
    }
}

fn run_random_session(policy: AmbiguityPolicy, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut manager = create_manager_with_catalog(policy);

    for step in 0..OPS_PER_RUN {
        let before = manager.snapshot().clone();
        let response = match rng.gen_range(0..20) {
            0..=8 => manager.add_item(random_selection(&mut rng), rng.gen_range(1..=5)),
            9..=16 => manager.update_qty(random_selection(&mut rng), rng.gen_range(-4..=4)),
            17..=18 => manager.remove_item(random_selection(&mut rng)),
            _ => manager.clear_cart(),
        };

        assert_invariants(&manager);
        if !response.success {
            assert_eq!(
                manager.snapshot(),
                &before,
                "rejected command changed the cart (policy {policy:?}, seed {seed}, step {step})"
            );
        }

        let total: i64 = manager.snapshot().lines.iter().map(|l| i64::from(l.quantity)).sum();
        assert_eq!(manager.total_quantity(), total);

        let rebuilt = manager
            .rebuild_snapshot()
            .expect("log holds every event of the run");
        assert_eq!(
            &rebuilt,
            manager.snapshot(),
            "replay diverged (policy {policy:?}, seed {seed}, step {step})"
        );
    }
}

#[test]
fn test_random_sequences_keep_invariants_with_reject_policy() {
    for seed in SEEDS {
        run_random_session(AmbiguityPolicy::Reject, seed);
    }
}

#[test]
fn test_random_sequences_keep_invariants_with_most_recent_policy() {
    for seed in SEEDS {
        run_random_session(AmbiguityPolicy::MostRecent, seed);
    }
}
