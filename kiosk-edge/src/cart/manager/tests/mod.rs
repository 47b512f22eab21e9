use super::*;
use crate::cart::reducer::{base_key, selection_key};
use crate::cart::testing::TestCatalog;
use shared::cart::{CartEventType, CommandErrorCode, EventPayload, RemovalReason};

fn create_test_manager() -> CartManager {
    CartManager::new()
}

fn create_manager_with_catalog(policy: AmbiguityPolicy) -> CartManager {
    let mut manager = CartManager::with_policy(policy);
    manager.set_catalog(Arc::new(TestCatalog::kiosk()));
    manager
}

fn biryani(variant: &str) -> Selection {
    Selection::product(1).with_variant(variant)
}

fn fries() -> Selection {
    Selection::product(2)
}

fn burger(addons: &[&str]) -> Selection {
    Selection::product(10).with_addons(addons.iter().copied())
}

/// Quantity of the line with the selection's exact key, 0 when absent
fn qty_of(manager: &CartManager, selection: &Selection) -> i32 {
    manager
        .snapshot()
        .get(&selection_key(selection))
        .map(|l| l.quantity)
        .unwrap_or(0)
}

/// Store invariants that must hold after every operation
fn assert_invariants(manager: &CartManager) {
    let lines = &manager.snapshot().lines;
    for (i, a) in lines.iter().enumerate() {
        assert!(a.quantity >= 1, "line {} has quantity {}", a.key, a.quantity);
        assert_eq!(a.key, selection_key(&a.selection()), "stale key for {}", a.key);
        for b in lines.iter().skip(i + 1) {
            assert_ne!(a.key, b.key, "duplicate key {}", a.key);
        }
    }
}

mod test_random;
mod test_sync;
