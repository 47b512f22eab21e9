use super::*;

// ========================================================================
// Idempotency
// ========================================================================

#[test]
fn test_idempotency() {
    let mut manager = create_test_manager();
    let cmd = CartCommand::with_id(
        "kiosk-cmd-1",
        CartCommandPayload::AddItem {
            selection: fries(),
            quantity: 2,
        },
    );

    let first = manager.execute_command(cmd.clone());
    assert!(first.success);
    assert_eq!(first.last_sequence, Some(1));

    // Execute same command again
    let (second, events) = manager.execute_command_with_events(cmd);
    assert!(second.success);
    assert_eq!(second.last_sequence, None);
    assert!(events.is_empty());

    assert_eq!(qty_of(&manager, &fries()), 2);
}

#[test]
fn test_rejected_command_can_be_retried() {
    let mut manager = create_test_manager();
    manager.add_item(biryani("half"), 1);
    manager.add_item(biryani("full"), 1);

    let cmd = CartCommand::with_id(
        "retry-me",
        CartCommandPayload::UpdateQty {
            selection: Selection::product(1),
            delta: -1,
        },
    );
    assert!(!manager.execute_command(cmd.clone()).success);

    manager.set_policy(AmbiguityPolicy::MostRecent);
    let retried = manager.execute_command(cmd);
    assert!(retried.success);
    assert!(retried.last_sequence.is_some());
    assert_eq!(manager.snapshot().len(), 1);
}

// ========================================================================
// Broadcast
// ========================================================================

#[test]
fn test_event_broadcast() {
    let mut manager = create_test_manager();
    let mut rx = manager.subscribe();

    manager.add_item(fries(), 1);
    manager.update_qty(fries(), 2);

    let first = rx.try_recv().unwrap();
    assert_eq!(first.event_type, CartEventType::ItemAdded);
    assert_eq!(first.sequence, 1);

    let second = rx.try_recv().unwrap();
    assert_eq!(second.event_type, CartEventType::QuantityAdjusted);
    assert_eq!(second.sequence, 2);

    assert!(rx.try_recv().is_err());
}

#[test]
fn test_rejected_and_noop_commands_broadcast_nothing() {
    let mut manager = create_test_manager();
    let mut rx = manager.subscribe();

    manager.add_item(fries(), 0);
    manager.remove_item(fries());
    manager.update_qty(fries(), 0);

    assert!(rx.try_recv().is_err());
    assert_eq!(manager.last_sequence(), 0);
}

#[test]
fn test_sequence_monotonically_increasing() {
    let mut manager = create_test_manager();
    let mut rx = manager.subscribe();

    manager.add_item(biryani("full"), 1);
    manager.add_item(fries(), 1);
    manager.remove_item(Selection::product(99));
    manager.update_qty(fries(), -1);
    manager.clear_cart();

    let mut last = 0;
    while let Ok(event) = rx.try_recv() {
        assert_eq!(event.sequence, last + 1);
        last = event.sequence;
    }
    assert_eq!(last, 4);
    assert_eq!(manager.snapshot().last_sequence, 4);
}

// ========================================================================
// Resync
// ========================================================================

#[test]
fn test_events_since_completeness() {
    let mut manager = create_test_manager();
    manager.add_item(biryani("full"), 1);
    manager.add_item(fries(), 1);
    manager.update_qty(fries(), 1);

    let all = manager.events_since(0);
    assert_eq!(all.epoch, manager.epoch());
    assert_eq!(all.current_sequence, 3);
    assert!(!all.requires_full_sync);
    let seqs: Vec<u64> = all.events.iter().map(|e| e.sequence).collect();
    assert_eq!(seqs, vec![1, 2, 3]);

    let tail = manager.events_since(2);
    assert_eq!(tail.events.len(), 1);
    assert_eq!(tail.events[0].sequence, 3);

    assert!(manager.events_since(3).events.is_empty());
}

#[test]
fn test_events_since_ahead_of_instance_requires_full_sync() {
    let mut manager = create_test_manager();
    manager.add_item(fries(), 1);

    let response = manager.events_since(50);
    assert!(response.requires_full_sync);
    assert!(response.events.is_empty());
}

#[test]
fn test_events_since_after_eviction_requires_full_sync() {
    let mut manager = create_test_manager();
    manager.add_item(fries(), 1);
    for _ in 0..EVENT_LOG_CAPACITY {
        manager.update_qty(fries(), 1);
        manager.update_qty(fries(), -1);
    }
    assert_eq!(manager.last_sequence(), 1 + 2 * EVENT_LOG_CAPACITY as u64);

    let stale = manager.events_since(0);
    assert!(stale.requires_full_sync);
    assert_eq!(stale.events.len(), EVENT_LOG_CAPACITY);

    let recent = manager.events_since(manager.last_sequence() - 10);
    assert!(!recent.requires_full_sync);
    assert_eq!(recent.events.len(), 10);

    assert!(manager.rebuild_snapshot().is_none());
}

#[test]
fn test_events_since_max_sequence() {
    let mut manager = create_test_manager();
    manager.add_item(fries(), 1);

    let sync = manager.events_since(u64::MAX);
    assert!(sync.requires_full_sync);
    assert!(sync.events.is_empty());
    assert_eq!(sync.current_sequence, 1);
}

#[test]
fn test_rebuild_snapshot_matches_live_state() {
    let mut manager = create_test_manager();
    manager.add_item(biryani("half"), 2);
    manager.add_item(burger(&["mayo", "extra-cheese"]), 1);
    manager.add_item(fries(), 3);
    manager.update_qty(fries(), -1);
    manager.remove_item(biryani("half"));
    manager.add_item(biryani("half"), 1);

    let rebuilt = manager.rebuild_snapshot().unwrap();
    assert_eq!(&rebuilt, manager.snapshot());
}

#[test]
fn test_each_manager_has_own_epoch() {
    let a = create_test_manager();
    let b = create_test_manager();
    assert_ne!(a.epoch(), b.epoch());
}
