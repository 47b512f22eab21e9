//! CartManager - Core command processing and event generation
//!
//! This module handles:
//! - Command validation and processing
//! - Event generation with global sequence numbers
//! - Snapshot updates
//! - Event broadcasting and resync
//!
//! # Command Flow
//!
//! ```text
//! execute_command(cmd)
//!     ├─ 1. Idempotency check (command_id)
//!     ├─ 2. Create CommandContext
//!     ├─ 3. Convert command to action and execute
//!     ├─ 4. Apply events to the snapshot via EventApplier
//!     ├─ 5. Retain events for resync
//!     ├─ 6. Mark command processed
//!     ├─ 7. Broadcast event(s)
//!     └─ 8. Return response
//! ```
//!
//! A rejected command leaves the snapshot untouched and is not marked
//! processed, so it may be retried with the same id.

mod error;
pub use error::*;

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use tokio::sync::broadcast;

use super::actions::CommandAction;
use super::appliers::EventAction;
use super::traits::{
    AmbiguityPolicy, CommandContext, CommandHandler, CommandMetadata, EventApplier, ProductLookup,
};
use shared::cart::{
    CartCommand, CartCommandPayload, CartEvent, CartSnapshot, CommandResponse, Selection,
    SyncResponse,
};

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Number of events retained for `events_since`
pub const EVENT_LOG_CAPACITY: usize = 1024;

/// Number of command ids remembered for idempotency
const PROCESSED_COMMAND_CAPACITY: usize = 4096;

/// CartManager for command processing
///
/// The `epoch` field is a unique identifier generated per instance.
/// Subscribers use it to detect a restarted store and trigger a full resync.
pub struct CartManager {
    snapshot: CartSnapshot,
    event_tx: broadcast::Sender<CartEvent>,
    /// Instance epoch - unique ID generated on construction
    epoch: String,
    /// Last allocated event sequence
    sequence: u64,
    processed_commands: HashSet<String>,
    /// Insertion order of `processed_commands`, oldest first
    processed_order: VecDeque<String>,
    /// Most recent events, oldest first
    event_log: VecDeque<CartEvent>,
    /// Catalog for selection validation (optional)
    catalog: Option<Arc<dyn ProductLookup>>,
    policy: AmbiguityPolicy,
}

impl std::fmt::Debug for CartManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartManager")
            .field("snapshot", &self.snapshot)
            .field("event_tx", &"<broadcast::Sender>")
            .field("epoch", &self.epoch)
            .field("sequence", &self.sequence)
            .field("catalog", &self.catalog.as_ref().map(|_| "<ProductLookup>"))
            .field("policy", &self.policy)
            .finish()
    }
}

impl Default for CartManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CartManager {
    /// Create an empty cart with the default ambiguity policy
    pub fn new() -> Self {
        Self::with_policy(AmbiguityPolicy::default())
    }

    /// Create an empty cart with the given ambiguity policy
    pub fn with_policy(policy: AmbiguityPolicy) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let epoch = uuid::Uuid::new_v4().to_string();
        tracing::info!(epoch = %epoch, policy = ?policy, "CartManager started with new epoch");
        Self {
            snapshot: CartSnapshot::new(),
            event_tx,
            epoch,
            sequence: 0,
            processed_commands: HashSet::new(),
            processed_order: VecDeque::new(),
            event_log: VecDeque::new(),
            catalog: None,
            policy,
        }
    }

    /// Attach a catalog; added selections are then checked against it
    pub fn set_catalog(&mut self, catalog: Arc<dyn ProductLookup>) {
        self.catalog = Some(catalog);
    }

    pub fn set_policy(&mut self, policy: AmbiguityPolicy) {
        self.policy = policy;
    }

    pub fn policy(&self) -> AmbiguityPolicy {
        self.policy
    }

    /// Get the instance epoch
    pub fn epoch(&self) -> &str {
        &self.epoch
    }

    /// Current cart state
    pub fn snapshot(&self) -> &CartSnapshot {
        &self.snapshot
    }

    /// Sequence number of the last event produced
    pub fn last_sequence(&self) -> u64 {
        self.sequence
    }

    /// Total units across all lines
    pub fn total_quantity(&self) -> i64 {
        self.snapshot.total_quantity()
    }

    /// Subscribe to event broadcasts
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.event_tx.subscribe()
    }

    // ========== Intents ==========

    /// Add `quantity` units of a selection
    pub fn add_item(&mut self, selection: Selection, quantity: i32) -> CommandResponse {
        self.execute_command(CartCommand::new(CartCommandPayload::AddItem {
            selection,
            quantity,
        }))
    }

    /// Change the quantity of the line a selection resolves to by `delta`
    pub fn update_qty(&mut self, selection: Selection, delta: i32) -> CommandResponse {
        self.execute_command(CartCommand::new(CartCommandPayload::UpdateQty {
            selection,
            delta,
        }))
    }

    /// Remove the line with the exact key of a selection
    pub fn remove_item(&mut self, selection: Selection) -> CommandResponse {
        self.execute_command(CartCommand::new(CartCommandPayload::RemoveItem { selection }))
    }

    /// Remove every line
    pub fn clear_cart(&mut self) -> CommandResponse {
        self.execute_command(CartCommand::new(CartCommandPayload::ClearCart))
    }

    // ========== Command processing ==========

    /// Execute a command and return the response
    pub fn execute_command(&mut self, cmd: CartCommand) -> CommandResponse {
        self.execute_command_with_events(cmd).0
    }

    /// Execute a command and return both the response and generated events
    ///
    /// Events are broadcast to subscribers as well.
    pub fn execute_command_with_events(
        &mut self,
        cmd: CartCommand,
    ) -> (CommandResponse, Vec<CartEvent>) {
        let command_id = cmd.command_id.clone();
        match self.process_command(cmd) {
            Ok((response, events)) => {
                for event in &events {
                    if self.event_tx.send(event.clone()).is_err() {
                        tracing::debug!("Event broadcast skipped: no active receivers");
                        break;
                    }
                }
                (response, events)
            }
            Err(err) => {
                tracing::warn!(command_id = %command_id, error = %err, "Command rejected");
                (CommandResponse::error(command_id, err.into()), vec![])
            }
        }
    }

    /// Process command and return response with events
    ///
    /// 1. Convert command to CommandAction
    /// 2. Execute action to generate events
    /// 3. Apply events to the snapshot via EventApplier
    fn process_command(
        &mut self,
        cmd: CartCommand,
    ) -> ManagerResult<(CommandResponse, Vec<CartEvent>)> {
        tracing::debug!(command_id = %cmd.command_id, payload = ?cmd.payload, "Processing command");

        // 1. Idempotency check
        if self.processed_commands.contains(&cmd.command_id) {
            tracing::warn!(command_id = %cmd.command_id, "Duplicate command");
            return Ok((CommandResponse::duplicate(cmd.command_id), vec![]));
        }

        // 2. Convert to action and execute against a read-only context
        let metadata = CommandMetadata {
            command_id: cmd.command_id.clone(),
            timestamp: cmd.timestamp,
        };
        let action = CommandAction::from(&cmd);
        let events = {
            let mut ctx = CommandContext::new(
                &self.snapshot,
                self.catalog.as_deref(),
                self.policy,
                self.sequence,
            );
            action.execute(&mut ctx, &metadata)?
        };

        // 3. Apply events
        for event in &events {
            let applier: EventAction = event.into();
            applier.apply(&mut self.snapshot, event);
        }
        if let Some(last) = events.last() {
            self.sequence = last.sequence;
        }

        // 4. Retain for resync
        for event in &events {
            if self.event_log.len() == EVENT_LOG_CAPACITY {
                self.event_log.pop_front();
            }
            self.event_log.push_back(event.clone());
        }

        // 5. Mark processed
        self.mark_processed(cmd.command_id.clone());

        tracing::info!(
            command_id = %cmd.command_id,
            event_count = events.len(),
            line_count = self.snapshot.len(),
            total_quantity = self.snapshot.total_quantity(),
            "Command processed successfully"
        );

        Ok((
            CommandResponse::success(cmd.command_id, Some(self.sequence)),
            events,
        ))
    }

    fn mark_processed(&mut self, command_id: String) {
        if self.processed_order.len() == PROCESSED_COMMAND_CAPACITY {
            if let Some(oldest) = self.processed_order.pop_front() {
                self.processed_commands.remove(&oldest);
            }
        }
        self.processed_commands.insert(command_id.clone());
        self.processed_order.push_back(command_id);
    }

    // ========== Sync ==========

    /// Events with a sequence greater than `since_sequence`
    ///
    /// `requires_full_sync` is set when the caller is ahead of this instance
    /// (a different epoch) or when events it needs were already evicted.
    pub fn events_since(&self, since_sequence: u64) -> SyncResponse {
        let oldest_retained = self.event_log.front().map(|e| e.sequence);
        let evicted =
            oldest_retained.is_some_and(|oldest| since_sequence.saturating_add(1) < oldest);
        let ahead = since_sequence > self.sequence;

        let events = self
            .event_log
            .iter()
            .filter(|e| e.sequence > since_sequence)
            .cloned()
            .collect();

        SyncResponse {
            epoch: self.epoch.clone(),
            events,
            current_sequence: self.sequence,
            requires_full_sync: evicted || ahead,
        }
    }

    /// Rebuild the snapshot by replaying the retained events
    ///
    /// Returns `None` once early events have been evicted from the log.
    pub fn rebuild_snapshot(&self) -> Option<CartSnapshot> {
        if self.event_log.front().is_some_and(|e| e.sequence != 1) {
            return None;
        }

        let mut snapshot = CartSnapshot::new();
        for event in &self.event_log {
            let applier: EventAction = event.into();
            applier.apply(&mut snapshot, event);
        }
        Some(snapshot)
    }
}

#[cfg(test)]
mod tests;
