//! ClearCart command handler

use shared::cart::{CartEvent, CartEventType, EventPayload};

use crate::cart::traits::{CartError, CommandContext, CommandHandler, CommandMetadata};

/// ClearCart action
#[derive(Debug, Clone, Default)]
pub struct ClearCartAction;

impl CommandHandler for ClearCartAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<CartEvent>, CartError> {
        // Emitted even for an empty cart so subscribers see the reset
        let line_count = ctx.snapshot().len();
        let seq = ctx.next_sequence();
        Ok(vec![CartEvent::new(
            seq,
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            CartEventType::CartCleared,
            EventPayload::CartCleared { line_count },
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::reducer::selection_to_line;
    use crate::cart::testing::metadata;
    use crate::cart::traits::AmbiguityPolicy;
    use shared::cart::{CartSnapshot, Selection};

    #[test]
    fn test_clear_reports_line_count() {
        let mut snapshot = CartSnapshot::new();
        snapshot.lines.push(selection_to_line(&Selection::product(1), 1));
        snapshot.lines.push(selection_to_line(&Selection::product(2), 5));

        let mut ctx = CommandContext::new(&snapshot, None, AmbiguityPolicy::Reject, 7);
        let events = ClearCartAction.execute(&mut ctx, &metadata()).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].sequence, 8);
        assert_eq!(events[0].payload, EventPayload::CartCleared { line_count: 2 });
    }

    #[test]
    fn test_clear_empty_cart_still_emits() {
        let snapshot = CartSnapshot::new();
        let mut ctx = CommandContext::new(&snapshot, None, AmbiguityPolicy::Reject, 0);
        let events = ClearCartAction.execute(&mut ctx, &metadata()).unwrap();
        assert_eq!(events[0].payload, EventPayload::CartCleared { line_count: 0 });
    }
}
