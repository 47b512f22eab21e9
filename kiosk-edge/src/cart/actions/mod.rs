//! Command action implementations
//!
//! Each action implements the `CommandHandler` trait and handles
//! one specific command type.

use crate::cart::traits::{CartError, CommandContext, CommandHandler, CommandMetadata};
use shared::cart::{CartCommand, CartCommandPayload, CartEvent};

mod add_item;
mod clear_cart;
mod remove_item;
mod update_qty;

pub use add_item::AddItemAction;
pub use clear_cart::ClearCartAction;
pub use remove_item::RemoveItemAction;
pub use update_qty::UpdateQtyAction;

/// CommandAction enum - dispatches to concrete action implementations
#[derive(Debug, Clone)]
pub enum CommandAction {
    AddItem(AddItemAction),
    UpdateQty(UpdateQtyAction),
    RemoveItem(RemoveItemAction),
    ClearCart(ClearCartAction),
}

/// Manual implementation of CommandHandler for CommandAction
impl CommandHandler for CommandAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<CartEvent>, CartError> {
        match self {
            CommandAction::AddItem(action) => action.execute(ctx, metadata),
            CommandAction::UpdateQty(action) => action.execute(ctx, metadata),
            CommandAction::RemoveItem(action) => action.execute(ctx, metadata),
            CommandAction::ClearCart(action) => action.execute(ctx, metadata),
        }
    }
}

/// Convert CartCommand to CommandAction
///
/// This is the ONLY place with a match on CartCommandPayload.
impl From<&CartCommand> for CommandAction {
    fn from(cmd: &CartCommand) -> Self {
        match &cmd.payload {
            CartCommandPayload::AddItem {
                selection,
                quantity,
            } => CommandAction::AddItem(AddItemAction {
                selection: selection.clone(),
                quantity: *quantity,
            }),
            CartCommandPayload::UpdateQty { selection, delta } => {
                CommandAction::UpdateQty(UpdateQtyAction {
                    selection: selection.clone(),
                    delta: *delta,
                })
            }
            CartCommandPayload::RemoveItem { selection } => {
                CommandAction::RemoveItem(RemoveItemAction {
                    selection: selection.clone(),
                })
            }
            CartCommandPayload::ClearCart => CommandAction::ClearCart(ClearCartAction),
        }
    }
}
