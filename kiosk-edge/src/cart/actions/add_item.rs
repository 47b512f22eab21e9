//! AddItem command handler
//!
//! Adds units of a selection, merging into the existing line with the same key.

use shared::cart::{CartEvent, CartEventType, EventPayload, Selection};

use crate::cart::reducer::{selection_key, selection_to_line};
use crate::cart::traits::{
    CartError, CommandContext, CommandHandler, CommandMetadata, ProductLookup,
};
use crate::utils::validation::{checked_line_quantity, validate_add_quantity, validate_selection};

/// AddItem action
#[derive(Debug, Clone)]
pub struct AddItemAction {
    pub selection: Selection,
    pub quantity: i32,
}

/// Check that the product exists and owns the chosen variant and add-ons
fn validate_against_catalog(
    catalog: &dyn ProductLookup,
    selection: &Selection,
) -> Result<(), CartError> {
    let product = catalog
        .product(selection.product_id)
        .ok_or(CartError::ProductNotFound(selection.product_id))?;

    if let Some(variant_id) = &selection.variant_id {
        if product.variant(variant_id).is_none() {
            return Err(CartError::VariantNotFound {
                product_id: product.id,
                variant_id: variant_id.clone(),
            });
        }
    }

    if let Some(addon_id) = selection
        .addons
        .iter()
        .find(|id| product.addon(id).is_none())
    {
        return Err(CartError::AddonNotFound {
            product_id: product.id,
            addon_id: addon_id.clone(),
        });
    }

    Ok(())
}

impl CommandHandler for AddItemAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<CartEvent>, CartError> {
        // 1. Validate input shape
        validate_add_quantity(self.quantity)?;
        validate_selection(&self.selection)?;

        // 2. Validate against the catalog when one is attached
        if let Some(catalog) = ctx.catalog() {
            validate_against_catalog(catalog, &self.selection)?;
        }

        // 3. The merged line must stay within limits
        let key = selection_key(&self.selection);
        let existing = ctx.snapshot().get(&key).map(|l| l.quantity).unwrap_or(0);
        checked_line_quantity(existing, self.quantity)?;

        // 4. Emit the added units; the applier merges them
        let seq = ctx.next_sequence();
        let line = selection_to_line(&self.selection, self.quantity);
        let event = CartEvent::new(
            seq,
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            CartEventType::ItemAdded,
            EventPayload::ItemAdded { line },
        );

        Ok(vec![event])
    }
}
