//! Input validation helpers
//!
//! Limits and checks applied to cart intents before any event is produced.
//! Selection ids are restricted so that the derived line key is injective:
//! the key joins ids with `_` and `+`, and uses `base` / `noaddons` as
//! placeholders, so none of those may appear inside an id.

use shared::cart::Selection;

use crate::cart::reducer::{BASE_VARIANT, NO_ADDONS};
use crate::cart::traits::CartError;

// ── Limits ──────────────────────────────────────────────────────────

/// Maximum quantity a single cart line may hold
pub const MAX_LINE_QUANTITY: i32 = 9999;

/// Maximum length of a variant or add-on id
pub const MAX_SELECTION_ID_LEN: usize = 64;

/// Maximum number of add-ons on one line
pub const MAX_ADDONS_PER_LINE: usize = 32;

// ── Quantity checks ─────────────────────────────────────────────────

/// Quantity requested by addItem: `1..=MAX_LINE_QUANTITY`
pub fn validate_add_quantity(quantity: i32) -> Result<(), CartError> {
    if quantity <= 0 {
        return Err(CartError::InvalidQuantity(format!(
            "quantity must be positive, got {quantity}"
        )));
    }
    if quantity > MAX_LINE_QUANTITY {
        return Err(CartError::InvalidQuantity(format!(
            "quantity exceeds maximum allowed ({MAX_LINE_QUANTITY}), got {quantity}"
        )));
    }
    Ok(())
}

/// Combine a stored quantity with a signed change, rejecting overflow and
/// results above the per-line limit. Results <= 0 are allowed here; the
/// caller turns them into a removal.
pub fn checked_line_quantity(current: i32, change: i32) -> Result<i32, CartError> {
    let next = current.checked_add(change).ok_or_else(|| {
        CartError::InvalidQuantity(format!("quantity overflow: {current} + {change}"))
    })?;
    if next > MAX_LINE_QUANTITY {
        return Err(CartError::InvalidQuantity(format!(
            "line quantity would exceed maximum allowed ({MAX_LINE_QUANTITY}), got {next}"
        )));
    }
    Ok(next)
}

// ── Selection checks ────────────────────────────────────────────────

/// Check one variant or add-on id against the key alphabet
pub fn validate_selection_id(value: &str, field: &str) -> Result<(), CartError> {
    if value.is_empty() {
        return Err(CartError::InvalidSelection(format!(
            "{field} must not be empty"
        )));
    }
    if value.len() > MAX_SELECTION_ID_LEN {
        return Err(CartError::InvalidSelection(format!(
            "{field} is too long ({} chars, max {MAX_SELECTION_ID_LEN})",
            value.len()
        )));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(CartError::InvalidSelection(format!(
            "{field} may only contain ASCII letters, digits and '-', got {value:?}"
        )));
    }
    if value == BASE_VARIANT || value == NO_ADDONS {
        return Err(CartError::InvalidSelection(format!(
            "{field} uses reserved id {value:?}"
        )));
    }
    Ok(())
}

/// Validate the shape of a selection (not its existence in the catalog)
pub fn validate_selection(selection: &Selection) -> Result<(), CartError> {
    if selection.product_id <= 0 {
        return Err(CartError::InvalidSelection(format!(
            "product_id must be positive, got {}",
            selection.product_id
        )));
    }
    if let Some(variant_id) = &selection.variant_id {
        validate_selection_id(variant_id, "variant_id")?;
    }
    if selection.addons.len() > MAX_ADDONS_PER_LINE {
        return Err(CartError::InvalidSelection(format!(
            "too many add-ons ({}, max {MAX_ADDONS_PER_LINE})",
            selection.addons.len()
        )));
    }
    for addon_id in &selection.addons {
        validate_selection_id(addon_id, "addon id")?;
    }
    Ok(())
}
