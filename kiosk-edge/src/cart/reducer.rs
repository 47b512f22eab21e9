//! Cart line identity utilities
//!
//! - `generate_line_key`: derive the identity of a product / variant / add-on combination
//! - `selection_to_line`: build a CartLine from a caller selection
//!
//! Event application lives in the appliers module.

use shared::cart::{CartLine, LineKey, Selection};
use tracing::debug;

/// Variant component of a line with no variant chosen
pub const BASE_VARIANT: &str = "base";

/// Add-on component of a line with no add-ons
pub const NO_ADDONS: &str = "noaddons";

const KEY_SEPARATOR: char = '_';
const ADDON_SEPARATOR: char = '+';

/// Sort and de-duplicate add-on ids (identity is set-based)
pub fn normalize_addons(addons: &[String]) -> Vec<String> {
    let mut normalized = addons.to_vec();
    normalized.sort();
    normalized.dedup();
    normalized
}

/// Derive the line key
///
/// `{product_id}_{variant_id|base}_{addon ids sorted and joined by '+'|noaddons}`
///
/// Lines with the same key are merged (quantities added together), so the
/// key depends only on the selection, never on prices or quantities.
pub fn generate_line_key(product_id: i64, variant_id: Option<&str>, addons: &[String]) -> LineKey {
    let addons = normalize_addons(addons);
    let addon_part = if addons.is_empty() {
        NO_ADDONS.to_string()
    } else {
        addons.join(&ADDON_SEPARATOR.to_string())
    };

    let key = format!(
        "{product_id}{KEY_SEPARATOR}{}{KEY_SEPARATOR}{addon_part}",
        variant_id.unwrap_or(BASE_VARIANT)
    );
    debug!(product_id, variant_id = ?variant_id, key = %key, "[Reducer] Derived line key");
    LineKey::new(key)
}

/// Key addressed by a selection
pub fn selection_key(selection: &Selection) -> LineKey {
    generate_line_key(
        selection.product_id,
        selection.variant_id.as_deref(),
        &selection.addons,
    )
}

/// Key of the base (no variant, no add-ons) line of a product
pub fn base_key(product_id: i64) -> LineKey {
    generate_line_key(product_id, None, &[])
}

/// Convert a selection into a line holding `quantity` units
pub fn selection_to_line(selection: &Selection, quantity: i32) -> CartLine {
    CartLine {
        key: selection_key(selection),
        product_id: selection.product_id,
        variant_id: selection.variant_id.clone(),
        addons: normalize_addons(&selection.addons),
        quantity,
    }
}
