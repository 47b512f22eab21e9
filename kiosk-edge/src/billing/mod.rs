//! Bill calculation using rust_decimal for precision
//!
//! The cart stores only selections and quantities; prices come from the
//! catalog at billing time. All arithmetic is done in `Decimal` and
//! converted to `f64` (2 decimal places, half-up) for the returned bill.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::cart::{CartLine, CartSnapshot, LineKey};
use shared::models::Product;

use crate::cart::ProductLookup;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Default tax rate, in percent
pub const DEFAULT_TAX_PERCENT: f64 = 5.0;

/// Convert f64 to Decimal for calculation
///
/// Non-finite input is logged and treated as zero.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(
            value = ?value,
            "Non-finite f64 in monetary calculation, defaulting to zero"
        );
        Decimal::ZERO
    })
}

/// Round to 2 decimal places
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_else(|| {
        tracing::error!(value = %value, "Decimal out of f64 range, defaulting to zero");
        0.0
    })
}

/// One priced cart line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillLine {
    pub key: LineKey,
    pub product_id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addon_names: Vec<String>,
    pub quantity: i32,
    /// Base + variant delta + add-ons
    pub unit_price: f64,
    pub line_total: f64,
}

/// Derived totals for the whole cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub lines: Vec<BillLine>,
    pub total_qty: i64,
    pub subtotal: f64,
    pub tax_percent: f64,
    pub tax: f64,
    pub grand_total: f64,
}

impl Bill {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Unit price of a line: base price, plus the variant delta, plus every add-on
///
/// Unknown variant or add-on ids contribute nothing. `None` when the sum
/// does not fit in a `Decimal`.
pub fn calculate_unit_price(product: &Product, line: &CartLine) -> Option<Decimal> {
    let variant = line
        .variant_id
        .as_deref()
        .and_then(|id| product.variant(id))
        .map(|v| to_decimal(v.price))
        .unwrap_or(Decimal::ZERO);

    line.addons
        .iter()
        .filter_map(|id| product.addon(id))
        .map(|a| to_decimal(a.price))
        .try_fold(to_decimal(product.price).checked_add(variant)?, |acc, price| {
            acc.checked_add(price)
        })
}

/// Price every line of the snapshot and derive the totals
///
/// Lines whose product is missing from the catalog, or whose total overflows,
/// are skipped. `tax_percent` is clamped to `0..=100`.
pub fn calculate_bill(
    snapshot: &CartSnapshot,
    catalog: &dyn ProductLookup,
    tax_percent: f64,
) -> Bill {
    let mut lines = Vec::with_capacity(snapshot.len());
    let mut subtotal = Decimal::ZERO;
    let mut total_qty: i64 = 0;

    for line in &snapshot.lines {
        let Some(product) = catalog.product(line.product_id) else {
            tracing::warn!(
                product_id = line.product_id,
                key = %line.key,
                "Product missing from catalog, line left out of bill"
            );
            continue;
        };

        let priced = calculate_unit_price(product, line).and_then(|unit| {
            let line_total = unit.checked_mul(Decimal::from(line.quantity))?;
            Some((unit, line_total, subtotal.checked_add(line_total)?))
        });
        let Some((unit_price, line_total, running)) = priced else {
            tracing::warn!(
                product_id = line.product_id,
                key = %line.key,
                quantity = line.quantity,
                "Line total overflows, line left out of bill"
            );
            continue;
        };
        subtotal = running;
        total_qty += i64::from(line.quantity);

        lines.push(BillLine {
            key: line.key.clone(),
            product_id: product.id,
            title: product.title.clone(),
            variant_name: line
                .variant_id
                .as_deref()
                .and_then(|id| product.variant(id))
                .map(|v| v.name.clone()),
            addon_names: line
                .addons
                .iter()
                .filter_map(|id| product.addon(id))
                .map(|a| a.name.clone())
                .collect(),
            quantity: line.quantity,
            unit_price: to_f64(unit_price),
            line_total: to_f64(line_total),
        });
    }

    let tax_percent = tax_percent.clamp(0.0, 100.0);
    let subtotal = round_money(subtotal);
    let rate = to_decimal(tax_percent) / Decimal::ONE_HUNDRED;
    let tax = round_money(subtotal.saturating_mul(rate));
    let grand_total = subtotal.saturating_add(tax);

    Bill {
        lines,
        total_qty,
        subtotal: to_f64(subtotal),
        tax_percent,
        tax: to_f64(tax),
        grand_total: to_f64(grand_total),
    }
}
