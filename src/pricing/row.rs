// src/pricing/row.rs
use tracing::warn;

use super::record::PriceRange;
use crate::{HIGHEST_BREAKPOINT, PRICE_GROUP};

/// Expands a product's ranges into one dense output row:
/// `[PRICE_GROUP, product_code, slot_1, ..., slot_N]`.
///
/// Ranges are applied in order, so a later range overwrites any slot an
/// earlier one already set. Slots no range covers stay empty. Bounds are
/// clamped to `1..=HIGHEST_BREAKPOINT`; an inverted range writes nothing.
pub fn fill_row(product_code: &str, ranges: &[PriceRange]) -> Vec<String> {
    let mut slots = vec![String::new(); HIGHEST_BREAKPOINT];

    for range in ranges {
        let start = range.qty_start;
        let end = range.qty_end.resolve();
        let lo = start.max(1);
        let hi = end.min(HIGHEST_BREAKPOINT as i64);

        if lo != start || hi != end {
            warn!(
                product = %product_code,
                qty_start = start,
                qty_end = end,
                "quantity range outside 1..={}, clamped",
                HIGHEST_BREAKPOINT
            );
        }
        if lo > hi {
            continue;
        }

        // quantities are 1-based, slots 0-based
        slots[(lo - 1) as usize..hi as usize].fill(range.price.clone());
    }

    let mut row = Vec::with_capacity(HIGHEST_BREAKPOINT + 2);
    row.push(PRICE_GROUP.to_string());
    row.push(product_code.to_string());
    row.extend(slots);
    row
}
