// src/pricing/record.rs
use anyhow::{anyhow, bail, Context, Result};
use tracing::trace;

use crate::HIGHEST_BREAKPOINT;

/// Separates the product code from its pricing blob.
const PRODUCT_DELIM: char = '#';
/// Separates range tokens inside a pricing blob.
const RANGE_DELIM: char = '^';
/// Separates the three fields of a range token.
const FIELD_DELIM: char = '|';
/// `qty_end` value meaning "and every quantity above".
const OPEN_END: &str = "+";

/// Upper end of a quantity range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QtyEnd {
    Bounded(i64),
    /// Runs up to the highest breakpoint.
    Open,
}

impl QtyEnd {
    pub fn resolve(self) -> i64 {
        match self {
            QtyEnd::Bounded(n) => n,
            QtyEnd::Open => HIGHEST_BREAKPOINT as i64,
        }
    }
}

/// One `qty_start|qty_end|price` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRange {
    pub qty_start: i64,
    pub qty_end: QtyEnd,
    /// Kept verbatim; the importer receives exactly what the feed sent.
    pub price: String,
}

/// A parsed feed line: product code plus its ranges in feed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRecord {
    pub product_code: String,
    pub ranges: Vec<PriceRange>,
}

/// Parses a single range token such as `6|+|20`.
pub fn parse_range(token: &str) -> Result<PriceRange> {
    let fields: Vec<&str> = token.split(FIELD_DELIM).collect();
    let &[start, end, price] = &fields[..] else {
        bail!(
            "range token {:?}: expected 3 '{}'-separated fields, found {}",
            token,
            FIELD_DELIM,
            fields.len()
        );
    };

    let qty_start = start
        .trim()
        .parse::<i64>()
        .with_context(|| format!("range token {:?}: bad qty_start {:?}", token, start))?;

    let qty_end = if end == OPEN_END {
        QtyEnd::Open
    } else {
        QtyEnd::Bounded(
            end.trim()
                .parse::<i64>()
                .with_context(|| format!("range token {:?}: bad qty_end {:?}", token, end))?,
        )
    };

    Ok(PriceRange {
        qty_start,
        qty_end,
        price: price.to_string(),
    })
}

/// Parses one non-empty feed line, `<code>#<range>^<range>^...`.
///
/// Everything after the first `#` is the pricing blob. An empty blob is
/// valid and yields a record with no ranges; empty tokens between `^`
/// separators are skipped.
pub fn parse_line(line: &str) -> Result<PriceRecord> {
    let (code, blob) = line.split_once(PRODUCT_DELIM).ok_or_else(|| {
        anyhow!(
            "missing '{}' between product code and pricing in {:?}",
            PRODUCT_DELIM,
            line
        )
    })?;
    let product_code = code.trim().to_string();

    let ranges = blob
        .trim()
        .split(RANGE_DELIM)
        .filter(|token| !token.is_empty())
        .map(parse_range)
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("product {:?}", product_code))?;

    trace!(product = %product_code, ranges = ranges.len(), "parsed record");
    Ok(PriceRecord {
        product_code,
        ranges,
    })
}
