// src/pricing/table.rs
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use tracing::{debug, instrument};

use super::{cleanse::cleanse, record::parse_line, row::fill_row};
use crate::HIGHEST_BREAKPOINT;

/// `PRICE_GROUP, PRODUCT_CODE, 1, 2, ..., HIGHEST_BREAKPOINT`
pub static HEADER: Lazy<Vec<String>> = Lazy::new(|| {
    ["PRICE_GROUP", "PRODUCT_CODE"]
        .into_iter()
        .map(String::from)
        .chain((1..=HIGHEST_BREAKPOINT).map(|q| q.to_string()))
        .collect()
});

pub fn header() -> Vec<String> {
    HEADER.clone()
}

/// Header plus one dense row per feed line, in feed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PriceTable {
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<String>>) {
        (self.header, self.rows)
    }
}

/// Converts a raw pricing feed into the importer's table.
///
/// Pure and all-or-nothing: the first malformed line aborts the whole
/// conversion. Repeated product codes produce repeated rows.
#[instrument(level = "debug", skip(raw), fields(raw_len = raw.len()))]
pub fn convert(raw: &str) -> Result<PriceTable> {
    let cleansed = cleanse(raw);

    let mut rows = Vec::new();
    for (idx, line) in cleansed.split('\n').enumerate() {
        if line.is_empty() {
            continue;
        }
        let record = parse_line(line).with_context(|| format!("line {}", idx + 1))?;
        rows.push(fill_row(&record.product_code, &record.ranges));
    }

    debug!(rows = rows.len(), "converted feed");
    Ok(PriceTable {
        header: header(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PRICE_GROUP;

    fn row_of(code: &str, slots: Vec<&str>) -> Vec<String> {
        let mut row = vec![PRICE_GROUP.to_string(), code.to_string()];
        row.extend(slots.into_iter().map(String::from));
        row
    }

    #[test]
    fn header_layout() {
        let h = header();
        assert_eq!(h.len(), HIGHEST_BREAKPOINT + 2);
        assert_eq!(h[0], "PRICE_GROUP");
        assert_eq!(h[1], "PRODUCT_CODE");
        assert_eq!(h[2], "1");
        assert_eq!(h[HIGHEST_BREAKPOINT + 1], HIGHEST_BREAKPOINT.to_string());
    }

    #[test]
    fn converts_basic_feed() -> Result<()> {
        let table = convert("1234#1|5|10^6|10|20\n5678#1|5|10^6|10|20")?;
        assert_eq!(table.header, header());
        assert_eq!(table.rows.len(), 2);
        assert_eq!(
            table.rows[0][..9],
            ["VolumePricing", "1234", "10", "10", "10", "10", "10", "20", "20"]
        );
        assert_eq!(
            table.rows[1][..9],
            ["VolumePricing", "5678", "10", "10", "10", "10", "10", "20", "20"]
        );
        assert!(table.rows[0][12..].iter().all(String::is_empty));
        Ok(())
    }

    #[test]
    fn converts_large_ranges() -> Result<()> {
        let (header_row, rows) =
            convert("2345#1|100|5.00^101|200|4.00\n3456#50|150|3.50^151|300|2.50")?.into_parts();
        assert_eq!(header_row, header());

        let mut first = vec!["5.00"; 100];
        first.extend(vec!["4.00"; 100]);
        first.extend(vec![""; 100]);
        let mut second = vec![""; 49];
        second.extend(vec!["3.50"; 101]);
        second.extend(vec!["2.50"; 150]);

        assert_eq!(rows, vec![row_of("2345", first), row_of("3456", second)]);
        Ok(())
    }

    #[test]
    fn product_without_pricing() -> Result<()> {
        let table = convert("4567#")?;
        assert_eq!(table.rows, vec![row_of("4567", vec![""; HIGHEST_BREAKPOINT])]);
        Ok(())
    }

    #[test]
    fn empty_feed_has_header_only() -> Result<()> {
        let table = convert("")?;
        assert_eq!(table.header.len(), HIGHEST_BREAKPOINT + 2);
        assert!(table.rows.is_empty());
        Ok(())
    }

    #[test]
    fn blank_lines_are_skipped() -> Result<()> {
        let table = convert("\n1#1|1|a\n\n2#1|1|b\n")?;
        let codes: Vec<&str> = table.rows.iter().map(|r| r[1].as_str()).collect();
        assert_eq!(codes, ["1", "2"]);
        Ok(())
    }

    #[test]
    fn keeps_order_and_duplicates() -> Result<()> {
        let table = convert("B#1|1|x\nA#1|1|y\nB#1|1|z")?;
        let codes: Vec<&str> = table.rows.iter().map(|r| r[1].as_str()).collect();
        assert_eq!(codes, ["B", "A", "B"]);
        assert_eq!(table.rows[2][2], "z");
        Ok(())
    }

    #[test]
    fn every_row_is_full_width() -> Result<()> {
        let table = convert("1#\n2#1|+|9\n3#5|3|1^0|400|2")?;
        assert!(table
            .rows
            .iter()
            .all(|r| r.len() == HIGHEST_BREAKPOINT + 2 && r[0] == PRICE_GROUP));
        Ok(())
    }

    #[test]
    fn crlf_is_removed_before_line_split() -> Result<()> {
        let joined = convert("1234#1|5|10^6|10|20")?;
        assert_eq!(convert("1234#1|5|10\r\n^6|10|20")?, joined);
        assert_eq!(convert("1234#1|5|10\\r\\n^6|10|20")?, joined);
        Ok(())
    }

    #[test]
    fn crlf_terminated_records_collapse_into_one_line() {
        // "20" and "5678#1" end up in one token with five fields
        let err = convert("1234#1|5|10^6|10|20\r\n5678#1|5|10^6|10|20").unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("line 1"), "{msg}");
        assert!(msg.contains("expected 3"), "{msg}");
    }

    #[test]
    fn malformed_line_aborts_with_line_number() {
        let err = convert("1#1|1|a\n2 no hash here\n3#1|1|c").unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("line 2"), "{msg}");
        assert!(msg.contains("missing '#'"), "{msg}");
    }
}
