// src/pricing/mod.rs
pub mod cleanse;
pub mod record;
pub mod row;
pub mod table;

pub use cleanse::cleanse;
pub use record::{parse_line, parse_range, PriceRange, PriceRecord, QtyEnd};
pub use row::fill_row;
pub use table::{convert, header, PriceTable, HEADER};
