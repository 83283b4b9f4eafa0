pub mod pricing;
pub mod write;

/// Highest quantity breakpoint the output table carries a column for.
pub const HIGHEST_BREAKPOINT: usize = 300;

/// Literal written in the first cell of every data row.
pub const PRICE_GROUP: &str = "VolumePricing";

pub use pricing::{convert, PriceTable};
pub use write::{convert_and_write, read_feed, read_table, to_csv_string, write_table, write_table_file};
