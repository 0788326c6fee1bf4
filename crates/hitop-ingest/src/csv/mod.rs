//! CSV reading utilities.

mod header;
mod reader;

pub use header::{HeaderPlan, parse_csv_line};
pub use reader::{keep_first_columns, read_csv_frame, read_csv_header};
