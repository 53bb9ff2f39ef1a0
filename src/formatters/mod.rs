pub mod relay_table;

pub use relay_table::{format_relay_row, format_relay_set};
