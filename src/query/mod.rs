pub mod encoding;
pub mod options;

pub use encoding::{build_query_string, encode_component, parse_query_string};
pub use options::{ExitFilter, SearchQuery, SortKey};
