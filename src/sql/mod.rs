//! Safe SQL generation from record definitions (parameterized only).

pub mod builder;

pub use builder::{count, create_table, delete, insert, select_by_id, select_list, update, QueryBuf};
