//! Shared parsing rules used by every layout recognizer.

pub mod amounts;
pub mod columns;
pub mod patterns;

pub use amounts::{parse_amount, parse_loose_number};
pub use columns::{cell_at, fold_header, join_fragments, split_chars, ColumnRef};
