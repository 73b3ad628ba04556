pub mod compact;
pub mod config;
pub mod lines;

pub use compact::{compact, compact_pairwise, compact_with, CompactExt, Strategy};
