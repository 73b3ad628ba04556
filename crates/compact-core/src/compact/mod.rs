//! Adjacent-duplicate compaction.
//!
//! An element is dropped when it equals the element immediately before it in
//! the input. Non-adjacent repeats are kept, and so is the first element of
//! every run.

pub mod adapter;
pub mod pairwise;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use adapter::{
    ByEq, ByKey, Compact, CompactBy, CompactByKey, CompactCloned, CompactExt, SameRun, WithCount,
};
pub use pairwise::{compact_pairwise, pairwise_heads};

/// Technique used to compact a slice. Both produce identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Single pass comparing each element with the one before it.
    #[default]
    Scan,
    /// Zip the input against itself shifted by one, behind a sentinel.
    Pairwise,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Scan, Strategy::Pairwise];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Scan => "scan",
            Strategy::Pairwise => "pairwise",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scan" => Ok(Strategy::Scan),
            "pairwise" | "zip" => Ok(Strategy::Pairwise),
            other => anyhow::bail!("unknown strategy '{other}' (expected 'scan' or 'pairwise')"),
        }
    }
}

/// Collect `iter` with adjacent duplicates removed.
pub fn compact<I>(iter: I) -> Vec<I::Item>
where
    I: IntoIterator,
    I::Item: PartialEq,
{
    iter.into_iter().compact().collect()
}

/// Compact a slice with the chosen technique.
pub fn compact_with<T: PartialEq + Clone>(items: &[T], strategy: Strategy) -> Vec<T> {
    match strategy {
        Strategy::Scan => items.iter().compact().cloned().collect(),
        Strategy::Pairwise => compact_pairwise(items),
    }
}
