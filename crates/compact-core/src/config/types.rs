use serde::{Deserialize, Serialize};

use crate::compact::Strategy;
use crate::lines::LineOptions;

/// Compaction settings as read from `config.toml`.
///
/// Every field is optional so that files only need to name what they change
/// and command-line flags can be layered on top.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CompactConfig {
    #[serde(default)]
    pub strategy: Option<Strategy>,

    // -- Line comparison --
    #[serde(default)]
    pub ignore_case: Option<bool>,
    #[serde(default)]
    pub trim_trailing_whitespace: Option<bool>,
    #[serde(default)]
    pub skip_blank: Option<bool>,

    // -- Output --
    #[serde(default)]
    pub count: Option<bool>,
}

impl CompactConfig {
    /// Overlay `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: CompactConfig) -> CompactConfig {
        CompactConfig {
            strategy: other.strategy.or(self.strategy),
            ignore_case: other.ignore_case.or(self.ignore_case),
            trim_trailing_whitespace: other
                .trim_trailing_whitespace
                .or(self.trim_trailing_whitespace),
            skip_blank: other.skip_blank.or(self.skip_blank),
            count: other.count.or(self.count),
        }
    }

    /// Same config with every unset field filled in with its default.
    pub fn resolved(&self) -> CompactConfig {
        let options = self.line_options();
        CompactConfig {
            strategy: Some(options.strategy),
            ignore_case: Some(options.ignore_case),
            trim_trailing_whitespace: Some(options.trim_trailing_whitespace),
            skip_blank: Some(options.skip_blank),
            count: Some(options.count),
        }
    }

    pub fn line_options(&self) -> LineOptions {
        LineOptions {
            strategy: self.strategy.unwrap_or_default(),
            ignore_case: self.ignore_case == Some(true),
            trim_trailing_whitespace: self.trim_trailing_whitespace == Some(true),
            count: self.count == Some(true),
            skip_blank: self.skip_blank == Some(true),
        }
    }
}
