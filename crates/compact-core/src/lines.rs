use serde::Serialize;

use crate::compact::{compact_pairwise, pairwise_heads, CompactExt, Strategy};

/// How lines are compared and rendered by [`compact_lines`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineOptions {
    pub strategy: Strategy,
    /// Lines differing only in case are treated as duplicates.
    pub ignore_case: bool,
    /// Trailing whitespace is ignored when comparing and stripped from output.
    pub trim_trailing_whitespace: bool,
    /// Prefix each emitted line with the length of its run, `uniq -c` style.
    pub count: bool,
    /// Drop whitespace-only lines before compacting.
    pub skip_blank: bool,
}

/// Line totals before and after compaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineStats {
    pub input_lines: usize,
    pub output_lines: usize,
}

impl LineStats {
    pub fn removed(&self) -> usize {
        self.input_lines - self.output_lines
    }
}

/// Collapse consecutive identical lines into one.
pub fn compact_lines(input: &str, options: &LineOptions) -> String {
    compact_lines_with_stats(input, options).0
}

/// Same as [`compact_lines`], also returning line totals.
pub fn compact_lines_with_stats(input: &str, options: &LineOptions) -> (String, LineStats) {
    let (out, stats) = compact_line_vec(input, options);
    (out.join("\n"), stats)
}

/// Compact `input` into individual output lines, with line totals.
pub fn compact_line_vec(input: &str, options: &LineOptions) -> (Vec<String>, LineStats) {
    let out = render_lines(input, options);
    let stats = LineStats {
        input_lines: input.lines().count(),
        output_lines: out.len(),
    };
    (out, stats)
}

fn render_lines(input: &str, options: &LineOptions) -> Vec<String> {
    let lines: Vec<&str> = input
        .lines()
        .map(|line| {
            if options.trim_trailing_whitespace {
                line.trim_end()
            } else {
                line
            }
        })
        .filter(|line| !(options.skip_blank && line.trim().is_empty()))
        .collect();

    let runs = if options.count {
        count_runs(&lines, options.ignore_case)
    } else {
        select_lines(&lines, options)
            .into_iter()
            .map(|line| (1, line))
            .collect()
    };

    runs.into_iter()
        .map(|(count, line)| {
            if options.count {
                format!("{count:>7} {line}")
            } else {
                line.to_string()
            }
        })
        .collect()
}

fn select_lines<'a>(lines: &[&'a str], options: &LineOptions) -> Vec<&'a str> {
    match (options.strategy, options.ignore_case) {
        (Strategy::Scan, false) => lines.iter().copied().compact().collect(),
        (Strategy::Scan, true) => lines
            .iter()
            .copied()
            .compact_by_key(|line| line.to_lowercase())
            .collect(),
        (Strategy::Pairwise, false) => compact_pairwise(lines),
        (Strategy::Pairwise, true) => {
            let keys: Vec<String> = lines.iter().map(|line| line.to_lowercase()).collect();
            pairwise_heads(&keys).map(|i| lines[i]).collect()
        }
    }
}

fn count_runs<'a>(lines: &[&'a str], ignore_case: bool) -> Vec<(usize, &'a str)> {
    if ignore_case {
        // Count runs over folded keys, then map each run back to its first line.
        let mut offset = 0;
        lines
            .iter()
            .map(|line| line.to_lowercase())
            .compact_with_count()
            .map(|(count, _)| {
                let first = lines[offset];
                offset += count;
                (count, first)
            })
            .collect()
    } else {
        lines.iter().copied().compact_with_count().collect()
    }
}
