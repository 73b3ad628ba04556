//! Subcommand implementations for the compact CLI.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use compact_core::config::{resolve_config, CompactConfig};
use compact_core::lines::{compact_line_vec, LineStats};
use compact_core::{compact, compact_with, CompactExt, Strategy};
use serde::Serialize;

use crate::LinesArgs;

// ---------------------------------------------------------------------------
// Lines — compact text input
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct LinesReport<'a> {
    lines: &'a [String],
    #[serde(flatten)]
    stats: LineStats,
}

pub fn cmd_lines(args: &LinesArgs, config_path: Option<&Path>) -> Result<()> {
    let (config, source) = resolve_config(config_path)?;
    tracing::debug!(%source, "resolved config");
    let options = config.merge(flag_overrides(args)).line_options();

    let input = read_inputs(&args.files)?;
    let (lines, stats) = compact_line_vec(&input, &options);
    tracing::debug!(
        input_lines = stats.input_lines,
        output_lines = stats.output_lines,
        removed = stats.removed(),
        strategy = %options.strategy,
        "compacted lines"
    );

    if args.json {
        let report = LinesReport {
            lines: &lines,
            stats,
        };
        let json =
            serde_json::to_string_pretty(&report).context("failed to serialize report as JSON")?;
        println!("{json}");
    } else {
        for line in &lines {
            println!("{line}");
        }
    }
    Ok(())
}

/// `--x` sets an option, `--no-x` clears it, neither leaves the config alone.
fn flag_overrides(args: &LinesArgs) -> CompactConfig {
    let toggle = |on: bool, off: bool| {
        if on {
            Some(true)
        } else if off {
            Some(false)
        } else {
            None
        }
    };
    CompactConfig {
        strategy: args.strategy,
        ignore_case: toggle(args.ignore_case, args.no_ignore_case),
        trim_trailing_whitespace: toggle(args.trim_trailing_whitespace, args.no_trim),
        skip_blank: toggle(args.skip_blank, args.no_skip_blank),
        count: toggle(args.count, args.no_count),
    }
}

/// Concatenate all inputs, one line stream. Runs may span file boundaries.
fn read_inputs(files: &[PathBuf]) -> Result<String> {
    if files.is_empty() {
        return read_stdin();
    }
    let mut all = String::new();
    for path in files {
        let contents = if path.as_os_str() == "-" {
            read_stdin()?
        } else {
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        };
        all.push_str(&contents);
        if !all.is_empty() && !all.ends_with('\n') {
            all.push('\n');
        }
    }
    Ok(all)
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("reading stdin")?;
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Demo — worked examples
// ---------------------------------------------------------------------------

pub fn cmd_demo() -> Result<()> {
    let words = ["z", "xyz", "a", "a", "aaa"];
    println!("Input:     {words:?}");
    println!("Compacted: {:?}", compact(words));

    println!();
    println!("Squares of [1, 2, 2]");
    println!("===================");
    let squares = [1, 2, 2].into_iter().map(|n| n * n);
    println!("Compacted: {:?}", compact(squares));

    println!();
    println!("Lazy result");
    println!("===========");
    let lazy = words.iter().compact();
    println!("Is the compacted result an iterator? {}", is_iterator(&lazy));
    println!("Collected: {:?}", lazy.collect::<Vec<_>>());

    println!();
    println!("Strategies");
    println!("==========");
    for strategy in Strategy::ALL {
        println!("{strategy:<9} {:?}", compact_with(&words, strategy));
    }
    let repeats = ['a', 'b', 'a'];
    println!("Non-adjacent repeats kept: {:?}", compact(repeats));
    Ok(())
}

fn is_iterator<I: Iterator>(_: &I) -> bool {
    true
}

// ---------------------------------------------------------------------------
// Config — show effective configuration
// ---------------------------------------------------------------------------

pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let (config, source) = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config.resolved())
        .context("failed to serialize config to TOML")?;
    println!("# Source: {source}");
    println!();
    print!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use compact_core::lines::LineOptions;

    fn args() -> LinesArgs {
        LinesArgs {
            files: Vec::new(),
            strategy: None,
            ignore_case: false,
            no_ignore_case: false,
            trim_trailing_whitespace: false,
            no_trim: false,
            count: false,
            no_count: false,
            skip_blank: false,
            no_skip_blank: false,
            json: false,
        }
    }

    #[test]
    fn unset_flags_do_not_override_config() {
        let config = CompactConfig {
            count: Some(true),
            strategy: Some(Strategy::Pairwise),
            ..Default::default()
        };
        let options: LineOptions = config.merge(flag_overrides(&args())).line_options();
        assert!(options.count);
        assert_eq!(options.strategy, Strategy::Pairwise);
    }

    #[test]
    fn set_flags_override_config() {
        let config = CompactConfig {
            strategy: Some(Strategy::Pairwise),
            ..Default::default()
        };
        let overrides = LinesArgs {
            strategy: Some(Strategy::Scan),
            ignore_case: true,
            ..args()
        };
        let options = config.merge(flag_overrides(&overrides)).line_options();
        assert_eq!(options.strategy, Strategy::Scan);
        assert!(options.ignore_case);
    }

    #[test]
    fn no_flags_turn_config_options_off() {
        let config = CompactConfig {
            count: Some(true),
            ignore_case: Some(true),
            skip_blank: Some(true),
            trim_trailing_whitespace: Some(true),
            ..Default::default()
        };
        let overrides = LinesArgs {
            no_count: true,
            no_ignore_case: true,
            no_skip_blank: true,
            no_trim: true,
            ..args()
        };
        let options = config.merge(flag_overrides(&overrides)).line_options();
        assert_eq!(options, LineOptions::default());
    }

    #[test]
    fn read_inputs_joins_files_with_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, "x\ny").unwrap();
        std::fs::write(&b, "y\nz\n").unwrap();
        let all = read_inputs(&[a, b]).unwrap();
        assert_eq!(all, "x\ny\ny\nz\n");
    }

    #[test]
    fn read_inputs_missing_file_errors() {
        let err = read_inputs(&[PathBuf::from("/definitely/not/here.txt")]).unwrap_err();
        assert!(format!("{err:#}").contains("here.txt"));
    }
}
