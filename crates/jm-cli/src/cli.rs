//! Argument handling, file naming and per-input error counting.

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use jm_minifier::{Minifier, MinifyConfig, MinifyReport};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "jsmin", about = "Strip comments and redundant whitespace from scripts")]
pub struct Cli {
    /// Input scripts. Reads stdin when none are given.
    pub files: Vec<PathBuf>,

    /// Write the result here (single input only)
    #[arg(short, long, conflicts_with = "out_dir")]
    pub output: Option<PathBuf>,

    /// Write each result to DIR/<stem>.min.<ext>
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Keep a leading byte-order mark
    #[arg(long)]
    pub keep_bom: bool,

    /// Do not append the trailing newline
    #[arg(long)]
    pub no_trailing_newline: bool,

    /// Print each report as a JSON line on stderr
    #[arg(long)]
    pub stats: bool,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Counts for one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub processed: usize,
    pub failed: usize,
}

impl Cli {
    /// Config file (if any) with command-line flags layered on top.
    pub fn base_config(&self) -> Result<MinifyConfig> {
        let mut config = match &self.config {
            Some(path) => MinifyConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => MinifyConfig::default(),
        };
        if self.keep_bom {
            config.strip_bom = false;
        }
        if self.no_trailing_newline {
            config.trailing_newline = false;
        }
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.output.is_some() && self.files.len() > 1 {
            bail!("--output takes a single input, got {}", self.files.len());
        }
        Ok(())
    }

    /// Where the result for `input` goes.
    pub fn target_for(&self, input: &Path) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        let name = minified_name(input);
        match &self.out_dir {
            Some(dir) => dir.join(name.file_name().unwrap_or(name.as_os_str())),
            None => name,
        }
    }
}

/// `dir/app.js` becomes `dir/app.min.js`; a name without extension gets `.min`.
pub fn minified_name(path: &Path) -> PathBuf {
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}.min.{}", ext.to_string_lossy()),
        None => format!("{stem}.min"),
    };
    path.with_file_name(name)
}

/// Minify every input, continuing past failures.
pub fn run(cli: &Cli) -> Result<Summary> {
    cli.validate()?;
    let config = cli.base_config()?;
    let mut summary = Summary::default();

    if cli.files.is_empty() {
        summary.processed = 1;
        let report = minify_stdin(cli, config)?;
        if !report.is_success() {
            summary.failed = 1;
        }
        emit_stats(cli, &report)?;
        return Ok(summary);
    }

    if let Some(dir) = &cli.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }

    for input in &cli.files {
        summary.processed += 1;
        let target = cli.target_for(input);
        let source_name = input.display().to_string();
        let minifier = Minifier::new(config.clone().with_source_name(source_name.clone()));
        match minify_file(&minifier, input, &target) {
            Ok(report) => {
                if report.is_success() {
                    info!(input = %source_name, output = %target.display(), "minified");
                } else {
                    summary.failed += 1;
                }
                emit_stats(cli, &report)?;
            }
            Err(e) => {
                summary.failed += 1;
                error!("{source_name}: {e:#}");
            }
        }
    }
    Ok(summary)
}

fn minify_stdin(cli: &Cli, config: MinifyConfig) -> Result<MinifyReport> {
    let minifier = Minifier::new(config);
    let mut diagnostics = jm_core::TracingSink;
    let stdin = io::stdin().lock();
    let report = match &cli.output {
        Some(path) => {
            let out = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            minifier.minify(stdin, out, &mut diagnostics)?
        }
        None => minifier.minify(stdin, io::stdout().lock(), &mut diagnostics)?,
    };
    Ok(report)
}

fn minify_file(minifier: &Minifier, input: &Path, target: &Path) -> Result<MinifyReport> {
    if same_file(input, target) {
        bail!("output {} would overwrite its input", target.display());
    }
    let source = File::open(input).with_context(|| format!("opening {}", input.display()))?;
    let sink = File::create(target).with_context(|| format!("creating {}", target.display()))?;
    let report = minifier.minify(source, sink, &mut jm_core::TracingSink)?;
    Ok(report)
}

/// Both paths exist and resolve to the same file.
fn same_file(input: &Path, target: &Path) -> bool {
    match (std::fs::canonicalize(input), std::fs::canonicalize(target)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn emit_stats(cli: &Cli, report: &MinifyReport) -> Result<()> {
    if cli.stats {
        eprintln!("{}", serde_json::to_string(report)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("jsmin").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_minified_name() {
        assert_eq!(minified_name(Path::new("src/app.js")), PathBuf::from("src/app.min.js"));
        assert_eq!(minified_name(Path::new("lib.mjs")), PathBuf::from("lib.min.mjs"));
        assert_eq!(minified_name(Path::new("Jakefile")), PathBuf::from("Jakefile.min"));
    }

    #[test]
    fn test_target_in_out_dir() {
        let cli = parse(&["-d", "dist", "src/app.js"]);
        assert_eq!(cli.target_for(Path::new("src/app.js")), PathBuf::from("dist/app.min.js"));
    }

    #[test]
    fn test_target_explicit_output() {
        let cli = parse(&["-o", "out.js", "src/app.js"]);
        assert_eq!(cli.target_for(Path::new("src/app.js")), PathBuf::from("out.js"));
    }

    #[test]
    fn test_output_conflicts_with_out_dir() {
        let res = Cli::try_parse_from(["jsmin", "-o", "a.js", "-d", "dist", "x.js"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_output_rejects_many_inputs() {
        let cli = parse(&["-o", "out.js", "a.js", "b.js"]);
        assert!(run(&cli).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jsmin.json");
        std::fs::write(&path, r#"{"strip_bom": true, "trailing_newline": true}"#).unwrap();
        let cli = parse(&["--keep-bom", "--no-trailing-newline", "-c", path.to_str().unwrap()]);
        let config = cli.base_config().unwrap();
        assert!(!config.strip_bom);
        assert!(!config.trailing_newline);
    }

    #[test]
    fn test_run_writes_beside_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("app.js");
        std::fs::write(&input, "var  a = 1; // one\nvar b = a - -1;\n").unwrap();
        let cli = parse(&[input.to_str().unwrap()]);
        let summary = run(&cli).unwrap();
        assert_eq!(summary, Summary { processed: 1, failed: 0 });
        let out = std::fs::read_to_string(dir.path().join("app.min.js")).unwrap();
        assert_eq!(out, "var a=1;var b=a- -1;\n");
    }

    #[test]
    fn test_run_counts_failures_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.js");
        let bad = dir.path().join("bad.js");
        std::fs::write(&good, "f( 1 )").unwrap();
        std::fs::write(&bad, "x = 'open").unwrap();
        let out_dir = dir.path().join("dist");
        let cli = parse(&[
            "-d",
            out_dir.to_str().unwrap(),
            bad.to_str().unwrap(),
            good.to_str().unwrap(),
        ]);
        let summary = run(&cli).unwrap();
        assert_eq!(summary, Summary { processed: 2, failed: 1 });
        assert_eq!(std::fs::read_to_string(out_dir.join("good.min.js")).unwrap(), "f(1)\n");
        assert_eq!(std::fs::read_to_string(out_dir.join("bad.min.js")).unwrap(), "x='open");
    }

    #[test]
    fn test_run_refuses_output_over_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("app.js");
        std::fs::write(&input, "var  a = 1;").unwrap();
        let cli = parse(&["-o", input.to_str().unwrap(), input.to_str().unwrap()]);
        let summary = run(&cli).unwrap();
        assert_eq!(summary, Summary { processed: 1, failed: 1 });
        assert_eq!(std::fs::read_to_string(&input).unwrap(), "var  a = 1;");
    }

    #[test]
    fn test_run_refuses_same_file_through_other_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("app.js");
        std::fs::write(&input, "f( 1 )").unwrap();
        let alias = dir.path().join(".").join("app.js");
        let cli = parse(&["-o", alias.to_str().unwrap(), input.to_str().unwrap()]);
        assert_eq!(run(&cli).unwrap().failed, 1);
        assert_eq!(std::fs::read_to_string(&input).unwrap(), "f( 1 )");
    }

    #[test]
    fn test_run_missing_input_is_counted() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.js");
        let cli = parse(&["-d", dir.path().to_str().unwrap(), missing.to_str().unwrap()]);
        let summary = run(&cli).unwrap();
        assert_eq!(summary.failed, 1);
    }
}
