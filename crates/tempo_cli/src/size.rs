//! The `tempo size` subcommand: run the sizing loop over a design.

use crate::{GlobalArgs, SizeArgs};
use std::error::Error;
use std::fs;
use std::io;
use std::path::Path;
use tempo_config::{load_config, load_config_from_str, SizingConfig};
use tempo_diagnostics::{render, Category, DiagnosticSink, Severity};
use tempo_sizer::{run_sizing, SizerParams};
use tempo_sta::StaEngine;

/// Runs the sizing loop and returns the process exit code.
///
/// Every sizing terminal — clean and partial alike — exits 0; the outcome
/// is communicated through the console text. Only load and I/O failures
/// exit non-zero.
pub fn run(args: &SizeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    let design_text = fs::read_to_string(&args.design)?;
    let mut engine: StaEngine = serde_json::from_str(&design_text)?;

    let (sizing, workdir) = resolve_config(args)?;
    let mut params = SizerParams::from_config(&sizing, workdir);
    if let Some(dir) = &args.workdir {
        params.workdir = dir.into();
    }
    if let Some(max_iter) = args.max_iter {
        params.max_iter = max_iter;
    }

    let sink = DiagnosticSink::new();
    let outcome = if global.quiet {
        run_sizing(&mut engine, &params, &sink, &mut io::sink())?
    } else {
        run_sizing(&mut engine, &params, &sink, &mut io::stdout().lock())?
    };

    // Counts are computed before draining for the summary below.
    let warnings = sink.count_severity(Severity::Warning);
    let integrity_skips = sink.count_category(Category::Sizing);
    for diag in sink.take_all() {
        eprintln!("{}", render(&diag));
    }
    if global.verbose {
        eprintln!(
            "sizing finished: {:?} after {} iterations, {} swaps, {} warnings",
            outcome.state, outcome.iterations, outcome.swaps, warnings
        );
        if integrity_skips > 0 {
            eprintln!("{integrity_skips} instances skipped by integrity checks");
        }
    }

    Ok(0)
}

/// Resolves the `[sizing]` section and workdir from the configuration.
///
/// An explicit `--config` path must load; a `tempo.toml` in the current
/// directory is picked up when present; otherwise defaults apply.
fn resolve_config(args: &SizeArgs) -> Result<(SizingConfig, String), Box<dyn Error>> {
    if let Some(path) = &args.config {
        let content = fs::read_to_string(path)?;
        let config = load_config_from_str(&content)?;
        return Ok((config.sizing, config.project.workdir));
    }
    if Path::new("tempo.toml").exists() {
        let config = load_config(Path::new("."))?;
        return Ok((config.sizing, config.project.workdir));
    }
    Ok((SizingConfig::default(), ".".to_string()))
}
