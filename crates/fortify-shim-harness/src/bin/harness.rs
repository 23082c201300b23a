//! CLI entrypoint for the fortify-shim verification harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use fortify_shim_harness::config::{DEFAULT_SEED, HarnessConfig, parse_seed};
use fortify_shim_harness::manifest::symbol_manifest;
use fortify_shim_harness::properties::run_all;
use fortify_shim_harness::report::VerificationReport;
use fortify_shim_harness::structured_log::{
    ArtifactIndex, LogEmitter, LogEntry, LogLevel, Outcome, StreamKind, validate_log_file,
};
use fortify_shim_harness::HarnessError;

const SUITE: &str = "fortify-shim";

/// Verification tooling for the fortified-symbol shims.
#[derive(Debug, Parser)]
#[command(name = "fortify-shim-harness")]
#[command(about = "Verify __memchr_chk and __poll_chk against their unfortified contracts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check every behavioural property of the exported symbols.
    Verify {
        /// Root seed (decimal or 0x...).
        #[arg(long)]
        seed: Option<String>,
        /// Generated cases per randomized property.
        #[arg(long, default_value_t = 256)]
        trials: u32,
        /// Upper bound on generated region length.
        #[arg(long, default_value_t = 512)]
        max_region_len: usize,
        /// Timeout for the empty-wait property, in milliseconds.
        #[arg(long, default_value_t = 50)]
        wait_timeout_ms: u32,
        /// Slack allowed past a wait timeout, in milliseconds.
        #[arg(long, default_value_t = 500)]
        tolerance_ms: u32,
        /// Structured JSONL log output path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Report output path; `.md` renders markdown, anything else JSON.
        #[arg(long)]
        report: Option<PathBuf>,
        /// Artifact index output path (hashes the log and report).
        #[arg(long)]
        artifact_index: Option<PathBuf>,
    },
    /// Print the exported-symbol manifest as JSON.
    Symbols {
        /// Output JSON path (if omitted, prints to stdout).
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validate a structured JSONL log.
    ValidateLog {
        /// Structured JSONL log path.
        #[arg(long)]
        log: PathBuf,
    },
}

fn run_id() -> String {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("run-{millis}-{}", std::process::id())
}

fn verify(
    config: HarnessConfig,
    log: Option<PathBuf>,
    report_path: Option<PathBuf>,
    artifact_index: Option<PathBuf>,
) -> Result<(), HarnessError> {
    let run_id = run_id();
    let mut emitter = match &log {
        Some(path) => LogEmitter::to_file(path, SUITE, &run_id)?,
        None => LogEmitter::to_sink(SUITE, &run_id),
    };
    emitter.emit(LogLevel::Info, "verify_start")?;

    eprintln!(
        "Verifying fortified shims (seed={:#x}, trials={})",
        config.seed, config.trials
    );
    let results = run_all(&config);
    for result in &results {
        let outcome = if result.passed() { "ok" } else { "FAILED" };
        eprintln!(
            "[{}] {} {outcome} ({} ms)",
            result.property.symbol(),
            result.property.id(),
            result.duration_ms
        );
        let level = if result.passed() {
            LogLevel::Info
        } else {
            LogLevel::Error
        };
        let mut entry = LogEntry::new("", level, "property_checked")
            .with_stream(StreamKind::Conformance)
            .with_symbol(result.property.symbol())
            .with_property(result.property.id())
            .with_outcome(result.outcome)
            .with_duration_ms(result.duration_ms)
            .with_details(serde_json::json!({
                "cases": result.cases,
                "detail": result.detail,
            }));
        if let Some(errno) = result.errno {
            entry = entry.with_errno(errno);
        }
        emitter.emit_entry(entry)?;
    }

    let report = VerificationReport::new(&run_id, &config, results);
    let mut artifacts = Vec::new();
    if let Some(path) = &report_path {
        let body = if path.extension().is_some_and(|ext| ext == "md") {
            report.to_markdown()
        } else {
            report.to_json()?
        };
        std::fs::write(path, body)?;
        eprintln!("Wrote report to {}", path.display());
        artifacts.push((path.clone(), "report"));
    }

    let summary_outcome = if report.all_passed() {
        Outcome::Pass
    } else {
        Outcome::Fail
    };
    emitter.emit_entry(
        LogEntry::new("", LogLevel::Info, "verify_complete")
            .with_outcome(summary_outcome)
            .with_artifacts(
                artifacts
                    .iter()
                    .map(|(p, _)| p.display().to_string())
                    .collect(),
            )
            .with_details(serde_json::json!({
                "total": report.total,
                "passed": report.passed,
                "failed": report.failed,
            })),
    )?;
    emitter.flush()?;
    drop(emitter);

    if let Some(index_path) = &artifact_index {
        let mut index = ArtifactIndex::new(&run_id);
        if let Some(path) = &log {
            index.add_file(path, "log")?;
        }
        for (path, kind) in &artifacts {
            index.add_file(path, *kind)?;
        }
        std::fs::write(index_path, index.to_json()?)?;
        eprintln!("Wrote artifact index to {}", index_path.display());
    }

    eprintln!("{}/{} properties passed", report.passed, report.total);
    if report.all_passed() {
        Ok(())
    } else {
        Err(HarnessError::PropertiesFailed {
            failed: report.failed,
            total: report.total,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Verify {
            seed,
            trials,
            max_region_len,
            wait_timeout_ms,
            tolerance_ms,
            log,
            report,
            artifact_index,
        } => {
            let seed = match seed {
                Some(raw) => parse_seed(&raw)?,
                None => DEFAULT_SEED,
            };
            let config = HarnessConfig {
                seed,
                trials,
                max_region_len,
                wait_timeout_ms,
                tolerance_ms,
            };
            verify(config, log, report, artifact_index)?;
        }
        Command::Symbols { output } => {
            let json = serde_json::to_string_pretty(&symbol_manifest())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    eprintln!("Wrote symbol manifest to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::ValidateLog { log } => {
            let (lines, errors) = validate_log_file(&log)?;
            for err in &errors {
                eprintln!("{}: {err}", log.display());
            }
            if !errors.is_empty() {
                return Err(HarnessError::LogValidation {
                    path: log.display().to_string(),
                    count: errors.len(),
                }
                .into());
            }
            eprintln!("{}: {lines} line(s) valid", log.display());
        }
    }

    Ok(())
}
