//! CLI entrypoint for the bracefmt conformance harness.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use bracefmt_harness::{ArgSpec, FixtureSet, TestRunner};

/// Conformance tooling for the bracefmt formatting engine.
#[derive(Debug, Parser)]
#[command(name = "bracefmt-harness")]
#[command(about = "Conformance harness for the bracefmt formatting engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a fixture set (the built-in suite when no file is given).
    Run {
        /// Fixture JSON path.
        #[arg(long)]
        fixture: Option<PathBuf>,
        /// Emit a JSON report instead of plain text.
        #[arg(long)]
        json: bool,
        /// Output path (stdout when omitted).
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render one template with JSON-typed arguments.
    Render {
        /// Template containing replacement fields.
        template: String,
        /// Arguments as a JSON array of `{"kind": ..., "value": ...}`.
        #[arg(long, default_value = "[]")]
        args: String,
    },
    /// Write the built-in suite as fixture JSON.
    Export {
        /// Output path (stdout when omitted).
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            fixture,
            json,
            output,
        } => {
            let set = match fixture {
                Some(path) => FixtureSet::from_file(&path)?,
                None => FixtureSet::builtin(),
            };
            let report = TestRunner::new().run(&set);
            let rendered = if json {
                serde_json::to_string_pretty(&report)?
            } else {
                plain_report(&report)
            };
            emit(&rendered, output.as_deref())?;
            if !report.all_passed() {
                std::process::exit(1);
            }
        }
        Command::Render { template, args } => {
            let specs: Vec<ArgSpec> = serde_json::from_str(&args)?;
            let arg_values: Vec<bracefmt_core::FormatArg<'_>> =
                specs.iter().map(|a| a.as_arg()).collect();
            match bracefmt_core::render(&template, &arg_values) {
                Ok(bytes) => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&bytes)?;
                    stdout.write_all(b"\n")?;
                }
                Err(err) => {
                    eprintln!("format error: {err}");
                    std::process::exit(1);
                }
            }
        }
        Command::Export { output } => {
            let json = FixtureSet::builtin().to_json()?;
            emit(&json, output.as_deref())?;
        }
    }
    Ok(())
}

fn plain_report(report: &bracefmt_harness::RunReport) -> String {
    let mut out = String::new();
    for result in &report.results {
        let status = if result.passed { "PASS" } else { "FAIL" };
        out.push_str(&format!("{status} {}\n", result.case_name));
        if !result.passed {
            out.push_str(&format!(
                "     expected: {}\n     actual:   {}\n",
                result.expected, result.actual
            ));
        }
    }
    out.push_str(&format!(
        "{}: {}/{} passed\n",
        report.suite, report.passed, report.total
    ));
    out
}

fn emit(content: &str, output: Option<&std::path::Path>) -> std::io::Result<()> {
    match output {
        Some(path) => std::fs::write(path, content),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())
        }
    }
}
