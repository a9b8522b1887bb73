use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use gnv_diff::DiscrepancySet;
use gnv_report::{render_json, render_text};
use gnv_sdk::{compare_outputs, Verification, Verifier};
use serde_json::{Map, Value};
use tracing::debug;

use crate::cli::*;
use crate::config::GnvConfig;
use crate::shell;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("reading working directory")?;
    let config = GnvConfig::discover(cli.config.as_deref(), &cwd)?
        .with_overrides(cli.telemetry, cli.catalogue);
    debug!(?config, "configuration resolved");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command.unwrap_or(Command::Shell(ShellArgs::default())) {
        Command::Compare(args) => cmd_compare(&config, &args.path, cli.format, &mut out),
        Command::Diff(args) => cmd_diff(&args, cli.format, &mut out),
        Command::Paths(args) => cmd_paths(&config, &args, cli.format, &mut out),
        Command::Shell(args) => {
            let stdin = io::stdin();
            cmd_shell(&config, args, cli.format, &mut stdin.lock(), &mut out)
        }
    }
}

fn open_verifier(config: &GnvConfig) -> anyhow::Result<Verifier> {
    Verifier::from_files(&config.telemetry, config.catalogue.as_deref())
        .with_context(|| format!("loading telemetry {}", config.telemetry.display()))
}

fn cmd_compare<W: Write>(
    config: &GnvConfig,
    path: &str,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut verifier = open_verifier(config)?;
    let run = verifier.verify(path)?;
    print_verification(out, &run, format)
}

fn cmd_diff<W: Write>(args: &DiffArgs, format: OutputFormat, out: &mut W) -> anyhow::Result<()> {
    let telemetry: Value = read_json(&args.telemetry_file)?;
    let text = std::fs::read_to_string(&args.command_output)
        .with_context(|| format!("reading {}", args.command_output.display()))?;
    let set = compare_outputs(&telemetry, &text)?;
    match format {
        OutputFormat::Text => {
            print_summary(out, &set)?;
            writeln!(out, "{}", render_text(&set))?;
        }
        OutputFormat::Json => writeln!(out, "{}", render_json(&set)?)?,
    }
    Ok(())
}

fn cmd_paths<W: Write>(
    config: &GnvConfig,
    args: &PathsArgs,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let verifier = open_verifier(config)?;
    let paths = if args.all { verifier.paths() } else { verifier.verifiable_paths() };
    match format {
        OutputFormat::Text => {
            if paths.is_empty() && args.all {
                writeln!(out, "No paths in gNMI data or CLI commands.")?;
            } else if paths.is_empty() {
                writeln!(out, "No path has both gNMI data and CLI commands.")?;
            }
            for path in paths {
                writeln!(out, "{}", path)?;
            }
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&paths)?)?,
    }
    Ok(())
}

fn cmd_shell<R: io::BufRead, W: Write>(
    config: &GnvConfig,
    args: ShellArgs,
    format: OutputFormat,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut verifier = open_verifier(config)?;
    shell::run(&mut verifier, format, input, out)?;
    if verifier.history().is_empty() {
        return Ok(());
    }
    match args.history {
        Some(name) => {
            let format = args.history_format.unwrap_or(config.history_format);
            let saved = verifier.save_history(&config.history_base(&name), format)?;
            writeln!(out, "History saved as {}", saved.display())?;
        }
        None => {
            shell::offer_save(&verifier, config, input, out)?;
        }
    }
    Ok(())
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

pub fn print_verification<W: Write>(
    out: &mut W,
    run: &Verification,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let mut doc = Map::new();
            doc.insert("path".into(), Value::from(run.path.as_str()));
            doc.insert("commands".into(), Value::from(run.commands.clone()));
            doc.insert("telemetry".into(), run.telemetry.clone());
            doc.insert("command_output".into(), Value::from(run.command_text.as_str()));
            doc.insert("discrepancies".into(), serde_json::to_value(&run.discrepancies)?);
            writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "{} {}", "gNMI data for".bold(), run.path.cyan())?;
            writeln!(out, "{}", serde_json::to_string_pretty(&run.telemetry)?)?;
            writeln!(out, "{} {}", "CLI commands:".bold(), run.commands.join(", "))?;
            writeln!(out, "{}", "CLI output:".bold())?;
            writeln!(out, "{}", run.command_text)?;
            writeln!(out, "{}", "Comparison result:".bold())?;
            print_summary(out, &run.discrepancies)?;
            writeln!(out, "{}", render_text(&run.discrepancies))?;
        }
    }
    Ok(())
}

fn print_summary<W: Write>(out: &mut W, set: &DiscrepancySet) -> io::Result<()> {
    if set.is_empty() {
        return writeln!(out, "{}", "✓ match".green().bold());
    }
    writeln!(
        out,
        "{} {} discrepancies ({} missing in CLI, {} missing in gNMI, {} mismatched)",
        "✗".red().bold(),
        set.len(),
        set.missing_in_b(),
        set.missing_in_a(),
        set.mismatches(),
    )
}
