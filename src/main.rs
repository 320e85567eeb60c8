use clap::Parser;
use eyre::{Context, Result};
use log::{LevelFilter, debug, info};
use std::io::Write;
use std::path::PathBuf;

use templatepatcher::cli::{ApplyArgs, Cli, Command};
use templatepatcher::config::{self, Config};
use templatepatcher::{ConsoleReporter, PatchJob, PatchOutcome, script};

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("tpatch starting");

    match cli.command.unwrap_or_default() {
        Command::Apply(args) => cmd_apply(&config, args),
        Command::Escape { script: script_path } => cmd_escape(&config, script_path),
    }
}

fn cmd_apply(config: &Config, args: ApplyArgs) -> Result<()> {
    let paths = config.resolve_paths(&config::tool_dir()?, args.script, args.template, args.output);
    debug!("Resolved paths: {:?}", paths);

    let job = PatchJob::new(paths.script, paths.template, config.target())
        .with_output(paths.output)
        .with_indent(config.indent)
        .with_dry_run(args.dry_run);

    // Dry-run output is the document itself, so progress goes to stderr
    let mut reporter = if args.dry_run {
        ConsoleReporter::stderr()
    } else {
        ConsoleReporter::default()
    };

    match job.run(&mut reporter) {
        Ok(PatchOutcome::Written { .. }) => Ok(()),
        Ok(PatchOutcome::Preview(bytes)) => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            writeln!(stdout)?;
            Ok(())
        }
        // Already reported by the job; exit without a diagnostic trace
        Err(e) if e.is_key_not_found() => std::process::exit(1),
        Err(e) => Err(e.into()),
    }
}

fn cmd_escape(config: &Config, script_path: Option<PathBuf>) -> Result<()> {
    let paths = config.resolve_paths(&config::tool_dir()?, script_path, None, None);
    let body = script::load_script(&paths.script)?;
    println!("{}", script::escape_for_json(&body)?);
    Ok(())
}
