//! CLI entry point for confguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and
//! exit codes. The driver lives in the `confguard-app` crate.
//!
//! Exit codes: 0 = pass, 1 = policy failure (failures, or warnings with
//! fail-on-warn), 2 = structural error (bad rule set, unreadable input).

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use confguard_app::{RunInput, build_envelope, execute, serialize_report, verdict_exit_code};
use confguard_settings::{
    ConfguardConfigV1, OutputFormat, Overrides, parse_config_toml, resolve_config,
};
use std::io::Write;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "confguard",
    version,
    about = "Test structured configuration files against policy"
)]
struct Cli {
    /// Path to confguard config TOML.
    #[arg(long, default_value = "confguard.toml")]
    config: Utf8PathBuf,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Test configuration files against the compiled rule set.
    Test {
        /// Input files in evaluation order; use `-` for standard input.
        #[arg(required = true)]
        files: Vec<String>,

        /// Rule source file or directory.
        #[arg(long)]
        policy: Option<Utf8PathBuf>,

        /// Namespace rule queries are qualified under.
        #[arg(long)]
        namespace: Option<String>,

        /// Merge all input files into one document before evaluation, so
        /// rules can reference fields across files.
        #[arg(long, short = 'c')]
        combine: bool,

        /// Return a non-zero exit code if only warnings are found.
        #[arg(long)]
        fail_on_warn: bool,

        /// Refresh policy sources before running the tests.
        #[arg(long)]
        update: bool,

        /// Emit the engine's execution trace.
        #[arg(long)]
        trace: bool,

        /// Disable ANSI colors in the output.
        #[arg(long)]
        no_color: bool,

        /// Output rendering (text|json).
        #[arg(long)]
        output: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(err) => {
            eprintln!("confguard error: {err:#}");
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Commands::Test {
            files,
            policy,
            namespace,
            combine,
            fail_on_warn,
            update,
            trace,
            no_color,
            output,
        } => {
            // Missing config file is allowed; defaults apply.
            let cfg_text = std::fs::read_to_string(&cli.config).unwrap_or_default();
            let cfg = if cfg_text.trim().is_empty() {
                ConfguardConfigV1::default()
            } else {
                parse_config_toml(&cfg_text).context("parse config")?
            };

            let overrides = Overrides {
                policy,
                namespace,
                combine,
                fail_on_warn,
                update,
                trace,
                no_color,
                output,
            };
            let config = resolve_config(cfg, overrides).context("resolve config")?;

            let stdout = std::io::stdout();
            let mut out = stdout.lock();

            let run_output = execute(
                RunInput {
                    files: &files,
                    config: &config,
                },
                None,
                &mut out,
            )?;

            if config.output == OutputFormat::Json {
                let envelope = build_envelope(&run_output.report, run_output.verdict);
                writeln!(out, "{}", serialize_report(&envelope)?)?;
            }

            Ok(verdict_exit_code(run_output.verdict))
        }
    }
}
