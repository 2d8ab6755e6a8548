//! druid-verify CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use druid_verify::cli::{Cli, CommandDispatcher};
use druid_verify::shell::is_ci;
use druid_verify::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN, so the UI owns normal output
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("druid_verify=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("druid_verify=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("druid-verify starting with args: {:?}", cli);

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let working_dir = std::env::current_dir().unwrap_or_default();
    let mut ui = create_ui(!is_ci(), output_mode);
    let dispatcher = CommandDispatcher::new(working_dir);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
