//! The `tgv` command line tool.

use std::io::IsTerminal;
use std::io::stderr;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use clap_verbosity_flag::Verbosity;
use colored::Colorize;
use tgv::Config;
use tgv::SystemRunner;
use tracing_log::AsTrace;

/// Regenerates the SQL grammar railroad diagrams in the docs repository.
#[derive(Parser)]
#[clap(version, arg_required_else_help = true)]
struct App {
    /// The pattern selecting which grammar rules to render.
    #[clap(value_name = "FILTER")]
    filter: String,

    /// The verbosity flags.
    #[command(flatten)]
    verbose: Verbosity,
}

/// Sets up tracing and runs the regeneration pipeline.
fn run(app: App) -> Result<()> {
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(app.verbose.log_level_filter().as_trace())
        .with_writer(std::io::stderr)
        .with_ansi(stderr().is_terminal())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env(app.filter)?;
    tgv::regenerate(&config, &SystemRunner)
}

fn main() {
    // `--help` and `--version` surface as errors from `try_parse`; they
    // exit 0, while real usage errors exit 1.
    let app = match App::try_parse() {
        Ok(app) => app,
        Err(e) => {
            let _ = e.print();
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };

    if let Err(e) = run(app) {
        eprintln!(
            "{error}: {e:?}",
            error = if stderr().is_terminal() {
                "error".red().bold()
            } else {
                "error".normal()
            }
        );
        std::process::exit(1);
    }
}
