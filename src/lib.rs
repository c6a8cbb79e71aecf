//! Library for regenerating the SQL grammar railroad diagrams in the
//! CockroachDB docs repository.
//!
//! The work is a strictly sequential pipeline of external collaborators:
//! pull the code repository, build the grammar-extraction target, then
//! render the generated BNF files as SVG diagrams into the docs repository,
//! restricted by a user-supplied filter. The first collaborator failure
//! aborts the run; there is no retry and no rollback.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod process;

use std::ffi::OsString;
use std::path::Path;

use anyhow::Result;
use anyhow::bail;
use tracing::info;

pub use config::Config;
pub use process::CommandRunner;
pub use process::SystemRunner;

/// The version control collaborator.
const GIT: &str = "git";

/// The build tool collaborator.
const MAKE: &str = "make";

/// The diagram generator collaborator.
const DOCGEN: &str = "docgen";

/// The `make` target that builds the grammar-extraction binary and leaves
/// the generated BNF files under the code repository.
const BNF_TARGET: &str = "bin/.docgen_bnfs";

/// Regenerates the grammar diagrams described by `config`.
///
/// Runs pull, build, and generate in that order, stopping at the first
/// failure.
pub fn regenerate(config: &Config, runner: &dyn CommandRunner) -> Result<()> {
    pull(config, runner)?;
    build(config, runner)?;
    generate(config, runner)
}

/// Pulls the code repository to its latest state.
///
/// Plain `git pull`, deferring to the checkout's configuration for the
/// remote and branch.
fn pull(config: &Config, runner: &dyn CommandRunner) -> Result<()> {
    info!(
        "pulling `{code_dir}`",
        code_dir = config.code_dir().display()
    );
    run(runner, GIT, vec!["pull".into()], config.code_dir())
}

/// Builds the grammar-extraction target in the code repository.
fn build(config: &Config, runner: &dyn CommandRunner) -> Result<()> {
    info!("building `{BNF_TARGET}`");
    run(runner, MAKE, vec![BNF_TARGET.into()], config.code_dir())
}

/// Renders the generated BNF files as SVG diagrams into the docs
/// repository.
///
/// The working directory can be anywhere that isn't the code repository;
/// the docs repository is used.
fn generate(config: &Config, runner: &dyn CommandRunner) -> Result<()> {
    info!(
        "generating diagrams into `{diagrams_dir}`",
        diagrams_dir = config.diagrams_dir().display()
    );
    run(
        runner,
        DOCGEN,
        vec![
            "grammar".into(),
            "svg".into(),
            config.generated_bnf_dir().into_os_string(),
            config.diagrams_dir().into_os_string(),
            format!("--filter={filter}", filter = config.filter()).into(),
        ],
        config.docs_dir(),
    )
}

/// Runs a collaborator and fails on a non-zero exit.
fn run(runner: &dyn CommandRunner, program: &str, args: Vec<OsString>, dir: &Path) -> Result<()> {
    let status = runner.run(program, &args, dir)?;
    if !status.success() {
        bail!("`{program}` failed with {status}");
    }

    Ok(())
}
