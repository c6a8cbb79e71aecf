//! Resolution of the repository locations from the environment.
//!
//! Both repositories can be pointed elsewhere with an environment variable;
//! absent an override, the conventional checkout locations under `$HOME`
//! are assumed. No attempt is made to verify that the paths exist or are
//! valid repositories: a bad location surfaces later as a collaborator
//! failure.

use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;

/// The environment variable overriding the code repository location.
pub const CODE_REPO_ENV: &str = "COCKROACH_CODE_REPO";

/// The environment variable overriding the docs repository location.
pub const DOCS_REPO_ENV: &str = "COCKROACH_DOCS_REPO";

/// The environment variable holding the user's home directory.
///
/// Only consulted when the corresponding repository override is absent.
const HOME_ENV: &str = "HOME";

/// The default code repository checkout, relative to the home directory.
const DEFAULT_CODE_REPO: &str = "go/src/github.com/cockroachdb/cockroach";

/// The default docs repository checkout, relative to the home directory.
const DEFAULT_DOCS_REPO: &str = "go/src/github.com/cockroachdb/docs";

/// Where the build target leaves the generated BNF files, relative to the
/// code repository.
///
/// The trailing slash is part of the argument the generator has always
/// been handed.
const GENERATED_BNF_DIR: &str = "docs/generated/sql/bnf/";

/// Where the rendered diagrams go, relative to the docs repository.
const DIAGRAMS_DIR: &str = "_includes/sql/v2.0/diagrams/";

/// The resolved configuration for a regeneration run.
///
/// Resolved once at startup and immutable thereafter.
#[derive(Clone, Debug)]
pub struct Config {
    /// The pattern selecting which grammar rules to render.
    filter: String,

    /// The root of the code repository.
    code_dir: PathBuf,

    /// The root of the docs repository.
    docs_dir: PathBuf,
}

impl Config {
    /// Resolves a [`Config`] from the process environment.
    pub fn from_env(filter: String) -> Result<Self> {
        Self::resolve(filter, |name| std::env::var_os(name))
    }

    /// Resolves a [`Config`] over the given environment lookup.
    pub(crate) fn resolve(filter: String, env: impl Fn(&str) -> Option<OsString>) -> Result<Self> {
        let code_dir = repo_dir(&env, CODE_REPO_ENV, DEFAULT_CODE_REPO)?;
        let docs_dir = repo_dir(&env, DOCS_REPO_ENV, DEFAULT_DOCS_REPO)?;

        Ok(Self {
            filter,
            code_dir,
            docs_dir,
        })
    }

    /// Gets the filter pattern.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Gets the code repository root.
    pub fn code_dir(&self) -> &Path {
        &self.code_dir
    }

    /// Gets the docs repository root.
    pub fn docs_dir(&self) -> &Path {
        &self.docs_dir
    }

    /// Gets the directory the generated BNF files are built into.
    pub fn generated_bnf_dir(&self) -> PathBuf {
        self.code_dir.join(GENERATED_BNF_DIR)
    }

    /// Gets the directory the rendered diagrams are written into.
    pub fn diagrams_dir(&self) -> PathBuf {
        self.docs_dir.join(DIAGRAMS_DIR)
    }
}

/// Resolves a repository root from an override variable, falling back to
/// the default checkout under the home directory.
fn repo_dir(
    env: &impl Fn(&str) -> Option<OsString>,
    var: &str,
    default: &str,
) -> Result<PathBuf> {
    match env(var) {
        Some(path) => Ok(PathBuf::from(path)),
        None => {
            let home = env(HOME_ENV).with_context(|| {
                format!("`{var}` is not set and `{HOME_ENV}` is not available")
            })?;
            Ok(PathBuf::from(home).join(default))
        }
    }
}
