//! Configuration for the sourcerer process
//!
//! There is no config file; the workspace root comes from the
//! `SOURCERER_WORKSPACE_ROOT` environment variable and everything else
//! is a compile-time constant owned by the module it tunes.

use std::env;
use std::path::PathBuf;

/// Environment variable naming the workspace root
pub const WORKSPACE_ROOT_ENV: &str = "SOURCERER_WORKSPACE_ROOT";

/// Directory under the workspace root owned by the vector store
pub const DB_DIR: &str = ".sourcerer/db";

/// Process configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the workspace being indexed
    pub workspace_root: PathBuf,
}

impl Config {
    /// Build configuration from the environment, defaulting the
    /// workspace root to the current directory.
    pub fn from_env() -> Self {
        let workspace_root = env::var(WORKSPACE_ROOT_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Self { workspace_root }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
