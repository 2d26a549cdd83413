//! Layered configuration for the `hal` inspection tool.
//!
//! Values are merged from, in increasing priority:
//!
//! 1. built-in defaults ([`Config::default`]),
//! 2. a TOML file, either given explicitly or `config.toml` in the platform
//!    configuration directory (see [`default_path`]),
//! 3. environment variables prefixed with [`ENV_PREFIX`], e.g.
//!    `RUSTIC_HAL_OUTPUT=compact` or `RUSTIC_HAL_ARRAY_RELS=[item,orders]`.

pub mod error;

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ErrorKind, Result};

pub const ENV_PREFIX: &str = "RUSTIC_HAL_";
pub const CONFIG_FILE: &str = "config.toml";

/// How JSON documents are written back out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Indented, one property per line.
    #[default]
    Pretty,
    /// Single line, no insignificant whitespace.
    Compact,
}
impl Display for OutputStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            OutputStyle::Pretty => write!(f, "pretty"),
            OutputStyle::Compact => write!(f, "compact"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputStyle,
    /// Rels that are always written as arrays when normalising a document.
    pub array_rels: Vec<String>,
    /// Show the expanded URI next to compact (CURIE) rels when listing links.
    pub expand_curies: bool,
    /// Warn about deprecated links when listing them.
    pub warn_deprecated: bool,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputStyle::default(),
            array_rels: Vec::new(),
            expand_curies: true,
            warn_deprecated: true,
        }
    }
}

impl Config {
    /// Load the layered configuration.
    ///
    /// An `explicit` file must exist; the default location is optional.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let file = match explicit {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => default_path(),
        };
        let config: Config = Self::figment(file.as_deref()).extract().or_raise(|| ErrorKind::Invalid)?;
        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// The provider chain behind [`load`](Self::load), without the existence check.
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(file) = file {
            tracing::trace!(path = %file.display(), "Merging configuration file");
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }
}

/// `config.toml` in the platform configuration directory, if one can be determined.
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rustic-hal").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
