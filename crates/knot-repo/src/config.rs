//! The repository configuration record.
//!
//! Lives at `.knot/config` as a TOML document with a single required
//! `[core]` section:
//!
//! ```toml
//! [core]
//! repositoryformatversion = 0
//! filemode = false
//! bare = false
//! ```

use std::fs;
use std::path::Path;

use crate::{RepoError, Result};

/// The only format version this implementation can read.
pub const SUPPORTED_FORMAT_VERSION: i64 = 0;

/// Versioned repository settings from the `[core]` section.
///
/// `filemode` and `bare` are advisory flags surfaced for outside tooling;
/// nothing in the core consults them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Layout and framing format version. Must be `0` to open the
    /// repository without force.
    pub format_version: i64,
    /// Whether file mode changes are tracked.
    pub filemode: bool,
    /// Whether the repository has no working tree.
    pub bare: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format_version: SUPPORTED_FORMAT_VERSION,
            filemode: false,
            bare: false,
        }
    }
}

impl Config {
    /// Loads a configuration file from disk.
    ///
    /// # Errors
    ///
    /// `ConfigCorrupt` if the file is not valid TOML, `ConfigInvalid` if
    /// `core.repositoryformatversion` is missing or not an integer.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parses a configuration document. See [`Config::load`] for errors.
    pub fn parse(text: &str) -> Result<Self> {
        let doc: toml::Value = text
            .parse()
            .map_err(|e: toml::de::Error| RepoError::ConfigCorrupt(e.to_string()))?;

        let core = doc
            .get("core")
            .ok_or_else(|| RepoError::ConfigInvalid("missing [core] section".to_string()))?;

        let format_version = core
            .get("repositoryformatversion")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                RepoError::ConfigInvalid(
                    "core.repositoryformatversion missing or not an integer".to_string(),
                )
            })?;

        Ok(Self {
            format_version,
            filemode: core
                .get("filemode")
                .and_then(toml::Value::as_bool)
                .unwrap_or(false),
            bare: core
                .get("bare")
                .and_then(toml::Value::as_bool)
                .unwrap_or(false),
        })
    }

    /// Fails unless the record carries the supported format version.
    ///
    /// # Errors
    ///
    /// `UnsupportedFormatVersion` naming the found value. There is no
    /// migration logic; this is a hard compatibility gate.
    pub fn require_supported(&self) -> Result<()> {
        if self.format_version != SUPPORTED_FORMAT_VERSION {
            return Err(RepoError::UnsupportedFormatVersion(self.format_version));
        }
        Ok(())
    }

    /// Renders the record as its on-disk `[core]` section.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "[core]\nrepositoryformatversion = {}\nfilemode = {}\nbare = {}\n",
            self.format_version, self.filemode, self.bare
        )
    }
}
