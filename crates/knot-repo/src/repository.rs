//! The repository handle: discovery, layout, and bootstrap.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{Config, RepoError, Result};

/// Name of the metadata directory that marks a worktree as a repository.
pub const KNOT_DIR: &str = ".knot";

/// Name of the configuration file inside the metadata directory.
const CONFIG_FILE: &str = "config";

/// A handle to one knot repository on disk.
///
/// Constructed by [`Repository::open`], [`Repository::init`], or
/// [`Repository::discover`]; immutable for its process lifetime. All path
/// computation under the metadata directory goes through
/// [`Repository::knot_path`], [`Repository::knot_file`], and
/// [`Repository::knot_subdir`].
#[derive(Debug, Clone)]
pub struct Repository {
    worktree: PathBuf,
    knot_dir: PathBuf,
    config: Option<Config>,
}

impl Repository {
    /// Opens the repository whose worktree is `path`, with full validation:
    /// the metadata directory must exist and the configuration file, when
    /// present, must carry a supported format version.
    ///
    /// # Errors
    ///
    /// `NotFound` if `path` holds no metadata directory, plus the
    /// [`Config::load`] and version-gate errors.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path.as_ref(), false)
    }

    fn open_with(path: &Path, force: bool) -> Result<Self> {
        let worktree = path.canonicalize()?;
        let knot_dir = worktree.join(KNOT_DIR);

        if !force && !knot_dir.is_dir() {
            return Err(RepoError::NotFound(worktree.display().to_string()));
        }

        // A missing config file is tolerated (partially-initialized or
        // externally-prepared directories); a present one must parse.
        let config_path = knot_dir.join(CONFIG_FILE);
        let config = if config_path.is_file() {
            let config = Config::load(&config_path)?;
            if !force {
                config.require_supported()?;
            }
            Some(config)
        } else {
            None
        };

        Ok(Self {
            worktree,
            knot_dir,
            config,
        })
    }

    /// The repository's working directory.
    #[must_use]
    pub fn worktree(&self) -> &Path {
        &self.worktree
    }

    /// The repository's metadata directory (`<worktree>/.knot`).
    #[must_use]
    pub fn knot_dir(&self) -> &Path {
        &self.knot_dir
    }

    /// The loaded configuration record, if a config file was present.
    #[must_use]
    pub fn config(&self) -> Option<&Config> {
        self.config.as_ref()
    }

    /// Joins `segments` under the metadata directory. Pure path
    /// computation; touches nothing on disk.
    #[must_use]
    pub fn knot_path(&self, segments: &[&str]) -> PathBuf {
        let mut path = self.knot_dir.clone();
        for segment in segments {
            path.push(segment);
        }
        path
    }

    /// Resolves a file path under the metadata directory, ensuring every
    /// directory component except the final segment exists.
    ///
    /// Returns `Ok(None)` when the parent chain is absent and `mkdir` is
    /// not set.
    ///
    /// # Errors
    ///
    /// `NotADirectory` if an intermediate component exists as a file.
    pub fn knot_file(&self, mkdir: bool, segments: &[&str]) -> Result<Option<PathBuf>> {
        if let [parents @ .., _] = segments {
            if !self.knot_subdir(mkdir, parents)? {
                return Ok(None);
            }
        }
        Ok(Some(self.knot_path(segments)))
    }

    /// Ensures the directory named by `segments` exists under the metadata
    /// directory.
    ///
    /// Returns `Ok(true)` if it exists or was created with `mkdir`,
    /// `Ok(false)` if it is absent and `mkdir` is not set.
    ///
    /// # Errors
    ///
    /// `NotADirectory` if the path exists but is not a directory.
    pub fn knot_subdir(&self, mkdir: bool, segments: &[&str]) -> Result<bool> {
        let path = self.knot_path(segments);

        match fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => return Ok(true),
            Ok(_) => return Err(RepoError::NotADirectory(path.display().to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        if mkdir {
            fs::create_dir_all(&path)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Creates a new repository at `path`, building the worktree directory
    /// itself if it does not exist yet.
    ///
    /// Creates the canonical skeleton (`branches`, `objects`, `refs/tags`,
    /// `refs/heads`) and writes the default configuration, then re-opens
    /// the repository with full validation. Partially-created state is left
    /// in place on failure.
    ///
    /// # Errors
    ///
    /// `NotADirectory` if `path` exists as a file, `AlreadyInitialized` if
    /// the metadata directory already holds state.
    pub fn init(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        match fs::metadata(path) {
            Ok(meta) if !meta.is_dir() => {
                return Err(RepoError::NotADirectory(path.display().to_string()));
            }
            Ok(_) => {
                let knot_dir = path.join(KNOT_DIR);
                if knot_dir.is_dir() && fs::read_dir(&knot_dir)?.next().is_some() {
                    return Err(RepoError::AlreadyInitialized(
                        knot_dir.display().to_string(),
                    ));
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::create_dir_all(path)?;
            }
            Err(e) => return Err(e.into()),
        }

        // Force mode: the handle exists before the on-disk state does.
        let repo = Self::open_with(path, true)?;
        repo.knot_subdir(true, &["branches"])?;
        repo.knot_subdir(true, &["objects"])?;
        repo.knot_subdir(true, &["refs", "tags"])?;
        repo.knot_subdir(true, &["refs", "heads"])?;

        fs::write(repo.knot_path(&[CONFIG_FILE]), Config::default().render())?;
        tracing::info!(worktree = %repo.worktree.display(), "initialized repository");

        Self::open(path)
    }

    /// Walks `start` and its ancestors looking for a repository, opening
    /// the first one found.
    ///
    /// Returns `Ok(None)` when the filesystem root is reached without
    /// finding one and `required` is not set.
    ///
    /// # Errors
    ///
    /// `NotFound` under the same condition when `required` is set.
    pub fn discover(start: impl AsRef<Path>, required: bool) -> Result<Option<Self>> {
        let current = start.as_ref().canonicalize()?;

        if current.join(KNOT_DIR).is_dir() {
            return Self::open(&current).map(Some);
        }

        // Root termination compares resolved paths: at the root, parent()
        // either vanishes or yields the path itself.
        match current.parent() {
            Some(parent) if parent != current => Self::discover(parent, required),
            _ => {
                if required {
                    Err(RepoError::NotFound(current.display().to_string()))
                } else {
                    Ok(None)
                }
            }
        }
    }
}
