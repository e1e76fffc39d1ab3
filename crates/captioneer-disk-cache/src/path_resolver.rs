//! # App Path Resolver
//!
//! Static library defaults for cache/data directory resolution.

use std::{
    env,
    path::{Path, PathBuf},
};

use directories_next::ProjectDirs;

/// The kind of directory being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirKind {
    /// Re-creatable downloads; model artifacts live here.
    Cache,

    /// Deployment inputs prepared out-of-band; vocabularies live here.
    Data,
}

/// Static configuration for application path resolution.
pub struct PathResolver {
    /// The qualifier for [`ProjectDirs`].
    pub qualifier: &'static str,

    /// The organization for [`ProjectDirs`].
    pub organization: &'static str,

    /// The application for [`ProjectDirs`].
    pub application: &'static str,

    /// The resolution order for cache directories environment variables.
    pub cache_env_vars: &'static [&'static str],

    /// The resolution order for data directories environment variables.
    pub data_env_vars: &'static [&'static str],
}

impl PathResolver {
    /// Get the [`ProjectDirs`] for this config.
    pub fn project_dirs(&self) -> Option<ProjectDirs> {
        ProjectDirs::from(self.qualifier, self.organization, self.application)
    }

    /// The environment variables consulted for `kind`, highest priority first.
    pub fn env_vars(
        &self,
        kind: DirKind,
    ) -> &'static [&'static str] {
        match kind {
            DirKind::Cache => self.cache_env_vars,
            DirKind::Data => self.data_env_vars,
        }
    }

    /// Resolve a directory of the given kind.
    ///
    /// Resolution Order:
    /// 1. `path`, if present.
    /// 2. ``env[$VAR]`` for each of [`env_vars`](Self::env_vars); in order.
    ///    Empty values are skipped.
    /// 3. The matching [`ProjectDirs`] directory, if present.
    /// 4. `None`
    ///
    /// ## Project Dirs Behavior (Linux)
    ///
    /// | Kind  | Value                                                                      |
    /// | ----- | -------------------------------------------------------------------------- |
    /// | Cache | `$XDG_CACHE_HOME`/`_project_path_` or `$HOME`/.cache/`_project_path_`      |
    /// | Data  | `$XDG_DATA_HOME`/`_project_path_` or `$HOME`/.local/share/`_project_path_` |
    pub fn resolve_dir<P: AsRef<Path>>(
        &self,
        kind: DirKind,
        path: Option<P>,
    ) -> Option<PathBuf> {
        if let Some(path) = path {
            return Some(path.as_ref().to_path_buf());
        }

        let from_env = self
            .env_vars(kind)
            .iter()
            .filter_map(|var| env::var_os(var))
            .find(|value| !value.is_empty());
        if let Some(value) = from_env {
            return Some(PathBuf::from(value));
        }

        self.project_dirs().map(|pds| match kind {
            DirKind::Cache => pds.cache_dir().to_path_buf(),
            DirKind::Data => pds.data_dir().to_path_buf(),
        })
    }

    /// Resolve the cache directory; see [`resolve_dir`](Self::resolve_dir).
    pub fn resolve_cache_dir<P: AsRef<Path>>(
        &self,
        path: Option<P>,
    ) -> Option<PathBuf> {
        self.resolve_dir(DirKind::Cache, path)
    }

    /// Resolve the data directory; see [`resolve_dir`](Self::resolve_dir).
    pub fn resolve_data_dir<P: AsRef<Path>>(
        &self,
        path: Option<P>,
    ) -> Option<PathBuf> {
        self.resolve_dir(DirKind::Data, path)
    }
}
