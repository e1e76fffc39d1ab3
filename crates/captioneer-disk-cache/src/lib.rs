//! # captioneer-disk-cache
//!
//! Resolves the cache and data directories used by captioneer, and
//! provisions model artifacts into the cache directory.
//!
//! Artifacts are fetched at most once: a cached file is never re-fetched,
//! even if the remote copy changes.
#![warn(missing_docs)]

use crate::path_resolver::PathResolver;

pub mod artifact_fetcher;
pub mod disk_cache;
pub mod path_resolver;

pub use artifact_fetcher::ArtifactFetcher;
pub use disk_cache::{CaptioneerDiskCache, CaptioneerDiskCacheOptions};

/// Environment variable key to override the default cache directory.
pub const CAPTIONEER_CACHE_DIR: &str = "CAPTIONEER_CACHE_DIR";
/// Environment variable key to override the default data directory.
pub const CAPTIONEER_DATA_DIR: &str = "CAPTIONEER_DATA_DIR";

/// Default [`PathResolver`] for captioneer.
pub const CAPTIONEER_CACHE_CONFIG: PathResolver = PathResolver {
    qualifier: "io.crates.captioneer",
    organization: "",
    application: "captioneer",
    cache_env_vars: &[CAPTIONEER_CACHE_DIR],
    data_env_vars: &[CAPTIONEER_DATA_DIR],
};
