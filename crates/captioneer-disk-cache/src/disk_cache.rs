//! # Captioneer Disk Cache

use std::{
    fmt,
    fs,
    path::{Path, PathBuf},
    process,
    sync::atomic::{AtomicUsize, Ordering},
};

use anyhow::Context;
use downloader::Downloader;

use crate::{ArtifactFetcher, CAPTIONEER_CACHE_CONFIG};

/// Options for [`CaptioneerDiskCache`].
#[derive(Clone, Default, Debug)]
pub struct CaptioneerDiskCacheOptions {
    /// Optional path to the cache directory.
    pub cache_dir: Option<PathBuf>,

    /// Optional path to the data directory.
    pub data_dir: Option<PathBuf>,

    /// Optional [`Downloader`] builder.
    pub downloader: Option<fn() -> Downloader>,
}

impl CaptioneerDiskCacheOptions {
    /// Set the cache directory.
    pub fn with_cache_dir<P: AsRef<Path>>(
        mut self,
        cache_dir: Option<P>,
    ) -> Self {
        self.cache_dir = cache_dir.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Set the data directory.
    pub fn with_data_dir<P: AsRef<Path>>(
        mut self,
        data_dir: Option<P>,
    ) -> Self {
        self.data_dir = data_dir.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Set the downloader builder.
    pub fn with_downloader(
        mut self,
        downloader: Option<fn() -> Downloader>,
    ) -> Self {
        self.downloader = downloader;
        self
    }
}

/// Disk cache for fetched model artifacts.
///
/// Leverages an [`ArtifactFetcher`] (a [`Downloader`] unless replaced)
/// for fetching files, and [`PathResolver`](`crate::path_resolver::PathResolver`)
/// for resolving cache and data paths appropriate for a user/system combo,
/// and any environment overrides.
///
/// Fetches land in a temporary file next to the target, which is renamed
/// into place once complete; readers never observe a partial artifact.
pub struct CaptioneerDiskCache {
    /// Cache directory.
    cache_dir: PathBuf,

    /// Data directory.
    data_dir: PathBuf,

    /// The remote fetch implementation.
    fetcher: Box<dyn ArtifactFetcher>,
}

impl fmt::Debug for CaptioneerDiskCache {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("CaptioneerDiskCache")
            .field("cache_dir", &self.cache_dir)
            .field("data_dir", &self.data_dir)
            .finish_non_exhaustive()
    }
}

impl CaptioneerDiskCache {
    /// Construct a new [`CaptioneerDiskCache`].
    pub fn new(options: CaptioneerDiskCacheOptions) -> anyhow::Result<Self> {
        let cache_dir = CAPTIONEER_CACHE_CONFIG
            .resolve_cache_dir(options.cache_dir)
            .context("failed to resolve cache directory")?;

        let data_dir = CAPTIONEER_CACHE_CONFIG
            .resolve_data_dir(options.data_dir)
            .context("failed to resolve data directory")?;

        let downloader = match options.downloader {
            Some(builder) => builder(),
            None => Downloader::builder()
                .build()
                .context("failed to build downloader")?,
        };

        Ok(Self {
            cache_dir,
            data_dir,
            fetcher: Box::new(downloader),
        })
    }

    /// Replace the fetch implementation.
    pub fn with_fetcher(
        mut self,
        fetcher: Box<dyn ArtifactFetcher>,
    ) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Get the cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Get the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the cache path for the given key.
    ///
    /// * Does not check that the path exists.
    /// * Does not initialize the containing directories.
    ///
    /// # Arguments
    /// * `context` - prefix dirs, inserted between `self.cache_dir` and `file`.
    /// * `file` - the final file name.
    pub fn cache_path<C, F>(
        &self,
        context: &[C],
        file: F,
    ) -> PathBuf
    where
        C: AsRef<Path>,
        F: AsRef<Path>,
    {
        extend_path(&self.cache_dir, context, file)
    }

    /// Get the data path for the given key.
    ///
    /// * Does not check that the path exists.
    /// * Does not initialize the containing directories.
    ///
    /// # Arguments
    /// * `context` - prefix dirs, inserted between `self.data_dir` and `file`.
    /// * `file` - the final file name.
    pub fn data_path<C, F>(
        &self,
        context: &[C],
        file: F,
    ) -> PathBuf
    where
        C: AsRef<Path>,
        F: AsRef<Path>,
    {
        extend_path(&self.data_dir, context, file)
    }

    /// Resolve a user-supplied data file, such as a vocabulary.
    ///
    /// * Absolute paths, and relative paths that exist, are returned as given.
    /// * Otherwise a relative path is looked up under `self.data_dir`.
    /// * A path found in neither place is returned as given, so errors name it.
    pub fn resolve_data_file<P: AsRef<Path>>(
        &self,
        file: P,
    ) -> PathBuf {
        let file = file.as_ref();
        if file.is_absolute() || file.exists() {
            return file.to_path_buf();
        }

        let candidate = self.data_dir.join(file);
        if candidate.is_file() {
            candidate
        } else {
            file.to_path_buf()
        }
    }

    /// Returns the cached artifact path, fetching it first if it is absent.
    ///
    /// The file name is the final path segment of the first url.
    ///
    /// # Arguments
    /// * `context` - prefix dirs for the cached file.
    /// * `urls` - mirrors to fetch from, tried in order.
    /// * `download` - whether a missing file may be fetched.
    ///
    /// # Errors
    /// * The cached file does not exist and `download` is `false`.
    /// * `urls` is empty, or names no file.
    /// * The fetch fails, produces an empty file, or can not be moved into place.
    pub fn load_cached_path<C, S>(
        &mut self,
        context: &[C],
        urls: &[S],
        download: bool,
    ) -> anyhow::Result<PathBuf>
    where
        C: AsRef<Path>,
        S: AsRef<str>,
    {
        let urls: Vec<&str> = urls.iter().map(|s| s.as_ref()).collect();
        let first = urls.first().context("no artifact urls given")?;
        let file_name = url_file_name(first)
            .with_context(|| format!("artifact url names no file: {first}"))?;

        let path = self.cache_path(context, file_name);
        if path.is_file() {
            log::debug!("artifact cache hit: {}", path.display());
            return Ok(path);
        }

        if !download {
            anyhow::bail!("cached file not found: {}", path.display());
        }

        let dir = path
            .parent()
            .context("cache path has no parent directory")?;
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create cache directory {}", dir.display()))?;

        let part = part_path(dir, file_name);
        if part.exists() {
            fs::remove_file(&part)?;
        }

        log::info!("fetching artifact {} into {}", first, path.display());

        let fetched = self
            .fetcher
            .fetch(&urls, &part)
            .and_then(|()| check_non_empty(&part))
            .and_then(|()| {
                fs::rename(&part, &path)
                    .with_context(|| format!("failed to move artifact into {}", path.display()))
            });

        if let Err(err) = fetched {
            if part.exists() {
                let _ = fs::remove_file(&part);
            }
            return Err(err.context(format!("failed to fetch artifact from {first}")));
        }

        Ok(path)
    }
}

/// Extend a path with a context and filename.
fn extend_path<P, S, F>(
    path: P,
    context: &[S],
    filename: F,
) -> PathBuf
where
    P: AsRef<Path>,
    S: AsRef<Path>,
    F: AsRef<Path>,
{
    let mut path = path.as_ref().to_path_buf();
    path.extend(context.iter().map(|s| s.as_ref()));
    path.push(filename.as_ref());
    path
}

/// The final path segment of a url, ignoring any query or fragment.
fn url_file_name(url: &str) -> Option<&str> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    url[..end]
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty() && !name.contains(':'))
}

/// A temporary sibling path, unique per process and call.
fn part_path(
    dir: &Path,
    file_name: &str,
) -> PathBuf {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    dir.join(format!(".{file_name}.{}.{n}.part", process::id()))
}

fn check_non_empty(path: &Path) -> anyhow::Result<()> {
    let meta = fs::metadata(path)
        .with_context(|| format!("fetch produced no file at {}", path.display()))?;
    if meta.len() == 0 {
        anyhow::bail!("fetched artifact is empty");
    }
    Ok(())
}
