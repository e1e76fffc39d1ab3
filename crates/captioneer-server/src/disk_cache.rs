use captioneer::disk_cache::{CaptioneerDiskCache, CaptioneerDiskCacheOptions};

/// Disk cache argument group.
#[derive(clap::Args, Debug)]
pub struct DiskCacheArgs {
    /// Cache directory; fetched model artifacts land here.
    #[arg(long, default_value = None)]
    cache_dir: Option<String>,

    /// Data directory; relative vocabulary paths missing from the working
    /// directory are looked up here.
    #[arg(long, default_value = None)]
    data_dir: Option<String>,
}

impl DiskCacheArgs {
    /// The disk cache options.
    ///
    /// Unset directories fall back to the environment, then the platform defaults.
    pub fn options(&self) -> CaptioneerDiskCacheOptions {
        CaptioneerDiskCacheOptions::default()
            .with_cache_dir(self.cache_dir.as_ref())
            .with_data_dir(self.data_dir.as_ref())
    }

    /// Open the disk cache.
    pub fn open(&self) -> Result<CaptioneerDiskCache, Box<dyn std::error::Error>> {
        Ok(CaptioneerDiskCache::new(self.options())?)
    }
}
