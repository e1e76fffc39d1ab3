//! # Model Artifacts
//!
//! An [`ArtifactProvisioner`] turns an [`ArtifactSource`] into a local file
//! path, fetching remote artifacts through an [`ArtifactLoader`] at most once.
//!
//! ## Provisioning A Remote Model
//!
//! ```rust,no_run
//! use captioneer::{
//!     artifacts::{ArtifactProvisioner, ArtifactSource},
//!     disk_cache::CaptioneerDiskCacheOptions,
//! };
//!
//! fn example() -> captioneer::CResult<()> {
//!     let source = ArtifactSource::remote(
//!         &["caption-decoder"],
//!         &["https://models.example.com/best_model_9.onnx"],
//!     );
//!     let provisioner =
//!         ArtifactProvisioner::with_disk_cache(source, CaptioneerDiskCacheOptions::default())?;
//!
//!     let path = provisioner.ensure_available()?;
//!     println!("{}", path.display());
//!     Ok(())
//! }
//! ```

mod artifact_loader;
mod artifact_source;
mod provisioner;

#[doc(inline)]
pub use artifact_loader::*;
#[doc(inline)]
pub use artifact_source::*;
#[doc(inline)]
pub use provisioner::*;
