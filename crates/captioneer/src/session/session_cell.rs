//! # Lazy Session Cell

use std::{fmt, path::Path, sync::Arc};

use once_cell::sync::OnceCell;

use crate::{
    artifacts::ArtifactProvisioner,
    errors::{CResult, CaptioneerError},
    session::ScoringModel,
    types::TokenType,
};

/// A shared scoring model handle.
pub type SharedScoringModel<T> = Arc<dyn ScoringModel<T>>;

type SessionLoader<T> = Box<dyn Fn() -> CResult<SharedScoringModel<T>> + Send + Sync>;

/// Builds a [`ScoringModel`] on first use, and shares it afterwards.
///
/// * Construction runs at most once successfully; concurrent first callers
///   wait on a single construction.
/// * A [`CaptioneerError::SessionInit`] failure is remembered: every later
///   call fails fast with the same message, without reloading.
/// * Any other failure (typically [`CaptioneerError::Provisioning`]) is not
///   remembered; the next call tries again.
pub struct SessionCell<T: TokenType> {
    loader: SessionLoader<T>,
    session: OnceCell<SharedScoringModel<T>>,
    fatal: OnceCell<String>,
}

impl<T: TokenType> fmt::Debug for SessionCell<T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("SessionCell")
            .field("initialized", &self.is_initialized())
            .field("fatal", &self.fatal.get())
            .finish_non_exhaustive()
    }
}

impl<T: TokenType> SessionCell<T> {
    /// Construct a cell which builds its session with `loader`.
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> CResult<SharedScoringModel<T>> + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            session: OnceCell::new(),
            fatal: OnceCell::new(),
        }
    }

    /// Construct a cell which provisions an artifact, then opens it.
    ///
    /// ## Arguments
    /// * `provisioner` - makes the model artifact available locally.
    /// * `open` - loads the artifact at a path into a scoring model.
    pub fn from_provisioner<F>(
        provisioner: ArtifactProvisioner,
        open: F,
    ) -> Self
    where
        F: Fn(&Path) -> CResult<SharedScoringModel<T>> + Send + Sync + 'static,
    {
        Self::new(move || {
            let path = provisioner.ensure_available()?;
            open(&path)
        })
    }

    /// Construct a cell holding an already-built session.
    pub fn ready(model: SharedScoringModel<T>) -> Self {
        let cell = Self::new(|| {
            Err(CaptioneerError::SessionInit(
                "session loader invoked on a ready cell".to_string(),
            ))
        });
        let _ = cell.session.set(model);
        cell
    }

    /// Has the session been built?
    pub fn is_initialized(&self) -> bool {
        self.session.get().is_some()
    }

    /// Get the session, building it on first use.
    ///
    /// ## Errors
    /// * [`CaptioneerError::Provisioning`] if the artifact is unavailable; retried on the next call.
    /// * [`CaptioneerError::SessionInit`] if the artifact can not be loaded; permanent.
    pub fn get_session(&self) -> CResult<SharedScoringModel<T>> {
        self.session
            .get_or_try_init(|| {
                if let Some(msg) = self.fatal.get() {
                    return Err(CaptioneerError::SessionInit(msg.clone()));
                }

                match (self.loader)() {
                    Ok(session) => {
                        log::info!("caption session initialized");
                        Ok(session)
                    }
                    Err(CaptioneerError::SessionInit(msg)) => {
                        log::error!("caption session initialization failed: {msg}");
                        let _ = self.fatal.set(msg.clone());
                        Err(CaptioneerError::SessionInit(msg))
                    }
                    Err(err) => Err(err),
                }
            })
            .cloned()
    }
}
