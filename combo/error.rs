use std::{
  io,
  time::Duration,
};

use thiserror::Error;

/// The only failure the control knows about: the options source could not
/// produce a page. It is logged and absorbed, never returned to the host.
#[derive(Debug, Error)]
pub enum FetchError {
  #[error("options source failed: {0}")]
  Failed(String),

  #[error("options request timed out after {0:?}")]
  TimedOut(Duration),

  #[error(transparent)]
  Other(#[from] anyhow::Error),
}

impl FetchError {
  pub fn failed(reason: impl Into<String>) -> Self {
    Self::Failed(reason.into())
  }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
  #[error("failed to parse combo config: {0}")]
  BadConfig(#[from] toml::de::Error),

  #[error("failed to read combo config: {0}")]
  Error(#[from] io::Error),
}
