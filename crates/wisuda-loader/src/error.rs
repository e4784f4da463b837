//! Error type for `wisuda-loader`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Ingest(#[from] wisuda_core::Error),

  #[error(transparent)]
  Sheet(#[from] wisuda_xlsx::Error),

  #[error("store error: {0}")]
  Store(Box<dyn std::error::Error + Send + Sync>),

  #[error("cannot read directory {path}: {source}")]
  ReadDir {
    path:   PathBuf,
    source: std::io::Error,
  },

  #[error("path has no file name: {0}")]
  NoFileName(PathBuf),

  #[error("config error: {0}")]
  Config(#[from] config::ConfigError),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
