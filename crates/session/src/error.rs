use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Emulator core failed: {0:#}")]
    Core(anyhow::Error),
    #[error("Error saving state to '{}': {error:#}", path.display())]
    SaveState { path: PathBuf, error: anyhow::Error },
    #[error("Error writing save RAM to '{}': {source}", path.display())]
    SaveRam {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error writing image '{}': {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Animation encoder failed: {0:#}")]
    Encode(anyhow::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Content hash '{0}' is not a hex digest")]
    InvalidHash(String),
    #[error("Quick save holds {saved} bytes but working memory is {ram} bytes")]
    QuickStateSize { saved: usize, ram: usize },
}

impl SessionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SessionError::Io {
            path: path.into(),
            source,
        }
    }
}
