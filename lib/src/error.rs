//! Error types shared by both pipeline stages

use std::fmt;
use std::path::PathBuf;

/// Coarse classification of a [`RenderError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Decode,
    InvalidDimension,
    FontLoad,
    Encode,
    InvalidConfig,
}

/// Pipeline stage a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Option validation, before any stage runs
    Config,
    /// Image to character grid
    Convert,
    /// Character grid to PNG
    Rasterize,
    /// Writing a text or image artifact
    Output,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Config => "config",
            Stage::Convert => "convert",
            Stage::Rasterize => "rasterize",
            Stage::Output => "output",
        };
        write!(f, "{name} stage")
    }
}

/// Everything that can go wrong while converting or rasterizing
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to decode image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dimensions {width}x{height}")]
    InvalidDimension { width: u64, height: u64 },

    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u64, height: u64 },

    #[error("failed to load font {}: {reason}", .path.display())]
    FontLoad { path: PathBuf, reason: String },

    #[error("failed to write {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: EncodeCause,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Underlying cause of an [`RenderError::Encode`]
#[derive(Debug, thiserror::Error)]
pub enum EncodeCause {
    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RenderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RenderError::Decode { .. } | RenderError::Read { .. } => ErrorKind::Decode,
            RenderError::InvalidDimension { .. } | RenderError::InvalidCanvas { .. } => {
                ErrorKind::InvalidDimension
            }
            RenderError::FontLoad { .. } => ErrorKind::FontLoad,
            RenderError::Encode { .. } => ErrorKind::Encode,
            RenderError::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }

    /// The stage that produced this error
    pub fn stage(&self) -> Stage {
        match self {
            RenderError::Decode { .. } | RenderError::InvalidDimension { .. } => Stage::Convert,
            RenderError::Read { .. }
            | RenderError::InvalidCanvas { .. }
            | RenderError::FontLoad { .. } => Stage::Rasterize,
            RenderError::Encode { .. } => Stage::Output,
            RenderError::InvalidConfig(_) => Stage::Config,
        }
    }

    pub(crate) fn encode(path: impl Into<PathBuf>, cause: impl Into<EncodeCause>) -> Self {
        RenderError::Encode {
            path: path.into(),
            source: cause.into(),
        }
    }
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
