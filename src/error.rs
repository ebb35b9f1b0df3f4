//! Error types for palette extraction

use thiserror::Error;

/// Result type alias for palette operations
pub type Result<T> = std::result::Result<T, PaletteError>;

#[derive(Error, Debug)]
pub enum PaletteError {
    /// Nothing to cluster
    #[error("no samples to cluster")]
    EmptySamples,

    /// k must be at least one
    #[error("cluster count must be at least 1")]
    ZeroClusters,

    /// k above the supported palette size
    #[error("cluster count {k} exceeds the maximum of {max}")]
    TooManyClusters { k: usize, max: usize },

    /// Weighted draw over an empty sequence
    #[error("cannot draw from an empty sequence")]
    EmptyItems,

    #[error("{items} items but {weights} weights")]
    LengthMismatch { items: usize, weights: usize },

    /// Weights must be finite and non-negative
    #[error("invalid weight {weight} at index {index}")]
    InvalidWeight { index: usize, weight: f64 },

    /// RGBA buffers hold four bytes per pixel
    #[error("RGBA buffer length {len} is not a multiple of 4")]
    InvalidRgbaLength { len: usize },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to rebuild image buffer ({width}x{height})")]
    ImageBuffer { width: u32, height: u32 },
}

impl PaletteError {
    /// True for errors caused by the caller's arguments rather than by image I/O
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            PaletteError::EmptySamples
                | PaletteError::ZeroClusters
                | PaletteError::TooManyClusters { .. }
                | PaletteError::EmptyItems
                | PaletteError::LengthMismatch { .. }
                | PaletteError::InvalidWeight { .. }
                | PaletteError::InvalidRgbaLength { .. }
        )
    }
}
