use thiserror::Error;

/// Everything that can stop a generation run.
#[derive(Debug, Error)]
pub enum GenError {
    /// Output width other than 32 or 64.
    #[error("output width must be 32 or 64, got {0}")]
    InvalidWidth(u32),

    /// No parameter set for the requested Mersenne exponent.
    #[error("unsupported Mersenne exponent {0} (expected 607 or 19937)")]
    UnsupportedExponent(u32),

    /// A scalar seed and seed-array mode were both requested.
    #[error("a scalar seed cannot be combined with seed-array mode")]
    ConflictingSeeds,

    /// Rounding the buffer down to a multiple of 4 fell below the engine minimum.
    #[error("buffer size too small: {computed}/{required}")]
    BufferTooSmall { computed: usize, required: usize },

    /// Bulk mode cannot hold the requested count after rounding.
    #[error("cannot emit {count} values from a {buffer}-word block; request a multiple of 4 or pass --each")]
    CountExceedsBuffer { count: usize, buffer: usize },

    /// Writing to the output sink failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl GenError {
    /// True for errors caused by the engine's minimum buffer size rather
    /// than by the configuration itself.
    pub fn is_capacity(&self) -> bool {
        matches!(self, GenError::BufferTooSmall { .. })
    }
}

/// Result type for generation operations.
pub type GenResult<T> = Result<T, GenError>;
