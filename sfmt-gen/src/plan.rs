//! Turns raw command-line parameters into a validated generation plan.
//!
//! All validation happens here, before an engine is constructed: once a
//! [`GenerationPlan`] exists the driver can run it without further checks.

use crate::engine::Width;
use crate::error::{GenError, GenResult};

/// Seed material used in seed-array mode.
pub const DEFAULT_SEED_ARRAY: [u32; 4] = [0x01234567, 0x89ABCDEF, 0xFEDCBA98, 0x76543210];

/// Raw, unvalidated parameters as they come off the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Number of values to emit
    pub count: usize,
    /// Requested output width in bits
    pub width_bits: u32,
    /// Scalar seed, if one was given
    pub seed: Option<u32>,
    /// Seed from the fixed seed array instead of a scalar
    pub seed_array: bool,
    /// Draw values one at a time instead of one block fill
    pub per_value: bool,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            count: 1,
            width_bits: 32,
            seed: None,
            seed_array: false,
            per_value: false,
        }
    }
}

/// How the engine is initialized. Exactly one mode per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedMode {
    Scalar(u32),
    Array(Vec<u32>),
}

/// How values are drawn from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One engine call per value
    PerValue,
    /// One bulk fill of `buffer_size` words, the first `requested_count` emitted
    BulkBlock,
}

/// A validated plan for one run.
///
/// `buffer_size` is always a multiple of 4 and at least the engine's minimum
/// for `width`; in bulk mode it is also at least `requested_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    requested_count: usize,
    width: Width,
    seed_mode: SeedMode,
    strategy: Strategy,
    buffer_size: usize,
}

impl GenerationPlan {
    pub fn requested_count(&self) -> usize {
        self.requested_count
    }

    pub fn width(&self) -> Width {
        self.width
    }

    pub fn seed_mode(&self) -> &SeedMode {
        &self.seed_mode
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

/// Resolve a request into a plan.
///
/// `min_array_size` gives the engine's minimum bulk-fill size for a width.
/// The buffer starts at the requested count, is raised to that minimum, then
/// rounded down to a multiple of 4. If rounding takes it back under the
/// minimum the request fails with [`GenError::BufferTooSmall`] instead of
/// being silently corrected.
pub fn resolve<F>(request: &GenerationRequest, min_array_size: F) -> GenResult<GenerationPlan>
where
    F: Fn(Width) -> usize,
{
    let width = Width::try_from(request.width_bits)?;

    let seed_mode = match (request.seed, request.seed_array) {
        (Some(_), true) => return Err(GenError::ConflictingSeeds),
        (None, true) => SeedMode::Array(DEFAULT_SEED_ARRAY.to_vec()),
        (seed, false) => SeedMode::Scalar(seed.unwrap_or(0)),
    };

    let required = min_array_size(width);
    let buffer_size = request.count.max(required) / 4 * 4;
    if buffer_size < required {
        return Err(GenError::BufferTooSmall {
            computed: buffer_size,
            required,
        });
    }

    let strategy = if request.per_value {
        Strategy::PerValue
    } else {
        Strategy::BulkBlock
    };

    if strategy == Strategy::BulkBlock && request.count > buffer_size {
        return Err(GenError::CountExceedsBuffer {
            count: request.count,
            buffer: buffer_size,
        });
    }

    Ok(GenerationPlan {
        requested_count: request.count,
        width,
        seed_mode,
        strategy,
        buffer_size,
    })
}
