use crate::error::{GenError, GenResult};
use sfmt::{Sfmt, SfmtParams};
use std::fmt;

/// Word size of each emitted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    W32,
    W64,
}

impl Width {
    pub fn bits(self) -> u32 {
        match self {
            Width::W32 => 32,
            Width::W64 => 64,
        }
    }
}

impl TryFrom<u32> for Width {
    type Error = GenError;

    fn try_from(bits: u32) -> GenResult<Self> {
        match bits {
            32 => Ok(Width::W32),
            64 => Ok(Width::W64),
            other => Err(GenError::InvalidWidth(other)),
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// What the driver needs from a generator engine.
///
/// Bulk fills are only defined for buffers whose length is a multiple of 4
/// and at least `min_array_size` for the width; anything else is a contract
/// violation and panics.
pub trait GeneratorEngine {
    /// Minimum word count `fill_u32`/`fill_u64` accept.
    fn min_array_size(&self, width: Width) -> usize;

    fn id_string(&self) -> &str;

    fn seed_scalar(&mut self, seed: u32);

    fn seed_array(&mut self, key: &[u32]);

    fn next_u32(&mut self) -> u32;

    fn next_u64(&mut self) -> u64;

    fn fill_u32(&mut self, buf: &mut [u32]);

    fn fill_u64(&mut self, buf: &mut [u64]);
}

impl GeneratorEngine for Sfmt {
    fn min_array_size(&self, width: Width) -> usize {
        match width {
            Width::W32 => self.min_array_size32(),
            Width::W64 => self.min_array_size64(),
        }
    }

    fn id_string(&self) -> &str {
        Sfmt::id_string(self)
    }

    fn seed_scalar(&mut self, seed: u32) {
        self.init_gen_rand(seed);
    }

    fn seed_array(&mut self, key: &[u32]) {
        self.init_by_array(key);
    }

    fn next_u32(&mut self) -> u32 {
        Sfmt::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        Sfmt::next_u64(self)
    }

    fn fill_u32(&mut self, buf: &mut [u32]) {
        self.fill_array32(buf);
    }

    fn fill_u64(&mut self, buf: &mut [u64]) {
        self.fill_array64(buf);
    }
}

/// Look up the SFMT parameter set for a Mersenne exponent.
pub fn engine_params(mexp: u32) -> GenResult<&'static SfmtParams> {
    SfmtParams::from_mexp(mexp).ok_or(GenError::UnsupportedExponent(mexp))
}

/// Minimum bulk-fill size for a parameter set, known before any engine exists.
pub fn min_array_size(params: &SfmtParams, width: Width) -> usize {
    match width {
        Width::W32 => params.n32(),
        Width::W64 => params.n64(),
    }
}
