/// Parameter set for one SFMT period.
///
/// The shift/mask constants come from the SFMT 1.5.1 distribution
/// (`SFMT-params*.h`). The internal state is `n()` 128-bit words.
#[derive(Debug, PartialEq, Eq)]
pub struct SfmtParams {
    /// Mersenne exponent. The period is a multiple of 2^mexp - 1.
    pub mexp: u32,
    pub pos1: usize,
    pub sl1: u32,
    /// Byte shift of the 128-bit left shift
    pub sl2: u32,
    pub sr1: u32,
    /// Byte shift of the 128-bit right shift
    pub sr2: u32,
    pub msk: [u32; 4],
    pub parity: [u32; 4],
    pub id: &'static str,
}

impl SfmtParams {
    /// Size of the state in 128-bit words
    pub const fn n(&self) -> usize {
        self.mexp as usize / 128 + 1
    }

    /// Size of the state in 32-bit words
    pub const fn n32(&self) -> usize {
        self.n() * 4
    }

    /// Size of the state in 64-bit words
    pub const fn n64(&self) -> usize {
        self.n() * 2
    }

    /// Look up a supported parameter set by its Mersenne exponent.
    pub fn from_mexp(mexp: u32) -> Option<&'static SfmtParams> {
        ALL_PARAMS.iter().copied().find(|p| p.mexp == mexp)
    }
}

pub static SFMT_607: SfmtParams = SfmtParams {
    mexp: 607,
    pos1: 2,
    sl1: 15,
    sl2: 3,
    sr1: 13,
    sr2: 3,
    msk: [0xfdff37ff, 0xef7f3f7d, 0xff777b7d, 0x7ff7fb2f],
    parity: [0x00000001, 0x00000000, 0x00000000, 0x5986f054],
    id: "SFMT-607:2-15-3-13-3:fdff37ff-ef7f3f7d-ff777b7d-7ff7fb2f",
};

pub static SFMT_19937: SfmtParams = SfmtParams {
    mexp: 19937,
    pos1: 122,
    sl1: 18,
    sl2: 1,
    sr1: 11,
    sr2: 1,
    msk: [0xdfffffef, 0xddfecb7f, 0xbffaffff, 0xbffffff6],
    parity: [0x00000001, 0x00000000, 0x00000000, 0x13c9e684],
    id: "SFMT-19937:122-18-1-11-1:dfffffef-ddfecb7f-bffaffff-bffffff6",
};

/// Every parameter set this crate ships, smallest period first.
pub static ALL_PARAMS: [&SfmtParams; 2] = [&SFMT_607, &SFMT_19937];
