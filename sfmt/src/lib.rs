// Portable SFMT: the 128-bit state words are [u32; 4] lanes in little-endian
// order, and the SIMD byte shifts are emulated through u128.

mod params;

pub use params::{SfmtParams, ALL_PARAMS, SFMT_19937, SFMT_607};

use rand_core::{impls, Error, RngCore};

type W128 = [u32; 4];

/// SIMD-oriented Fast Mersenne Twister.
///
/// Draws come out of the internal state one word at a time and the whole
/// state is regenerated when it runs out. The bulk `fill_array*` calls run the
/// recurrence straight into the caller's buffer and leave the state positioned
/// as though every value in the buffer had been drawn one by one.
#[derive(Clone, Debug)]
pub struct Sfmt {
    params: &'static SfmtParams,
    state: Vec<W128>,
    /// Index into the state viewed as 32-bit words
    idx: usize,
}

impl Sfmt {
    /// Create an unseeded generator (all-zero state).
    pub fn new(params: &'static SfmtParams) -> Self {
        Self {
            params,
            state: vec![[0; 4]; params.n()],
            idx: params.n32(),
        }
    }

    /// Create a generator initialized with `init_gen_rand(seed)`.
    pub fn with_seed(params: &'static SfmtParams, seed: u32) -> Self {
        let mut rng = Self::new(params);
        rng.init_gen_rand(seed);
        rng
    }

    /// Create a generator initialized with `init_by_array(key)`.
    pub fn with_key(params: &'static SfmtParams, key: &[u32]) -> Self {
        let mut rng = Self::new(params);
        rng.init_by_array(key);
        rng
    }

    /// Parameter identification string, e.g. `SFMT-19937:122-18-1-11-1:...`
    pub fn id_string(&self) -> &'static str {
        self.params.id
    }

    /// Smallest buffer `fill_array32` accepts.
    pub fn min_array_size32(&self) -> usize {
        self.params.n32()
    }

    /// Smallest buffer `fill_array64` accepts.
    pub fn min_array_size64(&self) -> usize {
        self.params.n64()
    }

    fn word(&self, i: usize) -> u32 {
        self.state[i / 4][i % 4]
    }

    fn word_mut(&mut self, i: usize) -> &mut u32 {
        &mut self.state[i / 4][i % 4]
    }

    fn add_word(&mut self, i: usize, v: u32) {
        let w = self.word_mut(i);
        *w = w.wrapping_add(v);
    }

    /// Initialize the state from a single 32-bit seed.
    pub fn init_gen_rand(&mut self, seed: u32) {
        let n32 = self.params.n32();
        *self.word_mut(0) = seed;
        for i in 1..n32 {
            let prev = self.word(i - 1);
            *self.word_mut(i) = 1812433253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        self.idx = n32;
        self.period_certification();
    }

    /// Initialize the state from a key of any length.
    pub fn init_by_array(&mut self, key: &[u32]) {
        let n32 = self.params.n32();
        let lag = match n32 {
            s if s >= 623 => 11,
            s if s >= 68 => 7,
            s if s >= 39 => 5,
            _ => 3,
        };
        let mid = (n32 - lag) / 2;

        for w in &mut self.state {
            *w = [0x8b8b8b8b; 4];
        }

        let count = (key.len() + 1).max(n32) - 1;

        let mut r = func1(self.word(0) ^ self.word(mid) ^ self.word(n32 - 1));
        self.add_word(mid, r);
        r = r.wrapping_add(key.len() as u32);
        self.add_word(mid + lag, r);
        *self.word_mut(0) = r;

        let mut i = 1;
        for j in 0..count {
            let at_mid = (i + mid) % n32;
            let at_lag = (i + mid + lag) % n32;
            r = func1(self.word(i) ^ self.word(at_mid) ^ self.word((i + n32 - 1) % n32));
            self.add_word(at_mid, r);
            // Past the end of the key only the position is mixed in
            let k = key.get(j).copied().unwrap_or(0);
            r = r.wrapping_add(k).wrapping_add(i as u32);
            self.add_word(at_lag, r);
            *self.word_mut(i) = r;
            i = (i + 1) % n32;
        }

        for _ in 0..n32 {
            let at_mid = (i + mid) % n32;
            let at_lag = (i + mid + lag) % n32;
            r = func2(
                self.word(i)
                    .wrapping_add(self.word(at_mid))
                    .wrapping_add(self.word((i + n32 - 1) % n32)),
            );
            *self.word_mut(at_mid) ^= r;
            r = r.wrapping_sub(i as u32);
            *self.word_mut(at_lag) ^= r;
            *self.word_mut(i) = r;
            i = (i + 1) % n32;
        }

        self.idx = n32;
        self.period_certification();
    }

    /// Make sure the period is 2^mexp - 1 by fixing one parity bit if needed.
    fn period_certification(&mut self) {
        let parity = self.params.parity;
        let mut inner = (0..4).fold(0u32, |acc, i| acc ^ (self.word(i) & parity[i]));
        let mut shift = 16;
        while shift > 0 {
            inner ^= inner >> shift;
            shift >>= 1;
        }
        if inner & 1 == 1 {
            return;
        }

        for (i, &p) in parity.iter().enumerate() {
            for bit in 0..32 {
                let work = 1u32 << bit;
                if work & p != 0 {
                    *self.word_mut(i) ^= work;
                    return;
                }
            }
        }
    }

    /// Regenerate the whole internal state in place.
    fn gen_rand_all(&mut self) {
        let p = self.params;
        let n = p.n();
        let mut r1 = self.state[n - 2];
        let mut r2 = self.state[n - 1];
        for i in 0..n {
            let b = self.state[(i + p.pos1) % n];
            self.state[i] = do_recursion(p, self.state[i], b, r1, r2);
            r1 = r2;
            r2 = self.state[i];
        }
    }

    /// Run the recurrence into `array` (at least `n` blocks long) and leave
    /// the last `n` blocks behind as the new state.
    fn gen_rand_array(&mut self, array: &mut [W128]) {
        let p = self.params;
        let n = p.n();
        let size = array.len();
        let mut r1 = self.state[n - 2];
        let mut r2 = self.state[n - 1];

        for i in 0..n - p.pos1 {
            array[i] = do_recursion(p, self.state[i], self.state[i + p.pos1], r1, r2);
            r1 = r2;
            r2 = array[i];
        }
        for i in n - p.pos1..n {
            array[i] = do_recursion(p, self.state[i], array[i + p.pos1 - n], r1, r2);
            r1 = r2;
            r2 = array[i];
        }
        let tail = n.max(size - n);
        for i in n..tail {
            array[i] = do_recursion(p, array[i - n], array[i + p.pos1 - n], r1, r2);
            r1 = r2;
            r2 = array[i];
        }

        // Short arrays: the front of the new state is already in the array
        let mut j = 0;
        while j + size < 2 * n {
            self.state[j] = array[j + size - n];
            j += 1;
        }
        for i in tail..size {
            array[i] = do_recursion(p, array[i - n], array[i + p.pos1 - n], r1, r2);
            r1 = r2;
            r2 = array[i];
            self.state[j] = array[i];
            j += 1;
        }
    }

    /// Generate the next 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        if self.idx >= self.params.n32() {
            self.gen_rand_all();
            self.idx = 0;
        }
        let r = self.word(self.idx);
        self.idx += 1;
        r
    }

    /// Generate a real in [0, 1) from one 32-bit draw.
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 * (1.0 / 4294967296.0)
    }

    /// Generate the next 64-bit value.
    ///
    /// 64-bit values are read from even word positions; after an odd number
    /// of 32-bit draws one word is skipped.
    pub fn next_u64(&mut self) -> u64 {
        self.idx += self.idx & 1;
        if self.idx >= self.params.n32() {
            self.gen_rand_all();
            self.idx = 0;
        }
        let lo = self.word(self.idx) as u64;
        let hi = self.word(self.idx + 1) as u64;
        self.idx += 2;
        lo | (hi << 32)
    }

    /// Fill `out` with 32-bit values in one pass.
    ///
    /// # Panics
    ///
    /// If the generator has been drawn from since it was seeded or last
    /// filled, or if `out.len()` is not a multiple of 4 or is smaller than
    /// `min_array_size32()`.
    pub fn fill_array32(&mut self, out: &mut [u32]) {
        let n32 = self.params.n32();
        assert_eq!(
            self.idx, n32,
            "fill_array32 must directly follow seeding or another fill"
        );
        assert!(
            out.len() % 4 == 0 && out.len() >= n32,
            "fill_array32 needs a multiple of 4 words and at least {}, got {}",
            n32,
            out.len()
        );

        let mut blocks = vec![[0u32; 4]; out.len() / 4];
        self.gen_rand_array(&mut blocks);
        for (dst, src) in out.chunks_exact_mut(4).zip(&blocks) {
            dst.copy_from_slice(src);
        }
        self.idx = n32;
    }

    /// Fill `out` with 64-bit values in one pass.
    ///
    /// # Panics
    ///
    /// If the generator has been drawn from since it was seeded or last
    /// filled, or if `out.len()` is odd or smaller than `min_array_size64()`.
    pub fn fill_array64(&mut self, out: &mut [u64]) {
        let n32 = self.params.n32();
        let n64 = self.params.n64();
        assert_eq!(
            self.idx, n32,
            "fill_array64 must directly follow seeding or another fill"
        );
        assert!(
            out.len() % 2 == 0 && out.len() >= n64,
            "fill_array64 needs an even word count and at least {}, got {}",
            n64,
            out.len()
        );

        let mut blocks = vec![[0u32; 4]; out.len() / 2];
        self.gen_rand_array(&mut blocks);
        for (dst, b) in out.chunks_exact_mut(2).zip(&blocks) {
            dst[0] = b[0] as u64 | (b[1] as u64) << 32;
            dst[1] = b[2] as u64 | (b[3] as u64) << 32;
        }
        self.idx = n32;
    }
}

impl RngCore for Sfmt {
    fn next_u32(&mut self) -> u32 {
        Sfmt::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        Sfmt::next_u64(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

fn func1(x: u32) -> u32 {
    (x ^ (x >> 27)).wrapping_mul(1664525)
}

fn func2(x: u32) -> u32 {
    (x ^ (x >> 27)).wrapping_mul(1566083941)
}

fn to_u128(w: W128) -> u128 {
    w.iter().rev().fold(0u128, |acc, &x| (acc << 32) | x as u128)
}

fn from_u128(v: u128) -> W128 {
    [v as u32, (v >> 32) as u32, (v >> 64) as u32, (v >> 96) as u32]
}

/// The SFMT recurrence for one 128-bit word.
#[inline]
fn do_recursion(p: &SfmtParams, a: W128, b: W128, c: W128, d: W128) -> W128 {
    let x = from_u128(to_u128(a) << (p.sl2 * 8));
    let y = from_u128(to_u128(c) >> (p.sr2 * 8));
    std::array::from_fn(|k| a[k] ^ x[k] ^ ((b[k] >> p.sr1) & p.msk[k]) ^ y[k] ^ (d[k] << p.sl1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_19937_seed_1234_first_values() {
        // SFMT.19937.out.txt from the SFMT 1.5.1 distribution
        let mut rng = Sfmt::with_seed(&SFMT_19937, 1234);
        let expected: [u32; 5] = [3440181298, 1564997079, 1510669302, 2930277156, 1452439940];

        for (i, &expected_val) in expected.iter().enumerate() {
            let actual = rng.next_u32();
            assert_eq!(
                actual, expected_val,
                "Mismatch at index {}: expected {}, got {}",
                i, expected_val, actual
            );
        }
    }

    #[test]
    fn test_19937_init_by_array_first_values() {
        let mut rng = Sfmt::with_key(&SFMT_19937, &[0x1234, 0x5678, 0x9abc, 0xdef0]);
        let expected: [u32; 5] = [2920711183, 3885745737, 3501893680, 856470934, 1421864068];

        for (i, &expected_val) in expected.iter().enumerate() {
            assert_eq!(rng.next_u32(), expected_val, "Mismatch at index {}", i);
        }
    }

    #[test]
    fn test_19937_seed_4321_u64() {
        // SFMT.19937.out64.txt
        let mut rng = Sfmt::with_seed(&SFMT_19937, 4321);
        assert_eq!(rng.next_u64(), 16924766246869039260);
        assert_eq!(rng.next_u64(), 8201438687333352714);
        assert_eq!(rng.next_u64(), 2265290287015001750);
    }

    #[test]
    fn test_607_seed_1234_first_values() {
        let mut rng = Sfmt::with_seed(&SFMT_607, 1234);
        let expected: [u32; 5] = [1196421539, 2865311212, 3866479472, 2692900087, 3838928621];

        for (i, &expected_val) in expected.iter().enumerate() {
            assert_eq!(rng.next_u32(), expected_val, "Mismatch at index {}", i);
        }
    }

    #[test]
    fn test_fill_array32_matches_single_draws() {
        // 1000 words crosses the 624-word state boundary
        let mut bulk = Sfmt::with_seed(&SFMT_19937, 1234);
        let mut buf = vec![0u32; 1000];
        bulk.fill_array32(&mut buf);

        let mut single = Sfmt::with_seed(&SFMT_19937, 1234);
        for (i, &v) in buf.iter().enumerate() {
            assert_eq!(single.next_u32(), v, "Mismatch at index {}", i);
        }
    }

    #[test]
    fn test_fill_array64_matches_single_draws() {
        let mut bulk = Sfmt::with_seed(&SFMT_19937, 4321);
        let mut buf = vec![0u64; 700];
        bulk.fill_array64(&mut buf);

        assert_eq!(buf[0], 16924766246869039260);

        let mut single = Sfmt::with_seed(&SFMT_19937, 4321);
        for (i, &v) in buf.iter().enumerate() {
            assert_eq!(single.next_u64(), v, "Mismatch at index {}", i);
        }
    }

    #[test]
    fn test_consecutive_fills_continue_sequence() {
        let mut bulk = Sfmt::with_seed(&SFMT_19937, 7);
        let mut first = vec![0u32; 624];
        let mut second = vec![0u32; 624];
        bulk.fill_array32(&mut first);
        bulk.fill_array32(&mut second);

        let mut single = Sfmt::with_seed(&SFMT_19937, 7);
        for &v in first.iter().chain(&second) {
            assert_eq!(single.next_u32(), v);
        }
    }

    #[test]
    fn test_607_fill_matches_single_draws() {
        let mut bulk = Sfmt::with_seed(&SFMT_607, 0);
        let mut buf = vec![0u32; 100];
        bulk.fill_array32(&mut buf);

        let mut single = Sfmt::with_seed(&SFMT_607, 0);
        let drawn: Vec<u32> = (0..100).map(|_| single.next_u32()).collect();
        assert_eq!(buf, drawn);
    }

    #[test]
    fn test_u64_after_odd_u32_skips_a_word() {
        let mut words = Sfmt::with_seed(&SFMT_19937, 1234);
        let w: Vec<u32> = (0..4).map(|_| words.next_u32()).collect();

        let mut rng = Sfmt::with_seed(&SFMT_19937, 1234);
        rng.next_u32();
        assert_eq!(rng.next_u64(), w[2] as u64 | (w[3] as u64) << 32);
    }

    #[test]
    fn test_different_keys_same_length_differ() {
        let mut rng1 = Sfmt::with_key(&SFMT_19937, &[1, 2, 3, 4]);
        let mut rng2 = Sfmt::with_key(&SFMT_19937, &[1, 2, 3, 5]);

        let a: Vec<u32> = (0..8).map(|_| rng1.next_u32()).collect();
        let b: Vec<u32> = (0..8).map(|_| rng2.next_u32()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_longer_than_state() {
        // Keys longer than n32 take the other branch of the mixing loop
        let key: Vec<u32> = (0..700).collect();
        let mut rng1 = Sfmt::with_key(&SFMT_19937, &key);
        let mut rng2 = Sfmt::with_key(&SFMT_19937, &key);
        for _ in 0..10 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let mut rng = Sfmt::with_seed(&SFMT_19937, 99);
        let first: Vec<u32> = (0..10).map(|_| rng.next_u32()).collect();
        rng.init_gen_rand(99);
        let again: Vec<u32> = (0..10).map(|_| rng.next_u32()).collect();
        assert_eq!(first, again);
    }

    #[test]
    #[should_panic(expected = "must directly follow seeding")]
    fn test_fill_after_draw_panics() {
        let mut rng = Sfmt::with_seed(&SFMT_19937, 1);
        rng.next_u32();
        let mut buf = vec![0u32; 624];
        rng.fill_array32(&mut buf);
    }

    #[test]
    #[should_panic(expected = "at least 624")]
    fn test_fill_below_minimum_panics() {
        let mut rng = Sfmt::with_seed(&SFMT_19937, 1);
        let mut buf = vec![0u32; 620];
        rng.fill_array32(&mut buf);
    }

    #[test]
    #[should_panic(expected = "even word count")]
    fn test_fill64_odd_length_panics() {
        let mut rng = Sfmt::with_seed(&SFMT_19937, 1);
        let mut buf = vec![0u64; 313];
        rng.fill_array64(&mut buf);
    }

    #[test]
    fn test_rng_core_bytes_follow_u32_stream() {
        let mut rng = Sfmt::with_seed(&SFMT_19937, 1234);
        let mut bytes = [0u8; 8];
        RngCore::fill_bytes(&mut rng, &mut bytes);

        assert_eq!(bytes[..4], 3440181298u32.to_le_bytes());
        assert_eq!(bytes[4..], 1564997079u32.to_le_bytes());
    }

    #[test]
    fn test_next_f64_scales_u32_stream() {
        let mut reals = Sfmt::with_seed(&SFMT_19937, 1234);
        let mut words = Sfmt::with_seed(&SFMT_19937, 1234);

        assert_eq!(reals.next_f64(), 3440181298.0 / 4294967296.0);
        words.next_u32();
        for i in 0..2000 {
            let r = reals.next_f64();
            assert!((0.0..1.0).contains(&r), "Out of range at index {}: {}", i, r);
            assert_eq!(r, words.next_u32() as f64 / 4294967296.0, "Mismatch at index {}", i);
        }
    }

    #[test]
    fn test_min_array_sizes_and_id() {
        let rng = Sfmt::new(&SFMT_19937);
        assert_eq!(rng.min_array_size32(), 624);
        assert_eq!(rng.min_array_size64(), 312);
        assert!(rng.id_string().starts_with("SFMT-19937:"));
    }
}
