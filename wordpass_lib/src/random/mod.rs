//! Entropy primitives.
//!
//! Two regimes share the [`RandomSource`] interface: [`SecureRandom`] reads
//! the CSPRNG on every draw and removes modulo bias by rejection sampling,
//! while [`RandomBuffer`] amortizes CSPRNG reads over a pooled byte block.

use rand::rngs::ThreadRng;
use rand::CryptoRng;

mod buffer;
mod error;

pub use buffer::{RandomBuffer, DEFAULT_POOL_SIZE};
pub use error::Error;

/// Uniform integer source threaded through every generation step.
pub trait RandomSource {
    /// Draws an integer in `[0, max)`.
    fn integer(&mut self, max: u32) -> Result<u32, Error>;

    fn boolean(&mut self) -> Result<bool, Error> {
        Ok(self.integer(2)? == 1)
    }

    fn digit(&mut self) -> Result<u32, Error> {
        self.integer(10)
    }

    /// Picks one element of `items`, or `None` when there is nothing to pick.
    fn select<'a, T>(&mut self, items: &'a [T]) -> Result<Option<&'a T>, Error> {
        if items.is_empty() {
            return Ok(None);
        }

        let index = self.index(items.len())?;

        Ok(items.get(index))
    }

    /// Draws an index in `[0, len)`.
    fn index(&mut self, len: usize) -> Result<usize, Error> {
        let max = u32::try_from(len)
            .map_err(|_| Error::InvalidArgument("Collection is larger than u32::MAX"))?;

        let index = self.integer(max)?;

        usize::try_from(index).map_err(|_| Error::InvalidArgument("Index does not fit in usize"))
    }

    /// Draws an integer in `[lo, hi]`, swapping the bounds when reversed.
    fn integer_between(&mut self, lo: u32, hi: u32) -> Result<u32, Error> {
        let (lo, hi) = if lo > hi { (hi, lo) } else { (lo, hi) };

        match (hi - lo).checked_add(1) {
            Some(span) => Ok(lo + self.integer(span)?),
            // Whole u32 domain, compose two uniform halves.
            None => {
                let high = self.integer(1 << 16)?;
                let low = self.integer(1 << 16)?;
                Ok((high << 16) | low)
            }
        }
    }
}

/// Unbuffered source: every draw reads four fresh bytes from the CSPRNG.
#[derive(Debug)]
pub struct SecureRandom<R = ThreadRng> {
    rng: R,
}

impl SecureRandom {
    #[must_use]
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for SecureRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CryptoRng> SecureRandom<R> {
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0; 4];

        self.rng.fill_bytes(&mut bytes);

        u32::from_le_bytes(bytes)
    }
}

impl<R: CryptoRng> RandomSource for SecureRandom<R> {
    /// Rejection sampling: values at or above `floor(2^32 / max) * max` are
    /// redrawn so every residue is equally likely.
    fn integer(&mut self, max: u32) -> Result<u32, Error> {
        if max == 0 {
            return Err(Error::InvalidArgument("max must be greater than zero"));
        }

        // 2^32 mod max, the size of the biased tail.
        let rejected = max.wrapping_neg() % max;
        let limit = u32::MAX - rejected;

        loop {
            let value = self.next_u32();

            if value <= limit {
                return Ok(value % max);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use paste::paste;

    /// Wilson-Hilferty approximation of the chi-square quantile at 99.9%.
    pub fn chi_square_critical(degrees: f64) -> f64 {
        const Z_999: f64 = 3.090_232;

        let term = 2.0 / (9.0 * degrees);

        degrees * (1.0 - term + Z_999 * term.sqrt()).powi(3)
    }

    pub fn chi_square(counts: &[u64], draws: u64) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let expected = draws as f64 / counts.len() as f64;

        counts
            .iter()
            .map(|&c| {
                #[allow(clippy::cast_precision_loss)]
                let diff = c as f64 - expected;
                diff * diff / expected
            })
            .sum()
    }

    macro_rules! test_uniform {
        ($max:literal) => {
            paste! {
                #[test]
                fn [<test_integer_uniform_ $max>]() -> Result<(), Box<dyn std::error::Error>> {
                    let max: u32 = $max;
                    let draws = u64::from(max * 20).max(10_000);

                    let mut random = SecureRandom::new();
                    let mut counts = vec![0_u64; max as usize];

                    for _ in 0..draws {
                        let value = random.integer(max)?;
                        counts[value as usize] += 1;
                    }

                    let statistic = chi_square(&counts, draws);
                    let critical = chi_square_critical(f64::from(max - 1));

                    assert!(
                        statistic < critical,
                        "chi-square {statistic} exceeds {critical} for max {max}"
                    );

                    Ok(())
                }
            }
        };
    }

    test_uniform!(2);
    test_uniform!(3);
    test_uniform!(10);
    test_uniform!(100);
    test_uniform!(7919);

    #[test]
    fn test_integer_rejects_zero() {
        let mut random = SecureRandom::new();

        assert_eq!(
            random.integer(0),
            Err(Error::InvalidArgument("max must be greater than zero"))
        );
    }

    #[test]
    fn test_integer_one_is_always_zero() {
        let mut random = SecureRandom::new();

        for _ in 0..100 {
            assert_eq!(random.integer(1), Ok(0));
        }
    }

    #[test]
    fn test_integer_stays_in_range() {
        let mut random = SecureRandom::new();

        for max in [2, 7, 255, 256, 1000, u32::MAX] {
            for _ in 0..100 {
                assert!(random.integer(max).unwrap() < max);
            }
        }
    }

    #[test]
    fn test_select_empty_is_none() {
        let mut random = SecureRandom::new();
        let empty: [u8; 0] = [];

        assert_eq!(random.select(&empty), Ok(None));
    }

    #[test]
    fn test_select_returns_member() {
        let mut random = SecureRandom::new();
        let items = ["a", "b", "c"];

        for _ in 0..50 {
            let picked = random.select(&items).unwrap().unwrap();
            assert!(items.contains(picked));
        }
    }

    #[test]
    fn test_integer_between_normalizes_bounds() {
        let mut random = SecureRandom::new();

        for _ in 0..200 {
            let value = random.integer_between(20, 10).unwrap();
            assert!((10..=20).contains(&value));
        }

        assert_eq!(random.integer_between(7, 7), Ok(7));
    }

    #[test]
    fn test_integer_between_full_range() {
        let mut random = SecureRandom::new();

        assert!(random.integer_between(0, u32::MAX).is_ok());
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        use rand_chacha::rand_core::SeedableRng;
        use rand_chacha::ChaCha20Rng;

        let mut a = SecureRandom::with_rng(ChaCha20Rng::seed_from_u64(42));
        let mut b = SecureRandom::with_rng(ChaCha20Rng::seed_from_u64(42));

        for _ in 0..100 {
            assert_eq!(a.integer(1000), b.integer(1000));
        }
    }
}
