use rand::rngs::ThreadRng;
use rand::CryptoRng;
use zeroize::{Zeroize, Zeroizing};

use super::{Error, RandomSource};

/// Pool size used when the caller has no better estimate.
pub const DEFAULT_POOL_SIZE: usize = 4096;

/// Batched entropy pool.
///
/// A buffer is owned by exactly one generation sequence and is never shared
/// between workers. When a request does not fit in what is left of the pool,
/// the whole pool is refilled and the unconsumed tail is discarded.
pub struct RandomBuffer<R = ThreadRng> {
    pool: Zeroizing<Vec<u8>>,
    cursor: usize,
    rng: R,
}

impl RandomBuffer {
    pub fn new(pool_size: usize) -> Result<Self, Error> {
        Self::with_rng(pool_size, rand::rng())
    }
}

impl<R: CryptoRng> RandomBuffer<R> {
    pub fn with_rng(pool_size: usize, mut rng: R) -> Result<Self, Error> {
        if pool_size == 0 {
            return Err(Error::InvalidArgument("Pool size must be greater than zero"));
        }

        let mut pool = Zeroizing::new(vec![0; pool_size]);
        rng.fill_bytes(&mut pool);

        Ok(Self {
            pool,
            cursor: 0,
            rng,
        })
    }

    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pool.len() - self.cursor
    }

    /// Takes the next `n` bytes of the pool, refilling first if they do not fit.
    pub fn consume(&mut self, n: usize) -> Result<&[u8], Error> {
        if n > self.pool.len() {
            return Err(Error::InvalidArgument(
                "Requested more bytes than the pool can hold",
            ));
        }

        if self.cursor + n > self.pool.len() {
            self.refill();
        }

        let start = self.cursor;
        self.cursor += n;

        Ok(&self.pool[start..self.cursor])
    }

    fn refill(&mut self) {
        log::trace!(
            "Refilling {} byte entropy pool, discarding {} unused bytes",
            self.pool.len(),
            self.remaining()
        );

        self.pool.as_mut_slice().zeroize();
        self.rng.fill_bytes(&mut self.pool);
        self.cursor = 0;
    }
}

impl<R: CryptoRng> RandomSource for RandomBuffer<R> {
    /// Plain modulo over four pooled bytes.
    ///
    /// Unlike [`super::SecureRandom`] there is no rejection step. Residues
    /// below `2^32 mod max` are favoured by at most `max / 2^32` relative to
    /// the rest, which is negligible for the small bounds used by password
    /// assembly (word indices, digits, charset picks).
    fn integer(&mut self, max: u32) -> Result<u32, Error> {
        if max == 0 {
            return Err(Error::InvalidArgument("max must be greater than zero"));
        }

        let bytes: [u8; 4] = self
            .consume(4)?
            .try_into()
            .map_err(|_| Error::InvalidArgument("Pool returned a short slice"))?;

        Ok(u32::from_le_bytes(bytes) % max)
    }
}

impl<R> std::fmt::Debug for RandomBuffer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomBuffer")
            .field("pool", &"Hidden entropy")
            .field("pool_size", &self.pool.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

#[cfg(test)]
impl RandomBuffer {
    fn from_pool(pool: Vec<u8>) -> Self {
        Self {
            pool: Zeroizing::new(pool),
            cursor: 0,
            rng: rand::rng(),
        }
    }
}
