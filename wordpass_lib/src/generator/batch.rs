use std::collections::HashSet;
use std::num::NonZeroUsize;

use super::{Error, Generator};
use crate::config::Config;
use crate::random::{RandomBuffer, SecureRandom, DEFAULT_POOL_SIZE};

/// Largest entropy pool a single batch allocates.
///
/// Batches whose estimate exceeds this still get every byte they need; the
/// pool is refilled whenever a draw does not fit, so the cap only bounds memory.
pub const MAX_POOL_SIZE: usize = 1 << 20;

/// Bytes consumed by one draw from a [`RandomBuffer`].
const BYTES_PER_DRAW: usize = 4;

/// Attempts granted per requested password in [`Generator::generate_unique_batch`].
const UNIQUE_ATTEMPTS_FACTOR: usize = 100;

impl Generator<'_> {
    /// Generates `count` passwords sequentially from one shared entropy pool.
    ///
    /// The pool is sized from `buffer_size_hint`, or from the configuration's
    /// draw estimate when no hint is given.
    pub fn generate_batch(
        &self,
        count: usize,
        config: &Config,
        buffer_size_hint: Option<usize>,
    ) -> Result<Vec<String>, Error> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let estimate = count.saturating_mul(config.estimated_draws() * BYTES_PER_DRAW);
        let pool_size = buffer_size_hint
            .unwrap_or(estimate)
            .clamp(DEFAULT_POOL_SIZE, MAX_POOL_SIZE);

        log::debug!("Generating batch of {count} with a {pool_size} byte pool");

        let mut buffer = RandomBuffer::new(pool_size)?;

        (0..count)
            .map(|_| self.generate_buffered(config, &mut buffer))
            .collect()
    }

    /// Generates `count` distinct passwords.
    ///
    /// Gives up with [`Error::LowEntropyExhaustion`] once `max_attempts`
    /// assemblies (default `count * 100`) have not produced enough distinct
    /// values. Never returns fewer than `count` passwords.
    pub fn generate_unique_batch(
        &self,
        count: usize,
        config: &Config,
        max_attempts: Option<usize>,
    ) -> Result<Vec<String>, Error> {
        let max_attempts =
            max_attempts.unwrap_or_else(|| count.saturating_mul(UNIQUE_ATTEMPTS_FACTOR));

        log::debug!("Generating {count} unique passwords within {max_attempts} attempts");

        let mut rng = SecureRandom::new();
        let mut seen = HashSet::with_capacity(count);
        let mut passwords = Vec::with_capacity(count);
        let mut attempts = 0;

        while passwords.len() < count {
            if attempts >= max_attempts {
                log::warn!(
                    "Unique generation exhausted after {attempts} attempts with {} of {count}",
                    passwords.len()
                );

                return Err(Error::LowEntropyExhaustion {
                    requested: count,
                    generated: passwords.len(),
                    attempts,
                });
            }

            attempts += 1;

            let password = self.assemble(config, &mut rng)?;

            if seen.insert(password.clone()) {
                passwords.push(password);
            }
        }

        Ok(passwords)
    }

    /// Generates `count` passwords on `workers` threads (default: available
    /// parallelism). Each worker owns its entropy source; results are
    /// concatenated in worker order once every worker has finished.
    pub fn generate_parallel(
        &self,
        count: usize,
        config: &Config,
        workers: Option<usize>,
    ) -> Result<Vec<String>, Error> {
        let workers = match workers {
            Some(0) => return Err(Error::InvalidArgument("At least one worker is required")),
            Some(workers) => workers,
            None => std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
        };

        let shares = split_shares(count, workers);

        log::debug!("Generating {count} passwords on {workers} workers");

        std::thread::scope(|scope| {
            let handles: Vec<_> = shares
                .into_iter()
                .filter(|share| *share > 0)
                .map(|share| {
                    scope.spawn(move || {
                        let mut rng = SecureRandom::new();

                        (0..share)
                            .map(|_| self.assemble(config, &mut rng))
                            .collect::<Result<Vec<_>, _>>()
                    })
                })
                .collect();

            let mut passwords = Vec::with_capacity(count);

            for handle in handles {
                match handle.join() {
                    Ok(result) => passwords.extend(result?),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }

            Ok(passwords)
        })
    }
}

/// Splits `count` into `workers` shares; the first `count % workers` get one extra.
#[must_use]
pub fn split_shares(count: usize, workers: usize) -> Vec<usize> {
    if workers == 0 {
        return Vec::new();
    }

    let base = count / workers;
    let extra = count % workers;

    (0..workers).map(|i| base + usize::from(i < extra)).collect()
}
