//! Atomic pieces of a password: words, numbers and symbol runs.

use crate::config::Charset;
use crate::corpus::{self, CaseVariant, WordCorpus};
use crate::random::{self, RandomSource};

/// Widest number a single four byte draw can cover (`10^9 < 2^32`).
pub const MAX_NUMBER_DIGITS: u8 = 9;

/// Draws a word of exactly `len` characters.
///
/// A zero length, or a length the dictionary has no words for, is `None`.
pub fn word<R: RandomSource>(
    corpus: &WordCorpus,
    dictionary: &str,
    len: usize,
    variant: CaseVariant,
    rng: &mut R,
) -> Result<Option<String>, corpus::Error> {
    if len == 0 {
        return Ok(None);
    }

    corpus.random_word_between(len, len, variant, dictionary, rng)
}

/// Uniform number in `[0, 10^digits)`, left padded with zeros to `digits`.
///
/// Zero digits yields an empty string.
pub fn number<R: RandomSource>(digits: u8, rng: &mut R) -> Result<String, random::Error> {
    if digits == 0 {
        return Ok(String::new());
    }

    if digits > MAX_NUMBER_DIGITS {
        return Err(random::Error::InvalidArgument(
            "Numbers are limited to 9 digits",
        ));
    }

    let value = rng.integer(10_u32.pow(u32::from(digits)))?;

    Ok(format!("{value:0width$}", width = usize::from(digits)))
}

/// One uniformly chosen element of `charset`, `None` when it is empty.
pub fn token<R: RandomSource>(charset: &Charset, rng: &mut R) -> Result<Option<String>, random::Error> {
    if charset.is_empty() {
        return Ok(None);
    }

    let index = rng.index(charset.len())?;

    Ok(charset.nth(index).map(std::borrow::Cow::into_owned))
}

/// A single draw from `charset` repeated `count` times.
///
/// The run carries the entropy of one selection, not of `count` selections.
/// Nothing is drawn when `count` is zero.
pub fn repeat<R: RandomSource>(
    charset: &Charset,
    count: usize,
    rng: &mut R,
) -> Result<String, random::Error> {
    if count == 0 {
        return Ok(String::new());
    }

    Ok(token(charset, rng)?.map_or_else(String::new, |t| t.repeat(count)))
}
