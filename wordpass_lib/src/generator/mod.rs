//! Password assembly.
//!
//! One pipeline, two entropy regimes: [`Generator::generate`] reads the
//! CSPRNG on every draw, [`Generator::generate_buffered`] threads a caller
//! owned [`RandomBuffer`]. Both run [`Generator::assemble`], so the draw
//! order and the output shape are identical.

use std::cmp::Ordering;

use rand::CryptoRng;

use crate::config::{CaseTransform, Config, Padding};
use crate::corpus::{self, CaseVariant, WordCorpus};
use crate::random::{RandomBuffer, RandomSource, SecureRandom};
use crate::token;
use crate::transform::{Transform, Transforms};

mod batch;
mod error;

pub use batch::{split_shares, MAX_POOL_SIZE};
pub use error::Error;

pub struct Generator<'c> {
    corpus: &'c WordCorpus,
    transforms: Transforms,
}

impl Generator<'static> {
    /// Generator over the process-wide dictionary registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_corpus(WordCorpus::global())
    }
}

impl Default for Generator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c> Generator<'c> {
    #[must_use]
    pub fn with_corpus(corpus: &'c WordCorpus) -> Self {
        Self {
            corpus,
            transforms: Transforms::new(),
        }
    }

    #[must_use]
    pub const fn corpus(&self) -> &'c WordCorpus {
        self.corpus
    }

    #[must_use]
    pub const fn transforms(&self) -> &Transforms {
        &self.transforms
    }

    pub fn register_transform(&mut self, name: impl Into<String>, transform: impl Transform + 'static) {
        self.transforms.register(name, transform);
    }

    /// Assembles one password, drawing straight from the CSPRNG.
    pub fn generate(&self, config: &Config) -> Result<String, Error> {
        self.assemble(config, &mut SecureRandom::new())
    }

    /// Assembles one password from a pooled entropy buffer.
    pub fn generate_buffered<R: CryptoRng>(
        &self,
        config: &Config,
        buffer: &mut RandomBuffer<R>,
    ) -> Result<String, Error> {
        self.assemble(config, buffer)
    }

    /// Runs the assembly pipeline against any entropy source.
    ///
    /// Draw order: separator, then per word an optional case coin and the
    /// word itself, then leading digits, trailing digits and padding.
    pub fn assemble<R: RandomSource>(&self, config: &Config, rng: &mut R) -> Result<String, Error> {
        let transforms = self
            .transforms
            .resolve(&config.transforms)
            .map_err(|name| Error::UnknownTransform(name.to_owned()))?;

        let separator = token::token(&config.separator, rng)?.unwrap_or_default();

        let mut words = Vec::with_capacity(config.num_words);

        for position in 0..config.num_words {
            let word = self.draw_word(config, position, rng)?;

            let word = transforms.iter().try_fold(word, |word, transform| {
                transform.apply(&word, config).map_err(Error::Transform)
            })?;

            words.push(word);
        }

        let body = join_nonempty(&words, &separator);

        let before = token::number(config.digits.before, rng)?;
        let after = token::number(config.digits.after, rng)?;

        let core = format!("{before}{body}{after}");

        pad(core, &config.padding, rng)
    }

    fn draw_word<R: RandomSource>(
        &self,
        config: &Config,
        position: usize,
        rng: &mut R,
    ) -> Result<String, Error> {
        let variant = match config.case_transform {
            CaseTransform::None | CaseTransform::Invert => CaseVariant::Original,
            CaseTransform::Lower => CaseVariant::Lower,
            CaseTransform::Upper => CaseVariant::Upper,
            CaseTransform::Capitalize => CaseVariant::Capitalized,
            CaseTransform::Alternate if position % 2 == 0 => CaseVariant::Lower,
            CaseTransform::Alternate => CaseVariant::Upper,
            CaseTransform::Random if rng.boolean()? => CaseVariant::Upper,
            CaseTransform::Random => CaseVariant::Lower,
        };

        let (min, max) = (config.word_length.min, config.word_length.max);

        let word = self
            .corpus
            .random_word_between(min, max, variant, &config.dictionary, rng)?
            .ok_or_else(|| Error::NoMatchingWord {
                dictionary: config.dictionary.clone(),
                min: min.min(max),
                max: min.max(max),
            })?;

        if config.case_transform == CaseTransform::Invert {
            Ok(corpus::invert(&word))
        } else {
            Ok(word)
        }
    }
}

impl std::fmt::Debug for Generator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("dictionaries", &self.corpus.names())
            .field("transforms", &self.transforms)
            .finish()
    }
}

/// Joins the non-empty parts, so an empty part never leaves a dangling separator.
fn join_nonempty(parts: &[String], separator: &str) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

fn pad<R: RandomSource>(core: String, padding: &Padding, rng: &mut R) -> Result<String, Error> {
    if padding.to_length == 0 {
        let before = token::repeat(&padding.characters, padding.before, rng)?;
        let after = token::repeat(&padding.characters, padding.after, rng)?;

        return Ok(format!("{before}{core}{after}"));
    }

    let target = padding.to_length;
    let len = core.chars().count();

    match len.cmp(&target) {
        Ordering::Equal => Ok(core),
        Ordering::Greater => Ok(core.chars().take(target).collect()),
        Ordering::Less => {
            if padding.characters.is_empty() {
                return Err(Error::EmptyPadding);
            }

            let run = token::repeat(&padding.characters, target - len, rng)?;

            // Multi-character list entries can overshoot the target.
            Ok(core.chars().chain(run.chars()).take(target).collect())
        }
    }
}
