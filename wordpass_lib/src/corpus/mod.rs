//! Indexed word corpora.
//!
//! The default corpus is built once per process from the embedded word list
//! and never changes. Custom corpora are registered by name at runtime: each
//! one is fully indexed before it is published, so readers only ever see a
//! complete entry, and re-registering a name replaces the old entry whole.

use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::random::RandomSource;

mod case;
mod error;
#[cfg(feature = "full")]
mod file;
mod index;

pub use case::{invert, CaseVariant};
pub use error::Error;
#[cfg(feature = "full")]
pub use file::read_word_list;
pub use index::CorpusIndex;

/// Identifier of the built-in corpus.
pub const DEFAULT_CORPUS: &str = "default";

static DEFAULT_WORDS: &str = include_str!("words.txt");

static DEFAULT_INDEX: OnceLock<Arc<CorpusIndex>> = OnceLock::new();

static GLOBAL: OnceLock<WordCorpus> = OnceLock::new();

/// Splits a word list into entries, skipping blank lines and `#` comments.
pub fn parse_word_list(contents: &str) -> impl Iterator<Item = &str> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Registry of the default corpus plus named custom corpora.
#[derive(Debug)]
pub struct WordCorpus {
    default: Arc<CorpusIndex>,
    custom: DashMap<String, Arc<CorpusIndex>>,
}

impl Default for WordCorpus {
    fn default() -> Self {
        Self::new()
    }
}

impl WordCorpus {
    /// Creates a registry with no custom corpora. The default corpus is
    /// shared by every registry in the process.
    #[must_use]
    pub fn new() -> Self {
        Self {
            default: Self::load_default(),
            custom: DashMap::new(),
        }
    }

    /// Process-wide registry.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::new)
    }

    /// Default corpus, indexed on first use.
    pub fn load_default() -> Arc<CorpusIndex> {
        DEFAULT_INDEX
            .get_or_init(|| {
                let index = CorpusIndex::build(parse_word_list(DEFAULT_WORDS));
                log::debug!("Indexed default dictionary with {} words", index.len());
                Arc::new(index)
            })
            .clone()
    }

    /// Indexes `words` and publishes them under `name`, replacing any
    /// previous corpus with that name. Returns the number of indexed words.
    pub fn load_custom<I, S>(&self, name: impl Into<String>, words: I) -> Result<usize, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();

        if name == DEFAULT_CORPUS {
            return Err(Error::ReservedName(name));
        }

        let index = Arc::new(CorpusIndex::build(words));
        let len = index.len();

        if self.custom.insert(name.clone(), index).is_some() {
            log::debug!("Replaced dictionary {name:?} with {len} words");
        } else {
            log::debug!("Registered dictionary {name:?} with {len} words");
        }

        Ok(len)
    }

    /// Reads a word list file and registers it under `name`.
    #[cfg(feature = "full")]
    pub async fn load_custom_file(
        &self,
        name: impl Into<String>,
        path: impl AsRef<std::path::Path>,
    ) -> Result<usize, Error> {
        let words = read_word_list(path.as_ref()).await?;

        self.load_custom(name, words)
    }

    /// Current entry for `id`. The returned handle stays valid even if the
    /// name is re-registered afterwards.
    pub fn get(&self, id: &str) -> Result<Arc<CorpusIndex>, Error> {
        if id == DEFAULT_CORPUS {
            return Ok(self.default.clone());
        }

        self.custom
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::UnknownCorpus(id.to_owned()))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        id == DEFAULT_CORPUS || self.custom.contains_key(id)
    }

    /// Registered names, default first and custom ones sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut custom: Vec<String> = self.custom.iter().map(|e| e.key().clone()).collect();
        custom.sort();

        std::iter::once(DEFAULT_CORPUS.to_owned())
            .chain(custom)
            .collect()
    }

    /// Draws a word of length `[min, max]` from corpus `id`.
    ///
    /// `Ok(None)` means the corpus exists but has no word in that range.
    pub fn random_word_between<R: RandomSource>(
        &self,
        min: usize,
        max: usize,
        variant: CaseVariant,
        id: &str,
        rng: &mut R,
    ) -> Result<Option<String>, Error> {
        let index = self.get(id)?;

        Ok(index.random_word(min, max, variant, rng)?)
    }

    /// Number of words of length `[min, max]` in corpus `id`, without drawing.
    pub fn count_between(&self, min: usize, max: usize, id: &str) -> Result<usize, Error> {
        Ok(self.get(id)?.count_between(min, max))
    }

    pub fn length_histogram(&self, id: &str) -> Result<Vec<(usize, usize)>, Error> {
        Ok(self.get(id)?.length_histogram())
    }
}
