use std::collections::HashSet;
use std::sync::Arc;

use super::CaseVariant;
use crate::random::{self, RandomSource};

type Word = Arc<str>;

/// One case variant of a word list, sorted by length.
///
/// Every length span `[min, max]` is a contiguous slice of `words`, so a draw
/// never has to concatenate anything.
#[derive(Debug, Default)]
struct Layout {
    words: Vec<Word>,
    /// `starts[n]` is the position of the first word at least `n` characters long.
    starts: Vec<usize>,
}

impl Layout {
    /// Deduplicates the variant forms themselves, so two originals that case
    /// map to the same string count once.
    fn build(forms: impl IntoIterator<Item = String>) -> Self {
        let mut seen = HashSet::new();

        let mut sized: Vec<(usize, Word)> = forms
            .into_iter()
            .filter(|form| seen.insert(form.clone()))
            .map(|form| (form.chars().count(), Word::from(form)))
            .collect();

        sized.sort_by_key(|(length, _)| *length);

        let longest = sized.last().map_or(0, |(length, _)| *length);
        let mut starts = Vec::with_capacity(longest + 2);
        let mut position = 0;

        for length in 0..=longest + 1 {
            while position < sized.len() && sized[position].0 < length {
                position += 1;
            }

            starts.push(position);
        }

        Self {
            words: sized.into_iter().map(|(_, word)| word).collect(),
            starts,
        }
    }

    fn start(&self, length: usize) -> usize {
        self.starts.get(length).copied().unwrap_or(self.words.len())
    }

    /// Words with `min <= length <= max`; expects `min <= max`.
    fn between(&self, min: usize, max: usize) -> &[Word] {
        let start = self.start(min);
        let end = self.start(max.saturating_add(1)).max(start);

        &self.words[start..end]
    }

    fn shortest(&self) -> Option<usize> {
        self.words.first().map(|word| word.chars().count())
    }

    fn longest(&self) -> Option<usize> {
        self.words.last().map(|word| word.chars().count())
    }
}

/// Immutable, fully built index of one word list.
///
/// Each case variant is laid out on its own, keyed by the length of that
/// variant's form: case mapping may change a word's length (`ß` uppercases
/// to `SS`) and may merge words that differ only in case.
#[derive(Debug)]
pub struct CorpusIndex {
    words: Vec<Word>,
    variants: [Layout; 4],
}

impl CorpusIndex {
    /// Builds the index, trimming entries and dropping blanks and duplicates.
    pub fn build<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();

        for word in words {
            let word = word.as_ref().trim();

            if !word.is_empty() && seen.insert(word.to_owned()) {
                unique.push(Word::from(word));
            }
        }

        let variants =
            CaseVariant::ALL.map(|variant| Layout::build(unique.iter().map(|w| variant.apply(w))));

        Self {
            words: unique,
            variants,
        }
    }

    fn layout(&self, variant: CaseVariant) -> &Layout {
        &self.variants[variant.slot()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn words(&self) -> &[Arc<str>] {
        &self.words
    }

    #[must_use]
    pub fn shortest(&self) -> Option<usize> {
        self.layout(CaseVariant::Original).shortest()
    }

    #[must_use]
    pub fn longest(&self) -> Option<usize> {
        self.layout(CaseVariant::Original).longest()
    }

    /// `(length, word count)` pairs in ascending length order.
    #[must_use]
    pub fn length_histogram(&self) -> Vec<(usize, usize)> {
        self.layout(CaseVariant::Original)
            .starts
            .windows(2)
            .enumerate()
            .filter_map(|(length, pair)| {
                let count = pair[1] - pair[0];
                (count > 0).then_some((length, count))
            })
            .collect()
    }

    #[must_use]
    pub fn count_between(&self, min: usize, max: usize) -> usize {
        let (min, max) = normalize(min, max);

        self.layout(CaseVariant::Original).between(min, max).len()
    }

    /// Draws a word whose length, in the requested variant, lies in `[min, max]`.
    ///
    /// Returns `None` when no indexed word has a matching length.
    pub fn random_word<R: RandomSource>(
        &self,
        min: usize,
        max: usize,
        variant: CaseVariant,
        rng: &mut R,
    ) -> Result<Option<String>, random::Error> {
        let (min, max) = normalize(min, max);
        let candidates = self.layout(variant).between(min, max);

        Ok(rng.select(candidates)?.map(|w| w.to_string()))
    }
}

const fn normalize(min: usize, max: usize) -> (usize, usize) {
    if min > max { (max, min) } else { (min, max) }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::random::{RandomBuffer, SecureRandom};

    fn small() -> CorpusIndex {
        CorpusIndex::build(["ab", "cde", "fghi"])
    }

    #[test]
    fn test_build_dedups_and_trims() {
        let index = CorpusIndex::build(["  apple ", "apple", "", "   ", "pear"]);

        assert_eq!(index.len(), 2);
        assert_eq!(index.length_histogram(), vec![(4, 1), (5, 1)]);
    }

    #[test]
    fn test_range_draw_stays_in_corpus() {
        let index = small();
        let mut rng = SecureRandom::new();

        for _ in 0..200 {
            let word = index
                .random_word(2, 4, CaseVariant::Original, &mut rng)
                .unwrap()
                .unwrap();

            assert!(["ab", "cde", "fghi"].contains(&word.as_str()));
        }

        assert_eq!(index.count_between(2, 4), 3);
    }

    #[test]
    fn test_swapped_and_equal_bounds() {
        let index = small();
        let mut rng = SecureRandom::new();

        let word = index
            .random_word(4, 3, CaseVariant::Original, &mut rng)
            .unwrap()
            .unwrap();
        assert!(word == "cde" || word == "fghi");

        let word = index
            .random_word(3, 3, CaseVariant::Original, &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(word, "cde");

        assert_eq!(index.count_between(4, 3), 2);
    }

    #[test]
    fn test_no_match_is_none() {
        let index = small();
        let mut rng = SecureRandom::new();

        assert_eq!(
            index.random_word(7, 9, CaseVariant::Original, &mut rng),
            Ok(None)
        );
        assert_eq!(index.count_between(7, 9), 0);

        let empty = CorpusIndex::build(Vec::<String>::new());
        assert!(empty.is_empty());
        assert_eq!(
            empty.random_word(1, 5, CaseVariant::Lower, &mut rng),
            Ok(None)
        );
    }

    #[test]
    fn test_bounds_outside_corpus_are_clamped() {
        let index = small();
        let mut rng = SecureRandom::new();

        let word = index
            .random_word(0, 100, CaseVariant::Upper, &mut rng)
            .unwrap()
            .unwrap();

        assert!(["AB", "CDE", "FGHI"].contains(&word.as_str()));
    }

    #[test]
    fn test_case_variants_are_precomputed() {
        let index = CorpusIndex::build(["mIxEd"]);
        let mut rng = RandomBuffer::new(64).unwrap();

        let draw = |variant, rng: &mut RandomBuffer| {
            index.random_word(5, 5, variant, rng).unwrap().unwrap()
        };

        assert_eq!(draw(CaseVariant::Original, &mut rng), "mIxEd");
        assert_eq!(draw(CaseVariant::Lower, &mut rng), "mixed");
        assert_eq!(draw(CaseVariant::Upper, &mut rng), "MIXED");
        assert_eq!(draw(CaseVariant::Capitalized, &mut rng), "Mixed");
    }

    #[test]
    fn test_wide_span_is_one_slice() {
        let words: Vec<String> = (1..=20).map(|n| "x".repeat(n)).collect();
        let index = CorpusIndex::build(&words);
        let mut rng = SecureRandom::new();

        assert_eq!(index.layout(CaseVariant::Original).between(1, 20).len(), 20);
        assert_eq!(index.layout(CaseVariant::Upper).between(3, 7).len(), 5);

        for _ in 0..100 {
            let word = index
                .random_word(1, 20, CaseVariant::Original, &mut rng)
                .unwrap()
                .unwrap();
            assert!((1..=20).contains(&word.len()));
        }

        assert_eq!(index.count_between(1, 20), 20);
        assert_eq!(index.count_between(0, usize::MAX), 20);
        assert_eq!(index.count_between(21, 40), 0);
    }

    #[test]
    fn test_variant_keyed_by_its_own_length() {
        let index = CorpusIndex::build(["straße", "garden"]);
        let mut rng = SecureRandom::new();

        for _ in 0..100 {
            let word = index
                .random_word(6, 6, CaseVariant::Upper, &mut rng)
                .unwrap()
                .unwrap();
            assert_eq!(word, "GARDEN");
        }

        assert_eq!(
            index.random_word(7, 7, CaseVariant::Upper, &mut rng),
            Ok(Some("STRASSE".to_owned()))
        );
        assert_eq!(
            index.random_word(7, 7, CaseVariant::Original, &mut rng),
            Ok(None)
        );
        assert_eq!(index.length_histogram(), vec![(6, 2)]);
    }

    #[test]
    fn test_variants_dedup_independently() {
        let index = CorpusIndex::build(["Apple", "apple", "pears"]);
        let mut rng = SecureRandom::new();

        assert_eq!(index.len(), 3);
        assert_eq!(index.layout(CaseVariant::Original).between(5, 5).len(), 3);
        assert_eq!(index.layout(CaseVariant::Lower).between(5, 5).len(), 2);
        assert_eq!(index.layout(CaseVariant::Upper).between(5, 5).len(), 2);

        let draws = 20_000;
        let apples = (0..draws)
            .filter(|_| {
                index
                    .random_word(5, 5, CaseVariant::Lower, &mut rng)
                    .unwrap()
                    .unwrap()
                    == "apple"
            })
            .count();

        #[allow(clippy::cast_precision_loss)]
        let share = apples as f64 / f64::from(draws);
        assert!((share - 0.5).abs() < 0.03, "apple share {share}");
    }

    #[test]
    fn test_every_range_draw_respects_bounds() {
        let index = CorpusIndex::build(super::super::parse_word_list(include_str!("words.txt")));
        let mut rng = SecureRandom::new();

        let shortest = index.shortest().unwrap();
        let longest = index.longest().unwrap();

        for min in shortest..=longest {
            for max in min..=longest {
                let word = index
                    .random_word(max, min, CaseVariant::Original, &mut rng)
                    .unwrap();

                if let Some(word) = word {
                    let len = word.chars().count();
                    assert!(min <= len && len <= max);
                } else {
                    assert_eq!(index.count_between(min, max), 0);
                }
            }
        }
    }
}
