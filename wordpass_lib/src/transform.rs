//! Word transforms plugged into assembly.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Config;

pub type TransformError = Box<dyn std::error::Error + Send + Sync>;

/// Pure per-word rewrite (leetspeak, transliteration and the like).
pub trait Transform: Send + Sync {
    fn apply(&self, word: &str, config: &Config) -> Result<String, TransformError>;

    /// Entropy this transform adds per word, for strength estimates.
    fn entropy_bits(&self, config: &Config) -> f64;
}

/// Name to implementation table consulted for [`Config::transforms`].
#[derive(Clone, Default)]
pub struct Transforms(HashMap<String, Arc<dyn Transform>>);

impl Transforms {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, transform: impl Transform + 'static) {
        self.0.insert(name.into(), Arc::new(transform));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Transform>> {
        self.0.get(name)
    }

    /// Looks up every name in order, failing on the first unknown one.
    pub fn resolve<'a>(&'a self, names: &'a [String]) -> Result<Vec<&'a dyn Transform>, &'a str> {
        names
            .iter()
            .map(|name| self.get(name).map(|t| &**t).ok_or(name.as_str()))
            .collect()
    }

    pub fn entropy_bits(&self, config: &Config) -> Result<f64, String> {
        let resolved = self.resolve(&config.transforms).map_err(str::to_owned)?;

        Ok(resolved.iter().map(|t| t.entropy_bits(config)).sum())
    }
}

impl std::fmt::Debug for Transforms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct Reverse;

    impl Transform for Reverse {
        fn apply(&self, word: &str, _: &Config) -> Result<String, TransformError> {
            Ok(word.chars().rev().collect())
        }

        fn entropy_bits(&self, _: &Config) -> f64 {
            0.0
        }
    }

    struct Coin;

    impl Transform for Coin {
        fn apply(&self, word: &str, _: &Config) -> Result<String, TransformError> {
            Ok(word.to_owned())
        }

        #[allow(clippy::cast_precision_loss)]
        fn entropy_bits(&self, config: &Config) -> f64 {
            config.num_words as f64
        }
    }

    #[test]
    fn test_resolve_in_order() {
        let mut transforms = Transforms::new();
        transforms.register("reverse", Reverse);
        transforms.register("coin", Coin);

        let names = vec!["coin".to_owned(), "reverse".to_owned()];
        let resolved = transforms.resolve(&names).unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(
            resolved[1].apply("abc", &Config::default()).unwrap(),
            "cba"
        );
    }

    #[test]
    fn test_resolve_unknown() {
        let transforms = Transforms::new();
        let names = vec!["leet".to_owned()];

        assert_eq!(transforms.resolve(&names).err(), Some("leet"));
    }

    #[test]
    fn test_entropy_bits_sum() {
        let mut transforms = Transforms::new();
        transforms.register("coin", Coin);
        transforms.register("reverse", Reverse);

        let config = Config {
            transforms: vec!["coin".to_owned(), "reverse".to_owned()],
            ..Config::default()
        };

        let bits = transforms.entropy_bits(&config).unwrap();
        assert!((bits - 3.0).abs() < f64::EPSILON);
    }
}
