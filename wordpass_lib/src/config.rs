use std::borrow::Cow;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::corpus::DEFAULT_CORPUS;

/// Generation settings.
///
/// Bounds (digit counts, padding lengths, word length limits) are expected
/// to be validated by whoever builds the value; generation never alters it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub num_words: usize,
    pub word_length: WordLength,
    pub case_transform: CaseTransform,
    pub separator: Charset,
    pub digits: Digits,
    pub padding: Padding,
    pub dictionary: String,
    /// Names of registered transforms, applied to every word in order.
    pub transforms: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordLength {
    pub min: usize,
    pub max: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Digits {
    pub before: u8,
    pub after: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    #[serde(rename = "char")]
    pub characters: Charset,
    pub before: usize,
    pub after: usize,
    /// Exact output length, 0 disables it.
    pub to_length: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseTransform {
    #[default]
    None,
    Lower,
    Upper,
    Capitalize,
    Invert,
    Alternate,
    Random,
}

/// Set of tokens to draw from.
///
/// A plain string contributes each of its characters as one element, a list
/// contributes each of its entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Charset {
    Chars(String),
    List(Vec<String>),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_words: 3,
            word_length: WordLength::default(),
            case_transform: CaseTransform::Capitalize,
            separator: Charset::from("-_."),
            digits: Digits {
                before: 2,
                after: 2,
            },
            padding: Padding {
                characters: Charset::from("!@$%^&*+=?~"),
                before: 2,
                after: 2,
                to_length: 0,
            },
            dictionary: DEFAULT_CORPUS.to_owned(),
            transforms: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Parses stacked JSON documents as one. Later layers override earlier
    /// ones key by key; nested objects are merged, anything else replaced.
    pub fn from_json_layers<'a>(
        layers: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, serde_json::Error> {
        let mut merged = Value::Object(serde_json::Map::new());

        for layer in layers {
            merge(&mut merged, serde_json::from_str(layer)?);
        }

        serde_json::from_value(merged)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Upper estimate of the random draws a single assembly performs.
    #[must_use]
    pub fn estimated_draws(&self) -> usize {
        let per_word = if self.case_transform == CaseTransform::Random {
            2
        } else {
            1
        };

        1 + self.num_words * per_word + 2 + 2
    }
}

impl Default for WordLength {
    fn default() -> Self {
        Self { min: 4, max: 8 }
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::Chars(String::new())
    }
}

impl Charset {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Chars(chars) => chars.chars().count(),
            Self::List(list) => list.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Chars(chars) => chars.is_empty(),
            Self::List(list) => list.is_empty(),
        }
    }

    #[must_use]
    pub fn nth(&self, index: usize) -> Option<Cow<'_, str>> {
        match self {
            Self::Chars(chars) => chars.chars().nth(index).map(|c| Cow::Owned(c.to_string())),
            Self::List(list) => list.get(index).map(|s| Cow::Borrowed(s.as_str())),
        }
    }
}

impl From<&str> for Charset {
    fn from(value: &str) -> Self {
        Self::Chars(value.to_owned())
    }
}

impl From<Vec<String>> for Charset {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl FromStr for CaseTransform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "lower" => Ok(Self::Lower),
            "upper" => Ok(Self::Upper),
            "capitalize" => Ok(Self::Capitalize),
            "invert" => Ok(Self::Invert),
            "alternate" => Ok(Self::Alternate),
            "random" => Ok(Self::Random),
            other => Err(format!("Unknown case transform {other:?}")),
        }
    }
}

impl Display for CaseTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Lower => "lower",
            Self::Upper => "upper",
            Self::Capitalize => "capitalize",
            Self::Invert => "invert",
            Self::Alternate => "alternate",
            Self::Random => "random",
        };

        write!(f, "{name}")
    }
}

fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                merge(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, overlay) => *base = overlay,
    }
}
