/// Precomputed casing of every indexed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseVariant {
    Original,
    Lower,
    Upper,
    Capitalized,
}

impl CaseVariant {
    pub const ALL: [Self; 4] = [Self::Original, Self::Lower, Self::Upper, Self::Capitalized];

    pub(super) const fn slot(self) -> usize {
        match self {
            Self::Original => 0,
            Self::Lower => 1,
            Self::Upper => 2,
            Self::Capitalized => 3,
        }
    }

    #[must_use]
    pub fn apply(self, word: &str) -> String {
        match self {
            Self::Original => word.to_owned(),
            Self::Lower => word.to_lowercase(),
            Self::Upper => word.to_uppercase(),
            Self::Capitalized => {
                let mut chars = word.chars();

                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect()
                })
            }
        }
    }
}

/// Lowercases the first character and uppercases the rest.
#[must_use]
pub fn invert(word: &str) -> String {
    let mut chars = word.chars();

    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars.as_str().to_uppercase().chars()).collect()
    })
}
