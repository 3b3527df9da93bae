use std::path::Path;

use super::{parse_word_list, Error};

/// Reads a newline separated word list from disk.
pub async fn read_word_list(path: &Path) -> Result<Vec<String>, Error> {
    let contents = tokio::fs::read_to_string(path).await?;

    let words: Vec<String> = parse_word_list(&contents).map(str::to_owned).collect();

    log::debug!("Read {} entries from {}", words.len(), path.display());

    Ok(words)
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;
    use crate::corpus::{CaseVariant, WordCorpus};
    use crate::random::SecureRandom;

    #[tokio::test]
    async fn test_read_word_list_skips_comments() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "# header")?;
        writeln!(file, "alpha")?;
        writeln!(file)?;
        writeln!(file, "  beta  ")?;

        let words = read_word_list(file.path()).await?;

        assert_eq!(words, vec!["alpha", "beta"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_load_custom_file() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "ab\ncde\nfghi")?;

        let corpus = WordCorpus::new();
        let count = corpus.load_custom_file("file", file.path()).await?;

        assert_eq!(count, 3);

        let word = corpus.random_word_between(
            2,
            4,
            CaseVariant::Upper,
            "file",
            &mut SecureRandom::new(),
        )?;
        assert!(matches!(word.as_deref(), Some("AB" | "CDE" | "FGHI")));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let corpus = WordCorpus::new();

        let result = corpus
            .load_custom_file("missing", "/definitely/not/a/wordlist.txt")
            .await;

        assert!(matches!(result, Err(Error::IO(_))));
        assert!(!corpus.contains("missing"));
    }
}
