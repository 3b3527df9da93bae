use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use wordpass::config::Charset;
use wordpass::{Config, WordCorpus};

use crate::args::ConfigArgs;

/// Name a `--wordlist` is registered under when no dictionary is given.
pub const CUSTOM_DICTIONARY: &str = "custom";

/// Built-in defaults, then the user config file, then `--config`, then flags.
///
/// Files are merged key by key, so `--config` only overrides what it sets.
pub async fn resolve(options: &ConfigArgs) -> Result<Config> {
    let mut layers = Vec::new();

    if let Some(contents) = from_user_dir().await {
        layers.push(contents);
    }
    if let Some(path) = &options.source.config {
        layers.push(from_file(path).await?);
    }

    if layers.is_empty() {
        log::info!("Using default config");
    }

    let mut config = Config::from_json_layers(layers.iter().map(String::as_str))
        .context("Could not merge config files")?;

    if options.source.wordlist.is_some() {
        config.dictionary = options
            .dictionary
            .clone()
            .unwrap_or_else(|| CUSTOM_DICTIONARY.to_owned());
    }

    apply(options, &mut config);

    Ok(config)
}

/// Registers the word list at `path`, if any, under `name`.
pub async fn register_wordlist(path: Option<&Path>, name: &str) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let count = WordCorpus::global()
        .load_custom_file(name, path)
        .await
        .with_context(|| format!("Could not load word list {}", path.display()))?;

    if count == 0 {
        log::warn!("Word list {} has no words", path.display());
    }

    Ok(())
}

fn apply(options: &ConfigArgs, config: &mut Config) {
    if let Some(words) = options.words {
        config.num_words = words;
    }
    if let Some(min) = options.min_length {
        config.word_length.min = min;
    }
    if let Some(max) = options.max_length {
        config.word_length.max = max;
    }
    if let Some(case) = options.case {
        config.case_transform = case;
    }
    if let Some(separator) = &options.separator {
        config.separator = Charset::from(separator.as_str());
    }
    if let Some(before) = options.digits_before {
        config.digits.before = before;
    }
    if let Some(after) = options.digits_after {
        config.digits.after = after;
    }
    if let Some(characters) = &options.padding_char {
        config.padding.characters = Charset::from(characters.as_str());
    }
    if let Some(before) = options.padding_before {
        config.padding.before = before;
    }
    if let Some(after) = options.padding_after {
        config.padding.after = after;
    }
    if let Some(length) = options.pad_to {
        config.padding.to_length = length;
    }
    if let Some(dictionary) = &options.dictionary {
        config.dictionary.clone_from(dictionary);
    }
}

/// Reads a config file, checking it parses on its own.
async fn from_file(path: &Path) -> Result<String> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Could not read config file {}", path.display()))?;

    Config::from_json(&contents)
        .with_context(|| format!("Invalid config file {}", path.display()))?;

    Ok(contents)
}

async fn from_user_dir() -> Option<String> {
    let path = user_config_path()?;

    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return None;
    }

    match from_file(&path).await {
        Ok(contents) => {
            log::info!("Using config from {}", path.display());
            Some(contents)
        }
        Err(e) => {
            log::warn!("Ignoring config file: {e:#}");
            None
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("dev", "wordpass", "wordpass")?;

    Some(dirs.config_dir().join("config.json"))
}
