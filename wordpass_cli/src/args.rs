use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use wordpass::config::CaseTransform;

#[derive(Debug, Parser)]
#[command(name = "Wordpass", author, version, about)]
pub struct Cli {
    /// Increase logging verbosity, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate passwords
    Generate {
        #[arg(default_value_t = 1)]
        count: usize,

        #[command(flatten)]
        options: ConfigArgs,

        #[command(flatten)]
        mode: Mode,
    },
    /// List dictionaries with their word count per length
    Dictionaries {
        /// Word list file to register before listing
        #[arg(short = 'l', long, value_names(["PATH"]))]
        wordlist: Option<PathBuf>,

        #[arg(short, long, value_names(["NAME"]), default_value = "custom")]
        dictionary: String,
    },
    /// Print the resolved configuration as JSON
    Config {
        #[command(flatten)]
        options: ConfigArgs,
    },
}

#[derive(Debug, Args)]
pub struct Source {
    /// JSON configuration file
    #[arg(short, long, value_names(["PATH"]))]
    pub config: Option<PathBuf>,

    /// Word list file, one word per line
    #[arg(short = 'l', long, value_names(["PATH"]))]
    pub wordlist: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub source: Source,

    #[arg(short, long, value_names(["COUNT"]))]
    pub words: Option<usize>,

    #[arg(long, value_names(["LENGTH"]))]
    pub min_length: Option<usize>,

    #[arg(long, value_names(["LENGTH"]))]
    pub max_length: Option<usize>,

    /// none, lower, upper, capitalize, invert, alternate or random
    #[arg(long, value_names(["CASE"]))]
    pub case: Option<CaseTransform>,

    /// Characters to draw the separator from
    #[arg(short, long, value_names(["CHARS"]))]
    pub separator: Option<String>,

    #[arg(long, value_names(["COUNT"]))]
    pub digits_before: Option<u8>,

    #[arg(long, value_names(["COUNT"]))]
    pub digits_after: Option<u8>,

    /// Characters to draw the padding from
    #[arg(long, value_names(["CHARS"]))]
    pub padding_char: Option<String>,

    #[arg(long, value_names(["COUNT"]))]
    pub padding_before: Option<usize>,

    #[arg(long, value_names(["COUNT"]))]
    pub padding_after: Option<usize>,

    /// Pad or truncate the password to exactly this length
    #[arg(long, value_names(["LENGTH"]))]
    pub pad_to: Option<usize>,

    /// Dictionary to draw words from, also the name a --wordlist is registered as
    #[arg(short, long, value_names(["NAME"]))]
    pub dictionary: Option<String>,
}

#[derive(Debug, Args)]
pub struct Mode {
    /// Guarantee every generated password is distinct
    #[arg(short, long, conflicts_with = "parallel")]
    pub unique: bool,

    #[arg(long, value_names(["COUNT"]), requires = "unique")]
    pub max_attempts: Option<usize>,

    /// Spread generation over several threads
    #[arg(short, long)]
    pub parallel: bool,

    #[arg(long, value_names(["COUNT"]), requires = "parallel")]
    pub workers: Option<usize>,
}
