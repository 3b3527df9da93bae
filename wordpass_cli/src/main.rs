use std::process::ExitCode;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use colored::Colorize;

mod args;
mod commands;
mod settings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logger(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            count,
            options,
            mode,
        } => {
            let config = settings::resolve(&options).await?;
            let wordlist = options.source.wordlist.as_deref();
            settings::register_wordlist(wordlist, &config.dictionary).await?;

            commands::generate(count, &config, &mode)
        }
        Commands::Dictionaries {
            wordlist,
            dictionary,
        } => {
            settings::register_wordlist(wordlist.as_deref(), &dictionary).await?;

            commands::list_dictionaries()
        }
        Commands::Config { options } => {
            let config = settings::resolve(&options).await?;
            let wordlist = options.source.wordlist.as_deref();
            settings::register_wordlist(wordlist, &config.dictionary).await?;

            commands::print_config(&config)
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
