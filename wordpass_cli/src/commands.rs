use anyhow::Result;
use colored::Colorize;

use wordpass::{Config, Generator, WordCorpus};

use crate::args::Mode;

pub fn generate(count: usize, config: &Config, mode: &Mode) -> Result<()> {
    let generator = Generator::new();

    let passwords = if mode.unique {
        generator.generate_unique_batch(count, config, mode.max_attempts)?
    } else if mode.parallel {
        generator.generate_parallel(count, config, mode.workers)?
    } else if count == 1 {
        vec![generator.generate(config)?]
    } else {
        generator.generate_batch(count, config, None)?
    };

    for password in passwords {
        println!("{password}");
    }

    Ok(())
}

pub fn list_dictionaries() -> Result<()> {
    let corpus = WordCorpus::global();

    let mut builder = tabled::builder::Builder::new();
    builder.push_record(["Dictionary", "Length", "Words"]);

    for name in corpus.names() {
        let histogram = corpus.length_histogram(&name)?;
        let total: usize = histogram.iter().map(|(_, count)| count).sum();

        for (length, count) in histogram {
            builder.push_record([name.clone(), length.to_string(), count.to_string()]);
        }

        builder.push_record([name.clone(), "total".to_owned(), total.to_string()]);
    }

    let mut table = builder.build();
    table.with(tabled::settings::Style::markdown());

    println!("\n{table}\n");

    Ok(())
}

pub fn print_config(config: &Config) -> Result<()> {
    if !WordCorpus::global().contains(&config.dictionary) {
        let message = format!("Warning: dictionary {:?} is not registered", config.dictionary);
        eprintln!("{}", message.yellow());
    }

    println!("{}", config.to_json_pretty()?);

    Ok(())
}
