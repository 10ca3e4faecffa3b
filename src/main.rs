use std::{io, process};

use clap::Parser;
use colored::Colorize;
use kontig::{
    cli::Args,
    config::Config,
    run::{self, RunSummary},
};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = Config::from_args(&args).unwrap_or_else(|e| {
        eprintln!();
        eprintln!(
            "{}\n {}",
            "Problem parsing arguments:".blue().bold(),
            e.to_string().blue()
        );
        eprintln!();
        eprintln!(
            "{}\n {}",
            "Help menu:".blue().bold(),
            "$ kontig --help".bold()
        );
        eprintln!();
        process::exit(1);
    });

    if !args.quiet {
        println!("{}: {}", "mode".bold(), config.mode.to_string().blue().bold());
        println!("{}: {}", "k-length".bold(), config.k.to_string().blue().bold());
        println!(
            "{}: {}",
            "data".bold(),
            config.input.to_string().underline().bold().blue()
        );
        println!();
    }

    match run::run(&config) {
        Ok(summary) => {
            if !args.quiet {
                print_summary(&summary);
            }
        }
        Err(e) => {
            eprintln!(
                "{}\n {}",
                "Application error:".blue().bold(),
                e.to_string().blue()
            );
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_summary(summary: &RunSummary) {
    match summary {
        RunSummary::GoodReads {
            total,
            accepted,
            path,
        } => {
            println!(
                "{}: {} of {}",
                "good reads".bold(),
                accepted.to_string().green().bold(),
                total
            );
            println!("{}: {}", "written to".bold(), path.display().to_string().underline());
        }
        RunSummary::Contigs {
            stats,
            pruned,
            contigs_path,
            lengths_path,
        } => {
            println!(
                "{}: {}",
                "pruned k-mers".bold(),
                pruned.removed_nodes.to_string().yellow()
            );
            match stats {
                Some(stats) => {
                    println!("{}: {}", "contigs".bold(), stats.count.to_string().green().bold());
                    println!("{}: {}", "max length".bold(), stats.max_length.to_string().green());
                    println!("{}: {}", "N50".bold(), stats.n50.to_string().green());
                }
                None => println!("{}: {}", "contigs".bold(), "0".red().bold()),
            }
            println!(
                "{}: {}, {}",
                "written to".bold(),
                contigs_path.display().to_string().underline(),
                lengths_path.display().to_string().underline()
            );
        }
    }
}
