// ABOUTME: Console observer that runs a table and prints it while it dines.
// ABOUTME: Reads .env and SYMPOSIUM_* variables, with command-line flags on top.

mod render;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use symposium::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "table-watch", about = "Watch philosophers share forks around a ring")]
struct Args {
    /// JSON config file; SYMPOSIUM_* variables are used when absent.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of philosophers (and forks).
    #[arg(short = 'n', long)]
    philosophers: Option<usize>,

    /// Meals each philosopher eats.
    #[arg(short, long)]
    meals: Option<u32>,

    /// Upper bound in milliseconds for every phase delay.
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Milliseconds between redraws.
    #[arg(long, default_value_t = 100)]
    interval_ms: u64,

    /// Print rows one after another instead of redrawing in place.
    #[arg(long)]
    no_clear: bool,
}

fn load_config(args: &Args) -> Result<TableConfig> {
    let mut config = match &args.config {
        Some(path) => TableConfig::from_file(path)?,
        None => TableConfig::from_env()?,
    };

    if let Some(n) = args.philosophers {
        config.philosophers = n;
    }
    if let Some(meals) = args.meals {
        config.meals = meals;
    }
    if let Some(max) = args.delay_ms {
        config.timing = Timing::uniform(0, max);
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let table = Table::start(config)?;
    let observer = table.observer();
    let interval = Duration::from_millis(args.interval_ms.max(1));

    let clear = !args.no_clear;
    let printer = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                () = observer.finished() => break,
                _ = ticker.tick() => {
                    let frame = render::render(&observer.snapshot());
                    if clear {
                        print!("{}", render::CLEAR);
                    }
                    print!("{}", frame);
                }
            }
        }
        observer.snapshot()
    });

    let waited = tokio::select! {
        report = table.wait() => Some(report?),
        result = tokio::signal::ctrl_c() => {
            result?;
            None
        }
    };

    let last = printer.await?;
    println!("{}", render::render(&last));

    match waited {
        Some(report) => println!(
            "{} meals eaten in {:.2?}",
            report.total_meals(),
            report.elapsed
        ),
        None => println!("interrupted after {} meals", last.meals_eaten()),
    }

    Ok(())
}
