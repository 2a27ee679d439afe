//! Command line front end: rank a hand or compute range equities.
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use poker_equity::{compute_equity, evaluate_hand, EquityConfig, EquityRequest, EquityResult};
use std::time::Duration;

#[derive(Debug, Parser)]
#[clap(version, about = "Poker hand ranking and range equity")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank a hand of 1 to 7 cards, e.g. "AhKhQhJhTh".
    Eval {
        cards: String,
        /// Print the result as JSON.
        #[clap(long)]
        json: bool,
    },
    /// Equity of 2 to 6 ranges, e.g. `equity AA "KK,AKs" --board 2c7d9h`.
    Equity(EquityArgs),
}

#[derive(Debug, clap::Args)]
struct EquityArgs {
    /// One range per player.
    #[clap(required = true, num_args = 2..=6)]
    hands: Vec<String>,
    /// Board cards.
    #[clap(long, short, default_value = "")]
    board: String,
    /// Dead cards.
    #[clap(long, short, default_value = "")]
    dead: String,
    /// Enumerate every trial.
    #[clap(long, conflicts_with = "sample")]
    exact: bool,
    /// Sample random trials.
    #[clap(long)]
    sample: bool,
    /// Sampling trial budget.
    #[clap(long, default_value_t = EquityConfig::DEFAULT_MAX_TRIALS)]
    trials: u64,
    /// Sampling standard error target, 0 to disable.
    #[clap(long)]
    stdev: Option<f64>,
    /// Worker threads, 0 for one per CPU.
    #[clap(long, short, default_value_t = 0)]
    threads: usize,
    /// Seed for reproducible sampling.
    #[clap(long)]
    seed: Option<u64>,
    /// Stop after this many seconds.
    #[clap(long)]
    time_limit: Option<f64>,
    /// Print the result as JSON.
    #[clap(long)]
    json: bool,
}

impl EquityArgs {
    fn request(&self) -> Result<EquityRequest> {
        let mut config = EquityConfig::default().with_threads(self.threads).with_max_trials(self.trials);
        if let Some(stdev) = self.stdev {
            config = config.with_stdev_target(stdev);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(secs) = self.time_limit {
            let limit = Duration::try_from_secs_f64(secs).context("invalid --time-limit")?;
            config = config.with_time_limit(limit);
        }

        let mut request = EquityRequest::new(self.hands.iter().cloned())
            .with_board(self.board.as_str())
            .with_dead(self.dead.as_str())
            .with_config(config);
        if self.exact || self.sample {
            request = request.with_enumerate_all(self.exact);
        }
        Ok(request)
    }
}

fn main() -> Result<()> {
    env_logger::builder().format_timestamp_millis().init();
    let cli = Cli::parse();

    match cli.command {
        Command::Eval { cards, json } => {
            let eval = evaluate_hand(&cards).with_context(|| format!("cannot evaluate '{cards}'"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&eval)?);
            } else {
                println!("{} ({}), ranking {}", eval.category, cards.trim(), eval.ranking);
            }
        }
        Command::Equity(args) => {
            let request = args.request()?;
            info!("equity request: {request:?}");
            let result = match compute_equity(&request) {
                Ok(result) => result,
                Err(e) => bail!("{}: {e}", e.kind()),
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_table(&request.hands, &result);
            }
        }
    }

    Ok(())
}

fn print_table(hands: &[String], result: &EquityResult) {
    let width = hands.iter().map(|h| h.len()).max().unwrap_or(0).max(5);
    println!("{:<width$}  {:>8}  {:>12}  {:>12}", "hand", "equity", "wins", "ties");
    for (i, hand) in hands.iter().enumerate() {
        let se = match &result.std_errors {
            Some(errors) => format!(" ±{:.4}", errors[i]),
            None => String::new(),
        };
        println!(
            "{:<width$}  {:>7.3}%  {:>12}  {:>12}{se}",
            hand,
            result.equities[i] * 100.0,
            result.wins[i],
            result.ties[i],
        );
    }
    println!(
        "{} trials in {:.3?} ({:.0}/s){}{}",
        result.hands_evaluated,
        result.elapsed,
        result.speed,
        if result.enumerated_all { ", exact" } else { ", sampled" },
        if result.cancelled { ", stopped early" } else { "" },
    );
}
