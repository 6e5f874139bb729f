//! Slot table simulator CLI.
//!
//! Run Monte Carlo simulations to check the payout table.
//!
//! Usage:
//!   cargo run --bin bfruit-sim -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin bfruit-sim                       # 100k spins at bet 1
//!   cargo run --bin bfruit-sim -- -n 1000000 -b 10   # a million spins at bet 10
//!   cargo run --bin bfruit-sim -- --seed 42 --json   # reproducible run, JSON saved

use anyhow::Context;
use bfruit::logging::init_stderr_logging;
use bfruit::simulator::{run_simulation, SimConfig};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bfruit-sim", version = bfruit::build_info::BUILD_VERSION)]
#[command(about = "Monte Carlo payout analysis for the bfruit table")]
struct Cli {
    /// Spins for the return-to-player pass
    #[arg(short = 'n', long, default_value_t = 100_000)]
    spins: u64,

    /// Bet per spin
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=10))]
    bet: u32,

    /// Wallets played from 20 credits until the game is over
    #[arg(short, long, default_value_t = 1000)]
    sessions: u32,

    /// Spin cap per session
    #[arg(long, default_value_t = 100_000)]
    max_session_spins: u64,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Also write the report as JSON next to the working directory
    #[arg(long)]
    json: bool,

    /// Print one line per session
    #[arg(short, long)]
    verbose: bool,

    /// Tracing filter, e.g. "debug"
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_stderr_logging(cli.log_level.as_deref());

    let config = SimConfig {
        spins: cli.spins,
        bet: cli.bet,
        sessions: cli.sessions,
        max_spins_per_session: cli.max_session_spins,
        seed: cli.seed,
        verbosity: if cli.verbose { 2 } else { 1 },
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                  BFRUIT PAYOUT SIMULATOR                      ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Spins:          {}", config.spins);
    println!("  Bet:            {}", config.table_bet());
    println!("  Sessions:       {}", config.sessions);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);
    println!("{}", report.to_text());

    if cli.json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json())
            .with_context(|| format!("writing {}", filename))?;
        println!("JSON report saved to: {}", filename);
    }
    Ok(())
}
