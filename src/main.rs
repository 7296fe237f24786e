use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use buttons::{format_hex_list, format_names, parse_hex_u32, parse_letters, ButtonTable, HashState};
use clap::Parser;
use log::*;
use logging::Logger;
use solver::{solve, Outcome, SolverConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Find THPS2 cheat button sequences for a pair of hashes", long_about = None)]
struct Args {
    /// Number of button presses
    #[arg(short = 'n', long, default_value_t = 9)]
    length: usize,

    /// How many times the base pattern repeats; must divide the length
    #[arg(short, long, default_value_t = 1)]
    repeat: usize,

    /// First target hash (hex, `0x` optional)
    #[arg(long, value_parser = parse_hex_u32, default_value = "0x1eca8e89")]
    hash1: u32,

    /// Second target hash (hex, `0x` optional)
    #[arg(long, value_parser = parse_hex_u32, default_value = "0xad2dc1d6")]
    hash2: u32,

    /// Give up after this many milliseconds
    #[arg(short, long)]
    timeout_ms: Option<u64>,

    /// Hash the given letters (e.g. TUXSUXCUX) instead of solving
    #[arg(short, long)]
    check: Option<String>,

    /// Print progress information
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn target(&self) -> HashState {
        HashState::new(self.hash1, self.hash2)
    }

    fn config(&self) -> SolverConfig {
        let config = SolverConfig::new(self.length, self.repeat, self.target());
        match self.timeout_ms {
            Some(ms) => config.with_timeout(Duration::from_millis(ms)),
            None => config,
        }
    }
}

fn check(letters: &str, target: HashState, logger: Logger) -> anyhow::Result<ExitCode> {
    let sequence = parse_letters(letters).context("failed to parse the button sequence")?;
    let trajectory = ButtonTable::default().simulate(&sequence);
    let reached = trajectory.last().copied().unwrap_or_default();

    println!("Sequence: {}", format_names(&sequence));
    println!("HASH 1:   {}", format_hex_list(trajectory.iter().map(|s| s.hash1)));
    println!("HASH 2:   {}", format_hex_list(trajectory.iter().map(|s| s.hash2)));

    if reached == target {
        logger.completed(&format!("{letters} reaches {target}"));
        Ok(ExitCode::SUCCESS)
    } else {
        logger.warning(&format!("{letters} reaches {reached}, not {target}"));
        Ok(ExitCode::FAILURE)
    }
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();
    let logger = Logger::new(args.debug);

    if let Some(letters) = &args.check {
        return check(letters, args.target(), logger);
    }

    let config = args.config();
    config.validate().context("invalid solver configuration")?;
    logger.info(&format!(
        "searching {} presses ({} repeated {} times) for {}",
        config.length,
        config.period(),
        config.repetitions,
        config.target
    ));

    let now = Instant::now();
    let outcome = solve(&config).context("solving failed")?;
    let elapsed = now.elapsed();
    debug!("solver finished in {:?}", elapsed);

    match outcome {
        Outcome::Sat(solution) => {
            println!("{solution}");
            logger.completed(&format!("found {} in {:.2} s", solution.letters(), elapsed.as_secs_f64()));
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Unsat => {
            println!("No solution found.");
            logger.warning(&format!(
                "no {}-press sequence with {} repetitions reaches {}",
                config.length, config.repetitions, config.target
            ));
            Ok(ExitCode::FAILURE)
        }
    }
}
