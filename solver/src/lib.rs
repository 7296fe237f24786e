//! Recovers a button sequence from its two cheat hashes with Z3.
//!
//! [`solve`] unrolls the hash `N` times over symbolic button choices, pins the
//! start to zero and the end to the targets, optionally forces the sequence to
//! be a repeated pattern, and asks Z3 for an assignment.
//!
//! ```no_run
//! use solver::{solve, Outcome, SolverConfig};
//!
//! match solve(&SolverConfig::default())? {
//!     Outcome::Sat(solution) => println!("{}", solution.letters()),
//!     Outcome::Unsat => println!("no solution"),
//! }
//! # Ok::<(), solver::SolveError>(())
//! ```

mod config;
pub mod encode;
mod error;
mod solution;

pub use config::{SolverConfig, DEFAULT_TARGET};
pub use error::{ConfigError, SolveError, SolveResult};
pub use solution::{Outcome, Solution};

use log::{debug, info, warn};
use z3::{Config, Context, Params, SatResult, Solver};

pub fn solve(config: &SolverConfig) -> SolveResult<Outcome> {
    config.validate()?;

    let mut cfg = Config::new();
    cfg.set_model_generation(true);
    let ctx = Context::new(&cfg);

    let env = encode::hash_env(&ctx, &config.table)?;
    let path = env.generate_symbolic_path(config.length)?;
    let periodic = env.periodic_inputs(&path, encode::BUTTON, config.period())?;
    let targets = encode::target_constraints(&ctx, &path, config.target)?;

    let solver = Solver::new(&ctx);
    if let Some(timeout) = config.timeout {
        let mut params = Params::new(&ctx);
        params.set_u32("timeout", u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX));
        solver.set_params(&params);
    }

    for constraint in path.constraints.iter().chain(&periodic).chain(&targets) {
        solver.assert(constraint);
    }
    debug!(
        "asserted {} path, {} periodicity and {} target constraints",
        path.constraints.len(),
        periodic.len(),
        targets.len()
    );

    info!(
        "solving for {} presses ({} x {}) reaching {}",
        config.length,
        config.period(),
        config.repetitions,
        config.target
    );
    match solver.check() {
        SatResult::Sat => {
            let model = solver
                .get_model()
                .ok_or_else(|| SolveError::model("solver reported sat without a model"))?;
            let solution = Solution::from_model(&model, &path)?;
            solution.verify(&config.table, config.target)?;
            info!("sat: {}", solution.letters());
            Ok(Outcome::Sat(solution))
        }
        SatResult::Unsat => {
            info!("unsat");
            Ok(Outcome::Unsat)
        }
        SatResult::Unknown => {
            let reason = solver
                .get_reason_unknown()
                .unwrap_or_else(|| "unknown".to_string());
            warn!("solver gave up: {reason}");
            Err(SolveError::Aborted(reason))
        }
    }
}
