use std::fmt;

use buttons::{format_hex_list, format_letters, format_names, Button, ButtonTable, HashState};
use ir::{bv_var, int_var, EnvState, SymbolicPath};
use z3::Model;

use crate::encode::{BUTTON, HASH1, HASH2};
use crate::error::{SolveError, SolveResult};

/// Verdict of a completed run. Unsatisfiable is a normal answer, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Sat(Solution),
    Unsat,
}

impl Outcome {
    pub fn is_sat(&self) -> bool {
        matches!(self, Outcome::Sat(_))
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, Outcome::Unsat)
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Sat(solution) => Some(solution),
            Outcome::Unsat => None,
        }
    }
}

/// A concrete button sequence and the hash states it passes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub buttons: Vec<Button>,
    /// `buttons.len() + 1` states, starting at zero.
    pub trajectory: Vec<HashState>,
}

impl Solution {
    pub(crate) fn from_model<'ctx>(model: &Model<'ctx>, path: &SymbolicPath<'ctx>) -> SolveResult<Self> {
        let buttons = path
            .inputs
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let var = int_var!(step, BUTTON).ok_or_else(|| SolveError::model(format!("no button at step {i}")))?;
                let index = model
                    .eval(&var, true)
                    .and_then(|v| v.as_u64())
                    .ok_or_else(|| SolveError::model(format!("button {i} has no value")))?;
                usize::try_from(index)
                    .ok()
                    .and_then(Button::from_index)
                    .ok_or_else(|| SolveError::model(format!("button {i} out of range: {index}")))
            })
            .collect::<SolveResult<Vec<_>>>()?;

        let trajectory = path
            .states
            .iter()
            .enumerate()
            .map(|(k, state)| {
                Ok(HashState::new(
                    eval_u32(model, state, HASH1, k)?,
                    eval_u32(model, state, HASH2, k)?,
                ))
            })
            .collect::<SolveResult<Vec<_>>>()?;

        Ok(Solution { buttons, trajectory })
    }

    pub fn final_state(&self) -> HashState {
        self.trajectory.last().copied().unwrap_or_default()
    }

    pub fn hash1(&self) -> Vec<u32> {
        self.trajectory.iter().map(|s| s.hash1).collect()
    }

    pub fn hash2(&self) -> Vec<u32> {
        self.trajectory.iter().map(|s| s.hash2).collect()
    }

    pub fn letters(&self) -> String {
        format_letters(&self.buttons)
    }

    /// True when the sequence is its first `period` buttons repeated.
    pub fn is_periodic(&self, period: usize) -> bool {
        period > 0
            && self
                .buttons
                .iter()
                .enumerate()
                .all(|(i, b)| *b == self.buttons[i % period])
    }

    /// Re-runs the buttons through the concrete hash and checks that both the
    /// trajectory and the final state agree with what the solver reported.
    pub fn verify(&self, table: &ButtonTable, target: HashState) -> SolveResult<()> {
        let replayed = table.simulate(&self.buttons);
        if replayed != self.trajectory {
            return Err(SolveError::model(format!(
                "trajectory of {} does not match concrete simulation",
                self.letters()
            )));
        }
        let reached = self.final_state();
        if reached != target {
            return Err(SolveError::model(format!(
                "{} hashes to {reached}, expected {target}",
                self.letters()
            )));
        }
        Ok(())
    }
}

fn eval_u32<'ctx>(model: &Model<'ctx>, state: &EnvState<'ctx>, name: &str, step: usize) -> SolveResult<u32> {
    let var = bv_var!(state, name).ok_or_else(|| SolveError::model(format!("no {name} at state {step}")))?;
    model
        .eval(&var, true)
        .and_then(|v| v.as_u64())
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| SolveError::model(format!("{name} at state {step} has no 32-bit value")))
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution: {}", format_names(&self.buttons))?;
        writeln!(f, "Letters:  {}", self.letters())?;
        writeln!(f, "HASH 1:   {}", format_hex_list(self.hash1()))?;
        write!(f, "HASH 2:   {}", format_hex_list(self.hash2()))
    }
}
