//! Bounded unrolling of a deterministic transition system into Z3 constraints.
//!
//! A [`SymbolicEnv`] holds bit-vector state variables with optional initial
//! values, bounded integer inputs that are chosen freely at every step, and
//! one update function per state variable. Unrolling it `k`
//! steps yields `k + 1` symbolic states, `k` symbolic inputs and the
//! constraints tying them together.

use indexmap::IndexMap;
use log::debug;
use std::collections::HashMap;
use thiserror::Error;
use z3::{
    ast::{Ast, Bool, Dynamic, Int, BV},
    Context,
};

#[macro_use]
mod macros;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),

    #[error("undefined input '{0}'")]
    UndefinedInput(String),

    #[error("transition for '{name}' at step {step} did not produce a value of the variable's sort")]
    BadTransition { name: String, step: usize },

    #[error("input period must be positive")]
    ZeroPeriod,
}

/// A bit-vector state variable. Without `init` the first state is free.
#[derive(Debug, Clone, Copy)]
pub struct Variable {
    pub width: u32,
    pub init: Option<u64>,
}

/// An input chosen at each step from `lower..=upper`.
#[derive(Debug, Clone, Copy)]
pub struct Input {
    pub lower: i64,
    pub upper: i64,
}

pub type EnvState<'ctx> = HashMap<&'ctx str, Dynamic<'ctx>>;

/// Computes the next value of one variable from
/// `(ctx, current state, this step's inputs, next state)`.
///
/// Reading the next state lets a variable depend on another variable's
/// updated value within the same step.
pub type Transition<'ctx> = Box<
    dyn Fn(&'ctx Context, &EnvState<'ctx>, &EnvState<'ctx>, &EnvState<'ctx>) -> Option<Dynamic<'ctx>>,
>;

/// The result of unrolling: `states.len() == inputs.len() + 1`.
pub struct SymbolicPath<'ctx> {
    pub states: Vec<EnvState<'ctx>>,
    pub inputs: Vec<EnvState<'ctx>>,
    pub constraints: Vec<Bool<'ctx>>,
}

impl<'ctx> SymbolicPath<'ctx> {
    pub fn bound(&self) -> usize {
        self.inputs.len()
    }

    pub fn last_state(&self) -> &EnvState<'ctx> {
        // states always holds at least the initial state
        &self.states[self.states.len() - 1]
    }

    pub fn formula(&self, ctx: &'ctx Context) -> Bool<'ctx> {
        let refs: Vec<&Bool> = self.constraints.iter().collect();
        Bool::and(ctx, &refs)
    }
}

pub struct SymbolicEnv<'ctx> {
    ctx: &'ctx Context,
    variables: IndexMap<&'ctx str, Variable>,
    inputs: IndexMap<&'ctx str, Input>,
    transitions: HashMap<&'ctx str, Transition<'ctx>>,
}

impl<'ctx> SymbolicEnv<'ctx> {
    pub fn new(ctx: &'ctx Context) -> Self {
        SymbolicEnv {
            ctx,
            variables: IndexMap::new(),
            inputs: IndexMap::new(),
            transitions: HashMap::new(),
        }
    }

    pub fn register_variable(&mut self, name: &'ctx str, width: u32, init: Option<u64>) {
        self.variables.insert(name, Variable { width, init });
    }

    pub fn register_input(&mut self, name: &'ctx str, lower: i64, upper: i64) {
        self.inputs.insert(name, Input { lower, upper });
    }

    /// Registers the update function of `name`, replacing any earlier one.
    /// Variables without a transition are left unconstrained between steps.
    pub fn register_transition(
        &mut self,
        name: &'ctx str,
        update: impl Fn(&'ctx Context, &EnvState<'ctx>, &EnvState<'ctx>, &EnvState<'ctx>) -> Option<Dynamic<'ctx>>
            + 'static,
    ) -> Result<(), EnvError> {
        if !self.variables.contains_key(name) {
            return Err(EnvError::UndefinedVariable(name.to_string()));
        }
        self.transitions.insert(name, Box::new(update));
        Ok(())
    }

    fn generate_state_variables(&self, bound: usize) -> Vec<EnvState<'ctx>> {
        let mut states = Vec::with_capacity(bound + 1);

        for k in 0..=bound {
            let mut curr = EnvState::<'ctx>::new();
            for (name, variable) in self.variables.iter() {
                let state_name = format!("{}_{}", name, k);
                curr.insert(*name, to_dyn!(BV::new_const(self.ctx, state_name, variable.width)));
            }
            states.push(curr);
        }
        states
    }

    fn generate_input_variables(&self, bound: usize) -> Vec<EnvState<'ctx>> {
        (0..bound)
            .map(|k| {
                self.inputs
                    .keys()
                    .map(|name| (*name, to_dyn!(Int::new_const(self.ctx, format!("{}_{}", name, k)))))
                    .collect()
            })
            .collect()
    }

    // State variables are bounded by their width; only inputs need ranges.
    fn generate_bound_constraints(&self, inputs: &[EnvState<'ctx>]) -> Vec<Bool<'ctx>> {
        let mut constraints = Vec::new();

        for (name, input) in self.inputs.iter() {
            for step in inputs {
                if let Some(var) = int_var!(step, name) {
                    constraints.push(var.ge(&Int::from_i64(self.ctx, input.lower)));
                    constraints.push(var.le(&Int::from_i64(self.ctx, input.upper)));
                }
            }
        }
        constraints
    }

    fn generate_initial_constraints(&self, initial: &EnvState<'ctx>) -> Vec<Bool<'ctx>> {
        self.variables
            .iter()
            .filter_map(|(name, variable)| {
                let value = variable.init?;
                let var = bv_var!(initial, name)?;
                Some(var._eq(&bv_val!(self.ctx, value, variable.width)))
            })
            .collect()
    }

    fn generate_transition_relation(
        &self,
        step: usize,
        curr_state: &EnvState<'ctx>,
        input: &EnvState<'ctx>,
        next_state: &EnvState<'ctx>,
    ) -> Result<Vec<Bool<'ctx>>, EnvError> {
        let mut constraints = Vec::new();

        for name in self.variables.keys() {
            let Some(update) = self.transitions.get(name) else {
                continue;
            };
            let bad = || EnvError::BadTransition {
                name: name.to_string(),
                step,
            };

            let value = update(self.ctx, curr_state, input, next_state)
                .and_then(|v| v.as_bv())
                .ok_or_else(bad)?;
            let next_var = bv_var!(next_state, name).ok_or_else(bad)?;
            constraints.push(next_var._eq(&value));
        }
        Ok(constraints)
    }

    /// Unrolls the system `bound` steps.
    pub fn generate_symbolic_path(&self, bound: usize) -> Result<SymbolicPath<'ctx>, EnvError> {
        let states = self.generate_state_variables(bound);
        let inputs = self.generate_input_variables(bound);

        let mut constraints = self.generate_initial_constraints(&states[0]);
        constraints.extend(self.generate_bound_constraints(&inputs));

        for k in 0..bound {
            constraints.extend(self.generate_transition_relation(k, &states[k], &inputs[k], &states[k + 1])?);
        }

        debug!(
            "unrolled {} steps: {} variables, {} inputs, {} constraints",
            bound,
            self.variables.len(),
            self.inputs.len(),
            constraints.len()
        );

        Ok(SymbolicPath {
            states,
            inputs,
            constraints,
        })
    }

    /// Forces input `name` to repeat with the given period:
    /// `input[i] = input[i mod period]` for every `i >= period`.
    ///
    /// A period equal to (or larger than) the path's bound adds nothing.
    pub fn periodic_inputs(
        &self,
        path: &SymbolicPath<'ctx>,
        name: &str,
        period: usize,
    ) -> Result<Vec<Bool<'ctx>>, EnvError> {
        if period == 0 {
            return Err(EnvError::ZeroPeriod);
        }
        if !self.inputs.contains_key(name) {
            return Err(EnvError::UndefinedInput(name.to_string()));
        }

        (period..path.bound())
            .map(|i| {
                let undefined = || EnvError::UndefinedInput(name.to_string());
                let later = int_var!(path.inputs[i], name).ok_or_else(undefined)?;
                let base = int_var!(path.inputs[i % period], name).ok_or_else(undefined)?;
                Ok(later._eq(&base))
            })
            .collect()
    }
}

/// Picks `values[index]` as a bit-vector of `width` bits.
///
/// Builds a chain of if-then-else terms: the result defaults to `values[0]`
/// and is overridden by `values[j]` when `index == j`. Callers are expected
/// to bound `index` separately. An empty table yields zero.
pub fn bv_lookup<'ctx>(ctx: &'ctx Context, index: &Int<'ctx>, values: &[u64], width: u32) -> BV<'ctx> {
    let Some((first, rest)) = values.split_first() else {
        return bv_val!(ctx, 0, width);
    };

    rest.iter()
        .enumerate()
        .fold(bv_val!(ctx, *first, width), |acc, (j, value)| {
            let hit = index._eq(&Int::from_u64(ctx, (j + 1) as u64));
            hit.ite(&bv_val!(ctx, *value, width), &acc)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use z3::{Config, SatResult, Solver};

    fn counter_env(ctx: &Context) -> SymbolicEnv<'_> {
        let mut env = SymbolicEnv::new(ctx);
        env.register_variable("count", 8, Some(0));
        env.register_input("inc", 0, 1);
        env.register_transition("count", |ctx, curr, input, _next| {
            let count = bv_var!(curr, "count")?;
            let inc = int_var!(input, "inc")?;
            let step = inc._eq(&Int::from_i64(ctx, 1)).ite(&bv_val!(ctx, 1, 8), &bv_val!(ctx, 0, 8));
            Some(to_dyn!(count.bvadd(&step)))
        })
        .unwrap();
        env
    }

    #[test]
    fn unrolled_shape() {
        let cfg = Config::new();
        let ctx = Context::new(&cfg);
        let env = counter_env(&ctx);
        let path = env.generate_symbolic_path(4).unwrap();

        assert_eq!(path.states.len(), 5);
        assert_eq!(path.inputs.len(), 4);
        assert_eq!(path.bound(), 4);
        // 1 initial + 2 range constraints per input + 1 transition per step
        assert_eq!(path.constraints.len(), 1 + 8 + 4);
    }

    #[test]
    fn counter_reaches_bound_only_with_all_increments() {
        let mut cfg = Config::new();
        cfg.set_model_generation(true);
        let ctx = Context::new(&cfg);
        let env = counter_env(&ctx);
        let path = env.generate_symbolic_path(3).unwrap();

        let solver = Solver::new(&ctx);
        solver.assert(&path.formula(&ctx));
        solver.assert(&bv_var!(path.last_state(), "count").unwrap()._eq(&bv_val!(&ctx, 3, 8)));
        assert_eq!(solver.check(), SatResult::Sat);

        let model = solver.get_model().unwrap();
        for step in &path.inputs {
            let inc = model.eval(&int_var!(step, "inc").unwrap(), true).unwrap();
            assert_eq!(inc.as_i64(), Some(1));
        }
    }

    #[test]
    fn counter_cannot_outrun_its_steps() {
        let cfg = Config::new();
        let ctx = Context::new(&cfg);
        let env = counter_env(&ctx);
        let path = env.generate_symbolic_path(3).unwrap();
        let count = bv_var!(path.last_state(), "count").unwrap();

        let solver = Solver::new(&ctx);
        solver.assert(&path.formula(&ctx));
        for reachable in 0..=3 {
            solver.push();
            solver.assert(&count._eq(&bv_val!(&ctx, reachable, 8)));
            assert_eq!(solver.check(), SatResult::Sat, "count {reachable}");
            solver.pop(1);
        }

        solver.assert(&count._eq(&bv_val!(&ctx, 4, 8)));
        assert_eq!(solver.check(), SatResult::Unsat);
    }

    #[test]
    fn unset_initial_value_leaves_the_first_state_free() {
        let cfg = Config::new();
        let ctx = Context::new(&cfg);
        let mut env = SymbolicEnv::new(&ctx);
        env.register_variable("fixed", 8, Some(5));
        env.register_variable("free", 8, None);
        let path = env.generate_symbolic_path(0).unwrap();
        assert_eq!(path.constraints.len(), 1);

        let solver = Solver::new(&ctx);
        solver.assert(&path.formula(&ctx));
        solver.assert(&bv_var!(path.states[0], "free").unwrap()._eq(&bv_val!(&ctx, 200, 8)));
        assert_eq!(solver.check(), SatResult::Sat);
        solver.assert(&bv_var!(path.states[0], "fixed").unwrap()._eq(&bv_val!(&ctx, 6, 8)));
        assert_eq!(solver.check(), SatResult::Unsat);
    }

    #[test]
    fn transition_on_unknown_variable_is_rejected() {
        let cfg = Config::new();
        let ctx = Context::new(&cfg);
        let mut env = SymbolicEnv::new(&ctx);
        let err = env
            .register_transition("missing", |_ctx, _curr, _input, _next| None)
            .unwrap_err();
        assert_eq!(err, EnvError::UndefinedVariable("missing".to_string()));
    }

    #[test]
    fn transition_returning_nothing_is_an_error() {
        let cfg = Config::new();
        let ctx = Context::new(&cfg);
        let mut env = SymbolicEnv::new(&ctx);
        env.register_variable("v", 4, None);
        env.register_transition("v", |_ctx, _curr, _input, _next| None).unwrap();

        assert!(matches!(
            env.generate_symbolic_path(2),
            Err(EnvError::BadTransition { step: 0, .. })
        ));
        // zero steps never calls the transition
        assert!(env.generate_symbolic_path(0).is_ok());
    }

    #[test]
    fn periodic_input_count() {
        let cfg = Config::new();
        let ctx = Context::new(&cfg);
        let env = counter_env(&ctx);
        let path = env.generate_symbolic_path(6).unwrap();

        assert_eq!(env.periodic_inputs(&path, "inc", 6).unwrap().len(), 0);
        assert_eq!(env.periodic_inputs(&path, "inc", 3).unwrap().len(), 3);
        assert_eq!(env.periodic_inputs(&path, "inc", 1).unwrap().len(), 5);
        assert_eq!(env.periodic_inputs(&path, "inc", 0).unwrap_err(), EnvError::ZeroPeriod);
        assert_eq!(
            env.periodic_inputs(&path, "nope", 2).unwrap_err(),
            EnvError::UndefinedInput("nope".to_string())
        );
    }

    #[test]
    fn periodic_inputs_force_repetition() {
        let mut cfg = Config::new();
        cfg.set_model_generation(true);
        let ctx = Context::new(&cfg);
        let env = counter_env(&ctx);
        let path = env.generate_symbolic_path(4).unwrap();

        let solver = Solver::new(&ctx);
        solver.assert(&path.formula(&ctx));
        for c in env.periodic_inputs(&path, "inc", 2).unwrap() {
            solver.assert(&c);
        }
        // the count can only be even with a repeated pair of increments
        solver.assert(&bv_var!(path.last_state(), "count").unwrap()._eq(&bv_val!(&ctx, 3, 8)));
        assert_eq!(solver.check(), SatResult::Unsat);
    }

    #[test]
    fn lookup_selects_by_index() {
        let mut cfg = Config::new();
        cfg.set_model_generation(true);
        let ctx = Context::new(&cfg);
        let table = [0x10, 0x20, 0x30, 0x40];

        for (i, expected) in table.iter().enumerate() {
            let index = Int::from_u64(&ctx, i as u64);
            let picked = bv_lookup(&ctx, &index, &table, 32).simplify();
            assert_eq!(picked.as_u64(), Some(*expected));
        }

        // out of range falls back to the first entry
        let index = Int::from_u64(&ctx, 9);
        assert_eq!(bv_lookup(&ctx, &index, &table, 32).simplify().as_u64(), Some(0x10));
        assert_eq!(bv_lookup(&ctx, &index, &[], 32).simplify().as_u64(), Some(0));
    }
}
