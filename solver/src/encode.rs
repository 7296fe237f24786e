//! The cheat hash as a symbolic transition system.
//!
//! State is `(hash1, hash2)` as 32-bit vectors starting at zero; the only
//! input is the button index, bounded to `[0, 7]`. The update mirrors
//! [`HashState::step`](buttons::HashState::step) operation for operation.

use buttons::{ButtonTable, HashState, BUTTON_COUNT, HASH1_MULTIPLIER};
use ir::{bv_lookup, bv_val, bv_var, int_var, to_dyn, EnvError, SymbolicEnv, SymbolicPath};
use z3::{
    ast::{Ast, Bool},
    Context,
};

pub const HASH1: &str = "hash1";
pub const HASH2: &str = "hash2";
pub const BUTTON: &str = "button";

const WIDTH: u32 = 32;

pub fn hash_env<'ctx>(ctx: &'ctx Context, table: &ButtonTable) -> Result<SymbolicEnv<'ctx>, EnvError> {
    let mut env = SymbolicEnv::new(ctx);

    env.register_variable(HASH1, WIDTH, Some(0));
    env.register_variable(HASH2, WIDTH, Some(0));
    env.register_input(BUTTON, 0, BUTTON_COUNT as i64 - 1);

    let xs = table.xs().map(u64::from);
    env.register_transition(HASH1, move |ctx, curr, input, _next| {
        let button = int_var!(input, BUTTON)?;
        let hash1 = bv_var!(curr, HASH1)?;
        let x = bv_lookup(ctx, &button, &xs, WIDTH);

        let t1 = hash1.bvxor(&x);
        let t2 = t1
            .bvshl(&bv_val!(ctx, 1, WIDTH))
            .bvxor(&t1.bvlshr(&bv_val!(ctx, 31, WIDTH)));
        Some(to_dyn!(t2.bvmul(&bv_val!(ctx, HASH1_MULTIPLIER, WIDTH))))
    })?;

    let ys = table.ys().map(u64::from);
    env.register_transition(HASH2, move |ctx, curr, input, next| {
        let button = int_var!(input, BUTTON)?;
        let hash2 = bv_var!(curr, HASH2)?;
        // hash2 mixes in the already-updated hash1
        let next_hash1 = bv_var!(next, HASH1)?;
        let y = bv_lookup(ctx, &button, &ys, WIDTH);

        let mixed = hash2.bvxor(&y);
        let t3 = mixed.bvxor(&next_hash1.bvlshr(&bv_val!(ctx, 8, WIDTH)));
        let t4 = t3.bvshl(&bv_val!(ctx, 1, WIDTH));
        let t5 = mixed.bvlshr(&bv_val!(ctx, 31, WIDTH));
        Some(to_dyn!(t4.bvxor(&t5)))
    })?;

    Ok(env)
}

/// `hash1[N] = target.hash1` and `hash2[N] = target.hash2`.
pub fn target_constraints<'ctx>(
    ctx: &'ctx Context,
    path: &SymbolicPath<'ctx>,
    target: HashState,
) -> Result<Vec<Bool<'ctx>>, EnvError> {
    let last = path.last_state();
    let hash1 = bv_var!(last, HASH1).ok_or_else(|| EnvError::UndefinedVariable(HASH1.to_string()))?;
    let hash2 = bv_var!(last, HASH2).ok_or_else(|| EnvError::UndefinedVariable(HASH2.to_string()))?;
    Ok(vec![
        hash1._eq(&bv_val!(ctx, target.hash1, WIDTH)),
        hash2._eq(&bv_val!(ctx, target.hash2, WIDTH)),
    ])
}
