//! Runs a resolved plan against an engine.
//!
//! Output is the engine id line, a mode line, then one unsigned decimal value
//! per line in draw order. For a fixed plan the output is byte-identical from
//! run to run.

use crate::engine::{GeneratorEngine, Width};
use crate::error::GenResult;
use crate::plan::{GenerationPlan, SeedMode, Strategy};
use log::debug;
use std::fmt::Display;
use std::io::Write;

/// Seed `engine`, generate `plan.requested_count()` values and write them to `out`.
///
/// Returns the number of values written.
///
/// # Panics
///
/// If the plan's buffer does not satisfy the engine's bulk-fill contract.
/// [`crate::resolve`] never produces such a plan.
pub fn run<E, W>(plan: &GenerationPlan, engine: &mut E, out: &mut W) -> GenResult<usize>
where
    E: GeneratorEngine,
    W: Write,
{
    writeln!(out, "{}", engine.id_string())?;
    writeln!(out, "{} bit generated randoms", plan.width())?;

    match plan.seed_mode() {
        SeedMode::Scalar(seed) => {
            debug!("seeding with scalar {}", seed);
            engine.seed_scalar(*seed);
        }
        SeedMode::Array(key) => {
            debug!("seeding with {}-word array", key.len());
            engine.seed_array(key);
        }
    }

    let count = plan.requested_count();
    match (plan.strategy(), plan.width()) {
        (Strategy::PerValue, Width::W32) => {
            for _ in 0..count {
                writeln!(out, "{}", engine.next_u32())?;
            }
        }
        (Strategy::PerValue, Width::W64) => {
            for _ in 0..count {
                writeln!(out, "{}", engine.next_u64())?;
            }
        }
        (Strategy::BulkBlock, Width::W32) => {
            let mut buf = block_buffer::<u32, E>(plan, engine);
            engine.fill_u32(&mut buf);
            emit(&buf[..count], out)?;
        }
        (Strategy::BulkBlock, Width::W64) => {
            let mut buf = block_buffer::<u64, E>(plan, engine);
            engine.fill_u64(&mut buf);
            emit(&buf[..count], out)?;
        }
    }

    Ok(count)
}

/// Allocate the bulk buffer after re-checking the fill contract.
fn block_buffer<T, E>(plan: &GenerationPlan, engine: &E) -> Vec<T>
where
    T: Copy + Default,
    E: GeneratorEngine,
{
    let size = plan.buffer_size();
    let required = engine.min_array_size(plan.width());
    assert!(
        size % 4 == 0 && size >= required && size >= plan.requested_count(),
        "bulk buffer of {} words violates engine contract (minimum {}, count {})",
        size,
        required,
        plan.requested_count()
    );
    debug!("allocating {}-word block for {} values", size, plan.requested_count());
    vec![T::default(); size]
}

fn emit<T: Display, W: Write>(values: &[T], out: &mut W) -> GenResult<()> {
    for v in values {
        writeln!(out, "{}", v)?;
    }
    Ok(())
}
