//! Avalanche tester: measures how thoroughly a compiled mixer spreads
//! single- and double-bit input differences across its output, over
//! ten derived measures (see SPEC_FULL.md §6).

use sieve_mixer::{lower_backward, lower_forward, MixFn, MixerProgram, Rng, VARS};

pub const MEASURES: usize = 10;
pub const TRIALS: usize = 3;
pub const LIMIT: u32 = 192;
const RETRIES: usize = 5;

/// Run one avalanche sweep (every bit-pair, `TRIALS` random trials
/// each) against a compiled mixer. Returns the lowest per-measure
/// popcount seen, or `None` if any measure falls below `LIMIT`.
pub fn one_test(mix: &MixFn, rng: &mut Rng) -> Option<u32> {
    let mut min_val = (VARS * 64) as u32;

    for i_bit in 0..64 {
        for i_bit2 in i_bit..(VARS * 64) {
            let mut total = [[0u64; VARS]; MEASURES];

            for _trial in 0..TRIALS {
                let mut base = [0u64; VARS];
                for var in base.iter_mut() {
                    *var = rng.next_u64();
                }

                let mut state_a = base;
                let mut data = [0u64; VARS];
                mix.call(&mut state_a, &data);

                data[i_bit / 64] ^= 1u64 << (i_bit & 63);
                if i_bit2 != i_bit {
                    data[i_bit2 / 64] ^= 1u64 << (i_bit2 & 63);
                }

                let mut state_b = base;
                mix.call(&mut state_b, &data);

                let mut measure = [[0u64; VARS]; MEASURES];
                for v in 0..VARS {
                    measure[0][v] = state_a[v];
                    measure[1][v] = state_b[v];
                    measure[2][v] = state_a[v] ^ state_b[v];
                    let diff = state_a[v].wrapping_sub(state_b[v]);
                    measure[3][v] = diff ^ (diff >> 1);
                    let sum = state_a[v].wrapping_add(state_b[v]);
                    measure[4][v] = sum ^ (sum >> 1);
                    measure[5][v] = !state_a[v];
                    measure[6][v] = !state_b[v];
                    measure[7][v] = !measure[2][v];
                    measure[8][v] = !measure[3][v];
                    measure[9][v] = !measure[4][v];
                }

                for m in 0..MEASURES {
                    for v in 0..VARS {
                        total[m][v] |= measure[m][v];
                    }
                }
            }

            for m in 0..MEASURES {
                let counter: u32 = total[m].iter().map(|x| x.count_ones()).sum();
                if counter < LIMIT {
                    println!("// fail {m} {i_bit} {counter}");
                    return None;
                }
                if counter < min_val {
                    min_val = counter;
                }
            }
        }
    }

    Some(min_val)
}

fn robust_estimate(mut tries: [u32; RETRIES]) -> u32 {
    tries.sort_unstable();
    (tries[1] + tries[2]) / 2
}

/// Test a candidate program across every shift-table window and both
/// directions, compiling 2 * `VARS` native functions. Returns the
/// overall minimum robust score, or `None` on the first outright
/// `one_test` failure.
pub fn test_mixer(program: &MixerProgram, rng: &mut Rng) -> Option<u32> {
    let mut min_val = (VARS * 64) as u32;

    for start in 0..VARS {
        let forward = lower_forward(program, start).expect("jit compile failed");
        let backward = lower_backward(program, start).expect("jit compile failed");

        let mut tries_fwd = [0u32; RETRIES];
        let mut tries_bwd = [0u32; RETRIES];
        for i in 0..RETRIES {
            tries_fwd[i] = one_test(&forward, rng)?;
            tries_bwd[i] = one_test(&backward, rng)?;
        }

        let e0 = robust_estimate(tries_fwd);
        let e1 = robust_estimate(tries_bwd);
        min_val = min_val.min(e0).min(e1);
    }

    println!("// minVal = {min_val}");
    Some(min_val)
}
