//! Mixer program model, Jenkins PRNG, random generator, fixed preload
//! programs, and JIT lowering for the SpookyMix-style mixer sieve.

pub mod generator;
pub mod lower;
pub mod preloads;
pub mod program;
pub mod rng;

pub use generator::generate_random;
pub use lower::{lower_backward, lower_forward, MixFn};
pub use program::{MixerProgram, OpKind, OPS, ROT_POS, VARS};
pub use rng::{Rng, DEFAULT_SEED};
