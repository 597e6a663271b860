//! Cross-crate test suite for the sieve: encoder-level scenarios
//! against raw `sieve-jit`, generator/lowering properties against
//! `sieve-mixer`, and end-to-end acceptance scenarios against
//! `sieve-avalanche`/`sieve-codegen`.
//!
//! This crate has no library surface of its own; everything here is
//! `#[test]` functions, mirroring the layout of the teacher's own
//! integration test crate.

#[cfg(test)]
mod jit;
