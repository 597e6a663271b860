//! Fixed reference mixer programs, used as regression fixtures rather
//! than generated by the random search. Constants taken verbatim from
//! the original tool (see SPEC_FULL.md §7).

use crate::program::{MixerProgram, OpKind, OPS, VARS};

fn program(op: [OpKind; OPS], pairs: [(u8, u8); OPS], shift12: [u8; VARS]) -> MixerProgram {
    let mut v1 = [0u8; OPS];
    let mut v2 = [0u8; OPS];
    for i in 0..OPS {
        v1[i] = pairs[i].0;
        v2[i] = pairs[i].1;
    }
    let mut shift = [0u8; 2 * VARS];
    shift[..VARS].copy_from_slice(&shift12);
    shift[VARS..].copy_from_slice(&shift12);
    MixerProgram { op, v1, v2, shift }
}

/// SpookyHash's own short-mix function.
pub fn spooky_mix() -> MixerProgram {
    program(
        [OpKind::Add, OpKind::Xor, OpKind::Xor, OpKind::Rot, OpKind::Add],
        [(0, 0), (2, 10), (11, 0), (0, 0), (11, 1)],
        [11, 32, 43, 31, 17, 28, 39, 57, 55, 54, 22, 46],
    )
}

pub fn spooky_alpha() -> MixerProgram {
    program(
        [OpKind::Add, OpKind::Rot, OpKind::Xor, OpKind::Add, OpKind::Add],
        [(0, 0), (11, 11), (9, 1), (11, 10), (1, 10)],
        [32, 41, 12, 24, 8, 42, 32, 13, 30, 20, 47, 16],
    )
}

pub fn akron() -> MixerProgram {
    program(
        [OpKind::Add, OpKind::Rot, OpKind::Xor, OpKind::Add, OpKind::Add],
        [(0, 0), (2, 2), (2, 0), (4, 0), (0, 3)],
        [32, 37, 27, 48, 5, 7, 50, 18, 9, 44, 14, 30],
    )
}
