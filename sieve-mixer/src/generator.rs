use crate::program::{MixerProgram, OpKind, OPS, ROT_POS, VARS};
use crate::rng::Rng;

fn op_from_mod3(v: u64) -> OpKind {
    match v % 3 {
        0 => OpKind::Add,
        1 => OpKind::Sub,
        _ => OpKind::Xor,
    }
}

fn op_from_mod2(v: u64) -> OpKind {
    if v % 2 == 0 {
        OpKind::Add
    } else {
        OpKind::Sub
    }
}

/// Build one random candidate mixer program, following the original
/// generator's exact control flow (see SPEC_FULL.md §4).
pub fn generate_random(rng: &mut Rng) -> MixerProgram {
    let mut op = [OpKind::Add; OPS];
    let mut v1 = [0u8; OPS];
    let mut v2 = [0u8; OPS];

    op[ROT_POS] = OpKind::Rot;
    v1[ROT_POS] = 0;
    v2[ROT_POS] = 0;

    let mut addop = op_from_mod3(rng.next_u64());
    let mut addpos = 0usize;
    let mut xorpos = 1 + (rng.next_u64() % (OPS as u64 - 2)) as usize;
    if xorpos >= ROT_POS {
        xorpos += 1;
    }

    if addop == OpKind::Xor {
        addpos = xorpos;
        xorpos = 0;
        addop = op_from_mod2(rng.next_u64());
    }
    op[addpos] = addop;
    op[xorpos] = OpKind::Xor;

    for i in 0..OPS {
        if i == addpos || i == xorpos || i == ROT_POS {
            continue;
        }
        op[i] = op_from_mod3(rng.next_u64());
    }

    let mut i = 1usize;
    if i == ROT_POS {
        i += 1;
    }
    v1[i] = 2;
    v2[i] = (VARS - 2) as u8;
    i += 1;

    if i == ROT_POS {
        i += 1;
    }
    v1[i] = (VARS - 1) as u8;
    v2[i] = 0;
    i += 1;

    if i == ROT_POS {
        i += 1;
    }
    v1[i] = (VARS - 1) as u8;
    v2[i] = 1;

    let mut shift = [0u8; 2 * VARS];
    for v in 0..VARS {
        let s = (rng.next_u64() % 65) as u8;
        shift[v] = s;
        shift[v + VARS] = s;
    }

    MixerProgram { op, v1, v2, shift }
}
