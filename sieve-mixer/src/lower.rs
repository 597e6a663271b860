//! Lowers a `MixerProgram` plus a direction and window start into a
//! compiled native function `fn(state: *mut u64, data: *const u64)`.
//!
//! Backward lowering is a deliberately different program, not the
//! mathematical inverse of forward — see SPEC_FULL.md §5.

use std::io;

use sieve_jit::emitter::{emit_arith_rm, emit_arith_rr, emit_bswap, emit_load, emit_rot_imm, emit_store, ArithOp, RotOp};
use sieve_jit::prologue::{emit_epilogue, emit_prologue};
use sieve_jit::reg::{physical, ARG_DATA, ARG_STATE};
use sieve_jit::CodeBuffer;

use crate::program::{MixerProgram, OpKind, OPS, VARS};

/// A compiled mixer function, holding its executable page alive for as
/// long as it needs to be called.
pub struct MixFn {
    _buf: CodeBuffer,
    entry: unsafe extern "C" fn(*mut u64, *const u64),
}

impl MixFn {
    pub fn call(&self, state: &mut [u64; VARS], data: &[u64; VARS]) {
        unsafe { (self.entry)(state.as_mut_ptr(), data.as_ptr()) }
    }
}

fn to_arith(op: OpKind) -> ArithOp {
    match op {
        OpKind::Add => ArithOp::Add,
        OpKind::Sub => ArithOp::Sub,
        OpKind::Xor => ArithOp::Xor,
        OpKind::Rot => panic!("op[0] must not be Rot"),
    }
}

fn unpack(buf: &mut CodeBuffer) {
    let state_ptr = physical(ARG_STATE);
    for var in 0..VARS {
        emit_load(buf, physical(var as u8), state_ptr, (8 * var) as u8);
    }
}

fn bundle(buf: &mut CodeBuffer) {
    let state_ptr = physical(ARG_STATE);
    for var in 0..VARS {
        emit_store(buf, state_ptr, (8 * var) as u8, physical(var as u8));
    }
}

fn feed(buf: &mut CodeBuffer, op0: OpKind, var: usize) {
    let data_ptr = physical(ARG_DATA);
    emit_arith_rm(buf, to_arith(op0), physical(var as u8), data_ptr, (8 * var) as u8);
}

fn rfeed(buf: &mut CodeBuffer, op0: OpKind, state_var: usize, data_index: usize) {
    let data_ptr = physical(ARG_DATA);
    emit_arith_rm(
        buf,
        to_arith(op0.flip_add_sub()),
        physical(state_var as u8),
        data_ptr,
        (8 * data_index) as u8,
    );
}

fn apply_forward(buf: &mut CodeBuffer, op: OpKind, dst: usize, src: usize, shift: u8) {
    let dst = physical(dst as u8);
    match op {
        OpKind::Add | OpKind::Sub | OpKind::Xor => {
            emit_arith_rr(buf, to_arith(op), dst, physical(src as u8));
        }
        OpKind::Rot => {
            if shift % 64 == 0 {
                emit_bswap(buf, dst);
            } else {
                emit_rot_imm(buf, RotOp::Left, dst, shift);
            }
        }
    }
}

fn apply_backward(buf: &mut CodeBuffer, op: OpKind, dst: usize, src: usize, shift: u8) {
    let dst = physical(dst as u8);
    match op {
        OpKind::Add | OpKind::Sub | OpKind::Xor => {
            emit_arith_rr(buf, to_arith(op.flip_add_sub()), dst, physical(src as u8));
        }
        OpKind::Rot => {
            if shift % 64 == 0 {
                emit_bswap(buf, dst);
            } else {
                emit_rot_imm(buf, RotOp::Left, dst, 64 - shift);
            }
        }
    }
}

fn codegen_forward(buf: &mut CodeBuffer, program: &MixerProgram, start: usize) {
    for var in 0..VARS {
        feed(buf, program.op[0], var);
        for op_idx in 1..OPS {
            let dst = (program.v1[op_idx] as usize + var) % VARS;
            let src = (program.v2[op_idx] as usize + var) % VARS;
            apply_forward(buf, program.op[op_idx], dst, src, program.shift_at(start, var));
        }
    }
}

fn codegen_backward(buf: &mut CodeBuffer, program: &MixerProgram, start: usize) {
    for var in (0..VARS).rev() {
        let state_var = (var + 1) % VARS;
        let data_index = VARS - var - 1;
        rfeed(buf, program.op[0], state_var, data_index);
        for op_idx in (1..OPS).rev() {
            let dst = (program.v1[op_idx] as usize + var) % VARS;
            let src = (program.v2[op_idx] as usize + var) % VARS;
            apply_backward(buf, program.op[op_idx], dst, src, program.shift_at(start, var));
        }
    }
}

fn lower(program: &MixerProgram, start: usize, forward: bool) -> io::Result<MixFn> {
    assert!(start < VARS);
    let mut buf = CodeBuffer::new()?;
    emit_prologue(&mut buf);
    unpack(&mut buf);
    if forward {
        codegen_forward(&mut buf, program, start);
    } else {
        codegen_backward(&mut buf, program, start);
    }
    bundle(&mut buf);
    emit_epilogue(&mut buf);

    let ptr = buf.finalize()?;
    // SAFETY: `ptr` was just made executable and holds a function with
    // this exact signature, emitted above.
    let entry = unsafe {
        std::mem::transmute::<*const u8, unsafe extern "C" fn(*mut u64, *const u64)>(ptr)
    };
    Ok(MixFn { _buf: buf, entry })
}

/// Compile the forward-direction mixer with shift-table window `start`.
pub fn lower_forward(program: &MixerProgram, start: usize) -> io::Result<MixFn> {
    lower(program, start, true)
}

/// Compile the backward-direction mixer with shift-table window `start`.
pub fn lower_backward(program: &MixerProgram, start: usize) -> io::Result<MixFn> {
    lower(program, start, false)
}
