//! Direct encoder scenarios against `sieve-jit`, bypassing the mixer
//! entirely: build one straight-line function by hand, finalize it,
//! and call it. Covers the end-to-end scenarios S1-S4 and the
//! encoder's universal properties 1-5.
//!
//! The JIT's argument registers always carry pointers (per the host
//! ABI), so every scenario here loads through `arg0`/`arg1` rather
//! than treating them as bare integers.

use sieve_jit::emitter::{
    emit_arith_rm, emit_arith_rr, emit_bswap, emit_load, emit_ret, emit_rot_imm, emit_shift_imm, emit_store, ArithOp, RotOp,
    ShiftOp,
};
use sieve_jit::reg::{physical, ARG_DATA, ARG_STATE};
use sieve_jit::CodeBuffer;

/// Keeps a finalized buffer and its typed entry point alive together,
/// the same shape as `sieve_mixer::lower::MixFn` but generic over the
/// scratch signatures these tests need.
struct Compiled<F> {
    _buf: CodeBuffer,
    entry: F,
}

fn compile<F>(build: impl FnOnce(&mut CodeBuffer), transmute: unsafe fn(*const u8) -> F) -> Compiled<F> {
    let mut buf = CodeBuffer::new().unwrap();
    build(&mut buf);
    let ptr = buf.finalize().unwrap();
    let entry = unsafe { transmute(ptr) };
    Compiled { _buf: buf, entry }
}

type TwoPtrFn = unsafe extern "C" fn(*const u64, *const u64) -> u64;
type OnePtrFn = unsafe extern "C" fn(*const u64) -> u64;
type SwapFn = unsafe extern "C" fn(*mut u64, *mut u64);

unsafe fn as_two_ptr_fn(ptr: *const u8) -> TwoPtrFn {
    std::mem::transmute(ptr)
}
unsafe fn as_one_ptr_fn(ptr: *const u8) -> OnePtrFn {
    std::mem::transmute(ptr)
}
unsafe fn as_swap_fn(ptr: *const u8) -> SwapFn {
    std::mem::transmute(ptr)
}

// -- S1: load two pointer args, add, return --

#[test]
fn s1_add_via_memory_operands() {
    let f = compile(
        |buf| {
            emit_load(buf, physical(0), physical(ARG_STATE), 0);
            emit_arith_rm(buf, ArithOp::Add, physical(0), physical(ARG_DATA), 0);
            emit_ret(buf);
        },
        as_two_ptr_fn,
    );
    let a = 7u64;
    let b = 35u64;
    let result = unsafe { (f.entry)(&a, &b) };
    assert_eq!(result, 42);
}

// -- S2: load and rotate-left by 1 --

#[test]
fn s2_rotate_left_by_one() {
    let f = compile(
        |buf| {
            emit_load(buf, physical(0), physical(ARG_STATE), 0);
            emit_rot_imm(buf, RotOp::Left, physical(0), 1);
            emit_ret(buf);
        },
        as_one_ptr_fn,
    );
    let a = 0x8000000000000001u64;
    let result = unsafe { (f.entry)(&a) };
    assert_eq!(result, 0x0000000000000003);
}

// -- S3: load and byte-swap --

#[test]
fn s3_bswap_reverses_bytes() {
    let f = compile(
        |buf| {
            emit_load(buf, physical(0), physical(ARG_STATE), 0);
            emit_bswap(buf, physical(0));
            emit_ret(buf);
        },
        as_one_ptr_fn,
    );
    let a = 0x0102030405060708u64;
    let result = unsafe { (f.entry)(&a) };
    assert_eq!(result, 0x0807060504030201);
}

// -- S4: swap two memory cells via two scratch registers --
//
// VReg0 and VReg9 are used as temporaries: both map to a caller-saved
// physical register (Rax, R9) under both ABIs, so the function needs
// no prologue to be safely callable from Rust.

#[test]
fn s4_swap_via_moves() {
    let f = compile(
        |buf| {
            emit_load(buf, physical(0), physical(ARG_STATE), 0);
            emit_load(buf, physical(9), physical(ARG_DATA), 0);
            emit_store(buf, physical(ARG_STATE), 0, physical(9));
            emit_store(buf, physical(ARG_DATA), 0, physical(0));
            emit_ret(buf);
        },
        as_swap_fn,
    );
    let mut a = 1u64;
    let mut b = 2u64;
    unsafe { (f.entry)(&mut a, &mut b) };
    assert_eq!((a, b), (2, 1));
}

/// Property 5, second half: swap via the classic three-XOR trick,
/// entirely through read-modify-write memory operands (no temporary
/// register holds either value at rest).
#[test]
fn xor_triple_swap() {
    let f = compile(
        |buf| {
            // Reg0 = a ^ b; a = Reg0
            emit_load(buf, physical(0), physical(ARG_STATE), 0);
            emit_arith_rm(buf, ArithOp::Xor, physical(0), physical(ARG_DATA), 0);
            emit_store(buf, physical(ARG_STATE), 0, physical(0));
            // Reg9 = b ^ a(new) == a(orig); b = Reg9
            emit_load(buf, physical(9), physical(ARG_DATA), 0);
            emit_arith_rm(buf, ArithOp::Xor, physical(9), physical(ARG_STATE), 0);
            emit_store(buf, physical(ARG_DATA), 0, physical(9));
            // Reg0 = a(new) ^ b(new) == b(orig); a = Reg0
            emit_load(buf, physical(0), physical(ARG_STATE), 0);
            emit_arith_rm(buf, ArithOp::Xor, physical(0), physical(ARG_DATA), 0);
            emit_store(buf, physical(ARG_STATE), 0, physical(0));
            emit_ret(buf);
        },
        as_swap_fn,
    );
    let mut a = 0x1234u64;
    let mut b = 0x5678u64;
    unsafe { (f.entry)(&mut a, &mut b) };
    assert_eq!((a, b), (0x5678, 0x1234));
}

// -- Property 1: arithmetic round trip (register-register forms) --

fn check_rr(op: ArithOp, reference: fn(u64, u64) -> u64, a: u64, b: u64) {
    let f = compile(
        |buf| {
            emit_load(buf, physical(0), physical(ARG_STATE), 0);
            emit_load(buf, physical(9), physical(ARG_DATA), 0);
            emit_arith_rr(buf, op, physical(0), physical(9));
            emit_ret(buf);
        },
        as_two_ptr_fn,
    );
    let result = unsafe { (f.entry)(&a, &b) };
    assert_eq!(result, reference(a, b));
}

#[test]
fn arithmetic_round_trip() {
    let pairs = [(0u64, 0u64), (1, 2), (u64::MAX, 1), (0xdead_beef_cafe_babe, 0x1111_2222_3333_4444)];
    for &(a, b) in &pairs {
        check_rr(ArithOp::Add, |a, b| a.wrapping_add(b), a, b);
        check_rr(ArithOp::Sub, |a, b| a.wrapping_sub(b), a, b);
        check_rr(ArithOp::Xor, |a, b| a ^ b, a, b);
    }
}

// -- Property 2: memory round trip (read-modify-write forms) --

fn check_rm(op: ArithOp, reference: fn(u64, u64) -> u64, a: u64, b: u64) {
    let f = compile(
        |buf| {
            emit_load(buf, physical(0), physical(ARG_STATE), 0);
            emit_arith_rm(buf, op, physical(0), physical(ARG_DATA), 0);
            emit_ret(buf);
        },
        as_two_ptr_fn,
    );
    let result = unsafe { (f.entry)(&a, &b) };
    assert_eq!(result, reference(a, b));
}

#[test]
fn memory_round_trip() {
    let pairs = [(10u64, 3u64), (0, u64::MAX), (u64::MAX, u64::MAX)];
    for &(a, b) in &pairs {
        check_rm(ArithOp::Add, |a, b| a.wrapping_add(b), a, b);
        check_rm(ArithOp::Sub, |a, b| a.wrapping_sub(b), a, b);
        check_rm(ArithOp::Xor, |a, b| a ^ b, a, b);
    }
}

// -- Property 3: shift/rotate identities --

fn check_shift_like(build_op: impl Fn(&mut CodeBuffer, u8), reference: fn(u64, u32) -> u64, x: u64, s: u8) {
    let f = compile(
        |buf| {
            emit_load(buf, physical(0), physical(ARG_STATE), 0);
            build_op(buf, s);
            emit_ret(buf);
        },
        as_one_ptr_fn,
    );
    let result = unsafe { (f.entry)(&x) };
    assert_eq!(result, reference(x, s as u32));
}

#[test]
fn shift_identities() {
    let x = 0x8421_1248_ffee_0011u64;
    for s in 1u8..63 {
        check_shift_like(
            |buf, s| emit_shift_imm(buf, ShiftOp::Left, physical(0), s),
            |x, s| x << s,
            x,
            s,
        );
        check_shift_like(
            |buf, s| emit_shift_imm(buf, ShiftOp::Right, physical(0), s),
            |x, s| x >> s,
            x,
            s,
        );
        check_shift_like(
            |buf, s| emit_rot_imm(buf, RotOp::Left, physical(0), s),
            |x, s| (x << s) | (x >> (64 - s)),
            x,
            s,
        );
        check_shift_like(
            |buf, s| emit_rot_imm(buf, RotOp::Right, physical(0), s),
            |x, s| (x >> s) | (x << (64 - s)),
            x,
            s,
        );
    }
}

// -- Property 4: BSWAP identity --

#[test]
fn bswap_identity() {
    let f = compile(
        |buf| {
            emit_load(buf, physical(0), physical(ARG_STATE), 0);
            emit_bswap(buf, physical(0));
            emit_ret(buf);
        },
        as_one_ptr_fn,
    );
    for x in [0x0102030405060708u64, 0, u64::MAX, 0xdead_beef_0000_0001] {
        let result = unsafe { (f.entry)(&x) };
        assert_eq!(result, x.swap_bytes());
    }
}
